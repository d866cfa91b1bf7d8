use anyhow::{anyhow, bail, Result};
use clap::Parser;
use shared::domain::ClientId;
use wizard::{
    providers::{AutoConfirm, ConfirmationProvider, NotificationProvider, TracingNotifier},
    view::{order_review, product_selector, step_indicator},
    Catalog, SimulatedOrderSubmitter, WizardController,
};

/// Scripted walk through the order wizard against the sample catalog.
#[derive(Parser, Debug)]
struct Args {
    /// Client to order for; defaults to the first catalog entry.
    #[arg(long)]
    client_id: Option<i64>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt().init();
    let args = Args::parse();

    let catalog = Catalog::sample();
    let confirm = AutoConfirm;
    let notify = TracingNotifier;
    let mut wizard = WizardController::new(SimulatedOrderSubmitter);

    let client = match args.client_id {
        Some(id) => catalog
            .client(ClientId(id))
            .cloned()
            .ok_or_else(|| anyhow!("no client with id {id} in the catalog"))?,
        None => catalog.clients()[0].clone(),
    };

    println!("[paso {}] seleccionando cliente", step_indicator(wizard.step()).index);
    wizard.select_client(client)?;

    println!("[paso {}] armando carrito", step_indicator(wizard.step()).index);
    let products = catalog.products();
    wizard.update_cart(products[0].clone(), 2)?;
    wizard.update_cart(products[2].clone(), 1)?;
    for row in product_selector(&catalog, wizard.state()) {
        println!(
            "  {:<16} {:>8.2}  en carrito: {}",
            row.product.name, row.product.price, row.in_cart
        );
    }

    wizard.proceed_to_review()?;
    let review = order_review(wizard.state()).expect("review step has a client");
    println!("[paso {}] revisión para {}", step_indicator(wizard.step()).index, review.client.name);
    for line in &review.lines {
        println!(
            "  {} x{} @ {:.2} = {:.2}",
            line.name, line.quantity, line.unit_price, line.line_total
        );
    }
    println!("  total: {:.2}", review.total);

    if !confirm.confirm("¿Enviar el pedido?") {
        bail!("pedido cancelado");
    }
    let receipt = wizard.submit().await?;
    notify.notify(&format!(
        "Pedido {} registrado para {}",
        receipt.order_id,
        wizard.completed_client_name().unwrap_or("?")
    ));

    wizard.reset();
    println!("listo para otro pedido");
    Ok(())
}

//! Pure presentation: each function maps the current wizard state (plus
//! reference data) to a renderable view, without mutating anything.

use shared::domain::{Client, Product};

use crate::{Catalog, WizardState, WizardStep};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepIndicator {
    pub index: u8,
    pub label: &'static str,
}

pub fn step_indicator(step: WizardStep) -> StepIndicator {
    match step {
        WizardStep::SelectClient => StepIndicator {
            index: 1,
            label: "Cliente",
        },
        WizardStep::SelectProducts => StepIndicator {
            index: 2,
            label: "Productos",
        },
        WizardStep::Review => StepIndicator {
            index: 3,
            label: "Revisión",
        },
        WizardStep::Success => StepIndicator {
            index: 4,
            label: "Éxito",
        },
    }
}

pub fn client_selector(catalog: &Catalog) -> &[Client] {
    catalog.clients()
}

/// One selectable product with the quantity currently in the cart (zero
/// when absent).
#[derive(Debug, Clone, PartialEq)]
pub struct ProductRow {
    pub product: Product,
    pub in_cart: i64,
}

pub fn product_selector(catalog: &Catalog, state: &WizardState) -> Vec<ProductRow> {
    catalog
        .products()
        .iter()
        .map(|product| ProductRow {
            product: product.clone(),
            in_cart: state
                .cart
                .iter()
                .find(|item| item.product.id == product.id)
                .map_or(0, |item| item.quantity),
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReviewLine {
    pub name: String,
    pub quantity: i64,
    pub unit_price: f64,
    pub line_total: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OrderReviewView {
    pub client: Client,
    pub lines: Vec<ReviewLine>,
    pub total: f64,
}

/// Review summary; `None` unless the wizard is on the review step with a
/// selected client.
pub fn order_review(state: &WizardState) -> Option<OrderReviewView> {
    if state.step != WizardStep::Review {
        return None;
    }
    let client = state.selected_client.clone()?;
    let lines: Vec<ReviewLine> = state
        .cart
        .iter()
        .map(|item| ReviewLine {
            name: item.product.name.clone(),
            quantity: item.quantity,
            unit_price: item.product.price,
            line_total: item.line_total(),
        })
        .collect();
    let total = lines.iter().map(|line| line.line_total).sum();
    Some(OrderReviewView {
        client,
        lines,
        total,
    })
}

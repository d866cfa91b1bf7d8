use shared::{
    domain::{CartItem, Client, ClientId, Product},
    protocol::{OrderLine, OrderReceipt, OrderSubmission},
};
use thiserror::Error;
use tracing::warn;

pub mod catalog;
pub mod providers;
pub mod submit;
pub mod view;

pub use catalog::Catalog;
pub use submit::{OrderSubmitter, SimulatedOrderSubmitter};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardStep {
    SelectClient,
    SelectProducts,
    Review,
    Success,
}

/// Everything the presentation layer needs to render the wizard. Mutated
/// only through [`WizardController`] actions.
#[derive(Debug, Clone, PartialEq)]
pub struct WizardState {
    pub step: WizardStep,
    pub selected_client: Option<Client>,
    pub cart: Vec<CartItem>,
    pub submitting: bool,
    pub error: Option<String>,
}

impl WizardState {
    fn initial() -> Self {
        Self {
            step: WizardStep::SelectClient,
            selected_client: None,
            cart: Vec::new(),
            submitting: false,
            error: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WizardError {
    #[error("Se requiere un cliente y al menos un producto.")]
    MissingClientOrCart,
    #[error("El carrito está vacío.")]
    EmptyCart,
    #[error("Acción no disponible en este paso.")]
    WrongStep,
    #[error("Ya hay un envío en curso.")]
    SubmitInFlight,
    #[error("{0}")]
    Submission(String),
}

/// Owns the wizard state and exposes one mutation entry point per user
/// action. The submitter is an external collaborator; it is called exactly
/// once per accepted `submit` and never retried.
pub struct WizardController<S> {
    state: WizardState,
    submitter: S,
}

impl<S: OrderSubmitter> WizardController<S> {
    pub fn new(submitter: S) -> Self {
        Self {
            state: WizardState::initial(),
            submitter,
        }
    }

    pub fn state(&self) -> &WizardState {
        &self.state
    }

    pub fn step(&self) -> WizardStep {
        self.state.step
    }

    pub fn selected_client(&self) -> Option<&Client> {
        self.state.selected_client.as_ref()
    }

    pub fn cart(&self) -> &[CartItem] {
        &self.state.cart
    }

    pub fn error(&self) -> Option<&str> {
        self.state.error.as_deref()
    }

    pub fn is_submitting(&self) -> bool {
        self.state.submitting
    }

    /// Order total, recomputed from the cart on every read.
    pub fn total(&self) -> f64 {
        self.state.cart.iter().map(CartItem::line_total).sum()
    }

    /// Name shown on the success screen once an order went through.
    pub fn completed_client_name(&self) -> Option<&str> {
        match self.state.step {
            WizardStep::Success => self
                .state
                .selected_client
                .as_ref()
                .map(|client| client.name.as_str()),
            _ => None,
        }
    }

    pub fn select_client(&mut self, client: Client) -> Result<(), WizardError> {
        if self.state.step != WizardStep::SelectClient {
            return Err(WizardError::WrongStep);
        }
        self.state.selected_client = Some(client);
        self.state.step = WizardStep::SelectProducts;
        Ok(())
    }

    /// Upserts the cart line for `product`. A quantity of zero or less
    /// removes the line; otherwise the last update wins.
    pub fn update_cart(&mut self, product: Product, quantity: i64) -> Result<(), WizardError> {
        if self.state.step != WizardStep::SelectProducts {
            return Err(WizardError::WrongStep);
        }
        let existing = self
            .state
            .cart
            .iter()
            .position(|item| item.product.id == product.id);
        match (existing, quantity) {
            (Some(index), q) if q <= 0 => {
                self.state.cart.remove(index);
            }
            (None, q) if q <= 0 => {}
            (Some(index), q) => self.state.cart[index].quantity = q,
            (None, q) => self.state.cart.push(CartItem {
                product,
                quantity: q,
            }),
        }
        Ok(())
    }

    pub fn proceed_to_review(&mut self) -> Result<(), WizardError> {
        if self.state.step != WizardStep::SelectProducts {
            return Err(WizardError::WrongStep);
        }
        if self.state.cart.is_empty() {
            return Err(WizardError::EmptyCart);
        }
        self.state.step = WizardStep::Review;
        Ok(())
    }

    pub fn back(&mut self) -> Result<(), WizardError> {
        if self.state.step != WizardStep::Review {
            return Err(WizardError::WrongStep);
        }
        self.state.step = WizardStep::SelectProducts;
        Ok(())
    }

    /// Submits the order. `submitting` excludes overlapping submits; a guard
    /// failure records the validation message and leaves the rest of the
    /// state untouched. On collaborator failure the wizard stays in Review
    /// with the failure message, ready for a manual resubmit.
    pub async fn submit(&mut self) -> Result<OrderReceipt, WizardError> {
        if self.state.step != WizardStep::Review {
            return Err(WizardError::WrongStep);
        }
        if self.state.submitting {
            return Err(WizardError::SubmitInFlight);
        }
        let client_id = match &self.state.selected_client {
            Some(client) if !self.state.cart.is_empty() => client.id,
            _ => {
                self.state.error = Some(WizardError::MissingClientOrCart.to_string());
                return Err(WizardError::MissingClientOrCart);
            }
        };

        self.state.submitting = true;
        self.state.error = None;
        let order = self.build_submission(client_id);
        let outcome = self.submitter.submit_order(&order).await;
        self.state.submitting = false;

        match outcome {
            Ok(receipt) => {
                self.state.step = WizardStep::Success;
                Ok(receipt)
            }
            Err(source) => {
                let message = source.to_string();
                warn!(%message, "order submission failed");
                self.state.error = Some(message.clone());
                Err(WizardError::Submission(message))
            }
        }
    }

    /// Clears everything back to the freshly-mounted state.
    pub fn reset(&mut self) {
        self.state = WizardState::initial();
    }

    fn build_submission(&self, client_id: ClientId) -> OrderSubmission {
        OrderSubmission {
            client_id,
            items: self
                .state
                .cart
                .iter()
                .map(|item| OrderLine {
                    product_id: item.product.id,
                    quantity: item.quantity,
                    price_at_time: item.product.price,
                })
                .collect(),
        }
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;

use serde::{Deserialize, Serialize};

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub struct $name(pub i64);
    };
}

id_newtype!(ClientId);
id_newtype!(ProductId);
id_newtype!(UserId);

/// Reference data loaded once; never mutated by the wizard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Client {
    pub id: ClientId,
    pub name: String,
    pub email: String,
    pub phone: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    pub price: f64,
}

/// One cart line. Invariant: `quantity` is always positive; updates that
/// would drop it to zero or below remove the line instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    pub product: Product,
    pub quantity: i64,
}

impl CartItem {
    pub fn line_total(&self) -> f64 {
        self.product.price * self.quantity as f64
    }
}

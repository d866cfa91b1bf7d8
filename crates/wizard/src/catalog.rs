//! Reference data for the wizard. In the demo configuration this is the
//! fixed sample set; a deployment would load the same shapes from its own
//! data source.

use shared::domain::{Client, ClientId, Product, ProductId};

pub struct Catalog {
    clients: Vec<Client>,
    products: Vec<Product>,
}

impl Catalog {
    pub fn new(clients: Vec<Client>, products: Vec<Product>) -> Self {
        Self { clients, products }
    }

    pub fn sample() -> Self {
        let clients = vec![
            client(1, "Innovate Corp", "contact@innovate.com", "555-0101"),
            client(2, "Solutions Ltd", "support@solutions.co", "555-0102"),
            client(3, "Quantum Group", "hello@quantum.io", "555-0103"),
            client(4, "Apex Industries", "info@apex.com", "555-0104"),
        ];
        let products = vec![
            product(101, "Pro Keyboard", "Ergonomic mechanical keyboard", 129.99),
            product(102, "4K Monitor", "27-inch UHD IPS display", 499.50),
            product(103, "Wireless Mouse", "High-precision laser mouse", 75.00),
            product(104, "HD Webcam", "1080p webcam with built-in mic", 89.95),
            product(105, "USB-C Hub", "7-in-1 connectivity hub", 59.99),
        ];
        Self { clients, products }
    }

    pub fn clients(&self) -> &[Client] {
        &self.clients
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn client(&self, id: ClientId) -> Option<&Client> {
        self.clients.iter().find(|c| c.id == id)
    }

    pub fn product(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }
}

fn client(id: i64, name: &str, email: &str, phone: &str) -> Client {
    Client {
        id: ClientId(id),
        name: name.to_string(),
        email: email.to_string(),
        phone: phone.to_string(),
    }
}

fn product(id: i64, name: &str, description: &str, price: f64) -> Product {
    Product {
        id: ProductId(id),
        name: name.to_string(),
        description: description.to_string(),
        price,
    }
}

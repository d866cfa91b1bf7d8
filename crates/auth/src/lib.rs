pub mod config;
pub mod hash;
pub mod jwt;
pub mod routes;
pub mod service;

pub use routes::build_router;
pub use service::{AuthError, AuthService, UserProfile};

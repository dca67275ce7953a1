pub mod client;
pub mod error;
pub mod scope;

pub use client::{LoginResponse, PortalClient};
pub use error::ApiError;
pub use scope::ViewScope;

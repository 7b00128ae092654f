pub mod error;
pub mod identity;
pub mod models;

pub use identity::{AuthenticatedUser, Identity};

pub mod assignments;
pub mod attempts;
pub mod auth;
pub mod config;
pub mod error;
pub mod hints;
pub mod layers;
pub mod queries;
pub mod router;
pub mod state;
pub mod tables;
#[cfg(test)]
pub mod tests;

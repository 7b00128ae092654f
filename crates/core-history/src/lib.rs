pub mod entities;
pub mod errors;
pub mod history_store;
pub mod store;

pub use entities::*;
pub use history_store::*;
pub use store::*;

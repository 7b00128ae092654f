pub mod assignments;
pub mod attempts;
pub mod common;
pub mod hints;
pub mod tables;

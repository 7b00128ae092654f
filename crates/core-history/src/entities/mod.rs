pub mod assignment;
pub mod attempt;
pub mod stats;

pub use assignment::*;
pub use attempt::*;
pub use stats::*;

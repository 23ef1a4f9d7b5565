pub mod catalog;
pub mod collector;

pub use catalog::*;
pub use collector::*;

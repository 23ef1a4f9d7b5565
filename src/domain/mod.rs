pub mod book;
pub mod chart;

pub mod book_db;
pub mod insight_db;

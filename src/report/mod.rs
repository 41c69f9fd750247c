pub mod printer;
pub mod summary;

pub mod import;
pub mod sales;

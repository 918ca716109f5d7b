pub mod analyzer;
pub mod parser;

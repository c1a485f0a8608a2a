mod context;
mod error;
mod parser;

pub use error::*;
pub use parser::parse;

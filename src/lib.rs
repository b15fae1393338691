pub mod aptos_client;
pub mod config;
pub mod error;
pub mod handlers;
pub mod lookup;
pub mod models;
pub mod parser;
pub mod raw_transaction;

pub use error::ExplainError;
pub use parser::{explain_value, parse_aptos_transaction};

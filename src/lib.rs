pub mod chat;
pub mod classifier;
pub mod config;
pub mod error;
pub mod extract;
pub mod llm;
pub mod search;
pub mod server;
pub mod session;

pub use error::{Error, Result};

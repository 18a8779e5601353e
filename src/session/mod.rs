mod store;
mod types;

pub use store::SessionStore;
pub use types::Session;

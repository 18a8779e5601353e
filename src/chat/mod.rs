mod assistant;
pub mod prompts;
mod transcript;

pub use assistant::ChatAssistant;
pub use transcript::{Transcript, Turn};

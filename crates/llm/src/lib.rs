pub mod provider;
pub mod providers;
pub mod template;

pub use provider::{LlmError, LlmProvider, Message, Role};
pub use providers::create_provider;

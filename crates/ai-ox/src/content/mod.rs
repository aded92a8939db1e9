pub mod message;
pub mod part;

// Re-export commonly used types
pub use message::{Message, MessageRole};
pub use part::{DataRef, Part};

pub mod bridge;

pub use bridge::{joined_text, read_tokens, OcrBridge};

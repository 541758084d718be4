mod prompt;
mod service;

pub use prompt::{build_prompt, extract_label};
pub use service::SentimentService;

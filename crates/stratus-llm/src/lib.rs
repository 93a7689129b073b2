//! LLM provider bridge for Stratus.
//!
//! The model side owns planning and whatever code it decides to run; this
//! crate only assembles prompts, carries them over HTTP, and parses the
//! answers. Provider failures surface as `Error::Upstream`, uninterpretable
//! model output as `Error::MalformedResponse`.

pub mod bridge;
pub mod gemini;
pub mod openai;
pub mod prompts;

pub use bridge::LlmBridge;
pub use gemini::GeminiClient;
pub use openai::OpenAiClient;

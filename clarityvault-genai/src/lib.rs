//! # ClarityVault GenAI
//!
//! Clients for the external AI and video services behind ClarityVault.
//!
//! ## Modules
//!
//! - `model`: the `GenerativeModel` trait and its input/output types
//! - `gemini`: Gemini REST client (resumable upload, content generation)
//! - `prompts`: prompt templates and validated prompt inputs
//! - `response`: extraction of generated text from provider responses
//! - `service`: `DocumentIntelligence`, the operations the API exposes
//! - `youtube`: YouTube Data API search
//!
//! ## Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use clarityvault_genai::gemini::{GeminiClient, GeminiConfig};
//! use clarityvault_genai::prompts::Language;
//! use clarityvault_genai::service::DocumentIntelligence;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = GeminiClient::new(GeminiConfig::new("api-key"))?;
//! let service = DocumentIntelligence::new(Arc::new(client));
//!
//! let french = Language::parse("French")?;
//! let outcome = service.translate_text("Good morning", &french).await?;
//! println!("{}", outcome.into_text());
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod gemini;
pub mod model;
pub mod prompts;
pub mod response;
pub mod service;
pub mod youtube;

pub use error::{GenAiError, GenAiResult};

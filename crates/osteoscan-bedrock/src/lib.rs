//! osteoscan-bedrock
//!
//! The external analysis model: prompt and response schema, the
//! `AnalysisModel` seam, Bedrock Converse invocation and structured output
//! parsing.

pub mod client;
pub mod converse;
pub mod error;
pub mod model;
pub mod parse;
pub mod prompt;
pub mod schema;
pub mod tokens;

pub use converse::BedrockAnalysisModel;
pub use error::BedrockError;
pub use model::{AnalysisModel, AnalysisPrompt, ModelOutput, PromptImage};
pub use parse::parse_findings;
pub use prompt::{build_analysis_prompt, AnalysisRequest};

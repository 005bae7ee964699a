use osteoscan_core::image::ImageFormat;

use crate::error::BedrockError;
use crate::tokens::TokenCount;

/// The image bytes sent alongside the prompt.
#[derive(Debug, Clone, PartialEq)]
pub struct PromptImage {
    pub bytes: Vec<u8>,
    pub format: ImageFormat,
}

/// Everything one analysis call sends to the model.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisPrompt {
    pub system: String,
    pub user: String,
    pub image: Option<PromptImage>,
}

/// Raw model reply, before it is parsed into findings.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelOutput {
    pub text: String,
    pub usage: TokenCount,
}

/// An external model that turns an X-ray and its clinical context into a
/// JSON findings payload.
///
/// Implementations may be slow or fail; callers bound each call with a
/// timeout and never retry automatically.
pub trait AnalysisModel: Send + Sync {
    fn analyze(
        &self,
        prompt: &AnalysisPrompt,
    ) -> impl Future<Output = Result<ModelOutput, BedrockError>> + Send;
}

use aws_sdk_bedrockruntime::Client;
use aws_sdk_bedrockruntime::types::{
    ContentBlock, ConversationRole, ImageBlock, ImageFormat as BedrockImageFormat, ImageSource,
    Message, SystemContentBlock,
};
use tracing::{info, warn};

use osteoscan_core::image::ImageFormat;

use crate::error::BedrockError;
use crate::model::{AnalysisModel, AnalysisPrompt, ModelOutput, PromptImage};
use crate::tokens::{self, TokenCount};

/// [`AnalysisModel`] backed by the Bedrock Converse API.
#[derive(Debug, Clone)]
pub struct BedrockAnalysisModel {
    client: Client,
    model_id: String,
}

impl BedrockAnalysisModel {
    pub fn new(client: Client, model_id: impl Into<String>) -> Self {
        Self {
            client,
            model_id: model_id.into(),
        }
    }

    pub fn model_id(&self) -> &str {
        &self.model_id
    }
}

impl AnalysisModel for BedrockAnalysisModel {
    async fn analyze(&self, prompt: &AnalysisPrompt) -> Result<ModelOutput, BedrockError> {
        info!(
            model = %self.model_id,
            has_image = prompt.image.is_some(),
            "invoking analysis model"
        );
        let (text, usage) = invoke_converse(&self.client, &self.model_id, prompt).await?;
        info!(
            model = %self.model_id,
            input_tokens = usage.input,
            output_tokens = usage.output,
            "analysis model replied"
        );
        Ok(ModelOutput { text, usage })
    }
}

fn image_block(image: &PromptImage) -> Result<Option<ContentBlock>, BedrockError> {
    let format = match image.format {
        ImageFormat::Jpeg => BedrockImageFormat::Jpeg,
        ImageFormat::Png => BedrockImageFormat::Png,
        // Converse has no DICOM image type; the model works from the text context alone.
        ImageFormat::Dicom => {
            warn!("DICOM image not attached to analysis request");
            return Ok(None);
        }
    };
    let block = ImageBlock::builder()
        .format(format)
        .source(ImageSource::Bytes(aws_smithy_types::Blob::new(image.bytes.clone())))
        .build()
        .map_err(|e| BedrockError::Invocation(e.to_string()))?;
    Ok(Some(ContentBlock::Image(block)))
}

/// Core invocation using the Bedrock Converse API.
/// Returns the response text and token usage.
async fn invoke_converse(
    client: &Client,
    model_id: &str,
    prompt: &AnalysisPrompt,
) -> Result<(String, TokenCount), BedrockError> {
    let mut message = Message::builder().role(ConversationRole::User);
    if let Some(image) = &prompt.image
        && let Some(block) = image_block(image)?
    {
        message = message.content(block);
    }
    let message = message
        .content(ContentBlock::Text(prompt.user.clone()))
        .build()
        .map_err(|e| BedrockError::Invocation(e.to_string()))?;

    let response = client
        .converse()
        .model_id(model_id)
        .system(SystemContentBlock::Text(prompt.system.clone()))
        .messages(message)
        .send()
        .await
        .map_err(|e| BedrockError::Invocation(e.into_service_error().to_string()))?;

    let output_message = response
        .output()
        .and_then(|o| o.as_message().ok())
        .ok_or_else(|| BedrockError::ResponseParse("no message in response".to_string()))?;

    let response_text = output_message
        .content()
        .iter()
        .filter_map(|block| {
            if let ContentBlock::Text(text) = block {
                Some(text.as_str())
            } else {
                None
            }
        })
        .collect::<Vec<_>>()
        .join("");

    let usage = response
        .usage()
        .map(tokens::extract_token_usage)
        .unwrap_or_default();

    Ok((response_text, usage))
}

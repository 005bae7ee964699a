//! Prompt assembly for the texture-analysis call.

use std::fmt::Write;

use osteoscan_core::models::analysis::{AnalysisSubmission, AnatomicalRegion};
use osteoscan_core::models::patient::Gender;
use osteoscan_scoring::MeasureField;
use osteoscan_scoring::applicability::{applies_to, REGIONAL_FIELDS};

use crate::model::{AnalysisPrompt, PromptImage};
use crate::schema;

const SYSTEM_PROMPT_HEADER: &str = "\
You are a musculoskeletal radiology assistant performing trabecular texture \
analysis on X-ray images for osteoporosis screening. \
Respond with a single JSON object and nothing else. \
The object must conform to this JSON Schema:";

/// The clinical context of one analysis request.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisRequest {
    pub region: AnatomicalRegion,
    pub patient_age: u32,
    pub patient_gender: Gender,
    pub analysis_notes: Option<String>,
}

impl From<&AnalysisSubmission> for AnalysisRequest {
    fn from(submission: &AnalysisSubmission) -> Self {
        Self {
            region: submission.anatomical_region,
            patient_age: submission.patient_age,
            patient_gender: submission.patient_gender,
            analysis_notes: submission.analysis_notes.clone(),
        }
    }
}

/// The system prompt, with the response schema embedded.
pub fn system_prompt() -> String {
    format!("{SYSTEM_PROMPT_HEADER}\n\n{:#}", schema::response_schema())
}

/// Build the full prompt for one request.
pub fn build_analysis_prompt(
    request: &AnalysisRequest,
    image: Option<PromptImage>,
) -> AnalysisPrompt {
    AnalysisPrompt {
        system: system_prompt(),
        user: user_message(request),
        image,
    }
}

fn regional_instruction(field: MeasureField) -> &'static str {
    match field {
        MeasureField::SinghIndex => "SINGH INDEX (1-6), trabecular pattern of the femoral neck",
        MeasureField::JhamariaIndex => "JHAMARIA INDEX (0-10), trabecular pattern of the calcaneus",
        MeasureField::CorticalThicknessMm => "CORTICAL THICKNESS in mm",
        other => other.as_str(),
    }
}

/// The user turn: patient details, the applicability of each regional index
/// for this region, and the always-required measures.
pub fn user_message(request: &AnalysisRequest) -> String {
    let region = request.region;
    let mut msg = String::new();

    let _ = writeln!(
        msg,
        "Perform texture analysis on this {} ({region}) X-ray image for osteoporosis screening.",
        region.label()
    );
    msg.push('\n');
    msg.push_str("Patient details:\n");
    let _ = writeln!(msg, "- Age: {} years", request.patient_age);
    let _ = writeln!(msg, "- Gender: {}", request.patient_gender);
    let _ = writeln!(msg, "- Region: {region}");
    if let Some(notes) = request.analysis_notes.as_deref().filter(|n| !n.trim().is_empty()) {
        let _ = writeln!(msg, "- Clinical notes: {}", notes.trim());
    }
    msg.push('\n');

    msg.push_str("Regional indices. An index that does not apply to this region MUST be null:\n");
    for field in REGIONAL_FIELDS {
        let rule = if applies_to(field, region) {
            "calculate for this region"
        } else {
            "MUST be null for this region"
        };
        let _ = writeln!(msg, "- {} (`{field}`): {rule}", regional_instruction(field));
    }
    msg.push('\n');

    msg.push_str(
        "Always calculate: GLCM contrast, homogeneity, energy and entropy; \
         fractal dimension of the trabecular architecture.\n",
    );
    msg.push_str(
        "From these, predict BMD (g/cm2), T-score, Z-score, the WHO risk category \
         and the DXA follow-up recommendation, with a confidence score from 0 to 100.\n",
    );
    msg.push_str(
        "Keep every value inside the bounds of the schema. Texture parameters must \
         correlate with the BMD prediction.",
    );

    msg
}

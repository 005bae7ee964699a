use tera::{Context, Tera};
use tracing::info;

use osteoscan_core::models::analysis::XRayAnalysis;

use crate::context::ReportContext;
use crate::error::ExportError;

/// Built-in Markdown report template.
pub const DEFAULT_REPORT_TEMPLATE: &str = include_str!("../templates/report.md.tera");

/// Render a Tera template with any serializable context.
///
/// The `template_content` is the raw template string (Jinja2 syntax).
pub fn render_template<T: serde::Serialize>(
    template_name: &str,
    template_content: &str,
    context: &T,
) -> Result<String, ExportError> {
    let mut tera = Tera::default();
    tera.add_raw_template(template_name, template_content)
        .map_err(|e| ExportError::TemplateParse(e.to_string()))?;

    let value = serde_json::to_value(context)?;
    let context =
        Context::from_value(value).map_err(|e| ExportError::TemplateRender(e.to_string()))?;

    Ok(tera.render(template_name, &context)?)
}

/// Render the screening report of one analysis, with `template` or the
/// built-in one.
pub fn render_report(
    analysis: &XRayAnalysis,
    template: Option<&str>,
) -> Result<String, ExportError> {
    let context = ReportContext::from_analysis(analysis)?;
    let rendered = render_template(
        "report",
        template.unwrap_or(DEFAULT_REPORT_TEMPLATE),
        &context,
    )?;
    info!(analysis_id = %analysis.id, len = rendered.len(), "report rendered");
    Ok(rendered)
}

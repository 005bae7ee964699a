//! osteoscan-export
//!
//! Screening reports rendered from Tera templates.

pub mod context;
pub mod error;
pub mod render;

pub use context::ReportContext;
pub use error::ExportError;
pub use render::{render_report, render_template, DEFAULT_REPORT_TEMPLATE};

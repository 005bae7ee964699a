use std::env;
use std::str::FromStr;
use std::time::Duration;

use eyre::{bail, eyre, WrapErr};

use osteoscan_intake::IntakePolicy;
use osteoscan_intake::policy::DEFAULT_ANALYSIS_TIMEOUT;

pub const DEFAULT_BUCKET: &str = "osteoscan";
pub const DEFAULT_MODEL_ID: &str = "us.anthropic.claude-sonnet-4-20250514-v1:0";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreKind {
    S3,
    Memory,
}

impl FromStr for StoreKind {
    type Err = eyre::Report;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "s3" => Ok(StoreKind::S3),
            "memory" => Ok(StoreKind::Memory),
            other => Err(eyre!("unknown store '{other}', expected s3 or memory")),
        }
    }
}

/// Startup configuration, read once from the environment.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub bucket: String,
    pub model_id: String,
    pub store: StoreKind,
    pub policy: IntakePolicy,
}

impl Settings {
    pub fn from_env() -> eyre::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build settings from any key lookup. Unset or blank keys take their
    /// defaults; values that are set but do not parse are errors.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> eyre::Result<Self> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let analysis_timeout = match get("OSTEOSCAN_ANALYSIS_TIMEOUT_SECS") {
            Some(raw) => {
                let secs: u64 = raw
                    .trim()
                    .parse()
                    .wrap_err_with(|| format!("OSTEOSCAN_ANALYSIS_TIMEOUT_SECS={raw}"))?;
                if secs == 0 {
                    bail!("OSTEOSCAN_ANALYSIS_TIMEOUT_SECS must be positive");
                }
                Duration::from_secs(secs)
            }
            None => DEFAULT_ANALYSIS_TIMEOUT,
        };

        let confidence_floor = match get("OSTEOSCAN_CONFIDENCE_FLOOR") {
            Some(raw) => {
                let floor: f64 = raw
                    .trim()
                    .parse()
                    .wrap_err_with(|| format!("OSTEOSCAN_CONFIDENCE_FLOOR={raw}"))?;
                if !(0.0..=100.0).contains(&floor) {
                    bail!("OSTEOSCAN_CONFIDENCE_FLOOR must lie in 0..=100, got {floor}");
                }
                Some(floor)
            }
            None => None,
        };

        let store = match get("OSTEOSCAN_STORE") {
            Some(raw) => raw.parse()?,
            None => StoreKind::S3,
        };

        Ok(Self {
            bucket: get("OSTEOSCAN_BUCKET").unwrap_or_else(|| DEFAULT_BUCKET.to_string()),
            model_id: get("OSTEOSCAN_MODEL_ID").unwrap_or_else(|| DEFAULT_MODEL_ID.to_string()),
            store,
            policy: IntakePolicy {
                analysis_timeout,
                confidence_floor,
            },
        })
    }
}

use serde::{Deserialize, Serialize};

use crate::knowledge_base::{lookup, DiseaseInfo, DiseaseLabel};

/// Classification returned by the inference service.
///
/// Both fields are kept exactly as received; rendering the confidence is the
/// presentation layer's job (see [`format_confidence`]).
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct PredictionResult {
    pub class: String,
    pub confidence: String,
}

impl PredictionResult {
    pub fn new(class: impl Into<String>, confidence: impl Into<String>) -> Self {
        Self {
            class: class.into(),
            confidence: confidence.into(),
        }
    }

    pub fn label(&self) -> Option<DiseaseLabel> {
        self.class.parse().ok()
    }

    pub fn disease_info(&self) -> Option<&'static DiseaseInfo> {
        lookup(&self.class)
    }

    pub fn confidence_percent(&self) -> String {
        format_confidence(Some(&self.confidence))
    }
}

/// Renders a probability string as a percentage with two decimals.
///
/// `"0.873"` becomes `"87.30%"`. Absent, blank or non-numeric input renders as
/// an empty string rather than `NaN%`.
pub fn format_confidence(confidence: Option<&str>) -> String {
    confidence
        .map(str::trim)
        .filter(|raw| !raw.is_empty())
        .and_then(|raw| raw.parse::<f64>().ok())
        .filter(|value| value.is_finite())
        .map(|value| format!("{:.2}%", value * 100.0))
        .unwrap_or_default()
}

use shared::{format_confidence, lookup, PredictionResult};

use crate::workflow::WorkflowState;

/// Text for the four fields of the result sheet.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultView {
    pub disease: String,
    pub confidence: String,
    pub causes: Option<&'static str>,
    pub treatments: Option<&'static str>,
}

impl ResultView {
    pub fn from_result(result: Option<&PredictionResult>) -> Self {
        let Some(result) = result else {
            return Self::default();
        };
        let info = lookup(&result.class);
        Self {
            disease: result.class.clone(),
            confidence: format_confidence(Some(&result.confidence)),
            causes: info.map(|info| info.causes),
            treatments: info.map(|info| info.treatments),
        }
    }

    pub fn from_state(state: &WorkflowState) -> Self {
        Self::from_result(state.result.as_ref())
    }

    /// Whether the knowledge base knows the predicted label.
    pub fn has_guidance(&self) -> bool {
        self.causes.is_some()
    }
}

/// The message to show in the error banner, if any.
pub fn notice(state: &WorkflowState) -> Option<String> {
    state.error.as_ref().map(ToString::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PredictionError;

    #[test]
    fn empty_without_result() {
        let view = ResultView::from_result(None);
        assert_eq!(view, ResultView::default());
        assert_eq!(view.confidence, "");
        assert!(!view.has_guidance());
    }

    #[test]
    fn enriches_known_label() {
        let result = PredictionResult::new("Healthy", "0.95");
        let view = ResultView::from_result(Some(&result));
        assert_eq!(view.disease, "Healthy");
        assert_eq!(view.confidence, "95.00%");
        assert_eq!(view.causes, Some("No disease detected."));
        assert!(view.treatments.unwrap().starts_with("Maintain general good practices"));
    }

    #[test]
    fn unknown_label_keeps_name_but_no_guidance() {
        let result = PredictionResult::new("Late_blight", "0.42");
        let view = ResultView::from_result(Some(&result));
        assert_eq!(view.disease, "Late_blight");
        assert_eq!(view.confidence, "42.00%");
        assert_eq!(view.causes, None);
        assert_eq!(view.treatments, None);
    }

    #[test]
    fn notice_follows_error_flag() {
        let mut state = WorkflowState::default();
        assert_eq!(notice(&state), None);

        state.error = Some(PredictionError::Http {
            status: 503,
            message: "model warming up".into(),
        });
        assert_eq!(
            notice(&state).as_deref(),
            Some("Server error: 503 - model warming up")
        );
    }
}

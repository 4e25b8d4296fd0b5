//! Resume analysis flow: precondition → prompt → model call → normalize →
//! validate → back-fill.
//!
//! Failures before or during the model call become error-populated reports;
//! nothing after the call can fail. Normalization misses are absorbed by
//! the tier chain, never surfaced as errors.

use crate::analysis::models::AnalysisReport;
use crate::analysis::{normalize, prompts, validate};
use crate::llm_client::GenerativeModel;

/// Minimum usable document length, in characters. Anything shorter is
/// treated as a failed extraction rather than sent to the model.
pub const MIN_TEXT_LENGTH: usize = 50;

pub async fn analyze_resume(resume_text: &str, model: &dyn GenerativeModel) -> AnalysisReport {
    if resume_text.chars().count() < MIN_TEXT_LENGTH {
        return AnalysisReport::failure(
            "Resume text is too short or couldn't be properly extracted",
        );
    }

    let prompt = prompts::analysis_prompt(resume_text);
    let raw = match model.generate(prompts::ANALYSIS_SYSTEM, &prompt).await {
        Ok(reply) => reply,
        Err(e) => return AnalysisReport::failure(e.to_string()),
    };

    let mut report = match normalize::parse_candidate(&raw) {
        Some(mapping) => validate::validate_analysis(&mapping),
        None => {
            // Heuristic path: keep the raw reply around for debugging.
            let mut mined = validate::validate_analysis(&normalize::mine_analysis(&raw));
            mined.raw_analysis = Some(raw);
            mined
        }
    };
    report.backfill();
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::models::placeholders;
    use crate::llm_client::LlmError;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Test double: returns a canned reply and counts invocations.
    enum StubReply {
        Text(&'static str),
        MissingKey,
        Api { status: u16, message: &'static str },
    }

    struct StubModel {
        reply: StubReply,
        calls: AtomicUsize,
    }

    impl StubModel {
        fn new(reply: StubReply) -> Self {
            Self {
                reply,
                calls: AtomicUsize::new(0),
            }
        }

        fn replying(reply: &'static str) -> Self {
            Self::new(StubReply::Text(reply))
        }

        fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl GenerativeModel for StubModel {
        async fn generate(&self, _system: &str, _prompt: &str) -> Result<String, LlmError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match &self.reply {
                StubReply::Text(reply) => Ok(reply.to_string()),
                StubReply::MissingKey => Err(LlmError::MissingApiKey),
                StubReply::Api { status, message } => Err(LlmError::Api {
                    status: *status,
                    message: message.to_string(),
                }),
            }
        }
    }

    const RESUME: &str = "Seasoned backend engineer with ten years of experience building \
        distributed systems in Rust and Go, comfortable owning services end to end.";

    #[tokio::test]
    async fn test_short_input_short_circuits_without_model_call() {
        let model = StubModel::replying("{}");
        let report = analyze_resume("too short", &model).await;

        assert!(report.error.as_deref().unwrap().contains("too short"));
        assert_eq!(model.call_count(), 0);
        // Defaulted/placeholder state everywhere else.
        assert_eq!(report.strengths, vec![placeholders::STRENGTHS]);
        assert_eq!(report.career_roadmap, placeholders::CAREER_ROADMAP);
    }

    #[tokio::test]
    async fn test_missing_credential_surfaces_as_error_field() {
        let model = StubModel::new(StubReply::MissingKey);
        let report = analyze_resume(RESUME, &model).await;

        assert_eq!(
            report.error.as_deref(),
            Some("Gemini API key is not configured")
        );
        assert_eq!(report.strengths, vec![placeholders::STRENGTHS]);
    }

    #[tokio::test]
    async fn test_provider_error_surfaces_as_error_field() {
        let model = StubModel::new(StubReply::Api {
            status: 429,
            message: "quota exhausted",
        });
        let report = analyze_resume(RESUME, &model).await;

        let error = report.error.unwrap();
        assert!(error.contains("429"));
        assert!(error.contains("quota exhausted"));
    }

    #[tokio::test]
    async fn test_clean_json_reply_passes_through() {
        let model = StubModel::replying(
            r#"{
                "strengths": ["Distributed systems depth"],
                "areas_of_improvement": ["Frontend exposure"],
                "project_recommendations": ["Build a message broker"],
                "career_roadmap": "Aim for staff scope within two years.",
                "recommended_courses": ["MIT 6.824"]
            }"#,
        );
        let report = analyze_resume(RESUME, &model).await;

        assert!(report.error.is_none());
        assert_eq!(report.strengths, vec!["Distributed systems depth"]);
        assert_eq!(report.career_roadmap, "Aim for staff scope within two years.");
        assert!(report.raw_analysis.is_none(), "strict parse keeps raw_analysis unset");
        assert_eq!(model.call_count(), 1);
    }

    #[tokio::test]
    async fn test_fenced_reply_is_unwrapped() {
        let model = StubModel::replying(
            "Sure, here is my analysis:\n```json\n{\"strengths\": [\"Ownership\"], \"career_roadmap\": \"Keep going.\"}\n```",
        );
        let report = analyze_resume(RESUME, &model).await;

        assert!(report.error.is_none());
        assert_eq!(report.strengths, vec!["Ownership"]);
        assert!(report.raw_analysis.is_none());
    }

    #[tokio::test]
    async fn test_sectioned_text_reply_is_mined_with_raw_kept() {
        let model = StubModel::replying("Strengths:\n- Strong Python skills");
        let report = analyze_resume(RESUME, &model).await;

        assert!(report.error.is_none());
        assert_eq!(report.strengths, vec!["Strong Python skills"]);
        assert!(report
            .raw_analysis
            .as_deref()
            .unwrap()
            .contains("Strong Python skills"));
        // Unfound sections fall back to placeholders.
        assert_eq!(report.recommended_courses, vec![placeholders::RECOMMENDED_COURSES]);
    }

    #[tokio::test]
    async fn test_gibberish_reply_yields_fully_placeholder_report() {
        let model = StubModel::replying("zxcv qwer asdf");
        let report = analyze_resume(RESUME, &model).await;

        assert!(report.error.is_none());
        assert_eq!(report.strengths, vec![placeholders::STRENGTHS]);
        assert_eq!(
            report.areas_of_improvement,
            vec![placeholders::AREAS_OF_IMPROVEMENT]
        );
        assert_eq!(
            report.project_recommendations,
            vec![placeholders::PROJECT_RECOMMENDATIONS]
        );
        assert_eq!(report.career_roadmap, placeholders::CAREER_ROADMAP);
        assert_eq!(
            report.recommended_courses,
            vec![placeholders::RECOMMENDED_COURSES]
        );
        assert_eq!(report.raw_analysis.as_deref(), Some("zxcv qwer asdf"));
    }
}

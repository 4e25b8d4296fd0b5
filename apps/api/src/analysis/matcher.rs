//! Resume-vs-job-description match flow: precondition → prompt → model
//! call → normalize → validate.
//!
//! Unlike the resume flow there is no placeholder back-fill — the
//! validator's defaults (score 0, empty lists, zeroed categories) are the
//! contract when mining finds nothing.

use crate::analysis::analyzer::MIN_TEXT_LENGTH;
use crate::analysis::models::MatchReport;
use crate::analysis::{normalize, prompts, validate};
use crate::llm_client::GenerativeModel;

pub async fn compare_resume_jd(
    resume_text: &str,
    jd_text: &str,
    model: &dyn GenerativeModel,
) -> MatchReport {
    if resume_text.chars().count() < MIN_TEXT_LENGTH {
        return MatchReport::failure("Resume text is too short or couldn't be properly extracted");
    }
    if jd_text.chars().count() < MIN_TEXT_LENGTH {
        return MatchReport::failure(
            "Job description is too short or couldn't be properly extracted",
        );
    }

    let prompt = prompts::match_prompt(resume_text, jd_text);
    let raw = match model.generate(prompts::MATCH_SYSTEM, &prompt).await {
        Ok(reply) => reply,
        Err(e) => return MatchReport::failure(e.to_string()),
    };

    let mapping = normalize::parse_candidate(&raw).unwrap_or_else(|| normalize::mine_match(&raw));
    validate::validate_match(&mapping)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::LlmError;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Call-counting double; `None` reply means a missing-credential failure.
    struct StubModel {
        reply: Option<&'static str>,
        calls: AtomicUsize,
    }

    impl StubModel {
        fn replying(reply: &'static str) -> Self {
            Self {
                reply: Some(reply),
                calls: AtomicUsize::new(0),
            }
        }

        fn unconfigured() -> Self {
            Self {
                reply: None,
                calls: AtomicUsize::new(0),
            }
        }

        fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl GenerativeModel for StubModel {
        async fn generate(&self, _system: &str, _prompt: &str) -> Result<String, LlmError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match self.reply {
                Some(reply) => Ok(reply.to_string()),
                None => Err(LlmError::MissingApiKey),
            }
        }
    }

    const RESUME: &str = "Backend engineer with six years of Go and Python, shipping REST \
        services, queue consumers, and the infrastructure around them.";
    const JD: &str = "We are hiring a senior backend engineer comfortable with Go, AWS, \
        Docker, and operating production services at scale.";

    #[tokio::test]
    async fn test_short_resume_short_circuits_without_model_call() {
        let model = StubModel::replying("{}");
        let report = compare_resume_jd("tiny", JD, &model).await;

        assert!(report.error.as_deref().unwrap().contains("Resume text"));
        assert_eq!(report.score, 0);
        assert_eq!(model.call_count(), 0);
    }

    #[tokio::test]
    async fn test_short_jd_short_circuits_without_model_call() {
        let model = StubModel::replying("{}");
        let report = compare_resume_jd(RESUME, "tiny", &model).await;

        assert!(report.error.as_deref().unwrap().contains("Job description"));
        assert_eq!(model.call_count(), 0);
    }

    #[tokio::test]
    async fn test_missing_credential_yields_defaulted_error_report() {
        let model = StubModel::unconfigured();
        let report = compare_resume_jd(RESUME, JD, &model).await;

        assert_eq!(
            report.error.as_deref(),
            Some("Gemini API key is not configured")
        );
        assert_eq!(report.score, 0);
        assert!(report.matching_skills.is_empty());
    }

    /// The worked end-to-end case: fenced JSON with out-of-range scores.
    #[tokio::test]
    async fn test_fenced_reply_with_out_of_range_scores() {
        let model = StubModel::replying(
            "Sure! ```json\n{\"score\": 105, \"matching_skills\": [\"Go\"], \"category_scores\": {\"Technical Skills\": 200}}\n```",
        );
        let report = compare_resume_jd(RESUME, JD, &model).await;

        assert!(report.error.is_none());
        assert_eq!(report.score, 100);
        assert_eq!(report.matching_skills, vec!["Go"]);
        assert!(report.missing_skills.is_empty());
        assert!(report.recommendations.is_empty());
        assert_eq!(report.category_scores.technical_skills, 100);
        assert_eq!(report.category_scores.experience, 0);
        assert_eq!(report.category_scores.education, 0);
        assert_eq!(report.category_scores.soft_skills, 0);
        assert_eq!(report.category_scores.industry_knowledge, 0);
        assert_eq!(model.call_count(), 1);
    }

    #[tokio::test]
    async fn test_text_reply_falls_back_to_mining() {
        let model = StubModel::replying(
            "I could not produce JSON. Overall score: 55\n\nMatching Skills:\n- Go\n- Docker\n\nMissing Skills:\n- Kubernetes",
        );
        let report = compare_resume_jd(RESUME, JD, &model).await;

        assert!(report.error.is_none());
        assert_eq!(report.score, 55);
        assert_eq!(report.matching_skills, vec!["Go", "Docker"]);
        assert_eq!(report.missing_skills, vec!["Kubernetes"]);
    }

    #[tokio::test]
    async fn test_gibberish_reply_yields_defaulted_report_without_error() {
        let model = StubModel::replying("no structure to speak of");
        let report = compare_resume_jd(RESUME, JD, &model).await;

        assert!(report.error.is_none());
        assert_eq!(report.score, 0);
        assert!(report.matching_skills.is_empty());
        assert!(report.missing_skills.is_empty());
        assert!(report.recommendations.is_empty());
    }
}

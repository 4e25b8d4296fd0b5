//! Result shapes returned by the analysis flows.
//!
//! Fixed-shape records rather than loose JSON maps: an unexpected key from
//! the model cannot silently pass through to clients.

use serde::{Deserialize, Serialize};

/// Placeholder sentinels substituted for any field the normalizer could not
/// populate, so clients never see an empty list or a blank roadmap.
pub mod placeholders {
    pub const STRENGTHS: &str = "Could not extract strengths from analysis";
    pub const AREAS_OF_IMPROVEMENT: &str = "Could not extract areas of improvement from analysis";
    pub const PROJECT_RECOMMENDATIONS: &str =
        "Could not extract project recommendations from analysis";
    pub const CAREER_ROADMAP: &str = "Could not extract career roadmap from analysis";
    pub const RECOMMENDED_COURSES: &str = "Could not extract recommended courses from analysis";
}

/// The five match-quality dimensions, in the order they serialize.
pub const CATEGORY_NAMES: [&str; 5] = [
    "Technical Skills",
    "Experience",
    "Education",
    "Soft Skills",
    "Industry Knowledge",
];

/// Resume-only analysis result.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalysisReport {
    /// Present only on failure (configuration, short input, provider error).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub strengths: Vec<String>,
    pub areas_of_improvement: Vec<String>,
    pub project_recommendations: Vec<String>,
    pub career_roadmap: String,
    pub recommended_courses: Vec<String>,
    /// Unparsed model output, kept only when heuristic mining ran.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw_analysis: Option<String>,
}

impl AnalysisReport {
    /// Error-shaped report: populated `error`, placeholder content everywhere else.
    pub fn failure(message: impl Into<String>) -> Self {
        let mut report = Self {
            error: Some(message.into()),
            ..Self::default()
        };
        report.backfill();
        report
    }

    /// Replaces any still-empty field with its placeholder sentinel.
    /// Guarantees the non-empty invariant no matter what the normalizer
    /// managed to extract.
    pub fn backfill(&mut self) {
        if self.strengths.is_empty() {
            self.strengths.push(placeholders::STRENGTHS.to_string());
        }
        if self.areas_of_improvement.is_empty() {
            self.areas_of_improvement
                .push(placeholders::AREAS_OF_IMPROVEMENT.to_string());
        }
        if self.project_recommendations.is_empty() {
            self.project_recommendations
                .push(placeholders::PROJECT_RECOMMENDATIONS.to_string());
        }
        if self.career_roadmap.trim().is_empty() {
            self.career_roadmap = placeholders::CAREER_ROADMAP.to_string();
        }
        if self.recommended_courses.is_empty() {
            self.recommended_courses
                .push(placeholders::RECOMMENDED_COURSES.to_string());
        }
    }
}

/// Fixed five-way category breakdown. Always serialized with exactly these
/// keys; anything else the model sends is dropped on the floor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryScores {
    #[serde(rename = "Technical Skills", default)]
    pub technical_skills: u32,
    #[serde(rename = "Experience", default)]
    pub experience: u32,
    #[serde(rename = "Education", default)]
    pub education: u32,
    #[serde(rename = "Soft Skills", default)]
    pub soft_skills: u32,
    #[serde(rename = "Industry Knowledge", default)]
    pub industry_knowledge: u32,
}

/// Resume-vs-job-description match result.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MatchReport {
    /// Present only on failure (configuration, short input, provider error).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Overall match score, 0–100.
    pub score: u32,
    pub matching_skills: Vec<String>,
    pub missing_skills: Vec<String>,
    pub recommendations: Vec<String>,
    pub category_scores: CategoryScores,
}

impl MatchReport {
    /// Error-shaped report: populated `error`, every other field at its default.
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            error: Some(message.into()),
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backfill_fills_every_empty_field() {
        let mut report = AnalysisReport::default();
        report.backfill();

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
    }

    #[test]
    fn test_backfill_leaves_populated_fields_alone() {
        let mut report = AnalysisReport {
            strengths: vec!["Strong Python skills".to_string()],
            career_roadmap: "Year one: learn distributed systems.".to_string(),
            ..AnalysisReport::default()
        };
        report.backfill();

        assert_eq!(report.strengths, vec!["Strong Python skills"]);
        assert_eq!(report.career_roadmap, "Year one: learn distributed systems.");
        assert_eq!(
            report.recommended_courses,
            vec![placeholders::RECOMMENDED_COURSES]
        );
    }

    #[test]
    fn test_error_field_is_omitted_from_json_when_absent() {
        let mut report = AnalysisReport::default();
        report.backfill();

        let json = serde_json::to_value(&report).unwrap();
        assert!(json.get("error").is_none());
        assert!(json.get("raw_analysis").is_none());
    }

    #[test]
    fn test_category_scores_serialize_under_display_names() {
        let scores = CategoryScores {
            technical_skills: 80,
            ..CategoryScores::default()
        };
        let json = serde_json::to_value(&scores).unwrap();

        assert_eq!(json["Technical Skills"], 80);
        for name in CATEGORY_NAMES {
            assert!(json.get(name).is_some(), "missing category {name}");
        }
    }

    #[test]
    fn test_match_failure_has_defaulted_fields() {
        let report = MatchReport::failure("Gemini API key is not configured");

        assert_eq!(report.error.as_deref(), Some("Gemini API key is not configured"));
        assert_eq!(report.score, 0);
        assert!(report.matching_skills.is_empty());
        assert_eq!(report.category_scores, CategoryScores::default());
    }
}

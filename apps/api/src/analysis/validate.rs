//! Final type/bound enforcement for normalized mappings.
//!
//! Never fails: whatever shape the normalizer produced, the output is a
//! fully-formed report with clamped scores and string lists. Content
//! guarantees (non-empty lists) belong to the back-fill, not here.

use serde_json::Value;

use crate::analysis::models::{AnalysisReport, CategoryScores, MatchReport};

/// Maximum entries kept per list field in the match flow.
pub const MAX_LIST_ITEMS: usize = 20;

/// Clamps and coerces a normalized mapping into the match-result contract.
pub fn validate_match(value: &Value) -> MatchReport {
    let categories = value.get("category_scores");

    MatchReport {
        error: None,
        score: clamped_score(value.get("score")),
        matching_skills: string_list(value.get("matching_skills"), MAX_LIST_ITEMS),
        missing_skills: string_list(value.get("missing_skills"), MAX_LIST_ITEMS),
        recommendations: string_list(value.get("recommendations"), MAX_LIST_ITEMS),
        category_scores: CategoryScores {
            technical_skills: clamped_score(category(categories, "Technical Skills")),
            experience: clamped_score(category(categories, "Experience")),
            education: clamped_score(category(categories, "Education")),
            soft_skills: clamped_score(category(categories, "Soft Skills")),
            industry_knowledge: clamped_score(category(categories, "Industry Knowledge")),
        },
    }
}

/// Coerces a normalized mapping into the analysis-result contract.
/// Empty fields stay empty here; `AnalysisReport::backfill` owns the
/// placeholder guarantee.
pub fn validate_analysis(value: &Value) -> AnalysisReport {
    AnalysisReport {
        error: None,
        strengths: string_list(value.get("strengths"), usize::MAX),
        areas_of_improvement: string_list(value.get("areas_of_improvement"), usize::MAX),
        project_recommendations: string_list(value.get("project_recommendations"), usize::MAX),
        career_roadmap: value
            .get("career_roadmap")
            .and_then(Value::as_str)
            .map(|s| s.trim().to_string())
            .unwrap_or_default(),
        recommended_courses: string_list(value.get("recommended_courses"), usize::MAX),
        raw_analysis: None,
    }
}

fn category<'a>(scores: Option<&'a Value>, name: &str) -> Option<&'a Value> {
    scores.and_then(|v| v.get(name))
}

/// Numeric → clamped to [0, 100] and truncated to an integer; anything
/// else → 0.
fn clamped_score(value: Option<&Value>) -> u32 {
    value
        .and_then(Value::as_f64)
        .map(|n| n.clamp(0.0, 100.0) as u32)
        .unwrap_or(0)
}

/// List → every element coerced to a string (string values verbatim, other
/// JSON values via their compact rendering), truncated to `max`;
/// non-list → empty.
fn string_list(value: Option<&Value>, max: usize) -> Vec<String> {
    value
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .take(max)
                .map(|item| match item {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                })
                .collect()
        })
        .unwrap_or_default()
}

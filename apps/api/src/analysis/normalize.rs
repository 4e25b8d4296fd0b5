//! Response normalization — turns raw model text into a JSON mapping, or
//! failing that, mines sections out of plain text.
//!
//! Trust tiers, applied in order: fenced JSON > bare-brace slice > strict
//! parse > heuristic section scan > positional paragraph guess. Each tier
//! is a pure function; callers fall through to the next on `None`. Bounds
//! enforcement happens later, in `validate` — this module only recovers
//! structure.

use std::sync::OnceLock;

use regex::Regex;
use serde_json::{json, Map, Value};

use crate::analysis::models::CATEGORY_NAMES;

/// Cap on items collected per mined section in the match flow.
const MAX_MINED_ITEMS: usize = 10;

// ────────────────────────────────────────────────────────────────────────────
// Tiers 1–3: fenced JSON, bare-brace slice, strict parse
// ────────────────────────────────────────────────────────────────────────────

/// Tier 1: interior of the first fenced code block.
/// A ```json fence wins; any bare ``` fence is accepted as a fallback.
pub fn fenced_block(raw: &str) -> Option<&str> {
    static JSON_FENCE: OnceLock<Regex> = OnceLock::new();
    static ANY_FENCE: OnceLock<Regex> = OnceLock::new();

    let json_fence = JSON_FENCE
        .get_or_init(|| Regex::new(r"(?s)```json\s*(.*?)\s*```").expect("valid fence regex"));
    let any_fence =
        ANY_FENCE.get_or_init(|| Regex::new(r"(?s)```\s*(.*?)\s*```").expect("valid fence regex"));

    json_fence
        .captures(raw)
        .or_else(|| any_fence.captures(raw))
        .and_then(|captures| captures.get(1))
        .map(|interior| interior.as_str())
}

/// Tier 2: if `text` is not already a bare object, slice from the first `{`
/// to the last `}` inclusive. Tolerates prose on either side.
pub fn brace_slice(text: &str) -> Option<&str> {
    let text = text.trim();
    if text.starts_with('{') && text.ends_with('}') {
        return Some(text);
    }
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (start < end).then(|| &text[start..=end])
}

/// Tiers 1–3 chained: fence, brace slice, then strict parse. `None` means
/// the reply holds no parseable JSON object and the caller should fall back
/// to text mining.
pub fn parse_candidate(raw: &str) -> Option<Value> {
    let candidate = fenced_block(raw).unwrap_or(raw);
    let candidate = brace_slice(candidate).unwrap_or(candidate);
    serde_json::from_str::<Value>(candidate.trim())
        .ok()
        .filter(Value::is_object)
}

// ────────────────────────────────────────────────────────────────────────────
// Shared line helpers
// ────────────────────────────────────────────────────────────────────────────

/// Strips a bullet (`- `, `* `, `• `) or numbered (`1.`) marker, returning
/// the item text. `None` for lines that are not list items.
fn list_item(line: &str) -> Option<String> {
    if let Some(rest) = line
        .strip_prefix("- ")
        .or_else(|| line.strip_prefix("* "))
        .or_else(|| line.strip_prefix("• "))
    {
        return Some(rest.trim().to_string());
    }

    static NUMBERED: OnceLock<Regex> = OnceLock::new();
    let numbered =
        NUMBERED.get_or_init(|| Regex::new(r"^\d+\.\s*").expect("valid numbered-item regex"));
    numbered
        .find(line)
        .map(|marker| line[marker.end()..].trim().to_string())
}

// ────────────────────────────────────────────────────────────────────────────
// Tier 4, resume flow: section scan + positional guess
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Strengths,
    Improvements,
    Projects,
    Roadmap,
    Courses,
}

/// Keyword membership marking a line as a section header, checked in order;
/// the first matching section wins.
const SECTION_KEYWORDS: &[(Section, &[&str])] = &[
    (Section::Strengths, &["strength", "strong points"]),
    (Section::Improvements, &["improve", "weaknesses"]),
    (Section::Projects, &["project", "build", "create"]),
    (Section::Roadmap, &["roadmap", "career path", "growth path"]),
    (Section::Courses, &["course", "certification", "learn", "study"]),
];

/// A header line names a known section AND carries a delimiter: a colon, a
/// markdown hash, or a dot within its first two characters (numbered
/// headers like "1. Strengths").
fn header_section(line: &str) -> Option<Section> {
    let has_delimiter =
        line.contains(':') || line.contains('#') || line.chars().take(2).any(|c| c == '.');
    if !has_delimiter {
        return None;
    }

    let lower = line.to_lowercase();
    SECTION_KEYWORDS.iter().find_map(|(section, keywords)| {
        keywords
            .iter()
            .any(|keyword| lower.contains(keyword))
            .then_some(*section)
    })
}

/// Tier 4 for the resume flow: scan raw lines for keyword-marked section
/// headers, collect bulleted/numbered items beneath them, and let bare
/// lines feed the roadmap narrative. Ends with the positional paragraph
/// guess when nothing at all was recognized.
///
/// Returns a mapping in the target shape; empty fields are left empty for
/// the validator and back-fill to finish.
pub fn mine_analysis(raw: &str) -> Value {
    let mut strengths: Vec<String> = Vec::new();
    let mut improvements: Vec<String> = Vec::new();
    let mut projects: Vec<String> = Vec::new();
    let mut roadmap = String::new();
    let mut courses: Vec<String> = Vec::new();
    let mut current: Option<Section> = None;

    for line in raw.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        if let Some(section) = header_section(line) {
            current = Some(section);
            continue;
        }

        let Some(section) = current else {
            continue;
        };

        if let Some(item) = list_item(line) {
            if item.is_empty() {
                continue;
            }
            match section {
                Section::Strengths => strengths.push(item),
                Section::Improvements => improvements.push(item),
                Section::Projects => projects.push(item),
                Section::Courses => courses.push(item),
                // The roadmap is narrative; bullets under it are ignored.
                Section::Roadmap => {}
            }
        } else if section == Section::Roadmap {
            roadmap.push_str(line);
            roadmap.push('\n');
        }
    }

    let nothing_found = strengths.is_empty()
        && improvements.is_empty()
        && projects.is_empty()
        && roadmap.is_empty()
        && courses.is_empty();

    if nothing_found {
        if let Some(guess) = positional_guess(raw) {
            return guess;
        }
    }

    json!({
        "strengths": strengths,
        "areas_of_improvement": improvements,
        "project_recommendations": projects,
        "career_roadmap": roadmap.trim_end(),
        "recommended_courses": courses,
    })
}

/// Last resort: split the reply into blank-line paragraphs and assign the
/// first five, in fixed order, to the five expected fields.
fn positional_guess(raw: &str) -> Option<Value> {
    let paragraphs: Vec<&str> = raw
        .split("\n\n")
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect();

    (paragraphs.len() >= 5).then(|| {
        json!({
            "strengths": [paragraphs[0]],
            "areas_of_improvement": [paragraphs[1]],
            "project_recommendations": [paragraphs[2]],
            "career_roadmap": paragraphs[3],
            "recommended_courses": [paragraphs[4]],
        })
    })
}

// ────────────────────────────────────────────────────────────────────────────
// Tier 4, match flow: pattern mining
// ────────────────────────────────────────────────────────────────────────────

/// Tier 4 for the match flow: pattern-mine the score, the three skill
/// lists, and the five category scores out of free text. Always returns
/// the full target shape; unfound values default to 0 / empty.
pub fn mine_match(raw: &str) -> Value {
    let mut categories = Map::new();
    for name in CATEGORY_NAMES {
        categories.insert(name.to_string(), json!(labeled_number(raw, name).unwrap_or(0)));
    }

    json!({
        "score": mine_score(raw).unwrap_or(0),
        "matching_skills": section_items(raw, "matching skills"),
        "missing_skills": section_items(raw, "missing skills"),
        "recommendations": section_items(raw, "recommendations"),
        "category_scores": categories,
    })
}

/// Locates the overall score: the JSON-key form first, then a loose
/// case-insensitive "score ... N" form.
fn mine_score(text: &str) -> Option<i64> {
    static KEYED: OnceLock<Regex> = OnceLock::new();
    static LOOSE: OnceLock<Regex> = OnceLock::new();

    let keyed =
        KEYED.get_or_init(|| Regex::new(r#""score"\s*:\s*(\d+)"#).expect("valid score regex"));
    let loose = LOOSE.get_or_init(|| Regex::new(r"(?i)score[:\s]*(\d+)").expect("valid score regex"));

    keyed
        .captures(text)
        .or_else(|| loose.captures(text))
        .and_then(|captures| captures.get(1))
        .and_then(|digits| digits.as_str().parse().ok())
}

/// Finds the first number following `label`, case-insensitively. Used for
/// the per-category scores.
fn labeled_number(text: &str, label: &str) -> Option<i64> {
    let pattern = format!(r"(?i){}[:\s]*(\d+)", regex::escape(label));
    let re = Regex::new(&pattern).ok()?;
    re.captures(text)
        .and_then(|captures| captures.get(1))
        .and_then(|digits| digits.as_str().parse().ok())
}

/// Collects bulleted or numbered items under the first line mentioning
/// `section_name` (case-insensitive). Blank lines are skipped; the first
/// other non-item line ends the section. Capped at `MAX_MINED_ITEMS`.
fn section_items(text: &str, section_name: &str) -> Vec<String> {
    let mut items = Vec::new();
    let mut in_section = false;

    for line in text.lines() {
        let line = line.trim();

        if !in_section {
            if line.to_lowercase().contains(section_name) {
                in_section = true;
            }
            continue;
        }

        if line.is_empty() {
            continue;
        }

        match list_item(line) {
            Some(item) if !item.is_empty() => {
                items.push(item);
                if items.len() == MAX_MINED_ITEMS {
                    break;
                }
            }
            _ => break,
        }
    }

    items
}

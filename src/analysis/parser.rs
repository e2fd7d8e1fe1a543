//! Extraction and validation of the JSON payload in a model completion
//!
//! The provider is asked for bare JSON but may still wrap it in prose or
//! markdown code fences; this module locates the object, then maps it
//! field by field into an `AnalysisResult`.

use crate::analysis::result::AnalysisResult;
use crate::error::{JobFitError, Result};
use regex::Regex;
use serde_json::Value;

/// Locates a JSON object inside completion text.
///
/// Tries the whole (fence-stripped) text first, then an object anchored at
/// the end of the text, then the widest brace-delimited span.
pub fn extract_json(completion: &str) -> Result<String> {
    let text = strip_code_fences(completion);

    if is_json_object(text) {
        return Ok(text.to_string());
    }

    let anchored = Regex::new(r"\{[\s\S]*\}\s*$").unwrap();
    let greedy = Regex::new(r"\{[\s\S]*\}").unwrap();

    for re in [&anchored, &greedy] {
        if let Some(found) = re.find(text) {
            let candidate = found.as_str().trim();
            if is_json_object(candidate) {
                return Ok(candidate.to_string());
            }
        }
    }

    Err(JobFitError::NoJsonFound)
}

/// Parses a completion into a fully populated `AnalysisResult`.
///
/// Required fields: match_percentage, matching_skills, missing_skills.
/// Optional fields default to an empty string or sequence.
pub fn parse_analysis(completion: &str) -> Result<AnalysisResult> {
    let json = extract_json(completion)?;
    let value: Value = serde_json::from_str(&json)?;

    Ok(AnalysisResult {
        match_percentage: match_percentage(&value)?,
        matching_skills: required_skill_list(&value, "matching_skills")?,
        missing_skills: required_skill_list(&value, "missing_skills")?,
        experience_gap_notes: optional_string(&value, "experience_gap_notes"),
        education_gap_notes: optional_string(&value, "education_gap_notes"),
        ats_suggestions: optional_suggestion_list(&value, "ats_suggestions"),
        cover_letter: optional_string(&value, "cover_letter"),
        enhanced_resume_text: optional_string(&value, "enhanced_resume_text"),
    })
}

fn is_json_object(text: &str) -> bool {
    serde_json::from_str::<Value>(text)
        .map(|v| v.is_object())
        .unwrap_or(false)
}

/// Strips ```json ... ``` or ``` ... ``` code fences around the completion.
fn strip_code_fences(text: &str) -> &str {
    let text = text.trim();
    let stripped = text
        .strip_prefix("```json")
        .or_else(|| text.strip_prefix("```"));

    match stripped {
        Some(inner) => {
            let inner = inner.trim_start();
            inner
                .strip_suffix("```")
                .map(str::trim_end)
                .unwrap_or(inner)
        }
        None => text,
    }
}

/// Accepts a number or a "NN%" string, then clamps into [0, 100].
fn match_percentage(value: &Value) -> Result<u8> {
    let raw = value.get("match_percentage").ok_or_else(|| {
        JobFitError::SchemaMismatch("match_percentage is missing".to_string())
    })?;

    let number = match raw {
        Value::Number(n) => n.as_f64().ok_or_else(|| {
            JobFitError::SchemaMismatch(format!("match_percentage is not a number: {}", n))
        })?,
        Value::String(s) => s
            .trim()
            .trim_end_matches('%')
            .trim()
            .parse::<f64>()
            .map_err(|_| {
                JobFitError::SchemaMismatch(format!("match_percentage is not numeric: '{}'", s))
            })?,
        other => {
            return Err(JobFitError::SchemaMismatch(format!(
                "match_percentage has unexpected type: {}",
                other
            )))
        }
    };

    Ok(number.clamp(0.0, 100.0).round() as u8)
}

fn required_skill_list(value: &Value, field: &str) -> Result<Vec<String>> {
    let raw = value
        .get(field)
        .ok_or_else(|| JobFitError::SchemaMismatch(format!("{} is missing", field)))?;

    let entries = raw
        .as_array()
        .ok_or_else(|| JobFitError::SchemaMismatch(format!("{} is not an array", field)))?;

    entries
        .iter()
        .map(|entry| skill_name(entry, field))
        .collect()
}

/// Skill entries arrive either as plain strings or as objects carrying a
/// "skill_name" key.
fn skill_name(entry: &Value, field: &str) -> Result<String> {
    match entry {
        Value::String(s) => Ok(s.clone()),
        Value::Object(map) => map
            .get("skill_name")
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or_else(|| {
                JobFitError::SchemaMismatch(format!("{} entry has no skill_name", field))
            }),
        other => Err(JobFitError::SchemaMismatch(format!(
            "{} entry has unexpected type: {}",
            field, other
        ))),
    }
}

fn optional_string(value: &Value, field: &str) -> String {
    value
        .get(field)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

/// ATS suggestions arrive as strings, or as objects whose useful content sits
/// under "suggested_change" (optionally with a "section"). Entries with
/// neither shape are dropped rather than failing the parse.
fn optional_suggestion_list(value: &Value, field: &str) -> Vec<String> {
    let Some(entries) = value.get(field).and_then(Value::as_array) else {
        return Vec::new();
    };

    entries
        .iter()
        .filter_map(|entry| match entry {
            Value::String(s) => Some(s.clone()),
            Value::Object(map) => {
                let change = map.get("suggested_change").and_then(Value::as_str)?;
                match map.get("section").and_then(Value::as_str) {
                    Some(section) if !section.is_empty() => {
                        Some(format!("{}: {}", section, change))
                    }
                    _ => Some(change.to_string()),
                }
            }
            _ => None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL: &str =
        r#"{"match_percentage": 70, "matching_skills": ["Rust"], "missing_skills": ["Go"]}"#;

    #[test]
    fn test_bare_json_parses() {
        let result = parse_analysis(MINIMAL).unwrap();
        assert_eq!(result.match_percentage, 70);
        assert_eq!(result.matching_skills, vec!["Rust"]);
        assert_eq!(result.missing_skills, vec!["Go"]);
    }

    #[test]
    fn test_out_of_range_percentage_is_clamped() {
        let completion =
            r#"{"match_percentage": 150, "matching_skills": ["x"], "missing_skills": []}"#;
        let result = parse_analysis(completion).unwrap();
        assert_eq!(result.match_percentage, 100);

        let completion =
            r#"{"match_percentage": -3, "matching_skills": [], "missing_skills": []}"#;
        assert_eq!(parse_analysis(completion).unwrap().match_percentage, 0);
    }

    #[test]
    fn test_percent_string_is_coerced() {
        let completion =
            r#"{"match_percentage": "85%", "matching_skills": [], "missing_skills": []}"#;
        assert_eq!(parse_analysis(completion).unwrap().match_percentage, 85);
    }

    #[test]
    fn test_code_fenced_json_parses() {
        let completion = format!("```json\n{}\n```", MINIMAL);
        assert_eq!(parse_analysis(&completion).unwrap().match_percentage, 70);
    }

    #[test]
    fn test_prose_wrapped_json_parses() {
        let completion = format!("Here is the analysis you asked for:\n\n{}", MINIMAL);
        assert_eq!(parse_analysis(&completion).unwrap().match_percentage, 70);
    }

    #[test]
    fn test_no_json_at_all() {
        let result = parse_analysis("I could not produce an analysis, sorry.");
        assert!(matches!(result, Err(JobFitError::NoJsonFound)));
    }

    #[test]
    fn test_missing_required_field() {
        let completion = r#"{"match_percentage": 50, "matching_skills": []}"#;
        match parse_analysis(completion) {
            Err(JobFitError::SchemaMismatch(msg)) => assert!(msg.contains("missing_skills")),
            other => panic!("expected SchemaMismatch, got {:?}", other),
        }
    }

    #[test]
    fn test_wrong_type_for_required_field() {
        let completion =
            r#"{"match_percentage": 50, "matching_skills": "Rust", "missing_skills": []}"#;
        assert!(matches!(
            parse_analysis(completion),
            Err(JobFitError::SchemaMismatch(_))
        ));
    }

    #[test]
    fn test_optional_fields_default() {
        let result = parse_analysis(MINIMAL).unwrap();
        assert!(result.ats_suggestions.is_empty());
        assert!(result.experience_gap_notes.is_empty());
        assert!(result.cover_letter.is_empty());
        assert!(result.enhanced_resume_text.is_empty());
    }

    #[test]
    fn test_object_shaped_skills_are_accepted() {
        let completion = r#"{
            "match_percentage": 60,
            "matching_skills": [{"skill_name": "Python", "is_match": true}],
            "missing_skills": [{"skill_name": "Docker", "suggestion": "Learn Docker"}]
        }"#;
        let result = parse_analysis(completion).unwrap();
        assert_eq!(result.matching_skills, vec!["Python"]);
        assert_eq!(result.missing_skills, vec!["Docker"]);
    }

    #[test]
    fn test_object_shaped_ats_suggestions() {
        let completion = r#"{
            "match_percentage": 60,
            "matching_skills": [],
            "missing_skills": [],
            "ats_suggestions": [
                "Use standard section headings",
                {"section": "Skills", "suggested_change": "List tools by name", "reason": "keyword scanning"}
            ]
        }"#;
        let result = parse_analysis(completion).unwrap();
        assert_eq!(
            result.ats_suggestions,
            vec![
                "Use standard section headings".to_string(),
                "Skills: List tools by name".to_string()
            ]
        );
    }

    #[test]
    fn test_overlapping_skills_pass_through() {
        let completion = r#"{
            "match_percentage": 40,
            "matching_skills": ["SQL"],
            "missing_skills": ["SQL"]
        }"#;
        let result = parse_analysis(completion).unwrap();
        assert_eq!(result.matching_skills, result.missing_skills);
    }
}

//! Structured analysis result returned by the model

use serde::{Deserialize, Serialize};

/// The model's verdict on one resume/job-description pair.
///
/// Produced once per request and never mutated afterwards. The matching and
/// missing skill lists are passed through as the model returned them; no
/// disjointness between the two is enforced.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Overall match score, always within 0-100.
    pub match_percentage: u8,
    pub matching_skills: Vec<String>,
    pub missing_skills: Vec<String>,
    #[serde(default)]
    pub experience_gap_notes: String,
    #[serde(default)]
    pub education_gap_notes: String,
    #[serde(default)]
    pub ats_suggestions: Vec<String>,
    #[serde(default)]
    pub cover_letter: String,
    #[serde(default)]
    pub enhanced_resume_text: String,
}

//! Analysis request construction and validation

use crate::error::{JobFitError, Result};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Tone used for generated cover letters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    #[default]
    Professional,
    Enthusiastic,
    Confident,
    Friendly,
}

impl Tone {
    pub fn as_str(&self) -> &'static str {
        match self {
            Tone::Professional => "professional",
            Tone::Enthusiastic => "enthusiastic",
            Tone::Confident => "confident",
            Tone::Friendly => "friendly",
        }
    }
}

impl std::fmt::Display for Tone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One user submission: both input texts plus the requested cover letter
/// tone. Immutable once constructed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisRequest {
    resume_text: String,
    job_description_text: String,
    tone: Tone,
}

impl AnalysisRequest {
    /// Fails fast when either text is empty or whitespace-only.
    pub fn new(
        resume_text: impl Into<String>,
        job_description_text: impl Into<String>,
        tone: Tone,
    ) -> Result<Self> {
        let resume_text = resume_text.into();
        let job_description_text = job_description_text.into();

        if resume_text.trim().is_empty() {
            return Err(JobFitError::MissingInput("resume text is empty".to_string()));
        }
        if job_description_text.trim().is_empty() {
            return Err(JobFitError::MissingInput(
                "job description text is empty".to_string(),
            ));
        }

        Ok(Self {
            resume_text,
            job_description_text,
            tone,
        })
    }

    pub fn resume_text(&self) -> &str {
        &self.resume_text
    }

    pub fn job_description_text(&self) -> &str {
        &self.job_description_text
    }

    pub fn tone(&self) -> Tone {
        self.tone
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_empty_resume() {
        let result = AnalysisRequest::new("", "A job", Tone::Professional);
        assert!(matches!(result, Err(JobFitError::MissingInput(_))));
    }

    #[test]
    fn test_rejects_whitespace_job_description() {
        let result = AnalysisRequest::new("A resume", "  \n ", Tone::Professional);
        assert!(matches!(result, Err(JobFitError::MissingInput(_))));
    }

    #[test]
    fn test_accepts_non_empty_inputs() {
        let request = AnalysisRequest::new("A resume", "A job", Tone::Friendly).unwrap();
        assert_eq!(request.resume_text(), "A resume");
        assert_eq!(request.job_description_text(), "A job");
        assert_eq!(request.tone(), Tone::Friendly);
    }
}

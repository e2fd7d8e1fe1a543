//! Report structure wrapping the analysis result with run metadata

use crate::analysis::request::Tone;
use crate::analysis::result::AnalysisResult;
use crate::error::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Analysis result plus everything needed to render or reload it later.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub result: AnalysisResult,
    pub metadata: ReportMetadata,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMetadata {
    pub generated_at: DateTime<Utc>,
    pub model: String,
    pub tone: Tone,
    pub resume_file: String,
    pub tool_version: String,
}

/// Coarse verdict derived from the match percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchQuality {
    Excellent,
    Good,
    NeedsWork,
}

impl MatchQuality {
    pub fn from_percentage(percentage: u8) -> Self {
        if percentage >= 80 {
            MatchQuality::Excellent
        } else if percentage >= 60 {
            MatchQuality::Good
        } else {
            MatchQuality::NeedsWork
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            MatchQuality::Excellent => "Excellent",
            MatchQuality::Good => "Good",
            MatchQuality::NeedsWork => "Needs Work",
        }
    }
}

impl AnalysisReport {
    pub fn new(result: AnalysisResult, model: String, tone: Tone, resume_file: String) -> Self {
        Self {
            result,
            metadata: ReportMetadata {
                generated_at: Utc::now(),
                model,
                tone,
                resume_file,
                tool_version: env!("CARGO_PKG_VERSION").to_string(),
            },
        }
    }

    pub fn match_quality(&self) -> MatchQuality {
        MatchQuality::from_percentage(self.result.match_percentage)
    }

    /// Reloads a report previously saved as JSON.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let report = serde_json::from_str(&content)?;
        Ok(report)
    }
}

//! Report formatting for console, JSON, and markdown output

use crate::config::OutputFormat;
use crate::error::Result;
use crate::output::report::{AnalysisReport, MatchQuality};
use chrono::Local;
use colored::{Color, Colorize};
use std::path::Path;

pub trait ReportFormatter {
    fn format_report(&self, report: &AnalysisReport) -> Result<String>;
}

/// Builds the formatter matching the requested output format.
pub fn formatter_for(
    format: OutputFormat,
    use_colors: bool,
    detailed: bool,
) -> Box<dyn ReportFormatter> {
    match format {
        OutputFormat::Console => Box::new(ConsoleFormatter::new(use_colors, detailed)),
        OutputFormat::Json => Box::new(JsonFormatter::new(true)),
        OutputFormat::Markdown => Box::new(MarkdownFormatter),
    }
}

pub struct ConsoleFormatter {
    use_colors: bool,
    detailed: bool,
}

impl ConsoleFormatter {
    pub fn new(use_colors: bool, detailed: bool) -> Self {
        Self {
            use_colors,
            detailed,
        }
    }

    fn colorize(&self, text: &str, color: Color) -> String {
        if self.use_colors {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }

    fn score_badge(&self, report: &AnalysisReport) -> String {
        let percentage = report.result.match_percentage;
        let quality = report.match_quality();
        let color = match quality {
            MatchQuality::Excellent => Color::Green,
            MatchQuality::Good => Color::Yellow,
            MatchQuality::NeedsWork => Color::Red,
        };
        self.colorize(
            &format!("{}% ({})", percentage, quality.label()),
            color,
        )
    }
}

impl ReportFormatter for ConsoleFormatter {
    fn format_report(&self, report: &AnalysisReport) -> Result<String> {
        let mut out = String::new();
        let result = &report.result;

        out.push_str(&format!(
            "\n{}\n",
            self.colorize("📊 Analysis Results", Color::Cyan)
        ));
        out.push_str(&format!("🎯 Overall Match: {}\n", self.score_badge(report)));
        out.push_str(&format!(
            "🤖 Model: {}  •  Generated: {}\n",
            report.metadata.model,
            report
                .metadata
                .generated_at
                .with_timezone(&Local)
                .format("%Y-%m-%d %H:%M")
        ));

        out.push_str(&format!(
            "\n{}\n",
            self.colorize("✅ Matching Skills", Color::Green)
        ));
        if result.matching_skills.is_empty() {
            out.push_str("  (none identified)\n");
        }
        for skill in &result.matching_skills {
            out.push_str(&format!("  • {}\n", skill));
        }

        out.push_str(&format!(
            "\n{}\n",
            self.colorize("⚠️  Missing Skills", Color::Yellow)
        ));
        if result.missing_skills.is_empty() {
            out.push_str("  (none — no critical skills are missing)\n");
        }
        for skill in &result.missing_skills {
            out.push_str(&format!("  • {}\n", skill));
        }

        if !result.experience_gap_notes.is_empty() {
            out.push_str(&format!(
                "\n{}\n  {}\n",
                self.colorize("🗂️  Experience Match", Color::Cyan),
                result.experience_gap_notes
            ));
        }
        if !result.education_gap_notes.is_empty() {
            out.push_str(&format!(
                "\n{}\n  {}\n",
                self.colorize("🎓 Education Match", Color::Cyan),
                result.education_gap_notes
            ));
        }

        if !result.ats_suggestions.is_empty() {
            out.push_str(&format!(
                "\n{}\n",
                self.colorize("🤖 ATS Optimization Suggestions", Color::Cyan)
            ));
            for (i, suggestion) in result.ats_suggestions.iter().enumerate() {
                out.push_str(&format!("  {}. {}\n", i + 1, suggestion));
            }
        }

        if self.detailed && !result.cover_letter.is_empty() {
            out.push_str(&format!(
                "\n{}\n{}\n",
                self.colorize("💌 Cover Letter", Color::Cyan),
                result.cover_letter
            ));
        }

        Ok(out)
    }
}

pub struct JsonFormatter {
    pretty: bool,
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }
}

impl ReportFormatter for JsonFormatter {
    fn format_report(&self, report: &AnalysisReport) -> Result<String> {
        let json = if self.pretty {
            serde_json::to_string_pretty(report)?
        } else {
            serde_json::to_string(report)?
        };
        Ok(json)
    }
}

pub struct MarkdownFormatter;

impl ReportFormatter for MarkdownFormatter {
    fn format_report(&self, report: &AnalysisReport) -> Result<String> {
        let mut out = String::new();
        let result = &report.result;

        out.push_str("# Resume Analysis Report\n\n");
        out.push_str(&format!(
            "**Overall Match:** {}% ({})  \n",
            result.match_percentage,
            report.match_quality().label()
        ));
        out.push_str(&format!(
            "**Model:** {}  \n**Generated:** {}\n\n",
            report.metadata.model,
            report.metadata.generated_at.format("%Y-%m-%d %H:%M UTC")
        ));

        out.push_str("## Matching Skills\n\n");
        for skill in &result.matching_skills {
            out.push_str(&format!("- {}\n", skill));
        }

        out.push_str("\n## Missing Skills\n\n");
        for skill in &result.missing_skills {
            out.push_str(&format!("- {}\n", skill));
        }

        if !result.experience_gap_notes.is_empty() {
            out.push_str(&format!(
                "\n## Experience Match\n\n{}\n",
                result.experience_gap_notes
            ));
        }
        if !result.education_gap_notes.is_empty() {
            out.push_str(&format!(
                "\n## Education Match\n\n{}\n",
                result.education_gap_notes
            ));
        }

        if !result.ats_suggestions.is_empty() {
            out.push_str("\n## ATS Optimization Suggestions\n\n");
            for suggestion in &result.ats_suggestions {
                out.push_str(&format!("- {}\n", suggestion));
            }
        }

        if !result.cover_letter.is_empty() {
            out.push_str(&format!("\n## Cover Letter\n\n{}\n", result.cover_letter));
        }

        Ok(out)
    }
}

/// Writes formatted output to a file, creating parent directories as needed.
pub fn save_to_file(content: &str, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(path, content)?;
    Ok(())
}

/// Suggests a timestamped file name for a saved report.
pub fn suggest_filename(format: OutputFormat, resume_name: &str) -> String {
    let stem = Path::new(resume_name)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("resume");
    let timestamp = Local::now().format("%Y%m%d_%H%M%S");
    let extension = match format {
        OutputFormat::Console => "txt",
        OutputFormat::Json => "json",
        OutputFormat::Markdown => "md",
    };
    format!("{}_analysis_{}.{}", stem, timestamp, extension)
}

//! CLI interface for JobFit

use crate::analysis::request::Tone;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "jobfit")]
#[command(about = "AI-powered resume and job matching assistant")]
#[command(
    long_about = "Analyze resume compatibility with a job description using the Google Gemini API: match score, skill gaps, ATS suggestions, a cover letter and an enhanced resume export"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Analyze a resume against a job description
    Analyze {
        /// Path to resume file (PDF, TXT, MD)
        #[arg(short, long)]
        resume: PathBuf,

        /// Path to job description file (TXT, MD)
        #[arg(short, long)]
        job: PathBuf,

        /// Tone for the generated cover letter
        #[arg(short, long, value_enum, default_value_t = Tone::Professional)]
        tone: Tone,

        /// Gemini model to use
        #[arg(short, long)]
        model: Option<String>,

        /// API key (overrides the config file and GEMINI_API_KEY)
        #[arg(long)]
        api_key: Option<String>,

        /// Output format: console, json, markdown
        #[arg(short, long, default_value = "console")]
        output: String,

        /// Save the report to a file
        #[arg(short, long)]
        save: Option<PathBuf>,

        /// Write the generated cover letter to a text file
        #[arg(long)]
        cover_letter: Option<PathBuf>,

        /// Write the enhanced resume as a PDF
        #[arg(long)]
        enhanced_pdf: Option<PathBuf>,

        /// Output detailed analysis
        #[arg(short, long)]
        detailed: bool,
    },

    /// Regenerate the cover letter from a saved report, with a chosen tone
    CoverLetter {
        /// Path to resume file (PDF, TXT, MD)
        #[arg(short, long)]
        resume: PathBuf,

        /// Path to job description file (TXT, MD)
        #[arg(short, long)]
        job: PathBuf,

        /// Previously saved JSON report to reuse
        #[arg(short, long)]
        analysis: PathBuf,

        /// Tone for the letter
        #[arg(short, long, value_enum, default_value_t = Tone::Professional)]
        tone: Tone,

        /// Gemini model to use
        #[arg(short, long)]
        model: Option<String>,

        /// API key (overrides the config file and GEMINI_API_KEY)
        #[arg(long)]
        api_key: Option<String>,

        /// Save the letter to a file instead of printing it
        #[arg(short, long)]
        save: Option<PathBuf>,
    },

    /// Show or edit configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Reset configuration to defaults
    Reset,

    /// Set a configuration value
    Set {
        /// Configuration key (e.g. "api.model")
        key: String,

        /// Configuration value
        value: String,
    },
}

/// Parse and validate output format
pub fn parse_output_format(format: &str) -> Result<crate::config::OutputFormat, String> {
    match format.to_lowercase().as_str() {
        "console" => Ok(crate::config::OutputFormat::Console),
        "json" => Ok(crate::config::OutputFormat::Json),
        "markdown" | "md" => Ok(crate::config::OutputFormat::Markdown),
        _ => Err(format!(
            "Invalid output format: {}. Supported: console, json, markdown",
            format
        )),
    }
}

/// Validate file extension
pub fn validate_file_extension(path: &Path, allowed_extensions: &[&str]) -> Result<(), String> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) => {
            if allowed_extensions.contains(&ext.to_lowercase().as_str()) {
                Ok(())
            } else {
                Err(format!(
                    "Unsupported file extension: .{}. Allowed: {}",
                    ext,
                    allowed_extensions.join(", ")
                ))
            }
        }
        None => Err("File has no extension".to_string()),
    }
}

//! JobFit: AI-powered resume and job matching assistant

use anyhow::Context;
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use jobfit::analysis::client::GeminiClient;
use jobfit::analysis::{AnalysisEngine, AnalysisRequest, Tone};
use jobfit::cli::{self, Cli, Commands, ConfigAction};
use jobfit::config::{Config, OutputFormat};
use jobfit::credentials::CredentialChain;
use jobfit::error::JobFitError;
use jobfit::input::manager::InputManager;
use jobfit::output::formatter::{formatter_for, save_to_file, suggest_filename};
use jobfit::output::pdf::export_enhanced_resume;
use jobfit::output::report::AnalysisReport;
use log::{error, info};
use std::path::{Path, PathBuf};
use std::process;
use std::time::Duration;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let config = match Config::load_from(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = run_command(cli.command, config).await {
        match e.downcast_ref::<JobFitError>() {
            Some(err) => error!("{}", user_message(err)),
            None => error!("Command failed: {:#}", e),
        }
        process::exit(1);
    }
}

async fn run_command(command: Commands, config: Config) -> anyhow::Result<()> {
    match command {
        Commands::Analyze {
            resume,
            job,
            tone,
            model,
            api_key,
            output,
            save,
            cover_letter,
            enhanced_pdf,
            detailed,
        } => {
            info!("Starting resume/job-description analysis");

            cli::validate_file_extension(&resume, &["pdf", "txt", "md"])
                .map_err(|e| JobFitError::InvalidInput(format!("Resume file: {}", e)))?;
            cli::validate_file_extension(&job, &["txt", "md"])
                .map_err(|e| JobFitError::InvalidInput(format!("Job description file: {}", e)))?;

            let output_format =
                cli::parse_output_format(&output).map_err(JobFitError::InvalidInput)?;

            println!("🚀 JobFit analysis");
            println!("📄 Resume: {}", resume.display());
            println!("💼 Job Description: {}", job.display());

            let (request, engine, model) =
                prepare_pipeline(&resume, &job, tone, model, api_key, &config).await?;

            let result = with_spinner("Analyzing your application...", engine.analyze(&request)).await?;

            let report = AnalysisReport::new(result, model, tone, file_name(&resume));

            let use_colors = config.output.color_output && output_format == OutputFormat::Console;
            let formatter = formatter_for(output_format, use_colors, detailed || config.output.detailed);
            let rendered = formatter.format_report(&report)?;

            match &save {
                Some(path) => {
                    save_to_file(&rendered, path)
                        .with_context(|| format!("saving report to {}", path.display()))?;
                    println!("💾 Report saved to {}", path.display());
                }
                None => println!("{}", rendered),
            }

            if let Some(path) = &cover_letter {
                write_cover_letter(&report.result.cover_letter, path)?;
            }

            if let Some(path) = &enhanced_pdf {
                let text = if report.result.enhanced_resume_text.is_empty() {
                    info!("Model returned no enhanced resume text; exporting the original");
                    request.resume_text()
                } else {
                    &report.result.enhanced_resume_text
                };
                export_enhanced_resume(text, &report.result.ats_suggestions, path)
                    .with_context(|| format!("exporting enhanced resume to {}", path.display()))?;
                println!("📄 Enhanced resume saved to {}", path.display());
            }

            if save.is_none() && output_format != OutputFormat::Console {
                let suggestion = suggest_filename(output_format, &file_name(&resume));
                info!("Tip: use --save {} to keep this report", suggestion);
            }

            Ok(())
        }

        Commands::CoverLetter {
            resume,
            job,
            analysis,
            tone,
            model,
            api_key,
            save,
        } => {
            info!("Regenerating cover letter with tone '{}'", tone);

            let report = AnalysisReport::load(&analysis)
                .with_context(|| format!("loading saved analysis from {}", analysis.display()))?;

            let (request, engine, _model) =
                prepare_pipeline(&resume, &job, tone, model, api_key, &config).await?;

            let letter = with_spinner(
                "Crafting your cover letter...",
                engine.generate_cover_letter(&request, &report.result),
            )
            .await?;

            match &save {
                Some(path) => write_cover_letter(&letter, path)?,
                None => println!("\n💌 Your cover letter:\n\n{}", letter),
            }

            Ok(())
        }

        Commands::Config { action } => {
            run_config_action(action, config)?;
            Ok(())
        }
    }
}

/// Extracts both input texts and assembles the request and engine; shared by
/// the analyze and cover-letter commands.
async fn prepare_pipeline(
    resume: &Path,
    job: &Path,
    tone: Tone,
    model: Option<String>,
    api_key: Option<String>,
    config: &Config,
) -> anyhow::Result<(AnalysisRequest, AnalysisEngine<GeminiClient>, String)> {
    let mut input_manager = InputManager::new();
    let resume_text = input_manager.extract_text(resume).await?;
    let job_text = input_manager.extract_text(job).await?;
    info!(
        "Extracted {} resume chars and {} job description chars",
        resume_text.len(),
        job_text.len()
    );

    let request = AnalysisRequest::new(resume_text, job_text, tone)?;

    let key = CredentialChain::new(api_key, config.api.api_key.clone())
        .resolve()
        .ok_or_else(|| {
            JobFitError::Authentication("no API key found in any source".to_string())
        })?;

    let model = model.unwrap_or_else(|| config.api.model.clone());
    let client = GeminiClient::new(key, &model, config.api.timeout_secs)?;
    let model = client.model().to_string();
    let engine = AnalysisEngine::from_config(client, &config.api);

    Ok((request, engine, model))
}

fn run_config_action(action: Option<ConfigAction>, mut config: Config) -> anyhow::Result<()> {
    match action.unwrap_or(ConfigAction::Show) {
        ConfigAction::Show => {
            let content = toml::to_string_pretty(&config)
                .map_err(|e| JobFitError::Configuration(e.to_string()))?;
            println!("# {}\n{}", Config::config_path().display(), content);
        }
        ConfigAction::Reset => {
            Config::default().save()?;
            println!("✅ Configuration reset to defaults");
        }
        ConfigAction::Set { key, value } => {
            config.set(&key, &value)?;
            config.save()?;
            println!("✅ {} = {}", key, value);
        }
    }
    Ok(())
}

fn write_cover_letter(letter: &str, path: &PathBuf) -> anyhow::Result<()> {
    if letter.is_empty() {
        return Err(JobFitError::MissingInput(
            "the analysis contains no cover letter text".to_string(),
        )
        .into());
    }
    save_to_file(letter, path).with_context(|| format!("saving cover letter to {}", path.display()))?;
    println!("💌 Cover letter saved to {}", path.display());
    Ok(())
}

async fn with_spinner<T>(
    message: &'static str,
    fut: impl std::future::Future<Output = jobfit::Result<T>>,
) -> jobfit::Result<T> {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::with_template("{spinner} {msg}").unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message(message);
    spinner.enable_steady_tick(Duration::from_millis(120));

    let result = fut.await;
    spinner.finish_and_clear();
    result
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.to_string_lossy().to_string())
}

/// One human-readable line per error kind; every failure is recoverable by
/// re-running the command.
fn user_message(err: &JobFitError) -> String {
    match err {
        JobFitError::MissingInput(m) => format!(
            "Missing input: {}. Provide both a resume and a job description, then try again.",
            m
        ),
        JobFitError::Authentication(m) => format!(
            "Authentication failed: {}. Pass --api-key, set api.api_key in the config file, or export GEMINI_API_KEY.",
            m
        ),
        JobFitError::RateLimit(m) => format!(
            "The provider is throttling requests ({}). Wait a moment and try again.",
            m
        ),
        JobFitError::Network(m) => format!("Network error: {}. Check your connection and try again.", m),
        JobFitError::NoJsonFound | JobFitError::SchemaMismatch(_) => format!(
            "The model reply could not be parsed ({}). Re-run the analysis.",
            err
        ),
        other => other.to_string(),
    }
}

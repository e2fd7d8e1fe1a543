//! Pipeline orchestration: prompt, provider call, parsed result

use crate::analysis::client::CompletionClient;
use crate::analysis::parser;
use crate::analysis::prompts::PromptTemplates;
use crate::analysis::request::AnalysisRequest;
use crate::analysis::result::AnalysisResult;
use crate::config::ApiConfig;
use crate::error::Result;
use log::{debug, info};
use std::time::Instant;

/// Runs the linear analysis pipeline against any `CompletionClient`.
pub struct AnalysisEngine<C: CompletionClient> {
    client: C,
    templates: PromptTemplates,
    analysis_temperature: f32,
    cover_letter_temperature: f32,
}

impl<C: CompletionClient> AnalysisEngine<C> {
    pub fn new(client: C, analysis_temperature: f32, cover_letter_temperature: f32) -> Self {
        Self {
            client,
            templates: PromptTemplates::default(),
            analysis_temperature,
            cover_letter_temperature,
        }
    }

    pub fn from_config(client: C, api: &ApiConfig) -> Self {
        Self::new(client, api.temperature, api.cover_letter_temperature)
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    /// One full pass: render the prompt, call the model, validate the JSON
    /// reply.
    pub async fn analyze(&self, request: &AnalysisRequest) -> Result<AnalysisResult> {
        let started = Instant::now();

        let prompt = self.templates.render_analysis(request);
        debug!("Rendered analysis prompt ({} chars)", prompt.len());

        let completion = self
            .client
            .complete(&prompt, self.analysis_temperature)
            .await?;
        let result = parser::parse_analysis(&completion)?;

        info!(
            "Analysis completed in {:.1}s (match: {}%, {} matching / {} missing skills)",
            started.elapsed().as_secs_f32(),
            result.match_percentage,
            result.matching_skills.len(),
            result.missing_skills.len()
        );
        Ok(result)
    }

    /// Regenerates only the cover letter, at a higher temperature than the
    /// structured analysis call.
    pub async fn generate_cover_letter(
        &self,
        request: &AnalysisRequest,
        analysis: &AnalysisResult,
    ) -> Result<String> {
        let prompt = self.templates.render_cover_letter(request, analysis);
        let completion = self
            .client
            .complete(&prompt, self.cover_letter_temperature)
            .await?;
        Ok(completion.trim().to_string())
    }
}

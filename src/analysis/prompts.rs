//! Prompt templates for the analysis and cover letter calls

use crate::analysis::request::AnalysisRequest;
use crate::analysis::result::AnalysisResult;

/// Prompt templates rendered by placeholder substitution.
#[derive(Debug, Clone)]
pub struct PromptTemplates {
    pub analysis: String,
    pub cover_letter: String,
}

impl Default for PromptTemplates {
    fn default() -> Self {
        Self {
            analysis: ANALYSIS_TEMPLATE.to_string(),
            cover_letter: COVER_LETTER_TEMPLATE.to_string(),
        }
    }
}

impl PromptTemplates {
    /// Renders the structured analysis instruction. Both input texts are
    /// embedded verbatim, with no truncation.
    pub fn render_analysis(&self, request: &AnalysisRequest) -> String {
        self.analysis
            .replace("{tone}", request.tone().as_str())
            .replace("{job}", request.job_description_text())
            .replace("{resume}", request.resume_text())
    }

    /// Renders the standalone cover letter instruction, fed by a prior
    /// analysis result.
    pub fn render_cover_letter(
        &self,
        request: &AnalysisRequest,
        analysis: &AnalysisResult,
    ) -> String {
        let analysis_json = serde_json::to_string_pretty(analysis).unwrap_or_default();
        self.cover_letter
            .replace("{tone}", request.tone().as_str())
            .replace("{analysis}", &analysis_json)
            .replace("{job}", request.job_description_text())
            .replace("{resume}", request.resume_text())
    }
}

const ANALYSIS_TEMPLATE: &str = r#"You are a professional resume analyzer. Compare the resume and the job description below and produce a detailed analysis.

<RESUME>
{resume}
</RESUME>

<JOB DESCRIPTION>
{job}
</JOB DESCRIPTION>

Respond ONLY with a valid JSON object using exactly these keys, replacing the example values with specific, actionable content based on the inputs:

{
  "match_percentage": 85,
  "matching_skills": ["Python", "SQL"],
  "missing_skills": ["Docker"],
  "experience_gap_notes": "How the candidate's experience compares with what the role asks for",
  "education_gap_notes": "How the candidate's education compares with the stated requirements",
  "ats_suggestions": ["Add 'CI/CD' to the skills section"],
  "cover_letter": "A complete cover letter for this application",
  "enhanced_resume_text": "The full resume text rewritten with the suggestions applied"
}

Rules:
1. match_percentage is an integer between 0 and 100.
2. matching_skills and missing_skills are arrays of skill names taken from the job description.
3. ats_suggestions are concrete changes that help the resume pass Applicant Tracking Systems.
4. Write the cover letter in a {tone} tone, 200-300 words, ending with a confident call to action.
5. Reference the actual resume content above, not generic advice.
6. Do not wrap the JSON in markdown code fences or add any text around it."#;

const COVER_LETTER_TEMPLATE: &str = r#"Generate a compelling cover letter using this information:

Job Description:
{job}

Candidate Resume:
{resume}

Match Analysis:
{analysis}

Tone: {tone}

Requirements:
1. Make it personal and specific
2. Highlight the strongest matches
3. Address potential gaps professionally
4. Keep it concise but impactful (200-300 words)
5. Use the specified tone: {tone}
6. Include specific examples from the resume
7. Make it ATS-friendly
8. End with a confident call to action

Respond with the letter text only."#;

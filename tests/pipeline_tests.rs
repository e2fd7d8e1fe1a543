//! End-to-end pipeline tests with a mocked model, plus HTTP-level client
//! tests against a local mock server

use jobfit::analysis::client::{CompletionClient, GeminiClient};
use jobfit::analysis::{AnalysisEngine, AnalysisRequest, AnalysisResult, Tone};
use jobfit::error::JobFitError;
use jobfit::output::pdf::export_enhanced_resume;
use jobfit::output::report::AnalysisReport;
use serde_json::json;
use std::sync::Mutex;

/// Completion client that replays a canned completion and records prompts.
struct MockClient {
    completion: String,
    prompts: Mutex<Vec<String>>,
}

impl MockClient {
    fn new(completion: impl Into<String>) -> Self {
        Self {
            completion: completion.into(),
            prompts: Mutex::new(Vec::new()),
        }
    }
}

impl CompletionClient for MockClient {
    async fn complete(&self, prompt: &str, _temperature: f32) -> jobfit::Result<String> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        Ok(self.completion.clone())
    }
}

fn request() -> AnalysisRequest {
    AnalysisRequest::new(
        "Jane Smith, data engineer. Python, Airflow, SQL.",
        "Data engineer role. Requires Python, Spark, SQL.",
        Tone::Confident,
    )
    .unwrap()
}

#[tokio::test]
async fn test_end_to_end_round_trip_fidelity() {
    let completion = json!({
        "match_percentage": 78,
        "matching_skills": ["Python", "SQL"],
        "missing_skills": ["Spark"],
        "experience_gap_notes": "Five years of pipeline work, the role asks for six.",
        "education_gap_notes": "Degree requirement is met.",
        "ats_suggestions": ["Add 'ETL' to the skills section"],
        "cover_letter": "Dear Hiring Manager, ...",
        "enhanced_resume_text": "JANE SMITH\nSKILLS\nPython, SQL, Airflow"
    })
    .to_string();

    let engine = AnalysisEngine::new(MockClient::new(completion), 0.2, 0.7);
    let result = engine.analyze(&request()).await.unwrap();

    assert_eq!(result.match_percentage, 78);
    assert_eq!(result.matching_skills, vec!["Python", "SQL"]);
    assert_eq!(result.missing_skills, vec!["Spark"]);
    assert_eq!(
        result.experience_gap_notes,
        "Five years of pipeline work, the role asks for six."
    );
    assert_eq!(result.education_gap_notes, "Degree requirement is met.");
    assert_eq!(result.ats_suggestions, vec!["Add 'ETL' to the skills section"]);
    assert_eq!(result.cover_letter, "Dear Hiring Manager, ...");
    assert!(result.enhanced_resume_text.starts_with("JANE SMITH"));
}

#[tokio::test]
async fn test_prompt_reaches_the_client_with_both_inputs() {
    let completion =
        r#"{"match_percentage": 50, "matching_skills": [], "missing_skills": []}"#.to_string();
    let client = MockClient::new(completion);
    let engine = AnalysisEngine::new(client, 0.2, 0.7);

    engine.analyze(&request()).await.unwrap();

    let prompts = engine.client().prompts.lock().unwrap().clone();
    assert_eq!(prompts.len(), 1);
    assert!(prompts[0].contains("Jane Smith, data engineer. Python, Airflow, SQL."));
    assert!(prompts[0].contains("Data engineer role. Requires Python, Spark, SQL."));
}

#[tokio::test]
async fn test_unparseable_completion_surfaces_parser_error() {
    let engine = AnalysisEngine::new(MockClient::new("no structured data here"), 0.2, 0.7);
    let result = engine.analyze(&request()).await;
    assert!(matches!(result, Err(JobFitError::NoJsonFound)));
}

#[tokio::test]
async fn test_cover_letter_generation_uses_raw_text() {
    let engine = AnalysisEngine::new(
        MockClient::new("  Dear team,\n\nI am confident I am a great fit.\n  "),
        0.2,
        0.7,
    );
    let analysis = AnalysisResult {
        match_percentage: 66,
        matching_skills: vec!["Python".to_string()],
        missing_skills: vec!["Spark".to_string()],
        ..Default::default()
    };

    let letter = engine
        .generate_cover_letter(&request(), &analysis)
        .await
        .unwrap();
    assert!(letter.starts_with("Dear team,"));
    assert!(letter.ends_with("fit."));
}

#[tokio::test]
async fn test_report_save_and_reload() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("report.json");

    let report = AnalysisReport::new(
        AnalysisResult {
            match_percentage: 91,
            matching_skills: vec!["Rust".to_string()],
            missing_skills: vec![],
            ..Default::default()
        },
        "gemini-2.0-flash".to_string(),
        Tone::Professional,
        "resume.pdf".to_string(),
    );

    let json = serde_json::to_string_pretty(&report).unwrap();
    std::fs::write(&path, json).unwrap();

    let reloaded = AnalysisReport::load(&path).unwrap();
    assert_eq!(reloaded.result, report.result);
    assert_eq!(reloaded.metadata.model, "gemini-2.0-flash");
}

#[test]
fn test_enhanced_resume_pdf_export() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("enhanced.pdf");

    let resume = "JANE SMITH\n\nSKILLS\nPython, SQL\n\nEXPERIENCE\nBuilt nightly ETL pipelines feeding the analytics warehouse";
    let suggestions = vec!["Add 'ETL' to the skills section".to_string()];

    export_enhanced_resume(resume, &suggestions, &path).unwrap();

    let bytes = std::fs::read(&path).unwrap();
    assert!(bytes.starts_with(b"%PDF"));
}

// --- HTTP-level tests for the Gemini client ---

fn gemini_body(text: &str) -> String {
    json!({
        "candidates": [
            {"content": {"parts": [{"text": text}]}}
        ]
    })
    .to_string()
}

fn mock_client(server: &mockito::ServerGuard) -> GeminiClient {
    GeminiClient::new("test-key".to_string(), "gemini-2.0-flash", 5)
        .unwrap()
        .with_base_url(server.url())
}

#[tokio::test]
async fn test_gemini_client_returns_completion_text() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/gemini-2.0-flash:generateContent")
        .match_header("x-goog-api-key", "test-key")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(gemini_body("hello from the model"))
        .create_async()
        .await;

    let client = mock_client(&server);
    let text = client.complete("ping", 0.2).await.unwrap();
    assert_eq!(text, "hello from the model");
}

#[tokio::test]
async fn test_gemini_client_maps_authentication_errors() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/gemini-2.0-flash:generateContent")
        .with_status(403)
        .with_body(r#"{"error": {"code": 403, "message": "permission denied", "status": "PERMISSION_DENIED"}}"#)
        .create_async()
        .await;

    let client = mock_client(&server);
    let result = client.complete("ping", 0.2).await;
    assert!(matches!(result, Err(JobFitError::Authentication(_))));
}

#[tokio::test]
async fn test_gemini_client_maps_rate_limiting() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/gemini-2.0-flash:generateContent")
        .with_status(429)
        .with_body(r#"{"error": {"code": 429, "message": "quota exceeded", "status": "RESOURCE_EXHAUSTED"}}"#)
        .create_async()
        .await;

    let client = mock_client(&server);
    let result = client.complete("ping", 0.2).await;
    assert!(matches!(result, Err(JobFitError::RateLimit(_))));
}

#[tokio::test]
async fn test_gemini_client_maps_server_errors_to_provider() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/gemini-2.0-flash:generateContent")
        .with_status(500)
        .with_body("internal error")
        .create_async()
        .await;

    let client = mock_client(&server);
    let result = client.complete("ping", 0.2).await;
    assert!(matches!(result, Err(JobFitError::Provider(_))));
}

#[tokio::test]
async fn test_gemini_client_rejects_empty_candidates() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/gemini-2.0-flash:generateContent")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"candidates": []}"#)
        .create_async()
        .await;

    let client = mock_client(&server);
    let result = client.complete("ping", 0.2).await;
    assert!(matches!(result, Err(JobFitError::Provider(_))));
}

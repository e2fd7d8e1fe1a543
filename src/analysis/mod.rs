//! Resume/job-description analysis pipeline
//!
//! One user submission flows linearly through the stages: prompt rendering,
//! the provider call, and JSON response parsing.

pub mod client;
pub mod engine;
pub mod parser;
pub mod prompts;
pub mod request;
pub mod result;

pub use engine::AnalysisEngine;
pub use request::{AnalysisRequest, Tone};
pub use result::AnalysisResult;

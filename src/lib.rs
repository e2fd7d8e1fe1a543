//! JobFit library

pub mod analysis;
pub mod cli;
pub mod config;
pub mod credentials;
pub mod error;
pub mod input;
pub mod output;

pub use config::Config;
pub use error::{JobFitError, Result};

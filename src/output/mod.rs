//! Output module
//! Report assembly, formatting, and file export

pub mod formatter;
pub mod pdf;
pub mod report;

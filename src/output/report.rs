//! Report envelope: the analysis plus generation metadata

use crate::processing::analyzer::AnalysisReport;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// What gets rendered and saved. The analysis stays clock-free; the envelope
/// records when and from what it was produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportEnvelope {
    pub metadata: ReportMetadata,
    pub analysis: AnalysisReport,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportMetadata {
    pub generated_at: DateTime<Utc>,
    pub analyzer_version: String,
    pub resume_source: String,
    pub job_source: String,
    pub processing_time_ms: u64,
}

impl ReportEnvelope {
    pub fn new(
        analysis: AnalysisReport,
        resume_source: impl Into<String>,
        job_source: impl Into<String>,
        processing_time_ms: u64,
    ) -> Self {
        Self {
            metadata: ReportMetadata {
                generated_at: Utc::now(),
                analyzer_version: env!("CARGO_PKG_VERSION").to_string(),
                resume_source: resume_source.into(),
                job_source: job_source.into(),
                processing_time_ms,
            },
            analysis,
        }
    }

    pub fn generated_at_display(&self) -> String {
        self.metadata
            .generated_at
            .format("%Y-%m-%d %H:%M:%S UTC")
            .to_string()
    }
}

//! Resume analyzer library
//!
//! Scores a resume against a job description: skill extraction over a fixed
//! taxonomy, heuristic ATS scoring and TF-IDF cosine matching.

pub mod cli;
pub mod config;
pub mod error;
pub mod input;
pub mod output;
pub mod processing;

pub use config::Config;
pub use error::{Result, ResumeAnalyzerError};
pub use processing::analyzer::{AnalysisEngine, AnalysisReport, MissingSkills, ResumeStrength};
pub use processing::ats_scorer::AtsReport;
pub use processing::normalizer::{normalize, NormalizedText};
pub use processing::skill_extractor::{SkillExtractor, SkillInventory};
pub use processing::taxonomy::{SkillCategory, SkillTaxonomy};

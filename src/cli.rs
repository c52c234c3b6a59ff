//! CLI interface for the resume analyzer

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

pub const RESUME_EXTENSIONS: [&str; 4] = ["pdf", "docx", "txt", "md"];
pub const JOB_EXTENSIONS: [&str; 5] = ["pdf", "docx", "txt", "md", "markdown"];

#[derive(Parser)]
#[command(name = "resume-analyzer")]
#[command(version)]
#[command(about = "Score a resume against a job description")]
#[command(
    long_about = "Extract skills, estimate ATS compatibility and compute a TF-IDF match score between a resume and a job description"
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
        /// Path to resume file (PDF, DOCX, TXT, MD)
        #[arg(short, long)]
        resume: PathBuf,

        /// Path to job description file
        #[arg(short, long, conflicts_with = "job_text", required_unless_present = "job_text")]
        job: Option<PathBuf>,

        /// Job description given inline
        #[arg(long)]
        job_text: Option<String>,

        /// Output format: console, json, markdown, html
        #[arg(short, long)]
        output: Option<String>,

        /// Include the ATS breakdown in console output
        #[arg(short, long)]
        detailed: bool,

        /// Save output to file
        #[arg(short, long)]
        save: Option<PathBuf>,

        /// Disable colored console output
        #[arg(long)]
        no_color: bool,
    },

    /// List the skills found in a resume
    Skills {
        /// Path to resume file (PDF, DOCX, TXT, MD)
        #[arg(short, long)]
        resume: PathBuf,

        /// Print JSON instead of console text
        #[arg(long)]
        json: bool,
    },

    /// Compute the ATS compatibility score of a resume
    Ats {
        /// Path to resume file (PDF, DOCX, TXT, MD)
        #[arg(short, long)]
        resume: PathBuf,

        /// Print JSON instead of console text
        #[arg(long)]
        json: bool,
    },

    /// Show configuration
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

    /// Print the configuration file location
    Path,
}

/// Parse and validate output format
pub fn parse_output_format(format: &str) -> Result<crate::config::OutputFormat, String> {
    match format.to_lowercase().as_str() {
        "console" => Ok(crate::config::OutputFormat::Console),
        "json" => Ok(crate::config::OutputFormat::Json),
        "markdown" | "md" => Ok(crate::config::OutputFormat::Markdown),
        "html" => Ok(crate::config::OutputFormat::Html),
        _ => Err(format!(
            "Invalid output format: {}. Supported: console, json, markdown, html",
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OutputFormat;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_analyze_requires_a_job_source() {
        assert!(Cli::try_parse_from(["resume-analyzer", "analyze", "-r", "cv.pdf"]).is_err());
        assert!(Cli::try_parse_from([
            "resume-analyzer", "analyze", "-r", "cv.pdf", "-j", "job.txt", "--job-text", "rust"
        ])
        .is_err());

        let cli = Cli::try_parse_from([
            "resume-analyzer", "analyze", "-r", "cv.pdf", "--job-text", "Rust developer",
        ])
        .unwrap();
        match cli.command {
            Commands::Analyze { job, job_text, .. } => {
                assert!(job.is_none());
                assert_eq!(job_text.as_deref(), Some("Rust developer"));
            }
            _ => panic!("expected analyze"),
        }
    }

    #[test]
    fn test_parse_output_format() {
        assert_eq!(parse_output_format("JSON").unwrap(), OutputFormat::Json);
        assert_eq!(parse_output_format("md").unwrap(), OutputFormat::Markdown);
        assert!(parse_output_format("pdf").is_err());
    }

    #[test]
    fn test_validate_file_extension() {
        assert!(validate_file_extension(Path::new("cv.DOCX"), &RESUME_EXTENSIONS).is_ok());
        assert!(validate_file_extension(Path::new("cv.doc"), &RESUME_EXTENSIONS).is_err());
        assert!(validate_file_extension(Path::new("cv"), &RESUME_EXTENSIONS).is_err());
    }
}

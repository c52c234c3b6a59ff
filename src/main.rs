//! Resume analyzer: score a resume against a job description

use anyhow::{bail, Context};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use log::{error, info};
use resume_analyzer::cli::{self, Cli, Commands, ConfigAction, JOB_EXTENSIONS, RESUME_EXTENSIONS};
use resume_analyzer::config::Config;
use resume_analyzer::input::InputManager;
use resume_analyzer::output::formatter::{save_report_to_file, suggest_filename, ReportGenerator};
use resume_analyzer::output::report::ReportEnvelope;
use resume_analyzer::processing::analyzer::AnalysisEngine;
use resume_analyzer::processing::normalizer::normalize;
use std::path::Path;
use std::process;
use std::time::{Duration, Instant};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    if let Err(e) = run(cli).await {
        error!("Command failed: {:#}", e);
        process::exit(1);
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config_path = cli.config.clone().unwrap_or_else(Config::config_path);
    let config = Config::load_from(&config_path)
        .with_context(|| format!("Failed to load configuration from {}", config_path.display()))?;

    match cli.command {
        Commands::Analyze {
            resume,
            job,
            job_text,
            output,
            detailed,
            save,
            no_color,
        } => {
            let format = match output {
                Some(format) => cli::parse_output_format(&format).map_err(anyhow::Error::msg)?,
                None => config.output.format,
            };

            let mut input_manager = InputManager::new();
            let resume_text = read_resume(&mut input_manager, &resume).await?;

            let (job_description, job_source) = match (job, job_text) {
                (Some(path), _) => {
                    cli::validate_file_extension(&path, &JOB_EXTENSIONS)
                        .map_err(|e| anyhow::anyhow!("Job description file: {}", e))?;
                    let text = with_spinner(
                        "Reading job description...",
                        input_manager.extract_text(&path),
                    )
                    .await
                    .with_context(|| format!("Failed to read {}", path.display()))?;
                    (text, path.display().to_string())
                }
                (None, Some(text)) => (text, "inline".to_string()),
                (None, None) => bail!("A job description is required (--job or --job-text)"),
            };

            if job_description.trim().is_empty() {
                bail!("Job description is empty");
            }

            let engine = AnalysisEngine::from_config(&config)?;

            info!("Analyzing {} against {}", resume.display(), job_source);
            let started = Instant::now();
            let analysis = engine.analyze(&resume_text, &job_description);
            let elapsed_ms = started.elapsed().as_millis() as u64;

            let envelope =
                ReportEnvelope::new(analysis, resume.display().to_string(), job_source, elapsed_ms);

            let use_colors = config.output.color_output && !no_color && save.is_none();
            let generator = ReportGenerator::with_options(
                use_colors,
                detailed || config.output.detailed,
                true,
                true,
                true,
            );
            let rendered = generator.generate_report(&envelope, format)?;

            let save_path = save.map(|path| {
                if path.is_dir() {
                    path.join(suggest_filename(format, &resume.to_string_lossy(), true))
                } else {
                    path
                }
            });
            emit(&rendered, save_path.as_deref())?;
        }

        Commands::Skills { resume, json } => {
            let mut input_manager = InputManager::new();
            let text = read_resume(&mut input_manager, &resume).await?;
            let engine = AnalysisEngine::from_config(&config)?;
            let inventory = engine.extract_skills(&text);

            if json {
                let payload = serde_json::json!({
                    "skills": inventory,
                    "summary": inventory.summary(),
                });
                println!("{}", serde_json::to_string_pretty(&payload)?);
            } else {
                let generator = ReportGenerator::with_options(
                    config.output.color_output,
                    config.output.detailed,
                    true,
                    true,
                    true,
                );
                print!("{}", generator.console().format_inventory(&inventory));
            }
        }

        Commands::Ats { resume, json } => {
            let mut input_manager = InputManager::new();
            let text = read_resume(&mut input_manager, &resume).await?;
            let engine = AnalysisEngine::from_config(&config)?;
            let report = engine.ats_report(&text);
            let normalized_length = normalize(&text).char_count();

            if json {
                let payload = serde_json::json!({
                    "ats_score": report.score,
                    "breakdown": report,
                    "normalized_length": normalized_length,
                });
                println!("{}", serde_json::to_string_pretty(&payload)?);
            } else {
                let generator = ReportGenerator::with_options(
                    config.output.color_output,
                    true,
                    true,
                    true,
                    true,
                );
                print!("{}", generator.console().format_ats(&report));
                println!("Normalized length: {} characters", normalized_length);
            }
        }

        Commands::Config { action } => match action.unwrap_or(ConfigAction::Show) {
            ConfigAction::Show => {
                println!("# {}", config_path.display());
                print!("{}", config.to_toml()?);
            }
            ConfigAction::Reset => {
                Config::default().save_to(&config_path)?;
                println!("Configuration reset to defaults: {}", config_path.display());
            }
            ConfigAction::Path => println!("{}", config_path.display()),
        },
    }

    Ok(())
}

async fn read_resume(input_manager: &mut InputManager, path: &Path) -> anyhow::Result<String> {
    cli::validate_file_extension(path, &RESUME_EXTENSIONS)
        .map_err(|e| anyhow::anyhow!("Resume file: {}", e))?;

    let text = with_spinner("Extracting resume text...", input_manager.extract_text(path))
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;

    if text.trim().is_empty() {
        bail!("No text could be extracted from {}", path.display());
    }
    Ok(text)
}

async fn with_spinner<T>(message: &'static str, task: impl std::future::Future<Output = T>) -> T {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message(message);
    spinner.enable_steady_tick(Duration::from_millis(100));

    let result = task.await;
    spinner.finish_and_clear();
    result
}

fn emit(rendered: &str, save: Option<&Path>) -> anyhow::Result<()> {
    match save {
        Some(path) => {
            save_report_to_file(rendered, path)?;
            info!("Report saved to {}", path.display());
            println!("Report saved to {}", path.display());
        }
        None => println!("{}", rendered),
    }
    Ok(())
}

//! Integration tests for the resume analyzer

use resume_analyzer::config::{Config, OutputFormat};
use resume_analyzer::input::InputManager;
use resume_analyzer::output::formatter::ReportGenerator;
use resume_analyzer::output::report::ReportEnvelope;
use resume_analyzer::{AnalysisEngine, ResumeAnalyzerError, ResumeStrength};
use std::io::Write;
use std::path::Path;

const RESUME_TXT: &str = "tests/fixtures/sample_resume.txt";
const RESUME_MD: &str = "tests/fixtures/sample_resume.md";
const JOB_TXT: &str = "tests/fixtures/sample_job.txt";

async fn read_fixture(path: &str) -> String {
    let mut manager = InputManager::new();
    manager.extract_text(Path::new(path)).await.unwrap()
}

#[tokio::test]
async fn test_text_extraction_from_txt() {
    let text = read_fixture(RESUME_TXT).await;

    assert!(text.contains("John Doe"));
    assert!(text.contains("Software Engineer"));
    assert!(text.contains("React"));
    assert!(text.contains("Node.js"));
}

#[tokio::test]
async fn test_text_extraction_from_markdown() {
    let text = read_fixture(RESUME_MD).await;

    assert!(text.contains("John Doe"));
    assert!(text.contains("Software Engineer"));
    assert!(text.contains("React"));
    assert!(text.contains("Node.js"));
    // Should not contain markdown formatting
    assert!(!text.contains("**"));
    assert!(!text.contains("##"));
}

#[tokio::test]
async fn test_text_extraction_from_docx() {
    let mut docx = tempfile::Builder::new().suffix(".docx").tempfile().unwrap();
    {
        let mut writer = zip::ZipWriter::new(docx.as_file_mut());
        writer
            .start_file("word/document.xml", zip::write::SimpleFileOptions::default())
            .unwrap();
        writer
            .write_all(
                br#"<w:document><w:body><w:p><w:r><w:t>Jane Doe</w:t></w:r></w:p><w:p><w:r><w:t>Rust &amp; Kubernetes</w:t></w:r></w:p></w:body></w:document>"#,
            )
            .unwrap();
        writer.finish().unwrap();
    }

    let mut manager = InputManager::new();
    let text = manager.extract_text(docx.path()).await.unwrap();
    assert_eq!(text, "Jane Doe\nRust & Kubernetes");

    let skills = AnalysisEngine::with_defaults().unwrap().extract_skills(&text);
    assert!(skills.contains("rust"));
    assert!(skills.contains("kubernetes"));
}

#[tokio::test]
async fn test_caching_functionality() {
    let mut manager = InputManager::new();
    let path = Path::new(RESUME_TXT);

    let text1 = manager.extract_text(path).await.unwrap();
    assert_eq!(manager.cache_size(), 1);

    let text2 = manager.extract_text(path).await.unwrap();
    assert_eq!(text1, text2);
    assert_eq!(manager.cache_size(), 1);

    manager.clear_cache();
    assert_eq!(manager.cache_size(), 0);
}

#[tokio::test]
async fn test_cache_can_be_disabled() {
    let mut manager = InputManager::new().with_cache(false);
    let path = Path::new(RESUME_TXT);

    let text1 = manager.extract_text(path).await.unwrap();
    let text2 = manager.extract_text(path).await.unwrap();
    assert_eq!(text1, text2);
    assert_eq!(manager.cache_size(), 0);
}

#[tokio::test]
async fn test_unsupported_file_type() {
    let mut manager = InputManager::new();
    let result = manager
        .extract_text(Path::new("tests/fixtures/unsupported.xyz"))
        .await;

    assert!(matches!(result, Err(ResumeAnalyzerError::UnsupportedFormat(_))));
}

#[tokio::test]
async fn test_nonexistent_file() {
    let mut manager = InputManager::new();
    let result = manager
        .extract_text(Path::new("tests/fixtures/nonexistent.txt"))
        .await;

    assert!(matches!(result, Err(ResumeAnalyzerError::InvalidInput(_))));
}

#[tokio::test]
async fn test_full_analysis_of_fixtures() {
    let resume = read_fixture(RESUME_TXT).await;
    let job = read_fixture(JOB_TXT).await;
    let engine = AnalysisEngine::with_defaults().unwrap();

    let report = engine.analyze(&resume, &job);

    assert!(report.job_match_score > 0.0 && report.job_match_score < 100.0);
    assert!(report.ats_score >= 80);
    assert!(report.ats_breakdown.has_email);
    assert!(report.ats_breakdown.has_phone);
    assert!(report.ats_breakdown.missing_sections.is_empty());
    assert_eq!(report.resume_strength, ResumeStrength::Strong);

    let web = report.skills_found.get("Web Frameworks").unwrap();
    assert!(web.contains(&"react".to_string()));
    assert!(web.contains(&"node.js".to_string()));

    for skill in ["mongodb", "terraform", "graphql"] {
        assert!(report.missing_skills.list.contains(&skill.to_string()));
    }
    for skill in ["python", "react", "aws"] {
        assert!(!report.missing_skills.list.contains(&skill.to_string()));
    }
    assert_eq!(report.missing_skills.count, report.missing_skills.list.len());
    assert!(!report.recommendation.is_empty());
}

#[tokio::test]
async fn test_markdown_and_text_resumes_agree_on_skills() {
    let txt = read_fixture(RESUME_TXT).await;
    let md = read_fixture(RESUME_MD).await;
    let engine = AnalysisEngine::with_defaults().unwrap();

    let from_md = engine.extract_skills(&md);
    let from_txt = engine.extract_skills(&txt);

    for skill in from_md.flatten() {
        assert!(from_txt.contains(&skill), "{} missing from text resume", skill);
    }
}

#[test]
fn test_match_score_properties() {
    let engine = AnalysisEngine::with_defaults().unwrap();
    let a = "Rust engineer building distributed storage systems with Kubernetes";
    let b = "We need a storage engineer who knows Kubernetes and Go";

    assert_eq!(engine.match_score(a, b), engine.match_score(b, a));
    assert_eq!(engine.match_score(a, a), 100.0);
    assert_eq!(engine.match_score(a, ""), 0.0);
    assert_eq!(engine.match_score("", ""), 0.0);
}

#[test]
fn test_short_resume_scores_below_well_formed_resume() {
    let engine = AnalysisEngine::with_defaults().unwrap();
    let short = "Experienced developer. Python and SQL.";
    let body = "Built reliable services and mentored engineers across teams. ".repeat(70);
    let full = format!(
        "Summary\nEngineer.\nExperience\n{}\nEducation\nBSc\nSkills\nPython\nProjects\nTooling\njane@example.com\n555-123-4567",
        body
    );

    let short_report = engine.ats_report(short);
    let full_report = engine.ats_report(&full);

    assert!(short_report.score < full_report.score);
    assert_eq!(full_report.score, 100);
}

#[test]
fn test_empty_inputs_give_minimum_report() {
    let engine = AnalysisEngine::with_defaults().unwrap();
    let report = engine.analyze("", "");

    assert_eq!(report.job_match_score, 0.0);
    assert_eq!(report.ats_score, 0);
    assert_eq!(report.resume_strength, ResumeStrength::NeedsImprovement);
    assert!(report.skills_found.is_empty());
    assert_eq!(report.missing_skills.count, 0);
    assert!(!report.recommendation.is_empty());
}

#[test]
fn test_custom_taxonomy_from_config() {
    let dir = tempfile::tempdir().unwrap();
    let taxonomy_path = dir.path().join("taxonomy.toml");
    std::fs::write(
        &taxonomy_path,
        "[[categories]]\nname = \"Embedded\"\nkeywords = [\"rtos\", \"Zephyr\", \"can bus\"]\n",
    )
    .unwrap();

    let mut config = Config::default();
    config.analysis.taxonomy_path = Some(taxonomy_path);
    config.analysis.missing_skills_limit = 1;

    let engine = AnalysisEngine::from_config(&config).unwrap();
    let report = engine.analyze("Firmware on Zephyr", "Zephyr RTOS firmware over CAN bus");

    assert_eq!(report.skills_found.flatten(), vec!["zephyr".to_string()]);
    assert_eq!(report.missing_skills.count, 2);
    assert_eq!(report.missing_skills.list, vec!["rtos".to_string()]);
}

#[test]
fn test_json_report_parses_back_into_envelope() {
    let engine = AnalysisEngine::with_defaults().unwrap();
    let analysis = engine.analyze(
        "Python developer, Django and PostgreSQL. jane@example.com",
        "Python Django developer with PostgreSQL and Redis",
    );
    let envelope = ReportEnvelope::new(analysis.clone(), "resume.txt", "inline", 3);

    let json = ReportGenerator::new()
        .generate_report(&envelope, OutputFormat::Json)
        .unwrap();
    let parsed: ReportEnvelope = serde_json::from_str(&json).unwrap();

    assert_eq!(parsed.analysis.ats_score, analysis.ats_score);
    assert_eq!(parsed.analysis.resume_strength, analysis.resume_strength);
    assert_eq!(parsed.analysis.skills_found, analysis.skills_found);
    assert_eq!(parsed.analysis.missing_skills, analysis.missing_skills);
    assert_eq!(parsed.metadata.job_source, "inline");
}

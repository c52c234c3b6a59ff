//! Output formatters for analysis reports

use crate::config::OutputFormat;
use crate::error::{Result, ResumeAnalyzerError};
use crate::output::report::ReportEnvelope;
use crate::processing::analyzer::ResumeStrength;
use crate::processing::ats_scorer::AtsReport;
use crate::processing::skill_extractor::SkillInventory;
use askama::Template;
use colored::{Color, Colorize};
use std::path::Path;

/// Trait for formatting analysis reports
pub trait OutputFormatter {
    fn format_report(&self, report: &ReportEnvelope) -> Result<String>;
    fn supports_format(&self) -> OutputFormat;
}

/// Console formatter with optional colors
pub struct ConsoleFormatter {
    use_colors: bool,
    detailed: bool,
}

pub struct JsonFormatter {
    pretty: bool,
}

pub struct MarkdownFormatter {
    include_metadata: bool,
}

pub struct HtmlFormatter {
    include_styles: bool,
}

/// Dispatches to the formatter for the requested format
pub struct ReportGenerator {
    console_formatter: ConsoleFormatter,
    json_formatter: JsonFormatter,
    markdown_formatter: MarkdownFormatter,
    html_formatter: HtmlFormatter,
}

#[derive(Template)]
#[template(
    source = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Resume Analysis Report</title>
    {% if include_styles %}
    <style>
        body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif; line-height: 1.6; color: #333; max-width: 900px; margin: 0 auto; padding: 20px; background: #f8f9fa; }
        .container { background: white; padding: 30px; border-radius: 8px; box-shadow: 0 2px 10px rgba(0,0,0,0.1); }
        .header { text-align: center; margin-bottom: 30px; border-bottom: 3px solid #007acc; padding-bottom: 20px; }
        .badge { display: inline-block; padding: 6px 14px; border-radius: 20px; font-weight: bold; color: white; }
        .strength-strong { background: #28a745; }
        .strength-good { background: #17a2b8; }
        .strength-fair { background: #ffc107; color: #000; }
        .strength-weak { background: #dc3545; }
        table { border-collapse: collapse; width: 100%; }
        td, th { border-bottom: 1px solid #eee; padding: 6px; text-align: left; }
        .metadata { font-size: 0.85em; color: #777; margin-top: 30px; }
    </style>
    {% endif %}
</head>
<body>
    <div class="container">
        <div class="header">
            <h1>Resume Analysis Report</h1>
            <p>Generated: {{ generated_at }} | Processing time: {{ processing_time }}ms</p>
        </div>

        <h2>Scores</h2>
        <p><strong>Job match:</strong> {{ job_match_score }}%</p>
        <p><strong>ATS score:</strong> {{ ats_score }}/100</p>
        <p><strong>Resume strength:</strong> <span class="badge {{ strength_class }}">{{ strength_label }}</span></p>
        <blockquote>{{ recommendation }}</blockquote>

        <h2>Skills Found ({{ total_skills }})</h2>
        <table>
            <tr><th>Category</th><th>Skills</th></tr>
            {% for row in skill_rows %}
            <tr><td>{{ row.category }}</td><td>{{ row.skills }}</td></tr>
            {% endfor %}
        </table>

        <h2>Missing Skills ({{ missing_count }})</h2>
        {% if has_missing %}
        <ul>
            {% for skill in missing_skills %}
            <li>{{ skill }}</li>
            {% endfor %}
        </ul>
        {% else %}
        <p>None. The resume covers every skill the job description names.</p>
        {% endif %}

        <h2>ATS Breakdown</h2>
        <table>
            <tr><td>Word count</td><td>{{ word_count }} ({{ length_points }} pts)</td></tr>
            <tr><td>Sections found</td><td>{{ sections_found }} ({{ section_points }} pts)</td></tr>
            <tr><td>Contact details</td><td>{{ contact_summary }} ({{ contact_points }} pts)</td></tr>
        </table>

        <div class="metadata">
            <p>Generated by Resume Analyzer v{{ version }}</p>
            <p>Resume: {{ resume_source }} | Job: {{ job_source }}</p>
        </div>
    </div>
</body>
</html>"#,
    ext = "html"
)]
struct HtmlTemplate {
    include_styles: bool,
    generated_at: String,
    processing_time: u64,
    job_match_score: String,
    ats_score: u8,
    strength_class: &'static str,
    strength_label: String,
    recommendation: String,
    total_skills: usize,
    skill_rows: Vec<HtmlSkillRow>,
    missing_count: usize,
    has_missing: bool,
    missing_skills: Vec<String>,
    word_count: usize,
    length_points: String,
    sections_found: String,
    section_points: String,
    contact_summary: String,
    contact_points: String,
    version: String,
    resume_source: String,
    job_source: String,
}

struct HtmlSkillRow {
    category: String,
    skills: String,
}

fn sections_list(ats: &AtsReport) -> String {
    if ats.sections_found.is_empty() {
        "none".to_string()
    } else {
        ats.sections_found
            .iter()
            .map(|s| s.to_string())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

fn contact_summary(ats: &AtsReport) -> String {
    match (ats.has_email, ats.has_phone) {
        (true, true) => "email and phone".to_string(),
        (true, false) => "email only".to_string(),
        (false, true) => "phone only".to_string(),
        (false, false) => "none".to_string(),
    }
}

fn file_label(source: &str) -> String {
    Path::new(source)
        .file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|| source.to_string())
}

impl ConsoleFormatter {
    pub fn new(use_colors: bool, detailed: bool) -> Self {
        Self { use_colors, detailed }
    }

    fn colorize(&self, text: &str, color: Color) -> String {
        if self.use_colors {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }

    fn format_header(&self, title: &str, level: u8) -> String {
        let prefix = match level {
            1 => "█",
            2 => "▓",
            _ => "▒",
        };

        let color = match level {
            1 => Color::Blue,
            2 => Color::Green,
            _ => Color::Yellow,
        };

        if self.use_colors {
            format!("\n{} {}\n", prefix.color(color).bold(), title.color(color).bold())
        } else {
            format!("\n{} {}\n", prefix, title)
        }
    }

    fn format_strength(&self, strength: ResumeStrength) -> String {
        let color = match strength {
            ResumeStrength::Strong => Color::Green,
            ResumeStrength::Good => Color::BrightGreen,
            ResumeStrength::Fair => Color::Yellow,
            ResumeStrength::NeedsImprovement => Color::Red,
        };
        let label = format!("[{}]", strength.to_string().to_uppercase());

        if self.use_colors {
            label.color(color).bold().to_string()
        } else {
            label
        }
    }

    fn score_color(score: f64) -> Color {
        match score {
            s if s >= 80.0 => Color::Green,
            s if s >= 60.0 => Color::Yellow,
            s if s >= 40.0 => Color::BrightYellow,
            _ => Color::Red,
        }
    }

    /// Categorized skill listing, shared by the report and the `skills` command.
    pub fn format_inventory(&self, inventory: &SkillInventory) -> String {
        let mut output = String::new();
        output.push_str(&format!("Total skills found: {}\n", inventory.total_skills_found));

        for category in &inventory.categories {
            if category.skills.is_empty() {
                if self.detailed {
                    output.push_str(&format!("  • {}: -\n", category.category));
                }
                continue;
            }
            output.push_str(&format!(
                "  • {} ({}): {}\n",
                self.colorize(&category.category, Color::Cyan),
                category.skills.len(),
                category.skills.join(", ")
            ));
        }

        output
    }

    /// ATS breakdown, shared by the detailed report and the `ats` command.
    pub fn format_ats(&self, ats: &AtsReport) -> String {
        let mut output = String::new();
        let score = format!("{}/100", ats.score);
        output.push_str(&format!(
            "ATS Score: {}\n",
            self.colorize(&score, Self::score_color(ats.score as f64))
        ));
        output.push_str(&format!(
            "  • Length: {} words ({:.1} pts)\n",
            ats.word_count, ats.length_points
        ));
        output.push_str(&format!(
            "  • Sections: {} ({:.1} pts)\n",
            sections_list(ats),
            ats.section_points
        ));
        if !ats.missing_sections.is_empty() {
            let missing: Vec<String> = ats.missing_sections.iter().map(|s| s.to_string()).collect();
            output.push_str(&format!("    Missing: {}\n", missing.join(", ")));
        }
        output.push_str(&format!(
            "  • Contact: {} ({:.1} pts)\n",
            contact_summary(ats),
            ats.contact_points
        ));
        output
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_report(&self, report: &ReportEnvelope) -> Result<String> {
        let analysis = &report.analysis;
        let mut output = String::new();

        output.push_str(&self.format_header("📊 RESUME ANALYSIS", 1));
        output.push_str(&format!(
            "Generated: {} | Processing time: {}ms\n",
            report.generated_at_display(),
            report.metadata.processing_time_ms
        ));

        output.push_str(&self.format_header("Scores", 2));
        let match_text = format!("{:.1}%", analysis.job_match_score);
        output.push_str(&format!(
            "🎯 Job Match: {}\n",
            self.colorize(&match_text, Self::score_color(analysis.job_match_score))
        ));
        let ats_text = format!("{}/100", analysis.ats_score);
        output.push_str(&format!(
            "🔍 ATS Score: {}\n",
            self.colorize(&ats_text, Self::score_color(analysis.ats_score as f64))
        ));
        output.push_str(&format!(
            "💪 Resume Strength: {}\n",
            self.format_strength(analysis.resume_strength)
        ));

        output.push_str(&self.format_header("Skills Found", 2));
        output.push_str(&self.format_inventory(&analysis.skills_found));

        output.push_str(&self.format_header("Missing Skills", 2));
        if analysis.missing_skills.count == 0 {
            output.push_str(&format!("{}\n", self.colorize("None", Color::Green)));
        } else {
            output.push_str(&format!(
                "{} missing: {}\n",
                analysis.missing_skills.count,
                self.colorize(&analysis.missing_skills.list.join(", "), Color::Red)
            ));
            let hidden = analysis.missing_skills.count - analysis.missing_skills.list.len();
            if hidden > 0 {
                output.push_str(&format!("  ... and {} more\n", hidden));
            }
        }

        if self.detailed {
            output.push_str(&self.format_header("ATS Breakdown", 3));
            output.push_str(&self.format_ats(&analysis.ats_breakdown));
        }

        output.push_str(&self.format_header("Recommendation", 2));
        output.push_str(&format!(
            "{}\n",
            self.colorize(&analysis.recommendation, Color::Cyan)
        ));

        output.push_str(&format!(
            "\nResume: {} | Job: {}\n",
            file_label(&report.metadata.resume_source),
            file_label(&report.metadata.job_source)
        ));

        Ok(output)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Console
    }
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_report(&self, report: &ReportEnvelope) -> Result<String> {
        if self.pretty {
            Ok(serde_json::to_string_pretty(report)?)
        } else {
            Ok(serde_json::to_string(report)?)
        }
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Json
    }
}

impl MarkdownFormatter {
    pub fn new(include_metadata: bool) -> Self {
        Self { include_metadata }
    }

    fn markdown_strength_badge(strength: ResumeStrength) -> &'static str {
        match strength {
            ResumeStrength::Strong => "🟢",
            ResumeStrength::Good => "🔵",
            ResumeStrength::Fair => "🟡",
            ResumeStrength::NeedsImprovement => "🔴",
        }
    }
}

impl OutputFormatter for MarkdownFormatter {
    fn format_report(&self, report: &ReportEnvelope) -> Result<String> {
        let analysis = &report.analysis;
        let mut output = String::new();

        output.push_str("# 📊 Resume Analysis Report\n\n");

        if self.include_metadata {
            output.push_str(&format!(
                "**Generated:** {} | **Processing Time:** {}ms\n",
                report.generated_at_display(),
                report.metadata.processing_time_ms
            ));
            output.push_str(&format!(
                "**Resume:** `{}` | **Job:** `{}`\n\n",
                file_label(&report.metadata.resume_source),
                file_label(&report.metadata.job_source)
            ));
        }

        output.push_str("## Scores\n\n");
        output.push_str("| Metric | Value |\n|---|---|\n");
        output.push_str(&format!("| Job match | {:.1}% |\n", analysis.job_match_score));
        output.push_str(&format!("| ATS score | {}/100 |\n", analysis.ats_score));
        output.push_str(&format!(
            "| Resume strength | {} {} |\n\n",
            Self::markdown_strength_badge(analysis.resume_strength),
            analysis.resume_strength
        ));
        output.push_str(&format!("> {}\n\n", analysis.recommendation));

        output.push_str(&format!(
            "## Skills Found ({})\n\n",
            analysis.skills_found.total_skills_found
        ));
        for category in analysis
            .skills_found
            .categories
            .iter()
            .filter(|c| !c.skills.is_empty())
        {
            output.push_str(&format!(
                "- **{}:** {}\n",
                category.category,
                category.skills.join(", ")
            ));
        }
        output.push('\n');

        output.push_str(&format!(
            "## Missing Skills ({})\n\n",
            analysis.missing_skills.count
        ));
        if analysis.missing_skills.list.is_empty() {
            output.push_str("None.\n");
        } else {
            for skill in &analysis.missing_skills.list {
                output.push_str(&format!("- {}\n", skill));
            }
        }
        output.push('\n');

        let ats = &analysis.ats_breakdown;
        output.push_str("## ATS Breakdown\n\n");
        output.push_str(&format!(
            "- Length: {} words ({:.1} pts)\n",
            ats.word_count, ats.length_points
        ));
        output.push_str(&format!(
            "- Sections: {} ({:.1} pts)\n",
            sections_list(ats),
            ats.section_points
        ));
        output.push_str(&format!(
            "- Contact: {} ({:.1} pts)\n",
            contact_summary(ats),
            ats.contact_points
        ));

        Ok(output)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Markdown
    }
}

impl HtmlFormatter {
    pub fn new(include_styles: bool) -> Self {
        Self { include_styles }
    }

    fn create_template_data(&self, report: &ReportEnvelope) -> HtmlTemplate {
        let analysis = &report.analysis;
        let ats = &analysis.ats_breakdown;

        let strength_class = match analysis.resume_strength {
            ResumeStrength::Strong => "strength-strong",
            ResumeStrength::Good => "strength-good",
            ResumeStrength::Fair => "strength-fair",
            ResumeStrength::NeedsImprovement => "strength-weak",
        };

        let skill_rows = analysis
            .skills_found
            .categories
            .iter()
            .filter(|c| !c.skills.is_empty())
            .map(|c| HtmlSkillRow {
                category: c.category.clone(),
                skills: c.skills.join(", "),
            })
            .collect();

        HtmlTemplate {
            include_styles: self.include_styles,
            generated_at: report.generated_at_display(),
            processing_time: report.metadata.processing_time_ms,
            job_match_score: format!("{:.1}", analysis.job_match_score),
            ats_score: analysis.ats_score,
            strength_class,
            strength_label: analysis.resume_strength.to_string(),
            recommendation: analysis.recommendation.clone(),
            total_skills: analysis.skills_found.total_skills_found,
            skill_rows,
            missing_count: analysis.missing_skills.count,
            has_missing: !analysis.missing_skills.list.is_empty(),
            missing_skills: analysis.missing_skills.list.clone(),
            word_count: ats.word_count,
            length_points: format!("{:.1}", ats.length_points),
            sections_found: sections_list(ats),
            section_points: format!("{:.1}", ats.section_points),
            contact_summary: contact_summary(ats),
            contact_points: format!("{:.1}", ats.contact_points),
            version: report.metadata.analyzer_version.clone(),
            resume_source: file_label(&report.metadata.resume_source),
            job_source: file_label(&report.metadata.job_source),
        }
    }
}

impl OutputFormatter for HtmlFormatter {
    fn format_report(&self, report: &ReportEnvelope) -> Result<String> {
        self.create_template_data(report)
            .render()
            .map_err(|e| ResumeAnalyzerError::OutputFormatting(e.to_string()))
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Html
    }
}

impl ReportGenerator {
    pub fn new() -> Self {
        Self::with_options(true, false, true, true, true)
    }

    pub fn with_options(
        use_colors: bool,
        detailed: bool,
        pretty_json: bool,
        include_metadata: bool,
        include_html_styles: bool,
    ) -> Self {
        Self {
            console_formatter: ConsoleFormatter::new(use_colors, detailed),
            json_formatter: JsonFormatter::new(pretty_json),
            markdown_formatter: MarkdownFormatter::new(include_metadata),
            html_formatter: HtmlFormatter::new(include_html_styles),
        }
    }

    pub fn generate_report(&self, report: &ReportEnvelope, format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Console => self.console_formatter.format_report(report),
            OutputFormat::Json => self.json_formatter.format_report(report),
            OutputFormat::Markdown => self.markdown_formatter.format_report(report),
            OutputFormat::Html => self.html_formatter.format_report(report),
        }
    }

    pub fn console(&self) -> &ConsoleFormatter {
        &self.console_formatter
    }
}

impl Default for ReportGenerator {
    fn default() -> Self {
        Self::new()
    }
}

pub fn save_report_to_file(content: &str, file_path: &Path) -> Result<()> {
    use std::fs;
    if let Some(parent) = file_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(file_path, content)?;
    Ok(())
}

pub fn suggest_filename(format: OutputFormat, resume_name: &str, timestamp: bool) -> String {
    let base_name = Path::new(resume_name)
        .file_stem()
        .unwrap_or_default()
        .to_string_lossy();

    let timestamp_suffix = if timestamp {
        format!("_{}", chrono::Utc::now().format("%Y%m%d_%H%M%S"))
    } else {
        String::new()
    };

    let extension = match format {
        OutputFormat::Console => "txt",
        OutputFormat::Json => "json",
        OutputFormat::Markdown => "md",
        OutputFormat::Html => "html",
    };

    format!("{}_analysis{}.{}", base_name, timestamp_suffix, extension)
}

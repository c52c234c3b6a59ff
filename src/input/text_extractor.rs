//! Text extraction from various file formats

use crate::error::{Result, ResumeAnalyzerError};
use once_cell::sync::Lazy;
use pulldown_cmark::{html, Parser};
use regex::Regex;
use std::io::{Cursor, Read};
use std::path::Path;
use tokio::fs;

static TAG_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>").expect("Invalid tag regex"));

static DOCX_BREAK_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"</w:p>|<w:br\s*/>|<w:cr\s*/>").expect("Invalid DOCX break regex")
});

static DOCX_TAB_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<w:tab\s*/>").expect("Invalid DOCX tab regex"));

pub trait TextExtractor {
    fn extract(&self, path: &Path) -> impl std::future::Future<Output = Result<String>> + Send;
}

pub struct PdfExtractor;

impl TextExtractor for PdfExtractor {
    async fn extract(&self, path: &Path) -> Result<String> {
        let bytes = fs::read(path).await?;

        let text = pdf_extract::extract_text_from_mem(&bytes).map_err(|e| {
            ResumeAnalyzerError::PdfExtraction(format!(
                "Failed to extract text from PDF '{}': {}",
                path.display(),
                e
            ))
        })?;
        Ok(text)
    }
}

pub struct DocxExtractor;

impl TextExtractor for DocxExtractor {
    async fn extract(&self, path: &Path) -> Result<String> {
        let bytes = fs::read(path).await?;
        extract_docx_bytes(&bytes).map_err(|e| match e {
            ResumeAnalyzerError::DocxExtraction(msg) => ResumeAnalyzerError::DocxExtraction(
                format!("'{}': {}", path.display(), msg),
            ),
            other => other,
        })
    }
}

/// Text of a DOCX container: the runs of `word/document.xml`, one line per paragraph.
pub fn extract_docx_bytes(bytes: &[u8]) -> Result<String> {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes))
        .map_err(|e| ResumeAnalyzerError::DocxExtraction(format!("not a DOCX archive: {}", e)))?;

    let mut xml = String::new();
    archive
        .by_name("word/document.xml")
        .map_err(|e| ResumeAnalyzerError::DocxExtraction(format!("missing document body: {}", e)))?
        .read_to_string(&mut xml)?;

    Ok(document_xml_to_text(&xml))
}

/// Flatten WordprocessingML markup into plain text.
pub fn document_xml_to_text(xml: &str) -> String {
    let with_breaks = DOCX_BREAK_REGEX.replace_all(xml, "\n");
    let with_tabs = DOCX_TAB_REGEX.replace_all(&with_breaks, "\t");
    let stripped = TAG_REGEX.replace_all(&with_tabs, "");

    decode_entities(&stripped)
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

fn decode_entities(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&#39;", "'")
        .replace("&nbsp;", " ")
        .replace("&amp;", "&")
}

pub struct PlainTextExtractor;

impl TextExtractor for PlainTextExtractor {
    async fn extract(&self, path: &Path) -> Result<String> {
        let content = fs::read_to_string(path).await?;
        Ok(content)
    }
}

pub struct MarkdownExtractor;

impl TextExtractor for MarkdownExtractor {
    async fn extract(&self, path: &Path) -> Result<String> {
        let markdown_content = fs::read_to_string(path).await?;
        Ok(markdown_to_text(&markdown_content))
    }
}

/// Render markdown and strip the markup, keeping one line per block.
pub fn markdown_to_text(markdown: &str) -> String {
    let parser = Parser::new(markdown);
    let mut html_output = String::new();
    html::push_html(&mut html_output, parser);

    let text = html_output
        .replace("<br>", "\n")
        .replace("<br />", "\n")
        .replace("</p>", "\n\n")
        .replace("</li>", "\n");
    let clean_text = TAG_REGEX.replace_all(&text, "");

    decode_entities(&clean_text)
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn docx_with_body(body: &str) -> Vec<u8> {
        let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
        let options = zip::write::SimpleFileOptions::default();
        writer.start_file("word/document.xml", options).unwrap();
        writer.write_all(body.as_bytes()).unwrap();
        writer.finish().unwrap().into_inner()
    }

    #[test]
    fn test_document_xml_to_text() {
        let xml = r#"<w:document><w:body><w:p><w:r><w:t>Jane Doe</w:t></w:r></w:p><w:p><w:r><w:t>Skills:</w:t><w:tab/><w:t>C++ &amp; Rust</w:t></w:r></w:p></w:body></w:document>"#;

        assert_eq!(document_xml_to_text(xml), "Jane Doe\nSkills:\tC++ & Rust");
    }

    #[test]
    fn test_extract_docx_bytes() {
        let bytes = docx_with_body(
            "<w:document><w:body><w:p><w:r><w:t>Experience</w:t></w:r></w:p></w:body></w:document>",
        );
        assert_eq!(extract_docx_bytes(&bytes).unwrap(), "Experience");
    }

    #[test]
    fn test_corrupt_docx_fails() {
        assert!(matches!(
            extract_docx_bytes(b"definitely not a zip"),
            Err(ResumeAnalyzerError::DocxExtraction(_))
        ));

        let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
        writer
            .start_file("other.xml", zip::write::SimpleFileOptions::default())
            .unwrap();
        let bytes = writer.finish().unwrap().into_inner();
        assert!(matches!(
            extract_docx_bytes(&bytes),
            Err(ResumeAnalyzerError::DocxExtraction(_))
        ));
    }

    #[test]
    fn test_markdown_to_text() {
        let text = markdown_to_text("# Jane Doe\n\n**Skills**: Rust & Go\n\n- Docker\n- AWS\n");

        assert!(text.contains("Jane Doe"));
        assert!(text.contains("Skills: Rust & Go"));
        assert!(text.contains("Docker"));
        assert!(!text.contains("**"));
        assert!(!text.contains('#'));
    }
}

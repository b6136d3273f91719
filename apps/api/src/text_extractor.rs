//! Text extraction from uploaded resume containers (PDF, DOCX, plain text).
//!
//! A thin byte-to-string adapter: structure recovery happens downstream in
//! the extraction pipeline, which only needs one raw text blob.

use std::io::{Cursor, Read};

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TextExtractError {
    #[error("PDF error: {0}")]
    Pdf(String),

    #[error("DOCX error: {0}")]
    Docx(String),

    #[error("Unsupported file format: {0}")]
    UnsupportedFormat(String),
}

/// Extracts a raw text blob from an uploaded file, dispatching on the
/// file-name extension.
pub fn extract_text(file_name: &str, content: &[u8]) -> Result<String, TextExtractError> {
    let lower = file_name.to_lowercase();
    if lower.ends_with(".pdf") {
        extract_from_pdf(content)
    } else if lower.ends_with(".docx") || lower.ends_with(".doc") {
        extract_from_docx(content)
    } else if lower.ends_with(".txt") {
        Ok(String::from_utf8_lossy(content).into_owned())
    } else {
        Err(TextExtractError::UnsupportedFormat(file_name.to_string()))
    }
}

fn extract_from_pdf(content: &[u8]) -> Result<String, TextExtractError> {
    pdf_extract::extract_text_from_mem(content).map_err(|e| TextExtractError::Pdf(e.to_string()))
}

static XML_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]+>").expect("valid regex"));

/// DOCX files are zip archives; the visible text lives in
/// `word/document.xml`. Paragraph closes become newlines, remaining tags
/// are dropped, basic entities are decoded.
fn extract_from_docx(content: &[u8]) -> Result<String, TextExtractError> {
    let mut archive = zip::ZipArchive::new(Cursor::new(content))
        .map_err(|e| TextExtractError::Docx(e.to_string()))?;

    let mut document_xml = String::new();
    archive
        .by_name("word/document.xml")
        .map_err(|e| TextExtractError::Docx(e.to_string()))?
        .read_to_string(&mut document_xml)
        .map_err(|e| TextExtractError::Docx(e.to_string()))?;

    let with_breaks = document_xml.replace("</w:p>", "\n");
    let text = XML_TAG.replace_all(&with_breaks, "");
    let text = text
        .replace("&amp;", "&")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'");

    Ok(text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n"))
}

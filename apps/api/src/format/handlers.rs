use axum::{
    extract::{Multipart, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
};
use bytes::Bytes;
use chrono::Local;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::info;

use crate::errors::AppError;
use crate::format::form::render_upload_form;
use crate::render;
use crate::state::AppState;
use crate::text_extractor::extract_text;

const DOCX_MIME: &str = "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

/// Extracted text shorter than this is treated as an empty upload.
const MIN_RESUME_CHARS: usize = 50;

/// GET /
pub async fn show_upload_form() -> Html<String> {
    Html(render_upload_form(None))
}

/// POST / — required `resume_file` plus optional `logo_file`. Runs the
/// extraction pipeline (which never fails) and returns the rendered
/// document as an attachment. User-visible failures are the ones outside
/// the pipeline: unsupported format, unreadable container, short text.
pub async fn handle_format(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Response, AppError> {
    let mut resume: Option<(String, Bytes)> = None;
    let mut logo: Option<Bytes> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid upload: {e}")))?
    {
        match field.name() {
            Some("resume_file") => {
                let file_name = field.file_name().unwrap_or_default().to_string();
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::Validation(format!("Failed to read resume file: {e}")))?;
                if !file_name.is_empty() && !data.is_empty() {
                    resume = Some((file_name, data));
                }
            }
            Some("logo_file") => {
                let has_name = field.file_name().map(|n| !n.is_empty()).unwrap_or(false);
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::Validation(format!("Failed to read logo file: {e}")))?;
                if has_name && !data.is_empty() {
                    logo = Some(data);
                }
            }
            _ => {}
        }
    }

    let (file_name, data) =
        resume.ok_or_else(|| AppError::Validation("Please select a resume file".to_string()))?;

    let resume_text =
        extract_text(&file_name, &data).map_err(|e| AppError::FileProcessing(e.to_string()))?;

    if resume_text.trim().chars().count() < MIN_RESUME_CHARS {
        return Err(AppError::Validation(
            "Resume appears to be empty or too short".to_string(),
        ));
    }

    let record = state.extractor.extract(&resume_text).await;
    info!(
        name = %record.name,
        skills = record.skills.len(),
        experience_entries = record.experience_table.len(),
        "Extraction complete"
    );

    let document = render::build_document(&record, logo.as_deref())
        .map_err(|e| AppError::Render(e.to_string()))?;

    let download_name = download_file_name(&record.name);

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, DOCX_MIME.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{download_name}\""),
            ),
        ],
        document,
    )
        .into_response())
}

static UNSAFE_NAME_CHARS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^\w\s-]").expect("valid regex"));

/// `{sanitized_name}_{timestamp}.docx`
fn download_file_name(candidate_name: &str) -> String {
    let safe = UNSAFE_NAME_CHARS.replace_all(candidate_name, "");
    let safe = safe.trim().replace(' ', "_");
    let safe = if safe.is_empty() {
        "Resume".to_string()
    } else {
        safe
    };
    let timestamp = Local::now().format("%Y%m%d_%H%M%S");
    format!("{safe}_{timestamp}.docx")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_download_name_is_sanitized() {
        let name = download_file_name("Jane / Doe!");
        assert!(name.starts_with("Jane__Doe_"));
        assert!(name.ends_with(".docx"));
        assert!(!name.contains('/'));
        assert!(!name.contains('!'));
    }

    #[test]
    fn test_download_name_defaults_when_nothing_survives() {
        let name = download_file_name("!!!");
        assert!(name.starts_with("Resume_"));
    }
}

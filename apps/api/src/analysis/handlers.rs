//! Axum route handlers for the analysis API.
//!
//! Transport concerns only: multipart intake, extension checks, temp-file
//! spooling, extraction. Analysis-level failures never become HTTP errors —
//! the flows embed them in the report body and these handlers return 200.

use std::collections::HashMap;
use std::io::Write;

use axum::extract::{Multipart, State};
use axum::Json;
use tracing::{info, warn};
use uuid::Uuid;

use crate::analysis::analyzer::analyze_resume;
use crate::analysis::matcher::compare_resume_jd;
use crate::analysis::models::{AnalysisReport, MatchReport};
use crate::errors::AppError;
use crate::extract::{extract_text, ALLOWED_EXTENSIONS};
use crate::state::AppState;

/// One spooled upload. The temp file deletes itself on drop, including on
/// error paths — no cleanup task needed.
struct SpooledUpload {
    extension: String,
    file: tempfile::NamedTempFile,
}

/// POST /api/analyze-resume
///
/// Upload a resume (multipart field `file`) and get the AI analysis.
pub async fn handle_analyze_resume(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<AnalysisReport>, AppError> {
    let mut uploads = collect_uploads(multipart, &["file"], &state.config.upload_dir).await?;
    let upload = uploads
        .remove("file")
        .ok_or_else(|| AppError::Validation("Missing multipart field 'file'".to_string()))?;

    let request_id = Uuid::new_v4();
    info!(%request_id, extension = %upload.extension, "analyzing uploaded resume");

    let resume_text = extract_text(upload.file.path(), &upload.extension).await?;
    let report = analyze_resume(&resume_text, state.model.as_ref()).await;

    if let Some(error) = &report.error {
        warn!(%request_id, error, "resume analysis completed with error");
    }

    Ok(Json(report))
}

/// POST /api/compare-resume-job
///
/// Upload a resume and a job description (multipart fields `resume` and
/// `job_description`) and get the match analysis.
pub async fn handle_compare_resume_job(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<MatchReport>, AppError> {
    let mut uploads = collect_uploads(
        multipart,
        &["resume", "job_description"],
        &state.config.upload_dir,
    )
    .await?;
    let resume = uploads
        .remove("resume")
        .ok_or_else(|| AppError::Validation("Missing multipart field 'resume'".to_string()))?;
    let jd = uploads.remove("job_description").ok_or_else(|| {
        AppError::Validation("Missing multipart field 'job_description'".to_string())
    })?;

    let request_id = Uuid::new_v4();
    info!(
        %request_id,
        resume_extension = %resume.extension,
        jd_extension = %jd.extension,
        "comparing resume against job description"
    );

    let resume_text = extract_text(resume.file.path(), &resume.extension).await?;
    let jd_text = extract_text(jd.file.path(), &jd.extension).await?;
    let report = compare_resume_jd(&resume_text, &jd_text, state.model.as_ref()).await;

    if let Some(error) = &report.error {
        warn!(%request_id, error, "match analysis completed with error");
    }

    Ok(Json(report))
}

/// Drains the multipart stream, spooling each wanted field to a temp file
/// under `upload_dir`. Unknown fields are skipped.
async fn collect_uploads(
    mut multipart: Multipart,
    fields: &[&str],
    upload_dir: &str,
) -> Result<HashMap<String, SpooledUpload>, AppError> {
    let mut uploads = HashMap::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid multipart payload: {e}")))?
    {
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };
        if !fields.contains(&name.as_str()) {
            continue;
        }

        let filename = field.file_name().unwrap_or("upload").to_string();
        let extension = file_extension(&filename)?;

        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("Failed to read upload '{name}': {e}")))?;

        let mut file = tempfile::Builder::new()
            .suffix(&extension)
            .tempfile_in(upload_dir)
            .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to spool upload: {e}")))?;
        file.write_all(&data)
            .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to spool upload: {e}")))?;

        uploads.insert(name, SpooledUpload { extension, file });
    }

    Ok(uploads)
}

/// Lowercased dot-extension of `filename`, validated against the allow-list.
fn file_extension(filename: &str) -> Result<String, AppError> {
    let extension = filename
        .rfind('.')
        .map(|idx| filename[idx..].to_lowercase())
        .unwrap_or_default();

    if !ALLOWED_EXTENSIONS.contains(&extension.as_str()) {
        return Err(AppError::Validation(format!(
            "File type not supported. Allowed types: {}",
            ALLOWED_EXTENSIONS.join(", ")
        )));
    }

    Ok(extension)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_extension_accepts_allowed_types() {
        assert_eq!(file_extension("resume.pdf").unwrap(), ".pdf");
        assert_eq!(file_extension("resume.docx").unwrap(), ".docx");
        assert_eq!(file_extension("notes.txt").unwrap(), ".txt");
    }

    #[test]
    fn test_file_extension_lowercases() {
        assert_eq!(file_extension("Resume.PDF").unwrap(), ".pdf");
    }

    #[test]
    fn test_file_extension_rejects_unknown_types() {
        assert!(file_extension("malware.exe").is_err());
        assert!(file_extension("archive.tar.gz").is_err());
    }

    #[test]
    fn test_file_extension_rejects_extensionless_names() {
        assert!(file_extension("resume").is_err());
    }
}

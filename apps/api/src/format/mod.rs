//! The resume-formatting endpoint: multipart upload in, extraction
//! pipeline, fixed-layout DOCX attachment out.

pub mod form;
pub mod handlers;

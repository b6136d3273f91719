//! Fixed-layout DOCX rendering of a normalized `CandidateRecord`.
//!
//! Pure formatting: every content decision has already been made by the
//! extraction pipeline. The layout follows the service's standard template
//! top to bottom — logo/name header, Key Expertise, education table,
//! contact block, cover letter, skills, per-employer experience tables,
//! certifications.

use std::io::Cursor;

use docx_rs::{
    AlignmentType, Docx, Paragraph, Pic, Run, RunFonts, Table, TableCell, TableRow,
};
use thiserror::Error;

use crate::models::candidate::{CandidateRecord, ExperienceEntry};

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to assemble document: {0}")]
    Pack(String),
}

const FONT: &str = "Calibri";
// Run sizes are half-points.
const BODY_SIZE: usize = 22;
const SECTION_SIZE: usize = 24;
const CONTACT_NAME_SIZE: usize = 32;
const HEADER_NAME_SIZE: usize = 36;
const HEADING_COLOR: &str = "003366";

/// Logo display size in EMU (2.5" x 0.75").
const LOGO_WIDTH_EMU: u32 = 2_286_000;
const LOGO_HEIGHT_EMU: u32 = 685_800;

/// Renders the complete document and returns the packed `.docx` bytes.
/// The optional logo is embedded only when it sniffs as PNG or JPEG; a
/// text placeholder stands in otherwise.
pub fn build_document(
    record: &CandidateRecord,
    logo: Option<&[u8]>,
) -> Result<Vec<u8>, RenderError> {
    let mut docx = Docx::new()
        .add_table(header_table(record, logo))
        .add_paragraph(Paragraph::new())
        .add_paragraph(section_header("Key Expertise"))
        .add_paragraph(body_paragraph(&record.summary).align(AlignmentType::Both))
        .add_paragraph(section_header("Education Details"))
        .add_table(education_table(record))
        .add_paragraph(Paragraph::new());

    // Contact block
    docx = docx.add_paragraph(
        Paragraph::new().add_run(sized_bold_run(&record.name, CONTACT_NAME_SIZE)),
    );
    docx = docx.add_paragraph(body_paragraph(&record.location));
    if !record.email.is_empty() {
        docx = docx.add_paragraph(body_paragraph(&record.email));
    }
    if !record.phone.is_empty() {
        docx = docx.add_paragraph(body_paragraph(&record.phone));
    }
    docx = docx.add_paragraph(body_paragraph(&format!("Date: {}", record.date)));
    docx = docx.add_paragraph(
        Paragraph::new().add_run(bold_run(&format!("Subject: {}", record.subject))),
    );

    // Cover letter — the template owns the greeting, so paragraphs carrying
    // their own are skipped.
    docx = docx.add_paragraph(Paragraph::new());
    docx = docx.add_paragraph(Paragraph::new().add_run(bold_run("Dear Hiring Manager,")));
    for paragraph in record.cover_letter.split("\n\n") {
        let paragraph = paragraph.trim();
        if paragraph.is_empty() || paragraph.contains("Dear Hiring Manager") {
            continue;
        }
        for line in paragraph.lines() {
            docx = docx.add_paragraph(body_paragraph(line.trim()));
        }
    }

    if !record.skills.is_empty() {
        docx = docx.add_paragraph(section_header("Key Skills"));
        for skill in &record.skills {
            docx = docx.add_paragraph(bullet_paragraph(skill));
        }
    }

    if !record.experience_table.is_empty() {
        docx = docx.add_paragraph(section_header("Experience:"));
        for entry in &record.experience_table {
            docx = docx.add_table(experience_block(entry));
            docx = docx.add_paragraph(Paragraph::new());
        }
    }

    if !record.certifications.is_empty() {
        docx = docx.add_paragraph(section_header("CERTIFICATIONS"));
        for certification in &record.certifications {
            docx = docx.add_paragraph(bullet_paragraph(certification));
        }
    }

    let mut buffer = Cursor::new(Vec::new());
    docx.build()
        .pack(&mut buffer)
        .map_err(|e| RenderError::Pack(e.to_string()))?;
    Ok(buffer.into_inner())
}

fn text_run(text: &str) -> Run {
    Run::new()
        .add_text(text)
        .size(BODY_SIZE)
        .fonts(RunFonts::new().ascii(FONT))
}

fn bold_run(text: &str) -> Run {
    text_run(text).bold()
}

fn sized_bold_run(text: &str, size: usize) -> Run {
    Run::new()
        .add_text(text)
        .bold()
        .size(size)
        .fonts(RunFonts::new().ascii(FONT))
}

fn body_paragraph(text: &str) -> Paragraph {
    Paragraph::new().add_run(text_run(text))
}

fn bullet_paragraph(text: &str) -> Paragraph {
    body_paragraph(&format!("\u{2022} {text}"))
}

fn section_header(title: &str) -> Paragraph {
    Paragraph::new().add_run(
        Run::new()
            .add_text(title)
            .bold()
            .size(SECTION_SIZE)
            .color(HEADING_COLOR)
            .fonts(RunFonts::new().ascii(FONT)),
    )
}

fn label_cell(text: &str) -> TableCell {
    TableCell::new().add_paragraph(Paragraph::new().add_run(bold_run(text)))
}

/// Two-cell banner: logo (or placeholder) on the left, candidate name
/// right-aligned.
fn header_table(record: &CandidateRecord, logo: Option<&[u8]>) -> Table {
    let logo_paragraph = match logo.filter(|bytes| is_supported_image(bytes)) {
        Some(bytes) => Paragraph::new().add_run(
            Run::new().add_image(Pic::new(bytes).size(LOGO_WIDTH_EMU, LOGO_HEIGHT_EMU)),
        ),
        None => body_paragraph("\u{229e} Logo"),
    };

    let name_paragraph = Paragraph::new()
        .add_run(sized_bold_run(&record.name, HEADER_NAME_SIZE))
        .align(AlignmentType::Right);

    Table::new(vec![TableRow::new(vec![
        TableCell::new().add_paragraph(logo_paragraph),
        TableCell::new().add_paragraph(name_paragraph),
    ])])
    .set_grid(vec![4500, 4500])
}

/// Only PNG and JPEG uploads are embedded.
fn is_supported_image(bytes: &[u8]) -> bool {
    bytes.starts_with(&[0x89, b'P', b'N', b'G']) || bytes.starts_with(&[0xFF, 0xD8, 0xFF])
}

fn education_table(record: &CandidateRecord) -> Table {
    let mut rows = vec![TableRow::new(vec![
        label_cell("Qualification"),
        label_cell("Institution"),
    ])];
    for entry in &record.education {
        rows.push(TableRow::new(vec![
            TableCell::new().add_paragraph(body_paragraph(&entry.degree)),
            TableCell::new().add_paragraph(body_paragraph(&entry.institution)),
        ]));
    }
    Table::new(rows).set_grid(vec![4000, 5000])
}

/// One employer: label column on the left, company line and responsibility
/// bullets on the right.
fn experience_block(entry: &ExperienceEntry) -> Table {
    let mut responsibility_cell = TableCell::new();
    if entry.roles_responsibility.is_empty() {
        responsibility_cell = responsibility_cell.add_paragraph(Paragraph::new());
    }
    for item in &entry.roles_responsibility {
        responsibility_cell = responsibility_cell.add_paragraph(bullet_paragraph(item));
    }

    Table::new(vec![
        TableRow::new(vec![
            label_cell("Company Name"),
            TableCell::new().add_paragraph(Paragraph::new().add_run(bold_run(&entry.company_name))),
        ]),
        TableRow::new(vec![
            label_cell("Roles & Responsibility"),
            responsibility_cell,
        ]),
    ])
    .set_grid(vec![2500, 6500])
}

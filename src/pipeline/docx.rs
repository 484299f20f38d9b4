//! DOCX rendering: [`ResumeRecord`] → WordprocessingML package bytes.
//!
//! docx-rs starts from an empty style sheet, so the `Title` and `Heading1`
//! paragraph styles and the bullet list definition are declared here.
//! Sizes are in half-points, indents in twentieths of a point.

use crate::error::IntellicvError;
use crate::record::ResumeRecord;
use docx_rs::{
    AbstractNumbering, Docx, IndentLevel, Level, LevelJc, LevelText, NumberFormat, Numbering,
    NumberingId, Paragraph, Run, SpecialIndentType, Start, Style, StyleType,
};
use std::io::Cursor;
use tracing::debug;

pub const TITLE_STYLE: &str = "Title";
pub const HEADING_STYLE: &str = "Heading1";

/// Numbering id of the bullet list. `Docx::new()` already carries a
/// default numbering under id 1.
const BULLET_NUMBERING_ID: usize = 2;

/// 12pt, as used for the position lines.
const ENTRY_RUN_SIZE: usize = 24;

/// Render a record as a `.docx` package.
///
/// The returned buffer is a complete ZIP archive starting at offset 0.
pub fn render_docx(record: &ResumeRecord) -> Result<Vec<u8>, IntellicvError> {
    let mut doc = base_document()
        .add_paragraph(styled(&record.name, TITLE_STYLE))
        .add_paragraph(plain(&record.contact_info))
        .add_paragraph(styled("Professional Experience", HEADING_STYLE));

    for entry in &record.experience {
        let line = format!("{} - {} ({})", entry.company, entry.job_title, entry.dates);
        doc = doc.add_paragraph(
            Paragraph::new().add_run(Run::new().add_text(line).bold().size(ENTRY_RUN_SIZE)),
        );
        for achievement in &entry.achievements {
            doc = doc.add_paragraph(bullet(achievement));
        }
    }

    doc = doc
        .add_paragraph(styled("Education", HEADING_STYLE))
        .add_paragraph(Paragraph::new().add_run(
            Run::new()
                .add_text(format!("{} - {}", record.education.degree, record.education.year))
                .bold(),
        ))
        .add_paragraph(styled("Skills", HEADING_STYLE));

    for skill in &record.skills {
        doc = doc.add_paragraph(bullet(skill));
    }

    let mut buf = Cursor::new(Vec::new());
    doc.build()
        .pack(&mut buf)
        .map_err(|e| IntellicvError::DocumentBuildFailed(e.to_string()))?;

    let bytes = buf.into_inner();
    debug!("Rendered DOCX: {} bytes", bytes.len());
    Ok(bytes)
}

fn base_document() -> Docx {
    Docx::new()
        .add_style(
            Style::new(TITLE_STYLE, StyleType::Paragraph)
                .name("Title")
                .size(56),
        )
        .add_style(
            Style::new(HEADING_STYLE, StyleType::Paragraph)
                .name("Heading 1")
                .size(32)
                .bold()
                .color("2F5496"),
        )
        .add_abstract_numbering(
            AbstractNumbering::new(BULLET_NUMBERING_ID).add_level(
                Level::new(
                    0,
                    Start::new(1),
                    NumberFormat::new("bullet"),
                    LevelText::new("•"),
                    LevelJc::new("left"),
                )
                .indent(Some(720), Some(SpecialIndentType::Hanging(360)), None, None),
            ),
        )
        .add_numbering(Numbering::new(BULLET_NUMBERING_ID, BULLET_NUMBERING_ID))
}

fn plain(text: &str) -> Paragraph {
    Paragraph::new().add_run(Run::new().add_text(text))
}

fn styled(text: &str, style: &str) -> Paragraph {
    plain(text).style(style)
}

fn bullet(text: &str) -> Paragraph {
    plain(text).numbering(NumberingId::new(BULLET_NUMBERING_ID), IndentLevel::new(0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{Education, ExperienceEntry};
    use docx_rs::{read_docx, DocumentChild, ParagraphChild, RunChild};

    fn ada() -> ResumeRecord {
        ResumeRecord {
            name: "Ada Lovelace".into(),
            contact_info: "ada@example.com".into(),
            experience: vec![ExperienceEntry {
                company: "Analytical Eng Co".into(),
                job_title: "Engineer".into(),
                dates: "1840-1850".into(),
                achievements: vec!["Designed first algorithm".into()],
            }],
            education: Education {
                degree: "Self-taught".into(),
                year: "1840".into(),
            },
            skills: vec!["Mathematics".into(), "Logic".into()],
        }
    }

    /// (text, style id, is bulleted) for every paragraph in the body.
    fn paragraphs(bytes: &[u8]) -> Vec<(String, Option<String>, bool)> {
        let docx = read_docx(bytes).expect("generated docx should parse");
        docx.document
            .children
            .iter()
            .filter_map(|child| match child {
                DocumentChild::Paragraph(p) => Some(p),
                _ => None,
            })
            .map(|p| {
                let mut text = String::new();
                for child in &p.children {
                    if let ParagraphChild::Run(run) = child {
                        for rc in &run.children {
                            if let RunChild::Text(t) = rc {
                                text.push_str(&t.text);
                            }
                        }
                    }
                }
                let style = p.property.style.as_ref().map(|s| s.val.clone());
                (text, style, p.property.numbering_property.is_some())
            })
            .collect()
    }

    #[test]
    fn produces_zip_package() {
        let bytes = render_docx(&ada()).unwrap();
        assert_eq!(&bytes[..2], b"PK");
    }

    #[test]
    fn paragraph_sequence_matches_record() {
        let bytes = render_docx(&ada()).unwrap();
        let paras = paragraphs(&bytes);

        let texts: Vec<&str> = paras.iter().map(|(t, _, _)| t.as_str()).collect();
        assert_eq!(
            texts,
            vec![
                "Ada Lovelace",
                "ada@example.com",
                "Professional Experience",
                "Analytical Eng Co - Engineer (1840-1850)",
                "Designed first algorithm",
                "Education",
                "Self-taught - 1840",
                "Skills",
                "Mathematics",
                "Logic",
            ]
        );

        assert_eq!(paras[0].1.as_deref(), Some(TITLE_STYLE));
        assert_eq!(paras[2].1.as_deref(), Some(HEADING_STYLE));
        let bulleted: Vec<&str> = paras
            .iter()
            .filter(|(_, _, b)| *b)
            .map(|(t, _, _)| t.as_str())
            .collect();
        assert_eq!(bulleted, vec!["Designed first algorithm", "Mathematics", "Logic"]);
    }

    #[test]
    fn entries_keep_input_order() {
        let mut record = ada();
        record.experience.push(ExperienceEntry {
            company: "Second Co".into(),
            job_title: "Lead".into(),
            dates: "1850-1852".into(),
            achievements: vec!["First".into(), "Second".into()],
        });
        let paras = paragraphs(&render_docx(&record).unwrap());

        let texts: Vec<&str> = paras.iter().map(|(t, _, _)| t.as_str()).collect();
        assert_eq!(
            texts[3..8],
            [
                "Analytical Eng Co - Engineer (1840-1850)",
                "Designed first algorithm",
                "Second Co - Lead (1850-1852)",
                "First",
                "Second",
            ]
        );
        let bulleted: Vec<&str> = paras
            .iter()
            .filter(|(_, _, b)| *b)
            .map(|(t, _, _)| t.as_str())
            .collect();
        assert_eq!(
            bulleted,
            vec!["Designed first algorithm", "First", "Second", "Mathematics", "Logic"]
        );
    }

    #[test]
    fn empty_sections_still_have_headings() {
        let mut record = ada();
        record.experience.clear();
        record.skills.clear();
        let paras = paragraphs(&render_docx(&record).unwrap());
        assert_eq!(paras.len(), 6);
        assert!(paras.iter().all(|(_, _, b)| !b));
    }

    #[test]
    fn idempotent() {
        let record = ada();
        let first = paragraphs(&render_docx(&record).unwrap());
        let second = paragraphs(&render_docx(&record).unwrap());
        assert_eq!(first, second);
    }
}

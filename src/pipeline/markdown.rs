//! Markdown rendering of a [`ResumeRecord`] for on-screen display.
//!
//! The layout mirrors what the web front end shows: bold name, contact
//! line, then `###` sections. Lines ending in two spaces are hard breaks.

use crate::record::ResumeRecord;
use std::fmt::Write;

/// Render a record as Markdown.
///
/// Pure and deterministic: the same record always yields the same string.
pub fn render_markdown(record: &ResumeRecord) -> String {
    let mut out = String::new();

    // `write!` into a String cannot fail.
    let _ = write!(
        out,
        "\n**{}**  \n{}  \n\n### **Professional Experience**\n",
        record.name, record.contact_info
    );

    for entry in &record.experience {
        let _ = write!(
            out,
            "\n**{}** - **{}** ({})\n",
            entry.company, entry.job_title, entry.dates
        );
        for achievement in &entry.achievements {
            let _ = writeln!(out, "- {achievement}");
        }
    }

    let _ = write!(
        out,
        "\n\n### **Education**\n\n**{}** - {}  \n\n### **Skills**\n",
        record.education.degree, record.education.year
    );

    for skill in &record.skills {
        let _ = writeln!(out, "- {skill}");
    }

    out
}

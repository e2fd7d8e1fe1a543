//! Enhanced resume PDF export
//!
//! Renders the enhanced resume text with a simple layout: a document header,
//! detected section headings, bulleted body lines, and a trailing block of
//! ATS recommendations.

use crate::error::{JobFitError, Result};
use printpdf::{BuiltinFont, IndirectFontRef, Mm, PdfDocument, PdfDocumentReference, PdfLayerReference};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

const PAGE_WIDTH_MM: f32 = 215.9;
const PAGE_HEIGHT_MM: f32 = 279.4;
const MARGIN_LEFT_MM: f32 = 14.0;
const MARGIN_TOP_MM: f32 = 21.0;
const MARGIN_BOTTOM_MM: f32 = 14.0;

const HEADER_PT: f32 = 16.0;
const SECTION_PT: f32 = 13.0;
const BODY_PT: f32 = 10.0;

/// Line width in characters for the body font; Helvetica at 10pt fits about
/// this many average characters between the margins.
const WRAP_COLUMNS: usize = 100;

const SECTION_KEYWORDS: &[&str] = &[
    "EXPERIENCE",
    "EDUCATION",
    "SKILLS",
    "PROJECTS",
    "CERTIFICATIONS",
    "SUMMARY",
    "OBJECTIVE",
];

/// Writes the enhanced resume (plus ATS recommendations, when present) as a
/// PDF at the given path.
pub fn export_enhanced_resume(
    resume_text: &str,
    ats_suggestions: &[String],
    path: &Path,
) -> Result<()> {
    let (doc, page, layer) = PdfDocument::new(
        "Enhanced Resume",
        Mm(PAGE_WIDTH_MM),
        Mm(PAGE_HEIGHT_MM),
        "Layer 1",
    );

    let body_font = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| JobFitError::PdfRender(e.to_string()))?;
    let bold_font = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(|e| JobFitError::PdfRender(e.to_string()))?;

    {
        let mut writer = PageWriter {
            doc: &doc,
            layer: doc.get_page(page).get_layer(layer),
            y: PAGE_HEIGHT_MM - MARGIN_TOP_MM,
            body_font,
            bold_font,
        };

        writer.heading("Updated Resume", HEADER_PT);
        writer.space(4.0);

        for line in resume_text.lines().map(str::trim).filter(|l| !l.is_empty()) {
            if is_section_heading(line) {
                writer.space(3.0);
                writer.heading(line, SECTION_PT);
            } else {
                writer.bullet(line);
            }
        }

        if !ats_suggestions.is_empty() {
            writer.space(6.0);
            writer.heading("ATS Optimization Recommendations", SECTION_PT);
            writer.space(2.0);
            for suggestion in ats_suggestions {
                writer.bullet(suggestion);
            }
        }
    }

    let file = File::create(path)?;
    doc.save(&mut BufWriter::new(file))
        .map_err(|e| JobFitError::PdfRender(e.to_string()))?;
    Ok(())
}

struct PageWriter<'a> {
    doc: &'a PdfDocumentReference,
    layer: PdfLayerReference,
    y: f32,
    body_font: IndirectFontRef,
    bold_font: IndirectFontRef,
}

impl PageWriter<'_> {
    fn heading(&mut self, text: &str, size_pt: f32) {
        let line_height = size_pt * 0.5;
        self.ensure_space(line_height);
        self.layer.use_text(
            text,
            size_pt,
            Mm(MARGIN_LEFT_MM),
            Mm(self.y),
            &self.bold_font,
        );
        self.y -= line_height;
    }

    fn body(&mut self, text: &str) {
        let line_height = BODY_PT * 0.5;
        self.ensure_space(line_height);
        self.layer.use_text(
            text,
            BODY_PT,
            Mm(MARGIN_LEFT_MM),
            Mm(self.y),
            &self.body_font,
        );
        self.y -= line_height;
    }

    /// Renders one logical line as a bullet, wrapping continuations under it.
    fn bullet(&mut self, text: &str) {
        for (i, wrapped) in wrap(text, WRAP_COLUMNS).into_iter().enumerate() {
            if i == 0 {
                self.body(&format!("• {}", wrapped));
            } else {
                self.body(&format!("  {}", wrapped));
            }
        }
    }

    fn space(&mut self, mm: f32) {
        self.y -= mm;
    }

    fn ensure_space(&mut self, line_height: f32) {
        if self.y - line_height < MARGIN_BOTTOM_MM {
            let (page, layer) =
                self.doc
                    .add_page(Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "Layer 1");
            self.layer = self.doc.get_page(page).get_layer(layer);
            self.y = PAGE_HEIGHT_MM - MARGIN_TOP_MM;
        }
    }
}

/// A line is treated as a section heading when it is entirely upper-case or
/// mentions one of the common resume section names.
fn is_section_heading(line: &str) -> bool {
    let has_alpha = line.chars().any(|c| c.is_alphabetic());
    if !has_alpha {
        return false;
    }
    let upper = line.to_uppercase();
    line == upper || SECTION_KEYWORDS.iter().any(|keyword| upper.contains(keyword))
}

/// Greedy word wrap; a single overlong word gets its own line untouched.
fn wrap(text: &str, columns: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if current.is_empty() {
            current = word.to_string();
        } else if current.len() + 1 + word.len() <= columns {
            current.push(' ');
            current.push_str(word);
        } else {
            lines.push(std::mem::take(&mut current));
            current = word.to_string();
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}

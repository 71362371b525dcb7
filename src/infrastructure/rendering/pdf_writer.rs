use encoding_rs::WINDOWS_1252;
use lopdf::content::{Content, Operation};
use lopdf::{Document, Object, ObjectId, Stream, dictionary};

use crate::application::ports::{PdfRenderer, RenderError};

use super::helvetica::text_width;

const MM: f32 = 72.0 / 25.4;

/// Page geometry in PDF points.
#[derive(Debug, Clone, Copy)]
pub struct PageLayout {
    pub width: f32,
    pub height: f32,
    pub margin: f32,
    pub font_size: f32,
    pub line_height: f32,
    pub section_gap: f32,
}

impl Default for PageLayout {
    /// A4 portrait, 10 mm margins, 12 pt Helvetica on a 10 mm line.
    fn default() -> Self {
        Self {
            width: 595.28,
            height: 841.89,
            margin: 10.0 * MM,
            font_size: 12.0,
            line_height: 10.0 * MM,
            section_gap: 5.0 * MM,
        }
    }
}

impl PageLayout {
    fn text_width(&self) -> f32 {
        self.width - 2.0 * self.margin
    }
}

/// Writes sections as wrapped text blocks with the core Helvetica font.
/// Only characters representable in WinAnsi can be rendered.
#[derive(Debug, Clone, Default)]
pub struct LopdfRenderer {
    layout: PageLayout,
}

impl LopdfRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    fn layout_pages(&self, sections: &[&str]) -> Result<Vec<Vec<Operation>>, RenderError> {
        let layout = &self.layout;
        let bottom = layout.margin;
        let top = layout.height - layout.margin;
        // Baseline sits in the lower part of each line cell.
        let baseline_offset = (layout.line_height + layout.font_size * 0.7) / 2.0;

        let mut pages = vec![Vec::new()];
        let mut cursor = top;

        for section in sections {
            for line in wrap_section(section, layout.text_width(), layout.font_size)? {
                if cursor - layout.line_height < bottom {
                    pages.push(Vec::new());
                    cursor = top;
                }
                if !line.is_empty() {
                    let ops = pages.last_mut().ok_or_else(|| {
                        RenderError::EncodingFailed("page list is empty".to_string())
                    })?;
                    push_text(
                        ops,
                        layout.margin,
                        cursor - baseline_offset,
                        layout.font_size,
                        line,
                    );
                }
                cursor -= layout.line_height;
            }
            cursor -= layout.section_gap;
        }

        Ok(pages)
    }
}

impl PdfRenderer for LopdfRenderer {
    fn render(&self, sections: &[&str]) -> Result<Vec<u8>, RenderError> {
        let pages = self.layout_pages(sections)?;
        let page_count = pages.len();

        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();

        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Helvetica",
            "Encoding" => "WinAnsiEncoding",
        });
        let resources_id = doc.add_object(dictionary! {
            "Font" => dictionary! {
                "F1" => font_id,
            },
        });

        let mut kids: Vec<Object> = Vec::with_capacity(page_count);
        for operations in pages {
            let content = Content { operations };
            let encoded = content
                .encode()
                .map_err(|e| RenderError::EncodingFailed(e.to_string()))?;
            let content_id = doc.add_object(Stream::new(dictionary! {}, encoded));
            let page_id: ObjectId = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "Contents" => content_id,
            });
            kids.push(page_id.into());
        }

        let pages_dict = dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => page_count as i64,
            "Resources" => resources_id,
            "MediaBox" => vec![
                0.into(),
                0.into(),
                Object::Real(self.layout.width),
                Object::Real(self.layout.height),
            ],
        };
        doc.objects.insert(pages_id, Object::Dictionary(pages_dict));

        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);
        doc.compress();

        let mut buffer = Vec::new();
        doc.save_to(&mut buffer)
            .map_err(|e| RenderError::EncodingFailed(e.to_string()))?;

        tracing::debug!(
            sections = sections.len(),
            pages = page_count,
            bytes = buffer.len(),
            "PDF rendered"
        );
        Ok(buffer)
    }
}

fn push_text(ops: &mut Vec<Operation>, x: f32, y: f32, font_size: f32, line: Vec<u8>) {
    ops.push(Operation::new("BT", vec![]));
    ops.push(Operation::new("Tf", vec!["F1".into(), Object::Real(font_size)]));
    ops.push(Operation::new("Td", vec![Object::Real(x), Object::Real(y)]));
    ops.push(Operation::new("Tj", vec![Object::string_literal(line)]));
    ops.push(Operation::new("ET", vec![]));
}

fn encode_char(c: char) -> Result<Vec<u8>, RenderError> {
    let mut buf = [0u8; 4];
    let (bytes, _, had_errors) = WINDOWS_1252.encode(c.encode_utf8(&mut buf));
    if had_errors {
        return Err(RenderError::UnsupportedCharacter(c));
    }
    Ok(bytes.into_owned())
}

fn encode_word(word: &str) -> Result<Vec<u8>, RenderError> {
    let mut out = Vec::with_capacity(word.len());
    for c in word.chars() {
        out.extend(encode_char(c)?);
    }
    Ok(out)
}

/// Splits a section into encoded lines no wider than `max_width`. Explicit
/// newlines are kept; a blank source line yields an empty output line.
fn wrap_section(section: &str, max_width: f32, font_size: f32) -> Result<Vec<Vec<u8>>, RenderError> {
    let space_width = text_width(b" ", font_size);
    let mut lines = Vec::new();

    for source_line in section.lines() {
        let cleaned = source_line.replace('\t', "    ");
        let mut current: Vec<u8> = Vec::new();
        let mut current_width = 0.0_f32;
        let mut produced = false;

        for word in cleaned.split(' ').filter(|w| !w.is_empty()) {
            let encoded = encode_word(word)?;
            let width = text_width(&encoded, font_size);

            if !current.is_empty() && current_width + space_width + width > max_width {
                lines.push(std::mem::take(&mut current));
                current_width = 0.0;
                produced = true;
            }

            if width > max_width {
                for chunk in break_word(&encoded, max_width, font_size) {
                    if !current.is_empty() {
                        lines.push(std::mem::take(&mut current));
                        produced = true;
                    }
                    current_width = text_width(&chunk, font_size);
                    current = chunk;
                }
                continue;
            }

            if !current.is_empty() {
                current.push(b' ');
                current_width += space_width;
            }
            current.extend(encoded);
            current_width += width;
        }

        if !current.is_empty() || !produced {
            lines.push(current);
        }
    }

    Ok(lines)
}

fn break_word(encoded: &[u8], max_width: f32, font_size: f32) -> Vec<Vec<u8>> {
    let mut chunks = Vec::new();
    let mut chunk = Vec::new();
    for byte in encoded {
        chunk.push(*byte);
        if chunk.len() > 1 && text_width(&chunk, font_size) > max_width {
            chunk.pop();
            chunks.push(std::mem::replace(&mut chunk, vec![*byte]));
        }
    }
    if !chunk.is_empty() {
        chunks.push(chunk);
    }
    chunks
}

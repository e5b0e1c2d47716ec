//! Multi-line text layout.
//!
//! Lines are separated by `\n`. The laid out block has its origin at its top-left corner,
//! and the glyph outlines are already positioned relative to it.

use quickplot_base::geom;
use ttf_parser as ttf;

use crate::{Font, FontDb, Outliner};

/// Ratio of the estimated advance to the font size, used without font face
const ESTIMATED_ADVANCE: f32 = 0.6;
/// Ratio of the estimated line height to the font size, used without font face
const ESTIMATED_LINE_HEIGHT: f32 = 1.2;

/// Horizontal alignment of the lines within the text block
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Align {
    /// Lines start at the left of the block
    #[default]
    Left,
    /// Lines are centered in the block
    Center,
    /// Lines end at the right of the block
    Right,
}

/// A block of text, shaped and outlined
#[derive(Debug, Clone)]
pub struct Text {
    text: String,
    width: f32,
    line_height: f32,
    ascent: f32,
    lines: usize,
    path: Option<geom::Path>,
}

struct Metrics {
    scale: f32,
    ascent: f32,
    line_height: f32,
}

impl Text {
    /// Lay out `text` with the face matching `font` at the given size
    pub fn layout(text: &str, font: &Font, size: f32, align: Align, db: &FontDb) -> Text {
        if text.is_empty() || size <= 0.0 {
            return Text::empty(text);
        }
        let lines: Vec<&str> = text.split('\n').collect();
        match db.with_face(font, |face| Text::shape(text, &lines, face, size, align)) {
            Some(laid_out) => laid_out,
            None => {
                db.warn_missing(font);
                Text::estimate(text, &lines, size)
            }
        }
    }

    fn empty(text: &str) -> Text {
        Text {
            text: text.to_string(),
            width: 0.0,
            line_height: 0.0,
            ascent: 0.0,
            lines: 0,
            path: None,
        }
    }

    fn estimate(text: &str, lines: &[&str], size: f32) -> Text {
        let max_chars = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0);
        Text {
            text: text.to_string(),
            width: max_chars as f32 * size * ESTIMATED_ADVANCE,
            line_height: size * ESTIMATED_LINE_HEIGHT,
            ascent: size,
            lines: lines.len(),
            path: None,
        }
    }

    fn metrics(face: &rustybuzz::Face<'_>, size: f32) -> Metrics {
        let scale = size / face.units_per_em() as f32;
        let ascent = face.ascender() as f32 * scale;
        let descent = -(face.descender() as f32) * scale;
        let gap = face.line_gap() as f32 * scale;
        Metrics {
            scale,
            ascent,
            line_height: ascent + descent + gap,
        }
    }

    fn shape(
        text: &str,
        lines: &[&str],
        face: &rustybuzz::Face<'_>,
        size: f32,
        align: Align,
    ) -> Text {
        let metrics = Text::metrics(face, size);

        let buffers: Vec<rustybuzz::GlyphBuffer> = lines
            .iter()
            .map(|line| {
                let mut buffer = rustybuzz::UnicodeBuffer::new();
                buffer.push_str(line);
                rustybuzz::shape(face, &[], buffer)
            })
            .collect();

        let widths: Vec<f32> = buffers
            .iter()
            .map(|b| {
                let adv: i32 = b.glyph_positions().iter().map(|gp| gp.x_advance).sum();
                adv as f32 * metrics.scale
            })
            .collect();
        let width = widths.iter().copied().fold(0.0, f32::max);

        let mut text_pb = geom::PathBuilder::new();

        for (i, (buffer, line_width)) in buffers.iter().zip(widths.iter()).enumerate() {
            let x_start = match align {
                Align::Left => 0.0,
                Align::Center => (width - line_width) / 2.0,
                Align::Right => width - line_width,
            };
            let baseline = i as f32 * metrics.line_height + metrics.ascent;
            let mut x_cursor = 0i32;
            let mut y_cursor = 0i32;

            for (gp, gi) in buffer
                .glyph_positions()
                .iter()
                .zip(buffer.glyph_infos().iter())
            {
                let mut glyph_pb = geom::PathBuilder::new();
                let glyph_id = ttf::GlyphId(gi.glyph_id as u16);
                face.outline_glyph(glyph_id, &mut Outliner(&mut glyph_pb));

                if let Some(path) = glyph_pb.finish() {
                    let tx = x_start + (x_cursor + gp.x_offset) as f32 * metrics.scale;
                    let ty = baseline - (y_cursor + gp.y_offset) as f32 * metrics.scale;
                    let ts = geom::Transform::from_row(
                        metrics.scale,
                        0.0,
                        0.0,
                        -metrics.scale,
                        tx,
                        ty,
                    );
                    if let Some(path) = path.transform(ts) {
                        text_pb.push_path(&path);
                    }
                }

                x_cursor += gp.x_advance;
                y_cursor += gp.y_advance;
            }
        }

        Text {
            text: text.to_string(),
            width,
            line_height: metrics.line_height,
            ascent: metrics.ascent,
            lines: lines.len(),
            path: text_pb.finish(),
        }
    }

    /// The source text
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Width of the widest line
    pub fn width(&self) -> f32 {
        self.width
    }

    /// Height of the whole block
    pub fn height(&self) -> f32 {
        self.line_height * self.lines as f32
    }

    /// Size of the whole block
    pub fn size(&self) -> geom::Size {
        geom::Size::new(self.width(), self.height())
    }

    /// Distance between two baselines
    pub fn line_height(&self) -> f32 {
        self.line_height
    }

    /// Distance from the top of a line to its baseline
    pub fn ascent(&self) -> f32 {
        self.ascent
    }

    /// Number of lines
    pub fn line_count(&self) -> usize {
        self.lines
    }

    /// The glyph outlines, relative to the top-left corner of the block.
    /// None when the text is empty, only made of blanks, or laid out without font face.
    pub fn path(&self) -> Option<&geom::Path> {
        self.path.as_ref()
    }
}

//! Glyph metrics and text decoding for page fonts.

use std::collections::HashMap;

use lopdf::{Dictionary, Document as LopdfDocument, Object};

use super::backend::decode_text_simple;

/// Advance used when a glyph width is unknown, in 1/1000 text space units.
const FALLBACK_GLYPH_WIDTH: f32 = 500.0;

/// Default width of composite-font glyphs when `/DW` is absent.
const DEFAULT_CID_WIDTH: f32 = 1000.0;

/// Width and decoding information for one font resource.
#[derive(Debug, Clone)]
pub struct FontMetrics<'a> {
    /// Font dictionary used for encoding-aware decoding (absent in reduced mode)
    dict: Option<&'a Dictionary>,
    /// Codes are two bytes wide (Type0 / composite fonts)
    two_byte: bool,
    first_char: u32,
    widths: Vec<f32>,
    missing_width: f32,
    cid_widths: HashMap<u32, f32>,
}

impl<'a> FontMetrics<'a> {
    /// Metrics read from the font dictionary (`/Widths`, `/W`, `/DW`).
    pub fn from_dictionary(doc: &'a LopdfDocument, dict: &'a Dictionary) -> Self {
        let two_byte = is_composite(dict);
        let mut metrics = Self {
            dict: Some(dict),
            two_byte,
            first_char: 0,
            widths: Vec::new(),
            missing_width: FALLBACK_GLYPH_WIDTH,
            cid_widths: HashMap::new(),
        };

        if two_byte {
            metrics.missing_width = DEFAULT_CID_WIDTH;
            if let Some(descendant) = descendant_font(doc, dict) {
                if let Some(dw) = descendant.get(b"DW").ok().and_then(|o| number(doc, o)) {
                    metrics.missing_width = dw;
                }
                if let Some(w) = descendant.get(b"W").ok().and_then(|o| array(doc, o)) {
                    metrics.cid_widths = parse_cid_widths(doc, w);
                }
            }
        } else {
            metrics.first_char = dict
                .get(b"FirstChar")
                .ok()
                .and_then(|o| number(doc, o))
                .map(|n| n.max(0.0) as u32)
                .unwrap_or(0);
            if let Some(widths) = dict.get(b"Widths").ok().and_then(|o| array(doc, o)) {
                metrics.widths = widths
                    .iter()
                    .map(|w| number(doc, w).unwrap_or(0.0))
                    .collect();
            }
            if let Some(missing) = dict
                .get(b"FontDescriptor")
                .ok()
                .and_then(|o| dictionary(doc, o))
                .and_then(|d| d.get(b"MissingWidth").ok())
                .and_then(|o| number(doc, o))
            {
                if missing > 0.0 {
                    metrics.missing_width = missing;
                }
            }
        }

        metrics
    }

    /// Metrics that ignore embedded font data ("system fonts").
    pub fn system(dict: &Dictionary) -> Self {
        Self {
            dict: None,
            two_byte: is_composite(dict),
            first_char: 0,
            widths: Vec::new(),
            missing_width: FALLBACK_GLYPH_WIDTH,
            cid_widths: HashMap::new(),
        }
    }

    /// Character codes of a shown string.
    pub fn codes(&self, bytes: &[u8]) -> Vec<u32> {
        if self.two_byte {
            bytes
                .chunks(2)
                .map(|c| match c {
                    [hi, lo] => (u32::from(*hi) << 8) | u32::from(*lo),
                    [b] => u32::from(*b),
                    _ => 0,
                })
                .collect()
        } else {
            bytes.iter().map(|&b| u32::from(b)).collect()
        }
    }

    /// Glyph advance of `code` in 1/1000 text space units.
    pub fn glyph_width(&self, code: u32) -> f32 {
        if self.two_byte {
            return self
                .cid_widths
                .get(&code)
                .copied()
                .unwrap_or(self.missing_width);
        }

        code.checked_sub(self.first_char)
            .and_then(|i| self.widths.get(i as usize))
            .copied()
            .filter(|w| *w > 0.0)
            .unwrap_or(self.missing_width)
    }

    /// Whether word spacing applies to `code` (single-byte space only).
    pub fn is_word_space(&self, code: u32) -> bool {
        !self.two_byte && code == 32
    }

    /// Decode shown bytes to text using the font encoding when available.
    pub fn decode(&self, doc: &LopdfDocument, bytes: &[u8]) -> String {
        if let Some(dict) = self.dict {
            if let Ok(encoding) = dict.get_font_encoding(doc) {
                if let Ok(text) = LopdfDocument::decode_text(&encoding, bytes) {
                    return text;
                }
            }
        }
        decode_text_simple(bytes)
    }
}

fn is_composite(dict: &Dictionary) -> bool {
    dict.get(b"Subtype")
        .ok()
        .and_then(|o| o.as_name().ok())
        .map(|n| n == b"Type0")
        .unwrap_or(false)
}

fn resolve<'a>(doc: &'a LopdfDocument, obj: &'a Object) -> Option<&'a Object> {
    match obj {
        Object::Reference(id) => doc.get_object(*id).ok(),
        other => Some(other),
    }
}

fn number(doc: &LopdfDocument, obj: &Object) -> Option<f32> {
    match resolve(doc, obj)? {
        Object::Integer(i) => Some(*i as f32),
        Object::Real(r) => Some(*r),
        _ => None,
    }
}

fn array<'a>(doc: &'a LopdfDocument, obj: &'a Object) -> Option<&'a Vec<Object>> {
    match resolve(doc, obj)? {
        Object::Array(arr) => Some(arr),
        _ => None,
    }
}

fn dictionary<'a>(doc: &'a LopdfDocument, obj: &'a Object) -> Option<&'a Dictionary> {
    match resolve(doc, obj)? {
        Object::Dictionary(d) => Some(d),
        _ => None,
    }
}

fn descendant_font<'a>(doc: &'a LopdfDocument, dict: &'a Dictionary) -> Option<&'a Dictionary> {
    let descendants = array(doc, dict.get(b"DescendantFonts").ok()?)?;
    dictionary(doc, descendants.first()?)
}

/// Parse a composite font `/W` array: `c [w1 w2 ...]` and `c_first c_last w` forms.
fn parse_cid_widths(doc: &LopdfDocument, w: &[Object]) -> HashMap<u32, f32> {
    let mut widths = HashMap::new();
    let mut i = 0;

    while i < w.len() {
        let Some(first) = number(doc, &w[i]) else {
            break;
        };
        let first = first.max(0.0) as u32;

        match w.get(i + 1).and_then(|o| resolve(doc, o)) {
            Some(Object::Array(list)) => {
                for (offset, obj) in list.iter().enumerate() {
                    if let Some(width) = number(doc, obj) {
                        widths.insert(first + offset as u32, width);
                    }
                }
                i += 2;
            }
            Some(_) => {
                let last = w.get(i + 1).and_then(|o| number(doc, o));
                let width = w.get(i + 2).and_then(|o| number(doc, o));
                match (last, width) {
                    (Some(last), Some(width)) => {
                        for cid in first..=last.max(0.0) as u32 {
                            widths.insert(cid, width);
                        }
                    }
                    _ => break,
                }
                i += 3;
            }
            None => break,
        }
    }

    widths
}

//! Content-stream interpretation into positioned text fragments.

use std::collections::BTreeMap;

use lopdf::content::Operation;
use lopdf::{Document as LopdfDocument, Object};
use unicode_normalization::UnicodeNormalization;

use super::backend::RenderMode;
use super::fonts::FontMetrics;
use super::lines::TextFragment;

/// Adjustment (thousandths of an em) in a TJ array treated as a word break.
const TJ_SPACE_THRESHOLD: f32 = 200.0;

/// Leading used by `T*` when no `TL` was set.
const DEFAULT_LEADING: f32 = 12.0;

/// Affine transform `[a b c d e f]`.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Matrix {
    a: f32,
    b: f32,
    c: f32,
    d: f32,
    e: f32,
    f: f32,
}

impl Default for Matrix {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Matrix {
    const IDENTITY: Matrix = Matrix {
        a: 1.0,
        b: 0.0,
        c: 0.0,
        d: 1.0,
        e: 0.0,
        f: 0.0,
    };

    fn new(a: f32, b: f32, c: f32, d: f32, e: f32, f: f32) -> Self {
        Self { a, b, c, d, e, f }
    }

    fn translation(tx: f32, ty: f32) -> Self {
        Self::new(1.0, 0.0, 0.0, 1.0, tx, ty)
    }

    /// `self × other` (apply `self` first, then `other`).
    fn multiply(&self, other: &Matrix) -> Matrix {
        Matrix {
            a: self.a * other.a + self.b * other.c,
            b: self.a * other.b + self.b * other.d,
            c: self.c * other.a + self.d * other.c,
            d: self.c * other.b + self.d * other.d,
            e: self.e * other.a + self.f * other.c + other.e,
            f: self.e * other.b + self.f * other.d + other.f,
        }
    }

    fn horizontal_scale(&self) -> f32 {
        (self.a * self.a + self.b * self.b).sqrt()
    }

    fn vertical_scale(&self) -> f32 {
        (self.c * self.c + self.d * self.d).sqrt()
    }
}

/// Text state parameters (PDF 32000-1, 9.3).
#[derive(Debug, Clone)]
struct TextState {
    font: Vec<u8>,
    font_size: f32,
    char_spacing: f32,
    word_spacing: f32,
    horizontal_scaling: f32,
    leading: f32,
}

impl Default for TextState {
    fn default() -> Self {
        Self {
            font: Vec::new(),
            font_size: 12.0,
            char_spacing: 0.0,
            word_spacing: 0.0,
            horizontal_scaling: 1.0,
            leading: DEFAULT_LEADING,
        }
    }
}

/// Walks one page's operations and emits text fragments.
pub struct ContentInterpreter<'a> {
    doc: &'a LopdfDocument,
    fonts: &'a BTreeMap<Vec<u8>, FontMetrics<'a>>,
    mode: RenderMode,
}

/// Mutable state while walking the operations.
#[derive(Default)]
struct GraphicsState {
    ctm: Matrix,
    ctm_stack: Vec<Matrix>,
    text_matrix: Matrix,
    line_matrix: Matrix,
    text: TextState,
    in_text_object: bool,
}

impl GraphicsState {
    fn move_line(&mut self, tx: f32, ty: f32) {
        self.line_matrix = Matrix::translation(tx, ty).multiply(&self.line_matrix);
        self.text_matrix = self.line_matrix;
    }

    fn next_line(&mut self) {
        let leading = self.text.leading;
        self.move_line(0.0, -leading);
    }

    fn rendering_matrix(&self) -> Matrix {
        self.text_matrix.multiply(&self.ctm)
    }
}

impl<'a> ContentInterpreter<'a> {
    /// Create a new interpreter over a page's font set.
    pub fn new(
        doc: &'a LopdfDocument,
        fonts: &'a BTreeMap<Vec<u8>, FontMetrics<'a>>,
        mode: RenderMode,
    ) -> Self {
        Self { doc, fonts, mode }
    }

    /// Interpret the operations and return fragments in stream order.
    pub fn run(&self, operations: &[Operation]) -> Vec<TextFragment> {
        let mut state = GraphicsState::default();
        let mut fragments = Vec::new();

        for op in operations {
            let operands = &op.operands;
            match op.operator.as_str() {
                "q" => state.ctm_stack.push(state.ctm),
                "Q" => {
                    if let Some(ctm) = state.ctm_stack.pop() {
                        state.ctm = ctm;
                    }
                }
                "cm" => {
                    if let Some(m) = matrix_operand(operands) {
                        state.ctm = m.multiply(&state.ctm);
                    }
                }
                "BT" => {
                    state.in_text_object = true;
                    state.text_matrix = Matrix::IDENTITY;
                    state.line_matrix = Matrix::IDENTITY;
                }
                "ET" => {
                    state.in_text_object = false;
                }
                "Tf" => {
                    if operands.len() >= 2 {
                        if let Object::Name(name) = &operands[0] {
                            state.text.font = name.clone();
                        }
                        state.text.font_size = get_number(&operands[1]).unwrap_or(12.0);
                    }
                }
                "Tc" => {
                    if let Some(v) = operands.first().and_then(get_number) {
                        state.text.char_spacing = v;
                    }
                }
                "Tw" => {
                    if let Some(v) = operands.first().and_then(get_number) {
                        state.text.word_spacing = v;
                    }
                }
                "Tz" => {
                    if let Some(v) = operands.first().and_then(get_number) {
                        state.text.horizontal_scaling = v / 100.0;
                    }
                }
                "TL" => {
                    if let Some(v) = operands.first().and_then(get_number) {
                        state.text.leading = v;
                    }
                }
                "Td" | "TD" => {
                    if operands.len() >= 2 {
                        let tx = get_number(&operands[0]).unwrap_or(0.0);
                        let ty = get_number(&operands[1]).unwrap_or(0.0);
                        if op.operator == "TD" {
                            state.text.leading = -ty;
                        }
                        state.move_line(tx, ty);
                    }
                }
                "Tm" => {
                    if let Some(m) = matrix_operand(operands) {
                        state.text_matrix = m;
                        state.line_matrix = m;
                    }
                }
                "T*" => state.next_line(),
                "Tj" => {
                    if let Some(Object::String(bytes, _)) = operands.first() {
                        self.show(&mut state, &[ShowItem::Bytes(bytes)], &mut fragments);
                    }
                }
                "TJ" => {
                    if let Some(Object::Array(arr)) = operands.first() {
                        let items: Vec<ShowItem> = arr
                            .iter()
                            .filter_map(|item| match item {
                                Object::String(bytes, _) => Some(ShowItem::Bytes(bytes)),
                                other => get_number(other).map(ShowItem::Adjust),
                            })
                            .collect();
                        self.show(&mut state, &items, &mut fragments);
                    }
                }
                "'" => {
                    state.next_line();
                    if let Some(Object::String(bytes, _)) = operands.first() {
                        self.show(&mut state, &[ShowItem::Bytes(bytes)], &mut fragments);
                    }
                }
                "\"" => {
                    if operands.len() >= 3 {
                        if let Some(aw) = get_number(&operands[0]) {
                            state.text.word_spacing = aw;
                        }
                        if let Some(ac) = get_number(&operands[1]) {
                            state.text.char_spacing = ac;
                        }
                        state.next_line();
                        if let Object::String(bytes, _) = &operands[2] {
                            self.show(&mut state, &[ShowItem::Bytes(bytes)], &mut fragments);
                        }
                    }
                }
                _ => {}
            }
        }

        fragments
    }

    /// Show a string (or TJ array) as one fragment and advance the text matrix.
    fn show(&self, state: &mut GraphicsState, items: &[ShowItem<'_>], out: &mut Vec<TextFragment>) {
        if !state.in_text_object {
            return;
        }

        let fallback;
        let font = match self.fonts.get(&state.text.font) {
            Some(font) => font,
            None => {
                fallback = FontMetrics::system(&lopdf::Dictionary::new());
                &fallback
            }
        };

        let origin = state.rendering_matrix();
        let size = state.text.font_size;
        let th = state.text.horizontal_scaling;

        let mut text = String::new();
        // Advance in unscaled text space units
        let mut advance = 0.0f32;

        for item in items {
            match item {
                ShowItem::Bytes(bytes) => {
                    text.push_str(&font.decode(self.doc, bytes));
                    for code in font.codes(bytes) {
                        let mut tx = font.glyph_width(code) / 1000.0 * size
                            + state.text.char_spacing;
                        if font.is_word_space(code) {
                            tx += state.text.word_spacing;
                        }
                        advance += tx * th;
                    }
                }
                ShowItem::Adjust(n) => {
                    advance -= n / 1000.0 * size * th;
                    if -n > TJ_SPACE_THRESHOLD && needs_space(&text) {
                        text.push(' ');
                    }
                }
            }
        }

        state.text_matrix = Matrix::translation(advance, 0.0).multiply(&state.text_matrix);

        let text: String = match self.mode {
            RenderMode::Full => text.nfkc().collect(),
            RenderMode::Reduced => text,
        };
        if text.trim().is_empty() {
            return;
        }

        let width = advance * origin.horizontal_scale();
        let height = size * origin.vertical_scale();
        out.push(TextFragment::new(text, origin.e, origin.f, width.abs(), height.abs()));
    }
}

/// One element of a show operation.
enum ShowItem<'b> {
    Bytes(&'b [u8]),
    Adjust(f32),
}

fn needs_space(text: &str) -> bool {
    match text.chars().last() {
        Some(c) => !c.is_whitespace() && !is_spaceless_script_char(c),
        None => false,
    }
}

fn matrix_operand(operands: &[Object]) -> Option<Matrix> {
    if operands.len() < 6 {
        return None;
    }
    let n: Vec<f32> = operands[..6].iter().filter_map(get_number).collect();
    if n.len() != 6 {
        return None;
    }
    Some(Matrix::new(n[0], n[1], n[2], n[3], n[4], n[5]))
}

/// Helper to extract number from PDF object.
fn get_number(obj: &Object) -> Option<f32> {
    match obj {
        Object::Integer(i) => Some(*i as f32),
        Object::Real(r) => Some(*r),
        _ => None,
    }
}

/// Check if character is from a script that doesn't use word spaces.
fn is_spaceless_script_char(c: char) -> bool {
    let code = c as u32;

    // CJK Unified Ideographs and Extension A
    (0x4E00..=0x9FFF).contains(&code)
    || (0x3400..=0x4DBF).contains(&code)
    // Hiragana, Katakana
    || (0x3040..=0x30FF).contains(&code)
    // CJK Symbols and Punctuation
    || (0x3000..=0x303F).contains(&code)
}

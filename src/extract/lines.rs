//! Line reconstruction from positioned text fragments.
//!
//! Fragments arrive in content-stream order. A new line starts whenever the
//! baseline moves by more than `max(height, 4) * 0.6` from the previous
//! fragment; fragments of one line are then ordered left to right and
//! joined, with a space wherever the horizontal gap exceeds 3 units.

/// Minimum height used for the baseline threshold.
const MIN_FRAGMENT_HEIGHT: f32 = 4.0;

/// Fraction of the fragment height the baseline may drift within one line.
const BASELINE_TOLERANCE: f32 = 0.6;

/// Horizontal gap (in user-space units) above which fragments are separated by a space.
const WORD_GAP: f32 = 3.0;

/// A positioned run of text on a page.
#[derive(Debug, Clone, PartialEq)]
pub struct TextFragment {
    /// The text content
    pub text: String,
    /// X position (left edge)
    pub x: f32,
    /// Y position (baseline)
    pub y: f32,
    /// Advance width of the text
    pub width: f32,
    /// Height, i.e. the effective font size
    pub height: f32,
}

impl TextFragment {
    /// Create a new text fragment.
    pub fn new(text: impl Into<String>, x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            text: text.into(),
            x,
            y,
            width,
            height,
        }
    }

    /// Right edge of the fragment.
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    fn baseline_threshold(&self) -> f32 {
        self.height.max(MIN_FRAGMENT_HEIGHT) * BASELINE_TOLERANCE
    }
}

/// Group one page's fragments into lines of text.
///
/// Fragments whose text is blank are skipped. Returned lines are trimmed
/// and never empty.
pub fn group_fragments_into_lines(fragments: Vec<TextFragment>) -> Vec<String> {
    let fragments: Vec<TextFragment> = fragments
        .into_iter()
        .filter(|f| !f.text.trim().is_empty())
        .collect();

    let Some(first) = fragments.first() else {
        return Vec::new();
    };

    let mut lines = Vec::new();
    let mut current: Vec<TextFragment> = Vec::new();
    let mut last_y = first.y;

    for fragment in fragments {
        if (fragment.y - last_y).abs() > fragment.baseline_threshold() && !current.is_empty() {
            push_line(&mut lines, std::mem::take(&mut current));
        }
        last_y = fragment.y;
        current.push(fragment);
    }

    // Don't forget the last line
    if !current.is_empty() {
        push_line(&mut lines, current);
    }

    lines
}

fn push_line(lines: &mut Vec<String>, fragments: Vec<TextFragment>) {
    let text = merge_line(fragments);
    if !text.is_empty() {
        lines.push(text);
    }
}

/// Merge the fragments of one line into its text.
pub fn merge_line(mut fragments: Vec<TextFragment>) -> String {
    // Stable sort keeps source order for fragments sharing an x offset
    fragments.sort_by(|a, b| a.x.partial_cmp(&b.x).unwrap_or(std::cmp::Ordering::Equal));

    let mut result = String::new();
    for (i, fragment) in fragments.iter().enumerate() {
        if i > 0 {
            let gap = fragment.x - fragments[i - 1].right();
            if gap > WORD_GAP {
                result.push(' ');
            }
        }
        result.push_str(&fragment.text);
    }

    result.trim().to_string()
}

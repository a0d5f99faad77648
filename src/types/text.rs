use crate::types::FontMetrics;

/// baseline-to-baseline distance as a multiple of the font size
pub const LEADING_FACTOR: f32 = 1.2;

/// Places the lines of a multi-line block so the block is vertically centered on a point.
///
/// The block spans from the first line's ascent down to the last line's descent, so fonts with
/// a deep descender do not push the text visually upwards.
/// ```text
/// Example
/// let aligner = TextBlockAligner::new(metrics, 10.0); // FontMetrics, font size
/// let baselines: Vec<f32> = aligner.line_y_positions(3, cell_center_y).collect();
/// ```
#[derive(Debug,Clone,Copy,PartialEq)]
pub struct TextBlockAligner {
    pub ascent: f32,
    pub descent: f32,
    pub leading: f32,
}

impl TextBlockAligner {
    pub fn new(metrics: FontMetrics, font_size: f32) -> Self {
        TextBlockAligner {
            ascent: metrics.ascent,
            descent: metrics.descent,
            leading: font_size * LEADING_FACTOR,
        }
    }

    /// total height of a `line_count` line block
    pub fn block_height(&self, line_count: usize) -> f32 {
        let gaps = line_count.saturating_sub(1) as f32;
        self.ascent + gaps * self.leading + self.descent
    }

    /// baselines from the top line down, one per line
    pub fn line_y_positions(&self, line_count: usize, center_y: f32) -> LineYPositions {
        LineYPositions {
            first: center_y + self.block_height(line_count) / 2.0 - self.ascent,
            leading: self.leading,
            index: 0,
            count: line_count,
        }
    }
}

#[derive(Debug,Clone)]
pub struct LineYPositions {
    first: f32,
    leading: f32,
    index: usize,
    count: usize,
}

impl Iterator for LineYPositions {
    type Item = f32;

    fn next(&mut self) -> Option<Self::Item> {
        if self.index >= self.count {
            return None;
        }

        let baseline = self.first - self.index as f32 * self.leading;
        self.index += 1;

        Some(baseline)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.count - self.index;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for LineYPositions {}

/// Splits an item into its display lines. Any run of `/` or `\` is one manual line break;
/// leading or trailing markers produce an empty first or last line.
pub fn split_item_lines(item: &str) -> Vec<&str> {
    let is_marker = |ch: char| ch == '/' || ch == '\\';
    let mut lines = Vec::new();
    let mut start = 0;
    let mut in_marker_run = false;

    for (index, ch) in item.char_indices() {
        if is_marker(ch) {
            if !in_marker_run {
                lines.push(&item[start..index]);
                in_marker_run = true;
            }
            start = index + ch.len_utf8();
        } else {
            in_marker_run = false;
        }
    }

    lines.push(&item[start..]);
    lines
}

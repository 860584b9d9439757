use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// Display width in terminal cells. Tabs count as 4 cells.
pub fn display_width(s: &str) -> usize {
    s.split('\t')
        .enumerate()
        .map(|(i, part)| {
            let w = UnicodeWidthStr::width(part);
            if i > 0 { w + 4 } else { w }
        })
        .sum()
}

/// Truncate a string to fit within `max_cells` terminal cells, appending `…` if truncated.
pub fn truncate_to_width(s: &str, max_cells: usize) -> String {
    if max_cells == 0 {
        return String::new();
    }
    if display_width(s) <= max_cells {
        return s.to_string();
    }
    if max_cells <= 1 {
        return "\u{2026}".to_string();
    }
    let budget = max_cells - 1; // reserve 1 cell for '…'
    let mut width = 0;
    let mut result = String::new();
    for grapheme in s.graphemes(true) {
        let gw = display_width(grapheme);
        if width + gw > budget {
            break;
        }
        width += gw;
        result.push_str(grapheme);
    }
    result.push('\u{2026}');
    result
}

/// The longest suffix of `s` that fits in `max_cells`, prefixed with `…` when cut.
/// Used for single-line inputs where the end of the text is the interesting part.
pub fn tail_to_width(s: &str, max_cells: usize) -> String {
    if display_width(s) <= max_cells {
        return s.to_string();
    }
    if max_cells <= 1 {
        return "\u{2026}".repeat(max_cells);
    }
    let budget = max_cells - 1;
    let mut width = 0;
    let mut kept: Vec<&str> = Vec::new();
    for grapheme in s.graphemes(true).rev() {
        let gw = display_width(grapheme);
        if width + gw > budget {
            break;
        }
        width += gw;
        kept.push(grapheme);
    }
    kept.reverse();
    format!("\u{2026}{}", kept.concat())
}

/// Remove the last grapheme cluster. Returns false if `s` was empty.
pub fn pop_grapheme(s: &mut String) -> bool {
    match s.grapheme_indices(true).next_back() {
        Some((i, _)) => {
            s.truncate(i);
            true
        }
        None => false,
    }
}

/// Remove trailing whitespace and then the last whitespace-delimited word.
pub fn pop_word(s: &mut String) {
    let trimmed = s.trim_end().len();
    s.truncate(trimmed);
    let start = s
        .char_indices()
        .rev()
        .find(|(_, c)| c.is_whitespace())
        .map_or(0, |(i, c)| i + c.len_utf8());
    s.truncate(start);
}

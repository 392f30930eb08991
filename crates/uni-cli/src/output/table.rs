//! Plain aligned tables for terminal output.

#[derive(Clone, Copy, Debug, Default)]
pub struct TableOptions {
    pub max_width: Option<usize>,
    pub color: bool,
}

const MIN_COLUMN: usize = 4;
const GAP: &str = "  ";

/// Render `rows` under `headers`. Numeric cells are right-aligned and the
/// widest columns shrink first when `max_width` is exceeded.
#[must_use]
pub fn render_table(headers: &[&str], rows: &[Vec<String>], options: TableOptions) -> String {
    let mut widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(index, header)| {
            rows.iter()
                .filter_map(|row| row.get(index))
                .map(|cell| display_width(cell))
                .chain(std::iter::once(display_width(header)))
                .max()
                .unwrap_or(0)
                .max(MIN_COLUMN)
        })
        .collect();
    shrink_to_fit(&mut widths, options.max_width);

    let mut lines = Vec::with_capacity(rows.len() + 2);
    let header_line = headers
        .iter()
        .zip(&widths)
        .map(|(header, width)| pad(&clip(header, *width), *width, false))
        .collect::<Vec<_>>()
        .join(GAP);
    lines.push(header_line.trim_end().to_string());
    lines.push("-".repeat(widths.iter().sum::<usize>() + GAP.len() * widths.len().saturating_sub(1)));

    for row in rows {
        let line = widths
            .iter()
            .enumerate()
            .map(|(index, width)| {
                let cell = row.get(index).map_or("-", String::as_str);
                let clipped = clip(cell, *width);
                let padded = pad(&clipped, *width, is_numeric(&clipped));
                if options.color {
                    paint(&padded, &clipped)
                } else {
                    padded
                }
            })
            .collect::<Vec<_>>()
            .join(GAP);
        lines.push(line.trim_end().to_string());
    }
    lines.join("\n")
}

/// Terminal columns taken by `text`: Hangul and other CJK glyphs are double width.
pub fn display_width(text: &str) -> usize {
    text.chars().map(|ch| if is_wide(ch) { 2 } else { 1 }).sum()
}

const fn is_wide(ch: char) -> bool {
    matches!(ch as u32,
        0x1100..=0x115F | 0x2E80..=0xA4CF | 0xAC00..=0xD7A3 | 0xF900..=0xFAFF | 0xFF00..=0xFF60)
}

fn shrink_to_fit(widths: &mut [usize], max_width: Option<usize>) {
    let Some(max_width) = max_width else {
        return;
    };
    let gaps = GAP.len() * widths.len().saturating_sub(1);
    while widths.iter().sum::<usize>() + gaps > max_width {
        let Some(widest) = widths
            .iter_mut()
            .filter(|width| **width > MIN_COLUMN)
            .max_by_key(|width| **width)
        else {
            break;
        };
        *widest -= 1;
    }
}

fn clip(text: &str, width: usize) -> String {
    if display_width(text) <= width {
        return text.to_string();
    }
    let mut out = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let w = if is_wide(ch) { 2 } else { 1 };
        if used + w + 1 > width {
            break;
        }
        out.push(ch);
        used += w;
    }
    out.push('…');
    out
}

fn pad(text: &str, width: usize, right: bool) -> String {
    let fill = " ".repeat(width.saturating_sub(display_width(text)));
    if right {
        format!("{fill}{text}")
    } else {
        format!("{text}{fill}")
    }
}

fn is_numeric(text: &str) -> bool {
    let text = text.trim().trim_end_matches('%');
    !text.is_empty()
        && text
            .chars()
            .all(|ch| ch.is_ascii_digit() || matches!(ch, '-' | '.' | ','))
}

fn paint(padded: &str, value: &str) -> String {
    let code = match value.to_ascii_lowercase().as_str() {
        "true" | "admin" | "ok" => "32",
        "false" | "null" | "-" => "2",
        _ => return padded.to_string(),
    };
    format!("\u{1b}[{code}m{padded}\u{1b}[0m")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn cells(values: &[&str]) -> Vec<String> {
        values.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn numbers_align_right_text_left() {
        let table = render_table(
            &["name", "count"],
            &[cells(&["EE", "7"]), cells(&["Physics", "1,204"])],
            TableOptions::default(),
        );
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines[0], "name     count");
        assert!(lines[1].chars().all(|c| c == '-'));
        assert_eq!(lines[2], "EE           7");
        assert_eq!(lines[3], "Physics  1,204");
    }

    #[test]
    fn hangul_counts_double() {
        assert_eq!(display_width("재학"), 4);
        assert_eq!(display_width("EE"), 2);
        let table = render_table(&["status"], &[cells(&["재학생"])], TableOptions::default());
        assert!(table.lines().nth(1).is_some_and(|l| l.len() == 6));
    }

    #[test]
    fn narrow_terminal_clips_widest_column() {
        let table = render_table(
            &["id", "title"],
            &[cells(&["1", "a very long publication title indeed"])],
            TableOptions {
                max_width: Some(20),
                color: false,
            },
        );
        let row = table.lines().nth(2).unwrap_or_default();
        assert!(row.ends_with('…'));
        assert!(display_width(row) <= 20);
    }

    #[test]
    fn missing_cells_render_as_dash() {
        let table = render_table(&["a", "b"], &[cells(&["x"])], TableOptions::default());
        assert!(table.lines().nth(2).is_some_and(|l| l.trim_end().ends_with('-')));
    }
}

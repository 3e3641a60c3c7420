#[derive(Clone, Copy, Debug)]
pub struct TableOptions {
    pub max_width: Option<usize>,
    pub color: bool,
}

const MIN_COLUMN_WIDTH: usize = 6;

fn text_width(value: &str) -> usize {
    value.chars().count()
}

/// Render a simple aligned table for string rows.
#[must_use]
pub fn render_entity_table(
    headers: &[&str],
    rows: &[Vec<String>],
    options: TableOptions,
) -> String {
    let mut widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(index, header)| {
            rows.iter()
                .filter_map(|row| row.get(index))
                .map(|cell| text_width(cell))
                .max()
                .unwrap_or(0)
                .max(text_width(header))
                .max(MIN_COLUMN_WIDTH)
        })
        .collect();

    fit_widths(&mut widths, headers, options.max_width);

    let header_line = headers
        .iter()
        .zip(widths.iter())
        .map(|(header, width)| format_cell(&truncate_text(header, *width), *width, false, false))
        .collect::<Vec<_>>()
        .join("  ");

    let divider = "-".repeat(text_width(&header_line));

    let row_lines = rows.iter().map(|row| {
        widths
            .iter()
            .enumerate()
            .map(|(index, width)| {
                let value = row.get(index).map_or("-", String::as_str);
                let truncated = truncate_text(value, *width);
                let numeric = looks_numeric(&truncated);
                let cell = if options.color {
                    colorize_flag(&truncated)
                } else {
                    truncated
                };
                format_cell(&cell, *width, numeric, options.color)
            })
            .collect::<Vec<_>>()
            .join("  ")
    });

    let mut lines = Vec::with_capacity(2 + rows.len());
    lines.push(header_line);
    lines.push(divider);
    lines.extend(row_lines);
    lines.join("\n")
}

fn fit_widths(widths: &mut [usize], headers: &[&str], max_width: Option<usize>) {
    let Some(max_width) = max_width else {
        return;
    };

    let separators = widths.len().saturating_sub(1) * 2;
    let mut total = widths.iter().sum::<usize>() + separators;

    while total > max_width {
        let candidate = widths
            .iter()
            .enumerate()
            .filter(|(idx, width)| **width > text_width(headers[*idx]).max(MIN_COLUMN_WIDTH))
            .max_by_key(|(_, width)| **width)
            .map(|(idx, _)| idx);

        let Some(idx) = candidate else {
            break;
        };

        widths[idx] -= 1;
        total -= 1;
    }
}

fn truncate_text(value: &str, width: usize) -> String {
    if text_width(value) <= width {
        return value.to_string();
    }
    if width <= 1 {
        return "…".to_string();
    }

    let mut out: String = value.chars().take(width - 1).collect();
    out.push('…');
    out
}

fn looks_numeric(value: &str) -> bool {
    let trimmed = value.trim();
    !trimmed.is_empty()
        && trimmed
            .chars()
            .all(|ch| ch.is_ascii_digit() || matches!(ch, '-' | '+' | '.' | ','))
        && trimmed.chars().any(|ch| ch.is_ascii_digit())
}

fn format_cell(value: &str, width: usize, numeric: bool, has_ansi: bool) -> String {
    let plain_len = if has_ansi {
        text_width(&strip_ansi(value))
    } else {
        text_width(value)
    };
    let pad = width.saturating_sub(plain_len);
    if numeric {
        format!("{}{}", " ".repeat(pad), value)
    } else {
        format!("{}{}", value, " ".repeat(pad))
    }
}

/// Highlight urgency tiers, recommendation tiers and booleans.
fn colorize_flag(value: &str) -> String {
    let code = match value {
        "immediate" | "high" | "optimal" | "true" => Some("32"),
        "moderate" | "recommended" | "suitable" | "conditional" => Some("33"),
        "low" | "minimal" | "specialist_review" | "false" | "default" => Some("31"),
        _ => None,
    };

    match code {
        Some(code) => format!("\u{1b}[{code}m{value}\u{1b}[0m"),
        None => value.to_string(),
    }
}

fn strip_ansi(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut chars = value.chars().peekable();
    while let Some(ch) = chars.next() {
        if ch == '\u{1b}' && chars.peek() == Some(&'[') {
            let _ = chars.next();
            for next in chars.by_ref() {
                if next == 'm' {
                    break;
                }
            }
            continue;
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::{
        TableOptions, fit_widths, format_cell, render_entity_table, strip_ansi, truncate_text,
    };

    #[test]
    fn truncates_multibyte_text_on_char_boundaries() {
        assert_eq!(truncate_text("その他の歯列問題", 5), "その他の…");
        assert_eq!(truncate_text("叢生", 6), "叢生");
    }

    #[test]
    fn numbers_are_right_aligned() {
        assert_eq!(format_cell("42", 6, true, false), "    42");
        assert_eq!(format_cell("risk", 6, false, false), "risk  ");
    }

    #[test]
    fn widths_shrink_to_fit_terminal() {
        let mut widths = vec![6, 30];
        fit_widths(&mut widths, &["code", "description"], Some(24));
        assert_eq!(widths, vec![6, 16]);
    }

    #[test]
    fn colored_cells_keep_alignment() {
        let rows = vec![vec!["high".to_string()], vec!["n/a".to_string()]];
        let table = render_entity_table(
            &["urgency"],
            &rows,
            TableOptions {
                max_width: None,
                color: true,
            },
        );
        let plain: Vec<String> = table.lines().map(strip_ansi).collect();
        assert_eq!(plain[2], "high   ");
        assert_eq!(plain[3], "n/a    ");
    }
}

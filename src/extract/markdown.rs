//! Small markdown building blocks shared by the format extractors.

/// Render rows as a markdown table. The first row is treated as the header;
/// shorter data rows are padded to the header width, longer rows keep their
/// extra cells.
pub fn table(rows: &[Vec<String>]) -> String {
    let Some(header) = rows.first() else {
        return String::new();
    };

    let mut out = String::new();
    out.push_str("| ");
    out.push_str(&header.join(" | "));
    out.push_str(" |\n| ");
    out.push_str(&vec!["---"; header.len()].join(" | "));
    out.push_str(" |\n");

    for row in &rows[1..] {
        let mut padded: Vec<&str> = row.iter().map(String::as_str).collect();
        if padded.len() < header.len() {
            padded.resize(header.len(), "");
        }
        out.push_str("| ");
        out.push_str(&padded.join(" | "));
        out.push_str(" |\n");
    }

    out
}

/// Collapse all runs of whitespace (including newlines) to single spaces.
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// A markdown heading of the given level, clamped to the 1-6 range.
pub fn heading(level: usize, text: &str) -> String {
    let level = level.clamp(1, 6);
    format!("{} {}\n\n", "#".repeat(level), text.trim())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn table_pads_short_rows_to_header_width() {
        let rows = vec![row(&["a", "b", "c"]), row(&["1"])];
        let md = table(&rows);
        assert_eq!(
            md,
            "| a | b | c |\n| --- | --- | --- |\n| 1 |  |  |\n"
        );
    }

    #[test]
    fn table_keeps_cells_beyond_the_header_width() {
        let rows = vec![row(&["a", "b"]), row(&["1", "2", "3"])];
        let md = table(&rows);
        assert_eq!(md, "| a | b |\n| --- | --- |\n| 1 | 2 | 3 |\n");
    }

    #[test]
    fn table_of_nothing_is_empty() {
        assert_eq!(table(&[]), "");
    }

    #[test]
    fn collapse_whitespace_flattens_newlines_and_tabs() {
        assert_eq!(collapse_whitespace("a\n\n b\t\tc  "), "a b c");
    }

    #[test]
    fn heading_clamps_level() {
        assert_eq!(heading(9, "deep"), "###### deep\n\n");
        assert_eq!(heading(0, "top"), "# top\n\n");
    }
}

//! Word (.docx) extractor: paragraph walk with heading-style mapping, plus
//! body tables rendered as markdown tables.

use docx_rs::{
    DocumentChild, Paragraph, ParagraphChild, RunChild, Table, TableCellContent, TableChild,
    TableRowChild,
};
use tracing::debug;

use super::markdown;
use super::{ExtractError, ExtractResult, Extraction};

pub fn extract(filename: &str, data: &[u8]) -> ExtractResult {
    let doc = docx_rs::read_docx(data).map_err(|e| ExtractError::parse(filename, e))?;

    let mut content = format!("# Document: {}\n\n", filename);
    let mut tables: Vec<Vec<Vec<String>>> = Vec::new();
    let mut paragraphs = 0usize;

    for child in &doc.document.children {
        match child {
            DocumentChild::Paragraph(para) => {
                let text = paragraph_text(para);
                if text.is_empty() {
                    continue;
                }
                paragraphs += 1;
                match heading_level(para) {
                    Some(level) => content.push_str(&markdown::heading(level, &text)),
                    None => {
                        content.push_str(&text);
                        content.push_str("\n\n");
                    }
                }
            }
            DocumentChild::Table(table) => tables.push(table_rows(table)),
            _ => {}
        }
    }

    for (index, rows) in tables.iter().enumerate() {
        if rows.is_empty() {
            continue;
        }
        content.push_str(&format!("\n**Table {}**\n\n", index + 1));
        content.push_str(&markdown::table(rows));
        content.push('\n');
    }

    debug!(filename, paragraphs, tables = tables.len(), "Word document extracted");

    if paragraphs == 0 && tables.is_empty() {
        return Ok(Extraction::Empty);
    }
    Ok(Extraction::from_text(content))
}

fn paragraph_text(para: &Paragraph) -> String {
    let mut text = String::new();
    for child in &para.children {
        if let ParagraphChild::Run(run) = child {
            for run_child in &run.children {
                if let RunChild::Text(t) = run_child {
                    text.push_str(&t.text);
                }
            }
        }
    }
    text.trim().to_string()
}

/// Map a `Heading<N>` paragraph style to a markdown heading level. Styles named
/// `Heading` without a digit fall back to level 2, as do unparsable suffixes.
fn heading_level(para: &Paragraph) -> Option<usize> {
    let style = para.property.style.as_ref()?;
    let name = style.val.as_str();
    if !name.starts_with("Heading") {
        return None;
    }
    let suffix = name.trim_start_matches("Heading").trim();
    Some(suffix.parse::<usize>().unwrap_or(2).min(6))
}

fn table_rows(table: &Table) -> Vec<Vec<String>> {
    let mut rows = Vec::new();
    for row in &table.rows {
        let TableChild::TableRow(row) = row;
        let mut cells = Vec::new();
        for cell in &row.cells {
            let TableRowChild::TableCell(cell) = cell;
            let mut cell_text = Vec::new();
            for child in &cell.children {
                if let TableCellContent::Paragraph(para) = child {
                    let text = paragraph_text(para);
                    if !text.is_empty() {
                        cell_text.push(text);
                    }
                }
            }
            cells.push(cell_text.join(" "));
        }
        rows.push(cells);
    }
    rows
}

//! CSV extractor: full table rendered as markdown with a row/column summary.

use tracing::debug;

use super::markdown;
use super::{ExtractError, ExtractResult, Extraction};

pub fn extract(filename: &str, data: &[u8]) -> ExtractResult {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(data);

    let mut rows: Vec<Vec<String>> = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| ExtractError::parse(filename, e))?;
        rows.push(record.iter().map(|field| field.to_string()).collect());
    }

    if rows.is_empty() {
        debug!(filename, "CSV file is empty");
        return Ok(Extraction::Empty);
    }

    let columns = rows[0].len();
    let data_rows = rows.len() - 1;

    let mut content = format!("# CSV Data: {}\n\n", filename);
    content.push_str(&markdown::table(&rows));
    content.push_str(&format!(
        "\nTable summary: {} rows and {} columns of data.\n",
        data_rows, columns
    ));

    debug!(filename, rows = data_rows, columns, "CSV converted to markdown table");
    Ok(Extraction::from_text(content))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_markdown_table_with_summary() {
        let data = b"name,age\nalice,30\nbob,25\n";
        let text = extract("people.csv", data)
            .expect("extract")
            .into_text()
            .expect("non-empty");

        assert!(text.starts_with("# CSV Data: people.csv"));
        assert!(text.contains("| name | age |"));
        assert!(text.contains("| --- | --- |"));
        assert!(text.contains("| alice | 30 |"));
        assert!(text.contains("| bob | 25 |"));
        assert!(text.contains("Table summary: 2 rows and 2 columns of data."));
    }

    #[test]
    fn ragged_rows_are_padded_to_the_header() {
        let data = b"a,b,c\n1\n";
        let text = extract("ragged.csv", data)
            .expect("extract")
            .into_text()
            .expect("non-empty");
        assert!(text.contains("| 1 |  |  |"));
    }

    #[test]
    fn empty_file_is_tagged_empty() {
        assert_eq!(extract("nothing.csv", b"").expect("extract"), Extraction::Empty);
    }
}

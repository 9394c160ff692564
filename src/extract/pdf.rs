//! PDF extractor: per-page text with whitespace normalization.

use tracing::{debug, warn};

use super::markdown;
use super::{ExtractError, ExtractResult, Extraction};

pub fn extract(filename: &str, data: &[u8]) -> ExtractResult {
    let doc = lopdf::Document::load_mem(data).map_err(|e| ExtractError::parse(filename, e))?;

    let pages = doc.get_pages();
    debug!(filename, pages = pages.len(), "PDF opened");

    let mut content = format!("# Document: {}\n\n", filename);
    let mut extracted_any = false;

    for page_number in pages.keys() {
        let page_text = match doc.extract_text(&[*page_number]) {
            Ok(text) => markdown::collapse_whitespace(&text),
            Err(e) => {
                warn!(filename, page = page_number, error = %e, "Failed to extract page text");
                continue;
            }
        };

        if !page_text.is_empty() {
            content.push_str(&format!("## Page {}\n\n{}\n\n", page_number, page_text));
            extracted_any = true;
        }
    }

    // Some PDFs defeat lopdf's per-page extraction; fall back to a
    // whole-document pass before declaring the file empty.
    if !extracted_any {
        if let Ok(text) = pdf_extract::extract_text_from_mem(data) {
            let text = markdown::collapse_whitespace(&text);
            if !text.is_empty() {
                content.push_str(&format!("## Contents\n\n{}\n", text));
                extracted_any = true;
            }
        }
    }

    if !extracted_any {
        return Ok(Extraction::Empty);
    }
    Ok(Extraction::from_text(content))
}

#[cfg(test)]
mod tests {
    use super::*;
    use lopdf::content::{Content, Operation};
    use lopdf::{dictionary, Document, Object, Stream};

    fn sample_pdf(text: &str) -> Vec<u8> {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();
        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Courier",
        });
        let resources_id = doc.add_object(dictionary! {
            "Font" => dictionary! { "F1" => font_id },
        });
        let content = Content {
            operations: vec![
                Operation::new("BT", vec![]),
                Operation::new("Tf", vec!["F1".into(), 48.into()]),
                Operation::new("Td", vec![100.into(), 600.into()]),
                Operation::new("Tj", vec![Object::string_literal(text)]),
                Operation::new("ET", vec![]),
            ],
        };
        let content_id = doc.add_object(Stream::new(
            dictionary! {},
            content.encode().expect("encode content"),
        ));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        let pages = dictionary! {
            "Type" => "Pages",
            "Kids" => vec![page_id.into()],
            "Count" => 1,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
        };
        doc.objects.insert(pages_id, Object::Dictionary(pages));
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        let mut bytes = Vec::new();
        doc.save_to(&mut bytes).expect("save pdf");
        bytes
    }

    #[test]
    fn extracts_page_text_as_markdown_sections() {
        let bytes = sample_pdf("Hello World!");
        let text = extract("sample.pdf", &bytes)
            .expect("extract")
            .into_text()
            .expect("non-empty");

        assert!(text.starts_with("# Document: sample.pdf"));
        assert!(text.contains("## Page 1"));
        assert!(text.contains("Hello World!"));
    }

    #[test]
    fn malformed_bytes_are_a_parse_error() {
        let err = extract("broken.pdf", b"not a pdf at all").unwrap_err();
        assert!(matches!(err, ExtractError::Parse { .. }));
    }
}

//! PowerPoint (.pptx) extractor: per-slide walk over the OOXML slide parts,
//! emitting slide titles, bulleted shape text, and embedded tables.

use quick_xml::events::Event;
use quick_xml::Reader;
use std::io::Read;
use tracing::debug;

use super::markdown;
use super::{ExtractError, ExtractResult, Extraction};

pub fn extract(filename: &str, data: &[u8]) -> ExtractResult {
    let cursor = std::io::Cursor::new(data);
    let mut archive =
        zip::ZipArchive::new(cursor).map_err(|e| ExtractError::parse(filename, e))?;

    // Slide parts live at ppt/slides/slideN.xml; the archive does not
    // guarantee numeric order.
    let mut slide_names: Vec<String> = archive
        .file_names()
        .filter(|name| name.starts_with("ppt/slides/slide") && name.ends_with(".xml"))
        .map(|s| s.to_string())
        .collect();
    slide_names.sort_by_key(|name| {
        name.trim_start_matches("ppt/slides/slide")
            .trim_end_matches(".xml")
            .parse::<u32>()
            .unwrap_or(0)
    });

    debug!(filename, slides = slide_names.len(), "PowerPoint opened");

    let mut content = format!("# Presentation: {}\n\n", filename);
    let mut extracted_any = false;

    for (index, slide_name) in slide_names.iter().enumerate() {
        let slide_number = index + 1;
        let mut xml = String::new();
        archive
            .by_name(slide_name)
            .map_err(|e| ExtractError::parse(filename, e))?
            .read_to_string(&mut xml)
            .map_err(|e| ExtractError::parse(filename, e))?;

        let slide = parse_slide_xml(&xml);
        if slide.is_blank() {
            continue;
        }
        extracted_any = true;

        content.push_str(&format!("## Slide {}\n\n", slide_number));

        if let Some(title) = &slide.title {
            content.push_str(&markdown::heading(3, title));
        }

        if !slide.lines.is_empty() {
            for line in &slide.lines {
                if line.starts_with('-') || line.starts_with('\u{2022}') {
                    content.push_str(&format!("{}\n", line));
                } else {
                    content.push_str(&format!("- {}\n", line));
                }
            }
            content.push('\n');
        }

        for (table_index, rows) in slide.tables.iter().enumerate() {
            if rows.is_empty() {
                continue;
            }
            content.push_str(&format!(
                "\n**Table {} on Slide {}**\n\n",
                table_index + 1,
                slide_number
            ));
            content.push_str(&markdown::table(rows));
            content.push('\n');
        }

        content.push('\n');
    }

    if !extracted_any {
        return Ok(Extraction::Empty);
    }
    Ok(Extraction::from_text(content))
}

#[derive(Debug, Default)]
struct SlideContent {
    title: Option<String>,
    /// Non-title shape text, one entry per text line.
    lines: Vec<String>,
    tables: Vec<Vec<Vec<String>>>,
}

impl SlideContent {
    fn is_blank(&self) -> bool {
        self.title.is_none() && self.lines.is_empty() && self.tables.is_empty()
    }
}

/// Walk one slide's XML. Text runs live in `<a:t>`; a shape whose placeholder
/// (`<p:ph>`) is typed `title`/`ctrTitle` carries the slide title; tables are
/// `<a:tbl>` with `<a:tr>` rows and `<a:tc>` cells.
fn parse_slide_xml(xml: &str) -> SlideContent {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut slide = SlideContent::default();

    let mut in_shape = false;
    let mut shape_is_title = false;
    let mut shape_lines: Vec<String> = Vec::new();

    let mut in_text = false;
    let mut paragraph = String::new();

    let mut table_depth = 0usize;
    let mut table_rows: Vec<Vec<String>> = Vec::new();
    let mut row_cells: Vec<String> = Vec::new();
    let mut cell_paragraphs: Vec<String> = Vec::new();

    loop {
        let event = match reader.read_event() {
            Ok(event) => event,
            Err(_) => break,
        };
        match event {
            Event::Start(e) => match e.local_name().as_ref() {
                b"sp" => {
                    in_shape = true;
                    shape_is_title = false;
                    shape_lines.clear();
                }
                b"tbl" => {
                    table_depth += 1;
                    table_rows.clear();
                }
                b"tr" if table_depth > 0 => row_cells.clear(),
                b"tc" if table_depth > 0 => cell_paragraphs.clear(),
                b"t" => {
                    in_text = true;
                }
                b"ph" => {
                    if in_shape && placeholder_is_title(&e) {
                        shape_is_title = true;
                    }
                }
                _ => {}
            },
            Event::Empty(e) => {
                if e.local_name().as_ref() == b"ph" && in_shape && placeholder_is_title(&e) {
                    shape_is_title = true;
                }
            }
            Event::Text(e) => {
                if in_text {
                    if let Ok(text) = e.unescape() {
                        paragraph.push_str(&text);
                    }
                }
            }
            Event::End(e) => match e.local_name().as_ref() {
                b"t" => in_text = false,
                b"p" => {
                    let line = paragraph.trim().to_string();
                    paragraph.clear();
                    if line.is_empty() {
                        continue;
                    }
                    if table_depth > 0 {
                        cell_paragraphs.push(line);
                    } else if in_shape {
                        shape_lines.push(line);
                    }
                }
                b"tc" if table_depth > 0 => row_cells.push(cell_paragraphs.join(" ")),
                b"tr" if table_depth > 0 => table_rows.push(std::mem::take(&mut row_cells)),
                b"tbl" => {
                    if table_depth > 0 {
                        table_depth -= 1;
                        slide.tables.push(std::mem::take(&mut table_rows));
                    }
                }
                b"sp" => {
                    in_shape = false;
                    if shape_is_title && slide.title.is_none() && !shape_lines.is_empty() {
                        slide.title = Some(shape_lines.join(" "));
                    } else {
                        slide.lines.append(&mut shape_lines);
                    }
                }
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }
    }

    slide
}

fn placeholder_is_title(e: &quick_xml::events::BytesStart<'_>) -> bool {
    e.attributes().flatten().any(|attr| {
        attr.key.local_name().as_ref() == b"type"
            && matches!(attr.value.as_ref(), b"title" | b"ctrTitle")
    })
}

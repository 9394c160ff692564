//! Context assembly: accumulates extracted document text behind labeled
//! delimiters and formats the resource summary shown after an upload.

/// Append one extracted document's markdown to the session context behind a
/// `--- Content from <name> ---` delimiter. Pure accumulation: no
/// deduplication, no size cap, no chunking.
pub fn append_document(context: &mut String, name: &str, text: &str) {
    context.push_str(&format!("--- Content from {} ---\n{}\n\n", name, text));
}

/// Human-readable summary of the resources a session has accumulated.
pub fn format_resources_message(files: &[String], websites: &[String]) -> String {
    if files.is_empty() && websites.is_empty() {
        return "No documents provided. You can ask general questions.".to_string();
    }

    let mut parts = vec!["Processed resources:".to_string()];

    if !files.is_empty() {
        let label = if files.len() > 1 { "Files:" } else { "File:" };
        parts.push(label.to_string());
        for (i, filename) in files.iter().enumerate() {
            parts.push(format!("{}. {}", i + 1, filename));
        }
    }

    if !websites.is_empty() {
        if !files.is_empty() {
            parts.push(String::new());
        }
        let label = if websites.len() > 1 {
            "Websites:"
        } else {
            "Website:"
        };
        parts.push(label.to_string());
        for (i, url) in websites.iter().enumerate() {
            parts.push(format!("{}. {}", i + 1, url));
        }
    }

    parts.push("\nYou can now ask questions about the content of these resources.".to_string());
    parts.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn documents_accumulate_behind_labeled_delimiters() {
        let mut context = String::new();
        append_document(&mut context, "a.pdf", "first");
        append_document(&mut context, "b.csv", "second");

        assert!(context.contains("--- Content from a.pdf ---\nfirst"));
        assert!(context.contains("--- Content from b.csv ---\nsecond"));
        let first = context.find("a.pdf").unwrap();
        let second = context.find("b.csv").unwrap();
        assert!(first < second);
    }

    #[test]
    fn empty_resources_invite_general_questions() {
        assert_eq!(
            format_resources_message(&[], &[]),
            "No documents provided. You can ask general questions."
        );
    }

    #[test]
    fn summary_numbers_files_and_websites_with_plural_labels() {
        let files = vec!["a.pdf".to_string(), "b.csv".to_string()];
        let websites = vec!["https://example.com".to_string()];
        let message = format_resources_message(&files, &websites);

        assert!(message.starts_with("Processed resources:"));
        assert!(message.contains("Files:\n1. a.pdf\n2. b.csv"));
        assert!(message.contains("Website:\n1. https://example.com"));
        assert!(message.ends_with("You can now ask questions about the content of these resources."));
    }

    #[test]
    fn single_file_uses_singular_label() {
        let files = vec!["only.docx".to_string()];
        let message = format_resources_message(&files, &[]);
        assert!(message.contains("File:\n1. only.docx"));
        assert!(!message.contains("Files:"));
    }
}

//! Text extraction utilities
//!
//! This module handles extraction of plain text from docx-rs paragraph and
//! run elements.

/// Extract plain text from a paragraph, handling various child elements
pub(crate) fn extract_paragraph_text(para: &docx_rs::Paragraph) -> String {
    let mut text = String::new();
    push_children_text(&para.children, &mut text);
    text
}

/// Append the visible text of paragraph children, descending into hyperlinks
fn push_children_text(children: &[docx_rs::ParagraphChild], text: &mut String) {
    for child in children {
        match child {
            docx_rs::ParagraphChild::Run(run) => {
                text.push_str(&extract_run_text(run));
            }
            docx_rs::ParagraphChild::Insert(insert) => {
                // Tracked insertions are part of the visible text
                for child in &insert.children {
                    if let docx_rs::InsertChild::Run(run) = child {
                        text.push_str(&extract_run_text(run));
                    }
                }
            }
            docx_rs::ParagraphChild::Hyperlink(link) => {
                push_children_text(&link.children, text);
            }
            docx_rs::ParagraphChild::Delete(_) => {
                // Skip deletions (track changes)
            }
            _ => {}
        }
    }
}

/// Extract text from a run
pub(crate) fn extract_run_text(run: &docx_rs::Run) -> String {
    let mut text = String::new();

    for child in &run.children {
        match child {
            docx_rs::RunChild::Text(text_elem) => {
                text.push_str(&text_elem.text);
            }
            docx_rs::RunChild::Tab(_) => {
                text.push('\t');
            }
            docx_rs::RunChild::Break(_) => {
                text.push('\n');
            }
            _ => {}
        }
    }

    text
}

/// Plain text of a table cell; paragraphs are joined by newlines
pub(crate) fn extract_cell_text(cell: &docx_rs::TableCell) -> String {
    let paragraphs: Vec<String> = cell
        .children
        .iter()
        .filter_map(|content| match content {
            docx_rs::TableCellContent::Paragraph(para) => Some(extract_paragraph_text(para)),
            _ => None,
        })
        .collect();

    paragraphs.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use docx_rs::{BreakType, Hyperlink, HyperlinkType, Paragraph, Run};

    #[test]
    fn test_paragraph_text_joins_runs() {
        let para = Paragraph::new()
            .add_run(Run::new().add_text("A plain paragraph having some"))
            .add_run(Run::new().add_text("bold").bold());
        assert_eq!(
            extract_paragraph_text(&para),
            "A plain paragraph having somebold"
        );
    }

    #[test]
    fn test_page_break_is_whitespace_only() {
        let para = Paragraph::new().add_run(Run::new().add_break(BreakType::Page));
        assert!(extract_paragraph_text(&para).trim().is_empty());
    }

    #[test]
    fn test_hyperlink_text_is_included() {
        let para = Paragraph::new()
            .add_run(Run::new().add_text("Visit "))
            .add_hyperlink(
                Hyperlink::new("https://example.com", HyperlinkType::External)
                    .add_run(Run::new().add_text("Example site")),
            )
            .add_run(Run::new().add_text(" today"));
        assert_eq!(extract_paragraph_text(&para), "Visit Example site today");
    }

    #[test]
    fn test_hyperlink_only_paragraph_is_not_blank() {
        let para = Paragraph::new().add_hyperlink(
            Hyperlink::new("https://example.com", HyperlinkType::External)
                .add_run(Run::new().add_text("Example site")),
        );
        assert_eq!(extract_paragraph_text(&para), "Example site");
    }
}

//! PDF text extraction, one page at a time.

use std::fmt::Display;

use lopdf::Document;
use playground_core::DocumentError;
use tracing::debug;

/// Extract the text of every page in page order, each followed by a newline.
///
/// A page whose text cannot be extracted contributes an empty line; only a
/// document that cannot be opened at all is an error.
pub(crate) fn extract_text(bytes: &[u8]) -> Result<String, DocumentError> {
    let document = Document::load_mem(bytes).map_err(|e| DocumentError::Pdf(e.to_string()))?;

    let pages = document
        .get_pages()
        .into_keys()
        .map(|page_number| (page_number, document.extract_text(&[page_number])));

    Ok(join_pages(pages))
}

fn join_pages<E: Display>(pages: impl IntoIterator<Item = (u32, Result<String, E>)>) -> String {
    let mut text = String::new();
    for (page_number, page) in pages {
        match page {
            Ok(page_text) => text.push_str(&page_text),
            Err(e) => debug!(page = page_number, error = %e, "No extractable text on PDF page"),
        }
        text.push('\n');
    }
    text
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use lopdf::content::{Content, Operation};
    use lopdf::{dictionary, Object, Stream};

    /// Build a minimal single-page PDF that shows `line` in Courier.
    pub(crate) fn single_page_pdf(line: &str) -> Vec<u8> {
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
                Operation::new("Tf", vec!["F1".into(), 24.into()]),
                Operation::new("Td", vec![100.into(), 600.into()]),
                Operation::new("Tj", vec![Object::string_literal(line)]),
                Operation::new("ET", vec![]),
            ],
        };
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
        });
        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => vec![page_id.into()],
                "Count" => 1,
            }),
        );
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        let mut bytes = Vec::new();
        doc.save_to(&mut bytes).unwrap();
        bytes
    }

    #[test]
    fn extracts_page_text() {
        let text = extract_text(&single_page_pdf("Quarterly revenue")).unwrap();
        assert!(text.contains("Quarterly revenue"));
        assert!(text.ends_with('\n'));
    }

    #[test]
    fn failed_page_contributes_an_empty_line() {
        let pages = vec![
            (1, Ok("Summary".to_string())),
            (2, Err("missing font")),
            (3, Ok("Appendix".to_string())),
        ];
        assert_eq!(join_pages(pages), "Summary\n\nAppendix\n");
    }

    #[test]
    fn unreadable_document_is_an_error() {
        let err = extract_text(b"%PDF-1.4 truncated").unwrap_err();
        assert!(matches!(err, DocumentError::Pdf(_)));
    }
}

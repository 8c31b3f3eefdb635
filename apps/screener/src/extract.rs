//! Text Extractor: turns a resume PDF into plain text.

use std::cell::Cell;
use std::panic::{self, catch_unwind, AssertUnwindSafe};
use std::path::{Path, PathBuf};
use std::sync::Once;

use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("file not found: {0}")]
    NotFound(PathBuf),

    #[error("failed to read PDF {path}: {message}")]
    Pdf { path: PathBuf, message: String },

    #[error("PDF extraction panicked (malformed PDF): {0}")]
    Panicked(PathBuf),
}

/// Anything that can produce the plain text of a resume document.
pub trait TextExtractor: Send + Sync {
    fn extract(&self, path: &Path) -> Result<String, ExtractError>;
}

/// Extracts text page by page with `pdf-extract` and concatenates the pages in order.
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfTextExtractor;

impl TextExtractor for PdfTextExtractor {
    fn extract(&self, path: &Path) -> Result<String, ExtractError> {
        if !path.is_file() {
            return Err(ExtractError::NotFound(path.to_path_buf()));
        }

        // pdf_extract can panic on malformed input
        let result = catch_quietly(|| pdf_extract::extract_text_by_pages(path));

        let pages = match result {
            Ok(Ok(pages)) => pages,
            Ok(Err(e)) => {
                return Err(ExtractError::Pdf {
                    path: path.to_path_buf(),
                    message: e.to_string(),
                })
            }
            Err(payload) => {
                debug!(
                    "pdf_extract panicked on {}: {}",
                    path.display(),
                    panic_message(payload.as_ref())
                );
                return Err(ExtractError::Panicked(path.to_path_buf()));
            }
        };

        let text = pages.concat();
        debug!(
            "Extracted {} chars from {} page(s) of {}",
            text.len(),
            pages.len(),
            path.display()
        );
        Ok(text)
    }
}

thread_local! {
    static QUIET_PANICS: Cell<bool> = const { Cell::new(false) };
}

static QUIET_HOOK: Once = Once::new();

/// `catch_unwind` that keeps the panic hook from printing to stderr while `f` runs
/// on this thread. Panics elsewhere still reach the previous hook.
fn catch_quietly<T>(f: impl FnOnce() -> T) -> std::thread::Result<T> {
    QUIET_HOOK.call_once(|| {
        let previous = panic::take_hook();
        panic::set_hook(Box::new(move |info| {
            if !QUIET_PANICS.with(Cell::get) {
                previous(info);
            }
        }));
    });

    QUIET_PANICS.with(|quiet| quiet.set(true));
    let result = catch_unwind(AssertUnwindSafe(f));
    QUIET_PANICS.with(|quiet| quiet.set(false));
    result
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> &str {
    payload
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("unknown panic")
}

#[cfg(test)]
mod tests {
    use super::*;
    use lopdf::content::{Content, Operation};
    use lopdf::{dictionary, Document, Object, Stream};

    /// Builds a PDF with one Courier text line per page.
    fn write_pdf(path: &Path, pages: &[&str]) {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();
        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Courier",
        });
        let resources_id = doc.add_object(dictionary! {
            "Font" => dictionary! {
                "F1" => font_id,
            },
        });

        let mut kids: Vec<Object> = Vec::new();
        for line in pages {
            let content = Content {
                operations: vec![
                    Operation::new("BT", vec![]),
                    Operation::new("Tf", vec!["F1".into(), 24.into()]),
                    Operation::new("Td", vec![72.into(), 700.into()]),
                    Operation::new("Tj", vec![Object::string_literal(*line)]),
                    Operation::new("ET", vec![]),
                ],
            };
            let content_id =
                doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "Contents" => content_id,
                "Resources" => resources_id,
                "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
            });
            kids.push(page_id.into());
        }

        let count = kids.len() as i64;
        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => count,
            }),
        );
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);
        doc.save(path).unwrap();
    }

    #[test]
    fn test_extracts_pages_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("resume.pdf");
        write_pdf(&path, &["Jane Doe", "Python SQL"]);

        let text = PdfTextExtractor.extract(&path).unwrap();
        let first = text.find("Jane Doe").expect("first page text");
        let second = text.find("Python SQL").expect("second page text");
        assert!(first < second);
    }

    #[test]
    fn test_missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.pdf");
        let err = PdfTextExtractor.extract(&path).unwrap_err();
        assert!(matches!(err, ExtractError::NotFound(p) if p == path));
    }

    #[test]
    fn test_non_pdf_content_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fake.pdf");
        std::fs::write(&path, b"this is not a pdf at all").unwrap();
        assert!(PdfTextExtractor.extract(&path).is_err());
    }

    #[test]
    fn test_catch_quietly_converts_panic_and_restores_hook_state() {
        let result = catch_quietly(|| -> u32 { panic!("malformed xref table") });
        let payload = result.unwrap_err();
        assert_eq!(panic_message(payload.as_ref()), "malformed xref table");
        assert!(!QUIET_PANICS.with(Cell::get));

        assert_eq!(catch_quietly(|| 7).unwrap(), 7);
        assert!(!QUIET_PANICS.with(Cell::get));
    }

    #[test]
    fn test_panic_message_from_formatted_panic() {
        let payload = catch_quietly(|| -> u8 { panic!("bad object {}", 12) }).unwrap_err();
        assert_eq!(panic_message(payload.as_ref()), "bad object 12");
    }

    #[test]
    fn test_directory_is_not_a_document() {
        let dir = tempfile::tempdir().unwrap();
        let err = PdfTextExtractor.extract(dir.path()).unwrap_err();
        assert!(matches!(err, ExtractError::NotFound(_)));
    }
}

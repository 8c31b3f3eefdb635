//! Batch Runner: screens every PDF in a folder, one after another.
//!
//! Two phases: enumerate the folder, then process each file to completion.
//! A file that fails at any step is reported and skipped; it never stops the batch.

use std::cmp::Reverse;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::warn;

use crate::extract::TextExtractor;
use crate::llm_client::LanguageModel;
use crate::screening::report::{render_failure, rule};
use crate::screening::{process_resume, MatchScore, Recommendation};
use crate::store::ResultStore;

#[derive(Debug, Error)]
pub enum BatchError {
    #[error("Folder not found: {0}")]
    FolderNotFound(PathBuf),

    #[error("No PDF files found in: {0}")]
    NoPdfFiles(PathBuf),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// One successfully screened resume.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchSummaryEntry {
    pub name: String,
    pub score: MatchScore,
    pub decision: Recommendation,
    pub file_path: PathBuf,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BatchSummary {
    pub total_files: usize,
    pub entries: Vec<BatchSummaryEntry>,
}

/// Regular files in `folder` with a `.pdf` extension (any case), in directory order.
pub fn find_pdf_files(folder: &Path) -> io::Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in std::fs::read_dir(folder)? {
        let entry = entry?;
        let path = entry.path();
        let is_pdf = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"));
        if is_pdf && entry.file_type()?.is_file() {
            files.push(path);
        }
    }
    Ok(files)
}

/// Stable sort by numeric score, highest first.
///
/// If any score has no numeric value the entries are left untouched and `false` is returned.
pub fn sort_by_score_desc(entries: &mut [BatchSummaryEntry]) -> bool {
    if entries.iter().any(|e| e.score.as_number().is_none()) {
        return false;
    }
    entries.sort_by_key(|e| Reverse(e.score.as_number()));
    true
}

/// Screens every PDF in `folder` against `job_description`, printing progress to `out`.
pub async fn run_batch<W: Write>(
    folder: &Path,
    job_description: &str,
    extractor: &dyn TextExtractor,
    model: &dyn LanguageModel,
    store: &ResultStore,
    out: &mut W,
) -> Result<BatchSummary, BatchError> {
    if !folder.is_dir() {
        return Err(BatchError::FolderNotFound(folder.to_path_buf()));
    }

    let files = find_pdf_files(folder)?;
    if files.is_empty() {
        return Err(BatchError::NoPdfFiles(folder.to_path_buf()));
    }

    let total_files = files.len();
    writeln!(out, "\n[OK] Found {total_files} resume(s) to process.")?;
    writeln!(out, "{}", rule('-'))?;

    let mut entries = Vec::new();

    for (i, path) in files.iter().enumerate() {
        writeln!(
            out,
            "\n[{}/{}] Processing: {}",
            i + 1,
            total_files,
            display_name(path)
        )?;

        let result = match process_resume(path, job_description, extractor, model).await {
            Ok(result) => result,
            Err(e) => {
                warn!("Skipping {}: {e}", path.display());
                writeln!(out, "{}", render_failure(&e))?;
                continue;
            }
        };

        let file_path = match store.save(&result) {
            Ok(p) => p,
            Err(e) => {
                warn!("Skipping {}: {e}", path.display());
                writeln!(out, "[ERROR] {e}")?;
                continue;
            }
        };

        writeln!(
            out,
            "    -> {}: {}/100 - {}",
            result.candidate_name, result.match_score, result.recommendation
        )?;
        writeln!(out, "    -> Saved to: {}", file_path.display())?;

        entries.push(BatchSummaryEntry {
            name: result.candidate_name,
            score: result.match_score,
            decision: result.recommendation,
            file_path,
        });
    }

    sort_by_score_desc(&mut entries);

    let summary = BatchSummary {
        total_files,
        entries,
    };
    write_summary(out, &summary, store.dir())?;
    Ok(summary)
}

/// Prints the summary header, the candidate table and the results folder.
pub fn write_summary<W: Write>(
    out: &mut W,
    summary: &BatchSummary,
    results_dir: &Path,
) -> io::Result<()> {
    writeln!(out, "\n{}", rule('='))?;
    writeln!(out, "         BATCH SUMMARY")?;
    writeln!(out, "{}", rule('='))?;
    writeln!(
        out,
        "\nProcessed: {}/{} resumes\n",
        summary.entries.len(),
        summary.total_files
    )?;

    writeln!(out, "{:<25} {:<10} {:<12}", "Candidate", "Score", "Decision")?;
    writeln!(out, "{}", rule('-'))?;
    for entry in &summary.entries {
        writeln!(
            out,
            "{:<25} {:<10} {:<12}",
            entry.name, entry.score, entry.decision
        )?;
    }

    writeln!(out, "\n{}", rule('='))?;
    writeln!(out, "Results saved to: {}/ folder", results_dir.display())?;
    writeln!(out, "{}", rule('='))?;
    Ok(())
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{screening_json, StubExtractor, StubModel};
    use std::fs;

    fn entry(name: &str, score: MatchScore) -> BatchSummaryEntry {
        BatchSummaryEntry {
            name: name.to_string(),
            score,
            decision: Recommendation::Interview,
            file_path: PathBuf::from(format!("{name}.txt")),
        }
    }

    fn names(entries: &[BatchSummaryEntry]) -> Vec<&str> {
        entries.iter().map(|e| e.name.as_str()).collect()
    }

    /// Replies based on which resume text appears in the prompt.
    fn model_by_resume() -> StubModel {
        StubModel::new(|prompt| {
            let reply = if prompt.contains("RESUME-ALICE") {
                screening_json("Alice", "72", "INTERVIEW")
            } else if prompt.contains("RESUME-BOB") {
                screening_json("Bob", "91", "INTERVIEW")
            } else if prompt.contains("RESUME-CAROL") {
                screening_json("Carol", "35", "REJECT")
            } else {
                "Sorry, I cannot evaluate this document.".to_string()
            };
            Ok(reply)
        })
    }

    fn touch(dir: &Path, name: &str) {
        fs::write(dir.join(name), b"%PDF-1.4").unwrap();
    }

    #[test]
    fn test_find_pdf_files_matches_extension_case_insensitively() {
        let tmp = tempfile::tempdir().unwrap();
        touch(tmp.path(), "a.pdf");
        touch(tmp.path(), "b.PDF");
        touch(tmp.path(), "c.Pdf");
        touch(tmp.path(), "notes.txt");
        touch(tmp.path(), "pdf");
        fs::create_dir(tmp.path().join("folder.pdf")).unwrap();

        let mut found: Vec<String> = find_pdf_files(tmp.path())
            .unwrap()
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        found.sort();
        assert_eq!(found, vec!["a.pdf", "b.PDF", "c.Pdf"]);
    }

    #[test]
    fn test_sort_by_score_desc_numeric() {
        let mut entries = vec![
            entry("low", MatchScore::Text("40".to_string())),
            entry("high", MatchScore::Number(95.into())),
            entry("mid", MatchScore::Text("70".to_string())),
        ];
        assert!(sort_by_score_desc(&mut entries));
        assert_eq!(names(&entries), vec!["high", "mid", "low"]);
    }

    #[test]
    fn test_sort_is_stable_for_equal_scores() {
        let mut entries = vec![
            entry("first", MatchScore::Text("80".to_string())),
            entry("second", MatchScore::Number(80.into())),
            entry("top", MatchScore::Text("99".to_string())),
        ];
        sort_by_score_desc(&mut entries);
        assert_eq!(names(&entries), vec!["top", "first", "second"]);
    }

    #[test]
    fn test_non_numeric_score_leaves_order_unchanged() {
        let mut entries = vec![
            entry("a", MatchScore::Text("40".to_string())),
            entry("b", MatchScore::Text("N/A".to_string())),
            entry("c", MatchScore::Text("90".to_string())),
        ];
        assert!(!sort_by_score_desc(&mut entries));
        assert_eq!(names(&entries), vec!["a", "b", "c"]);
    }

    #[tokio::test]
    async fn test_batch_keeps_valid_resumes_and_skips_the_rest() {
        let tmp = tempfile::tempdir().unwrap();
        let inbox = tmp.path().join("inbox");
        fs::create_dir(&inbox).unwrap();
        for name in ["alice.pdf", "bob.PDF", "carol.pdf", "corrupt.pdf", "prose.pdf", "readme.txt"] {
            touch(&inbox, name);
        }

        let extractor = StubExtractor::new()
            .with_text("alice.pdf", "RESUME-ALICE")
            .with_text("bob.PDF", "RESUME-BOB")
            .with_text("carol.pdf", "RESUME-CAROL")
            .with_text("prose.pdf", "RESUME-UNKNOWN")
            .with_corrupt("corrupt.pdf");
        let model = model_by_resume();
        let store = ResultStore::new(tmp.path().join("results"));
        let mut out = Vec::new();

        let summary = run_batch(&inbox, "Must know SQL", &extractor, &model, &store, &mut out)
            .await
            .unwrap();

        assert_eq!(summary.total_files, 5);
        assert_eq!(names(&summary.entries), vec!["Bob", "Alice", "Carol"]);
        assert_eq!(model.prompts().len(), 4, "corrupt file never reaches the model");

        let saved = fs::read_dir(store.dir()).unwrap().count();
        assert_eq!(saved, 3);
        for e in &summary.entries {
            let report = fs::read_to_string(&e.file_path).unwrap();
            assert!(report.contains(&format!("Candidate: {}", e.name)));
            let score = e.score.as_number().unwrap();
            assert!((0..=100).contains(&score));
        }

        let printed = String::from_utf8(out).unwrap();
        assert!(printed.contains("[OK] Found 5 resume(s) to process."));
        assert!(printed.contains("Processed: 3/5 resumes"));
        assert!(printed.contains("[WARNING] Failed to parse JSON. Raw output:"));
        assert!(printed.contains("Sorry, I cannot evaluate this document."));
        assert!(printed.contains("[ERROR] Error loading resume"));
        assert!(printed.contains("    -> Bob: 91/100 - INTERVIEW"));
        assert!(printed.contains(&format!("{:<25} {:<10} {:<12}", "Bob", "91", "INTERVIEW")));
    }

    #[tokio::test]
    async fn test_batch_continues_after_model_failure() {
        let tmp = tempfile::tempdir().unwrap();
        touch(tmp.path(), "one.pdf");
        touch(tmp.path(), "two.pdf");

        let extractor = StubExtractor::new()
            .with_text("one.pdf", "RESUME-ONE")
            .with_text("two.pdf", "RESUME-TWO");
        let model = StubModel::new(|prompt| {
            if prompt.contains("RESUME-ONE") {
                Err(crate::llm_client::LlmError::EmptyContent)
            } else {
                Ok(screening_json("Two", "60", "INTERVIEW"))
            }
        });
        let store = ResultStore::new(tmp.path().join("results"));
        let mut out = Vec::new();

        let summary = run_batch(tmp.path(), "jd", &extractor, &model, &store, &mut out)
            .await
            .unwrap();

        assert_eq!(summary.total_files, 2);
        assert_eq!(names(&summary.entries), vec!["Two"]);
        let printed = String::from_utf8(out).unwrap();
        assert!(printed.contains("[ERROR] Error during AI screening: LLM returned empty content"));
    }

    #[tokio::test]
    async fn test_batch_with_non_numeric_score_keeps_processing_order() {
        let tmp = tempfile::tempdir().unwrap();
        touch(tmp.path(), "only.pdf");

        let extractor = StubExtractor::new().with_text("only.pdf", "text");
        let model = StubModel::replying(&screening_json("Pat", "high", "INTERVIEW"));
        let store = ResultStore::new(tmp.path().join("results"));
        let mut out = Vec::new();

        let summary = run_batch(tmp.path(), "jd", &extractor, &model, &store, &mut out)
            .await
            .unwrap();
        assert_eq!(summary.entries.len(), 1);
        assert_eq!(summary.entries[0].score.to_string(), "high");
    }

    #[tokio::test]
    async fn test_missing_folder_is_an_error() {
        let tmp = tempfile::tempdir().unwrap();
        let missing = tmp.path().join("nowhere");
        let store = ResultStore::new(tmp.path().join("results"));
        let err = run_batch(
            &missing,
            "jd",
            &StubExtractor::new(),
            &StubModel::replying("{}"),
            &store,
            &mut Vec::<u8>::new(),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, BatchError::FolderNotFound(p) if p == missing));
    }

    #[tokio::test]
    async fn test_folder_without_pdfs_is_an_error() {
        let tmp = tempfile::tempdir().unwrap();
        touch(tmp.path(), "cover_letter.docx");
        let store = ResultStore::new(tmp.path().join("results"));
        let err = run_batch(
            tmp.path(),
            "jd",
            &StubExtractor::new(),
            &StubModel::replying("{}"),
            &store,
            &mut Vec::<u8>::new(),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, BatchError::NoPdfFiles(_)));
        assert!(!store.dir().exists());
    }
}

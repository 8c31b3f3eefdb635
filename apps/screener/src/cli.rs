//! Console front-end: argument parsing, menus and the single/batch flows.

use std::fmt::Display;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing::warn;

use crate::batch::{run_batch, BatchError, BatchSummary};
use crate::extract::TextExtractor;
use crate::jobs::{self, CATALOG, CUSTOM_CHOICE};
use crate::llm_client::LanguageModel;
use crate::screening::process_resume;
use crate::screening::report::{render_failure, render_report, rule};
use crate::store::ResultStore;

/// Used when the single-resume prompt is answered with an empty line.
pub const SAMPLE_RESUME: &str = "sample_resume.pdf";

#[derive(Debug, Parser)]
#[command(name = "screener", version, about = "Screen resumes against a job description with an LLM")]
pub struct Cli {
    /// Runs the interactive menu when omitted
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Screen one resume PDF
    Single {
        resume: PathBuf,
        #[command(flatten)]
        job: JobArgs,
    },
    /// Screen every PDF in a folder
    Batch {
        folder: PathBuf,
        #[command(flatten)]
        job: JobArgs,
    },
    /// Write the sample resume PDF used when no path is given
    Sample {
        #[arg(default_value = SAMPLE_RESUME)]
        output: PathBuf,
    },
    /// Serve the screening HTTP API
    Serve {
        /// Overrides the PORT environment variable
        #[arg(long)]
        port: Option<u16>,
    },
}

/// Where the job description comes from. With none set, the job menu is shown.
#[derive(Debug, Clone, Default, Args)]
pub struct JobArgs {
    /// Built-in job description key (1-6)
    #[arg(long, conflicts_with_all = ["role", "jd_file"])]
    pub job: Option<String>,
    /// Role title; the model writes the job description
    #[arg(long, conflicts_with = "jd_file")]
    pub role: Option<String>,
    /// Read the job description from a text file
    #[arg(long)]
    pub jd_file: Option<PathBuf>,
}

// ────────────────────────────────────────────────────────────────────────────
// Console I/O
// ────────────────────────────────────────────────────────────────────────────

/// Line-oriented prompt/answer I/O over any reader and writer.
pub struct Console<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn say(&mut self, text: impl Display) -> io::Result<()> {
        writeln!(self.output, "{text}")
    }

    /// Prints `prompt` without a newline and returns the trimmed answer.
    /// End of input reads as an empty answer.
    pub fn ask(&mut self, prompt: &str) -> io::Result<String> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;
        let mut line = String::new();
        self.input.read_line(&mut line)?;
        Ok(line.trim().to_string())
    }

    /// Reads lines until the first empty one (or end of input) and joins them with `\n`.
    pub fn read_until_blank(&mut self) -> io::Result<String> {
        let mut lines = Vec::new();
        loop {
            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                break;
            }
            let line = line.trim_end_matches(['\n', '\r']);
            if line.is_empty() {
                break;
            }
            lines.push(line.to_string());
        }
        Ok(lines.join("\n"))
    }

    pub fn output(&mut self) -> &mut W {
        &mut self.output
    }

    #[cfg(test)]
    pub fn into_output(self) -> W {
        self.output
    }
}

/// Strips whitespace, wrapping quotes and a leading byte-order mark from a pasted path.
pub fn clean_path_input(raw: &str) -> String {
    raw.trim()
        .trim_matches('"')
        .trim_matches('\'')
        .trim()
        .trim_start_matches('\u{feff}')
        .to_string()
}

// ────────────────────────────────────────────────────────────────────────────
// Job description selection
// ────────────────────────────────────────────────────────────────────────────

/// Shows the job menu and returns the chosen description.
pub async fn select_job_description<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    model: &dyn LanguageModel,
) -> io::Result<String> {
    console.say(format!("\n{}", rule('=')))?;
    console.say("         SELECT JOB ROLE")?;
    console.say(rule('='))?;
    for job in &CATALOG {
        console.say(format!("  [{}] {}", job.key, job.title))?;
    }
    console.say(format!("  [{CUSTOM_CHOICE}] Custom (enter role or description)"))?;
    console.say(rule('='))?;

    let choice = console.ask("\nEnter your choice (1-7): ")?;

    if let Some(job) = jobs::find(&choice) {
        console.say(format!("\n[OK] Selected: {}", job.title))?;
        return Ok(job.description.to_string());
    }

    if choice != CUSTOM_CHOICE {
        console.say(format!(
            "[WARNING] Invalid choice. Using default: {}",
            jobs::default_job().title
        ))?;
        return Ok(jobs::default_job().description.to_string());
    }

    console.say(format!("\n{}", rule('-')))?;
    console.say("CUSTOM JOB OPTIONS:")?;
    console.say("  [A] Enter a role title (AI will generate JD)")?;
    console.say("  [B] Enter full job description manually")?;
    console.say(rule('-'))?;

    let sub_choice = console.ask("\nEnter A or B: ")?.to_uppercase();

    if sub_choice == "A" {
        let role_title = console.ask("\nEnter the role title (e.g., 'Backend Developer'): ")?;
        if role_title.is_empty() {
            console.say("[WARNING] No role entered. Using default.")?;
            return Ok(jobs::default_job().description.to_string());
        }
        return generated_or_default(console, model, &role_title).await;
    }

    console.say("\nEnter your job description (press Enter twice when done):")?;
    console.read_until_blank()
}

async fn generated_or_default<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    model: &dyn LanguageModel,
    role_title: &str,
) -> io::Result<String> {
    console.say(format!(
        "\n[AI] Generating job description for '{role_title}'..."
    ))?;
    match jobs::generate_job_description(model, role_title).await {
        Ok(description) => Ok(description),
        Err(e) => {
            warn!("Job description generation failed: {e}");
            console.say(format!(
                "[ERROR] Could not generate a job description: {e}. Using default."
            ))?;
            Ok(jobs::default_job().description.to_string())
        }
    }
}

/// Resolves `--job`, `--role` or `--jd-file`, falling back to the interactive menu.
pub async fn resolve_job_description<R: BufRead, W: Write>(
    args: &JobArgs,
    console: &mut Console<R, W>,
    model: &dyn LanguageModel,
) -> Result<String> {
    if let Some(key) = &args.job {
        return match jobs::find(key) {
            Some(job) => {
                console.say(format!("[OK] Selected: {}", job.title))?;
                Ok(job.description.to_string())
            }
            None => {
                console.say(format!(
                    "[WARNING] Unknown job '{key}'. Using default: {}",
                    jobs::default_job().title
                ))?;
                Ok(jobs::default_job().description.to_string())
            }
        };
    }

    if let Some(role_title) = args.role.as_deref().map(str::trim).filter(|r| !r.is_empty()) {
        return Ok(generated_or_default(console, model, role_title).await?);
    }

    if let Some(path) = &args.jd_file {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read job description file {}", path.display()))?;
        return Ok(text.trim().to_string());
    }

    Ok(select_job_description(console, model).await?)
}

// ────────────────────────────────────────────────────────────────────────────
// Flows
// ────────────────────────────────────────────────────────────────────────────

/// Screens one resume, prints the report and saves it. Returns the saved path, if any.
pub async fn run_single<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    resume_path: &Path,
    job_description: &str,
    extractor: &dyn TextExtractor,
    model: &dyn LanguageModel,
    store: &ResultStore,
) -> io::Result<Option<PathBuf>> {
    let name = resume_path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| resume_path.display().to_string());
    console.say(format!("\nProcessing: {name}"))?;

    let result = match process_resume(resume_path, job_description, extractor, model).await {
        Ok(result) => result,
        Err(e) => {
            warn!("Screening {} failed: {e}", resume_path.display());
            console.say(render_failure(&e))?;
            return Ok(None);
        }
    };

    console.say(format!("\n{}", render_report(&result)))?;

    match store.save(&result) {
        Ok(path) => {
            console.say(format!("\n[SAVED] Results saved to: {}", path.display()))?;
            Ok(Some(path))
        }
        Err(e) => {
            console.say(format!("[ERROR] {e}"))?;
            Ok(None)
        }
    }
}

/// Runs the batch runner, turning folder problems into console messages.
pub async fn run_batch_folder<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    folder: &Path,
    job_description: &str,
    extractor: &dyn TextExtractor,
    model: &dyn LanguageModel,
    store: &ResultStore,
) -> io::Result<Option<BatchSummary>> {
    match run_batch(folder, job_description, extractor, model, store, console.output()).await {
        Ok(summary) => Ok(Some(summary)),
        Err(BatchError::Io(e)) => Err(e),
        Err(e) => {
            console.say(format!("[ERROR] {e}"))?;
            Ok(None)
        }
    }
}

/// The menu-driven flow: pick a mode, pick a job description, then screen.
pub async fn run_interactive<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    extractor: &dyn TextExtractor,
    model: &dyn LanguageModel,
    store: &ResultStore,
) -> Result<()> {
    console.say(format!("\n{}", rule('=')))?;
    console.say("      AI RESUME SCREENER")?;
    console.say(rule('='))?;
    console.say("\nSelect mode:")?;
    console.say("  [1] Screen single resume")?;
    console.say("  [2] Screen batch (folder of resumes)")?;
    console.say(rule('='))?;

    let mode = console.ask("\nEnter your choice (1 or 2): ")?;
    if mode != "1" && mode != "2" {
        console.say("[WARNING] Invalid choice. Please run again and select 1 or 2.")?;
        return Ok(());
    }

    let job_description = select_job_description(console, model).await?;

    if mode == "1" {
        let mut resume_path = clean_path_input(&console.ask("\nEnter the path to the resume PDF: ")?);
        if resume_path.is_empty() {
            console.say("No path provided. Using sample resume path.")?;
            if !Path::new(SAMPLE_RESUME).exists() {
                console.say(format!(
                    "[WARNING] {SAMPLE_RESUME} does not exist yet. Create it with `screener sample`."
                ))?;
            }
            resume_path = SAMPLE_RESUME.to_string();
        }
        run_single(
            console,
            Path::new(&resume_path),
            &job_description,
            extractor,
            model,
            store,
        )
        .await?;
    } else {
        let folder = clean_path_input(
            &console.ask("\nEnter the path to the folder containing resumes: ")?,
        );
        run_batch_folder(
            console,
            Path::new(&folder),
            &job_description,
            extractor,
            model,
            store,
        )
        .await?;
    }

    Ok(())
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

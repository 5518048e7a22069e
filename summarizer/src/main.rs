use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use summary_core::{Ratio, SummarizeError, Summarizer, SummarizerConfig, Summary};
use tracing_subscriber::{fmt, EnvFilter};
use walkdir::WalkDir;

use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "summarizer")]
#[command(about = "Extractive summaries of meeting transcripts", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Summarize a transcript file, every .txt file under a directory, or stdin
    Summarize {
        /// Input path (file or directory); reads stdin when omitted
        #[arg(long)]
        input: Option<String>,
        /// Summary size as a percentage of the content sentences (1-99)
        #[arg(long, default_value = "30")]
        ratio: Ratio,
        /// JSON config file; defaults apply to missing fields
        #[arg(long)]
        config: Option<String>,
        /// Emit one JSON object per input instead of plain lines
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Print the default configuration as JSON
    DefaultConfig,
}

#[derive(Serialize)]
struct Record<'a> {
    source: &'a str,
    #[serde(flatten)]
    outcome: Outcome<'a>,
}

#[derive(Serialize)]
#[serde(untagged)]
enum Outcome<'a> {
    Summary(&'a Summary),
    Error { error: &'static str, message: String },
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).with_writer(io::stderr).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Summarize { input, ratio, config, json } => {
            let config = match config {
                Some(path) => SummarizerConfig::load(&path).with_context(|| format!("loading config {path}"))?,
                None => SummarizerConfig::default(),
            };
            let summarizer = Summarizer::new(config)?;
            run(&summarizer, input.as_deref(), ratio, json)
        }
        Commands::DefaultConfig => {
            println!("{}", serde_json::to_string_pretty(&SummarizerConfig::default())?);
            Ok(())
        }
    }
}

fn run(summarizer: &Summarizer, input: Option<&str>, ratio: Ratio, json: bool) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();

    let Some(input) = input else {
        let mut text = String::new();
        io::stdin().read_to_string(&mut text)?;
        let summary = summarizer.summarize(&text, ratio)?;
        return write_summary(&mut out, "-", &summary, json, false);
    };

    let files = collect_inputs(Path::new(input))?;
    if files.is_empty() {
        anyhow::bail!("no .txt transcripts found under {input}");
    }
    let batch = files.len() > 1;
    let mut failed = 0usize;
    for file in &files {
        let source = file.to_string_lossy();
        let text = fs::read_to_string(file).with_context(|| format!("reading {source}"))?;
        match summarizer.summarize(&text, ratio) {
            Ok(summary) => write_summary(&mut out, &source, &summary, json, batch)?,
            Err(err) if batch => {
                failed += 1;
                tracing::warn!(source = %source, error = %err, "skipping transcript");
                if json {
                    write_error(&mut out, &source, &err)?;
                }
            }
            Err(err) => return Err(err.into()),
        }
    }
    tracing::info!(inputs = files.len(), failed, "summarization complete");
    Ok(())
}

/// A single file, or every `.txt` file below a directory in path order.
fn collect_inputs(path: &Path) -> Result<Vec<PathBuf>> {
    if path.is_file() {
        return Ok(vec![path.to_path_buf()]);
    }
    if !path.is_dir() {
        anyhow::bail!("input {} does not exist", path.display());
    }
    let mut files: Vec<PathBuf> = WalkDir::new(path)
        .into_iter()
        .filter_map(|e| e.ok())
        .map(|e| e.into_path())
        .filter(|p| p.is_file() && p.extension().and_then(|s| s.to_str()) == Some("txt"))
        .collect();
    files.sort();
    Ok(files)
}

fn write_summary(out: &mut impl Write, source: &str, summary: &Summary, json: bool, header: bool) -> Result<()> {
    if json {
        let record = Record { source, outcome: Outcome::Summary(summary) };
        writeln!(out, "{}", serde_json::to_string(&record)?)?;
        return Ok(());
    }
    if header {
        writeln!(out, "== {source} ==")?;
    }
    for line in summary.lines() {
        writeln!(out, "{line}")?;
    }
    Ok(())
}

fn write_error(out: &mut impl Write, source: &str, err: &SummarizeError) -> Result<()> {
    let record = Record { source, outcome: Outcome::Error { error: err.kind(), message: err.to_string() } };
    writeln!(out, "{}", serde_json::to_string(&record)?)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn summarizer() -> Summarizer {
        Summarizer::new(SummarizerConfig::default()).unwrap()
    }

    #[test]
    fn collects_txt_files_in_order() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("nested")).unwrap();
        fs::write(dir.path().join("b.txt"), "b").unwrap();
        fs::write(dir.path().join("a.txt"), "a").unwrap();
        fs::write(dir.path().join("notes.md"), "skip").unwrap();
        fs::write(dir.path().join("nested/c.txt"), "c").unwrap();

        let files = collect_inputs(dir.path()).unwrap();
        let names: Vec<_> = files.iter().map(|p| p.strip_prefix(dir.path()).unwrap().to_path_buf()).collect();
        assert_eq!(names, vec![PathBuf::from("a.txt"), PathBuf::from("b.txt"), PathBuf::from("nested/c.txt")]);
    }

    #[test]
    fn missing_input_is_an_error() {
        assert!(collect_inputs(Path::new("/no/such/transcript")).is_err());
    }

    #[test]
    fn plain_output_is_one_sentence_per_line() {
        let summary = summarizer().summarize("予算を確認します。予算は増額です。", Ratio::new(99).unwrap()).unwrap();
        let mut buf = Vec::new();
        write_summary(&mut buf, "x.txt", &summary, false, true).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert_eq!(text, "== x.txt ==\n予算を確認します。\n予算は増額です。\n");
    }

    #[test]
    fn json_output_carries_source_and_stats() {
        let summary = summarizer().summarize("予算を確認します。", Ratio::new(50).unwrap()).unwrap();
        let mut buf = Vec::new();
        write_summary(&mut buf, "x.txt", &summary, true, false).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        assert_eq!(value["source"], "x.txt");
        assert_eq!(value["sentences"][0]["text"], "予算を確認します。");
        assert_eq!(value["stats"]["surviving_sentences"], 1);
    }

    #[test]
    fn json_error_record() {
        let mut buf = Vec::new();
        write_error(&mut buf, "empty.txt", &SummarizeError::EmptyInput).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        assert_eq!(value["error"], "empty_input");
        assert_eq!(value["source"], "empty.txt");
    }
}

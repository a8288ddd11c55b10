//! Command implementations

use crate::client::DaemonClient;
use crate::output;
use anyhow::{bail, Context, Result};
use chrono::Utc;
use console::style;
use loghound_common::{AnalysisResult, AnalyzeRequest};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Report file written by `analyze-dir` for each log.
#[derive(Debug, Serialize)]
struct Report<'a> {
    analyzed_at: String,
    source: String,
    #[serde(flatten)]
    result: &'a AnalysisResult,
}

pub async fn health(addr: Option<&str>) -> Result<()> {
    let client = DaemonClient::new(addr)?;
    let health = client.health().await?;
    println!("{}", serde_json::to_string_pretty(&health)?);
    Ok(())
}

pub async fn analyze(
    addr: Option<&str>,
    file: &Path,
    json: bool,
    app: Option<String>,
    env: Option<String>,
) -> Result<()> {
    let client = DaemonClient::new(addr)?;
    let log_text = read_log_file(file)?;

    let result = client
        .analyze(&AnalyzeRequest {
            log_text,
            app_name: app,
            environment: env,
        })
        .await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        output::render_result(&result);
    }
    Ok(())
}

pub async fn analyze_dir(addr: Option<&str>, dir: &Path, out: &Path) -> Result<()> {
    let client = DaemonClient::new(addr)?;

    let log_files = collect_log_files(dir);
    if log_files.is_empty() {
        bail!("No .log or .txt files found in {}", dir.display());
    }

    fs::create_dir_all(out)
        .with_context(|| format!("Failed to create output directory {}", out.display()))?;

    println!(
        "Found {} log files in {}. Starting analysis...",
        log_files.len(),
        dir.display()
    );

    let mut failures = 0;
    for (idx, path) in log_files.iter().enumerate() {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        println!("[{}/{}] Analyzing {}", idx + 1, log_files.len(), name);

        match analyze_one(&client, path).await {
            Ok(result) => {
                let report = Report {
                    analyzed_at: Utc::now().to_rfc3339(),
                    source: name,
                    result: &result,
                };
                let out_file = out.join(report_file_name(path));
                fs::write(&out_file, serde_json::to_string_pretty(&report)?)
                    .with_context(|| format!("Failed to write {}", out_file.display()))?;
            }
            Err(err) => {
                failures += 1;
                eprintln!("  {} {:#}", style("failed:").red(), err);
            }
        }
    }

    if failures > 0 {
        println!(
            "Analysis finished with {} failures. Reports saved to {}",
            failures,
            out.display()
        );
    } else {
        println!("Analysis complete. Reports saved to {}", out.display());
    }
    Ok(())
}

async fn analyze_one(client: &DaemonClient, path: &Path) -> Result<AnalysisResult> {
    let log_text = read_log_file(path)?;
    client
        .analyze(&AnalyzeRequest {
            log_text,
            app_name: None,
            environment: None,
        })
        .await
}

/// Read a log file, tolerating invalid UTF-8.
fn read_log_file(path: &Path) -> Result<String> {
    let bytes =
        fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Top-level .log and .txt files in the directory, sorted by name.
fn collect_log_files(dir: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkDir::new(dir)
        .max_depth(1)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .filter(|path| {
            matches!(
                path.extension().and_then(|ext| ext.to_str()),
                Some("log") | Some("txt")
            )
        })
        .collect();
    files.sort();
    files
}

/// `app.log` -> `app_analysis.json`
fn report_file_name(path: &Path) -> String {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "log".to_string());
    format!("{}_analysis.json", stem)
}

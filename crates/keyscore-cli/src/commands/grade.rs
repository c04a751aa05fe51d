//! The `keyscore grade` command.

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};

use keyscore_core::engine::ScoreEngine;
use keyscore_core::parser;
use keyscore_core::report::{ConfigSummary, GradingReport, ResponseScore};

pub fn execute(
    config_path: PathBuf,
    responses_dir: PathBuf,
    output: PathBuf,
    format: String,
) -> Result<()> {
    let start = Instant::now();

    let config = parser::parse_config(&config_path)
        .with_context(|| format!("invalid config {}", config_path.display()))?;
    let summary = ConfigSummary::new(config_path.display().to_string(), &config);
    let engine = ScoreEngine::new(config);

    let files = collect_responses(&responses_dir)?;
    anyhow::ensure!(
        !files.is_empty(),
        "no .txt responses found in {}",
        responses_dir.display()
    );

    eprintln!(
        "keyscore v{}: grading {} responses against {} groups ({} points max)",
        env!("CARGO_PKG_VERSION"),
        files.len(),
        summary.group_count,
        summary.max_possible
    );

    let mut scores = Vec::with_capacity(files.len());
    for path in &files {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read response {}", path.display()))?;
        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        let result = engine.score(&text);
        tracing::debug!("{name}: {}/{}", result.total, result.max_possible);
        scores.push(ResponseScore { name, result });
    }

    let report = GradingReport::new(summary, scores, start.elapsed().as_millis() as u64);

    print_summary(&report);

    std::fs::create_dir_all(&output)?;
    let timestamp = chrono::Utc::now().format("%Y-%m-%dT%H%M%S");

    let formats: Vec<&str> = if format == "all" {
        vec!["json", "markdown"]
    } else {
        format.split(',').collect()
    };

    for fmt in &formats {
        match *fmt {
            "json" => {
                let path = output.join(format!("grades-{timestamp}.json"));
                report.save_json(&path)?;
                eprintln!("Results saved to: {}", path.display());
            }
            "markdown" | "md" => {
                let path = output.join(format!("grades-{timestamp}.md"));
                std::fs::write(&path, report.to_markdown())
                    .with_context(|| format!("failed to write {}", path.display()))?;
                eprintln!("Markdown report: {}", path.display());
            }
            _ => {
                eprintln!("Unknown format: {fmt}");
            }
        }
    }

    Ok(())
}

/// All `.txt` files directly inside `dir`, sorted by path.
fn collect_responses(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        anyhow::bail!("not a directory: {}", dir.display());
    }

    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir)
        .with_context(|| format!("failed to read directory: {}", dir.display()))?
    {
        let path = entry?.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == "txt") {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

fn print_summary(report: &GradingReport) {
    use comfy_table::{Cell, Table};

    let mut table = Table::new();
    table.set_header(vec!["Response", "Score", "Percent", "Groups matched"]);

    for r in &report.responses {
        table.add_row(vec![
            Cell::new(&r.name),
            Cell::new(format!("{}/{}", r.result.total, r.result.max_possible)),
            Cell::new(format!("{:.1}%", r.result.ratio() * 100.0)),
            Cell::new(format!(
                "{}/{}",
                r.result.matched_groups().count(),
                r.result.groups.len()
            )),
        ]);
    }

    println!("{table}");
    println!(
        "Mean {:.1}, median {:.1}, range {}-{}",
        report.summary.mean_total,
        report.summary.median_total,
        report.summary.min_total,
        report.summary.max_total
    );
}

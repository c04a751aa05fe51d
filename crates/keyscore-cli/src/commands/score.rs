//! The `keyscore score` command.

use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Serialize;

use keyscore_core::engine::ScoreEngine;
use keyscore_core::model::{MatchKind, ScoreResult, SessionState};
use keyscore_core::parser;

const DEFAULT_FEEDBACK: &str = "You got @score of @total points";

#[derive(Serialize)]
struct ScoreOutput<'a> {
    #[serde(flatten)]
    result: &'a ScoreResult,
    feedback: String,
}

pub fn execute(
    config_path: PathBuf,
    input: Option<PathBuf>,
    text: Option<String>,
    state: Option<PathBuf>,
    save_state: Option<PathBuf>,
    format: String,
) -> Result<()> {
    let config = parser::parse_config(&config_path)
        .with_context(|| format!("invalid config {}", config_path.display()))?;

    let response = read_response(input.as_deref(), text, state.as_deref())?;

    let engine = ScoreEngine::new(config);
    let result = engine.score(&response);
    let template = engine
        .config()
        .feedback
        .as_deref()
        .unwrap_or(DEFAULT_FEEDBACK);
    let feedback = result.feedback(template);

    if let Some(path) = &save_state {
        let json = SessionState::new(response).to_json()?;
        std::fs::write(path, json)
            .with_context(|| format!("failed to write session state to {}", path.display()))?;
        tracing::info!("session state saved to {}", path.display());
    }

    match format.as_str() {
        "json" => {
            let output = ScoreOutput {
                result: &result,
                feedback,
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        _ => {
            println!(
                "Score: {} / {} ({:.1}%)",
                result.total,
                result.max_possible,
                result.ratio() * 100.0
            );
            if !result.groups.is_empty() {
                print_groups(&result);
            }
            println!("{feedback}");
        }
    }

    Ok(())
}

fn read_response(
    input: Option<&Path>,
    text: Option<String>,
    state: Option<&Path>,
) -> Result<String> {
    if let Some(path) = input {
        return std::fs::read_to_string(path)
            .with_context(|| format!("failed to read response from {}", path.display()));
    }

    if let Some(text) = text {
        return Ok(text);
    }

    if let Some(path) = state {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read session state from {}", path.display()))?;
        let state = SessionState::from_json(&json).context("failed to parse session state")?;
        return Ok(state.text);
    }

    let mut buf = String::new();
    std::io::stdin()
        .read_to_string(&mut buf)
        .context("failed to read response from stdin")?;
    Ok(buf)
}

fn print_groups(result: &ScoreResult) {
    use comfy_table::{Cell, Table};

    let mut table = Table::new();
    table.set_header(vec!["Group", "Points", "Matched", "Via"]);

    for outcome in &result.groups {
        let (matched, via) = match &outcome.matched {
            Some(m) => {
                let via = match m.kind {
                    MatchKind::Exact => "exact",
                    MatchKind::Fuzzy => "fuzzy",
                };
                (m.phrase.as_str(), via)
            }
            None => ("-", "-"),
        };
        table.add_row(vec![
            Cell::new(outcome.index + 1),
            Cell::new(format!("{}/{}", outcome.awarded, outcome.points)),
            Cell::new(matched),
            Cell::new(via),
        ]);
    }

    println!("{table}");
}

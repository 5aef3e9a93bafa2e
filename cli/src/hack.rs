use std::io::{BufRead, Write};

use anyhow::{Context, Result, bail};
use termlink_core::{Scoreboard, normalize_candidates};

/// Parses `<word> <likeness>` as typed after a guess was rejected by the terminal.
fn parse_report(line: &str) -> Result<(String, i32)> {
    let mut words = line.split_whitespace();
    let (Some(word), Some(likeness), None) = (words.next(), words.next(), words.next()) else {
        bail!("Expected `<word> <likeness>`, got {line:?}");
    };
    let likeness = likeness
        .parse::<i32>()
        .with_context(|| format!("Invalid likeness {likeness:?}"))?;
    Ok((word.to_lowercase(), likeness))
}

fn print_scoreboard(scoreboard: &Scoreboard, json: bool, out: &mut impl Write) -> Result<()> {
    if json {
        writeln!(out, "{}", serde_json::to_string(scoreboard)?)?;
        return Ok(());
    }

    let width = scoreboard
        .ranked()
        .iter()
        .map(|candidate| candidate.value.chars().count())
        .max()
        .unwrap_or(0);

    for (rank, candidate) in scoreboard.ranked().iter().enumerate() {
        write!(
            out,
            "{:>2}. {:<width$} {:>4}",
            rank + 1,
            candidate.value,
            candidate.total_likeness
        )?;
        for (likeness, peers) in candidate.peers_by_likeness.iter().rev() {
            write!(out, "  {likeness}: {}", peers.join(" "))?;
        }
        writeln!(out)?;
    }

    match scoreboard.len() {
        0 => writeln!(out, "No candidates left")?,
        1 => writeln!(out, "Password: {}", scoreboard.ranked()[0].value)?,
        _ => {
            if let Some(best) = scoreboard.best_guess() {
                writeln!(out, "Try {:?}, then enter `<word> <likeness>`", best.value)?;
            }
        }
    }
    Ok(())
}

/// Scores the candidates, then narrows them down with each reported likeness.
///
/// Without preloaded candidates, they are read from `input` up to the first empty line.
pub fn run(
    candidates: Option<Vec<String>>,
    json: bool,
    input: impl BufRead,
    out: &mut impl Write,
) -> Result<()> {
    let mut lines = input.lines();

    let candidates = match candidates {
        Some(candidates) => candidates,
        None => {
            writeln!(out, "Enter candidate passwords, one per line, empty line to finish:")?;
            let mut raw = Vec::new();
            for line in lines.by_ref() {
                let line = line.context("Failed to read candidate")?;
                if line.trim().is_empty() {
                    break;
                }
                raw.push(line);
            }
            raw
        }
    };

    let mut scoreboard = Scoreboard::submit(candidates);
    print_scoreboard(&scoreboard, json, out)?;

    for line in lines {
        let line = line.context("Failed to read likeness report")?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if matches!(line, "quit" | "q" | "exit") {
            break;
        }

        let (word, likeness) = match parse_report(line) {
            Ok(report) => report,
            Err(err) => {
                writeln!(out, "{err:#}")?;
                continue;
            }
        };
        match scoreboard.report_likeness(&word, likeness) {
            Ok(next) => {
                scoreboard = next;
                print_scoreboard(&scoreboard, json, out)?;
            }
            Err(err) => writeln!(out, "{err}")?,
        }
    }
    Ok(())
}

/// Splits a candidate file into normalized candidates.
pub fn read_candidates(text: &str) -> Vec<String> {
    normalize_candidates(text.lines())
}

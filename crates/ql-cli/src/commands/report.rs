//! Report command for per-game kill statistics.
//!
//! This module implements `ql report`: every log is scanned by its own
//! [`GameScanner`], each finalized game is projected into a [`Report`], and
//! reports are printed human-readable, as JSON, or both.

use std::collections::BTreeMap;
use std::fmt;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use ql_core::{BUFFER_SIZE, Game, GameError, GameScanner, PlayerInfo, Tally};
use rayon::prelude::*;
use serde::Serialize;

/// Placeholder for a statistic with no entries.
const NONE: &str = "-";

/// Which renderings to print.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutputFormat {
    pub human: bool,
    pub json: bool,
}

/// Per-player highlights.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlayerStatistics {
    pub name: String,
    pub score: i32,
    pub kill_count: u32,
    pub favorite_weapon: String,
    pub nemesis: String,
    pub target_practice: String,
    pub vulnerability: String,
}

/// Read-only projection of one finalized game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    pub game: String,
    pub total_kills: u32,
    pub ending_reason: Option<String>,
    pub players: Vec<PlayerStatistics>,
    pub world_enemy: String,
    /// Means of death that were used at least once.
    pub kill_count_by_means: BTreeMap<String, u32>,
}

/// Returns the key with the highest positive count, first in key order on ties.
fn top(tally: &Tally) -> String {
    let mut best: Option<(&str, u32)> = None;
    for (key, &count) in tally {
        if count > best.map_or(0, |(_, c)| c) {
            best = Some((key.as_str(), count));
        }
    }
    best.map_or_else(|| NONE.to_string(), |(key, _)| key.to_string())
}

fn player_statistics(info: &PlayerInfo) -> PlayerStatistics {
    PlayerStatistics {
        name: info.username.clone(),
        score: info.score,
        kill_count: info.kill_count,
        favorite_weapon: top(&info.kills_by_weapon),
        nemesis: top(&info.deaths_by_source_username),
        target_practice: top(&info.kills_by_target_username),
        vulnerability: top(&info.deaths_by_weapon),
    }
}

impl Report {
    /// Builds the report for `game` under the caller-supplied label.
    pub fn new(game: &Game, label: impl Into<String>) -> Self {
        Self {
            game: label.into(),
            total_kills: game.total_kills,
            ending_reason: game.ending_reason.clone(),
            players: game.players.values().map(player_statistics).collect(),
            world_enemy: top(&game.world_kills.kills_by_target_username),
            kill_count_by_means: game
                .kill_count_by_means
                .iter()
                .filter(|&(_, &count)| count > 0)
                .map(|(means, &count)| (means.clone(), count))
                .collect(),
        }
    }

    /// Formats the report as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "-------------------- {} --------------------", self.game)?;
        writeln!(f, "Total kills: {}", self.total_kills)?;
        writeln!(
            f,
            "Game Ending Event: {}",
            self.ending_reason.as_deref().unwrap_or(NONE)
        )?;
        writeln!(f, "World Enemy: {}", self.world_enemy)?;

        writeln!(f, "Kill Means:")?;
        for (means, count) in &self.kill_count_by_means {
            writeln!(f, "  {means}: {count}")?;
        }

        writeln!(f, "Player Statistics:")?;
        for player in &self.players {
            writeln!(f, "  {}", player.name)?;
            writeln!(f, "    Score: {}", player.score)?;
            writeln!(f, "    Kill Count: {}", player.kill_count)?;
            writeln!(f, "    Nemesis: {}", player.nemesis)?;
            writeln!(f, "    Target Practice: {}", player.target_practice)?;
            writeln!(f, "    Favorite Weapon: {}", player.favorite_weapon)?;
            writeln!(f, "    Vulnerability: {}", player.vulnerability)?;
        }
        Ok(())
    }
}

/// Everything one log produced.
#[derive(Debug)]
pub struct LogScan {
    pub path: PathBuf,
    /// Games and failed retrievals, in log order.
    pub results: Vec<Result<Game, GameError>>,
    pub discarded_lines: usize,
}

/// Reconstructs every game in the log at `path`.
pub fn scan_log(path: &Path) -> Result<LogScan> {
    let file = File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    let mut scanner = GameScanner::from_reader(BufReader::with_capacity(BUFFER_SIZE, file));
    let results = scanner.by_ref().collect();

    Ok(LogScan {
        path: path.to_path_buf(),
        results,
        discarded_lines: scanner.discarded_lines(),
    })
}

fn game_label(scan: &LogScan, prefix_file: bool, index: usize) -> String {
    let name = scan
        .path
        .file_name()
        .map_or_else(|| scan.path.display().to_string(), |n| n.to_string_lossy().into_owned());
    if prefix_file {
        format!("{name}:game-{index}")
    } else {
        format!("game-{index}")
    }
}

// ========== Public Interface ==========

/// Runs the report command.
pub fn run(files: &[PathBuf], output: OutputFormat) -> Result<()> {
    let scans = files
        .par_iter()
        .map(|path| scan_log(path))
        .collect::<Result<Vec<_>>>()?;

    let prefix_file = scans.len() > 1;
    for scan in &scans {
        let mut failures = 0usize;
        for (i, result) in scan.results.iter().enumerate() {
            let label = game_label(scan, prefix_file, i + 1);
            let game = match result {
                Ok(game) => game,
                Err(e) => {
                    failures += 1;
                    tracing::error!("error on {label}: {e}");
                    continue;
                }
            };

            let report = Report::new(game, label);
            if output.json {
                println!("{}", report.to_json()?);
            }
            if output.human {
                print!("{report}");
            }
        }

        tracing::info!(
            file = %scan.path.display(),
            games = scan.results.len() - failures,
            failures,
            discarded_lines = scan.discarded_lines,
            "log scanned"
        );
    }

    Ok(())
}

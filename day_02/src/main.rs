use std::{path::PathBuf, str::FromStr};

use anyhow::{Context, Result};
use clap::Parser;
use thiserror::Error;
use tracing::debug;
use tracing_subscriber::EnvFilter;

const MAX_STEP: u32 = 3;

#[derive(Debug, Clone, PartialEq)]
struct Report(Vec<i32>);

impl Report {
    /// Safe when the levels only increase or only decrease, by 1 to 3 each step.
    fn is_safe(&self) -> bool {
        levels_are_safe(&self.0)
    }

    /// Safe when removing at most one level makes the report safe.
    fn is_safe_with_dampener(&self) -> bool {
        self.is_safe()
            || (0..self.0.len()).any(|skipped| {
                let levels = self
                    .0
                    .iter()
                    .enumerate()
                    .filter(|(i, _)| *i != skipped)
                    .map(|(_, level)| *level)
                    .collect::<Vec<_>>();
                levels_are_safe(&levels)
            })
    }
}

fn levels_are_safe(levels: &[i32]) -> bool {
    let steps = levels
        .windows(2)
        .map(|pair| pair[1] - pair[0])
        .collect::<Vec<_>>();

    let gradual = steps
        .iter()
        .all(|step| (1..=MAX_STEP).contains(&step.unsigned_abs()));
    let increasing = steps.iter().all(|step| *step > 0);
    let decreasing = steps.iter().all(|step| *step < 0);

    gradual && (increasing || decreasing)
}

#[derive(Debug, Error)]
enum ReportError {
    #[error("Invalid level: {0}")]
    InvalidLevel(#[from] std::num::ParseIntError),
    #[error("Empty report")]
    EmptyReport,
}

impl FromStr for Report {
    type Err = ReportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let levels = s
            .split_whitespace()
            .map(str::parse)
            .collect::<Result<Vec<_>, _>>()?;
        if levels.is_empty() {
            return Err(ReportError::EmptyReport);
        }

        Ok(Report(levels))
    }
}

fn parse_input(input: &str) -> Result<Vec<Report>, ReportError> {
    input.trim().lines().map(str::parse).collect()
}

#[derive(Debug, Parser)]
struct CliArgs {
    /// Path to the puzzle input
    #[arg(default_value = "input.txt")]
    input_path: PathBuf,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = CliArgs::parse();
    let input = std::fs::read_to_string(&args.input_path)
        .with_context(|| format!("Failed to read input from {}", args.input_path.display()))?;
    let reports = parse_input(&input)?;
    debug!(reports = reports.len(), "Parsed reports");

    // Part 1
    let part_1 = solve_part_1(&reports);
    println!("Part 1: {}", part_1);

    // Part 2
    let part_2 = solve_part_2(&reports);
    println!("Part 2: {}", part_2);

    Ok(())
}

fn solve_part_1(reports: &[Report]) -> usize {
    reports.iter().filter(|report| report.is_safe()).count()
}

fn solve_part_2(reports: &[Report]) -> usize {
    reports
        .iter()
        .filter(|report| report.is_safe_with_dampener())
        .count()
}

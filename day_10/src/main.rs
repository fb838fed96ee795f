use std::{collections::HashSet, path::PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use point::Point;
use thiserror::Error;
use tracing::debug;
use tracing_subscriber::EnvFilter;

const TRAILHEAD: u8 = 0;
const PEAK: u8 = 9;

#[derive(Debug, Error)]
enum MapError {
    #[error("Invalid elevation: {0}")]
    InvalidElevation(char),
    #[error("Row {0} has a different width to the first row")]
    RaggedRow(usize),
}

/// Topographic map, `None` marks an impassable position.
#[derive(Debug, PartialEq, Eq)]
struct Map {
    width: usize,
    height: usize,
    inner: Vec<Vec<Option<u8>>>,
}

impl Map {
    /// Elevation at the given position, `None` if it is OoB or impassable.
    fn elevation(&self, pos: Point) -> Option<u8> {
        if !pos.in_bounds(self.width, self.height) {
            return None;
        }
        *self.inner.get(pos.y as usize)?.get(pos.x as usize)?
    }

    fn trailheads(&self) -> Vec<Point> {
        let mut trailheads = Vec::new();

        for (y, row) in self.inner.iter().enumerate() {
            for (x, elevation) in row.iter().enumerate() {
                if *elevation == Some(TRAILHEAD) {
                    trailheads.push(Point::new(x as i32, y as i32));
                }
            }
        }

        trailheads
    }

    /// Depth first search for hiking trails, climbing exactly one step at a time.
    /// Returns the peak that each distinct trail from `pos` ends on, so a peak shows up once per trail.
    fn trail_ends(&self, pos: Point) -> Vec<Point> {
        let Some(elevation) = self.elevation(pos) else {
            return Vec::new();
        };
        if elevation == PEAK {
            return vec![pos];
        }

        pos.cardinal_neighbours()
            .into_iter()
            .filter(|next| self.elevation(*next) == Some(elevation + 1))
            .flat_map(|next| self.trail_ends(next))
            .collect()
    }

    /// Number of distinct peaks reachable from the trailhead.
    fn score(&self, trailhead: Point) -> usize {
        self.trail_ends(trailhead)
            .into_iter()
            .collect::<HashSet<_>>()
            .len()
    }

    /// Number of distinct trails starting at the trailhead.
    fn rating(&self, trailhead: Point) -> usize {
        self.trail_ends(trailhead).len()
    }

    fn total_score(&self) -> usize {
        self.trailheads().into_iter().map(|t| self.score(t)).sum()
    }

    fn total_rating(&self) -> usize {
        self.trailheads().into_iter().map(|t| self.rating(t)).sum()
    }
}

fn parse_input(input: &str) -> Result<Map, MapError> {
    let inner = input
        .trim()
        .lines()
        .map(|line| {
            line.trim()
                .chars()
                .map(|c| match c {
                    '.' => Ok(None),
                    _ => c
                        .to_digit(10)
                        .map(|digit| Some(digit as u8))
                        .ok_or(MapError::InvalidElevation(c)),
                })
                .collect::<Result<Vec<_>, _>>()
        })
        .collect::<Result<Vec<Vec<_>>, _>>()?;
    let height = inner.len();
    let width = inner.first().map_or(0, Vec::len);

    if let Some(y) = inner.iter().position(|row| row.len() != width) {
        return Err(MapError::RaggedRow(y));
    }

    Ok(Map {
        width,
        height,
        inner,
    })
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
    let map = parse_input(&input)?;
    debug!(
        width = map.width,
        height = map.height,
        trailheads = map.trailheads().len(),
        "Parsed topographic map"
    );

    // Part 1
    let part_1 = solve_part_1(&map);
    println!("Part 1: {}", part_1);

    // Part 2
    let part_2 = solve_part_2(&map);
    println!("Part 2: {}", part_2);

    Ok(())
}

fn solve_part_1(map: &Map) -> usize {
    map.total_score()
}

fn solve_part_2(map: &Map) -> usize {
    map.total_rating()
}

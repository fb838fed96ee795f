use std::{collections::BTreeMap, path::PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use thiserror::Error;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Debug, PartialEq, Clone)]
struct DiskMap<T: DiskMapState> {
    state: T,
}

trait DiskMapState {}

#[derive(Debug, Clone)]
struct Raw(String);
/// Alternating file and free space lengths.
#[derive(Debug, PartialEq, Clone)]
struct Parsed(Vec<usize>);
/// One entry per block, holding the id of the file stored there.
#[derive(Debug, PartialEq, Clone)]
struct Expanded(Vec<Option<usize>>);
#[derive(Debug, PartialEq, Clone)]
struct Compacted(Vec<Option<usize>>);

impl DiskMapState for Raw {}
impl DiskMapState for Parsed {}
impl DiskMapState for Expanded {}
impl DiskMapState for Compacted {}

#[derive(Debug, Error)]
enum DiskMapError {
    #[error("Invalid digit in disk map: {0}")]
    InvalidDigit(char),
}

impl DiskMap<Raw> {
    fn new(input: String) -> DiskMap<Raw> {
        DiskMap { state: Raw(input) }
    }

    fn parse(self) -> Result<DiskMap<Parsed>, DiskMapError> {
        let lengths = self
            .state
            .0
            .trim()
            .chars()
            .map(|c| {
                c.to_digit(10)
                    .map(|digit| digit as usize)
                    .ok_or(DiskMapError::InvalidDigit(c))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(DiskMap {
            state: Parsed(lengths),
        })
    }
}

impl DiskMap<Parsed> {
    /// Lays out the blocks, even entries are files (numbered in order) and odd entries are free space.
    fn expand(self) -> DiskMap<Expanded> {
        let mut blocks = Vec::new();

        for (i, &length) in self.state.0.iter().enumerate() {
            let block = if i % 2 == 0 { Some(i / 2) } else { None };
            blocks.extend(std::iter::repeat(block).take(length));
        }

        DiskMap {
            state: Expanded(blocks),
        }
    }
}

impl DiskMap<Expanded> {
    /// Moves single file blocks from the end of the disk into the leftmost free block,
    /// until there are no gaps left between file blocks.
    fn compact(self) -> DiskMap<Compacted> {
        let mut blocks = self.state.0;

        let mut free = blocks.iter().position(Option::is_none);
        let mut file = blocks.iter().rposition(Option::is_some);

        // The two pointers move towards each other, once they cross the disk is compact.
        while let (Some(f), Some(b)) = (free, file) {
            if f >= b {
                break;
            }
            blocks.swap(f, b);

            free = blocks[f + 1..]
                .iter()
                .position(Option::is_none)
                .map(|offset| f + 1 + offset);
            file = blocks[..b].iter().rposition(Option::is_some);
        }

        DiskMap {
            state: Compacted(blocks),
        }
    }

    /// Moves whole files, highest id first, into the leftmost span of free blocks that can hold them.
    /// Files only move left and each file is attempted once. May leave gaps behind.
    fn compact_whole_files(self) -> DiskMap<Compacted> {
        let mut blocks = self.state.0;

        for (start, length) in file_extents(&blocks).into_values().rev() {
            let Some(target) = find_free_span(&blocks[..start], length) else {
                continue;
            };
            for offset in 0..length {
                blocks.swap(target + offset, start + offset);
            }
        }

        DiskMap {
            state: Compacted(blocks),
        }
    }
}

impl DiskMap<Compacted> {
    /// Sum of every block position multiplied by the id of the file stored there.
    fn checksum(&self) -> usize {
        self.state
            .0
            .iter()
            .enumerate()
            .filter_map(|(i, block)| block.map(|id| i * id))
            .sum()
    }
}

/// Maps each file id to the (start, length) of its blocks.
fn file_extents(blocks: &[Option<usize>]) -> BTreeMap<usize, (usize, usize)> {
    let mut extents = BTreeMap::new();

    for (i, block) in blocks.iter().enumerate() {
        if let Some(id) = block {
            extents.entry(*id).or_insert((i, 0)).1 += 1;
        }
    }

    extents
}

/// Start of the leftmost run of free blocks at least `length` long.
fn find_free_span(blocks: &[Option<usize>], length: usize) -> Option<usize> {
    let mut run_start = 0;
    let mut run_length = 0;

    for (i, block) in blocks.iter().enumerate() {
        if block.is_some() {
            run_length = 0;
            continue;
        }
        if run_length == 0 {
            run_start = i;
        }
        run_length += 1;
        if run_length >= length {
            return Some(run_start);
        }
    }

    None
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
    let disk_map = DiskMap::new(input).parse()?.expand();
    debug!(blocks = disk_map.state.0.len(), "Expanded disk map");

    // Part 1
    let part_1 = solve_part_1(disk_map.clone());
    println!("Part 1: {}", part_1);

    // Part 2
    let part_2 = solve_part_2(disk_map);
    println!("Part 2: {}", part_2);

    Ok(())
}

fn solve_part_1(disk_map: DiskMap<Expanded>) -> usize {
    disk_map.compact().checksum()
}

fn solve_part_2(disk_map: DiskMap<Expanded>) -> usize {
    disk_map.compact_whole_files().checksum()
}

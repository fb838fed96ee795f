use std::{collections::HashMap, path::PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use thiserror::Error;
use tracing::debug;
use tracing_subscriber::EnvFilter;

type LocationId = u32;

/// The two historians' lists, read column by column.
#[derive(Debug, PartialEq)]
struct Lists {
    left: Vec<LocationId>,
    right: Vec<LocationId>,
}

impl Lists {
    /// Pairs the smallest ids of each list, then the next smallest and so on,
    /// and adds up how far apart each pair is.
    fn total_distance(&self) -> u32 {
        let mut left = self.left.clone();
        let mut right = self.right.clone();
        left.sort_unstable();
        right.sort_unstable();

        left.iter().zip(&right).map(|(a, b)| a.abs_diff(*b)).sum()
    }

    /// Each left id weighted by how often it appears in the right list.
    fn similarity_score(&self) -> u32 {
        let mut occurrences: HashMap<LocationId, u32> = HashMap::new();
        for id in &self.right {
            *occurrences.entry(*id).or_insert(0) += 1;
        }

        self.left
            .iter()
            .map(|id| id * occurrences.get(id).copied().unwrap_or(0))
            .sum()
    }
}

#[derive(Debug, Error)]
enum ListError {
    #[error("Invalid location id: {0}")]
    ParseInt(#[from] std::num::ParseIntError),
    #[error("Expected two location ids on line {0}")]
    WrongColumnCount(usize),
}

fn parse_input(input: &str) -> Result<Lists, ListError> {
    let mut left = Vec::new();
    let mut right = Vec::new();

    for (i, line) in input.trim().lines().enumerate() {
        let ids = line.split_whitespace().collect::<Vec<_>>();
        let [a, b] = ids[..] else {
            return Err(ListError::WrongColumnCount(i + 1));
        };
        left.push(a.parse()?);
        right.push(b.parse()?);
    }

    Ok(Lists { left, right })
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
    let lists = parse_input(&input)?;
    debug!(ids = lists.left.len(), "Parsed location lists");

    // Part 1
    let part_1 = solve_part_1(&lists);
    println!("Part 1: {}", part_1);

    // Part 2
    let part_2 = solve_part_2(&lists);
    println!("Part 2: {}", part_2);

    Ok(())
}

fn solve_part_1(lists: &Lists) -> u32 {
    lists.total_distance()
}

fn solve_part_2(lists: &Lists) -> u32 {
    lists.similarity_score()
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_INPUT: &str = r#"
        3   4
        4   3
        2   5
        1   3
        3   9
        3   3
    "#;

    fn create_test_lists() -> Lists {
        Lists {
            left: vec![3, 4, 2, 1, 3, 3],
            right: vec![4, 3, 5, 3, 9, 3],
        }
    }

    #[test]
    fn test_parse_input() {
        let expected = create_test_lists();
        let actual = parse_input(TEST_INPUT).unwrap();

        assert_eq!(expected, actual);
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(
            parse_input("1   2\n3"),
            Err(ListError::WrongColumnCount(2))
        ));
        assert!(matches!(
            parse_input("1   2   3"),
            Err(ListError::WrongColumnCount(1))
        ));
        assert!(matches!(parse_input("1   x"), Err(ListError::ParseInt(_))));
    }

    #[test]
    fn test_total_distance_does_not_reorder_lists() {
        let lists = create_test_lists();

        assert_eq!(lists.total_distance(), 11);
        assert_eq!(lists.left, vec![3, 4, 2, 1, 3, 3]);
    }

    #[test]
    fn test_similarity_ignores_missing_ids() {
        let lists = Lists {
            left: vec![1, 2, 7],
            right: vec![7, 7, 3],
        };

        assert_eq!(lists.similarity_score(), 14);
    }

    #[test]
    fn test_solve_part_1() {
        let lists = parse_input(TEST_INPUT).unwrap();

        assert_eq!(11, solve_part_1(&lists));
    }

    #[test]
    fn test_solve_part_2() {
        let lists = parse_input(TEST_INPUT).unwrap();

        assert_eq!(31, solve_part_2(&lists));
    }
}

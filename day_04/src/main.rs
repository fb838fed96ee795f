use std::{collections::HashMap, path::PathBuf, str::FromStr};

use anyhow::{Context, Result};
use clap::Parser;
use point::Point;
use thiserror::Error;
use tracing::debug;
use tracing_subscriber::EnvFilter;

const WORD: [Letter; 4] = [Letter::X, Letter::M, Letter::A, Letter::S];

/// The eight compass directions a word can be read in.
const DIRECTIONS: [(i32, i32); 8] = [
    (0, -1),
    (1, -1),
    (1, 0),
    (1, 1),
    (0, 1),
    (-1, 1),
    (-1, 0),
    (-1, -1),
];

#[derive(Debug, PartialEq, Eq, Copy, Clone)]
enum Letter {
    X,
    M,
    A,
    S,
}

impl TryFrom<char> for Letter {
    type Error = WordSearchError;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        match c {
            'X' => Ok(Letter::X),
            'M' => Ok(Letter::M),
            'A' => Ok(Letter::A),
            'S' => Ok(Letter::S),
            _ => Err(WordSearchError::InvalidLetter(c)),
        }
    }
}

#[derive(Debug, Error)]
enum WordSearchError {
    #[error("Invalid letter: {0}")]
    InvalidLetter(char),
}

#[derive(Debug, PartialEq)]
struct WordSearch {
    letters: HashMap<Point, Letter>,
}

impl WordSearch {
    fn letter(&self, pos: Point) -> Option<Letter> {
        self.letters.get(&pos).copied()
    }

    fn positions_of(&self, letter: Letter) -> impl Iterator<Item = Point> + '_ {
        self.letters
            .iter()
            .filter(move |(_, l)| **l == letter)
            .map(|(pos, _)| *pos)
    }

    /// Occurrences of XMAS in any of the eight directions, overlaps included.
    fn count_xmas(&self) -> usize {
        self.positions_of(WORD[0])
            .map(|start| {
                DIRECTIONS
                    .iter()
                    .filter(|(dx, dy)| self.spells_word(start, Point::new(*dx, *dy)))
                    .count()
            })
            .sum()
    }

    fn spells_word(&self, start: Point, step: Point) -> bool {
        let mut pos = start;
        for letter in WORD {
            if self.letter(pos) != Some(letter) {
                return false;
            }
            pos = pos + step;
        }
        true
    }

    /// Occurrences of two diagonal MAS words crossing on their shared A.
    fn count_x_mas(&self) -> usize {
        self.positions_of(Letter::A)
            .filter(|centre| {
                let corner = |dx, dy| self.letter(*centre + Point::new(dx, dy));
                is_mas_diagonal(corner(-1, -1), corner(1, 1))
                    && is_mas_diagonal(corner(1, -1), corner(-1, 1))
            })
            .count()
    }
}

/// The two ends of a diagonal through an A spell MAS when one is M and the other S.
fn is_mas_diagonal(a: Option<Letter>, b: Option<Letter>) -> bool {
    matches!(
        (a, b),
        (Some(Letter::M), Some(Letter::S)) | (Some(Letter::S), Some(Letter::M))
    )
}

impl FromStr for WordSearch {
    type Err = WordSearchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut letters = HashMap::new();

        for (y, line) in s.trim().lines().enumerate() {
            for (x, c) in line.trim().chars().enumerate() {
                letters.insert(Point::new(x as i32, y as i32), Letter::try_from(c)?);
            }
        }

        Ok(WordSearch { letters })
    }
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
    let word_search = input.parse::<WordSearch>()?;
    debug!(letters = word_search.letters.len(), "Parsed word search");

    // Part 1
    let part_1 = solve_part_1(&word_search);
    println!("Part 1: {}", part_1);

    // Part 2
    let part_2 = solve_part_2(&word_search);
    println!("Part 2: {}", part_2);

    Ok(())
}

fn solve_part_1(word_search: &WordSearch) -> usize {
    word_search.count_xmas()
}

fn solve_part_2(word_search: &WordSearch) -> usize {
    word_search.count_x_mas()
}

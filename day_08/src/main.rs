use std::{
    collections::{HashMap, HashSet},
    path::PathBuf,
};

use anyhow::{Context, Result};
use clap::Parser;
use itertools::Itertools;
use point::Point;
use thiserror::Error;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Debug, PartialEq)]
struct Map {
    width: usize,
    height: usize,
    /// Antenna locations grouped by frequency.
    antennas: HashMap<char, Vec<Point>>,
}

impl Map {
    fn count_unique_antinodes(&self) -> usize {
        self.antenna_pairs()
            .flat_map(|(a, b)| {
                let (c, d) = antinode_pair(a, b);
                [c, d]
            })
            .filter(|antinode| self.in_bounds(*antinode))
            .collect::<HashSet<_>>()
            .len()
    }

    fn count_unique_resonant_antinodes(&self) -> usize {
        self.antenna_pairs()
            .flat_map(|(a, b)| self.line_through(a, a.reduced_direction_to(b)))
            .collect::<HashSet<_>>()
            .len()
    }

    /// Every unordered pair of antennas sharing a frequency.
    fn antenna_pairs(&self) -> impl Iterator<Item = (Point, Point)> + '_ {
        self.antennas
            .values()
            .flat_map(|locations| locations.iter().copied().tuple_combinations())
    }

    /// All in bounds points reachable from the origin in whole steps, in both directions.
    /// The step must not be the zero vector.
    fn line_through(&self, origin: Point, step: Point) -> Vec<Point> {
        let mut points = Vec::new();

        let mut current = origin;
        while self.in_bounds(current) {
            points.push(current);
            current = current + step;
        }

        // Generate points in the negative direction
        current = origin - step;
        while self.in_bounds(current) {
            points.push(current);
            current = current - step;
        }

        points
    }

    fn in_bounds(&self, point: Point) -> bool {
        point.in_bounds(self.width, self.height)
    }
}

/// The two points in line with the antennas where one antenna is twice as far away as the other.
fn antinode_pair(a: Point, b: Point) -> (Point, Point) {
    let delta = a - b;

    (a + delta, b - delta)
}

#[derive(Debug, Error)]
enum MapParseError {
    #[error("Invalid character in map: {0}")]
    InvalidCharacter(char),
}

fn parse_input(input: &str) -> Result<Map, MapParseError> {
    let mut antennas: HashMap<char, Vec<Point>> = HashMap::new();
    let mut width = 0;
    let mut height = 0;

    for (y, line) in input.trim().lines().enumerate() {
        height = y + 1;
        for (x, c) in line.trim().chars().enumerate() {
            width = width.max(x + 1);
            if is_valid_antenna(c) {
                antennas
                    .entry(c)
                    .or_default()
                    .push(Point::new(x as i32, y as i32));
            } else if !is_valid_empty(c) {
                return Err(MapParseError::InvalidCharacter(c));
            }
        }
    }

    Ok(Map {
        width,
        height,
        antennas,
    })
}

fn is_valid_antenna(c: char) -> bool {
    c.is_ascii_alphanumeric()
}

fn is_valid_empty(c: char) -> bool {
    c == '.'
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
        frequencies = map.antennas.len(),
        "Parsed antenna map"
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
    map.count_unique_antinodes()
}

fn solve_part_2(map: &Map) -> usize {
    map.count_unique_resonant_antinodes()
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_INPUT: &str = r#"
        ............
        ........0...
        .....0......
        .......0....
        ....0.......
        ......A.....
        ............
        ............
        ........A...
        .........A..
        ............
        ............
    "#;

    fn create_test_map() -> Map {
        let antennas = HashMap::from([
            (
                '0',
                vec![
                    Point::new(8, 1),
                    Point::new(5, 2),
                    Point::new(7, 3),
                    Point::new(4, 4),
                ],
            ),
            (
                'A',
                vec![Point::new(6, 5), Point::new(8, 8), Point::new(9, 9)],
            ),
        ]);

        Map {
            width: 12,
            height: 12,
            antennas,
        }
    }

    #[test]
    fn test_parse_input() {
        let expected = create_test_map();
        let actual = parse_input(TEST_INPUT).unwrap();

        assert_eq!(expected, actual);
    }

    #[test]
    fn test_parse_invalid_character() {
        assert!(matches!(
            parse_input("..a\n.#."),
            Err(MapParseError::InvalidCharacter('#'))
        ));
    }

    #[test]
    fn test_antinode_pair() {
        let a = Point::new(2, 1);
        let b = Point::new(1, 2);

        let (c, d) = antinode_pair(a, b);

        assert_eq!(c, Point::new(3, 0));
        assert_eq!(d, Point::new(0, 3));

        // Try reversing the order, it should still work
        let (c, d) = antinode_pair(b, a);

        assert_eq!(c, Point::new(0, 3));
        assert_eq!(d, Point::new(3, 0));
    }

    #[test]
    fn test_line_through() {
        let map = Map {
            width: 4,
            height: 4,
            antennas: HashMap::new(),
        };
        let a = Point::new(2, 1);
        let b = Point::new(1, 2);

        let actual: HashSet<Point> = map
            .line_through(a, a.reduced_direction_to(b))
            .into_iter()
            .collect();

        // Cast to a set because the order of the antinodes is not important
        let expected = HashSet::from([
            Point::new(0, 3),
            Point::new(1, 2),
            Point::new(2, 1),
            Point::new(3, 0),
        ]);

        assert_eq!(expected, actual);
    }

    #[test]
    fn test_resonant_antinodes_use_smallest_step() {
        // The antennas are two steps apart, so the cell between them resonates too.
        let map = Map {
            width: 5,
            height: 5,
            antennas: HashMap::from([('a', vec![Point::new(0, 0), Point::new(2, 2)])]),
        };

        assert_eq!(map.count_unique_resonant_antinodes(), 5);
    }

    #[test]
    fn test_count_unique_antinodes() {
        let map = create_test_map();
        let actual = map.count_unique_antinodes();

        assert_eq!(actual, 14);
    }

    #[test]
    fn test_count_unique_resonant_antinodes() {
        let map = create_test_map();
        let actual = map.count_unique_resonant_antinodes();

        assert_eq!(actual, 34);
    }

    #[test]
    fn test_single_antenna_has_no_antinodes() {
        let map = parse_input("...\n.x.\n...").unwrap();

        assert_eq!(solve_part_1(&map), 0);
        assert_eq!(solve_part_2(&map), 0);
    }
}

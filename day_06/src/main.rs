use std::{
    collections::{HashMap, HashSet},
    path::PathBuf,
};

use anyhow::{Context, Result};
use clap::Parser;
use point::Point;
use rayon::iter::{IntoParallelIterator, ParallelIterator};
use thiserror::Error;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
enum Direction {
    North,
    East,
    South,
    West,
}

impl Direction {
    fn from_symbol(symbol: char) -> Option<Direction> {
        match symbol {
            '^' => Some(Direction::North),
            '>' => Some(Direction::East),
            'v' => Some(Direction::South),
            '<' => Some(Direction::West),
            _ => None,
        }
    }

    /// Pivot 90 degrees clockwise.
    fn turn_right(self) -> Self {
        match self {
            Direction::North => Direction::East,
            Direction::East => Direction::South,
            Direction::South => Direction::West,
            Direction::West => Direction::North,
        }
    }

    /// Unit step in this direction. North is towards row 0.
    fn displacement(&self) -> Point {
        match self {
            Direction::North => Point::new(0, -1),
            Direction::East => Point::new(1, 0),
            Direction::South => Point::new(0, 1),
            Direction::West => Point::new(-1, 0),
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
struct Guard {
    location: Point,
    facing: Direction,
}

impl Guard {
    fn next_step(&self) -> Point {
        self.location + self.facing.displacement()
    }

    fn turn_right(self) -> Guard {
        Guard {
            facing: self.facing.turn_right(),
            ..self
        }
    }

    fn step_forward(self) -> Guard {
        Guard {
            location: self.next_step(),
            ..self
        }
    }
}

/// Every (location, facing) pair the guard was seen in during a single patrol.
#[derive(Debug, Default, PartialEq, Eq)]
struct Ledger(HashMap<Point, HashSet<Direction>>);

impl Ledger {
    /// Returns false if the guard already stood on this location facing the same way.
    fn record(&mut self, guard: Guard) -> bool {
        self.0
            .entry(guard.location)
            .or_default()
            .insert(guard.facing)
    }

    fn distinct_cells(&self) -> usize {
        self.0.len()
    }

    fn visited_cells(&self) -> impl Iterator<Item = Point> + '_ {
        self.0.keys().copied()
    }
}

#[derive(Debug, PartialEq, Eq)]
enum Outcome {
    /// The guard walked off the map.
    Exited(Ledger),
    /// The guard repeated a (location, facing) pair and will patrol forever.
    Looped,
}

/// 2d top down map of the patrol area with the guard's starting state.
/// Origin point in the upper left position.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Simulation {
    width: usize,
    height: usize,
    obstacles: HashSet<Point>,
    guard: Guard,
}

impl Simulation {
    /// Derives a new simulation with one extra obstacle, the original is left as is.
    fn with_obstacle(&self, obstacle: Point) -> Simulation {
        let mut obstacles = self.obstacles.clone();
        obstacles.insert(obstacle);

        Simulation {
            width: self.width,
            height: self.height,
            obstacles,
            guard: self.guard,
        }
    }

    /// Walks the guard from its starting state until it leaves the map or loops.
    /// Every call starts over with a fresh ledger.
    fn run(&self) -> Outcome {
        let mut ledger = Ledger::default();
        let mut guard = self.guard;

        while guard.location.in_bounds(self.width, self.height) {
            if !ledger.record(guard) {
                return Outcome::Looped;
            }

            guard = if self.obstacles.contains(&guard.next_step()) {
                guard.turn_right()
            } else {
                guard.step_forward()
            };
        }

        Outcome::Exited(ledger)
    }
}

#[derive(Debug, Error)]
enum ParsingError {
    #[error("Empty input")]
    EmptyInput,
    #[error("Invalid Character: {0}")]
    InvalidCharacter(char),
    #[error("No guard found in input")]
    MissingGuard,
    #[error("Found multiple guards, at {0} and {1}")]
    MultipleGuards(Point, Point),
}

#[derive(Debug, Error)]
enum PatrolError {
    #[error("The guard never leaves the map")]
    EndlessPatrol,
}

fn parse_input(input: &str) -> Result<Simulation, ParsingError> {
    let lines = input.trim().lines().collect::<Vec<_>>();
    let Some(first_line) = lines.first() else {
        return Err(ParsingError::EmptyInput);
    };

    let width = first_line.trim().chars().count();
    let height = lines.len();
    let mut obstacles = HashSet::new();
    let mut guard: Option<Guard> = None;

    for (y, line) in lines.iter().enumerate() {
        for (x, symbol) in line.trim().chars().enumerate() {
            let location = Point::new(x as i32, y as i32);
            match symbol {
                '.' => {}
                '#' => {
                    obstacles.insert(location);
                }
                _ => {
                    let facing = Direction::from_symbol(symbol)
                        .ok_or(ParsingError::InvalidCharacter(symbol))?;
                    if let Some(existing) = guard {
                        return Err(ParsingError::MultipleGuards(existing.location, location));
                    }
                    guard = Some(Guard { location, facing });
                }
            }
        }
    }

    let Some(guard) = guard else {
        return Err(ParsingError::MissingGuard);
    };

    Ok(Simulation {
        width,
        height,
        obstacles,
        guard,
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
    let raw_input = std::fs::read_to_string(&args.input_path)
        .with_context(|| format!("Failed to read input from {}", args.input_path.display()))?;
    let simulation = parse_input(&raw_input)?;
    debug!(
        width = simulation.width,
        height = simulation.height,
        obstacles = simulation.obstacles.len(),
        "Parsed patrol map"
    );

    let baseline = simulation.run();

    // Part 1
    let part_1 = solve_part_1(&baseline)?;
    println!("Part 1: {}", part_1);

    // Part 2
    let part_2 = solve_part_2(&simulation, &baseline);
    println!("Part 2: {}", part_2);

    Ok(())
}

fn solve_part_1(baseline: &Outcome) -> Result<usize, PatrolError> {
    match baseline {
        Outcome::Exited(ledger) => Ok(ledger.distinct_cells()),
        Outcome::Looped => Err(PatrolError::EndlessPatrol),
    }
}

/// `baseline` must be the outcome of running `simulation` unmodified.
fn solve_part_2(simulation: &Simulation, baseline: &Outcome) -> usize {
    // Nothing to obstruct if the guard never leaves in the first place.
    let Outcome::Exited(ledger) = baseline else {
        return 0;
    };

    count_loop_obstructions(simulation, ledger)
}

/// Tries an extra obstacle on every cell of the original path, except the starting cell,
/// and counts the placements which trap the guard in a loop.
fn count_loop_obstructions(simulation: &Simulation, ledger: &Ledger) -> usize {
    let start = simulation.guard.location;
    let candidates = ledger
        .visited_cells()
        .filter(|cell| *cell != start)
        .collect::<Vec<_>>();
    let candidate_count = candidates.len();

    let loops = candidates
        .into_par_iter()
        .filter(|cell| matches!(simulation.with_obstacle(*cell).run(), Outcome::Looped))
        .count();
    debug!(
        candidates = candidate_count,
        loops, "Finished obstruction search"
    );

    loops
}

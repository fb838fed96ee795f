use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use thiserror::Error;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Copy, Clone, PartialEq)]
enum Operator {
    Add,
    Multiply,
    Concatenate,
}

impl Operator {
    /// `None` when the result does not fit in a `u64`.
    fn apply(self, a: u64, b: u64) -> Option<u64> {
        match self {
            Operator::Add => a.checked_add(b),
            Operator::Multiply => a.checked_mul(b),
            Operator::Concatenate => concatenate(a, b),
        }
    }
}

/// Appends the digits of `b` to `a`, so `concatenate(12, 345) == Some(12345)`.
fn concatenate(a: u64, b: u64) -> Option<u64> {
    let digits = b.checked_ilog10().unwrap_or(0) + 1;
    a.checked_mul(10u64.checked_pow(digits)?)?.checked_add(b)
}

#[derive(Debug, PartialEq)]
struct Equation {
    test_value: u64,
    numbers: Vec<u64>,
}

impl Equation {
    /// Whether some choice of operators, evaluated strictly left to right, produces the test value.
    fn is_solvable(&self, operators: &[Operator]) -> bool {
        let Some((first, rest)) = self.numbers.split_first() else {
            return false;
        };
        reaches(self.test_value, *first, rest, operators)
    }
}

fn reaches(target: u64, current: u64, numbers: &[u64], operators: &[Operator]) -> bool {
    let Some((next, rest)) = numbers.split_first() else {
        return current == target;
    };

    operators.iter().any(|operator| {
        operator
            .apply(current, *next)
            .is_some_and(|value| reaches(target, value, rest, operators))
    })
}

#[derive(Debug, Error)]
enum ParseError {
    #[error("Failed to parse number: {0}")]
    ParseInt(#[from] std::num::ParseIntError),
    #[error("Malformed equation: {0}")]
    Malformed(String),
}

fn parse_input(input: &str) -> Result<Vec<Equation>, ParseError> {
    let mut equations = Vec::new();

    for line in input.trim().lines().map(str::trim) {
        let (test_value, numbers) = line
            .split_once(':')
            .ok_or_else(|| ParseError::Malformed(line.to_string()))?;
        let numbers = numbers
            .split_whitespace()
            .map(str::parse)
            .collect::<Result<Vec<_>, _>>()?;
        if numbers.is_empty() {
            return Err(ParseError::Malformed(line.to_string()));
        }
        equations.push(Equation {
            test_value: test_value.trim().parse()?,
            numbers,
        });
    }

    Ok(equations)
}

/// Sum of the test values of the equations that can be solved with the given operators.
fn total_calibration(equations: &[Equation], operators: &[Operator]) -> u64 {
    equations
        .iter()
        .filter(|equation| equation.is_solvable(operators))
        .map(|equation| equation.test_value)
        .sum()
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
    let equations = parse_input(&input)?;
    debug!(equations = equations.len(), "Parsed calibration equations");

    // Part 1
    let part_1 = solve_part_1(&equations);
    println!("Part 1: {}", part_1);

    // Part 2
    let part_2 = solve_part_2(&equations);
    println!("Part 2: {}", part_2);

    Ok(())
}

fn solve_part_1(equations: &[Equation]) -> u64 {
    total_calibration(equations, &[Operator::Add, Operator::Multiply])
}

fn solve_part_2(equations: &[Equation]) -> u64 {
    total_calibration(
        equations,
        &[Operator::Add, Operator::Multiply, Operator::Concatenate],
    )
}

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use regex::Regex;
use thiserror::Error;
use tracing::debug;
use tracing_subscriber::EnvFilter;

const INSTRUCTION_PATTERN: &str = r"mul\((?<a>\d{1,3}),(?<b>\d{1,3})\)|do\(\)|don't\(\)";

#[derive(Debug, Copy, Clone, PartialEq)]
enum Instruction {
    Mul(u32, u32),
    Do,
    Dont,
}

#[derive(Debug, Error)]
enum ProgramError {
    #[error("Invalid instruction pattern: {0}")]
    Pattern(#[from] regex::Error),
    #[error("Invalid operand: {0}")]
    Operand(#[from] std::num::ParseIntError),
}

/// Pulls the well formed instructions out of the corrupted memory, in order.
fn parse_instructions(memory: &str) -> Result<Vec<Instruction>, ProgramError> {
    let regex = Regex::new(INSTRUCTION_PATTERN)?;
    let mut instructions = Vec::new();

    for cap in regex.captures_iter(memory) {
        let instruction = match (cap.name("a"), cap.name("b")) {
            (Some(a), Some(b)) => Instruction::Mul(a.as_str().parse()?, b.as_str().parse()?),
            _ if &cap[0] == "don't()" => Instruction::Dont,
            _ => Instruction::Do,
        };
        instructions.push(instruction);
    }

    Ok(instructions)
}

/// Sum of every multiplication, ignoring `do()` and `don't()`.
fn sum_products(instructions: &[Instruction]) -> u32 {
    instructions
        .iter()
        .map(|instruction| match instruction {
            Instruction::Mul(a, b) => a * b,
            _ => 0,
        })
        .sum()
}

/// Sum of the multiplications which are enabled. Multiplications start enabled,
/// `don't()` disables them until the next `do()`.
fn sum_enabled_products(instructions: &[Instruction]) -> u32 {
    let mut enabled = true;
    let mut sum = 0;

    for instruction in instructions {
        match instruction {
            Instruction::Do => enabled = true,
            Instruction::Dont => enabled = false,
            Instruction::Mul(a, b) if enabled => sum += a * b,
            Instruction::Mul(..) => {}
        }
    }

    sum
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
    let instructions = parse_instructions(&input)?;
    debug!(instructions = instructions.len(), "Scanned memory");

    // Part 1
    let part_1 = solve_part_1(&instructions);
    println!("Part 1: {}", part_1);

    // Part 2
    let part_2 = solve_part_2(&instructions);
    println!("Part 2: {}", part_2);

    Ok(())
}

fn solve_part_1(instructions: &[Instruction]) -> u32 {
    sum_products(instructions)
}

fn solve_part_2(instructions: &[Instruction]) -> u32 {
    sum_enabled_products(instructions)
}

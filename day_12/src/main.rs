use std::{
    collections::{HashMap, HashSet, VecDeque},
    path::PathBuf,
    str::FromStr,
};

use anyhow::{Context, Result};
use clap::Parser;
use point::Point;
use thiserror::Error;
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Index pairs into `Point::cardinal_neighbours` which meet at a corner of the plot:
/// north-east, east-south, south-west, west-north.
const CORNERS: [(usize, usize); 4] = [(0, 1), (1, 2), (2, 3), (3, 0)];

/// A maximal 4-connected group of plots growing the same plant.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Region {
    plant: char,
    plots: HashSet<Point>,
}

impl Region {
    fn area(&self) -> usize {
        self.plots.len()
    }

    /// Number of plot edges which border a plot outside of the region, including the map edge.
    fn perimeter(&self) -> usize {
        self.plots
            .iter()
            .map(|plot| {
                plot.cardinal_neighbours()
                    .iter()
                    .filter(|neighbour| !self.plots.contains(*neighbour))
                    .count()
            })
            .sum()
    }

    /// Number of straight fence sections. Equal to the number of corners of the region.
    fn sides(&self) -> usize {
        self.plots
            .iter()
            .map(|plot| {
                let neighbours = plot.cardinal_neighbours();
                CORNERS
                    .iter()
                    .filter(|(i, j)| {
                        let (a, b) = (neighbours[*i], neighbours[*j]);
                        let diagonal = a + b - *plot;
                        match (self.plots.contains(&a), self.plots.contains(&b)) {
                            // Convex, the fence turns around the plot.
                            (false, false) => true,
                            // Concave, the fence turns around the diagonal plot.
                            (true, true) => !self.plots.contains(&diagonal),
                            _ => false,
                        }
                    })
                    .count()
            })
            .sum()
    }

    fn price(&self) -> usize {
        self.area() * self.perimeter()
    }

    fn discounted_price(&self) -> usize {
        self.area() * self.sides()
    }
}

#[derive(Debug)]
struct Garden {
    plots: HashMap<Point, char>,
}

impl Garden {
    /// Flood fills the garden into regions.
    fn find_regions(&self) -> Regions {
        let mut regions = Vec::new();
        // All the plots which already belong to a region.
        let mut completed = HashSet::<Point>::new();

        for (start, plant) in &self.plots {
            if completed.contains(start) {
                continue;
            }

            let mut region = HashSet::from([*start]);
            let mut queue = VecDeque::from([*start]);

            while let Some(current) = queue.pop_front() {
                for neighbour in current.cardinal_neighbours() {
                    if self.plots.get(&neighbour) == Some(plant) && region.insert(neighbour) {
                        queue.push_back(neighbour);
                    }
                }
            }

            let region = Region {
                plant: *plant,
                plots: region,
            };
            debug!(
                plant = %region.plant,
                area = region.area(),
                perimeter = region.perimeter(),
                "Found region"
            );

            completed.extend(region.plots.iter().copied());
            regions.push(region);
        }

        Regions(regions)
    }
}

#[derive(Debug, Error)]
enum GardenError {
    #[error("Empty input")]
    EmptyInput,
    #[error("Invalid plant: {0}")]
    InvalidPlant(char),
}

impl FromStr for Garden {
    type Err = GardenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(GardenError::EmptyInput);
        }

        let mut plots = HashMap::new();

        for (y, line) in s.lines().enumerate() {
            for (x, c) in line.trim().chars().enumerate() {
                if !c.is_ascii_uppercase() {
                    return Err(GardenError::InvalidPlant(c));
                }
                plots.insert(Point::new(x as i32, y as i32), c);
            }
        }

        Ok(Garden { plots })
    }
}

#[derive(Debug)]
struct Regions(Vec<Region>);

impl Regions {
    fn total_price(&self) -> usize {
        self.0.iter().map(Region::price).sum()
    }

    fn total_discounted_price(&self) -> usize {
        self.0.iter().map(Region::discounted_price).sum()
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
    let regions = input.parse::<Garden>()?.find_regions();
    debug!(regions = regions.0.len(), "Mapped garden");

    // Part 1
    let part_1 = regions.total_price();
    println!("Part 1: {}", part_1);

    // Part 2
    let part_2 = regions.total_discounted_price();
    println!("Part 2: {}", part_2);

    Ok(())
}

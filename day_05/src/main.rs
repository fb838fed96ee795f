use std::{
    collections::{HashMap, HashSet, VecDeque},
    path::PathBuf,
    str::FromStr,
};

use anyhow::{Context, Result};
use clap::Parser;
use thiserror::Error;
use tracing::debug;
use tracing_subscriber::EnvFilter;

type Page = u32;

/// `before` must be printed at some point before `after`, when an update contains both.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
struct OrderingRule {
    before: Page,
    after: Page,
}

#[derive(Debug, Clone, PartialEq)]
struct Update(Vec<Page>);

impl Update {
    fn is_ordered(&self, rules: &[OrderingRule]) -> bool {
        let positions = self
            .0
            .iter()
            .enumerate()
            .map(|(i, page)| (*page, i))
            .collect::<HashMap<_, _>>();

        rules.iter().all(|rule| {
            match (positions.get(&rule.before), positions.get(&rule.after)) {
                (Some(before), Some(after)) => before < after,
                // Rules only apply when both pages are present.
                _ => true,
            }
        })
    }

    /// Reorders the pages with a topological sort over the rules which apply to this update.
    fn reordered(&self, rules: &[OrderingRule]) -> Result<Update, PrintQueueError> {
        let pages = self.0.iter().copied().collect::<HashSet<_>>();
        let mut followers: HashMap<Page, Vec<Page>> = HashMap::new();
        let mut in_degree: HashMap<Page, usize> = pages.iter().map(|page| (*page, 0)).collect();

        for rule in rules
            .iter()
            .filter(|rule| pages.contains(&rule.before) && pages.contains(&rule.after))
        {
            followers.entry(rule.before).or_default().push(rule.after);
            *in_degree.entry(rule.after).or_default() += 1;
        }

        // Start from the pages in their current order so ties keep their relative order.
        let mut queue = self
            .0
            .iter()
            .copied()
            .filter(|page| in_degree.get(page) == Some(&0))
            .collect::<VecDeque<_>>();
        let mut sorted = Vec::with_capacity(self.0.len());

        while let Some(page) = queue.pop_front() {
            sorted.push(page);
            for next in followers.get(&page).into_iter().flatten() {
                let Some(degree) = in_degree.get_mut(next) else {
                    continue;
                };
                *degree -= 1;
                if *degree == 0 {
                    queue.push_back(*next);
                }
            }
        }

        if sorted.len() != self.0.len() {
            return Err(PrintQueueError::CyclicRules(self.0.clone()));
        }

        Ok(Update(sorted))
    }

    /// Updates always hold an odd number of pages.
    fn middle_page(&self) -> Page {
        self.0[self.0.len() / 2]
    }
}

#[derive(Debug, PartialEq)]
struct PrintQueue {
    rules: Vec<OrderingRule>,
    updates: Vec<Update>,
}

impl PrintQueue {
    fn ordered_updates(&self) -> impl Iterator<Item = &Update> {
        self.updates
            .iter()
            .filter(move |update| update.is_ordered(&self.rules))
    }

    fn unordered_updates(&self) -> impl Iterator<Item = &Update> {
        self.updates
            .iter()
            .filter(move |update| !update.is_ordered(&self.rules))
    }
}

#[derive(Debug, Error)]
enum PrintQueueError {
    #[error("Invalid page number: {0}")]
    InvalidPage(#[from] std::num::ParseIntError),
    #[error("Expected a blank line between the rules and the updates")]
    MissingSeparator,
    #[error("Invalid rule: {0}")]
    MalformedRule(String),
    #[error("Update has no middle page: {0}")]
    EvenLength(String),
    #[error("Rules contain a cycle for update {0:?}")]
    CyclicRules(Vec<Page>),
}

impl FromStr for PrintQueue {
    type Err = PrintQueueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.replace("\r\n", "\n");
        let lines = s.trim().lines().map(str::trim).collect::<Vec<_>>();
        let separator = lines
            .iter()
            .position(|line| line.is_empty())
            .ok_or(PrintQueueError::MissingSeparator)?;
        let (rule_lines, update_lines) = (&lines[..separator], &lines[separator + 1..]);

        let mut rules = Vec::new();
        for line in rule_lines {
            let (before, after) = line
                .split_once('|')
                .ok_or_else(|| PrintQueueError::MalformedRule(line.to_string()))?;
            rules.push(OrderingRule {
                before: before.parse()?,
                after: after.parse()?,
            });
        }

        let mut updates = Vec::new();
        for line in update_lines.iter().filter(|line| !line.is_empty()) {
            let pages = line
                .split(',')
                .map(str::parse)
                .collect::<Result<Vec<Page>, _>>()?;
            if pages.len() % 2 == 0 {
                return Err(PrintQueueError::EvenLength(line.to_string()));
            }
            updates.push(Update(pages));
        }

        Ok(PrintQueue { rules, updates })
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
    let print_queue = input.parse::<PrintQueue>()?;
    debug!(
        rules = print_queue.rules.len(),
        updates = print_queue.updates.len(),
        "Parsed print queue"
    );

    // Part 1
    let part_1 = solve_part_1(&print_queue);
    println!("Part 1: {}", part_1);

    // Part 2
    let part_2 = solve_part_2(&print_queue)?;
    println!("Part 2: {}", part_2);

    Ok(())
}

fn solve_part_1(print_queue: &PrintQueue) -> Page {
    print_queue.ordered_updates().map(Update::middle_page).sum()
}

fn solve_part_2(print_queue: &PrintQueue) -> Result<Page, PrintQueueError> {
    print_queue
        .unordered_updates()
        .map(|update| {
            update
                .reordered(&print_queue.rules)
                .map(|update| update.middle_page())
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_INPUT: &str = r#"
        47|53
        97|13
        97|61
        97|47
        75|29
        61|13
        75|53
        29|13
        97|29
        53|29
        61|53
        97|53
        61|29
        47|13
        75|47
        97|75
        47|61
        75|61
        47|29
        75|13
        53|13

        75,47,61,53,29
        97,61,53,29,13
        75,29,13
        75,97,47,61,53
        61,13,29
        97,13,75,29,47
    "#;

    fn rule(before: Page, after: Page) -> OrderingRule {
        OrderingRule { before, after }
    }

    fn create_test_print_queue() -> PrintQueue {
        PrintQueue {
            rules: [
                (47, 53),
                (97, 13),
                (97, 61),
                (97, 47),
                (75, 29),
                (61, 13),
                (75, 53),
                (29, 13),
                (97, 29),
                (53, 29),
                (61, 53),
                (97, 53),
                (61, 29),
                (47, 13),
                (75, 47),
                (97, 75),
                (47, 61),
                (75, 61),
                (47, 29),
                (75, 13),
                (53, 13),
            ]
            .into_iter()
            .map(|(before, after)| rule(before, after))
            .collect(),
            updates: vec![
                Update(vec![75, 47, 61, 53, 29]),
                Update(vec![97, 61, 53, 29, 13]),
                Update(vec![75, 29, 13]),
                Update(vec![75, 97, 47, 61, 53]),
                Update(vec![61, 13, 29]),
                Update(vec![97, 13, 75, 29, 47]),
            ],
        }
    }

    #[test]
    fn test_parse_input() {
        let expected = create_test_print_queue();
        let actual = TEST_INPUT.parse::<PrintQueue>().unwrap();

        assert_eq!(expected, actual);
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(
            "1|2\n3|4".parse::<PrintQueue>(),
            Err(PrintQueueError::MissingSeparator)
        ));
        assert!(matches!(
            "1-2\n\n1,2,3".parse::<PrintQueue>(),
            Err(PrintQueueError::MalformedRule(_))
        ));
        assert!(matches!(
            "1|2\n\n1,2".parse::<PrintQueue>(),
            Err(PrintQueueError::EvenLength(_))
        ));
        assert!(matches!(
            "1|2\n\n1,x,3".parse::<PrintQueue>(),
            Err(PrintQueueError::InvalidPage(_))
        ));
    }

    #[test]
    fn test_update_is_ordered() {
        let print_queue = create_test_print_queue();
        let expected = [true, true, true, false, false, false];

        for (update, ordered) in print_queue.updates.iter().zip(expected) {
            assert_eq!(update.is_ordered(&print_queue.rules), ordered, "{:?}", update);
        }
    }

    #[test]
    fn test_reordered() {
        let print_queue = create_test_print_queue();
        let cases = [
            (3, vec![97, 75, 47, 61, 53]),
            (4, vec![61, 29, 13]),
            (5, vec![97, 75, 47, 29, 13]),
        ];

        for (i, expected) in cases {
            let actual = print_queue.updates[i]
                .reordered(&print_queue.rules)
                .unwrap();
            assert_eq!(actual, Update(expected));
        }
    }

    #[test]
    fn test_reordered_rejects_cycles() {
        let rules = [rule(1, 2), rule(2, 3), rule(3, 1)];
        let update = Update(vec![1, 2, 3]);

        assert!(matches!(
            update.reordered(&rules),
            Err(PrintQueueError::CyclicRules(_))
        ));
    }

    #[test]
    fn test_solve_part_1() {
        let print_queue = TEST_INPUT.parse::<PrintQueue>().unwrap();

        assert_eq!(143, solve_part_1(&print_queue));
    }

    #[test]
    fn test_solve_part_2() {
        let print_queue = TEST_INPUT.parse::<PrintQueue>().unwrap();

        assert_eq!(123, solve_part_2(&print_queue).unwrap());
    }
}

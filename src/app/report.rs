//! Result aggregation
//!
//! Turns the outcomes collected during a run, in whatever order they arrived,
//! into a report ordered by item identifier. Building a report is a pure
//! function of the outcome set.

use std::collections::BTreeMap;
use std::fmt::Write as _;

use serde::{Deserialize, Serialize};

use crate::app::models::Outcome;

/// Outcomes of one run, sorted by item and split by success
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunReport {
    successes: Vec<Outcome>,
    failures: Vec<Outcome>,
}

impl RunReport {
    /// Sort outcomes ascending by item id and partition them
    pub fn from_outcomes(mut outcomes: Vec<Outcome>) -> Self {
        outcomes.sort_by_key(|outcome| outcome.item_id);
        let (successes, failures) = outcomes.into_iter().partition(Outcome::is_success);
        Self {
            successes,
            failures,
        }
    }

    /// Successful outcomes in item order
    pub fn successes(&self) -> &[Outcome] {
        &self.successes
    }

    /// Failed outcomes in item order
    pub fn failures(&self) -> &[Outcome] {
        &self.failures
    }

    /// Number of successful items
    pub fn success_count(&self) -> usize {
        self.successes.len()
    }

    /// Number of failed items
    pub fn failure_count(&self) -> usize {
        self.failures.len()
    }

    /// Total number of outcomes
    pub fn total(&self) -> usize {
        self.successes.len() + self.failures.len()
    }

    /// Retrieved names in item order
    pub fn names(&self) -> Vec<&str> {
        self.successes.iter().map(|o| o.payload.as_str()).collect()
    }

    /// `#<id> - <name>` for every success
    pub fn success_lines(&self) -> Vec<String> {
        self.successes
            .iter()
            .map(|o| format!("#{} - {}", o.item_id, o.payload))
            .collect()
    }

    /// `#<id> - <label> - <detail>` for every failure
    pub fn failure_lines(&self) -> Vec<String> {
        self.failures
            .iter()
            .map(|o| format!("#{} - {} - {}", o.item_id, o.status.label(), o.payload))
            .collect()
    }

    /// Failure counts keyed by label
    pub fn failures_by_label(&self) -> BTreeMap<&'static str, usize> {
        let mut counts = BTreeMap::new();
        for outcome in &self.failures {
            *counts.entry(outcome.status.label()).or_insert(0) += 1;
        }
        counts
    }

    /// Render the report as printable text
    pub fn render(&self, include_failures: bool) -> String {
        let mut out = String::new();
        for line in self.success_lines() {
            let _ = writeln!(out, "{}", line);
        }

        if include_failures && !self.failures.is_empty() {
            let _ = writeln!(out, "Failures ({}):", self.failures.len());
            for line in self.failure_lines() {
                let _ = writeln!(out, "{}", line);
            }
        }

        out
    }
}

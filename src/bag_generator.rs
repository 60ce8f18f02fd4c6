use std::fmt::Display;
use std::fs::File;
use std::hash::Hash;
use std::io::{self, Write};

use log::debug;

use crate::bag_format::to_set_literal;
use crate::bag_hash;
use crate::bag_multiset::Multiset;

/// Renders the algebra between two multisets as a line-oriented report.
pub struct ReportGenerator<T> {
    pub left: Multiset<T>,
    pub right: Multiset<T>,
}

/// Set literal with occurrences sorted, so reports are reproducible.
pub fn sorted_literal<T: Ord + Display>(set: &Multiset<T>) -> String {
    let mut items: Vec<&T> = set.iter().collect();
    items.sort();
    to_set_literal(items)
}

impl<T: Eq + Hash + Clone + Ord + Display> ReportGenerator<T> {
    pub fn new(left: Multiset<T>, right: Multiset<T>) -> Self {
        ReportGenerator { left, right }
    }

    pub fn render_lines(&self) -> Vec<String> {
        let (left, right) = (&self.left, &self.right);
        vec![
            format!("left = {}", sorted_literal(left)),
            format!("right = {}", sorted_literal(right)),
            format!("union = {}", sorted_literal(&(left + right))),
            format!("intersection = {}", sorted_literal(&(left & right))),
            format!("left - right = {}", sorted_literal(&(left - right))),
            format!("right - left = {}", sorted_literal(&(right - left))),
            format!("symmetric_difference = {}", sorted_literal(&(left ^ right))),
            format!("left <= right = {}", left.is_subset(right)),
            format!("left >= right = {}", left.is_superset(right)),
            format!("hash(left) = {}", bag_hash::hash_one(left)),
            format!("hash(right) = {}", bag_hash::hash_one(right)),
        ]
    }

    /// Writes the report to `output_path`, one line per result.
    pub fn write_to(&self, output_path: &str) -> io::Result<()> {
        let lines = self.render_lines();
        debug!("Writing {} report lines to {}", lines.len(), output_path);
        let mut file = File::create(output_path)?;
        for line in lines {
            writeln!(file, "{}", line)?;
        }
        Ok(())
    }
}

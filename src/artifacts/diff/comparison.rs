use crate::artifacts::merge::line_merge::{line_body, split_lines};
use std::cmp::Ordering;
use std::fmt;

/// A line position where both snapshots have a line and the lines differ
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineDifference {
    pub line: usize,
    pub left: String,
    pub right: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comparison {
    differences: Vec<LineDifference>,
    left_lines: usize,
    right_lines: usize,
}

impl Comparison {
    pub fn compare(left: &[u8], right: &[u8]) -> Self {
        let left_lines = split_lines(left);
        let right_lines = split_lines(right);

        let differences = left_lines
            .iter()
            .zip(right_lines.iter())
            .enumerate()
            .filter(|(_, (l, r))| line_body(l) != line_body(r))
            .map(|(position, (l, r))| LineDifference {
                line: position + 1,
                left: String::from_utf8_lossy(line_body(l)).into_owned(),
                right: String::from_utf8_lossy(line_body(r)).into_owned(),
            })
            .collect();

        Comparison {
            differences,
            left_lines: left_lines.len(),
            right_lines: right_lines.len(),
        }
    }

    pub fn differences(&self) -> &[LineDifference] {
        &self.differences
    }

    pub fn length_differs(&self) -> bool {
        self.left_lines != self.right_lines
    }

    pub fn is_identical(&self) -> bool {
        self.differences.is_empty() && !self.length_differs()
    }
}

impl fmt::Display for Comparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for difference in &self.differences {
            writeln!(
                f,
                "Difference at line {}: {:?} vs {:?}",
                difference.line, difference.left, difference.right
            )?;
        }

        match self.left_lines.cmp(&self.right_lines) {
            Ordering::Equal if self.differences.is_empty() => writeln!(f, "Contents are identical."),
            Ordering::Equal => Ok(()),
            _ => writeln!(
                f,
                "Contents differ in length: {} vs {} lines.",
                self.left_lines, self.right_lines
            ),
        }
    }
}

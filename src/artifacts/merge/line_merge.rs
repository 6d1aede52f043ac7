//! Line-level merge of two snapshots
//!
//! ## Algorithm
//!
//! 1. Split both sides into lines (terminators are kept but ignored when
//!    comparing, so `a\n` and `a\r\n` and a final unterminated `a` are equal).
//! 2. For every position both sides have a line:
//!    - equal lines are emitted once, with the `from` side's bytes
//!    - different lines are emitted as a labelled conflict block holding both
//!      variants, `from` first
//! 3. The remaining lines of the longer side are appended verbatim. A length
//!    mismatch is treated as pure extension and never marked as a conflict.
//!
//! This is deliberately position-indexed: inserting a line at the top of one
//! side shifts every following position and reports them all as conflicting.
//!
//! ## Conflict block
//!
//! ```text
//! <<<<<<< feature_20230101120000000000
//! line from the source commit
//! =======
//! line from the destination commit
//! >>>>>>> main_20230101110000000000
//! ```

use crate::artifacts::merge::{CONFLICT_END_MARKER, CONFLICT_SEPARATOR, CONFLICT_START_MARKER};
use derive_new::new;

/// Labels written on the conflict markers
#[derive(Debug, Clone, Copy, new)]
pub struct MergeLabels<'l> {
    from: &'l str,
    to: &'l str,
}

/// Result of merging two snapshots
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeOutcome {
    content: Vec<u8>,
    /// 1-based line positions that produced a conflict block
    conflicts: Vec<usize>,
}

impl MergeOutcome {
    pub fn content(&self) -> &[u8] {
        &self.content
    }

    pub fn conflicts(&self) -> &[usize] {
        &self.conflicts
    }

    pub fn had_conflict(&self) -> bool {
        !self.conflicts.is_empty()
    }
}

/// Split into lines, keeping each line's terminator
pub(crate) fn split_lines(content: &[u8]) -> Vec<&[u8]> {
    content.split_inclusive(|byte| *byte == b'\n').collect()
}

/// A line without its `\n` or `\r\n` terminator
pub(crate) fn line_body(line: &[u8]) -> &[u8] {
    let line = line.strip_suffix(b"\n").unwrap_or(line);
    line.strip_suffix(b"\r").unwrap_or(line)
}

pub fn merge(from: &[u8], to: &[u8], labels: MergeLabels<'_>) -> MergeOutcome {
    let from_lines = split_lines(from);
    let to_lines = split_lines(to);

    let mut content = Vec::with_capacity(from.len().max(to.len()));
    let mut conflicts = Vec::new();

    for (position, (from_line, to_line)) in from_lines.iter().zip(to_lines.iter()).enumerate() {
        if line_body(from_line) == line_body(to_line) {
            push_line(&mut content, from_line);
        } else {
            tracing::trace!(line = position + 1, "conflicting line");
            conflicts.push(position + 1);
            push_conflict_block(&mut content, from_line, to_line, labels);
        }
    }

    let overlap = from_lines.len().min(to_lines.len());
    let tail = if from_lines.len() > overlap {
        &from_lines[overlap..]
    } else {
        &to_lines[overlap..]
    };
    for line in tail {
        push_line(&mut content, line);
    }

    MergeOutcome { content, conflicts }
}

// An unterminated line can only stay unterminated if nothing follows it.
fn push_line(content: &mut Vec<u8>, line: &[u8]) {
    if content.last().is_some_and(|byte| *byte != b'\n') {
        content.push(b'\n');
    }
    content.extend_from_slice(line);
}

fn push_terminated(content: &mut Vec<u8>, line: &[u8]) {
    push_line(content, line);
    if !line.ends_with(b"\n") {
        content.push(b'\n');
    }
}

fn push_conflict_block(content: &mut Vec<u8>, from: &[u8], to: &[u8], labels: MergeLabels<'_>) {
    push_terminated(
        content,
        format!("{CONFLICT_START_MARKER} {}", labels.from).as_bytes(),
    );
    push_terminated(content, from);
    push_terminated(content, CONFLICT_SEPARATOR.as_bytes());
    push_terminated(content, to);
    push_terminated(
        content,
        format!("{CONFLICT_END_MARKER} {}", labels.to).as_bytes(),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;
    use rstest::rstest;

    fn labels() -> MergeLabels<'static> {
        MergeLabels::new("from", "to")
    }

    fn merged(from: &str, to: &str) -> (String, MergeOutcome) {
        let outcome = merge(from.as_bytes(), to.as_bytes(), labels());
        (String::from_utf8(outcome.content().to_vec()).unwrap(), outcome)
    }

    #[test]
    fn identical_content_merges_cleanly() {
        let (content, outcome) = merged("a\nb\nc\n", "a\nb\nc\n");

        assert!(!outcome.had_conflict());
        assert_eq!(content, "a\nb\nc\n");
    }

    #[test]
    fn differing_line_produces_conflict_block() {
        let (content, outcome) = merged("a\nb\n", "a\nc\n");

        assert!(outcome.had_conflict());
        assert_eq!(outcome.conflicts(), &[2]);
        assert_eq!(
            content,
            "a\n<<<<<<< from\nb\n=======\nc\n>>>>>>> to\n"
        );
    }

    #[rstest]
    #[case::longer_destination("a", "a\nb\nc", "a\nb\nc")]
    #[case::longer_source("a\nb\nc\n", "a\n", "a\nb\nc\n")]
    #[case::empty_source("", "x\ny\n", "x\ny\n")]
    #[case::both_empty("", "", "")]
    fn tail_of_longer_side_is_appended_without_conflict(
        #[case] from: &str,
        #[case] to: &str,
        #[case] expected: &str,
    ) {
        let (content, outcome) = merged(from, to);

        assert!(!outcome.had_conflict());
        assert_eq!(content, expected);
    }

    #[test]
    fn line_terminators_do_not_count_as_differences() {
        let (content, outcome) = merged("a\r\nb", "a\nb\n");

        assert!(!outcome.had_conflict());
        assert_eq!(content, "a\r\nb");
    }

    #[test]
    fn unterminated_last_line_in_conflict_is_terminated() {
        let (content, outcome) = merged("x", "y");

        assert!(outcome.had_conflict());
        assert_eq!(content, "<<<<<<< from\nx\n=======\ny\n>>>>>>> to\n");
    }

    #[test]
    fn merge_is_positional_not_content_aware() {
        // inserting a line at the top shifts every following position
        let (_, outcome) = merged("new\na\nb\n", "a\nb\n");

        assert_eq!(outcome.conflicts(), &[1, 2]);
    }

    proptest! {
        #[test]
        fn merging_content_with_itself_is_identity(content in "([a-z ]{0,8}\n){0,10}[a-z]{0,3}") {
            let outcome = merge(content.as_bytes(), content.as_bytes(), labels());

            prop_assert!(!outcome.had_conflict());
            prop_assert_eq!(outcome.content(), content.as_bytes());
        }

        #[test]
        fn conflicts_are_exactly_the_differing_overlapping_positions(
            from in prop::collection::vec("[a-c]{1,2}", 0..12),
            to in prop::collection::vec("[a-c]{1,2}", 0..12),
        ) {
            let from_text = from.iter().map(|line| format!("{line}\n")).collect::<String>();
            let to_text = to.iter().map(|line| format!("{line}\n")).collect::<String>();

            let outcome = merge(from_text.as_bytes(), to_text.as_bytes(), labels());

            let expected = from
                .iter()
                .zip(to.iter())
                .enumerate()
                .filter(|(_, (a, b))| a != b)
                .map(|(position, _)| position + 1)
                .collect::<Vec<_>>();
            prop_assert_eq!(outcome.conflicts(), expected.as_slice());
        }
    }
}

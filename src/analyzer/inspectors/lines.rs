//! Raw-line formatting checks shared by both language variants

use super::Tally;

pub const TRAILING_WHITESPACE_PENALTY: i32 = 2;
pub const BLANK_RUN_PENALTY: i32 = 3;

/// 1-indexed lines that end in whitespace
pub fn trailing_whitespace_lines(lines: &[&str]) -> Vec<usize> {
    lines
        .iter()
        .enumerate()
        .filter(|(_, line)| line.trim_end() != **line)
        .map(|(idx, _)| idx + 1)
        .collect()
}

/// 1-indexed start of every window of three consecutive empty lines
pub fn blank_run_starts(lines: &[&str]) -> Vec<usize> {
    lines
        .windows(3)
        .enumerate()
        .filter(|(_, w)| w.iter().all(|line| line.is_empty()))
        .map(|(idx, _)| idx + 1)
        .collect()
}

/// Deduct for trailing whitespace, reporting the offending lines
pub fn check_trailing_whitespace(tally: &mut Tally, lines: &[&str]) {
    let offending = trailing_whitespace_lines(lines);
    if !offending.is_empty() {
        tally.deduct(
            TRAILING_WHITESPACE_PENALTY,
            format!(
                "Trailing whitespaces found on lines: {:?}. Remove extra spaces.",
                offending
            ),
        );
    }
}

/// Deduct for runs of three or more blank lines, reporting where they start
pub fn check_blank_runs(tally: &mut Tally, lines: &[&str]) {
    let starts = blank_run_starts(lines);
    if !starts.is_empty() {
        tally.deduct(
            BLANK_RUN_PENALTY,
            format!(
                "Excessive blank lines on lines: {:?}. Limit consecutive blank lines to 2.",
                starts
            ),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trailing_whitespace() {
        let lines: Vec<&str> = "a = 1 \nb = 2\nc = 3\t".split('\n').collect();
        assert_eq!(trailing_whitespace_lines(&lines), vec![1, 3]);
    }

    #[test]
    fn test_blank_runs_overlap() {
        let lines: Vec<&str> = "a\n\n\n\n\nb".split('\n').collect();
        assert_eq!(blank_run_starts(&lines), vec![2, 3]);
    }

    #[test]
    fn test_two_blank_lines_are_fine() {
        let lines: Vec<&str> = "a\n\n\nb".split('\n').collect();
        assert!(blank_run_starts(&lines).is_empty());
    }

    #[test]
    fn test_short_input() {
        let lines: Vec<&str> = vec![""];
        assert!(blank_run_starts(&lines).is_empty());
        assert!(trailing_whitespace_lines(&lines).is_empty());
    }
}

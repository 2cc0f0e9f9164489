use serde::{Deserialize, Serialize};

use crate::condition::TaskKind;
use crate::error::IndexOutOfBounds;

/// Outcome of scoring one submitted symbol
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Evaluation {
    pub expected: char,
    pub correct: bool,
    pub next_index: usize,
}

/// Scores `submitted` against the symbol of `target` at `index`.
///
/// Letters compare case-insensitively. The index advances whether or not the
/// response is correct: the experiment measures errors, it does not gate on them.
pub fn evaluate(
    target: &str,
    index: usize,
    submitted: char,
) -> Result<Evaluation, IndexOutOfBounds> {
    let expected = target.chars().nth(index).ok_or(IndexOutOfBounds {
        index,
        len: target.chars().count(),
    })?;

    Ok(Evaluation {
        expected,
        correct: same_symbol(expected, submitted),
        next_index: index + 1,
    })
}

fn same_symbol(a: char, b: char) -> bool {
    a == b || a.to_uppercase().eq(b.to_uppercase())
}

/// A subject's accepted response, as published to the controller
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseEvent {
    pub source: TaskKind,
    pub symbol: char,
    pub expected: char,
    pub correct: bool,
    /// Progress index the response was scored against
    pub index: usize,
    pub timestamp_ns: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_correct_response() {
        let e = evaluate("1234567888", 0, '1').unwrap();
        assert!(e.correct);
        assert_eq!(e.expected, '1');
        assert_eq!(e.next_index, 1);
    }

    #[test]
    fn test_wrong_response_still_advances() {
        let e = evaluate("1234567888", 4, '9').unwrap();
        assert!(!e.correct);
        assert_eq!(e.expected, '5');
        assert_eq!(e.next_index, 5);
    }

    #[test]
    fn test_letters_are_case_insensitive() {
        assert!(evaluate("ABCDEFGHIJ", 2, 'c').unwrap().correct);
        assert!(evaluate("ABCDEFGHIJ", 2, 'C').unwrap().correct);
        assert!(!evaluate("ABCDEFGHIJ", 2, 'd').unwrap().correct);
    }

    #[test]
    fn test_index_past_end() {
        assert_eq!(
            evaluate("ABCDEFGHIJ", 10, 'A'),
            Err(IndexOutOfBounds { index: 10, len: 10 })
        );
    }
}

//! What the subject is allowed to see of a task at a given point of progress.
//!
//! EASY discloses the single symbol at the current index. HARD discloses the
//! whole content at index 0 and nothing afterwards. Both are pure: the same
//! `(condition, content, index)` always renders the same text.

use crate::condition::Condition;
use crate::error::IndexOutOfBounds;
use crate::trial::{SubtractionTrial, TaskContent};

/// Placeholder for a hidden symbol
pub const MASK: char = '#';

/// Rendered view of one task panel
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reveal {
    Typing {
        word: String,
    },
    Subtraction {
        minuend: String,
        subtrahend: String,
        /// Running count of submitted digits (EASY) or blank (HARD)
        entry: String,
    },
}

/// Dispatches to the per-kind reveal for `content`.
pub fn reveal(content: &TaskContent, index: usize) -> Result<Reveal, IndexOutOfBounds> {
    match content {
        TaskContent::Typing(t) => Ok(Reveal::Typing {
            word: reveal_word(t.condition(), t.word(), index)?,
        }),
        TaskContent::Subtraction(s) => reveal_subtraction(s, index),
    }
}

/// Typing view of `word` at `index`.
pub fn reveal_word(
    condition: Condition,
    word: &str,
    index: usize,
) -> Result<String, IndexOutOfBounds> {
    check_bounds(index, word.chars().count())?;
    Ok(disclose(condition, word, index))
}

/// Subtraction view at `index`: both operands under the condition's policy,
/// plus the mask-and-count entry line for EASY.
pub fn reveal_subtraction(
    trial: &SubtractionTrial,
    index: usize,
) -> Result<Reveal, IndexOutOfBounds> {
    check_bounds(index, trial.solution().len())?;

    let condition = trial.condition();
    let entry = match condition {
        Condition::Easy => mask(index),
        Condition::Hard => String::new(),
    };

    Ok(Reveal::Subtraction {
        minuend: disclose(condition, trial.minuend(), index),
        subtrahend: disclose(condition, trial.subtrahend(), index),
        entry,
    })
}

/// `n` mask symbols
pub fn mask(n: usize) -> String {
    std::iter::repeat_n(MASK, n).collect()
}

fn disclose(condition: Condition, symbols: &str, index: usize) -> String {
    match condition {
        Condition::Easy => symbols
            .chars()
            .enumerate()
            .map(|(i, c)| if i == index { c } else { MASK })
            .collect(),
        Condition::Hard if index == 0 => symbols.to_string(),
        Condition::Hard => mask(symbols.chars().count()),
    }
}

fn check_bounds(index: usize, len: usize) -> Result<(), IndexOutOfBounds> {
    if index >= len {
        Err(IndexOutOfBounds { index, len })
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trial::TypingTrial;

    #[test]
    fn test_easy_word_reveals_one_letter() {
        assert_eq!(
            reveal_word(Condition::Easy, "ABCDEFGHIJ", 0).unwrap(),
            "A#########"
        );
        assert_eq!(
            reveal_word(Condition::Easy, "ABCDEFGHIJ", 3).unwrap(),
            "###D######"
        );
        assert_eq!(
            reveal_word(Condition::Easy, "ABCDEFGHIJ", 9).unwrap(),
            "#########J"
        );
    }

    #[test]
    fn test_hard_word_reveals_only_at_start() {
        assert_eq!(
            reveal_word(Condition::Hard, "ABCDEFGHIJ", 0).unwrap(),
            "ABCDEFGHIJ"
        );
        for i in 1..10 {
            assert_eq!(
                reveal_word(Condition::Hard, "ABCDEFGHIJ", i).unwrap(),
                "##########"
            );
        }
    }

    #[test]
    fn test_out_of_bounds_fails_fast() {
        assert_eq!(
            reveal_word(Condition::Easy, "ABCDEFGHIJ", 10),
            Err(IndexOutOfBounds { index: 10, len: 10 })
        );
        let s = SubtractionTrial::from_numbers(Condition::Hard, 5, 3).unwrap();
        assert!(reveal_subtraction(&s, 10).is_err());
    }

    #[test]
    fn test_easy_subtraction_counts_submitted_digits() {
        let s = SubtractionTrial::from_numbers(Condition::Easy, 8888888888, 7654321000).unwrap();
        assert_eq!(
            reveal_subtraction(&s, 2).unwrap(),
            Reveal::Subtraction {
                minuend: "##8#######".into(),
                subtrahend: "##5#######".into(),
                entry: "##".into(),
            }
        );
    }

    #[test]
    fn test_hard_subtraction_hides_after_first_digit() {
        let s = SubtractionTrial::from_numbers(Condition::Hard, 8888888888, 7654321000).unwrap();
        assert_eq!(
            reveal_subtraction(&s, 0).unwrap(),
            Reveal::Subtraction {
                minuend: "8888888888".into(),
                subtrahend: "7654321000".into(),
                entry: String::new(),
            }
        );
        assert_eq!(
            reveal_subtraction(&s, 4).unwrap(),
            Reveal::Subtraction {
                minuend: "##########".into(),
                subtrahend: "##########".into(),
                entry: String::new(),
            }
        );
    }

    #[test]
    fn test_reveal_dispatches_on_content() {
        let t: TaskContent = TypingTrial::new(Condition::Easy, "abcdefghij")
            .unwrap()
            .into();
        assert_eq!(
            reveal(&t, 1).unwrap(),
            Reveal::Typing {
                word: "#B########".into()
            }
        );
    }
}

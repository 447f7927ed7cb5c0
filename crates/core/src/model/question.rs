use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// One of the four option positions of a multiple-choice question.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AnswerLetter {
    A,
    B,
    C,
    D,
}

impl AnswerLetter {
    /// All letters in option order.
    pub const ALL: [AnswerLetter; 4] = [
        AnswerLetter::A,
        AnswerLetter::B,
        AnswerLetter::C,
        AnswerLetter::D,
    ];

    /// Returns the uppercase letter character.
    #[must_use]
    pub fn as_char(self) -> char {
        match self {
            AnswerLetter::A => 'A',
            AnswerLetter::B => 'B',
            AnswerLetter::C => 'C',
            AnswerLetter::D => 'D',
        }
    }

    /// Position of this letter in the options array (A = 0, D = 3).
    #[must_use]
    pub fn index(self) -> usize {
        match self {
            AnswerLetter::A => 0,
            AnswerLetter::B => 1,
            AnswerLetter::C => 2,
            AnswerLetter::D => 3,
        }
    }

    /// Letter at the given options position, if within range.
    #[must_use]
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }
}

impl fmt::Display for AnswerLetter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// Error type for parsing an answer letter from user or model output.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("expected one of A, B, C or D")]
pub struct ParseLetterError;

impl FromStr for AnswerLetter {
    type Err = ParseLetterError;

    /// Case-insensitive; surrounding whitespace is ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "A" | "a" => Ok(AnswerLetter::A),
            "B" | "b" => Ok(AnswerLetter::B),
            "C" | "c" => Ok(AnswerLetter::C),
            "D" | "d" => Ok(AnswerLetter::D),
            _ => Err(ParseLetterError),
        }
    }
}

/// Errors raised when constructing a `QuestionItem`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QuestionError {
    #[error("expected exactly 4 options, got {0}")]
    OptionCount(usize),
}

/// A generated multiple-choice question.
///
/// Invariant: exactly 4 options, addressed as letters A–D, with the correct
/// letter drawn from that same set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionItem {
    text: String,
    options: [String; 4],
    correct: AnswerLetter,
}

impl QuestionItem {
    /// Builds a question from parsed model output.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError::OptionCount` unless exactly 4 options are given.
    pub fn new(
        text: impl Into<String>,
        options: Vec<String>,
        correct: AnswerLetter,
    ) -> Result<Self, QuestionError> {
        let options: [String; 4] = options
            .try_into()
            .map_err(|v: Vec<String>| QuestionError::OptionCount(v.len()))?;
        Ok(Self {
            text: text.into(),
            options,
            correct,
        })
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn options(&self) -> &[String; 4] {
        &self.options
    }

    /// Option text at the given letter.
    #[must_use]
    pub fn option(&self, letter: AnswerLetter) -> &str {
        &self.options[letter.index()]
    }

    #[must_use]
    pub fn correct(&self) -> AnswerLetter {
        self.correct
    }

    /// Whether the given raw answer text names the correct letter.
    ///
    /// Comparison is trim + case-insensitive letter equality; full option
    /// text is not accepted.
    #[must_use]
    pub fn is_correct(&self, answer: &str) -> bool {
        answer
            .parse::<AnswerLetter>()
            .is_ok_and(|letter| letter == self.correct)
    }
}

// ─── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn options() -> Vec<String> {
        vec!["one".into(), "two".into(), "three".into(), "four".into()]
    }

    #[test]
    fn letter_parse_is_case_insensitive() {
        assert_eq!("a".parse::<AnswerLetter>().unwrap(), AnswerLetter::A);
        assert_eq!(" B ".parse::<AnswerLetter>().unwrap(), AnswerLetter::B);
        assert_eq!("d".parse::<AnswerLetter>().unwrap(), AnswerLetter::D);
    }

    #[test]
    fn letter_parse_rejects_other_input() {
        assert!("E".parse::<AnswerLetter>().is_err());
        assert!("A.".parse::<AnswerLetter>().is_err());
        assert!("".parse::<AnswerLetter>().is_err());
    }

    #[test]
    fn letter_index_round_trip() {
        for letter in AnswerLetter::ALL {
            assert_eq!(AnswerLetter::from_index(letter.index()), Some(letter));
        }
        assert_eq!(AnswerLetter::from_index(4), None);
    }

    #[test]
    fn question_requires_exactly_four_options() {
        let err = QuestionItem::new("q?", vec!["only".into()], AnswerLetter::A).unwrap_err();
        assert!(matches!(err, QuestionError::OptionCount(1)));

        let five: Vec<String> = (0..5).map(|i| format!("o{i}")).collect();
        let err = QuestionItem::new("q?", five, AnswerLetter::A).unwrap_err();
        assert!(matches!(err, QuestionError::OptionCount(5)));
    }

    #[test]
    fn answer_check_matches_letters_only() {
        let q = QuestionItem::new("q?", options(), AnswerLetter::B).unwrap();
        assert!(q.is_correct("b"));
        assert!(q.is_correct(" B "));
        assert!(!q.is_correct("a"));
        assert!(!q.is_correct("two"));
    }

    #[test]
    fn option_lookup_by_letter() {
        let q = QuestionItem::new("q?", options(), AnswerLetter::A).unwrap();
        assert_eq!(q.option(AnswerLetter::C), "three");
    }
}

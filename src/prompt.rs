use std::io::{BufRead, Write};
use std::num::NonZeroUsize;

use thiserror::Error;

pub const QUESTION: &str = "How many chapters form 1 episode? ";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PromptError {
    #[error("Invalid input. Please enter a number.")]
    Invalid,

    #[error("Please enter a positive number.")]
    NotPositive,
}

/// Parses a strictly positive chapter count, surrounding whitespace allowed.
pub fn parse_chapters_per_episode(text: &str) -> Result<NonZeroUsize, PromptError> {
    let value: i64 = text.trim().parse().map_err(|_| PromptError::Invalid)?;
    if value <= 0 {
        return Err(PromptError::NotPositive);
    }
    usize::try_from(value)
        .ok()
        .and_then(NonZeroUsize::new)
        .ok_or(PromptError::Invalid)
}

/// Asks on `output` until `input` yields a valid chapter count. Running out of
/// input is an error since no answer can follow.
pub fn prompt_chapters_per_episode(
    mut input: impl BufRead,
    mut output: impl Write,
) -> anyhow::Result<NonZeroUsize> {
    let mut line = String::new();
    loop {
        write!(output, "{QUESTION}")?;
        output.flush()?;

        line.clear();
        if input.read_line(&mut line)? == 0 {
            anyhow::bail!("No chapters per episode given before end of input");
        }

        match parse_chapters_per_episode(&line) {
            Ok(value) => return Ok(value),
            Err(e) => writeln!(output, "{e}")?,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prompt(input: &str) -> (anyhow::Result<NonZeroUsize>, String) {
        let mut output = Vec::new();
        let result = prompt_chapters_per_episode(input.as_bytes(), &mut output);
        (result, String::from_utf8(output).unwrap())
    }

    #[test]
    fn parses_positive_numbers() {
        assert_eq!(parse_chapters_per_episode("3"), Ok(NonZeroUsize::new(3).unwrap()));
        assert_eq!(parse_chapters_per_episode(" 12 \n"), Ok(NonZeroUsize::new(12).unwrap()));
    }

    #[test]
    fn rejects_zero_negative_and_text() {
        assert_eq!(parse_chapters_per_episode("0"), Err(PromptError::NotPositive));
        assert_eq!(parse_chapters_per_episode("-2"), Err(PromptError::NotPositive));
        assert_eq!(parse_chapters_per_episode("two"), Err(PromptError::Invalid));
        assert_eq!(parse_chapters_per_episode("2.5"), Err(PromptError::Invalid));
        assert_eq!(parse_chapters_per_episode(""), Err(PromptError::Invalid));
    }

    #[test]
    fn first_valid_answer_is_taken() {
        let (result, output) = prompt("4\n");
        assert_eq!(result.unwrap().get(), 4);
        assert_eq!(output, QUESTION);
    }

    #[test]
    fn reprompts_until_valid() {
        let (result, output) = prompt("abc\n0\n-1\n2\n");
        assert_eq!(result.unwrap().get(), 2);
        assert_eq!(
            output,
            format!(
                "{QUESTION}Invalid input. Please enter a number.\n\
                 {QUESTION}Please enter a positive number.\n\
                 {QUESTION}Please enter a positive number.\n\
                 {QUESTION}"
            )
        );
    }

    #[test]
    fn end_of_input_is_an_error() {
        let (result, output) = prompt("nope\n");
        assert!(result.is_err());
        assert_eq!(output.matches(QUESTION).count(), 2);
    }
}

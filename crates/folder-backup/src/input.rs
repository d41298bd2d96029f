//! Resolve the folder to back up.
//!

use std::{
    io::{self, BufRead, Write},
    path::PathBuf,
};

use thiserror::Error;

const PROMPT: &str = "Folder to back up: ";

/// The source folder from the command line, or asked for interactively.
///
/// Blank answers are asked again. Surrounding whitespace and one pair of
/// matching quotes are removed, as left behind by shells and drag and drop.
pub fn resolve_source<R: BufRead, W: Write>(
    argument: Option<PathBuf>,
    mut input: R,
    mut output: W,
) -> Result<PathBuf, InputError> {
    if let Some(source) = argument {
        return Ok(source);
    }

    loop {
        output.write_all(PROMPT.as_bytes()).map_err(InputError::Prompt)?;
        output.flush().map_err(InputError::Prompt)?;

        let mut line = String::new();
        let read = input.read_line(&mut line).map_err(InputError::Read)?;
        if read == 0 {
            return Err(InputError::NoInput);
        }

        let answer = unquote(line.trim());
        if !answer.is_empty() {
            return Ok(PathBuf::from(answer));
        }
    }
}

fn unquote(value: &str) -> &str {
    ['"', '\'']
        .iter()
        .find_map(|quote| value.strip_prefix(*quote)?.strip_suffix(*quote))
        .map_or(value, str::trim)
}

#[allow(missing_docs)]
#[derive(Debug, Error)]
pub enum InputError {
    #[error("No source folder was given.")]
    NoInput,

    #[error("Failed to write the prompt:\n{0}")]
    Prompt(#[source] io::Error),

    #[error("Failed to read the source folder:\n{0}")]
    Read(#[source] io::Error),
}

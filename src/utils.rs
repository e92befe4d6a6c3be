use std::{
    fmt,
    io::{self, BufRead, Write},
    time::Duration,
};

use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use indicatif::{ProgressBar, ProgressStyle};
use rand::{Rng, distr::Alphanumeric};
use sha2::{Digest, Sha256};

pub fn generate_code_verifier() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(128)
        .map(char::from)
        .collect()
}

pub fn generate_code_challenge(verifier: &str) -> String {
    let hash = Sha256::digest(verifier.as_bytes());
    URL_SAFE_NO_PAD.encode(hash)
}

/// Canonical form of an ISRC as used for catalog lookups: trimmed, hyphens
/// removed, uppercase.
///
/// Uppercasing alone is enough for codes read from Spotify. Trimming and
/// dropping hyphens is a deliberate widening so the dashed `CC-XXX-YY-NNNNN`
/// display form matches too.
pub fn normalize_isrc(isrc: &str) -> String {
    isrc.trim()
        .chars()
        .filter(|c| *c != '-')
        .collect::<String>()
        .to_uppercase()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionError {
    NotANumber(String),
    OutOfRange { index: usize, len: usize },
}

impl fmt::Display for SelectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SelectionError::NotANumber(input) => write!(f, "'{}' is not a playlist number", input),
            SelectionError::OutOfRange { index, len } if *len == 0 => {
                write!(f, "playlist {} does not exist, there are no playlists", index)
            }
            SelectionError::OutOfRange { index, len } => write!(
                f,
                "playlist {} does not exist, choose a number between 0 and {}",
                index,
                len - 1
            ),
        }
    }
}

impl std::error::Error for SelectionError {}

/// Parses a playlist index typed by the user. Empty input selects index 0.
pub fn parse_selection(input: &str, len: usize) -> Result<usize, SelectionError> {
    let input = input.trim();
    let index = if input.is_empty() {
        0
    } else {
        input
            .parse::<usize>()
            .map_err(|_| SelectionError::NotANumber(input.to_string()))?
    };

    if index >= len {
        return Err(SelectionError::OutOfRange { index, len });
    }

    Ok(index)
}

/// Prints `message` and reads one line from stdin, without the line ending.
pub fn prompt(message: &str) -> io::Result<String> {
    let mut stdout = io::stdout();
    write!(stdout, "{} ", message)?;
    stdout.flush()?;

    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

pub fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_style(
        ProgressStyle::with_template("{spinner:.blue} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
    );
    pb
}

pub fn progress_bar(len: u64, message: &str) -> ProgressBar {
    let pb = ProgressBar::new(len);
    pb.set_message(message.to_string());
    pb.set_style(
        ProgressStyle::with_template("{spinner:.blue} {msg} [{bar:30.blue}] {pos}/{len}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=> "),
    );
    pb
}

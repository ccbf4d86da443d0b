//! Best score carried between sessions
//!
//! The file is free text; the score is its last whitespace-separated token.

use std::fs;
use std::io::{self, BufRead, Write};
use std::path::Path;
use tracing::info;

use crate::error::StorageError;

/// What to do with the session best when quitting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveDecision {
    /// The stored score is at least as high
    NotHigher,
    /// Higher, but cheat mode forbids saving
    CheatMode,
    /// Higher; ask the player
    Ask,
}

pub fn decide(session_best: u32, stored: u32, cheat_mode: bool) -> SaveDecision {
    if session_best <= stored {
        SaveDecision::NotHigher
    } else if cheat_mode {
        SaveDecision::CheatMode
    } else {
        SaveDecision::Ask
    }
}

/// Stored best score; a missing file counts as zero
pub fn load(path: &Path) -> Result<u32, StorageError> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(0),
        Err(source) => {
            return Err(StorageError::Io {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    parse(&text).ok_or_else(|| StorageError::Malformed {
        path: path.to_path_buf(),
    })
}

pub fn parse(text: &str) -> Option<u32> {
    text.split_whitespace().last()?.parse().ok()
}

pub fn render(score: u32) -> String {
    format!(
        "Best scores will carry over to next session!\n\
         But if you delete this file you will lose your best score and will be 0 next time.\n\
         \n\
         Your best score is: {score}"
    )
}

pub fn save(path: &Path, score: u32) -> Result<(), StorageError> {
    fs::write(path, render(score)).map_err(|source| StorageError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    info!(score, path = %path.display(), "Best score saved");
    Ok(())
}

/// Interactive end-of-session save. Returns whether the file was written.
///
/// Cheat mode only prints a notice and waits for Enter; otherwise the player
/// is asked `y/n` and the score is written on `y`.
pub fn offer_save<I: BufRead, O: Write>(
    path: &Path,
    session_best: u32,
    cheat_mode: bool,
    input: &mut I,
    output: &mut O,
) -> anyhow::Result<bool> {
    let stored = load(path).unwrap_or(0);

    match decide(session_best, stored, cheat_mode) {
        SaveDecision::NotHigher => Ok(false),
        SaveDecision::CheatMode => {
            writeln!(
                output,
                "Best scores will not be saved in cheat mode. Press enter to continue."
            )?;
            output.flush()?;
            let mut line = String::new();
            input.read_line(&mut line)?;
            Ok(false)
        }
        SaveDecision::Ask => {
            write!(
                output,
                "\nNew Best score: {session_best} - Save to a file? (y/n): "
            )?;
            output.flush()?;
            let mut line = String::new();
            input.read_line(&mut line)?;

            if line.trim().eq_ignore_ascii_case("y") {
                save(path, session_best)?;
                Ok(true)
            } else {
                Ok(false)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_is_zero() {
        let dir = TempDir::new().unwrap();
        assert_eq!(load(&dir.path().join("best_score.txt")).unwrap(), 0);
    }

    #[test]
    fn test_save_and_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("best_score.txt");

        save(&path, 42).unwrap();
        assert_eq!(load(&path).unwrap(), 42);
        assert!(fs::read_to_string(&path)
            .unwrap()
            .ends_with("Your best score is: 42"));
    }

    #[test]
    fn test_malformed_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("best_score.txt");
        fs::write(&path, "Your best score is: lots").unwrap();

        assert!(matches!(load(&path), Err(StorageError::Malformed { .. })));
    }

    #[test]
    fn test_parse_takes_last_token() {
        assert_eq!(parse("a b c\n\n 17 \n"), Some(17));
        assert_eq!(parse(""), None);
    }

    #[test]
    fn test_decide() {
        assert_eq!(decide(5, 5, false), SaveDecision::NotHigher);
        assert_eq!(decide(6, 5, true), SaveDecision::CheatMode);
        assert_eq!(decide(6, 5, false), SaveDecision::Ask);
    }

    #[test]
    fn test_offer_save_yes() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("best_score.txt");
        save(&path, 3).unwrap();

        let mut input = Cursor::new("Y\n");
        let mut output = Vec::new();
        assert!(offer_save(&path, 10, false, &mut input, &mut output).unwrap());
        assert_eq!(load(&path).unwrap(), 10);
        assert!(String::from_utf8(output)
            .unwrap()
            .contains("New Best score: 10"));
    }

    #[test]
    fn test_offer_save_declined() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("best_score.txt");

        let mut input = Cursor::new("n\n");
        let mut output = Vec::new();
        assert!(!offer_save(&path, 10, false, &mut input, &mut output).unwrap());
        assert!(!path.exists());
    }

    #[test]
    fn test_offer_save_in_cheat_mode() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("best_score.txt");

        let mut input = Cursor::new("\n");
        let mut output = Vec::new();
        assert!(!offer_save(&path, 10, true, &mut input, &mut output).unwrap());
        assert!(!path.exists());
        assert!(String::from_utf8(output).unwrap().contains("cheat mode"));
    }

    #[test]
    fn test_offer_save_not_higher_asks_nothing() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("best_score.txt");
        save(&path, 20).unwrap();

        let mut input = Cursor::new("y\n");
        let mut output = Vec::new();
        assert!(!offer_save(&path, 10, false, &mut input, &mut output).unwrap());
        assert!(output.is_empty());
        assert_eq!(load(&path).unwrap(), 20);
    }
}

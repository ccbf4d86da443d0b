//! The plain-text tuning file
//!
//! One `key: value` pair per line. Keys are case-insensitive; blank lines and
//! unknown keys are skipped. A missing file is created with the defaults.

use std::fs;
use std::path::Path;
use tracing::{info, warn};

use crate::error::ConfigError;
use crate::game::Tuning;

const SNAKE_SPEED: &str = "snake speed";
const LENGTH_INCREMENT: &str = "snake length increment";
const SCORE_INCREMENT: &str = "score increment";
const STARTING_LENGTH: &str = "snakes starting length";
const STARTING_LENGTH_ALIAS: &str = "snake starting length";
const DISABLE_WALLS: &str = "disable collision with wall";
const FIX_SELF: &str = "fix collision with self";
const DISABLE_FOOD: &str = "disable collision with food";

/// Outcome of loading the config file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedConfig {
    pub tuning: Tuning,
    /// The file did not exist and was written with defaults
    pub created: bool,
}

/// Read the tuning file at `path`, writing the defaults first if it is missing
pub fn load_or_create(path: &Path) -> Result<LoadedConfig, ConfigError> {
    let io_err = |source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    };

    let created = if path.exists() {
        false
    } else {
        fs::write(path, render(&Tuning::default())).map_err(io_err)?;
        info!(path = %path.display(), "Created default config file");
        true
    };

    let text = fs::read_to_string(path).map_err(io_err)?;
    let tuning = parse(&text)?;

    if tuning.is_cheat() {
        warn!(?tuning, "Non-default tuning, cheat mode enabled");
    }

    Ok(LoadedConfig { tuning, created })
}

/// Parse the tuning file text
pub fn parse(text: &str) -> Result<Tuning, ConfigError> {
    let mut speed = None;
    let mut length_increment = None;
    let mut score_increment = None;
    let mut starting_length = None;
    let mut disable_walls = None;
    let mut fix_self = None;
    let mut disable_food = None;

    for line in text.lines() {
        let Some((key, value)) = line.split_once(':') else {
            continue;
        };
        let key = normalize_key(key);
        let value = value.trim();

        match key.as_str() {
            SNAKE_SPEED => speed = Some(number(SNAKE_SPEED, value)?),
            LENGTH_INCREMENT => length_increment = Some(number(LENGTH_INCREMENT, value)?),
            SCORE_INCREMENT => score_increment = Some(number(SCORE_INCREMENT, value)?),
            STARTING_LENGTH | STARTING_LENGTH_ALIAS => {
                starting_length = Some(number(STARTING_LENGTH, value)?)
            }
            DISABLE_WALLS => disable_walls = Some(flag(DISABLE_WALLS, value)?),
            FIX_SELF => fix_self = Some(flag(FIX_SELF, value)?),
            DISABLE_FOOD => disable_food = Some(flag(DISABLE_FOOD, value)?),
            _ => {}
        }
    }

    let snake_speed_ms = required(SNAKE_SPEED, speed)?;
    let starting_length = required(STARTING_LENGTH, starting_length)?;
    at_least(SNAKE_SPEED, snake_speed_ms, 1)?;
    at_least(STARTING_LENGTH, starting_length, 1)?;

    Ok(Tuning {
        snake_speed_ms,
        length_increment: required(LENGTH_INCREMENT, length_increment)? as usize,
        score_increment: u32::try_from(required(SCORE_INCREMENT, score_increment)?).map_err(
            |_| ConfigError::InvalidNumber {
                key: SCORE_INCREMENT,
                value: "too large".to_string(),
            },
        )?,
        starting_length: starting_length as usize,
        disable_wall_collision: required(DISABLE_WALLS, disable_walls)?,
        fix_self_collision: required(FIX_SELF, fix_self)?,
        disable_food_collision: required(DISABLE_FOOD, disable_food)?,
    })
}

/// The file text for `tuning`
pub fn render(tuning: &Tuning) -> String {
    format!(
        "Snake Speed: {}\n\
         Snake Length Increment: {}\n\
         Score Increment: {}\n\
         Snakes Starting Length: {}\n\
         \n\
         Disable Collision With Wall: {}\n\
         Fix Collision With Self: {}\n\
         Disable Collision With Food: {}\n\
         \n\
         Warning: Cheat Mode will be enabled if any of the values are changed.",
        tuning.snake_speed_ms,
        tuning.length_increment,
        tuning.score_increment,
        tuning.starting_length,
        yes_no(tuning.disable_wall_collision),
        yes_no(tuning.fix_self_collision),
        yes_no(tuning.disable_food_collision),
    )
}

fn normalize_key(key: &str) -> String {
    key.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}

fn number(key: &'static str, value: &str) -> Result<u64, ConfigError> {
    value.parse().map_err(|_| ConfigError::InvalidNumber {
        key,
        value: value.to_string(),
    })
}

fn flag(key: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.to_lowercase().as_str() {
        "yes" | "y" | "true" | "on" => Ok(true),
        "no" | "n" | "false" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidFlag {
            key,
            value: value.to_string(),
        }),
    }
}

fn required<T>(key: &'static str, value: Option<T>) -> Result<T, ConfigError> {
    value.ok_or(ConfigError::MissingValue { key })
}

fn at_least(key: &'static str, value: u64, min: u64) -> Result<(), ConfigError> {
    if value < min {
        return Err(ConfigError::OutOfRange { key, min, value });
    }
    Ok(())
}

fn yes_no(value: bool) -> &'static str {
    if value {
        "Yes"
    } else {
        "No"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_text_parses_to_defaults() {
        let tuning = parse(&render(&Tuning::default())).unwrap();
        assert_eq!(tuning, Tuning::default());
        assert!(!tuning.is_cheat());
    }

    #[test]
    fn test_parse_custom_values() {
        let text = "snake speed: 60\n\
                    SNAKE LENGTH INCREMENT:   3\n\
                    Score Increment: 2\n\
                    Snake Starting Length: 4\n\
                    Disable  Collision With Wall: yes\n\
                    Fix Collision With Self: No\n\
                    Disable Collision With Food: no\n\
                    Warning: anything goes here";
        let tuning = parse(text).unwrap();

        assert_eq!(tuning.snake_speed_ms, 60);
        assert_eq!(tuning.length_increment, 3);
        assert_eq!(tuning.score_increment, 2);
        assert_eq!(tuning.starting_length, 4);
        assert!(tuning.disable_wall_collision);
        assert!(!tuning.fix_self_collision);
        assert!(!tuning.disable_food_collision);
        assert!(tuning.is_cheat());
    }

    #[test]
    fn test_bad_number() {
        let text = render(&Tuning::default()).replace("Snake Speed: 100", "Snake Speed: fast");
        let err = parse(&text).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidNumber { key: SNAKE_SPEED, .. }
        ));
    }

    #[test]
    fn test_bad_flag() {
        let text = render(&Tuning::default())
            .replace("Fix Collision With Self: Yes", "Fix Collision With Self: maybe");
        assert!(matches!(
            parse(&text),
            Err(ConfigError::InvalidFlag { key: FIX_SELF, .. })
        ));
    }

    #[test]
    fn test_missing_key() {
        let text = render(&Tuning::default()).replace("Score Increment: 1\n", "");
        assert!(matches!(
            parse(&text),
            Err(ConfigError::MissingValue {
                key: SCORE_INCREMENT
            })
        ));
    }

    #[test]
    fn test_zero_speed_rejected() {
        let text = render(&Tuning::default()).replace("Snake Speed: 100", "Snake Speed: 0");
        assert!(matches!(
            parse(&text),
            Err(ConfigError::OutOfRange { value: 0, .. })
        ));
    }

    #[test]
    fn test_missing_file_is_created() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.txt");

        let loaded = load_or_create(&path).unwrap();
        assert!(loaded.created);
        assert_eq!(loaded.tuning, Tuning::default());
        assert!(path.exists());

        let again = load_or_create(&path).unwrap();
        assert!(!again.created);
    }

    #[test]
    fn test_existing_file_is_read() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.txt");
        let tuning = Tuning {
            snake_speed_ms: 40,
            ..Default::default()
        };
        fs::write(&path, render(&tuning)).unwrap();

        let loaded = load_or_create(&path).unwrap();
        assert_eq!(loaded.tuning, tuning);
        assert!(loaded.tuning.is_cheat());
    }
}

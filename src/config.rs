use std::path::PathBuf;
use std::thread;

use crate::error::ConfigError;
use crate::types::{DEFAULT_DEPTH, DEFAULT_WORKERS_FALLBACK};

/// Parsed command-line configuration: `-f <path>` to load a starting
/// position, `-d <depth>` for the fixed search depth, `-w <workers>` for the
/// number of cooperating worker threads.
pub struct Config {
    pub board_file: Option<PathBuf>,
    pub depth: u32,
    pub workers: usize,
}

fn default_workers() -> usize {
    thread::available_parallelism().map(|n| n.get()).unwrap_or(DEFAULT_WORKERS_FALLBACK)
}

impl Config {
    pub fn parse<I: Iterator<Item = String>>(args: I) -> Result<Self, ConfigError> {
        let mut board_file = None;
        let mut depth = DEFAULT_DEPTH;
        let mut workers = default_workers();

        let mut args = args;
        while let Some(flag) = args.next() {
            match flag.as_str() {
                "-f" => {
                    let value = args.next().ok_or_else(|| ConfigError::MissingValue(flag.clone()))?;
                    board_file = Some(PathBuf::from(value));
                }
                "-d" => {
                    depth = parse_positive(&flag, &mut args, ConfigError::InvalidDepth)? as u32;
                }
                "-w" => {
                    workers = parse_positive(&flag, &mut args, ConfigError::InvalidWorkers)? as usize;
                }
                other => return Err(ConfigError::UnknownFlag(other.to_string())),
            }
        }

        Ok(Config { board_file, depth, workers })
    }
}

fn parse_positive<I: Iterator<Item = String>>(
    flag: &str,
    args: &mut I,
    invalid: impl Fn(i64) -> ConfigError,
) -> Result<i64, ConfigError> {
    let value = args.next().ok_or_else(|| ConfigError::MissingValue(flag.to_string()))?;
    let parsed: i64 = value.parse().map_err(|_| ConfigError::ParseInt(value.clone()))?;
    if parsed <= 0 {
        return Err(invalid(parsed));
    }
    Ok(parsed)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(v: &[&str]) -> impl Iterator<Item = String> {
        v.iter().map(|s| s.to_string()).collect::<Vec<_>>().into_iter()
    }

    #[test]
    fn defaults_with_no_flags() {
        let config = Config::parse(args(&[])).unwrap();
        assert_eq!(config.depth, DEFAULT_DEPTH);
        assert_eq!(config.workers, default_workers());
        assert!(config.board_file.is_none());
    }

    #[test]
    fn parses_all_three_flags() {
        let config = Config::parse(args(&["-f", "pos.txt", "-d", "6", "-w", "4"])).unwrap();
        assert_eq!(config.board_file.unwrap().to_str().unwrap(), "pos.txt");
        assert_eq!(config.depth, 6);
        assert_eq!(config.workers, 4);
    }

    #[test]
    fn rejects_non_positive_depth() {
        assert!(matches!(Config::parse(args(&["-d", "0"])), Err(ConfigError::InvalidDepth(0))));
        assert!(matches!(Config::parse(args(&["-d", "-3"])), Err(ConfigError::InvalidDepth(-3))));
    }

    #[test]
    fn rejects_non_positive_workers() {
        assert!(matches!(Config::parse(args(&["-w", "0"])), Err(ConfigError::InvalidWorkers(0))));
    }

    #[test]
    fn rejects_unknown_flag() {
        assert!(matches!(Config::parse(args(&["-x"])), Err(ConfigError::UnknownFlag(_))));
    }

    #[test]
    fn rejects_missing_value() {
        assert!(matches!(Config::parse(args(&["-d"])), Err(ConfigError::MissingValue(_))));
    }
}

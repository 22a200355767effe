use std::env;
use std::path::PathBuf;

use anyhow::{anyhow, Result};
use dotenvy::dotenv;
use tracing::Level;

const DATA_DIR_NAME: &str = ".attendance";

#[derive(Clone, Debug)]
pub struct Config {
    pub data_dir: PathBuf,
    pub export_dir: PathBuf,
    pub log_level: Level,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenv().ok();

        let data_dir = match env::var_os("ATTENDANCE_HOME") {
            Some(dir) => PathBuf::from(dir),
            None => dirs::home_dir()
                .ok_or_else(|| anyhow!("Could not determine home directory"))?
                .join(DATA_DIR_NAME),
        };

        let export_dir = env::var_os("ATTENDANCE_EXPORT_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("."));

        let log_level = match env::var("ATTENDANCE_LOG") {
            Ok(value) => parse_level(&value)?,
            Err(_) => Level::WARN,
        };

        Ok(Self {
            data_dir,
            export_dir,
            log_level,
        })
    }

    /// Command-line flags win over the environment.
    pub fn with_flags(mut self, data_dir: Option<PathBuf>, verbose: bool) -> Self {
        if let Some(dir) = data_dir {
            self.data_dir = dir;
        }
        if verbose {
            self.log_level = Level::DEBUG;
        }
        self
    }
}

fn parse_level(value: &str) -> Result<Level> {
    value
        .trim()
        .parse::<Level>()
        .map_err(|_| anyhow!("Invalid ATTENDANCE_LOG level '{}'", value))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Config {
        Config {
            data_dir: PathBuf::from("/tmp/attendance"),
            export_dir: PathBuf::from("."),
            log_level: Level::WARN,
        }
    }

    #[test]
    fn test_parse_level() {
        assert_eq!(parse_level("debug").unwrap(), Level::DEBUG);
        assert_eq!(parse_level(" INFO ").unwrap(), Level::INFO);
        assert!(parse_level("loud").is_err());
    }

    #[test]
    fn test_flags_override_environment() {
        let config = base().with_flags(Some(PathBuf::from("/srv/att")), true);
        assert_eq!(config.data_dir, PathBuf::from("/srv/att"));
        assert_eq!(config.log_level, Level::DEBUG);

        let config = base().with_flags(None, false);
        assert_eq!(config.data_dir, PathBuf::from("/tmp/attendance"));
        assert_eq!(config.log_level, Level::WARN);
    }
}

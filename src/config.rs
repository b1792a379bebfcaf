use std::{ io, fmt };
use std::io::{ BufRead, BufReader };
use std::fs::File;
use std::path::{ Path, PathBuf };
use std::str::FromStr;
use log::LevelFilter;

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub prompt: String,
    pub banner: String,
    pub farewell: String,
    /// Longest accepted input line in bytes.
    pub max_line_len: usize,
    /// How deeply `source` may nest.
    pub max_source_depth: usize,
    pub log_level: LevelFilter,
    pub log_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        ConfigLoader::default_config()
    }
}

pub struct ConfigLoader;

impl ConfigLoader {
    pub fn default_config() -> Config {
        Config {
            prompt: "shell $ ".to_string(),
            banner: "Welcome to mini-shell.".to_string(),
            farewell: "Bye bye.".to_string(),
            max_line_len: 4096,
            max_source_depth: 64,
            log_level: LevelFilter::Off,
            log_file: None,
        }
    }

    /// `~/.minishellrc`, if a home directory is known.
    pub fn default_path() -> Option<PathBuf> {
        std::env::var_os("HOME")
            .filter(|h| !h.is_empty())
            .map(|h| Path::new(&h).join(".minishellrc"))
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
        let file = File::open(path).map_err(ConfigError::Io)?;
        let mut src = String::new();
        for line in BufReader::new(file).lines() {
            let line = line.map_err(ConfigError::Io)?;
            src.push_str(&line);
            src.push('\n');
        }
        Self::load_from_str(&src)
    }

    pub fn load_from_str(src: &str) -> Result<Config, ConfigError> {
        let mut config = Self::default_config();

        for (lineno, line) in src.lines().enumerate() {
            if line.trim().is_empty() || line.trim_start().starts_with('#') {
                continue;
            }
            let Some((key, value)) = line.split_once('=') else {
                return Err(ConfigError::Parse(format!("Line {}: No '=' found: {}", lineno+1, line)));
            };
            // Text values are kept verbatim so a prompt may end in a space
            let key = key.trim();

            match key {
                "prompt" => config.prompt = value.to_string(),
                "banner" => config.banner = value.to_string(),
                "farewell" => config.farewell = value.to_string(),
                "max_line_len" => config.max_line_len = parse_number(value, lineno, line)?,
                "max_source_depth" => config.max_source_depth = parse_number(value, lineno, line)?,
                "log_level" => {
                    config.log_level = LevelFilter::from_str(value.trim()).map_err(|_| {
                        ConfigError::Parse(format!("Line {}: Invalid log level: {}", lineno+1, line))
                    })?;
                }
                "log_file" => {
                    let path = value.trim();
                    config.log_file = (!path.is_empty()).then(|| PathBuf::from(path));
                }
                _ => return Err(ConfigError::Parse(format!("Line {}: Unknown key: {}", lineno+1, key))),
            }
        }

        if config.max_line_len == 0 {
            return Err(ConfigError::Parse("max_line_len must be greater than zero".to_string()));
        }
        Ok(config)
    }
}

fn parse_number(value: &str, lineno: usize, line: &str) -> Result<usize, ConfigError> {
    value.trim().parse::<usize>()
        .map_err(|_| ConfigError::Parse(format!("Line {}: Invalid usize: {}", lineno+1, line)))
}

#[derive(Debug)]
pub enum ConfigError {
    Io(io::Error),
    Parse(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "IO error: {}", e),
            ConfigError::Parse(msg) => write!(f, "Parse error: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(e) => Some(e),
            ConfigError::Parse(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_source_gives_defaults() {
        let config = ConfigLoader::load_from_str("").unwrap();
        assert_eq!(config, ConfigLoader::default_config());
        assert_eq!(config.prompt, "shell $ ");
        assert_eq!(config.log_level, LevelFilter::Off);
    }

    #[test]
    fn test_all_keys() {
        let src = [
            "# comment",
            "prompt=>> ",
            "banner=hi",
            "farewell=bye",
            "",
            "max_line_len = 128",
            "max_source_depth=3",
            "log_level=debug",
            "log_file=/tmp/minishell.log",
        ]
        .join("\n");
        let config = ConfigLoader::load_from_str(&src).unwrap();
        assert_eq!(config.prompt, ">> ");
        assert_eq!(config.banner, "hi");
        assert_eq!(config.farewell, "bye");
        assert_eq!(config.max_line_len, 128);
        assert_eq!(config.max_source_depth, 3);
        assert_eq!(config.log_level, LevelFilter::Debug);
        assert_eq!(config.log_file, Some(PathBuf::from("/tmp/minishell.log")));
    }

    #[test]
    fn test_missing_equals() {
        let err = ConfigLoader::load_from_str("prompt").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(msg) if msg.starts_with("Line 1")));
    }

    #[test]
    fn test_unknown_key() {
        let err = ConfigLoader::load_from_str("\ncolor=red").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(msg) if msg == "Line 2: Unknown key: color"));
    }

    #[test]
    fn test_invalid_numbers_and_levels() {
        assert!(ConfigLoader::load_from_str("max_line_len=lots").is_err());
        assert!(ConfigLoader::load_from_str("max_line_len=0").is_err());
        assert!(ConfigLoader::load_from_str("log_level=chatty").is_err());
    }

    #[test]
    fn test_missing_file() {
        let err = ConfigLoader::load_from_file("/nonexistent/minishellrc").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StripError {
    #[error("IO operation failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("{source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid UTF-8 content: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: std::string::FromUtf8Error,
    },

    #[error("{message}")]
    Walk { path: PathBuf, message: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Invalid comment pattern: {0}")]
    InvalidPattern(#[from] regex::Error),
}

pub trait UserFriendlyError {
    fn user_message(&self) -> String;
    fn suggestion(&self) -> Option<String>;
}

impl UserFriendlyError for StripError {
    fn user_message(&self) -> String {
        match self {
            StripError::Read { path, source } => {
                format!("Could not read {}: {}", path.display(), source)
            }
            StripError::Write { path, source } => {
                format!("Could not write {}: {}", path.display(), source)
            }
            StripError::Decode { path, .. } => {
                format!("{} is not valid UTF-8 text", path.display())
            }
            StripError::Walk { path, message } => {
                format!("Could not scan {}: {}", path.display(), message)
            }
            StripError::Config { message } => {
                format!("Configuration error: {}", message)
            }
            _ => self.to_string(),
        }
    }

    fn suggestion(&self) -> Option<String> {
        match self {
            StripError::Read { .. } | StripError::Write { .. } => Some(
                "Ensure you have read/write permissions for the files under the source root."
                    .to_string(),
            ),
            StripError::Decode { .. } => Some(
                "Convert the file to UTF-8 or exclude its directory with --exclude.".to_string(),
            ),
            StripError::Walk { .. } => Some(
                "Check that the source root exists, or pass a different root directory."
                    .to_string(),
            ),
            StripError::Config { .. } => Some(
                "Check your configuration file syntax, or regenerate one with --generate-config."
                    .to_string(),
            ),
            _ => None,
        }
    }
}

impl From<toml::de::Error> for StripError {
    fn from(error: toml::de::Error) -> Self {
        StripError::Config {
            message: error.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, StripError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_friendly_messages() {
        let error = StripError::Config {
            message: "placeholder must not be empty".to_string(),
        };
        assert!(error.user_message().contains("Configuration error"));
        assert!(error.suggestion().is_some());
        let pattern_error = regex::Regex::new("(").unwrap_err();
        assert!(StripError::from(pattern_error).suggestion().is_none());
    }

    #[test]
    fn test_decode_error_reports_offset() {
        let source = String::from_utf8(vec![b'a', b'b', 0xff]).unwrap_err();
        let error = StripError::Decode {
            path: PathBuf::from("src/app.js"),
            source,
        };
        assert!(error.to_string().contains("index 2"));
        assert!(error.user_message().starts_with("src/app.js"));
    }

    #[test]
    fn test_io_error_display_is_bare_cause() {
        let error = StripError::Read {
            path: PathBuf::from("locked.js"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "Permission denied"),
        };
        assert_eq!(error.to_string(), "Permission denied");
        assert!(error.user_message().contains("locked.js"));
    }

    #[test]
    fn test_toml_error_conversion() {
        let toml_error = toml::from_str::<toml::Value>("= broken").unwrap_err();
        let error = StripError::from(toml_error);
        assert!(matches!(error, StripError::Config { .. }));
    }
}

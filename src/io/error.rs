use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error(
        "I/O error for {path_desc}: {source}",
        path_desc = PathDisplay(path)
    )]
    Io {
        path: Option<PathBuf>,
        #[source]
        source: std::io::Error,
    },

    #[error(
        "failed to parse {format} {path_desc}: {details}",
        path_desc = PathDisplay(path)
    )]
    Parse {
        format: &'static str,
        path: Option<PathBuf>,
        details: String,
    },

    #[error(
        "configuration from {path_desc} was rejected: {source}",
        path_desc = PathDisplay(path)
    )]
    InvalidConfig {
        path: Option<PathBuf>,
        #[source]
        source: crate::ops::Error,
    },
}

impl Error {
    pub fn from_io(source: std::io::Error, path: Option<PathBuf>) -> Self {
        Self::Io { path, source }
    }

    pub fn parse(format: &'static str, path: Option<PathBuf>, details: impl Into<String>) -> Self {
        Self::Parse {
            format,
            path,
            details: details.into(),
        }
    }

    pub fn invalid_config(source: crate::ops::Error, path: Option<PathBuf>) -> Self {
        Self::InvalidConfig { path, source }
    }
}

struct PathDisplay<'a>(&'a Option<PathBuf>);

impl<'a> fmt::Display for PathDisplay<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(p) => write!(f, "file '{}'", p.display()),
            None => write!(f, "stream source"),
        }
    }
}

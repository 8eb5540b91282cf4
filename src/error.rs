use std::io;

use thiserror::Error;

use crate::path::Path;

#[derive(Debug, Error)]
pub enum Error {
    #[error("unknown target: {0}")]
    UnknownTarget(String),

    #[error("dependency cycle detected at '{0}'")]
    Cycle(String),

    #[error("command `{command}` exited with status {code}\n{stderr}")]
    ActionFailed {
        command: String,
        code: i64,
        stderr: String,
    },

    #[error("{path}: {source}")]
    Filesystem {
        path: Path,
        #[source]
        source: io::Error,
    },

    #[error("invalid configuration: {0}")]
    Config(String),
}

pub type Result<T> = core::result::Result<T, Error>;

impl Error {
    pub(crate) fn fs(path: &Path, source: io::Error) -> Self {
        Error::Filesystem {
            path: path.clone(),
            source,
        }
    }

    /// Process exit status for this error: a failed action propagates the
    /// child's own status, everything else maps to 2.
    pub fn exit_code(&self) -> u8 {
        match self {
            Error::ActionFailed { code, .. } => u8::try_from(*code).ok().filter(|c| *c != 0).unwrap_or(1),
            _ => 2,
        }
    }
}

use std::path::PathBuf;

use thiserror::Error;

use crate::Form;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid configuration: {0}")]
    Configuration(String),
    #[error("No schema can be generated for {zid} in the {form} form")]
    NotFound { zid: String, form: Form },
    #[error("Invalid definition for {name}: {reason}")]
    InvalidDefinition { name: String, reason: String },
    #[error("Unable to write {path}", path = .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{0}")]
    Io(#[from] std::io::Error),
    #[error("Error while serializing the document: {0}")]
    Serialize(#[from] serde_yaml::Error),
    #[error("{0}")]
    Regex(#[from] regex::Error),
}

impl Error {
    /// The process exit code reported for this error.
    ///
    /// User mistakes exit with 1, filesystem failures with 2.
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::Write { .. } | Error::Io(_) => 2,
            _ => 1,
        }
    }
}

/// Renders an error followed by its chain of causes.
pub fn report(mut err: &dyn std::error::Error) -> String {
    let mut s = format!("{}", err);
    while let Some(src) = err.source() {
        s.push_str(format!("\n\tCaused by: {}", src).as_str());
        err = src;
    }
    s
}

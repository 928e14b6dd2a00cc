/// Error types for the sift harness

use thiserror::Error;

pub type Result<T> = std::result::Result<T, HarnessError>;

#[derive(Error, Debug)]
pub enum HarnessError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("no reporter configured; call set_reporter before run")]
    MissingReporter,

    #[error("empty command line: the first argument must name the compiler executable")]
    EmptyCommandLine,

    #[error("failed to launch compiler '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("collector '{name}' failed: {message}")]
    Collector { name: String, message: String },

    #[error("report generation failed: {0}")]
    Report(String),
}

impl HarnessError {
    pub fn collector(name: impl Into<String>, message: impl Into<String>) -> Self {
        HarnessError::Collector {
            name: name.into(),
            message: message.into(),
        }
    }

    pub fn report(message: impl Into<String>) -> Self {
        HarnessError::Report(message.into())
    }
}

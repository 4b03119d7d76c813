use thiserror::Error;

/// Error type covering every fatal condition of a consumer run.
#[derive(Debug, Error)]
pub enum ConsumerError {
    /// Error originating from the underlying `lapin` library.
    #[error("AMQP communication error: {0}")]
    Amqp(#[from] lapin::Error),

    /// Invalid command-line configuration, reported before any broker interaction.
    #[error("invalid configuration: {message}")]
    Config { message: String },

    /// I/O failure while spawning the command or moving bytes through its pipes.
    #[error("command I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// A background pipe task panicked or was cancelled.
    #[error("pipe task failed: {0}")]
    Task(#[from] tokio::task::JoinError),

    /// The per-message command exited unsuccessfully.
    #[error("command failed: {status}")]
    CommandFailed { status: std::process::ExitStatus },
}

// Allow converting from a string-like type into a Config error
impl From<&str> for ConsumerError {
    fn from(s: &str) -> Self {
        ConsumerError::Config { message: s.to_string() }
    }
}

impl From<String> for ConsumerError {
    fn from(s: String) -> Self {
        ConsumerError::Config { message: s }
    }
}

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("config parse error: {0}")]
    ParseError(String),

    #[error("config validation error: {0}")]
    ValidationError(String),

    #[error("config watch error: {0}")]
    WatchError(String),
}

#[derive(Debug, thiserror::Error)]
pub enum ProcessError {
    #[error("empty command")]
    EmptyCommand,

    #[error("failed to spawn '{program}': {source}")]
    SpawnFailed {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to poll process status: {0}")]
    PollFailed(#[source] std::io::Error),

    #[error("failed to kill process: {0}")]
    KillFailed(#[source] std::io::Error),
}

#[derive(Debug, thiserror::Error)]
pub enum PaneldError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Process(#[from] ProcessError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("supervisor error: {0}")]
    Supervisor(String),

    #[error("{0}")]
    Other(String),
}

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AgentError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to start agent '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("process error: {0}")]
    Process(String),

    #[error("agent exited with code {code}")]
    Exit { code: i32 },

    #[error("agent terminated by signal")]
    Signal,
}

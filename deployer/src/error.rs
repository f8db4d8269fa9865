use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DeployError {
    #[error("invalid configuration: {0}")]
    Config(String),
    #[error("credential error: {0}")]
    Credential(String),
    #[error("failed to read artifact {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("network error: {0}")]
    Network(String),
    #[error("chain rejected the transaction: {0}")]
    Chain(String),
}

impl DeployError {
    /// process exit code reported for this failure
    pub fn exit_code(&self) -> u8 {
        match self {
            DeployError::Config(_) => 2,
            DeployError::Credential(_) => 3,
            DeployError::Io { .. } => 4,
            DeployError::Network(_) => 5,
            DeployError::Chain(_) => 6,
        }
    }
}

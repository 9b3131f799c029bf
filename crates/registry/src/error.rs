use thiserror::Error;

pub type Result<T> = std::result::Result<T, RegistryError>;

#[derive(Error, Debug)]
pub enum RegistryError {
    #[error("Invalid fragment: {reason}")]
    InvalidFragment { reason: String },

    #[error("Invalid registry config: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML error: {0}")]
    TomlError(#[from] toml::de::Error),
}

impl RegistryError {
    pub(crate) fn invalid_fragment(reason: impl Into<String>) -> Self {
        Self::InvalidFragment {
            reason: reason.into(),
        }
    }
}

pub type SoleilResult<T> = Result<T, SoleilError>;

#[derive(thiserror::Error, Debug)]
pub enum SoleilError {
    #[error("initialization error: scroll container '{selector}' not found")]
    MissingScrollContainer { selector: String },

    #[error("initialization error: layer '{layer}' element '{selector}' not found")]
    MissingLayer { layer: String, selector: String },

    #[error("config error: {0}")]
    Config(String),

    #[error("host error: {0}")]
    Host(String),

    #[error("serialization error: {0}")]
    Serde(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl SoleilError {
    pub fn missing_scroll_container(selector: impl Into<String>) -> Self {
        Self::MissingScrollContainer {
            selector: selector.into(),
        }
    }

    pub fn missing_layer(layer: impl Into<String>, selector: impl Into<String>) -> Self {
        Self::MissingLayer {
            layer: layer.into(),
            selector: selector.into(),
        }
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn host(msg: impl Into<String>) -> Self {
        Self::Host(msg.into())
    }

    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    /// True for the errors raised while wiring layers to a document.
    pub fn is_initialization(&self) -> bool {
        matches!(
            self,
            Self::MissingScrollContainer { .. } | Self::MissingLayer { .. }
        )
    }
}

impl From<serde_json::Error> for SoleilError {
    fn from(e: serde_json::Error) -> Self {
        Self::serde(e.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;

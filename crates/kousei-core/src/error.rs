use thiserror::Error;

/// Errors that can occur during Kousei core operations.
#[derive(Debug, Error)]
pub enum CheckError {
    /// The input string is empty or contains only whitespace.
    #[error("input is empty or whitespace-only")]
    EmptyInput,

    /// A regex pattern failed to compile (context rules come from the store,
    /// so this can happen with user-edited rows).
    #[error("regex compilation error: {0}")]
    RegexError(#[from] regex::Error),

    /// The model weights or tokenizer could not be loaded.
    #[error("failed to load model: {0}")]
    ModelLoadError(String),

    /// The masked-LM forward pass failed.
    #[error("inference error: {0}")]
    InferenceError(String),

    /// The HuggingFace tokenizer rejected the input.
    #[error("tokenize error: {0}")]
    TokenizeError(String),

    /// An invalid checker configuration was provided.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result type alias for Kousei operations.
pub type Result<T> = std::result::Result<T, CheckError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_messages() {
        let err = CheckError::EmptyInput;
        assert_eq!(err.to_string(), "input is empty or whitespace-only");

        let err = CheckError::ModelLoadError("tokenizer.json missing".into());
        assert!(err.to_string().contains("tokenizer.json missing"));
    }

    #[test]
    fn error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<CheckError>();
    }
}

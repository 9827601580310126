use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Unknown attribute: {0}")]
    UnknownAttribute(String),

    #[error("Unknown operator: {0}")]
    UnknownOperator(String),

    #[error("Unknown argument '{code}' for operator {operator}")]
    UnknownArgument { operator: String, code: String },

    #[error("Invalid argument '{code}': {reason}")]
    InvalidArgument { code: String, reason: String },

    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("TOML parse error: {0}")]
    TomlDe(#[from] toml::de::Error),

    #[error("TOML write error: {0}")]
    TomlSer(#[from] toml::ser::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_argument_message() {
        let err = Error::UnknownArgument {
            operator: "NEAR".to_string(),
            code: "x".to_string(),
        };
        assert_eq!(err.to_string(), "Unknown argument 'x' for operator NEAR");
    }

    #[test]
    fn test_unknown_attribute_message() {
        let err = Error::UnknownAttribute("colour".to_string());
        assert!(err.to_string().contains("colour"));
    }
}

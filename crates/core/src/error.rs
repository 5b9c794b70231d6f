use thiserror::Error;

/// Failure modes of a single deployment request.
#[derive(Error, Debug)]
pub enum DeployError {
    #[error("{0}")]
    Validation(String),

    #[error("Request body exceeds {0} bytes")]
    PayloadTooLarge(usize),

    #[error("Failed to create hosting site: {0}")]
    Provision(String),

    #[error("No free site name after {attempts} attempts (base name '{base}')")]
    NamesExhausted { base: String, attempts: u32 },

    #[error("Upload failed ({status})")]
    Upload { status: u16, body: String },

    #[error("Failed to build archive: {0}")]
    Archive(String),

    #[error("{0}")]
    Unexpected(String),
}

impl DeployError {
    pub fn missing_field(field: &str) -> Self {
        Self::Validation(format!("Missing required field: {}", field))
    }

    pub const fn error_type(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation_error",
            Self::PayloadTooLarge(_) => "payload_too_large",
            Self::Provision(_) => "provision_failed",
            Self::NamesExhausted { .. } => "names_exhausted",
            Self::Upload { .. } => "upload_failed",
            Self::Archive(_) => "archive_failed",
            Self::Unexpected(_) => "unexpected",
        }
    }

    /// HTTP status this error maps to at the service boundary.
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::Validation(_) => 400,
            Self::PayloadTooLarge(_) => 413,
            Self::Provision(_)
            | Self::NamesExhausted { .. }
            | Self::Upload { .. }
            | Self::Archive(_)
            | Self::Unexpected(_) => 500,
        }
    }

    pub const fn is_client_error(&self) -> bool {
        matches!(self, Self::Validation(_) | Self::PayloadTooLarge(_))
    }
}

/// Errors raised while loading `folio-relay.toml` and environment overrides.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration parse error: {0}")]
    Parse(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        ConfigError::Parse(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, DeployError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_maps_to_bad_request() {
        let err = DeployError::missing_field("username");
        assert_eq!(err.status_code(), 400);
        assert!(err.is_client_error());
        assert_eq!(err.to_string(), "Missing required field: username");
    }

    #[test]
    fn test_upstream_errors_map_to_server_error() {
        let errors = [
            DeployError::Provision("boom".into()),
            DeployError::NamesExhausted {
                base: "portfolio-ada".into(),
                attempts: 3,
            },
            DeployError::Upload {
                status: 422,
                body: "bad zip".into(),
            },
            DeployError::Unexpected("oops".into()),
        ];
        for err in errors {
            assert_eq!(err.status_code(), 500, "{}", err.error_type());
            assert!(!err.is_client_error());
        }
    }

    #[test]
    fn test_exhausted_message_names_base() {
        let err = DeployError::NamesExhausted {
            base: "portfolio-ada".into(),
            attempts: 10,
        };
        let msg = err.to_string();
        assert!(msg.contains("10 attempts"));
        assert!(msg.contains("portfolio-ada"));
    }
}

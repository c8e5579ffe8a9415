use thiserror::Error;

#[derive(Error, Debug)]
pub enum CarouselError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("JSON parsing error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Invalid URL: {0}")]
    UrlError(#[from] url::ParseError),

    #[error("Configuration error in '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Aggregation source at {endpoint} reported an unsuccessful response")]
    UnsuccessfulResponse { endpoint: String },

    #[error("Request to {endpoint} failed with status {status}")]
    UnexpectedStatus { endpoint: String, status: u16 },

    #[error("{kind} items do not support '{action}'")]
    UnsupportedAction { kind: String, action: String },

    #[error("{kind} item has no identifier")]
    MissingIdentity { kind: String },

    #[error("Item {key} is not part of the current carousel")]
    UnknownItem { key: String },

    #[error("A like request for {key} is already in flight")]
    MutationInFlight { key: String },

    #[error("Carousel generation {expected} was replaced before the response for {key} arrived")]
    StaleGeneration { key: String, expected: u64 },
}

impl CarouselError {
    pub fn user_friendly_message(&self) -> String {
        match self {
            CarouselError::ApiError(_)
            | CarouselError::UnsuccessfulResponse { .. }
            | CarouselError::UnexpectedStatus { .. } => {
                "Could not reach the content service".to_string()
            }
            CarouselError::SerializationError(_) => {
                "The content service sent a response that could not be read".to_string()
            }
            CarouselError::ConfigValidationError { .. }
            | CarouselError::InvalidConfigValueError { .. }
            | CarouselError::TomlError(_)
            | CarouselError::UrlError(_) => format!("Configuration problem: {}", self),
            CarouselError::IoError(_) => format!("File access failed: {}", self),
            _ => self.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            CarouselError::ApiError(_) | CarouselError::UnexpectedStatus { .. } => {
                "Check the base URL and that the service is reachable"
            }
            CarouselError::UnsuccessfulResponse { .. } => {
                "The service answered but refused the request; fallback content is shown"
            }
            CarouselError::ConfigValidationError { .. }
            | CarouselError::InvalidConfigValueError { .. }
            | CarouselError::TomlError(_)
            | CarouselError::UrlError(_) => "Fix the configuration file or CLI flags",
            CarouselError::IoError(_) => "Check that the file exists and is readable",
            CarouselError::SerializationError(_) => {
                "Check that the base URL points at the content API"
            }
            CarouselError::MutationInFlight { .. } => "Wait for the previous request to finish",
            _ => "Retry the action",
        }
    }
}

pub type Result<T> = std::result::Result<T, CarouselError>;

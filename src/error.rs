use thiserror::Error;

/// Failures while retrieving league data. Any of these aborts the whole fetch.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Failed to fetch data from API: {0}")]
    Request(#[from] reqwest::Error),

    // Specific HTTP status code errors
    #[error("API request not found (404): {url}")]
    NotFound { url: String },

    #[error("API server error ({status}): {message} (URL: {url})")]
    ServerError {
        status: u16,
        message: String,
        url: String,
    },

    #[error("API client error ({status}): {message} (URL: {url})")]
    ClientError {
        status: u16,
        message: String,
        url: String,
    },

    #[error("API rate limit exceeded (429): {message} (URL: {url})")]
    RateLimit { message: String, url: String },

    #[error("API service unavailable ({status}): {message} (URL: {url})")]
    ServiceUnavailable {
        status: u16,
        message: String,
        url: String,
    },

    // Network-specific errors
    #[error("Network timeout while fetching data from: {url}")]
    NetworkTimeout { url: String },

    #[error("Connection failed to: {url} - {message}")]
    NetworkConnection { url: String, message: String },

    // Payload errors
    #[error("API returned malformed JSON: {message} (URL: {url})")]
    MalformedJson { message: String, url: String },

    #[error("API returned unexpected data structure: {message} (URL: {url})")]
    UnexpectedStructure { message: String, url: String },

    #[error("API returned empty or missing data: {message} (URL: {url})")]
    NoData { message: String, url: String },

    #[error("Pagination did not terminate after {pages} pages (URL: {url})")]
    TooManyPages { pages: u32, url: String },
}

impl FetchError {
    /// Create an API not found error
    pub fn not_found(url: impl Into<String>) -> Self {
        Self::NotFound { url: url.into() }
    }

    /// Create an API server error (5xx status codes)
    pub fn server_error(status: u16, message: impl Into<String>, url: impl Into<String>) -> Self {
        Self::ServerError {
            status,
            message: message.into(),
            url: url.into(),
        }
    }

    /// Create an API client error (4xx status codes except 404 and 429)
    pub fn client_error(status: u16, message: impl Into<String>, url: impl Into<String>) -> Self {
        Self::ClientError {
            status,
            message: message.into(),
            url: url.into(),
        }
    }

    /// Create an API rate limit error
    pub fn rate_limit(message: impl Into<String>, url: impl Into<String>) -> Self {
        Self::RateLimit {
            message: message.into(),
            url: url.into(),
        }
    }

    /// Create an API service unavailable error
    pub fn service_unavailable(
        status: u16,
        message: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        Self::ServiceUnavailable {
            status,
            message: message.into(),
            url: url.into(),
        }
    }

    /// Create a network timeout error
    pub fn network_timeout(url: impl Into<String>) -> Self {
        Self::NetworkTimeout { url: url.into() }
    }

    /// Create a network connection error
    pub fn network_connection(url: impl Into<String>, message: impl Into<String>) -> Self {
        Self::NetworkConnection {
            url: url.into(),
            message: message.into(),
        }
    }

    /// Create a malformed JSON error
    pub fn malformed_json(message: impl Into<String>, url: impl Into<String>) -> Self {
        Self::MalformedJson {
            message: message.into(),
            url: url.into(),
        }
    }

    /// Create an unexpected data structure error
    pub fn unexpected_structure(message: impl Into<String>, url: impl Into<String>) -> Self {
        Self::UnexpectedStructure {
            message: message.into(),
            url: url.into(),
        }
    }

    /// Create a no data error
    pub fn no_data(message: impl Into<String>, url: impl Into<String>) -> Self {
        Self::NoData {
            message: message.into(),
            url: url.into(),
        }
    }

    /// Maps a non-success HTTP status to the matching error variant
    pub fn from_status(status_code: u16, reason: &str, url: &str) -> Self {
        match status_code {
            404 => Self::not_found(url),
            429 => Self::rate_limit(reason, url),
            400..=499 => Self::client_error(status_code, reason, url),
            502 | 503 => Self::service_unavailable(status_code, reason, url),
            _ => Self::server_error(status_code, reason, url),
        }
    }
}

/// A single record had a missing or mistyped field.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DataShapeError {
    #[error("Record #{index} is missing required field '{field}'")]
    MissingField { index: usize, field: &'static str },

    #[error("Record #{index} has invalid field '{field}': {message}")]
    InvalidField {
        index: usize,
        field: &'static str,
        message: String,
    },
}

impl DataShapeError {
    /// Structural problems corrupt the round grouping and cannot be skipped.
    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            DataShapeError::MissingField { field: "event", .. }
                | DataShapeError::InvalidField { field: "event", .. }
        )
    }
}

/// Failures while rendering or storing an exported table.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Failed to render CSV for {path}: {source}")]
    Render {
        path: String,
        #[source]
        source: csv::Error,
    },

    #[error("Failed to write {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Storage sink rejected {path}: {message}")]
    Rejected { path: String, message: String },
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("Malformed league data: {0}")]
    DataShape(#[from] DataShapeError),

    #[error("Export failed: {0}")]
    Export(#[from] ExportError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML serialization error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("TOML deserialization error: {0}")]
    TomlDeserialize(#[from] toml::de::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Log setup error: {0}")]
    LogSetup(String),
}

impl AppError {
    /// Create a configuration error with context
    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a log setup error with context
    pub fn log_setup_error(msg: impl Into<String>) -> Self {
        Self::LogSetup(msg.into())
    }

    /// Short stage name used in run outcome messages
    pub fn stage(&self) -> &'static str {
        match self {
            AppError::Fetch(_) => "fetch",
            AppError::DataShape(_) => "aggregate",
            AppError::Export(_) => "export",
            AppError::Config(_) | AppError::TomlSerialize(_) | AppError::TomlDeserialize(_) => {
                "config"
            }
            AppError::Io(_) | AppError::LogSetup(_) => "setup",
        }
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        AppError::Fetch(FetchError::Request(err))
    }
}

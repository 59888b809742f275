use thiserror::Error;

/// Result type alias using ExError
pub type Result<T> = std::result::Result<T, ExError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Each kind maps to a stable error code that can be used for programmatic
/// error handling, testing and log assertions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    // Input
    /// An argument is inconsistent with the repository layout
    InvalidInput,
    /// A configuration file is not valid UTF-8
    InvalidEncoding,
    NotFound,
    /// A required setting (environment variable or flag) is absent
    MissingConfig,

    // Integration/IO
    Io,
    /// The version-control collaborator failed (spawn error, non-zero exit)
    VersionControl,
    Timeout,

    // Internal
    /// A component returned a result its caller cannot handle
    Internal,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::InvalidInput => "ERR_INVALID_INPUT",
            ExErrorKind::InvalidEncoding => "ERR_INVALID_ENCODING",
            ExErrorKind::NotFound => "ERR_NOT_FOUND",
            ExErrorKind::MissingConfig => "ERR_MISSING_CONFIG",
            ExErrorKind::Io => "ERR_IO",
            ExErrorKind::VersionControl => "ERR_VERSION_CONTROL",
            ExErrorKind::Timeout => "ERR_TIMEOUT",
            ExErrorKind::Internal => "ERR_INTERNAL",
        }
    }
}

/// Canonical structured error type
///
/// Classification fields for programmatic handling plus context for
/// debugging (operation name, offending path, message).
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    path: Option<String>,
    message: String,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            path: None,
            message: String::new(),
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add path context
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Get the error kind
    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    /// Get the operation context, if any
    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    /// Get the path context, if any
    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for ExError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(path) = &self.path {
            write!(f, " (path: {})", path)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {}

// ========== End Error Facility ==========

/// Domain failures of a version determination run
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InfraverError {
    /// A configuration file could not be read
    #[error("Failed to read configuration file {path}: {message}")]
    ConfigRead { path: String, message: String },

    /// A configuration file is not valid UTF-8
    #[error("Configuration file is not valid UTF-8: {path}")]
    InvalidUtf8 { path: String },

    /// A version-control command could not be run or exited non-zero
    #[error("Version control command `{command}` failed: {message}")]
    VcsCommand { command: String, message: String },

    /// A version-control command exceeded its time budget
    #[error("Version control command `{command}` timed out after {timeout_secs}s")]
    VcsTimeout { command: String, timeout_secs: u64 },

    /// A revision or path is unknown to the version-control collaborator
    #[error("Unknown revision or path: {spec}")]
    UnknownRevision { spec: String },

    /// A required environment variable is not set
    #[error("Required environment variable not set: {name}")]
    MissingEnv { name: String },

    /// The configuration root resolves outside the repository
    #[error("Configuration root {config_root} is outside the repository {repo_root}")]
    ConfigRootOutsideRepo {
        config_root: String,
        repo_root: String,
    },
}

impl From<InfraverError> for ExError {
    fn from(err: InfraverError) -> Self {
        let message = err.to_string();
        match err {
            InfraverError::ConfigRead { path, .. } => ExError::new(ExErrorKind::Io)
                .with_op("read_config_file")
                .with_path(path)
                .with_message(message),
            InfraverError::InvalidUtf8 { path } => ExError::new(ExErrorKind::InvalidEncoding)
                .with_op("read_config_file")
                .with_path(path)
                .with_message(message),
            InfraverError::VcsCommand { .. } => ExError::new(ExErrorKind::VersionControl)
                .with_op("vcs")
                .with_message(message),
            InfraverError::VcsTimeout { .. } => ExError::new(ExErrorKind::Timeout)
                .with_op("vcs")
                .with_message(message),
            InfraverError::UnknownRevision { .. } => ExError::new(ExErrorKind::NotFound)
                .with_op("vcs")
                .with_message(message),
            InfraverError::MissingEnv { .. } => {
                ExError::new(ExErrorKind::MissingConfig).with_message(message)
            }
            InfraverError::ConfigRootOutsideRepo { config_root, .. } => {
                ExError::new(ExErrorKind::InvalidInput)
                    .with_op("relative_config_root")
                    .with_path(config_root)
                    .with_message(message)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_are_stable() {
        assert_eq!(ExErrorKind::Io.code(), "ERR_IO");
        assert_eq!(ExErrorKind::InvalidEncoding.code(), "ERR_INVALID_ENCODING");
        assert_eq!(ExErrorKind::Timeout.code(), "ERR_TIMEOUT");
    }

    #[test]
    fn test_invalid_utf8_maps_to_invalid_encoding() {
        let err: ExError = InfraverError::InvalidUtf8 {
            path: "main.tf".to_string(),
        }
        .into();
        assert_eq!(err.kind(), ExErrorKind::InvalidEncoding);
        assert_eq!(err.path(), Some("main.tf"));
        assert!(err.to_string().contains("ERR_INVALID_ENCODING"));
    }

    #[test]
    fn test_config_read_keeps_path_and_op() {
        let err: ExError = InfraverError::ConfigRead {
            path: "infra/main.tf".to_string(),
            message: "permission denied".to_string(),
        }
        .into();
        assert_eq!(err.kind(), ExErrorKind::Io);
        assert_eq!(err.op(), Some("read_config_file"));
        assert_eq!(err.path(), Some("infra/main.tf"));
        assert!(err.to_string().contains("permission denied"));
    }

    #[test]
    fn test_config_root_outside_repo_is_invalid_input() {
        let err: ExError = InfraverError::ConfigRootOutsideRepo {
            config_root: "/elsewhere/infra".to_string(),
            repo_root: "/repo".to_string(),
        }
        .into();
        assert_eq!(err.code(), "ERR_INVALID_INPUT");
        assert_eq!(err.path(), Some("/elsewhere/infra"));
    }
}

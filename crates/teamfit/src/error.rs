use crate::config::ConfigError;
use crate::forms::FormDefinitionError;
use crate::submission::SubmissionError;
use crate::telemetry::TelemetryError;
use std::fmt;

#[derive(Debug)]
pub enum AppError {
    Config(ConfigError),
    Telemetry(TelemetryError),
    Io(std::io::Error),
    FormDefinition(FormDefinitionError),
    Submission {
        source_name: String,
        source: SubmissionError,
    },
    Render(serde_json::Error),
}

impl AppError {
    /// Tags a decoding failure with the file or label it came from.
    pub fn submission(source_name: impl Into<String>, source: SubmissionError) -> Self {
        Self::Submission {
            source_name: source_name.into(),
            source,
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(err) => write!(f, "configuration error: {}", err),
            AppError::Telemetry(err) => write!(f, "telemetry error: {}", err),
            AppError::Io(err) => write!(f, "io error: {}", err),
            AppError::FormDefinition(err) => write!(f, "form definition error: {}", err),
            AppError::Submission {
                source_name,
                source,
            } => write!(f, "submission error in {}: {}", source_name, source),
            AppError::Render(err) => write!(f, "failed to render report: {}", err),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Config(err) => Some(err),
            AppError::Telemetry(err) => Some(err),
            AppError::Io(err) => Some(err),
            AppError::FormDefinition(err) => Some(err),
            AppError::Submission { source, .. } => Some(source),
            AppError::Render(err) => Some(err),
        }
    }
}

impl From<ConfigError> for AppError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<TelemetryError> for AppError {
    fn from(value: TelemetryError) -> Self {
        Self::Telemetry(value)
    }
}

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<FormDefinitionError> for AppError {
    fn from(value: FormDefinitionError) -> Self {
        Self::FormDefinition(value)
    }
}

impl From<serde_json::Error> for AppError {
    fn from(value: serde_json::Error) -> Self {
        Self::Render(value)
    }
}

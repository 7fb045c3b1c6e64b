//! Error types for the logger system

pub type Result<T> = std::result::Result<T, LoggerError>;

#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    /// The sink rejected a serialized record
    #[error("sink write failed: record={record}: {source}")]
    SinkWrite {
        record: String,
        #[source]
        source: std::io::Error,
    },

    /// Sentinel carried by an entry that never reached the sink
    #[error("log entry is not written")]
    EntryNotWritten,

    /// Invalid configuration with details
    #[error("Invalid configuration for {component}: {message}")]
    InvalidConfiguration { component: String, message: String },

    /// Generic IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl LoggerError {
    /// Create a sink write error carrying the bytes that were attempted
    pub fn sink_write(record: &[u8], source: std::io::Error) -> Self {
        LoggerError::SinkWrite {
            record: String::from_utf8_lossy(record).into_owned(),
            source,
        }
    }

    /// Create an invalid configuration error
    pub fn config(component: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::InvalidConfiguration {
            component: component.into(),
            message: message.into(),
        }
    }
}

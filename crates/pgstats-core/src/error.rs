use crate::connection::DriverError;
use crate::version::MajorVersion;

/// Error type for monitoring-view access.
///
/// Driver errors are carried as the `source`, never rewritten, so callers can
/// downcast back to `postgres::Error` and tell transport failures apart from
/// schema or version mismatches.
#[derive(Debug, thiserror::Error)]
pub enum StatsError {
    /// The liveness check (or connection attempt) failed.
    #[error("PostgreSQL connection failed: {0}")]
    Connection(#[source] DriverError),

    /// A query or row decode failed.
    #[error("PostgreSQL query on {view} failed: {source}")]
    Query {
        view: &'static str,
        #[source]
        source: DriverError,
    },

    /// `server_version` matched neither `9.<digit>` nor a two-digit major.
    #[error("cannot parse PostgreSQL server version {0:?}")]
    VersionParse(String),

    /// The server is older than the view requires.
    #[error("{view} requires PostgreSQL {required} or newer, server is {detected}")]
    UnsupportedVersion {
        view: &'static str,
        required: MajorVersion,
        detected: MajorVersion,
    },

    /// The client was closed.
    #[error("stats client is closed")]
    Closed,

    /// Connection settings could not be read.
    #[error("PostgreSQL: {0}")]
    Config(String),
}

impl StatsError {
    pub(crate) fn query(view: &'static str, source: impl Into<DriverError>) -> Self {
        StatsError::Query {
            view,
            source: source.into(),
        }
    }
}

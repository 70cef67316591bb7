//! pgstats-core: typed access to PostgreSQL statistics views.
//!
//! Provides:
//! - [`StatsClient`]: one accessor per monitoring view family
//!   (`pg_stat_activity`, `pg_stat_replication`, `pg_statio_*_tables`, ...)
//! - `model`: the record returned for each view family
//! - `connection`: the driver seam, its `postgres::Client` implementation,
//!   libpq-style [`ConnectionConfig`] and a scripted mock for tests
//! - [`parse_major_version`] / [`MajorVersion`]: server version detection
//!
//! Column sets differ between server versions; accessors probe
//! `server_version` and pick the matching query, so callers always get the
//! same record type. Columns a server does not have come back as `None`.
//!
//! ```no_run
//! use pgstats_core::{ConnectionConfig, StatsClient};
//!
//! let config = ConnectionConfig::from_env()?;
//! let mut client = StatsClient::connect(&config)?;
//! for index in client.user_indexes()? {
//!     println!("{}.{}", index.schemaname, index.indexrelname);
//! }
//! client.close()?;
//! # Ok::<(), pgstats_core::StatsError>(())
//! ```

pub mod connection;
pub mod model;

mod client;
mod error;
mod version;

pub use client::StatsClient;
pub use connection::{ConnectionConfig, SslMode};
pub use error::StatsError;
pub use version::{MajorVersion, parse_major_version};

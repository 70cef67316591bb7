//! Monitoring-view client.
//!
//! [`StatsClient`] owns one connection and exposes one accessor per view
//! family. Accessors for versioned families probe `server_version` first and
//! pick their query from [`queries`]; the rest run a fixed query.
//!
//! Accessors are split by family across the submodules of this module, each
//! adding an `impl` block to [`StatsClient`] together with the row decoding of
//! its record.

mod activity;
mod archiver;
mod bgwriter;
mod database;
mod functions;
mod indexes;
mod progress_vacuum;
mod queries;
mod replication;
mod sequences;
mod ssl;
mod statements;
mod subscription;
mod tables;
mod wal_receiver;

use tracing::{debug, warn};

use self::queries::{RelationScope, RelationView};

use crate::connection::{ConnectionConfig, FromStatsRow, StatsConnection};
use crate::error::StatsError;
use crate::version::{MajorVersion, parse_major_version};

/// Read-only client over PostgreSQL statistics views.
///
/// Created once with [`new`](Self::new) (or [`connect`](StatsClient::connect))
/// and closed once with [`close`](Self::close). After close every accessor
/// fails with [`StatsError::Closed`].
pub struct StatsClient<C: StatsConnection = postgres::Client> {
    conn: Option<C>,
}

impl StatsClient<postgres::Client> {
    /// Opens a connection with `config` and wraps it.
    pub fn connect(config: &ConnectionConfig) -> Result<Self, StatsError> {
        Self::new(config.connect()?)
    }
}

impl<C: StatsConnection> StatsClient<C> {
    /// Wraps an open connection after checking that the server answers.
    ///
    /// No query other than the liveness check is issued.
    pub fn new(mut conn: C) -> Result<Self, StatsError> {
        conn.ping().map_err(StatsError::Connection)?;
        debug!("stats client ready");
        Ok(Self { conn: Some(conn) })
    }

    /// Releases the connection. Closing twice is a no-op.
    pub fn close(&mut self) -> Result<(), StatsError> {
        match self.conn.take() {
            Some(conn) => {
                debug!("closing stats client");
                conn.close().map_err(StatsError::Connection)
            }
            None => Ok(()),
        }
    }

    pub fn is_closed(&self) -> bool {
        self.conn.is_none()
    }

    /// The underlying connection, `None` once closed.
    pub fn get_ref(&self) -> Option<&C> {
        self.conn.as_ref()
    }

    /// Runs `SHOW server_version` and parses the major version.
    pub fn server_version(&mut self) -> Result<MajorVersion, StatsError> {
        const VIEW: &str = "server_version";

        let row = self
            .conn()?
            .query_opt(queries::SERVER_VERSION_QUERY)
            .map_err(|e| StatsError::query(VIEW, e))?
            .ok_or_else(|| StatsError::query(VIEW, "SHOW server_version returned no row"))?;
        let raw: String = row.get(VIEW).map_err(|e| StatsError::query(VIEW, e))?;

        let version = parse_major_version(&raw)?;
        debug!(server_version = %raw, major = %version, "detected server version");
        Ok(version)
    }

    fn conn(&mut self) -> Result<&mut C, StatsError> {
        self.conn.as_mut().ok_or(StatsError::Closed)
    }

    /// Fails with `UnsupportedVersion` when `detected` is older than `required`.
    fn require(
        view: &'static str,
        required: MajorVersion,
        detected: MajorVersion,
    ) -> Result<(), StatsError> {
        if detected < required {
            return Err(Self::unsupported(view, required, detected));
        }
        Ok(())
    }

    fn unsupported(
        view: &'static str,
        required: MajorVersion,
        detected: MajorVersion,
    ) -> StatsError {
        warn!(view, %required, %detected, "view not available on this server version");
        StatsError::UnsupportedVersion {
            view,
            required,
            detected,
        }
    }

    /// Runs `sql` and decodes every row, in server order.
    fn fetch_all<T: FromStatsRow>(
        &mut self,
        view: &'static str,
        sql: &str,
    ) -> Result<Vec<T>, StatsError> {
        let rows = self
            .conn()?
            .query(sql)
            .map_err(|e| StatsError::query(view, e))?;

        let records = rows
            .iter()
            .map(T::from_row)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| StatsError::query(view, e))?;
        debug!(view, rows = records.len(), "fetched");
        Ok(records)
    }

    /// Reads one scope of a per-relation view family.
    fn scoped<T: FromStatsRow>(
        &mut self,
        family: RelationView,
        scope: RelationScope,
    ) -> Result<Vec<T>, StatsError> {
        let view = family.name(scope);
        self.fetch_all(view, &family.query(view))
    }

    /// Runs `sql` and decodes its only row, if any.
    fn fetch_opt<T: FromStatsRow>(
        &mut self,
        view: &'static str,
        sql: &str,
    ) -> Result<Option<T>, StatsError> {
        let row = self
            .conn()?
            .query_opt(sql)
            .map_err(|e| StatsError::query(view, e))?;

        let record = row
            .as_ref()
            .map(T::from_row)
            .transpose()
            .map_err(|e| StatsError::query(view, e))?;
        debug!(view, rows = usize::from(record.is_some()), "fetched");
        Ok(record)
    }

    /// Runs `sql` and decodes exactly one row.
    fn fetch_one<T: FromStatsRow>(
        &mut self,
        view: &'static str,
        sql: &str,
    ) -> Result<T, StatsError> {
        self.fetch_opt(view, sql)?
            .ok_or_else(|| StatsError::query(view, format!("{view} returned no row")))
    }
}

//! pg_stat_replication.

use tracing::debug;

use super::StatsClient;
use super::queries::ReplicationVariant;
use crate::connection::{DecodeError, FromStatsRow, StatsConnection, StatsRow};
use crate::error::StatsError;
use crate::model::ReplicationRow;

const VIEW: &str = "pg_stat_replication";

impl FromStatsRow for ReplicationRow {
    fn from_row(row: &StatsRow) -> Result<Self, DecodeError> {
        Ok(Self {
            pid: row.get("pid")?,
            usesysid: row.get("usesysid")?,
            usename: row.get("usename")?,
            application_name: row.get("application_name")?,
            client_addr: row.get("client_addr")?,
            client_hostname: row.get("client_hostname")?,
            client_port: row.get("client_port")?,
            backend_start: row.get("backend_start")?,
            backend_xmin: row.get("backend_xmin")?,
            state: row.get("state")?,
            sent_lsn: row.get("sent_lsn")?,
            write_lsn: row.get("write_lsn")?,
            flush_lsn: row.get("flush_lsn")?,
            replay_lsn: row.get("replay_lsn")?,
            // PG 10+
            write_lag: row.get_opt("write_lag")?,
            flush_lag: row.get_opt("flush_lag")?,
            replay_lag: row.get_opt("replay_lag")?,
            sync_priority: row.get("sync_priority")?,
            sync_state: row.get("sync_state")?,
        })
    }
}

impl<C: StatsConnection> StatsClient<C> {
    /// One row per WAL sender (connected standby or base backup).
    pub fn replication(&mut self) -> Result<Vec<ReplicationRow>, StatsError> {
        let version = self.server_version()?;
        let variant = ReplicationVariant::select(version);
        debug!(view = VIEW, %version, ?variant, "selected query variant");
        self.fetch_all(VIEW, &variant.query())
    }
}

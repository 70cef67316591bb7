//! pg_stat_bgwriter, joined with pg_stat_checkpointer on PG 17+.

use tracing::debug;

use super::StatsClient;
use super::queries::BgWriterVariant;
use crate::connection::{DecodeError, FromStatsRow, StatsConnection, StatsRow};
use crate::error::StatsError;
use crate::model::BgWriterView;

const VIEW: &str = "pg_stat_bgwriter";

impl FromStatsRow for BgWriterView {
    fn from_row(row: &StatsRow) -> Result<Self, DecodeError> {
        Ok(Self {
            checkpoints_timed: row.get("checkpoints_timed")?,
            checkpoints_req: row.get("checkpoints_req")?,
            checkpoint_write_time: row.get("checkpoint_write_time")?,
            checkpoint_sync_time: row.get("checkpoint_sync_time")?,
            buffers_checkpoint: row.get("buffers_checkpoint")?,
            buffers_clean: row.get("buffers_clean")?,
            maxwritten_clean: row.get("maxwritten_clean")?,
            // Gone in PG 17
            buffers_backend: row.get_opt("buffers_backend")?,
            buffers_backend_fsync: row.get_opt("buffers_backend_fsync")?,
            buffers_alloc: row.get("buffers_alloc")?,
            stats_reset: row.get("stats_reset")?,
        })
    }
}

impl<C: StatsConnection> StatsClient<C> {
    /// Background writer and checkpointer counters (one row).
    pub fn bg_writer(&mut self) -> Result<BgWriterView, StatsError> {
        let version = self.server_version()?;
        let variant = BgWriterVariant::select(version);
        debug!(view = VIEW, %version, ?variant, "selected query variant");
        self.fetch_one(VIEW, variant.query())
    }
}

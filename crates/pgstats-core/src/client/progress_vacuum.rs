//! pg_stat_progress_vacuum (PG 9.6+).

use tracing::debug;

use super::StatsClient;
use super::queries::ProgressVacuumVariant;
use crate::connection::{DecodeError, FromStatsRow, StatsConnection, StatsRow};
use crate::error::StatsError;
use crate::model::ProgressVacuumRow;

const VIEW: &str = "pg_stat_progress_vacuum";

impl FromStatsRow for ProgressVacuumRow {
    fn from_row(row: &StatsRow) -> Result<Self, DecodeError> {
        Ok(Self {
            pid: row.get("pid")?,
            datid: row.get("datid")?,
            datname: row.get("datname")?,
            relid: row.get("relid")?,
            phase: row.get("phase")?,
            heap_blks_total: row.get("heap_blks_total")?,
            heap_blks_scanned: row.get("heap_blks_scanned")?,
            heap_blks_vacuumed: row.get("heap_blks_vacuumed")?,
            index_vacuum_count: row.get("index_vacuum_count")?,
            // PG < 17
            max_dead_tuples: row.get_opt("max_dead_tuples")?,
            num_dead_tuples: row.get_opt("num_dead_tuples")?,
            // PG 17+
            max_dead_tuple_bytes: row.get_opt("max_dead_tuple_bytes")?,
            num_dead_item_ids: row.get_opt("num_dead_item_ids")?,
            dead_tuple_bytes: row.get_opt("dead_tuple_bytes")?,
            indexes_total: row.get_opt("indexes_total")?,
            indexes_processed: row.get_opt("indexes_processed")?,
        })
    }
}

impl<C: StatsConnection> StatsClient<C> {
    /// Progress of every running VACUUM.
    pub fn progress_vacuum(&mut self) -> Result<Vec<ProgressVacuumRow>, StatsError> {
        let version = self.server_version()?;
        Self::require(VIEW, ProgressVacuumVariant::MIN_VERSION, version)?;

        let variant = ProgressVacuumVariant::select(version);
        debug!(view = VIEW, %version, ?variant, "selected query variant");
        self.fetch_all(VIEW, &variant.query())
    }
}

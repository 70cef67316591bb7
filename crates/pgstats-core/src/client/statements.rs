//! pg_stat_statements (requires the extension).

use tracing::debug;

use super::StatsClient;
use super::queries::StatementsVariant;
use crate::connection::{DecodeError, FromStatsRow, StatsConnection, StatsRow};
use crate::error::StatsError;
use crate::model::StatementsRow;

const VIEW: &str = "pg_stat_statements";

impl FromStatsRow for StatementsRow {
    fn from_row(row: &StatsRow) -> Result<Self, DecodeError> {
        Ok(Self {
            userid: row.get("userid")?,
            dbid: row.get("dbid")?,
            queryid: row.get("queryid")?,
            query: row.get("query")?,
            calls: row.get("calls")?,
            // not selected before 9.5
            total_time: row.get_opt("total_time")?,
            min_time: row.get_opt("min_time")?,
            max_time: row.get_opt("max_time")?,
            mean_time: row.get_opt("mean_time")?,
            stddev_time: row.get_opt("stddev_time")?,
            rows: row.get("rows")?,
            shared_blks_hit: row.get("shared_blks_hit")?,
            shared_blks_read: row.get("shared_blks_read")?,
            shared_blks_dirtied: row.get("shared_blks_dirtied")?,
            shared_blks_written: row.get("shared_blks_written")?,
            local_blks_hit: row.get("local_blks_hit")?,
            local_blks_read: row.get("local_blks_read")?,
            local_blks_dirtied: row.get("local_blks_dirtied")?,
            local_blks_written: row.get("local_blks_written")?,
            temp_blks_read: row.get("temp_blks_read")?,
            temp_blks_written: row.get("temp_blks_written")?,
            blk_read_time: row.get("blk_read_time")?,
            blk_write_time: row.get("blk_write_time")?,
        })
    }
}

impl<C: StatsConnection> StatsClient<C> {
    /// Execution statistics per normalized statement.
    ///
    /// Fails with a query error when the extension is not installed in the
    /// connected database.
    pub fn statements(&mut self) -> Result<Vec<StatementsRow>, StatsError> {
        let version = self.server_version()?;
        let variant = StatementsVariant::select(version);
        debug!(view = VIEW, %version, ?variant, "selected query variant");
        self.fetch_all(VIEW, &variant.query())
    }
}

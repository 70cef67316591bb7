//! pg_stat_database and pg_stat_database_conflicts.

use super::StatsClient;
use super::queries::{build_database_conflicts_query, build_database_query};
use crate::connection::{DecodeError, FromStatsRow, StatsConnection, StatsRow};
use crate::error::StatsError;
use crate::model::{DatabaseConflictsRow, DatabaseRow};

impl FromStatsRow for DatabaseRow {
    fn from_row(row: &StatsRow) -> Result<Self, DecodeError> {
        Ok(Self {
            datid: row.get("datid")?,
            datname: row.get("datname")?,
            numbackends: row.get("numbackends")?,
            xact_commit: row.get("xact_commit")?,
            xact_rollback: row.get("xact_rollback")?,
            blks_read: row.get("blks_read")?,
            blks_hit: row.get("blks_hit")?,
            tup_returned: row.get("tup_returned")?,
            tup_fetched: row.get("tup_fetched")?,
            tup_inserted: row.get("tup_inserted")?,
            tup_updated: row.get("tup_updated")?,
            tup_deleted: row.get("tup_deleted")?,
            conflicts: row.get("conflicts")?,
            temp_files: row.get("temp_files")?,
            temp_bytes: row.get("temp_bytes")?,
            deadlocks: row.get("deadlocks")?,
            blk_read_time: row.get("blk_read_time")?,
            blk_write_time: row.get("blk_write_time")?,
            stats_reset: row.get("stats_reset")?,
        })
    }
}

impl FromStatsRow for DatabaseConflictsRow {
    fn from_row(row: &StatsRow) -> Result<Self, DecodeError> {
        Ok(Self {
            datid: row.get("datid")?,
            datname: row.get("datname")?,
            confl_tablespace: row.get("confl_tablespace")?,
            confl_lock: row.get("confl_lock")?,
            confl_snapshot: row.get("confl_snapshot")?,
            confl_bufferpin: row.get("confl_bufferpin")?,
            confl_deadlock: row.get("confl_deadlock")?,
        })
    }
}

impl<C: StatsConnection> StatsClient<C> {
    /// One row per database, plus the shared-objects row on PG 12+.
    pub fn database(&mut self) -> Result<Vec<DatabaseRow>, StatsError> {
        self.fetch_all("pg_stat_database", build_database_query())
    }

    /// Recovery-conflict counters per database. Only non-zero on standbys.
    pub fn database_conflicts(&mut self) -> Result<Vec<DatabaseConflictsRow>, StatsError> {
        self.fetch_all("pg_stat_database_conflicts", build_database_conflicts_query())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connection::MockConnection;

    fn database_row(datid: u32, datname: Option<&str>) -> StatsRow {
        StatsRow::new()
            .with("datid", datid)
            .with("datname", datname)
            .with("numbackends", 3)
            .with("xact_commit", 1_200i64)
            .with("xact_rollback", 2i64)
            .with("blks_read", 340i64)
            .with("blks_hit", 98_000i64)
            .with("tup_returned", 5_000i64)
            .with("tup_fetched", 4_000i64)
            .with("tup_inserted", 10i64)
            .with("tup_updated", 5i64)
            .with("tup_deleted", 1i64)
            .with("conflicts", 0i64)
            .with("temp_files", 0i64)
            .with("temp_bytes", 0i64)
            .with("deadlocks", 0i64)
            .with("blk_read_time", 0.0)
            .with("blk_write_time", 0.0)
            .with("stats_reset", Option::<chrono::DateTime<chrono::Utc>>::None)
    }

    #[test]
    fn decodes_shared_objects_row() {
        let mock = MockConnection::new("15.1").with_rows(
            "pg_stat_database",
            vec![database_row(0, None), database_row(5, Some("postgres"))],
        );
        let mut client = StatsClient::new(mock.clone()).unwrap();

        let rows = client.database().unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].datname, None);
        assert_eq!(rows[1].datname.as_deref(), Some("postgres"));
        assert_eq!(rows[1].blks_hit, Some(98_000));
        // fixed query, no version probe
        assert_eq!(mock.queries().len(), 1);
    }

    #[test]
    fn conflicts_query_targets_conflicts_view() {
        let mock = MockConnection::new("15.1");
        let mut client = StatsClient::new(mock.clone()).unwrap();
        assert!(client.database_conflicts().unwrap().is_empty());
        assert_eq!(mock.queries_for("pg_stat_database_conflicts").len(), 1);
    }
}

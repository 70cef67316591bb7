//! pg_stat_archiver.

use super::StatsClient;
use super::queries::build_archiver_query;
use crate::connection::{DecodeError, FromStatsRow, StatsConnection, StatsRow};
use crate::error::StatsError;
use crate::model::ArchiverView;

const VIEW: &str = "pg_stat_archiver";

impl FromStatsRow for ArchiverView {
    fn from_row(row: &StatsRow) -> Result<Self, DecodeError> {
        Ok(Self {
            archived_count: row.get("archived_count")?,
            last_archived_wal: row.get("last_archived_wal")?,
            last_archived_time: row.get("last_archived_time")?,
            failed_count: row.get("failed_count")?,
            last_failed_wal: row.get("last_failed_wal")?,
            last_failed_time: row.get("last_failed_time")?,
            stats_reset: row.get("stats_reset")?,
        })
    }
}

impl<C: StatsConnection> StatsClient<C> {
    /// WAL archiver status. The view always has exactly one row.
    pub fn archiver(&mut self) -> Result<ArchiverView, StatsError> {
        self.fetch_one(VIEW, build_archiver_query())
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;
    use crate::connection::MockConnection;

    fn archiver_row() -> StatsRow {
        StatsRow::new()
            .with("archived_count", 118i64)
            .with("last_archived_wal", "000000010000000000000075")
            .with("last_archived_time", Utc.with_ymd_and_hms(2024, 3, 9, 8, 1, 0).unwrap())
            .with("failed_count", 0i64)
            .with("last_failed_wal", Option::<String>::None)
            .with("last_failed_time", Option::<chrono::DateTime<Utc>>::None)
            .with("stats_reset", Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap())
    }

    #[test]
    fn decodes_single_row_without_version_probe() {
        let mock = MockConnection::new("14.5").with_rows(VIEW, vec![archiver_row()]);
        let mut client = StatsClient::new(mock.clone()).unwrap();

        let archiver = client.archiver().unwrap();
        assert_eq!(archiver.archived_count, Some(118));
        assert_eq!(archiver.last_failed_wal, None);
        assert_eq!(mock.queries().len(), 1);
    }

    #[test]
    fn missing_row_is_query_error() {
        let mut client = StatsClient::new(MockConnection::new("14.5")).unwrap();
        assert!(matches!(
            client.archiver(),
            Err(StatsError::Query { view: VIEW, .. })
        ));
    }
}

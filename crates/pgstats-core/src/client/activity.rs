//! pg_stat_activity.

use tracing::debug;

use super::StatsClient;
use super::queries::ActivityVariant;
use crate::connection::{DecodeError, FromStatsRow, StatsConnection, StatsRow};
use crate::error::StatsError;
use crate::model::ActivityRow;

const VIEW: &str = "pg_stat_activity";

impl FromStatsRow for ActivityRow {
    fn from_row(row: &StatsRow) -> Result<Self, DecodeError> {
        Ok(Self {
            datid: row.get("datid")?,
            datname: row.get("datname")?,
            pid: row.get("pid")?,
            usesysid: row.get("usesysid")?,
            usename: row.get("usename")?,
            application_name: row.get("application_name")?,
            client_addr: row.get("client_addr")?,
            client_hostname: row.get("client_hostname")?,
            client_port: row.get("client_port")?,
            backend_start: row.get("backend_start")?,
            xact_start: row.get("xact_start")?,
            query_start: row.get("query_start")?,
            state_change: row.get("state_change")?,
            wait_event_type: row.get_opt("wait_event_type")?,
            wait_event: row.get_opt("wait_event")?,
            waiting: row.get_opt("waiting")?,
            state: row.get("state")?,
            backend_xid: row.get("backend_xid")?,
            backend_xmin: row.get("backend_xmin")?,
            query: row.get("query")?,
            backend_type: row.get_opt("backend_type")?,
        })
    }
}

impl<C: StatsConnection> StatsClient<C> {
    /// One row per server process.
    pub fn activity(&mut self) -> Result<Vec<ActivityRow>, StatsError> {
        let version = self.server_version()?;
        let variant = ActivityVariant::select(version);
        debug!(view = VIEW, %version, ?variant, "selected query variant");
        self.fetch_all(VIEW, &variant.query())
    }
}

#[cfg(test)]
mod tests {
    use std::net::{IpAddr, Ipv4Addr};

    use chrono::{TimeZone, Utc};

    use super::*;
    use crate::connection::MockConnection;

    fn base_row(pid: i32) -> StatsRow {
        StatsRow::new()
            .with("datid", 16384u32)
            .with("datname", "app")
            .with("pid", pid)
            .with("usesysid", 10u32)
            .with("usename", "postgres")
            .with("application_name", "psql")
            .with("client_addr", IpAddr::V4(Ipv4Addr::new(10, 0, 0, 7)))
            .with("client_hostname", Option::<String>::None)
            .with("client_port", 51234)
            .with("backend_start", Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap())
            .with("xact_start", Option::<chrono::DateTime<Utc>>::None)
            .with("query_start", Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 5).unwrap())
            .with("state_change", Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 5).unwrap())
            .with("state", "active")
            .with("backend_xid", Option::<i64>::None)
            .with("backend_xmin", 7_321i64)
            .with("query", "SELECT 1")
    }

    #[test]
    fn pg95_requests_waiting_flag_only() {
        let mock = MockConnection::new("9.5.25").with_rows(
            VIEW,
            vec![base_row(100).with("waiting", false)],
        );
        let mut client = StatsClient::new(mock.clone()).unwrap();

        let rows = client.activity().unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].waiting, Some(false));
        assert_eq!(rows[0].wait_event_type, None);
        assert_eq!(rows[0].backend_type, None);

        let sql = &mock.queries_for(VIEW)[0];
        assert!(!sql.contains("wait_event_type"));
        assert!(!sql.contains("wait_event"));
    }

    #[test]
    fn pg96_requests_wait_events_without_backend_type() {
        let mock = MockConnection::new("9.6.24").with_rows(
            VIEW,
            vec![
                base_row(100)
                    .with("wait_event_type", "Lock")
                    .with("wait_event", "relation"),
            ],
        );
        let mut client = StatsClient::new(mock.clone()).unwrap();

        let rows = client.activity().unwrap();
        assert_eq!(rows[0].wait_event.as_deref(), Some("relation"));
        assert_eq!(rows[0].waiting, None);

        let sql = &mock.queries_for(VIEW)[0];
        assert!(sql.contains("wait_event_type"));
        assert!(!sql.contains("backend_type"));
        assert!(!sql.contains("waiting"));
    }

    #[test]
    fn pg10_requests_backend_type() {
        let mock = MockConnection::new("10.23").with_rows(
            VIEW,
            vec![
                base_row(100)
                    .with("wait_event_type", Option::<String>::None)
                    .with("wait_event", Option::<String>::None)
                    .with("backend_type", "client backend"),
                base_row(42)
                    .with("wait_event_type", "Activity")
                    .with("wait_event", "CheckpointerMain")
                    .with("backend_type", "checkpointer"),
            ],
        );
        let mut client = StatsClient::new(mock.clone()).unwrap();

        let rows = client.activity().unwrap();
        let pids: Vec<i32> = rows.iter().map(|r| r.pid).collect();
        assert_eq!(pids, [100, 42]);
        assert_eq!(rows[1].backend_type.as_deref(), Some("checkpointer"));
        assert_eq!(
            rows[0].client_addr,
            Some(IpAddr::V4(Ipv4Addr::new(10, 0, 0, 7)))
        );
        assert_eq!(rows[0].backend_xmin, Some(7_321));
        assert!(mock.queries_for(VIEW)[0].contains("backend_type"));
    }

    #[test]
    fn repeated_calls_return_identical_records() {
        let mock = MockConnection::new("16.2").with_rows(
            VIEW,
            vec![base_row(7).with("backend_type", "walsender")],
        );
        let mut client = StatsClient::new(mock).unwrap();
        assert_eq!(client.activity().unwrap(), client.activity().unwrap());
    }

    #[test]
    fn empty_view_is_not_an_error() {
        let mut client = StatsClient::new(MockConnection::new("14.0")).unwrap();
        assert!(client.activity().unwrap().is_empty());
    }

    #[test]
    fn unparseable_version_issues_no_data_query() {
        let mock = MockConnection::new("devel");
        let mut client = StatsClient::new(mock.clone()).unwrap();
        assert!(matches!(
            client.activity(),
            Err(StatsError::VersionParse(_))
        ));
        assert!(mock.queries_for(VIEW).is_empty());
    }
}

//! pg_stat_subscription (PG 10+).

use super::StatsClient;
use super::queries::{SUBSCRIPTION_MIN_VERSION, build_subscription_query};
use crate::connection::{DecodeError, FromStatsRow, StatsConnection, StatsRow};
use crate::error::StatsError;
use crate::model::SubscriptionRow;

const VIEW: &str = "pg_stat_subscription";

impl FromStatsRow for SubscriptionRow {
    fn from_row(row: &StatsRow) -> Result<Self, DecodeError> {
        Ok(Self {
            subid: row.get("subid")?,
            subname: row.get("subname")?,
            pid: row.get("pid")?,
            relid: row.get("relid")?,
            received_lsn: row.get("received_lsn")?,
            last_msg_send_time: row.get("last_msg_send_time")?,
            last_msg_receipt_time: row.get("last_msg_receipt_time")?,
            latest_end_lsn: row.get("latest_end_lsn")?,
            latest_end_time: row.get("latest_end_time")?,
        })
    }
}

impl<C: StatsConnection> StatsClient<C> {
    /// Logical replication subscription workers (PG 10+).
    pub fn subscription(&mut self) -> Result<Vec<SubscriptionRow>, StatsError> {
        let version = self.server_version()?;
        Self::require(VIEW, SUBSCRIPTION_MIN_VERSION, version)?;
        self.fetch_all(VIEW, build_subscription_query())
    }
}

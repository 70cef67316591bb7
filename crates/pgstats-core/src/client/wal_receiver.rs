//! pg_stat_wal_receiver (PG 9.6+).

use tracing::debug;

use super::StatsClient;
use super::queries::WalReceiverVariant;
use crate::connection::{DecodeError, FromStatsRow, StatsConnection, StatsRow};
use crate::error::StatsError;
use crate::model::WalReceiverView;

const VIEW: &str = "pg_stat_wal_receiver";

impl FromStatsRow for WalReceiverView {
    fn from_row(row: &StatsRow) -> Result<Self, DecodeError> {
        Ok(Self {
            pid: row.get("pid")?,
            status: row.get("status")?,
            receive_start_lsn: row.get("receive_start_lsn")?,
            receive_start_tli: row.get("receive_start_tli")?,
            received_lsn: row.get("received_lsn")?,
            received_tli: row.get("received_tli")?,
            last_msg_send_time: row.get("last_msg_send_time")?,
            last_msg_receipt_time: row.get("last_msg_receipt_time")?,
            latest_end_lsn: row.get("latest_end_lsn")?,
            latest_end_time: row.get("latest_end_time")?,
            slot_name: row.get("slot_name")?,
            // PG 11+
            sender_host: row.get_opt("sender_host")?,
            sender_port: row.get_opt("sender_port")?,
            conninfo: row.get("conninfo")?,
        })
    }
}

impl<C: StatsConnection> StatsClient<C> {
    /// State of the WAL receiver. `None` when no receiver runs (a primary).
    pub fn wal_receiver(&mut self) -> Result<Option<WalReceiverView>, StatsError> {
        let version = self.server_version()?;
        let Some(variant) = WalReceiverVariant::select(version) else {
            return Err(Self::unsupported(VIEW, WalReceiverVariant::MIN_VERSION, version));
        };
        debug!(view = VIEW, %version, ?variant, "selected query variant");
        self.fetch_opt(VIEW, &variant.query())
    }
}

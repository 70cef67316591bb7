//! Per-backend and per-connection views: sessions, replication, SSL,
//! subscriptions, WAL receiver and vacuum progress.

use std::net::IpAddr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One server process from `pg_stat_activity`.
///
/// Which of the wait columns are filled depends on the server:
/// - `waiting`: up to 9.5 only
/// - `wait_event_type`, `wait_event`: 9.6 and later
/// - `backend_type`: 10 and later
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityRow {
    /// OID of the database this backend is connected to.
    pub datid: Option<u32>,
    /// Name of the database this backend is connected to.
    pub datname: Option<String>,
    /// Process ID of this backend.
    pub pid: i32,
    /// OID of the user logged into this backend.
    pub usesysid: Option<u32>,
    pub usename: Option<String>,
    pub application_name: Option<String>,
    /// Client IP address; `None` for Unix sockets and internal processes.
    pub client_addr: Option<IpAddr>,
    /// Reverse DNS of `client_addr`, only with `log_hostname` enabled.
    pub client_hostname: Option<String>,
    /// Client TCP port, or -1 for a Unix socket.
    pub client_port: Option<i32>,
    pub backend_start: Option<DateTime<Utc>>,
    /// Start of the current transaction; `None` outside a transaction.
    pub xact_start: Option<DateTime<Utc>>,
    pub query_start: Option<DateTime<Utc>>,
    pub state_change: Option<DateTime<Utc>>,
    pub wait_event_type: Option<String>,
    pub wait_event: Option<String>,
    /// Lock wait flag of 9.5 and older servers.
    pub waiting: Option<bool>,
    /// active, idle, idle in transaction, ...
    pub state: Option<String>,
    /// Top-level transaction id of this backend.
    pub backend_xid: Option<i64>,
    /// xmin horizon of this backend.
    pub backend_xmin: Option<i64>,
    /// Most recent query text (truncated to `track_activity_query_size`).
    pub query: Option<String>,
    pub backend_type: Option<String>,
}

/// One WAL sender from `pg_stat_replication`.
///
/// LSN columns are reported as raw byte positions. Servers before 10 expose
/// them under `*_location` names and have no lag columns; the lags stay `None`
/// there.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReplicationRow {
    /// Process ID of the WAL sender.
    pub pid: i32,
    pub usesysid: Option<u32>,
    pub usename: Option<String>,
    pub application_name: Option<String>,
    pub client_addr: Option<IpAddr>,
    pub client_hostname: Option<String>,
    pub client_port: Option<i32>,
    pub backend_start: Option<DateTime<Utc>>,
    /// Standby xmin horizon reported by `hot_standby_feedback`.
    pub backend_xmin: Option<i64>,
    /// WAL sender state (startup, catchup, streaming, backup, stopping).
    pub state: Option<String>,
    /// Last WAL position sent on this connection.
    pub sent_lsn: Option<u64>,
    /// Last WAL position written to disk by the standby.
    pub write_lsn: Option<u64>,
    /// Last WAL position flushed to disk by the standby.
    pub flush_lsn: Option<u64>,
    /// Last WAL position replayed by the standby.
    pub replay_lsn: Option<u64>,
    /// Seconds between local flush and standby write confirmation.
    pub write_lag: Option<f64>,
    /// Seconds between local flush and standby flush confirmation.
    pub flush_lag: Option<f64>,
    /// Seconds between local flush and standby replay confirmation.
    pub replay_lag: Option<f64>,
    pub sync_priority: Option<i32>,
    /// async, potential, sync or quorum.
    pub sync_state: Option<String>,
}

/// One connection from `pg_stat_ssl` (PostgreSQL 9.5+).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SslRow {
    pub pid: i32,
    /// True if SSL is used on this connection.
    pub ssl: bool,
    /// SSL protocol version, `None` without SSL.
    pub version: Option<String>,
    pub cipher: Option<String>,
    /// Bits in the encryption algorithm.
    pub bits: Option<i32>,
    /// SSL compression flag. The column was removed in PostgreSQL 14.
    pub compression: Option<bool>,
    /// Distinguished Name of the client certificate (`client_dn` from 12 on).
    pub clientdn: Option<String>,
}

/// One subscription worker from `pg_stat_subscription` (PostgreSQL 10+).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubscriptionRow {
    pub subid: u32,
    pub subname: String,
    /// Worker process ID; `None` when no worker is running.
    pub pid: Option<i32>,
    /// Relation being synchronized; `None` for the main apply worker.
    pub relid: Option<u32>,
    pub received_lsn: Option<u64>,
    pub last_msg_send_time: Option<DateTime<Utc>>,
    pub last_msg_receipt_time: Option<DateTime<Utc>>,
    pub latest_end_lsn: Option<u64>,
    pub latest_end_time: Option<DateTime<Utc>>,
}

/// The WAL receiver of a standby, from `pg_stat_wal_receiver`.
///
/// `sender_host` and `sender_port` exist from PostgreSQL 11. From 13 on the
/// server calls `received_lsn` `flushed_lsn`; it is reported here under the
/// older name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WalReceiverView {
    pub pid: i32,
    /// Activity status of the WAL receiver process. NULL, like every column
    /// but `pid`, for roles without `pg_read_all_stats`.
    pub status: Option<String>,
    /// First WAL position used when the receiver started.
    pub receive_start_lsn: Option<u64>,
    /// First timeline used when the receiver started.
    pub receive_start_tli: Option<i32>,
    /// Last WAL position received and flushed to disk.
    pub received_lsn: Option<u64>,
    pub received_tli: Option<i32>,
    pub last_msg_send_time: Option<DateTime<Utc>>,
    pub last_msg_receipt_time: Option<DateTime<Utc>>,
    /// Last WAL position reported back to the sender.
    pub latest_end_lsn: Option<u64>,
    pub latest_end_time: Option<DateTime<Utc>>,
    pub slot_name: Option<String>,
    pub sender_host: Option<String>,
    pub sender_port: Option<i32>,
    /// Connection string with secrets obfuscated.
    pub conninfo: Option<String>,
}

/// One running VACUUM from `pg_stat_progress_vacuum` (PostgreSQL 9.6+).
///
/// PostgreSQL 17 replaced the tuple counters with byte/item counters:
/// - before 17: `max_dead_tuples`, `num_dead_tuples`
/// - 17 and later: `max_dead_tuple_bytes`, `num_dead_item_ids`,
///   `dead_tuple_bytes`, `indexes_total`, `indexes_processed`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressVacuumRow {
    pub pid: i32,
    pub datid: u32,
    pub datname: String,
    /// OID of the table being vacuumed.
    pub relid: u32,
    /// Current processing phase.
    pub phase: String,
    pub heap_blks_total: Option<i64>,
    pub heap_blks_scanned: Option<i64>,
    pub heap_blks_vacuumed: Option<i64>,
    /// Completed index vacuum cycles.
    pub index_vacuum_count: Option<i64>,
    pub max_dead_tuples: Option<i64>,
    pub num_dead_tuples: Option<i64>,
    pub max_dead_tuple_bytes: Option<i64>,
    pub num_dead_item_ids: Option<i64>,
    pub dead_tuple_bytes: Option<i64>,
    pub indexes_total: Option<i64>,
    pub indexes_processed: Option<i64>,
}

//! Instance-wide views: databases, background processes and statements.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The single row of `pg_stat_archiver`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArchiverView {
    /// WAL files successfully archived.
    pub archived_count: Option<i64>,
    pub last_archived_wal: Option<String>,
    pub last_archived_time: Option<DateTime<Utc>>,
    /// Failed archiving attempts.
    pub failed_count: Option<i64>,
    pub last_failed_wal: Option<String>,
    pub last_failed_time: Option<DateTime<Utc>>,
    pub stats_reset: Option<DateTime<Utc>>,
}

/// Background writer and checkpoint counters.
///
/// Source: `pg_stat_bgwriter`; on PostgreSQL 17+ the checkpoint counters come
/// from `pg_stat_checkpointer` and `buffers_backend`/`buffers_backend_fsync`
/// are gone (they moved to `pg_stat_io`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BgWriterView {
    /// Scheduled checkpoints performed.
    pub checkpoints_timed: Option<i64>,
    /// Requested checkpoints performed.
    pub checkpoints_req: Option<i64>,
    /// Milliseconds spent writing checkpoint files.
    pub checkpoint_write_time: Option<f64>,
    /// Milliseconds spent syncing checkpoint files.
    pub checkpoint_sync_time: Option<f64>,
    pub buffers_checkpoint: Option<i64>,
    pub buffers_clean: Option<i64>,
    /// Times the cleaning scan stopped for writing too many buffers.
    pub maxwritten_clean: Option<i64>,
    pub buffers_backend: Option<i64>,
    pub buffers_backend_fsync: Option<i64>,
    pub buffers_alloc: Option<i64>,
    pub stats_reset: Option<DateTime<Utc>>,
}

/// Database-wide statistics from `pg_stat_database`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatabaseRow {
    pub datid: u32,
    /// `None` for the shared-objects row (datid 0) on PostgreSQL 12+.
    pub datname: Option<String>,
    /// Backends currently connected.
    pub numbackends: i32,
    pub xact_commit: Option<i64>,
    pub xact_rollback: Option<i64>,
    pub blks_read: Option<i64>,
    pub blks_hit: Option<i64>,
    pub tup_returned: Option<i64>,
    pub tup_fetched: Option<i64>,
    pub tup_inserted: Option<i64>,
    pub tup_updated: Option<i64>,
    pub tup_deleted: Option<i64>,
    /// Queries canceled due to recovery conflicts.
    pub conflicts: Option<i64>,
    pub temp_files: Option<i64>,
    pub temp_bytes: Option<i64>,
    pub deadlocks: Option<i64>,
    /// Milliseconds spent reading data file blocks.
    pub blk_read_time: Option<f64>,
    /// Milliseconds spent writing data file blocks.
    pub blk_write_time: Option<f64>,
    pub stats_reset: Option<DateTime<Utc>>,
}

/// Recovery-conflict cancellations per database (`pg_stat_database_conflicts`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatabaseConflictsRow {
    pub datid: u32,
    pub datname: String,
    pub confl_tablespace: Option<i64>,
    pub confl_lock: Option<i64>,
    pub confl_snapshot: Option<i64>,
    pub confl_bufferpin: Option<i64>,
    pub confl_deadlock: Option<i64>,
}

/// Execution statistics of one normalized statement (`pg_stat_statements`).
///
/// Timing columns (`total_time` through `stddev_time`) are only read from
/// PostgreSQL 9.5 on. From 13 they are the `*_exec_time` columns of the
/// extension, reported under the older names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatementsRow {
    /// OID of the user who executed the statement.
    pub userid: u32,
    /// OID of the database the statement ran in.
    pub dbid: u32,
    /// Hash of the statement's parse tree.
    pub queryid: Option<i64>,
    /// Representative statement text; `None` without `pg_read_all_stats`.
    pub query: Option<String>,
    pub calls: i64,
    pub total_time: Option<f64>,
    pub min_time: Option<f64>,
    pub max_time: Option<f64>,
    pub mean_time: Option<f64>,
    pub stddev_time: Option<f64>,
    /// Rows retrieved or affected.
    pub rows: i64,
    pub shared_blks_hit: i64,
    pub shared_blks_read: i64,
    pub shared_blks_dirtied: i64,
    pub shared_blks_written: i64,
    pub local_blks_hit: i64,
    pub local_blks_read: i64,
    pub local_blks_dirtied: i64,
    pub local_blks_written: i64,
    pub temp_blks_read: i64,
    pub temp_blks_written: i64,
    /// Milliseconds reading blocks (zero unless `track_io_timing` is on).
    pub blk_read_time: f64,
    /// Milliseconds writing blocks (zero unless `track_io_timing` is on).
    pub blk_write_time: f64,
}

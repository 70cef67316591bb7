//! Per-relation views: tables, indexes, sequences and functions.
//!
//! Each record type here is shared by the `all`, `sys` and `user` flavours of
//! its view.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Access statistics of one table (`pg_stat_*_tables`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TablesRow {
    /// OID of the table.
    pub relid: u32,
    pub schemaname: String,
    pub relname: String,
    /// Sequential scans initiated on this table.
    pub seq_scan: Option<i64>,
    /// Live rows fetched by sequential scans.
    pub seq_tup_read: Option<i64>,
    /// Index scans initiated on this table.
    pub idx_scan: Option<i64>,
    /// Live rows fetched by index scans.
    pub idx_tup_fetch: Option<i64>,
    pub n_tup_ins: Option<i64>,
    /// Rows updated, HOT updates included.
    pub n_tup_upd: Option<i64>,
    pub n_tup_del: Option<i64>,
    pub n_tup_hot_upd: Option<i64>,
    /// Estimated live rows.
    pub n_live_tup: Option<i64>,
    /// Estimated dead rows.
    pub n_dead_tup: Option<i64>,
    /// Estimated rows modified since the last analyze.
    pub n_mod_since_analyze: Option<i64>,
    /// Last manual vacuum (VACUUM FULL not counted).
    pub last_vacuum: Option<DateTime<Utc>>,
    pub last_autovacuum: Option<DateTime<Utc>>,
    pub last_analyze: Option<DateTime<Utc>>,
    pub last_autoanalyze: Option<DateTime<Utc>>,
    pub vacuum_count: Option<i64>,
    pub autovacuum_count: Option<i64>,
    pub analyze_count: Option<i64>,
    pub autoanalyze_count: Option<i64>,
}

/// Access statistics of one table within the current transaction
/// (`pg_stat_xact_*_tables`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct XactTablesRow {
    pub relid: u32,
    pub schemaname: String,
    pub relname: String,
    pub seq_scan: Option<i64>,
    pub seq_tup_read: Option<i64>,
    pub idx_scan: Option<i64>,
    pub idx_tup_fetch: Option<i64>,
    pub n_tup_ins: Option<i64>,
    pub n_tup_upd: Option<i64>,
    pub n_tup_del: Option<i64>,
    pub n_tup_hot_upd: Option<i64>,
}

/// Block I/O of one table, its indexes and its TOAST data
/// (`pg_statio_*_tables`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IoTablesRow {
    pub relid: u32,
    pub schemaname: String,
    pub relname: String,
    pub heap_blks_read: Option<i64>,
    pub heap_blks_hit: Option<i64>,
    /// Disk blocks read from all indexes on this table.
    pub idx_blks_read: Option<i64>,
    pub idx_blks_hit: Option<i64>,
    pub toast_blks_read: Option<i64>,
    pub toast_blks_hit: Option<i64>,
    /// Disk blocks read from the TOAST table's indexes.
    pub tidx_blks_read: Option<i64>,
    pub tidx_blks_hit: Option<i64>,
}

/// Access statistics of one index (`pg_stat_*_indexes`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexesRow {
    /// OID of the table this index belongs to.
    pub relid: u32,
    /// OID of the index.
    pub indexrelid: u32,
    pub schemaname: String,
    pub relname: String,
    pub indexrelname: String,
    /// Index scans initiated on this index.
    pub idx_scan: Option<i64>,
    /// Index entries returned by scans on this index.
    pub idx_tup_read: Option<i64>,
    /// Live table rows fetched by simple index scans using this index.
    pub idx_tup_fetch: Option<i64>,
}

/// Block I/O of one index (`pg_statio_*_indexes`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IoIndexesRow {
    pub relid: u32,
    pub indexrelid: u32,
    pub schemaname: String,
    pub relname: String,
    pub indexrelname: String,
    pub idx_blks_read: Option<i64>,
    pub idx_blks_hit: Option<i64>,
}

/// Block I/O of one sequence (`pg_statio_*_sequences`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IoSequencesRow {
    pub relid: u32,
    pub schemaname: String,
    pub relname: String,
    pub blks_read: Option<i64>,
    pub blks_hit: Option<i64>,
}

/// Call statistics of one user function (`pg_stat_user_functions`,
/// `pg_stat_xact_user_functions`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionsRow {
    pub funcid: u32,
    pub schemaname: String,
    pub funcname: String,
    pub calls: Option<i64>,
    /// Milliseconds spent in this function and everything it called.
    pub total_time: Option<f64>,
    /// Milliseconds spent in this function alone.
    pub self_time: Option<f64>,
}

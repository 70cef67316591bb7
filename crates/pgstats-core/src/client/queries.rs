//! SQL for PostgreSQL statistics views.
//!
//! Every version-dependent decision lives here: each versioned view family has
//! a closed set of variants and a pure `select` over [`MajorVersion`]. The
//! accessors never compare versions themselves.
//!
//! `xid` and `interval` columns are cast in SQL (`::text::bigint`,
//! `EXTRACT(EPOCH ...)`) so every selected column has a type the row decoder
//! understands.

use crate::version::MajorVersion;

/// Query used by the version probe.
pub(super) const SERVER_VERSION_QUERY: &str = "SHOW server_version";

/// All/system/user flavour of a per-relation view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum RelationScope {
    All,
    System,
    User,
}

/// Per-relation view families that come in three scopes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum RelationView {
    Tables,
    XactTables,
    IoTables,
    Indexes,
    IoIndexes,
    IoSequences,
}

impl RelationView {
    pub(super) fn name(self, scope: RelationScope) -> &'static str {
        use RelationScope::*;
        use RelationView::*;

        match (self, scope) {
            (Tables, All) => "pg_stat_all_tables",
            (Tables, System) => "pg_stat_sys_tables",
            (Tables, User) => "pg_stat_user_tables",
            (XactTables, All) => "pg_stat_xact_all_tables",
            (XactTables, System) => "pg_stat_xact_sys_tables",
            (XactTables, User) => "pg_stat_xact_user_tables",
            (IoTables, All) => "pg_statio_all_tables",
            (IoTables, System) => "pg_statio_sys_tables",
            (IoTables, User) => "pg_statio_user_tables",
            (Indexes, All) => "pg_stat_all_indexes",
            (Indexes, System) => "pg_stat_sys_indexes",
            (Indexes, User) => "pg_stat_user_indexes",
            (IoIndexes, All) => "pg_statio_all_indexes",
            (IoIndexes, System) => "pg_statio_sys_indexes",
            (IoIndexes, User) => "pg_statio_user_indexes",
            (IoSequences, All) => "pg_statio_all_sequences",
            (IoSequences, System) => "pg_statio_sys_sequences",
            (IoSequences, User) => "pg_statio_user_sequences",
        }
    }

    /// Query text for this family against `view`.
    pub(super) fn query(self, view: &str) -> String {
        let columns = match self {
            RelationView::Tables => {
                r#"
                relid,
                schemaname,
                relname,
                seq_scan,
                seq_tup_read,
                idx_scan,
                idx_tup_fetch,
                n_tup_ins,
                n_tup_upd,
                n_tup_del,
                n_tup_hot_upd,
                n_live_tup,
                n_dead_tup,
                n_mod_since_analyze,
                last_vacuum,
                last_autovacuum,
                last_analyze,
                last_autoanalyze,
                vacuum_count,
                autovacuum_count,
                analyze_count,
                autoanalyze_count"#
            }
            RelationView::XactTables => {
                r#"
                relid,
                schemaname,
                relname,
                seq_scan,
                seq_tup_read,
                idx_scan,
                idx_tup_fetch,
                n_tup_ins,
                n_tup_upd,
                n_tup_del,
                n_tup_hot_upd"#
            }
            RelationView::IoTables => {
                r#"
                relid,
                schemaname,
                relname,
                heap_blks_read,
                heap_blks_hit,
                idx_blks_read,
                idx_blks_hit,
                toast_blks_read,
                toast_blks_hit,
                tidx_blks_read,
                tidx_blks_hit"#
            }
            RelationView::Indexes => {
                r#"
                relid,
                indexrelid,
                schemaname,
                relname,
                indexrelname,
                idx_scan,
                idx_tup_read,
                idx_tup_fetch"#
            }
            RelationView::IoIndexes => {
                r#"
                relid,
                indexrelid,
                schemaname,
                relname,
                indexrelname,
                idx_blks_read,
                idx_blks_hit"#
            }
            RelationView::IoSequences => {
                r#"
                relid,
                schemaname,
                relname,
                blks_read,
                blks_hit"#
            }
        };

        format!("SELECT{columns}\n            FROM {view}")
    }
}

/// Builds query for pg_stat_user_functions / pg_stat_xact_user_functions.
pub(super) fn build_functions_query(view: &str) -> String {
    format!("SELECT funcid, schemaname, funcname, calls, total_time, self_time FROM {view}")
}

/// Builds query for pg_stat_archiver (single row).
pub(super) fn build_archiver_query() -> &'static str {
    r#"
        SELECT
            archived_count,
            last_archived_wal,
            last_archived_time,
            failed_count,
            last_failed_wal,
            last_failed_time,
            stats_reset
        FROM pg_stat_archiver
    "#
}

/// Builds query for pg_stat_database.
///
/// All columns exist since PG 9.2, no version check needed.
pub(super) fn build_database_query() -> &'static str {
    r#"
        SELECT
            datid,
            datname,
            numbackends,
            xact_commit,
            xact_rollback,
            blks_read,
            blks_hit,
            tup_returned,
            tup_fetched,
            tup_inserted,
            tup_updated,
            tup_deleted,
            conflicts,
            temp_files,
            temp_bytes,
            deadlocks,
            blk_read_time,
            blk_write_time,
            stats_reset
        FROM pg_stat_database
    "#
}

pub(super) fn build_database_conflicts_query() -> &'static str {
    r#"
        SELECT
            datid,
            datname,
            confl_tablespace,
            confl_lock,
            confl_snapshot,
            confl_bufferpin,
            confl_deadlock
        FROM pg_stat_database_conflicts
    "#
}

/// Column sets of pg_stat_activity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum ActivityVariant {
    /// Up to 9.5: boolean `waiting`.
    Old,
    /// 9.6: `wait_event_type` and `wait_event`.
    Mid,
    /// 10+: adds `backend_type`.
    New,
}

impl ActivityVariant {
    pub(super) fn select(version: MajorVersion) -> Self {
        if version > MajorVersion::V9_6 {
            ActivityVariant::New
        } else if version == MajorVersion::V9_6 {
            ActivityVariant::Mid
        } else {
            ActivityVariant::Old
        }
    }

    pub(super) fn query(self) -> String {
        let wait_columns = match self {
            ActivityVariant::Old => "waiting,",
            ActivityVariant::Mid | ActivityVariant::New => "wait_event_type,\n                wait_event,",
        };
        let backend_type = match self {
            ActivityVariant::New => ",\n                backend_type",
            ActivityVariant::Old | ActivityVariant::Mid => "",
        };

        format!(
            r#"
            SELECT
                datid,
                datname,
                pid,
                usesysid,
                usename,
                application_name,
                client_addr,
                client_hostname,
                client_port,
                backend_start,
                xact_start,
                query_start,
                state_change,
                {wait_columns}
                state,
                backend_xid::text::bigint AS backend_xid,
                backend_xmin::text::bigint AS backend_xmin,
                query{backend_type}
            FROM pg_stat_activity
        "#
        )
    }
}

/// Column sets of pg_stat_replication.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum ReplicationVariant {
    /// Before 10: `*_location` columns, no lag columns.
    Old,
    /// 10+: `*_lsn` columns and `*_lag` intervals.
    New,
}

impl ReplicationVariant {
    pub(super) fn select(version: MajorVersion) -> Self {
        if version < MajorVersion::V10 {
            ReplicationVariant::Old
        } else {
            ReplicationVariant::New
        }
    }

    pub(super) fn query(self) -> String {
        let wal_columns = match self {
            ReplicationVariant::Old => {
                r#"
                sent_location AS sent_lsn,
                write_location AS write_lsn,
                flush_location AS flush_lsn,
                replay_location AS replay_lsn,"#
            }
            ReplicationVariant::New => {
                r#"
                sent_lsn,
                write_lsn,
                flush_lsn,
                replay_lsn,
                EXTRACT(EPOCH FROM write_lag)::double precision AS write_lag,
                EXTRACT(EPOCH FROM flush_lag)::double precision AS flush_lag,
                EXTRACT(EPOCH FROM replay_lag)::double precision AS replay_lag,"#
            }
        };

        format!(
            r#"
            SELECT
                pid,
                usesysid,
                usename,
                application_name,
                client_addr,
                client_hostname,
                client_port,
                backend_start,
                backend_xmin::text::bigint AS backend_xmin,
                state,{wal_columns}
                sync_priority,
                sync_state
            FROM pg_stat_replication
        "#
        )
    }
}

/// Column sets of pg_stat_wal_receiver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum WalReceiverVariant {
    /// 9.6 and 10.
    Mid,
    /// 11 and 12: adds `sender_host`, `sender_port`.
    Newest,
    /// 13+: `received_lsn` renamed to `flushed_lsn`.
    Flushed,
}

impl WalReceiverVariant {
    /// Lowest version any variant supports.
    pub(super) const MIN_VERSION: MajorVersion = MajorVersion::V9_6;

    /// Returns `None` for versions without a usable pg_stat_wal_receiver.
    pub(super) fn select(version: MajorVersion) -> Option<Self> {
        if version > MajorVersion::V10 {
            if version >= MajorVersion::V13 {
                Some(WalReceiverVariant::Flushed)
            } else {
                Some(WalReceiverVariant::Newest)
            }
        } else if version == MajorVersion::V10 || version == MajorVersion::V9_6 {
            Some(WalReceiverVariant::Mid)
        } else {
            None
        }
    }

    pub(super) fn query(self) -> String {
        let received_lsn = match self {
            WalReceiverVariant::Flushed => "flushed_lsn AS received_lsn",
            WalReceiverVariant::Mid | WalReceiverVariant::Newest => "received_lsn",
        };
        let sender_columns = match self {
            WalReceiverVariant::Mid => "",
            WalReceiverVariant::Newest | WalReceiverVariant::Flushed => {
                "\n                sender_host,\n                sender_port,"
            }
        };

        format!(
            r#"
            SELECT
                pid,
                status,
                receive_start_lsn,
                receive_start_tli,
                {received_lsn},
                received_tli,
                last_msg_send_time,
                last_msg_receipt_time,
                latest_end_lsn,
                latest_end_time,
                slot_name,{sender_columns}
                conninfo
            FROM pg_stat_wal_receiver
        "#
        )
    }
}

/// Column sets of pg_stat_statements.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum StatementsVariant {
    /// Up to 9.4: no timing columns.
    Old,
    /// 9.5 to 12: `total_time` .. `stddev_time`.
    Timed,
    /// 13 to 16: `*_exec_time` columns.
    ExecTime,
    /// 17+: block timings split into shared/local.
    SharedBlkTime,
}

impl StatementsVariant {
    pub(super) fn select(version: MajorVersion) -> Self {
        if version > MajorVersion::V9_4 {
            if version >= MajorVersion::V17 {
                StatementsVariant::SharedBlkTime
            } else if version >= MajorVersion::V13 {
                StatementsVariant::ExecTime
            } else {
                StatementsVariant::Timed
            }
        } else {
            StatementsVariant::Old
        }
    }

    pub(super) fn query(self) -> String {
        let timing_columns = match self {
            StatementsVariant::Old => "",
            StatementsVariant::Timed => {
                r#"
                total_time,
                min_time,
                max_time,
                mean_time,
                stddev_time,"#
            }
            StatementsVariant::ExecTime | StatementsVariant::SharedBlkTime => {
                r#"
                total_exec_time AS total_time,
                min_exec_time AS min_time,
                max_exec_time AS max_time,
                mean_exec_time AS mean_time,
                stddev_exec_time AS stddev_time,"#
            }
        };
        let blk_time_columns = match self {
            StatementsVariant::SharedBlkTime => {
                "shared_blk_read_time AS blk_read_time,\n                shared_blk_write_time AS blk_write_time"
            }
            _ => "blk_read_time,\n                blk_write_time",
        };

        format!(
            r#"
            SELECT
                userid,
                dbid,
                queryid,
                query,
                calls,{timing_columns}
                rows,
                shared_blks_hit,
                shared_blks_read,
                shared_blks_dirtied,
                shared_blks_written,
                local_blks_hit,
                local_blks_read,
                local_blks_dirtied,
                local_blks_written,
                temp_blks_read,
                temp_blks_written,
                {blk_time_columns}
            FROM pg_stat_statements
        "#
        )
    }
}

/// Column sets of pg_stat_ssl.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum SslVariant {
    /// 9.5 to 11.
    Legacy,
    /// 12 and 13: `clientdn` renamed to `client_dn`.
    ClientDn,
    /// 14+: `compression` removed.
    NoCompression,
}

impl SslVariant {
    pub(super) const MIN_VERSION: MajorVersion = MajorVersion::V9_5;

    pub(super) fn select(version: MajorVersion) -> Self {
        if version >= MajorVersion::V14 {
            SslVariant::NoCompression
        } else if version >= MajorVersion::V12 {
            SslVariant::ClientDn
        } else {
            SslVariant::Legacy
        }
    }

    pub(super) fn query(self) -> &'static str {
        match self {
            SslVariant::Legacy => {
                "SELECT pid, ssl, version, cipher, bits, compression, clientdn FROM pg_stat_ssl"
            }
            SslVariant::ClientDn => {
                "SELECT pid, ssl, version, cipher, bits, compression, client_dn AS clientdn FROM pg_stat_ssl"
            }
            SslVariant::NoCompression => {
                "SELECT pid, ssl, version, cipher, bits, client_dn AS clientdn FROM pg_stat_ssl"
            }
        }
    }
}

/// Column sets of pg_stat_progress_vacuum.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum ProgressVacuumVariant {
    /// 9.6 to 16: tuple counters.
    Tuples,
    /// 17+: byte and item counters, index progress.
    Bytes,
}

impl ProgressVacuumVariant {
    pub(super) const MIN_VERSION: MajorVersion = MajorVersion::V9_6;

    pub(super) fn select(version: MajorVersion) -> Self {
        if version >= MajorVersion::V17 {
            ProgressVacuumVariant::Bytes
        } else {
            ProgressVacuumVariant::Tuples
        }
    }

    pub(super) fn query(self) -> String {
        let counters = match self {
            ProgressVacuumVariant::Tuples => {
                r#"
                max_dead_tuples,
                num_dead_tuples"#
            }
            ProgressVacuumVariant::Bytes => {
                r#"
                max_dead_tuple_bytes,
                num_dead_item_ids,
                dead_tuple_bytes,
                indexes_total,
                indexes_processed"#
            }
        };

        format!(
            r#"
            SELECT
                pid,
                datid,
                datname,
                relid,
                phase,
                heap_blks_total,
                heap_blks_scanned,
                heap_blks_vacuumed,
                index_vacuum_count,{counters}
            FROM pg_stat_progress_vacuum
        "#
        )
    }
}

/// Minimum version for pg_stat_subscription.
pub(super) const SUBSCRIPTION_MIN_VERSION: MajorVersion = MajorVersion::V10;

pub(super) fn build_subscription_query() -> &'static str {
    r#"
        SELECT
            subid,
            subname,
            pid,
            relid,
            received_lsn,
            last_msg_send_time,
            last_msg_receipt_time,
            latest_end_lsn,
            latest_end_time
        FROM pg_stat_subscription
    "#
}

/// Sources of background writer counters.
///
/// PG < 17: all fields in pg_stat_bgwriter (single view).
/// PG 17+:  checkpoint fields from pg_stat_checkpointer,
///          buffers_backend/buffers_backend_fsync are gone (moved to pg_stat_io).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum BgWriterVariant {
    SingleView,
    Checkpointer,
}

impl BgWriterVariant {
    pub(super) fn select(version: MajorVersion) -> Self {
        if version >= MajorVersion::V17 {
            BgWriterVariant::Checkpointer
        } else {
            BgWriterVariant::SingleView
        }
    }

    pub(super) fn query(self) -> &'static str {
        match self {
            BgWriterVariant::SingleView => {
                r#"
                SELECT
                    checkpoints_timed,
                    checkpoints_req,
                    checkpoint_write_time,
                    checkpoint_sync_time,
                    buffers_checkpoint,
                    buffers_clean,
                    maxwritten_clean,
                    buffers_backend,
                    buffers_backend_fsync,
                    buffers_alloc,
                    stats_reset
                FROM pg_stat_bgwriter
            "#
            }
            BgWriterVariant::Checkpointer => {
                r#"
                SELECT
                    c.num_timed AS checkpoints_timed,
                    c.num_requested AS checkpoints_req,
                    c.write_time AS checkpoint_write_time,
                    c.sync_time AS checkpoint_sync_time,
                    c.buffers_written AS buffers_checkpoint,
                    b.buffers_clean,
                    b.maxwritten_clean,
                    b.buffers_alloc,
                    b.stats_reset
                FROM pg_stat_bgwriter b
                CROSS JOIN pg_stat_checkpointer c
            "#
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const V9_2: MajorVersion = MajorVersion::old_style(2);
    const V11: MajorVersion = MajorVersion::new_style(11);
    const V16: MajorVersion = MajorVersion::new_style(16);

    /// Column names of a select list, stripped of aliases and casts.
    fn selected_columns(sql: &str) -> Vec<String> {
        let upper = sql.to_uppercase();
        let start = upper.find("SELECT").unwrap() + "SELECT".len();
        let end = upper.rfind("FROM").unwrap();
        sql[start..end]
            .split(',')
            .map(|item| {
                let item = item.trim();
                match item.rsplit_once(" AS ") {
                    Some((_, alias)) => alias.trim().to_string(),
                    None => item.to_string(),
                }
            })
            .collect()
    }

    #[test]
    fn activity_variant_boundaries() {
        assert_eq!(ActivityVariant::select(MajorVersion::V9_5), ActivityVariant::Old);
        assert_eq!(ActivityVariant::select(MajorVersion::V9_6), ActivityVariant::Mid);
        assert_eq!(ActivityVariant::select(MajorVersion::V10), ActivityVariant::New);
        assert_eq!(ActivityVariant::select(V16), ActivityVariant::New);
    }

    #[test]
    fn activity_old_query_uses_waiting_flag() {
        let q = ActivityVariant::Old.query();
        assert!(q.contains("waiting"));
        assert!(!q.contains("wait_event"));
        assert!(!q.contains("backend_type"));
    }

    #[test]
    fn activity_mid_query_has_wait_events_without_backend_type() {
        let q = ActivityVariant::Mid.query();
        assert!(q.contains("wait_event_type"));
        assert!(q.contains("wait_event,"));
        assert!(!q.contains("waiting"));
        assert!(!q.contains("backend_type"));
    }

    #[test]
    fn activity_new_query_adds_backend_type() {
        let cols = selected_columns(&ActivityVariant::New.query());
        assert_eq!(cols.len(), 20);
        assert_eq!(cols.last().map(String::as_str), Some("backend_type"));
        assert!(cols.iter().any(|c| c == "wait_event_type"));
    }

    #[test]
    fn replication_variant_boundaries() {
        assert_eq!(ReplicationVariant::select(MajorVersion::V9_6), ReplicationVariant::Old);
        assert_eq!(ReplicationVariant::select(MajorVersion::V10), ReplicationVariant::New);
        assert_eq!(ReplicationVariant::select(V16), ReplicationVariant::New);
    }

    #[test]
    fn replication_old_query_aliases_location_columns() {
        let q = ReplicationVariant::Old.query();
        assert!(q.contains("sent_location AS sent_lsn"));
        assert!(q.contains("replay_location AS replay_lsn"));
        assert!(!q.contains("write_lag"));
    }

    #[test]
    fn replication_new_query_extracts_lag_seconds() {
        let q = ReplicationVariant::New.query();
        assert!(q.contains("EXTRACT(EPOCH FROM replay_lag)::double precision AS replay_lag"));
        assert!(!q.contains("_location"));
        assert_eq!(selected_columns(&q).len(), 19);
    }

    #[test]
    fn wal_receiver_variant_boundaries() {
        assert_eq!(WalReceiverVariant::select(MajorVersion::V9_5), None);
        assert_eq!(
            WalReceiverVariant::select(MajorVersion::V9_6),
            Some(WalReceiverVariant::Mid)
        );
        assert_eq!(
            WalReceiverVariant::select(MajorVersion::old_style(7)),
            None
        );
        assert_eq!(
            WalReceiverVariant::select(MajorVersion::V10),
            Some(WalReceiverVariant::Mid)
        );
        assert_eq!(
            WalReceiverVariant::select(V11),
            Some(WalReceiverVariant::Newest)
        );
        assert_eq!(
            WalReceiverVariant::select(MajorVersion::V12),
            Some(WalReceiverVariant::Newest)
        );
        assert_eq!(
            WalReceiverVariant::select(MajorVersion::V13),
            Some(WalReceiverVariant::Flushed)
        );
    }

    #[test]
    fn wal_receiver_queries_select_what_they_decode() {
        let mid = selected_columns(&WalReceiverVariant::Mid.query());
        assert_eq!(mid.len(), 12);
        assert!(!mid.iter().any(|c| c == "sender_host"));

        let newest = selected_columns(&WalReceiverVariant::Newest.query());
        assert_eq!(newest.len(), 14);
        assert!(newest.iter().any(|c| c == "sender_port"));

        let flushed = WalReceiverVariant::Flushed.query();
        assert!(flushed.contains("flushed_lsn AS received_lsn"));
        assert_eq!(selected_columns(&flushed).len(), 14);
    }

    #[test]
    fn statements_variant_boundaries() {
        assert_eq!(StatementsVariant::select(V9_2), StatementsVariant::Old);
        assert_eq!(StatementsVariant::select(MajorVersion::V9_4), StatementsVariant::Old);
        assert_eq!(StatementsVariant::select(MajorVersion::V9_5), StatementsVariant::Timed);
        assert_eq!(StatementsVariant::select(MajorVersion::V12), StatementsVariant::Timed);
        assert_eq!(StatementsVariant::select(MajorVersion::V13), StatementsVariant::ExecTime);
        assert_eq!(StatementsVariant::select(V16), StatementsVariant::ExecTime);
        assert_eq!(
            StatementsVariant::select(MajorVersion::V17),
            StatementsVariant::SharedBlkTime
        );
    }

    #[test]
    fn statements_old_query_is_comma_separated_without_timings() {
        let cols = selected_columns(&StatementsVariant::Old.query());
        assert_eq!(cols.len(), 18);
        assert!(cols.iter().all(|c| !c.contains(char::is_whitespace)));
        assert!(!cols.iter().any(|c| c == "total_time"));
    }

    #[test]
    fn statements_exec_time_query_aliases_to_legacy_names() {
        let q = StatementsVariant::ExecTime.query();
        assert!(q.contains("total_exec_time AS total_time"));
        assert!(q.contains("stddev_exec_time AS stddev_time"));
        assert!(q.contains("blk_read_time"));
        assert!(!q.contains("shared_blk_read_time"));
        assert_eq!(selected_columns(&q).len(), 23);
    }

    #[test]
    fn statements_pg17_query_reads_shared_block_timings() {
        let q = StatementsVariant::SharedBlkTime.query();
        assert!(q.contains("shared_blk_read_time AS blk_read_time"));
        assert!(q.contains("shared_blk_write_time AS blk_write_time"));
    }

    #[test]
    fn ssl_variant_boundaries() {
        assert_eq!(SslVariant::select(MajorVersion::V9_5), SslVariant::Legacy);
        assert_eq!(SslVariant::select(V11), SslVariant::Legacy);
        assert_eq!(SslVariant::select(MajorVersion::V12), SslVariant::ClientDn);
        assert_eq!(SslVariant::select(MajorVersion::V14), SslVariant::NoCompression);
        assert!(!SslVariant::NoCompression.query().contains("compression"));
        assert!(SslVariant::Legacy.query().contains("clientdn"));
    }

    #[test]
    fn progress_vacuum_variant_boundaries() {
        assert_eq!(
            ProgressVacuumVariant::select(MajorVersion::V9_6),
            ProgressVacuumVariant::Tuples
        );
        assert_eq!(ProgressVacuumVariant::select(V16), ProgressVacuumVariant::Tuples);
        assert_eq!(
            ProgressVacuumVariant::select(MajorVersion::V17),
            ProgressVacuumVariant::Bytes
        );
    }

    #[test]
    fn progress_vacuum_pg17_query_uses_renamed_columns() {
        let q = ProgressVacuumVariant::Bytes.query();
        assert!(q.contains("max_dead_tuple_bytes"));
        assert!(q.contains("num_dead_item_ids"));
        assert!(!q.contains("max_dead_tuples"));
    }

    #[test]
    fn bgwriter_pg17_uses_split_views() {
        assert_eq!(BgWriterVariant::select(V16), BgWriterVariant::SingleView);
        assert_eq!(BgWriterVariant::select(MajorVersion::V17), BgWriterVariant::Checkpointer);

        let q = BgWriterVariant::Checkpointer.query();
        assert!(q.contains("pg_stat_checkpointer"));
        assert!(q.contains("c.num_timed AS checkpoints_timed"));
        assert!(!q.contains("buffers_backend"));
    }

    #[test]
    fn relation_views_resolve_scope_names() {
        assert_eq!(RelationView::Tables.name(RelationScope::System), "pg_stat_sys_tables");
        assert_eq!(
            RelationView::XactTables.name(RelationScope::User),
            "pg_stat_xact_user_tables"
        );
        assert_eq!(
            RelationView::IoSequences.name(RelationScope::All),
            "pg_statio_all_sequences"
        );
    }

    #[test]
    fn index_query_is_comma_separated() {
        let q = RelationView::Indexes.query("pg_stat_user_indexes");
        assert_eq!(
            selected_columns(&q),
            [
                "relid",
                "indexrelid",
                "schemaname",
                "relname",
                "indexrelname",
                "idx_scan",
                "idx_tup_read",
                "idx_tup_fetch",
            ]
        );
        assert!(q.ends_with("FROM pg_stat_user_indexes"));
    }

    #[test]
    fn functions_query_targets_given_view() {
        let q = build_functions_query("pg_stat_xact_user_functions");
        assert!(q.ends_with("FROM pg_stat_xact_user_functions"));
        assert_eq!(selected_columns(&q).len(), 6);
    }
}

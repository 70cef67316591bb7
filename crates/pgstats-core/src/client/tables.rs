//! pg_stat_*_tables, pg_stat_xact_*_tables and pg_statio_*_tables.

use super::StatsClient;
use super::queries::{RelationScope, RelationView};
use crate::connection::{DecodeError, FromStatsRow, StatsConnection, StatsRow};
use crate::error::StatsError;
use crate::model::{IoTablesRow, TablesRow, XactTablesRow};

impl FromStatsRow for TablesRow {
    fn from_row(row: &StatsRow) -> Result<Self, DecodeError> {
        Ok(Self {
            relid: row.get("relid")?,
            schemaname: row.get("schemaname")?,
            relname: row.get("relname")?,
            seq_scan: row.get("seq_scan")?,
            seq_tup_read: row.get("seq_tup_read")?,
            idx_scan: row.get("idx_scan")?,
            idx_tup_fetch: row.get("idx_tup_fetch")?,
            n_tup_ins: row.get("n_tup_ins")?,
            n_tup_upd: row.get("n_tup_upd")?,
            n_tup_del: row.get("n_tup_del")?,
            n_tup_hot_upd: row.get("n_tup_hot_upd")?,
            n_live_tup: row.get("n_live_tup")?,
            n_dead_tup: row.get("n_dead_tup")?,
            n_mod_since_analyze: row.get("n_mod_since_analyze")?,
            last_vacuum: row.get("last_vacuum")?,
            last_autovacuum: row.get("last_autovacuum")?,
            last_analyze: row.get("last_analyze")?,
            last_autoanalyze: row.get("last_autoanalyze")?,
            vacuum_count: row.get("vacuum_count")?,
            autovacuum_count: row.get("autovacuum_count")?,
            analyze_count: row.get("analyze_count")?,
            autoanalyze_count: row.get("autoanalyze_count")?,
        })
    }
}

impl FromStatsRow for XactTablesRow {
    fn from_row(row: &StatsRow) -> Result<Self, DecodeError> {
        Ok(Self {
            relid: row.get("relid")?,
            schemaname: row.get("schemaname")?,
            relname: row.get("relname")?,
            seq_scan: row.get("seq_scan")?,
            seq_tup_read: row.get("seq_tup_read")?,
            idx_scan: row.get("idx_scan")?,
            idx_tup_fetch: row.get("idx_tup_fetch")?,
            n_tup_ins: row.get("n_tup_ins")?,
            n_tup_upd: row.get("n_tup_upd")?,
            n_tup_del: row.get("n_tup_del")?,
            n_tup_hot_upd: row.get("n_tup_hot_upd")?,
        })
    }
}

impl FromStatsRow for IoTablesRow {
    fn from_row(row: &StatsRow) -> Result<Self, DecodeError> {
        Ok(Self {
            relid: row.get("relid")?,
            schemaname: row.get("schemaname")?,
            relname: row.get("relname")?,
            heap_blks_read: row.get("heap_blks_read")?,
            heap_blks_hit: row.get("heap_blks_hit")?,
            idx_blks_read: row.get("idx_blks_read")?,
            idx_blks_hit: row.get("idx_blks_hit")?,
            toast_blks_read: row.get("toast_blks_read")?,
            toast_blks_hit: row.get("toast_blks_hit")?,
            tidx_blks_read: row.get("tidx_blks_read")?,
            tidx_blks_hit: row.get("tidx_blks_hit")?,
        })
    }
}

impl<C: StatsConnection> StatsClient<C> {
    /// Access statistics of every table in the current database.
    pub fn all_tables(&mut self) -> Result<Vec<TablesRow>, StatsError> {
        self.scoped(RelationView::Tables, RelationScope::All)
    }

    /// Access statistics of system catalogs.
    pub fn system_tables(&mut self) -> Result<Vec<TablesRow>, StatsError> {
        self.scoped(RelationView::Tables, RelationScope::System)
    }

    /// Access statistics of user tables.
    pub fn user_tables(&mut self) -> Result<Vec<TablesRow>, StatsError> {
        self.scoped(RelationView::Tables, RelationScope::User)
    }

    /// Table counters of the current transaction only.
    pub fn xact_all_tables(&mut self) -> Result<Vec<XactTablesRow>, StatsError> {
        self.scoped(RelationView::XactTables, RelationScope::All)
    }

    pub fn xact_system_tables(&mut self) -> Result<Vec<XactTablesRow>, StatsError> {
        self.scoped(RelationView::XactTables, RelationScope::System)
    }

    pub fn xact_user_tables(&mut self) -> Result<Vec<XactTablesRow>, StatsError> {
        self.scoped(RelationView::XactTables, RelationScope::User)
    }

    /// Block I/O of every table in the current database.
    pub fn io_all_tables(&mut self) -> Result<Vec<IoTablesRow>, StatsError> {
        self.scoped(RelationView::IoTables, RelationScope::All)
    }

    pub fn io_system_tables(&mut self) -> Result<Vec<IoTablesRow>, StatsError> {
        self.scoped(RelationView::IoTables, RelationScope::System)
    }

    pub fn io_user_tables(&mut self) -> Result<Vec<IoTablesRow>, StatsError> {
        self.scoped(RelationView::IoTables, RelationScope::User)
    }
}

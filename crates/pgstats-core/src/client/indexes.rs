//! pg_stat_*_indexes and pg_statio_*_indexes.

use super::StatsClient;
use super::queries::{RelationScope, RelationView};
use crate::connection::{DecodeError, FromStatsRow, StatsConnection, StatsRow};
use crate::error::StatsError;
use crate::model::{IndexesRow, IoIndexesRow};

impl FromStatsRow for IndexesRow {
    fn from_row(row: &StatsRow) -> Result<Self, DecodeError> {
        Ok(Self {
            relid: row.get("relid")?,
            indexrelid: row.get("indexrelid")?,
            schemaname: row.get("schemaname")?,
            relname: row.get("relname")?,
            indexrelname: row.get("indexrelname")?,
            idx_scan: row.get("idx_scan")?,
            idx_tup_read: row.get("idx_tup_read")?,
            idx_tup_fetch: row.get("idx_tup_fetch")?,
        })
    }
}

impl FromStatsRow for IoIndexesRow {
    fn from_row(row: &StatsRow) -> Result<Self, DecodeError> {
        Ok(Self {
            relid: row.get("relid")?,
            indexrelid: row.get("indexrelid")?,
            schemaname: row.get("schemaname")?,
            relname: row.get("relname")?,
            indexrelname: row.get("indexrelname")?,
            idx_blks_read: row.get("idx_blks_read")?,
            idx_blks_hit: row.get("idx_blks_hit")?,
        })
    }
}

impl<C: StatsConnection> StatsClient<C> {
    /// Usage of every index in the current database.
    pub fn all_indexes(&mut self) -> Result<Vec<IndexesRow>, StatsError> {
        self.scoped(RelationView::Indexes, RelationScope::All)
    }

    /// Usage of indexes on system catalogs.
    pub fn system_indexes(&mut self) -> Result<Vec<IndexesRow>, StatsError> {
        self.scoped(RelationView::Indexes, RelationScope::System)
    }

    /// Usage of indexes on user tables.
    pub fn user_indexes(&mut self) -> Result<Vec<IndexesRow>, StatsError> {
        self.scoped(RelationView::Indexes, RelationScope::User)
    }

    pub fn io_all_indexes(&mut self) -> Result<Vec<IoIndexesRow>, StatsError> {
        self.scoped(RelationView::IoIndexes, RelationScope::All)
    }

    pub fn io_system_indexes(&mut self) -> Result<Vec<IoIndexesRow>, StatsError> {
        self.scoped(RelationView::IoIndexes, RelationScope::System)
    }

    pub fn io_user_indexes(&mut self) -> Result<Vec<IoIndexesRow>, StatsError> {
        self.scoped(RelationView::IoIndexes, RelationScope::User)
    }
}

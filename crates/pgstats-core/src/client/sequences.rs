//! pg_statio_*_sequences.

use super::StatsClient;
use super::queries::{RelationScope, RelationView};
use crate::connection::{DecodeError, FromStatsRow, StatsConnection, StatsRow};
use crate::error::StatsError;
use crate::model::IoSequencesRow;

impl FromStatsRow for IoSequencesRow {
    fn from_row(row: &StatsRow) -> Result<Self, DecodeError> {
        Ok(Self {
            relid: row.get("relid")?,
            schemaname: row.get("schemaname")?,
            relname: row.get("relname")?,
            blks_read: row.get("blks_read")?,
            blks_hit: row.get("blks_hit")?,
        })
    }
}

impl<C: StatsConnection> StatsClient<C> {
    /// Block I/O of every sequence in the current database.
    pub fn io_all_sequences(&mut self) -> Result<Vec<IoSequencesRow>, StatsError> {
        self.scoped(RelationView::IoSequences, RelationScope::All)
    }

    pub fn io_system_sequences(&mut self) -> Result<Vec<IoSequencesRow>, StatsError> {
        self.scoped(RelationView::IoSequences, RelationScope::System)
    }

    pub fn io_user_sequences(&mut self) -> Result<Vec<IoSequencesRow>, StatsError> {
        self.scoped(RelationView::IoSequences, RelationScope::User)
    }
}

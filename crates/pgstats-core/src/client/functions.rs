//! pg_stat_user_functions and pg_stat_xact_user_functions.

use super::StatsClient;
use super::queries::build_functions_query;
use crate::connection::{DecodeError, FromStatsRow, StatsConnection, StatsRow};
use crate::error::StatsError;
use crate::model::FunctionsRow;

impl FromStatsRow for FunctionsRow {
    fn from_row(row: &StatsRow) -> Result<Self, DecodeError> {
        Ok(Self {
            funcid: row.get("funcid")?,
            schemaname: row.get("schemaname")?,
            funcname: row.get("funcname")?,
            calls: row.get("calls")?,
            total_time: row.get("total_time")?,
            self_time: row.get("self_time")?,
        })
    }
}

impl<C: StatsConnection> StatsClient<C> {
    /// Call statistics of tracked user functions (`track_functions`).
    pub fn user_functions(&mut self) -> Result<Vec<FunctionsRow>, StatsError> {
        const VIEW: &str = "pg_stat_user_functions";
        self.fetch_all(VIEW, &build_functions_query(VIEW))
    }

    /// Like [`user_functions`](Self::user_functions), restricted to the
    /// current transaction.
    pub fn xact_user_functions(&mut self) -> Result<Vec<FunctionsRow>, StatsError> {
        const VIEW: &str = "pg_stat_xact_user_functions";
        self.fetch_all(VIEW, &build_functions_query(VIEW))
    }
}

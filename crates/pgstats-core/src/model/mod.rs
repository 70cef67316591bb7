//! Typed records, one per monitoring view family.
//!
//! Field names mirror the view columns. Nullable columns, and columns that only
//! exist on some server versions, are `Option`s so an absent value never reads
//! as zero.

mod relations;
mod server;
mod sessions;

pub use relations::{
    FunctionsRow, IndexesRow, IoIndexesRow, IoSequencesRow, IoTablesRow, TablesRow, XactTablesRow,
};
pub use server::{ArchiverView, BgWriterView, DatabaseConflictsRow, DatabaseRow, StatementsRow};
pub use sessions::{
    ActivityRow, ProgressVacuumRow, ReplicationRow, SslRow, SubscriptionRow, WalReceiverView,
};

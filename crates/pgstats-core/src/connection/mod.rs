//! Connection seam between [`StatsClient`](crate::StatsClient) and a database driver.
//!
//! The client only needs four primitives from a connection: a liveness check,
//! "run this query and give me all rows", "run this query and give me at most
//! one row", and close. [`StatsConnection`] captures exactly that, so the client
//! runs unchanged against a real server (`postgres::Client`) and against the
//! scripted [`MockConnection`] used in tests.
//!
//! ```text
//!          ┌──────────────┐
//!          │ StatsClient  │
//!          └──────┬───────┘
//!                 │ StatsConnection (trait)
//!        ┌────────┴─────────┐
//!  ┌─────▼──────────┐ ┌─────▼──────────┐
//!  │ postgres::     │ │ MockConnection │
//!  │ Client         │ │ (tests)        │
//!  └────────────────┘ └────────────────┘
//! ```

mod driver;
mod mock;
mod row;

pub use self::driver::{ConnectionConfig, SslMode};
pub use self::mock::MockConnection;
pub use self::row::{DecodeError, FromStatsRow, FromValue, StatsRow, Value};

/// Error produced by a connection implementation, passed through unchanged.
pub type DriverError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Minimal query interface a monitoring client needs from a database driver.
pub trait StatsConnection {
    /// Verifies that the server is reachable.
    fn ping(&mut self) -> Result<(), DriverError>;

    /// Runs `sql` and returns every row in server order.
    fn query(&mut self, sql: &str) -> Result<Vec<StatsRow>, DriverError>;

    /// Runs `sql` and returns its only row, or `None` when the result is empty.
    ///
    /// More than one row is an error.
    fn query_opt(&mut self, sql: &str) -> Result<Option<StatsRow>, DriverError>;

    /// Releases the connection.
    fn close(self) -> Result<(), DriverError>
    where
        Self: Sized;
}

//! Scripted connection for tests.
//!
//! A [`MockConnection`] answers `SHOW server_version` with a configured
//! string and every other query with the rows registered for the view named
//! after its last `FROM`. Unregistered views return no rows. Clones share the
//! query log, so a test can keep one clone and hand the other to a client.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex, PoisonError};

use super::{DriverError, StatsConnection, StatsRow};

#[derive(Debug, thiserror::Error)]
#[error("{0}")]
struct MockError(String);

fn fail(message: impl Into<String>) -> DriverError {
    Box::new(MockError(message.into()))
}

/// Connection backed by scripted results.
#[derive(Debug, Clone, Default)]
pub struct MockConnection {
    server_version: Option<String>,
    views: HashMap<String, Vec<StatsRow>>,
    failing: HashSet<String>,
    unreachable: bool,
    log: Arc<Mutex<Vec<String>>>,
}

impl MockConnection {
    /// Creates a connection that reports `server_version` (e.g. `"9.6.24"`).
    pub fn new(server_version: impl Into<String>) -> Self {
        Self {
            server_version: Some(server_version.into()),
            ..Self::default()
        }
    }

    /// Creates a connection whose `SHOW server_version` returns no row.
    pub fn without_version() -> Self {
        Self::default()
    }

    /// Registers the result rows of `view`.
    pub fn with_rows(mut self, view: &str, rows: Vec<StatsRow>) -> Self {
        self.views.insert(view.to_string(), rows);
        self
    }

    /// Makes every query against `view` fail.
    pub fn with_failing_view(mut self, view: &str) -> Self {
        self.failing.insert(view.to_string());
        self
    }

    /// Makes `ping` fail, as if the server were down.
    pub fn unreachable(mut self) -> Self {
        self.unreachable = true;
        self
    }

    /// Every SQL text run so far, in order, across all clones.
    pub fn queries(&self) -> Vec<String> {
        self.log
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Queries that read `view`.
    pub fn queries_for(&self, view: &str) -> Vec<String> {
        self.queries()
            .into_iter()
            .filter(|sql| target_view(sql) == Some(view))
            .collect()
    }

    fn run(&mut self, sql: &str) -> Result<Vec<StatsRow>, DriverError> {
        self.log
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(sql.to_string());

        if sql.trim().eq_ignore_ascii_case("SHOW server_version") {
            return Ok(self
                .server_version
                .iter()
                .map(|v| StatsRow::new().with("server_version", v.as_str()))
                .collect());
        }

        let view = target_view(sql).ok_or_else(|| fail(format!("no FROM clause in {sql:?}")))?;
        if self.failing.contains(view) {
            return Err(fail(format!("relation \"{view}\" does not exist")));
        }
        Ok(self.views.get(view).cloned().unwrap_or_default())
    }
}

/// Name of the relation after the last `FROM` keyword.
///
/// The last one is used since `EXTRACT(EPOCH FROM ...)` may appear earlier.
fn target_view(sql: &str) -> Option<&str> {
    let tokens: Vec<&str> = sql.split_whitespace().collect();
    let at = tokens
        .iter()
        .rposition(|token| token.eq_ignore_ascii_case("FROM"))?;
    tokens.get(at + 1).copied()
}

impl StatsConnection for MockConnection {
    fn ping(&mut self) -> Result<(), DriverError> {
        if self.unreachable {
            return Err(fail("connection refused"));
        }
        Ok(())
    }

    fn query(&mut self, sql: &str) -> Result<Vec<StatsRow>, DriverError> {
        self.run(sql)
    }

    fn query_opt(&mut self, sql: &str) -> Result<Option<StatsRow>, DriverError> {
        let mut rows = self.run(sql)?;
        if rows.len() > 1 {
            return Err(fail(format!(
                "query returned {} rows, expected at most one",
                rows.len()
            )));
        }
        Ok(rows.pop())
    }

    fn close(self) -> Result<(), DriverError> {
        Ok(())
    }
}

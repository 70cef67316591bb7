//! `postgres::Client` as a [`StatsConnection`], plus connection settings.

use std::fmt;
use std::net::IpAddr;
use std::str::FromStr;

use chrono::{DateTime, NaiveDateTime, Utc};
use native_tls::TlsConnector;
use postgres::types::{PgLsn, Type};
use postgres::{Client, NoTls, Row};
use postgres_native_tls::MakeTlsConnector;
use tracing::debug;

use super::{DriverError, StatsConnection, StatsRow, Value};
use crate::error::StatsError;

impl StatsConnection for Client {
    fn ping(&mut self) -> Result<(), DriverError> {
        self.simple_query("")?;
        Ok(())
    }

    fn query(&mut self, sql: &str) -> Result<Vec<StatsRow>, DriverError> {
        let rows = Client::query(self, sql, &[])?;
        let rows = rows.iter().map(convert_row).collect::<Result<_, _>>()?;
        Ok(rows)
    }

    fn query_opt(&mut self, sql: &str) -> Result<Option<StatsRow>, DriverError> {
        let row = Client::query_opt(self, sql, &[])?;
        let row = row.as_ref().map(convert_row).transpose()?;
        Ok(row)
    }

    fn close(self) -> Result<(), DriverError> {
        Client::close(self)?;
        Ok(())
    }
}

fn convert_row(row: &Row) -> Result<StatsRow, postgres::Error> {
    let mut out = StatsRow::new();
    for (idx, column) in row.columns().iter().enumerate() {
        out.push(column.name(), column_value(row, idx, column.type_())?);
    }
    Ok(out)
}

/// Reads one column by its wire type.
///
/// Monitoring queries cast `xid` and `interval` columns in SQL, so everything
/// not listed here is a text-like type (`text`, `name`, `varchar`).
fn column_value(row: &Row, idx: usize, ty: &Type) -> Result<Value, postgres::Error> {
    let value = if *ty == Type::BOOL {
        Value::from(row.try_get::<_, Option<bool>>(idx)?)
    } else if *ty == Type::INT2 {
        Value::from(row.try_get::<_, Option<i16>>(idx)?.map(i32::from))
    } else if *ty == Type::INT4 {
        Value::from(row.try_get::<_, Option<i32>>(idx)?)
    } else if *ty == Type::INT8 {
        Value::from(row.try_get::<_, Option<i64>>(idx)?)
    } else if *ty == Type::OID {
        Value::from(row.try_get::<_, Option<u32>>(idx)?)
    } else if *ty == Type::FLOAT4 {
        Value::from(row.try_get::<_, Option<f32>>(idx)?.map(f64::from))
    } else if *ty == Type::FLOAT8 {
        Value::from(row.try_get::<_, Option<f64>>(idx)?)
    } else if *ty == Type::TIMESTAMPTZ {
        Value::from(row.try_get::<_, Option<DateTime<Utc>>>(idx)?)
    } else if *ty == Type::TIMESTAMP {
        Value::from(
            row.try_get::<_, Option<NaiveDateTime>>(idx)?
                .map(|ts| ts.and_utc()),
        )
    } else if *ty == Type::INET {
        Value::from(row.try_get::<_, Option<IpAddr>>(idx)?)
    } else if *ty == Type::PG_LSN {
        row.try_get::<_, Option<PgLsn>>(idx)?
            .map_or(Value::Null, |lsn| Value::Lsn(u64::from(lsn)))
    } else {
        Value::from(row.try_get::<_, Option<String>>(idx)?)
    };
    Ok(value)
}

/// libpq `sslmode` subset supported by [`ConnectionConfig::connect`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SslMode {
    Disable,
    #[default]
    Prefer,
    Require,
}

impl SslMode {
    pub fn as_str(self) -> &'static str {
        match self {
            SslMode::Disable => "disable",
            SslMode::Prefer => "prefer",
            SslMode::Require => "require",
        }
    }
}

impl fmt::Display for SslMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SslMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "disable" => Ok(SslMode::Disable),
            "prefer" => Ok(SslMode::Prefer),
            "require" => Ok(SslMode::Require),
            other => Err(format!(
                "unsupported sslmode '{}' (expected disable, prefer or require)",
                other
            )),
        }
    }
}

/// Connection settings in libpq key/value terms.
#[derive(Clone, PartialEq, Eq)]
pub struct ConnectionConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: Option<String>,
    pub dbname: String,
    pub sslmode: SslMode,
}

impl fmt::Debug for ConnectionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("password", &self.password.as_ref().map(|_| "***"))
            .field("dbname", &self.dbname)
            .field("sslmode", &self.sslmode)
            .finish()
    }
}

impl ConnectionConfig {
    /// Settings for `user` on localhost:5432, database named after the user.
    pub fn new(user: impl Into<String>) -> Self {
        let user = user.into();
        Self {
            host: "localhost".to_string(),
            port: 5432,
            dbname: user.clone(),
            user,
            password: None,
            sslmode: SslMode::default(),
        }
    }

    /// Reads settings from the standard libpq environment variables.
    ///
    /// - PGHOST (default: localhost)
    /// - PGPORT (default: 5432)
    /// - PGUSER (default: $USER)
    /// - PGPASSWORD (default: none)
    /// - PGDATABASE (default: same as user)
    /// - PGSSLMODE (default: prefer)
    pub fn from_env() -> Result<Self, StatsError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with an explicit variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, StatsError> {
        let user = lookup("PGUSER")
            .or_else(|| lookup("USER"))
            .ok_or_else(|| StatsError::Config("PGUSER or USER not set".to_string()))?;

        let mut config = Self::new(user);
        if let Some(host) = lookup("PGHOST") {
            config.host = host;
        }
        if let Some(port) = lookup("PGPORT") {
            config.port = port
                .parse()
                .map_err(|e| StatsError::Config(format!("invalid PGPORT '{}': {}", port, e)))?;
        }
        config.password = lookup("PGPASSWORD").filter(|p| !p.is_empty());
        if let Some(dbname) = lookup("PGDATABASE") {
            config.dbname = dbname;
        }
        if let Some(mode) = lookup("PGSSLMODE") {
            config.sslmode = mode.parse().map_err(StatsError::Config)?;
        }
        Ok(config)
    }

    /// Renders a libpq key/value connection string.
    pub fn connection_string(&self) -> String {
        let mut parts = vec![
            format!("host={}", quote_value(&self.host)),
            format!("port={}", self.port),
            format!("user={}", quote_value(&self.user)),
        ];
        if let Some(password) = &self.password {
            parts.push(format!("password={}", quote_value(password)));
        }
        parts.push(format!("dbname={}", quote_value(&self.dbname)));
        parts.push(format!("sslmode={}", self.sslmode));
        parts.join(" ")
    }

    /// Opens a synchronous `postgres::Client` with these settings.
    pub fn connect(&self) -> Result<Client, StatsError> {
        let connection_string = self.connection_string();
        debug!(host = %self.host, port = self.port, dbname = %self.dbname,
            sslmode = %self.sslmode, "connecting to PostgreSQL");

        let client = match tls_connector(self.sslmode)? {
            None => Client::connect(&connection_string, NoTls),
            Some(connector) => Client::connect(&connection_string, connector),
        };
        client.map_err(|e| StatsError::Connection(Box::new(e)))
    }
}

/// TLS connector for `mode`, `None` for plain connections.
///
/// As in libpq, `prefer` and `require` encrypt without checking the server
/// certificate or host name.
fn tls_connector(mode: SslMode) -> Result<Option<MakeTlsConnector>, StatsError> {
    match mode {
        SslMode::Disable => Ok(None),
        SslMode::Prefer | SslMode::Require => {
            let connector = TlsConnector::builder()
                .danger_accept_invalid_certs(true)
                .danger_accept_invalid_hostnames(true)
                .build()
                .map_err(|e| StatsError::Connection(Box::new(e)))?;
            Ok(Some(MakeTlsConnector::new(connector)))
        }
    }
}

/// Quotes a connection-string value when libpq would otherwise split or misread it.
fn quote_value(value: &str) -> String {
    let needs_quotes = value.is_empty()
        || value
            .chars()
            .any(|c| c.is_whitespace() || c == '\'' || c == '\\');
    if !needs_quotes {
        return value.to_string();
    }
    let escaped = value.replace('\\', "\\\\").replace('\'', "\\'");
    format!("'{}'", escaped)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup<'a>(vars: &'a HashMap<&str, &str>) -> impl Fn(&str) -> Option<String> + 'a {
        move |key| vars.get(key).map(|v| v.to_string())
    }

    #[test]
    fn from_lookup_applies_libpq_defaults() {
        let vars = HashMap::from([("USER", "alice")]);
        let config = ConnectionConfig::from_lookup(lookup(&vars)).unwrap();
        assert_eq!(config.host, "localhost");
        assert_eq!(config.port, 5432);
        assert_eq!(config.user, "alice");
        assert_eq!(config.dbname, "alice");
        assert_eq!(config.password, None);
        assert_eq!(config.sslmode, SslMode::Prefer);
    }

    #[test]
    fn from_lookup_prefers_pg_variables() {
        let vars = HashMap::from([
            ("USER", "alice"),
            ("PGUSER", "monitor"),
            ("PGHOST", "db.internal"),
            ("PGPORT", "6432"),
            ("PGPASSWORD", "secret"),
            ("PGDATABASE", "postgres"),
            ("PGSSLMODE", "disable"),
        ]);
        let config = ConnectionConfig::from_lookup(lookup(&vars)).unwrap();
        assert_eq!(config.user, "monitor");
        assert_eq!(config.host, "db.internal");
        assert_eq!(config.port, 6432);
        assert_eq!(config.password.as_deref(), Some("secret"));
        assert_eq!(config.dbname, "postgres");
        assert_eq!(config.sslmode, SslMode::Disable);
    }

    #[test]
    fn from_lookup_requires_a_user() {
        let vars = HashMap::new();
        let err = ConnectionConfig::from_lookup(lookup(&vars)).unwrap_err();
        assert!(matches!(err, StatsError::Config(_)));
    }

    #[test]
    fn from_lookup_rejects_bad_port_and_sslmode() {
        let vars = HashMap::from([("USER", "alice"), ("PGPORT", "fivefourthreetwo")]);
        assert!(ConnectionConfig::from_lookup(lookup(&vars)).is_err());

        let vars = HashMap::from([("USER", "alice"), ("PGSSLMODE", "verify-full")]);
        assert!(ConnectionConfig::from_lookup(lookup(&vars)).is_err());
    }

    #[test]
    fn connection_string_without_password() {
        let config = ConnectionConfig::new("app");
        assert_eq!(
            config.connection_string(),
            "host=localhost port=5432 user=app dbname=app sslmode=prefer"
        );
    }

    #[test]
    fn connection_string_quotes_awkward_values() {
        let mut config = ConnectionConfig::new("app");
        config.password = Some("it's a secret".to_string());
        config.sslmode = SslMode::Require;
        assert_eq!(
            config.connection_string(),
            r"host=localhost port=5432 user=app password='it\'s a secret' dbname=app sslmode=require"
        );
    }

    #[test]
    fn debug_hides_password() {
        let mut config = ConnectionConfig::new("app");
        config.password = Some("hunter2".to_string());
        let rendered = format!("{:?}", config);
        assert!(!rendered.contains("hunter2"));
        assert!(rendered.contains("***"));
    }

    #[test]
    fn only_disable_skips_tls() {
        assert!(tls_connector(SslMode::Disable).unwrap().is_none());
        assert!(tls_connector(SslMode::Prefer).unwrap().is_some());
        assert!(tls_connector(SslMode::Require).unwrap().is_some());
    }

    #[test]
    fn sslmode_round_trips_through_str() {
        for mode in [SslMode::Disable, SslMode::Prefer, SslMode::Require] {
            assert_eq!(mode.as_str().parse::<SslMode>().unwrap(), mode);
        }
    }
}

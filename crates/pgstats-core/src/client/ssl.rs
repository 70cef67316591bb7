//! pg_stat_ssl (PG 9.5+).

use tracing::debug;

use super::StatsClient;
use super::queries::SslVariant;
use crate::connection::{DecodeError, FromStatsRow, StatsConnection, StatsRow};
use crate::error::StatsError;
use crate::model::SslRow;

const VIEW: &str = "pg_stat_ssl";

impl FromStatsRow for SslRow {
    fn from_row(row: &StatsRow) -> Result<Self, DecodeError> {
        Ok(Self {
            pid: row.get("pid")?,
            ssl: row.get("ssl")?,
            version: row.get("version")?,
            cipher: row.get("cipher")?,
            bits: row.get("bits")?,
            // dropped in PG 14
            compression: row.get_opt("compression")?,
            clientdn: row.get("clientdn")?,
        })
    }
}

impl<C: StatsConnection> StatsClient<C> {
    /// SSL state of every backend connection.
    pub fn ssl(&mut self) -> Result<Vec<SslRow>, StatsError> {
        let version = self.server_version()?;
        Self::require(VIEW, SslVariant::MIN_VERSION, version)?;

        let variant = SslVariant::select(version);
        debug!(view = VIEW, %version, ?variant, "selected query variant");
        self.fetch_all(VIEW, variant.query())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connection::MockConnection;
    use crate::version::MajorVersion;

    fn tls_row(pid: i32) -> StatsRow {
        StatsRow::new()
            .with("pid", pid)
            .with("ssl", true)
            .with("version", "TLSv1.3")
            .with("cipher", "TLS_AES_256_GCM_SHA384")
            .with("bits", 256)
            .with("clientdn", Option::<String>::None)
    }

    #[test]
    fn refuses_servers_before_95() {
        let mock = MockConnection::new("9.4.26");
        let mut client = StatsClient::new(mock.clone()).unwrap();

        match client.ssl().unwrap_err() {
            StatsError::UnsupportedVersion {
                required, detected, ..
            } => {
                assert_eq!(required, MajorVersion::V9_5);
                assert_eq!(detected, MajorVersion::V9_4);
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(mock.queries(), ["SHOW server_version"]);
    }

    #[test]
    fn pg95_reads_compression() {
        let mock = MockConnection::new("9.5.25")
            .with_rows(VIEW, vec![tls_row(51).with("compression", false)]);
        let mut client = StatsClient::new(mock.clone()).unwrap();

        let rows = client.ssl().unwrap();
        assert_eq!(rows[0].compression, Some(false));
        assert_eq!(rows[0].bits, Some(256));
        assert!(mock.queries_for(VIEW)[0].contains(" clientdn "));
    }

    #[test]
    fn pg14_has_no_compression_column() {
        let plain = StatsRow::new()
            .with("pid", 52)
            .with("ssl", false)
            .with("version", Option::<String>::None)
            .with("cipher", Option::<String>::None)
            .with("bits", Option::<i32>::None)
            .with("clientdn", Option::<String>::None);
        let mock = MockConnection::new("14.11").with_rows(VIEW, vec![tls_row(51), plain]);
        let mut client = StatsClient::new(mock.clone()).unwrap();

        let rows = client.ssl().unwrap();
        assert_eq!(rows.len(), 2);
        assert!(rows[0].ssl);
        assert!(!rows[1].ssl);
        assert_eq!(rows[0].compression, None);

        let sql = &mock.queries_for(VIEW)[0];
        assert!(sql.contains("client_dn AS clientdn"));
        assert!(!sql.contains("compression"));
    }
}

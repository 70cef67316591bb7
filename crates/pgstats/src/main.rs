//! pgstats - prints one PostgreSQL statistics view as JSON.
//!
//! Connection settings follow libpq: flags override the PG* environment
//! variables, which override the built-in defaults.

use std::error::Error;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use serde::Serialize;
use tracing::{Level, debug, error, info};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;

use pgstats_core::{ConnectionConfig, SslMode, StatsClient};

/// Print PostgreSQL statistics views as JSON.
#[derive(Parser)]
#[command(name = "pgstats", about = "Print PostgreSQL statistics views as JSON", version)]
struct Args {
    /// View to read.
    #[arg(value_enum)]
    view: View,

    /// Server host or socket directory.
    #[arg(long, env = "PGHOST", default_value = "localhost")]
    host: String,

    /// Server port.
    #[arg(short, long, env = "PGPORT", default_value_t = 5432)]
    port: u16,

    /// Database user. Falls back to $USER.
    #[arg(short = 'U', long, env = "PGUSER")]
    user: Option<String>,

    /// Password, if the server asks for one.
    #[arg(long, env = "PGPASSWORD", hide_env_values = true)]
    password: Option<String>,

    /// Database to connect to. Defaults to the user name.
    #[arg(short, long, env = "PGDATABASE")]
    dbname: Option<String>,

    /// TLS mode: disable, prefer or require.
    #[arg(long, env = "PGSSLMODE", default_value = "prefer")]
    sslmode: SslMode,

    /// Increase logging verbosity (-v for debug, -vv for trace). Default is info level.
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Quiet mode - only show errors.
    #[arg(short, long)]
    quiet: bool,

    /// Print JSON on a single line.
    #[arg(long)]
    compact: bool,
}

/// Views the CLI can print, named after the client accessors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum View {
    ServerVersion,
    Activity,
    Archiver,
    BgWriter,
    Database,
    DatabaseConflicts,
    UserFunctions,
    XactUserFunctions,
    AllIndexes,
    SystemIndexes,
    UserIndexes,
    IoAllIndexes,
    IoSystemIndexes,
    IoUserIndexes,
    IoAllTables,
    IoSystemTables,
    IoUserTables,
    IoAllSequences,
    IoSystemSequences,
    IoUserSequences,
    ProgressVacuum,
    Replication,
    Ssl,
    Statements,
    Subscription,
    AllTables,
    SystemTables,
    UserTables,
    WalReceiver,
    XactAllTables,
    XactSystemTables,
    XactUserTables,
}

/// Initializes the tracing subscriber with the appropriate log level.
/// Default level is INFO. Use -q for quiet mode (errors only).
///
/// Logs go to stderr so stdout carries only JSON.
fn init_logging(verbose: u8, quiet: bool) {
    let level = if quiet {
        Level::ERROR
    } else {
        match verbose {
            0 => Level::INFO,
            1 => Level::DEBUG,
            _ => Level::TRACE,
        }
    };

    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::from_level(level).into())
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

impl Args {
    fn connection_config(&self) -> Result<ConnectionConfig, String> {
        let user = self
            .user
            .clone()
            .or_else(|| std::env::var("USER").ok())
            .ok_or("no user given: pass --user or set PGUSER/USER")?;

        let mut config = ConnectionConfig::new(user);
        config.host = self.host.clone();
        config.port = self.port;
        config.password = self.password.clone().filter(|p| !p.is_empty());
        if let Some(dbname) = &self.dbname {
            config.dbname = dbname.clone();
        }
        config.sslmode = self.sslmode;
        Ok(config)
    }
}

fn render<T: Serialize>(value: &T, compact: bool) -> serde_json::Result<String> {
    if compact {
        serde_json::to_string(value)
    } else {
        serde_json::to_string_pretty(value)
    }
}

/// Reads `view` and serializes it.
fn read_view(
    client: &mut StatsClient,
    view: View,
    compact: bool,
) -> Result<String, Box<dyn Error>> {
    let json = match view {
        View::ServerVersion => render(&client.server_version()?.to_string(), compact)?,
        View::Activity => render(&client.activity()?, compact)?,
        View::Archiver => render(&client.archiver()?, compact)?,
        View::BgWriter => render(&client.bg_writer()?, compact)?,
        View::Database => render(&client.database()?, compact)?,
        View::DatabaseConflicts => render(&client.database_conflicts()?, compact)?,
        View::UserFunctions => render(&client.user_functions()?, compact)?,
        View::XactUserFunctions => render(&client.xact_user_functions()?, compact)?,
        View::AllIndexes => render(&client.all_indexes()?, compact)?,
        View::SystemIndexes => render(&client.system_indexes()?, compact)?,
        View::UserIndexes => render(&client.user_indexes()?, compact)?,
        View::IoAllIndexes => render(&client.io_all_indexes()?, compact)?,
        View::IoSystemIndexes => render(&client.io_system_indexes()?, compact)?,
        View::IoUserIndexes => render(&client.io_user_indexes()?, compact)?,
        View::IoAllTables => render(&client.io_all_tables()?, compact)?,
        View::IoSystemTables => render(&client.io_system_tables()?, compact)?,
        View::IoUserTables => render(&client.io_user_tables()?, compact)?,
        View::IoAllSequences => render(&client.io_all_sequences()?, compact)?,
        View::IoSystemSequences => render(&client.io_system_sequences()?, compact)?,
        View::IoUserSequences => render(&client.io_user_sequences()?, compact)?,
        View::ProgressVacuum => render(&client.progress_vacuum()?, compact)?,
        View::Replication => render(&client.replication()?, compact)?,
        View::Ssl => render(&client.ssl()?, compact)?,
        View::Statements => render(&client.statements()?, compact)?,
        View::Subscription => render(&client.subscription()?, compact)?,
        View::AllTables => render(&client.all_tables()?, compact)?,
        View::SystemTables => render(&client.system_tables()?, compact)?,
        View::UserTables => render(&client.user_tables()?, compact)?,
        View::WalReceiver => render(&client.wal_receiver()?, compact)?,
        View::XactAllTables => render(&client.xact_all_tables()?, compact)?,
        View::XactSystemTables => render(&client.xact_system_tables()?, compact)?,
        View::XactUserTables => render(&client.xact_user_tables()?, compact)?,
    };
    Ok(json)
}

fn run(args: &Args) -> Result<(), Box<dyn Error>> {
    let config = args.connection_config()?;
    debug!(?config, "connection settings");

    let mut client = StatsClient::connect(&config)?;
    info!(host = %config.host, port = config.port, dbname = %config.dbname, "connected");

    let result = read_view(&mut client, args.view, args.compact);
    client.close()?;
    info!("connection closed");

    println!("{}", result?);
    Ok(())
}

/// Formats an error with its `source` chain, outermost first.
fn error_chain(err: &dyn Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let cause_text = cause.to_string();
        if !message.contains(&cause_text) {
            message.push_str(": ");
            message.push_str(&cause_text);
        }
        source = cause.source();
    }
    message
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose, args.quiet);

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", error_chain(e.as_ref()));
            ExitCode::FAILURE
        }
    }
}

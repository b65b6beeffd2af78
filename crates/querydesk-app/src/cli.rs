use std::path::PathBuf;

use clap::{Args as ClapArgs, Parser, Subcommand, ValueEnum};
use querydesk_config::schema::{DatabaseType, Transport};

/// QueryDesk: ask a database questions in SQL or plain language.
#[derive(Parser, Debug)]
#[command(name = "querydesk", version, about)]
pub struct Args {
    /// Config file path override.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Log level override (trace, debug, info, warn, error).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Query endpoint override.
    #[arg(long)]
    pub endpoint: Option<String>,

    /// How queries are sent to the endpoint.
    #[arg(long, value_enum)]
    pub transport: Option<TransportArg>,

    /// Also write the transcript as an HTML page to this path.
    #[arg(long)]
    pub html: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Interactive session reading queries from stdin (default).
    Chat,
    /// Submit a single query and print the result.
    Ask {
        /// Query text; multiple words are joined with spaces.
        #[arg(required = true)]
        query: Vec<String>,
    },
    /// Validate and register a database connection.
    Connect(ConnectArgs),
}

/// Connection form fields. Missing flags fall back to `[connection]`.
#[derive(ClapArgs, Debug, Clone, Default)]
pub struct ConnectArgs {
    #[arg(long)]
    pub user: Option<String>,
    #[arg(long)]
    pub password: Option<String>,
    #[arg(long)]
    pub host: Option<String>,
    #[arg(long)]
    pub port: Option<String>,
    #[arg(long)]
    pub database: Option<String>,
    /// Postgres, SQLlite or MongoDB.
    #[arg(long)]
    pub database_type: Option<DatabaseType>,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportArg {
    PostJson,
    GetPath,
}

impl From<TransportArg> for Transport {
    fn from(arg: TransportArg) -> Self {
        match arg {
            TransportArg::PostJson => Transport::PostJson,
            TransportArg::GetPath => Transport::GetPath,
        }
    }
}

pub fn parse() -> Args {
    Args::parse()
}

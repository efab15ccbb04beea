use std::path::PathBuf;

use chrono::{DateTime, Utc};
use clap::{Args as ClapArgs, Parser, Subcommand, ValueEnum};

use crate::data::datasets::BatchSpec;
use crate::error::{SeedError, SeedResult};
use crate::profile::{load_profile, SalesProfile};

pub const DEFAULT_TABLE: &str = "sales";
pub const DEFAULT_ROWS: usize = 10;
pub const MAX_ROWS: usize = 1_000_000;
const MAX_IDENTIFIER_LEN: usize = 63;

#[derive(Debug, Parser)]
#[command(
    name = "sales-seed",
    about = "Insert synthetic sales transactions into PostgreSQL for CDC testing"
)]
pub struct Args {
    #[command(flatten)]
    pub connection: ConnectionArgs,
    #[arg(
        long,
        env = "SALES_SEED_LOG_FORMAT",
        value_enum,
        default_value_t = LogFormat::Text
    )]
    pub log_format: LogFormat,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, ClapArgs)]
pub struct ConnectionArgs {
    /// Full connection URL; takes precedence over the discrete options.
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    pub database_url: Option<String>,
    #[arg(long, env = "PGHOST", default_value = "localhost")]
    pub host: String,
    #[arg(long, env = "PGPORT", default_value_t = 5432)]
    pub port: u16,
    #[arg(long, env = "PGDATABASE", default_value = "postgres")]
    pub dbname: String,
    #[arg(long, env = "PGUSER", default_value = "postgres")]
    pub user: String,
    #[arg(long, env = "PGPASSWORD", hide_env_values = true)]
    pub password: Option<String>,
    #[arg(long, env = "SALES_SEED_CONNECT_TIMEOUT_SECS", default_value_t = 10)]
    pub connect_timeout_secs: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Text,
    Json,
}

#[derive(Debug, Clone, ClapArgs)]
pub struct BatchArgs {
    #[arg(long, default_value_t = DEFAULT_ROWS)]
    pub rows: usize,
    /// RNG seed; drawn from OS entropy when omitted.
    #[arg(long)]
    pub seed: Option<u64>,
    /// YAML file overriding the default value ranges.
    #[arg(long, env = "SALES_SEED_PROFILE")]
    pub profile: Option<PathBuf>,
    /// End of the sale_date window (RFC 3339); defaults to now.
    #[arg(long, value_parser = parse_anchor)]
    pub anchor: Option<DateTime<Utc>>,
}

impl BatchArgs {
    /// Loads the profile and pins the seed and anchor for this run.
    pub fn resolve(&self) -> SeedResult<(SalesProfile, BatchSpec)> {
        validate_row_count(self.rows)?;
        let profile = match &self.profile {
            Some(path) => load_profile(path)?,
            None => SalesProfile::default(),
        };
        let seed = self.seed.unwrap_or_else(|| {
            let seed = rand::random::<u64>();
            tracing::info!(seed, "no seed given, drew one from OS entropy");
            seed
        });
        let spec = BatchSpec {
            seed,
            rows: self.rows,
            anchor: self.anchor.unwrap_or_else(Utc::now),
        };
        Ok((profile, spec))
    }
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Generate a batch and insert it in a single transaction.
    Seed {
        #[command(flatten)]
        batch: BatchArgs,
        #[arg(long, env = "SALES_SEED_TABLE", default_value = DEFAULT_TABLE)]
        table: String,
        /// Write a JSON run report to this path.
        #[arg(long)]
        report: Option<PathBuf>,
    },
    /// Print a batch as JSON lines without touching the database.
    Preview {
        #[command(flatten)]
        batch: BatchArgs,
    },
    /// Show the resolved connection and check the target table.
    Doctor {
        #[arg(long, env = "SALES_SEED_TABLE", default_value = DEFAULT_TABLE)]
        table: String,
    },
}

/// Accepts `name` or `schema.name` with plain unquoted identifiers.
pub fn validate_table_name(table: &str) -> SeedResult<()> {
    if table.is_empty() {
        return Err(SeedError::InvalidArgument(
            "table name must not be empty".to_string(),
        ));
    }
    let parts = table.split('.').collect::<Vec<_>>();
    if parts.len() > 2 {
        return Err(SeedError::InvalidArgument(format!(
            "table name '{table}' has too many qualifiers; expected table or schema.table"
        )));
    }
    for part in parts {
        validate_identifier(table, part)?;
    }
    Ok(())
}

fn validate_identifier(table: &str, ident: &str) -> SeedResult<()> {
    let mut bytes = ident.bytes();
    let leading_ok = bytes
        .next()
        .is_some_and(|b| b.is_ascii_alphabetic() || b == b'_');
    if !leading_ok || !bytes.all(|b| b.is_ascii_alphanumeric() || b == b'_') {
        return Err(SeedError::InvalidArgument(format!(
            "table name '{table}' contains invalid identifier '{ident}'; allowed: [A-Za-z_][A-Za-z0-9_]*"
        )));
    }
    if ident.len() > MAX_IDENTIFIER_LEN {
        return Err(SeedError::InvalidArgument(format!(
            "table name '{table}' has an identifier longer than {MAX_IDENTIFIER_LEN} bytes"
        )));
    }
    Ok(())
}

pub fn validate_row_count(rows: usize) -> SeedResult<()> {
    if rows == 0 || rows > MAX_ROWS {
        return Err(SeedError::InvalidArgument(format!(
            "rows must be between 1 and {MAX_ROWS}, got {rows}"
        )));
    }
    Ok(())
}

pub fn parse_anchor(value: &str) -> Result<DateTime<Utc>, String> {
    DateTime::parse_from_rfc3339(value)
        .map(|ts| ts.with_timezone(&Utc))
        .map_err(|e| format!("invalid anchor '{value}': {e}; expected RFC 3339"))
}

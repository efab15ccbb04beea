use std::time::Duration;

use sqlx::postgres::{PgPool, PgPoolOptions};
use url::Url;

use crate::cli::ConnectionArgs;
use crate::error::{SeedError, SeedResult};

const ACCEPTED_SCHEMES: [&str; 2] = ["postgres", "postgresql"];
const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Clone, Debug)]
pub struct ConnectionConfig {
    url: Url,
    connect_timeout: Duration,
}

impl ConnectionConfig {
    pub fn new(args: &ConnectionArgs) -> SeedResult<Self> {
        let config = match args.database_url.as_deref() {
            Some(raw) if !raw.trim().is_empty() => Self::from_url(raw.trim())?,
            _ => Self::from_parts(
                &args.host,
                args.port,
                &args.dbname,
                &args.user,
                args.password.as_deref(),
            )?,
        };
        Ok(config.with_connect_timeout(Duration::from_secs(args.connect_timeout_secs)))
    }

    pub fn from_url(raw: &str) -> SeedResult<Self> {
        let url = Url::parse(raw).map_err(|e| {
            SeedError::InvalidArgument(format!("invalid database URL: {e}"))
        })?;
        validate_url(&url)?;
        Ok(Self {
            url,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
        })
    }

    pub fn from_parts(
        host: &str,
        port: u16,
        dbname: &str,
        user: &str,
        password: Option<&str>,
    ) -> SeedResult<Self> {
        if host.trim().is_empty() {
            return Err(SeedError::InvalidArgument(
                "host must not be empty".to_string(),
            ));
        }
        if dbname.trim().is_empty() {
            return Err(SeedError::InvalidArgument(
                "dbname must not be empty".to_string(),
            ));
        }

        let mut url = Url::parse("postgres://localhost")?;
        url.set_host(Some(host.trim()))?;
        url.set_port(Some(port))
            .map_err(|()| SeedError::InvalidArgument(format!("cannot set port {port}")))?;
        url.set_username(user)
            .map_err(|()| SeedError::InvalidArgument(format!("cannot set user '{user}'")))?;
        // Percent-encodes reserved characters in the password.
        url.set_password(password)
            .map_err(|()| SeedError::InvalidArgument("cannot set password".to_string()))?;
        url.set_path(&format!("/{}", dbname.trim()));

        validate_url(&url)?;
        Ok(Self {
            url,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
        })
    }

    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn connect_timeout(&self) -> Duration {
        self.connect_timeout
    }

    pub fn redacted(&self) -> String {
        let mut shown = self.url.clone();
        if shown.password().is_some() {
            let _ = shown.set_password(Some("***"));
        }
        shown.to_string()
    }

    /// Opens a single-connection pool; the seeder never needs more.
    pub async fn connect(&self) -> SeedResult<PgPool> {
        tracing::debug!(url = %self.redacted(), "connecting");
        let pool = PgPoolOptions::new()
            .max_connections(1)
            .acquire_timeout(self.connect_timeout)
            .connect(self.url.as_str())
            .await?;
        tracing::info!(url = %self.redacted(), "connected");
        Ok(pool)
    }
}

fn validate_url(url: &Url) -> SeedResult<()> {
    if !ACCEPTED_SCHEMES.contains(&url.scheme()) {
        let expected = ACCEPTED_SCHEMES
            .iter()
            .map(|scheme| format!("{scheme}://"))
            .collect::<Vec<_>>()
            .join(", ");
        return Err(SeedError::InvalidArgument(format!(
            "database URL scheme '{}' is not supported; expected one of: {expected}",
            url.scheme()
        )));
    }
    if url.host_str().map_or(true, str::is_empty) {
        return Err(SeedError::InvalidArgument(
            "database URL must include a host".to_string(),
        ));
    }
    Ok(())
}

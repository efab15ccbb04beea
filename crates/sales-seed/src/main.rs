use std::io::Write;

use chrono::Utc;
use clap::Parser;

use sales_seed::assertions::ensure_rows_valid;
use sales_seed::cli::{validate_table_name, Args, Command};
use sales_seed::connection::ConnectionConfig;
use sales_seed::data::generator::generate_sale_rows;
use sales_seed::error::SeedResult;
use sales_seed::loader::{count_rows, insert_rows, server_version};
use sales_seed::logging;
use sales_seed::results::{
    batch_fingerprint, write_report, SeedContext, SeedReport, REPORT_SCHEMA_VERSION,
};
use sales_seed::system::host_name;

#[tokio::main]
async fn main() -> SeedResult<()> {
    let args = Args::parse();
    logging::init(args.log_format);

    match args.command {
        Command::Seed {
            batch,
            table,
            report,
        } => {
            validate_table_name(&table)?;
            let (profile, spec) = batch.resolve()?;
            let rows = generate_sale_rows(&profile, spec.seed, spec.rows, spec.anchor)?;
            ensure_rows_valid(&rows, &profile, spec.anchor)?;
            tracing::info!(rows = rows.len(), seed = spec.seed, "batch generated");

            let config = ConnectionConfig::new(&args.connection)?;
            let pool = config.connect().await?;
            let inserted = insert_rows(&pool, &table, &rows).await;
            pool.close().await;
            let inserted = inserted?;

            if let Some(path) = report {
                let output = SeedReport {
                    schema_version: REPORT_SCHEMA_VERSION,
                    context: SeedContext {
                        created_at: Utc::now(),
                        host: host_name(),
                        table: table.clone(),
                        seed: spec.seed,
                        rows: spec.rows,
                        anchor: spec.anchor,
                        window_days: profile.window_days,
                        profile_path: batch.profile.as_ref().map(|p| p.display().to_string()),
                    },
                    inserted_rows: inserted,
                    fingerprint: batch_fingerprint(&rows)?,
                };
                write_report(&path, &output)?;
                tracing::info!(path = %path.display(), "wrote report");
            }

            println!("{inserted} fake sales records inserted successfully.");
        }
        Command::Preview { batch } => {
            let (profile, spec) = batch.resolve()?;
            let rows = generate_sale_rows(&profile, spec.seed, spec.rows, spec.anchor)?;
            let stdout = std::io::stdout();
            let mut out = stdout.lock();
            for row in &rows {
                serde_json::to_writer(&mut out, row)?;
                out.write_all(b"\n")?;
            }
            out.flush()?;
        }
        Command::Doctor { table } => {
            validate_table_name(&table)?;
            let config = ConnectionConfig::new(&args.connection)?;
            println!("sales-seed doctor");
            println!("database_url={}", config.redacted());
            println!("connect_timeout_secs={}", config.connect_timeout().as_secs());
            println!("table={table}");
            println!("host={}", host_name());

            let pool = config.connect().await?;
            println!("server_version={}", server_version(&pool).await?);
            match count_rows(&pool, &table).await {
                Ok(count) => println!("row_count={count}"),
                Err(error) => println!("row_count=unavailable ({error})"),
            }
            pool.close().await;
        }
    }

    Ok(())
}

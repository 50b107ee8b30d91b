//! Book a table at the restaurant
#![warn(missing_debug_implementations, rust_2018_idioms)]

#[macro_use]
extern crate lazy_static;

#[macro_use]
extern crate log;

#[macro_use]
extern crate serde_derive;

use tracing_subscriber::EnvFilter;

use anyhow::Error;
use dotenv::dotenv;

#[macro_use]
mod macros;

mod bookings;
mod config;
mod db;
mod errors;
mod server;
mod store;
mod tables;
mod views;

use config::Config;

#[actix_web::main]
async fn main() -> anyhow::Result<(), Error> {
    init().await?;

    Ok(())
}

async fn init() -> anyhow::Result<(), Error> {
    dotenv().ok();
    Config::init();

    let filter = log_filter(
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        Config::verbose_bookings(),
    )?;

    tracing_subscriber::fmt()
        .with_writer(std::io::stdout)
        .with_env_filter(filter)
        .try_init()
        .map_err(|e| anyhow::anyhow!("unable to initialize the tracer: {}", e))?;

    let pool = db::build_connection_pool(Config::database_url()).await?;
    db::log_server_version(&pool).await;
    db::migrate(&pool).await?;

    if let Err(e) = db::seed(&pool).await {
        error!("unable to seed the tables: {}", e);
    }

    debug!("launching the actix webserver");
    server::launch(pool).await?;

    Ok(())
}

/// Raises the booking workflow to trace level when verbose bookings are enabled
fn log_filter(filter: EnvFilter, verbose_bookings: bool) -> anyhow::Result<EnvFilter, Error> {
    if !verbose_bookings {
        return Ok(filter);
    }
    Ok(filter.add_directive("tablebook::bookings=trace".parse()?))
}

mod concurrency;
mod config;
mod files;
mod http;
mod responses;
mod router;

use crate::config::Config;
use crate::router::Router;
use anyhow::Context;
use clap::Parser;
use http::server;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::parse();
    log::info!(
        "serving files from {:?} on {}",
        config.directory,
        config.address
    );

    let router = Router::new(config.directory);
    let server = server::Server::from_tcp_addr(&config.address, config.workers, router)?;

    server.run().context("server stopped")
}

use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug, Clone)]
#[command(version, about = "Minimal HTTP/1.1 server with echo, user-agent and file routes")]
pub struct Config {
    /// Directory read from and written to by the /files routes
    #[arg(long, default_value = "")]
    pub directory: PathBuf,

    /// Address to listen on
    #[arg(long, default_value = "127.0.0.1:4221")]
    pub address: String,

    /// Worker threads handling connections
    #[arg(long, default_value_t = 10)]
    pub workers: usize,
}

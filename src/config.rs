//! Command-line configuration for `simulate-website`.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

use clap::Parser;

/// Serve a directory of static files as a content-negotiating website.
///
/// `name.ext` answers `/name`, `name.ext.POST` answers only POST,
/// `index.*` answers its directory and `@id` segments become `:id`
/// route parameters.
#[derive(Debug, Parser)]
#[command(name = "simulate-website", version)]
pub struct Config {
    /// Directory holding the website's files.
    pub path: PathBuf,

    /// Address to listen on.
    #[arg(long, default_value_t = IpAddr::V4(Ipv4Addr::LOCALHOST))]
    pub host: IpAddr,

    /// Port to listen on; 0 picks a free one.
    #[arg(long, default_value_t = 3000)]
    pub port: u16,

    /// Log every registered route and every request.
    #[arg(long)]
    pub verbose: bool,

    /// Print the route table as JSON before serving.
    #[arg(long)]
    pub dump: bool,
}

impl Config {
    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Log filter used when `RUST_LOG` is not set.
    pub fn default_log_filter(&self) -> &'static str {
        if self.verbose { "sitesim=debug" } else { "sitesim=info" }
    }
}

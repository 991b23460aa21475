//! skkserv Server Binary
//!
//! Starts the SKK dictionary server.

use std::sync::Arc;

use clap::Parser;
use skkserv::config::RequestEncoding;
use skkserv::dictionary::{DictManager, FileLoader};
use skkserv::encoding::normalizer_for;
use skkserv::network::Server;
use skkserv::{Config, Dispatcher, SharedConfig};
use tracing_subscriber::{fmt, EnvFilter};

/// skkserv Server
#[derive(Parser, Debug)]
#[command(name = "skkserv")]
#[command(about = "SKK dictionary server")]
#[command(version)]
struct Args {
    /// Listen address (host:port)
    #[arg(short, long, default_value = "127.0.0.1:1178")]
    listen: String,

    /// Dictionary file (repeatable, merged in order)
    #[arg(short, long = "dictionary")]
    dictionaries: Vec<String>,

    /// Request encoding: euc-jp or utf-8
    #[arg(short, long, default_value = "euc-jp")]
    encoding: RequestEncoding,

    /// Maximum concurrent connections (0 = unbounded)
    #[arg(short, long, default_value = "0")]
    max_connections: usize,

    /// Read timeout per connection in milliseconds (0 = none)
    #[arg(long, default_value = "0")]
    read_timeout_ms: u64,

    /// Write timeout per connection in milliseconds (0 = none)
    #[arg(long, default_value = "0")]
    write_timeout_ms: u64,
}

impl Args {
    fn into_config(self) -> Config {
        Config::builder()
            .listen_addr(self.listen)
            .dictionaries(self.dictionaries)
            .request_encoding(self.encoding)
            .max_connections(self.max_connections)
            .read_timeout_ms(self.read_timeout_ms)
            .write_timeout_ms(self.write_timeout_ms)
            .build()
    }
}

fn main() {
    // Initialize tracing/logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,skkserv=debug"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true)
        .init();

    let args = Args::parse();

    tracing::info!("skkserv v{}", skkserv::VERSION);
    tracing::info!("Listen address: {}", args.listen);
    tracing::info!("Dictionaries: {:?}", args.dictionaries);

    let config = args.into_config();
    let shared = SharedConfig::new(config.clone());

    let dictionary = match DictManager::open(&config.dictionaries, FileLoader) {
        Ok(d) => Arc::new(d),
        Err(e) => {
            tracing::error!("Failed to load dictionaries: {}", e);
            std::process::exit(1);
        }
    };

    tracing::info!("Dictionary ready: {} keys", dictionary.snapshot().len());

    let dispatcher = Arc::new(Dispatcher::new(
        config.listen_addr.clone(),
        dictionary,
        Arc::new(shared),
        normalizer_for(config.request_encoding),
    ));

    let mut server = Server::new(config, dispatcher);
    if let Err(e) = server.run() {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }

    tracing::info!("Server stopped");
}

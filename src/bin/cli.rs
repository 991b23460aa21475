//! skkserv CLI Client
//!
//! Command-line interface for querying an SKK server.

use std::io::{BufReader, Write};
use std::net::TcpStream;

use clap::{Parser, Subcommand};
use skkserv::encoding::encode_legacy;
use skkserv::protocol::{
    encode_request, parse_reply, read_reply, Command, CustomizeCommand, Response,
};

/// skkserv CLI
#[derive(Parser, Debug)]
#[command(name = "skkserv-cli")]
#[command(about = "CLI for an SKK dictionary server")]
struct Args {
    /// Server address
    #[arg(short, long, default_value = "127.0.0.1:1178")]
    server: String,

    /// Send requests as UTF-8 instead of EUC-JP
    #[arg(long)]
    utf8: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Look up the candidates for a key
    Lookup {
        /// The reading to convert
        key: String,
    },

    /// List keys starting with a prefix
    Complete {
        /// The prefix to complete
        prefix: String,
    },

    /// Print the server version
    Version,

    /// Print the server host string
    Host,

    /// Ask the server to reload its dictionaries
    Reload,
}

impl Commands {
    fn into_command(self) -> Command {
        match self {
            Commands::Lookup { key } => Command::Lookup { key },
            Commands::Complete { prefix } => Command::Completion { prefix },
            Commands::Version => Command::Version,
            Commands::Host => Command::Host,
            Commands::Reload => Command::Customize(CustomizeCommand::Reload),
        }
    }
}

fn main() {
    let args = Args::parse();
    let command = args.command.into_command();

    if let Err(e) = run(&args.server, args.utf8, command) {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}

fn run(server: &str, utf8: bool, command: Command) -> skkserv::Result<()> {
    let stream = TcpStream::connect(server)?;
    let mut writer = stream.try_clone()?;
    let mut reader = BufReader::new(stream);

    let request = encode_request(&command);
    let bytes = if utf8 {
        request.into_bytes()
    } else {
        encode_legacy(&request)?
    };
    writer.write_all(&bytes)?;
    writer.flush()?;

    if !matches!(command, Command::Customize(_)) {
        let line = read_reply(&mut reader)?;
        match parse_reply(&line, command.command_type())? {
            Response::Found(candidates) => {
                for candidate in candidates {
                    println!("{}", candidate);
                }
            }
            Response::NotFound(key) => {
                eprintln!("not found: {}", key);
            }
            Response::Info(text) => println!("{}", text),
            Response::Empty => {}
        }
    }

    writer.write_all(&encode_request(&Command::Disconnect).into_bytes())?;
    writer.flush()?;
    Ok(())
}

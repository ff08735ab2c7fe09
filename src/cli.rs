use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Directory holding the JSON data files
    #[arg(short, long, default_value = ".")]
    pub data_dir: PathBuf,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Interactive text menu (the default)
    Menu,
    /// Serve the browser GUI on a local port
    Serve {
        #[arg(short, long, default_value_t = 8080)]
        port: u16,
    },
}

pub fn parse_args() -> Cli {
    Cli::parse()
}

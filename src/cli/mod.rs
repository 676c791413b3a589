//! Command line entry points

pub mod serve;

use clap::{Parser, Subcommand};

/// MyGram - photo sharing API
#[derive(Parser)]
#[command(name = "mygram")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the HTTP API server
    Serve,
}

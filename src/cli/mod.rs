//! CLI for the roster service

pub mod serve;

use clap::{Parser, Subcommand};

/// Meninos de Ouro roster - student registration and team draws
#[derive(Parser)]
#[command(name = "meninos-roster")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the API server
    Serve,
}

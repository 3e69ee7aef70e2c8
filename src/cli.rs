use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "job-openings", about = "HTTP service for managing job openings")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Run migrations and serve the HTTP API (default)
    Serve,
    /// Run migrations and exit
    Migrate,
}

impl Cli {
    pub fn command(&self) -> Command {
        self.command.unwrap_or(Command::Serve)
    }
}

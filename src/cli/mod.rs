use anyhow::{Context, Result};
use clap::Parser;
use std::fs::File;
use std::io::{self, BufReader, IsTerminal};
use std::path::PathBuf;

use crate::application::BankService;
use crate::config::BankConfig;
use crate::logging;

pub mod render;
mod session;

pub use session::{LoopControl, Session, SessionCommand, SessionLine};

/// Bank Ledger - accounts, customers and a transaction ledger in one session
#[derive(Parser)]
#[command(name = "bank-ledger")]
#[command(about = "An in-memory bank account and transaction ledger")]
#[command(version)]
pub struct Cli {
    /// JSON configuration file (built-in defaults if omitted)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Answer yes to every confirmation prompt
    #[arg(short, long)]
    pub yes: bool,

    /// Read session commands from a file instead of stdin
    #[arg(short, long)]
    pub script: Option<PathBuf>,
}

impl Cli {
    pub fn run(self) -> Result<()> {
        logging::init(self.verbose);

        let config = match &self.config {
            Some(path) => BankConfig::load(path)
                .with_context(|| format!("Failed to load config: {}", path.display()))?,
            None => BankConfig::default(),
        };
        let service = BankService::new(config);
        let stdout = io::stdout();

        match &self.script {
            Some(path) => {
                let file = File::open(path)
                    .with_context(|| format!("Failed to open script: {}", path.display()))?;
                Session::new(service, BufReader::new(file), stdout.lock(), self.yes).run()
            }
            None => {
                let stdin = io::stdin();
                let interactive = stdin.is_terminal();
                let mut session = Session::new(service, stdin.lock(), stdout.lock(), self.yes);
                if interactive {
                    session = session.with_prompt("bank> ");
                }
                session.run()
            }
        }
    }
}

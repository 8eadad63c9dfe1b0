use anyhow::{anyhow, bail, Context, Result};
use clap::error::ErrorKind;
use clap::{CommandFactory, Parser, Subcommand};
use std::fs::File;
use std::io::{BufRead, Write};
use std::path::PathBuf;

use super::render;
use crate::application::{AccountSummary, BankService, OpenAccountRequest};
use crate::domain::{
    format_money, parse_cents, AccountKind, AccountNumber, Cents, CustomerTier, NewCustomer,
    TransactionType,
};
use crate::io::Exporter;

/// One line typed into the session.
#[derive(Parser, Debug)]
#[command(
    name = "bank-ledger",
    no_binary_name = true,
    disable_help_subcommand = true,
    disable_version_flag = true
)]
pub struct SessionLine {
    #[command(subcommand)]
    pub command: SessionCommand,
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum SessionCommand {
    /// Register a customer and open an account for them
    Open {
        /// Customer full name
        #[arg(long)]
        name: String,

        /// Customer age
        #[arg(long)]
        age: u32,

        /// Phone number or email
        #[arg(long)]
        contact: String,

        /// Postal address
        #[arg(long)]
        address: String,

        /// Account type: savings, checking
        #[arg(short = 't', long = "type")]
        kind: String,

        /// Initial deposit (e.g., "500.00" or "500")
        #[arg(short, long, allow_hyphen_values = true)]
        deposit: String,

        /// Register the customer as premium
        #[arg(long)]
        premium: bool,
    },

    /// List all accounts with the total bank balance
    Accounts,

    /// List all registered customers
    Customers,

    /// Show one account in detail
    Show {
        /// Account number (e.g., ACC001)
        account: String,
    },

    /// Deposit money into an account
    Deposit {
        account: String,
        #[arg(allow_hyphen_values = true)]
        amount: String,
    },

    /// Withdraw money from an account
    Withdraw {
        account: String,
        #[arg(allow_hyphen_values = true)]
        amount: String,
    },

    /// Process a transaction named by its type label
    Transact {
        account: String,
        #[arg(allow_hyphen_values = true)]
        amount: String,

        /// Transaction type: deposit, withdrawal
        #[arg(short = 't', long = "type")]
        kind: String,
    },

    /// Transaction history, most recent first (all accounts if omitted)
    History { account: Option<String> },

    /// Charge the monthly fee on a checking account
    Fee { account: String },

    /// Show the projected interest on a savings account
    Interest { account: String },

    /// Bank statement: every account plus ledger totals
    Report,

    /// Export data to CSV or JSON
    Export {
        /// What to export: statement, accounts, transactions, snapshot
        what: String,

        /// Account number, required for statements
        #[arg(short, long)]
        account: Option<String>,

        /// Output file (session output if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show available commands
    Help,

    /// Leave the session
    #[command(alias = "quit")]
    Exit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopControl {
    Continue,
    Exit,
}

/// A line-oriented session over a `BankService`.
///
/// Confirmation answers are read from the same input as commands.
pub struct Session<R, W> {
    service: BankService,
    input: R,
    output: W,
    assume_yes: bool,
    prompt: Option<String>,
}

impl<R: BufRead, W: Write> Session<R, W> {
    pub fn new(service: BankService, input: R, output: W, assume_yes: bool) -> Self {
        Self {
            service,
            input,
            output,
            assume_yes,
            prompt: None,
        }
    }

    /// Print `prompt` before reading each command.
    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = Some(prompt.into());
        self
    }

    pub fn service(&self) -> &BankService {
        &self.service
    }

    pub fn into_parts(self) -> (BankService, W) {
        (self.service, self.output)
    }

    /// Read and execute commands until `exit` or end of input.
    pub fn run(&mut self) -> Result<()> {
        if self.prompt.is_some() {
            writeln!(self.output, "Bank Account Management. Type 'help' for commands.")?;
        }

        let mut line = String::new();
        loop {
            if let Some(prompt) = &self.prompt {
                write!(self.output, "{}", prompt)?;
                self.output.flush()?;
            }

            line.clear();
            if self.input.read_line(&mut line)? == 0 {
                break;
            }

            match self.handle_line(line.trim()) {
                Ok(LoopControl::Continue) => {}
                Ok(LoopControl::Exit) => break,
                Err(err) => writeln!(self.output, "Error: {:#}", err)?,
            }
        }

        writeln!(self.output, "Goodbye!")?;
        self.output.flush()?;
        Ok(())
    }

    pub fn handle_line(&mut self, line: &str) -> Result<LoopControl> {
        if line.is_empty() || line.starts_with('#') {
            return Ok(LoopControl::Continue);
        }

        let tokens = shell_words::split(line).context("Could not parse command line")?;
        match SessionLine::try_parse_from(tokens) {
            Ok(parsed) => self.execute(parsed.command),
            Err(err) => {
                write!(self.output, "{}", err.render())?;
                if !matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) {
                    writeln!(self.output, "Type 'help' for the list of commands.")?;
                }
                Ok(LoopControl::Continue)
            }
        }
    }

    fn execute(&mut self, command: SessionCommand) -> Result<LoopControl> {
        match command {
            SessionCommand::Open {
                name,
                age,
                contact,
                address,
                kind,
                deposit,
                premium,
            } => {
                let kind = AccountKind::from_str(&kind).ok_or_else(|| {
                    anyhow!("Invalid account type '{}'. Valid types: savings, checking", kind)
                })?;
                let tier = if premium {
                    CustomerTier::Premium
                } else {
                    CustomerTier::Regular
                };
                let request = OpenAccountRequest {
                    customer: NewCustomer::new(name, age, contact, address, tier),
                    kind,
                    initial_deposit: parse_amount(&deposit)?,
                };
                self.open_account(request)?;
            }

            SessionCommand::Accounts => {
                let overview = self.service.bank_overview();
                self.print(&render::accounts_table(&overview.accounts, overview.total_balance))?;
            }

            SessionCommand::Customers => {
                let customers = self.service.customer_summaries();
                self.print(&render::customers_table(&customers))?;
            }

            SessionCommand::Show { account } => {
                let summary = AccountSummary::from_account(self.service.account(&account.into())?);
                self.print(&render::account_details(&summary))?;
            }

            SessionCommand::Deposit { account, amount } => {
                self.transact(account.into(), &amount, TransactionType::Deposit.as_str())?;
            }

            SessionCommand::Withdraw { account, amount } => {
                self.transact(account.into(), &amount, TransactionType::Withdrawal.as_str())?;
            }

            SessionCommand::Transact {
                account,
                amount,
                kind,
            } => {
                self.transact(account.into(), &amount, &kind)?;
            }

            SessionCommand::History { account } => self.history(account)?,

            SessionCommand::Fee { account } => {
                let number = AccountNumber::from(account);
                let outcome = self.service.apply_monthly_fee(&number)?;
                writeln!(self.output, "{}", render::fee_outcome(&number, &outcome))?;
            }

            SessionCommand::Interest { account } => {
                let number = AccountNumber::from(account);
                match self.service.projected_interest(&number)? {
                    Some(interest) => writeln!(
                        self.output,
                        "Projected interest for {}: {}",
                        number,
                        format_money(interest)
                    )?,
                    None => writeln!(self.output, "{} is not a savings account; no interest", number)?,
                }
            }

            SessionCommand::Report => {
                let overview = self.service.bank_overview();
                let history = self.service.transaction_history();
                self.print("BANK STATEMENT\n")?;
                self.print(&render::accounts_table(&overview.accounts, overview.total_balance))?;
                self.print(&render::totals(&history.totals))?;
            }

            SessionCommand::Export {
                what,
                account,
                output,
            } => self.export(&what, account, output)?,

            SessionCommand::Help => {
                let mut command = SessionLine::command();
                write!(self.output, "{}", command.render_help())?;
            }

            SessionCommand::Exit => return Ok(LoopControl::Exit),
        }

        Ok(LoopControl::Continue)
    }

    fn open_account(&mut self, request: OpenAccountRequest) -> Result<()> {
        let preview = self.service.preview_account(&request)?;
        self.print(&render::account_preview(&preview))?;
        if !self.confirm("Confirm account creation?")? {
            writeln!(self.output, "Account creation cancelled.")?;
            return Ok(());
        }

        let opened = self.service.open_account(request)?;
        self.print(&render::opened_account(&opened))
    }

    fn transact(&mut self, number: AccountNumber, amount: &str, type_label: &str) -> Result<()> {
        let amount = parse_amount(amount)?;
        let preview = self.service.preview_labeled(&number, amount, type_label)?;
        self.print(&render::transaction_preview(&preview))?;
        if !self.confirm("Confirm transaction?")? {
            writeln!(self.output, "Transaction cancelled.")?;
            return Ok(());
        }

        let transaction = self.service.process_labeled(&number, amount, type_label)?;
        writeln!(
            self.output,
            "Transaction completed successfully! {} {}. New balance: {}",
            transaction.id(),
            transaction.kind(),
            format_money(transaction.balance_after())
        )?;
        Ok(())
    }

    fn history(&mut self, account: Option<String>) -> Result<()> {
        match account {
            Some(account) => {
                let statement = self.service.statement(&account.into())?;
                writeln!(
                    self.output,
                    "Transaction history for {} ({})",
                    statement.account.account_number, statement.account.customer_name
                )?;
                self.print(&render::transactions_table(&statement.transactions))?;
                self.print(&render::totals(&statement.totals))
            }
            None => {
                let history = self.service.transaction_history();
                self.print(&render::transactions_table(&history.transactions))?;
                self.print(&render::totals(&history.totals))
            }
        }
    }

    fn export(&mut self, what: &str, account: Option<String>, output: Option<PathBuf>) -> Result<()> {
        let exporter = Exporter::new(&self.service);
        let writer: Box<dyn Write + '_> = match &output {
            Some(path) => Box::new(
                File::create(path)
                    .with_context(|| format!("Failed to create output file: {}", path.display()))?,
            ),
            None => Box::new(&mut self.output),
        };

        let summary = match what {
            "statement" => {
                let Some(account) = account else {
                    bail!("Exporting a statement needs --account <number>");
                };
                let count = exporter.export_statement_csv(&account.into(), writer)?;
                format!("Exported {} transactions", count)
            }
            "accounts" => {
                let count = exporter.export_accounts_csv(writer)?;
                format!("Exported {} accounts", count)
            }
            "transactions" => {
                let count = exporter.export_transactions_csv(writer)?;
                format!("Exported {} transactions", count)
            }
            "snapshot" => {
                let snapshot = exporter.export_snapshot_json(writer)?;
                format!(
                    "Exported snapshot: {} accounts, {} customers, {} transactions",
                    snapshot.overview.total_accounts,
                    snapshot.customers.len(),
                    snapshot.history.transactions.len()
                )
            }
            _ => bail!(
                "Invalid export type '{}'. Valid types: statement, accounts, transactions, snapshot",
                what
            ),
        };

        if output.is_some() {
            writeln!(self.output, "{}", summary)?;
        }
        Ok(())
    }

    fn confirm(&mut self, question: &str) -> Result<bool> {
        if self.assume_yes {
            return Ok(true);
        }

        write!(self.output, "{} (y/n): ", question)?;
        self.output.flush()?;

        let mut answer = String::new();
        if self.input.read_line(&mut answer)? == 0 {
            return Ok(false);
        }
        Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
    }

    fn print(&mut self, text: &str) -> Result<()> {
        self.output.write_all(text.as_bytes())?;
        Ok(())
    }
}

fn parse_amount(input: &str) -> Result<Cents> {
    parse_cents(input).with_context(|| format!("Invalid amount '{}'. Use '50.00' or '50'", input))
}

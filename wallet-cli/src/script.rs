//! Ledger command scripts.
//!
//! A script is a plain text file with one command per line. Blank lines and
//! lines starting with `#` are ignored. Payments and favorites created while
//! the script runs can be referred to as `@1`, `@2`, ... in creation order.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use serde_json::{Value, json};

use wallet_service::WalletService;
use wallet_types::{
    Account, AccountId, Favorite, FavoriteId, IdGenerator, Money, Payment, PaymentCategory,
    PaymentId, Phone,
};

/// One parsed script line.
#[derive(Parser, Debug, PartialEq)]
#[command(no_binary_name = true, disable_help_flag = true)]
pub struct ScriptLine {
    #[command(subcommand)]
    pub command: ScriptCommand,
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum ScriptCommand {
    /// Register an account for a phone number
    Register { phone: String },
    /// Deposit minor units into an account
    Deposit {
        account: AccountId,
        #[arg(allow_negative_numbers = true)]
        amount: i64,
    },
    /// Pay from an account
    Pay {
        account: AccountId,
        #[arg(allow_negative_numbers = true)]
        amount: i64,
        category: String,
    },
    /// Reject a payment and refund it
    Reject { payment: String },
    /// Repeat a payment
    Repeat { payment: String },
    /// Save a payment as a named favorite
    Favorite {
        payment: String,
        #[arg(required = true, num_args = 1.., trailing_var_arg = true)]
        name: Vec<String>,
    },
    /// Pay again from a favorite
    PayFavorite { favorite: String },
    /// Export accounts to a file
    Export { path: PathBuf },
    /// Import accounts from a file
    Import { path: PathBuf },
}

/// Parses one line. Returns `Ok(None)` for blank lines and comments.
pub fn parse_line(line: &str) -> Result<Option<ScriptCommand>> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let parsed = ScriptLine::try_parse_from(line.split_whitespace())?;
    Ok(Some(parsed.command))
}

/// Parses a whole script, reporting the first bad line.
pub fn parse_script(source: &str) -> Result<Vec<(usize, ScriptCommand)>> {
    let mut commands = Vec::new();
    for (index, line) in source.lines().enumerate() {
        let number = index + 1;
        if let Some(command) =
            parse_line(line).with_context(|| format!("line {}: {}", number, line.trim()))?
        {
            commands.push((number, command));
        }
    }
    Ok(commands)
}

/// Snapshot of the ledger collections.
#[derive(Debug, Serialize)]
pub struct Summary<'a> {
    pub accounts: &'a [Account],
    pub payments: &'a [Payment],
    pub favorites: &'a [Favorite],
}

/// A ledger plus the payments and favorites created through it, so that
/// `@N` references can be resolved.
pub struct Session<G: IdGenerator> {
    service: WalletService<G>,
    payments: Vec<PaymentId>,
    favorites: Vec<FavoriteId>,
}

impl<G: IdGenerator> Session<G> {
    pub fn new(service: WalletService<G>) -> Self {
        Self {
            service,
            payments: Vec::new(),
            favorites: Vec::new(),
        }
    }

    pub fn service(&self) -> &WalletService<G> {
        &self.service
    }

    pub fn summary(&self) -> Summary<'_> {
        Summary {
            accounts: self.service.accounts(),
            payments: self.service.payments(),
            favorites: self.service.favorites(),
        }
    }

    /// Runs one command and returns its result as JSON.
    pub fn execute(&mut self, command: ScriptCommand) -> Result<Value> {
        let value = match command {
            ScriptCommand::Register { phone } => {
                let account = self.service.register_account(Phone::new(phone))?;
                serde_json::to_value(account)?
            }
            ScriptCommand::Deposit { account, amount } => {
                self.service.deposit(account, Money::new(amount))?;
                serde_json::to_value(self.service.find_account_by_id(account)?)?
            }
            ScriptCommand::Pay {
                account,
                amount,
                category,
            } => {
                let payment = self.service.pay(
                    account,
                    Money::new(amount),
                    PaymentCategory::new(category),
                )?;
                self.track_payment(payment)?
            }
            ScriptCommand::Reject { payment } => {
                let id = self.payment_ref(&payment)?;
                self.service.reject(&id)?;
                serde_json::to_value(self.service.find_payment_by_id(&id)?)?
            }
            ScriptCommand::Repeat { payment } => {
                let id = self.payment_ref(&payment)?;
                let repeated = self.service.repeat(&id)?;
                self.track_payment(repeated)?
            }
            ScriptCommand::Favorite { payment, name } => {
                let id = self.payment_ref(&payment)?;
                let favorite = self.service.favorite_payment(&id, &name.join(" "))?;
                self.favorites.push(favorite.id.clone());
                serde_json::to_value(favorite)?
            }
            ScriptCommand::PayFavorite { favorite } => {
                let id = self.favorite_ref(&favorite)?;
                let payment = self.service.pay_from_favorite(&id)?;
                self.track_payment(payment)?
            }
            ScriptCommand::Export { path } => {
                self.service
                    .export_to_file(&path)
                    .with_context(|| format!("exporting to {}", path.display()))?;
                json!({ "exported": self.service.accounts().len(), "path": path })
            }
            ScriptCommand::Import { path } => {
                let added = self
                    .service
                    .import_from_file(&path)
                    .with_context(|| format!("importing from {}", path.display()))?;
                json!({ "imported": added, "path": path })
            }
        };
        Ok(value)
    }

    fn track_payment(&mut self, payment: Payment) -> Result<Value> {
        self.payments.push(payment.id.clone());
        Ok(serde_json::to_value(payment)?)
    }

    fn payment_ref(&self, reference: &str) -> Result<PaymentId> {
        let id = resolve_ref(reference, &self.payments, "payment")?;
        Ok(id.unwrap_or_else(|| reference.into()))
    }

    fn favorite_ref(&self, reference: &str) -> Result<FavoriteId> {
        let id = resolve_ref(reference, &self.favorites, "favorite")?;
        Ok(id.unwrap_or_else(|| reference.into()))
    }
}

/// Resolves `@N` against `created`. Anything else is a literal ID and yields `None`.
fn resolve_ref<T: Clone>(reference: &str, created: &[T], kind: &str) -> Result<Option<T>> {
    let Some(index) = reference.strip_prefix('@') else {
        return Ok(None);
    };

    let n: usize = index
        .parse()
        .with_context(|| format!("invalid {} reference: {}", kind, reference))?;

    n.checked_sub(1)
        .and_then(|i| created.get(i))
        .cloned()
        .map(Some)
        .with_context(|| format!("no {} created as {} yet", kind, reference))
}

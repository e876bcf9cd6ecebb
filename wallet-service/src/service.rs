//! Wallet Ledger Service
//!
//! Owns the in-memory collections (accounts, payments, favorites) and every
//! operation that mutates them. Lookups are plain linear scans; collections
//! are append-only and keep insertion order.

use std::path::Path;

use tracing::{debug, info, instrument, warn};
use wallet_types::{
    Account, AccountId, Favorite, FavoriteId, IdGenerator, LedgerError, Money, Payment,
    PaymentCategory, PaymentId, PaymentStatus, PersistError, Phone, UuidGenerator,
};

use crate::config::{RejectPolicy, ServiceConfig};

/// Application service for wallet operations.
///
/// Generic over `G: IdGenerator`. The source of payment and favorite IDs is
/// injected, which keeps tests deterministic.
///
/// The service performs no internal synchronization. Every mutating operation
/// takes `&mut self`; a concurrent host must put the whole service behind a
/// single lock.
#[derive(Debug)]
pub struct WalletService<G: IdGenerator = UuidGenerator> {
    ids: G,
    config: ServiceConfig,
    /// Last account ID handed out. Zero until the first registration.
    last_account_id: AccountId,
    accounts: Vec<Account>,
    payments: Vec<Payment>,
    favorites: Vec<Favorite>,
}

impl Default for WalletService<UuidGenerator> {
    fn default() -> Self {
        Self::new(UuidGenerator)
    }
}

impl<G: IdGenerator> WalletService<G> {
    /// Creates an empty ledger with the default configuration.
    pub fn new(ids: G) -> Self {
        Self::with_config(ids, ServiceConfig::default())
    }

    /// Creates an empty ledger.
    pub fn with_config(ids: G, config: ServiceConfig) -> Self {
        Self {
            ids,
            config,
            last_account_id: AccountId::new(0),
            accounts: Vec::new(),
            payments: Vec::new(),
            favorites: Vec::new(),
        }
    }

    /// All accounts, in registration order.
    pub fn accounts(&self) -> &[Account] {
        &self.accounts
    }

    /// All payments, in creation order.
    pub fn payments(&self) -> &[Payment] {
        &self.payments
    }

    /// All favorites, in creation order.
    pub fn favorites(&self) -> &[Favorite] {
        &self.favorites
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Account Operations
    // ─────────────────────────────────────────────────────────────────────────────

    /// Registers a new account with a zero balance.
    ///
    /// The ID counter only advances on success, so a rejected duplicate does
    /// not burn an ID. Once an account holds ID `i64::MAX` every further
    /// registration fails with [`LedgerError::AccountIdsExhausted`].
    #[instrument(skip_all, fields(phone = %phone))]
    pub fn register_account(&mut self, phone: Phone) -> Result<Account, LedgerError> {
        if self.accounts.iter().any(|account| account.phone == phone) {
            warn!("Phone already registered");
            return Err(LedgerError::PhoneAlreadyRegistered);
        }

        let Some(id) = self.last_account_id.next() else {
            warn!(last_account_id = %self.last_account_id, "Account ids exhausted");
            return Err(LedgerError::AccountIdsExhausted);
        };
        self.last_account_id = id;

        let account = Account::new(id, phone);
        self.accounts.push(account.clone());

        info!(account_id = %id, "Account registered");
        Ok(account)
    }

    /// Adds `amount` to the account balance. Zero is accepted.
    ///
    /// The balance saturates at `i64::MAX`; the part of a deposit above that
    /// is dropped without an error.
    #[instrument(skip_all, fields(account_id = %account_id, amount = %amount))]
    pub fn deposit(&mut self, account_id: AccountId, amount: Money) -> Result<(), LedgerError> {
        if amount.is_negative() {
            return Err(LedgerError::AmountMustBePositive);
        }

        let account = self.find_account_by_id_mut(account_id)?;
        account.credit(amount);

        debug!(balance = %account.balance, "Deposit applied");
        Ok(())
    }

    /// Returns the account with the given ID.
    pub fn find_account_by_id(&self, account_id: AccountId) -> Result<&Account, LedgerError> {
        self.accounts
            .iter()
            .find(|account| account.id == account_id)
            .ok_or(LedgerError::AccountNotFound)
    }

    /// Returns a mutable handle to the stored account; writes through it are
    /// visible to every later operation.
    pub fn find_account_by_id_mut(
        &mut self,
        account_id: AccountId,
    ) -> Result<&mut Account, LedgerError> {
        self.accounts
            .iter_mut()
            .find(|account| account.id == account_id)
            .ok_or(LedgerError::AccountNotFound)
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Payment Operations
    // ─────────────────────────────────────────────────────────────────────────────

    /// Debits the account and records an `InProgress` payment.
    ///
    /// Checks run in a fixed order: amount sign, account lookup, balance.
    #[instrument(
        skip_all,
        fields(account_id = %account_id, amount = %amount, category = %category)
    )]
    pub fn pay(
        &mut self,
        account_id: AccountId,
        amount: Money,
        category: PaymentCategory,
    ) -> Result<Payment, LedgerError> {
        if amount.is_negative() {
            return Err(LedgerError::AmountMustBePositive);
        }

        let account = self.find_account_by_id_mut(account_id)?;
        account.debit(amount)?;

        let payment = Payment::new(
            PaymentId::new(self.ids.generate()),
            account_id,
            amount,
            category,
        );
        self.payments.push(payment.clone());

        info!(payment_id = %payment.id, "Payment created");
        Ok(payment)
    }

    /// Returns the payment with the given ID.
    pub fn find_payment_by_id(&self, payment_id: &PaymentId) -> Result<&Payment, LedgerError> {
        self.payments
            .iter()
            .find(|payment| &payment.id == payment_id)
            .ok_or(LedgerError::PaymentNotFound)
    }

    /// Returns a mutable handle to the stored payment.
    ///
    /// This is how a settlement process outside the ledger marks a payment `Ok`.
    pub fn find_payment_by_id_mut(
        &mut self,
        payment_id: &PaymentId,
    ) -> Result<&mut Payment, LedgerError> {
        self.payments
            .iter_mut()
            .find(|payment| &payment.id == payment_id)
            .ok_or(LedgerError::PaymentNotFound)
    }

    /// Marks the payment `Fail` and refunds its amount to the owning account.
    ///
    /// Under [`RejectPolicy::Permissive`] the current status is not checked,
    /// so rejecting the same payment twice refunds it twice.
    /// [`RejectPolicy::Strict`] only accepts `InProgress` payments.
    #[instrument(skip_all, fields(payment_id = %payment_id))]
    pub fn reject(&mut self, payment_id: &PaymentId) -> Result<(), LedgerError> {
        let policy = self.config.reject_policy;
        let payment = self.find_payment_by_id_mut(payment_id)?;

        if policy == RejectPolicy::Strict && !payment.is_in_progress() {
            warn!(status = %payment.status, "Payment is not in progress");
            return Err(LedgerError::PaymentNotRejectable);
        }

        payment.status = PaymentStatus::Fail;
        let (account_id, amount) = (payment.account_id, payment.amount);

        // The owner is only missing if its ID was rewritten through
        // `find_account_by_id_mut`.
        match self.find_account_by_id_mut(account_id) {
            Ok(account) => {
                account.credit(amount);
                info!(account_id = %account_id, balance = %account.balance, "Payment rejected");
            }
            Err(_) => warn!(account_id = %account_id, "Rejected payment has no owning account"),
        }

        Ok(())
    }

    /// Charges the same account, amount and category again as a new payment.
    ///
    /// The owning account is looked up again and the new payment copies the
    /// original status as-is (it is not reset to `InProgress`).
    #[instrument(skip_all, fields(payment_id = %payment_id))]
    pub fn repeat(&mut self, payment_id: &PaymentId) -> Result<Payment, LedgerError> {
        let original = self.find_payment_by_id(payment_id)?.clone();

        let account = self.find_account_by_id_mut(original.account_id)?;
        account.debit(original.amount)?;

        let payment = original.duplicate(PaymentId::new(self.ids.generate()));
        self.payments.push(payment.clone());

        info!(new_payment_id = %payment.id, "Payment repeated");
        Ok(payment)
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Favorites
    // ─────────────────────────────────────────────────────────────────────────────

    /// Saves a payment's account, amount and category as a named favorite.
    #[instrument(skip_all, fields(payment_id = %payment_id))]
    pub fn favorite_payment(
        &mut self,
        payment_id: &PaymentId,
        name: &str,
    ) -> Result<Favorite, LedgerError> {
        let payment = self.find_payment_by_id(payment_id)?;
        let favorite = Favorite::from_payment(FavoriteId::new(self.ids.generate()), payment, name);
        self.favorites.push(favorite.clone());

        info!(favorite_id = %favorite.id, "Favorite created");
        Ok(favorite)
    }

    /// Returns the favorite with the given ID.
    pub fn find_favorite_by_id(&self, favorite_id: &FavoriteId) -> Result<&Favorite, LedgerError> {
        self.favorites
            .iter()
            .find(|favorite| &favorite.id == favorite_id)
            .ok_or(LedgerError::FavoriteNotFound)
    }

    /// Pays again from a favorite, with the same checks and errors as [`Self::pay`].
    #[instrument(skip_all, fields(favorite_id = %favorite_id))]
    pub fn pay_from_favorite(&mut self, favorite_id: &FavoriteId) -> Result<Payment, LedgerError> {
        let favorite = self.find_favorite_by_id(favorite_id)?;
        let (account_id, amount, category) =
            (favorite.account_id, favorite.amount, favorite.category.clone());

        self.pay(account_id, amount, category)
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Persistence
    // ─────────────────────────────────────────────────────────────────────────────

    /// Writes every account as an `ID;Phone;Balance` line to `path`.
    ///
    /// Missing parent directories are created and an existing file is
    /// overwritten. A failed write is not rolled back.
    pub fn export_to_file(&self, path: impl AsRef<Path>) -> Result<(), PersistError> {
        wallet_repo::export_accounts(path, &self.accounts)
    }

    /// Loads accounts from a file in the export format and returns how many
    /// were added.
    ///
    /// The whole file is parsed before anything is added. Records whose ID or
    /// phone already exists are skipped. The account counter moves past the
    /// highest imported ID.
    pub fn import_from_file(&mut self, path: impl AsRef<Path>) -> Result<usize, PersistError> {
        let imported = wallet_repo::import_accounts(path)?;
        let mut added = 0;

        for account in imported {
            let clash = self
                .accounts
                .iter()
                .any(|existing| existing.id == account.id || existing.phone == account.phone);
            if clash {
                debug!(account_id = %account.id, "Skipping already known account");
                continue;
            }

            if account.id > self.last_account_id {
                self.last_account_id = account.id;
            }
            self.accounts.push(account);
            added += 1;
        }

        info!(added, "Accounts imported");
        Ok(added)
    }
}

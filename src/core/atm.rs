use crate::domain::model::{Account, AccountKind};
use crate::utils::error::InsufficientFunds;

pub type AtmResult = std::result::Result<(), InsufficientFunds>;

/// Stateless controller for deposits, withdrawals and transfers.
///
/// Every check runs before any write, so a rejected call never leaves a
/// partially updated balance behind.
#[derive(Debug, Default, Clone, Copy)]
pub struct Atm;

impl Atm {
    pub fn new() -> Self {
        Self
    }

    pub fn deposit(&self, account: &mut Account, amount: i64) -> AtmResult {
        if let AccountKind::Limited { limit } = account.kind() {
            if !fits_under_limit(limit, account.balance(), amount) {
                tracing::warn!("Rejected deposit of {} to {}", amount, account);
                return Err(InsufficientFunds::DepositExceedsLimit);
            }
        }

        // no lower bound: a negative amount reduces the balance
        let new_balance = account.balance().checked_add(amount).ok_or_else(|| {
            tracing::warn!("Rejected deposit of {} to {}: overflow", amount, account);
            InsufficientFunds::BalanceOverflow
        })?;

        tracing::debug!("Depositing {} to {}", amount, account);
        account.set_balance(new_balance);
        tracing::debug!("New account balance: {}", account);
        Ok(())
    }

    /// Withdrawing the exact balance is allowed.
    pub fn withdraw(&self, account: &mut Account, amount: i64) -> AtmResult {
        if amount > account.balance() {
            tracing::warn!("Rejected withdrawal of {} from {}", amount, account);
            return Err(InsufficientFunds::WithdrawExceedsBalance);
        }

        let new_balance = account.balance().checked_sub(amount).ok_or_else(|| {
            tracing::warn!("Rejected withdrawal of {} from {}: overflow", amount, account);
            InsufficientFunds::BalanceOverflow
        })?;

        tracing::debug!("Withdrawing {} from {}", amount, account);
        account.set_balance(new_balance);
        tracing::debug!("New account balance: {}", account);
        Ok(())
    }

    /// Moves `amount` from `source` to `target`.
    ///
    /// Unlike [`Atm::withdraw`], the amount must be strictly below the source
    /// balance; transferring the exact balance is rejected.
    pub fn transfer(&self, source: &mut Account, target: &mut Account, amount: i64) -> AtmResult {
        if amount >= source.balance() {
            tracing::warn!("Rejected transfer of {} from {}", amount, source);
            return Err(InsufficientFunds::TransferExceedsBalance);
        }

        if let AccountKind::Limited { limit } = target.kind() {
            if !fits_under_limit(limit, target.balance(), amount) {
                tracing::warn!("Rejected transfer of {} to {}", amount, target);
                return Err(InsufficientFunds::TargetCannotHold);
            }
        }

        // both legs must be representable before the first one is written
        if source.balance().checked_sub(amount).is_none()
            || target.balance().checked_add(amount).is_none()
        {
            tracing::warn!(
                "Rejected transfer of {} from {} to {}: overflow",
                amount,
                source,
                target
            );
            return Err(InsufficientFunds::BalanceOverflow);
        }

        tracing::debug!("Transferring {} from {} to {}", amount, source, target);
        self.withdraw(source, amount)?;
        self.deposit(target, amount)?;
        tracing::info!("Transfer of {} completed", amount);
        Ok(())
    }
}

/// `amount <= limit - balance`, evaluated without overflow.
fn fits_under_limit(limit: i64, balance: i64, amount: i64) -> bool {
    i128::from(amount) <= i128::from(limit) - i128::from(balance)
}

use serde::{Deserialize, Serialize};
use std::fmt;

/// Whether an account caps its balance on deposit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AccountKind {
    Plain,
    Limited { limit: i64 },
}

/// A single account. Business rules live in [`crate::core::atm::Atm`];
/// the holder itself never validates anything.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    owner: String,
    balance: i64,
    account_type: String,
    #[serde(flatten)]
    kind: AccountKind,
}

impl Account {
    pub fn new(owner: impl Into<String>, balance: i64, account_type: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            balance,
            account_type: account_type.into(),
            kind: AccountKind::Plain,
        }
    }

    pub fn limited(
        owner: impl Into<String>,
        balance: i64,
        account_type: impl Into<String>,
        limit: i64,
    ) -> Self {
        Self {
            owner: owner.into(),
            balance,
            account_type: account_type.into(),
            kind: AccountKind::Limited { limit },
        }
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn balance(&self) -> i64 {
        self.balance
    }

    pub fn set_balance(&mut self, balance: i64) {
        self.balance = balance;
    }

    pub fn account_type(&self) -> &str {
        &self.account_type
    }

    pub fn kind(&self) -> AccountKind {
        self.kind
    }

    pub fn is_limited(&self) -> bool {
        matches!(self.kind, AccountKind::Limited { .. })
    }

    pub fn limit(&self) -> Option<i64> {
        match self.kind {
            AccountKind::Limited { limit } => Some(limit),
            AccountKind::Plain => None,
        }
    }

    /// Replaces the ceiling of a limited account and returns the previous one.
    /// Plain accounts are left untouched and yield `None`.
    pub fn set_limit(&mut self, new_limit: i64) -> Option<i64> {
        match &mut self.kind {
            AccountKind::Limited { limit } => Some(std::mem::replace(limit, new_limit)),
            AccountKind::Plain => None,
        }
    }

    /// `limit - balance` for a limited account, saturating at the `i64` bounds.
    pub fn headroom(&self) -> Option<i64> {
        self.limit().map(|limit| limit.saturating_sub(self.balance))
    }
}

impl fmt::Display for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            AccountKind::Plain => write!(
                f,
                "Account{{owner='{}', balance={}, accountType='{}'}}",
                self.owner, self.balance, self.account_type
            ),
            AccountKind::Limited { limit } => write!(
                f,
                "LimitedAccount{{owner='{}', balance={}, accountType='{}', limit={}}}",
                self.owner, self.balance, self.account_type, limit
            ),
        }
    }
}

/// One requested ATM call, addressed by account name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Operation {
    Deposit { account: String, amount: i64 },
    Withdraw { account: String, amount: i64 },
    Transfer {
        source: String,
        target: String,
        amount: i64,
    },
}

impl Operation {
    pub fn amount(&self) -> i64 {
        match self {
            Operation::Deposit { amount, .. }
            | Operation::Withdraw { amount, .. }
            | Operation::Transfer { amount, .. } => *amount,
        }
    }

    /// Account names this operation touches, source first.
    pub fn account_names(&self) -> Vec<&str> {
        match self {
            Operation::Deposit { account, .. } | Operation::Withdraw { account, .. } => {
                vec![account.as_str()]
            }
            Operation::Transfer { source, target, .. } => vec![source.as_str(), target.as_str()],
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::Deposit { account, amount } => write!(f, "deposit {} to {}", amount, account),
            Operation::Withdraw { account, amount } => {
                write!(f, "withdraw {} from {}", amount, account)
            }
            Operation::Transfer {
                source,
                target,
                amount,
            } => write!(f, "transfer {} from {} to {}", amount, source, target),
        }
    }
}

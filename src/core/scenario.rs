use crate::core::atm::{Atm, AtmResult};
use crate::domain::model::{Account, Operation};
use crate::domain::ports::ScenarioProvider;
use crate::utils::error::{BankError, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum OutcomeStatus {
    Applied,
    Rejected { message: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationOutcome {
    pub operation: Operation,
    #[serde(flatten)]
    pub status: OutcomeStatus,
}

impl OperationOutcome {
    pub fn is_applied(&self) -> bool {
        self.status == OutcomeStatus::Applied
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedAccount {
    pub name: String,
    #[serde(flatten)]
    pub account: Account,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioReport {
    pub name: String,
    pub outcomes: Vec<OperationOutcome>,
    pub accounts: Vec<NamedAccount>,
}

impl ScenarioReport {
    pub fn applied_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_applied()).count()
    }

    pub fn rejected_count(&self) -> usize {
        self.outcomes.len() - self.applied_count()
    }

    pub fn account(&self, name: &str) -> Option<&Account> {
        self.accounts
            .iter()
            .find(|named| named.name == name)
            .map(|named| &named.account)
    }
}

/// Applies a sequence of operations to a set of named accounts through [`Atm`].
///
/// A rejected operation is recorded and the run moves on; only a reference to
/// an undeclared account aborts it.
pub struct ScenarioRunner {
    name: String,
    atm: Atm,
    accounts: Vec<NamedAccount>,
}

impl ScenarioRunner {
    pub fn new(name: impl Into<String>, accounts: Vec<(String, Account)>) -> Self {
        Self {
            name: name.into(),
            atm: Atm::new(),
            accounts: accounts
                .into_iter()
                .map(|(name, account)| NamedAccount { name, account })
                .collect(),
        }
    }

    pub fn from_provider<P: ScenarioProvider>(provider: &P) -> Self {
        Self::new(provider.scenario_name(), provider.accounts())
    }

    pub fn account(&self, name: &str) -> Option<&Account> {
        self.accounts
            .iter()
            .find(|named| named.name == name)
            .map(|named| &named.account)
    }

    fn index_of(&self, name: &str) -> Result<usize> {
        self.accounts
            .iter()
            .position(|named| named.name == name)
            .ok_or_else(|| BankError::UnknownAccount {
                name: name.to_string(),
            })
    }

    pub fn apply(&mut self, operation: &Operation) -> Result<OperationOutcome> {
        let result = match operation {
            Operation::Deposit { account, amount } => {
                let idx = self.index_of(account)?;
                self.atm.deposit(&mut self.accounts[idx].account, *amount)
            }
            Operation::Withdraw { account, amount } => {
                let idx = self.index_of(account)?;
                self.atm.withdraw(&mut self.accounts[idx].account, *amount)
            }
            Operation::Transfer {
                source,
                target,
                amount,
            } => {
                let src = self.index_of(source)?;
                let dst = self.index_of(target)?;
                self.transfer_between(src, dst, *amount)?
            }
        };

        let status = match result {
            Ok(()) => OutcomeStatus::Applied,
            Err(reason) => OutcomeStatus::Rejected {
                message: reason.message(),
            },
        };

        Ok(OperationOutcome {
            operation: operation.clone(),
            status,
        })
    }

    fn transfer_between(&mut self, src: usize, dst: usize, amount: i64) -> Result<AtmResult> {
        if src == dst {
            return Err(BankError::InvalidConfigValueError {
                field: "operations.target".to_string(),
                value: self.accounts[dst].name.clone(),
                reason: "Transfer source and target must be different accounts".to_string(),
            });
        }

        let (source, target) = if src < dst {
            let (left, right) = self.accounts.split_at_mut(dst);
            (&mut left[src].account, &mut right[0].account)
        } else {
            let (left, right) = self.accounts.split_at_mut(src);
            (&mut right[0].account, &mut left[dst].account)
        };

        Ok(self.atm.transfer(source, target, amount))
    }

    pub fn run(mut self, operations: &[Operation]) -> Result<ScenarioReport> {
        tracing::info!(
            "Running scenario '{}' with {} operations over {} accounts",
            self.name,
            operations.len(),
            self.accounts.len()
        );

        let mut outcomes = Vec::with_capacity(operations.len());
        for (step, operation) in operations.iter().enumerate() {
            let outcome = self.apply(operation)?;
            match &outcome.status {
                OutcomeStatus::Applied => tracing::info!("#{} {} applied", step + 1, operation),
                OutcomeStatus::Rejected { message } => {
                    tracing::warn!("#{} {} rejected: {}", step + 1, operation, message)
                }
            }
            outcomes.push(outcome);
        }

        let report = ScenarioReport {
            name: self.name,
            outcomes,
            accounts: self.accounts,
        };
        tracing::info!(
            "Scenario finished: {} applied, {} rejected",
            report.applied_count(),
            report.rejected_count()
        );
        Ok(report)
    }
}

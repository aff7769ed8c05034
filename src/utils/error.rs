use thiserror::Error;

/// Rejection of a single ATM operation. Each variant renders the fixed
/// message for the rule that was violated.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsufficientFunds {
    #[error("Cannot deposit more than your account can hold")]
    DepositExceedsLimit,

    #[error("Cannot withdraw more money than you have")]
    WithdrawExceedsBalance,

    #[error("Can't transfer more money than your balance")]
    TransferExceedsBalance,

    #[error("Target account can't hold that amount")]
    TargetCannotHold,

    #[error("Amount would overflow the account balance")]
    BalanceOverflow,
}

impl InsufficientFunds {
    pub fn message(&self) -> String {
        self.to_string()
    }
}

#[derive(Error, Debug)]
pub enum BankError {
    #[error("Insufficient funds: {0}")]
    InsufficientFunds(#[from] InsufficientFunds),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Configuration parse error: {message}")]
    ConfigParseError { message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Unknown account: {name}")]
    UnknownAccount { name: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Operation,
    Configuration,
    System,
}

impl BankError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            BankError::InsufficientFunds(_) | BankError::UnknownAccount { .. } => {
                ErrorCategory::Operation
            }
            BankError::ConfigParseError { .. }
            | BankError::InvalidConfigValueError { .. }
            | BankError::MissingConfigError { .. } => ErrorCategory::Configuration,
            BankError::IoError(_) | BankError::SerializationError(_) | BankError::CsvError(_) => {
                ErrorCategory::System
            }
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            BankError::InsufficientFunds(InsufficientFunds::BalanceOverflow) => {
                "Keep amounts and balances within the signed 64-bit range"
            }
            BankError::InsufficientFunds(_) => "Retry the operation with a smaller amount",
            BankError::UnknownAccount { .. } => {
                "Check that every operation names an account declared under [[accounts]]"
            }
            BankError::ConfigParseError { .. } => "Make sure the scenario file is valid TOML",
            BankError::InvalidConfigValueError { .. } | BankError::MissingConfigError { .. } => {
                "Fix the highlighted field in the scenario file"
            }
            BankError::IoError(_) => "Check that the path exists and is writable",
            BankError::SerializationError(_) | BankError::CsvError(_) => {
                "Try a different report format"
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            BankError::InsufficientFunds(reason) => reason.message(),
            BankError::InvalidConfigValueError { field, reason, .. } => {
                format!("Scenario field '{}' is invalid: {}", field, reason)
            }
            BankError::MissingConfigError { field } => {
                format!("Scenario is missing '{}'", field)
            }
            other => other.to_string(),
        }
    }

    pub fn exit_code(&self) -> i32 {
        match self.category() {
            ErrorCategory::Operation => 2,
            ErrorCategory::Configuration => 1,
            ErrorCategory::System => 3,
        }
    }
}

pub type Result<T> = std::result::Result<T, BankError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insufficient_funds_messages() {
        assert_eq!(
            InsufficientFunds::DepositExceedsLimit.message(),
            "Cannot deposit more than your account can hold"
        );
        assert_eq!(
            InsufficientFunds::WithdrawExceedsBalance.message(),
            "Cannot withdraw more money than you have"
        );
        assert_eq!(
            InsufficientFunds::TransferExceedsBalance.message(),
            "Can't transfer more money than your balance"
        );
        assert_eq!(
            InsufficientFunds::TargetCannotHold.message(),
            "Target account can't hold that amount"
        );
        assert_eq!(
            InsufficientFunds::BalanceOverflow.message(),
            "Amount would overflow the account balance"
        );
    }

    #[test]
    fn test_error_category_and_exit_code() {
        let err = BankError::from(InsufficientFunds::TargetCannotHold);
        assert_eq!(err.category(), ErrorCategory::Operation);
        assert_eq!(err.exit_code(), 2);
        assert_eq!(err.user_friendly_message(), "Target account can't hold that amount");

        let err = BankError::MissingConfigError {
            field: "accounts".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Configuration);
        assert_eq!(err.exit_code(), 1);
    }
}

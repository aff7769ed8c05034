pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use config::scenario_config::ScenarioConfig;
pub use self::core::{
    atm::{Atm, AtmResult},
    report::{render_report, write_report, ReportFormat},
    scenario::{OperationOutcome, OutcomeStatus, ScenarioReport, ScenarioRunner},
};
pub use domain::model::{Account, AccountKind, Operation};
pub use utils::error::{BankError, InsufficientFunds, Result};

pub mod atm;
pub mod report;
pub mod scenario;

pub use crate::domain::model::{Account, AccountKind, Operation};
pub use crate::domain::ports::ScenarioProvider;
pub use crate::utils::error::Result;

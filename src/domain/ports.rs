use crate::domain::model::{Account, Operation};

/// Anything that can describe a scenario: a set of named accounts and the
/// operations to apply to them, in order.
pub trait ScenarioProvider {
    fn scenario_name(&self) -> &str;
    fn accounts(&self) -> Vec<(String, Account)>;
    fn operations(&self) -> &[Operation];
}

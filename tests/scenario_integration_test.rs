use anyhow::Result;
use small_bank::core::ScenarioProvider;
use small_bank::utils::validation::Validate;
use small_bank::{
    render_report, write_report, BankError, OutcomeStatus, ReportFormat, ScenarioConfig,
    ScenarioRunner,
};
use tempfile::TempDir;

const SCENARIO: &str = r#"
[scenario]
name = "atm-walkthrough"
description = "The seven reference scenarios, chained"

[[accounts]]
name = "regular"
owner = "vasouv"
balance = 1000
account_type = "regular"

[[accounts]]
name = "limited"
owner = "mixos"
balance = 300
account_type = "limit"
limit = 500

[[accounts]]
name = "source"
owner = "chris"
balance = 2000
account_type = "regular"

[[accounts]]
name = "target"
owner = "geo"
balance = 5000
account_type = "regular"

[[operations]]
type = "deposit"
account = "regular"
amount = 0

[[operations]]
type = "deposit"
account = "limited"
amount = 500

[[operations]]
type = "deposit"
account = "limited"
amount = 200

[[operations]]
type = "withdraw"
account = "regular"
amount = 1200

[[operations]]
type = "withdraw"
account = "regular"
amount = 1000

[[operations]]
type = "transfer"
source = "source"
target = "target"
amount = 2350

[[operations]]
type = "transfer"
source = "source"
target = "target"
amount = 350
"#;

#[test]
fn test_run_reference_scenarios_from_toml() -> Result<()> {
    let config = ScenarioConfig::from_toml_str(SCENARIO)?;
    config.validate()?;

    let report = ScenarioRunner::from_provider(&config).run(config.operations())?;

    assert_eq!(report.name, "atm-walkthrough");
    assert_eq!(report.applied_count(), 4);
    assert_eq!(report.rejected_count(), 3);

    let messages: Vec<Option<&str>> = report
        .outcomes
        .iter()
        .map(|o| match &o.status {
            OutcomeStatus::Applied => None,
            OutcomeStatus::Rejected { message } => Some(message.as_str()),
        })
        .collect();
    assert_eq!(
        messages,
        vec![
            None,
            Some("Cannot deposit more than your account can hold"),
            None,
            Some("Cannot withdraw more money than you have"),
            None,
            Some("Can't transfer more money than your balance"),
            None,
        ]
    );

    assert_eq!(report.account("regular").unwrap().balance(), 0);
    assert_eq!(report.account("limited").unwrap().balance(), 500);
    assert_eq!(report.account("source").unwrap().balance(), 1650);
    assert_eq!(report.account("target").unwrap().balance(), 5350);
    Ok(())
}

#[test]
fn test_transfer_into_full_limited_account() -> Result<()> {
    let toml_content = r#"
[scenario]
name = "full-target"

[[accounts]]
name = "source"
owner = "chris"
balance = 2000
account_type = "regular"

[[accounts]]
name = "limited"
owner = "mixos"
balance = 500
account_type = "limit"
limit = 500

[[operations]]
type = "transfer"
source = "source"
target = "limited"
amount = 1
"#;
    let config = ScenarioConfig::from_toml_str(toml_content)?;
    let report = ScenarioRunner::from_provider(&config).run(config.operations())?;

    assert_eq!(
        report.outcomes[0].status,
        OutcomeStatus::Rejected {
            message: "Target account can't hold that amount".to_string()
        }
    );
    assert_eq!(report.account("source").unwrap().balance(), 2000);
    assert_eq!(report.account("limited").unwrap().balance(), 500);
    Ok(())
}

#[test]
fn test_scenario_file_and_report_on_disk() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let scenario_path = temp_dir.path().join("scenario.toml");
    std::fs::write(&scenario_path, SCENARIO)?;

    let config = ScenarioConfig::from_file(&scenario_path)?;
    let report = ScenarioRunner::from_provider(&config).run(config.operations())?;

    let report_path = temp_dir.path().join("out").join("balances.csv");
    write_report(&report_path, &render_report(&report, ReportFormat::Csv)?)?;

    let csv_content = std::fs::read_to_string(&report_path)?;
    assert!(csv_content.starts_with("name,owner,account_type,balance,limit"));
    assert!(csv_content.contains("limited,mixos,limit,500,500"));
    assert!(csv_content.contains("source,chris,regular,1650,"));
    Ok(())
}

#[test]
fn test_missing_scenario_file() {
    let result = ScenarioConfig::from_file("/definitely/not/here.toml");
    assert!(matches!(result, Err(BankError::IoError(_))));
}

#[test]
fn test_demo_scenario_runs() -> Result<()> {
    let config = ScenarioConfig::demo();
    let report = ScenarioRunner::from_provider(&config).run(config.operations())?;

    // deposit to the limit fills mixos, so the closing transfer is refused
    assert_eq!(report.applied_count(), 2);
    assert_eq!(report.account("vasouv").unwrap().balance(), 750);
    assert_eq!(report.account("mixos").unwrap().balance(), 500);
    Ok(())
}

#[test]
fn test_max_amount_in_scenario_is_rejected_not_fatal() -> Result<()> {
    let toml_content = r#"
[scenario]
name = "overflow"

[[accounts]]
name = "regular"
owner = "vasouv"
balance = 1000
account_type = "regular"

[[accounts]]
name = "limited"
owner = "mixos"
balance = -10
account_type = "limit"
limit = 9223372036854775807

[[operations]]
type = "deposit"
account = "regular"
amount = 9223372036854775807

[[operations]]
type = "deposit"
account = "limited"
amount = 5
"#;
    let config = ScenarioConfig::from_toml_str(toml_content)?;
    config.validate()?;
    let report = ScenarioRunner::from_provider(&config).run(config.operations())?;

    assert_eq!(
        report.outcomes[0].status,
        OutcomeStatus::Rejected {
            message: "Amount would overflow the account balance".to_string()
        }
    );
    assert!(report.outcomes[1].is_applied());
    assert_eq!(report.account("regular").unwrap().balance(), 1000);
    assert_eq!(report.account("limited").unwrap().balance(), -5);
    Ok(())
}

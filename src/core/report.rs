use crate::core::scenario::{OutcomeStatus, ScenarioReport};
use crate::utils::error::{BankError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    #[default]
    Table,
    Json,
    Csv,
}

impl FromStr for ReportFormat {
    type Err = BankError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "table" => Ok(ReportFormat::Table),
            "json" => Ok(ReportFormat::Json),
            "csv" => Ok(ReportFormat::Csv),
            other => Err(BankError::InvalidConfigValueError {
                field: "report.format".to_string(),
                value: other.to_string(),
                reason: "Unsupported format. Valid formats: table, json, csv".to_string(),
            }),
        }
    }
}

#[derive(Debug, Serialize)]
struct BalanceRow<'a> {
    name: &'a str,
    owner: &'a str,
    account_type: &'a str,
    balance: i64,
    limit: Option<i64>,
}

pub fn render_report(report: &ScenarioReport, format: ReportFormat) -> Result<String> {
    match format {
        ReportFormat::Table => Ok(report.to_string()),
        ReportFormat::Json => Ok(serde_json::to_string_pretty(report)?),
        ReportFormat::Csv => render_csv(report),
    }
}

impl fmt::Display for ScenarioReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Scenario: {}", self.name)?;
        for (step, outcome) in self.outcomes.iter().enumerate() {
            match &outcome.status {
                OutcomeStatus::Applied => {
                    writeln!(f, "  #{} {} -> ok", step + 1, outcome.operation)?
                }
                OutcomeStatus::Rejected { message } => writeln!(
                    f,
                    "  #{} {} -> rejected: {}",
                    step + 1,
                    outcome.operation,
                    message
                )?,
            }
        }
        writeln!(
            f,
            "Applied: {}, Rejected: {}",
            self.applied_count(),
            self.rejected_count()
        )?;
        writeln!(f, "Accounts:")?;
        for named in &self.accounts {
            writeln!(f, "  {}: {}", named.name, named.account)?;
        }
        Ok(())
    }
}

fn render_csv(report: &ScenarioReport) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for named in &report.accounts {
        writer.serialize(BalanceRow {
            name: &named.name,
            owner: named.account.owner(),
            account_type: named.account.account_type(),
            balance: named.account.balance(),
            limit: named.account.limit(),
        })?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| BankError::IoError(e.into_error()))?;
    String::from_utf8(bytes).map_err(|e| BankError::InvalidConfigValueError {
        field: "report".to_string(),
        value: String::new(),
        reason: format!("CSV output is not valid UTF-8: {}", e),
    })
}

pub fn write_report<P: AsRef<Path>>(path: P, contents: &str) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(path, contents)?;
    tracing::debug!("Report written to {}", path.display());
    Ok(())
}

use crate::core::report::ReportFormat;
use crate::domain::model::{Account, Operation};
use crate::domain::ports::ScenarioProvider;
use crate::utils::error::{BankError, Result};
use crate::utils::validation::{
    validate_non_empty_string, validate_path, validate_unique_names, Validate,
};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioConfig {
    pub scenario: ScenarioInfo,
    #[serde(default)]
    pub accounts: Vec<AccountConfig>,
    #[serde(default)]
    pub operations: Vec<Operation>,
    pub report: Option<ReportConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioInfo {
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountConfig {
    pub name: String,
    pub owner: String,
    pub balance: i64,
    pub account_type: String,
    pub limit: Option<i64>, // 有設定即為限額帳戶
}

impl AccountConfig {
    pub fn to_account(&self) -> Account {
        match self.limit {
            Some(limit) => Account::limited(&self.owner, self.balance, &self.account_type, limit),
            None => Account::new(&self.owner, self.balance, &self.account_type),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    pub format: Option<ReportFormat>,
    pub output_path: Option<String>,
}

impl ScenarioConfig {
    /// 從 TOML 檔案載入情境
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(BankError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析情境
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| BankError::ConfigParseError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${OPENING_BALANCE})，未設定的變數保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| BankError::ConfigParseError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// 內建示範情境：一個一般帳戶與一個限額帳戶
    pub fn demo() -> Self {
        Self {
            scenario: ScenarioInfo {
                name: "demo".to_string(),
                description: Some("A regular and a limited account".to_string()),
            },
            accounts: vec![
                AccountConfig {
                    name: "vasouv".to_string(),
                    owner: "vasouv".to_string(),
                    balance: 1000,
                    account_type: "regular".to_string(),
                    limit: None,
                },
                AccountConfig {
                    name: "mixos".to_string(),
                    owner: "mixos".to_string(),
                    balance: 300,
                    account_type: "limit".to_string(),
                    limit: Some(500),
                },
            ],
            operations: vec![
                Operation::Deposit {
                    account: "mixos".to_string(),
                    amount: 200,
                },
                Operation::Withdraw {
                    account: "vasouv".to_string(),
                    amount: 250,
                },
                Operation::Transfer {
                    source: "vasouv".to_string(),
                    target: "mixos".to_string(),
                    amount: 100,
                },
            ],
            report: None,
        }
    }

    pub fn report_format(&self) -> Option<ReportFormat> {
        self.report.as_ref().and_then(|r| r.format)
    }

    pub fn report_output_path(&self) -> Option<&str> {
        self.report.as_ref().and_then(|r| r.output_path.as_deref())
    }

    /// 驗證情境的合理性
    pub fn validate_config(&self) -> Result<()> {
        validate_non_empty_string("scenario.name", &self.scenario.name)?;

        if self.accounts.is_empty() {
            return Err(BankError::MissingConfigError {
                field: "accounts".to_string(),
            });
        }

        for account in &self.accounts {
            validate_non_empty_string("accounts.name", &account.name)?;
            validate_non_empty_string("accounts.owner", &account.owner)?;
            if let Some(limit) = account.limit {
                if account.balance > limit {
                    // 直接設定的餘額不受限額約束，只提示
                    tracing::warn!(
                        "Account '{}' starts above its limit ({} > {})",
                        account.name,
                        account.balance,
                        limit
                    );
                }
            }
        }
        validate_unique_names("accounts.name", self.accounts.iter().map(|a| a.name.as_str()))?;

        let known: HashSet<&str> = self.accounts.iter().map(|a| a.name.as_str()).collect();
        for operation in &self.operations {
            for name in operation.account_names() {
                if !known.contains(name) {
                    return Err(BankError::UnknownAccount {
                        name: name.to_string(),
                    });
                }
            }
            if let Operation::Transfer { source, target, .. } = operation {
                if source == target {
                    return Err(BankError::InvalidConfigValueError {
                        field: "operations.target".to_string(),
                        value: target.clone(),
                        reason: "Transfer source and target must be different accounts"
                            .to_string(),
                    });
                }
            }
        }

        if let Some(path) = self.report_output_path() {
            validate_path("report.output_path", path)?;
        }

        Ok(())
    }
}

impl ScenarioProvider for ScenarioConfig {
    fn scenario_name(&self) -> &str {
        &self.scenario.name
    }

    fn accounts(&self) -> Vec<(String, Account)> {
        self.accounts
            .iter()
            .map(|a| (a.name.clone(), a.to_account()))
            .collect()
    }

    fn operations(&self) -> &[Operation] {
        &self.operations
    }
}

impl Validate for ScenarioConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

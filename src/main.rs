use anyhow::Context;
use clap::Parser;
use small_bank::core::ScenarioProvider;
use small_bank::utils::{logger, validation::Validate};
use small_bank::{
    render_report, write_report, BankError, CliConfig, ReportFormat, ScenarioConfig,
    ScenarioRunner,
};

fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    // 初始化日誌
    if config.json_logs {
        logger::init_json_logger(config.verbose);
    } else {
        logger::init_cli_logger(config.verbose);
    }

    tracing::info!("🏦 Starting small-bank");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    if let Err(err) = run(&config) {
        // 依錯誤類別決定退出碼
        let Some(e) = err.downcast_ref::<BankError>() else {
            return Err(err);
        };
        tracing::error!("❌ {:#} (Category: {:?})", err, e.category());
        tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());
        std::process::exit(e.exit_code());
    }

    Ok(())
}

fn run(config: &CliConfig) -> anyhow::Result<()> {
    // 載入情境，未指定時使用內建示範
    let scenario = match &config.scenario {
        Some(path) => {
            tracing::info!("📁 Loading scenario from: {}", path);
            ScenarioConfig::from_file(path)
                .with_context(|| format!("Failed to load scenario '{}'", path))?
        }
        None => {
            tracing::info!("📁 No scenario given, running the built-in demo");
            ScenarioConfig::demo()
        }
    };

    // 驗證情境
    scenario.validate()?;
    tracing::info!(
        "✅ Scenario '{}' validated: {} accounts, {} operations",
        scenario.scenario_name(),
        scenario.accounts.len(),
        scenario.operations.len()
    );

    if config.dry_run {
        tracing::info!("🔍 DRY RUN MODE - no operation will be applied");
        print_plan(&scenario);
        return Ok(());
    }

    let report = ScenarioRunner::from_provider(&scenario).run(scenario.operations())?;

    let format = config
        .format
        .or_else(|| scenario.report_format())
        .unwrap_or(ReportFormat::Table);
    let rendered = render_report(&report, format)?;

    match config
        .output
        .as_deref()
        .or_else(|| scenario.report_output_path())
    {
        Some(path) => {
            write_report(path, &rendered)
                .with_context(|| format!("Failed to write report to '{}'", path))?;
            tracing::info!("📁 Report saved to: {}", path);
            println!("📁 Report saved to: {}", path);
        }
        None => print!("{}", rendered),
    }

    Ok(())
}

fn print_plan(scenario: &ScenarioConfig) {
    println!("Scenario: {}", scenario.scenario_name());
    if let Some(description) = &scenario.scenario.description {
        println!("  {}", description);
    }
    println!("Accounts:");
    for (name, account) in scenario.accounts() {
        println!("  {}: {}", name, account);
    }
    println!("Operations:");
    for (step, operation) in scenario.operations().iter().enumerate() {
        println!("  #{} {}", step + 1, operation);
    }
}

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Scenario progress only.
const DEFAULT_DIRECTIVES: &str = "small_bank=info";
/// Every balance mutation from the ATM and runner, plus warnings from dependencies.
const VERBOSE_DIRECTIVES: &str = "small_bank::core=trace,small_bank=debug,warn";

fn directives(verbose: bool) -> &'static str {
    if verbose {
        VERBOSE_DIRECTIVES
    } else {
        DEFAULT_DIRECTIVES
    }
}

/// `RUST_LOG` wins over the built-in directives when it is set.
fn env_filter(verbose: bool) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directives(verbose)))
}

pub fn init_cli_logger(verbose: bool) {
    let layer = tracing_subscriber::fmt::layer()
        .with_target(verbose)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .without_time()
        .compact();

    tracing_subscriber::registry()
        .with(env_filter(verbose))
        .with(layer)
        .init();
}

// 機器可讀格式，每筆事件一行 JSON
pub fn init_json_logger(verbose: bool) {
    let layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_file(verbose)
        .with_line_number(verbose)
        .json()
        .flatten_event(true)
        .with_current_span(false)
        .with_span_list(false);

    tracing_subscriber::registry()
        .with(env_filter(verbose))
        .with(layer)
        .init();
}

// hoopcap entry point.
//
// Run sequence:
// 1. Initialize tracing (stderr; stdout carries the summary)
// 2. Load config (optional hoopcap.toml in the working directory)
// 3. Run the pipeline: load, resolve columns, select season, join, write
// 4. Print the console summary

use hoopcap_core::config;
use hoopcap_core::pipeline;

use anyhow::Context;
use tracing::info;

fn main() -> anyhow::Result<()> {
    // 1. Initialize tracing
    init_tracing()?;

    // 2. Load config
    let config = config::load_config().context("failed to load configuration")?;
    info!(
        "Config loaded: salaries={}, stats={}",
        config.salaries.display(),
        config.stats.display()
    );

    // 3. Run the pipeline
    let summary = pipeline::run(&config).context("salary/performance join failed")?;

    // 4. Console summary
    for line in summary.report_lines() {
        println!("{line}");
    }

    Ok(())
}

/// Initialize tracing to stderr so the console summary on stdout stays clean.
fn init_tracing() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("hoopcap_core=info,hoopcap=info,warn")),
        )
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_line_number(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;

    Ok(())
}

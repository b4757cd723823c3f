use std::process::ExitCode;
use std::sync::Arc;
use std::time::{Duration, Instant};

use awsinv_common::config::Config;
use awsinv_core::{LoadSummary, Loader, Service};
use awsinv_providers::AwsClients;
use colored::*;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::commands::CollectArgs;
use crate::output::CsvSink;
use crate::terminal::{colors, print, spinner};

pub async fn collect(args: CollectArgs) -> anyhow::Result<ExitCode> {
    let config = config_from(&args);
    let cancel = CancellationToken::new();
    watch_for_interrupt(cancel.clone());

    let clients = AwsClients::from_env().await;
    let loader = Loader::new(Arc::new(clients))
        .with_config(config)
        .with_cancellation(cancel.clone());

    let sink = CsvSink::new(args.output_file.clone(), args.sort);

    let services = if args.services.is_empty() {
        Service::ALL.len()
    } else {
        args.services.len()
    };
    spinner::start(services, args.regions.len());
    let start_time = Instant::now();
    let summary = match loader
        .load(&args.regions, &args.services, Some(Box::new(sink)))
        .await
    {
        Ok(summary) => summary,
        // Already logged by the loader.
        Err(_) => return Ok(ExitCode::FAILURE),
    };
    spinner::progress().finish_and_clear();

    print_summary(&summary, &args, start_time.elapsed(), cancel.is_cancelled());
    Ok(ExitCode::SUCCESS)
}

fn config_from(args: &CollectArgs) -> Config {
    let defaults = Config::default();
    Config {
        describe_concurrency: args.concurrency.unwrap_or(defaults.describe_concurrency),
        collector_timeout: args.timeout.map(Duration::from_secs),
        ..defaults
    }
}

fn watch_for_interrupt(cancel: CancellationToken) {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("interrupted, stopping collectors");
            cancel.cancel();
        }
    });
}

fn print_summary(summary: &LoadSummary, args: &CollectArgs, elapsed: Duration, interrupted: bool) {
    info!("wrote {} rows to {}", summary.rows, args.output_file.display());

    print::header("summary");
    let failures = if summary.failures > 0 {
        summary.failures.to_string().red().bold()
    } else {
        print::plain(summary.failures)
    };
    let mut lines = vec![
        ("Collectors", print::plain(summary.collectors)),
        ("Assets", summary.rows.to_string().color(colors::PRIMARY)),
        ("Failures", failures),
    ];
    if summary.sink_failures > 0 {
        lines.push(("Sink errors", summary.sink_failures.to_string().red().bold()));
    }
    lines.push(("Output", print::plain(args.output_file.display())));
    print::key_values(&lines);

    let assets: ColoredString = format!("{} assets", summary.rows).bold().green();
    let total_time: ColoredString = format!("{:.2}s", elapsed.as_secs_f64()).bold().yellow();
    let verb = if interrupted { "Interrupted" } else { "Collection Complete" };
    let output = format!("{verb}: {assets} collected in {total_time}").color(colors::TEXT_DEFAULT);

    print::fat_separator();
    print::centerln(&output.to_string());
}

//! Inverter sizer entry point: CLI wiring, config loading and output.

mod cli;

use std::io;
use std::path::Path;

use anyhow::{Context, Result, bail};
use clap::Parser;
use tracing::info;

use inverter_sizer::catalog::Catalog;
use inverter_sizer::config::{AppConfig, SelectionConfig};
use inverter_sizer::engine::{Evaluation, evaluate};
use inverter_sizer::io::export::export_csv;
use inverter_sizer::rules::RuleSet;
use inverter_sizer::selection::Selection;

use cli::{Args, OutputFormat, SelectionSource};

fn main() -> Result<()> {
    // Logs go to stderr so stdout stays clean for reports
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                tracing_subscriber::EnvFilter::new("inverter_sizer=info,tower_http=info,warn")
            }),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    let config = load_config(args.config.as_deref())?;
    let policy = config.sizing.policy();
    let catalog = Catalog::builtin();
    let rules = RuleSet::builtin();

    let (selection, label) = load_selection(&args.selection_source(), catalog, rules)?;
    info!(source = %label, "Selection loaded");

    #[cfg(feature = "tui")]
    if args.tui {
        let app = inverter_sizer::tui::App::new(selection, &label, policy);
        return inverter_sizer::tui::run(app).context("TUI failed");
    }

    let evaluation = evaluate(&selection, catalog, rules, &policy);
    print_report(&evaluation, args.format)?;

    if let Some(ref path) = args.report_out {
        export_csv(&evaluation.lines, &evaluation.totals, path)
            .with_context(|| format!("failed to write CSV to {}", path.display()))?;
        info!(path = %path.display(), "Load breakdown written");
    }

    #[cfg(feature = "api")]
    if args.serve {
        serve(&config, policy, args.port)?;
    }

    Ok(())
}

/// Reads and validates the app config; defaults when no path is given.
fn load_config(path: Option<&Path>) -> Result<AppConfig> {
    let config = match path {
        Some(path) => AppConfig::from_toml_file(path)?,
        None => AppConfig::default(),
    };
    let errors = config.validate();
    if !errors.is_empty() {
        for e in &errors {
            eprintln!("{e}");
        }
        bail!("invalid configuration ({} errors)", errors.len());
    }
    Ok(config)
}

fn load_selection(
    source: &SelectionSource,
    catalog: &Catalog,
    rules: &RuleSet,
) -> Result<(Selection, String)> {
    let (cfg, label) = match source {
        SelectionSource::File(path) => (
            SelectionConfig::from_toml_file(path)?,
            path.display().to_string(),
        ),
        SelectionSource::Preset(name) => (SelectionConfig::from_preset(name)?, name.clone()),
    };
    let selection = cfg
        .build(catalog, rules)
        .with_context(|| format!("invalid selection \"{label}\""))?;
    Ok((selection, label))
}

fn print_report(evaluation: &Evaluation, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Text => println!("{evaluation}"),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(evaluation)?),
    }
    Ok(())
}

#[cfg(feature = "api")]
fn serve(
    config: &AppConfig,
    policy: inverter_sizer::engine::SizingPolicy,
    port: Option<u16>,
) -> Result<()> {
    use std::net::SocketAddr;
    use std::sync::Arc;

    use inverter_sizer::api::{self, AppState};
    use inverter_sizer::notify::ResendMailer;

    let mailer = ResendMailer::from_config(&config.notify)?;
    let state = Arc::new(AppState {
        catalog: Catalog::builtin().clone(),
        rules: RuleSet::builtin().clone(),
        policy,
        notify: config.notify.clone(),
        mailer: Arc::new(mailer),
    });
    let addr = SocketAddr::from(([0, 0, 0, 0], port.unwrap_or(config.server.port)));
    let rt = tokio::runtime::Runtime::new().context("failed to create tokio runtime")?;
    rt.block_on(api::serve(state, addr))
        .with_context(|| format!("API server on {addr} failed"))
}

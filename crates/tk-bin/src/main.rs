//! tuikit demo entrypoint.
mod demos;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use core_config::Config;
use core_terminal::{CrosstermBackend, Terminal};
use std::path::{Path, PathBuf};
use std::sync::Once;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;

const LOG_FILE: &str = "tuikit.log";

/// CLI arguments.
#[derive(Parser, Debug)]
#[command(name = "tuikit", version, about = "Terminal widget toolkit demo")]
struct Args {
    /// Optional configuration file path (overrides discovery of `tuikit.toml`).
    #[arg(long = "config")]
    config: Option<PathBuf>,
    /// Widget demo to run.
    #[arg(long = "demo", value_enum, default_value_t = Demo::All)]
    demo: Demo,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Demo {
    Table,
    Select,
    Multi,
    Form,
    All,
}

impl Demo {
    fn steps(self) -> &'static [Demo] {
        match self {
            Demo::Table => &[Demo::Table],
            Demo::Select => &[Demo::Select],
            Demo::Multi => &[Demo::Multi],
            Demo::Form => &[Demo::Form],
            Demo::All => &[Demo::Table, Demo::Select, Demo::Multi, Demo::Form],
        }
    }
}

fn configure_logging() -> Option<WorkerGuard> {
    let log_dir = Path::new(".");
    let log_path = log_dir.join(LOG_FILE);
    if log_path.exists() {
        let _ = std::fs::remove_file(&log_path);
    }

    let file_appender = tracing_appender::rolling::never(log_dir, LOG_FILE);
    let (nb_writer, guard) = tracing_appender::non_blocking(file_appender);
    match tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_ansi(false)
        .with_writer(nb_writer)
        .try_init()
    {
        Ok(_) => Some(guard),
        // Global subscriber already installed; dropping the guard stops the writer.
        Err(_) => None,
    }
}

fn install_panic_hook() {
    static HOOK: Once = Once::new();
    HOOK.call_once(|| {
        let default_panic = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            tracing::error!(target: "runtime.panic", ?info, "panic");
            default_panic(info);
        }));
    });
}

fn run_demos(demo: Demo, config: &Config, term: &Terminal) -> Result<Vec<String>> {
    let mut summaries = Vec::new();
    for step in demo.steps() {
        info!(target: "runtime", demo = ?step, "demo_started");
        let summary = match step {
            Demo::Table => demos::table(term)?,
            Demo::Select => demos::select(term, config, false)?,
            Demo::Multi => demos::select(term, config, true)?,
            Demo::Form => demos::form(term, config)?,
            Demo::All => continue,
        };
        summaries.push(summary);
    }
    Ok(summaries)
}

fn main() -> Result<()> {
    let args = Args::parse();
    let _log_guard = configure_logging();
    install_panic_hook();
    info!(target: "runtime", demo = ?args.demo, "startup");

    let config = core_config::load_from(args.config.clone())?;

    let mut backend = CrosstermBackend::new();
    backend.set_title("tuikit")?;
    backend.enter().context("failed to enter raw mode")?;
    let term = Terminal::new(backend);
    let result = run_demos(args.demo, &config, &term);
    // Last handle: the backend leaves the alternate screen here.
    drop(term);

    for line in result? {
        println!("{line}");
    }
    info!(target: "runtime", "shutdown");
    Ok(())
}

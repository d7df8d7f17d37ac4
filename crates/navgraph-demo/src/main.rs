#![forbid(unsafe_code)]

//! Navgraph demo binary entry point.

use std::io::Read;
use std::path::Path;
use std::process;

use navgraph::BridgeConfig;
use navgraph_demo::cli::{self, Opts};
use navgraph_demo::runner::{self, Runner};
use navgraph_demo::script::{self, Line};
use tracing_subscriber::EnvFilter;

fn main() {
    let opts = cli::Opts::parse();
    init_logging();

    let source = match load_script(opts.script.as_deref()) {
        Ok(source) => source,
        Err(e) => {
            eprintln!("Failed to read script: {e}");
            process::exit(1);
        }
    };
    let lines = match script::parse(&source) {
        Ok(lines) => lines,
        Err(e) => {
            eprintln!("Script error: {e}");
            process::exit(2);
        }
    };

    if let Err(e) = run(&opts, &lines) {
        eprintln!("Runtime error: {e}");
        process::exit(1);
    }
}

fn run(opts: &Opts, lines: &[Line]) -> navgraph::Result<()> {
    let bridge = BridgeConfig::from_env()?;
    let config =
        runner::context_config(bridge, opts.tab, opts.exit_window_ms, opts.auto_hide_nav);
    let mut runner = Runner::new(config)?;
    if !opts.json
        && let Some(frame) = runner.take_frame()
    {
        println!("  0  (mount)\n     {frame}");
    }

    let reports = runner.run(lines)?;
    for report in &reports {
        if opts.json {
            let json = serde_json::to_string(report).map_err(std::io::Error::other)?;
            println!("{json}");
        } else {
            println!("{}", runner::format_report(report));
        }
    }
    tracing::info!(
        commands = reports.len(),
        stats = ?runner.shell().context().engine().stats(),
        "script finished"
    );
    Ok(())
}

fn init_logging() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("navgraph=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_script(path: Option<&Path>) -> std::io::Result<String> {
    match path {
        None => Ok(runner::DEFAULT_TOUR.to_string()),
        Some(p) if p == Path::new("-") => {
            let mut source = String::new();
            std::io::stdin().read_to_string(&mut source)?;
            Ok(source)
        }
        Some(p) => std::fs::read_to_string(p),
    }
}

//! Queue command shell.
//!
//! Reads queue commands (one per line) from a script file or stdin and
//! prints the queue state after each mutating command. Run `help` inside the
//! shell for the command list.
//!
//! Diagnostics go to stderr through `tracing`; set `RUST_LOG` (for example
//! `RUST_LOG=strqueue=debug`) to see per-command events.
//!
//! # Output Format
//!
//! A summary is written to stderr upon completion: `commands=N errors=N`
//!
//! # Exit Codes
//!
//! - `0`: Every command succeeded
//! - `1`: At least one command failed
//! - `2`: Invalid arguments, configuration error, or unreadable input

use std::env;
use std::ffi::OsStr;
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use strqueue::{Shell, ShellConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn print_usage(exe: &OsStr) {
    eprintln!(
        "usage: {} [OPTIONS]

OPTIONS:
    --file=<path>           Read commands from <path> (default: stdin)
    --buffer=<N>            Removal buffer size in bytes (default: 1024)
    --echo                  Echo each command before running it
    --help, -h              Show this help message",
        exe.to_string_lossy()
    );
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(io::stderr)
                .with_target(false)
                .compact(),
        )
        .init();
}

fn main() -> ExitCode {
    let mut args = env::args_os();
    let exe = args.next().unwrap_or_else(|| "qshell".into());
    let mut file: Option<PathBuf> = None;
    let mut config = ShellConfig::DEFAULT;

    for arg in args {
        let Some(flag) = arg.to_str() else {
            eprintln!("invalid argument: {}", arg.to_string_lossy());
            return ExitCode::from(2);
        };
        if let Some(value) = flag.strip_prefix("--file=") {
            file = Some(PathBuf::from(value));
            continue;
        }
        if let Some(value) = flag.strip_prefix("--buffer=") {
            match value.parse() {
                Ok(n) => config.buffer_capacity = n,
                Err(_) => {
                    eprintln!("invalid --buffer value: {}", value);
                    return ExitCode::from(2);
                }
            }
            continue;
        }
        match flag {
            "--echo" => config.echo = true,
            "--help" | "-h" => {
                print_usage(&exe);
                return ExitCode::SUCCESS;
            }
            _ => {
                eprintln!("unknown flag: {}", flag);
                print_usage(&exe);
                return ExitCode::from(2);
            }
        }
    }

    init_logging();

    let stdout = io::stdout();
    let mut shell = match Shell::new(config, stdout.lock()) {
        Ok(shell) => shell,
        Err(err) => {
            eprintln!("error: {err}");
            return ExitCode::from(2);
        }
    };

    let result = match &file {
        Some(path) => shell.run_script(path),
        None => shell.run(io::stdin().lock()),
    };

    match result {
        Ok(report) => {
            eprintln!("commands={} errors={}", report.commands, report.errors);
            if report.is_clean() {
                ExitCode::SUCCESS
            } else {
                ExitCode::from(1)
            }
        }
        Err(err) => {
            tracing::error!(error = %err, "shell aborted");
            eprintln!("error: {err}");
            ExitCode::from(2)
        }
    }
}

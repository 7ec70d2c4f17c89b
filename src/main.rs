use stocksense::cli::{parse_args, run};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    // stdout carries only the report
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .with(filter)
        .try_init()
        .ok();
}

fn main() -> std::process::ExitCode {
    init_logging();
    match parse_args(std::env::args_os()) {
        Ok(cli) => run(cli),
        Err(code) => code,
    }
}

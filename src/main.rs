use std::env;
use std::io::{self, Write};
use std::process;
use std::str::FromStr;

use snafu::ResultExt;
use stackc::EmitSnafu;
use tracing::{Level, debug};

/// Compiled when no source is given on the command line.
const SAMPLE_SOURCE: &str = " 3 + 4 * 5;";

/// Environment variable selecting the log level written to stderr.
const LOG_ENV: &str = "STACKC_LOG";

fn log_level() -> Level {
  env::var(LOG_ENV)
    .ok()
    .and_then(|value| Level::from_str(value.trim()).ok())
    .unwrap_or(Level::WARN)
}

fn main() {
  tracing_subscriber::fmt()
    .with_writer(io::stderr)
    .with_target(false)
    .with_level(true)
    .with_max_level(log_level())
    .init();

  let args: Vec<String> = env::args().collect();
  let source = match args.len() {
    1 => SAMPLE_SOURCE,
    2 => args[1].as_str(),
    _ => {
      let program = args.first().map(String::as_str).unwrap_or("stackc");
      eprintln!("usage: {program} [<source>]");
      process::exit(1);
    }
  };

  let stdout = io::stdout();
  let mut out = stdout.lock();
  let result =
    stackc::compile_to(source, &mut out).and_then(|()| out.flush().context(EmitSnafu));

  if let Err(err) = result {
    debug!("\n{}", err.excerpt(source));
    let _ = writeln!(out, "Error: {err}");
    let _ = out.flush();
    process::exit(1);
  }
}

use std::io::Write;
use std::sync::atomic::{AtomicBool, Ordering};

use echo_solana_client::EchoOutcome;
use termcolor::{ColorChoice, ColorSpec, StandardStream, WriteColor};

static JSON_MODE: AtomicBool = AtomicBool::new(false);

pub fn init(json: bool) {
    JSON_MODE.store(json, Ordering::Relaxed);
}

pub fn is_json() -> bool {
    JSON_MODE.load(Ordering::Relaxed)
}

pub fn print_outcome(outcome: &EchoOutcome) -> anyhow::Result<()> {
    if is_json() {
        println!("{}", serde_json::to_string_pretty(outcome)?);
        return Ok(());
    }

    let mut out = stdout();
    writeln!(out, "{}", outcome.explorer_url)?;
    out.set_color(ColorSpec::new().set_bold(true))?;
    write!(out, "Echo Buffer Text:")?;
    out.reset()?;
    writeln!(out, " {}", outcome.echoed)?;
    Ok(())
}

pub fn stdout() -> StandardStream {
    StandardStream::stdout(ColorChoice::Auto)
}

//! i2cprobe CLI
//!
//! Interactive workbench for assembling I2C transactions and capturing
//! device responses as test blocks. Runs against a simulated register-file
//! device bank; attach real hardware by embedding the library with your
//! own `BusTransport`.

use std::io::{self, Read};

use anyhow::Result;
use clap::Parser;

use i2cprobe::{Interpreter, LineAssembler, SimBus};

#[derive(Parser, Debug)]
#[command(name = "i2cprobe")]
#[command(version)]
#[command(about = "Assemble I2C transactions interactively and capture responses as test blocks")]
struct Cli {
    /// Evaluate these command lines and exit instead of reading stdin
    #[arg(short = 'e', long = "eval")]
    eval: Vec<String>,

    /// Suppress the startup help text
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let stdout = io::stdout();
    let mut interp = Interpreter::new(SimBus::new(), stdout.lock());

    if !cli.quiet {
        interp.print_help()?;
    }

    if !cli.eval.is_empty() {
        for line in &cli.eval {
            interp.interpret(line)?;
        }
        return Ok(());
    }

    let mut asm = LineAssembler::new();
    for byte in io::stdin().lock().bytes() {
        if let Some(line) = asm.push(byte? as char) {
            interp.interpret(&line)?;
        }
    }
    // dispatch a trailing partial line at EOF
    if let Some(line) = asm.push('\n') {
        interp.interpret(&line)?;
    }
    Ok(())
}

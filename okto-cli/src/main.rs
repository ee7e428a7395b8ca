//! Entrypoint for CLI
mod frontend;

use std::{env, error::Error, fs, process};

use log::{error, info};
use okto::prelude::*;

use self::frontend::SdlFrontend;

static USAGE: &str = r#"
usage: okto FILE

Runs the given CHIP-8 ROM file.

example:
    okto breakout.ch8
"#;

fn main() -> Result<(), Box<dyn Error>> {
    simple_logger::SimpleLogger::new().env().init().unwrap();

    let Some(filepath) = parse_args() else {
        print_usage();
        // FreeBSD EX_USAGE (64)
        process::exit(64)
    };

    if let Err(err) = run_rom(&filepath) {
        error!("{err}");
        return Err(err);
    }

    Ok(())
}

fn run_rom(filepath: &str) -> Result<(), Box<dyn Error>> {
    let rom = fs::read(filepath)?;
    info!("read {} bytes from {filepath}", rom.len());

    let mut vm = Vm::new(VmConf::default());
    vm.load_rom(rom.as_slice())?;

    let mut frontend = SdlFrontend::new(filepath)?;
    vm.run(&mut frontend)?;

    Ok(())
}

/// A single positional ROM path; anything else is a usage error.
fn parse_args() -> Option<String> {
    let mut args = env::args().skip(1);
    let filepath = args.next()?;
    if args.next().is_some() {
        return None;
    }
    Some(filepath)
}

fn print_usage() {
    println!("okto v{}", env!("CARGO_PKG_VERSION"));
    println!("{USAGE}");
}

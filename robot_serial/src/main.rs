use std::{
    io::{self, BufRead},
    process::ExitCode,
};

use argh::FromArgs;
use robot_core::SerialConfig;
use robot_serial::{logging, BrainPipe, Error};

/// Feed stdin, line by line, to the brain's serial pipe
#[derive(FromArgs, PartialEq, Debug)]
struct Args {
    /// serial port to use instead of searching for a connected brain
    #[argh(option)]
    port: Option<String>,
    /// baud rate to open the port at
    #[argh(option, default = "SerialConfig::DEFAULT.baud_rate")]
    baud: u32,
    /// log every chunk written
    #[argh(switch, short = 'v')]
    verbose: bool,
}

fn main() -> ExitCode {
    let args: Args = argh::from_env();

    logging(args.verbose, io::stderr).init();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!("{err}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<(), Error> {
    let mut pipe = match &args.port {
        Some(path) => BrainPipe::open(path, args.baud)?,
        None => BrainPipe::open_brain(args.baud)?,
    };

    for line in io::stdin().lock().lines() {
        let line = line?;
        if line.is_empty() {
            continue;
        }
        pipe.send(line.as_bytes())?;
    }
    Ok(())
}

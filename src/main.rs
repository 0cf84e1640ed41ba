use clap::{error::ErrorKind, Parser};
use leapfrog::{Engine, EngineCommand};

fn main() {
    let mut engine = Engine::new();

    // Skip the executable name
    let args = std::env::args().skip(1).collect::<Vec<_>>();

    // Anything on the command line is treated as a single command to run
    // before entering the event loop
    if !args.is_empty() {
        match EngineCommand::try_parse_from(&args) {
            Ok(cmd) => engine.send_command(cmd),

            // Edge case: `--help` and `--version` are both "error" cases according to Clap
            Err(e)
                if matches!(e.kind(), ErrorKind::DisplayHelp)
                    || matches!(e.kind(), ErrorKind::DisplayVersion) =>
            {
                println!("{e}");
                return;
            }

            Err(e) => {
                eprintln!("ERROR on input {args:?}:\n{e}");
                return;
            }
        }
    }

    if let Err(e) = engine.run() {
        eprintln!("{} encountered an error: {e}", env!("CARGO_PKG_NAME"));
    }
}

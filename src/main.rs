use std::process::ExitCode;

use log::{debug, error, info};
use lox_expr::config::Config;
use lox_expr::report::LogReporter;
use lox_expr::Error;
use rustyline::{error::ReadlineError, DefaultEditor};

type DynResult<T> = Result<T, Box<dyn std::error::Error>>;

// sysexits codes used by the reference Lox tooling
const EXIT_DATA_ERR: u8 = 65;
const EXIT_SOFTWARE: u8 = 70;
const EXIT_USAGE: u8 = 64;

fn main() -> DynResult<ExitCode> {
    // `.env` may set RUST_LOG, so it is loaded before the logger starts
    let dotenv = dotenvy::dotenv();
    env_logger::init();
    if let Err(e) = dotenv {
        debug!("dotenvy load with error {}", e);
    }

    let config = Config::from_env()?;
    debug!("{:?}", config);

    let args = std::env::args().collect::<Vec<String>>();
    match (args.get(1).map(String::as_str), args.get(2)) {
        (Some("-i"), _) => repl(&config).map(|_| ExitCode::SUCCESS),
        (Some("-f"), Some(path)) => read_from_file(&config, path),
        (Some("-e"), Some(input)) => Ok(run_once(&config, input)),
        _ => {
            let program = args.first().map_or("lox-expr", String::as_str);
            eprintln!("usage: {} -i | -f <file> | -e <expression>", program);
            Ok(ExitCode::from(EXIT_USAGE))
        }
    }
}

fn repl(config: &Config) -> DynResult<()> {
    info!("Running in REPL mode");

    let mut rl = DefaultEditor::new()?;
    let mut reporter = LogReporter::new();

    loop {
        match rl.readline(&config.prompt) {
            Ok(line) => {
                if line.trim().is_empty() {
                    continue;
                }
                rl.add_history_entry(&line)?;
                // a bad line must not poison the ones after it
                reporter.reset();
                match lox_expr::run(line.trim_end(), config, &mut reporter) {
                    Ok(value) => println!("{}", value),
                    Err(Error::Runtime(err)) => error!("Interpreter error: {}", err),
                    // already reported
                    Err(Error::Parse(err)) => debug!("{:?}", err),
                }
            }
            Err(ReadlineError::Eof) => break,
            Err(ReadlineError::Interrupted) => break,
            Err(err) => {
                return Err(Box::new(err));
            }
        }
    }

    Ok(())
}

fn read_from_file(config: &Config, file_path: &str) -> DynResult<ExitCode> {
    info!("Read from file");
    let contents = std::fs::read_to_string(file_path)?;
    Ok(run_once(config, &contents))
}

fn run_once(config: &Config, input: &str) -> ExitCode {
    let mut reporter = LogReporter::new();
    match lox_expr::run(input, config, &mut reporter) {
        Ok(value) => {
            println!("{}", value);
            ExitCode::SUCCESS
        }
        Err(Error::Parse(err)) => {
            debug!("{:?}", err);
            ExitCode::from(EXIT_DATA_ERR)
        }
        Err(Error::Runtime(err)) => {
            error!("Interpreter error: {}", err);
            ExitCode::from(EXIT_SOFTWARE)
        }
    }
}

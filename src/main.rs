mod clipboard;
mod config;
mod errors;
mod generators;
mod interactive;
mod password;

use std::error::Error;
use std::fmt;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::config::Config;
use crate::password::{PasswordRequest, Session};

#[derive(Parser, Debug)]
#[command(author, version, about = "Generate random passwords from selectable character classes", long_about = None)]
struct Args {
    /// Password length
    #[arg(long, short = 'L')]
    length: Option<usize>,

    /// Include lowercase letters
    #[arg(long, short = 'l', overrides_with = "no_lowercase")]
    lowercase: bool,

    /// Exclude lowercase letters
    #[arg(long, overrides_with = "lowercase")]
    no_lowercase: bool,

    /// Include uppercase letters
    #[arg(long, short = 'u', overrides_with = "no_uppercase")]
    uppercase: bool,

    /// Exclude uppercase letters
    #[arg(long, overrides_with = "uppercase")]
    no_uppercase: bool,

    /// Include digits
    #[arg(long, short = 'n', overrides_with = "no_numbers")]
    numbers: bool,

    /// Exclude digits
    #[arg(long, overrides_with = "numbers")]
    no_numbers: bool,

    /// Include symbols
    #[arg(long, short = 's', overrides_with = "no_symbols")]
    symbols: bool,

    /// Exclude symbols
    #[arg(long, overrides_with = "symbols")]
    no_symbols: bool,

    /// Seed for reproducible output
    #[arg(long)]
    seed: Option<u64>,

    /// Copy the password to the clipboard
    #[arg(long, short = 'c')]
    copy: bool,

    /// Path to a JSON config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Read commands from stdin instead of generating once
    #[arg(long, short = 'i')]
    interactive: bool,

    /// Increase log verbosity
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Args {
    fn request(&self, config: &Config) -> PasswordRequest {
        let defaults = config.request();

        PasswordRequest {
            length: self.length.unwrap_or(defaults.length),
            lowercase: toggle(self.lowercase, self.no_lowercase, defaults.lowercase),
            uppercase: toggle(self.uppercase, self.no_uppercase, defaults.uppercase),
            numbers: toggle(self.numbers, self.no_numbers, defaults.numbers),
            symbols: toggle(self.symbols, self.no_symbols, defaults.symbols),
        }
    }
}

fn toggle(on: bool, off: bool, default: bool) -> bool {
    if on {
        true
    } else if off {
        false
    } else {
        default
    }
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose);

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            report(&mut io::stderr(), &e);
            ExitCode::FAILURE
        }
    }
}

/// Errors reach the user once, on `out`; the logger only sees them at debug level.
fn report<W: Write>(out: &mut W, error: &dyn fmt::Display) {
    log::debug!("{}", error);
    let _ = writeln!(out, "{}", error);
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        _ => log::LevelFilter::Debug,
    };

    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_timestamp_secs()
        .init();
}

fn run(args: Args) -> Result<(), Box<dyn Error>> {
    let config = Config::load(args.config.as_deref())?;
    let request = args.request(&config);

    let mut rng = match args.seed {
        Some(seed) => {
            log::info!("using seeded random source");
            StdRng::seed_from_u64(seed)
        }
        None => StdRng::from_os_rng(),
    };

    let mut session = Session::new(request, config.bounds());

    if args.interactive {
        let stdin = io::stdin();
        let auto_copy = args.copy || config.copy;
        interactive::run(&mut session, &mut rng, stdin.lock(), io::stdout(), auto_copy, clipboard::copy)?;
        return Ok(());
    }

    let password = session.submit(&mut rng)?;
    println!("{}", password);

    if args.copy || config.copy {
        if let Err(e) = clipboard::copy(&password) {
            report(&mut io::stderr(), &format_args!("Could not copy password: {}", e));
        }
    }

    Ok(())
}

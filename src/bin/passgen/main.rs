use std::io::{self, Write};
use std::path::PathBuf;
use std::process;

use anyhow::Context;
use clap::Parser;
use serde::Serialize;

mod clipboard;
mod options;

#[derive(Parser)]
enum Args {
    /// Generate one or more passwords.
    Generate {
        #[command(flatten)]
        overrides: options::Overrides,
        /// How many passwords to generate.
        #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
        count: u32,
        /// Copy the (last) generated password to the clipboard.
        #[arg(long)]
        copy: bool,
        /// Print the options used and the passwords as JSON.
        #[arg(long)]
        json: bool,
        /// Log what the generator is doing to stderr.
        #[arg(short, long)]
        verbose: bool,
    },
    /// Print the options that `generate` would use, as YAML.
    Options {
        #[command(flatten)]
        overrides: options::Overrides,
    },
}

fn run() -> Result<(), ProgError> {
    let args = Args::parse();

    match args {
        Args::Generate {
            overrides,
            count,
            copy,
            json,
            verbose,
        } => {
            init_logging(verbose);
            let config = options::resolve(&overrides)?;
            generate(&config, count, copy, json)?;
        }
        Args::Options { overrides } => {
            init_logging(false);
            let config = options::resolve(&overrides)?;
            let stdout = io::stdout().lock();
            serde_yaml::to_writer(stdout, &config).context("failed to write options as YAML")?;
        }
    }

    Ok(())
}

fn generate(
    config: &passgen::PasswordConfig,
    count: u32,
    copy: bool,
    json: bool,
) -> Result<(), ProgError> {
    let mut rng = rand::thread_rng();
    let passwords = (0..count)
        .map(|_| passgen::password_generation::generate_with(&mut rng, config))
        .collect::<Result<Vec<_>, _>>()?;

    let mut stdout = io::stdout().lock();
    if json {
        #[derive(Serialize)]
        struct Output<'a> {
            options: &'a passgen::PasswordConfig,
            passwords: &'a [passgen::GeneratedPassword],
        }

        serde_json::to_writer_pretty(
            &mut stdout,
            &Output {
                options: config,
                passwords: &passwords,
            },
        )
        .context("failed to write passwords as JSON")?;
        writeln!(stdout).context("failed to write to stdout")?;
    } else {
        for password in &passwords {
            writeln!(stdout, "{}", password.as_str()).context("failed to write to stdout")?;
        }
    }

    if copy {
        if let Some(password) = passwords.last() {
            clipboard::send_to_clipboard(password.as_str().as_bytes())
                .map_err(ProgError::Clipboard)?;
            eprintln!("Copied to the clipboard.");
        }
    }
    Ok(())
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .init();
}

fn main() {
    match run() {
        Ok(()) => (),
        Err(ProgError::Generate(err)) if !err.is_config_error() => panic!("{err:?}"),
        Err(ProgError::Other(err)) => {
            eprintln!("{err:?}");
            process::exit(1);
        }
        Err(err) => {
            eprintln!("{err}");
            process::exit(1);
        }
    }
}

#[derive(Debug, thiserror::Error)]
enum ProgError {
    #[error("Select at least one character class.")]
    NoClassSelected,
    #[error("The options file {0:?} does not exist.")]
    OptionsFileMissing(PathBuf),
    #[error("Failed to copy the password to the clipboard: {0:#}")]
    Clipboard(#[source] anyhow::Error),
    #[error("Could not generate a password: {0}")]
    Generate(passgen::GenerateError),
    #[error(transparent)]
    Other(anyhow::Error),
}

impl From<anyhow::Error> for ProgError {
    fn from(err: anyhow::Error) -> ProgError {
        ProgError::Other(err)
    }
}

impl From<passgen::GenerateError> for ProgError {
    fn from(err: passgen::GenerateError) -> ProgError {
        ProgError::Generate(err)
    }
}

//! Working out which options to generate with: defaults, then the options file, then the command
//! line.

use std::env;
use std::fs::File;
use std::ops::RangeInclusive;
use std::path::{Path, PathBuf};

use anyhow::Context;
use passgen::PasswordConfig;

use crate::ProgError;

/// Lengths outside this range are corrected to the nearest bound.
pub(crate) const LENGTH_BOUNDS: RangeInclusive<usize> = 8..=32;

#[derive(clap::Args, Debug, Default)]
pub(crate) struct Overrides {
    /// Read options from this YAML file (default: ~/.passgen/options.yaml, if it exists).
    #[arg(long)]
    options: Option<PathBuf>,
    /// Password length (8 to 32).
    #[arg(short, long)]
    length: Option<usize>,
    /// Leave out lowercase letters.
    #[arg(long)]
    no_lower: bool,
    /// Leave out uppercase letters.
    #[arg(long)]
    no_upper: bool,
    /// Leave out digits.
    #[arg(long)]
    no_digits: bool,
    /// Leave out special characters.
    #[arg(long)]
    no_special: bool,
    /// Allow characters that are easily confused with one another (O, 0, |).
    #[arg(long)]
    allow_ambiguous: bool,
}

pub(crate) fn resolve(overrides: &Overrides) -> Result<PasswordConfig, ProgError> {
    let mut config = match options_file(overrides.options.clone())? {
        Some(path) => load_options(&path)?,
        None => PasswordConfig::default(),
    };
    apply_overrides(&mut config, overrides);
    validate(&mut config)?;
    Ok(config)
}

fn options_file(options_path: Option<PathBuf>) -> Result<Option<PathBuf>, ProgError> {
    match options_path {
        Some(p) if p.exists() => Ok(Some(p)),
        Some(p) => Err(ProgError::OptionsFileMissing(p)),
        None => Ok(default_options_file().filter(|p| p.exists())),
    }
}

fn default_options_file() -> Option<PathBuf> {
    let home = env::var_os("HOME")?;
    let mut p = PathBuf::from(home);
    p.push(".passgen");
    p.push("options.yaml");
    Some(p)
}

fn load_options(path: &Path) -> anyhow::Result<PasswordConfig> {
    log::debug!("reading options from {}", path.display());
    let file = File::open(path)
        .with_context(|| format!("failed to open options file {}", path.display()))?;
    serde_yaml::from_reader(file)
        .with_context(|| format!("failed to parse options file {}", path.display()))
}

fn apply_overrides(config: &mut PasswordConfig, overrides: &Overrides) {
    if let Some(length) = overrides.length {
        config.length = length;
    }
    config.use_lower &= !overrides.no_lower;
    config.use_upper &= !overrides.no_upper;
    config.use_digits &= !overrides.no_digits;
    config.use_special &= !overrides.no_special;
    config.avoid_ambiguous &= !overrides.allow_ambiguous;
}

fn validate(config: &mut PasswordConfig) -> Result<(), ProgError> {
    let clamped = config
        .length
        .clamp(*LENGTH_BOUNDS.start(), *LENGTH_BOUNDS.end());
    if clamped != config.length {
        log::warn!(
            "password length {} is outside {}..={}; using {clamped}",
            config.length,
            LENGTH_BOUNDS.start(),
            LENGTH_BOUNDS.end()
        );
        config.length = clamped;
    }
    if config.enabled_classes().is_empty() {
        return Err(ProgError::NoClassSelected);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use passgen::PasswordConfig;

    use super::{resolve, Overrides};
    use crate::ProgError;

    fn options_file(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new()
            .suffix(".yaml")
            .tempfile()
            .unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn command_line_overrides_the_options_file() {
        let file = options_file("length: 20\nuse_digits: false\navoid_ambiguous: false\n");
        let overrides = Overrides {
            options: Some(file.path().to_owned()),
            length: Some(16),
            no_special: true,
            ..Overrides::default()
        };
        assert_eq!(
            resolve(&overrides).unwrap(),
            PasswordConfig {
                length: 16,
                use_lower: true,
                use_upper: true,
                use_digits: false,
                use_special: false,
                avoid_ambiguous: false,
            }
        );
    }

    #[test]
    fn length_is_clamped_into_bounds() {
        let file = options_file("length: 4\n");
        let overrides = Overrides {
            options: Some(file.path().to_owned()),
            ..Overrides::default()
        };
        assert_eq!(resolve(&overrides).unwrap().length, 8);

        let overrides = Overrides {
            options: Some(file.path().to_owned()),
            length: Some(100),
            ..Overrides::default()
        };
        assert_eq!(resolve(&overrides).unwrap().length, 32);
    }

    #[test]
    fn no_classes_is_rejected_before_generating() {
        let file = options_file("{}\n");
        let overrides = Overrides {
            options: Some(file.path().to_owned()),
            no_lower: true,
            no_upper: true,
            no_digits: true,
            no_special: true,
            ..Overrides::default()
        };
        assert!(matches!(
            resolve(&overrides),
            Err(ProgError::NoClassSelected)
        ));
    }

    #[test]
    fn missing_options_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let overrides = Overrides {
            options: Some(dir.path().join("nope.yaml")),
            ..Overrides::default()
        };
        assert!(matches!(
            resolve(&overrides),
            Err(ProgError::OptionsFileMissing(_))
        ));
    }

    #[test]
    fn malformed_options_file_is_an_error() {
        let file = options_file("length: twelve\n");
        let overrides = Overrides {
            options: Some(file.path().to_owned()),
            ..Overrides::default()
        };
        assert!(matches!(resolve(&overrides), Err(ProgError::Other(_))));
    }
}

//! Utilities for generating passwords.
//!
//! A password is built in two stages. First the character slots are split into one contiguous,
//! non-empty group per enabled class, at randomly drawn boundaries, and each slot is filled from
//! its group's alphabet; this guarantees every enabled class appears while still leaving the
//! number of characters per class random. The grouped characters are then read out through a
//! random permutation so the groups don't show in the result.

use crate::password::PasswordConfig;
use crate::random_source::RandomSource;
use crate::sampling::{sample, sample_unique, SamplingError};
use crate::GeneratedPassword;

/// Generate a password with `rand::thread_rng()` as the random source.
pub fn generate(config: &PasswordConfig) -> Result<GeneratedPassword, GenerateError> {
    generate_with(&mut rand::thread_rng(), config)
}

/// Generate a password drawing from the given random source.
pub fn generate_with<R>(
    rng: &mut R,
    config: &PasswordConfig,
) -> Result<GeneratedPassword, GenerateError>
where
    R: RandomSource + ?Sized,
{
    let classes = config.enabled_classes();
    if classes.is_empty() {
        return Err(GenerateError::NoClassSelected);
    }
    let length = config.length;
    if length < classes.len() {
        return Err(GenerateError::LengthTooShort {
            length,
            classes: classes.len(),
        });
    }

    let mut boundaries = Vec::with_capacity(classes.len() + 1);
    boundaries.push(0);
    boundaries.extend(sample_unique(rng, classes.len() - 1, 1, length - 1)?);
    boundaries[1..].sort_unstable();
    boundaries.push(length);
    log::debug!(
        "generating {length} characters from {} classes, group boundaries {boundaries:?}",
        classes.len()
    );

    let mut grouped = Vec::with_capacity(length);
    for (entry, bounds) in classes.iter().zip(boundaries.windows(2)) {
        let alphabet = entry.alphabet.as_bytes();
        for _ in bounds[0]..bounds[1] {
            let idx = sample(rng, 0, alphabet.len() - 1)?;
            grouped.push(char::from(alphabet[idx]));
        }
    }
    debug_assert_eq!(grouped.len(), length);

    let order = sample_unique(rng, length, 0, length - 1)?;
    let password = order.into_iter().map(|idx| grouped[idx]).collect::<String>();
    Ok(GeneratedPassword(password))
}

/// Like [`generate`], but returns an empty string when no password can be built for the
/// configuration.
///
/// # Panics
///
/// If a sampler rejects one of the generator's own requests; that is a bug, not a configuration
/// problem.
pub fn generate_or_empty(config: &PasswordConfig) -> String {
    generate_or_empty_with(&mut rand::thread_rng(), config)
}

pub fn generate_or_empty_with<R>(rng: &mut R, config: &PasswordConfig) -> String
where
    R: RandomSource + ?Sized,
{
    match generate_with(rng, config) {
        Ok(password) => password.into_string(),
        Err(GenerateError::Sampling(err)) => panic!("password generation is broken: {err}"),
        Err(err) => {
            log::debug!("no password generated: {err}");
            String::new()
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum GenerateError {
    #[error("no character classes were selected")]
    NoClassSelected,
    #[error(
        "a password of length {length} cannot hold one character from each of the {classes} \
         selected character classes"
    )]
    LengthTooShort { length: usize, classes: usize },
    #[error("internal error while sampling: {0}")]
    Sampling(#[from] SamplingError),
}

impl GenerateError {
    /// Whether the configuration was at fault, as opposed to the generator itself.
    pub fn is_config_error(&self) -> bool {
        !matches!(self, GenerateError::Sampling(_))
    }
}

//! Random password generation where every selected character class is guaranteed to appear.
//!
//! ```
//! let config = passgen::PasswordConfig::default();
//! let password = passgen::password_generation::generate(&config).unwrap();
//! assert_eq!(password.len(), config.length);
//! ```

use serde::Serialize;

mod password;
pub mod password_generation;
pub mod random_source;
pub mod sampling;

pub use password::{CharacterClass, ClassEntry, PasswordConfig, AMBIGUOUS};
pub use password_generation::GenerateError;
pub use random_source::{RandomSource, ReplaySource};
pub use sampling::SamplingError;

/// A freshly generated password.
///
/// The `Debug` output doesn't reveal the password, so it can't end up in logs by accident.
#[derive(Clone, Eq, PartialEq, Serialize)]
#[serde(transparent)]
pub struct GeneratedPassword(String);

opaque_debug::implement!(GeneratedPassword);

impl GeneratedPassword {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    /// Length in characters. All alphabets are ASCII, so this is also the length in bytes.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

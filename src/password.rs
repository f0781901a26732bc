use std::fmt;

use serde::{Deserialize, Serialize};

/// What a generated password should look like.
#[derive(Clone, Debug, Eq, PartialEq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct PasswordConfig {
    pub length: usize,
    pub use_lower: bool,
    pub use_upper: bool,
    pub use_digits: bool,
    pub use_special: bool,
    /// Leave out characters that are easily mistaken for one another (`O`, `0` and `|`).
    pub avoid_ambiguous: bool,
}

impl Default for PasswordConfig {
    fn default() -> PasswordConfig {
        PasswordConfig {
            length: 12,
            use_lower: true,
            use_upper: true,
            use_digits: true,
            use_special: true,
            avoid_ambiguous: true,
        }
    }
}

impl PasswordConfig {
    /// Every character class, in class order, with its alphabet and whether it is enabled.
    pub fn class_table(&self) -> [ClassEntry; 4] {
        CharacterClass::ALL.map(|class| ClassEntry {
            class,
            alphabet: class.alphabet(self.avoid_ambiguous),
            enabled: self.uses(class),
        })
    }

    /// The enabled classes, in class order.
    pub fn enabled_classes(&self) -> Vec<ClassEntry> {
        self.class_table()
            .into_iter()
            .filter(|entry| entry.enabled)
            .collect()
    }

    pub fn uses(&self, class: CharacterClass) -> bool {
        match class {
            CharacterClass::Lower => self.use_lower,
            CharacterClass::Upper => self.use_upper,
            CharacterClass::Digits => self.use_digits,
            CharacterClass::Special => self.use_special,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CharacterClass {
    Lower,
    Upper,
    Digits,
    Special,
}

impl CharacterClass {
    /// Class order. The generator lays out character groups in this order.
    pub const ALL: [CharacterClass; 4] = [
        CharacterClass::Lower,
        CharacterClass::Upper,
        CharacterClass::Digits,
        CharacterClass::Special,
    ];

    /// The characters this class draws from. All alphabets are ASCII.
    pub fn alphabet(self, avoid_ambiguous: bool) -> &'static str {
        match (self, avoid_ambiguous) {
            (CharacterClass::Lower, _) => LOWER,
            (CharacterClass::Upper, false) => UPPER,
            (CharacterClass::Upper, true) => UPPER_UNAMBIGUOUS,
            (CharacterClass::Digits, false) => DIGITS,
            (CharacterClass::Digits, true) => DIGITS_UNAMBIGUOUS,
            (CharacterClass::Special, false) => SPECIAL,
            (CharacterClass::Special, true) => SPECIAL_UNAMBIGUOUS,
        }
    }

    /// Whether `ch` belongs to this class's full (ambiguity-inclusive) alphabet.
    pub fn contains(self, ch: char) -> bool {
        self.alphabet(false).contains(ch)
    }
}

impl fmt::Display for CharacterClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            CharacterClass::Lower => "lowercase",
            CharacterClass::Upper => "uppercase",
            CharacterClass::Digits => "digits",
            CharacterClass::Special => "special",
        })
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ClassEntry {
    pub class: CharacterClass,
    pub alphabet: &'static str,
    pub enabled: bool,
}

/// Characters removed from the alphabets when ambiguity is avoided.
pub const AMBIGUOUS: &[char] = &['O', '0', '|'];

static LOWER: &str = "abcdefghijklmnopqrstuvwxyz";
static UPPER: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";
static UPPER_UNAMBIGUOUS: &str = "ABCDEFGHIJKLMNPQRSTUVWXYZ";
static DIGITS: &str = "0123456789";
static DIGITS_UNAMBIGUOUS: &str = "123456789";
static SPECIAL: &str = "!@#$%^&*()-_=+[{]}\\|;:'\",<.>/?`~";
static SPECIAL_UNAMBIGUOUS: &str = "!@#$%^&*()-_=+[{]}\\;:'\",<.>/?`~";

#[cfg(test)]
mod tests {
    use super::{CharacterClass, PasswordConfig, AMBIGUOUS};

    #[test]
    fn unambiguous_alphabets_drop_exactly_the_ambiguous_chars() {
        for class in CharacterClass::ALL {
            let full = class.alphabet(false);
            let reduced = class.alphabet(true);
            let expected = full
                .chars()
                .filter(|ch| !AMBIGUOUS.contains(ch))
                .collect::<String>();
            assert_eq!(reduced, expected, "{class}");
        }
    }

    #[test]
    fn alphabet_sizes() {
        assert_eq!(CharacterClass::Lower.alphabet(true).len(), 26);
        assert_eq!(CharacterClass::Upper.alphabet(false).len(), 26);
        assert_eq!(CharacterClass::Upper.alphabet(true).len(), 25);
        assert_eq!(CharacterClass::Digits.alphabet(false).len(), 10);
        assert_eq!(CharacterClass::Digits.alphabet(true).len(), 9);
        assert_eq!(CharacterClass::Special.alphabet(false).len(), 32);
        assert_eq!(CharacterClass::Special.alphabet(true).len(), 31);
        assert!(CharacterClass::ALL
            .iter()
            .all(|class| class.alphabet(false).is_ascii()));
    }

    #[test]
    fn classes_do_not_overlap() {
        for ch in (0u8..128).map(char::from) {
            let owners = CharacterClass::ALL
                .iter()
                .filter(|class| class.contains(ch))
                .count();
            assert!(owners <= 1, "{ch:?} is in {owners} classes");
        }
    }

    #[test]
    fn class_table_keeps_class_order() {
        let config = PasswordConfig {
            use_upper: false,
            use_special: false,
            ..PasswordConfig::default()
        };
        let table = config.class_table();
        assert_eq!(
            table.map(|entry| (entry.class, entry.enabled)),
            [
                (CharacterClass::Lower, true),
                (CharacterClass::Upper, false),
                (CharacterClass::Digits, true),
                (CharacterClass::Special, false),
            ]
        );
        let enabled = config
            .enabled_classes()
            .into_iter()
            .map(|entry| entry.class)
            .collect::<Vec<_>>();
        assert_eq!(enabled, [CharacterClass::Lower, CharacterClass::Digits]);
        assert_eq!(table[2].alphabet, "123456789");
    }

    #[test]
    fn partial_config_falls_back_to_defaults() {
        let config: PasswordConfig =
            serde_yaml::from_str("length: 20\nuse_special: false\n").unwrap();
        assert_eq!(
            config,
            PasswordConfig {
                length: 20,
                use_special: false,
                ..PasswordConfig::default()
            }
        );
    }

    #[test]
    fn unknown_config_fields_are_rejected() {
        assert!(serde_yaml::from_str::<PasswordConfig>("lenght: 20\n").is_err());
    }
}

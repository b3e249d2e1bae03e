//! Nickname validation for player characters.
//!
//! Length is counted in Unicode scalar values of the exact string given, so
//! `"Ян"` is a valid two-character name. Stripping chat whitespace is the
//! caller's job; padding counts toward the length here.

/// Nickname validation errors with helpful messages
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NicknameError {
    #[error("Name is empty")]
    Empty,

    #[error("Name is too short (minimum {min} characters)")]
    TooShort { min: usize },

    #[error("Name is too long (maximum {max} characters)")]
    TooLong { max: usize },
}

/// Nickname validation rules configuration
#[derive(Debug, Clone)]
pub struct NicknameRules {
    pub min_length: usize,
    pub max_length: usize,
}

impl Default for NicknameRules {
    fn default() -> Self {
        NicknameRules {
            min_length: NICKNAME_MIN_CHARS,
            max_length: NICKNAME_MAX_CHARS,
        }
    }
}

pub const NICKNAME_MIN_CHARS: usize = 2;
pub const NICKNAME_MAX_CHARS: usize = 15;

impl NicknameRules {
    /// Validate `name` and return it unchanged as the nickname to store.
    pub fn validate(&self, name: &str) -> Result<String, NicknameError> {
        if name.is_empty() {
            return Err(NicknameError::Empty);
        }
        let len = name.chars().count();
        if len < self.min_length {
            return Err(NicknameError::TooShort {
                min: self.min_length,
            });
        }
        if len > self.max_length {
            return Err(NicknameError::TooLong {
                max: self.max_length,
            });
        }
        Ok(name.to_string())
    }
}

/// Validate with the default `[2, 15]` bound.
pub fn validate_nickname(raw: &str) -> Result<String, NicknameError> {
    NicknameRules::default().validate(raw)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_names_within_bounds() {
        for name in ["Al", "Aragorn", "fifteen_chars__", "Ян", "勇者さま"] {
            assert_eq!(validate_nickname(name).as_deref(), Ok(name), "{name}");
        }
    }

    #[test]
    fn rejects_out_of_bounds() {
        assert_eq!(
            validate_nickname("A"),
            Err(NicknameError::TooShort { min: 2 })
        );
        assert_eq!(
            validate_nickname("sixteen_chars___"),
            Err(NicknameError::TooLong { max: 15 })
        );
        assert_eq!(validate_nickname(""), Err(NicknameError::Empty));
    }

    #[test]
    fn padding_counts_toward_length() {
        assert_eq!(validate_nickname(" Al").as_deref(), Ok(" Al"));
        assert_eq!(validate_nickname(" x").as_deref(), Ok(" x"));
        let padded = format!("Sam{}", " ".repeat(13));
        assert_eq!(
            validate_nickname(&padded),
            Err(NicknameError::TooLong { max: 15 })
        );
    }

    #[test]
    fn counts_characters_not_bytes() {
        // 15 multi-byte characters is still within bounds
        let name = "ж".repeat(15);
        assert!(name.len() > 15);
        assert!(validate_nickname(&name).is_ok());
        assert!(validate_nickname(&"ж".repeat(16)).is_err());
    }

    #[test]
    fn custom_rules() {
        let rules = NicknameRules {
            min_length: 3,
            max_length: 4,
        };
        assert!(rules.validate("ab").is_err());
        assert!(rules.validate("abcd").is_ok());
        assert!(rules.validate("abcde").is_err());
    }
}

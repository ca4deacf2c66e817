//! Currency identity as published by a rate source

use serde::{Deserialize, Serialize};
use std::fmt;

/// A tracked foreign currency
///
/// `id` is the stable key used to merge samples from different days; sources
/// pick whatever their feed guarantees to be unique (the ISO numeric code for
/// the central bank feed).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Currency {
    pub id: String,
    pub num_code: Option<u16>,
    pub char_code: String,
    pub name: String,
}

impl Currency {
    /// Create a currency keyed by its character code
    pub fn new(char_code: impl Into<String>, name: impl Into<String>) -> Self {
        let char_code = char_code.into().to_uppercase();
        Self {
            id: char_code.clone(),
            num_code: None,
            char_code,
            name: name.into(),
        }
    }

    /// Create a currency keyed by its ISO 4217 numeric code
    pub fn with_num_code(
        num_code: u16,
        char_code: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            id: format!("{:03}", num_code),
            num_code: Some(num_code),
            char_code: char_code.into().to_uppercase(),
            name: name.into(),
        }
    }

    /// Name shown in reports
    pub fn display_name(&self) -> &str {
        if self.name.is_empty() {
            &self.char_code
        } else {
            &self.name
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.display_name(), self.char_code)
    }
}

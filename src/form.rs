use std::{fmt, str::FromStr};

use crate::Error;

/// The variant of the ZObject notation a schema is generated for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Form {
    /// Every object spelled out with its `Z1K1` type.
    #[default]
    Normal,
    /// Strings and references may also use their bare string shorthand.
    Canonical,
}

impl Form {
    pub const ALL: [Form; 2] = [Form::Normal, Form::Canonical];

    pub fn as_str(&self) -> &'static str {
        match self {
            Form::Normal => "NORMAL",
            Form::Canonical => "CANONICAL",
        }
    }
}

impl fmt::Display for Form {
    fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

impl FromStr for Form {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "NORMAL" => Ok(Form::Normal),
            "CANONICAL" => Ok(Form::Canonical),
            _ => Err(Error::Configuration(format!(
                "unknown form '{}', expected one of NORMAL, CANONICAL",
                s
            ))),
        }
    }
}

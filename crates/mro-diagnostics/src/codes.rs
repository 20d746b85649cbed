// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Error code registry.
//!
//! Maps error codes to titles and categories.

use std::collections::HashMap;

/// Registry of all known error codes.
pub struct ErrorCodeRegistry {
    codes: HashMap<&'static str, ErrorCodeInfo>,
}

/// Information about a single error code.
pub struct ErrorCodeInfo {
    pub code: &'static str,
    pub title: &'static str,
    pub category: ErrorCategory,
}

/// Error category for grouping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Encoding,
    Syntax,
    Internal,
}

impl std::fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorCategory::Encoding => write!(f, "Encoding"),
            ErrorCategory::Syntax => write!(f, "Syntax"),
            ErrorCategory::Internal => write!(f, "Internal"),
        }
    }
}

macro_rules! register_codes {
    ($($code:literal => ($title:literal, $cat:expr)),* $(,)?) => {{
        let mut map = HashMap::new();
        $(
            map.insert($code, ErrorCodeInfo {
                code: $code,
                title: $title,
                category: $cat,
            });
        )*
        map
    }};
}

pub const INVALID_ENCODING: &str = "E0001";
pub const UNEXPECTED_TOKEN: &str = "E0100";
pub const INTERNAL: &str = "E0900";

impl Default for ErrorCodeRegistry {
    fn default() -> Self {
        use ErrorCategory::*;

        Self {
            codes: register_codes! {
                "E0001" => ("source is not valid UTF-8", Encoding),
                "E0100" => ("unexpected token", Syntax),
                "E0900" => ("internal front-end error", Internal),
            },
        }
    }
}

impl ErrorCodeRegistry {
    pub fn get(&self, code: &str) -> Option<&ErrorCodeInfo> {
        self.codes.get(code)
    }

    pub fn all(&self) -> impl Iterator<Item = &ErrorCodeInfo> {
        self.codes.values()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constants_are_registered() {
        let registry = ErrorCodeRegistry::default();
        for code in [INVALID_ENCODING, UNEXPECTED_TOKEN, INTERNAL] {
            assert_eq!(registry.get(code).map(|info| info.code), Some(code));
        }
        assert_eq!(registry.all().count(), 3);
        assert_eq!(registry.get("E0100").unwrap().category, ErrorCategory::Syntax);
        assert!(registry.get("E9999").is_none());
    }
}

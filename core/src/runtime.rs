use std::fmt;
use std::str::FromStr;

use crate::errors::ConfigError;

/// Language runtimes a generated Lambda project can target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Runtime {
    TypeScript,
    Dotnet,
    Python,
    Rust,
}

impl Runtime {
    pub const ALL: [Runtime; 4] = [
        Runtime::TypeScript,
        Runtime::Dotnet,
        Runtime::Python,
        Runtime::Rust,
    ];

    /// Directory-style name, e.g. `typescript` for the TypeScript template set.
    pub fn lowercase_name(&self) -> &'static str {
        match self {
            Runtime::TypeScript => "typescript",
            Runtime::Dotnet => "dotnet",
            Runtime::Python => "python",
            Runtime::Rust => "rust",
        }
    }
}

impl fmt::Display for Runtime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Runtime::TypeScript => write!(f, "TypeScript"),
            Runtime::Dotnet => write!(f, "Dotnet"),
            Runtime::Python => write!(f, "Python"),
            Runtime::Rust => write!(f, "Rust"),
        }
    }
}

impl FromStr for Runtime {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Runtime::ALL
            .into_iter()
            .find(|runtime| runtime.lowercase_name() == wanted)
            .ok_or_else(|| ConfigError::Invalid {
                message: format!("unknown runtime '{}'", s),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_runtime_conversions() {
        let runtime = Runtime::TypeScript;
        assert_eq!(runtime.lowercase_name(), "typescript");
        assert_eq!(runtime.to_string(), "TypeScript");

        let runtime = Runtime::Python;
        assert_eq!(runtime.lowercase_name(), "python");
        assert_eq!(runtime.to_string(), "Python");
    }

    #[test]
    fn test_runtime_parse_accepts_both_spellings() {
        for runtime in Runtime::ALL {
            assert_eq!(runtime.lowercase_name().parse::<Runtime>().unwrap(), runtime);
            assert_eq!(runtime.to_string().parse::<Runtime>().unwrap(), runtime);
        }
        assert_eq!(" DOTNET ".parse::<Runtime>().unwrap(), Runtime::Dotnet);
    }

    #[test]
    fn test_runtime_parse_unknown() {
        let err = "cobol".parse::<Runtime>().unwrap_err();
        assert!(err.to_string().contains("unknown runtime 'cobol'"));
    }
}

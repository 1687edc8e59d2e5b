//! CLI value enums.

use clap::ValueEnum;

/// Which packages a reverse-dependency search considers.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScopeArg {
    /// Main packages only (a main package matches itself)
    #[default]
    Main,
    /// Test binaries only
    Test,
    /// Every ingested package
    All,
}

impl std::fmt::Display for ScopeArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Main => write!(f, "main"),
            Self::Test => write!(f, "test"),
            Self::All => write!(f, "all"),
        }
    }
}

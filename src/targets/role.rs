//! The external tools a target can invoke

use std::fmt;

/// Role an external tool plays in a target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToolRole {
    Formatter,
    StyleChecker,
    Linter,
    SecurityScanner,
}

impl ToolRole {
    /// The tools run by `verify`, in execution order
    pub const VERIFY_ORDER: [Self; 3] = [Self::StyleChecker, Self::Linter, Self::SecurityScanner];

    /// Program used when the configuration does not name one
    #[must_use]
    pub const fn default_program(self) -> &'static str {
        match self {
            Self::Formatter => "black",
            Self::StyleChecker => "flake8",
            Self::Linter => "pylint",
            Self::SecurityScanner => "bandit",
        }
    }

    /// Tool configuration file passed when the configuration does not name one
    #[must_use]
    pub const fn default_config_file(self) -> Option<&'static str> {
        match self {
            Self::StyleChecker => Some(".flake8"),
            Self::Linter => Some(".pylintrc"),
            Self::Formatter | Self::SecurityScanner => None,
        }
    }

    /// Flag prefix the tool expects in front of its configuration file path
    #[must_use]
    pub const fn config_flag(self) -> &'static str {
        match self {
            Self::Formatter | Self::StyleChecker => "--config=",
            Self::Linter => "--rcfile=",
            Self::SecurityScanner => "--configfile=",
        }
    }

    /// Key of this role in the `tools` section of the configuration file
    #[must_use]
    pub const fn config_key(self) -> &'static str {
        match self {
            Self::Formatter => "formatter",
            Self::StyleChecker => "style_checker",
            Self::Linter => "linter",
            Self::SecurityScanner => "security_scanner",
        }
    }
}

impl fmt::Display for ToolRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match *self {
            Self::Formatter => "formatter",
            Self::StyleChecker => "style checker",
            Self::Linter => "linter",
            Self::SecurityScanner => "security scanner",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_classic_toolchain() {
        assert_eq!(ToolRole::Formatter.default_program(), "black");
        assert_eq!(ToolRole::StyleChecker.default_program(), "flake8");
        assert_eq!(ToolRole::Linter.default_program(), "pylint");
        assert_eq!(ToolRole::SecurityScanner.default_program(), "bandit");
    }

    #[test]
    fn only_checker_and_linter_have_default_config_files() {
        assert_eq!(ToolRole::StyleChecker.default_config_file(), Some(".flake8"));
        assert_eq!(ToolRole::Linter.default_config_file(), Some(".pylintrc"));
        assert_eq!(ToolRole::Formatter.default_config_file(), None);
        assert_eq!(ToolRole::SecurityScanner.default_config_file(), None);
    }

    #[test]
    fn verify_order() {
        assert_eq!(
            ToolRole::VERIFY_ORDER,
            [
                ToolRole::StyleChecker,
                ToolRole::Linter,
                ToolRole::SecurityScanner
            ]
        );
    }
}

//! Target table module
//!
//! Maps target names to the ordered list of tool commands they run

pub mod role;

pub use role::ToolRole;

use crate::config::Config;
use std::path::{Path, PathBuf};

pub const HELP: &str = "help";
pub const AUTOFORMAT: &str = "autoformat";
pub const VERIFY: &str = "verify";

/// Every target name, in table order
pub const TARGET_NAMES: [&str; 3] = [HELP, AUTOFORMAT, VERIFY];

/// One tool invocation of a target, before argument expansion
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    pub role: ToolRole,
    pub program: String,
    /// Arguments as written; glob patterns are expanded at run time
    pub args: Vec<String>,
    pub working_dir: PathBuf,
    /// Tool configuration file passed in `args`, if any
    pub config_file: Option<String>,
}

impl CommandSpec {
    /// Build the command for `role` from the configuration
    ///
    /// Argument order is: configuration flag, extra arguments, source pattern.
    #[must_use]
    pub fn for_role(role: ToolRole, config: &Config, working_dir: &Path) -> Self {
        let config_file = config.config_file(role).map(str::to_owned);

        let mut args = Vec::new();
        if let Some(file) = config_file.as_deref() {
            args.push(format!("{}{file}", role.config_flag()));
        }
        args.extend(config.extra_args(role).iter().cloned());
        args.push(config.pattern().to_owned());

        Self {
            role,
            program: config.program(role).to_owned(),
            args,
            working_dir: working_dir.to_path_buf(),
            config_file,
        }
    }
}

/// What running a target does
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TargetAction {
    /// Print the usage banner
    Usage,
    /// Run commands in order, stopping at the first failure
    Commands(Vec<CommandSpec>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    pub name: String,
    pub description: String,
    pub action: TargetAction,
}

/// Ordered mapping from target name to target
#[derive(Debug, Clone)]
pub struct TargetTable {
    targets: Vec<Target>,
}

impl TargetTable {
    /// Build the `help` / `autoformat` / `verify` table for a working directory
    #[must_use]
    pub fn from_config(config: &Config, working_dir: &Path) -> Self {
        let formatter = CommandSpec::for_role(ToolRole::Formatter, config, working_dir);
        let checks: Vec<CommandSpec> = ToolRole::VERIFY_ORDER
            .iter()
            .map(|role| CommandSpec::for_role(*role, config, working_dir))
            .collect();

        let check_programs: Vec<&str> = checks.iter().map(|spec| spec.program.as_str()).collect();

        let targets = vec![
            Target {
                name: HELP.to_owned(),
                description: "Show this message".to_owned(),
                action: TargetAction::Usage,
            },
            Target {
                name: AUTOFORMAT.to_owned(),
                description: format!(
                    "Format all {} files with {}",
                    config.pattern(),
                    formatter.program
                ),
                action: TargetAction::Commands(vec![formatter]),
            },
            Target {
                name: VERIFY.to_owned(),
                description: format!(
                    "Check all {} files with {}",
                    config.pattern(),
                    join_names(&check_programs)
                ),
                action: TargetAction::Commands(checks),
            },
        ];

        Self { targets }
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Target> {
        self.targets.iter().find(|target| target.name == name)
    }

    /// Target names in table order
    #[must_use]
    pub fn names(&self) -> Vec<String> {
        self.targets.iter().map(|target| target.name.clone()).collect()
    }

    /// Usage banner listing every target
    #[must_use]
    pub fn usage(&self) -> String {
        let width = self
            .targets
            .iter()
            .map(|target| target.name.len())
            .max()
            .unwrap_or(0);

        let mut banner = String::from("Usage: pyqa [OPTIONS] <TARGET>\n\nTargets:\n");
        for target in &self.targets {
            banner.push_str(&format!(
                "  {:<width$}  {}\n",
                target.name, target.description
            ));
        }
        banner.push_str("\nRun 'pyqa --help' for the list of options.\n");
        banner
    }
}

/// "a", "a and b", "a, b and c"
fn join_names(names: &[&str]) -> String {
    match names {
        [] => String::new(),
        [only] => (*only).to_owned(),
        [init @ .., last] => format!("{} and {last}", init.join(", ")),
    }
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "This is a test module")]
mod tests {
    use super::*;

    fn default_table() -> TargetTable {
        TargetTable::from_config(&Config::default(), Path::new("/project"))
    }

    fn commands<'a>(table: &'a TargetTable, name: &str) -> &'a [CommandSpec] {
        match &table.get(name).unwrap().action {
            TargetAction::Commands(specs) => specs,
            TargetAction::Usage => panic!("{name} has no commands"),
        }
    }

    #[test]
    fn table_order_is_help_autoformat_verify() {
        assert_eq!(default_table().names(), vec!["help", "autoformat", "verify"]);
    }

    #[test]
    fn autoformat_runs_black_over_sources() {
        let table = default_table();
        let specs = commands(&table, AUTOFORMAT);
        assert_eq!(specs.len(), 1);
        assert_eq!(specs[0].program, "black");
        assert_eq!(specs[0].args, vec!["*.py"]);
        assert_eq!(specs[0].working_dir, PathBuf::from("/project"));
    }

    #[test]
    fn verify_command_lines_match_the_classic_recipe() {
        let table = default_table();
        let lines: Vec<(String, Vec<String>)> = commands(&table, VERIFY)
            .iter()
            .map(|spec| (spec.program.clone(), spec.args.clone()))
            .collect();

        assert_eq!(
            lines,
            vec![
                (
                    "flake8".to_owned(),
                    vec!["--config=.flake8".to_owned(), "*.py".to_owned()]
                ),
                (
                    "pylint".to_owned(),
                    vec!["--rcfile=.pylintrc".to_owned(), "*.py".to_owned()]
                ),
                ("bandit".to_owned(), vec!["*.py".to_owned()]),
            ]
        );
    }

    #[test]
    fn table_names_match_known_targets() {
        assert_eq!(default_table().names(), TARGET_NAMES);
    }

    #[test]
    fn help_has_no_commands() {
        let table = default_table();
        assert_eq!(table.get(HELP).unwrap().action, TargetAction::Usage);
        assert!(table.get("bogus").is_none());
    }

    #[test]
    fn usage_mentions_every_target() {
        let usage = default_table().usage();
        assert!(usage.contains("help"));
        assert!(usage.contains("autoformat"));
        assert!(usage.contains("verify"));
        assert!(usage.contains("flake8, pylint and bandit"));
    }

    #[test]
    fn join_names_reads_naturally() {
        assert_eq!(join_names(&[]), "");
        assert_eq!(join_names(&["a"]), "a");
        assert_eq!(join_names(&["a", "b"]), "a and b");
        assert_eq!(join_names(&["a", "b", "c"]), "a, b and c");
    }
}

//! Render resolved invocations as shell command lines

use crate::system::Invocation;

/// Format an invocation as a single copy-pasteable shell line
#[must_use]
pub fn format_invocation(invocation: &Invocation) -> String {
    let mut output = shell_escape(&invocation.program);
    for arg in &invocation.args {
        output.push(' ');
        output.push_str(&shell_escape(arg));
    }
    output
}

/// Escape a string for shell execution
/// Uses double quotes for safety, escaping special characters inside
fn shell_escape(s: &str) -> String {
    // If string contains no special characters, return as-is
    if !s.is_empty()
        && s.chars().all(|c| {
            c.is_ascii_alphanumeric()
                || matches!(c, '-' | '_' | '/' | '.' | ':' | '=' | '+' | ',' | '@')
        })
    {
        return s.to_owned();
    }

    // Otherwise, wrap in double quotes and escape special chars
    let mut result = String::from('"');
    for ch in s.chars() {
        match ch {
            '"' => result.push_str(r#"\""#),
            '\\' => result.push_str(r"\\"),
            '$' => result.push_str(r"\$"),
            '`' => result.push_str(r"\`"),
            '!' => result.push_str(r"\!"),
            _ => result.push(ch),
        }
    }
    result.push('"');
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn shell_escape_simple() {
        assert_eq!(shell_escape("simple"), "simple");
        assert_eq!(shell_escape("pkg/mod.py"), "pkg/mod.py");
        assert_eq!(shell_escape("--config=.flake8"), "--config=.flake8");
    }

    #[test]
    fn shell_escape_special_chars() {
        assert_eq!(shell_escape("has space.py"), r#""has space.py""#);
        assert_eq!(shell_escape("has$dollar"), r#""has\$dollar""#);
        assert_eq!(shell_escape(r#"has"quote"#), r#""has\"quote""#);
        assert_eq!(shell_escape("back\\slash"), r#""back\\slash""#);
        assert_eq!(shell_escape("*.py"), r#""*.py""#);
        assert_eq!(shell_escape("wow!.py"), r#""wow\!.py""#);
        assert_eq!(shell_escape(""), r#""""#);
    }

    #[test]
    fn format_invocation_joins_program_and_args() {
        let invocation = Invocation {
            program: "flake8".to_owned(),
            args: vec![
                "--config=.flake8".to_owned(),
                "main.py".to_owned(),
                "my module.py".to_owned(),
            ],
            working_dir: PathBuf::from("/project"),
        };
        assert_eq!(
            format_invocation(&invocation),
            r#"flake8 --config=.flake8 main.py "my module.py""#
        );
    }
}

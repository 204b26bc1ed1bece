//! Shell quoting for displaying commands.
//!
//! Commands are spawned without a shell; quoting only affects how they are
//! rendered in logs and error details, so the rendering can be pasted back
//! into a terminal.

/// Escape a value for use inside single quotes.
/// Replaces `'` with `'\''` (end quote, escaped quote, start quote).
pub fn escape_single_quote_content(value: &str) -> String {
    value.replace('\'', "'\\''")
}

/// Quote a single argument.
/// - Empty strings become `''`
/// - Strings with shell metacharacters are wrapped in single quotes
/// - Embedded single quotes are escaped
pub fn quote_arg(arg: &str) -> String {
    if arg.is_empty() {
        return "''".to_string();
    }

    const SHELL_META: &[char] = &[
        ' ', '\t', '\n', '\'', '"', '\\', '$', '`', '!', '*', '?', '[', ']', '(', ')', '{', '}',
        '<', '>', '|', '&', ';', '#', '~',
    ];

    if !arg.contains(SHELL_META) {
        return arg.to_string();
    }

    format!("'{}'", escape_single_quote_content(arg))
}

/// Quote and space-join arguments.
pub fn quote_args(args: &[String]) -> String {
    args.iter()
        .map(|a| quote_arg(a))
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quote_arg_simple() {
        assert_eq!(quote_arg("deployments"), "deployments");
        assert_eq!(quote_arg("1234567890123456"), "1234567890123456");
    }

    #[test]
    fn quote_arg_with_spaces() {
        assert_eq!(quote_arg("/opt/edge tools/esa-cli"), "'/opt/edge tools/esa-cli'");
    }

    #[test]
    fn quote_arg_with_single_quote() {
        assert_eq!(quote_arg("it's"), "'it'\\''s'");
    }

    #[test]
    fn quote_arg_empty() {
        assert_eq!(quote_arg(""), "''");
    }

    #[test]
    fn quote_args_joins_with_spaces() {
        let args = vec![
            "esa-cli".to_string(),
            "deployments".to_string(),
            "delete".to_string(),
            "1111111111111111".to_string(),
            "2222222222222222".to_string(),
        ];
        assert_eq!(
            quote_args(&args),
            "esa-cli deployments delete 1111111111111111 2222222222222222"
        );
    }
}

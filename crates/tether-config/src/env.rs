use std::sync::OnceLock;

use regex::Regex;

/// Matches `{{ env.VAR }}` and `{{ env.VAR | default("value") }}`
fn placeholder() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"\{\{\s*([A-Za-z0-9_.]+)\s*(?:\|\s*default\("([^"]*)"\))?\s*\}\}"#).expect("must be valid regex")
    })
}

/// Substitute environment placeholders in raw config text
///
/// Comment lines are copied verbatim so commented-out examples never
/// require their variables to be set.
pub fn expand_env(input: &str) -> Result<String, String> {
    let mut lines = Vec::new();

    for line in input.lines() {
        if line.trim_start().starts_with('#') {
            lines.push(line.to_owned());
        } else {
            lines.push(expand_line(line)?);
        }
    }

    let mut output = lines.join("\n");
    if input.ends_with('\n') {
        output.push('\n');
    }

    Ok(output)
}

fn expand_line(line: &str) -> Result<String, String> {
    let mut expanded = String::with_capacity(line.len());
    let mut cursor = 0;

    for captures in placeholder().captures_iter(line) {
        let (Some(whole), Some(key)) = (captures.get(0), captures.get(1)) else {
            continue;
        };

        expanded.push_str(&line[cursor..whole.start()]);
        expanded.push_str(&resolve(key.as_str(), captures.get(2).map(|m| m.as_str()))?);
        cursor = whole.end();
    }

    expanded.push_str(&line[cursor..]);
    Ok(expanded)
}

fn resolve(key: &str, default: Option<&str>) -> Result<String, String> {
    let Some(var_name) = key.strip_prefix("env.").filter(|name| !name.contains('.')) else {
        return Err(format!("only variables scoped with 'env.' are supported: `{key}`"));
    };

    match (std::env::var(var_name), default) {
        (Ok(value), _) => Ok(value),
        (Err(_), Some(fallback)) => Ok(fallback.to_owned()),
        (Err(_), None) => Err(format!("environment variable not found: `{var_name}`")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_without_placeholders_is_unchanged() {
        let input = "model = \"gpt-4o-mini\"\n";
        assert_eq!(expand_env(input).unwrap(), input);
    }

    #[test]
    fn substitutes_set_variable() {
        temp_env::with_var("TETHER_TEST_KEY", Some("sk-test"), || {
            let result = expand_env("api_key = \"{{ env.TETHER_TEST_KEY }}\"").unwrap();
            assert_eq!(result, "api_key = \"sk-test\"");
        });
    }

    #[test]
    fn substitutes_several_variables_on_one_line() {
        let vars = [("TETHER_A", Some("a")), ("TETHER_B", Some("b"))];
        temp_env::with_vars(vars, || {
            let result = expand_env("x = \"{{env.TETHER_A}}-{{ env.TETHER_B }}\"").unwrap();
            assert_eq!(result, "x = \"a-b\"");
        });
    }

    #[test]
    fn unset_variable_is_an_error() {
        temp_env::with_var_unset("TETHER_MISSING", || {
            let err = expand_env("api_key = \"{{ env.TETHER_MISSING }}\"").unwrap_err();
            assert!(err.contains("TETHER_MISSING"));
        });
    }

    #[test]
    fn unset_variable_uses_default() {
        temp_env::with_var_unset("TETHER_MISSING", || {
            let result = expand_env("model = \"{{ env.TETHER_MISSING | default(\"gpt-4o\") }}\"").unwrap();
            assert_eq!(result, "model = \"gpt-4o\"");
        });
    }

    #[test]
    fn set_variable_wins_over_default() {
        temp_env::with_var("TETHER_MODEL", Some("o3"), || {
            let result = expand_env("model = \"{{ env.TETHER_MODEL | default(\"gpt-4o\") }}\"").unwrap();
            assert_eq!(result, "model = \"o3\"");
        });
    }

    #[test]
    fn non_env_scope_is_rejected() {
        let err = expand_env("x = \"{{ vault.KEY }}\"").unwrap_err();
        assert!(err.contains("only variables scoped with 'env.'"));
    }

    #[test]
    fn comment_lines_are_not_expanded() {
        temp_env::with_var_unset("TETHER_MISSING", || {
            let input = "  # api_key = \"{{ env.TETHER_MISSING }}\"";
            assert_eq!(expand_env(input).unwrap(), input);
        });
    }
}

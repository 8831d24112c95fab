/// Quote `text` as a SQL string literal, doubling any embedded single quote.
pub fn quote(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    out.push('\'');
    for c in text.chars() {
        if c == '\'' {
            out.push('\'');
        }
        out.push(c);
    }
    out.push('\'');
    out
}

/// Render a quoted substring-match pattern for the LIKE family.
///
/// The operand is matched literally: `%`, `_` and `\` already present in it
/// are escaped with `\` before the pattern is wrapped in `%...%`. Statements
/// using the result must carry an `ESCAPE '\'` clause.
pub fn like_pattern(operand: &str) -> String {
    let mut escaped = String::with_capacity(operand.len() + 2);
    escaped.push('%');
    for c in operand.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    quote(&escaped)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn quote_plain() {
        assert_eq!(quote("open"), "'open'");
    }

    #[test]
    fn quote_doubles_embedded_quotes() {
        assert_eq!(quote("it's"), "'it''s'");
    }

    #[test]
    fn like_wraps_in_percent() {
        assert_eq!(like_pattern("abc"), "'%abc%'");
    }

    #[test]
    fn like_escapes_user_wildcards() {
        // A literal percent or underscore in the operand must not act as a
        // wildcard in the generated pattern.
        assert_eq!(like_pattern("50%"), r"'%50\%%'");
        assert_eq!(like_pattern("a_b"), r"'%a\_b%'");
        assert_eq!(like_pattern(r"back\slash"), r"'%back\\slash%'");
    }

    #[test]
    fn like_quotes_embedded_quote() {
        assert_eq!(like_pattern("it's"), "'%it''s%'");
    }
}

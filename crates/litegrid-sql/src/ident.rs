use super::{Formatter, ToSql};

/// Quoted identifier fragment.
pub(crate) struct Ident<S>(pub(crate) S);

impl<S: AsRef<str>> ToSql for Ident<S> {
    fn to_sql(self, f: &mut Formatter<'_>) {
        let name = self.0.as_ref();
        f.dst.push('"');
        for c in name.chars() {
            if c == '"' {
                f.dst.push('"');
            }
            f.dst.push(c);
        }
        f.dst.push('"');
    }
}

/// Quote `name` for use as a SQL identifier.
///
/// Wraps the name in double quotes, doubling any embedded double quote. Every
/// user- or metadata-supplied string entering a statement goes through this;
/// it is an injection-safety boundary, not a formatting nicety.
pub fn quote(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 2);
    Ident(name).to_sql(&mut Formatter { dst: &mut out });
    out
}

/// Inverse of [`quote`]: strips the outer quotes and collapses doubled
/// quote characters. Input that is not a quoted identifier is returned
/// unchanged.
pub fn unquote(ident: &str) -> String {
    let Some(inner) = ident
        .strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
    else {
        return ident.to_string();
    };

    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        if c == '"' {
            // Skip the second quote of an escaped pair
            chars.next();
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn quote_plain() {
        assert_eq!(quote("orders"), r#""orders""#);
    }

    #[test]
    fn quote_doubles_embedded_quotes() {
        assert_eq!(quote(r#"we"ird"#), r#""we""ird""#);
    }

    #[test]
    fn round_trip() {
        for name in ["orders", r#"we"ird"#, r#"""#, "a b c", ""] {
            assert_eq!(unquote(&quote(name)), name, "round trip of {name:?}");
        }
    }

    #[test]
    fn unquote_passes_through_unquoted() {
        assert_eq!(unquote("plain"), "plain");
    }
}

//! Positional placeholder encoding.
//!
//! [`encode`] substitutes each `?` in a query template with the matching
//! argument, rendered as escaped, quoted literal text. It is pure text
//! transformation: nothing here talks to a server, so it is independently
//! testable.

use std::borrow::Cow;

use crate::error::SessionError;
use crate::types::Param;

mod escape;

use escape::push_value;

/// Substitute `?` placeholders in `template` with `args`, left to right.
///
/// A [`Param::Single`] becomes one escaped, double-quoted literal; a
/// [`Param::List`] becomes a comma-separated list of them, so `IN (?)` works
/// with one list argument:
/// ```rust
/// use mysql_session::prelude::*;
/// use mysql_session::encode::encode;
///
/// let sql = encode("select * from T where id in (?)", &args![[2, 5, 9]])?;
/// assert_eq!(sql, r#"select * from T where id in ("2","5","9")"#);
/// # Ok::<(), SessionError>(())
/// ```
///
/// Every `?` byte counts as a placeholder; there is no way to escape a
/// literal `?` in the template. With an empty `args` the template is returned
/// unchanged (borrowed), placeholders and all; that caller contract
/// violation is deliberately not validated.
///
/// # Errors
///
/// Returns [`SessionError::Encoding`] when a non-empty `args` does not match
/// the placeholder count in either direction.
pub fn encode<'a>(template: &'a str, args: &[Param]) -> Result<Cow<'a, str>, SessionError> {
    if args.is_empty() {
        return Ok(Cow::Borrowed(template));
    }

    let mut out = String::with_capacity(template.len() + args.len() * 16);
    let mut remaining = args.iter();
    let mut segments = template.split('?');

    // The first segment precedes any placeholder.
    if let Some(head) = segments.next() {
        out.push_str(head);
    }

    for segment in segments {
        let Some(arg) = remaining.next() else {
            return Err(mismatch(template, args.len()));
        };
        push_arg(&mut out, arg);
        out.push_str(segment);
    }

    if remaining.next().is_some() {
        return Err(mismatch(template, args.len()));
    }

    Ok(Cow::Owned(out))
}

fn push_arg(out: &mut String, arg: &Param) {
    match arg {
        Param::Single(value) => push_value(out, value),
        Param::List(values) => {
            for (i, value) in values.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                push_value(out, value);
            }
        }
    }
}

fn mismatch(template: &str, arguments: usize) -> SessionError {
    SessionError::Encoding {
        placeholders: template.matches('?').count(),
        arguments,
        query: template.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::args;
    use crate::types::DbValue;

    #[test]
    fn substitutes_scalars_in_order() {
        let sql = encode(
            "select * from Users where Surname=? and Firstname=?",
            &args!["Smith", "John"],
        )
        .expect("encodes");
        assert_eq!(
            sql,
            r#"select * from Users where Surname="Smith" and Firstname="John""#
        );
    }

    #[test]
    fn surrounding_text_is_untouched() {
        let sql = encode("a ? b ? c", &args![1, 2]).expect("encodes");
        assert_eq!(sql, r#"a "1" b "2" c"#);
    }

    #[test]
    fn list_argument_expands_for_in_clause() {
        let sql = encode("select * from T where id in (?)", &args![[2, 5, 9]]).expect("encodes");
        assert_eq!(sql, r#"select * from T where id in ("2","5","9")"#);
    }

    #[test]
    fn mixed_scalar_and_list() {
        let sql = encode(
            "update Users set Active=? where ID in (?)",
            &args![1, [2, 5, 9]],
        )
        .expect("encodes");
        assert_eq!(sql, r#"update Users set Active="1" where ID in ("2","5","9")"#);
    }

    #[test]
    fn empty_args_returns_template_borrowed() {
        let template = "select ? from t";
        let sql = encode(template, &[]).expect("encodes");
        assert!(matches!(sql, Cow::Borrowed(_)));
        assert_eq!(sql, template);
    }

    #[test]
    fn placeholders_at_both_ends() {
        let sql = encode("?-?", &args![1, 2]).expect("encodes");
        assert_eq!(sql, r#""1"-"2""#);
    }

    #[test]
    fn too_few_arguments_is_an_encoding_error() {
        let err = encode("select ?, ?", &args![1]).expect_err("must fail");
        match err {
            SessionError::Encoding {
                placeholders,
                arguments,
                query,
            } => {
                assert_eq!(placeholders, 2);
                assert_eq!(arguments, 1);
                assert_eq!(query, "select ?, ?");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn too_many_arguments_is_an_encoding_error() {
        let err = encode("select ?", &args![1, 2]).expect_err("must fail");
        match err {
            SessionError::Encoding {
                placeholders,
                arguments,
                ..
            } => {
                assert_eq!(placeholders, 1);
                assert_eq!(arguments, 2);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn escaping_applies_inside_substitutions_only() {
        let sql = encode("select \"literal\" where a=?", &args![r#"x"y"#]).expect("encodes");
        assert_eq!(sql, r#"select "literal" where a="x\"y""#);
    }

    #[test]
    fn null_and_bytes_arguments() {
        let sql = encode(
            "insert into t values (?, ?)",
            &args![DbValue::Null, DbValue::Bytes(vec![0xde, 0xad])],
        )
        .expect("encodes");
        assert_eq!(sql, "insert into t values (NULL, X'DEAD')");
    }

    #[test]
    fn empty_list_expands_to_nothing() {
        let sql = encode("delete from t where id in (?)", &args![Vec::<i64>::new()])
            .expect("encodes");
        assert_eq!(sql, "delete from t where id in ()");
    }
}

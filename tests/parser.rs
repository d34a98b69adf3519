use object_sieve::parse;

mod scalar {
    use object_sieve::error::SyntaxErrorKind;
    use object_sieve::parse;
    use object_sieve::value::{Number, Value};

    #[test]
    fn integers() {
        assert_eq!(parse("123").unwrap(), Value::Number(Number::PosInt(123)));
        assert_eq!(parse("+7").unwrap(), Value::Number(Number::PosInt(7)));
        assert_eq!(parse("-12").unwrap(), Value::Number(Number::NegInt(-12)));
    }

    #[test]
    fn floats() {
        assert_eq!(parse("1.25").unwrap(), Value::Number(Number::Float(1.25)));
        assert_eq!(
            parse("1.2e12").unwrap(),
            Value::Number(Number::Float(1.2e12))
        );
        assert_eq!(parse("1e-3").unwrap(), Value::Number(Number::Float(1e-3)));
        assert_eq!(
            parse("-2.5e+2").unwrap(),
            Value::Number(Number::Float(-250.0))
        );
    }

    #[test]
    fn integer_overflow_is_an_error() {
        let err = parse("99999999999999999999999999").unwrap_err();

        assert!(matches!(err.kind, SyntaxErrorKind::InvalidNumber(_)));
    }

    #[test]
    fn booleans_both_spellings() {
        assert_eq!(parse("true").unwrap(), Value::Bool(true));
        assert_eq!(parse("True").unwrap(), Value::Bool(true));
        assert_eq!(parse("false").unwrap(), Value::Bool(false));
        assert_eq!(parse("False").unwrap(), Value::Bool(false));
    }

    #[test]
    fn null_both_spellings() {
        assert_eq!(parse("null").unwrap(), Value::Null);
        assert_eq!(parse("None").unwrap(), Value::Null);
    }

    #[test]
    fn surrounding_whitespace_is_fine() {
        assert_eq!(parse("  42\n").unwrap(), Value::Number(Number::PosInt(42)));
    }
}

mod string {
    use object_sieve::error::SyntaxErrorKind;
    use object_sieve::parse;
    use object_sieve::value::Value;

    #[test]
    fn double_and_single_quotes() {
        assert_eq!(parse(r#""hello""#).unwrap(), Value::String("hello".into()));
        assert_eq!(parse("'hello'").unwrap(), Value::String("hello".into()));
    }

    #[test]
    fn standard_escapes() {
        assert_eq!(
            parse(r#""a\"b\\c\nd\te""#).unwrap(),
            Value::String("a\"b\\c\nd\te".into())
        );
    }

    #[test]
    fn escaped_quote_of_the_other_kind() {
        assert_eq!(parse(r#"'it\'s'"#).unwrap(), Value::String("it's".into()));
        assert_eq!(parse(r#""say \"hi\"""#).unwrap(), Value::String("say \"hi\"".into()));
    }

    #[test]
    fn unknown_escape_is_preserved() {
        assert_eq!(parse(r#""esca\:ped""#).unwrap(), Value::String(r"esca\:ped".into()));
    }

    #[test]
    fn unicode_escape() {
        assert_eq!(parse(r#""A""#).unwrap(), Value::String("A".into()));
    }

    #[test]
    fn surrogate_pair() {
        assert_eq!(
            parse(r#""😀""#).unwrap(),
            Value::String("😀".into())
        );
    }

    #[test]
    fn lone_high_surrogate_is_an_error() {
        assert!(parse(r#""\uD83D""#).is_err());
    }

    #[test]
    fn unterminated_string() {
        let err = parse(r#""no end"#).unwrap_err();

        assert_eq!(err.kind, SyntaxErrorKind::MissingQuote);
    }

    #[test]
    fn invalid_hex_escape() {
        let err = parse(r#""\uZZZZ""#).unwrap_err();

        assert!(matches!(err.kind, SyntaxErrorKind::InvalidHex(_)));
    }
}

mod sequence {
    use object_sieve::error::SyntaxErrorKind;
    use object_sieve::parse;
    use object_sieve::value::{Number, Value};

    fn ints(ns: &[u64]) -> Value {
        Value::Array(ns.iter().map(|n| Value::Number(Number::PosInt(*n))).collect())
    }

    #[test]
    fn basics() {
        assert_eq!(parse("[1, 2, 3]").unwrap(), ints(&[1, 2, 3]));
        assert_eq!(parse("[]").unwrap(), Value::Array(vec![]));
    }

    #[test]
    fn trailing_comma_is_tolerated() {
        assert_eq!(parse("[1, 2, 3,]").unwrap(), ints(&[1, 2, 3]));
    }

    #[test]
    fn lone_comma_is_not() {
        let err = parse("[,]").unwrap_err();

        assert_eq!(err.kind, SyntaxErrorKind::MissingArrayBracket);
    }

    #[test]
    fn parenthesized_group_is_a_sequence() {
        assert_eq!(parse("(1, 2, 3)").unwrap(), ints(&[1, 2, 3]));
        assert_eq!(parse("()").unwrap(), Value::Array(vec![]));
    }

    #[test]
    fn missing_bracket() {
        let err = parse("[1, 2").unwrap_err();

        assert_eq!(err.kind, SyntaxErrorKind::MissingArrayBracket);
    }

    #[test]
    fn mixed_nesting() {
        assert_eq!(
            parse(r#"[1, "two", [true, None]]"#).unwrap(),
            Value::Array(vec![
                Value::Number(Number::PosInt(1)),
                Value::String("two".into()),
                Value::Array(vec![Value::Bool(true), Value::Null]),
            ])
        );
    }
}

mod mapping {
    use object_sieve::error::SyntaxErrorKind;
    use object_sieve::parse;
    use object_sieve::value::{Number, Value};

    #[test]
    fn basics() {
        let parsed = parse(r#"{"key": "value"}"#).unwrap();
        let object = parsed.unwrap_object();

        assert_eq!(object["key"], Value::String("value".into()));
    }

    #[test]
    fn empty() {
        assert!(parse("{}").unwrap().unwrap_object().is_empty());
    }

    #[test]
    fn single_quoted_keys_and_values() {
        let parsed = parse(r#"{'A': "B"}"#).unwrap();

        assert_eq!(parsed.unwrap_object()["A"], Value::String("B".into()));
    }

    #[test]
    fn trailing_comma_is_tolerated() {
        let parsed = parse(r#"{"a": 1,}"#).unwrap();

        assert_eq!(parsed.unwrap_object()["a"], Value::Number(Number::PosInt(1)));
    }

    #[test]
    fn duplicate_key_keeps_the_last_value() {
        let parsed = parse(r#"{"a": 1, "a": 2}"#).unwrap();
        let object = parsed.unwrap_object();

        assert_eq!(object.len(), 1);
        assert_eq!(object["a"], Value::Number(Number::PosInt(2)));
    }

    #[test]
    fn insertion_order_is_preserved() {
        let parsed = parse(r#"{"z": 1, "a": 2, "m": 3}"#).unwrap();
        let keys: Vec<&str> = parsed.unwrap_object().keys().map(String::as_str).collect();

        assert_eq!(keys, ["z", "a", "m"]);
    }

    #[test]
    fn bare_keys_are_rejected() {
        let err = parse("{invalid: syntax}").unwrap_err();

        assert_eq!(err.kind, SyntaxErrorKind::InvalidKey("invalid".into()));
    }

    #[test]
    fn missing_colon() {
        let err = parse(r#"{"a" 1}"#).unwrap_err();

        assert_eq!(err.kind, SyntaxErrorKind::MissingColon);
    }

    #[test]
    fn missing_brace() {
        let err = parse(r#"{"a": 1"#).unwrap_err();

        assert_eq!(err.kind, SyntaxErrorKind::MissingObjectBrace);
    }

    #[test]
    fn comma_with_no_pair() {
        assert!(parse("{,}").is_err());
    }

    #[test]
    fn deep_nesting() {
        let parsed = parse(r#"{"a": {"b": [1, {"c": "d"}]}}"#).unwrap();
        let inner = parsed.unwrap_object()["a"].unwrap_object();
        let list = inner["b"].unwrap_array();

        assert_eq!(list[0], Value::Number(Number::PosInt(1)));
        assert_eq!(list[1].unwrap_object()["c"], Value::String("d".into()));
    }
}

#[test]
fn trailing_garbage_is_an_error() {
    use object_sieve::error::SyntaxErrorKind;

    let err = parse(r#"{"a": 1} extra"#).unwrap_err();

    assert!(matches!(err.kind, SyntaxErrorKind::CharsAfterRoot(_)));
}

#[test]
fn deep_nesting_fails_without_overflowing() {
    use object_sieve::error::SyntaxErrorKind;

    // Balanced and grammatically valid, but far past the nesting cap: the
    // evaluator must report an error, not exhaust the stack
    let text = format!("{}1{}", "[".repeat(2000), "]".repeat(2000));
    let err = parse(&text).unwrap_err();

    assert_eq!(err.kind, SyntaxErrorKind::RecursionLimitExceeded);
}

#[test]
fn nesting_within_the_cap_still_evaluates() {
    let text = format!("{}1{}", "[".repeat(100), "]".repeat(100));

    assert!(parse(&text).is_ok());
}

#[test]
fn error_reports_character_offset() {
    // The CJK prefix is 3 bytes per character, the reported position is in
    // characters
    let err = parse("你好 oops").unwrap_err();

    assert_eq!(err.char_offset, 0);

    let err = parse(r#"["ok", oops]"#).unwrap_err();

    assert_eq!(err.char_offset, 7);
}

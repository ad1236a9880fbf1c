use cfgbind_types::{Error, ScalarKind, ScalarType, ScalarValue};
use proptest::prelude::*;

// ── ScalarKind keywords ──────────────────────────────────────────

#[test]
fn keywords_resolve() {
    assert_eq!(ScalarKind::from_keyword("string"), Some(ScalarKind::String));
    assert_eq!(ScalarKind::from_keyword("integer"), Some(ScalarKind::Integer));
    assert_eq!(ScalarKind::from_keyword("float"), Some(ScalarKind::Float));
    assert_eq!(ScalarKind::from_keyword("double"), Some(ScalarKind::Double));
    assert_eq!(ScalarKind::from_keyword("boolean"), Some(ScalarKind::Boolean));
}

#[test]
fn unknown_keyword_is_none() {
    assert_eq!(ScalarKind::from_keyword("array"), None);
    assert_eq!(ScalarKind::from_keyword("String"), None);
    assert_eq!(ScalarKind::from_keyword(""), None);
}

#[test]
fn parse_unknown_keyword_errors() {
    let err = "widget".parse::<ScalarKind>().unwrap_err();
    assert_eq!(err, Error::UnknownScalarKind("widget".into()));
}

#[test]
fn display_is_keyword() {
    for kind in ScalarKind::ALL {
        assert_eq!(kind.to_string(), kind.keyword());
    }
}

// ── Casting ──────────────────────────────────────────────────────

#[test]
fn cast_string_keeps_text_verbatim() {
    let v = ScalarValue::cast("  DEBUG ", ScalarKind::String).unwrap();
    assert_eq!(v, ScalarValue::String("  DEBUG ".into()));
}

#[test]
fn cast_integer() {
    assert_eq!(
        ScalarValue::cast(" 42 ", ScalarKind::Integer).unwrap(),
        ScalarValue::Integer(42)
    );
    assert_eq!(
        ScalarValue::cast("-7", ScalarKind::Integer).unwrap(),
        ScalarValue::Integer(-7)
    );
}

#[test]
fn cast_non_numeric_integer_fails() {
    let err = ScalarValue::cast("forty-two", ScalarKind::Integer).unwrap_err();
    assert_eq!(
        err,
        Error::InvalidScalar {
            kind: ScalarKind::Integer,
            raw: "forty-two".into()
        }
    );
}

#[test]
fn cast_float_and_double() {
    assert_eq!(
        ScalarValue::cast("1.5", ScalarKind::Float).unwrap(),
        ScalarValue::Float(1.5)
    );
    assert_eq!(
        ScalarValue::cast("2.25", ScalarKind::Double).unwrap(),
        ScalarValue::Double(2.25)
    );
    assert!(ScalarValue::cast("x", ScalarKind::Double).is_err());
}

#[test]
fn cast_boolean_variants() {
    for raw in ["true", "TRUE", "yes", "1"] {
        assert_eq!(
            ScalarValue::cast(raw, ScalarKind::Boolean).unwrap(),
            ScalarValue::Boolean(true)
        );
    }
    for raw in ["false", "No", "0"] {
        assert_eq!(
            ScalarValue::cast(raw, ScalarKind::Boolean).unwrap(),
            ScalarValue::Boolean(false)
        );
    }
    assert!(ScalarValue::cast("maybe", ScalarKind::Boolean).is_err());
}

#[test]
fn kind_of_value() {
    assert_eq!(ScalarValue::Integer(1).kind(), ScalarKind::Integer);
    assert_eq!(ScalarValue::Boolean(true).kind(), ScalarKind::Boolean);
}

// ── ScalarType ───────────────────────────────────────────────────

#[test]
fn scalar_type_kinds() {
    assert_eq!(<String as ScalarType>::KIND, ScalarKind::String);
    assert_eq!(<i64 as ScalarType>::KIND, ScalarKind::Integer);
    assert_eq!(<f32 as ScalarType>::KIND, ScalarKind::Float);
    assert_eq!(<f64 as ScalarType>::KIND, ScalarKind::Double);
    assert_eq!(<bool as ScalarType>::KIND, ScalarKind::Boolean);
}

#[test]
fn scalar_type_rejects_mismatched_kind() {
    assert_eq!(i64::from_scalar(ScalarValue::String("1".into())), None);
    assert_eq!(bool::from_scalar(ScalarValue::Boolean(true)), Some(true));
}

// ── Properties ───────────────────────────────────────────────────

proptest! {
    /// Display output casts back to the same value.
    #[test]
    fn integer_display_casts_back(i in any::<i64>()) {
        let v = ScalarValue::Integer(i);
        prop_assert_eq!(ScalarValue::cast(&v.to_string(), ScalarKind::Integer).unwrap(), v);
    }

    #[test]
    fn double_display_casts_back(d in -1.0e12f64..1.0e12) {
        let v = ScalarValue::Double(d);
        prop_assert_eq!(ScalarValue::cast(&v.to_string(), ScalarKind::Double).unwrap(), v);
    }

    #[test]
    fn string_cast_never_fails(s in ".*") {
        prop_assert_eq!(ScalarValue::cast(&s, ScalarKind::String).unwrap(), ScalarValue::String(s));
    }
}

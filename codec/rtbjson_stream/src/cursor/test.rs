use super::{Cursor, Position};
use crate::{
    error::{Error, Expected},
    source::Source,
    token::Tag,
    token_stream::TokenStream,
};

fn tokenize(text: &str) -> TokenStream {
    TokenStream::tokenize(&Source::from(text)).unwrap()
}

#[test]
fn walk_object() {
    let stream = tokenize(r#"{"a": 1, "b": "x", "c": [true, 0]}"#);
    let mut cursor = Cursor::new(&stream);

    cursor.begin_object().unwrap();

    assert!(cursor.has_next());
    assert_eq!(cursor.peek_field_name(), Some("a"));
    assert_eq!(cursor.field_name().unwrap(), "a");
    assert_eq!(cursor.integer().unwrap(), 1);

    assert_eq!(cursor.field_name().unwrap(), "b");
    assert_eq!(cursor.string().unwrap(), "x");

    assert_eq!(cursor.field_name().unwrap(), "c");
    cursor.begin_array().unwrap();
    assert!(cursor.boolean().unwrap());
    assert!(!cursor.boolean().unwrap());
    assert!(!cursor.has_next());
    cursor.end_array().unwrap();

    assert!(!cursor.has_next());
    cursor.end_object().unwrap();

    assert!(cursor.is_exhausted());
    assert_eq!(cursor.position(), Position {
        tag: None,
        location: stream.end()
    });
}

#[test]
fn skip_subtree() {
    let stream = tokenize(r#"{"a": {"b": [1, {"c": 2}]}, "d": 3}"#);
    let mut cursor = Cursor::new(&stream);

    cursor.begin_object().unwrap();
    cursor.field_name().unwrap();

    let end = cursor.value_end().unwrap();
    cursor.skip_value().unwrap();

    assert_eq!(cursor.index(), end);
    assert_eq!(cursor.field_name().unwrap(), "d");
    assert_eq!(cursor.integer().unwrap(), 3);
}

#[test]
fn position_is_a_witness() {
    let stream = tokenize(r#"{"a": 1, "b": 2}"#);
    let mut cursor = Cursor::new(&stream);

    cursor.begin_object().unwrap();

    let before = cursor.position();
    assert_eq!(before.tag, Some(Tag::Name));
    assert_eq!(before.location, 1);

    // a failed read leaves the cursor where it was
    assert!(cursor.string().is_err());
    assert_eq!(cursor.position(), before);

    cursor.field_name().unwrap();
    assert_ne!(cursor.position(), before);

    let index = cursor.index();
    cursor.skip_value().unwrap();
    cursor.seek(index);

    assert_eq!(cursor.position().tag, Some(Tag::Number));
}

#[test]
fn unexpected_tokens() {
    let stream = tokenize(r#"{"a": "x"}"#);
    let mut cursor = Cursor::new(&stream);

    assert!(matches!(
        cursor.begin_array(),
        Err(Error::UnexpectedToken {
            expected: Expected::Array,
            found: Tag::BeginObject,
            at: 0
        })
    ));

    cursor.begin_object().unwrap();
    cursor.field_name().unwrap();

    assert!(matches!(
        cursor.integer(),
        Err(Error::UnexpectedToken {
            expected: Expected::Number,
            found: Tag::String,
            at: 6
        })
    ));

    cursor.string().unwrap();
    cursor.end_object().unwrap();

    assert!(matches!(
        cursor.end_object(),
        Err(Error::UnexpectedEndOfStream { expected: Expected::ObjectEnd })
    ));
}

#[test]
fn numbers() {
    let stream = tokenize("[-3, 3.0, 3.5, 18446744073709551615]");
    let mut cursor = Cursor::new(&stream);

    cursor.begin_array().unwrap();

    assert_eq!(cursor.integer().unwrap(), -3);
    assert_eq!(cursor.integer().unwrap(), 3);

    assert!(matches!(
        cursor.integer(),
        Err(Error::NumberOutOfRange { at: 10 })
    ));
    assert!(matches!(cursor.float(), Ok(float) if (float - 3.5).abs() < 1e-9));

    assert!(matches!(cursor.integer(), Err(Error::NumberOutOfRange { .. })));
    assert_eq!(cursor.unsigned().unwrap(), u64::MAX);
    cursor.end_array().unwrap();
}

#[test]
fn unsigned_rejects_negative() {
    let stream = tokenize("[-1]");
    let mut cursor = Cursor::new(&stream);

    cursor.begin_array().unwrap();

    assert!(matches!(
        cursor.unsigned(),
        Err(Error::NumberOutOfRange { at: 1 })
    ));

    // the failed read did not consume the number
    assert_eq!(cursor.integer().unwrap(), -1);
}

#[test]
fn booleans() {
    let stream = tokenize("[true, false, 1, 0, 2, \"1\"]");
    let mut cursor = Cursor::new(&stream);

    cursor.begin_array().unwrap();

    assert!(cursor.boolean().unwrap());
    assert!(!cursor.boolean().unwrap());
    assert!(cursor.boolean().unwrap());
    assert!(!cursor.boolean().unwrap());
    assert!(matches!(cursor.boolean(), Err(Error::InvalidBoolean { at: 20 })));

    cursor.skip_value().unwrap();
    assert!(matches!(
        cursor.boolean(),
        Err(Error::UnexpectedToken { expected: Expected::Boolean, .. })
    ));
}

#[test]
fn string_lists() {
    let stream = tokenize(r#"[["a", "b"], "c, d,,e", [], 1]"#);
    let mut cursor = Cursor::new(&stream);

    cursor.begin_array().unwrap();

    assert_eq!(cursor.string_list().unwrap(), vec!["a", "b"]);
    assert_eq!(cursor.string_list().unwrap(), vec!["c", "d", "e"]);
    assert!(cursor.string_list().unwrap().is_empty());
    assert!(matches!(
        cursor.string_list(),
        Err(Error::UnexpectedToken { expected: Expected::StringList, .. })
    ));
}

#[test]
fn failed_string_list_leaves_the_cursor() {
    let stream = tokenize(r#"[["a", 1], "b"]"#);
    let mut cursor = Cursor::new(&stream);

    cursor.begin_array().unwrap();
    let before = cursor.position();

    assert!(matches!(
        cursor.string_list(),
        Err(Error::UnexpectedToken { expected: Expected::String, .. })
    ));
    assert_eq!(cursor.position(), before);

    cursor.skip_value().unwrap();
    assert_eq!(cursor.string_list().unwrap(), vec!["b"]);
}

#[test]
fn located_string_lists() {
    let stream = tokenize(r#"[["a", "b"], "c,d"]"#);
    let mut cursor = Cursor::new(&stream);

    cursor.begin_array().unwrap();

    assert_eq!(cursor.located_string_list().unwrap(), vec![
        ("a".to_owned(), 2),
        ("b".to_owned(), 7)
    ]);
    assert_eq!(cursor.located_string_list().unwrap(), vec![
        ("c".to_owned(), 13),
        ("d".to_owned(), 13)
    ]);
}

#[test]
fn nulls() {
    let stream = tokenize("[null, 1]");
    let mut cursor = Cursor::new(&stream);

    cursor.begin_array().unwrap();

    assert!(cursor.is_null());
    assert!(cursor.null());
    assert!(!cursor.is_null());
    assert!(!cursor.null());
    assert_eq!(cursor.integer().unwrap(), 1);
}

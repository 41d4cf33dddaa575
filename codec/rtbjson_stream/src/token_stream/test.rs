use proptest::{prop_assert, proptest};

use super::{
    arbitrary::{arbitrary_value, assert_spans, assert_tokens},
    TokenStream,
};
use crate::{
    error::{Error, Expected},
    source::{Location, Source},
    token::Kind,
};

fn tokenize(text: &str) -> Result<TokenStream, Error> {
    TokenStream::tokenize(&Source::from(text))
}

proptest! {
    #[test]
    #[allow(clippy::ignored_unit_patterns)]
    fn compact_document(value in arbitrary_value()) {
        let source = value.to_string();
        let token_stream = tokenize(&source).unwrap();

        let rest = assert_tokens(&value, &token_stream)?;
        prop_assert!(rest.is_empty());

        assert_spans(&source, &token_stream)?;
    }

    #[test]
    #[allow(clippy::ignored_unit_patterns)]
    fn pretty_document(value in arbitrary_value()) {
        let source = serde_json::to_string_pretty(&value).unwrap();
        let token_stream = tokenize(&source).unwrap();

        let rest = assert_tokens(&value, &token_stream)?;
        prop_assert!(rest.is_empty());

        assert_spans(&source, &token_stream)?;
    }

    #[test]
    #[allow(clippy::ignored_unit_patterns)]
    fn value_end_of_root(value in arbitrary_value()) {
        let token_stream = tokenize(&value.to_string()).unwrap();

        prop_assert!(token_stream.value_end(0) == Some(token_stream.len()));
    }
}

#[test]
fn object_with_nested_array() {
    let token_stream = tokenize(r#"{"a": [1, true], "b": null}"#).unwrap();

    let kinds = token_stream
        .iter()
        .map(|token| token.kind.clone())
        .collect::<Vec<_>>();

    assert_eq!(kinds, vec![
        Kind::BeginObject,
        Kind::Name("a".to_owned()),
        Kind::BeginArray,
        Kind::Number(1.into()),
        Kind::Boolean(true),
        Kind::EndArray,
        Kind::Name("b".to_owned()),
        Kind::Null,
        Kind::EndObject,
    ]);

    // `a` value spans from the `[` to after the `]`
    assert_eq!(token_stream.value_end(2), Some(6));
    assert_eq!(token_stream.value_end(1), None);
    assert_eq!(token_stream.value_end(5), None);
}

#[test]
fn escaped_string() {
    let token_stream = tokenize(r#"["a\"bé\n"]"#).unwrap();

    assert_eq!(token_stream[1].kind, Kind::String("a\"b\u{e9}\n".to_owned()));
}

#[test]
fn empty_containers() {
    let token_stream = tokenize("{\"a\":{},\"b\":[]}").unwrap();

    assert_eq!(token_stream.len(), 8);
    assert_eq!(token_stream.end(), 15);
}

#[test]
fn trailing_comma() {
    assert!(matches!(
        tokenize("[1,]"),
        Err(Error::UnexpectedCharacter { found: ']', at: 3 })
    ));
    assert!(matches!(
        tokenize(r#"{"a":1,}"#),
        Err(Error::UnexpectedCharacter { found: '}', at: 7 })
    ));
}

#[test]
fn mismatched_delimiter() {
    assert!(matches!(
        tokenize("[1}"),
        Err(Error::UnexpectedCharacter { found: '}', at: 2 })
    ));
}

#[test]
fn missing_colon() {
    assert!(matches!(
        tokenize(r#"{"a" 1}"#),
        Err(Error::InvalidNumber { at: 5, .. })
    ));
}

#[test]
fn unterminated_document() {
    assert!(matches!(
        tokenize(r#"{"a":1"#),
        Err(Error::UnexpectedEndOfInput { expected: Expected::ObjectEnd })
    ));
    assert!(matches!(
        tokenize(r#"{"a":"#),
        Err(Error::UnexpectedEndOfInput { expected: Expected::Value })
    ));
    assert!(matches!(
        tokenize("{"),
        Err(Error::UnexpectedEndOfInput { expected: Expected::Name })
    ));
    assert!(matches!(
        tokenize(""),
        Err(Error::UnexpectedEndOfInput { expected: Expected::Value })
    ));
}

#[test]
fn trailing_value() {
    assert!(matches!(
        tokenize("{} {}"),
        Err(Error::UnexpectedCharacter { found: '{', at: 3 })
    ));
}

#[test]
fn unterminated_string() {
    assert!(matches!(
        tokenize(r#"["abc"#),
        Err(Error::UnterminatedString { at: 1 })
    ));
}

#[test]
fn invalid_literals() {
    assert!(matches!(
        tokenize("[nul]"),
        Err(Error::InvalidLiteral { ref literal, at: 1 }) if literal == "nul"
    ));
    assert!(matches!(
        tokenize("[01.]"),
        Err(Error::InvalidNumber { ref literal, at: 1 }) if literal == "01."
    ));
    assert!(matches!(
        tokenize("[@]"),
        Err(Error::UnexpectedCharacter { found: '@', at: 1 })
    ));
}

#[test]
fn error_location() {
    let source = Source::from("{\n  \"a\": 1,\n  \"b\": @\n}");
    let error = TokenStream::tokenize(&source).unwrap_err();

    let location = error.at().and_then(|at| source.get_location(at));

    assert_eq!(location, Some(Location::new(2, 7)));
    assert_eq!(location.unwrap().to_string(), "line 3, column 8");
}

#![allow(missing_docs)]

use proptest::{
    collection::{btree_map, vec},
    prelude::{any, Just, Strategy},
    prop_assert_eq, prop_oneof,
    test_runner::TestCaseResult,
};
use serde_json::Value;

use crate::token::{Kind, Token};

/// Generates a JSON value of bounded depth and width.
pub fn arbitrary_value() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(Value::from),
        any::<u64>().prop_map(Value::from),
        (-1.0e6..1.0e6f64).prop_map(Value::from),
        "[a-z \\\\\"\u{e9}\u{1f600}\n\t]{0,8}".prop_map(Value::String),
    ];

    leaf.prop_recursive(4, 32, 6, |inner| {
        prop_oneof![
            vec(inner.clone(), 0..6).prop_map(Value::Array),
            btree_map("[a-z]{1,6}", inner, 0..6)
                .prop_map(|map| Value::Object(map.into_iter().collect())),
        ]
    })
}

/// Asserts that `tokens` is exactly the flattening of `value`, returning the
/// rest of the tokens.
pub fn assert_tokens<'a>(
    value: &Value,
    tokens: &'a [Token],
) -> Result<&'a [Token], proptest::test_runner::TestCaseError> {
    let Some((first, mut rest)) = tokens.split_first() else {
        return Err(proptest::test_runner::TestCaseError::fail(
            "ran out of tokens",
        ));
    };

    match value {
        Value::Null => prop_assert_eq!(&first.kind, &Kind::Null),
        Value::Bool(boolean) => {
            prop_assert_eq!(&first.kind, &Kind::Boolean(*boolean));
        }
        Value::Number(number) => {
            prop_assert_eq!(&first.kind, &Kind::Number(number.clone()));
        }
        Value::String(string) => {
            prop_assert_eq!(&first.kind, &Kind::String(string.clone()));
        }

        Value::Array(elements) => {
            prop_assert_eq!(&first.kind, &Kind::BeginArray);

            for element in elements {
                rest = assert_tokens(element, rest)?;
            }

            let (last, after) = split_first(rest)?;
            prop_assert_eq!(&last.kind, &Kind::EndArray);
            rest = after;
        }

        Value::Object(fields) => {
            prop_assert_eq!(&first.kind, &Kind::BeginObject);

            for (name, field) in fields {
                let (token, after) = split_first(rest)?;
                prop_assert_eq!(&token.kind, &Kind::Name(name.clone()));

                rest = assert_tokens(field, after)?;
            }

            let (last, after) = split_first(rest)?;
            prop_assert_eq!(&last.kind, &Kind::EndObject);
            rest = after;
        }
    }

    Ok(rest)
}

fn split_first(
    tokens: &[Token],
) -> Result<(&Token, &[Token]), proptest::test_runner::TestCaseError> {
    tokens.split_first().ok_or_else(|| {
        proptest::test_runner::TestCaseError::fail("ran out of tokens")
    })
}

/// Asserts that the spans of the tokens point at the source text they were
/// produced from.
pub fn assert_spans(source: &str, tokens: &[Token]) -> TestCaseResult {
    for token in tokens {
        let text = &source[token.span.range()];

        match &token.kind {
            Kind::BeginObject => prop_assert_eq!(text, "{"),
            Kind::EndObject => prop_assert_eq!(text, "}"),
            Kind::BeginArray => prop_assert_eq!(text, "["),
            Kind::EndArray => prop_assert_eq!(text, "]"),
            Kind::Null => prop_assert_eq!(text, "null"),
            Kind::Boolean(boolean) => {
                prop_assert_eq!(text, boolean.to_string());
            }
            Kind::Name(_) | Kind::String(_) => {
                prop_assert_eq!(text.chars().next(), Some('"'));
                prop_assert_eq!(text.chars().last(), Some('"'));
            }
            Kind::Number(_) => {}
        }
    }

    Ok(())
}

use super::Options;
use crate::error::Error;

#[test]
fn defaults() {
    let options = Options::default();

    assert!(options.strict);
    assert!(!options.pretty);
    assert_eq!(options.wrapper_key, "ext");

    assert_eq!(Options::from_toml_str("").unwrap(), options);
}

#[test]
fn partial_document() {
    let options = Options::from_toml_str(
        r#"
        strict = false
        wrapper_key = "extension"
        "#,
    )
    .unwrap();

    assert_eq!(options, Options {
        strict: false,
        pretty: false,
        wrapper_key: "extension".to_owned(),
    });
}

#[test]
fn invalid_documents() {
    assert!(matches!(
        Options::from_toml_str("strictness = true"),
        Err(Error::Config(_))
    ));
    assert!(matches!(
        Options::from_toml_str("pretty = \"yes\""),
        Err(Error::Config(_))
    ));
}

#[test]
fn toml_round_trip() {
    let options = Options {
        strict: false,
        pretty: true,
        wrapper_key: "x".to_owned(),
    };

    let text = options.to_toml_string().unwrap();

    assert!(text.contains("wrapper_key = \"x\""));
    assert_eq!(Options::from_toml_str(&text).unwrap(), options);
}

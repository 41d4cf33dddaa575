use std::any::TypeId;

use super::{ExtensionKey, Extensions, Payload, Shape};

#[derive(Debug, Clone, PartialEq, Default)]
struct Container;

#[derive(Debug, Clone, PartialEq, Default)]
struct Message {
    a: Option<String>,
    b: Option<i64>,
}

const SCALAR: ExtensionKey<Container, String> = ExtensionKey::scalar("scalar");
const SINGULAR: ExtensionKey<Container, Message> =
    ExtensionKey::singular("singular");
const REPEATED: ExtensionKey<Container, Vec<Message>> =
    ExtensionKey::repeated("repeated");

#[test]
fn key_properties() {
    assert_eq!(SCALAR.shape(), Shape::Scalar);
    assert_eq!(SINGULAR.shape(), Shape::Singular);
    assert_eq!(REPEATED.shape(), Shape::Repeated);

    assert_eq!(SCALAR.payload_type(), TypeId::of::<String>());
    assert_eq!(SINGULAR.payload_type(), TypeId::of::<Message>());
    assert_eq!(REPEATED.payload_type(), TypeId::of::<Message>());

    assert_eq!(REPEATED.name(), "repeated");
}

#[test]
fn set_get_remove() {
    let mut extensions = Extensions::<Container>::new();
    assert!(extensions.is_empty());

    assert_eq!(extensions.set(&SCALAR, "x".to_owned()), None);
    assert_eq!(extensions.set(&SCALAR, "y".to_owned()), Some("x".to_owned()));
    assert_eq!(extensions.get(&SCALAR).map(String::as_str), Some("y"));
    assert!(extensions.contains(&SCALAR));
    assert!(!extensions.contains(&SINGULAR));

    extensions.get_mut(&SCALAR).unwrap().push('z');
    assert_eq!(extensions.get(&SCALAR).map(String::as_str), Some("yz"));

    assert_eq!(extensions.remove(&SCALAR), Some("yz".to_owned()));
    assert!(extensions.is_empty());
}

#[test]
fn update_accumulates() {
    let mut extensions = Extensions::<Container>::new();

    extensions.update(&SINGULAR, |message| message.a = Some("a".to_owned()));
    extensions.update(&SINGULAR, |message| message.b = Some(1));

    assert_eq!(
        extensions.get(&SINGULAR),
        Some(&Message { a: Some("a".to_owned()), b: Some(1) })
    );
    assert_eq!(extensions.len(), 1);
}

#[test]
fn add_appends() {
    let mut extensions = Extensions::<Container>::new();

    extensions.add(&REPEATED, Message { b: Some(1), ..Message::default() });
    extensions.add(&REPEATED, Message { b: Some(2), ..Message::default() });

    let elements = extensions.get(&REPEATED).unwrap();
    assert_eq!(elements.len(), 2);
    assert_eq!(elements[1].b, Some(2));

    let (name, slot) = extensions.iter().next().unwrap();
    assert_eq!(name, "repeated");
    assert_eq!(slot.shape(), Shape::Repeated);
    assert_eq!(slot.payload_type(), TypeId::of::<Message>());
    assert_eq!(slot.value().concrete_type(), TypeId::of::<Vec<Message>>());
}

#[test]
fn mismatched_type_is_empty() {
    const OTHER: ExtensionKey<Container, i64> = ExtensionKey::scalar("scalar");

    let mut extensions = Extensions::<Container>::new();
    extensions.set(&SCALAR, "x".to_owned());

    assert_eq!(extensions.get(&OTHER), None);
    assert_eq!(extensions.update(&OTHER, |value| *value), 0);
    assert_eq!(extensions.get(&OTHER), Some(&0));
    assert_eq!(extensions.get(&SCALAR), None);
}

#[test]
fn clone_and_compare() {
    let mut first = Extensions::<Container>::new();
    first.set(&SINGULAR, Message { a: Some("a".to_owned()), b: None });

    let mut second = first.clone();
    assert_eq!(first, second);

    second.update(&SINGULAR, |message| message.b = Some(3));
    assert_ne!(first, second);
    assert_eq!(first.get(&SINGULAR).unwrap().b, None);
}

#[test]
fn erased_downcast() {
    let boxed: Box<dyn Payload> = Box::new(Message::default());

    assert!(boxed.downcast_ref::<String>().is_none());
    assert!(boxed.eq_payload(&Message::default()));

    let boxed = boxed.downcast::<String>().unwrap_err();
    assert_eq!(*boxed.downcast::<Message>().unwrap(), Message::default());
}

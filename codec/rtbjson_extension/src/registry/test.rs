use std::any::TypeId;

use rtbjson_model::{
    request::{Imp, Site},
    ExtensionKey,
};

use super::{Registry, RegistryBuilder};
use crate::{
    reader::{message_fn, ExtensionReader, Progress},
    writer::{writer_fn, ElementLayout, ExtensionWriter},
};

#[derive(Debug, Clone, PartialEq, Default)]
struct Flag {
    on: Option<bool>,
}

const FLAG: ExtensionKey<Imp, Flag> = ExtensionKey::singular("flag");

fn flag_reader(name: &'static str) -> ExtensionReader<Imp> {
    ExtensionReader::singular(
        FLAG,
        message_fn(name, &["on"], |flag: &mut Flag, _, cursor| {
            flag.on = Some(cursor.boolean()?);
            Ok(Progress::Consumed)
        }),
    )
}

#[test]
fn readers_keep_the_registration_order() {
    let mut builder = RegistryBuilder::new();
    builder
        .register_reader(flag_reader("first"))
        .register_reader(flag_reader("second"))
        .register_reader(flag_reader("third"));
    let registry = builder.build();

    let names = registry
        .readers::<Imp>()
        .iter()
        .map(ExtensionReader::name)
        .collect::<Vec<_>>();

    assert_eq!(names, ["first", "second", "third"]);
}

#[test]
fn readers_are_kept_per_container() {
    let mut builder = RegistryBuilder::new();
    builder.register_reader(flag_reader("imp"));
    let registry = builder.build();

    assert_eq!(registry.readers::<Imp>().len(), 1);
    assert!(registry.readers::<Site>().is_empty());
    assert!(registry.readers::<String>().is_empty());
}

#[test]
fn duplicate_writers_are_rejected() {
    let mut builder = RegistryBuilder::new();

    assert!(builder.register_writer::<Imp, Flag>(writer_fn(|_, _| Ok(()))));
    assert!(!builder.register_writer::<Imp, Flag>(writer_fn(|_, _| Ok(()))));

    // another path, or the repeated shape of the same type, is another key
    assert!(builder.register_writer::<Site, Flag>(writer_fn(|_, _| Ok(()))));
    assert!(builder.register_repeated_writer::<Imp, Flag>(
        "flags",
        ElementLayout::Object,
        writer_fn(|_, _| Ok(())),
    ));
    assert!(!builder.register_writer_at::<Flag>(
        "Site",
        writer_fn(|_, _| Ok(()))
    ));

    let registry = builder.build();

    assert!(matches!(
        registry.writer("Imp", TypeId::of::<Flag>(), false),
        Some(ExtensionWriter::Regular(_))
    ));
    assert!(matches!(
        registry.writer("Imp", TypeId::of::<Flag>(), true),
        Some(ExtensionWriter::Repeated { root_name: "flags", .. })
    ));
    assert!(registry.writer("Imp", TypeId::of::<bool>(), false).is_none());
    assert!(registry.writer("Geo", TypeId::of::<Flag>(), false).is_none());
}

#[test]
fn slot_writers_are_kept_per_name() {
    const TIER: ExtensionKey<Imp, i64> = ExtensionKey::scalar("tier");
    const SCORE: ExtensionKey<Imp, i64> = ExtensionKey::scalar("score");

    let mut builder = RegistryBuilder::new();

    assert!(builder.register_slot_writer(TIER, writer_fn(|_, _| Ok(()))));
    assert!(builder.register_slot_writer(SCORE, writer_fn(|_, _| Ok(()))));
    assert!(!builder.register_slot_writer(TIER, writer_fn(|_, _| Ok(()))));

    // a slot writer doesn't take the place of the type writer
    assert!(builder.register_writer::<Imp, i64>(writer_fn(|_, _| Ok(()))));

    let registry = builder.build();

    assert!(registry.slot_writer("Imp", "tier").is_some());
    assert!(registry.slot_writer("Imp", "score").is_some());
    assert!(registry.slot_writer("Imp", "rank").is_none());
    assert!(registry.slot_writer("Site", "tier").is_none());
    assert!(registry.writer("Imp", TypeId::of::<i64>(), false).is_some());
}

#[test]
fn empty_registry() {
    let registry = Registry::empty();

    assert!(registry.is_empty());
    assert!(registry.readers::<Imp>().is_empty());
    assert!(registry.writer("Imp", TypeId::of::<Flag>(), false).is_none());

    let mut builder = RegistryBuilder::new();
    builder.register_reader(flag_reader("imp"));

    assert!(!builder.build().is_empty());
}

//! Contains the read protocol: the fixpoint dispatch of the fields of an
//! extension wrapper object to the registered readers.

use std::{collections::BTreeMap, marker::PhantomData, sync::Arc};

use rtbjson_model::{Extendable, Payload};
use rtbjson_stream::{Cursor, Tag};

use crate::{
    error::{Error, Violation},
    reader::{
        ExtensionReader, MessageReader, Progress, Repeated, RepeatedReader,
        SingularReader,
    },
    registry::Registry,
};


/// Something that can be offered the fields of an object.
pub(crate) trait Recognize {
    fn name(&self) -> &str;

    fn accepts(&self, field: &str) -> bool;
}

impl<C> Recognize for ExtensionReader<C> {
    fn name(&self) -> &str { Self::name(self) }

    fn accepts(&self, field: &str) -> bool { Self::accepts(self, field) }
}

/// The single reader driving the fields of a repeated element.
struct Element<'a, M, R> {
    reader: &'a R,
    _marker: PhantomData<fn(&mut M)>,
}

impl<M, R: MessageReader<M>> Recognize for Element<'_, M, R> {
    fn name(&self) -> &str { self.reader.name() }

    fn accepts(&self, field: &str) -> bool {
        let root_names = self.reader.root_names();

        root_names.is_empty() || root_names.contains(&field)
    }
}

/// Dispatches the fields of the object under the cursor to `readers` until
/// the object is closed.
///
/// Each sweep offers the current field to every reader accepting it, in
/// order. A reader that consumes the field leaves the cursor at the next
/// field name (the remainder of a partially consumed value is skipped), so
/// the readers after it in the same sweep are offered the following field. A
/// field no reader consumes during a whole sweep is logged and skipped,
/// hence every sweep disposes of at least one field.
///
/// The progress reported by `offer` is checked against the cursor movement:
/// declining a field must leave the cursor untouched, consuming it must move
/// the cursor without leaving the field's value.
pub(crate) fn fixpoint<'a, R, F>(
    cursor: &mut Cursor<'a>,
    readers: &[R],
    record: &str,
    mut offer: F,
) -> Result<(), Error>
where
    R: Recognize,
    F: FnMut(&R, &'a str, &mut Cursor<'a>) -> Result<Progress, Error>,
{
    cursor.begin_object()?;

    while cursor.has_next() {
        let mut progressed = false;

        for reader in readers {
            // the last field may have been consumed earlier in this sweep
            let Some(field) = cursor.peek_field_name() else {
                break;
            };

            if !reader.accepts(field) {
                continue;
            }

            let name_index = cursor.index();
            cursor.field_name()?;

            let value_end = cursor.value_end()?;
            let before = cursor.position();

            let progress = offer(reader, field, cursor)?;
            let after = cursor.position();

            let violation = match progress {
                Progress::NotConsumed if after != before => {
                    Some(Violation::MovedWithoutConsuming)
                }
                Progress::Consumed if after == before => {
                    Some(Violation::ConsumedWithoutMoving)
                }
                Progress::Consumed if cursor.index() > value_end => {
                    Some(Violation::OverranField)
                }
                Progress::Consumed | Progress::NotConsumed => None,
            };

            if let Some(violation) = violation {
                return Err(Error::ContractViolation {
                    reader: reader.name().to_owned(),
                    field: field.to_owned(),
                    at: before.location,
                    violation,
                });
            }

            match progress {
                Progress::Consumed => {
                    cursor.seek(value_end);
                    progressed = true;
                }

                // back to the field name for the next reader
                Progress::NotConsumed => cursor.seek(name_index),
            }
        }

        if !progressed {
            if let Some(field) = cursor.peek_field_name() {
                log::debug!(
                    "skipping unrecognized extension field `{field}` of \
                     `{record}` at byte {}",
                    cursor.location()
                );

                cursor.field_name()?;
                cursor.skip_value()?;
            }
        }
    }

    cursor.end_object()?;

    Ok(())
}

struct Accumulator<C> {
    reader: Arc<dyn SingularReader<C>>,
    message: Box<dyn Payload>,
    consumed: bool,
}

/// Reads the extension wrapper object under the cursor into the container's
/// extension slots.
///
/// A `null` wrapper is treated as absent. When no reader is registered for
/// the container the whole wrapper is skipped without looking at its fields.
/// Singular messages are accumulated across the whole wrapper, shared by
/// every reader of the same key, and installed after the wrapper is closed;
/// only if at least one of their fields was consumed.
///
/// # Errors
///
/// Malformed wrapper objects and errors of the readers abort the decode.
pub fn read_extensions<C: Extendable>(
    registry: &Registry,
    container: &mut C,
    cursor: &mut Cursor<'_>,
) -> Result<(), Error> {
    if cursor.null() {
        return Ok(());
    }

    let readers = registry.readers::<C>();

    if readers.is_empty() {
        if cursor.peek_tag() != Some(Tag::BeginObject) {
            // reports the offending token
            cursor.begin_object()?;
        }

        log::trace!("no extension readers for `{}`, skipping", C::NAME);
        cursor.skip_value()?;

        return Ok(());
    }

    let mut accumulators = BTreeMap::<&'static str, Accumulator<C>>::new();

    fixpoint(cursor, readers, C::NAME, |reader, field, cursor| match reader {
        ExtensionReader::Scalar(reader) => {
            reader.read(container, field, cursor)
        }

        ExtensionReader::Singular(reader) => {
            let accumulator =
                accumulators.entry(reader.key_name()).or_insert_with(|| {
                    Accumulator {
                        reader: Arc::clone(reader),
                        message: reader.seed(container),
                        consumed: false,
                    }
                });

            let progress =
                reader.read(accumulator.message.as_mut(), field, cursor)?;
            accumulator.consumed |= progress.is_consumed();

            Ok(progress)
        }

        ExtensionReader::Repeated(reader) => reader.read(container, cursor),
    })?;

    for accumulator in accumulators.into_values() {
        if accumulator.consumed {
            accumulator.reader.install(accumulator.message, container)?;
        }
    }

    Ok(())
}

impl<C, M, R> RepeatedReader<C> for Repeated<C, M, R>
where
    C: Extendable,
    M: Payload + Default,
    Vec<M>: Payload,
    R: MessageReader<M>,
{
    fn root_names(&self) -> &[&'static str] {
        std::slice::from_ref(&self.root_name)
    }

    fn name(&self) -> &str { self.reader.name() }

    fn read(
        &self,
        container: &mut C,
        cursor: &mut Cursor<'_>,
    ) -> Result<Progress, Error> {
        if cursor.null() {
            return Ok(Progress::Consumed);
        }

        cursor.begin_array()?;

        let element_reader =
            [Element { reader: &self.reader, _marker: PhantomData }];

        while cursor.has_next() {
            // every element starts from scratch
            let mut element = M::default();
            let mut consumed = false;

            fixpoint(
                cursor,
                &element_reader,
                self.key.name(),
                |element_reader, field, cursor| {
                    let progress = element_reader
                        .reader
                        .read(&mut element, field, cursor)?;
                    consumed |= progress.is_consumed();

                    Ok(progress)
                },
            )?;

            if consumed {
                container.extensions_mut().add(&self.key, element);
            }
        }

        cursor.end_array()?;

        Ok(Progress::Consumed)
    }
}

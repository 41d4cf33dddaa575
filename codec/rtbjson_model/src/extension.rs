//! Contains the typed [`ExtensionKey`] and the [`Extensions`] slot map every
//! container record owns.

use std::{
    any::{Any, TypeId},
    collections::BTreeMap,
    fmt::Debug,
    marker::PhantomData,
};

#[cfg(test)]
mod test;

/// An object-safe, type-erased extension value.
///
/// Implemented for every `'static` type that is [`Debug`], [`Clone`],
/// [`PartialEq`], [`Send`] and [`Sync`]; which keeps the records holding the
/// extension values comparable and cloneable.
pub trait Payload: Any + Debug + Send + Sync + 'static {
    /// Upcasts to [`Any`].
    fn as_any(&self) -> &dyn Any;

    /// Upcasts to a mutable [`Any`].
    fn as_any_mut(&mut self) -> &mut dyn Any;

    /// Upcasts the box to a boxed [`Any`].
    fn into_any(self: Box<Self>) -> Box<dyn Any>;

    /// Clones the value behind the trait object.
    fn clone_payload(&self) -> Box<dyn Payload>;

    /// Compares two erased values, values of different types are never
    /// equal.
    fn eq_payload(&self, other: &dyn Payload) -> bool;
}

impl<T: Any + Debug + Clone + PartialEq + Send + Sync> Payload for T {
    fn as_any(&self) -> &dyn Any { self }

    fn as_any_mut(&mut self) -> &mut dyn Any { self }

    fn into_any(self: Box<Self>) -> Box<dyn Any> { self }

    fn clone_payload(&self) -> Box<dyn Payload> { Box::new(self.clone()) }

    fn eq_payload(&self, other: &dyn Payload) -> bool {
        other.as_any().downcast_ref::<T>().is_some_and(|other| self == other)
    }
}

impl dyn Payload {
    /// Gets the [`TypeId`] of the concrete value.
    #[must_use]
    pub fn concrete_type(&self) -> TypeId { self.as_any().type_id() }

    /// Downcasts to a reference of the concrete value.
    #[must_use]
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.as_any().downcast_ref()
    }

    /// Downcasts to a mutable reference of the concrete value.
    #[must_use]
    pub fn downcast_mut<T: Any>(&mut self) -> Option<&mut T> {
        self.as_any_mut().downcast_mut()
    }

    /// Downcasts the boxed value, giving the box back if the type doesn't
    /// match.
    ///
    /// # Errors
    ///
    /// Returns the original box if the concrete type is not `T`.
    pub fn downcast<T: Any>(
        self: Box<Self>,
    ) -> Result<Box<T>, Box<dyn Payload>> {
        if self.as_any().is::<T>() {
            self.into_any()
                .downcast::<T>()
                .map_err(|_| unreachable!("the type was checked above"))
        } else {
            Err(self)
        }
    }
}

/// The declared shape of an extension payload.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    displaydoc::Display,
    strum_macros::EnumIter,
)]
pub enum Shape {
    /// scalar
    Scalar,

    /// singular message
    Singular,

    /// repeated message
    Repeated,
}

/// Identifies an extension slot of the container `C` holding a payload of
/// type `P`.
///
/// A key is a plain `const`-constructible value, the usual way to declare
/// one is a `const` item next to the payload type:
///
/// ```
/// use rtbjson_model::{extension::ExtensionKey, request::Imp};
///
/// #[derive(Debug, Clone, PartialEq, Default)]
/// struct Gpc {
///     gpc: Option<String>,
/// }
///
/// const IMP_GPC: ExtensionKey<Imp, Gpc> = ExtensionKey::singular("gpc");
/// ```
pub struct ExtensionKey<C, P> {
    name: &'static str,
    shape: Shape,
    payload_type: fn() -> TypeId,
    _marker: PhantomData<fn() -> (C, P)>,
}

impl<C: 'static, P: 'static> ExtensionKey<C, P> {
    /// Creates a key for a scalar payload, e.g. a single string or number.
    #[must_use]
    pub const fn scalar(name: &'static str) -> Self {
        Self {
            name,
            shape: Shape::Scalar,
            payload_type: TypeId::of::<P>,
            _marker: PhantomData,
        }
    }

    /// Creates a key for a singular nested record.
    #[must_use]
    pub const fn singular(name: &'static str) -> Self {
        Self {
            name,
            shape: Shape::Singular,
            payload_type: TypeId::of::<P>,
            _marker: PhantomData,
        }
    }
}

impl<C: 'static, M: 'static> ExtensionKey<C, Vec<M>> {
    /// Creates a key for a repeated nested record. The slot holds a
    /// `Vec<M>`, but the payload type the writers are looked up with is the
    /// element type `M`.
    #[must_use]
    pub const fn repeated(name: &'static str) -> Self {
        Self {
            name,
            shape: Shape::Repeated,
            payload_type: TypeId::of::<M>,
            _marker: PhantomData,
        }
    }
}

impl<C, P> ExtensionKey<C, P> {
    /// Gets the unique name of the slot within its container.
    #[must_use]
    pub const fn name(&self) -> &'static str { self.name }

    /// Gets the declared shape of the payload.
    #[must_use]
    pub const fn shape(&self) -> Shape { self.shape }

    /// Gets the [`TypeId`] of the payload, or of the element type for a
    /// repeated key.
    #[must_use]
    pub fn payload_type(&self) -> TypeId { (self.payload_type)() }
}

impl<C, P> Clone for ExtensionKey<C, P> {
    fn clone(&self) -> Self { *self }
}

impl<C, P> Copy for ExtensionKey<C, P> {}

impl<C, P> PartialEq for ExtensionKey<C, P> {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.shape == other.shape
    }
}

impl<C, P> Eq for ExtensionKey<C, P> {}

impl<C, P> Debug for ExtensionKey<C, P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExtensionKey")
            .field("name", &self.name)
            .field("shape", &self.shape)
            .field("container", &std::any::type_name::<C>())
            .field("payload", &std::any::type_name::<P>())
            .finish()
    }
}

/// A single populated extension slot.
#[derive(Debug)]
pub struct Slot {
    shape: Shape,
    payload_type: TypeId,
    value: Box<dyn Payload>,
}

impl Slot {
    /// Gets the declared shape of the payload.
    #[must_use]
    pub const fn shape(&self) -> Shape { self.shape }

    /// Gets the payload type the writers are looked up with; the element
    /// type for repeated payloads.
    #[must_use]
    pub const fn payload_type(&self) -> TypeId { self.payload_type }

    /// Gets the stored value.
    #[must_use]
    pub fn value(&self) -> &dyn Payload { &*self.value }
}

impl Clone for Slot {
    fn clone(&self) -> Self {
        Self {
            shape: self.shape,
            payload_type: self.payload_type,
            value: self.value.clone_payload(),
        }
    }
}

impl PartialEq for Slot {
    fn eq(&self, other: &Self) -> bool {
        self.shape == other.shape
            && self.payload_type == other.payload_type
            && self.value.eq_payload(&*other.value)
    }
}

/// The extension slots of a container record of type `C`.
///
/// Every slot is addressed by an [`ExtensionKey`] of the same container, so a
/// key declared for one record can't be used on another.
pub struct Extensions<C> {
    slots: BTreeMap<&'static str, Slot>,
    _marker: PhantomData<fn() -> C>,
}

impl<C> Extensions<C> {
    /// Creates an empty slot map.
    #[must_use]
    pub const fn new() -> Self {
        Self { slots: BTreeMap::new(), _marker: PhantomData }
    }

    /// Gets the number of populated slots.
    #[must_use]
    pub fn len(&self) -> usize { self.slots.len() }

    /// Checks whether no slot is populated.
    #[must_use]
    pub fn is_empty(&self) -> bool { self.slots.is_empty() }

    /// Checks whether the slot of the given key is populated.
    #[must_use]
    pub fn contains<P>(&self, key: &ExtensionKey<C, P>) -> bool {
        self.slots.contains_key(key.name())
    }

    /// Iterates over the populated slots ordered by their names.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &Slot)> {
        self.slots.iter().map(|(name, slot)| (*name, slot))
    }

    /// Removes every slot.
    pub fn clear(&mut self) { self.slots.clear(); }
}

impl<C: 'static> Extensions<C> {
    /// Gets the value stored under the given key.
    #[must_use]
    pub fn get<P: Payload>(&self, key: &ExtensionKey<C, P>) -> Option<&P> {
        self.slots.get(key.name()).and_then(|slot| slot.value.downcast_ref())
    }

    /// Gets a mutable reference to the value stored under the given key.
    pub fn get_mut<P: Payload>(
        &mut self,
        key: &ExtensionKey<C, P>,
    ) -> Option<&mut P> {
        self.slots
            .get_mut(key.name())
            .and_then(|slot| slot.value.downcast_mut())
    }

    /// Stores the value under the given key, replacing and returning the
    /// previous one.
    pub fn set<P: Payload>(
        &mut self,
        key: &ExtensionKey<C, P>,
        value: P,
    ) -> Option<P> {
        let previous = self.slots.insert(key.name(), Slot {
            shape: key.shape(),
            payload_type: key.payload_type(),
            value: Box::new(value),
        });

        previous.and_then(|slot| slot.value.downcast::<P>().ok()).map(|x| *x)
    }

    /// Removes and returns the value stored under the given key.
    pub fn remove<P: Payload>(
        &mut self,
        key: &ExtensionKey<C, P>,
    ) -> Option<P> {
        self.slots
            .remove(key.name())
            .and_then(|slot| slot.value.downcast::<P>().ok())
            .map(|x| *x)
    }

    /// Takes the current value of the slot (or the default one), lets `f`
    /// mutate it and stores the whole result back.
    ///
    /// A slot holding a value of another type is treated as empty.
    pub fn update<P: Payload + Default, R>(
        &mut self,
        key: &ExtensionKey<C, P>,
        f: impl FnOnce(&mut P) -> R,
    ) -> R {
        let mut value = self.remove(key).unwrap_or_default();
        let result = f(&mut value);
        self.set(key, value);

        result
    }

    /// Appends an element to a repeated slot, creating the slot if it's
    /// empty.
    pub fn add<M>(&mut self, key: &ExtensionKey<C, Vec<M>>, element: M)
    where
        Vec<M>: Payload,
    {
        self.update(key, |elements| elements.push(element));
    }
}

impl<C> Default for Extensions<C> {
    fn default() -> Self { Self::new() }
}

impl<C> Clone for Extensions<C> {
    fn clone(&self) -> Self {
        Self { slots: self.slots.clone(), _marker: PhantomData }
    }
}

impl<C> PartialEq for Extensions<C> {
    fn eq(&self, other: &Self) -> bool { self.slots == other.slots }
}

impl<C> Debug for Extensions<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_map()
            .entries(self.slots.iter().map(|(name, slot)| (name, &slot.value)))
            .finish()
    }
}

/// Implemented by every record that owns extension slots.
pub trait Extendable:
    Any + Debug + Clone + PartialEq + Default + Send + Sync
{
    /// The name of the record, used as the default write path.
    const NAME: &'static str;

    /// Gets the extension slots of the record.
    fn extensions(&self) -> &Extensions<Self>;

    /// Gets the mutable extension slots of the record.
    fn extensions_mut(&mut self) -> &mut Extensions<Self>;
}

/// Implements [`Extendable`] for records storing their slots in an `ext`
/// field.
macro_rules! impl_extendable {
    ($($record:ident => $name:literal),* $(,)?) => {
        $(
            impl $crate::extension::Extendable for $record {
                const NAME: &'static str = $name;

                fn extensions(
                    &self,
                ) -> &$crate::extension::Extensions<Self> {
                    &self.ext
                }

                fn extensions_mut(
                    &mut self,
                ) -> &mut $crate::extension::Extensions<Self> {
                    &mut self.ext
                }
            }
        )*
    };
}

pub(crate) use impl_extendable;

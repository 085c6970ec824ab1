//! Input model: how a configuration graph exposes itself to the cloner.
//!
//! Every node implements [`Describe`] and reports a [`Shape`]. Containers are
//! reached through small capability traits:
//!
//! | Shape | Capability | Typical types |
//! |-------|------------|---------------|
//! | `Mapping` | [`Mapping`] | `HashMap`, `BTreeMap`, `IndexMap` |
//! | `Sequence` | [`Sequence`] | `Vec`, `VecDeque`, arrays, `BTreeSet` |
//! | `Record` | [`Record`] | structs deriving `Snapshot`, hand-written adapters |
//! | `Guarded` | [`Guarded`] | `RefCell`, `Mutex`, `RwLock` |
//!
//! Containers are identified by address and concrete type. That identity is
//! what cycle detection compares, never the contents.

use std::{borrow::Cow, fmt, ops::Deref};

use chrono::{DateTime, FixedOffset, NaiveDateTime, TimeDelta};
use rust_decimal::Decimal;

use crate::error::AccessError;

/// A node of a configuration graph.
pub trait Describe {
    /// Reports what this node is.
    fn shape(&self) -> Shape<'_>;
}

/// The structural kind of a node, borrowed from the node itself.
pub enum Shape<'a> {
    /// An absent value. Renders as an empty string.
    Null,
    /// A leaf value.
    Scalar(Scalar<'a>),
    /// String-keyed entries.
    Mapping(&'a dyn Mapping),
    /// Ordered items.
    Sequence(&'a dyn Sequence),
    /// Named members with fallible access.
    Record(&'a dyn Record),
    /// An interior-mutability cell that must be entered before reading.
    Guarded(&'a dyn Guarded),
}

/// Leaf values understood by the normalizer.
#[derive(Clone, Debug)]
pub enum Scalar<'a> {
    /// A boolean.
    Bool(bool),
    /// A signed integer of any width.
    Int(i128),
    /// An unsigned integer of any width.
    UInt(u128),
    /// A double-precision float.
    Float(f64),
    /// A single-precision float, kept separate so its shortest form survives.
    Float32(f32),
    /// A fixed-point decimal.
    Decimal(Decimal),
    /// An instant with a UTC offset.
    DateTime(DateTime<FixedOffset>),
    /// A wall-clock date and time without an offset.
    LocalDateTime(NaiveDateTime),
    /// A signed time interval.
    Interval(TimeDelta),
    /// The symbolic name of an enumerated constant.
    Symbol(&'a str),
    /// A single character.
    Char(char),
    /// Text.
    Str(Cow<'a, str>),
    /// Anything else; rendered through its `Debug` output.
    Opaque(&'a dyn fmt::Debug),
}

/// Items yielded by [`Mapping::entries`].
pub type Entries<'a> = Box<dyn Iterator<Item = (Cow<'a, str>, &'a dyn Describe)> + 'a>;

/// Items yielded by [`Sequence::items`].
pub type Items<'a> = Box<dyn Iterator<Item = &'a dyn Describe> + 'a>;

/// A container of string-keyed entries.
pub trait Mapping {
    /// Iterates the entries.
    fn entries(&self) -> Entries<'_>;

    /// Whether [`Mapping::entries`] yields a stable order.
    ///
    /// Unordered mappings are emitted in lexical key order.
    fn is_ordered(&self) -> bool {
        true
    }

    /// Concrete type name, used for identity and diagnostics.
    fn type_label(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}

/// A container of ordered items.
pub trait Sequence {
    /// Iterates the items in order.
    fn items(&self) -> Items<'_>;

    /// Concrete type name, used for identity and diagnostics.
    fn type_label(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}

/// A structured value with named members.
///
/// Reading a member may fail. A failed read only drops that member from the
/// snapshot; the rest of the record is still captured.
pub trait Record {
    /// Member names in declaration order.
    fn members(&self) -> Vec<Cow<'_, str>>;

    /// Reads one member.
    fn member(&self, name: &str) -> Result<Member<'_>, AccessError>;

    /// Whether a member must always be masked, whatever its name.
    fn is_redacted(&self, _name: &str) -> bool {
        false
    }

    /// Concrete type name, used for identity and diagnostics.
    fn type_label(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}

/// An interior-mutability cell.
pub trait Guarded {
    /// Borrows or locks the cell.
    ///
    /// Must not block: a cell that is already mutably borrowed or locked
    /// reports [`AccessError::Busy`].
    fn enter(&self) -> Result<Guard<'_>, AccessError>;

    /// Concrete type name, used for identity and diagnostics.
    fn type_label(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}

/// The value of a record member: borrowed from the record or computed on demand.
pub enum Member<'a> {
    /// A member stored in the record.
    Borrowed(&'a dyn Describe),
    /// A member computed by the accessor.
    Owned(Box<dyn Describe + 'a>),
}

impl<'a> Member<'a> {
    /// Wraps a computed value.
    pub fn owned<T>(value: T) -> Self
    where
        T: Describe + 'a,
    {
        Self::Owned(Box::new(value))
    }
}

impl<'a> Deref for Member<'a> {
    type Target = dyn Describe + 'a;

    fn deref(&self) -> &Self::Target {
        match self {
            Member::Borrowed(value) => *value,
            Member::Owned(value) => value.as_ref(),
        }
    }
}

trait GuardTarget<'a> {
    fn target(&self) -> &(dyn Describe + 'a);
}

impl<'a, G, T> GuardTarget<'a> for G
where
    G: Deref<Target = T>,
    T: Describe + 'a,
{
    fn target(&self) -> &(dyn Describe + 'a) {
        &**self
    }
}

/// A live borrow or lock on a [`Guarded`] cell.
///
/// The cell stays borrowed for as long as the guard lives.
pub struct Guard<'a> {
    inner: Box<dyn GuardTarget<'a> + 'a>,
}

impl<'a> Guard<'a> {
    /// Wraps any guard that dereferences to a describable value, such as
    /// `Ref`, `MutexGuard` or `RwLockReadGuard`.
    pub fn new<G, T>(guard: G) -> Self
    where
        G: Deref<Target = T> + 'a,
        T: Describe + 'a,
    {
        Self {
            inner: Box::new(guard),
        }
    }
}

impl<'a> Deref for Guard<'a> {
    type Target = dyn Describe + 'a;

    fn deref(&self) -> &Self::Target {
        self.inner.target()
    }
}

/// Address plus concrete type of a container.
///
/// The type keeps a struct and its first field apart, since both live at the
/// same address.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Identity {
    address: *const (),
    label: &'static str,
}

impl Identity {
    pub(crate) fn of_mapping(mapping: &dyn Mapping) -> Self {
        Self {
            address: (mapping as *const dyn Mapping).cast(),
            label: mapping.type_label(),
        }
    }

    pub(crate) fn of_sequence(sequence: &dyn Sequence) -> Self {
        Self {
            address: (sequence as *const dyn Sequence).cast(),
            label: sequence.type_label(),
        }
    }

    pub(crate) fn of_record(record: &dyn Record) -> Self {
        Self {
            address: (record as *const dyn Record).cast(),
            label: record.type_label(),
        }
    }

    pub(crate) fn of_guarded(guarded: &dyn Guarded) -> Self {
        Self {
            address: (guarded as *const dyn Guarded).cast(),
            label: guarded.type_label(),
        }
    }
}

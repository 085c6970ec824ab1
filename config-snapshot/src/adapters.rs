//! [`Describe`] implementations for standard library and ecosystem types.

use std::{
    borrow::Cow,
    cell::RefCell,
    collections::{BTreeMap, BTreeSet, HashMap, VecDeque},
    fmt,
    hash::BuildHasher,
    net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr},
    path::{Path, PathBuf},
    rc::Rc,
    sync::{Arc, Mutex, RwLock, TryLockError},
    time::Duration,
};

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, TimeZone};
use indexmap::IndexMap;
use rust_decimal::Decimal;

use crate::{
    describe::{Describe, Entries, Guard, Guarded, Items, Mapping, Scalar, Sequence, Shape},
    error::AccessError,
};

// =============================================================================
// Scalars
// =============================================================================

macro_rules! describe_signed {
    ($($ty:ty),*) => {
        $(
            impl Describe for $ty {
                fn shape(&self) -> Shape<'_> {
                    Shape::Scalar(Scalar::Int(i128::from(*self)))
                }
            }
        )*
    };
}

macro_rules! describe_unsigned {
    ($($ty:ty),*) => {
        $(
            impl Describe for $ty {
                fn shape(&self) -> Shape<'_> {
                    Shape::Scalar(Scalar::UInt(u128::from(*self)))
                }
            }
        )*
    };
}

macro_rules! describe_display {
    ($($ty:ty),*) => {
        $(
            impl Describe for $ty {
                fn shape(&self) -> Shape<'_> {
                    Shape::Scalar(Scalar::Str(Cow::Owned(self.to_string())))
                }
            }
        )*
    };
}

describe_signed!(i8, i16, i32, i64, i128);
describe_unsigned!(u8, u16, u32, u64, u128);
describe_display!(IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr, NaiveDate, NaiveTime);

impl Describe for isize {
    #[allow(clippy::cast_lossless)]
    fn shape(&self) -> Shape<'_> {
        Shape::Scalar(Scalar::Int(*self as i128))
    }
}

impl Describe for usize {
    #[allow(clippy::cast_lossless)]
    fn shape(&self) -> Shape<'_> {
        Shape::Scalar(Scalar::UInt(*self as u128))
    }
}

impl Describe for bool {
    fn shape(&self) -> Shape<'_> {
        Shape::Scalar(Scalar::Bool(*self))
    }
}

impl Describe for f64 {
    fn shape(&self) -> Shape<'_> {
        Shape::Scalar(Scalar::Float(*self))
    }
}

impl Describe for f32 {
    fn shape(&self) -> Shape<'_> {
        Shape::Scalar(Scalar::Float32(*self))
    }
}

impl Describe for char {
    fn shape(&self) -> Shape<'_> {
        Shape::Scalar(Scalar::Char(*self))
    }
}

impl Describe for () {
    fn shape(&self) -> Shape<'_> {
        Shape::Null
    }
}

impl Describe for str {
    fn shape(&self) -> Shape<'_> {
        Shape::Scalar(Scalar::Str(Cow::Borrowed(self)))
    }
}

impl Describe for String {
    fn shape(&self) -> Shape<'_> {
        Shape::Scalar(Scalar::Str(Cow::Borrowed(self)))
    }
}

impl Describe for Cow<'_, str> {
    fn shape(&self) -> Shape<'_> {
        Shape::Scalar(Scalar::Str(Cow::Borrowed(self)))
    }
}

impl Describe for Path {
    fn shape(&self) -> Shape<'_> {
        Shape::Scalar(Scalar::Str(self.to_string_lossy()))
    }
}

impl Describe for PathBuf {
    fn shape(&self) -> Shape<'_> {
        self.as_path().shape()
    }
}

impl Describe for Decimal {
    fn shape(&self) -> Shape<'_> {
        Shape::Scalar(Scalar::Decimal(*self))
    }
}

impl<Tz: TimeZone> Describe for DateTime<Tz> {
    fn shape(&self) -> Shape<'_> {
        Shape::Scalar(Scalar::DateTime(self.fixed_offset()))
    }
}

impl Describe for NaiveDateTime {
    fn shape(&self) -> Shape<'_> {
        Shape::Scalar(Scalar::LocalDateTime(*self))
    }
}

impl Describe for TimeDelta {
    fn shape(&self) -> Shape<'_> {
        Shape::Scalar(Scalar::Interval(*self))
    }
}

impl Describe for Duration {
    fn shape(&self) -> Shape<'_> {
        match TimeDelta::from_std(*self) {
            Ok(delta) => Shape::Scalar(Scalar::Interval(delta)),
            Err(_) => Shape::Scalar(Scalar::Opaque(self)),
        }
    }
}

// =============================================================================
// Transparent wrappers
// =============================================================================

impl<T> Describe for Option<T>
where
    T: Describe,
{
    fn shape(&self) -> Shape<'_> {
        match self {
            Some(value) => value.shape(),
            None => Shape::Null,
        }
    }
}

impl<T> Describe for &T
where
    T: Describe + ?Sized,
{
    fn shape(&self) -> Shape<'_> {
        (**self).shape()
    }
}

impl<T> Describe for Box<T>
where
    T: Describe + ?Sized,
{
    fn shape(&self) -> Shape<'_> {
        (**self).shape()
    }
}

impl<T> Describe for Rc<T>
where
    T: Describe + ?Sized,
{
    fn shape(&self) -> Shape<'_> {
        (**self).shape()
    }
}

impl<T> Describe for Arc<T>
where
    T: Describe + ?Sized,
{
    fn shape(&self) -> Shape<'_> {
        (**self).shape()
    }
}

// =============================================================================
// Sequences
// =============================================================================

impl<T, const N: usize> Sequence for [T; N]
where
    T: Describe,
{
    fn items(&self) -> Items<'_> {
        Box::new(self.iter().map(|item| item as &dyn Describe))
    }
}

impl<T, const N: usize> Describe for [T; N]
where
    T: Describe,
{
    fn shape(&self) -> Shape<'_> {
        Shape::Sequence(self)
    }
}

impl<T> Sequence for Vec<T>
where
    T: Describe,
{
    fn items(&self) -> Items<'_> {
        Box::new(self.iter().map(|item| item as &dyn Describe))
    }
}

impl<T> Describe for Vec<T>
where
    T: Describe,
{
    fn shape(&self) -> Shape<'_> {
        Shape::Sequence(self)
    }
}

impl<T> Sequence for VecDeque<T>
where
    T: Describe,
{
    fn items(&self) -> Items<'_> {
        Box::new(self.iter().map(|item| item as &dyn Describe))
    }
}

impl<T> Describe for VecDeque<T>
where
    T: Describe,
{
    fn shape(&self) -> Shape<'_> {
        Shape::Sequence(self)
    }
}

impl<T> Sequence for BTreeSet<T>
where
    T: Describe,
{
    fn items(&self) -> Items<'_> {
        Box::new(self.iter().map(|item| item as &dyn Describe))
    }
}

impl<T> Describe for BTreeSet<T>
where
    T: Describe,
{
    fn shape(&self) -> Shape<'_> {
        Shape::Sequence(self)
    }
}

// =============================================================================
// Mappings
// =============================================================================

fn key_text<K: fmt::Display>(key: &K) -> Cow<'_, str> {
    Cow::Owned(key.to_string())
}

impl<K, V, S> Mapping for HashMap<K, V, S>
where
    K: fmt::Display,
    V: Describe,
    S: BuildHasher,
{
    fn entries(&self) -> Entries<'_> {
        Box::new(
            self.iter()
                .map(|(key, value)| (key_text(key), value as &dyn Describe)),
        )
    }

    fn is_ordered(&self) -> bool {
        false
    }
}

impl<K, V, S> Describe for HashMap<K, V, S>
where
    K: fmt::Display,
    V: Describe,
    S: BuildHasher,
{
    fn shape(&self) -> Shape<'_> {
        Shape::Mapping(self)
    }
}

impl<K, V> Mapping for BTreeMap<K, V>
where
    K: fmt::Display,
    V: Describe,
{
    fn entries(&self) -> Entries<'_> {
        Box::new(
            self.iter()
                .map(|(key, value)| (key_text(key), value as &dyn Describe)),
        )
    }
}

impl<K, V> Describe for BTreeMap<K, V>
where
    K: fmt::Display,
    V: Describe,
{
    fn shape(&self) -> Shape<'_> {
        Shape::Mapping(self)
    }
}

impl<K, V, S> Mapping for IndexMap<K, V, S>
where
    K: fmt::Display,
    V: Describe,
{
    fn entries(&self) -> Entries<'_> {
        Box::new(
            self.iter()
                .map(|(key, value)| (key_text(key), value as &dyn Describe)),
        )
    }
}

impl<K, V, S> Describe for IndexMap<K, V, S>
where
    K: fmt::Display,
    V: Describe,
{
    fn shape(&self) -> Shape<'_> {
        Shape::Mapping(self)
    }
}

// =============================================================================
// Interior mutability
// =============================================================================

impl<T> Guarded for RefCell<T>
where
    T: Describe,
{
    fn enter(&self) -> Result<Guard<'_>, AccessError> {
        let borrowed = self.try_borrow().map_err(|_| AccessError::Busy)?;
        Ok(Guard::new(borrowed))
    }
}

impl<T> Describe for RefCell<T>
where
    T: Describe,
{
    fn shape(&self) -> Shape<'_> {
        Shape::Guarded(self)
    }
}

fn lock_error<G>(err: TryLockError<G>) -> AccessError {
    match err {
        TryLockError::Poisoned(_) => AccessError::Poisoned,
        TryLockError::WouldBlock => AccessError::Busy,
    }
}

impl<T> Guarded for Mutex<T>
where
    T: Describe,
{
    fn enter(&self) -> Result<Guard<'_>, AccessError> {
        let locked = self.try_lock().map_err(lock_error)?;
        Ok(Guard::new(locked))
    }
}

impl<T> Describe for Mutex<T>
where
    T: Describe,
{
    fn shape(&self) -> Shape<'_> {
        Shape::Guarded(self)
    }
}

impl<T> Guarded for RwLock<T>
where
    T: Describe,
{
    fn enter(&self) -> Result<Guard<'_>, AccessError> {
        let read = self.try_read().map_err(lock_error)?;
        Ok(Guard::new(read))
    }
}

impl<T> Describe for RwLock<T>
where
    T: Describe,
{
    fn shape(&self) -> Shape<'_> {
        Shape::Guarded(self)
    }
}

//! Dirty-tracked value cell for component data fields.

use std::fmt;
use std::ops::{Deref, DerefMut};

/// A value paired with a dirty flag.
///
/// Mutable access through [`DerefMut`] or [`Property::set`] marks the cell
/// dirty; the flag is only cleared by [`Property::take_dirty`], which the
/// generated flush calls once per serialized update. Values loaded from the
/// wire are wrapped with [`Property::new`] and start clean, while values
/// converted with [`From`] start dirty so that they are sent on the next
/// flush.
#[derive(Clone, Default)]
pub struct Property<T> {
    value: T,
    dirty: bool,
}

impl<T> Property<T> {
    /// Wraps a value without marking it dirty.
    #[must_use]
    pub const fn new(value: T) -> Self {
        Self {
            value,
            dirty: false,
        }
    }

    /// Returns a shared reference to the value.
    #[must_use]
    pub const fn get(&self) -> &T {
        &self.value
    }

    /// Replaces the value and marks the cell dirty.
    pub fn set(&mut self, value: T) {
        self.value = value;
        self.dirty = true;
    }

    /// Returns true if the value changed since the last flush.
    #[must_use]
    pub const fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Marks the cell dirty without touching the value.
    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Returns the dirty flag and clears it.
    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    /// Unwraps the value.
    #[must_use]
    pub fn into_inner(self) -> T {
        self.value
    }
}

impl<T> From<T> for Property<T> {
    fn from(value: T) -> Self {
        Self { value, dirty: true }
    }
}

impl<T> Deref for Property<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.value
    }
}

impl<T> DerefMut for Property<T> {
    fn deref_mut(&mut self) -> &mut T {
        self.dirty = true;
        &mut self.value
    }
}

impl<T: PartialEq> PartialEq for Property<T> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl<T: fmt::Debug> fmt::Debug for Property<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.value.fmt(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_is_clean() {
        let prop = Property::new(3u32);
        assert!(!prop.is_dirty());
        assert_eq!(*prop, 3);
    }

    #[test]
    fn test_from_is_dirty() {
        let prop: Property<String> = String::from("x").into();
        assert!(prop.is_dirty());
    }

    #[test]
    fn test_deref_mut_marks_dirty() {
        let mut prop = Property::new(vec![1, 2]);
        let _ = prop.len();
        assert!(!prop.is_dirty());
        prop.push(3);
        assert!(prop.is_dirty());
        assert_eq!(prop.get(), &vec![1, 2, 3]);
    }

    #[test]
    fn test_take_dirty_clears_once() {
        let mut prop = Property::new(1.0f64);
        prop.set(2.0);
        assert!(prop.take_dirty());
        assert!(!prop.take_dirty());
        assert_eq!(prop.into_inner(), 2.0);
    }

    #[test]
    fn test_equality_ignores_dirty_flag() {
        let clean = Property::new(5i64);
        let dirty = Property::from(5i64);
        assert_eq!(clean, dirty);
        assert_eq!(format!("{dirty:?}"), "5");
    }
}

use crate::complement::ComplementClass;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize as SerdeDeserialize, Serialize as SerdeSerialize};

/// Ordered tuple of complement classes characterizing one clause.
///
/// Clause signatures are built ascending; edits keep the relative order of
/// whatever classes survive.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Signature(Vec<ComplementClass>);

impl Signature {
    pub fn new(classes: Vec<ComplementClass>) -> Self {
        Self(classes)
    }

    /// Builds an ascending signature from classes in any order.
    pub fn sorted(classes: impl IntoIterator<Item = ComplementClass>) -> Self {
        let mut classes: Vec<_> = classes.into_iter().collect();
        classes.sort();
        Self(classes)
    }

    pub fn classes(&self) -> &[ComplementClass] {
        &self.0
    }

    pub fn iter(&self) -> core::slice::Iter<'_, ComplementClass> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Human-readable labels, space separated: `"Ksubj Kakk Kprp|auf"`.
    pub fn describe(&self) -> String {
        let mut out = String::new();
        for (i, class) in self.0.iter().enumerate() {
            if i > 0 {
                out.push(' ');
            }
            out.push_str(&class.label());
        }
        out
    }
}

impl From<Vec<ComplementClass>> for Signature {
    fn from(classes: Vec<ComplementClass>) -> Self {
        Self(classes)
    }
}

impl FromIterator<ComplementClass> for Signature {
    fn from_iter<I: IntoIterator<Item = ComplementClass>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Signature {
    type Item = &'a ComplementClass;
    type IntoIter = core::slice::Iter<'a, ComplementClass>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("(")?;
        for (i, class) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", class.code())?;
        }
        f.write_str(")")
    }
}

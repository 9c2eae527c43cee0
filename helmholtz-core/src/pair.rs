use core::fmt;

#[cfg(feature = "serde-serialize")]
use serde::{Deserialize, Serialize};

/// Identifies one observation: the image taken by view `view` under light `light`.
///
/// Indices are 0-based. Serializes as the two-element array `[view, light]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[cfg_attr(
    feature = "serde-serialize",
    serde(from = "(usize, usize)", into = "(usize, usize)")
)]
pub struct PairKey {
    pub view: usize,
    pub light: usize,
}

impl PairKey {
    pub fn new(view: usize, light: usize) -> Self {
        Self { view, light }
    }
}

impl From<(usize, usize)> for PairKey {
    fn from((view, light): (usize, usize)) -> Self {
        Self::new(view, light)
    }
}

impl From<PairKey> for (usize, usize) {
    fn from(key: PairKey) -> Self {
        (key.view, key.light)
    }
}

impl fmt::Display for PairKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.view, self.light)
    }
}

/// Two observations whose geometry satisfies Helmholtz reciprocity.
///
/// The first key always has the lower view index. Serializes as
/// `[[view, light], [view, light]]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct ReciprocalPair(pub PairKey, pub PairKey);

impl ReciprocalPair {
    /// Creates a new pair, canonicalizing the order so the lower view comes first.
    ///
    /// Returns `None` if both keys belong to the same view.
    pub fn new(a: PairKey, b: PairKey) -> Option<Self> {
        match a.view.cmp(&b.view) {
            core::cmp::Ordering::Less => Some(Self(a, b)),
            core::cmp::Ordering::Greater => Some(Self(b, a)),
            core::cmp::Ordering::Equal => None,
        }
    }

    pub fn first(&self) -> PairKey {
        self.0
    }

    pub fn second(&self) -> PairKey {
        self.1
    }
}

impl fmt::Display for ReciprocalPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} <-> {}", self.0, self.1)
    }
}

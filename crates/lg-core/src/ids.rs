//! Strongly typed, zero-cost identifier wrappers.
//!
//! All IDs are `Copy + Ord + Hash` so they can be used as map keys and sorted
//! collection elements without ceremony.  Ordering follows allocation order,
//! which is what makes iteration over `BTreeMap<SegmentId, _>` and friends
//! deterministic from run to run.

use std::fmt;

/// Generate a typed ID wrapper around a primitive integer.
macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident($inner:ty);) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        $vis struct $name(pub $inner);

        impl $name {
            /// The ID allocated after this one.
            #[inline(always)]
            pub fn next(self) -> $name {
                $name(self.0 + 1)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }
    };
}

typed_id! {
    /// Identity of a live segment.  Never reused after the segment is deleted.
    pub struct SegmentId(u32);
}

typed_id! {
    /// Identity of a resource lying on the map or in transit.
    pub struct ResourceId(u32);
}

typed_id! {
    /// Identity of a building placed on the map.
    pub struct BuildingId(u32);
}

typed_id! {
    /// Identity of a pending resource request.
    pub struct RequestId(u32);
}

typed_id! {
    /// Opaque handle of an external actor (transporter) that carries or
    /// targets a resource.  The core never dereferences it.
    pub struct ActorId(u32);
}

typed_id! {
    /// Application-defined resource type (planks, stone, …).
    /// `u16` keeps request queues compact.
    pub struct ResourceKind(u16);
}

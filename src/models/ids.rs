//! Typed entity identifiers.
//!
//! Every entity kind gets its own id newtype so that a group id can never be
//! looked up in the room table by accident. All ids serialize as bare
//! integers.

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(pub u32);

        impl $name {
            /// Wraps a raw id.
            #[inline]
            pub const fn new(raw: u32) -> Self {
                Self(raw)
            }

            /// Returns the raw id.
            #[inline]
            pub const fn get(self) -> u32 {
                self.0
            }
        }

        impl From<u32> for $name {
            fn from(raw: u32) -> Self {
                Self(raw)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

define_id!(
    /// Student group identifier.
    GroupId
);
define_id!(
    /// Flow (joint set of groups) identifier.
    FlowId
);
define_id!(
    /// Room identifier.
    RoomId
);
define_id!(
    /// Teacher identifier.
    TeacherId
);
define_id!(
    /// Subject identifier.
    SubjectId
);
define_id!(
    /// Curriculum entry identifier.
    CurriculumId
);
define_id!(
    /// Stored lesson identifier, assigned by the store on commit.
    LessonId
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_roundtrip_is_transparent() {
        let id = GroupId::new(42);
        assert_eq!(serde_json::to_string(&id).unwrap(), "42");
        let back: GroupId = serde_json::from_str("42").unwrap();
        assert_eq!(back, id);
        assert_eq!(back.get(), 42);
    }

    #[test]
    fn test_id_display() {
        assert_eq!(RoomId::from(7).to_string(), "7");
    }
}

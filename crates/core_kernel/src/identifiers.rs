//! Typed identifiers for catalogue entities and checkpoints
//!
//! Every identifier is a UUID newtype. `Display` adds a short prefix
//! (`SAL-0190a6d6-...`) and `FromStr` accepts the value with or without it;
//! serde uses the bare UUID.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident => $prefix:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Prefix used by `Display`
            pub const PREFIX: &'static str = $prefix;

            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            /// Time-ordered identifier (UUID v7)
            pub fn new_v7() -> Self {
                Self(Uuid::now_v7())
            }

            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}-{}", Self::PREFIX, self.0)
            }
        }

        impl FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let raw = s
                    .strip_prefix(Self::PREFIX)
                    .and_then(|rest| rest.strip_prefix('-'))
                    .unwrap_or(s);
                Uuid::parse_str(raw).map(Self)
            }
        }

        impl From<Uuid> for $name {
            fn from(uuid: Uuid) -> Self {
                Self(uuid)
            }
        }
    };
}

define_id!(
    /// A bill-of-quantities document
    DocumentId => "DOC"
);
define_id!(
    /// A work group (chapter) of a document
    WorkGroupId => "GRP"
);
define_id!(
    /// A catalogue line
    WorkItemId => "ITM"
);
define_id!(
    /// A site measurement
    MeasurementId => "MIS"
);
define_id!(
    /// A contractual quantity amendment
    VariationId => "VAR"
);
define_id!(
    /// A billing checkpoint (SAL)
    CheckpointId => "SAL"
);

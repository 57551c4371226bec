//! Enumerated value sets stored as lowercase strings by the record store.
//!
//! Each enum serializes to its wire value and carries a human-readable
//! label. Unknown wire values fail to deserialize, which keeps every stored
//! status inside its enumerated set.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

macro_rules! define_text_enum {
    (
        $(#[$meta:meta])*
        $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident = ($wire:literal, $label:literal) ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub enum $name {
            $( $(#[$vmeta])* #[serde(rename = $wire)] $variant ),+
        }

        impl $name {
            /// Every variant, in declaration order.
            pub const ALL: &'static [$name] = &[ $( $name::$variant ),+ ];

            /// Return the value as stored by the record store.
            pub fn as_str(self) -> &'static str {
                match self {
                    $( $name::$variant => $wire ),+
                }
            }

            /// Return the display label.
            pub fn label(self) -> &'static str {
                match self {
                    $( $name::$variant => $label ),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = CoreError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $( $wire => Ok($name::$variant), )+
                    other => Err(CoreError::Validation(format!(
                        "Invalid {} '{other}'. Must be one of: {}",
                        stringify!($name),
                        [$( $wire ),+].join(", ")
                    ))),
                }
            }
        }
    };
}

define_text_enum! {
    /// Whether the agency currently serves a client.
    ClientStatus {
        Active = ("active", "Active"),
        Inactive = ("inactive", "Inactive"),
    }
}

define_text_enum! {
    /// Post production lifecycle, in workflow order.
    ///
    /// The order is advisory: any status may be set from any other.
    PostStatus {
        Idea = ("idea", "Idea"),
        Production = ("production", "In production"),
        Approved = ("approved", "Approved"),
        Scheduled = ("scheduled", "Scheduled"),
        Posted = ("posted", "Posted"),
    }
}

define_text_enum! {
    /// Social network a post is published on.
    Platform {
        Instagram = ("instagram", "Instagram"),
        Facebook = ("facebook", "Facebook"),
        TikTok = ("tiktok", "TikTok"),
        LinkedIn = ("linkedin", "LinkedIn"),
        Twitter = ("twitter", "Twitter/X"),
    }
}

define_text_enum! {
    /// Kind of media attached to a post.
    MediaType {
        Image = ("image", "Image"),
        Video = ("video", "Video"),
        Carousel = ("carousel", "Carousel"),
    }
}

define_text_enum! {
    /// Billing status. `Overdue` may be stored or derived at read time.
    BillingStatus {
        Pending = ("pending", "Pending"),
        Paid = ("paid", "Paid"),
        Overdue = ("overdue", "Overdue"),
        Cancelled = ("cancelled", "Cancelled"),
    }
}

define_text_enum! {
    /// How often a billing repeats.
    Recurrence {
        Once = ("once", "One-off"),
        Monthly = ("monthly", "Monthly"),
        Quarterly = ("quarterly", "Quarterly"),
        Yearly = ("yearly", "Yearly"),
    }
}

impl Default for ClientStatus {
    fn default() -> Self {
        ClientStatus::Active
    }
}

impl Default for PostStatus {
    fn default() -> Self {
        PostStatus::Idea
    }
}

impl Default for Platform {
    fn default() -> Self {
        Platform::Instagram
    }
}

impl Default for MediaType {
    fn default() -> Self {
        MediaType::Image
    }
}

impl Default for BillingStatus {
    fn default() -> Self {
        BillingStatus::Pending
    }
}

impl Default for Recurrence {
    fn default() -> Self {
        Recurrence::Monthly
    }
}

/// Suggested brand-voice values offered by the client form. The stored
/// field is free text, so values outside this list are accepted.
pub const BRAND_VOICE_OPTIONS: &[&str] = &[
    "formal",
    "informal",
    "divertido",
    "inspirador",
    "técnico",
    "amigável",
];

//! Closed string vocabularies: property names and enum-typed property values.
//!
//! Every component type declares its property names as a closed enum, and every
//! enum-typed property (swap strategy, theme, button style, ...) is a closed enum
//! as well. Both sides need the same three things: the full variant list, the
//! wire string of a variant, and a strict (exact match) parse. The [`Named`]
//! trait captures that, and [`named_enum!`](crate::named_enum) generates it.

use std::fmt;

// ---------------------------------------------------------------------------
// Named
// ---------------------------------------------------------------------------

/// A closed set of variants, each with a fixed wire string.
pub trait Named: Copy + Eq + fmt::Debug + 'static {
    /// All variants, in declaration order.
    const ALL: &'static [Self];

    /// The wire string of this variant.
    fn as_str(self) -> &'static str;

    /// Exact-match lookup. No case folding, no prefix matching.
    fn parse(text: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|v| v.as_str() == text)
    }

    /// The wire strings of all variants, in declaration order.
    fn names() -> Vec<&'static str> {
        Self::ALL.iter().map(|v| v.as_str()).collect()
    }
}

/// Declare a closed enum implementing [`Named`].
///
/// ```ignore
/// named_enum! {
///     #[derive(Default)]
///     pub enum Theme {
///         #[default]
///         Light => "light",
///         Dark => "dark",
///     }
/// }
/// ```
#[macro_export]
macro_rules! named_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident => $text:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        $vis enum $name {
            $( $(#[$vmeta])* $variant ),+
        }

        impl $crate::property::Named for $name {
            const ALL: &'static [Self] = &[ $( Self::$variant ),+ ];

            fn as_str(self) -> &'static str {
                match self {
                    $( Self::$variant => $text ),+
                }
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str($crate::property::Named::as_str(*self))
            }
        }
    };
}

// ===========================================================================
// Tests
// ===========================================================================

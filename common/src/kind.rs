//! Macros for defining kind enums.

/// Macro for defining a kind enum with a fixed textual representation.
///
/// The textual representation is used for [`Display`], [`FromStr`] and
/// serialization. Requires the `serde` feature.
///
/// # Example
///
/// ```rust
/// # use common::define_kind;
///
/// define_kind! {
///     #[doc = "Shape kind."]
///     enum Kind {
///         #[doc = "A cube"]
///         Cube = "cube",
///
///         #[doc = "A sphere"]
///         Sphere = "sphere",
///     }
/// }
///
/// assert_eq!(Kind::Cube.as_str(), "cube");
/// assert_eq!("sphere".parse::<Kind>().ok(), Some(Kind::Sphere));
/// ```
///
/// [`Display`]: std::fmt::Display
/// [`FromStr`]: std::str::FromStr
#[cfg(feature = "serde")]
#[expect(clippy::module_name_repetitions, reason = "more readable")]
#[macro_export]
macro_rules! define_kind {
    (
        #[doc = $doc:literal]
        enum $name:ident {
            $(
                #[doc = $variant_doc:literal]
                $variant:ident = $value:literal
            ),* $(,)?
        }
    ) => {
        #[derive(
            Clone,
            Copy,
            Debug,
            $crate::private::serde::Deserialize,
            $crate::private::strum::Display,
            $crate::private::strum::EnumString,
            Eq,
            Hash,
            PartialEq,
            $crate::private::serde::Serialize,
        )]
        #[doc = $doc]
        pub enum $name {
            $(
                #[serde(rename = $value)]
                #[doc = $variant_doc]
                #[strum(serialize = $value)]
                $variant,
            )*
        }

        impl $name {
            /// All the variants, in declaration order.
            pub const ALL: &'static [Self] = &[$(Self::$variant),*];

            /// Returns the textual representation of this kind.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(
                        Self::$variant => $value,
                    )*
                }
            }
        }
    };
}

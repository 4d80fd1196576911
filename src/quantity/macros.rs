/// Define a physical quantity backed by a plain [`f64`].
///
/// `precision` is the number of fractional digits in the human-readable [`Display`] form,
/// [`Debug`] prints the raw value.
macro_rules! quantity {
    ($(#[$meta:meta])* $name:ident, suffix: $suffix:literal, precision: $precision:literal) => {
        $(#[$meta])*
        #[must_use]
        #[repr(transparent)]
        #[derive(
            ::derive_more::Add,
            ::derive_more::AddAssign,
            ::derive_more::From,
            ::derive_more::FromStr,
            ::derive_more::Neg,
            ::derive_more::Sub,
            ::derive_more::SubAssign,
            ::derive_more::Sum,
            ::serde::Deserialize,
            ::serde::Serialize,
            ::std::clone::Clone,
            ::std::marker::Copy,
            ::std::default::Default,
            ::std::cmp::PartialEq,
            ::std::cmp::PartialOrd,
        )]
        pub struct $name(pub f64);

        #[allow(dead_code)]
        impl $name {
            pub const ZERO: Self = Self(0.0);

            pub const fn abs(self) -> Self {
                Self(self.0.abs())
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, formatter: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                write!(formatter, "{:.*} {}", $precision, self.0, $suffix)
            }
        }

        impl ::std::fmt::Debug for $name {
            fn fmt(&self, formatter: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                ::std::fmt::Debug::fmt(&self.0, formatter)?;
                formatter.write_str($suffix)
            }
        }
    };
}

//! Some useful helper macros.

/// Implements `FromStr` and `Display` for an enum, given a mapping from each variant to its
/// string representation.
///
/// Used for names that round-trip through text, like stage names given on the command line.
///
/// # Example
///
/// ```ignore
/// #[derive(Debug, PartialEq)]
/// enum Shape {
///     Circle,
///     Square,
/// }
///
/// impl_str_conversion_traits!(Shape {
///     Circle: "circle",
///     Square: "square",
/// });
///
/// assert_eq!(Shape::from_str("circle"), Ok(Shape::Circle));
/// assert_eq!(format!("{}", Shape::Square), "square");
/// assert_eq!(Shape::from_str("triangle"), Err(()));
/// ```
macro_rules! impl_str_conversion_traits {
    ($enum_name:ident { $($variant:ident: $str:literal),* $(,)? }) => {
        impl std::str::FromStr for $enum_name {
            type Err = ();

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($str => Ok($enum_name::$variant),)*
                    _ => Err(()),
                }
            }
        }

        impl std::fmt::Display for $enum_name {
            fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
                let s = match self {
                    $($enum_name::$variant => $str,)*
                };
                write!(f, "{}", s)
            }
        }
    }
}

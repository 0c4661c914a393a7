/// Builds a [`Tag`](crate::Tag) from a JSON-like literal.
///
/// Compounds use `{ "name": value }`, lists use `[a, b]`, and anything else is
/// converted with `Tag::from`, so the Rust type of a literal picks the tag
/// type (`1i8` is a `Byte`, `1` an `Int`, `1.0` a `Double`). Negative numbers
/// need parentheses when nested: `[(-1), 2]`.
///
/// ```rust
/// use serde_nbt::{nbt, Tag};
///
/// let tag = nbt!({
///     "name": "Steve",
///     "pos": [1.0, 64.0, (-3.5)],
///     "inventory": [],
/// });
/// let root = tag.as_compound().unwrap();
/// assert_eq!(root.get("name"), Some(&Tag::from("Steve")));
/// assert_eq!(root.get("pos").and_then(|p| p.as_list()).map(Vec::len), Some(3));
/// ```
#[macro_export]
macro_rules! nbt {
    ([]) => {
        $crate::Tag::List(::std::vec::Vec::new())
    };

    ([ $($elem:tt),* $(,)? ]) => {
        $crate::Tag::List(vec![$($crate::nbt!($elem)),*])
    };

    ({}) => {
        $crate::Tag::Compound($crate::Compound::new())
    };

    ({ $($name:literal : $value:tt),* $(,)? }) => {{
        let mut compound = $crate::Compound::new();
        $(
            compound.insert($name, $crate::nbt!($value));
        )*
        $crate::Tag::Compound(compound)
    }};

    ($value:expr) => {
        $crate::Tag::from($value)
    };
}

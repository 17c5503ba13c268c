//! Accessor generation macros for node enums
//!
//! These macros eliminate repetitive match code on `Node<T>`.
//! `paste` is used internally for identifier concatenation.

/// Generate is_xxx, as_xxx, as_xxx_mut for enums with typed variants
///
/// Uses paste's `:camel` modifier to convert method name to variant name.
/// # Generated methods per variant:
/// - `is_xxx(&self) -> bool`
/// - `as_xxx(&self) -> Option<&Type>`
/// - `as_xxx_mut(&mut self) -> Option<&mut Type>`
///
/// # Example
/// ```ignore
/// impl<T> Node<T> {
///     // element -> Element, text -> Text, embedded -> Embedded
///     impl_enum_accessors!(element: Element, text: Text, embedded: Embedded<T>);
/// }
/// ```
macro_rules! impl_enum_accessors {
    ($($variant:ident: $ty:ty),* $(,)?) => {
        ::paste::paste! {
            $(
                #[doc = "Check if this is a " [<$variant:camel>] " node"]
                pub fn [<is_ $variant>](&self) -> bool {
                    matches!(self, Self::[<$variant:camel>](_))
                }

                #[doc = "Try to get as " $variant " reference"]
                pub fn [<as_ $variant>](&self) -> Option<&$ty> {
                    match self { Self::[<$variant:camel>](v) => Some(v), _ => None }
                }

                #[doc = "Try to get as mutable " $variant " reference"]
                pub fn [<as_ $variant _mut>](&mut self) -> Option<&mut $ty> {
                    match self { Self::[<$variant:camel>](v) => Some(v), _ => None }
                }
            )*
        }
    };
}

/// Generate `From<Variant>` conversions into `Node<T>` for non-generic variants
///
/// # Example
/// ```ignore
/// impl_node_from!(Element, Text);
/// // Expands to: impl<T> From<Element> for Node<T> { ... } for each type
/// ```
macro_rules! impl_node_from {
    ($($variant:ident),* $(,)?) => {
        $(
            impl<T> From<$variant> for $crate::node::Node<T> {
                fn from(value: $variant) -> Self {
                    $crate::node::Node::$variant(value)
                }
            }
        )*
    };
}

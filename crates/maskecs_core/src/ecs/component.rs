//! # Component System
//!
//! Components are plain data with no behavior. The runtime never looks
//! inside them; it only stores one default-initialized slot per entity and
//! tracks presence in the entity mask.

use std::any::{type_name, TypeId};

/// Marker trait for ECS components.
///
/// Components must be:
/// - `Default`: every column slot is default-initialized on spawn and reset on kill
/// - `'static`: columns are stored type-erased and recovered by `TypeId`
///
/// # Example
///
/// ```rust
/// use maskecs_core::Component;
///
/// #[derive(Clone, Copy, Default)]
/// struct Position {
///     x: f32,
///     y: f32,
/// }
///
/// impl Component for Position {}
/// ```
pub trait Component: Default + 'static {}

/// A compile-time list of component types, written as a tuple.
///
/// Used by [`System::enable_components`](crate::System::enable_components)
/// and [`System::query`](crate::System::query) to name several types at once:
/// `(Position, Velocity)`. Implemented for `()` and tuples of up to twelve
/// components.
pub trait ComponentSet: 'static {
    /// Calls `visit` once per type in the set, in declaration order.
    fn visit<V: FnMut(TypeId, &'static str)>(visit: V);
}

impl ComponentSet for () {
    fn visit<V: FnMut(TypeId, &'static str)>(_visit: V) {}
}

macro_rules! impl_component_set {
    ($($name:ident),+) => {
        impl<$($name: Component),+> ComponentSet for ($($name,)+) {
            fn visit<V: FnMut(TypeId, &'static str)>(mut visit: V) {
                $( visit(TypeId::of::<$name>(), type_name::<$name>()); )+
            }
        }
    };
}

impl_component_set!(A);
impl_component_set!(A, B);
impl_component_set!(A, B, C);
impl_component_set!(A, B, C, D);
impl_component_set!(A, B, C, D, E);
impl_component_set!(A, B, C, D, E, F);
impl_component_set!(A, B, C, D, E, F, G);
impl_component_set!(A, B, C, D, E, F, G, H);
impl_component_set!(A, B, C, D, E, F, G, H, I);
impl_component_set!(A, B, C, D, E, F, G, H, I, J);
impl_component_set!(A, B, C, D, E, F, G, H, I, J, K);
impl_component_set!(A, B, C, D, E, F, G, H, I, J, K, L);

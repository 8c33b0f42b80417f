//! Entity trait for ledger objects with a stable identity.

use core::borrow::Borrow;

/// Something identified by an id that never changes for its lifetime
/// (accounts, beneficiaries), as opposed to a [`crate::ValueObject`].
pub trait Entity {
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    fn id(&self) -> &Self::Id;
}

/// First entity in `entities` whose id equals `id`.
///
/// Linear scan in slice order, so with duplicate ids the earliest one wins.
pub fn find_by_id<'a, E, Q>(entities: &'a [E], id: &Q) -> Option<&'a E>
where
    E: Entity,
    E::Id: Borrow<Q>,
    Q: Eq + ?Sized,
{
    entities
        .iter()
        .find(|entity| Borrow::<Q>::borrow(entity.id()) == id)
}

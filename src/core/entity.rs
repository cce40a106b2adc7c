//! Typed integer IDs for game entities

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;

/// Simple integer ID tagged with the kind of entity it names
///
/// The tag prevents a card id from being passed where a player id is
/// expected. Card ids come from the deck records and are unique within one
/// player's cards; every lookup is scoped to a player.
///
/// `PartialEq` is derived (not manual) so ids can be matched as constants in
/// patterns; it requires `T: PartialEq`, which every tag type provides.
#[derive(PartialEq)]
pub struct EntityId<T> {
    id: u32,
    _marker: PhantomData<fn() -> T>,
}

impl<T> EntityId<T> {
    pub const fn new(id: u32) -> Self {
        EntityId {
            id,
            _marker: PhantomData,
        }
    }

    pub fn as_u32(&self) -> u32 {
        self.id
    }
}

// Manual impls: derives would put bounds on T, which is only a tag.

impl<T> Clone for EntityId<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for EntityId<T> {}

impl<T: PartialEq> Eq for EntityId<T> {}

impl<T: PartialEq> PartialOrd for EntityId<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T: PartialEq> Ord for EntityId<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.id.cmp(&other.id)
    }
}

impl<T> Hash for EntityId<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl<T> fmt::Debug for EntityId<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.id)
    }
}

impl<T> fmt::Display for EntityId<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id)
    }
}

impl<T> Serialize for EntityId<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u32(self.id)
    }
}

impl<'de, T> Deserialize<'de> for EntityId<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        u32::deserialize(deserializer).map(EntityId::new)
    }
}

/// Base trait for named game entities
pub trait GameEntity<T> {
    fn id(&self) -> EntityId<T>;
    fn name(&self) -> &str;
}

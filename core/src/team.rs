//! Rosters: one side's set of characters keyed by identity.

use std::collections::BTreeMap;

use crate::{Character, CharacterId};

/// Set of characters belonging to one side.
///
/// Membership is by [`CharacterId`]; the roster owns no positions.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Team {
    members: BTreeMap<CharacterId, Character>,
}

impl Team {
    /// Creates an empty roster.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts every provided character. Callers guarantee unique identities.
    pub fn add_all<I>(&mut self, characters: I)
    where
        I: IntoIterator<Item = Character>,
    {
        for character in characters {
            let _ = self.members.insert(character.id(), character);
        }
    }

    /// Removes the character with the provided identity.
    pub fn delete(&mut self, id: CharacterId) -> Option<Character> {
        self.members.remove(&id)
    }

    /// Number of members.
    #[must_use]
    pub fn size(&self) -> usize {
        self.members.len()
    }

    /// Whether the roster has no members left.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Whether a member with the identity exists.
    #[must_use]
    pub fn contains(&self, id: CharacterId) -> bool {
        self.members.contains_key(&id)
    }

    /// Looks a member up by identity.
    #[must_use]
    pub fn get(&self, id: CharacterId) -> Option<&Character> {
        self.members.get(&id)
    }

    /// Looks a member up by identity for mutation.
    pub fn get_mut(&mut self, id: CharacterId) -> Option<&mut Character> {
        self.members.get_mut(&id)
    }

    /// Iterates members in identity order.
    pub fn iter(&self) -> impl Iterator<Item = &Character> {
        self.members.values()
    }

    /// Iterates members mutably in identity order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Character> {
        self.members.values_mut()
    }

    /// Copies the members into an ordered sequence.
    #[must_use]
    pub fn to_snapshot(&self) -> Vec<Character> {
        self.members.values().cloned().collect()
    }

    /// Sum of the members' health.
    #[must_use]
    pub fn total_health(&self) -> f32 {
        self.members.values().map(Character::health).sum()
    }
}

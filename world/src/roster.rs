//! Random roster generation and start-cell placement.

use rand::{seq::SliceRandom, Rng};
use retro_tactics_core::{CellIndex, Character, CharacterId, CharacterKind};

/// Hands out character identities that stay unique for a world's lifetime.
#[derive(Clone, Debug, Default)]
pub(crate) struct IdAllocator {
    next: u32,
}

impl IdAllocator {
    pub(crate) fn allocate(&mut self) -> CharacterId {
        let id = CharacterId::new(self.next);
        self.next = self.next.wrapping_add(1);
        id
    }
}

/// Generates `count` characters with kinds drawn uniformly from `allowed`
/// and levels drawn uniformly from `1..=max_level`.
pub(crate) fn generate_team<R: Rng>(
    rng: &mut R,
    ids: &mut IdAllocator,
    allowed: &[CharacterKind],
    max_level: u32,
    count: usize,
) -> Vec<Character> {
    let max_level = max_level.max(1);
    let mut team = Vec::with_capacity(count);
    while team.len() < count {
        let Some(kind) = allowed.choose(rng).copied() else {
            break;
        };
        let level = rng.gen_range(1..=max_level);
        team.push(Character::new(ids.allocate(), kind, level));
    }
    team
}

/// Assigns every character a distinct cell drawn uniformly from `pool`.
///
/// Characters that find the pool exhausted stay unplaced.
pub(crate) fn place<R: Rng>(
    rng: &mut R,
    characters: impl IntoIterator<Item = CharacterId>,
    pool: &[CellIndex],
) -> Vec<(CharacterId, CellIndex)> {
    let mut free = pool.to_vec();
    let mut placed = Vec::new();
    for character in characters {
        if free.is_empty() {
            tracing::warn!(character = character.get(), "start cells exhausted");
            break;
        }
        let slot = rng.gen_range(0..free.len());
        placed.push((character, free.swap_remove(slot)));
    }
    placed
}

/// Recruits added to the player roster on entering `level`, and their
/// maximum level.
pub(crate) const fn recruits_for(level: u32) -> (usize, u32) {
    match level {
        2 => (1, 1),
        3 => (2, 2),
        4 => (2, 3),
        _ => (0, 1),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use retro_tactics_core::{geometry, BOARD_SIZE};

    #[test]
    fn generated_team_respects_kinds_and_levels() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let mut ids = IdAllocator::default();
        let team = generate_team(&mut rng, &mut ids, &CharacterKind::AI, 3, 12);

        assert_eq!(team.len(), 12);
        for character in &team {
            assert!(CharacterKind::AI.contains(&character.kind()));
            assert!((1..=3).contains(&character.level()));
        }
        let mut identities: Vec<u32> = team.iter().map(|c| c.id().get()).collect();
        identities.dedup();
        assert_eq!(identities.len(), 12);
    }

    #[test]
    fn empty_kind_list_generates_nothing() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let mut ids = IdAllocator::default();

        assert!(generate_team(&mut rng, &mut ids, &[], 1, 3).is_empty());
    }

    #[test]
    fn placement_uses_distinct_pool_cells() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let pool = geometry::player_start_cells(BOARD_SIZE);
        let characters = (0..7).map(CharacterId::new);
        let placed = place(&mut rng, characters, &pool);

        assert_eq!(placed.len(), 7);
        let mut cells: Vec<CellIndex> = placed.iter().map(|(_, cell)| *cell).collect();
        assert!(cells.iter().all(|cell| pool.contains(cell)));
        cells.sort();
        cells.dedup();
        assert_eq!(cells.len(), 7);
    }

    #[test]
    fn recruits_grow_with_level() {
        assert_eq!(recruits_for(2), (1, 1));
        assert_eq!(recruits_for(3), (2, 2));
        assert_eq!(recruits_for(4), (2, 3));
    }
}

use std::collections::HashMap;

use crate::player::models::PlayerModel;

/// Collapses players whose normalized display name (trim + uppercase)
/// collides into one canonical representative per name.
///
/// This is display-layer reconciliation only: nothing is merged or deleted
/// underneath, the losing profile is simply hidden from the rendered
/// ranking. Two real players sharing a name is an accepted limitation.
///
/// The input is pre-sorted by a stable key (XP desc, creation asc, id asc)
/// before folding so the outcome is reproducible. Pairwise tie-break while
/// folding left to right:
/// 1. strictly greater accumulated XP wins;
/// 2. on equal XP, a non-empty equipped loadout (the active, configured
///    profile) beats an empty one;
/// 3. otherwise the first-seen entry stays.
pub fn collapse_shared_names(mut players: Vec<PlayerModel>) -> Vec<PlayerModel> {
    players.sort_by(|a, b| {
        b.accumulated_xp
            .cmp(&a.accumulated_xp)
            .then_with(|| a.created_at.cmp(&b.created_at))
            .then_with(|| a.id.cmp(&b.id))
    });

    let mut first_seen: Vec<String> = Vec::new();
    let mut by_name: HashMap<String, PlayerModel> = HashMap::new();

    for challenger in players {
        let key = challenger.normalized_name();
        match by_name.get(&key) {
            None => {
                first_seen.push(key.clone());
                by_name.insert(key, challenger);
            }
            Some(incumbent) => {
                if beats(&challenger, incumbent) {
                    by_name.insert(key, challenger);
                }
            }
        }
    }

    let mut survivors: Vec<PlayerModel> = first_seen
        .into_iter()
        .filter_map(|key| by_name.remove(&key))
        .collect();
    // Stable sort keeps first-seen order for equal XP
    survivors.sort_by(|a, b| b.accumulated_xp.cmp(&a.accumulated_xp));
    survivors
}

fn beats(challenger: &PlayerModel, incumbent: &PlayerModel) -> bool {
    if challenger.accumulated_xp != incumbent.accumulated_xp {
        return challenger.accumulated_xp > incumbent.accumulated_xp;
    }
    !challenger.equipped_loadout.is_empty() && incumbent.equipped_loadout.is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::economy::catalog::EquipSlot;
    use chrono::{Duration, Utc};
    use rstest::rstest;

    fn player(name: &str, xp: i64, equipped: bool, age_minutes: i64) -> PlayerModel {
        let mut p = PlayerModel::new(name.to_string(), "0000".to_string());
        p.accumulated_xp = xp;
        p.created_at = Utc::now() - Duration::minutes(age_minutes);
        if equipped {
            p.equipped_loadout
                .insert(EquipSlot::Icon, "flame-icon".to_string());
        }
        p
    }

    #[test]
    fn distinct_names_pass_through_sorted() {
        let out = collapse_shared_names(vec![
            player("Bia", 50, false, 10),
            player("Ana", 100, false, 20),
        ]);
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].name, "Ana");
        assert_eq!(out[1].name, "Bia");
    }

    #[test]
    fn higher_xp_wins_name_collision() {
        let out = collapse_shared_names(vec![
            player("ana", 100, true, 10),
            player("ANA", 900, false, 20),
        ]);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].accumulated_xp, 900);
    }

    #[test]
    fn equal_xp_prefers_configured_profile() {
        // A(name="ANA", xp=100, no loadout) vs
        // B(name="Ana", xp=100, icon equipped) -> B survives
        let a = player("ANA", 100, false, 20);
        let b = player("Ana", 100, true, 10);
        let b_id = b.id.clone();

        let out = collapse_shared_names(vec![a, b]);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].id, b_id);
    }

    #[test]
    fn equal_xp_equal_loadout_keeps_first_seen() {
        // Older account folds first and stays
        let older = player("Ana", 100, false, 60);
        let newer = player("ana", 100, false, 5);
        let older_id = older.id.clone();

        let out = collapse_shared_names(vec![newer, older]);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].id, older_id);
    }

    #[rstest]
    #[case(vec![("Ana", 100), ("ana", 80), ("ANA ", 60)], 1)]
    #[case(vec![("Ana", 100), ("Bia", 100), ("Caio", 100)], 3)]
    #[case(vec![], 0)]
    fn collapses_to_expected_count(#[case] input: Vec<(&str, i64)>, #[case] expected: usize) {
        let players = input
            .into_iter()
            .map(|(name, xp)| player(name, xp, false, 0))
            .collect();
        assert_eq!(collapse_shared_names(players).len(), expected);
    }

    #[test]
    fn idempotent_over_its_own_output() {
        let input = vec![
            player("Ana", 100, true, 10),
            player("ANA", 100, false, 20),
            player("Bia", 300, false, 30),
            player("bia", 200, true, 40),
        ];

        let once = collapse_shared_names(input);
        let twice = collapse_shared_names(once.clone());

        let ids = |v: &[PlayerModel]| v.iter().map(|p| p.id.clone()).collect::<Vec<_>>();
        assert_eq!(ids(&once), ids(&twice));
    }
}

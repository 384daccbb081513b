use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::economy::catalog::Rarity;

/// How a title is acquired
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum TitleUnlock {
    /// Member of the uniform random pool drawn on prestige reset
    PrestigeDraw,
    /// Deterministic claim once a lifetime XP milestone is reached,
    /// optionally inside a real-world time window
    Milestone {
        min_xp: i64,
        available_until: Option<DateTime<Utc>>,
    },
}

/// A static title definition. Rarity is a cosmetic label only: the prestige
/// draw is uniform over the pool and never weighted by it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Title {
    pub id: String,
    pub name: String,
    pub rarity: Rarity,
    pub unlock: TitleUnlock,
}

/// All title definitions, fixed at startup
pub struct TitlePool {
    titles: Vec<Title>,
}

impl TitlePool {
    pub fn new(titles: Vec<Title>) -> Self {
        Self { titles }
    }

    pub fn titles(&self) -> &[Title] {
        &self.titles
    }

    pub fn get(&self, title_id: &str) -> Option<&Title> {
        self.titles.iter().find(|t| t.id == title_id)
    }

    /// The fixed pool a prestige reset draws from
    pub fn prestige_pool(&self) -> Vec<&Title> {
        self.titles
            .iter()
            .filter(|t| matches!(t.unlock, TitleUnlock::PrestigeDraw))
            .collect()
    }
}

impl Default for TitlePool {
    fn default() -> Self {
        let draw = |id: &str, name: &str, rarity| Title {
            id: id.to_string(),
            name: name.to_string(),
            rarity,
            unlock: TitleUnlock::PrestigeDraw,
        };

        let mut titles = vec![
            draw("veteran", "Veteran", Rarity::Common),
            draw("maestro", "Maestro", Rarity::Rare),
            draw("virtuoso", "Virtuoso", Rarity::Rare),
            draw("prodigy", "Prodigy", Rarity::Epic),
            draw("stage-legend", "Stage Legend", Rarity::Legendary),
        ];

        titles.push(Title {
            id: "founder".to_string(),
            name: "Founder".to_string(),
            rarity: Rarity::Epic,
            unlock: TitleUnlock::Milestone {
                min_xp: 100_000,
                available_until: Some(Utc.with_ymd_and_hms(2026, 3, 1, 23, 59, 59).unwrap()),
            },
        });

        Self::new(titles)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prestige_pool_excludes_milestone_titles() {
        let pool = TitlePool::default();
        let draw_ids: Vec<&str> = pool.prestige_pool().iter().map(|t| t.id.as_str()).collect();

        assert!(!draw_ids.is_empty());
        assert!(!draw_ids.contains(&"founder"));
        assert!(pool.get("founder").is_some());
    }
}

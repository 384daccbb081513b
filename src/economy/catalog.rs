use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

/// Cosmetic equip categories. A loadout holds at most one item per slot.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum EquipSlot {
    Icon,
    Border,
    Font,
    Card,
}

/// Cosmetic rarity tier. Ordered for display grouping only: rarity never
/// affects prices, drop odds or any other mechanic.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Rarity {
    Common,
    Rare,
    Epic,
    Legendary,
}

/// A static store item definition, immutable at runtime
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogItem {
    pub id: String,
    pub name: String,
    pub slot: EquipSlot,
    pub price: i64,
    pub rarity: Rarity,
    pub collection: Option<String>,
    pub available_until: Option<DateTime<Utc>>,
}

impl CatalogItem {
    /// Whether the item can still be purchased at `now`
    pub fn is_available(&self, now: DateTime<Utc>) -> bool {
        match self.available_until {
            Some(deadline) => now <= deadline,
            None => true,
        }
    }
}

/// The full store catalog, owned as configuration and built once at startup
pub struct Catalog {
    items: Vec<CatalogItem>,
}

impl Catalog {
    pub fn new(items: Vec<CatalogItem>) -> Self {
        Self { items }
    }

    pub fn items(&self) -> &[CatalogItem] {
        &self.items
    }

    pub fn get(&self, item_id: &str) -> Option<&CatalogItem> {
        self.items.iter().find(|item| item.id == item_id)
    }
}

impl Default for Catalog {
    fn default() -> Self {
        let item = |id: &str, name: &str, slot, price, rarity| CatalogItem {
            id: id.to_string(),
            name: name.to_string(),
            slot,
            price,
            rarity,
            collection: None,
            available_until: None,
        };

        let mut items = vec![
            item("neon-orange", "Neon Orange Border", EquipSlot::Border, 100, Rarity::Common),
            item("gold-name", "Golden Name", EquipSlot::Font, 250, Rarity::Rare),
            item("epic-red", "Epic Red Card", EquipSlot::Card, 500, Rarity::Epic),
            item("cyber-aqua", "Cyber Aqua Card", EquipSlot::Card, 500, Rarity::Epic),
            item("flame-icon", "Flame Icon", EquipSlot::Icon, 150, Rarity::Common),
            item("crown-icon", "Crown Icon", EquipSlot::Icon, 400, Rarity::Legendary),
        ];

        // Time-boxed exclusive collection
        let deadline = Utc.with_ymd_and_hms(2026, 2, 15, 23, 59, 59).unwrap();
        for (id, name, price, rarity) in [
            ("club-crest-red", "Red Club Crest", 300, Rarity::Rare),
            ("club-crest-blue", "Blue Club Crest", 300, Rarity::Rare),
        ] {
            items.push(CatalogItem {
                id: id.to_string(),
                name: name.to_string(),
                slot: EquipSlot::Icon,
                price,
                rarity,
                collection: Some("Football Clubs".to_string()),
                available_until: Some(deadline),
            });
        }

        Self::new(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn lookup_by_id() {
        let catalog = Catalog::default();
        assert_eq!(catalog.get("neon-orange").unwrap().price, 100);
        assert!(catalog.get("no-such-item").is_none());
    }

    #[test]
    fn availability_window() {
        let mut item = Catalog::default().get("neon-orange").unwrap().clone();
        let now = Utc::now();

        assert!(item.is_available(now));

        item.available_until = Some(now - Duration::hours(1));
        assert!(!item.is_available(now));

        item.available_until = Some(now + Duration::hours(1));
        assert!(item.is_available(now));
    }

    #[test]
    fn slot_string_forms() {
        assert_eq!(EquipSlot::Card.to_string(), "card");
        assert_eq!("border".parse::<EquipSlot>().unwrap(), EquipSlot::Border);
    }
}

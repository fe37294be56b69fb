//! Static item catalogs.
//!
//! Two immutable tables: the 30-entry tradeable catalog (full supply/demand
//! tracking) and the 10-entry merchant-exclusive catalog (price range only).
//! Catalog order is the iteration order for every price-engine pass, which
//! makes it part of the determinism contract — never reorder entries.

use crate::types::{Category, ItemDef, MerchantItemDef};

macro_rules! item {
    ($id:literal, $name:literal, $cat:ident, $base:literal, $min:literal, $max:literal, $vol:literal, $supply:literal, $decay:literal) => {
        ItemDef {
            id: $id,
            name: $name,
            category: Category::$cat,
            base_price: $base,
            min_price: $min,
            max_price: $max,
            volatility: $vol,
            base_supply: $supply,
            demand_decay: $decay,
        }
    };
}

/// The tradeable-item catalog: 30 entries spanning all 8 categories.
pub static CATALOG: [ItemDef; 30] = [
    // Materials
    item!("iron_ore", "Iron Ore", Materials, 10, 4, 30, 0.20, 120.0, 0.10),
    item!("wood", "Wood", Materials, 5, 2, 15, 0.15, 200.0, 0.08),
    item!("stone", "Stone", Materials, 4, 2, 12, 0.12, 180.0, 0.08),
    item!("leather", "Leather", Materials, 8, 3, 24, 0.18, 100.0, 0.10),
    item!("cloth", "Cloth", Materials, 6, 3, 18, 0.16, 140.0, 0.09),
    // Tools
    item!("pickaxe", "Pickaxe", Tools, 50, 20, 150, 0.15, 40.0, 0.10),
    item!("fishing_rod", "Fishing Rod", Tools, 35, 15, 100, 0.14, 50.0, 0.10),
    item!("hammer", "Hammer", Tools, 40, 18, 120, 0.14, 45.0, 0.10),
    item!("shovel", "Shovel", Tools, 30, 12, 90, 0.13, 55.0, 0.10),
    // Weapons
    item!("iron_sword", "Iron Sword", Weapons, 120, 50, 360, 0.22, 30.0, 0.12),
    item!("hunting_bow", "Hunting Bow", Weapons, 90, 40, 270, 0.20, 35.0, 0.12),
    item!("dagger", "Dagger", Weapons, 60, 25, 180, 0.18, 45.0, 0.12),
    item!("battle_axe", "Battle Axe", Weapons, 150, 60, 450, 0.25, 25.0, 0.12),
    // Armor
    item!("leather_armor", "Leather Armor", Armor, 80, 35, 240, 0.18, 40.0, 0.11),
    item!("iron_shield", "Iron Shield", Armor, 100, 45, 300, 0.20, 35.0, 0.11),
    item!("chainmail", "Chainmail", Armor, 200, 80, 600, 0.24, 20.0, 0.12),
    item!("iron_helmet", "Iron Helmet", Armor, 70, 30, 210, 0.17, 40.0, 0.11),
    // Food
    item!("bread", "Bread", Food, 3, 1, 9, 0.10, 300.0, 0.06),
    item!("apple", "Apple", Food, 2, 1, 6, 0.10, 350.0, 0.06),
    item!("cheese", "Cheese", Food, 6, 2, 18, 0.12, 200.0, 0.07),
    item!("salted_meat", "Salted Meat", Food, 12, 5, 36, 0.14, 150.0, 0.08),
    item!("honey", "Honey", Food, 15, 6, 45, 0.16, 100.0, 0.08),
    // Potions
    item!("health_potion", "Health Potion", Potions, 25, 10, 75, 0.20, 80.0, 0.12),
    item!("mana_potion", "Mana Potion", Potions, 30, 12, 90, 0.20, 70.0, 0.12),
    item!("antidote", "Antidote", Potions, 20, 8, 60, 0.18, 90.0, 0.11),
    item!("elixir_of_vigor", "Elixir of Vigor", Potions, 75, 30, 225, 0.28, 30.0, 0.14),
    // Decorations
    item!("ornate_vase", "Ornate Vase", Decorations, 18, 7, 54, 0.15, 60.0, 0.09),
    item!("tapestry", "Tapestry", Decorations, 45, 18, 135, 0.17, 40.0, 0.10),
    // Rare
    item!("ancient_relic", "Ancient Relic", Rare, 500, 200, 1500, 0.35, 8.0, 0.15),
    item!("dragon_scale", "Dragon Scale", Rare, 400, 160, 1200, 0.32, 10.0, 0.15),
];

macro_rules! merchant_item {
    ($id:literal, $name:literal, $base:literal, $min:literal, $max:literal) => {
        MerchantItemDef {
            id: $id,
            name: $name,
            base_price: $base,
            min_price: $min,
            max_price: $max,
        }
    };
}

/// The merchant-exclusive catalog: 10 entries, ids disjoint from [`CATALOG`].
pub static MERCHANT_CATALOG: [MerchantItemDef; 10] = [
    merchant_item!("exotic_spices", "Exotic Spices", 40, 20, 100),
    merchant_item!("silk_bolt", "Silk Bolt", 60, 30, 150),
    merchant_item!("foreign_map", "Foreign Map", 80, 35, 200),
    merchant_item!("mystery_box", "Mystery Box", 50, 25, 250),
    merchant_item!("enchanted_trinket", "Enchanted Trinket", 120, 60, 360),
    merchant_item!("rare_seeds", "Rare Seeds", 30, 15, 90),
    merchant_item!("star_chart", "Star Chart", 100, 50, 300),
    merchant_item!("amber_perfume", "Amber Perfume", 45, 20, 120),
    merchant_item!("gilded_mirror", "Gilded Mirror", 150, 70, 400),
    merchant_item!("music_box", "Music Box", 90, 40, 240),
];

/// Look up a tradeable item definition by id.
pub fn item(id: &str) -> Option<&'static ItemDef> {
    CATALOG.iter().find(|def| def.id == id)
}

/// Look up a merchant-exclusive item definition by id.
pub fn merchant_item(id: &str) -> Option<&'static MerchantItemDef> {
    MERCHANT_CATALOG.iter().find(|def| def.id == id)
}

/// All tradeable items in a category, in catalog order.
pub fn items_in(category: Category) -> impl Iterator<Item = &'static ItemDef> {
    CATALOG.iter().filter(move |def| def.category == category)
}

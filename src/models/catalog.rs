//! Regular players offered in the "select players" picker, with their avatars.
//!
//! The table is static; roster operations read it to resolve an avatar and never change it.

use serde::Serialize;

/// Avatar shown for anyone without a picture of their own.
pub const DEFAULT_AVATAR: &str = "/static/avatars/default-avatar.svg";

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
pub struct CatalogEntry {
    pub id: u32,
    pub name: &'static str,
    pub avatar: &'static str,
}

const AVAILABLE_PLAYERS: &[CatalogEntry] = &[
    CatalogEntry { id: 1, name: "Annan", avatar: "/static/avatars/annan.svg" },
    CatalogEntry { id: 2, name: "Ajas", avatar: "/static/avatars/ajas.svg" },
    CatalogEntry { id: 3, name: "Chakkara", avatar: "/static/avatars/chakkara.svg" },
    CatalogEntry { id: 4, name: "Rahul", avatar: "/static/avatars/rahul.svg" },
    CatalogEntry { id: 5, name: "Thantha", avatar: "/static/avatars/thantha.svg" },
    CatalogEntry { id: 6, name: "Saji", avatar: "/static/avatars/saji.svg" },
    CatalogEntry { id: 7, name: "Jineshp", avatar: "/static/avatars/jineshp.svg" },
    CatalogEntry { id: 8, name: "Sonu", avatar: "/static/avatars/sonu.svg" },
    CatalogEntry { id: 9, name: "Dasan", avatar: "/static/avatars/dasan.svg" },
    CatalogEntry { id: 10, name: "Petta", avatar: "/static/avatars/petta.svg" },
    CatalogEntry { id: 11, name: "Kailas", avatar: "/static/avatars/kailas.svg" },
    CatalogEntry { id: 12, name: "Kannan", avatar: "/static/avatars/kannan.svg" },
    CatalogEntry { id: 13, name: "Subhash", avatar: "/static/avatars/subhash.svg" },
];

pub fn available_players() -> &'static [CatalogEntry] {
    AVAILABLE_PLAYERS
}

/// Catalog entry whose name matches case-insensitively.
pub fn find_catalog_player(name: &str) -> Option<&'static CatalogEntry> {
    let wanted = name.trim().to_lowercase();
    AVAILABLE_PLAYERS
        .iter()
        .find(|entry| entry.name.to_lowercase() == wanted)
}

/// Avatar for a name: the catalog picture if known, else the default.
pub fn avatar_for(name: &str) -> &'static str {
    find_catalog_player(name)
        .map(|entry| entry.avatar)
        .unwrap_or(DEFAULT_AVATAR)
}

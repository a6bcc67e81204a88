//! Game and category rows.

use crate::RowId;

/// Landing page stored on every generated game.
pub const GAME_URL: &str = "https://example.com";

/// A row of the `games` table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameRow {
    pub id: RowId,
    pub name: String,
    pub slug: String,
    pub url: &'static str,
    /// Every game points at category 1; the constraint is deferred on load.
    pub default_category: u32,
    pub description: String,
    pub banner: bool,
    pub cover_art: bool,
    pub flags: i64,
}

impl GameRow {
    pub const TABLE: &'static str = "games";

    pub const COLUMNS: [&'static str; 9] = [
        "id",
        "name",
        "slug",
        "url",
        "default_category",
        "description",
        "banner",
        "cover_art",
        "flags",
    ];

    /// Builds the game row for `id`.
    #[must_use]
    pub fn for_id(id: RowId) -> Self {
        let n = id.raw();
        Self {
            id,
            name: format!("test game {n}"),
            slug: format!("gameslug{n}"),
            url: GAME_URL,
            default_category: 1,
            description: format!("test game {n}"),
            banner: false,
            cover_art: false,
            flags: 0,
        }
    }
}

/// A row of the `categories` table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryRow {
    pub id: RowId,
    /// Owning game; category `n` belongs to game `n`.
    pub game: RowId,
    pub name: String,
    pub description: String,
    pub rules: String,
    pub scoreboard: bool,
    pub flags: i64,
}

impl CategoryRow {
    pub const TABLE: &'static str = "categories";

    pub const COLUMNS: [&'static str; 7] = [
        "id",
        "game",
        "name",
        "description",
        "rules",
        "scoreboard",
        "flags",
    ];

    /// Builds the category row for `id`.
    #[must_use]
    pub fn for_id(id: RowId) -> Self {
        let n = id.raw();
        Self {
            id,
            game: id,
            name: format!("test category {n}"),
            description: format!("this is test category {n}"),
            rules: format!("rules for category {n}"),
            scoreboard: true,
            flags: 0,
        }
    }
}

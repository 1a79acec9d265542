use tasker_core::Category;

pub const PRAGMAS: &str = "PRAGMA foreign_keys = ON;\
                           PRAGMA synchronous = NORMAL;";

/// DDL for one category table. `id` aliases SQLite's `rowid`, and
/// AUTOINCREMENT keeps deleted ids from ever being handed out again.
pub fn create_table(category: Category) -> String {
    format!(
        "CREATE TABLE IF NOT EXISTS {table} (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            lastUpdated TEXT NOT NULL,
            name TEXT NOT NULL,
            completed INTEGER NOT NULL DEFAULT 0 CHECK (completed IN (0, 1))
        );",
        table = category.table_name()
    )
}

/// DDL for every whitelisted category.
pub fn create_tables() -> String {
    Category::ALL.into_iter().map(create_table).collect::<Vec<_>>().join("\n")
}

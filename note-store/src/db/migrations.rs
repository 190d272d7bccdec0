use lazy_static::lazy_static;
use rusqlite_migration::{Migrations, M};

lazy_static! {
    // Databases written before versioning carry `user_version = 0` and an
    // existing table, so every step has to stay idempotent.
    pub static ref MIGRATIONS: Migrations<'static> = Migrations::new(vec![
        M::up(
            r#"
            CREATE TABLE IF NOT EXISTS notes (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                title TEXT NULL,
                body TEXT NULL,
                created_at TEXT,
                updated_at TEXT
            );
        "#
        ),
    ]);
}

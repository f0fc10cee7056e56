use sea_orm::{ConnectionTrait, Database, DatabaseConnection, DbErr, Statement};

pub async fn init_db(database_url: &str) -> Result<DatabaseConnection, DbErr> {
    let db = Database::connect(database_url).await?;

    // Run migrations manually (simple SQL)
    run_migrations(&db).await?;

    Ok(db)
}

async fn run_migrations(db: &DatabaseConnection) -> Result<(), DbErr> {
    // Quotes table. List-valued columns (custom post types, plugins) are
    // stored as JSON text.
    db.execute(Statement::from_string(
        db.get_database_backend(),
        r#"
        CREATE TABLE IF NOT EXISTS quotes (
            id TEXT PRIMARY KEY,
            client_name TEXT NOT NULL DEFAULT '',
            project_name TEXT NOT NULL DEFAULT '',
            pages INTEGER NOT NULL DEFAULT 0,
            include_design BOOLEAN NOT NULL DEFAULT 0,
            include_dev BOOLEAN NOT NULL DEFAULT 0,
            include_copy BOOLEAN NOT NULL DEFAULT 0,
            is_landing_page BOOLEAN NOT NULL DEFAULT 0,
            add_blog BOOLEAN NOT NULL DEFAULT 0,
            add_shop BOOLEAN NOT NULL DEFAULT 0,
            custom_post_types TEXT NOT NULL DEFAULT '[]',
            plugins TEXT NOT NULL DEFAULT '[]',
            include_pm BOOLEAN NOT NULL DEFAULT 0,
            include_contingency BOOLEAN NOT NULL DEFAULT 0,
            discount_type TEXT NOT NULL DEFAULT 'percent',
            discount_value REAL NOT NULL DEFAULT 0,
            total INTEGER NOT NULL DEFAULT 0,
            status TEXT NOT NULL DEFAULT 'Draft',
            notes TEXT NOT NULL DEFAULT '',
            created_at TEXT NOT NULL
        )
        "#
        .to_owned(),
    ))
    .await?;

    // Singleton settings row, seeded once with the default rates.
    db.execute(Statement::from_string(
        db.get_database_backend(),
        r#"
        CREATE TABLE IF NOT EXISTS settings (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            rate INTEGER NOT NULL DEFAULT 175,
            min_project INTEGER NOT NULL DEFAULT 1750,
            landing_page_price INTEGER NOT NULL DEFAULT 700,
            show_internal_costs BOOLEAN NOT NULL DEFAULT 0,
            theme TEXT NOT NULL DEFAULT 'dark',
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        )
        "#
        .to_owned(),
    ))
    .await?;

    db.execute(Statement::from_string(
        db.get_database_backend(),
        r#"
        INSERT OR IGNORE INTO settings (id, rate, min_project, landing_page_price, show_internal_costs, theme, created_at, updated_at)
        VALUES (1, 175, 1750, 700, 0, 'dark', datetime('now'), datetime('now'))
        "#
        .to_owned(),
    ))
    .await?;

    Ok(())
}

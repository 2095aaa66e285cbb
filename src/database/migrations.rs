//! Idempotent schema setup, safe to run on every start.
//!
//! Older deployments created `properties.price` as INTEGER and lacked several
//! columns; those are widened or added in place.

use sqlx::PgPool;
use tracing::info;

use super::manager::DatabaseError;

const CREATE_TABLES: &[(&str, &str)] = &[
    (
        "users",
        "CREATE TABLE IF NOT EXISTS users (
            id SERIAL PRIMARY KEY,
            username TEXT NOT NULL UNIQUE,
            password TEXT NOT NULL
        )",
    ),
    (
        "properties",
        "CREATE TABLE IF NOT EXISTS properties (
            id SERIAL PRIMARY KEY,
            title TEXT NOT NULL,
            description TEXT NOT NULL,
            price TEXT NOT NULL,
            location TEXT NOT NULL,
            size DOUBLE PRECISION NOT NULL,
            size_unit TEXT NOT NULL DEFAULT 'Guntha',
            property_type TEXT NOT NULL
        )",
    ),
    (
        "blog_posts",
        "CREATE TABLE IF NOT EXISTS blog_posts (
            id SERIAL PRIMARY KEY,
            title TEXT NOT NULL,
            content TEXT NOT NULL,
            excerpt TEXT NOT NULL,
            author TEXT NOT NULL,
            image TEXT NOT NULL,
            created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
        )",
    ),
    (
        "messages",
        "CREATE TABLE IF NOT EXISTS messages (
            id SERIAL PRIMARY KEY,
            name TEXT NOT NULL,
            email TEXT NOT NULL,
            phone TEXT NOT NULL,
            location TEXT NOT NULL,
            message TEXT NOT NULL,
            is_read BOOLEAN DEFAULT false,
            created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
        )",
    ),
    (
        "testimonials",
        "CREATE TABLE IF NOT EXISTS testimonials (
            id SERIAL PRIMARY KEY,
            name TEXT NOT NULL,
            location TEXT NOT NULL,
            message TEXT NOT NULL,
            rating INTEGER NOT NULL,
            image TEXT DEFAULT '/images/default-avatar.png'
        )",
    ),
];

const PRICE_COLUMN_TYPE: &str = "SELECT data_type::text FROM information_schema.columns
    WHERE table_schema = current_schema() AND table_name = 'properties' AND column_name = 'price'";

const WIDEN_PRICE: &str = "ALTER TABLE properties ALTER COLUMN price TYPE TEXT USING price::text";

const UPGRADES: &[&str] = &[
    "ALTER TABLE properties ADD COLUMN IF NOT EXISTS property_type TEXT NOT NULL DEFAULT 'Residential'",
    "ALTER TABLE properties ADD COLUMN IF NOT EXISTS price_unit TEXT",
    "ALTER TABLE properties ADD COLUMN IF NOT EXISTS features TEXT[]",
    "ALTER TABLE properties ADD COLUMN IF NOT EXISTS images TEXT[]",
    "ALTER TABLE properties ADD COLUMN IF NOT EXISTS video_url TEXT",
    "ALTER TABLE properties ADD COLUMN IF NOT EXISTS is_featured BOOLEAN DEFAULT false",
    "ALTER TABLE properties ADD COLUMN IF NOT EXISTS created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP",
    "ALTER TABLE messages ADD COLUMN IF NOT EXISTS interest TEXT NOT NULL DEFAULT 'other'",
];

fn needs_price_widening(data_type: Option<&str>) -> bool {
    matches!(data_type, Some(t) if t != "text")
}

/// Create every table and bring older schemas up to date.
pub async fn run(pool: &PgPool) -> Result<(), DatabaseError> {
    for (table, ddl) in CREATE_TABLES {
        sqlx::query(ddl).execute(pool).await?;
        info!("Ensured table {}", table);
    }
    let price_type: Option<(String,)> = sqlx::query_as(PRICE_COLUMN_TYPE)
        .fetch_optional(pool)
        .await?;
    if needs_price_widening(price_type.as_ref().map(|(t,)| t.as_str())) {
        // Full table rewrite under ACCESS EXCLUSIVE
        sqlx::query(WIDEN_PRICE).execute(pool).await?;
        info!("Widened properties.price to TEXT");
    }
    for ddl in UPGRADES {
        sqlx::query(ddl).execute(pool).await?;
    }
    info!("Database migration completed");
    Ok(())
}

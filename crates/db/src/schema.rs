use eyre::Result;
use sqlx::{Pool, Postgres};
use tracing::info;

use crate::repositories::room;

const INDEXES: &[&str] = &[
    "CREATE INDEX IF NOT EXISTS idx_bookings_room_date ON bookings(room_id, date)",
    "CREATE INDEX IF NOT EXISTS idx_bookings_status ON bookings(status)",
    "CREATE INDEX IF NOT EXISTS idx_bookings_date ON bookings(date)",
    // Backstop for identical concurrent inserts that slip past the partition lock.
    r#"
    CREATE UNIQUE INDEX IF NOT EXISTS uniq_bookings_active_start
        ON bookings(room_id, date, start_time)
        WHERE status <> 'cancelled'
    "#,
];

pub async fn initialize_database(pool: &Pool<Postgres>) -> Result<()> {
    info!("Initializing database schema...");

    // Create rooms table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS rooms (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            name VARCHAR(191) NOT NULL,
            capacity INTEGER NOT NULL DEFAULT 1,
            description TEXT NOT NULL DEFAULT '',
            image_url TEXT NULL,
            status VARCHAR(20) NOT NULL DEFAULT 'active',
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            CONSTRAINT valid_capacity CHECK (capacity > 0),
            CONSTRAINT valid_room_status CHECK (status IN ('active', 'inactive'))
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create bookings table. No foreign key on room_id: bookings may outlive
    // their room.
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS bookings (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            full_name VARCHAR(191) NOT NULL,
            email VARCHAR(191) NOT NULL,
            room_id UUID NOT NULL,
            date DATE NOT NULL,
            start_time TIME NOT NULL,
            end_time TIME NOT NULL,
            status VARCHAR(20) NOT NULL DEFAULT 'booked',
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            CONSTRAINT valid_time_range CHECK (end_time > start_time),
            CONSTRAINT valid_booking_status CHECK (status IN ('booked', 'approved', 'cancelled'))
        );
        "#,
    )
    .execute(pool)
    .await?;

    for statement in INDEXES {
        sqlx::query(statement).execute(pool).await?;
    }

    let seeded = room::seed_default_rooms(pool).await?;
    if seeded > 0 {
        info!("Seeded {} default rooms.", seeded);
    }

    info!("Database schema initialized successfully.");
    Ok(())
}

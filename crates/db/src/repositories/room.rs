use crate::models::DbRoom;
use chrono::Utc;
use eyre::Result;
use roombook_core::models::room::{DEFAULT_ROOMS, RoomStatus};
use sqlx::{Pool, Postgres};
use uuid::Uuid;

pub async fn create_room(
    pool: &Pool<Postgres>,
    name: &str,
    capacity: i32,
    description: &str,
    status: RoomStatus,
) -> Result<DbRoom> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    tracing::debug!("Creating room: id={}, name={}, capacity={}", id, name, capacity);

    let room = sqlx::query_as::<_, DbRoom>(
        r#"
        INSERT INTO rooms (id, name, capacity, description, status, created_at)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING id, name, capacity, description, image_url, status, created_at
        "#,
    )
    .bind(id)
    .bind(name)
    .bind(capacity)
    .bind(description)
    .bind(status.as_str())
    .bind(now)
    .fetch_one(pool)
    .await?;

    Ok(room)
}

pub async fn get_room_by_id(pool: &Pool<Postgres>, id: Uuid) -> Result<Option<DbRoom>> {
    tracing::debug!("Getting room by id: {}", id);

    let room = sqlx::query_as::<_, DbRoom>(
        r#"
        SELECT id, name, capacity, description, image_url, status, created_at
        FROM rooms
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(room)
}

pub async fn list_rooms(pool: &Pool<Postgres>, active_only: bool) -> Result<Vec<DbRoom>> {
    let rooms = sqlx::query_as::<_, DbRoom>(
        r#"
        SELECT id, name, capacity, description, image_url, status, created_at
        FROM rooms
        WHERE NOT $1 OR status = 'active'
        ORDER BY name ASC
        "#,
    )
    .bind(active_only)
    .fetch_all(pool)
    .await?;

    Ok(rooms)
}

/// Inserts the standard rooms into an empty table. Returns how many were added.
pub async fn seed_default_rooms(pool: &Pool<Postgres>) -> Result<u64> {
    let existing = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM rooms")
        .fetch_one(pool)
        .await?;

    if existing > 0 {
        return Ok(0);
    }

    let mut seeded = 0;
    for (name, capacity, description) in DEFAULT_ROOMS {
        let capacity = i32::try_from(*capacity)?;
        create_room(pool, name, capacity, description, RoomStatus::Active).await?;
        seeded += 1;
    }

    Ok(seeded)
}

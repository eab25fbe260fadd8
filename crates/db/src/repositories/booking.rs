use crate::models::DbBooking;
use chrono::{NaiveDate, Utc};
use eyre::Result;
use roombook_core::models::booking::{BookingFilter, BookingStatus, NewBooking};
use sqlx::{Pool, Postgres, QueryBuilder, postgres::PgExecutor};
use uuid::Uuid;

const BOOKING_COLUMNS: &str =
    "id, full_name, email, room_id, date, start_time, end_time, status, created_at";

/// Blocks until this transaction holds the lock for one room and date.
/// Released automatically at commit or rollback.
pub async fn lock_partition<'e, E>(executor: E, room_id: Uuid, date: NaiveDate) -> Result<()>
where
    E: PgExecutor<'e>,
{
    let key = format!("{room_id}:{date}");
    tracing::debug!("Locking booking partition {}", key);

    sqlx::query("SELECT pg_advisory_xact_lock(hashtext($1))")
        .bind(key)
        .execute(executor)
        .await?;

    Ok(())
}

/// Non-cancelled bookings for one room and date, ordered by start time.
pub async fn get_blocking_bookings<'e, E>(
    executor: E,
    room_id: Uuid,
    date: NaiveDate,
) -> Result<Vec<DbBooking>>
where
    E: PgExecutor<'e>,
{
    let bookings = sqlx::query_as::<_, DbBooking>(&format!(
        r#"
        SELECT {BOOKING_COLUMNS}
        FROM bookings
        WHERE room_id = $1 AND date = $2 AND status <> 'cancelled'
        ORDER BY start_time ASC
        "#
    ))
    .bind(room_id)
    .bind(date)
    .fetch_all(executor)
    .await?;

    Ok(bookings)
}

pub async fn create_booking<'e, E>(executor: E, booking: &NewBooking) -> Result<DbBooking>
where
    E: PgExecutor<'e>,
{
    let id = Uuid::new_v4();
    let now = Utc::now();

    tracing::debug!(
        "Creating booking: id={}, room_id={}, date={}, start={}, end={}",
        id,
        booking.room_id,
        booking.date,
        booking.start_time,
        booking.end_time
    );

    let created = sqlx::query_as::<_, DbBooking>(&format!(
        r#"
        INSERT INTO bookings (id, full_name, email, room_id, date, start_time, end_time, status, created_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
        RETURNING {BOOKING_COLUMNS}
        "#
    ))
    .bind(id)
    .bind(&booking.full_name)
    .bind(&booking.email)
    .bind(booking.room_id)
    .bind(booking.date)
    .bind(booking.start_time)
    .bind(booking.end_time)
    .bind(BookingStatus::Booked.as_str())
    .bind(now)
    .fetch_one(executor)
    .await?;

    Ok(created)
}

pub async fn get_booking_by_id(pool: &Pool<Postgres>, id: Uuid) -> Result<Option<DbBooking>> {
    tracing::debug!("Getting booking by id: {}", id);

    let booking = sqlx::query_as::<_, DbBooking>(&format!(
        "SELECT {BOOKING_COLUMNS} FROM bookings WHERE id = $1"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(booking)
}

pub async fn list_bookings(pool: &Pool<Postgres>, filter: &BookingFilter) -> Result<Vec<DbBooking>> {
    let mut query = QueryBuilder::<Postgres>::new(format!(
        "SELECT {BOOKING_COLUMNS} FROM bookings WHERE TRUE"
    ));

    if let Some(room_id) = filter.room_id {
        query.push(" AND room_id = ").push_bind(room_id);
    }
    if let Some(date) = filter.date {
        query.push(" AND date = ").push_bind(date);
    }
    if let Some(from) = filter.date_from {
        query.push(" AND date >= ").push_bind(from);
    }
    if let Some(status) = filter.status {
        query.push(" AND status = ").push_bind(status.as_str());
    }
    query.push(" ORDER BY date ASC, start_time ASC");

    let bookings = query.build_query_as::<DbBooking>().fetch_all(pool).await?;
    Ok(bookings)
}

/// Compare-and-set on the status column.
pub async fn update_booking_status(
    pool: &Pool<Postgres>,
    id: Uuid,
    expected: BookingStatus,
    next: BookingStatus,
) -> Result<Option<DbBooking>> {
    tracing::debug!("Updating booking {} from {} to {}", id, expected, next);

    let booking = sqlx::query_as::<_, DbBooking>(&format!(
        r#"
        UPDATE bookings
        SET status = $3
        WHERE id = $1 AND status = $2
        RETURNING {BOOKING_COLUMNS}
        "#
    ))
    .bind(id)
    .bind(expected.as_str())
    .bind(next.as_str())
    .fetch_optional(pool)
    .await?;

    Ok(booking)
}

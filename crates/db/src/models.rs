use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use eyre::{Report, WrapErr};
use roombook_core::models::{booking::Booking, room::Room};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbRoom {
    pub id: Uuid,
    pub name: String,
    pub capacity: i32,
    pub description: String,
    pub image_url: Option<String>,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbBooking {
    pub id: Uuid,
    pub full_name: String,
    pub email: String,
    pub room_id: Uuid,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<DbRoom> for Room {
    type Error = Report;

    fn try_from(row: DbRoom) -> Result<Self, Self::Error> {
        Ok(Room {
            id: row.id,
            name: row.name,
            capacity: u32::try_from(row.capacity)
                .wrap_err_with(|| format!("room {} has a negative capacity", row.id))?,
            description: row.description,
            image_url: row.image_url,
            status: row
                .status
                .parse()
                .wrap_err_with(|| format!("room {} has an unknown status", row.id))?,
        })
    }
}

impl TryFrom<DbBooking> for Booking {
    type Error = Report;

    fn try_from(row: DbBooking) -> Result<Self, Self::Error> {
        Ok(Booking {
            status: row
                .status
                .parse()
                .wrap_err_with(|| format!("booking {} has an unknown status", row.id))?,
            id: row.id,
            full_name: row.full_name,
            email: row.email,
            room_id: row.room_id,
            date: row.date,
            start_time: row.start_time,
            end_time: row.end_time,
            created_at: row.created_at,
        })
    }
}

/// Converts a batch of rows, failing on the first malformed one.
pub fn convert_all<R, T>(rows: Vec<R>) -> eyre::Result<Vec<T>>
where
    T: TryFrom<R, Error = Report>,
{
    rows.into_iter().map(T::try_from).collect()
}

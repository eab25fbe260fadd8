use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::BookingError;

/// Rooms seeded into an empty store: name, capacity, description.
pub const DEFAULT_ROOMS: &[(&str, u32, &str)] = &[
    ("Conference Room", 12, "Large conference room for team meetings"),
    ("Meeting Room", 5, "Intimate meeting space for small groups"),
    ("Discussion Room", 3, "Cozy room for focused discussions"),
];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoomStatus {
    #[default]
    Active,
    Inactive,
}

impl RoomStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
        }
    }
}

impl fmt::Display for RoomStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RoomStatus {
    type Err = BookingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(Self::Active),
            "inactive" => Ok(Self::Inactive),
            other => Err(BookingError::validation(
                "status",
                format!("unknown room status `{other}`"),
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Room {
    pub id: Uuid,
    pub name: String,
    pub capacity: u32,
    #[serde(default)]
    pub description: String,
    pub image_url: Option<String>,
    #[serde(default)]
    pub status: RoomStatus,
}

impl Room {
    pub fn new(name: impl Into<String>, capacity: u32) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            capacity,
            description: String::new(),
            image_url: None,
            status: RoomStatus::Active,
        }
    }

    pub fn is_active(&self) -> bool {
        self.status == RoomStatus::Active
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListRoomsResponse {
    pub rooms: Vec<Room>,
}

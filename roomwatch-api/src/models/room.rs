use serde::{Deserialize, Serialize};

#[cfg_attr(feature = "docs", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    /// Room identifier
    #[serde(rename = "roomID")]
    pub room_id: String,
    /// Room number inside the building
    pub number: String,
    /// Floor the room is on
    pub floor: String,
    /// Building name
    #[serde(rename = "buildingName")]
    pub building_name: String,
    /// Opening hours, free form
    #[serde(rename = "openingHours")]
    pub opening_hours: String,
    /// Identifiers of the devices installed in the room
    #[serde(default)]
    pub devices: Vec<String>,
}

#[cfg_attr(feature = "docs", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RoomRequest {
    /// Room number inside the building
    pub number: Option<String>,
    /// Floor the room is on
    pub floor: Option<String>,
    /// Building name
    #[serde(rename = "buildingName")]
    pub building_name: Option<String>,
    /// Opening hours, free form
    #[serde(rename = "openingHours")]
    pub opening_hours: Option<String>,
}

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

#[cfg_attr(feature = "docs", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MqttEndpoint {
    /// Topics the device publishes on
    pub topics: Vec<String>,
}

#[cfg_attr(feature = "docs", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RestEndpoint {
    /// Address of the device REST interface
    #[serde(rename = "restIP")]
    pub rest_ip: String,
}

#[cfg_attr(feature = "docs", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Endpoints {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mqtt: Option<MqttEndpoint>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rest: Option<RestEndpoint>,
}

#[cfg_attr(feature = "docs", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Device {
    /// Device identifier
    #[serde(rename = "deviceID")]
    pub device_id: String,
    /// Device address on the local network
    pub ip: String,
    pub port: u16,
    /// Ways to reach the device
    pub endpoints: Endpoints,
    /// Measurements the device provides, e.g. `PM2.5`
    #[serde(rename = "availableResources")]
    pub available_resources: Vec<String>,
    /// Room the device is installed in
    #[serde(rename = "roomID")]
    pub room_id: String,
    /// Last time the device registered or refreshed itself
    #[serde(rename = "insert-timestamp", with = "time::serde::rfc3339")]
    pub insert_timestamp: OffsetDateTime,
}

#[cfg_attr(feature = "docs", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MqttEndpointRequest {
    pub topics: Option<Vec<String>>,
}

#[cfg_attr(feature = "docs", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RestEndpointRequest {
    #[serde(rename = "restIP")]
    pub rest_ip: Option<String>,
}

#[cfg_attr(feature = "docs", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EndpointsRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mqtt: Option<MqttEndpointRequest>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rest: Option<RestEndpointRequest>,
}

/// Body accepted when registering or refreshing a device.
///
/// Every field is optional on the wire so that a missing field can be
/// reported by name instead of failing deserialization as a whole.
#[cfg_attr(feature = "docs", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DeviceRequest {
    pub ip: Option<String>,
    pub port: Option<u16>,
    pub endpoints: Option<EndpointsRequest>,
    #[serde(rename = "availableResources")]
    pub available_resources: Option<Vec<String>>,
    #[serde(rename = "roomID")]
    pub room_id: Option<String>,
}

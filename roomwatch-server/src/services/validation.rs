use time::OffsetDateTime;

use crate::errors::ValidationError;
use crate::models::{
    Device, DeviceRequest, Endpoints, MqttEndpoint, RestEndpoint, Room, RoomRequest, User,
    UserRequest,
};

fn required<T>(value: Option<T>, field: &'static str) -> Result<T, ValidationError> {
    value.ok_or(ValidationError::MissingField(field))
}

pub fn validate_room(
    request: RoomRequest,
    room_id: String,
    devices: Vec<String>,
) -> Result<Room, ValidationError> {
    Ok(Room {
        room_id,
        number: required(request.number, "number")?,
        floor: required(request.floor, "floor")?,
        building_name: required(request.building_name, "buildingName")?,
        opening_hours: required(request.opening_hours, "openingHours")?,
        devices,
    })
}

pub fn validate_device(
    request: DeviceRequest,
    device_id: String,
    insert_timestamp: OffsetDateTime,
) -> Result<Device, ValidationError> {
    let ip = required(request.ip, "ip")?;
    let port = required(request.port, "port")?;
    let endpoints = required(request.endpoints, "endpoints")?;
    let available_resources = required(request.available_resources, "availableResources")?;
    let room_id = required(request.room_id, "roomID")?;

    let mqtt = endpoints
        .mqtt
        .map(|mqtt| {
            required(mqtt.topics, "endpoints.mqtt.topics").map(|topics| MqttEndpoint { topics })
        })
        .transpose()?;
    let rest = endpoints
        .rest
        .map(|rest| {
            required(rest.rest_ip, "endpoints.rest.restIP").map(|rest_ip| RestEndpoint { rest_ip })
        })
        .transpose()?;

    Ok(Device {
        device_id,
        ip,
        port,
        endpoints: Endpoints { mqtt, rest },
        available_resources,
        room_id,
        insert_timestamp,
    })
}

pub fn validate_user(request: UserRequest, user_id: String) -> Result<User, ValidationError> {
    Ok(User {
        user_id,
        name: required(request.name, "name")?,
        surname: required(request.surname, "surname")?,
        email: required(request.email, "email")?,
        telegram_chat_id: required(request.telegram_chat_id, "telegramChatID")?,
        rooms: required(request.rooms, "rooms")?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{EndpointsRequest, MqttEndpointRequest, RestEndpointRequest};

    fn device_request() -> DeviceRequest {
        DeviceRequest {
            ip: Some("10.0.0.1".into()),
            port: Some(1883),
            endpoints: Some(EndpointsRequest {
                mqtt: Some(MqttEndpointRequest {
                    topics: Some(vec!["r-1/PM10".into()]),
                }),
                rest: Some(RestEndpointRequest {
                    rest_ip: Some("10.0.0.1:8080".into()),
                }),
            }),
            available_resources: Some(vec!["PM10".into()]),
            room_id: Some("r-1".into()),
        }
    }

    #[test]
    fn test_valid_device() {
        let now = OffsetDateTime::now_utc();

        let device = validate_device(device_request(), "d-1".into(), now).unwrap();

        assert_eq!(device.device_id, "d-1");
        assert_eq!(device.insert_timestamp, now);
        assert_eq!(device.endpoints.mqtt.unwrap().topics, vec!["r-1/PM10"]);
        assert_eq!(device.endpoints.rest.unwrap().rest_ip, "10.0.0.1:8080");
    }

    #[test]
    fn test_device_missing_fields_are_reported_in_order() {
        let mut request = device_request();
        request.port = None;
        request.room_id = None;

        let error = validate_device(request, "d-1".into(), OffsetDateTime::now_utc()).unwrap_err();

        assert!(matches!(error, ValidationError::MissingField("port")));
    }

    #[test]
    fn test_device_nested_endpoint_fields() {
        let mut request = device_request();
        request.endpoints = Some(EndpointsRequest {
            mqtt: Some(MqttEndpointRequest { topics: None }),
            rest: None,
        });
        let error = validate_device(request, "d-1".into(), OffsetDateTime::now_utc()).unwrap_err();
        assert!(matches!(error, ValidationError::MissingField("endpoints.mqtt.topics")));

        let mut request = device_request();
        request.endpoints = Some(EndpointsRequest {
            mqtt: None,
            rest: Some(RestEndpointRequest { rest_ip: None }),
        });
        let error = validate_device(request, "d-1".into(), OffsetDateTime::now_utc()).unwrap_err();
        assert!(matches!(error, ValidationError::MissingField("endpoints.rest.restIP")));
    }

    #[test]
    fn test_device_without_any_endpoint_is_accepted() {
        let mut request = device_request();
        request.endpoints = Some(EndpointsRequest::default());

        let device = validate_device(request, "d-1".into(), OffsetDateTime::now_utc()).unwrap();

        assert_eq!(device.endpoints, Endpoints::default());
    }

    #[test]
    fn test_room_keeps_given_devices() {
        let request = RoomRequest {
            number: Some("101".into()),
            floor: Some("1".into()),
            building_name: Some("Main".into()),
            opening_hours: Some("9-17".into()),
        };

        let room = validate_room(request, "r-1".into(), vec!["d-1".into()]).unwrap();

        assert_eq!(room.devices, vec!["d-1"]);
        assert_eq!(room.building_name, "Main");
    }

    #[test]
    fn test_user_requires_rooms() {
        let request = UserRequest {
            name: Some("Ada".into()),
            surname: Some("Lovelace".into()),
            email: Some("ada@example.com".into()),
            telegram_chat_id: Some(42),
            rooms: None,
        };

        let error = validate_user(request, "u-1".into()).unwrap_err();

        assert_eq!(error.to_string(), "Invalid request: 'rooms' is required");
    }
}

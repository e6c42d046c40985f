use std::collections::HashSet;
use std::time::Duration;

use time::OffsetDateTime;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::errors::{
    ApiError, BrokerError, DeviceError, RoomError, StorageError, UserError,
};
use crate::models::{
    Broker, Collection, Device, DeviceRequest, Room, RoomRequest, User, UserRequest,
};
use crate::repositories::SnapshotRepository;
use crate::services::validation::{validate_device, validate_room, validate_user};

/// In-memory state mirrored by the snapshots.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    pub rooms: Vec<Room>,
    pub devices: Vec<Device>,
    pub users: Vec<User>,
}

/// Collections replaced by a single mutation, `None` means untouched.
#[derive(Default)]
struct Changes {
    devices: Option<Vec<Device>>,
    rooms: Option<Vec<Room>>,
    users: Option<Vec<User>>,
}

impl Changes {
    /// Drops every staged collection not listed in `collections`.
    fn only(self, collections: &[Collection]) -> Self {
        Self {
            devices: self.devices.filter(|_| collections.contains(&Collection::Devices)),
            rooms: self.rooms.filter(|_| collections.contains(&Collection::Rooms)),
            users: self.users.filter(|_| collections.contains(&Collection::Users)),
        }
    }

    fn apply(self, catalog: &mut Catalog) {
        if let Some(devices) = self.devices {
            catalog.devices = devices;
        }
        if let Some(rooms) = self.rooms {
            catalog.rooms = rooms;
        }
        if let Some(users) = self.users {
            catalog.users = users;
        }
    }
}

/// Authoritative registry of rooms, devices and users.
///
/// Every mutation validates, writes the affected snapshots and only then
/// swaps the new collections in, all while holding the catalog write lock.
/// Devices and rooms reference each other, so they are never written under
/// separate critical sections.
pub struct RegistryService {
    repository: SnapshotRepository,
    broker: Option<Broker>,
    catalog: RwLock<Catalog>,
}

impl RegistryService {
    pub async fn load(repository: SnapshotRepository) -> Result<Self, StorageError> {
        let broker = repository.find_broker().await?;
        let catalog = Catalog {
            rooms: repository.find_all(Collection::Rooms).await?,
            devices: repository.find_all(Collection::Devices).await?,
            users: repository.find_all(Collection::Users).await?,
        };

        tracing::info!(
            rooms = catalog.rooms.len(),
            devices = catalog.devices.len(),
            users = catalog.users.len(),
            broker = broker.is_some(),
            "catalog loaded"
        );

        Ok(Self {
            repository,
            broker,
            catalog: RwLock::new(catalog),
        })
    }

    pub fn get_broker(&self) -> Result<Broker, BrokerError> {
        self.broker.clone().ok_or(BrokerError::BrokerNotConfigured)
    }

    /// Consistent copy of all collections.
    #[cfg(test)]
    pub async fn snapshot(&self) -> Catalog {
        self.catalog.read().await.clone()
    }

    pub async fn get_devices(&self) -> Vec<Device> {
        self.catalog.read().await.devices.clone()
    }

    pub async fn get_device(&self, device_id: &str) -> Result<Device, DeviceError> {
        self.catalog
            .read()
            .await
            .devices
            .iter()
            .find(|device| device.device_id == device_id)
            .cloned()
            .ok_or_else(|| DeviceError::DeviceNotFound(device_id.to_string()))
    }

    pub async fn get_rooms(&self) -> Vec<Room> {
        self.catalog.read().await.rooms.clone()
    }

    pub async fn get_room(&self, room_id: &str) -> Result<Room, RoomError> {
        self.catalog
            .read()
            .await
            .rooms
            .iter()
            .find(|room| room.room_id == room_id)
            .cloned()
            .ok_or_else(|| RoomError::RoomNotFound(room_id.to_string()))
    }

    pub async fn get_users(&self) -> Vec<User> {
        self.catalog.read().await.users.clone()
    }

    pub async fn get_user(&self, user_id: &str) -> Result<User, UserError> {
        self.catalog
            .read()
            .await
            .users
            .iter()
            .find(|user| user.user_id == user_id)
            .cloned()
            .ok_or_else(|| UserError::UserNotFound(user_id.to_string()))
    }

    pub async fn create_device(&self, request: DeviceRequest) -> Result<Device, ApiError> {
        let device = validate_device(
            request,
            Uuid::new_v4().to_string(),
            OffsetDateTime::now_utc(),
        )?;

        let mut catalog = self.catalog.write().await;

        let room_index = room_position(&catalog, &device.room_id)?;

        let mut devices = catalog.devices.clone();
        devices.push(device.clone());
        let mut rooms = catalog.rooms.clone();
        rooms[room_index].devices.push(device.device_id.clone());

        self.commit(
            &mut catalog,
            Changes {
                devices: Some(devices),
                rooms: Some(rooms),
                ..Default::default()
            },
        )
        .await?;

        tracing::debug!(device_id = %device.device_id, room_id = %device.room_id, "device registered");

        Ok(device)
    }

    pub async fn update_device(
        &self,
        device_id: &str,
        request: DeviceRequest,
    ) -> Result<Device, ApiError> {
        let device = validate_device(request, device_id.to_string(), OffsetDateTime::now_utc())?;

        let mut catalog = self.catalog.write().await;

        let device_index = catalog
            .devices
            .iter()
            .position(|existing| existing.device_id == device_id)
            .ok_or_else(|| DeviceError::DeviceNotFound(device_id.to_string()))?;
        room_position(&catalog, &device.room_id)?;

        let mut devices = catalog.devices.clone();
        devices[device_index] = device.clone();

        // The device may have moved, keep exactly one back-reference
        let mut rooms = catalog.rooms.clone();
        for room in rooms.iter_mut() {
            if room.room_id != device.room_id {
                room.devices.retain(|id| id != device_id);
            } else if !room.devices.iter().any(|id| id == device_id) {
                room.devices.push(device_id.to_string());
            }
        }
        let rooms = (rooms != catalog.rooms).then_some(rooms);

        self.commit(
            &mut catalog,
            Changes {
                devices: Some(devices),
                rooms,
                ..Default::default()
            },
        )
        .await?;

        tracing::debug!(device_id = %device.device_id, room_id = %device.room_id, "device refreshed");

        Ok(device)
    }

    pub async fn delete_device(&self, device_id: &str) -> Result<(), ApiError> {
        let mut catalog = self.catalog.write().await;

        let device_index = catalog
            .devices
            .iter()
            .position(|device| device.device_id == device_id)
            .ok_or_else(|| DeviceError::DeviceNotFound(device_id.to_string()))?;

        let mut devices = catalog.devices.clone();
        devices.remove(device_index);
        let mut rooms = catalog.rooms.clone();
        for room in rooms.iter_mut() {
            room.devices.retain(|id| id != device_id);
        }
        let rooms = (rooms != catalog.rooms).then_some(rooms);

        self.commit(
            &mut catalog,
            Changes {
                devices: Some(devices),
                rooms,
                ..Default::default()
            },
        )
        .await?;

        tracing::debug!(device_id, "device deleted");

        Ok(())
    }

    pub async fn create_room(&self, request: RoomRequest) -> Result<Room, ApiError> {
        let room = validate_room(request, Uuid::new_v4().to_string(), Vec::new())?;

        let mut catalog = self.catalog.write().await;

        let mut rooms = catalog.rooms.clone();
        rooms.push(room.clone());

        self.commit(
            &mut catalog,
            Changes {
                rooms: Some(rooms),
                ..Default::default()
            },
        )
        .await?;

        tracing::debug!(room_id = %room.room_id, "room created");

        Ok(room)
    }

    /// Replaces the descriptive fields of a room. The device list is derived
    /// from the devices themselves and survives the replacement.
    pub async fn update_room(&self, room_id: &str, request: RoomRequest) -> Result<Room, ApiError> {
        let mut room = validate_room(request, room_id.to_string(), Vec::new())?;

        let mut catalog = self.catalog.write().await;

        let room_index = room_position(&catalog, room_id)?;
        room.devices = catalog.rooms[room_index].devices.clone();

        let mut rooms = catalog.rooms.clone();
        rooms[room_index] = room.clone();

        self.commit(
            &mut catalog,
            Changes {
                rooms: Some(rooms),
                ..Default::default()
            },
        )
        .await?;

        tracing::debug!(room_id, "room updated");

        Ok(room)
    }

    /// Removes a room together with every device installed in it.
    pub async fn delete_room(&self, room_id: &str) -> Result<(), ApiError> {
        let mut catalog = self.catalog.write().await;

        let room_index = room_position(&catalog, room_id)?;

        let mut rooms = catalog.rooms.clone();
        rooms.remove(room_index);
        let devices: Vec<Device> = catalog
            .devices
            .iter()
            .filter(|device| device.room_id != room_id)
            .cloned()
            .collect();
        let removed = catalog.devices.len() - devices.len();
        let devices = (removed > 0).then_some(devices);

        self.commit(
            &mut catalog,
            Changes {
                devices,
                rooms: Some(rooms),
                ..Default::default()
            },
        )
        .await?;

        tracing::debug!(room_id, devices = removed, "room deleted");

        Ok(())
    }

    pub async fn create_user(&self, request: UserRequest) -> Result<User, ApiError> {
        // Field checks come before the room lookups
        let user = validate_user(request, Uuid::new_v4().to_string())?;

        let mut catalog = self.catalog.write().await;

        for room_id in user.rooms.iter() {
            room_position(&catalog, room_id)?;
        }

        let mut users = catalog.users.clone();
        users.push(user.clone());

        self.commit(
            &mut catalog,
            Changes {
                users: Some(users),
                ..Default::default()
            },
        )
        .await?;

        tracing::debug!(user_id = %user.user_id, "user created");

        Ok(user)
    }

    pub async fn update_user(&self, user_id: &str, request: UserRequest) -> Result<User, ApiError> {
        let user = validate_user(request, user_id.to_string())?;

        let mut catalog = self.catalog.write().await;

        let user_index = catalog
            .users
            .iter()
            .position(|existing| existing.user_id == user_id)
            .ok_or_else(|| UserError::UserNotFound(user_id.to_string()))?;
        for room_id in user.rooms.iter() {
            room_position(&catalog, room_id)?;
        }

        let mut users = catalog.users.clone();
        users[user_index] = user.clone();

        self.commit(
            &mut catalog,
            Changes {
                users: Some(users),
                ..Default::default()
            },
        )
        .await?;

        tracing::debug!(user_id, "user updated");

        Ok(user)
    }

    pub async fn delete_user(&self, user_id: &str) -> Result<(), ApiError> {
        let mut catalog = self.catalog.write().await;

        let user_index = catalog
            .users
            .iter()
            .position(|user| user.user_id == user_id)
            .ok_or_else(|| UserError::UserNotFound(user_id.to_string()))?;

        let mut users = catalog.users.clone();
        users.remove(user_index);

        self.commit(
            &mut catalog,
            Changes {
                users: Some(users),
                ..Default::default()
            },
        )
        .await?;

        tracing::debug!(user_id, "user deleted");

        Ok(())
    }

    /// Drops devices not seen for `staleness_threshold` before `now` and prunes
    /// every room's device list down to the surviving devices.
    ///
    /// Returns the evicted device identifiers.
    pub async fn evict_stale(
        &self,
        now: OffsetDateTime,
        staleness_threshold: Duration,
    ) -> Result<Vec<String>, StorageError> {
        // A cutoff before the representable range keeps every device
        let cutoff = time::Duration::try_from(staleness_threshold)
            .ok()
            .and_then(|threshold| now.checked_sub(threshold));
        let Some(cutoff) = cutoff else {
            return Ok(Vec::new());
        };

        let mut catalog = self.catalog.write().await;

        let (retained, evicted): (Vec<Device>, Vec<Device>) = catalog
            .devices
            .iter()
            .cloned()
            .partition(|device| device.insert_timestamp > cutoff);

        let alive: HashSet<&str> = retained
            .iter()
            .map(|device| device.device_id.as_str())
            .collect();
        let mut rooms = catalog.rooms.clone();
        for room in rooms.iter_mut() {
            room.devices.retain(|id| alive.contains(id.as_str()));
        }

        let rooms = (rooms != catalog.rooms).then_some(rooms);
        let devices = (!evicted.is_empty()).then_some(retained);

        if devices.is_none() && rooms.is_none() {
            return Ok(Vec::new());
        }

        self.commit(
            &mut catalog,
            Changes {
                devices,
                rooms,
                ..Default::default()
            },
        )
        .await?;

        Ok(evicted.into_iter().map(|device| device.device_id).collect())
    }

    /// Persists the staged collections and swaps them in.
    ///
    /// On a failed write the snapshots already rewritten are restored and
    /// memory is untouched. A snapshot that cannot be restored keeps its new
    /// content, and memory takes that collection too so both stay in line.
    async fn commit(&self, catalog: &mut Catalog, changes: Changes) -> Result<(), StorageError> {
        let mut written = Vec::new();

        if let Err(e) = self.write_changes(&changes, &mut written).await {
            let unrestored = self.restore(catalog, &written).await;
            changes.only(&unrestored).apply(catalog);
            return Err(e);
        }

        changes.apply(catalog);

        Ok(())
    }

    async fn write_changes(
        &self,
        changes: &Changes,
        written: &mut Vec<Collection>,
    ) -> Result<(), StorageError> {
        if let Some(devices) = &changes.devices {
            self.repository.save_all(Collection::Devices, devices).await?;
            written.push(Collection::Devices);
        }
        if let Some(rooms) = &changes.rooms {
            self.repository.save_all(Collection::Rooms, rooms).await?;
            written.push(Collection::Rooms);
        }
        if let Some(users) = &changes.users {
            self.repository.save_all(Collection::Users, users).await?;
            written.push(Collection::Users);
        }

        Ok(())
    }

    /// Rewrites `written` from memory, returning the collections that failed.
    async fn restore(&self, catalog: &Catalog, written: &[Collection]) -> Vec<Collection> {
        let mut unrestored = Vec::new();

        for collection in written {
            let result = match collection {
                Collection::Devices => {
                    self.repository
                        .save_all(*collection, &catalog.devices)
                        .await
                }
                Collection::Rooms => self.repository.save_all(*collection, &catalog.rooms).await,
                Collection::Users => self.repository.save_all(*collection, &catalog.users).await,
                Collection::Broker => Ok(()),
            };

            if let Err(e) = result {
                tracing::error!(%collection, "Failed to restore snapshot: {}", e);
                unrestored.push(*collection);
            }
        }

        unrestored
    }
}

fn room_position(catalog: &Catalog, room_id: &str) -> Result<usize, RoomError> {
    catalog
        .rooms
        .iter()
        .position(|room| room.room_id == room_id)
        .ok_or_else(|| RoomError::RoomNotFound(room_id.to_string()))
}

use std::fmt;

/// Named snapshot persisted by the storage layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    /// Read only, provisioned next to the service
    Broker,
    Devices,
    Rooms,
    Users,
}

impl Collection {
    pub fn name(&self) -> &'static str {
        match self {
            Collection::Broker => "broker",
            Collection::Devices => "devices",
            Collection::Rooms => "rooms",
            Collection::Users => "users",
        }
    }

    pub fn file_name(&self) -> &'static str {
        match self {
            Collection::Broker => "broker.json",
            Collection::Devices => "devices.json",
            Collection::Rooms => "rooms.json",
            Collection::Users => "users.json",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A server the host client can connect to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerEntry {
    pub name: String,
    pub address: String,
}

impl ServerEntry {
    pub fn new(name: impl Into<String>, address: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            address: address.into(),
        }
    }
}

/// The disconnect screen shown when a session drops.
///
/// `overlay` marks the auto-reconnect variant, which keeps the original
/// title and reason and only appends the countdown line.
#[derive(Debug, Clone, PartialEq)]
pub struct DisconnectScreen {
    pub title: String,
    pub reason: String,
    pub overlay: bool,
    /// Screen to return to when the user backs out or a reconnect fails.
    pub parent: Box<Screen>,
}

/// The host client screens this overlay cares about.
#[derive(Debug, Clone, PartialEq)]
pub enum Screen {
    Multiplayer,
    Connect(ServerEntry),
    Disconnected(DisconnectScreen),
}

impl Screen {
    pub fn disconnected(
        title: impl Into<String>,
        reason: impl Into<String>,
        parent: Screen,
    ) -> Self {
        Screen::Disconnected(DisconnectScreen {
            title: title.into(),
            reason: reason.into(),
            overlay: false,
            parent: Box::new(parent),
        })
    }
}

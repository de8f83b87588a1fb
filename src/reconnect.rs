use crate::screens::{DisconnectScreen, Screen, ServerEntry};
use std::time::Instant;

/// Reconnect order emitted when the countdown elapses: open the connect
/// screen for `server`, returning to `fallback` if the attempt fails.
#[derive(Debug, Clone, PartialEq)]
pub struct ConnectRequest {
    pub server: ServerEntry,
    pub fallback: Screen,
}

#[derive(Debug)]
enum State {
    Idle,
    /// A connect screen closed recently; its server is kept for the next
    /// disconnect.
    Armed { server: ServerEntry },
    Counting(Countdown),
}

#[derive(Debug)]
struct Countdown {
    server: ServerEntry,
    parent: Screen,
    remaining_ms: i64,
    last_tick: Instant,
}

/// Countdown-to-reconnect state machine, driven by host screen lifecycle
/// events and a per-frame tick. Time is passed in so tests run on a
/// simulated clock.
#[derive(Debug)]
pub struct AutoReconnect {
    pub enabled: bool,
    /// Countdown length; mirrors the AutoReconnect module's setting.
    pub seconds: u32,
    state: State,
}

impl AutoReconnect {
    pub fn new(seconds: u32) -> Self {
        Self {
            enabled: true,
            seconds,
            state: State::Idle,
        }
    }

    /// Host notification: `screen` was just closed. A closing connect screen
    /// arms the machine with that server.
    pub fn screen_closed(&mut self, screen: &Screen) {
        if let Screen::Connect(server) = screen {
            tracing::debug!(server = %server.name, "connect screen closed, armed for reconnect");
            self.state = State::Armed {
                server: server.clone(),
            };
        }
    }

    /// Host notification: `screen` is about to be displayed.
    ///
    /// A plain disconnect screen is swapped for its overlay variant and the
    /// countdown starts, provided the machine is enabled and a server is
    /// known (captured earlier, or currently joined). Every other screen —
    /// including a disconnect screen that already is the overlay variant —
    /// passes through untouched.
    pub fn screen_displayed(
        &mut self,
        screen: Screen,
        current_server: Option<&ServerEntry>,
        now: Instant,
    ) -> Screen {
        if !self.enabled {
            return screen;
        }
        let Screen::Disconnected(info) = screen else {
            return screen;
        };
        if info.overlay {
            return Screen::Disconnected(info);
        }
        let captured = match &self.state {
            State::Armed { server } => Some(server.clone()),
            _ => None,
        };
        let Some(server) = captured.or_else(|| current_server.cloned()) else {
            return Screen::Disconnected(info);
        };

        let overlay = DisconnectScreen {
            overlay: true,
            ..info.clone()
        };
        tracing::info!(server = %server.name, seconds = self.seconds, "starting reconnect countdown");
        self.state = State::Counting(Countdown {
            server,
            parent: (*info.parent).clone(),
            remaining_ms: i64::from(self.seconds) * 1000,
            last_tick: now,
        });
        Screen::Disconnected(overlay)
    }

    /// Advance the countdown by the wall clock elapsed since the last tick.
    /// Emits the reconnect request exactly once, when the countdown hits
    /// zero, and returns to idle.
    pub fn tick(&mut self, now: Instant) -> Option<ConnectRequest> {
        if !matches!(self.state, State::Counting(_)) {
            return None;
        }
        match std::mem::replace(&mut self.state, State::Idle) {
            State::Counting(mut countdown) => {
                countdown.remaining_ms -=
                    now.duration_since(countdown.last_tick).as_millis() as i64;
                countdown.last_tick = now;
                if countdown.remaining_ms <= 0 {
                    tracing::info!(server = %countdown.server.name, "reconnecting");
                    Some(ConnectRequest {
                        server: countdown.server,
                        fallback: countdown.parent,
                    })
                } else {
                    self.state = State::Counting(countdown);
                    None
                }
            }
            other => {
                self.state = other;
                None
            }
        }
    }

    /// The overlay screen was replaced by something else (user navigated
    /// away): stop counting without firing. The captured server survives so
    /// a later disconnect can still arm a countdown.
    pub fn screen_replaced(&mut self) {
        if let State::Counting(countdown) = std::mem::replace(&mut self.state, State::Idle) {
            tracing::debug!("reconnect countdown torn down");
            self.state = State::Armed {
                server: countdown.server,
            };
        }
    }

    pub fn is_counting(&self) -> bool {
        matches!(self.state, State::Counting(_))
    }

    pub fn is_armed(&self) -> bool {
        matches!(self.state, State::Armed { .. })
    }

    /// Countdown line appended to the disconnect screen, remaining time
    /// floored to the tenth of a second and clamped at zero.
    pub fn countdown_text(&self) -> Option<String> {
        let State::Counting(countdown) = &self.state else {
            return None;
        };
        let tenths = (countdown.remaining_ms.max(0) as f64 / 100.0).floor() / 10.0;
        Some(format!("Reconnecting in {tenths:.1}s"))
    }
}

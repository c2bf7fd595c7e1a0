use rust_fsm::*;

state_machine! {
    admin_session(LoggedOut)

    LoggedOut(LoginAccepted) => LoggedIn,
    LoggedOut(LoginRejected) => LoggedOut,

    LoggedIn(KeyUpdated) => LoggedIn,
    LoggedIn(Logout) => LoggedOut
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AdminState {
    LoggedOut,
    LoggedIn,
}

impl AdminState {
    pub fn is_authenticated(self) -> bool {
        matches!(self, AdminState::LoggedIn)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AdminEvent {
    LoginAccepted,
    LoginRejected,
    KeyUpdated,
    Logout,
}

/// Session state of one admin screen. Starts logged out.
pub struct AdminFlow {
    machine: admin_session::StateMachine,
}

impl Default for AdminFlow {
    fn default() -> Self {
        Self::new()
    }
}

impl AdminFlow {
    pub fn new() -> Self {
        Self {
            machine: admin_session::StateMachine::new(),
        }
    }

    pub fn state(&self) -> AdminState {
        match self.machine.state() {
            admin_session::State::LoggedOut => AdminState::LoggedOut,
            admin_session::State::LoggedIn => AdminState::LoggedIn,
        }
    }

    /// Applies `event`, returning the new state, or `None` when the event
    /// is not allowed from the current state.
    pub fn apply(&mut self, event: AdminEvent) -> Option<AdminState> {
        let input = match event {
            AdminEvent::LoginAccepted => admin_session::Input::LoginAccepted,
            AdminEvent::LoginRejected => admin_session::Input::LoginRejected,
            AdminEvent::KeyUpdated => admin_session::Input::KeyUpdated,
            AdminEvent::Logout => admin_session::Input::Logout,
        };
        self.machine.consume(&input).ok()?;
        Some(self.state())
    }
}

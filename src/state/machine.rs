//! Connection state machines: registration phase and CAP negotiation.
//!
//! ```text
//!               CAP LS / CAP REQ                 CAP END
//!   ┌──────┐ ─────────────────────► ┌─────────────┐ ─────────► ┌────────────┐
//!   │ None │                        │ Negotiating │            │ Negotiated │
//!   └──┬───┘ ──────────────────────────────────────────────────►└────────────┘
//!      │          CAP END, or registration completing without CAP
//! ```
//!
//! A connection starts in [`Phase::Registration`] and moves to
//! [`Phase::Normal`] exactly once, when a nickname and user are set and the
//! CAP state is not `Negotiating`. `CAP LS`/`CAP REQ` after `Negotiated` are
//! rejected; every other transition not in the diagram leaves the state
//! unchanged.

use nomad_proto::CapSubCommand;
use thiserror::Error;

/// Registration phase of a connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Registration,
    Normal,
}

/// CAP negotiation state of a connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CapState {
    /// Client never sent CAP.
    #[default]
    None,
    /// Client sent LS or REQ and has not sent END.
    Negotiating,
    /// Client sent END, or registered without engaging CAP.
    Negotiated,
}

/// Rejected CAP transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CapTransitionError {
    #[error("{0} after negotiation finished")]
    AlreadyNegotiated(CapSubCommand),
    #[error("{0} is only sent by servers")]
    ServerOnly(CapSubCommand),
}

impl CapState {
    /// State after the client sends `sub`.
    pub fn on_subcommand(self, sub: CapSubCommand) -> Result<CapState, CapTransitionError> {
        use CapSubCommand::*;

        match (self, sub) {
            (_, NAK) => Err(CapTransitionError::ServerOnly(sub)),
            (CapState::Negotiated, LS | REQ) => Err(CapTransitionError::AlreadyNegotiated(sub)),
            (CapState::None | CapState::Negotiating, LS | REQ) => Ok(CapState::Negotiating),
            (_, END) => Ok(CapState::Negotiated),
            (state, LIST | CLEAR | ACK) => Ok(state),
        }
    }

    /// Whether negotiation currently blocks registration.
    pub fn blocks_registration(self) -> bool {
        self == CapState::Negotiating
    }
}

/// Connection password progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PassState {
    NotRequired,
    Required,
    Accepted,
}

/// Registration-time errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RegistrationError {
    #[error("already registered")]
    AlreadyRegistered,
    #[error("PASS must precede NICK and USER")]
    PassTooLate,
    #[error("connection password required")]
    PasswordRequired,
}

/// Per-connection registration state machine.
///
/// Holds the phase, the CAP state and the sub-flags that gate the move to
/// `Normal`. The session owns the nickname and user strings themselves.
#[derive(Debug, Clone)]
pub struct Registration {
    phase: Phase,
    cap: CapState,
    nick_set: bool,
    user_set: bool,
    pass: PassState,
}

impl Registration {
    pub fn new(password_required: bool) -> Self {
        Self {
            phase: Phase::Registration,
            cap: CapState::None,
            nick_set: false,
            user_set: false,
            pass: if password_required {
                PassState::Required
            } else {
                PassState::NotRequired
            },
        }
    }

    #[inline]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[inline]
    pub fn cap_state(&self) -> CapState {
        self.cap
    }

    #[inline]
    pub fn is_normal(&self) -> bool {
        self.phase == Phase::Normal
    }

    /// Apply a CAP sub-command to the negotiation state.
    pub fn on_cap(&mut self, sub: CapSubCommand) -> Result<CapState, CapTransitionError> {
        self.cap = self.cap.on_subcommand(sub)?;
        Ok(self.cap)
    }

    /// Check that PASS may be sent now. The caller verifies the password
    /// and reports the result through [`Registration::pass_accepted`].
    pub fn on_pass(&self) -> Result<(), RegistrationError> {
        if self.is_normal() {
            return Err(RegistrationError::AlreadyRegistered);
        }
        if self.nick_set || self.user_set {
            return Err(RegistrationError::PassTooLate);
        }
        Ok(())
    }

    pub fn pass_accepted(&mut self) {
        self.pass = PassState::Accepted;
    }

    pub fn on_nick(&mut self) {
        self.nick_set = true;
    }

    pub fn on_user(&mut self) -> Result<(), RegistrationError> {
        if self.is_normal() {
            return Err(RegistrationError::AlreadyRegistered);
        }
        self.user_set = true;
        Ok(())
    }

    /// Whether every sub-flag is satisfied.
    pub fn ready(&self) -> bool {
        self.phase == Phase::Registration
            && self.nick_set
            && self.user_set
            && !self.cap.blocks_registration()
    }

    /// Move to `Normal` if ready. Returns `Ok(true)` exactly once per
    /// connection, on the call that performs the transition.
    pub fn try_complete(&mut self) -> Result<bool, RegistrationError> {
        if !self.ready() {
            return Ok(false);
        }
        if self.pass == PassState::Required {
            return Err(RegistrationError::PasswordRequired);
        }
        self.phase = Phase::Normal;
        if self.cap == CapState::None {
            self.cap = CapState::Negotiated;
        }
        Ok(true)
    }
}

impl Default for Registration {
    fn default() -> Self {
        Self::new(false)
    }
}

//! Session artifacts
//!
//! Fixed-layout records built from the codec primitives. None of them
//! carries a header or version byte; a failed read leaves no partial
//! artifact behind.

use std::fmt;

use qti_types::{QtiDuration, Variable};

use crate::codec::{DeclarationLookup, QtiBinaryStreamAccess};
use crate::error::{CodecError, CodecResult};
use crate::stream::BinaryStream;

macro_rules! wire_enum {
    (
        $(#[$meta:meta])*
        $name:ident, $field:literal {
            $($variant:ident = $code:literal => $label:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub const fn code(self) -> u8 {
                match self {
                    $(Self::$variant => $code),+
                }
            }

            pub fn from_code(code: u8) -> CodecResult<Self> {
                match code {
                    $($code => Ok(Self::$variant),)+
                    value => Err(CodecError::InvalidEnumValue {
                        field: $field,
                        value,
                    }),
                }
            }

            pub const fn name(self) -> &'static str {
                match self {
                    $(Self::$variant => $label),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.name())
            }
        }
    };
}

wire_enum! {
    /// Lifecycle state of an item session
    ItemSessionState, "item session state" {
        Initial = 0 => "initial",
        Interacting = 1 => "interacting",
        Suspended = 2 => "suspended",
        ModalFeedback = 3 => "modalFeedback",
        Solution = 4 => "solution",
        Review = 5 => "review",
        Closed = 6 => "closed",
        NotSelected = 255 => "notSelected",
    }
}

wire_enum! {
    NavigationMode, "navigation mode" {
        Linear = 0 => "linear",
        Nonlinear = 1 => "nonlinear",
    }
}

wire_enum! {
    SubmissionMode, "submission mode" {
        Individual = 0 => "individual",
        Simultaneous = 1 => "simultaneous",
    }
}

/// Persisted state of one item session
#[derive(Debug, Clone, PartialEq)]
pub struct ItemSessionSnapshot {
    pub item_identifier: String,
    pub occurrence: u16,
    pub state: ItemSessionState,
    pub navigation_mode: NavigationMode,
    pub submission_mode: SubmissionMode,
    pub attempting: bool,
    pub num_attempts: i32,
    pub duration: QtiDuration,
    pub variables: Vec<Variable>,
}

impl ItemSessionSnapshot {
    /// A fresh session: initial state, no attempts, zero duration
    pub fn new(item_identifier: impl Into<String>) -> Self {
        Self {
            item_identifier: item_identifier.into(),
            occurrence: 0,
            state: ItemSessionState::Initial,
            navigation_mode: NavigationMode::Linear,
            submission_mode: SubmissionMode::Individual,
            attempting: false,
            num_attempts: 0,
            duration: QtiDuration::ZERO,
            variables: Vec::new(),
        }
    }

    pub fn variable(&self, identifier: &str) -> Option<&Variable> {
        self.variables.iter().find(|v| v.identifier() == identifier)
    }
}

/// Position of an item occurrence in the test route
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutePosition {
    pub position: u16,
    pub item_identifier: String,
    pub occurrence: u16,
    pub test_part: String,
    /// Identifiers of the enclosing sections, outermost first
    pub section_path: Vec<String>,
}

/// Responses submitted but not yet processed, deferred until the end of
/// a test part in simultaneous submission mode
#[derive(Debug, Clone, PartialEq)]
pub struct PendingResponses {
    pub item_identifier: String,
    pub occurrence: u16,
    pub responses: Vec<Variable>,
}

impl<S: BinaryStream> QtiBinaryStreamAccess<S> {
    pub fn read_item_session(
        &mut self,
        declarations: &dyn DeclarationLookup,
    ) -> CodecResult<ItemSessionSnapshot> {
        let item_identifier = self.read_string()?;
        let occurrence = self.read_short()?;
        let state = ItemSessionState::from_code(self.read_tiny_int()?)?;
        let navigation_mode = NavigationMode::from_code(self.read_tiny_int()?)?;
        let submission_mode = SubmissionMode::from_code(self.read_tiny_int()?)?;
        let attempting = self.read_boolean()?;
        let num_attempts = self.read_integer()?;
        let duration = QtiDuration::parse(&self.read_string()?)?;
        let variables = self.read_variables(declarations)?;
        log::trace!(
            "read item session {}.{} ({}, {} variable(s))",
            item_identifier,
            occurrence,
            state,
            variables.len()
        );
        Ok(ItemSessionSnapshot {
            item_identifier,
            occurrence,
            state,
            navigation_mode,
            submission_mode,
            attempting,
            num_attempts,
            duration,
            variables,
        })
    }

    pub fn write_item_session(&mut self, session: &ItemSessionSnapshot) -> CodecResult<()> {
        self.write_string(&session.item_identifier)?;
        self.write_short(session.occurrence)?;
        self.write_tiny_int(session.state.code())?;
        self.write_tiny_int(session.navigation_mode.code())?;
        self.write_tiny_int(session.submission_mode.code())?;
        self.write_boolean(session.attempting)?;
        self.write_integer(session.num_attempts)?;
        self.write_string(&session.duration.to_string())?;
        self.write_variables(&session.variables)?;
        log::trace!(
            "wrote item session {}.{}",
            session.item_identifier,
            session.occurrence
        );
        Ok(())
    }

    pub fn read_route_position(&mut self) -> CodecResult<RoutePosition> {
        let position = self.read_short()?;
        let item_identifier = self.read_string()?;
        let occurrence = self.read_short()?;
        let test_part = self.read_string()?;
        let depth = self.read_short()?;
        let section_path = (0..depth)
            .map(|_| self.read_string())
            .collect::<Result<Vec<_>, _>>()?;
        log::trace!("read route position {} ({})", position, item_identifier);
        Ok(RoutePosition {
            position,
            item_identifier,
            occurrence,
            test_part,
            section_path,
        })
    }

    pub fn write_route_position(&mut self, route: &RoutePosition) -> CodecResult<()> {
        self.write_short(route.position)?;
        self.write_string(&route.item_identifier)?;
        self.write_short(route.occurrence)?;
        self.write_string(&route.test_part)?;
        let depth = u16::try_from(route.section_path.len()).map_err(|_| CodecError::TooMany {
            what: "section",
            count: route.section_path.len(),
        })?;
        self.write_short(depth)?;
        for section in &route.section_path {
            self.write_string(section)?;
        }
        log::trace!("wrote route position {}", route.position);
        Ok(())
    }

    pub fn read_pending_responses(
        &mut self,
        declarations: &dyn DeclarationLookup,
    ) -> CodecResult<PendingResponses> {
        let item_identifier = self.read_string()?;
        let occurrence = self.read_short()?;
        let responses = self.read_variables(declarations)?;
        log::trace!(
            "read {} pending response(s) for {}.{}",
            responses.len(),
            item_identifier,
            occurrence
        );
        Ok(PendingResponses {
            item_identifier,
            occurrence,
            responses,
        })
    }

    pub fn write_pending_responses(&mut self, pending: &PendingResponses) -> CodecResult<()> {
        self.write_string(&pending.item_identifier)?;
        self.write_short(pending.occurrence)?;
        self.write_variables(&pending.responses)?;
        log::trace!(
            "wrote {} pending response(s) for {}",
            pending.responses.len(),
            pending.item_identifier
        );
        Ok(())
    }
}

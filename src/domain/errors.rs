//! Error taxonomy for loading and wiring contraptions
//!
//! - `LoadError::Validation`: malformed serialized data, nothing was applied
//! - `LoadError::Reference`: save data points at a hostname that does not exist
//! - `ControlError`: an actuator could not be assigned to a control manager
//!
//! Precondition violations (mass recompute with no mass) are programming errors
//! and panic instead.

use std::error::Error;
use std::fmt::{self, Display};

use super::ids::{ComponentId, ContraptionId};
use super::parts::PartKind;

#[derive(Debug, Clone, PartialEq)]
pub enum NetworkError {
    UnknownHostname(String),
    DuplicateHostname(String),
}

impl Display for NetworkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownHostname(name) => write!(f, "no component with hostname {:?}", name),
            Self::DuplicateHostname(name) => write!(f, "hostname {:?} is already taken", name),
        }
    }
}

impl Error for NetworkError {}

#[derive(Debug, Clone, PartialEq)]
pub enum ControlError {
    NotAnActuator { id: ComponentId, kind: PartKind },
    NotASeat(ComponentId),
    UnknownComponent(ComponentId),
    AlreadyAssigned(ComponentId),
}

impl Display for ControlError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotAnActuator { id, kind } => {
                write!(f, "component {} ({}) cannot drive this manager", id, kind.key())
            }
            Self::NotASeat(id) => write!(f, "component {} is not a control seat", id),
            Self::UnknownComponent(id) => write!(f, "no component with id {}", id),
            Self::AlreadyAssigned(id) => write!(f, "component {} is already assigned", id),
        }
    }
}

impl Error for ControlError {}

#[derive(Debug, Clone, PartialEq)]
pub enum LoadError {
    Validation(String),
    Reference(NetworkError),
    Control(ControlError),
    CellOccupied { cell: [i32; 3], by: ComponentId },
    DuplicateId(ComponentId),
    UnknownContraption(ContraptionId),
}

impl Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Validation(msg) => write!(f, "invalid contraption data: {}", msg),
            Self::Reference(inner) => write!(f, "broken network reference: {}", inner),
            Self::Control(inner) => write!(f, "control wiring failed: {}", inner),
            Self::CellOccupied { cell, by } => write!(
                f,
                "grid cell [{}, {}, {}] is already occupied by component {}",
                cell[0], cell[1], cell[2], by
            ),
            Self::DuplicateId(id) => write!(f, "component id {} is already in use", id),
            Self::UnknownContraption(id) => write!(f, "no contraption with id {}", id),
        }
    }
}

impl Error for LoadError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Reference(inner) => Some(inner),
            Self::Control(inner) => Some(inner),
            _ => None,
        }
    }
}

impl From<NetworkError> for LoadError {
    fn from(err: NetworkError) -> Self {
        Self::Reference(err)
    }
}

impl From<ControlError> for LoadError {
    fn from(err: ControlError) -> Self {
        Self::Control(err)
    }
}

impl From<serde_json::Error> for LoadError {
    fn from(err: serde_json::Error) -> Self {
        Self::Validation(err.to_string())
    }
}

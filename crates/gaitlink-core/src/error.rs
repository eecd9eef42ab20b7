//! Shared error enums.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Global error type spanning bus, transport and configuration failures.
#[derive(Error, Debug, Serialize, Deserialize)]
pub enum GaitError {
    #[error("Channel Error: {0}")]
    Channel(String),

    #[error("Transport Error on {endpoint}: {details}")]
    Transport { endpoint: String, details: String },

    #[error("Config Error: {0}")]
    Config(String),

    #[error("Serialization Error: {0}")]
    Serialization(String),
}

/// Why a wire message could not become a [`crate::SwingDescription`].
///
/// Conversion builds the description and returns it whole; on `Err` the
/// caller holds nothing, so no partial state ever leaks out.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConvertError {
    /// The explicit type string names no known trajectory variant.
    #[error("Unknown swing type \"{0}\"")]
    UnknownSwingType(String),

    #[error("Foot trajectory of \"{name}\": {details}")]
    FootTrajectory { name: String, details: String },

    #[error("Joint trajectory of \"{name}\": {details}")]
    JointTrajectory { name: String, details: String },

    #[error("Swing profile of \"{name}\": {details}")]
    Profile { name: String, details: String },
}

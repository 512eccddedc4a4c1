//! Network messages - communication between App and Network layers

use crate::error::ApiError;
use crate::models::{ContactSubmission, Property};

/// Commands sent from App layer to Network layer
#[derive(Debug, Clone, PartialEq)]
pub enum NetworkCommand {
    /// Fetch the full property list
    ListProperties { id: u64 },
    /// Fetch one property by its identifier
    GetProperty { id: u64, property_id: String },
    /// Send a lead form submission
    SubmitContact { id: u64, payload: ContactSubmission },
    /// Shutdown the network actor
    Shutdown,
}

/// Responses sent from Network layer to App layer
#[derive(Debug, Clone)]
pub enum NetworkResponse {
    Properties {
        id: u64,
        result: Result<Vec<Property>, ApiError>,
    },
    Property {
        id: u64,
        /// Identifier the request was dispatched for
        property_id: String,
        result: Result<Property, ApiError>,
    },
    ContactSubmitted {
        id: u64,
        result: Result<(), ApiError>,
    },
}

impl NetworkResponse {
    /// Get the request ID from the response
    pub fn id(&self) -> u64 {
        match self {
            NetworkResponse::Properties { id, .. } => *id,
            NetworkResponse::Property { id, .. } => *id,
            NetworkResponse::ContactSubmitted { id, .. } => *id,
        }
    }

    pub fn is_ok(&self) -> bool {
        match self {
            NetworkResponse::Properties { result, .. } => result.is_ok(),
            NetworkResponse::Property { result, .. } => result.is_ok(),
            NetworkResponse::ContactSubmitted { result, .. } => result.is_ok(),
        }
    }
}

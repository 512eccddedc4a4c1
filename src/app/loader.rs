//! Listing and detail loaders
//!
//! Each loader remembers the id of the request it is waiting for; any
//! response carrying a different id (an older mount, or a property the user
//! already navigated away from) is dropped.

use crate::error::ApiError;
use crate::messages::NetworkCommand;
use crate::models::Property;

/// State of the property listing
#[derive(Clone, Debug, PartialEq)]
pub enum ListingState {
    Loading,
    /// The request failed; distinct from an empty portfolio
    Error(String),
    /// The server answered with no properties
    Empty,
    Ready(Vec<Property>),
}

/// State of a single property page
#[derive(Clone, Debug, PartialEq)]
pub enum DetailState {
    Loading,
    Error(String),
    /// The server confirmed the property does not exist
    NotFound,
    Ready(Box<Property>),
}

#[derive(Clone, Debug)]
pub struct ListingLoader {
    state: ListingState,
    pending: Option<u64>,
}

impl Default for ListingLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ListingLoader {
    pub fn new() -> Self {
        ListingLoader {
            state: ListingState::Loading,
            pending: None,
        }
    }

    pub fn state(&self) -> &ListingState {
        &self.state
    }

    pub fn pending(&self) -> Option<u64> {
        self.pending
    }

    /// Start the one fetch belonging to this mount
    pub fn mount(&mut self, request_id: u64) -> NetworkCommand {
        self.state = ListingState::Loading;
        self.pending = Some(request_id);
        NetworkCommand::ListProperties { id: request_id }
    }

    /// Apply a response. Returns false when it was stale and ignored.
    pub fn apply(&mut self, request_id: u64, result: Result<Vec<Property>, ApiError>) -> bool {
        if self.pending != Some(request_id) {
            tracing::debug!(id = request_id, "Discarding stale property list");
            return false;
        }
        self.pending = None;

        self.state = match result {
            Ok(properties) if properties.is_empty() => ListingState::Empty,
            Ok(properties) => ListingState::Ready(properties),
            Err(e) => {
                tracing::error!(id = request_id, error = %e, "Error fetching properties");
                ListingState::Error(e.user_message())
            }
        };
        true
    }

    /// The listed property at `index`, if the list is loaded
    pub fn property_at(&self, index: usize) -> Option<&Property> {
        match &self.state {
            ListingState::Ready(properties) => properties.get(index),
            _ => None,
        }
    }

    pub fn len(&self) -> usize {
        match &self.state {
            ListingState::Ready(properties) => properties.len(),
            _ => 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Clone, Debug)]
pub struct DetailLoader {
    property_id: Option<String>,
    state: DetailState,
    pending: Option<u64>,
}

impl Default for DetailLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl DetailLoader {
    pub fn new() -> Self {
        DetailLoader {
            property_id: None,
            state: DetailState::Loading,
            pending: None,
        }
    }

    pub fn state(&self) -> &DetailState {
        &self.state
    }

    pub fn property_id(&self) -> Option<&str> {
        self.property_id.as_deref()
    }

    pub fn pending(&self) -> Option<u64> {
        self.pending
    }

    /// Fetch `property_id`, superseding whatever was in flight
    pub fn load(&mut self, property_id: &str, request_id: u64) -> NetworkCommand {
        self.property_id = Some(property_id.to_string());
        self.state = DetailState::Loading;
        self.pending = Some(request_id);
        NetworkCommand::GetProperty {
            id: request_id,
            property_id: property_id.to_string(),
        }
    }

    /// Apply a response for `property_id`. Returns false when it was stale.
    pub fn apply(
        &mut self,
        request_id: u64,
        property_id: &str,
        result: Result<Property, ApiError>,
    ) -> bool {
        if self.pending != Some(request_id) || self.property_id.as_deref() != Some(property_id) {
            tracing::debug!(
                id = request_id,
                property_id,
                current = ?self.property_id,
                "Discarding stale property response"
            );
            return false;
        }
        self.pending = None;

        self.state = match result {
            Ok(property) => DetailState::Ready(Box::new(property)),
            Err(e) if e.is_not_found() => {
                tracing::warn!(id = request_id, property_id, "Property not found");
                DetailState::NotFound
            }
            Err(e) => {
                tracing::error!(id = request_id, property_id, error = %e, "Error fetching property");
                DetailState::Error(e.user_message())
            }
        };
        true
    }

    pub fn property(&self) -> Option<&Property> {
        match &self.state {
            DetailState::Ready(property) => Some(property.as_ref()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn property(id: &str, title: &str, price: &str) -> Property {
        Property {
            id: id.into(),
            title: title.into(),
            address: String::from("1 Test Rd"),
            price: price.into(),
            bedrooms: 3,
            bathrooms: 2,
            sqft: 1500,
            image: String::new(),
            description: String::new(),
            status: String::from("Available"),
            created_at: None,
        }
    }

    #[test]
    fn test_listing_starts_loading() {
        let mut loader = ListingLoader::new();
        assert_eq!(loader.mount(1), NetworkCommand::ListProperties { id: 1 });
        assert_eq!(loader.state(), &ListingState::Loading);
    }

    #[test]
    fn test_empty_list_is_not_an_error() {
        let mut loader = ListingLoader::new();
        loader.mount(1);
        assert!(loader.apply(1, Ok(vec![])));
        assert_eq!(loader.state(), &ListingState::Empty);
    }

    #[test]
    fn test_failure_is_not_empty() {
        let mut loader = ListingLoader::new();
        loader.mount(1);
        loader.apply(1, Err(ApiError::Network("Connection failed: refused".into())));
        assert!(matches!(loader.state(), ListingState::Error(msg) if msg.contains("refused")));
    }

    #[test]
    fn test_listing_ready() {
        let mut loader = ListingLoader::new();
        loader.mount(1);
        loader.apply(1, Ok(vec![property("1", "Loft", "$450,000"), property("2", "Villa", "$1")]));
        assert_eq!(loader.len(), 2);
        assert_eq!(loader.property_at(1).map(|p| p.title.as_str()), Some("Villa"));
    }

    #[test]
    fn test_remount_restarts_and_drops_old_response() {
        let mut loader = ListingLoader::new();
        loader.mount(1);
        loader.apply(1, Ok(vec![property("1", "Loft", "$1")]));
        loader.mount(2);
        assert_eq!(loader.state(), &ListingState::Loading);
        assert!(!loader.apply(1, Ok(vec![])));
        assert_eq!(loader.state(), &ListingState::Loading);
    }

    #[test]
    fn test_detail_ready() {
        let mut loader = DetailLoader::new();
        loader.load("42", 1);
        loader.apply(1, "42", Ok(property("42", "Maple St", "$250,000")));
        let shown = loader.property().unwrap();
        assert_eq!(shown.title, "Maple St");
        assert_eq!(shown.price, "$250,000");
        assert_ne!(loader.state(), &DetailState::NotFound);
    }

    #[test]
    fn test_detail_not_found_differs_from_error() {
        let mut loader = DetailLoader::new();
        loader.load("999", 1);
        loader.apply(1, "999", Err(ApiError::NotFound));
        assert_eq!(loader.state(), &DetailState::NotFound);

        loader.load("999", 2);
        loader.apply(2, "999", Err(ApiError::Network("HTTP 500".into())));
        assert_eq!(loader.state(), &DetailState::Error("HTTP 500".into()));
    }

    #[test]
    fn test_latest_identifier_wins() {
        let mut loader = DetailLoader::new();
        loader.load("1", 10);
        loader.load("2", 11);

        // Late answer for the first id must not overwrite anything
        assert!(!loader.apply(10, "1", Ok(property("1", "Old", "$1"))));
        assert_eq!(loader.state(), &DetailState::Loading);

        assert!(loader.apply(11, "2", Ok(property("2", "New", "$2"))));
        assert_eq!(loader.property().map(|p| p.id.as_str()), Some("2"));

        // And still ignored after the current one settled
        assert!(!loader.apply(10, "1", Err(ApiError::NotFound)));
        assert_eq!(loader.property().map(|p| p.title.as_str()), Some("New"));
    }

    #[test]
    fn test_same_id_reload_fetches_again() {
        let mut loader = DetailLoader::new();
        loader.load("7", 1);
        loader.apply(1, "7", Ok(property("7", "A", "$1")));
        let cmd = loader.load("7", 2);
        assert_eq!(cmd, NetworkCommand::GetProperty { id: 2, property_id: "7".into() });
        assert_eq!(loader.state(), &DetailState::Loading);
    }
}

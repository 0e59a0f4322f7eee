//! Guest personalization read from the invitation link

use serde::Serialize;
use tracing::{debug, warn};

use super::EventCode;

/// Label shown when the link does not name a guest
pub const DEFAULT_GUEST_LABEL: &str = "Tamu";

/// Who the invitation is addressed to and which event it is for
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Personalization {
    pub guest_name: String,
    /// Whether `guest_name` came from the link rather than the fallback
    pub named: bool,
    pub event: EventCode,
}

impl Personalization {
    /// Read `to` and `event` from a full URL or a bare query string.
    ///
    /// Only the first occurrence of each parameter counts. Missing or
    /// malformed parameters fall back to defaults.
    pub fn from_link(link: &str, fallback_label: &str) -> Self {
        let params = match serde_urlencoded::from_str::<Vec<(String, String)>>(query_of(link)) {
            Ok(params) => params,
            Err(e) => {
                warn!("Malformed invitation link query, using defaults: {}", e);
                Vec::new()
            }
        };

        let first = |key: &str| {
            params
                .iter()
                .find(|(name, _)| name == key)
                .map(|(_, value)| value.as_str())
        };

        // Blank names fall back, others are shown exactly as given
        let named_guest = first("to").filter(|name| !name.trim().is_empty());

        let personalization = Self {
            guest_name: named_guest.unwrap_or(fallback_label).to_string(),
            named: named_guest.is_some(),
            event: EventCode::from_param(first("event")),
        };
        debug!("Resolved personalization: {:?}", personalization);
        personalization
    }
}

/// The query part of `link`, which may be a URL or already a query string
fn query_of(link: &str) -> &str {
    let link = link.trim();
    let link = link.split_once('#').map_or(link, |(before, _)| before);

    match link.split_once('?') {
        Some((_, query)) => query,
        None if link.contains("://") || link.starts_with('/') => "",
        None => link,
    }
}

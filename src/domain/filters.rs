//! src/domain/filters.rs

use crate::domain::{calendar_date, Event, EventRequest};

/// `""` and `"All"` switch a criterion off.
fn is_wildcard(criterion: &str) -> bool {
    let criterion = criterion.trim();
    criterion.is_empty() || criterion == "All"
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.trim().to_lowercase())
}

fn same_day(stored: &str, wanted: &str) -> bool {
    match (calendar_date(stored), calendar_date(wanted)) {
        (Some(stored), Some(wanted)) => stored == wanted,
        _ => stored.trim() == wanted.trim(),
    }
}

/// Query parameters of the event request list.
#[derive(Debug, Clone, Default, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct EventRequestFilter {
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub event_type: String,
    #[serde(default)]
    pub society: String,
}

impl EventRequestFilter {
    pub fn matches(&self, request: &EventRequest) -> bool {
        (is_wildcard(&self.date) || same_day(&request.selected_date, &self.date))
            && (is_wildcard(&self.location)
                || contains_ignore_case(&request.location, &self.location))
            && (is_wildcard(&self.name) || contains_ignore_case(&request.event_name, &self.name))
            && (is_wildcard(&self.event_type) || request.event_type == self.event_type)
            && (is_wildcard(&self.society) || request.society_name == self.society)
    }

    pub fn apply<'a>(&self, requests: &'a [EventRequest]) -> Vec<&'a EventRequest> {
        requests.iter().filter(|r| self.matches(r)).collect()
    }

    pub fn is_active(&self) -> bool {
        ![
            &self.date,
            &self.location,
            &self.name,
            &self.event_type,
            &self.society,
        ]
        .iter()
        .all(|c| is_wildcard(c))
    }
}

/// Query parameters of the event lists and the event CSV export.
#[derive(Debug, Clone, Default, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct EventFilter {
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub event_type: String,
    #[serde(default)]
    pub society: String,
    #[serde(default)]
    pub status: String,
}

impl EventFilter {
    pub fn matches(&self, event: &Event) -> bool {
        (is_wildcard(&self.date) || event.event_date.trim() == self.date.trim())
            && (is_wildcard(&self.location)
                || contains_ignore_case(&event.event_venue, &self.location))
            && (is_wildcard(&self.name) || contains_ignore_case(&event.event_name, &self.name))
            && (is_wildcard(&self.event_type) || event.event_type == self.event_type)
            && (is_wildcard(&self.society) || event.event_held_by == self.society)
            && (is_wildcard(&self.status)
                || event.event_status.eq_ignore_ascii_case(self.status.trim()))
    }

    pub fn apply<'a>(&self, events: &'a [Event]) -> Vec<&'a Event> {
        events.iter().filter(|e| self.matches(e)).collect()
    }

    /// Query string carrying this filter, e.g. to the CSV export.
    pub fn query_string(&self) -> String {
        [
            ("date", &self.date),
            ("location", &self.location),
            ("name", &self.name),
            ("event_type", &self.event_type),
            ("society", &self.society),
            ("status", &self.status),
        ]
        .iter()
        .filter(|(_, value)| !is_wildcard(value))
        .map(|(key, value)| format!("{}={}", key, urlencoding::encode(value)))
        .collect::<Vec<_>>()
        .join("&")
    }
}

/// Sorted, de-duplicated, non-empty values offered in a filter drop-down.
pub fn distinct_values<'a, T: 'a>(
    items: impl IntoIterator<Item = &'a T>,
    field: impl Fn(&T) -> &str,
) -> Vec<String> {
    let mut values: Vec<String> = items
        .into_iter()
        .map(|item| field(item).trim().to_owned())
        .filter(|value| !value.is_empty())
        .collect();
    values.sort();
    values.dedup();
    values
}

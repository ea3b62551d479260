//! Event field rules and the upcoming/past listing window.

use crate::error::CoreError;

/// Maximum length for an event name.
pub const MAX_EVENT_NAME_LENGTH: usize = 200;

/// Maximum length for an event location.
pub const MAX_LOCATION_LENGTH: usize = 300;

/// Which side of "now" an event listing covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventWindow {
    /// `event_date >= now()`
    Upcoming,
    /// `event_date < now()`
    Past,
}

impl EventWindow {
    /// Parse the `when` filter. Unknown values are rejected.
    pub fn parse(raw: &str) -> Result<Self, CoreError> {
        match raw {
            "upcoming" => Ok(Self::Upcoming),
            "past" => Ok(Self::Past),
            other => Err(CoreError::Validation(format!(
                "Invalid value '{other}' for 'when'. Must be one of: upcoming, past"
            ))),
        }
    }

    /// SQL predicate fragment. Contains no user input.
    pub fn predicate(self) -> &'static str {
        match self {
            Self::Upcoming => "event_date >= NOW()",
            Self::Past => "event_date < NOW()",
        }
    }
}

/// Validate an event name: non-blank and bounded.
pub fn validate_event_name(name: &str) -> Result<(), CoreError> {
    if name.trim().is_empty() {
        return Err(CoreError::Validation("Event name is required.".to_string()));
    }
    if name.chars().count() > MAX_EVENT_NAME_LENGTH {
        return Err(CoreError::Validation(format!(
            "Event name must not exceed {MAX_EVENT_NAME_LENGTH} characters."
        )));
    }
    Ok(())
}

/// Validate an event location: non-blank and bounded.
pub fn validate_location(location: &str) -> Result<(), CoreError> {
    if location.trim().is_empty() {
        return Err(CoreError::Validation("Location is required.".to_string()));
    }
    if location.chars().count() > MAX_LOCATION_LENGTH {
        return Err(CoreError::Validation(format!(
            "Location must not exceed {MAX_LOCATION_LENGTH} characters."
        )));
    }
    Ok(())
}

/// Attendee counts cannot be negative.
pub fn validate_attendees(attendees: i32) -> Result<(), CoreError> {
    if attendees < 0 {
        return Err(CoreError::Validation(
            "Attendee count must not be negative.".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_parse() {
        assert_eq!(EventWindow::parse("upcoming").unwrap(), EventWindow::Upcoming);
        assert_eq!(EventWindow::parse("past").unwrap(), EventWindow::Past);
        assert!(EventWindow::parse("tomorrow").is_err());
    }

    #[test]
    fn name_and_location_rules() {
        assert!(validate_event_name("Jazz Night").is_ok());
        assert!(validate_event_name("").is_err());
        assert!(validate_event_name(&"a".repeat(MAX_EVENT_NAME_LENGTH + 1)).is_err());
        assert!(validate_location("Main Hall").is_ok());
        assert!(validate_location("  ").is_err());
    }

    #[test]
    fn negative_attendees_rejected() {
        assert!(validate_attendees(0).is_ok());
        assert!(validate_attendees(-1).is_err());
    }
}

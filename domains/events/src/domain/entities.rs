//! Domain entities for events and their registration forms
//!
//! Both entities are small state machines; illegal transitions surface
//! as `Conflict` so clients can distinguish them from missing resources.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use clubhub_common::{Error, Result};

/// Event lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, Default)]
#[sqlx(type_name = "event_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum EventStatus {
    #[default]
    Draft,
    Published,
    Closed,
    Cancelled,
}

impl std::fmt::Display for EventStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EventStatus::Draft => write!(f, "draft"),
            EventStatus::Published => write!(f, "published"),
            EventStatus::Closed => write!(f, "closed"),
            EventStatus::Cancelled => write!(f, "cancelled"),
        }
    }
}

/// Event entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Event {
    pub id: Uuid,
    pub club_id: Uuid,
    pub title: String,
    pub slug: String,
    #[sqlx(rename = "type")]
    #[serde(rename = "type")]
    pub event_type: Option<String>,
    pub description: Option<String>,
    pub poster_url: Option<String>,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub registration_deadline: Option<DateTime<Utc>>,
    pub location: Option<String>,
    pub max_participants: Option<i32>,
    pub status: EventStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Event {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        club_id: Uuid,
        title: String,
        slug: String,
        event_type: Option<String>,
        description: Option<String>,
        poster_url: Option<String>,
        start_time: DateTime<Utc>,
        end_time: DateTime<Utc>,
        registration_deadline: Option<DateTime<Utc>>,
        location: Option<String>,
        max_participants: Option<i32>,
    ) -> Result<Self> {
        if title.is_empty() || title.len() > 200 {
            return Err(Error::Validation(
                "Event title must be 1-200 characters".to_string(),
            ));
        }
        Self::validate_slug(&slug)?;
        if end_time < start_time {
            return Err(Error::Validation(
                "Event end time must not precede its start time".to_string(),
            ));
        }
        if let Some(max) = max_participants {
            if max < 1 {
                return Err(Error::Validation(
                    "Maximum participants must be at least 1".to_string(),
                ));
            }
        }

        let now = Utc::now();
        Ok(Event {
            id: Uuid::new_v4(),
            club_id,
            title,
            slug,
            event_type,
            description,
            poster_url,
            start_time,
            end_time,
            registration_deadline,
            location,
            max_participants,
            status: EventStatus::default(),
            created_at: now,
            updated_at: now,
        })
    }

    /// Validate slug format: lowercase alphanumerics separated by single
    /// hyphens, 1-80 characters
    pub fn validate_slug(slug: &str) -> Result<()> {
        if slug.is_empty() || slug.len() > 80 {
            return Err(Error::Validation(
                "Slug must be 1-80 characters".to_string(),
            ));
        }

        let pattern = regex::Regex::new(r"^[a-z0-9]+(-[a-z0-9]+)*$").unwrap();
        if !pattern.is_match(slug) {
            return Err(Error::Validation(
                "Slug may only contain lowercase letters, digits and single hyphens".to_string(),
            ));
        }

        Ok(())
    }

    /// draft → published
    pub fn publish(&mut self) -> Result<()> {
        match self.status {
            EventStatus::Draft => {
                self.status = EventStatus::Published;
                self.updated_at = Utc::now();
                Ok(())
            }
            other => Err(Error::Conflict(format!(
                "Cannot publish an event in status '{other}'"
            ))),
        }
    }

    /// published → closed
    pub fn close(&mut self) -> Result<()> {
        match self.status {
            EventStatus::Published => {
                self.status = EventStatus::Closed;
                self.updated_at = Utc::now();
                Ok(())
            }
            other => Err(Error::Conflict(format!(
                "Cannot close an event in status '{other}'"
            ))),
        }
    }

    /// draft | published → cancelled
    pub fn cancel(&mut self) -> Result<()> {
        match self.status {
            EventStatus::Draft | EventStatus::Published => {
                self.status = EventStatus::Cancelled;
                self.updated_at = Utc::now();
                Ok(())
            }
            other => Err(Error::Conflict(format!(
                "Cannot cancel an event in status '{other}'"
            ))),
        }
    }
}

/// Registration form lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, Default)]
#[sqlx(type_name = "form_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum FormStatus {
    #[default]
    Draft,
    Published,
    Closed,
}

impl std::fmt::Display for FormStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FormStatus::Draft => write!(f, "draft"),
            FormStatus::Published => write!(f, "published"),
            FormStatus::Closed => write!(f, "closed"),
        }
    }
}

/// Registration form attached to an event.
///
/// `form_content` is a free-form field definition rendered by the
/// frontend; the backend stores it opaquely.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Form {
    pub id: Uuid,
    pub event_id: Uuid,
    pub title: String,
    pub instructions: Option<String>,
    pub form_content: Option<String>,
    pub status: FormStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Form {
    pub fn new(
        event_id: Uuid,
        title: String,
        instructions: Option<String>,
        form_content: Option<String>,
    ) -> Result<Self> {
        if title.is_empty() || title.len() > 200 {
            return Err(Error::Validation(
                "Form title must be 1-200 characters".to_string(),
            ));
        }

        let now = Utc::now();
        Ok(Form {
            id: Uuid::new_v4(),
            event_id,
            title,
            instructions,
            form_content,
            status: FormStatus::default(),
            created_at: now,
            updated_at: now,
        })
    }

    /// draft → published
    pub fn publish(&mut self) -> Result<()> {
        match self.status {
            FormStatus::Draft => {
                self.status = FormStatus::Published;
                self.updated_at = Utc::now();
                Ok(())
            }
            other => Err(Error::Conflict(format!(
                "Cannot publish a form in status '{other}'"
            ))),
        }
    }

    /// draft | published → draft (withdraw from submissions)
    pub fn redraft(&mut self) -> Result<()> {
        match self.status {
            FormStatus::Draft | FormStatus::Published => {
                self.status = FormStatus::Draft;
                self.updated_at = Utc::now();
                Ok(())
            }
            FormStatus::Closed => Err(Error::Conflict(
                "Cannot re-draft a closed form".to_string(),
            )),
        }
    }

    /// published → closed
    pub fn close(&mut self) -> Result<()> {
        match self.status {
            FormStatus::Published => {
                self.status = FormStatus::Closed;
                self.updated_at = Utc::now();
                Ok(())
            }
            other => Err(Error::Conflict(format!(
                "Cannot close a form in status '{other}'"
            ))),
        }
    }

}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn sample_event() -> Event {
        let now = Utc::now();
        Event::new(
            Uuid::new_v4(),
            "Hackathon 2026".to_string(),
            "hackathon-2026".to_string(),
            Some("competition".to_string()),
            None,
            None,
            now + Duration::days(7),
            now + Duration::days(8),
            Some(now + Duration::days(6)),
            Some("Main auditorium".to_string()),
            Some(200),
        )
        .unwrap()
    }

    #[test]
    fn test_event_starts_as_draft() {
        assert_eq!(sample_event().status, EventStatus::Draft);
    }

    #[test]
    fn test_event_validation() {
        let now = Utc::now();
        // end before start
        assert!(Event::new(
            Uuid::new_v4(),
            "E".to_string(),
            "e".to_string(),
            None,
            None,
            None,
            now,
            now - Duration::hours(1),
            None,
            None,
            None,
        )
        .is_err());
        // zero max participants
        assert!(Event::new(
            Uuid::new_v4(),
            "E".to_string(),
            "e".to_string(),
            None,
            None,
            None,
            now,
            now,
            None,
            None,
            Some(0),
        )
        .is_err());
        assert!(Event::validate_slug("Bad Slug").is_err());
    }

    #[test]
    fn test_event_happy_path_transitions() {
        let mut event = sample_event();
        event.publish().unwrap();
        assert_eq!(event.status, EventStatus::Published);
        event.close().unwrap();
        assert_eq!(event.status, EventStatus::Closed);
    }

    #[test]
    fn test_event_cancel_from_draft_and_published() {
        let mut draft = sample_event();
        draft.cancel().unwrap();
        assert_eq!(draft.status, EventStatus::Cancelled);

        let mut published = sample_event();
        published.publish().unwrap();
        published.cancel().unwrap();
        assert_eq!(published.status, EventStatus::Cancelled);
    }

    #[test]
    fn test_event_illegal_transitions_conflict() {
        let mut event = sample_event();
        // close a draft
        assert!(matches!(event.close(), Err(Error::Conflict(_))));

        event.publish().unwrap();
        // publish twice
        assert!(matches!(event.publish(), Err(Error::Conflict(_))));

        event.close().unwrap();
        // anything out of a terminal state
        assert!(matches!(event.publish(), Err(Error::Conflict(_))));
        assert!(matches!(event.cancel(), Err(Error::Conflict(_))));
        assert!(matches!(event.close(), Err(Error::Conflict(_))));
    }

    #[test]
    fn test_form_lifecycle() {
        let mut form = Form::new(
            Uuid::new_v4(),
            "Registration".to_string(),
            None,
            Some(r#"[{"label":"Team name","type":"text"}]"#.to_string()),
        )
        .unwrap();

        assert_eq!(form.status, FormStatus::Draft);

        form.publish().unwrap();
        assert_eq!(form.status, FormStatus::Published);

        // withdraw and publish again
        form.redraft().unwrap();
        assert_eq!(form.status, FormStatus::Draft);
        form.publish().unwrap();

        form.close().unwrap();
        assert_eq!(form.status, FormStatus::Closed);
    }

    #[test]
    fn test_form_closed_is_terminal() {
        let mut form = Form::new(Uuid::new_v4(), "R".to_string(), None, None).unwrap();
        form.publish().unwrap();
        form.close().unwrap();

        assert!(matches!(form.publish(), Err(Error::Conflict(_))));
        assert!(matches!(form.redraft(), Err(Error::Conflict(_))));
        assert!(matches!(form.close(), Err(Error::Conflict(_))));
    }

    #[test]
    fn test_form_close_requires_published() {
        let mut form = Form::new(Uuid::new_v4(), "R".to_string(), None, None).unwrap();
        assert!(matches!(form.close(), Err(Error::Conflict(_))));
    }
}

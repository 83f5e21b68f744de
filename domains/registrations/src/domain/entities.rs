//! Domain entities for the registration workflow
//!
//! A public submission produces four linked rows in one transaction:
//! a team, its members, the form response, and the registration that
//! tracks status and payment.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use clubhub_common::{Error, Result};
use validator::ValidateEmail;

/// Team entity, created per submission
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Team {
    pub id: Uuid,
    pub event_id: Uuid,
    pub team_name: String,
    pub leader_name: String,
    pub leader_email: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Team {
    pub fn new(
        event_id: Uuid,
        team_name: String,
        leader_name: String,
        leader_email: String,
    ) -> Result<Self> {
        if team_name.is_empty() || team_name.len() > 100 {
            return Err(Error::Validation(
                "Team name must be 1-100 characters".to_string(),
            ));
        }
        if leader_name.is_empty() || leader_name.len() > 100 {
            return Err(Error::Validation(
                "Leader name must be 1-100 characters".to_string(),
            ));
        }
        if !leader_email.validate_email() {
            return Err(Error::Validation(
                "Invalid leader email format".to_string(),
            ));
        }

        let now = Utc::now();
        Ok(Team {
            id: Uuid::new_v4(),
            event_id,
            team_name,
            leader_name,
            leader_email,
            created_at: now,
            updated_at: now,
        })
    }
}

/// Team member entity.
///
/// `event_id` is denormalized from the parent team so the database can
/// enforce at-most-one-registration-per-member-per-event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct TeamMember {
    pub id: Uuid,
    pub team_id: Uuid,
    pub event_id: Uuid,
    pub member_name: String,
    pub member_email: String,
    pub member_student_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TeamMember {
    pub fn new(
        team_id: Uuid,
        event_id: Uuid,
        member_name: String,
        member_email: String,
        member_student_id: Option<String>,
    ) -> Result<Self> {
        if member_name.is_empty() || member_name.len() > 100 {
            return Err(Error::Validation(
                "Member name must be 1-100 characters".to_string(),
            ));
        }
        if !member_email.validate_email() {
            return Err(Error::Validation(
                "Invalid member email format".to_string(),
            ));
        }
        if let Some(sid) = &member_student_id {
            if sid.is_empty() || sid.len() > 50 {
                return Err(Error::Validation(
                    "Student ID must be 1-50 characters".to_string(),
                ));
            }
        }

        let now = Utc::now();
        Ok(TeamMember {
            id: Uuid::new_v4(),
            team_id,
            event_id,
            member_name,
            member_email,
            member_student_id,
            created_at: now,
            updated_at: now,
        })
    }
}

/// Stored answers for one form submission, kept opaque
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct FormResponse {
    pub id: Uuid,
    pub form_id: Uuid,
    pub response_content: String,
    pub submitted_at: DateTime<Utc>,
}

impl FormResponse {
    pub fn new(form_id: Uuid, response_content: String) -> Result<Self> {
        if response_content.is_empty() {
            return Err(Error::Validation(
                "Response content must not be empty".to_string(),
            ));
        }

        Ok(FormResponse {
            id: Uuid::new_v4(),
            form_id,
            response_content,
            submitted_at: Utc::now(),
        })
    }
}

/// Registration workflow status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, Default)]
#[sqlx(type_name = "registration_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum RegistrationStatus {
    #[default]
    Pending,
    Confirmed,
    Cancelled,
}

impl std::fmt::Display for RegistrationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RegistrationStatus::Pending => write!(f, "pending"),
            RegistrationStatus::Confirmed => write!(f, "confirmed"),
            RegistrationStatus::Cancelled => write!(f, "cancelled"),
        }
    }
}

/// Payment tracking status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, Default)]
#[sqlx(type_name = "payment_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    #[default]
    Unpaid,
    Paid,
    Refunded,
}

impl std::fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PaymentStatus::Unpaid => write!(f, "unpaid"),
            PaymentStatus::Paid => write!(f, "paid"),
            PaymentStatus::Refunded => write!(f, "refunded"),
        }
    }
}

impl std::str::FromStr for PaymentStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "unpaid" => Ok(PaymentStatus::Unpaid),
            "paid" => Ok(PaymentStatus::Paid),
            "refunded" => Ok(PaymentStatus::Refunded),
            other => Err(Error::Validation(format!(
                "Unknown payment status '{other}'; expected unpaid, paid or refunded"
            ))),
        }
    }
}

/// Registration entity tracking one team's submission for one event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Registration {
    pub id: Uuid,
    pub event_id: Uuid,
    pub form_response_id: Uuid,
    pub team_id: Uuid,
    pub status: RegistrationStatus,
    pub payment_status: PaymentStatus,
    pub ticket_code: Option<String>,
    pub registered_at: DateTime<Utc>,
}

impl Registration {
    pub fn new(event_id: Uuid, form_response_id: Uuid, team_id: Uuid) -> Self {
        Registration {
            id: Uuid::new_v4(),
            event_id,
            form_response_id,
            team_id,
            status: RegistrationStatus::default(),
            payment_status: PaymentStatus::default(),
            ticket_code: None,
            registered_at: Utc::now(),
        }
    }

    /// pending | cancelled → confirmed
    pub fn confirm(&mut self) -> Result<()> {
        if self.status == RegistrationStatus::Confirmed {
            return Err(Error::Conflict(
                "Registration is already confirmed".to_string(),
            ));
        }
        self.status = RegistrationStatus::Confirmed;
        Ok(())
    }

    /// pending | confirmed → cancelled
    pub fn cancel(&mut self) -> Result<()> {
        if self.status == RegistrationStatus::Cancelled {
            return Err(Error::Conflict(
                "Registration is already cancelled".to_string(),
            ));
        }
        self.status = RegistrationStatus::Cancelled;
        Ok(())
    }

    /// Set the payment status. Marking `paid` mints a fresh ticket code,
    /// also on repeated transitions.
    pub fn set_payment(&mut self, status: PaymentStatus) {
        self.payment_status = status;
        if status == PaymentStatus::Paid {
            self.ticket_code = Some(Self::mint_ticket_code(self.id));
        }
    }

    fn mint_ticket_code(id: Uuid) -> String {
        format!("TICKET-{}-{}", id, Utc::now().timestamp())
    }
}

/// Denormalized read model returned by submission and detail reads
#[derive(Debug, Clone, Serialize)]
pub struct RegistrationDetail {
    pub registration: Registration,
    pub team: TeamWithMembers,
    pub form_response: FormResponse,
}

#[derive(Debug, Clone, Serialize)]
pub struct TeamWithMembers {
    #[serde(flatten)]
    pub team: Team,
    pub members: Vec<TeamMember>,
}

/// Per-event registration statistics
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct RegistrationStats {
    pub total_registrations: i64,
    pub confirmed: i64,
    pub cancelled: i64,
    pub paid: i64,
    pub unpaid: i64,
    pub refunded: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_team_validation() {
        let event_id = Uuid::new_v4();
        assert!(Team::new(
            event_id,
            "Rustaceans".to_string(),
            "Lead".to_string(),
            "lead@uni.edu".to_string()
        )
        .is_ok());
        assert!(Team::new(
            event_id,
            "".to_string(),
            "Lead".to_string(),
            "lead@uni.edu".to_string()
        )
        .is_err());
        assert!(Team::new(
            event_id,
            "Rustaceans".to_string(),
            "Lead".to_string(),
            "bad-email".to_string()
        )
        .is_err());
    }

    #[test]
    fn test_member_validation() {
        let team_id = Uuid::new_v4();
        let event_id = Uuid::new_v4();
        assert!(TeamMember::new(
            team_id,
            event_id,
            "M".to_string(),
            "m@uni.edu".to_string(),
            Some("S-1".to_string())
        )
        .is_ok());
        assert!(TeamMember::new(
            team_id,
            event_id,
            "M".to_string(),
            "nope".to_string(),
            None
        )
        .is_err());
        assert!(TeamMember::new(
            team_id,
            event_id,
            "M".to_string(),
            "m@uni.edu".to_string(),
            Some("".to_string())
        )
        .is_err());
    }

    #[test]
    fn test_registration_starts_pending_unpaid() {
        let reg = Registration::new(Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4());
        assert_eq!(reg.status, RegistrationStatus::Pending);
        assert_eq!(reg.payment_status, PaymentStatus::Unpaid);
        assert!(reg.ticket_code.is_none());
    }

    #[test]
    fn test_confirm_and_cancel_conflicts() {
        let mut reg = Registration::new(Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4());

        reg.confirm().unwrap();
        assert!(matches!(reg.confirm(), Err(Error::Conflict(_))));

        reg.cancel().unwrap();
        assert!(matches!(reg.cancel(), Err(Error::Conflict(_))));

        // a cancelled registration can be re-confirmed
        reg.confirm().unwrap();
        assert_eq!(reg.status, RegistrationStatus::Confirmed);
    }

    #[test]
    fn test_paid_mints_ticket_code() {
        let mut reg = Registration::new(Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4());

        reg.set_payment(PaymentStatus::Paid);
        let first = reg.ticket_code.clone().unwrap();
        assert!(first.starts_with(&format!("TICKET-{}-", reg.id)));

        // unpaid and refunded leave the ticket in place
        reg.set_payment(PaymentStatus::Refunded);
        assert_eq!(reg.ticket_code.as_deref(), Some(first.as_str()));
    }

    #[test]
    fn test_payment_status_parsing() {
        assert_eq!("paid".parse::<PaymentStatus>().unwrap(), PaymentStatus::Paid);
        assert_eq!(
            "unpaid".parse::<PaymentStatus>().unwrap(),
            PaymentStatus::Unpaid
        );
        assert_eq!(
            "refunded".parse::<PaymentStatus>().unwrap(),
            PaymentStatus::Refunded
        );
        assert!(matches!(
            "voided".parse::<PaymentStatus>(),
            Err(Error::Validation(_))
        ));
    }

    #[test]
    fn test_form_response_requires_content() {
        assert!(FormResponse::new(Uuid::new_v4(), "{}".to_string()).is_ok());
        assert!(FormResponse::new(Uuid::new_v4(), "".to_string()).is_err());
    }
}

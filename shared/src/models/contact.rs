//! Project Contact Models

use serde::{Deserialize, Serialize};

use crate::util::{LEAD_PREFIX, public_id};

/// Longest accepted contact message, in characters
pub const MAX_MESSAGE_LENGTH: usize = 500;

/// Project contact entity (row in `project_contacts`)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct ProjectContact {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub company: Option<String>,
    pub subject: String,
    pub message: String,
    pub consent: bool,
    pub source: Option<String>,
    pub is_read: bool,
    pub read_at: Option<i64>,
    pub created_at: i64,
}

/// Public submission payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectContactCreate {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
    pub subject: String,
    pub message: String,
    #[serde(default)]
    pub consent: bool,
    #[serde(default)]
    pub source: Option<String>,
    /// Bot trap; must stay empty
    #[serde(default)]
    pub honeypot: Option<String>,
}

/// Submission acknowledgement
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectContactReceipt {
    pub id: String,
    pub status: String,
}

impl ProjectContactReceipt {
    pub fn received(id: i64) -> Self {
        Self {
            id: public_id(LEAD_PREFIX, id),
            status: "RECEIVED".to_string(),
        }
    }
}

/// Admin listing entry
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectContactView {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub company: Option<String>,
    pub subject: String,
    pub message: String,
    pub consent: bool,
    pub source: Option<String>,
    pub is_read: bool,
    pub read_at: Option<i64>,
    pub created_at: i64,
}

impl From<ProjectContact> for ProjectContactView {
    fn from(c: ProjectContact) -> Self {
        Self {
            id: public_id(LEAD_PREFIX, c.id),
            name: c.name,
            email: c.email,
            phone: c.phone,
            company: c.company,
            subject: c.subject,
            message: c.message,
            consent: c.consent,
            source: c.source,
            is_read: c.is_read,
            read_at: c.read_at,
            created_at: c.created_at,
        }
    }
}

/// `GET /admin/contacts/projects/stats` response
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectContactStats {
    pub total: i64,
    pub unread: i64,
}

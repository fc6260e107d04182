use std::fmt;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Portal roles, as carried in the verified identity's claims.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    SmeUser,
    Buyer,
    Partner,
    QaReviewer,
    Instructor,
    PlatformAdmin,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::SmeUser => "sme_user",
            Self::Buyer => "buyer",
            Self::Partner => "partner",
            Self::QaReviewer => "qa_reviewer",
            Self::Instructor => "instructor",
            Self::PlatformAdmin => "platform_admin",
        };
        f.write_str(name)
    }
}

/// The caller of an operation: a subject id plus its role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Actor {
    pub user_id: String,
    pub role: Role,
}

impl Actor {
    pub fn new(user_id: impl Into<String>, role: Role) -> Self {
        Self {
            user_id: user_id.into(),
            role,
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::PlatformAdmin
    }
}

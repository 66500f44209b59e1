//! Member entity and the identity types derived from it.

use chrono::{DateTime, Utc};
use serde_json::json;
use std::fmt;
use std::str::FromStr;

use crate::error::AppError;

/// Rank assigned to every newly registered member.
pub const DEFAULT_RANK_ID: i64 = 1;

/// Platform-wide role of a member.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemberRole {
    User,
    Admin,
}

impl MemberRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            MemberRole::User => "USER",
            MemberRole::Admin => "ADMIN",
        }
    }
}

impl fmt::Display for MemberRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MemberRole {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "USER" => Ok(MemberRole::User),
            "ADMIN" => Ok(MemberRole::Admin),
            other => Err(AppError::internal(
                "Unknown member role",
                json!({ "role": other }),
            )),
        }
    }
}

/// Account status. Suspended members cannot authenticate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemberStatus {
    Active,
    Suspended,
}

impl MemberStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            MemberStatus::Active => "ACTIVE",
            MemberStatus::Suspended => "SUSPENDED",
        }
    }
}

impl FromStr for MemberStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ACTIVE" => Ok(MemberStatus::Active),
            "SUSPENDED" => Ok(MemberStatus::Suspended),
            other => Err(AppError::internal(
                "Unknown member status",
                json!({ "status": other }),
            )),
        }
    }
}

/// A registered community member joined with its rank name.
#[derive(Debug, Clone)]
pub struct Member {
    pub id: i64,
    pub email: String,
    pub nickname: String,
    pub point: i32,
    pub rank_id: i64,
    pub rank_name: String,
    pub role: MemberRole,
    pub status: MemberStatus,
    pub created_at: DateTime<Utc>,
}

impl Member {
    pub fn is_admin(&self) -> bool {
        self.role == MemberRole::Admin
    }
}

/// Input data for registering a member. The password is already hashed.
#[derive(Debug, Clone)]
pub struct NewMember {
    pub email: String,
    pub password_hash: String,
    pub nickname: String,
}

/// Login lookup result; never leaves the application layer.
#[derive(Debug, Clone)]
pub struct MemberCredentials {
    pub member_id: i64,
    pub password_hash: String,
    pub status: MemberStatus,
}

/// The member on whose behalf a request is executed.
///
/// Produced by token authentication and passed into services so that
/// ownership and admin checks never trust client-supplied ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Actor {
    pub member_id: i64,
    pub role: MemberRole,
}

impl Actor {
    pub fn new(member_id: i64, role: MemberRole) -> Self {
        Self { member_id, role }
    }

    pub fn is_admin(&self) -> bool {
        self.role == MemberRole::Admin
    }

    /// True when the actor owns the resource or is an admin.
    pub fn can_manage(&self, owner_id: i64) -> bool {
        self.member_id == owner_id || self.is_admin()
    }
}

/// Lightweight listing row for a member's own posts.
#[derive(Debug, Clone)]
pub struct PostSummary {
    pub id: i64,
    pub title: String,
    pub created_at: DateTime<Utc>,
}

//! DTOs for registration, login and logout.

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use validator::Validate;

use crate::application::services::{IssuedToken, Registration};
use crate::domain::entities::Member;

/// Letters, digits and underscores in any script.
static NICKNAME_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[\p{L}\p{N}_]+$").expect("nickname pattern is valid"));

#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 8, max = 64, message = "Password must be 8-64 characters"))]
    pub password: String,

    #[validate(length(min = 2, max = 20, message = "Nickname must be 2-20 characters"))]
    #[validate(regex(path = "*NICKNAME_REGEX", message = "Nickname may contain letters, digits and '_'"))]
    pub nickname: String,
}

impl From<RegisterRequest> for Registration {
    fn from(r: RegisterRequest) -> Self {
        Self {
            email: r.email.trim().to_lowercase(),
            password: r.password,
            nickname: r.nickname,
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 1, max = 64))]
    pub password: String,
}

/// Member account as returned after registration.
#[derive(Debug, Serialize)]
pub struct MemberResponse {
    pub id: i64,
    pub email: String,
    pub nickname: String,
    pub role: String,
    pub rank_name: String,
    pub point: i32,
    pub created_at: DateTime<Utc>,
}

impl From<Member> for MemberResponse {
    fn from(m: Member) -> Self {
        Self {
            id: m.id,
            email: m.email,
            nickname: m.nickname,
            role: m.role.to_string(),
            rank_name: m.rank_name,
            point: m.point,
            created_at: m.created_at,
        }
    }
}

/// Login result. The token is shown only once.
#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub token: String,
    pub token_type: &'static str,
    pub member: MemberResponse,
}

impl From<IssuedToken> for TokenResponse {
    fn from(t: IssuedToken) -> Self {
        Self {
            token: t.token,
            token_type: "Bearer",
            member: t.member.into(),
        }
    }
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::songs::PAID_MAX_TOKENS;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct User {
    pub id:         String,
    pub email:      String,
    pub first_name: String,
    pub last_name:  String,
    pub is_paid:    bool,
    pub max_tokens: u32,
    pub created_at: DateTime<Utc>,
}

impl User {
    // free users are limited to their server-assigned allowance
    pub fn max_tokens_limit(&self) -> u32 {
        if self.is_paid {
            PAID_MAX_TOKENS
        } else {
            self.max_tokens
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct UserCreate {
    pub email:      String,
    pub password:   String,
    pub first_name: String,
    pub last_name:  String,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct UserLogin {
    pub email:    String,
    pub password: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct UserUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name:  Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email:      Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct LoginOk {
    pub user:          User,
    pub access_token:  String,
    pub refresh_token: String,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct UserEnvelope {
    pub user: User,
}

use chrono::{DateTime, Utc};
use derive_more::{Display, From, Into};
use serde::{Deserialize, Serialize};

pub const PAID_MAX_TOKENS: u32 = 4096;
pub const MIN_MAX_TOKENS: u32 = 256;

#[derive(Serialize, Deserialize, Clone, Debug, Eq, PartialEq, Hash, Display, From, Into)]
pub struct SongId(String);

impl SongId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for SongId {
    fn from(id: &str) -> Self {
        SongId(id.to_owned())
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, Eq, PartialEq, Display)]
#[serde(rename_all = "snake_case")]
pub enum SongStatus {
    #[display(fmt = "pending")]
    Pending,
    #[display(fmt = "processing")]
    Processing,
    #[display(fmt = "completed")]
    Completed,
    #[display(fmt = "failed")]
    Failed,
}

impl SongStatus {
    // transitions are server-driven and monotonic, terminal states never revert
    pub fn is_terminal(self) -> bool {
        matches!(self, SongStatus::Completed | SongStatus::Failed)
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Song {
    pub id:            SongId,
    pub user_id:       String,
    pub title:         String,
    #[serde(default)]
    pub description:   Option<String>,
    pub prompt:        String,
    pub max_tokens:    u32,
    pub status:        SongStatus,
    #[serde(default)]
    pub gcs_url:       Option<String>,
    #[serde(default)]
    pub error_message: Option<String>,
    pub created_at:    DateTime<Utc>,
    pub updated_at:    DateTime<Utc>,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct SongCreate {
    pub title:       String,
    #[serde(default)]
    pub description: Option<String>,
    pub prompt:      String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_tokens:  Option<u32>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct SongUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title:       Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct AnonymousSongCreate {
    pub prompt: String,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct AnonymousSongCreated {
    pub download_url: String,
    pub song_id:      String,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct SongEnvelope {
    pub song: Song,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct SongListEnvelope {
    pub songs: Vec<Song>,
}

//! HTTP API response DTOs.

use serde::Serialize;

use crate::domain::RoomStatus;

/// Room summary for list API
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomSummaryDto {
    pub code: String,
    pub title: String,
    pub host: String,
    pub member_count: usize,
    pub status: RoomStatus,
    /// RFC 3339
    pub created_at: String,
}

/// Room detail for detail API
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomDetailDto {
    pub code: String,
    pub title: String,
    pub host: String,
    pub members: Vec<String>,
    pub files: Vec<String>,
    pub status: RoomStatus,
    /// RFC 3339
    pub created_at: String,
}

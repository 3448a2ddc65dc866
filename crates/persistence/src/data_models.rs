// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::PersistenceError;
use serde::{Deserialize, Serialize};

/// Encodes a staff role set for storage in a JSON text column.
pub(crate) fn encode_role_set(roles: &[String]) -> Result<String, PersistenceError> {
    Ok(serde_json::to_string(roles)?)
}

/// Decodes a staff role set from a JSON text column.
pub(crate) fn decode_role_set(raw: &str) -> Result<Vec<String>, PersistenceError> {
    Ok(serde_json::from_str(raw)?)
}

/// Serializable representation of a profile row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileData {
    pub id: String,
    pub email: String,
    pub name: String,
    pub role: String,
    pub phone: Option<String>,
    pub created_at: String,
}

/// Serializable representation of a staff profile row.
///
/// `staff_roles` is stored as a JSON array in a text column and decoded
/// at the query boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaffProfileData {
    pub id: String,
    pub staff_roles: Vec<String>,
    pub city: String,
    pub status: String,
}

/// Serializable representation of an event row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventData {
    pub event_id: i64,
    pub title: String,
    pub description: Option<String>,
    pub event_date: String,
    pub start_time: String,
    pub end_time: String,
    pub location: String,
    pub city: String,
    pub client_id: Option<String>,
    pub vendor_id: Option<String>,
    pub created_by: String,
    pub status: String,
    pub created_at: String,
}

/// Fields for inserting a new event row.
///
/// The canonical `event_id` is assigned by the database on insert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEventData {
    pub title: String,
    pub description: Option<String>,
    pub event_date: String,
    pub start_time: String,
    pub end_time: String,
    pub location: String,
    pub city: String,
    pub client_id: Option<String>,
    pub vendor_id: Option<String>,
    pub created_by: String,
    pub status: String,
    pub created_at: String,
}

/// Serializable representation of a role requirement row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleRequirementData {
    pub requirement_id: i64,
    pub event_id: i64,
    pub role: String,
    pub quantity: i32,
}

/// Serializable representation of a dispatch request row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DispatchRequestData {
    pub dispatch_id: i64,
    pub event_id: i64,
    pub staff_id: String,
    pub staff_role: String,
    pub status: String,
    pub sent_at: String,
    pub responded_at: Option<String>,
}

/// Serializable representation of a message row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageData {
    pub message_id: i64,
    pub event_id: i64,
    pub sender_id: String,
    pub content: String,
    pub is_private: bool,
    pub private_recipient_id: Option<String>,
    pub created_at: String,
}

/// Serializable representation of a staff invite row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaffInviteData {
    pub invite_id: i64,
    pub email: String,
    pub invited_by: String,
    pub staff_roles: Vec<String>,
    pub city: String,
    pub token: String,
    pub accepted: bool,
    pub created_at: String,
    pub expires_at: String,
}

/// Serializable representation of a session row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionData {
    pub session_id: i64,
    pub session_token: String,
    pub profile_id: String,
    pub created_at: String,
    pub expires_at: String,
}

/// Count-only dashboard summary rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct DashboardCounts {
    pub draft_events: i64,
    pub open_events: i64,
    pub live_events: i64,
    pub completed_events: i64,
    pub available_staff: i64,
    pub assigned_staff: i64,
    pub unavailable_staff: i64,
    pub pending_dispatches: i64,
    pub open_invites: i64,
}

// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Event chat message mutations.

use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};

use crate::backend::PersistenceBackend;
use crate::data_models::MessageData;
use crate::diesel_schema::messages;
use crate::error::PersistenceError;

/// Diesel Insertable struct for message rows.
#[derive(Insertable)]
#[diesel(table_name = messages)]
struct NewMessageRow {
    event_id: i64,
    sender_id: String,
    content: String,
    is_private: i32,
    private_recipient_id: Option<String>,
    created_at: String,
}

backend_fn! {
/// Inserts a message into an event's chat.
///
/// # Returns
///
/// The created message with its canonical id.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn insert_message(
    conn: &mut _,
    event_id: i64,
    sender_id: &str,
    content: &str,
    is_private: bool,
    private_recipient_id: Option<&str>,
    created_at: &str,
) -> Result<MessageData, PersistenceError> {
    let record = NewMessageRow {
        event_id,
        sender_id: sender_id.to_string(),
        content: content.to_string(),
        is_private: i32::from(is_private),
        private_recipient_id: private_recipient_id.map(ToString::to_string),
        created_at: created_at.to_string(),
    };

    diesel::insert_into(messages::table)
        .values(&record)
        .execute(conn)?;
    let message_id: i64 = conn.get_last_insert_rowid()?;

    Ok(MessageData {
        message_id,
        event_id,
        sender_id: sender_id.to_string(),
        content: content.to_string(),
        is_private,
        private_recipient_id: private_recipient_id.map(ToString::to_string),
        created_at: created_at.to_string(),
    })
}
}

// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Event chat message queries.

use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};

use crate::data_models::MessageData;
use crate::diesel_schema::messages;
use crate::error::PersistenceError;

/// Diesel Queryable struct for message rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = messages)]
pub(crate) struct MessageRow {
    pub(crate) message_id: i64,
    pub(crate) event_id: i64,
    pub(crate) sender_id: String,
    pub(crate) content: String,
    pub(crate) is_private: i32,
    pub(crate) private_recipient_id: Option<String>,
    pub(crate) created_at: String,
}

impl From<MessageRow> for MessageData {
    fn from(row: MessageRow) -> Self {
        Self {
            message_id: row.message_id,
            event_id: row.event_id,
            sender_id: row.sender_id,
            content: row.content,
            is_private: row.is_private != 0,
            private_recipient_id: row.private_recipient_id,
            created_at: row.created_at,
        }
    }
}

backend_fn! {
/// Lists all messages for an event in creation order.
///
/// Visibility filtering for private messages happens above this layer,
/// where the viewer's identity and role are known.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_messages_for_event(
    conn: &mut _,
    event_id: i64,
) -> Result<Vec<MessageData>, PersistenceError> {
    let rows: Vec<MessageRow> = messages::table
        .filter(messages::event_id.eq(event_id))
        .order((messages::created_at.asc(), messages::message_id.asc()))
        .select(MessageRow::as_select())
        .load(conn)?;

    Ok(rows.into_iter().map(MessageData::from).collect())
}
}

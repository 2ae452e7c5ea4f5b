// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Audit event timeline queries.

use diesel::prelude::*;
use diesel::SqliteConnection;
use salon_book_audit::{Action, Actor, AuditEvent, Cause, StateSnapshot};

use crate::data_models::{ActionData, ActorData, AuditEventRow, CauseData, StateSnapshotData};
use crate::diesel_schema;
use crate::error::PersistenceError;

/// Returns the full audit timeline in insertion order, with event IDs.
///
/// # Errors
///
/// Returns an error if the query fails or an event cannot be deserialized.
pub fn get_audit_timeline(
    conn: &mut SqliteConnection,
) -> Result<Vec<(i64, AuditEvent)>, PersistenceError> {
    let rows: Vec<AuditEventRow> = diesel_schema::audit_events::table
        .order(diesel_schema::audit_events::event_id.asc())
        .load::<AuditEventRow>(conn)
        .map_err(|e| PersistenceError::QueryFailed(format!("get_audit_timeline: {e}")))?;

    let mut events: Vec<(i64, AuditEvent)> = Vec::with_capacity(rows.len());
    for (event_id, actor_json, cause_json, action_json, before_json, after_json, _created_at) in
        rows
    {
        let actor_data: ActorData = serde_json::from_str(&actor_json)?;
        let cause_data: CauseData = serde_json::from_str(&cause_json)?;
        let action_data: ActionData = serde_json::from_str(&action_json)?;
        let before_data: StateSnapshotData = serde_json::from_str(&before_json)?;
        let after_data: StateSnapshotData = serde_json::from_str(&after_json)?;

        let event: AuditEvent = AuditEvent::new(
            Actor::new(actor_data.id, actor_data.actor_type),
            Cause::new(cause_data.id, cause_data.description),
            Action::new(action_data.name, action_data.details),
            StateSnapshot::new(before_data.data),
            StateSnapshot::new(after_data.data),
        );
        events.push((event_id, event));
    }

    Ok(events)
}

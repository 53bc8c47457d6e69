//! Notifications
//!
//! One dispatcher consumes transition events from every ledger kind and
//! writes notification rows; broadcast requests go through the audience
//! resolver first. A best-effort admin-mailbox side-channel rides on a
//! background worker and never blocks the primary write path.

pub mod audience;
pub mod dispatcher;
pub mod mailer;

pub use dispatcher::Dispatcher;
pub use mailer::Mailer;

use shared::models::EntityKind;

/// Emitted by the workflow engine after a state-changing transition.
///
/// One event shape for all ledger kinds — the dispatcher formats the
/// recipient-facing message from it, so no per-kind notification logic
/// exists anywhere else.
#[derive(Debug, Clone)]
pub struct StatusChangedEvent {
    pub kind: EntityKind,
    pub entity_id: i64,
    pub owner_user_id: i64,
    pub new_status: String,
}

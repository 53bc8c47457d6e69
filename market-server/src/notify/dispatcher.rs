//! Notification Dispatcher
//!
//! The single consumer of transition events and broadcast requests.
//! Writes one notification row per recipient; the admin-mail side-channel
//! is fired through [`Mailer`] and never affects the primary write.

use shared::models::{BroadcastTarget, EntityKind, Notification, NotificationKind};
use sqlx::SqlitePool;

use super::{Mailer, StatusChangedEvent, audience};
use crate::db::repository::{RepoResult, notification};

#[derive(Clone, Debug)]
pub struct Dispatcher {
    pool: SqlitePool,
    mailer: Mailer,
}

impl Dispatcher {
    pub fn new(pool: SqlitePool, mailer: Mailer) -> Self {
        Self { pool, mailer }
    }

    /// Write exactly one notification row for one recipient.
    pub async fn dispatch_targeted(
        &self,
        recipient_user_id: i64,
        title: &str,
        message: &str,
        kind: NotificationKind,
        reference_type: Option<&str>,
        reference_id: Option<i64>,
    ) -> RepoResult<Notification> {
        notification::insert(
            &self.pool,
            recipient_user_id,
            title,
            message,
            kind,
            reference_type,
            reference_id,
        )
        .await
    }

    /// Resolve the audience and write one row per recipient.
    ///
    /// An empty audience is not an error. Per-recipient failures are
    /// logged and skipped; the returned count covers rows actually
    /// written.
    pub async fn dispatch_broadcast(
        &self,
        target: &BroadcastTarget,
        title: &str,
        message: &str,
    ) -> RepoResult<usize> {
        let recipients = audience::resolve(&self.pool, target).await?;
        let mut sent = 0usize;
        for recipient in recipients {
            match notification::insert(
                &self.pool,
                recipient,
                title,
                message,
                NotificationKind::Broadcast,
                None,
                None,
            )
            .await
            {
                Ok(_) => sent += 1,
                Err(e) => {
                    tracing::warn!(
                        recipient,
                        error = %e,
                        "Broadcast write failed for one recipient, continuing"
                    );
                }
            }
        }
        Ok(sent)
    }

    /// Consume a transition event: one targeted notification to the
    /// entity owner. Best-effort — a failed write is logged, never
    /// surfaced, because the status change has already been committed.
    pub async fn status_changed(&self, event: StatusChangedEvent) {
        let (kind, label) = match event.kind {
            EntityKind::Order => (NotificationKind::OrderStatus, "order"),
            EntityKind::ShopOrder => (NotificationKind::ShopOrderStatus, "shop order"),
            EntityKind::Demand => (NotificationKind::DemandStatus, "book demand"),
        };
        let title = format!("Your {label} was updated");
        let message = format!("Your {label} is now {}.", event.new_status);

        if let Err(e) = self
            .dispatch_targeted(
                event.owner_user_id,
                &title,
                &message,
                kind,
                Some(event.kind.as_str()),
                Some(event.entity_id),
            )
            .await
        {
            tracing::warn!(
                entity = %event.kind,
                entity_id = event.entity_id,
                error = %e,
                "Status-change notification write failed"
            );
        }
    }

    /// Admin-mailbox notice for a freshly placed order/shop-order/demand.
    /// Fire-and-forget by construction.
    pub fn notify_admin_new_entity(&self, kind: EntityKind, entity_id: i64, summary: &str) {
        let subject = match kind {
            EntityKind::Order => "New order placed",
            EntityKind::ShopOrder => "New shop order placed",
            EntityKind::Demand => "New book demand",
        };
        self.mailer
            .notify_admin(subject, format!("{summary} (ref {kind}:{entity_id})"));
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DbService;
    use crate::db::repository::profile;
    use shared::models::ProfileUpsert;

    async fn dispatcher() -> Dispatcher {
        let pool = DbService::open_in_memory().await.unwrap().pool;
        Dispatcher::new(pool, Mailer::disabled("admin@test"))
    }

    /// Seed bare user rows so the profile FK (user_id -> user.id) is satisfied.
    async fn seed_users(pool: &SqlitePool, ids: &[i64]) {
        for &uid in ids {
            sqlx::query(
                "INSERT INTO user (id, name, phone, email, password_hash, role, is_active, created_at, updated_at) \
                 VALUES (?1, 'U', ?2, NULL, 'x', 'user', 1, 0, 0)",
            )
            .bind(uid)
            .bind(format!("phone-{uid}"))
            .execute(pool)
            .await
            .unwrap();
        }
    }

    #[tokio::test]
    async fn broadcast_reaches_only_the_targeted_institution() {
        let d = dispatcher().await;
        seed_users(d.pool(), &[1, 2, 3, 4, 5]).await;

        for (user_id, inst) in [(1, 1), (2, 1), (3, 1), (4, 2), (5, 2)] {
            profile::upsert(
                d.pool(),
                user_id,
                ProfileUpsert {
                    institution_id: Some(inst),
                    department_id: None,
                    hall: None,
                },
            )
            .await
            .unwrap();
        }

        let sent = d
            .dispatch_broadcast(
                &BroadcastTarget::Institution { institution_id: 1 },
                "Notice",
                "Campus book fair on Friday",
            )
            .await
            .unwrap();
        assert_eq!(sent, 3);

        for user_id in [1, 2, 3] {
            assert_eq!(
                notification::unread_count(d.pool(), user_id).await.unwrap(),
                1
            );
        }
        for user_id in [4, 5] {
            assert_eq!(
                notification::unread_count(d.pool(), user_id).await.unwrap(),
                0
            );
        }
    }

    #[tokio::test]
    async fn empty_audience_sends_zero() {
        let d = dispatcher().await;
        let sent = d
            .dispatch_broadcast(
                &BroadcastTarget::Institution { institution_id: 77 },
                "Notice",
                "nobody home",
            )
            .await
            .unwrap();
        assert_eq!(sent, 0);
    }

    #[tokio::test]
    async fn status_changed_writes_one_row_with_reference() {
        let d = dispatcher().await;

        d.status_changed(StatusChangedEvent {
            kind: EntityKind::Order,
            entity_id: 555,
            owner_user_id: 9,
            new_status: "confirmed".to_string(),
        })
        .await;

        let rows = notification::list_by_recipient(d.pool(), 9, 10, 0)
            .await
            .unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].kind, NotificationKind::OrderStatus);
        assert_eq!(rows[0].reference_type.as_deref(), Some("order"));
        assert_eq!(rows[0].reference_id, Some(555));
    }
}

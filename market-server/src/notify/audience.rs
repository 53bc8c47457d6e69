//! Audience Resolver
//!
//! Turns a broadcast target into the concrete set of recipient user ids.
//! Read-only over the profile and shop directories; the result is
//! deduplicated. A department target assumes the caller already narrowed
//! by institution — no cross-validation happens here.

use shared::models::BroadcastTarget;
use sqlx::SqlitePool;
use std::collections::BTreeSet;

use crate::db::repository::{RepoResult, profile, shop};

pub async fn resolve(pool: &SqlitePool, target: &BroadcastTarget) -> RepoResult<Vec<i64>> {
    let ids = match target {
        BroadcastTarget::All => profile::user_ids_all(pool).await?,
        BroadcastTarget::Institution { institution_id } => {
            profile::user_ids_by_institution(pool, *institution_id).await?
        }
        BroadcastTarget::Department { department_id } => {
            profile::user_ids_by_department(pool, *department_id).await?
        }
        BroadcastTarget::Shop { shop_id } => shop::owner_user_id(pool, *shop_id)
            .await?
            .into_iter()
            .collect(),
        // Taken verbatim; a non-existent id simply yields zero
        // notifications downstream.
        BroadcastTarget::User { user_id } => vec![*user_id],
    };

    let unique: BTreeSet<i64> = ids.into_iter().collect();
    Ok(unique.into_iter().collect())
}

//! Transition application
//!
//! Every transition re-reads the current status before validating and
//! writes through a compare-and-swap UPDATE, so two concurrent admins
//! cannot both win the same edge. The notification emit happens after
//! the write and is best-effort.

use shared::models::{Demand, DemandStatus, EntityKind, Order, OrderStatus, ShopOrder};
use sqlx::SqlitePool;

use crate::auth::CurrentUser;
use crate::db::repository::{demand, order, shop_order};
use crate::notify::{Dispatcher, StatusChangedEvent};
use crate::utils::{AppError, AppResult};

/// Apply a status transition to a peer-to-peer order.
pub async fn transition_order(
    pool: &SqlitePool,
    dispatcher: &Dispatcher,
    actor: &CurrentUser,
    id: i64,
    target: OrderStatus,
    notes: Option<&str>,
) -> AppResult<Order> {
    actor.require_admin()?;

    let current = order::find_by_id(pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Order {id} not found")))?;

    // Idempotent retry: requesting the current status is a no-op success.
    if current.status == target {
        return Ok(current);
    }

    if !super::transitions::order_can_move(current.status, target) {
        return Err(AppError::InvalidTransition(format!(
            "Order cannot move from {} to {}",
            current.status, target
        )));
    }

    let won = order::update_status_cas(pool, id, current.status, target, notes).await?;
    let updated = order::find_by_id(pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Order {id} not found")))?;

    if !won {
        // A concurrent writer moved the row between read and write.
        if updated.status == target {
            return Ok(updated);
        }
        return Err(AppError::InvalidTransition(format!(
            "Order cannot move from {} to {}",
            updated.status, target
        )));
    }

    dispatcher
        .status_changed(StatusChangedEvent {
            kind: EntityKind::Order,
            entity_id: id,
            owner_user_id: updated.owner_user_id,
            new_status: target.to_string(),
        })
        .await;

    Ok(updated)
}

/// Apply a status transition to a shop order. Same table as orders.
pub async fn transition_shop_order(
    pool: &SqlitePool,
    dispatcher: &Dispatcher,
    actor: &CurrentUser,
    id: i64,
    target: OrderStatus,
    notes: Option<&str>,
) -> AppResult<ShopOrder> {
    actor.require_admin()?;

    let current = shop_order::find_by_id(pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Shop order {id} not found")))?;

    if current.status == target {
        return Ok(current);
    }

    if !super::transitions::order_can_move(current.status, target) {
        return Err(AppError::InvalidTransition(format!(
            "Shop order cannot move from {} to {}",
            current.status, target
        )));
    }

    let won = shop_order::update_status_cas(pool, id, current.status, target, notes).await?;
    let updated = shop_order::find_by_id(pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Shop order {id} not found")))?;

    if !won {
        if updated.status == target {
            return Ok(updated);
        }
        return Err(AppError::InvalidTransition(format!(
            "Shop order cannot move from {} to {}",
            updated.status, target
        )));
    }

    dispatcher
        .status_changed(StatusChangedEvent {
            kind: EntityKind::ShopOrder,
            entity_id: id,
            owner_user_id: updated.owner_user_id,
            new_status: target.to_string(),
        })
        .await;

    Ok(updated)
}

/// Apply a status transition to a book demand.
pub async fn transition_demand(
    pool: &SqlitePool,
    dispatcher: &Dispatcher,
    actor: &CurrentUser,
    id: i64,
    target: DemandStatus,
    notes: Option<&str>,
) -> AppResult<Demand> {
    actor.require_admin()?;

    let current = demand::find_by_id(pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Demand {id} not found")))?;

    if current.status == target {
        return Ok(current);
    }

    if !super::transitions::demand_can_move(current.status, target) {
        return Err(AppError::InvalidTransition(format!(
            "Demand cannot move from {} to {}",
            current.status, target
        )));
    }

    let won = demand::update_status_cas(pool, id, current.status, target, notes).await?;
    let updated = demand::find_by_id(pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Demand {id} not found")))?;

    if !won {
        if updated.status == target {
            return Ok(updated);
        }
        return Err(AppError::InvalidTransition(format!(
            "Demand cannot move from {} to {}",
            updated.status, target
        )));
    }

    dispatcher
        .status_changed(StatusChangedEvent {
            kind: EntityKind::Demand,
            entity_id: id,
            owner_user_id: updated.owner_user_id,
            new_status: target.to_string(),
        })
        .await;

    Ok(updated)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ServerState;
    use crate::db::repository::{notification, user};
    use shared::models::{BookCreate, OrderCreate, Role};

    async fn seed_order(state: &ServerState) -> Order {
        let buyer = user::create(state.pool(), "Buyer", "01710000001", None, "x", Role::User)
            .await
            .unwrap();
        let seller = user::create(state.pool(), "Seller", "01710000002", None, "x", Role::User)
            .await
            .unwrap();
        let book = crate::db::repository::book::create(
            state.pool(),
            seller.id,
            BookCreate {
                title: "Organic Chemistry".to_string(),
                author: None,
                price: 650,
                condition: None,
                description: None,
                contact_phone: "01710000002".to_string(),
                institution_id: None,
                department_id: None,
            },
        )
        .await
        .unwrap();
        order::create(
            state.pool(),
            buyer.id,
            OrderCreate {
                book_id: book.id,
                delivery_address: "Curzon Hall".to_string(),
                delivery_phone: "01710000001".to_string(),
            },
        )
        .await
        .unwrap()
    }

    #[tokio::test]
    async fn same_status_request_is_a_noop_success() {
        let state = ServerState::initialize_in_memory().await.unwrap();
        let admin = CurrentUser::test_admin();
        let placed = seed_order(&state).await;

        let result = transition_order(
            state.pool(),
            &state.dispatcher,
            &admin,
            placed.id,
            OrderStatus::Pending,
            None,
        )
        .await
        .unwrap();
        assert_eq!(result.status, OrderStatus::Pending);
        assert_eq!(result.updated_at, placed.updated_at);

        // No event for a no-op
        let rows = notification::list_by_recipient(state.pool(), placed.owner_user_id, 10, 0)
            .await
            .unwrap();
        assert!(rows.is_empty());
    }

    #[tokio::test]
    async fn non_adjacent_target_is_rejected() {
        let state = ServerState::initialize_in_memory().await.unwrap();
        let admin = CurrentUser::test_admin();
        let placed = seed_order(&state).await;

        let err = transition_order(
            state.pool(),
            &state.dispatcher,
            &admin,
            placed.id,
            OrderStatus::Delivered,
            None,
        )
        .await
        .unwrap_err();
        assert!(matches!(err, AppError::InvalidTransition(_)));
    }

    #[tokio::test]
    async fn non_admin_actor_is_rejected_before_any_read() {
        let state = ServerState::initialize_in_memory().await.unwrap();
        let user = CurrentUser::test_user(99);

        // Entity does not even exist; the role check fires first.
        let err = transition_order(
            state.pool(),
            &state.dispatcher,
            &user,
            12345,
            OrderStatus::Confirmed,
            None,
        )
        .await
        .unwrap_err();
        assert!(matches!(err, AppError::Forbidden(_)));
    }

    #[tokio::test]
    async fn state_change_notifies_the_owner() {
        let state = ServerState::initialize_in_memory().await.unwrap();
        let admin = CurrentUser::test_admin();
        let placed = seed_order(&state).await;

        let updated = transition_order(
            state.pool(),
            &state.dispatcher,
            &admin,
            placed.id,
            OrderStatus::Confirmed,
            Some("stock checked"),
        )
        .await
        .unwrap();
        assert_eq!(updated.status, OrderStatus::Confirmed);
        assert_eq!(updated.admin_notes.as_deref(), Some("stock checked"));

        let rows = notification::list_by_recipient(state.pool(), placed.owner_user_id, 10, 0)
            .await
            .unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].reference_id, Some(placed.id));
    }

    #[tokio::test]
    async fn full_walk_to_delivered() {
        let state = ServerState::initialize_in_memory().await.unwrap();
        let admin = CurrentUser::test_admin();
        let placed = seed_order(&state).await;

        for step in [
            OrderStatus::Confirmed,
            OrderStatus::Processing,
            OrderStatus::OutForDelivery,
            OrderStatus::Delivered,
        ] {
            let updated = transition_order(
                state.pool(),
                &state.dispatcher,
                &admin,
                placed.id,
                step,
                None,
            )
            .await
            .unwrap();
            assert_eq!(updated.status, step);
        }

        // Delivered is terminal
        let err = transition_order(
            state.pool(),
            &state.dispatcher,
            &admin,
            placed.id,
            OrderStatus::Cancelled,
            None,
        )
        .await
        .unwrap_err();
        assert!(matches!(err, AppError::InvalidTransition(_)));
    }
}

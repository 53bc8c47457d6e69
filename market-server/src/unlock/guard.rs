//! Unlock payment lifecycle operations.

use shared::models::{NotificationKind, UnlockDecision, UnlockPayment};
use sqlx::SqlitePool;

use crate::auth::CurrentUser;
use crate::db::repository::{RepoError, book, unlock_payment};
use crate::notify::Dispatcher;
use crate::utils::{AppError, AppResult};

/// Fee for books priced at or above this many taka.
const FEE_TIER_THRESHOLD: i64 = 500;
const FEE_HIGH: i64 = 20;
const FEE_LOW: i64 = 10;

/// Flat two-tier verification fee schedule.
pub fn unlock_fee(price: i64) -> i64 {
    if price >= FEE_TIER_THRESHOLD {
        FEE_HIGH
    } else {
        FEE_LOW
    }
}

/// Create an unlock payment for the acting user and the given book.
///
/// Rejects with `DuplicateUnlock` while a pending or approved payment for
/// the same (user, book) pair exists; a previously rejected payment does
/// not block. The partial unique index catches the insert race, which is
/// reported the same way.
pub async fn create_unlock(
    pool: &SqlitePool,
    actor: &CurrentUser,
    book_id: i64,
    bkash_number: &str,
) -> AppResult<UnlockPayment> {
    let book = book::find_by_id(pool, book_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Book {book_id} not found")))?;

    if unlock_payment::find_active_by_user_book(pool, actor.user_id, book_id)
        .await?
        .is_some()
    {
        return Err(AppError::DuplicateUnlock);
    }

    let amount = unlock_fee(book.price);
    match unlock_payment::create(pool, actor.user_id, book_id, amount, bkash_number).await {
        Ok(payment) => {
            tracing::info!(
                user_id = actor.user_id,
                book_id,
                amount,
                transaction = %payment.transaction_number,
                "Unlock payment submitted"
            );
            Ok(payment)
        }
        // Lost the insert race against a concurrent attempt
        Err(RepoError::Duplicate(_)) => Err(AppError::DuplicateUnlock),
        Err(e) => Err(e.into()),
    }
}

/// Admin verdict on a pending payment. Terminal, strictly once.
pub async fn resolve_payment(
    pool: &SqlitePool,
    dispatcher: &Dispatcher,
    actor: &CurrentUser,
    payment_id: i64,
    decision: UnlockDecision,
    notes: Option<&str>,
) -> AppResult<UnlockPayment> {
    actor.require_admin()?;

    let payment = unlock_payment::find_by_id(pool, payment_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Payment {payment_id} not found")))?;

    let won = unlock_payment::resolve_cas(pool, payment_id, decision.as_status(), notes).await?;
    if !won {
        // Row exists but is no longer pending
        return Err(AppError::AlreadyResolved);
    }

    let updated = unlock_payment::find_by_id(pool, payment_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Payment {payment_id} not found")))?;

    let (title, message) = match decision {
        UnlockDecision::Approved => (
            "Contact unlocked",
            format!(
                "Your payment {} was verified. The seller contact is now visible to you.",
                updated.transaction_number
            ),
        ),
        UnlockDecision::Rejected => (
            "Payment rejected",
            format!(
                "Your payment {} could not be verified. You may submit a new attempt.",
                updated.transaction_number
            ),
        ),
    };
    if let Err(e) = dispatcher
        .dispatch_targeted(
            payment.user_id,
            title,
            &message,
            NotificationKind::UnlockPayment,
            Some("unlock_payment"),
            Some(payment_id),
        )
        .await
    {
        tracing::warn!(payment_id, error = %e, "Payment-resolved notification write failed");
    }

    Ok(updated)
}

/// Payer requests a refund on an approved payment. Succeeds exactly once.
pub async fn request_refund(
    pool: &SqlitePool,
    actor: &CurrentUser,
    payment_id: i64,
) -> AppResult<UnlockPayment> {
    let payment = unlock_payment::find_by_id(pool, payment_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Payment {payment_id} not found")))?;

    if payment.user_id != actor.user_id {
        return Err(AppError::Forbidden(
            "Only the payer may request a refund".to_string(),
        ));
    }

    let won = unlock_payment::request_refund_cas(pool, payment_id).await?;
    if !won {
        // Work out which precondition failed from the fresh row.
        let fresh = unlock_payment::find_by_id(pool, payment_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Payment {payment_id} not found")))?;
        return Err(match (fresh.refund_requested, fresh.refund_approved) {
            (true, None) => AppError::RefundAlreadyPending,
            (true, Some(_)) => AppError::RefundAlreadyResolved,
            _ => AppError::Validation(
                "Refunds can only be requested for an approved payment".to_string(),
            ),
        });
    }

    let updated = unlock_payment::find_by_id(pool, payment_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Payment {payment_id} not found")))?;
    Ok(updated)
}

/// Admin decision on a requested refund. Terminal either way — a denied
/// refund cannot be re-requested.
pub async fn resolve_refund(
    pool: &SqlitePool,
    dispatcher: &Dispatcher,
    actor: &CurrentUser,
    payment_id: i64,
    approved: bool,
    notes: Option<&str>,
) -> AppResult<UnlockPayment> {
    actor.require_admin()?;

    let payment = unlock_payment::find_by_id(pool, payment_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Payment {payment_id} not found")))?;

    let won = unlock_payment::resolve_refund_cas(pool, payment_id, approved, notes).await?;
    if !won {
        if !payment.refund_requested {
            return Err(AppError::Validation(
                "No refund has been requested for this payment".to_string(),
            ));
        }
        return Err(AppError::RefundAlreadyResolved);
    }

    let updated = unlock_payment::find_by_id(pool, payment_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Payment {payment_id} not found")))?;

    let (title, message) = if approved {
        (
            "Refund approved",
            format!(
                "Your refund for payment {} was approved.",
                updated.transaction_number
            ),
        )
    } else {
        (
            "Refund denied",
            format!(
                "Your refund request for payment {} was denied.",
                updated.transaction_number
            ),
        )
    };
    if let Err(e) = dispatcher
        .dispatch_targeted(
            payment.user_id,
            title,
            &message,
            NotificationKind::UnlockRefund,
            Some("unlock_payment"),
            Some(payment_id),
        )
        .await
    {
        tracing::warn!(payment_id, error = %e, "Refund-resolved notification write failed");
    }

    Ok(updated)
}

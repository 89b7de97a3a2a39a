//! Tutor wallet handlers

use axum::extract::State;
use axum::Json;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::error::ApiResult;
use crate::extractors::Caller;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct WalletResponse {
    pub balance: Decimal,
    pub pending_balance: Decimal,
    pub total_earned: Decimal,
}

/// GET /api/v1/wallet
///
/// Wallets are created lazily on first completed lesson; a tutor with no
/// completions sees zeroes.
pub async fn get_wallet(
    State(state): State<AppState>,
    Caller(actor): Caller,
) -> ApiResult<Json<WalletResponse>> {
    let wallet = state.booking.wallet(&actor).await?;

    Ok(Json(match wallet {
        Some(w) => WalletResponse {
            balance: w.balance,
            pending_balance: w.pending_balance,
            total_earned: w.total_earned,
        },
        None => WalletResponse {
            balance: Decimal::ZERO,
            pending_balance: Decimal::ZERO,
            total_earned: Decimal::ZERO,
        },
    }))
}

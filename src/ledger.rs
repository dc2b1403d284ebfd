//! Position ledger arithmetic: one manual trade event applied to a
//! running (quantity, average entry price) aggregate. Pure so the
//! invariants are testable without a database.

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PositionState {
    pub qty: i64,
    pub avg_px: f64,
}

#[derive(Debug, Error, PartialEq)]
pub enum TradeError {
    #[error("Cannot sell a security you do not have a position in.")]
    NoPosition,

    #[error("Cannot sell more shares than you currently own.")]
    Oversell { current_qty: i64 },
}

/// Apply one signed trade to an optional existing position.
///
/// Buys blend the average entry price quantity-weighted. Sells never
/// touch the average unless the position closes out completely, in
/// which case both quantity and average reset to zero.
pub fn apply_trade(
    existing: Option<PositionState>,
    qty: i64,
    px: f64,
) -> Result<PositionState, TradeError> {
    let Some(position) = existing else {
        if qty < 0 {
            return Err(TradeError::NoPosition);
        }
        return Ok(PositionState {
            qty: qty.max(0),
            avg_px: px,
        });
    };

    let total_qty = position.qty + qty;

    if qty < 0 {
        if total_qty < 0 {
            return Err(TradeError::Oversell {
                current_qty: position.qty,
            });
        }
        if total_qty == 0 {
            return Ok(PositionState {
                qty: 0,
                avg_px: 0.0,
            });
        }
        // Partial sell: quantity down, average entry price unchanged
        return Ok(PositionState {
            qty: total_qty,
            avg_px: position.avg_px,
        });
    }

    let avg_px = if total_qty != 0 {
        (position.qty as f64 * position.avg_px + qty as f64 * px) / total_qty as f64
    } else {
        0.0
    };

    Ok(PositionState {
        qty: total_qty,
        avg_px,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buy_without_position_creates_one_at_transaction_price() {
        let state = apply_trade(None, 100, 2.5).unwrap();
        assert_eq!(state, PositionState { qty: 100, avg_px: 2.5 });
    }

    #[test]
    fn buy_blends_average_price_quantity_weighted() {
        let existing = PositionState { qty: 100, avg_px: 2.0 };
        let state = apply_trade(Some(existing), 100, 4.0).unwrap();
        assert_eq!(state.qty, 200);
        assert!((state.avg_px - 3.0).abs() < 1e-12);
    }

    #[test]
    fn buy_into_closed_out_position_restarts_the_average() {
        let existing = PositionState { qty: 0, avg_px: 0.0 };
        let state = apply_trade(Some(existing), 50, 1.8).unwrap();
        assert_eq!(state.qty, 50);
        assert!((state.avg_px - 1.8).abs() < 1e-12);
    }

    #[test]
    fn partial_sell_keeps_average_price() {
        let existing = PositionState { qty: 100, avg_px: 2.0 };
        let state = apply_trade(Some(existing), -40, 5.0).unwrap();
        assert_eq!(state.qty, 60);
        assert!((state.avg_px - 2.0).abs() < 1e-12);
    }

    #[test]
    fn selling_exactly_the_held_quantity_zeroes_both_fields() {
        let existing = PositionState { qty: 100, avg_px: 2.0 };
        let state = apply_trade(Some(existing), -100, 5.0).unwrap();
        assert_eq!(state, PositionState { qty: 0, avg_px: 0.0 });
    }

    #[test]
    fn overselling_fails_and_reports_current_quantity() {
        let existing = PositionState { qty: 100, avg_px: 2.0 };
        let err = apply_trade(Some(existing), -101, 5.0).unwrap_err();
        assert_eq!(err, TradeError::Oversell { current_qty: 100 });
    }

    #[test]
    fn selling_without_a_position_fails() {
        let err = apply_trade(None, -10, 5.0).unwrap_err();
        assert_eq!(err, TradeError::NoPosition);
    }

    #[test]
    fn selling_from_an_empty_position_row_is_an_oversell() {
        let existing = PositionState { qty: 0, avg_px: 0.0 };
        let err = apply_trade(Some(existing), -1, 5.0).unwrap_err();
        assert_eq!(err, TradeError::Oversell { current_qty: 0 });
    }
}

//! Two-phase weapon purchase: quote, then confirm or cancel.
//!
//! The quote is held here rather than in [`GameState`], so quoting and
//! cancelling never touch the game state at all.

use crate::error::{GameError, GameResult};
use crate::event::GameEvent;
use crate::state::GameState;
use crate::tables::WeaponKind;

use super::{apply_weapon_purchase, weapon_quote};

/// A priced weapon offer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeaponQuote {
    /// The weapon on offer.
    pub weapon: WeaponKind,
    /// Its price in gold.
    pub price: u32,
}

/// State of the weapon purchase dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PurchaseFlow {
    /// No purchase in progress.
    #[default]
    Idle,
    /// A quote was shown and awaits an answer.
    AwaitingConfirmation {
        /// The offer being considered.
        quote: WeaponQuote,
    },
}

impl PurchaseFlow {
    /// The pending offer, if any.
    pub fn pending(&self) -> Option<WeaponQuote> {
        match self {
            Self::Idle => None,
            Self::AwaitingConfirmation { quote } => Some(*quote),
        }
    }

    /// Whether a quote is waiting for an answer.
    pub fn is_pending(&self) -> bool {
        self.pending().is_some()
    }

    /// Show a quote for the next weapon. Does not modify `state`.
    pub fn begin(&mut self, state: &GameState) -> GameResult<GameEvent> {
        if self.is_pending() {
            return Err(GameError::PurchasePending);
        }
        let quote = weapon_quote(state)?;
        *self = Self::AwaitingConfirmation { quote };
        Ok(GameEvent::QuoteOffered {
            weapon: quote.weapon,
            price: quote.price,
        })
    }

    /// Accept the pending quote. The flow returns to idle either way.
    ///
    /// The offer is re-validated against the current state; if it no longer
    /// holds, nothing is charged.
    pub fn confirm(&mut self, state: &mut GameState) -> GameResult<GameEvent> {
        let quote = self.pending().ok_or(GameError::NoPendingPurchase)?;
        *self = Self::Idle;
        let current = weapon_quote(state)?;
        if current != quote {
            return Err(GameError::QuoteExpired(quote.weapon));
        }
        Ok(apply_weapon_purchase(state, quote))
    }

    /// Drop the pending quote.
    pub fn cancel(&mut self) -> GameResult<GameEvent> {
        let quote = self.pending().ok_or(GameError::NoPendingPurchase)?;
        *self = Self::Idle;
        Ok(GameEvent::QuoteCancelled {
            weapon: quote.weapon,
        })
    }
}

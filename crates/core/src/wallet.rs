//! Simulated MYR wallet.

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Balance the demo starts every session with.
pub const DEFAULT_STARTING_BALANCE: f64 = 210.0;

/// Top-up buttons offered by the wallet page.
pub const DEFAULT_TOP_UP_AMOUNTS: [u32; 6] = [5, 10, 20, 50, 100, 200];

/// Display-only coupon shown next to the cash balance.
pub const DEMO_COUPON_MYR: u32 = 20;
/// Display-only loyalty points.
pub const DEMO_POINTS: u32 = 10;

/// In-memory cash balance that never drops below zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WalletLedger {
    balance: f64,
}

impl Default for WalletLedger {
    fn default() -> Self {
        Self::new(DEFAULT_STARTING_BALANCE)
    }
}

impl WalletLedger {
    /// Negative or non-finite starting balances are treated as zero.
    pub fn new(starting_balance: f64) -> Self {
        let balance = if starting_balance.is_finite() {
            starting_balance.max(0.0)
        } else {
            0.0
        };
        Self { balance }
    }

    /// Current balance in MYR.
    pub fn balance(&self) -> f64 {
        self.balance
    }

    /// Add `amount` to the balance. Non-positive amounts are ignored.
    pub fn credit(&mut self, amount: f64) -> bool {
        if !(amount.is_finite() && amount > 0.0) {
            debug!(amount, "Ignoring non-positive credit");
            return false;
        }
        self.balance += amount;
        debug!(amount, balance = self.balance, "Wallet credited");
        true
    }

    /// Subtract up to `amount`, stopping at zero, and return what was taken.
    pub fn debit(&mut self, amount: f64) -> f64 {
        if !(amount.is_finite() && amount > 0.0) {
            debug!(amount, "Ignoring non-positive debit");
            return 0.0;
        }
        let taken = amount.min(self.balance);
        self.balance -= taken;
        debug!(requested = amount, taken, balance = self.balance, "Wallet debited");
        taken
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn credit_then_debit() {
        let mut wallet = WalletLedger::new(210.0);
        assert!(wallet.credit(20.0));
        assert_eq!(wallet.debit(15.0), 15.0);
        assert_eq!(wallet.balance(), 215.0);
    }

    #[test]
    fn debit_clamps_at_zero() {
        let mut wallet = WalletLedger::new(5.0);
        assert_eq!(wallet.debit(1000.0), 5.0);
        assert_eq!(wallet.balance(), 0.0);
        assert_eq!(wallet.debit(1.0), 0.0);
        assert_eq!(wallet.balance(), 0.0);
    }

    #[test]
    fn non_positive_amounts_are_ignored() {
        let mut wallet = WalletLedger::new(50.0);
        assert!(!wallet.credit(0.0));
        assert!(!wallet.credit(-10.0));
        assert!(!wallet.credit(f64::NAN));
        assert_eq!(wallet.debit(-10.0), 0.0);
        assert_eq!(wallet.debit(f64::INFINITY), 0.0);
        assert_eq!(wallet.balance(), 50.0);
    }

    #[test]
    fn starts_from_demo_balance() {
        assert_eq!(WalletLedger::default().balance(), 210.0);
        assert_eq!(WalletLedger::new(-4.0).balance(), 0.0);
    }
}

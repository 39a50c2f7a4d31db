// ═══════════════════════════════════════════════════════════════════
// Ledger Tests — LedgerService add/remove, Ledger views, input parsing
// ═══════════════════════════════════════════════════════════════════

use portfolio_tracker_core::errors::CoreError;
use portfolio_tracker_core::models::ledger::{Holding, Ledger};
use portfolio_tracker_core::services::ledger_service::LedgerService;

fn setup() -> (LedgerService, Ledger) {
    (LedgerService::new(), Ledger::new())
}

// ── add ─────────────────────────────────────────────────────────────

mod add {
    use super::*;

    #[test]
    fn creates_new_holding() {
        let (svc, mut ledger) = setup();
        assert_eq!(svc.add(&mut ledger, "AAPL", 10).unwrap(), 10);
        assert_eq!(ledger.quantity_of("AAPL"), Some(10));
        assert_eq!(ledger.len(), 1);
    }

    #[test]
    fn accumulates_over_repeated_adds() {
        let (svc, mut ledger) = setup();
        let quantities = [3, 7, 1, 12, 5];
        for q in quantities {
            svc.add(&mut ledger, "MSFT", q).unwrap();
        }
        let expected: i64 = quantities.iter().sum();
        assert_eq!(ledger.quantity_of("MSFT"), Some(expected as u64));
        assert_eq!(ledger.len(), 1);
    }

    #[test]
    fn symbols_are_case_insensitive() {
        let (svc, mut ledger) = setup();
        svc.add(&mut ledger, "aapl", 2).unwrap();
        svc.add(&mut ledger, " AaPl ", 3).unwrap();
        assert_eq!(ledger.snapshot().get("AAPL"), Some(&5));
        assert_eq!(ledger.len(), 1);
    }

    #[test]
    fn rejects_zero() {
        let (svc, mut ledger) = setup();
        let err = svc.add(&mut ledger, "AAPL", 0).unwrap_err();
        assert!(matches!(err, CoreError::InvalidQuantity(_)));
        assert!(ledger.is_empty());
    }

    #[test]
    fn rejects_negative_without_touching_existing() {
        let (svc, mut ledger) = setup();
        svc.add(&mut ledger, "AAPL", 4).unwrap();
        let err = svc.add(&mut ledger, "AAPL", -2).unwrap_err();
        assert!(matches!(err, CoreError::InvalidQuantity(_)));
        assert_eq!(ledger.quantity_of("AAPL"), Some(4));
    }

    #[test]
    fn rejects_blank_symbol() {
        let (svc, mut ledger) = setup();
        assert!(matches!(
            svc.add(&mut ledger, "   ", 1),
            Err(CoreError::InvalidSymbol(_))
        ));
        assert!(matches!(
            svc.add(&mut ledger, "BRK B", 1),
            Err(CoreError::InvalidSymbol(_))
        ));
        assert!(ledger.is_empty());
    }

    #[test]
    fn overflow_is_rejected() {
        let (svc, mut ledger) = setup();
        svc.add(&mut ledger, "AAPL", i64::MAX).unwrap();
        svc.add(&mut ledger, "AAPL", i64::MAX).unwrap();
        let err = svc.add(&mut ledger, "AAPL", i64::MAX).unwrap_err();
        assert!(matches!(err, CoreError::InvalidQuantity(_)));
        assert_eq!(ledger.quantity_of("AAPL"), Some(2 * i64::MAX as u64));
    }
}

// ── remove ──────────────────────────────────────────────────────────

mod remove {
    use super::*;

    #[test]
    fn decrements_holding() {
        let (svc, mut ledger) = setup();
        svc.add(&mut ledger, "AAPL", 10).unwrap();
        assert_eq!(svc.remove(&mut ledger, "AAPL", 4).unwrap(), 6);
        assert_eq!(ledger.quantity_of("AAPL"), Some(6));
    }

    #[test]
    fn removing_everything_deletes_entry() {
        let (svc, mut ledger) = setup();
        svc.add(&mut ledger, "AAPL", 10).unwrap();
        svc.add(&mut ledger, "MSFT", 1).unwrap();
        assert_eq!(svc.remove(&mut ledger, "AAPL", 10).unwrap(), 0);
        assert!(!ledger.snapshot().contains_key("AAPL"));
        assert_eq!(ledger.quantity_of("AAPL"), None);
        assert_eq!(ledger.len(), 1);
    }

    #[test]
    fn no_zero_entries_after_stepwise_removal() {
        let (svc, mut ledger) = setup();
        svc.add(&mut ledger, "TSLA", 3).unwrap();
        for _ in 0..3 {
            svc.remove(&mut ledger, "TSLA", 1).unwrap();
        }
        assert!(ledger.is_empty());
        assert!(ledger.snapshot().values().all(|q| *q > 0));
    }

    #[test]
    fn absent_symbol_is_not_held() {
        let (svc, mut ledger) = setup();
        svc.add(&mut ledger, "AAPL", 1).unwrap();
        let before = ledger.clone();
        let err = svc.remove(&mut ledger, "GOOG", 1).unwrap_err();
        assert!(matches!(err, CoreError::SymbolNotHeld(ref s) if s == "GOOG"));
        assert_eq!(ledger, before);
    }

    #[test]
    fn insufficient_shares_leaves_ledger_unchanged() {
        let (svc, mut ledger) = setup();
        svc.add(&mut ledger, "AAPL", 5).unwrap();
        let before = ledger.clone();
        let err = svc.remove(&mut ledger, "AAPL", 6).unwrap_err();
        match err {
            CoreError::InsufficientShares {
                symbol,
                held,
                requested,
            } => {
                assert_eq!(symbol, "AAPL");
                assert_eq!(held, 5);
                assert_eq!(requested, 6);
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(ledger, before);
    }

    #[test]
    fn rejects_non_positive_quantity() {
        let (svc, mut ledger) = setup();
        svc.add(&mut ledger, "AAPL", 5).unwrap();
        assert!(matches!(
            svc.remove(&mut ledger, "AAPL", 0),
            Err(CoreError::InvalidQuantity(_))
        ));
        assert!(matches!(
            svc.remove(&mut ledger, "AAPL", -1),
            Err(CoreError::InvalidQuantity(_))
        ));
        assert_eq!(ledger.quantity_of("AAPL"), Some(5));
    }

    #[test]
    fn lowercase_symbol_matches() {
        let (svc, mut ledger) = setup();
        svc.add(&mut ledger, "AAPL", 5).unwrap();
        svc.remove(&mut ledger, "aapl", 2).unwrap();
        assert_eq!(ledger.quantity_of("aapl"), Some(3));
    }
}

// ── views ───────────────────────────────────────────────────────────

mod views {
    use super::*;

    #[test]
    fn new_ledger_is_empty() {
        let ledger = Ledger::new();
        assert!(ledger.is_empty());
        assert!(ledger.snapshot().is_empty());
        assert!(ledger.holdings().is_empty());
    }

    #[test]
    fn holdings_sorted_by_symbol() {
        let (svc, mut ledger) = setup();
        svc.add(&mut ledger, "MSFT", 2).unwrap();
        svc.add(&mut ledger, "AAPL", 1).unwrap();
        assert_eq!(
            ledger.holdings(),
            vec![
                Holding {
                    symbol: "AAPL".into(),
                    quantity: 1
                },
                Holding {
                    symbol: "MSFT".into(),
                    quantity: 2
                },
            ]
        );
    }
}

// ── parse_quantity ──────────────────────────────────────────────────

mod parse_quantity {
    use super::*;

    #[test]
    fn accepts_positive_integers() {
        assert_eq!(LedgerService::parse_quantity("10").unwrap(), 10);
        assert_eq!(LedgerService::parse_quantity("  7\n").unwrap(), 7);
    }

    #[test]
    fn rejects_everything_else() {
        for input in ["", "0", "-5", "2.5", "ten", "1e3"] {
            assert!(
                matches!(
                    LedgerService::parse_quantity(input),
                    Err(CoreError::InvalidQuantity(_))
                ),
                "{input:?} should be rejected"
            );
        }
    }

    #[test]
    fn normalize_symbol_uppercases() {
        assert_eq!(LedgerService::normalize_symbol(" brk.b ").unwrap(), "BRK.B");
    }
}

pub mod ledger_service;
pub mod valuation_service;

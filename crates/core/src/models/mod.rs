pub mod history;
pub mod ledger;
pub mod price;
pub mod settings;
pub mod valuation;

use std::io::{self, BufRead, Write};

use chrono::NaiveDate;
use portfolio_tracker_core::errors::CoreError;
use portfolio_tracker_core::models::valuation::PortfolioValuation;
use portfolio_tracker_core::services::ledger_service::LedgerService;
use portfolio_tracker_core::PortfolioTracker;

const MENU: &str = "\nStock Portfolio Tracker
1. Add Stock
2. Remove Stock
3. View Portfolio Value
4. View Historical Performance
5. Exit
6. Show Holdings
7. View Portfolio Value on Date";

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Format an amount as dollars with two decimals, e.g. `$255.00`.
pub fn format_currency(value: f64) -> String {
    format!("${value:.2}")
}

/// Interactive menu loop over any line-based input and output.
///
/// Only I/O failures end the loop early; every bad entry or provider
/// failure is reported and the menu is shown again.
pub struct Shell<R, W> {
    tracker: PortfolioTracker,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Shell<R, W> {
    pub fn new(tracker: PortfolioTracker, input: R, output: W) -> Self {
        Self {
            tracker,
            input,
            output,
        }
    }

    /// Run until "Exit" is chosen or the input ends.
    pub async fn run(&mut self) -> io::Result<()> {
        loop {
            writeln!(self.output, "{}", MENU)?;
            let Some(choice) = self.prompt("Enter your choice: ")? else {
                break;
            };

            let keep_going = match choice.as_str() {
                "1" => self.add_stock()?,
                "2" => self.remove_stock()?,
                "3" => self.show_value().await?,
                "4" => self.show_history().await?,
                "5" => false,
                "6" => self.show_holdings()?,
                "7" => self.show_value_on_date().await?,
                _ => {
                    writeln!(self.output, "Invalid choice. Please try again.")?;
                    true
                }
            };
            if !keep_going {
                break;
            }
        }
        writeln!(self.output, "Exiting...")?;
        self.output.flush()
    }

    // Each action returns Ok(false) when the input ran out mid-action.

    fn add_stock(&mut self) -> io::Result<bool> {
        let Some((symbol, quantity)) =
            self.read_order("Enter stock symbol: ", "Enter quantity: ")?
        else {
            return Ok(false);
        };
        match quantity.and_then(|q| self.tracker.add_holding(&symbol, q).map(|_| q)) {
            Ok(q) => writeln!(
                self.output,
                "Added {q} shares of {} to your portfolio.",
                symbol.to_uppercase()
            )?,
            Err(e) => self.report(&e)?,
        }
        Ok(true)
    }

    fn remove_stock(&mut self) -> io::Result<bool> {
        let Some((symbol, quantity)) = self.read_order(
            "Enter stock symbol to remove: ",
            "Enter quantity to remove: ",
        )?
        else {
            return Ok(false);
        };
        match quantity.and_then(|q| self.tracker.remove_holding(&symbol, q).map(|_| q)) {
            Ok(q) => writeln!(
                self.output,
                "Removed {q} shares of {} from your portfolio.",
                symbol.to_uppercase()
            )?,
            Err(e) => self.report(&e)?,
        }
        Ok(true)
    }

    async fn show_value(&mut self) -> io::Result<bool> {
        let valuation = self.tracker.current_value().await;
        self.report_valuation(&valuation)?;
        writeln!(
            self.output,
            "Your portfolio value is: {}",
            format_currency(valuation.total)
        )?;
        Ok(true)
    }

    async fn show_value_on_date(&mut self) -> io::Result<bool> {
        let Some(date) = self.prompt("Enter date (YYYY-MM-DD): ")? else {
            return Ok(false);
        };
        let date = match parse_date(&date) {
            Ok(date) => date,
            Err(e) => {
                self.report(&e)?;
                return Ok(true);
            }
        };
        let valuation = self.tracker.value_on_date(date).await;
        self.report_valuation(&valuation)?;
        writeln!(
            self.output,
            "Your portfolio value on {date} was: {}",
            format_currency(valuation.total)
        )?;
        Ok(true)
    }

    async fn show_history(&mut self) -> io::Result<bool> {
        let Some(start) = self.prompt("Enter start date (YYYY-MM-DD): ")? else {
            return Ok(false);
        };
        let Some(end) = self.prompt("Enter end date (YYYY-MM-DD): ")? else {
            return Ok(false);
        };

        let range = parse_date(&start).and_then(|s| parse_date(&end).map(|e| (s, e)));
        let result = match range {
            Ok((start, end)) => self.tracker.historical_series(start, end).await,
            Err(e) => Err(e),
        };

        match result {
            Ok(history) => {
                for warning in &history.warnings {
                    self.warn(warning)?;
                }
                if history.has_no_data() {
                    writeln!(self.output, "No historical data found for the specified period.")?;
                } else {
                    write!(self.output, "{}", history.to_table())?;
                }
            }
            Err(e) => self.report(&e)?,
        }
        Ok(true)
    }

    fn show_holdings(&mut self) -> io::Result<bool> {
        let holdings = self.tracker.holdings();
        if holdings.is_empty() {
            writeln!(self.output, "Your portfolio is empty.")?;
            return Ok(true);
        }
        let width = holdings.iter().map(|h| h.symbol.len()).max().unwrap_or(0);
        for holding in holdings {
            writeln!(
                self.output,
                "{:<width$}  {}",
                holding.symbol, holding.quantity
            )?;
        }
        Ok(true)
    }

    // ── Input helpers ───────────────────────────────────────────────

    /// Print `message` and read one trimmed line; `None` at end of input.
    fn prompt(&mut self, message: &str) -> io::Result<Option<String>> {
        write!(self.output, "{message}")?;
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    /// Read a symbol and a quantity. The quantity is parsed here so a bad
    /// entry is reported like any other ledger error.
    fn read_order(
        &mut self,
        symbol_prompt: &str,
        quantity_prompt: &str,
    ) -> io::Result<Option<(String, Result<i64, CoreError>)>> {
        let Some(symbol) = self.prompt(symbol_prompt)? else {
            return Ok(None);
        };
        let Some(quantity) = self.prompt(quantity_prompt)? else {
            return Ok(None);
        };
        Ok(Some((symbol, LedgerService::parse_quantity(&quantity))))
    }

    // ── Output helpers ──────────────────────────────────────────────

    fn report(&mut self, error: &CoreError) -> io::Result<()> {
        writeln!(self.output, "Error: {error}")
    }

    fn warn(&mut self, warning: &CoreError) -> io::Result<()> {
        writeln!(self.output, "Warning: {warning}")
    }

    fn report_valuation(&mut self, valuation: &PortfolioValuation) -> io::Result<()> {
        if valuation.is_complete() {
            return Ok(());
        }
        for warning in &valuation.warnings {
            self.warn(warning)?;
        }
        writeln!(
            self.output,
            "{} of {} holding(s) could not be priced and count as zero.",
            valuation.warnings.len(),
            valuation.contributions.len()
        )
    }
}

fn parse_date(input: &str) -> Result<NaiveDate, CoreError> {
    NaiveDate::parse_from_str(input.trim(), DATE_FORMAT).map_err(|_| {
        CoreError::ValidationError(format!("invalid date '{input}', expected YYYY-MM-DD"))
    })
}

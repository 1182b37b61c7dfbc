//! # DCA Backtest
//!
//! Single-asset dollar-cost-averaging backtest over a historical price
//! series. A standalone utility next to the routing engine; pure math, no
//! I/O, no portfolio accounting across assets.

use crate::domain::value_objects::{Price, Timestamp};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Investment cadence of a DCA plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DcaFrequency {
    /// Invest every day.
    Daily,
    /// Invest every 7 days.
    Weekly,
    /// Invest every calendar month.
    Monthly,
}

impl DcaFrequency {
    /// Returns the investment date following `current`.
    #[must_use]
    pub fn next(&self, current: Timestamp) -> Timestamp {
        match self {
            Self::Daily => current.add_days(1),
            Self::Weekly => current.add_days(7),
            Self::Monthly => current.add_months(1),
        }
    }
}

impl fmt::Display for DcaFrequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
        };
        write!(f, "{}", s)
    }
}

/// Parameters of a DCA backtest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DcaPlan {
    /// One-off investment at the start date (may be zero).
    pub initial_investment: Decimal,
    /// Amount invested at every recurring date.
    pub recurring_amount: Decimal,
    /// Investment cadence.
    pub frequency: DcaFrequency,
    /// First investment date.
    pub start: Timestamp,
    /// Last investment date (inclusive).
    pub end: Timestamp,
}

/// One point of the historical price series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricePoint {
    /// Observation instant.
    pub at: Timestamp,
    /// Observed price.
    pub price: Price,
}

/// One executed plan purchase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DcaTransaction {
    /// Purchase date.
    pub at: Timestamp,
    /// Fill price used.
    pub price: Price,
    /// Quote-currency amount invested.
    pub amount: Decimal,
    /// Units acquired by this purchase.
    pub units: Decimal,
    /// Units held after this purchase.
    pub cumulative_units: Decimal,
    /// Total invested after this purchase.
    pub cumulative_invested: Decimal,
    /// Holdings valued at this purchase's price.
    pub portfolio_value: Decimal,
}

/// Result of a DCA backtest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DcaReport {
    /// Total quote-currency amount invested.
    pub total_invested: Decimal,
    /// Holdings valued at the end-date price.
    pub final_value: Decimal,
    /// `final_value - total_invested`.
    pub total_return: Decimal,
    /// Total return as a percentage of the amount invested.
    pub total_return_pct: Decimal,
    /// Average cost per unit.
    pub average_cost: Decimal,
    /// Units held at the end.
    pub units: Decimal,
    /// Worst peak-to-trough drop of portfolio value, in percent.
    pub max_drawdown_pct: Decimal,
    /// Every executed purchase, in date order.
    pub transactions: Vec<DcaTransaction>,
}

/// Winner of a strategy comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComparisonWinner {
    /// The DCA schedule came out ahead.
    Dca,
    /// The single up-front purchase came out ahead.
    LumpSum,
    /// Both returned the same.
    Tie,
}

/// DCA versus investing the same total up front.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LumpSumComparison {
    /// Absolute return of the DCA schedule.
    pub dca_return: Decimal,
    /// Absolute return of the lump-sum purchase.
    pub lump_sum_return: Decimal,
    /// `dca_return - lump_sum_return`.
    pub difference: Decimal,
    /// Which strategy won.
    pub winner: ComparisonWinner,
}

/// Error type for DCA backtests.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DcaError {
    /// The price series has no points.
    #[error("price series is empty")]
    EmptyPriceSeries,

    /// The end date precedes the start date.
    #[error("backtest window ends before it starts")]
    InvalidWindow,

    /// The plan never invested anything.
    #[error("plan invested nothing over the window")]
    NothingInvested,
}

/// DCA backtest over a fixed price series.
#[derive(Debug, Clone)]
pub struct DcaBacktest {
    plan: DcaPlan,
    series: Vec<PricePoint>,
}

impl DcaBacktest {
    /// Creates a backtest, sorting the price series by date.
    #[must_use]
    pub fn new(plan: DcaPlan, mut series: Vec<PricePoint>) -> Self {
        series.sort_by_key(|point| point.at);
        Self { plan, series }
    }

    /// Runs the backtest.
    ///
    /// # Errors
    ///
    /// Returns [`DcaError`] when the series is empty, the window is
    /// inverted, or the plan never invests.
    pub fn run(&self) -> Result<DcaReport, DcaError> {
        if self.series.is_empty() {
            return Err(DcaError::EmptyPriceSeries);
        }
        if self.plan.end.is_before(&self.plan.start) {
            return Err(DcaError::InvalidWindow);
        }

        let mut transactions = Vec::new();
        let mut cumulative_units = Decimal::ZERO;
        let mut cumulative_invested = Decimal::ZERO;

        if self.plan.initial_investment > Decimal::ZERO {
            self.execute(
                self.plan.start,
                self.plan.initial_investment,
                &mut cumulative_units,
                &mut cumulative_invested,
                &mut transactions,
            );
        }

        if self.plan.recurring_amount > Decimal::ZERO {
            let mut current = self.plan.start;
            while current <= self.plan.end {
                self.execute(
                    current,
                    self.plan.recurring_amount,
                    &mut cumulative_units,
                    &mut cumulative_invested,
                    &mut transactions,
                );
                current = self.plan.frequency.next(current);
            }
        }

        if cumulative_invested <= Decimal::ZERO || cumulative_units <= Decimal::ZERO {
            return Err(DcaError::NothingInvested);
        }

        // The series is non-empty here, so a nearest point always exists.
        let final_price = self
            .price_at(self.plan.end)
            .map_or(Decimal::ZERO, |p| p.get());
        let final_value = cumulative_units * final_price;
        let total_return = final_value - cumulative_invested;

        Ok(DcaReport {
            total_invested: cumulative_invested,
            final_value,
            total_return,
            total_return_pct: total_return / cumulative_invested * Decimal::ONE_HUNDRED,
            average_cost: cumulative_invested / cumulative_units,
            units: cumulative_units,
            max_drawdown_pct: max_drawdown_pct(&transactions),
            transactions,
        })
    }

    /// Compares the plan with a single purchase of `amount` at the start.
    ///
    /// # Errors
    ///
    /// Propagates the same failures as [`DcaBacktest::run`].
    pub fn compare_with_lump_sum(&self, amount: Decimal) -> Result<LumpSumComparison, DcaError> {
        let report = self.run()?;

        let start_price = self
            .price_at(self.plan.start)
            .ok_or(DcaError::EmptyPriceSeries)?
            .get();
        let end_price = self
            .price_at(self.plan.end)
            .ok_or(DcaError::EmptyPriceSeries)?
            .get();

        let lump_sum_units = amount / start_price;
        let lump_sum_return = lump_sum_units * end_price - amount;
        let difference = report.total_return - lump_sum_return;

        let winner = match difference.cmp(&Decimal::ZERO) {
            std::cmp::Ordering::Greater => ComparisonWinner::Dca,
            std::cmp::Ordering::Less => ComparisonWinner::LumpSum,
            std::cmp::Ordering::Equal => ComparisonWinner::Tie,
        };

        Ok(LumpSumComparison {
            dca_return: report.total_return,
            lump_sum_return,
            difference,
            winner,
        })
    }

    fn execute(
        &self,
        at: Timestamp,
        amount: Decimal,
        cumulative_units: &mut Decimal,
        cumulative_invested: &mut Decimal,
        transactions: &mut Vec<DcaTransaction>,
    ) {
        let Some(price) = self.price_at(at) else {
            return;
        };

        let units = amount / price.get();
        *cumulative_units += units;
        *cumulative_invested += amount;

        transactions.push(DcaTransaction {
            at,
            price,
            amount,
            units,
            cumulative_units: *cumulative_units,
            cumulative_invested: *cumulative_invested,
            portfolio_value: *cumulative_units * price.get(),
        });
    }

    /// Nearest series point to `date` by absolute distance.
    fn price_at(&self, date: Timestamp) -> Option<Price> {
        self.series
            .iter()
            .min_by_key(|point| point.at.abs_diff_millis(&date))
            .map(|point| point.price)
    }
}

fn max_drawdown_pct(transactions: &[DcaTransaction]) -> Decimal {
    let mut peak = Decimal::MIN;
    let mut max_drawdown = Decimal::ZERO;

    for transaction in transactions {
        if transaction.portfolio_value > peak {
            peak = transaction.portfolio_value;
        }
        if peak > Decimal::ZERO {
            let drawdown = (peak - transaction.portfolio_value) / peak;
            if drawdown > max_drawdown {
                max_drawdown = drawdown;
            }
        }
    }

    max_drawdown * Decimal::ONE_HUNDRED
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    const DAY_MS: i64 = 86_400_000;

    fn ts(day: i64) -> Timestamp {
        Timestamp::from_millis(1_704_067_200_000 + day * DAY_MS).unwrap()
    }

    fn point(day: i64, price: f64) -> PricePoint {
        PricePoint {
            at: ts(day),
            price: Price::new(price).unwrap(),
        }
    }

    fn flat_series(price: f64, days: i64) -> Vec<PricePoint> {
        (0..=days).map(|d| point(d, price)).collect()
    }

    fn daily_plan(initial: i64, recurring: i64, days: i64) -> DcaPlan {
        DcaPlan {
            initial_investment: Decimal::from(initial),
            recurring_amount: Decimal::from(recurring),
            frequency: DcaFrequency::Daily,
            start: ts(0),
            end: ts(days),
        }
    }

    #[test]
    fn flat_prices_return_nothing() {
        let backtest = DcaBacktest::new(daily_plan(0, 100, 9), flat_series(50.0, 9));
        let report = backtest.run().unwrap();

        assert_eq!(report.total_invested, Decimal::from(1000));
        assert_eq!(report.final_value, Decimal::from(1000));
        assert_eq!(report.total_return, Decimal::ZERO);
        assert_eq!(report.average_cost, Decimal::from(50));
        assert_eq!(report.transactions.len(), 10);
    }

    #[test]
    fn rising_prices_profit() {
        // 100 on day 0 at 100, 100 on day 1 at 200; end value = 1.5 units * 200.
        let series = vec![point(0, 100.0), point(1, 200.0)];
        let backtest = DcaBacktest::new(daily_plan(0, 100, 1), series);
        let report = backtest.run().unwrap();

        assert_eq!(report.units, Decimal::new(15, 1));
        assert_eq!(report.final_value, Decimal::from(300));
        assert_eq!(report.total_return, Decimal::from(100));
        assert_eq!(report.total_return_pct, Decimal::from(50));
    }

    #[test]
    fn initial_investment_executes_at_start() {
        let backtest = DcaBacktest::new(daily_plan(500, 0, 5), flat_series(100.0, 5));
        let report = backtest.run().unwrap();

        assert_eq!(report.transactions.len(), 1);
        assert_eq!(report.units, Decimal::from(5));
    }

    #[test]
    fn weekly_cadence_spaces_purchases() {
        let plan = DcaPlan {
            initial_investment: Decimal::ZERO,
            recurring_amount: Decimal::from(100),
            frequency: DcaFrequency::Weekly,
            start: ts(0),
            end: ts(21),
        };
        let backtest = DcaBacktest::new(plan, flat_series(10.0, 21));
        let report = backtest.run().unwrap();
        assert_eq!(report.transactions.len(), 4); // days 0, 7, 14, 21
    }

    #[test]
    fn empty_series_is_an_error() {
        let backtest = DcaBacktest::new(daily_plan(0, 100, 5), Vec::new());
        assert_eq!(backtest.run(), Err(DcaError::EmptyPriceSeries));
    }

    #[test]
    fn inverted_window_is_an_error() {
        let mut plan = daily_plan(0, 100, 5);
        plan.end = ts(-1);
        let backtest = DcaBacktest::new(plan, flat_series(10.0, 5));
        assert_eq!(backtest.run(), Err(DcaError::InvalidWindow));
    }

    #[test]
    fn zero_amounts_invest_nothing() {
        let backtest = DcaBacktest::new(daily_plan(0, 0, 5), flat_series(10.0, 5));
        assert_eq!(backtest.run(), Err(DcaError::NothingInvested));
    }

    #[test]
    fn max_drawdown_captures_trough() {
        // Large initial position, then the price halves: the small recurring
        // buys cannot offset the mark-to-market loss.
        let series = vec![point(0, 100.0), point(1, 50.0), point(2, 100.0)];
        let backtest = DcaBacktest::new(daily_plan(1000, 100, 2), series);
        let report = backtest.run().unwrap();
        assert!(report.max_drawdown_pct > Decimal::from(30));
    }

    #[test]
    fn lump_sum_wins_in_monotonic_rally() {
        let series = vec![point(0, 100.0), point(1, 150.0), point(2, 200.0)];
        let backtest = DcaBacktest::new(daily_plan(0, 100, 2), series);
        let comparison = backtest
            .compare_with_lump_sum(Decimal::from(300))
            .unwrap();
        assert_eq!(comparison.winner, ComparisonWinner::LumpSum);
        assert!(comparison.difference < Decimal::ZERO);
    }

    #[test]
    fn unsorted_series_is_sorted_on_construction() {
        let series = vec![point(2, 200.0), point(0, 100.0), point(1, 150.0)];
        let backtest = DcaBacktest::new(daily_plan(0, 100, 2), series);
        let report = backtest.run().unwrap();
        assert_eq!(
            report.transactions.first().map(|t| t.price.get()),
            Some(Decimal::from(100))
        );
    }
}

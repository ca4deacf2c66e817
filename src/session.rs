//! One analysis run: validate, fetch, scan, report
//!
//! A run moves through `Validating → Fetching → Scanning → Done`. Every step
//! either advances or jumps straight to `Done` with a failure, so a run never
//! returns an error to its caller; the outcome is always an
//! [`AnalysisResult`].

use crate::calendar;
use crate::data::RateSource;
use crate::error::{FxProfitError, Result, ValidationError};
use crate::portfolio;
use crate::report::{AnalysisError, AnalysisReport, AnalysisResult};
use crate::series::RateSeries;
use crate::types::{Money, TradeDate};
use std::fmt;

/// Parameters of one analysis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnalysisParams {
    pub start: TradeDate,
    pub end: TradeDate,
    pub capital: Money,
}

impl AnalysisParams {
    /// Create new analysis parameters
    pub fn new(start: TradeDate, end: TradeDate, capital: Money) -> Self {
        Self {
            start,
            end,
            capital,
        }
    }

    /// Check the parameters against `today`; the first broken rule is
    /// reported, in the order capital, start, end, range.
    pub fn validate(&self, today: TradeDate) -> std::result::Result<(), ValidationError> {
        if self.capital <= Money::ZERO {
            return Err(ValidationError::NonPositiveCapital);
        }
        if self.start > today {
            return Err(ValidationError::StartDateInFuture);
        }
        if self.end > today {
            return Err(ValidationError::EndDateInFuture);
        }
        if self.start > self.end {
            return Err(ValidationError::StartAfterEnd);
        }
        Ok(())
    }
}

/// Where a run currently is
#[derive(Debug)]
pub enum RunState {
    Validating(AnalysisParams),
    Fetching(AnalysisParams),
    Scanning(AnalysisParams, Vec<RateSeries>),
    Done(AnalysisResult),
}

impl RunState {
    fn label(&self) -> &'static str {
        match self {
            RunState::Validating(_) => "validating",
            RunState::Fetching(_) => "fetching",
            RunState::Scanning(..) => "scanning",
            RunState::Done(_) => "done",
        }
    }
}

impl fmt::Display for RunState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Runs analyses against one rate source
pub struct AnalysisSession<'a> {
    source: &'a dyn RateSource,
    today: Option<TradeDate>,
}

impl<'a> AnalysisSession<'a> {
    /// Create a new session over `source`
    pub fn new(source: &'a dyn RateSource) -> Self {
        Self {
            source,
            today: None,
        }
    }

    /// Validate against a fixed date instead of the local calendar
    pub fn with_today(mut self, today: TradeDate) -> Self {
        self.today = Some(today);
        self
    }

    fn today(&self) -> TradeDate {
        self.today.unwrap_or_else(calendar::today)
    }

    /// Analyse `[start, end]` for `capital`
    pub fn run(&self, start: TradeDate, end: TradeDate, capital: Money) -> AnalysisResult {
        self.run_params(AnalysisParams::new(start, end, capital))
    }

    /// Drive `params` through every state until the run is done
    pub fn run_params(&self, params: AnalysisParams) -> AnalysisResult {
        let mut state = RunState::Validating(params);
        loop {
            state = match state {
                RunState::Done(result) => return result,
                other => {
                    let next = self.step(other);
                    log::debug!("analysis -> {}", next);
                    next
                }
            };
        }
    }

    /// Advance a run by one state
    pub fn step(&self, state: RunState) -> RunState {
        match state {
            RunState::Validating(params) => match params.validate(self.today()) {
                Ok(()) => RunState::Fetching(params),
                Err(e) => {
                    log::info!("Rejected analysis parameters: {}", e);
                    RunState::Done(AnalysisResult::Failure(e.into()))
                }
            },
            RunState::Fetching(params) => match self.fetch(&params) {
                Ok(series) => RunState::Scanning(params, series),
                Err(e) => RunState::Done(AnalysisResult::Failure(AnalysisError::from(&e))),
            },
            RunState::Scanning(params, series) => {
                let outcome = match build_report(&series, params.capital) {
                    Ok(report) => AnalysisResult::Success(report),
                    Err(e) => {
                        log::warn!("Analysis produced no result: {}", e);
                        AnalysisResult::Failure(AnalysisError::from(&e))
                    }
                };
                RunState::Done(outcome)
            }
            done @ RunState::Done(_) => done,
        }
    }

    /// Fetch the window; a failing source and an empty answer are both `NoData`
    fn fetch(&self, params: &AnalysisParams) -> Result<Vec<RateSeries>> {
        match self.source.fetch(params.start, params.end) {
            Ok(series) if series.is_empty() => {
                log::warn!("{} returned no currencies", self.source.name());
                Err(FxProfitError::NoData)
            }
            Ok(series) => Ok(series),
            Err(e) => {
                log::error!("Fetching rates from {} failed: {}", self.source.name(), e);
                Err(FxProfitError::NoData)
            }
        }
    }
}

/// Select the best currency and do the capital math
fn build_report(series: &[RateSeries], capital: Money) -> Result<AnalysisReport> {
    let best = portfolio::select_best(series, capital).ok_or(FxProfitError::NoProfitableCurrency)?;
    let profit = best.capital_profit(capital)?;
    let accumulated_capital = capital
        .checked_add(profit)
        .ok_or_else(|| FxProfitError::overflow("accumulated capital"))?;

    log::info!(
        "Best currency {}: profit {} on capital {}",
        best.currency,
        profit,
        capital
    );

    Ok(AnalysisReport {
        best,
        initial_capital: capital,
        accumulated_capital,
        profit,
    })
}

//! Cross-currency selection of the most profitable window

use crate::error::FxProfitError;
use crate::profit::CurrencyProfit;
use crate::series::RateSeries;
use crate::types::Money;
use rayon::prelude::*;

/// Outcome of evaluating one currency
#[derive(Debug)]
enum Evaluation {
    /// The series had no usable sample
    NoData,
    Ranked(CurrencyProfit, Money),
    Excluded(CurrencyProfit, FxProfitError),
}

fn evaluate(series: &RateSeries, capital: Money) -> Evaluation {
    let candidate = CurrencyProfit::load(series, capital);
    if candidate.scan.is_none() {
        return Evaluation::NoData;
    }
    match candidate.profit() {
        Ok(profit) => Evaluation::Ranked(candidate, profit),
        Err(e) => Evaluation::Excluded(candidate, e),
    }
}

/// Best currency found by [`select_best_ranked`], with its profit
#[derive(Debug, Clone, PartialEq)]
pub struct Ranked {
    pub best: CurrencyProfit,
    pub profit: Money,
}

/// Pick the currency whose best window earns the most for `capital`.
///
/// Series without usable samples contribute nothing, and a currency whose
/// profit cannot be represented is left out. When two currencies earn exactly
/// the same, the one earlier in `series` wins.
pub fn select_best(series: &[RateSeries], capital: Money) -> Option<CurrencyProfit> {
    select_best_ranked(series, capital).map(|ranked| ranked.best)
}

/// Same as [`select_best`], also returning the winning profit
pub fn select_best_ranked(series: &[RateSeries], capital: Money) -> Option<Ranked> {
    // Scans are independent; collecting keeps input order for the tie-break.
    let evaluations: Vec<Evaluation> = series
        .par_iter()
        .map(|s| evaluate(s, capital))
        .collect();

    evaluations
        .into_iter()
        .fold(None, |best: Option<Ranked>, evaluation| match evaluation {
            Evaluation::NoData => best,
            Evaluation::Excluded(candidate, e) => {
                log::warn!("{} excluded from selection: {}", candidate.currency, e);
                best
            }
            Evaluation::Ranked(candidate, profit) => match best {
                Some(current) if profit <= current.profit => Some(current),
                _ => Some(Ranked {
                    best: candidate,
                    profit,
                }),
            },
        })
}

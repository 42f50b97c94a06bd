//! Executed trade series overlaid on the order flow
//!
//! Step `i` of every sequence maps to time `i + 1` on the chart.

use tracing::debug;

use super::error::{RenderError, Result};

/// Per-step executed volume and direction flags, index-aligned with the prices.
/// A step may be neither a buy nor a sell (price unchanged, zero volume).
#[derive(Debug, Clone, PartialEq)]
pub struct TradeFlow {
    volumes: Vec<f64>,
    buys: Vec<bool>,
    sells: Vec<bool>,
}

impl TradeFlow {
    pub fn volumes(&self) -> &[f64] {
        &self.volumes
    }

    pub fn buys(&self) -> &[bool] {
        &self.buys
    }

    pub fn sells(&self) -> &[bool] {
        &self.sells
    }

    /// Volume attributed to buys at each step (`volume * is_buy`)
    pub fn buy_volumes(&self) -> impl Iterator<Item = f64> + '_ {
        self.volumes
            .iter()
            .zip(&self.buys)
            .map(|(v, b)| v * f64::from(u8::from(*b)))
    }

    /// Volume attributed to sells at each step (`volume * is_sell`)
    pub fn sell_volumes(&self) -> impl Iterator<Item = f64> + '_ {
        self.volumes
            .iter()
            .zip(&self.sells)
            .map(|(v, s)| v * f64::from(u8::from(*s)))
    }
}

/// Executed price series with optional trade flow
#[derive(Debug, Clone, PartialEq)]
pub struct TradeSeries {
    prices: Vec<f64>,
    flow: Option<TradeFlow>,
}

impl TradeSeries {
    /// Price line only
    pub fn new(prices: Vec<f64>) -> Result<Self> {
        if let Some((i, p)) = prices.iter().enumerate().find(|(_, p)| !p.is_finite()) {
            return Err(RenderError::InvalidInput(format!(
                "trade price at step {} is not finite: {}",
                i + 1,
                p
            )));
        }
        Ok(Self { prices, flow: None })
    }

    /// Attach volumes and buy/sell flags. All three must match the price length.
    pub fn with_flow(mut self, volumes: Vec<f64>, buys: Vec<bool>, sells: Vec<bool>) -> Result<Self> {
        check_len("volumes", volumes.len(), self.prices.len())?;
        check_len("buys", buys.len(), self.prices.len())?;
        check_len("sells", sells.len(), self.prices.len())?;

        if let Some((i, v)) = volumes
            .iter()
            .enumerate()
            .find(|(_, v)| !v.is_finite() || **v < 0.0)
        {
            return Err(RenderError::InvalidInput(format!(
                "trade volume at step {} is invalid: {}",
                i + 1,
                v
            )));
        }

        self.flow = Some(TradeFlow {
            volumes,
            buys,
            sells,
        });
        Ok(self)
    }

    pub fn prices(&self) -> &[f64] {
        &self.prices
    }

    pub fn flow(&self) -> Option<&TradeFlow> {
        self.flow.as_ref()
    }

    pub fn len(&self) -> usize {
        self.prices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }

    /// `(step, price)` pairs, steps starting at 1
    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.prices
            .iter()
            .enumerate()
            .map(|(i, p)| ((i + 1) as f64, *p))
    }
}

fn check_len(name: &str, len: usize, expected: usize) -> Result<()> {
    if len != expected {
        return Err(RenderError::InvalidInput(format!(
            "{} has {} entries but the price sequence has {}",
            name, len, expected
        )));
    }
    Ok(())
}

/// Loose overlay arguments, each sequence optional.
///
/// Flags use 0/1 to mirror how trade tapes are usually tabulated; any non-zero
/// value counts as set.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TradeInput {
    pub prices: Option<Vec<f64>>,
    pub volumes: Option<Vec<f64>>,
    pub buys: Option<Vec<u8>>,
    pub sells: Option<Vec<u8>>,
}

impl TradeInput {
    pub fn prices(prices: Vec<f64>) -> Self {
        Self {
            prices: Some(prices),
            ..Self::default()
        }
    }

    pub fn with_flow(mut self, volumes: Vec<f64>, buys: Vec<u8>, sells: Vec<u8>) -> Self {
        self.volumes = Some(volumes);
        self.buys = Some(buys);
        self.sells = Some(sells);
        self
    }

    /// Resolve into a series.
    ///
    /// * no (or empty) prices: `None`, whatever else was supplied
    /// * prices plus all of volumes/buys/sells: series with flow
    /// * prices plus some of them: price line only, but every supplied
    ///   sequence must still match the price length
    pub fn into_series(self) -> Result<Option<TradeSeries>> {
        let prices = match self.prices {
            Some(prices) if !prices.is_empty() => prices,
            _ => {
                if self.volumes.is_some() || self.buys.is_some() || self.sells.is_some() {
                    debug!("Trade flow supplied without prices, overlay skipped");
                }
                return Ok(None);
            }
        };

        let expected = prices.len();
        if let Some(v) = &self.volumes {
            check_len("volumes", v.len(), expected)?;
        }
        if let Some(b) = &self.buys {
            check_len("buys", b.len(), expected)?;
        }
        if let Some(s) = &self.sells {
            check_len("sells", s.len(), expected)?;
        }

        let series = TradeSeries::new(prices)?;
        match (self.volumes, self.buys, self.sells) {
            (Some(volumes), Some(buys), Some(sells)) => {
                let buys = buys.into_iter().map(|b| b != 0).collect();
                let sells = sells.into_iter().map(|s| s != 0).collect();
                series.with_flow(volumes, buys, sells).map(Some)
            }
            _ => Ok(Some(series)),
        }
    }
}

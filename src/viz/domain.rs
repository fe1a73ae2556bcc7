//! Y-axis domain and "nice" tick step.

use serde::Serialize;

use crate::error::{ChartError, Result};
use crate::models::ChartData;

/// The value range mapped onto the plot height, plus its gridline spacing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Domain {
    pub y_min: f64,
    pub y_max: f64,
    /// Distance between gridlines, always a power of ten.
    pub step: f64,
    /// Exponent of `step` (`step == 10^zeroes`).
    pub zeroes: i32,
    /// First gridline value: the smallest multiple of `step` that is `>= y_min`. Never above 0.
    pub first_tick: f64,
}

/// A gridline that survives collision suppression.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Tick {
    pub value: f64,
    pub is_zero: bool,
}

impl Domain {
    /// Domain for a chart's data.
    ///
    /// Unstacked, the range spans every value and always includes zero. Stacked, it runs from
    /// zero to the tallest per-category sum (values are expected to be non-negative).
    pub fn compute(data: &ChartData, stacked: bool) -> Self {
        let (y_min, y_max) = if stacked {
            let top = data.category_sums().into_iter().fold(0.0, f64::max);
            (0.0, top)
        } else {
            data.values()
                .fold((0.0f64, 0.0f64), |(lo, hi), v| (lo.min(v), hi.max(v)))
        };
        let domain = Self::from_extent(y_min, y_max);
        log::debug!(
            "domain (stacked={stacked}): [{}, {}] step {} first tick {}",
            domain.y_min,
            domain.y_max,
            domain.step,
            domain.first_tick
        );
        domain
    }

    /// Domain for an explicit `[y_min, y_max]` extent (which must contain zero).
    pub fn from_extent(y_min: f64, mut y_max: f64) -> Self {
        if y_min == 0.0 && y_max == 0.0 {
            log::debug!("all values are zero, widening domain to [0, 1]");
            y_max = 1.0;
        }
        let range = y_max - y_min;
        let zeroes = step_exponent(range);
        let step = 10f64.powi(zeroes);
        // `+ 0.0` folds a negative zero coming out of the negation.
        let first_tick = -(-y_min / step).floor() * step + 0.0;
        Self {
            y_min,
            y_max,
            step,
            zeroes,
            first_tick,
        }
    }

    pub fn range(&self) -> f64 {
        self.y_max - self.y_min
    }

    /// Reject extents the plot cannot resolve: a range that overflows `f64`, or one so narrow
    /// that its power-of-ten step underflows.
    pub fn check(&self) -> Result<()> {
        let range = self.range();
        if !range.is_finite() {
            return Err(ChartError::malformed(format!(
                "value range [{}, {}] overflows",
                self.y_min, self.y_max
            )));
        }
        if !(self.step.is_normal() && self.step > 0.0 && self.first_tick.is_finite()) {
            return Err(ChartError::malformed(format!(
                "value range {range:e} is too narrow to place gridlines"
            )));
        }
        Ok(())
    }

    /// Decimal digits shown on gridline labels.
    pub fn tick_decimals(&self) -> usize {
        if self.range() < 2.5 {
            (-self.zeroes).max(0) as usize
        } else {
            0
        }
    }

    /// Gridlines between the extremes, `first_tick + k * step` up to `y_max`.
    ///
    /// A gridline closer than `range / 25` to either extreme is dropped, because the extremes
    /// carry their own labels.
    pub fn ticks(&self) -> Vec<Tick> {
        let range = self.range();
        let clearance = range / 25.0;
        let mut out = Vec::new();
        if self.check().is_err() {
            return out;
        }
        let max_steps = ((self.y_max - self.first_tick) / self.step).ceil() as usize + 2;
        for k in 0..max_steps {
            let value = self.first_tick + k as f64 * self.step;
            if value > self.y_max {
                break;
            }
            if value - self.y_min > clearance && self.y_max - value > clearance {
                out.push(Tick {
                    value,
                    is_zero: value.abs() < self.step * 1e-9,
                });
            }
        }
        out
    }
}

/// Power of ten that keeps the number of gridlines across `range` between roughly 2 and 10.
fn step_exponent(range: f64) -> i32 {
    if !(range.is_finite() && range > 0.0) {
        return 0;
    }
    let mut step = range;
    let mut zeroes = 0;
    if range >= 1.0 {
        while step > 25.0 {
            step /= 10.0;
            zeroes += 1;
        }
    } else {
        while step < 2.5 {
            step *= 10.0;
            zeroes -= 1;
        }
    }
    zeroes
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_is_power_of_ten_scaled_to_range() {
        assert_eq!(step_exponent(3.0), 0);
        assert_eq!(step_exponent(25.0), 0);
        assert_eq!(step_exponent(26.0), 1);
        assert_eq!(step_exponent(100.0), 1);
        assert_eq!(step_exponent(251.0), 2);
        assert_eq!(step_exponent(0.5), -1);
        assert_eq!(step_exponent(0.2), -2);
        assert_eq!(step_exponent(0.03), -2);
    }

    #[test]
    fn degenerate_domain_is_widened() {
        let d = Domain::from_extent(0.0, 0.0);
        assert_eq!((d.y_min, d.y_max), (0.0, 1.0));
        assert_eq!(d.zeroes, 0);
        assert_eq!(d.step, 1.0);
        assert!(d.ticks().is_empty());
    }

    #[test]
    fn first_tick_is_on_grid_and_not_positive() {
        let d = Domain::from_extent(-10.0, 5.0);
        assert_eq!(d.step, 1.0);
        assert_eq!(d.first_tick, -10.0);

        let d = Domain::from_extent(-123.0, 40.0);
        assert_eq!(d.step, 10.0);
        assert_eq!(d.first_tick, -120.0);

        let d = Domain::from_extent(0.0, 7.0);
        assert_eq!(d.first_tick, 0.0);
        assert!(d.first_tick.is_sign_positive());
    }

    #[test]
    fn round_range_ticks_land_on_max() {
        let d = Domain::from_extent(0.0, 100.0);
        assert_eq!(d.step, 10.0);
        let last = (0..)
            .map(|k| d.first_tick + k as f64 * d.step)
            .take_while(|v| *v <= d.y_max + 1e-9)
            .last()
            .unwrap();
        assert!((last - 100.0).abs() < 1e-9);
        // extremes are reserved for the boundary labels
        let values: Vec<f64> = d.ticks().iter().map(|t| t.value).collect();
        assert_eq!(values, vec![10.0, 20.0, 30.0, 40.0, 50.0, 60.0, 70.0, 80.0, 90.0]);
    }

    #[test]
    fn zero_tick_is_flagged() {
        let d = Domain::from_extent(-10.0, 5.0);
        let ticks = d.ticks();
        assert!(ticks.iter().any(|t| t.is_zero && t.value == 0.0));
        assert_eq!(ticks.iter().filter(|t| t.is_zero).count(), 1);
        assert!(ticks.iter().all(|t| t.value > -10.0 + 0.6 && t.value < 5.0 - 0.6));
    }

    #[test]
    fn overflowing_and_vanishing_ranges_are_rejected() {
        let wide = Domain::from_extent(-1e308, 1e308);
        assert!(matches!(wide.check(), Err(ChartError::MalformedSpec(_))));
        assert!(wide.ticks().is_empty());

        let narrow = Domain::from_extent(0.0, 1e-310);
        assert!(matches!(narrow.check(), Err(ChartError::MalformedSpec(_))));
        assert!(narrow.ticks().is_empty());

        assert!(Domain::from_extent(-10.0, 5.0).check().is_ok());
        assert_eq!(step_exponent(f64::INFINITY), 0);
    }

    #[test]
    fn decimals_follow_step_for_small_ranges() {
        assert_eq!(Domain::from_extent(0.0, 0.5).tick_decimals(), 1);
        assert_eq!(Domain::from_extent(0.0, 0.05).tick_decimals(), 2);
        assert_eq!(Domain::from_extent(0.0, 2.0).tick_decimals(), 0);
        assert_eq!(Domain::from_extent(0.0, 300.0).tick_decimals(), 0);
    }
}

//! Derived traffic/conversion metrics
//!
//! All values are integers: rates in basis points (x10000), money in cents,
//! ROI in whole percent. A zero denominator yields 0.

use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};

/// Raw counters for one snapshot; absent fields read as 0
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawCounters {
    pub impressions: i64,
    pub clicks: i64,
    pub conversions: i64,
    /// Cents
    pub revenue: i64,
    /// Cents
    pub ad_spend: i64,
}

impl RawCounters {
    pub fn ensure_non_negative(&self) -> AppResult<()> {
        let fields = [
            ("impressions", self.impressions),
            ("clicks", self.clicks),
            ("conversions", self.conversions),
            ("revenue", self.revenue),
            ("adSpend", self.ad_spend),
        ];
        match fields.iter().find(|(_, v)| *v < 0) {
            Some((name, _)) => Err(AppError::Validation(format!("{} must not be negative", name))),
            None => Ok(()),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DerivedMetrics {
    pub ctr: i64,
    pub conversion_rate: i64,
    pub epc: i64,
    pub cpc: i64,
    pub roi: i64,
}

/// Totals over many snapshots plus rates recomputed over the totals
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricsSummary {
    pub snapshots: usize,
    pub totals: RawCounters,
    pub derived: DerivedMetrics,
}

/// round(numerator / denominator), halves toward +inf, 0 when denominator is 0
fn ratio(numerator: i128, denominator: i128) -> i64 {
    if denominator <= 0 {
        return 0;
    }
    // floor((2n + d) / 2d) == round-half-up(n / d) for d > 0
    let rounded = (2 * numerator + denominator).div_euclid(2 * denominator);
    rounded.clamp(i64::MIN as i128, i64::MAX as i128) as i64
}

pub fn compute(counters: &RawCounters) -> DerivedMetrics {
    let impressions = counters.impressions as i128;
    let clicks = counters.clicks as i128;
    let conversions = counters.conversions as i128;
    let revenue = counters.revenue as i128;
    let ad_spend = counters.ad_spend as i128;

    DerivedMetrics {
        ctr: ratio(clicks * 10_000, impressions),
        conversion_rate: ratio(conversions * 10_000, clicks),
        epc: ratio(revenue, clicks),
        cpc: ratio(ad_spend, clicks),
        roi: ratio((revenue - ad_spend) * 100, ad_spend),
    }
}

pub fn summarize<'a, I>(snapshots: I) -> MetricsSummary
where
    I: IntoIterator<Item = &'a RawCounters>,
{
    let mut totals = RawCounters::default();
    let mut count = 0;

    for s in snapshots {
        totals.impressions = totals.impressions.saturating_add(s.impressions);
        totals.clicks = totals.clicks.saturating_add(s.clicks);
        totals.conversions = totals.conversions.saturating_add(s.conversions);
        totals.revenue = totals.revenue.saturating_add(s.revenue);
        totals.ad_spend = totals.ad_spend.saturating_add(s.ad_spend);
        count += 1;
    }

    MetricsSummary {
        snapshots: count,
        totals,
        derived: compute(&totals),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counters(impressions: i64, clicks: i64, conversions: i64, revenue: i64, ad_spend: i64) -> RawCounters {
        RawCounters { impressions, clicks, conversions, revenue, ad_spend }
    }

    #[test]
    fn test_summarize_saturates_huge_totals() {
        let big = counters(i64::MAX, i64::MAX, 1, i64::MAX, 1);
        let summary = summarize(&[big, big]);

        assert_eq!(summary.snapshots, 2);
        assert_eq!(summary.totals.impressions, i64::MAX);
        assert_eq!(summary.totals.revenue, i64::MAX);
        assert_eq!(summary.totals.ad_spend, 2);
        assert_eq!(summary.derived.ctr, 10_000);
    }

    #[test]
    fn test_ctr_rounds_to_basis_points() {
        let m = compute(&counters(40, 3, 0, 0, 0));
        assert_eq!(m.ctr, 750);
    }

    #[test]
    fn test_zero_denominators_yield_zero() {
        let m = compute(&counters(0, 0, 5, 1000, 0));
        assert_eq!(m, DerivedMetrics::default());

        // clicks present but no spend: only ROI is guarded
        let m = compute(&counters(0, 10, 1, 500, 0));
        assert_eq!(m.ctr, 0);
        assert_eq!(m.roi, 0);
        assert_eq!(m.conversion_rate, 1000);
        assert_eq!(m.epc, 50);
    }

    #[test]
    fn test_full_snapshot() {
        // 1000 impressions, 50 clicks, 2 conversions, $94.00 revenue, $25.00 spend
        let m = compute(&counters(1000, 50, 2, 9400, 2500));
        assert_eq!(m.ctr, 500);
        assert_eq!(m.conversion_rate, 400);
        assert_eq!(m.epc, 188);
        assert_eq!(m.cpc, 50);
        assert_eq!(m.roi, 276);
    }

    #[test]
    fn test_halves_round_up() {
        // 1 / 3 * 10000 = 3333.33
        assert_eq!(compute(&counters(3, 1, 0, 0, 0)).ctr, 3333);
        // epc 5 / 2 = 2.5 -> 3
        assert_eq!(compute(&counters(0, 2, 0, 5, 0)).epc, 3);
        // roi (1 - 2) / 2 * 100 = -50 exactly; (1 - 3) / 3 * 100 = -66.67 -> -67
        assert_eq!(compute(&counters(0, 0, 0, 1, 2)).roi, -50);
        assert_eq!(compute(&counters(0, 0, 0, 1, 3)).roi, -67);
        // -0.5 rounds toward +inf like Math.round: (199 - 200) / 200 * 100 = -0.5
        assert_eq!(compute(&counters(0, 0, 0, 199, 200)).roi, 0);
    }

    #[test]
    fn test_summarize_recomputes_over_totals() {
        let rows = vec![counters(100, 10, 1, 1000, 500), counters(300, 30, 3, 3000, 1500)];
        let summary = summarize(&rows);

        assert_eq!(summary.snapshots, 2);
        assert_eq!(summary.totals, counters(400, 40, 4, 4000, 2000));
        assert_eq!(summary.derived.ctr, 1000);
        assert_eq!(summary.derived.roi, 100);
    }

    #[test]
    fn test_summarize_empty() {
        let summary = summarize(&[]);
        assert_eq!(summary.snapshots, 0);
        assert_eq!(summary.derived, DerivedMetrics::default());
    }
}

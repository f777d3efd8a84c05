//! Rule-based transaction risk score.
//!
//! A fixed weighted sum of threshold rules, clamped to `[0, 1]`. Nothing is
//! learned; the weights below are the whole model.

use chrono::Weekday;
use serde::{Deserialize, Serialize};

pub const LARGE_AMOUNT: f64 = 500.0;
pub const VERY_LARGE_AMOUNT: f64 = 1000.0;
pub const DAY_START_HOUR: f64 = 6.0;
pub const DAY_END_HOUR: f64 = 22.0;
pub const FAR_FROM_HOME: f64 = 100.0;

const W_LARGE_AMOUNT: f64 = 0.20;
const W_VERY_LARGE_AMOUNT: f64 = 0.30;
const W_OFF_HOURS: f64 = 0.15;
const W_WEEKEND: f64 = 0.10;
const W_MERCHANT: f64 = 0.25;
const W_FAR_FROM_HOME: f64 = 0.15;
const W_UNUSUAL_CATEGORY: f64 = 0.20;

/// Inputs to the scorer.
///
/// Numeric fields may be NaN (an empty or unparsable form field); a NaN never
/// fires a threshold rule and contributes nothing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiskFeatures {
    pub amount: f64,
    pub hour: f64,
    pub day: Option<Weekday>,
    /// Expected in `[0, 1]`; clamped before use.
    pub merchant_risk: f64,
    pub distance_from_home: f64,
    pub unusual_category: bool,
}

impl Default for RiskFeatures {
    fn default() -> Self {
        Self {
            amount: 0.0,
            hour: 12.0,
            day: Some(Weekday::Wed),
            merchant_risk: 0.0,
            distance_from_home: 0.0,
            unusual_category: false,
        }
    }
}

impl RiskFeatures {
    /// Build features from raw form values.
    ///
    /// `day` is the JavaScript `Date.getDay()` convention: `0` is Sunday,
    /// `6` is Saturday. Checkbox values `"true"`, `"on"` and `"1"` count as set.
    pub fn from_fields(
        amount: &str,
        hour: &str,
        day: &str,
        merchant_risk: &str,
        distance_from_home: &str,
        unusual_category: &str,
    ) -> Self {
        Self {
            amount: parse_number(amount),
            hour: parse_number(hour),
            day: parse_day(day),
            merchant_risk: parse_number(merchant_risk),
            distance_from_home: parse_number(distance_from_home),
            unusual_category: parse_flag(unusual_category),
        }
    }
}

fn parse_number(s: &str) -> f64 {
    s.trim().parse::<f64>().unwrap_or(f64::NAN)
}

fn parse_day(s: &str) -> Option<Weekday> {
    weekday_from_js_index(s.trim().parse::<u8>().ok()?)
}

/// Map a `Date.getDay()` index (`0` = Sunday .. `6` = Saturday).
pub fn weekday_from_js_index(n: u8) -> Option<Weekday> {
    match n {
        0 => Some(Weekday::Sun),
        1 => Some(Weekday::Mon),
        2 => Some(Weekday::Tue),
        3 => Some(Weekday::Wed),
        4 => Some(Weekday::Thu),
        5 => Some(Weekday::Fri),
        6 => Some(Weekday::Sat),
        _ => None,
    }
}

fn parse_flag(s: &str) -> bool {
    matches!(
        s.trim().to_ascii_lowercase().as_str(),
        "true" | "on" | "1" | "yes"
    )
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskRule {
    LargeAmount,
    VeryLargeAmount,
    OffHours,
    Weekend,
    MerchantRisk,
    FarFromHome,
    UnusualCategory,
}

impl RiskRule {
    pub fn label(self) -> &'static str {
        match self {
            RiskRule::LargeAmount => "amount over 500",
            RiskRule::VeryLargeAmount => "amount over 1000",
            RiskRule::OffHours => "outside 06:00-22:00",
            RiskRule::Weekend => "weekend",
            RiskRule::MerchantRisk => "merchant risk",
            RiskRule::FarFromHome => "more than 100 from home",
            RiskRule::UnusualCategory => "unusual category",
        }
    }
}

/// Per-rule contributions, in evaluation order. Only rules that added
/// something are listed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RiskBreakdown {
    pub contributions: Vec<(RiskRule, f64)>,
}

impl RiskBreakdown {
    /// Sum before clamping.
    pub fn raw(&self) -> f64 {
        self.contributions.iter().map(|(_, w)| w).sum()
    }
}

pub fn score(features: &RiskFeatures) -> f64 {
    score_with_breakdown(features).0
}

/// Score plus the rules that produced it.
pub fn score_with_breakdown(f: &RiskFeatures) -> (f64, RiskBreakdown) {
    let mut b = RiskBreakdown::default();

    if f.amount > LARGE_AMOUNT {
        b.contributions.push((RiskRule::LargeAmount, W_LARGE_AMOUNT));
    }
    if f.amount > VERY_LARGE_AMOUNT {
        b.contributions
            .push((RiskRule::VeryLargeAmount, W_VERY_LARGE_AMOUNT));
    }
    if f.hour < DAY_START_HOUR || f.hour > DAY_END_HOUR {
        b.contributions.push((RiskRule::OffHours, W_OFF_HOURS));
    }
    if matches!(f.day, Some(Weekday::Sat | Weekday::Sun)) {
        b.contributions.push((RiskRule::Weekend, W_WEEKEND));
    }
    let merchant = if f.merchant_risk.is_nan() {
        0.0
    } else {
        f.merchant_risk.clamp(0.0, 1.0)
    };
    if merchant > 0.0 {
        b.contributions
            .push((RiskRule::MerchantRisk, merchant * W_MERCHANT));
    }
    if f.distance_from_home > FAR_FROM_HOME {
        b.contributions.push((RiskRule::FarFromHome, W_FAR_FROM_HOME));
    }
    if f.unusual_category {
        b.contributions
            .push((RiskRule::UnusualCategory, W_UNUSUAL_CATEGORY));
    }

    let score = b.raw().clamp(0.0, 1.0);
    (score, b)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskTier {
    Low,
    Medium,
    High,
}

impl RiskTier {
    pub fn from_score(score: f64) -> Self {
        if score < 0.3 {
            RiskTier::Low
        } else if score < 0.7 {
            RiskTier::Medium
        } else {
            RiskTier::High
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            RiskTier::Low => "Low Risk",
            RiskTier::Medium => "Medium Risk",
            RiskTier::High => "High Risk",
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            RiskTier::Low => "#22c55e",
            RiskTier::Medium => "#f59e0b",
            RiskTier::High => "#ef4444",
        }
    }
}

/// Everything the gauge needs to display one score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiskReading {
    pub score: f64,
    pub tier: RiskTier,
    /// Needle rotation, 0 (left) to 180 (right).
    pub gauge_degrees: f64,
    pub percent: u32,
}

impl RiskReading {
    pub fn from_score(score: f64) -> Self {
        let score = if score.is_nan() {
            0.0
        } else {
            score.clamp(0.0, 1.0)
        };
        Self {
            score,
            tier: RiskTier::from_score(score),
            gauge_degrees: score * 180.0,
            percent: (score * 100.0).round() as u32,
        }
    }

    pub fn evaluate(features: &RiskFeatures) -> Self {
        Self::from_score(score(features))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quiet() -> RiskFeatures {
        RiskFeatures {
            amount: 100.0,
            hour: 14.0,
            day: Some(Weekday::Tue),
            merchant_risk: 0.0,
            distance_from_home: 10.0,
            unusual_category: false,
        }
    }

    #[test]
    fn every_rule_firing_clamps_to_one() {
        let f = RiskFeatures {
            amount: 1200.0,
            hour: 2.0,
            day: Some(Weekday::Sat),
            merchant_risk: 1.0,
            distance_from_home: 150.0,
            unusual_category: true,
        };
        let (s, b) = score_with_breakdown(&f);
        assert!((b.raw() - 1.35).abs() < 1e-9);
        assert_eq!(b.contributions.len(), 7);
        assert_eq!(s, 1.0);
        let r = RiskReading::from_score(s);
        assert_eq!(r.tier.label(), "High Risk");
        assert_eq!(r.gauge_degrees, 180.0);
        assert_eq!(r.percent, 100);
    }

    #[test]
    fn quiet_daytime_purchase_scores_zero() {
        let (s, b) = score_with_breakdown(&quiet());
        assert_eq!(s, 0.0);
        assert!(b.contributions.is_empty());
        assert_eq!(RiskReading::from_score(s).tier.label(), "Low Risk");
    }

    #[test]
    fn tiers_split_at_point_three_and_point_seven() {
        assert_eq!(RiskTier::from_score(0.29), RiskTier::Low);
        assert_eq!(RiskTier::from_score(0.3), RiskTier::Medium);
        assert_eq!(RiskTier::from_score(0.69), RiskTier::Medium);
        assert_eq!(RiskTier::from_score(0.7), RiskTier::High);
    }

    #[test]
    fn thresholds_are_strict() {
        let mut f = quiet();
        f.amount = 500.0;
        f.hour = 22.0;
        f.distance_from_home = 100.0;
        assert_eq!(score(&f), 0.0);
        f.hour = 6.0;
        assert_eq!(score(&f), 0.0);
        f.hour = 5.0;
        assert!((score(&f) - 0.15).abs() < 1e-9);
    }

    #[test]
    fn sunday_counts_as_weekend() {
        let mut f = quiet();
        f.day = Some(Weekday::Sun);
        assert!((score(&f) - 0.10).abs() < 1e-9);
    }

    #[test]
    fn score_stays_in_unit_interval_for_odd_inputs() {
        let odd = [f64::NAN, f64::INFINITY, f64::NEG_INFINITY, -1e9, 1e9, -0.5, 2.0];
        for &a in &odd {
            for &m in &odd {
                for &d in &odd {
                    let f = RiskFeatures {
                        amount: a,
                        hour: a,
                        day: None,
                        merchant_risk: m,
                        distance_from_home: d,
                        unusual_category: true,
                    };
                    let s = score(&f);
                    assert!((0.0..=1.0).contains(&s), "a={a} m={m} d={d} s={s}");
                }
            }
        }
    }

    #[test]
    fn monotone_in_amount_merchant_and_distance() {
        let base = quiet();
        let mut prev = 0.0;
        for i in 0..=300 {
            let f = RiskFeatures {
                amount: i as f64 * 10.0,
                ..base
            };
            let s = score(&f);
            assert!(s >= prev);
            prev = s;
        }
        prev = 0.0;
        for i in 0..=100 {
            let f = RiskFeatures {
                merchant_risk: i as f64 / 100.0,
                ..base
            };
            let s = score(&f);
            assert!(s >= prev);
            prev = s;
        }
        prev = 0.0;
        for i in 0..=300 {
            let f = RiskFeatures {
                distance_from_home: i as f64,
                ..base
            };
            let s = score(&f);
            assert!(s >= prev);
            prev = s;
        }
    }

    #[test]
    fn form_fields_parse_like_the_page() {
        let f = RiskFeatures::from_fields("1200", "2", "6", "1.0", "150", "on");
        assert_eq!(f.day, Some(Weekday::Sat));
        assert!(f.unusual_category);
        assert_eq!(score(&f), 1.0);

        let f = RiskFeatures::from_fields("", "abc", "", "", "", "");
        assert!(f.amount.is_nan());
        assert_eq!(f.day, None);
        assert!(!f.unusual_category);
        assert_eq!(score(&f), 0.0);

        assert_eq!(
            RiskFeatures::from_fields("0", "12", "0", "0", "0", "false").day,
            Some(Weekday::Sun)
        );
        assert_eq!(RiskFeatures::from_fields("0", "12", "7", "0", "0", "0").day, None);
    }

    #[test]
    fn checkbox_strings_set_the_unusual_flag() {
        for set in ["true", "on", "1", " TRUE "] {
            let f = RiskFeatures::from_fields("0", "12", "3", "0", "0", set);
            assert!(f.unusual_category, "{set:?} should set the flag");
        }
        for unset in ["false", "0", "", "off"] {
            let f = RiskFeatures::from_fields("0", "12", "3", "0", "0", unset);
            assert!(!f.unusual_category, "{unset:?} should leave the flag clear");
        }
    }

    #[test]
    fn merchant_risk_is_clamped() {
        let mut f = quiet();
        f.merchant_risk = 4.0;
        assert!((score(&f) - 0.25).abs() < 1e-9);
    }
}

//! 계산 결과를 소수 둘째 자리 문자열로 정리한다.
//!
//! 반올림 규칙은 0에서 먼 쪽으로 올리는 half-away-from-zero 이다. 이진 부동소수점
//! 표현 오차(예: 0.0375 × 6 = 0.22499999999999998)로 중간값 바로 아래에 놓인 값은
//! 중간값으로 보고 올림한다. 그 밖의 값은 그대로 반올림한다.

use serde::Serialize;
use std::fmt;

use crate::estimator::CostEstimate;

/// 보고서 소수 자릿수
pub const REPORT_DECIMALS: usize = 2;

// 중간값 판정 허용치. 스케일된 값의 2~4 ULP만 흡수한다.
const TIE_TOLERANCE_EPSILONS: f64 = 2.0;
// 이 크기 이상의 f64는 소수부가 없다
const INTEGRAL_MAGNITUDE: f64 = 4_503_599_627_370_496.0; // 2^52

/// 지정 자릿수로 반올림한다(half away from zero).
pub fn round_to_places(value: f64, places: usize) -> f64 {
    if !value.is_finite() {
        return value;
    }
    let factor = 10f64.powi(places as i32);
    let scaled = value * factor;
    let magnitude = scaled.abs();
    if magnitude >= INTEGRAL_MAGNITUDE {
        return value;
    }
    let tolerance = TIE_TOLERANCE_EPSILONS * f64::EPSILON * magnitude.max(1.0);
    // 표현 오차로 0.5 바로 아래에 놓인 중간값만 바깥쪽으로 올린다
    let rounded = if (magnitude.fract() - 0.5).abs() <= tolerance {
        (magnitude.trunc() + 1.0).copysign(scaled)
    } else {
        scaled.round()
    };
    rounded / factor
}

/// 반올림한 뒤 고정 소수 자릿수 문자열로 만든다.
pub fn format_fixed(value: f64, places: usize) -> String {
    let rounded = round_to_places(value, places);
    // -0.00 표기를 피한다
    let rounded = if rounded == 0.0 { 0.0 } else { rounded };
    format!("{rounded:.places$}")
}

/// 화면/CLI 출력을 위한 결과 요약.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EstimateReport {
    pub device: String,
    pub watts: f64,
    pub hours: f64,
    pub rate_per_unit: f64,
    pub currency_code: String,
    pub currency_symbol: String,
    pub units_per_day: String,
    pub units_per_month: String,
    pub cost_per_day: String,
    pub cost_per_month: String,
}

impl EstimateReport {
    pub fn new(
        device: &str,
        estimate: &CostEstimate,
        currency_code: &str,
        currency_symbol: &str,
    ) -> Self {
        Self {
            device: device.to_string(),
            watts: estimate.power_watts,
            hours: estimate.hours_per_day,
            rate_per_unit: estimate.rate_per_unit,
            currency_code: currency_code.to_string(),
            currency_symbol: currency_symbol.to_string(),
            units_per_day: format_fixed(estimate.units_per_day, REPORT_DECIMALS),
            units_per_month: format_fixed(estimate.units_per_month, REPORT_DECIMALS),
            cost_per_day: format_fixed(estimate.cost_per_day, REPORT_DECIMALS),
            cost_per_month: format_fixed(estimate.cost_per_month, REPORT_DECIMALS),
        }
    }

    /// "100 Watts × 5 Hours" 형태의 입력 요약
    pub fn usage_line(&self) -> String {
        format!("{} Watts × {} Hours", self.watts, self.hours)
    }

    /// 통화 기호를 붙인 금액 문자열
    pub fn money(&self, amount: &str) -> String {
        format!("{}{amount}", self.currency_symbol)
    }

    /// 요금 단가 안내 문구
    pub fn rate_line(&self) -> String {
        format!(
            "Rate: {}{} per unit (kWh)",
            self.currency_symbol, self.rate_per_unit
        )
    }
}

impl fmt::Display for EstimateReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.device)?;
        writeln!(f, "{}", self.usage_line())?;
        writeln!(
            f,
            "Daily Cost:   {} ({} units)",
            self.money(&self.cost_per_day),
            self.units_per_day
        )?;
        writeln!(
            f,
            "Monthly Cost: {} ({} units)",
            self.money(&self.cost_per_month),
            self.units_per_month
        )?;
        write!(f, "{}", self.rate_line())
    }
}

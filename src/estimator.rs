//! 전력(W)·사용 시간·요금 단가로 전력량과 전기요금을 추정하는 순수 계산 모듈.
//!
//! 모든 검증은 계산 전에 끝나며, 하나라도 실패하면 결과를 만들지 않는다.

use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// W → kW 환산 계수
pub const WATTS_PER_KILOWATT: f64 = 1000.0;
/// 월 환산 일수
pub const DAYS_PER_MONTH: f64 = 30.0;
/// 하루 최대 사용 시간
pub const MAX_HOURS_PER_DAY: f64 = 24.0;

/// 도움말/계산식 화면에 보여줄 계산식
pub const FORMULA_LINES: [&str; 4] = [
    "Units per day (kWh) = Watts × Hours / 1000",
    "Units per month = Units per day × 30",
    "Cost per day = Units per day × Rate",
    "Cost per month = Units per month × Rate",
];

/// 입력 필드 구분.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    /// 소비 전력 [W]
    Power,
    /// 하루 사용 시간 [h]
    Hours,
    /// 요금 단가 [통화/kWh]
    Rate,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Field::Power => write!(f, "power"),
            Field::Hours => write!(f, "hours per day"),
            Field::Rate => write!(f, "rate per unit"),
        }
    }
}

/// 범위 위반 사유.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeProblem {
    /// 숫자로 해석할 수 없음
    NonNumeric,
    /// NaN/무한대
    NotFinite,
    /// 0 이하
    ZeroOrNegative,
    /// 음수
    Negative,
    /// 24시간 초과
    ExceedsDay,
    /// 계산 결과가 f64 범위를 넘음
    ResultOverflow,
}

impl fmt::Display for RangeProblem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RangeProblem::NonNumeric => write!(f, "is not a number"),
            RangeProblem::NotFinite => write!(f, "must be a finite number"),
            RangeProblem::ZeroOrNegative => write!(f, "must be greater than zero"),
            RangeProblem::Negative => write!(f, "must not be negative"),
            RangeProblem::ExceedsDay => write!(f, "must not exceed 24 hours"),
            RangeProblem::ResultOverflow => write!(f, "is too large to estimate a cost"),
        }
    }
}

/// 필드 하나에 대한 검증 실패.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FieldIssue {
    #[error("{field} is required")]
    MissingInput { field: Field },
    #[error("{field} {problem}")]
    InvalidRange { field: Field, problem: RangeProblem },
}

impl FieldIssue {
    /// 실패한 필드를 반환한다.
    pub fn field(&self) -> Field {
        match self {
            FieldIssue::MissingInput { field } | FieldIssue::InvalidRange { field, .. } => *field,
        }
    }
}

/// 검증 실패 묶음. 실패한 모든 필드를 담는다.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid input: {}", join_issues(.issues))]
pub struct ValidationFailure {
    issues: Vec<FieldIssue>,
}

impl ValidationFailure {
    pub fn issues(&self) -> &[FieldIssue] {
        &self.issues
    }

    /// 해당 필드가 실패 목록에 있는지 확인한다.
    pub fn has_field(&self, field: Field) -> bool {
        self.issues.iter().any(|i| i.field() == field)
    }

    /// 특정 필드의 실패 사유를 찾는다.
    pub fn issue_for(&self, field: Field) -> Option<&FieldIssue> {
        self.issues.iter().find(|i| i.field() == field)
    }

    fn from_issues(issues: Vec<FieldIssue>) -> Result<(), Self> {
        if issues.is_empty() {
            Ok(())
        } else {
            Err(Self { issues })
        }
    }
}

fn join_issues(issues: &[FieldIssue]) -> String {
    issues
        .iter()
        .map(|i| i.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

/// 계산 요청 입력. 요청마다 새로 만든다.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UsageInput {
    pub power_watts: f64,
    pub hours_per_day: f64,
    pub rate_per_unit: f64,
}

impl UsageInput {
    pub fn new(power_watts: f64, hours_per_day: f64, rate_per_unit: f64) -> Self {
        Self {
            power_watts,
            hours_per_day,
            rate_per_unit,
        }
    }

    /// 입력 필드 문자열을 해석한다. 비었거나 공백뿐이면 누락으로 본다.
    pub fn parse(
        power: Option<&str>,
        hours: Option<&str>,
        rate: Option<&str>,
    ) -> Result<Self, ValidationFailure> {
        let mut issues = Vec::new();
        let power_watts = parse_field(Field::Power, power, &mut issues);
        let hours_per_day = parse_field(Field::Hours, hours, &mut issues);
        let rate_per_unit = parse_field(Field::Rate, rate, &mut issues);

        // 숫자로 읽힌 필드는 범위까지 함께 검사해 한 번에 보고한다.
        if let Some(p) = power_watts {
            issues.extend(check_power(p));
        }
        if let Some(h) = hours_per_day {
            issues.extend(check_hours(h));
        }
        if let Some(r) = rate_per_unit {
            issues.extend(check_rate(r));
        }
        issues.sort_by_key(|i| field_order(i.field()));

        match (power_watts, hours_per_day, rate_per_unit) {
            (Some(p), Some(h), Some(r)) if issues.is_empty() => Ok(Self::new(p, h, r)),
            _ => Err(ValidationFailure { issues }),
        }
    }

    /// 각 필드의 범위를 검사한다.
    pub fn validate(&self) -> Result<(), ValidationFailure> {
        let mut issues = Vec::new();
        issues.extend(check_power(self.power_watts));
        issues.extend(check_hours(self.hours_per_day));
        issues.extend(check_rate(self.rate_per_unit));
        ValidationFailure::from_issues(issues)
    }
}

fn field_order(field: Field) -> u8 {
    match field {
        Field::Power => 0,
        Field::Hours => 1,
        Field::Rate => 2,
    }
}

fn parse_field(field: Field, raw: Option<&str>, issues: &mut Vec<FieldIssue>) -> Option<f64> {
    let text = raw.map(str::trim).unwrap_or("");
    if text.is_empty() {
        issues.push(FieldIssue::MissingInput { field });
        return None;
    }
    match text.parse::<f64>() {
        Ok(v) => Some(v),
        Err(_) => {
            issues.push(FieldIssue::InvalidRange {
                field,
                problem: RangeProblem::NonNumeric,
            });
            None
        }
    }
}

fn classify_non_finite(field: Field, value: f64) -> Option<FieldIssue> {
    if value.is_nan() {
        Some(FieldIssue::InvalidRange {
            field,
            problem: RangeProblem::NonNumeric,
        })
    } else if value.is_infinite() {
        Some(FieldIssue::InvalidRange {
            field,
            problem: RangeProblem::NotFinite,
        })
    } else {
        None
    }
}

fn check_power(value: f64) -> Option<FieldIssue> {
    classify_non_finite(Field::Power, value).or_else(|| {
        (value <= 0.0).then_some(FieldIssue::InvalidRange {
            field: Field::Power,
            problem: RangeProblem::ZeroOrNegative,
        })
    })
}

fn check_hours(value: f64) -> Option<FieldIssue> {
    classify_non_finite(Field::Hours, value).or_else(|| {
        if value <= 0.0 {
            Some(FieldIssue::InvalidRange {
                field: Field::Hours,
                problem: RangeProblem::ZeroOrNegative,
            })
        } else if value > MAX_HOURS_PER_DAY {
            Some(FieldIssue::InvalidRange {
                field: Field::Hours,
                problem: RangeProblem::ExceedsDay,
            })
        } else {
            None
        }
    })
}

fn check_rate(value: f64) -> Option<FieldIssue> {
    classify_non_finite(Field::Rate, value).or_else(|| {
        (value < 0.0).then_some(FieldIssue::InvalidRange {
            field: Field::Rate,
            problem: RangeProblem::Negative,
        })
    })
}

/// 전력량·요금 추정 결과. 값은 반올림하지 않은 원본 그대로 보관한다.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CostEstimate {
    /// 하루 사용 전력량 [kWh]
    pub units_per_day: f64,
    /// 월 사용 전력량 [kWh]
    pub units_per_month: f64,
    /// 하루 요금
    pub cost_per_day: f64,
    /// 월 요금
    pub cost_per_month: f64,
    pub power_watts: f64,
    pub hours_per_day: f64,
    pub rate_per_unit: f64,
}

/// 입력을 검증한 뒤 전력량과 요금을 계산한다.
pub fn estimate(
    power_watts: f64,
    hours_per_day: f64,
    rate_per_unit: f64,
) -> Result<CostEstimate, ValidationFailure> {
    estimate_usage(&UsageInput::new(power_watts, hours_per_day, rate_per_unit))
}

/// [`UsageInput`]으로 계산한다.
pub fn estimate_usage(input: &UsageInput) -> Result<CostEstimate, ValidationFailure> {
    input.validate()?;
    // kWh = W × h / 1000, 월 = 일 × 30
    let units_per_day = input.power_watts * input.hours_per_day / WATTS_PER_KILOWATT;
    let units_per_month = units_per_day * DAYS_PER_MONTH;
    let cost_per_day = units_per_day * input.rate_per_unit;
    let cost_per_month = units_per_month * input.rate_per_unit;
    // 유한한 입력이라도 곱이 넘칠 수 있다
    let outputs = [units_per_day, units_per_month, cost_per_day, cost_per_month];
    if outputs.iter().any(|v| !v.is_finite()) {
        return Err(ValidationFailure {
            issues: vec![FieldIssue::InvalidRange {
                field: Field::Power,
                problem: RangeProblem::ResultOverflow,
            }],
        });
    }
    Ok(CostEstimate {
        units_per_day,
        units_per_month,
        cost_per_day,
        cost_per_month,
        power_watts: input.power_watts,
        hours_per_day: input.hours_per_day,
        rate_per_unit: input.rate_per_unit,
    })
}

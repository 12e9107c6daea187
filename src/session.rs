//! 계산기 화면 상태. CLI와 GUI가 같은 상태 전이를 공유한다.
//!
//! 기기 선택과 사용자 지정 전력 입력은 서로 배타적이다. 하나를 바꾸면 다른 하나는 지워진다.

use crate::devices::{DeviceProfile, CUSTOM_DEVICE_ICON, CUSTOM_DEVICE_NAME};
use crate::estimator::{
    self, CostEstimate, Field, FieldIssue, RangeProblem, UsageInput, ValidationFailure,
};
use crate::report::EstimateReport;
use crate::units::{convert_power, PowerUnit};

/// 성공한 계산 한 건.
#[derive(Debug, Clone, PartialEq)]
pub struct Calculation {
    pub device_name: String,
    pub device_icon: String,
    pub estimate: CostEstimate,
}

impl Calculation {
    pub fn report(&self, currency_code: &str, currency_symbol: &str) -> EstimateReport {
        EstimateReport::new(&self.device_name, &self.estimate, currency_code, currency_symbol)
    }
}

/// 입력 화면과 결과 화면 사이를 오가는 계산기 상태.
#[derive(Debug, Clone)]
pub struct CalculatorSession {
    selected_device: Option<DeviceProfile>,
    custom_power: String,
    custom_unit: PowerUnit,
    hours: String,
    rate: String,
    show_results: bool,
    last: Option<Calculation>,
}

impl CalculatorSession {
    /// 요금 단가를 받아 빈 상태로 시작한다.
    pub fn new(rate_per_unit: f64) -> Self {
        Self {
            selected_device: None,
            custom_power: String::new(),
            custom_unit: PowerUnit::Watt,
            hours: String::new(),
            rate: rate_per_unit.to_string(),
            show_results: false,
            last: None,
        }
    }

    pub fn selected_device(&self) -> Option<&DeviceProfile> {
        self.selected_device.as_ref()
    }

    pub fn custom_power(&self) -> &str {
        &self.custom_power
    }

    pub fn custom_unit(&self) -> PowerUnit {
        self.custom_unit
    }

    pub fn hours(&self) -> &str {
        &self.hours
    }

    pub fn rate(&self) -> &str {
        &self.rate
    }

    pub fn showing_results(&self) -> bool {
        self.show_results
    }

    /// 결과 화면일 때만 마지막 계산을 돌려준다.
    pub fn result(&self) -> Option<&Calculation> {
        if self.show_results {
            self.last.as_ref()
        } else {
            None
        }
    }

    /// 기기를 선택하면 사용자 지정 전력 입력은 지운다.
    pub fn select_device(&mut self, device: &DeviceProfile) {
        log::debug!("device selected: {} ({} W)", device.name, device.watts);
        self.selected_device = Some(device.clone());
        self.custom_power.clear();
    }

    /// 사용자 지정 전력을 입력하면 기기 선택은 해제한다.
    pub fn set_custom_power(&mut self, text: &str) {
        self.custom_power = text.to_string();
        self.selected_device = None;
    }

    pub fn set_custom_unit(&mut self, unit: PowerUnit) {
        self.custom_unit = unit;
    }

    pub fn set_hours(&mut self, text: &str) {
        self.hours = text.to_string();
    }

    /// 빠른 시간 버튼 값을 입력란에 채운다.
    pub fn choose_quick_hours(&mut self, hours: f64) {
        self.hours = hours.to_string();
    }

    /// 이후 계산에 쓸 요금 단가를 바꾼다(설정 패널).
    pub fn set_rate(&mut self, text: &str) {
        self.rate = text.to_string();
    }

    /// 전력(기기 또는 직접 입력)과 사용 시간이 모두 채워졌는지 확인한다.
    pub fn can_calculate(&self) -> bool {
        let has_power = self.selected_device.is_some() || !self.custom_power.trim().is_empty();
        has_power && !self.hours.trim().is_empty()
    }

    /// 현재 입력으로 계산한다. 실패하면 입력 화면에 머문다.
    pub fn calculate(&mut self) -> Result<&Calculation, ValidationFailure> {
        let (name, icon, input) = self.usage_input()?;
        let estimate = estimator::estimate_usage(&input)?;
        log::debug!(
            "estimate for {name}: {:.4} kWh/day, {:.4} per day",
            estimate.units_per_day,
            estimate.cost_per_day
        );
        self.show_results = true;
        Ok(self.last.insert(Calculation {
            device_name: name,
            device_icon: icon,
            estimate,
        }))
    }

    /// 기기, 전력, 시간, 결과를 모두 지운다. 요금 단가는 유지한다.
    pub fn reset(&mut self) {
        self.selected_device = None;
        self.custom_power.clear();
        self.custom_unit = PowerUnit::Watt;
        self.hours.clear();
        self.show_results = false;
        self.last = None;
    }

    fn usage_input(&self) -> Result<(String, String, UsageInput), ValidationFailure> {
        let (name, icon, power_text) = match &self.selected_device {
            Some(d) => (d.name.clone(), d.icon.clone(), Some(d.watts.to_string())),
            None => (
                CUSTOM_DEVICE_NAME.to_string(),
                CUSTOM_DEVICE_ICON.to_string(),
                Some(self.custom_power_in_watts()),
            ),
        };
        let input = UsageInput::parse(
            power_text.as_deref(),
            Some(self.hours.as_str()),
            Some(self.rate.as_str()),
        )?;
        Ok((name, icon, input))
    }

    // 와트가 아닌 단위로 입력된 값은 와트 문자열로 바꿔 같은 검증 경로를 탄다.
    fn custom_power_in_watts(&self) -> String {
        let text = self.custom_power.trim();
        if self.custom_unit == PowerUnit::Watt {
            return text.to_string();
        }
        match text.parse::<f64>() {
            Ok(v) => convert_power(v, self.custom_unit, PowerUnit::Watt).to_string(),
            Err(_) => text.to_string(),
        }
    }
}

/// 검증 실패를 화면 문구 목록으로 바꾼다.
pub fn describe_failure(failure: &ValidationFailure) -> Vec<String> {
    failure
        .issues()
        .iter()
        .map(|issue| match issue {
            FieldIssue::MissingInput { field: Field::Power } => {
                "Select a device or enter custom watts".to_string()
            }
            FieldIssue::InvalidRange {
                field: Field::Hours,
                problem: RangeProblem::ExceedsDay,
            } => "A day has at most 24 hours of usage".to_string(),
            other => {
                let text = other.to_string();
                let mut chars = text.chars();
                match chars.next() {
                    Some(first) => first.to_uppercase().chain(chars).collect(),
                    None => String::new(),
                }
            }
        })
        .collect()
}

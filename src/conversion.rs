use thiserror::Error;

use crate::units::*;

/// 단위 변환 시 발생 가능한 오류.
#[derive(Debug, Error)]
pub enum ConversionError {
    /// 알 수 없는 단위 문자열
    #[error("unknown unit: {0}")]
    UnknownUnit(String),
}

/// 단위 문자열을 전력 단위로 해석한다. 대소문자는 구분하지 않는다.
pub fn parse_power_unit(s: &str) -> Result<PowerUnit, ConversionError> {
    match s.trim().to_lowercase().as_str() {
        "w" | "watt" | "watts" => Ok(PowerUnit::Watt),
        "kw" | "kilowatt" | "kilowatts" => Ok(PowerUnit::Kilowatt),
        "hp" | "horsepower" => Ok(PowerUnit::Horsepower),
        "btu/h" | "btu/hr" | "btuh" => Ok(PowerUnit::BtuPerHour),
        _ => Err(ConversionError::UnknownUnit(s.to_string())),
    }
}

/// 문자열 단위로 전달된 전력을 와트로 환산한다.
pub fn power_to_watts(value: f64, unit_str: &str) -> Result<f64, ConversionError> {
    let unit = parse_power_unit(unit_str)?;
    Ok(convert_power(value, unit, PowerUnit::Watt))
}

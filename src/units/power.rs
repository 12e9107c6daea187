use serde::{Deserialize, Serialize};

/// 전력 단위. 내부 기준은 와트(W)이다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PowerUnit {
    Watt,
    Kilowatt,
    /// 기계식 마력(745.7 W)
    Horsepower,
    BtuPerHour,
}

impl PowerUnit {
    /// 화면 표기용 기호
    pub fn symbol(self) -> &'static str {
        match self {
            PowerUnit::Watt => "W",
            PowerUnit::Kilowatt => "kW",
            PowerUnit::Horsepower => "hp",
            PowerUnit::BtuPerHour => "BTU/h",
        }
    }

    pub const ALL: [PowerUnit; 4] = [
        PowerUnit::Watt,
        PowerUnit::Kilowatt,
        PowerUnit::Horsepower,
        PowerUnit::BtuPerHour,
    ];
}

fn to_watt(value: f64, unit: PowerUnit) -> f64 {
    match unit {
        PowerUnit::Watt => value,
        PowerUnit::Kilowatt => value * 1000.0,
        PowerUnit::Horsepower => value * 745.7,
        PowerUnit::BtuPerHour => value * 0.293_071_07,
    }
}

fn from_watt(value: f64, unit: PowerUnit) -> f64 {
    match unit {
        PowerUnit::Watt => value,
        PowerUnit::Kilowatt => value / 1000.0,
        PowerUnit::Horsepower => value / 745.7,
        PowerUnit::BtuPerHour => value / 0.293_071_07,
    }
}

/// 전력을 변환한다. 같은 단위면 값을 그대로 돌려준다.
pub fn convert_power(value: f64, from: PowerUnit, to: PowerUnit) -> f64 {
    if from == to {
        return value;
    }
    from_watt(to_watt(value, from), to)
}

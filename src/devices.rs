//! 자주 쓰는 가전 기기 프리셋 목록.

use serde::{Deserialize, Serialize};

/// 사용자 지정 전력 입력 시 표시 이름
pub const CUSTOM_DEVICE_NAME: &str = "Custom Device";
/// 사용자 지정 전력 입력 시 아이콘
pub const CUSTOM_DEVICE_ICON: &str = "🔌";
/// 빠른 사용 시간 버튼 기본값 [h]
pub const DEFAULT_QUICK_HOURS: [f64; 4] = [1.0, 2.0, 5.0, 10.0];

/// 이름과 기본 소비 전력을 가진 기기 프리셋.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviceProfile {
    pub name: String,
    /// 소비 전력 [W]
    pub watts: f64,
    #[serde(default = "default_icon")]
    pub icon: String,
}

fn default_icon() -> String {
    CUSTOM_DEVICE_ICON.to_string()
}

impl DeviceProfile {
    pub fn new(name: &str, watts: f64, icon: &str) -> Self {
        Self {
            name: name.to_string(),
            watts,
            icon: icon.to_string(),
        }
    }
}

/// 기본 기기 목록.
pub fn default_catalog() -> Vec<DeviceProfile> {
    vec![
        DeviceProfile::new("Bulb", 10.0, "💡"),
        DeviceProfile::new("Fan", 75.0, "🌀"),
        DeviceProfile::new("Heater", 2000.0, "🔥"),
        DeviceProfile::new("Charger", 20.0, "🔌"),
        DeviceProfile::new("Fridge", 150.0, "❄"),
        DeviceProfile::new("TV", 100.0, "📺"),
        DeviceProfile::new("Washing Machine", 500.0, "🌊"),
        DeviceProfile::new("AC", 1500.0, "❄"),
    ]
}

/// 이름으로 기기를 찾는다(앞뒤 공백 무시, 대소문자 무시).
pub fn find_device<'a>(catalog: &'a [DeviceProfile], name: &str) -> Option<&'a DeviceProfile> {
    let wanted = name.trim();
    catalog
        .iter()
        .find(|d| d.name.eq_ignore_ascii_case(wanted))
}

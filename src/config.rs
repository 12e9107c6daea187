//! 요금 단가, 기기 목록, 화면 옵션을 담는 TOML 설정. 실행 중에는 읽기 전용이다.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::devices::{self, DeviceProfile};
use crate::estimator::MAX_HOURS_PER_DAY;

/// 기본 설정 파일 경로
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// 요금 단가 설정.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TariffConfig {
    /// kWh당 요금
    #[serde(default = "default_rate")]
    pub rate_per_unit: f64,
    #[serde(default = "default_currency_code")]
    pub currency_code: String,
    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,
}

fn default_rate() -> f64 {
    6.0
}
fn default_currency_code() -> String {
    "INR".to_string()
}
fn default_currency_symbol() -> String {
    "₹".to_string()
}

impl Default for TariffConfig {
    fn default() -> Self {
        Self {
            rate_per_unit: default_rate(),
            currency_code: default_currency_code(),
            currency_symbol: default_currency_symbol(),
        }
    }
}

/// 화면 관련 설정.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterfaceConfig {
    /// 빠른 사용 시간 버튼 [h]
    #[serde(default = "default_quick_hours")]
    pub quick_hours: Vec<f64>,
    #[serde(default = "default_true")]
    pub splash_enabled: bool,
    #[serde(default = "default_splash_duration_ms")]
    pub splash_duration_ms: u64,
    #[serde(default = "default_greeting")]
    pub greeting: String,
    #[serde(default = "default_window_alpha")]
    pub window_alpha: f32,
    #[serde(default = "default_ui_scale")]
    pub ui_scale: f32,
}

fn default_quick_hours() -> Vec<f64> {
    devices::DEFAULT_QUICK_HOURS.to_vec()
}
fn default_true() -> bool {
    true
}
fn default_splash_duration_ms() -> u64 {
    2000
}
fn default_greeting() -> String {
    "Welcome to SuperPower".to_string()
}
fn default_window_alpha() -> f32 {
    1.0
}
fn default_ui_scale() -> f32 {
    1.0
}

impl Default for InterfaceConfig {
    fn default() -> Self {
        Self {
            quick_hours: default_quick_hours(),
            splash_enabled: true,
            splash_duration_ms: default_splash_duration_ms(),
            greeting: default_greeting(),
            window_alpha: default_window_alpha(),
            ui_scale: default_ui_scale(),
        }
    }
}

/// 애플리케이션 설정을 표현한다. 실행 중 변경 사항은 파일에 다시 쓰지 않는다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub tariff: TariffConfig,
    #[serde(default)]
    pub interface: InterfaceConfig,
    #[serde(default = "devices::default_catalog")]
    pub devices: Vec<DeviceProfile>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tariff: TariffConfig::default(),
            interface: InterfaceConfig::default(),
            devices: devices::default_catalog(),
        }
    }
}

/// 설정 로드 시 발생 가능한 오류를 표현한다.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 파일 입출력 오류
    #[error("config I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML 역직렬화 오류
    #[error("config parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// TOML 직렬화 오류
    #[error("config serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),
    /// 내용 검증 실패
    #[error("invalid config: {0}")]
    Invalid(String),
}

impl Config {
    /// TOML 문자열에서 설정을 읽고 검증한다.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let cfg: Config = toml::from_str(content)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// 설정을 TOML 문자열로 만든다.
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// 요금 단가, 기기 목록, 빠른 시간 버튼 값을 검사한다.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let rate = self.tariff.rate_per_unit;
        if !rate.is_finite() || rate < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "tariff.rate_per_unit must be a finite number >= 0 (got {rate})"
            )));
        }
        let mut seen: Vec<String> = Vec::new();
        for device in &self.devices {
            let name = device.name.trim();
            if name.is_empty() {
                return Err(ConfigError::Invalid("device name must not be empty".into()));
            }
            if !device.watts.is_finite() || device.watts <= 0.0 {
                return Err(ConfigError::Invalid(format!(
                    "device '{name}' must have watts > 0 (got {})",
                    device.watts
                )));
            }
            let key = name.to_lowercase();
            if seen.contains(&key) {
                return Err(ConfigError::Invalid(format!("duplicate device name '{name}'")));
            }
            seen.push(key);
        }
        for h in &self.interface.quick_hours {
            if !h.is_finite() || *h <= 0.0 || *h > MAX_HOURS_PER_DAY {
                return Err(ConfigError::Invalid(format!(
                    "interface.quick_hours entries must be within (0, 24] (got {h})"
                )));
            }
        }
        Ok(())
    }
}

/// 지정 경로의 설정 파일을 읽는다.
pub fn load_from(path: &Path) -> Result<Config, ConfigError> {
    let content = fs::read_to_string(path)?;
    let cfg = Config::from_toml_str(&content)?;
    log::info!(
        "loaded config from {} ({} devices)",
        path.display(),
        cfg.devices.len()
    );
    Ok(cfg)
}

/// 설정 파일이 있으면 읽고, 없으면 기본 설정을 돌려준다. 파일은 생성하지 않는다.
pub fn load_or_default(path: Option<&Path>) -> Result<Config, ConfigError> {
    let path = path.unwrap_or_else(|| Path::new(DEFAULT_CONFIG_PATH));
    if path.exists() {
        load_from(path)
    } else {
        log::debug!("{} not found, using built-in defaults", path.display());
        Ok(Config::default())
    }
}

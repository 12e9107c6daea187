use thiserror::Error;

use crate::config::{Config, ConfigError};
use crate::conversion::ConversionError;
use crate::estimator::ValidationFailure;
use crate::session::CalculatorSession;
use crate::ui_cli::{self, MenuChoice};

/// 애플리케이션 실행 중 발생 가능한 오류를 표현한다.
#[derive(Debug, Error)]
pub enum AppError {
    /// 파일 입출력 오류
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// 설정 로드 오류
    #[error("{0}")]
    Config(#[from] ConfigError),
    /// 단위 변환 오류
    #[error("{0}")]
    Conversion(#[from] ConversionError),
    /// 입력 검증 실패
    #[error("{0}")]
    Validation(#[from] ValidationFailure),
    /// 목록에 없는 기기 이름
    #[error("unknown device '{0}' (run `devices` to list presets)")]
    UnknownDevice(String),
    /// 결과 출력 직렬화 오류
    #[error("output error: {0}")]
    Output(#[from] toml::ser::Error),
}

/// 대화형 CLI의 메인 루프를 실행한다. 설정 변경은 이번 실행에만 적용된다.
pub fn run(config: &mut Config) -> Result<(), AppError> {
    let mut session = CalculatorSession::new(config.tariff.rate_per_unit);
    log::info!(
        "interactive session started (rate {} {}/kWh)",
        config.tariff.rate_per_unit,
        config.tariff.currency_code
    );
    loop {
        match ui_cli::main_menu(&session)? {
            MenuChoice::SelectDevice => ui_cli::handle_select_device(config, &mut session)?,
            MenuChoice::CustomWatts => ui_cli::handle_custom_watts(&mut session)?,
            MenuChoice::HoursPerDay => ui_cli::handle_hours(config, &mut session)?,
            MenuChoice::Calculate => ui_cli::handle_calculate(config, &mut session)?,
            MenuChoice::Settings => ui_cli::handle_settings(config, &mut session)?,
            MenuChoice::Help => ui_cli::print_help(config),
            MenuChoice::Exit => {
                println!("Don't fear electricity bills, use them wisely.");
                break;
            }
        }
    }
    Ok(())
}

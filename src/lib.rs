//! 전기요금 계산 로직을 라이브러리로 분리하여 CLI와 GUI가 함께 사용한다.

pub mod app;
pub mod config;
pub mod conversion;
pub mod devices;
pub mod estimator;
pub mod report;
pub mod session;
pub mod ui_cli;
pub mod units;

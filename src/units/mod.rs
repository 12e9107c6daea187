//! 단위 정의 및 변환 모듈 모음.

pub mod power;

pub use power::{convert_power, PowerUnit};

//! 표시용 단위 정의 및 변환 모듈 모음. 카탈로그 값은 항상 °F / psi 기준이다.

pub mod stress;
pub mod temperature;

pub use stress::{convert_stress, StressUnit};
pub use temperature::{convert_temperature, TemperatureUnit};

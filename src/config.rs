use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, info};

use crate::units::{StressUnit, TemperatureUnit};

const CONFIG_FILE: &str = "config.toml";

/// 사용 가능한 표시 단위 프리셋을 정의한다. 카탈로그 값 자체는 항상 °F / psi이다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UnitSystem {
    /// °F / psi. 카탈로그 원본 단위.
    Imperial,
    /// °F / ksi
    ImperialKsi,
    /// °C / MPa
    SI,
}

impl UnitSystem {
    pub fn temperature_unit(self) -> TemperatureUnit {
        match self {
            UnitSystem::Imperial | UnitSystem::ImperialKsi => TemperatureUnit::Fahrenheit,
            UnitSystem::SI => TemperatureUnit::Celsius,
        }
    }

    pub fn stress_unit(self) -> StressUnit {
        match self {
            UnitSystem::Imperial => StressUnit::Psi,
            UnitSystem::ImperialKsi => StressUnit::Ksi,
            UnitSystem::SI => StressUnit::MegaPascal,
        }
    }
}

/// 애플리케이션 설정을 표현한다. 선택 상태와 검색어는 저장하지 않는다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// "auto" 또는 언어 코드 (en-us, ko-kr ...)
    pub language: String,
    /// 사용자 언어팩(`<lang>.toml`) 디렉터리
    pub language_pack_dir: Option<String>,
    pub unit_system: UnitSystem,
    /// GUI 창 투명도 (0.3 ~ 1.0)
    pub window_alpha: f32,
    /// 차트에 샘플 지점 마커를 표시할지 여부
    pub show_points: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            language: "auto".to_string(),
            language_pack_dir: None,
            unit_system: UnitSystem::Imperial,
            window_alpha: 1.0,
            show_points: true,
        }
    }
}

/// 설정 로드/저장 시 발생 가능한 오류를 표현한다.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 파일 입출력 오류
    #[error("config I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML 역직렬화 오류
    #[error("config parse error: {0}")]
    Serde(#[from] toml::de::Error),
    /// TOML 직렬화 오류
    #[error("config serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// config.toml을 로드하거나 없으면 기본 설정을 생성한다.
pub fn load_or_default() -> Result<Config, ConfigError> {
    load_or_default_at(Path::new(CONFIG_FILE))
}

/// 지정 경로의 설정을 로드한다. 파일이 없으면 기본값을 그 경로에 저장한 뒤 반환한다.
pub fn load_or_default_at(path: &Path) -> Result<Config, ConfigError> {
    if path.exists() {
        let content = fs::read_to_string(path)?;
        let mut cfg: Config = toml::from_str(&content)?;
        cfg.window_alpha = cfg.window_alpha.clamp(0.3, 1.0);
        debug!(path = %path.display(), ?cfg, "config loaded");
        Ok(cfg)
    } else {
        let cfg = Config::default();
        save_config_at(&cfg, path)?;
        info!(path = %path.display(), "created default config");
        Ok(cfg)
    }
}

fn save_config_at(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    let content = toml::to_string_pretty(cfg)?;
    fs::write(path, content)?;
    Ok(())
}

impl Config {
    /// 설정을 config.toml에 저장한다.
    pub fn save(&self) -> Result<(), ConfigError> {
        save_config_at(self, Path::new(CONFIG_FILE))
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        save_config_at(self, path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("sgc-{}-{name}.toml", std::process::id()))
    }

    #[test]
    fn missing_file_is_created_with_defaults() {
        let path = temp_path("create");
        let _ = fs::remove_file(&path);
        let cfg = load_or_default_at(&path).unwrap();
        assert_eq!(cfg, Config::default());
        assert!(path.exists());
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn partial_file_fills_defaults_and_clamps_alpha() {
        let path = temp_path("partial");
        fs::write(&path, "unit_system = \"SI\"\nwindow_alpha = 0.05\n").unwrap();
        let cfg = load_or_default_at(&path).unwrap();
        assert_eq!(cfg.unit_system, UnitSystem::SI);
        assert_eq!(cfg.language, "auto");
        assert_eq!(cfg.window_alpha, 0.3);
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn saved_config_reloads() {
        let path = temp_path("save");
        let cfg = Config {
            language: "ko-kr".into(),
            unit_system: UnitSystem::ImperialKsi,
            show_points: false,
            ..Config::default()
        };
        cfg.save_to(&path).unwrap();
        assert_eq!(load_or_default_at(&path).unwrap(), cfg);
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn garbage_is_a_parse_error() {
        let path = temp_path("garbage");
        fs::write(&path, "unit_system = [").unwrap();
        assert!(matches!(load_or_default_at(&path), Err(ConfigError::Serde(_))));
        let _ = fs::remove_file(&path);
    }
}

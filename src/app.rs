use thiserror::Error;
use tracing::warn;

use crate::catalog::GradeError;
use crate::comparison::GradeComparison;
use crate::config::{Config, ConfigError};
use crate::i18n::{self, Translator};
use crate::ui_cli::{self, MenuChoice, TextPresenter};

/// 애플리케이션 실행 중 발생 가능한 오류를 표현한다.
#[derive(Debug, Error)]
pub enum AppError {
    /// 파일/콘솔 입출력 오류
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// 설정 저장/로드 오류
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
    /// 강종 조회/선택 오류
    #[error("{0}")]
    Grade(#[from] GradeError),
}

/// 한 번 출력하고 끝내는 비대화형 실행. `at_temp`가 있으면 선택된 강종의 해당 온도 강도를 함께 출력한다.
pub fn run_once(
    config: &Config,
    tr: &Translator,
    comparison: &GradeComparison,
    at_temp: Option<f64>,
) -> Result<(), AppError> {
    let mut presenter = TextPresenter::new(tr.clone(), config.unit_system);
    comparison.render(&mut presenter);
    if let Some(temp) = at_temp {
        for id in comparison.state().selected() {
            let line =
                ui_cli::strength_at_line(tr, config.unit_system, comparison.catalog(), id, temp)?;
            println!("{line}");
        }
    }
    Ok(())
}

/// CLI 애플리케이션의 메인 루프를 실행한다.
pub fn run(
    config: &mut Config,
    tr: &Translator,
    comparison: &mut GradeComparison,
) -> Result<(), AppError> {
    let mut presenter = TextPresenter::new(tr.clone(), config.unit_system);
    comparison.render(&mut presenter);
    loop {
        match ui_cli::main_menu(tr)? {
            MenuChoice::Search => {
                let term = ui_cli::prompt_search(tr)?;
                comparison.set_search_term(term)?;
            }
            MenuChoice::Toggle => {
                let id = ui_cli::prompt_grade(tr)?;
                // 없는 강종 선택은 상태를 바꾸지 않고 보고만 한다
                if let Err(e) = comparison.toggle_grade(&id) {
                    warn!(error = %e, "toggle rejected");
                    println!("{}: {e}", tr.t(i18n::keys::ERROR_PREFIX));
                    continue;
                }
            }
            MenuChoice::StrengthAt => {
                ui_cli::handle_strength_at(tr, config.unit_system, comparison)?;
                continue;
            }
            MenuChoice::Settings => {
                ui_cli::handle_settings(tr, config)?;
                config.save()?;
                presenter = TextPresenter::new(tr.clone(), config.unit_system);
            }
            MenuChoice::Exit => {
                config.save()?;
                println!("{}", tr.t(i18n::keys::APP_EXIT));
                break;
            }
        }
        comparison.render(&mut presenter);
    }
    Ok(())
}

//! 강종 비교 핵심 로직을 라이브러리로 분리하여 CLI와 GUI가 같은 상태/파생 계산을 공유한다.

pub mod app;
pub mod catalog;
pub mod comparison;
pub mod config;
pub mod details;
pub mod filter;
pub mod i18n;
pub mod logging;
pub mod selection;
pub mod series;
pub mod ui_cli;
pub mod units;

pub use catalog::{Catalog, GradeError, SteelGrade, TempPoint};
pub use comparison::{ComparisonView, GradeComparison, Presenter};
pub use selection::{SelectionState, Toggled};

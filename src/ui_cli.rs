use std::io::{self, Write};

use crate::app::AppError;
use crate::catalog::Catalog;
use crate::comparison::{ComparisonView, GradeComparison, Presenter};
use crate::config::{Config, UnitSystem};
use crate::details::format_stress;
use crate::i18n::{keys, Translator};
use crate::series::chart_rows;
use crate::units::{convert_stress, convert_temperature, StressUnit, TemperatureUnit};

/// 메인 메뉴 선택지를 표현한다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Search,
    Toggle,
    StrengthAt,
    Settings,
    Exit,
}

/// 비교 화면을 터미널 텍스트로 출력한다.
pub struct TextPresenter {
    tr: Translator,
    unit_system: UnitSystem,
}

impl TextPresenter {
    pub fn new(tr: Translator, unit_system: UnitSystem) -> Self {
        Self { tr, unit_system }
    }
}

impl Presenter for TextPresenter {
    fn render(&mut self, view: &ComparisonView<'_>) {
        print!("{}", format_view(&self.tr, self.unit_system, view));
    }
}

/// 목록 / 차트 표 / 상세 패널을 하나의 문자열로 만든다.
pub fn format_view(tr: &Translator, units: UnitSystem, view: &ComparisonView<'_>) -> String {
    let t_unit = units.temperature_unit();
    let s_unit = units.stress_unit();
    let mut out = format!("\n=== {} ===\n", tr.t(keys::APP_TITLE));
    if !view.search_term.is_empty() {
        out.push_str(&format!("[{}]\n", view.search_term));
    }

    out.push_str(&format!("-- {} --\n", tr.t(keys::LIST_HEADING)));
    if view.filtered.is_empty() {
        out.push_str(&format!("  {}\n", tr.t(keys::LIST_EMPTY)));
    }
    for g in view.filtered {
        let chevron = if view.is_selected(g.grade) { '▼' } else { '▶' };
        out.push_str(&format!("  {chevron} {} ({})\n", g.grade, g.kind));
    }

    out.push_str(&format!("-- {} --\n", tr.t(keys::COMPARE_HEADING)));
    if view.shows_placeholder() {
        out.push_str(&format!("  {}\n", tr.t(keys::COMPARE_PLACEHOLDER)));
        return out;
    }

    out.push_str(&format!(
        "  {:>14} |",
        format!("{} ({})", tr.t(keys::AXIS_TEMPERATURE), t_unit.symbol())
    ));
    for s in view.series {
        out.push_str(&format!(" {:>12} |", s.name));
    }
    out.push_str(&format!("  [{}]\n", s_unit.symbol()));
    for row in chart_rows(view.series) {
        let temp = convert_temperature(f64::from(row.temp_f), TemperatureUnit::Fahrenheit, t_unit);
        out.push_str(&format!("  {temp:>14.0} |"));
        for v in &row.values {
            let cell = match v {
                Some(psi) => format_number(*psi, s_unit),
                None => "-".to_string(),
            };
            out.push_str(&format!(" {cell:>12} |"));
        }
        out.push('\n');
    }

    for d in view.details {
        out.push_str(&format!("\n  {} ({})\n", d.grade, d.kind));
        out.push_str(&format!(
            "    {}: {}   {}: {}\n",
            tr.t(keys::DETAIL_YIELD),
            d.yield_text(s_unit),
            tr.t(keys::DETAIL_TENSILE),
            d.tensile_text(s_unit)
        ));
        out.push_str(&format!(
            "    {}: {}   {}: {}\n",
            tr.t(keys::DETAIL_ELONGATION),
            d.elongation_text(),
            tr.t(keys::DETAIL_CARBON),
            d.carbon_text()
        ));
        out.push_str(&format!(
            "    {}: {}\n",
            tr.t(keys::DETAIL_APPLICATIONS),
            d.applications
        ));
    }
    out
}

fn format_number(psi: u32, unit: StressUnit) -> String {
    let text = format_stress(psi, unit);
    // 표 칸에는 단위를 헤더로 빼고 숫자만 남긴다
    text.rsplit_once(' ').map(|(n, _)| n.to_string()).unwrap_or(text)
}

/// 표시 단위 온도에서의 보간 강도를 한 줄 문자열로 만든다.
pub fn strength_at_line(
    tr: &Translator,
    units: UnitSystem,
    catalog: &Catalog,
    grade_id: &str,
    temp: f64,
) -> Result<String, AppError> {
    let t_unit = units.temperature_unit();
    let temp_f = convert_temperature(temp, t_unit, TemperatureUnit::Fahrenheit);
    let value = catalog.strength_at(grade_id, temp_f)?;
    let s_unit = units.stress_unit();
    let strength = convert_stress(value.strength_psi, StressUnit::Psi, s_unit);
    let mut line = format!(
        "{grade_id} @ {temp}{}: {} {strength:.1} {}",
        t_unit.symbol(),
        tr.t(keys::RESULT_STRENGTH_AT),
        s_unit.symbol()
    );
    if value.clamped {
        line.push(' ');
        line.push_str(&tr.t(keys::RESULT_CLAMPED));
    }
    Ok(line)
}

/// 메인 메뉴를 표시하고 선택값을 반환한다.
pub fn main_menu(tr: &Translator) -> Result<MenuChoice, AppError> {
    println!();
    for key in [
        keys::MAIN_MENU_SEARCH,
        keys::MAIN_MENU_TOGGLE,
        keys::MAIN_MENU_STRENGTH_AT,
        keys::MAIN_MENU_SETTINGS,
        keys::MAIN_MENU_EXIT,
    ] {
        println!("{}", tr.t(key));
    }
    loop {
        let sel = read_line(&tr.t(keys::PROMPT_MENU_SELECT))?;
        match sel.trim() {
            "1" => return Ok(MenuChoice::Search),
            "2" => return Ok(MenuChoice::Toggle),
            "3" => return Ok(MenuChoice::StrengthAt),
            "4" => return Ok(MenuChoice::Settings),
            "0" => return Ok(MenuChoice::Exit),
            _ => println!("{}", tr.t(keys::INVALID_SELECTION_RETRY)),
        }
    }
}

/// 검색어를 입력받는다. 줄바꿈만 제거하고 나머지 공백은 그대로 둔다.
pub fn prompt_search(tr: &Translator) -> Result<String, AppError> {
    let s = read_line(&tr.t(keys::PROMPT_SEARCH))?;
    Ok(s.trim_end_matches(['\r', '\n']).to_string())
}

pub fn prompt_grade(tr: &Translator) -> Result<String, AppError> {
    Ok(read_line(&tr.t(keys::PROMPT_GRADE))?.trim().to_string())
}

/// 온도별 강도 조회 메뉴를 처리한다. 선택이 없으면 입력한 강종 하나를 조회한다.
pub fn handle_strength_at(
    tr: &Translator,
    units: UnitSystem,
    comparison: &GradeComparison,
) -> Result<(), AppError> {
    let temp = read_f64(tr, &format!(
        "{}[{}] ",
        tr.t(keys::PROMPT_TEMPERATURE),
        units.temperature_unit().symbol()
    ))?;
    let ids: Vec<String> = if comparison.state().selected().is_empty() {
        vec![prompt_grade(tr)?]
    } else {
        comparison
            .state()
            .selected()
            .iter()
            .map(|s| s.to_string())
            .collect()
    };
    for id in ids {
        match strength_at_line(tr, units, comparison.catalog(), &id, temp) {
            Ok(line) => println!("{line}"),
            Err(e) => println!("{}: {e}", tr.t(keys::ERROR_PREFIX)),
        }
    }
    Ok(())
}

/// 설정 메뉴를 처리한다.
pub fn handle_settings(tr: &Translator, cfg: &mut Config) -> Result<(), AppError> {
    println!("{}", tr.t(keys::SETTINGS_HEADING));
    println!("{} {:?}", tr.t(keys::SETTINGS_CURRENT_UNIT_SYSTEM), cfg.unit_system);
    println!("{}", tr.t(keys::SETTINGS_OPTIONS));
    let sel = read_line(&tr.t(keys::SETTINGS_PROMPT_CHANGE))?;
    if sel.trim().is_empty() {
        return Ok(());
    }
    cfg.unit_system = match sel.trim() {
        "1" => UnitSystem::Imperial,
        "2" => UnitSystem::ImperialKsi,
        "3" => UnitSystem::SI,
        _ => {
            println!("{}", tr.t(keys::SETTINGS_INVALID));
            return Ok(());
        }
    };
    println!("{} {:?}", tr.t(keys::SETTINGS_SAVED), cfg.unit_system);
    Ok(())
}

fn read_line(prompt: &str) -> Result<String, AppError> {
    print!("{prompt}");
    io::stdout().flush()?;
    let mut buf = String::new();
    io::stdin().read_line(&mut buf)?;
    Ok(buf)
}

fn read_f64(tr: &Translator, prompt: &str) -> Result<f64, AppError> {
    loop {
        let s = read_line(prompt)?;
        match s.trim().parse::<f64>() {
            Ok(v) => return Ok(v),
            Err(_) => println!("{}", tr.t(keys::ERROR_INVALID_NUMBER)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn en() -> Translator {
        Translator::new("en-us")
    }

    #[test]
    fn placeholder_when_nothing_selected() {
        let cmp = GradeComparison::default();
        let text = format_view(&en(), UnitSystem::Imperial, &cmp.view());
        assert!(text.contains("Select steel grades to compare properties"));
        assert!(text.contains("▶ A36 (Carbon Steel)"));
        assert!(!text.contains("Yield Strength"));
    }

    #[test]
    fn selected_grades_render_table_and_details() {
        let mut cmp = GradeComparison::default();
        cmp.toggle_grade("A36").unwrap();
        let text = format_view(&en(), UnitSystem::Imperial, &cmp.view());
        assert!(text.contains("▼ A36"));
        assert!(text.contains("40,000"));
        assert!(text.contains("Yield Strength: 36,000 psi"));
        assert!(text.contains("Applications: Construction, General Purpose"));
    }

    #[test]
    fn strength_line_in_si_units() {
        let cat = Catalog::builtin();
        // 93.33°C ≈ 200°F
        let line = strength_at_line(&en(), UnitSystem::SI, &cat, "A36", 93.333_333_333).unwrap();
        assert!(line.contains("262.0 MPa"), "{line}");
        let err = strength_at_line(&en(), UnitSystem::SI, &cat, "nope", 0.0).unwrap_err();
        assert!(matches!(err, AppError::Grade(_)));
    }
}

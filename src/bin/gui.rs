#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

//! eframe/egui 기반 데스크톱 GUI 진입점.

use eframe::{egui, App, Frame};
use egui_plot::{Legend, Line, Plot, Points, VLine};
use image::GenericImageView;
use std::{env, fs, path::Path};
use steel_grade_comparison::{
    catalog::Catalog,
    comparison::{ComparisonView, GradeComparison, Presenter},
    config::{self, UnitSystem},
    i18n::{self, keys, Translator},
    logging,
    units::{convert_stress, convert_temperature, StressUnit, TemperatureUnit},
};
use tracing::{info, warn};

fn main() -> Result<(), eframe::Error> {
    logging::init();
    // CLI 언어 옵션 처리: --lang xx 또는 --lang=xx (xx: auto/en-us/ko-kr/ko)
    let mut cli_lang: Option<String> = None;
    let args: Vec<String> = env::args().collect();
    let mut i = 1;
    while i < args.len() {
        let a = &args[i];
        if let Some(val) = a.strip_prefix("--lang=") {
            cli_lang = Some(val.to_string());
        } else if (a == "--lang" || a == "-L") && i + 1 < args.len() {
            cli_lang = Some(args[i + 1].clone());
            i += 1;
        }
        i += 1;
    }

    let mut viewport = egui::ViewportBuilder::default()
        .with_inner_size(egui::vec2(1100.0, 720.0))
        .with_transparent(true);
    if let Some(icon) = load_app_icon() {
        viewport = viewport.with_icon(icon);
    }
    let options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };
    let mut app_cfg = config::load_or_default().unwrap_or_else(|e| {
        warn!(error = %e, "config load failed, using defaults");
        config::Config::default()
    });
    if let Some(lang_cli) = cli_lang {
        app_cfg.language = i18n::resolve_language(&lang_cli, Some(app_cfg.language.as_str()));
    }
    eframe::run_native(
        "Steel Grade Comparison Tool",
        options,
        Box::new(move |cc| {
            if let Err(e) = setup_fonts(&cc.egui_ctx) {
                warn!("font setup: {e}");
            }
            let base_style = (*cc.egui_ctx.style()).clone();
            Box::new(GuiApp::new(app_cfg.clone(), base_style))
        }),
    )
}

fn load_app_icon() -> Option<egui::IconData> {
    let search = ["icon.png", "assets/icon.png", "../icon.png"];
    let path = search.iter().find(|p| Path::new(*p).exists())?;
    let bytes = fs::read(path).ok()?;
    let img = image::load_from_memory(&bytes).ok()?;
    let rgba = img.to_rgba8();
    let (w, h) = img.dimensions();
    Some(egui::IconData {
        rgba: rgba.into_raw(),
        width: w,
        height: h,
    })
}

/// 공통: 바이너리 폰트 바이트를 egui에 등록.
fn apply_font_bytes(ctx: &egui::Context, bytes: Vec<u8>, name: &str) {
    let mut fonts = egui::FontDefinitions::default();
    let font_name = name.to_string();
    fonts
        .font_data
        .insert(font_name.clone(), egui::FontData::from_owned(bytes));
    fonts
        .families
        .entry(egui::FontFamily::Proportional)
        .or_default()
        .insert(0, font_name.clone());
    fonts
        .families
        .entry(egui::FontFamily::Monospace)
        .or_default()
        .push(font_name);
    ctx.set_fonts(fonts);
}

/// 한글 표시용 폰트를 찾아 적용한다.
/// 1) assets/fonts/malgun.ttf
/// 2) Windows 시스템 폰트(맑은 고딕/굴림 등)
/// 3) 모두 실패 시 Err (기본 폰트 유지, 영문 UI는 그대로 동작)
fn setup_fonts(ctx: &egui::Context) -> Result<(), String> {
    let asset_path = Path::new("assets/fonts/malgun.ttf");
    if asset_path.exists() {
        let bytes = fs::read(asset_path).map_err(|e| format!("Failed to read font file: {e}"))?;
        apply_font_bytes(ctx, bytes, "korean_font");
        return Ok(());
    }

    if let Some(windir) = env::var_os("WINDIR") {
        let fonts = Path::new(&windir).join("Fonts");
        for cand in ["malgun.ttf", "gulim.ttc", "batang.ttc"] {
            let p = fonts.join(cand);
            if p.exists() {
                let bytes = fs::read(&p)
                    .map_err(|e| format!("Failed to read system font ({}): {e}", p.display()))?;
                apply_font_bytes(ctx, bytes, "korean_font");
                return Ok(());
            }
        }
    }

    Err("Korean font not found; using default fonts.".into())
}

fn color32(c: steel_grade_comparison::series::Rgb) -> egui::Color32 {
    egui::Color32::from_rgb(c.0, c.1, c.2)
}

/// 목록/차트/상세 패널을 egui로 그리는 표시 계층. 클릭된 강종은 `clicked`에 남긴다.
struct EguiPresenter<'u> {
    ui: &'u mut egui::Ui,
    tr: &'u Translator,
    catalog: &'u Catalog,
    unit_system: UnitSystem,
    show_points: bool,
    probe_temp_f: f64,
    clicked: Option<&'static str>,
}

impl Presenter for EguiPresenter<'_> {
    fn render(&mut self, view: &ComparisonView<'_>) {
        let tr = self.tr;
        let catalog = self.catalog;
        let units = self.unit_system;
        let show_points = self.show_points;
        let probe = self.probe_temp_f;
        let mut clicked = None;
        self.ui.columns(2, |cols| {
            cols[0].heading(tr.t(keys::LIST_HEADING));
            cols[0].separator();
            if let Some(id) = grade_list_ui(&mut cols[0], tr, view) {
                clicked = Some(id);
            }
            cols[1].heading(tr.t(keys::COMPARE_HEADING));
            cols[1].separator();
            if view.shows_placeholder() {
                placeholder_ui(&mut cols[1], tr);
            } else {
                chart_ui(&mut cols[1], tr, view, units, show_points, probe);
                probe_ui(&mut cols[1], catalog, view, units, probe);
                details_ui(&mut cols[1], tr, view, units.stress_unit());
            }
        });
        self.clicked = clicked;
    }
}

fn grade_list_ui(ui: &mut egui::Ui, tr: &Translator, view: &ComparisonView<'_>) -> Option<&'static str> {
    if view.filtered.is_empty() {
        ui.weak(tr.t(keys::LIST_EMPTY));
        return None;
    }
    let mut clicked = None;
    for g in view.filtered {
        let selected = view.is_selected(g.grade);
        let chevron = if selected { "▼" } else { "▶" };
        let text = egui::RichText::new(format!("{chevron} {}  ({})", g.grade, g.kind));
        let text = if selected { text.strong() } else { text };
        if ui.selectable_label(selected, text).clicked() {
            clicked = Some(g.grade);
        }
    }
    clicked
}

fn placeholder_ui(ui: &mut egui::Ui, tr: &Translator) {
    ui.vertical_centered(|ui| {
        ui.add_space(60.0);
        ui.label(egui::RichText::new("ℹ").size(28.0));
        ui.weak(tr.t(keys::COMPARE_PLACEHOLDER));
    });
}

fn chart_ui(
    ui: &mut egui::Ui,
    tr: &Translator,
    view: &ComparisonView<'_>,
    units: UnitSystem,
    show_points: bool,
    probe_temp_f: f64,
) {
    let t_unit = units.temperature_unit();
    let s_unit = units.stress_unit();
    let to_xy = |temp_f: f64, psi: f64| {
        [
            convert_temperature(temp_f, TemperatureUnit::Fahrenheit, t_unit),
            convert_stress(psi, StressUnit::Psi, s_unit),
        ]
    };
    Plot::new("strength_vs_temperature")
        .height(300.0)
        .x_axis_label(format!("{} ({})", tr.t(keys::AXIS_TEMPERATURE), t_unit.symbol()))
        .y_axis_label(format!("{} ({})", tr.t(keys::AXIS_STRENGTH), s_unit.symbol()))
        .legend(Legend::default())
        .show(ui, |plot_ui| {
            for s in view.series {
                let pts: Vec<[f64; 2]> = s
                    .points
                    .iter()
                    .map(|p| to_xy(f64::from(p.temp_f), f64::from(p.strength_psi)))
                    .collect();
                if show_points {
                    plot_ui.points(
                        Points::new(pts.clone())
                            .name(s.name)
                            .color(color32(s.color))
                            .radius(3.0),
                    );
                }
                plot_ui.line(Line::new(pts).name(s.name).color(color32(s.color)).width(2.0));
            }
            let x = to_xy(probe_temp_f, 0.0)[0];
            plot_ui.vline(VLine::new(x).color(egui::Color32::GRAY));
        });
}

fn probe_ui(
    ui: &mut egui::Ui,
    catalog: &Catalog,
    view: &ComparisonView<'_>,
    units: UnitSystem,
    probe_temp_f: f64,
) {
    let t_unit = units.temperature_unit();
    let s_unit = units.stress_unit();
    ui.horizontal_wrapped(|ui| {
        let t = convert_temperature(probe_temp_f, TemperatureUnit::Fahrenheit, t_unit);
        ui.label(format!("@ {t:.0}{}:", t_unit.symbol()));
        for s in view.series {
            if let Ok(v) = catalog.strength_at(s.name, probe_temp_f) {
                let value = convert_stress(v.strength_psi, StressUnit::Psi, s_unit);
                ui.colored_label(
                    color32(s.color),
                    format!("{} {value:.1} {}", s.name, s_unit.symbol()),
                );
            }
        }
    });
}

fn details_ui(ui: &mut egui::Ui, tr: &Translator, view: &ComparisonView<'_>, s_unit: StressUnit) {
    for d in view.details {
        ui.separator();
        ui.strong(d.grade);
        egui::Grid::new(("detail", d.grade))
            .num_columns(2)
            .spacing([16.0, 4.0])
            .show(ui, |ui| {
                ui.label(format!("{}: {}", tr.t(keys::DETAIL_YIELD), d.yield_text(s_unit)));
                ui.label(format!("{}: {}", tr.t(keys::DETAIL_TENSILE), d.tensile_text(s_unit)));
                ui.end_row();
                ui.label(format!("{}: {}", tr.t(keys::DETAIL_ELONGATION), d.elongation_text()));
                ui.label(format!("{}: {}", tr.t(keys::DETAIL_CARBON), d.carbon_text()));
                ui.end_row();
            });
        ui.horizontal_wrapped(|ui| {
            ui.strong(format!("{}:", tr.t(keys::DETAIL_APPLICATIONS)));
            ui.label(d.applications.as_str());
        });
    }
}

/// 투명도를 적용할 기준 스타일에서 패널 배경만 흐리게 한 스타일을 만든다.
fn faded_style(base: &egui::Style, alpha: f32) -> egui::Style {
    let mut style = base.clone();
    style.visuals.panel_fill = base.visuals.panel_fill.linear_multiply(alpha);
    style
}

struct GuiApp {
    config: config::Config,
    // 생성 시점의 스타일. 매 프레임 이 값에서 투명도를 다시 계산한다
    base_style: egui::Style,
    tr: Translator,
    comparison: GradeComparison,
    search_input: String,
    probe_temp_f: f64,
    status: Option<String>,
    show_settings_modal: bool,
    lang_input: String,
}

impl GuiApp {
    fn new(config: config::Config, base_style: egui::Style) -> Self {
        let lang_code = i18n::resolve_language("auto", Some(config.language.as_str()));
        let tr = Translator::new_with_pack(&lang_code, config.language_pack_dir.as_deref());
        info!(lang = tr.language_code(), units = ?config.unit_system, "gui started");
        Self {
            lang_input: config.language.clone(),
            config,
            base_style,
            tr,
            comparison: GradeComparison::default(),
            search_input: String::new(),
            probe_temp_f: 400.0,
            status: None,
            show_settings_modal: false,
        }
    }

    fn on_search_changed(&mut self) {
        if let Err(e) = self.comparison.set_search_term(self.search_input.clone()) {
            self.report(e);
        }
    }

    fn on_grade_clicked(&mut self, grade_id: &str) {
        if let Err(e) = self.comparison.toggle_grade(grade_id) {
            self.report(e);
        }
    }

    fn report(&mut self, e: impl std::fmt::Display) {
        warn!(error = %e, "command failed");
        self.status = Some(format!("{}: {e}", self.tr.t(keys::ERROR_PREFIX)));
    }

    fn ui_settings(&mut self, ctx: &egui::Context) {
        let mut open = self.show_settings_modal;
        let mut new_unit_system = self.config.unit_system;
        egui::Window::new(self.tr.t(keys::SETTINGS_HEADING).trim().trim_matches('-').trim())
            .collapsible(false)
            .resizable(true)
            .open(&mut open)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    for (label, us) in [
                        ("Imperial (°F/psi)", UnitSystem::Imperial),
                        ("Imperial (°F/ksi)", UnitSystem::ImperialKsi),
                        ("SI (°C/MPa)", UnitSystem::SI),
                    ] {
                        ui.selectable_value(&mut new_unit_system, us, label);
                    }
                });
                ui.separator();
                ui.checkbox(&mut self.config.show_points, "Markers");
                ui.add(egui::Slider::new(&mut self.config.window_alpha, 0.3..=1.0).text("alpha"));
                ui.separator();
                egui::ComboBox::from_id_source("lang_choice")
                    .selected_text(&self.lang_input)
                    .show_ui(ui, |ui| {
                        ui.selectable_value(&mut self.lang_input, "auto".into(), "System");
                        ui.selectable_value(&mut self.lang_input, "en-us".into(), "English (US)");
                        ui.selectable_value(&mut self.lang_input, "ko-kr".into(), "한국어");
                    });
                if ui.button("Save").clicked() {
                    self.config.language = self.lang_input.clone();
                    let resolved = i18n::resolve_language(&self.config.language, None);
                    self.tr = Translator::new_with_pack(&resolved, self.config.language_pack_dir.as_deref());
                    self.status = Some(match self.config.save() {
                        Ok(()) => "Saved.".to_string(),
                        Err(e) => format!("Save error: {e}"),
                    });
                }
            });
        self.config.unit_system = new_unit_system;
        self.show_settings_modal = open;
    }
}

impl App for GuiApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut Frame) {
        ctx.set_style(faded_style(&self.base_style, self.config.window_alpha));

        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading(self.tr.t(keys::APP_TITLE));
                ui.separator();
                if ui.button("⚙").clicked() {
                    self.show_settings_modal = true;
                }
                if let Some(msg) = &self.status {
                    ui.weak(msg);
                }
            });
        });

        if self.show_settings_modal {
            self.ui_settings(ctx);
        }

        egui::TopBottomPanel::bottom("probe_bar").show(ctx, |ui| {
            let t_unit = self.config.unit_system.temperature_unit();
            ui.horizontal(|ui| {
                ui.label(format!("{} (°F)", self.tr.t(keys::AXIS_TEMPERATURE)));
                ui.add(egui::Slider::new(&mut self.probe_temp_f, 0.0..=800.0).step_by(10.0));
                if t_unit != TemperatureUnit::Fahrenheit {
                    let t = convert_temperature(self.probe_temp_f, TemperatureUnit::Fahrenheit, t_unit);
                    ui.weak(format!("= {t:.0}{}", t_unit.symbol()));
                }
            });
        });

        let mut clicked = None;
        egui::CentralPanel::default().show(ctx, |ui| {
            let search = egui::TextEdit::singleline(&mut self.search_input)
                .hint_text(self.tr.t(keys::SEARCH_PLACEHOLDER))
                .desired_width(f32::INFINITY);
            let search_changed = ui.add(search).changed();
            ui.add_space(8.0);
            egui::ScrollArea::vertical()
                .auto_shrink([false; 2])
                .show(ui, |ui| {
                    let mut presenter = EguiPresenter {
                        ui,
                        tr: &self.tr,
                        catalog: self.comparison.catalog(),
                        unit_system: self.config.unit_system,
                        show_points: self.config.show_points,
                        probe_temp_f: self.probe_temp_f,
                        clicked: None,
                    };
                    self.comparison.render(&mut presenter);
                    clicked = presenter.clicked;
                });
            if search_changed {
                clicked = None;
                self.on_search_changed();
            }
        });
        if let Some(id) = clicked {
            self.on_grade_clicked(id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_app_starts_with_empty_selection() {
        let app = GuiApp::new(config::Config::default(), egui::Style::default());
        assert!(app.comparison.view().shows_placeholder());
        assert_eq!(app.comparison.view().filtered.len(), 3);
    }

    #[test]
    fn search_input_drives_filter() {
        let mut app = GuiApp::new(config::Config::default(), egui::Style::default());
        app.search_input = "high".into();
        app.on_search_changed();
        let ids: Vec<_> = app.comparison.view().filtered.iter().map(|g| g.grade).collect();
        assert_eq!(ids, vec!["A572-50"]);
    }

    #[test]
    fn clicks_toggle_and_unknown_ids_report() {
        let mut app = GuiApp::new(config::Config::default(), egui::Style::default());
        app.on_grade_clicked("A36");
        app.on_grade_clicked("A992");
        app.on_grade_clicked("A36");
        assert_eq!(app.comparison.view().selected, &["A992"]);
        app.on_grade_clicked("B1");
        assert!(app.status.is_some());
        assert_eq!(app.comparison.view().selected, &["A992"]);
    }

    #[test]
    fn window_alpha_does_not_compound_across_frames() {
        let mut cfg = config::Config::default();
        cfg.window_alpha = 0.5;
        let app = GuiApp::new(cfg, egui::Style::default());
        let expected = app.base_style.visuals.panel_fill.linear_multiply(0.5);
        let frames: Vec<egui::Color32> = (0..10)
            .map(|_| faded_style(&app.base_style, app.config.window_alpha).visuals.panel_fill)
            .collect();
        assert!(frames.iter().all(|c| *c == expected));
    }
}

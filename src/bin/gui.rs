#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

//! eframe/egui 기반 데스크톱 GUI 진입점.

use eframe::{egui, App, Frame};
use electricity_cost_calculator::{
    config,
    estimator::{FORMULA_LINES, MAX_HOURS_PER_DAY},
    report::EstimateReport,
    session::{self, CalculatorSession},
    units::PowerUnit,
};
use image::GenericImageView;
use rfd::FileDialog;
use std::{env, fs, path::Path, path::PathBuf, time::Duration};

const GREEN: egui::Color32 = egui::Color32::from_rgb(22, 163, 74);
const PURPLE: egui::Color32 = egui::Color32::from_rgb(147, 51, 234);
const CARD_BLUE: egui::Color32 = egui::Color32::from_rgb(239, 246, 255);
const CARD_GREEN: egui::Color32 = egui::Color32::from_rgb(240, 253, 244);
const CARD_PURPLE: egui::Color32 = egui::Color32::from_rgb(250, 245, 255);
const CARD_YELLOW: egui::Color32 = egui::Color32::from_rgb(254, 252, 232);
const SPLASH_BG: egui::Color32 = egui::Color32::from_rgb(79, 70, 229);
const WARN_RED: egui::Color32 = egui::Color32::from_rgb(220, 38, 38);

fn main() -> Result<(), eframe::Error> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // CLI 옵션 처리: --config path 또는 --config=path
    let mut cli_config: Option<PathBuf> = None;
    let args: Vec<String> = env::args().collect();
    let mut i = 1;
    while i < args.len() {
        let a = &args[i];
        if let Some(val) = a.strip_prefix("--config=") {
            cli_config = Some(PathBuf::from(val));
        } else if a == "--config" || a == "-c" {
            if i + 1 < args.len() {
                cli_config = Some(PathBuf::from(&args[i + 1]));
                i += 1;
            }
        }
        i += 1;
    }

    let app_cfg = config::load_or_default(cli_config.as_deref()).unwrap_or_else(|e| {
        log::warn!("Failed to load config, using defaults: {e}");
        config::Config::default()
    });

    let mut viewport = egui::ViewportBuilder::default()
        .with_inner_size([760.0, 900.0])
        .with_transparent(true);
    if let Some(icon) = load_app_icon() {
        viewport = viewport.with_icon(icon);
    }
    let options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };
    log::info!(
        "Starting Electricity Cost Calculator v{}",
        env!("CARGO_PKG_VERSION")
    );
    eframe::run_native(
        "Electricity Cost Calculator",
        options,
        Box::new(move |cc| {
            if let Err(e) = setup_fonts(&cc.egui_ctx) {
                log::warn!("{e}");
            }
            cc.egui_ctx.set_pixels_per_point(app_cfg.interface.ui_scale.clamp(0.8, 1.6));
            Box::new(GuiApp::new(app_cfg))
        }),
    )
}

fn load_app_icon() -> Option<egui::IconData> {
    let search = ["icon.png", "assets/icon.png", "../icon.png", "../../assets/icon.png"];
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

/// 폰트 바이트를 egui에 등록한다. `primary`가 아니면 기본 폰트 뒤의 대체 폰트로 둔다.
fn apply_font_bytes(ctx: &egui::Context, bytes: Vec<u8>, name: &str, primary: bool) {
    let mut fonts = egui::FontDefinitions::default();
    let font_name = name.to_string();
    fonts
        .font_data
        .insert(font_name.clone(), egui::FontData::from_owned(bytes));
    for family in [egui::FontFamily::Proportional, egui::FontFamily::Monospace] {
        let list = fonts.families.entry(family).or_default();
        if primary {
            list.insert(0, font_name.clone());
        } else {
            list.push(font_name.clone());
        }
    }
    ctx.set_fonts(fonts);
}

/// 통화 기호(₹ 등)가 기본 폰트에 없을 수 있어 시스템 폰트를 대체 폰트로 붙인다.
fn setup_fonts(ctx: &egui::Context) -> Result<(), String> {
    let mut candidates: Vec<PathBuf> = Vec::new();
    if let Some(windir) = env::var_os("WINDIR") {
        let fonts = Path::new(&windir).join("Fonts");
        candidates.push(fonts.join("Nirmala.ttf"));
        candidates.push(fonts.join("seguisym.ttf"));
    }
    candidates.push(PathBuf::from("assets/fonts/fallback.ttf"));
    candidates.push(PathBuf::from("/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf"));
    candidates.push(PathBuf::from("/usr/share/fonts/TTF/DejaVuSans.ttf"));
    candidates.push(PathBuf::from(
        "/System/Library/Fonts/Supplemental/Arial Unicode.ttf",
    ));

    for p in candidates {
        if p.exists() {
            let bytes = fs::read(&p)
                .map_err(|e| format!("Failed to read system font ({}): {e}", p.display()))?;
            apply_font_bytes(ctx, bytes, "fallback_font", false);
            log::info!("fallback font loaded from {}", p.display());
            return Ok(());
        }
    }
    Err("No fallback font found; currency symbols may not render. Load a font in settings.".into())
}

/// 사용자가 선택한 경로의 폰트를 egui에 등록한다.
fn load_custom_font(ctx: &egui::Context, path: &Path) -> Result<(), String> {
    if !path.exists() {
        return Err(format!("Font file not found: {}", path.display()));
    }
    let bytes = fs::read(path).map_err(|e| format!("Failed to read font file: {e}"))?;
    apply_font_bytes(ctx, bytes, "user_font", true);
    Ok(())
}

/// 결과 카드 하나를 그린다.
fn cost_card(
    ui: &mut egui::Ui,
    title: &str,
    amount: &str,
    units: &str,
    fill: egui::Color32,
    accent: egui::Color32,
) {
    egui::Frame::none()
        .fill(fill)
        .rounding(16.0)
        .inner_margin(16.0)
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.label(egui::RichText::new(title).size(18.0).color(egui::Color32::DARK_GRAY));
            ui.label(egui::RichText::new(amount).size(40.0).strong().color(accent));
            ui.label(
                egui::RichText::new(format!("({units} units)"))
                    .size(14.0)
                    .color(egui::Color32::GRAY),
            );
        });
}

struct GuiApp {
    config: config::Config,
    session: CalculatorSession,
    validation_messages: Vec<String>,
    // 스플래시
    splash_pending: bool,
    splash_started: Option<f64>,
    // 모달
    show_settings_modal: bool,
    show_help_modal: bool,
    show_formula_modal: bool,
    // 설정 (이번 실행에만 적용)
    settings_rate_input: String,
    settings_symbol_input: String,
    settings_status: Option<String>,
    ui_scale: f32,
    window_alpha: f32,
    always_on_top: bool,
    font_status: Option<String>,
}

impl GuiApp {
    fn new(config: config::Config) -> Self {
        let session = CalculatorSession::new(config.tariff.rate_per_unit);
        let splash_pending =
            config.interface.splash_enabled && config.interface.splash_duration_ms > 0;
        Self {
            session,
            validation_messages: Vec::new(),
            splash_pending,
            splash_started: None,
            show_settings_modal: false,
            show_help_modal: false,
            show_formula_modal: false,
            settings_rate_input: config.tariff.rate_per_unit.to_string(),
            settings_symbol_input: config.tariff.currency_symbol.clone(),
            settings_status: None,
            ui_scale: config.interface.ui_scale.clamp(0.8, 1.6),
            window_alpha: config.interface.window_alpha.clamp(0.3, 1.0),
            always_on_top: false,
            font_status: None,
            config,
        }
    }

    /// 스플래시를 계속 보여줄지 판단한다. 처음 호출된 시각부터 설정 시간이 지나면 닫는다.
    fn splash_visible(&mut self, now: f64) -> bool {
        if !self.splash_pending {
            return false;
        }
        let started = *self.splash_started.get_or_insert(now);
        let duration = self.config.interface.splash_duration_ms as f64 / 1000.0;
        if now - started >= duration {
            self.splash_pending = false;
        }
        self.splash_pending
    }

    fn splash_remaining(&self, now: f64) -> Duration {
        let duration = self.config.interface.splash_duration_ms as f64 / 1000.0;
        let elapsed = self.splash_started.map(|s| now - s).unwrap_or(0.0);
        Duration::from_secs_f64((duration - elapsed).max(0.0))
    }

    fn run_calculation(&mut self) {
        match self.session.calculate() {
            Ok(_) => self.validation_messages.clear(),
            Err(failure) => {
                log::debug!("calculation rejected: {failure}");
                self.validation_messages = session::describe_failure(&failure);
            }
        }
    }

    /// 설정 창의 요금/통화 입력을 검증해 이번 세션에 반영한다.
    fn apply_tariff_inputs(&mut self) -> Result<(), String> {
        let text = self.settings_rate_input.trim();
        let rate = text
            .parse::<f64>()
            .ok()
            .filter(|r| r.is_finite() && *r >= 0.0)
            .ok_or_else(|| "Rate must be a number >= 0".to_string())?;
        let symbol = self.settings_symbol_input.trim();
        if symbol.is_empty() {
            return Err("Currency symbol must not be empty".to_string());
        }
        self.session.set_rate(text);
        self.config.tariff.rate_per_unit = rate;
        self.config.tariff.currency_symbol = symbol.to_string();
        log::info!("rate changed to {rate} {symbol}/kWh for this session");
        Ok(())
    }

    fn ui_splash(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default()
            .frame(egui::Frame::none().fill(SPLASH_BG))
            .show(ctx, |ui| {
                ui.vertical_centered(|ui| {
                    ui.add_space(ui.available_height() * 0.3);
                    ui.label(egui::RichText::new("⚡").size(72.0).color(egui::Color32::YELLOW));
                    ui.add_space(16.0);
                    ui.label(
                        egui::RichText::new("Electricity Cost Calculator")
                            .size(36.0)
                            .strong()
                            .color(egui::Color32::WHITE),
                    );
                    ui.label(
                        egui::RichText::new(&self.config.interface.greeting)
                            .size(20.0)
                            .color(egui::Color32::LIGHT_BLUE),
                    );
                    ui.add_space(24.0);
                    ui.label(egui::RichText::new("● ● ●").size(16.0).color(egui::Color32::WHITE));
                });
            });
    }

    fn ui_header(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.heading("⚡ Electricity Cost Calculator");
            ui.separator();
            if ui.button("Formula").clicked() {
                self.show_formula_modal = true;
            }
            if ui.button("Settings").clicked() {
                self.show_settings_modal = true;
            }
            if ui.button("Help").clicked() {
                self.show_help_modal = true;
            }
        });
        ui.label("Know your electricity bill in advance");
    }

    fn ui_inputs(&mut self, ui: &mut egui::Ui) {
        ui.heading("1. Select Device");
        ui.add_space(6.0);
        let mut picked: Option<usize> = None;
        ui.horizontal_wrapped(|ui| {
            for (idx, device) in self.config.devices.iter().enumerate() {
                let selected = self
                    .session
                    .selected_device()
                    .map(|d| d.name == device.name)
                    .unwrap_or(false);
                let text = format!("{}\n{}\n{} W", device.icon, device.name, device.watts);
                let button = egui::Button::new(egui::RichText::new(text).size(16.0))
                    .fill(if selected {
                        ui.visuals().selection.bg_fill
                    } else {
                        ui.visuals().extreme_bg_color
                    })
                    .min_size(egui::vec2(150.0, 90.0));
                if ui.add(button).clicked() {
                    picked = Some(idx);
                }
            }
        });
        if let Some(idx) = picked {
            if let Some(device) = self.config.devices.get(idx) {
                self.session.select_device(device);
            }
        }

        ui.add_space(16.0);
        ui.heading("Or Enter Custom Watts");
        ui.horizontal(|ui| {
            let mut custom = self.session.custom_power().to_string();
            let edit = egui::TextEdit::singleline(&mut custom)
                .hint_text("e.g. 100")
                .desired_width(220.0);
            if ui.add(edit).changed() {
                self.session.set_custom_power(&custom);
            }
            let mut unit = self.session.custom_unit();
            egui::ComboBox::from_id_source("custom_unit")
                .selected_text(unit.symbol())
                .show_ui(ui, |ui| {
                    for u in PowerUnit::ALL {
                        ui.selectable_value(&mut unit, u, u.symbol());
                    }
                });
            if unit != self.session.custom_unit() {
                self.session.set_custom_unit(unit);
            }
        });
        ui.small("Check the device label or manual");

        ui.add_space(16.0);
        ui.heading("2. Hours Per Day?");
        let mut hours = self.session.hours().to_string();
        let edit = egui::TextEdit::singleline(&mut hours)
            .hint_text("e.g. 5")
            .desired_width(220.0);
        if ui.add(edit).changed() {
            self.session.set_hours(&hours);
        }
        ui.small("How many hours will you use it daily?");
        ui.horizontal(|ui| {
            for h in self.config.interface.quick_hours.clone() {
                let button =
                    egui::Button::new(egui::RichText::new(format!("{h}h")).size(18.0))
                        .min_size(egui::vec2(72.0, 40.0));
                if ui.add(button).clicked() {
                    self.session.choose_quick_hours(h);
                }
            }
        });

        ui.add_space(20.0);
        let ready = self.session.can_calculate();
        let label = if ready {
            "🧮 Calculate Cost"
        } else {
            "⚠ Please Fill All Fields"
        };
        let button = egui::Button::new(egui::RichText::new(label).size(22.0).strong())
            .min_size(egui::vec2(ui.available_width(), 52.0));
        if ui.add_enabled(ready, button).clicked() {
            self.run_calculation();
        }
        for msg in &self.validation_messages {
            ui.colored_label(WARN_RED, format!("⚠ {msg}"));
        }
    }

    fn ui_results(&mut self, ui: &mut egui::Ui) {
        let Some(calc) = self.session.result().cloned() else {
            return;
        };
        let report: EstimateReport = calc.report(
            &self.config.tariff.currency_code,
            &self.config.tariff.currency_symbol,
        );
        ui.vertical_centered(|ui| {
            ui.heading("📊 Your Electricity Cost");
        });
        ui.add_space(8.0);
        egui::Frame::none()
            .fill(CARD_BLUE)
            .rounding(16.0)
            .inner_margin(16.0)
            .show(ui, |ui| {
                ui.set_width(ui.available_width());
                ui.vertical_centered(|ui| {
                    ui.label(egui::RichText::new(&calc.device_icon).size(36.0));
                    ui.label(egui::RichText::new(&report.device).size(22.0).strong());
                    ui.label(egui::RichText::new(report.usage_line()).size(18.0));
                });
            });
        ui.add_space(10.0);
        cost_card(
            ui,
            "Daily Cost",
            &report.money(&report.cost_per_day),
            &report.units_per_day,
            CARD_GREEN,
            GREEN,
        );
        ui.add_space(10.0);
        cost_card(
            ui,
            "Monthly Cost",
            &report.money(&report.cost_per_month),
            &report.units_per_month,
            CARD_PURPLE,
            PURPLE,
        );
        ui.add_space(10.0);
        egui::Frame::none()
            .fill(CARD_YELLOW)
            .rounding(16.0)
            .inner_margin(12.0)
            .show(ui, |ui| {
                ui.set_width(ui.available_width());
                ui.vertical_centered(|ui| {
                    ui.label(egui::RichText::new(format!("💡 {}", report.rate_line())).size(16.0));
                });
            });
        ui.add_space(16.0);
        let button = egui::Button::new(egui::RichText::new("🔄 Calculate Again").size(20.0))
            .min_size(egui::vec2(ui.available_width(), 48.0));
        if ui.add(button).clicked() {
            self.session.reset();
            self.validation_messages.clear();
        }
    }

    fn ui_settings(&mut self, ui: &mut egui::Ui) {
        ui.heading("Tariff");
        ui.separator();
        egui::Grid::new("settings_grid")
            .num_columns(2)
            .spacing([12.0, 8.0])
            .show(ui, |ui| {
                ui.label("Rate per unit (kWh)");
                ui.text_edit_singleline(&mut self.settings_rate_input);
                ui.end_row();
                ui.label("Currency symbol");
                ui.text_edit_singleline(&mut self.settings_symbol_input);
                ui.end_row();
            });
        if ui.button("Apply").clicked() {
            self.settings_status = Some(match self.apply_tariff_inputs() {
                Ok(()) => "Applied for this session.".to_string(),
                Err(e) => e,
            });
        }
        if let Some(msg) = &self.settings_status {
            ui.label(msg.as_str());
        }

        ui.add_space(8.0);
        ui.heading("Display");
        ui.separator();
        ui.label("UI scale");
        let scale_slider = egui::Slider::new(&mut self.ui_scale, 0.8..=1.6).suffix(" x");
        if ui.add(scale_slider).changed() {
            ui.ctx().set_pixels_per_point(self.ui_scale);
        }
        ui.label("Window transparency");
        ui.add(egui::Slider::new(&mut self.window_alpha, 0.3..=1.0).text("alpha"));
        ui.checkbox(&mut self.always_on_top, "Always on top");
        ui.horizontal(|ui| {
            if ui.button("Load font…").clicked() {
                if let Some(path) = FileDialog::new()
                    .add_filter("Font", &["ttf", "ttc", "otf"])
                    .pick_file()
                {
                    self.font_status = Some(match load_custom_font(ui.ctx(), &path) {
                        Ok(()) => format!("Font loaded: {}", path.display()),
                        Err(e) => e,
                    });
                }
            }
            ui.small("Use this if the currency symbol shows as a box.");
        });
        if let Some(msg) = &self.font_status {
            ui.label(msg.as_str());
        }
        ui.separator();
        ui.small("Settings are not saved; they apply until the app is closed.");
    }

    fn ui_help(&self, ui: &mut egui::Ui) {
        ui.heading("How to use");
        ui.label("1. Pick a device, or type its wattage from the label or manual.");
        ui.label("2. Enter how many hours a day it runs (or tap a quick button).");
        ui.label("3. Press Calculate to see daily and monthly units and cost.");
        ui.separator();
        ui.label(format!(
            "Hours must be more than 0 and at most {MAX_HOURS_PER_DAY}. The rate may be zero."
        ));
        ui.label(format!(
            "Current rate: {}{} per unit (kWh)",
            self.config.tariff.currency_symbol,
            self.session.rate()
        ));
        ui.separator();
        ui.small(format!("Version {}", env!("CARGO_PKG_VERSION")));
    }

    fn ui_formula(&self, ui: &mut egui::Ui) {
        for line in FORMULA_LINES {
            ui.label(line);
        }
        ui.separator();
        ui.small("Figures are shown to 2 decimals, rounding halves away from zero.");
    }
}

impl App for GuiApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut Frame) {
        let now = ctx.input(|i| i.time);
        if self.splash_visible(now) {
            if ctx.input(|i| i.pointer.any_click()) {
                self.splash_pending = false;
            } else {
                self.ui_splash(ctx);
                ctx.request_repaint_after(self.splash_remaining(now));
                return;
            }
        }

        ctx.send_viewport_cmd(egui::ViewportCommand::WindowLevel(if self.always_on_top {
            egui::WindowLevel::AlwaysOnTop
        } else {
            egui::WindowLevel::Normal
        }));

        // 투명도 적용
        let mut style = (*ctx.style()).clone();
        style.visuals.window_fill = style.visuals.window_fill.linear_multiply(self.window_alpha);
        style.visuals.panel_fill = style.visuals.panel_fill.linear_multiply(self.window_alpha);
        ctx.set_style(style);

        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            self.ui_header(ui);
        });

        egui::TopBottomPanel::bottom("footer").show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.small("Don't fear electricity bills, use them wisely 💪");
            });
        });

        if self.show_settings_modal {
            let mut open = true;
            egui::Window::new("Settings")
                .collapsible(false)
                .resizable(true)
                .open(&mut open)
                .show(ctx, |ui| self.ui_settings(ui));
            self.show_settings_modal = open;
        }

        if self.show_help_modal {
            let mut open = true;
            egui::Window::new("Help / About")
                .collapsible(false)
                .resizable(true)
                .open(&mut open)
                .show(ctx, |ui| self.ui_help(ui));
            self.show_help_modal = open;
        }

        if self.show_formula_modal {
            let mut open = true;
            egui::Window::new("Formula reference")
                .collapsible(true)
                .resizable(true)
                .open(&mut open)
                .show(ctx, |ui| self.ui_formula(ui));
            self.show_formula_modal = open;
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .auto_shrink([false; 2])
                .show(ui, |ui| {
                    if self.session.showing_results() {
                        self.ui_results(ui);
                    } else {
                        self.ui_inputs(ui);
                    }
                });
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_app_uses_configured_rate() {
        let mut cfg = config::Config::default();
        cfg.tariff.rate_per_unit = 7.5;
        let app = GuiApp::new(cfg);
        assert_eq!(app.session.rate(), "7.5");
        assert_eq!(app.settings_rate_input, "7.5");
    }

    #[test]
    fn splash_hides_after_configured_duration() {
        let mut app = GuiApp::new(config::Config::default());
        assert!(app.splash_visible(10.0));
        assert!(app.splash_visible(11.9));
        assert!(!app.splash_visible(12.0));
        // 한 번 닫히면 다시 열리지 않는다
        assert!(!app.splash_visible(12.5));
    }

    #[test]
    fn splash_disabled_by_config() {
        let mut cfg = config::Config::default();
        cfg.interface.splash_enabled = false;
        let mut app = GuiApp::new(cfg);
        assert!(!app.splash_visible(0.0));
    }

    #[test]
    fn apply_tariff_inputs_rejects_negative_rate() {
        let mut app = GuiApp::new(config::Config::default());
        app.settings_rate_input = "-1".into();
        assert!(app.apply_tariff_inputs().is_err());
        assert_eq!(app.session.rate(), "6");
        assert_eq!(app.config.tariff.rate_per_unit, 6.0);
    }

    #[test]
    fn apply_tariff_inputs_updates_session_rate_and_symbol() {
        let mut app = GuiApp::new(config::Config::default());
        app.settings_rate_input = " 8 ".into();
        app.settings_symbol_input = "$".into();
        app.apply_tariff_inputs().unwrap();
        assert_eq!(app.session.rate(), "8");
        assert_eq!(app.config.tariff.currency_symbol, "$");

        let heater = app.config.devices[2].clone();
        app.session.select_device(&heater);
        app.session.set_hours("4");
        app.run_calculation();
        let calc = app.session.result().unwrap();
        assert_eq!(calc.estimate.cost_per_day, 64.0);
    }

    #[test]
    fn rejected_calculation_lists_messages() {
        let mut app = GuiApp::new(config::Config::default());
        let fan = app.config.devices[1].clone();
        app.session.select_device(&fan);
        app.session.set_hours("30");
        app.run_calculation();
        assert!(!app.session.showing_results());
        assert_eq!(app.validation_messages.len(), 1);
        assert!(app.validation_messages[0].contains("24 hours"));
    }
}

use std::io::{self, Write};

use crate::app::AppError;
use crate::config::Config;
use crate::estimator::{self, FORMULA_LINES};
use crate::session::{self, CalculatorSession};
use crate::units::PowerUnit;

/// 메인 메뉴 선택지를 표현한다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    SelectDevice,
    CustomWatts,
    HoursPerDay,
    Calculate,
    Settings,
    Help,
    Exit,
}

/// 메인 메뉴를 표시하고 선택값을 반환한다.
pub fn main_menu(session: &CalculatorSession) -> Result<MenuChoice, AppError> {
    println!("\n=== ⚡ Electricity Cost Calculator ===");
    println!("Know your electricity bill in advance");
    print_status(session);
    println!("1) Select device");
    println!("2) Enter custom watts");
    println!("3) Hours per day");
    if session.can_calculate() {
        println!("4) Calculate cost");
    } else {
        println!("4) Calculate cost (Please fill all fields)");
    }
    println!("5) Settings");
    println!("6) Help");
    println!("0) Exit");
    loop {
        let sel = read_line("Choose: ")?;
        // 줄바꿈조차 없으면 입력이 끝난 것이다(EOF).
        if sel.is_empty() {
            return Ok(MenuChoice::Exit);
        }
        match sel.trim() {
            "1" => return Ok(MenuChoice::SelectDevice),
            "2" => return Ok(MenuChoice::CustomWatts),
            "3" => return Ok(MenuChoice::HoursPerDay),
            "4" => return Ok(MenuChoice::Calculate),
            "5" => return Ok(MenuChoice::Settings),
            "6" => return Ok(MenuChoice::Help),
            "0" => return Ok(MenuChoice::Exit),
            _ => println!("Invalid choice, try again."),
        }
    }
}

fn print_status(session: &CalculatorSession) {
    let device = match session.selected_device() {
        Some(d) => format!("{} {} ({} W)", d.icon, d.name, d.watts),
        None if !session.custom_power().trim().is_empty() => format!(
            "Custom ({} {})",
            session.custom_power().trim(),
            session.custom_unit().symbol()
        ),
        None => "-".to_string(),
    };
    let hours = if session.hours().trim().is_empty() {
        "-"
    } else {
        session.hours().trim()
    };
    println!("[device: {device} | hours/day: {hours} | rate: {}]", session.rate());
}

/// 기기 목록에서 하나를 고른다.
pub fn handle_select_device(cfg: &Config, session: &mut CalculatorSession) -> Result<(), AppError> {
    println!("\n-- 1. Select Device --");
    for (i, d) in cfg.devices.iter().enumerate() {
        println!("{:>2}) {} {} ({} W)", i + 1, d.icon, d.name, d.watts);
    }
    let sel = read_line("Device number (Enter to cancel): ")?;
    if sel.trim().is_empty() {
        return Ok(());
    }
    match sel.trim().parse::<usize>() {
        Ok(n) if n >= 1 && n <= cfg.devices.len() => session.select_device(&cfg.devices[n - 1]),
        _ => println!("No such device."),
    }
    Ok(())
}

/// 사용자 지정 전력을 입력받는다.
pub fn handle_custom_watts(session: &mut CalculatorSession) -> Result<(), AppError> {
    println!("\n-- Or Enter Custom Watts --");
    println!("Check the device label or manual.");
    let value = read_line("Power (e.g. 100): ")?;
    println!("Unit: 1=W 2=kW 3=hp 4=BTU/h");
    let unit = match read_line("Unit (Enter for W): ")?.trim() {
        "2" => PowerUnit::Kilowatt,
        "3" => PowerUnit::Horsepower,
        "4" => PowerUnit::BtuPerHour,
        _ => PowerUnit::Watt,
    };
    session.set_custom_power(value.trim());
    session.set_custom_unit(unit);
    Ok(())
}

/// 하루 사용 시간을 입력받는다. 빠른 선택 번호도 허용한다.
pub fn handle_hours(cfg: &Config, session: &mut CalculatorSession) -> Result<(), AppError> {
    println!("\n-- 2. Hours Per Day? --");
    println!("How many hours will you use it daily?");
    let quick: Vec<String> = cfg
        .interface
        .quick_hours
        .iter()
        .enumerate()
        .map(|(i, h)| format!("q{}={h}h", i + 1))
        .collect();
    println!("Quick: {}", quick.join("  "));
    let input = read_line("Hours (e.g. 5) or q1..: ")?;
    let input = input.trim();
    if let Some(idx) = input.strip_prefix('q') {
        match idx.parse::<usize>() {
            Ok(n) if n >= 1 && n <= cfg.interface.quick_hours.len() => {
                session.choose_quick_hours(cfg.interface.quick_hours[n - 1]);
            }
            _ => println!("No such quick choice."),
        }
    } else {
        session.set_hours(input);
    }
    Ok(())
}

/// 계산 후 결과 화면을 보여준다.
pub fn handle_calculate(cfg: &Config, session: &mut CalculatorSession) -> Result<(), AppError> {
    if !session.can_calculate() {
        println!("⚠ Please fill all fields.");
        return Ok(());
    }
    let report = match session.calculate() {
        Ok(calc) => calc.report(&cfg.tariff.currency_code, &cfg.tariff.currency_symbol),
        Err(failure) => {
            for line in session::describe_failure(&failure) {
                println!("⚠ {line}");
            }
            return Ok(());
        }
    };
    println!("\n📊 Your Electricity Cost");
    println!("{report}");
    let again = read_line("Calculate again? (Y/n): ")?;
    if !again.trim().eq_ignore_ascii_case("n") {
        session.reset();
    }
    Ok(())
}

/// 설정 메뉴. 요금 단가는 이번 실행 동안만 바뀐다.
pub fn handle_settings(cfg: &mut Config, session: &mut CalculatorSession) -> Result<(), AppError> {
    println!("\n-- Settings (this session only) --");
    println!(
        "Current rate: {}{} per unit (kWh)",
        cfg.tariff.currency_symbol,
        session.rate()
    );
    let sel = read_line("New rate (Enter to keep): ")?;
    let text = sel.trim();
    if text.is_empty() {
        return Ok(());
    }
    match text.parse::<f64>() {
        Ok(rate) if rate.is_finite() && rate >= 0.0 => {
            session.set_rate(text);
            cfg.tariff.rate_per_unit = rate;
            log::info!("rate changed to {rate} for this session");
            println!("Rate set to {}{rate} per unit.", cfg.tariff.currency_symbol);
        }
        _ => println!("Rate must be a number >= 0. Keeping the previous value."),
    }
    Ok(())
}

/// 도움말과 계산식을 출력한다.
pub fn print_help(cfg: &Config) {
    println!("\n-- Help --");
    println!("Pick a device (or type its wattage), enter daily hours, then calculate.");
    println!(
        "Hours must be between 0 and {}; the rate may be zero.",
        estimator::MAX_HOURS_PER_DAY
    );
    for line in FORMULA_LINES {
        println!("  {line}");
    }
    println!(
        "Rate: {}{} per unit (kWh), currency {}",
        cfg.tariff.currency_symbol, cfg.tariff.rate_per_unit, cfg.tariff.currency_code
    );
}

fn read_line(prompt: &str) -> Result<String, AppError> {
    print!("{prompt}");
    io::stdout().flush()?;
    let mut buf = String::new();
    io::stdin().read_line(&mut buf)?;
    Ok(buf)
}

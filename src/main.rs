use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::process::ExitCode;

use electricity_cost_calculator::app::{self, AppError};
use electricity_cost_calculator::config::{self, Config};
use electricity_cost_calculator::devices::{self, CUSTOM_DEVICE_NAME};
use electricity_cost_calculator::estimator::{self, UsageInput};
use electricity_cost_calculator::{conversion, report::EstimateReport};

/// 전기요금 계산기 CLI.
#[derive(Debug, Parser)]
#[command(
    name = "electricity_cost_calculator_cli",
    version,
    about = "Know your electricity bill in advance"
)]
struct Cli {
    /// 설정 파일 경로 (기본: ./config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// 디버그 로그 출력
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// 메뉴 방식으로 계산한다 (기본)
    Interactive,
    /// 한 번 계산하고 결과를 출력한다
    Estimate(EstimateArgs),
    /// 기기 프리셋 목록을 출력한다
    Devices,
    /// 현재 설정을 TOML로 출력한다
    Config,
}

#[derive(Debug, clap::Args)]
struct EstimateArgs {
    /// 프리셋 기기 이름 (예: Fan)
    #[arg(long, conflicts_with = "watts", required_unless_present = "watts")]
    device: Option<String>,
    /// 소비 전력 값
    #[arg(long, allow_negative_numbers = true)]
    watts: Option<f64>,
    /// --watts 의 단위 (W, kW, hp, BTU/h)
    #[arg(long, default_value = "W")]
    unit: String,
    /// 하루 사용 시간 [h]
    #[arg(long, allow_negative_numbers = true)]
    hours: f64,
    /// kWh당 요금 (기본: 설정 파일 값)
    #[arg(long, allow_negative_numbers = true)]
    rate: Option<f64>,
    /// 출력 형식
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Toml,
}

/// 프로그램의 엔트리 포인트. 설정을 로드한 뒤 명령을 실행한다.
fn main() -> ExitCode {
    let cli = Cli::parse();
    let default_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    match try_run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn try_run(cli: Cli) -> Result<(), AppError> {
    let mut cfg = config::load_or_default(cli.config.as_deref())?;
    match cli.command.unwrap_or(Command::Interactive) {
        Command::Interactive => app::run(&mut cfg),
        Command::Estimate(args) => run_estimate(&cfg, args),
        Command::Devices => {
            print_devices(&cfg);
            Ok(())
        }
        Command::Config => {
            print!("{}", cfg.to_toml_string()?);
            Ok(())
        }
    }
}

fn run_estimate(cfg: &Config, args: EstimateArgs) -> Result<(), AppError> {
    let (name, watts) = match (&args.device, args.watts) {
        (Some(device_name), _) => {
            let device = devices::find_device(&cfg.devices, device_name)
                .ok_or_else(|| AppError::UnknownDevice(device_name.clone()))?;
            (device.name.clone(), Some(device.watts))
        }
        (None, Some(value)) => (
            CUSTOM_DEVICE_NAME.to_string(),
            Some(conversion::power_to_watts(value, &args.unit)?),
        ),
        (None, None) => (CUSTOM_DEVICE_NAME.to_string(), None),
    };
    let rate = args.rate.unwrap_or(cfg.tariff.rate_per_unit);
    // 문자열 경로로 검증해야 전력 누락도 MissingInput으로 보고된다.
    let input = UsageInput::parse(
        watts.map(|w| w.to_string()).as_deref(),
        Some(&args.hours.to_string()),
        Some(&rate.to_string()),
    )?;
    let estimate = estimator::estimate_usage(&input)?;
    let report = EstimateReport::new(
        &name,
        &estimate,
        &cfg.tariff.currency_code,
        &cfg.tariff.currency_symbol,
    );
    match args.format {
        OutputFormat::Text => println!("{report}"),
        OutputFormat::Toml => print!("{}", toml::to_string_pretty(&report)?),
    }
    Ok(())
}

fn print_devices(cfg: &Config) {
    for d in &cfg.devices {
        println!("{} {:<16} {:>7} W", d.icon, d.name, d.watts);
    }
}

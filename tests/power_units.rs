use electricity_cost_calculator::{
    conversion::{parse_power_unit, power_to_watts, ConversionError},
    units::{convert_power, PowerUnit},
};

fn assert_close(a: f64, b: f64, tol: f64) {
    assert!((a - b).abs() <= tol, "{a} vs {b} (tol {tol})");
}

#[test]
fn unit_names_parse_case_insensitively() {
    assert_eq!(parse_power_unit("W").unwrap(), PowerUnit::Watt);
    assert_eq!(parse_power_unit(" kW ").unwrap(), PowerUnit::Kilowatt);
    assert_eq!(parse_power_unit("HP").unwrap(), PowerUnit::Horsepower);
    assert_eq!(parse_power_unit("btu/h").unwrap(), PowerUnit::BtuPerHour);
    assert!(matches!(
        parse_power_unit("furlong"),
        Err(ConversionError::UnknownUnit(u)) if u == "furlong"
    ));
}

#[test]
fn conversions_to_watts() {
    assert_eq!(power_to_watts(2.0, "kw").unwrap(), 2000.0);
    assert_close(power_to_watts(1.0, "hp").unwrap(), 745.7, 1e-9);
    assert_close(power_to_watts(10_000.0, "BTU/h").unwrap(), 2930.7107, 1e-6);
    assert_eq!(power_to_watts(75.0, "W").unwrap(), 75.0);
}

#[test]
fn same_unit_is_untouched() {
    let v = 0.1 + 0.2;
    assert_eq!(convert_power(v, PowerUnit::Kilowatt, PowerUnit::Kilowatt), v);
}

#[test]
fn kilowatt_to_horsepower_and_back() {
    let hp = convert_power(1.0, PowerUnit::Kilowatt, PowerUnit::Horsepower);
    assert_close(hp, 1000.0 / 745.7, 1e-12);
    let kw = convert_power(hp, PowerUnit::Horsepower, PowerUnit::Kilowatt);
    assert_close(kw, 1.0, 1e-12);
}

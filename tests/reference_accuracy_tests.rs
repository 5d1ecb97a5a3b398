mod common;
use common::*;

fn json_values(text: &str, name: &str) -> Vec<f64> {
    let key = format!("\"{}\":", name);
    text.lines()
        .map(|line| {
            let start = line.find(&key).unwrap() + key.len();
            line[start..]
                .split([',', '}'])
                .next()
                .unwrap()
                .parse()
                .unwrap()
        })
        .collect()
}

/// Dry standard air at 760 mmHg and 15°C against independently computed values
#[test]
fn test_refractive_index_at_reference() {
    let text = custom_request("5000", "45°0'0\"", "760", "15", "0")
        .args(["--format=json", "--show-inputs"])
        .stdout_text();
    let index = json_values(&text, "refractiveIndex")[0];
    let reference = json_values(&text, "referenceIndex")[0];
    assert!((index - 1.0002789636500335).abs() < 1e-12);
    assert_eq!(index, reference);
}

#[test]
fn test_water_vapor_lowers_index() {
    let text = custom_request("5000", "45°0'0\"", "760", "15", "10")
        .arg("--format=json")
        .stdout_text();
    let index = json_values(&text, "refractiveIndex")[0];
    assert!((index - 1.0002783850252153).abs() < 1e-12);
}

#[test]
fn test_blue_offsets() {
    let text = custom_request("4000", STANDARD_ANGLES, "760", "15", "0")
        .arg("--format=json")
        .stdout_text();
    let expected = [0.45151603, 0.78204871, 1.35454810];
    for (value, expected) in json_values(&text, "deltaR").iter().zip(expected) {
        assert!((value - expected).abs() < 1e-7, "{} vs {}", value, expected);
    }
}

#[test]
fn test_red_offsets() {
    let text = custom_request("7000", STANDARD_ANGLES, "760", "15", "0")
        .arg("--format=json")
        .stdout_text();
    let expected = [-0.37800932, -0.65473134, -1.13402795];
    for (value, expected) in json_values(&text, "deltaR").iter().zip(expected) {
        assert!((value - expected).abs() < 1e-7, "{} vs {}", value, expected);
    }
}

#[test]
fn test_secant_and_angle_columns() {
    let text = standard_request_with_format("json").stdout_text();
    let angles = json_values(&text, "zenithAngle");
    let secants = json_values(&text, "secant");
    assert!((angles[1] - 45.0).abs() < 1e-9);
    assert!((secants[1] - std::f64::consts::SQRT_2).abs() < 1e-12);
    assert!((secants[2] - 2.0).abs() < 1e-12);
}

#[test]
fn test_minutes_and_seconds_contribute() {
    let text = custom_request("4000", "45°30'15\"", "760", "15", "0")
        .arg("--format=json")
        .stdout_text();
    let angle = json_values(&text, "zenithAngle")[0];
    assert!((angle - 45.50416666666667).abs() < 1e-9);
}

#![allow(dead_code)]

use assert_cmd::Command;
use predicates::prelude::*;

/// Zenith angles used by most tests: 30°, 45° and 60°.
pub const STANDARD_ANGLES: &str = "30°0'0\",45°0'0\",60°0'0\"";

/// Test helper for running skyrefrax commands with less boilerplate
pub struct SkyrefraxTest {
    cmd: Command,
}

pub fn skyrefrax_command() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("skyrefrax"))
}

impl SkyrefraxTest {
    /// Create a new skyrefrax command test
    pub fn new() -> Self {
        Self {
            cmd: skyrefrax_command(),
        }
    }

    /// Add arguments to the command
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<std::ffi::OsStr>,
    {
        self.cmd.args(args);
        self
    }

    /// Add a single argument to the command
    pub fn arg<S: AsRef<std::ffi::OsStr>>(mut self, arg: S) -> Self {
        self.cmd.arg(arg);
        self
    }

    /// Feed stdin to the command
    pub fn stdin(mut self, input: &str) -> Self {
        self.cmd.write_stdin(input.to_string());
        self
    }

    /// Assert the command succeeds
    pub fn assert_success(mut self) -> assert_cmd::assert::Assert {
        self.cmd.assert().success()
    }

    /// Assert the command succeeds and contains text in stdout
    pub fn assert_success_contains(mut self, text: &str) -> assert_cmd::assert::Assert {
        self.cmd
            .assert()
            .success()
            .stdout(predicate::str::contains(text))
    }

    /// Assert the command succeeds and contains all texts in stdout
    pub fn assert_success_contains_all(mut self, texts: &[&str]) -> assert_cmd::assert::Assert {
        let mut assertion = self.cmd.assert().success();
        for text in texts {
            assertion = assertion.stdout(predicate::str::contains(*text));
        }
        assertion
    }

    /// Assert the command fails with an error message on stderr
    pub fn assert_failure_contains(mut self, text: &str) -> assert_cmd::assert::Assert {
        self.cmd
            .assert()
            .failure()
            .stdout(predicate::str::is_empty())
            .stderr(predicate::str::contains(text))
    }

    /// Get the raw command for complex assertions (when helpers aren't enough)
    pub fn command(self) -> Command {
        self.cmd
    }

    /// Get command output for inspection
    pub fn get_output(mut self) -> std::process::Output {
        self.cmd.output().unwrap()
    }

    /// Get stdout of a successful run as text
    pub fn stdout_text(self) -> String {
        let output = self.get_output();
        assert!(output.status.success(), "command failed: {:?}", output);
        String::from_utf8(output.stdout).unwrap()
    }
}

/// Standard request: 4000/5000/7000 Å at 30°, 45°, 60°, dry air at 760 mmHg and 15°C.
pub fn standard_request() -> SkyrefraxTest {
    SkyrefraxTest::new().args(["4000,5000,7000", STANDARD_ANGLES, "760", "15", "0"])
}

/// Standard request with global options (put before positional args)
pub fn standard_request_with_format(format: &str) -> SkyrefraxTest {
    SkyrefraxTest::new().args([
        &format!("--format={}", format),
        "4000,5000,7000",
        STANDARD_ANGLES,
        "760",
        "15",
        "0",
    ])
}

/// Request with custom atmosphere
pub fn custom_request(
    wavelengths: &str,
    angles: &str,
    pressure: &str,
    temperature: &str,
    water_vapor: &str,
) -> SkyrefraxTest {
    SkyrefraxTest::new().args([wavelengths, angles, pressure, temperature, water_vapor])
}

/// Parse the numeric cells of a CSV matrix (header row skipped).
pub fn csv_cells(text: &str) -> Vec<Vec<String>> {
    text.lines()
        .skip(1)
        .map(|line| line.split(',').skip(1).map(String::from).collect())
        .collect()
}

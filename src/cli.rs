//! Command-line parsing and validation.

use crate::data::{
    self, InputPath, ListSource, OutputFormat, Parameters, RequestSource,
};
use crate::error::CliError;
use std::collections::HashSet;
use std::path::PathBuf;

const USAGE: &str =
    "Usage: skyrefrax [OPTIONS] <wavelengths> <zenith-angles> <pressure> <temperature> <water-vapor>";

type CliResult<T> = Result<T, CliError>;

type ApplyFn = fn(Option<&str>, &mut Parameters) -> CliResult<()>;

enum OptKind {
    Value(ApplyFn),
    Flag(ApplyFn),
}

struct OptionSpec {
    name: &'static str,
    kind: OptKind,
}

const OPTION_SPECS: &[OptionSpec] = &[
    OptionSpec {
        name: "format",
        kind: OptKind::Value(|value, params| {
            let v = required_value("format", value)?;
            params.output.format = v.parse::<OutputFormat>().map_err(CliError::from)?;
            Ok(())
        }),
    },
    OptionSpec {
        name: "reference",
        kind: OptKind::Value(|value, params| {
            let v = required_value("reference", value)?;
            let reference = parse_f64("reference wavelength", v)?;
            params.reference_wavelength =
                data::validate_reference_wavelength(reference).map_err(CliError::from)?;
            Ok(())
        }),
    },
    OptionSpec {
        name: "headers",
        kind: OptKind::Flag(|_, params| {
            params.output.headers = true;
            Ok(())
        }),
    },
    OptionSpec {
        name: "no-headers",
        kind: OptKind::Flag(|_, params| {
            params.output.headers = false;
            Ok(())
        }),
    },
    OptionSpec {
        name: "show-inputs",
        kind: OptKind::Flag(|_, params| {
            params.output.show_inputs = Some(true);
            Ok(())
        }),
    },
    OptionSpec {
        name: "no-show-inputs",
        kind: OptKind::Flag(|_, params| {
            params.output.show_inputs = Some(false);
            Ok(())
        }),
    },
    OptionSpec {
        name: "degrees",
        kind: OptKind::Flag(|_, params| {
            params.output.degrees = true;
            Ok(())
        }),
    },
    OptionSpec {
        name: "perf",
        kind: OptKind::Flag(|_, params| {
            params.perf = true;
            Ok(())
        }),
    },
    OptionSpec {
        name: "help",
        kind: OptKind::Flag(|_, _| Err(CliError::Exit(get_help_text()))),
    },
    OptionSpec {
        name: "version",
        kind: OptKind::Flag(|_, _| Err(CliError::Exit(get_version_text()))),
    },
];

pub fn parse_cli(args: Vec<String>) -> CliResult<(RequestSource, Parameters)> {
    if args.len() < 2 {
        return Err(CliError::Exit(USAGE.to_string()));
    }

    let mut params = Parameters::default();
    let mut positional = Vec::new();
    let mut applied_options: HashSet<&'static str> = HashSet::new();

    for arg in args.into_iter().skip(1) {
        if let Some(stripped) = arg.strip_prefix("--") {
            let (name, value) = stripped
                .split_once('=')
                .map(|(n, v)| (n, Some(v)))
                .unwrap_or((stripped, None));
            apply_option(name, value, &mut params, &mut applied_options)?;
        } else {
            positional.push(arg);
        }
    }

    if positional.first().is_some_and(|first| first == "help") {
        return Err(CliError::Exit(get_help_text()));
    }

    let source = parse_positional_args(positional)?;

    validate_format_options(&params, &applied_options)?;

    Ok((source, params))
}

fn parse_f64(label: &str, value: &str) -> CliResult<f64> {
    value
        .parse::<f64>()
        .map_err(|_| CliError::from(format!("Invalid {} value: {}", label, value)))
}

fn apply_option(
    name: &str,
    value: Option<&str>,
    params: &mut Parameters,
    applied: &mut HashSet<&'static str>,
) -> CliResult<()> {
    let Some(spec) = OPTION_SPECS.iter().find(|s| s.name == name) else {
        return Err(format!("Unknown option: --{}", name).into());
    };

    match spec.kind {
        OptKind::Value(handler) => {
            let val = required_value(spec.name, value)?;
            handler(Some(val), params)?;
        }
        OptKind::Flag(handler) => {
            if value.is_some() {
                return Err(format!("Option --{} does not take a value", spec.name).into());
            }
            handler(None, params)?;
        }
    }

    applied.insert(spec.name);
    Ok(())
}

fn required_value<'a>(flag: &'static str, value: Option<&'a str>) -> CliResult<&'a str> {
    value.ok_or_else(|| CliError::from(format!("Option --{} requires a value", flag)))
}

fn parse_file_arg(arg: &str) -> CliResult<InputPath> {
    let Some(stripped) = arg.strip_prefix('@') else {
        return Err("Not a file argument".into());
    };

    match stripped {
        "-" => Ok(InputPath::Stdin),
        "" => Err("Missing file name after @".into()),
        path => Ok(InputPath::File(PathBuf::from(path))),
    }
}

fn parse_list_arg(arg: String) -> CliResult<ListSource> {
    if arg.starts_with('@') {
        Ok(ListSource::File(parse_file_arg(&arg)?))
    } else {
        Ok(ListSource::Inline(arg))
    }
}

fn parse_positional_args(positional: Vec<String>) -> CliResult<RequestSource> {
    if positional.len() != 5 {
        return Err(format!(
            "Expected 5 arguments (wavelengths, zenith angles, pressure, temperature, water vapor), got {}\n{}",
            positional.len(),
            USAGE
        )
        .into());
    }

    let mut args = positional.into_iter();
    let mut next = || args.next().unwrap_or_default();

    let wavelengths = parse_list_arg(next())?;
    let angles = parse_list_arg(next())?;
    let source = RequestSource {
        wavelengths,
        angles,
        pressure: next(),
        temperature: next(),
        water_vapor: next(),
    };

    if source.wavelengths == ListSource::File(InputPath::Stdin)
        && source.angles == ListSource::File(InputPath::Stdin)
    {
        return Err("Stdin (@-) can be used for only one input list".into());
    }

    Ok(source)
}

fn validate_format_options(
    params: &Parameters,
    applied: &HashSet<&'static str>,
) -> CliResult<()> {
    let csv = params.output.format == OutputFormat::Csv;
    if !csv && applied.contains("headers") {
        return Err("Option --headers only valid with --format=csv".into());
    }
    if !csv && applied.contains("no-headers") {
        return Err("Option --no-headers only valid with --format=csv".into());
    }

    let labelled = matches!(params.output.format, OutputFormat::Text | OutputFormat::Csv);
    if !labelled && applied.contains("degrees") {
        return Err(format!(
            "Option --degrees not valid for {} output (zenith angles are always included)",
            params.output.format
        )
        .into());
    }

    Ok(())
}

fn get_version_text() -> String {
    format!(
        "skyrefrax {}\n Build: {} ({})\n Built: {}\n Features: {}",
        env!("CARGO_PKG_VERSION"),
        env!("BUILD_PROFILE"),
        env!("BUILD_TARGET"),
        env!("BUILD_DATE"),
        env!("BUILD_FEATURES")
    )
}

fn get_help_text() -> String {
    let defaults = Parameters::default();
    let formats = OutputFormat::all().join(", ");
    format!(
        r#"skyrefrax {}
Calculates differential atmospheric refraction for a set of wavelengths and
zenith angles, relative to a reference wavelength.

Usage:
  skyrefrax [OPTIONS] <wavelengths> <zenith-angles> <pressure> <temperature> <water-vapor>

Examples:
  skyrefrax 4000,5000,6500 "30°0'0\",45°30'15\"" 760 15 8
  skyrefrax --format=csv --reference=5500 @waves.txt @angles.txt 745 10.5 6.2
  cat angles.txt | skyrefrax 3500,4500,6000 @- 760 15 0

Arguments:
  <wavelengths>      Comma-separated wavelengths in angstroms, or a file
                     (@waves.txt, or @- for stdin).
  <zenith-angles>    Comma-separated zenith angles as D°M'S" (e.g. 45°30'15"),
                     or a file (@angles.txt, or @- for stdin).
  <pressure>         Air pressure in mmHg.
  <temperature>      Air temperature in °C.
  <water-vapor>      Water-vapor partial pressure in mmHg.

  File inputs:
    - One or more comma-separated entries per line.
    - Blank lines and lines starting with # are ignored.
    - Stdin (@-) can be used for only one input list.

Output:
  One row per wavelength, one column per zenith angle. Columns are labelled
  with the secant of the zenith angle. Values are differential refraction in
  arcseconds; text and CSV round to 2 decimals.

Options:
  --format=<format>     Output format: {}. Default: {}
  --reference=<Å>       Reference wavelength in angstroms. Default: {}
  --[no-]headers        Include header row in CSV output. Default: {}
  --[no-]show-inputs    Include atmospheric inputs in output. Default: on for
                        text, off otherwise.
  --degrees             Add zenith angle in degrees to column labels.
  --perf                Print performance statistics to stderr.
  --help                Show this help message and exit.
  --version             Print version information and exit.
"#,
        env!("CARGO_PKG_VERSION"),
        formats,
        defaults.output.format,
        defaults.reference_wavelength,
        defaults.output.headers
    )
}

//! Output formatting for text table, CSV, JSON lines and Parquet.

use crate::data::{OutputFormat, Parameters};
use crate::error::OutputError;
use crate::table_format::{TableFormatter, write_header_section};
use skyrefrax::RefractionRequest;
use skyrefrax::matrix::{MatrixCell, RefractionMatrix, display_value, secant};
use std::io::{self, BufWriter, Write};

/// Writes the matrix to stdout and returns the number of records written.
pub fn dispatch_output(
    matrix: &RefractionMatrix,
    request: &RefractionRequest,
    params: &Parameters,
) -> Result<usize, OutputError> {
    let stdout = io::stdout();

    #[cfg(feature = "parquet")]
    {
        if params.output.format == OutputFormat::Parquet {
            return crate::parquet::write_parquet(matrix, request, params, stdout)
                .map_err(OutputError::from);
        }
    }

    let mut writer = BufWriter::new(stdout.lock());
    let count = write_output(&mut writer, matrix, request, params)?;
    writer.flush()?;
    Ok(count)
}

pub fn write_output<W: Write>(
    writer: &mut W,
    matrix: &RefractionMatrix,
    request: &RefractionRequest,
    params: &Parameters,
) -> Result<usize, OutputError> {
    let show_inputs = params.output.should_show_inputs();
    let count = match params.output.format {
        OutputFormat::Text => write_text(writer, matrix, request, params, show_inputs)?,
        OutputFormat::Csv => write_csv(writer, matrix, request, params, show_inputs)?,
        OutputFormat::Json => write_json(writer, matrix, request, show_inputs)?,
        #[cfg(feature = "parquet")]
        OutputFormat::Parquet => {
            return Err("Parquet output must be written to a byte stream".into());
        }
    };
    log::info!(
        "wrote {} {} records ({} × {} matrix)",
        count,
        params.output.format,
        matrix.dimensions().0,
        matrix.dimensions().1
    );
    Ok(count)
}

fn write_text<W: Write>(
    writer: &mut W,
    matrix: &RefractionMatrix,
    request: &RefractionRequest,
    params: &Parameters,
    show_inputs: bool,
) -> io::Result<usize> {
    if show_inputs {
        write_header_section(writer, request, matrix)?;
    }
    writeln!(
        writer,
        "Differential refraction [arcsec] by wavelength (rows) and sec z (columns)"
    )?;
    TableFormatter::for_matrix(matrix, params.output.degrees).write_table(writer, matrix)
}

fn write_csv<W: Write>(
    writer: &mut W,
    matrix: &RefractionMatrix,
    request: &RefractionRequest,
    params: &Parameters,
    show_inputs: bool,
) -> io::Result<usize> {
    if params.output.headers {
        let mut header: Vec<String> = Vec::new();
        if show_inputs {
            header.extend(
                ["pressure", "temperature", "waterVapor", "referenceWavelength"]
                    .map(String::from),
            );
        }
        header.push("wavelength".to_string());
        header.extend(matrix.column_labels(params.output.degrees));
        writeln!(writer, "{}", header.join(","))?;
    }

    let mut count = 0;
    for (wavelength, values) in matrix.wavelengths().zip(matrix.rows()) {
        let mut fields = Vec::with_capacity(values.len() + 5);
        if show_inputs {
            fields.push(request.state.pressure_mmhg.to_string());
            fields.push(request.state.temperature_c.to_string());
            fields.push(request.state.water_vapor_mmhg.to_string());
            fields.push(request.reference_wavelength.to_string());
        }
        fields.push(wavelength.to_string());
        fields.extend(values.iter().map(|&v| display_value(v)));
        writeln!(writer, "{}", fields.join(","))?;
        count += 1;
    }
    Ok(count)
}

fn json_number(value: f64) -> String {
    if value.is_finite() {
        value.to_string()
    } else {
        "null".to_string()
    }
}

fn format_json_cell(
    cell: &MatrixCell,
    request: &RefractionRequest,
    reference_index: f64,
    show_inputs: bool,
) -> String {
    let mut fields = Vec::with_capacity(10);
    if show_inputs {
        fields.push(format!(
            r#""pressure":{}"#,
            json_number(request.state.pressure_mmhg)
        ));
        fields.push(format!(
            r#""temperature":{}"#,
            json_number(request.state.temperature_c)
        ));
        fields.push(format!(
            r#""waterVapor":{}"#,
            json_number(request.state.water_vapor_mmhg)
        ));
        fields.push(format!(
            r#""referenceWavelength":{}"#,
            json_number(request.reference_wavelength)
        ));
        fields.push(format!(
            r#""referenceIndex":{}"#,
            json_number(reference_index)
        ));
    }
    fields.push(format!(r#""wavelength":{}"#, json_number(cell.wavelength)));
    fields.push(format!(
        r#""zenithAngle":{}"#,
        json_number(cell.zenith_angle.to_degrees())
    ));
    fields.push(format!(
        r#""secant":{}"#,
        json_number(secant(cell.zenith_angle))
    ));
    fields.push(format!(
        r#""refractiveIndex":{}"#,
        json_number(cell.refractive_index)
    ));
    fields.push(format!(r#""deltaR":{}"#, json_number(cell.delta_r)));
    format!("{{{}}}", fields.join(","))
}

fn write_json<W: Write>(
    writer: &mut W,
    matrix: &RefractionMatrix,
    request: &RefractionRequest,
    show_inputs: bool,
) -> io::Result<usize> {
    let reference_index = matrix.indices().reference_index;
    let mut count = 0;
    for cell in matrix.cells() {
        writeln!(
            writer,
            "{}",
            format_json_cell(&cell, request, reference_index, show_inputs)
        )?;
        count += 1;
    }
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use skyrefrax::{RefractionRequest, RequestText};

    fn request() -> RefractionRequest {
        let text = RequestText {
            wavelengths: "4000,5000,7000",
            angles: "30°0'0\",45°0'0\",60°0'0\"",
            pressure: "760",
            temperature: "15",
            water_vapor: "0",
        };
        RefractionRequest::parse(&text, 5000.0).unwrap()
    }

    fn render(params: &Parameters) -> (usize, String) {
        let request = request();
        let matrix = request.compute();
        let mut output = Vec::new();
        let count = write_output(&mut output, &matrix, &request, params).unwrap();
        (count, String::from_utf8(output).unwrap())
    }

    fn params_with(format: OutputFormat) -> Parameters {
        let mut params = Parameters::default();
        params.output.format = format;
        params
    }

    #[test]
    fn test_csv_matrix() {
        let (count, text) = render(&params_with(OutputFormat::Csv));
        assert_eq!(count, 3);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines,
            vec![
                "wavelength,1.15,1.41,2.00",
                "4000,0.45,0.78,1.35",
                "5000,0.00,0.00,0.00",
                "7000,-0.38,-0.65,-1.13",
            ]
        );
    }

    #[test]
    fn test_csv_with_inputs_and_no_headers() {
        let mut params = params_with(OutputFormat::Csv);
        params.output.headers = false;
        params.output.show_inputs = Some(true);
        let (_, text) = render(&params);
        assert_eq!(text.lines().next(), Some("760,15,0,5000,4000,0.45,0.78,1.35"));
    }

    #[test]
    fn test_json_lines_per_cell() {
        let (count, text) = render(&params_with(OutputFormat::Json));
        assert_eq!(count, 9);
        let first = text.lines().next().unwrap();
        assert!(first.starts_with(r#"{"wavelength":4000,"zenithAngle":"#));
        assert!(first.contains(r#""deltaR":0.45"#));
        assert!(!first.contains("pressure"));
    }

    #[test]
    fn test_json_non_finite_is_null() {
        let text = RequestText {
            wavelengths: "4000",
            angles: "0°0'0\"",
            pressure: "nan",
            temperature: "15",
            water_vapor: "0",
        };
        let request = RefractionRequest::parse(&text, 5000.0).unwrap();
        let matrix = request.compute();
        let mut params = params_with(OutputFormat::Json);
        params.output.show_inputs = Some(true);
        let mut output = Vec::new();
        write_output(&mut output, &matrix, &request, &params).unwrap();
        let line = String::from_utf8(output).unwrap();
        assert!(line.contains(r#""pressure":null"#));
        assert!(line.contains(r#""deltaR":null"#));
    }

    #[test]
    fn test_text_table_with_inputs() {
        let (count, text) = render(&params_with(OutputFormat::Text));
        assert_eq!(count, 3);
        assert!(text.contains("Reference:   5000 Å"));
        assert!(text.contains("│ Wavelength │"));
        assert!(text.contains("7000 Å"));
    }
}

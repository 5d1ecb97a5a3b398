use skyrefrax::RefractionRequest;
use skyrefrax::matrix::{RefractionMatrix, display_value};
use std::io::{self, Write};
use unicode_width::UnicodeWidthStr;

const ROW_HEADER: &str = "Wavelength";
const MIN_COLUMN_WIDTH: usize = 8;

pub fn write_header_section<W: Write>(
    writer: &mut W,
    request: &RefractionRequest,
    matrix: &RefractionMatrix,
) -> io::Result<()> {
    let indices = matrix.indices();
    writeln!(writer, "  Pressure:    {:.1} mmHg", request.state.pressure_mmhg)?;
    writeln!(writer, "  Temperature: {:.1}°C", request.state.temperature_c)?;
    writeln!(
        writer,
        "  Water vapor: {:.1} mmHg",
        request.state.water_vapor_mmhg
    )?;
    writeln!(
        writer,
        "  Reference:   {} Å (n = {:.9})",
        indices.reference_wavelength, indices.reference_index
    )?;
    writeln!(writer)?;
    Ok(())
}

fn pad_left(text: &str, width: usize) -> String {
    let fill = width.saturating_sub(text.width());
    format!("{}{}", " ".repeat(fill), text)
}

fn pad_right(text: &str, width: usize) -> String {
    let fill = width.saturating_sub(text.width());
    format!("{}{}", text, " ".repeat(fill))
}

pub struct TableFormatter {
    pub row_labels: Vec<String>,
    pub column_labels: Vec<String>,
}

impl TableFormatter {
    pub fn for_matrix(matrix: &RefractionMatrix, degrees: bool) -> Self {
        Self {
            row_labels: matrix.row_labels(),
            column_labels: matrix.column_labels(degrees),
        }
    }

    pub fn column_headers(&self) -> Vec<&str> {
        std::iter::once(ROW_HEADER)
            .chain(self.column_labels.iter().map(String::as_str))
            .collect()
    }

    fn format_row(values: &[f64]) -> Vec<String> {
        values.iter().map(|&v| display_value(v)).collect()
    }

    pub fn calculate_column_widths(&self, matrix: &RefractionMatrix) -> Vec<usize> {
        let label_width = self
            .row_labels
            .iter()
            .map(|label| label.width())
            .chain(std::iter::once(ROW_HEADER.width()))
            .max()
            .unwrap_or(MIN_COLUMN_WIDTH);

        let mut widths = vec![label_width];
        for (column, header) in self.column_labels.iter().enumerate() {
            let cells = matrix
                .rows()
                .filter_map(|row| row.get(column))
                .map(|&v| display_value(v).width())
                .max()
                .unwrap_or(0);
            widths.push(header.width().max(cells).max(MIN_COLUMN_WIDTH));
        }
        widths
    }

    fn write_border<W: Write>(
        writer: &mut W,
        widths: &[usize],
        (left, middle, right): (char, char, char),
    ) -> io::Result<()> {
        write!(writer, "{}", left)?;
        for (i, &width) in widths.iter().enumerate() {
            write!(writer, "{}", "─".repeat(width + 2))?;
            if i < widths.len() - 1 {
                write!(writer, "{}", middle)?;
            }
        }
        writeln!(writer, "{}", right)
    }

    pub fn write_table_header<W: Write>(
        &self,
        writer: &mut W,
        widths: &[usize],
    ) -> io::Result<()> {
        Self::write_border(writer, widths, ('┌', '┬', '┐'))?;

        write!(writer, "│")?;
        for (header, &width) in self.column_headers().iter().zip(widths.iter()) {
            write!(writer, " {} │", pad_right(header, width))?;
        }
        writeln!(writer)?;

        Self::write_border(writer, widths, ('├', '┼', '┤'))
    }

    pub fn write_table_row<W: Write>(
        &self,
        writer: &mut W,
        label: &str,
        values: &[f64],
        widths: &[usize],
    ) -> io::Result<()> {
        write!(writer, "│ {} │", pad_left(label, widths[0]))?;
        for (cell, &width) in Self::format_row(values).iter().zip(widths.iter().skip(1)) {
            write!(writer, " {} │", pad_left(cell, width))?;
        }
        writeln!(writer)
    }

    pub fn write_table_footer<W: Write>(&self, writer: &mut W, widths: &[usize]) -> io::Result<()> {
        Self::write_border(writer, widths, ('└', '┴', '┘'))
    }

    /// Writes the complete table and returns the number of data rows.
    pub fn write_table<W: Write>(
        &self,
        writer: &mut W,
        matrix: &RefractionMatrix,
    ) -> io::Result<usize> {
        let widths = self.calculate_column_widths(matrix);
        self.write_table_header(writer, &widths)?;
        let mut count = 0;
        for (label, values) in self.row_labels.iter().zip(matrix.rows()) {
            self.write_table_row(writer, label, values, &widths)?;
            count += 1;
        }
        self.write_table_footer(writer, &widths)?;
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use skyrefrax::{AtmosphericState, build_matrix};

    fn sample_matrix() -> RefractionMatrix {
        build_matrix(
            &[4000.0, 7000.0],
            &AtmosphericState::new(760.0, 15.0, 0.0),
            &[30.0_f64.to_radians(), 60.0_f64.to_radians()],
            5000.0,
        )
    }

    #[test]
    fn test_column_headers() {
        let formatter = TableFormatter::for_matrix(&sample_matrix(), false);
        assert_eq!(formatter.column_headers(), vec!["Wavelength", "1.15", "2.00"]);
    }

    #[test]
    fn test_column_headers_with_degrees() {
        let formatter = TableFormatter::for_matrix(&sample_matrix(), true);
        assert_eq!(
            formatter.column_headers(),
            vec!["Wavelength", "1.15 (30.00°)", "2.00 (60.00°)"]
        );
    }

    #[test]
    fn test_widths_use_display_width() {
        let matrix = sample_matrix();
        let formatter = TableFormatter::for_matrix(&matrix, true);
        let widths = formatter.calculate_column_widths(&matrix);
        assert_eq!(widths, vec![10, 13, 13]);
    }

    #[test]
    fn test_table_rows_are_aligned() {
        let matrix = sample_matrix();
        let formatter = TableFormatter::for_matrix(&matrix, false);
        let mut output = Vec::new();
        let rows = formatter.write_table(&mut output, &matrix).unwrap();
        assert_eq!(rows, 2);

        let text = String::from_utf8(output).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 6);
        assert!(lines[0].starts_with('┌'));
        assert!(lines[3].contains("4000 Å"));
        assert!(lines[3].contains("0.45"));
        assert!(lines[4].contains("-1.13"));
        let first_width = lines[0].width();
        assert!(lines.iter().all(|line| line.width() == first_width));
    }

    #[test]
    fn test_header_section_formatting() {
        let matrix = sample_matrix();
        let request = RefractionRequest {
            wavelengths: vec![4000.0, 7000.0],
            angles: matrix.angles().to_vec(),
            state: AtmosphericState::new(760.0, 15.0, 0.0),
            reference_wavelength: 5000.0,
        };

        let mut output = Vec::new();
        write_header_section(&mut output, &request, &matrix).unwrap();

        let text = String::from_utf8(output).unwrap();
        assert!(text.contains("Pressure:    760.0 mmHg"));
        assert!(text.contains("Temperature: 15.0°C"));
        assert!(text.contains("Water vapor: 0.0 mmHg"));
        assert!(text.contains("Reference:   5000 Å (n = 1.000278964)"));
    }
}

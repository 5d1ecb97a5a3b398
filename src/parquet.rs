//! Parquet output format support: one row per matrix cell.

use crate::data::Parameters;
use arrow::array::{ArrayRef, Float64Builder};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use parquet::basic::Compression;
use parquet::file::properties::WriterProperties;
use skyrefrax::RefractionRequest;
use skyrefrax::matrix::{RefractionMatrix, secant};
use std::io::Write;
use std::sync::Arc;

const BATCH_SIZE: usize = 8192;

const INPUT_COLUMNS: [&str; 5] = [
    "pressure",
    "temperature",
    "waterVapor",
    "referenceWavelength",
    "referenceIndex",
];
const CELL_COLUMNS: [&str; 5] = [
    "wavelength",
    "zenithAngle",
    "secant",
    "refractiveIndex",
    "deltaR",
];

fn build_schema(show_inputs: bool) -> Arc<Schema> {
    let inputs: &[&str] = if show_inputs { &INPUT_COLUMNS } else { &[] };
    let fields: Vec<Field> = inputs
        .iter()
        .chain(CELL_COLUMNS.iter())
        .map(|name| Field::new(*name, DataType::Float64, false))
        .collect();
    Arc::new(Schema::new(fields))
}

pub fn write_parquet<W: Write + Send>(
    matrix: &RefractionMatrix,
    request: &RefractionRequest,
    params: &Parameters,
    writer: W,
) -> std::io::Result<usize> {
    let show_inputs = params.output.should_show_inputs();
    let schema = build_schema(show_inputs);
    let props = WriterProperties::builder()
        .set_compression(Compression::SNAPPY)
        .build();

    let mut parquet_writer = ArrowWriter::try_new(writer, schema.clone(), Some(props))
        .map_err(|e| std::io::Error::other(format!("Parquet writer error: {}", e)))?;

    let mut builders: Vec<Float64Builder> = (0..schema.fields().len())
        .map(|_| Float64Builder::with_capacity(BATCH_SIZE))
        .collect();
    let reference_index = matrix.indices().reference_index;
    let inputs = [
        request.state.pressure_mmhg,
        request.state.temperature_c,
        request.state.water_vapor_mmhg,
        request.reference_wavelength,
        reference_index,
    ];

    let mut batch_count = 0;
    let mut total_count = 0;

    for cell in matrix.cells() {
        let values = [
            cell.wavelength,
            cell.zenith_angle.to_degrees(),
            secant(cell.zenith_angle),
            cell.refractive_index,
            cell.delta_r,
        ];
        let prefix: &[f64] = if show_inputs { &inputs } else { &[] };
        for (builder, &value) in builders.iter_mut().zip(prefix.iter().chain(values.iter())) {
            builder.append_value(value);
        }

        batch_count += 1;
        total_count += 1;

        if batch_count >= BATCH_SIZE {
            flush_batch(&mut parquet_writer, &schema, &mut builders)?;
            batch_count = 0;
        }
    }

    if batch_count > 0 {
        flush_batch(&mut parquet_writer, &schema, &mut builders)?;
    }

    parquet_writer
        .close()
        .map_err(|e| std::io::Error::other(format!("Failed to close parquet: {}", e)))?;

    log::info!("wrote {} parquet rows", total_count);
    Ok(total_count)
}

fn flush_batch<W: Write + Send>(
    writer: &mut ArrowWriter<W>,
    schema: &Arc<Schema>,
    builders: &mut [Float64Builder],
) -> std::io::Result<()> {
    let arrays: Vec<ArrayRef> = builders
        .iter_mut()
        .map(|b| Arc::new(b.finish()) as ArrayRef)
        .collect();

    let batch = RecordBatch::try_new(schema.clone(), arrays)
        .map_err(|e| std::io::Error::other(format!("Failed to create batch: {}", e)))?;

    writer
        .write(&batch)
        .map_err(|e| std::io::Error::other(format!("Failed to write batch: {}", e)))
}

use super::normalizer::normalize_field_name;
use crate::workflows::prioritization::{CaseBatch, CaseMetric, CaseRecord};
use serde_json::Value;
use std::io::Read;

pub(crate) fn parse_csv_records<R: Read>(reader: R) -> Result<Vec<CaseRecord>, csv::Error> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let headers = csv_reader
        .headers()?
        .iter()
        .map(normalize_field_name)
        .collect::<Vec<_>>();
    let metric_columns = headers
        .iter()
        .map(|field| CaseMetric::from_field_name(field).is_some())
        .collect::<Vec<_>>();
    let mut records = Vec::new();

    for row in csv_reader.records() {
        let row = row?;
        let mut record = CaseRecord::new();
        for ((field, is_metric), cell) in headers.iter().zip(&metric_columns).zip(row.iter()) {
            let value = if *is_metric {
                metric_value(cell)
            } else {
                text_value(cell)
            };
            if let Some(value) = value {
                record.insert(field.clone(), value);
            }
        }
        records.push(record);
    }

    Ok(records)
}

pub(crate) fn parse_json_records<R: Read>(reader: R) -> Result<Vec<CaseRecord>, serde_json::Error> {
    let batch: CaseBatch = serde_json::from_reader(reader)?;
    Ok(batch.into_cases())
}

// Identifiers and notes keep their exact text ("007" stays "007").
fn text_value(cell: &str) -> Option<Value> {
    let trimmed = cell.trim();
    (!trimmed.is_empty()).then(|| Value::String(trimmed.to_string()))
}

// Empty cells stay absent so the evaluator falls back to 0. Cells that are not finite numbers
// are kept as text and surface as type mismatches under the reject policy.
fn metric_value(cell: &str) -> Option<Value> {
    let trimmed = cell.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(integer) = trimmed.parse::<i64>() {
        return Some(Value::from(integer));
    }

    match trimmed.parse::<f64>() {
        Ok(number) if number.is_finite() => Some(Value::from(number)),
        _ => Some(Value::String(trimmed.to_string())),
    }
}

#[cfg(test)]
pub(crate) fn metric_value_for_tests(cell: &str) -> Option<Value> {
    metric_value(cell)
}

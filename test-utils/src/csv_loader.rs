use std::error::Error;

use csv::Reader;

use common::{Accuracy, SensorEvent, SensorType};

/// Recorded barometer readings shipped with this crate.
pub const PRESSURE_READINGS: &str = concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/test_data/pressure_readings.csv"
);

#[repr(usize)]
#[derive(Debug, Clone, Copy)]
pub enum PressureColumn {
    Timestamp,
    Pressure,
    Accuracy,
}

impl From<PressureColumn> for usize {
    fn from(value: PressureColumn) -> Self {
        value as usize
    }
}

pub fn load_csv(file_path: &str) -> Result<Vec<Vec<f64>>, Box<dyn Error>> {
    let mut rdr = Reader::from_path(file_path)?;
    let mut data = Vec::new();

    for result in rdr.records() {
        let record = result?;
        let row: Vec<f64> = record
            .iter()
            .filter_map(|s| s.parse::<f64>().ok())
            .collect();
        data.push(row);
    }

    Ok(data)
}

pub fn load_csv_columns(
    file_path: &str,
    columns: &[usize],
) -> Result<Vec<Vec<f64>>, Box<dyn Error>> {
    if columns.is_empty() {
        return Err("No columns provided".into());
    }

    load_csv(file_path)?
        .into_iter()
        .map(|row| {
            columns
                .iter()
                .map(|&i| {
                    row.get(i)
                        .copied()
                        .ok_or_else(|| format!("Column index {} out of bounds", i).into())
                })
                .collect::<Result<Vec<f64>, Box<dyn Error>>>()
        })
        .collect()
}

fn accuracy_from_code(code: f64) -> Accuracy {
    match code as i64 {
        i64::MIN..=0 => Accuracy::Unreliable,
        1 => Accuracy::Low,
        2 => Accuracy::Medium,
        _ => Accuracy::High,
    }
}

/// Loads a pressure recording as a sequence of barometer events.
pub fn load_pressure_events(file_path: &str) -> Result<Vec<SensorEvent>, Box<dyn Error>> {
    let columns = [
        PressureColumn::Pressure.into(),
        PressureColumn::Accuracy.into(),
    ];
    let events = load_csv_columns(file_path, &columns)?
        .into_iter()
        .map(|row| {
            SensorEvent::new(
                SensorType::Pressure,
                vec![row[0] as f32],
                accuracy_from_code(row[1]),
            )
        })
        .collect();
    Ok(events)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_csv() {
        let data = load_csv(PRESSURE_READINGS).unwrap();
        assert_eq!(data.len(), 10);
    }

    #[test]
    #[should_panic(expected = "No such file or directory")]
    fn test_read_inexistent_csv() {
        let file_name = "./test_data/pressure_readingss.csv";
        let _ = load_csv(file_name).unwrap();
    }

    #[test]
    fn test_load_csv_correct_columns() {
        let columns: Vec<usize> = vec![PressureColumn::Timestamp, PressureColumn::Pressure]
            .into_iter()
            .map(usize::from)
            .collect();
        let data = load_csv_columns(PRESSURE_READINGS, &columns).unwrap();

        assert!(data[0].len() == columns.len());
        assert_eq!(data[0][1], 1013.25);
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn test_load_csv_incorrect_columns() {
        load_csv_columns(PRESSURE_READINGS, &[0, 1, 20]).unwrap();
    }

    #[test]
    fn test_load_pressure_events() {
        let events = load_pressure_events(PRESSURE_READINGS).unwrap();
        assert_eq!(events.len(), 10);
        assert!(events
            .iter()
            .all(|event| *event.sensor_type() == SensorType::Pressure && event.has_readings()));
        assert_eq!(events[0].accuracy(), Accuracy::High);
        assert_eq!(events[7].accuracy(), Accuracy::Low);
    }
}

// Copyright 2021 Twitter, Inc.
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::Error;

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

/// A two column benchmark table: the independent variable (eg: thread
/// count) and the measured runtime. Rows keep their file order, which is
/// also the order they are plotted in.
#[derive(Clone, Debug, PartialEq)]
pub struct Dataset {
    path: PathBuf,
    x_label: String,
    y_label: String,
    rows: Vec<(f64, f64)>,
}

impl Dataset {
    /// Load a comma separated file with a header row. Only the first two
    /// columns are used.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| Error::FileNotFound {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_reader(path, file)
    }

    /// Parse a table from any reader. `path` is only used to label errors.
    pub fn from_reader<P: Into<PathBuf>, R: Read>(path: P, reader: R) -> Result<Self, Error> {
        let path = path.into();

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers = reader
            .headers()
            .map_err(|e| read_error(&path, e))?
            .clone();
        if headers.len() < 2 {
            return Err(Error::Parse {
                path,
                reason: format!("expected at least 2 columns, found {}", headers.len()),
            });
        }

        let mut rows = Vec::new();
        for (row, record) in reader.records().enumerate() {
            let record = record.map_err(|e| read_error(&path, e))?;
            let x = parse_value(&path, row, &headers[0], &record[0])?;
            let y = parse_value(&path, row, &headers[1], &record[1])?;
            rows.push((x, y));
        }

        trace!("{}: {} rows", path.display(), rows.len());

        Ok(Self {
            path,
            x_label: headers[0].to_owned(),
            y_label: headers[1].to_owned(),
            rows,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// header of the independent variable column
    pub fn x_label(&self) -> &str {
        &self.x_label
    }

    /// header of the runtime column
    pub fn y_label(&self) -> &str {
        &self.y_label
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn points(&self) -> &[(f64, f64)] {
        &self.rows
    }

    pub fn xs(&self) -> Vec<f64> {
        self.rows.iter().map(|(x, _)| *x).collect()
    }

    pub fn ys(&self) -> Vec<f64> {
        self.rows.iter().map(|(_, y)| *y).collect()
    }

    /// Speedup of every row relative to the first: `y[0] / y[i]`.
    pub fn speedups(&self) -> Result<Vec<f64>, Error> {
        let baseline = match self.rows.first() {
            Some((_, y)) => *y,
            None => {
                return Err(Error::EmptyDataset {
                    path: self.path.clone(),
                })
            }
        };

        self.rows
            .iter()
            .enumerate()
            .map(|(row, (_, y))| {
                if *y == 0.0 {
                    return Err(Error::DivisionByZero { row });
                }
                let speedup = baseline / y;
                if speedup.is_finite() {
                    Ok(speedup)
                } else {
                    Err(Error::SpeedupOverflow { row })
                }
            })
            .collect()
    }

    pub fn speedup_points(&self) -> Result<Vec<(f64, f64)>, Error> {
        let speedups = self.speedups()?;
        Ok(self
            .rows
            .iter()
            .zip(speedups)
            .map(|((x, _), s)| (*x, s))
            .collect())
    }
}

fn parse_value(path: &Path, row: usize, column: &str, field: &str) -> Result<f64, Error> {
    match field.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(Error::Parse {
            path: path.to_path_buf(),
            reason: format!(
                "data row {}: '{}' is not a finite number in column '{}'",
                row, field, column
            ),
        }),
    }
}

// io failures while reading mean the input is unreadable, anything else is
// malformed content
fn read_error(path: &Path, e: csv::Error) -> Error {
    if !e.is_io_error() {
        return Error::Parse {
            path: path.to_path_buf(),
            reason: e.to_string(),
        };
    }
    match e.into_kind() {
        csv::ErrorKind::Io(source) => Error::FileNotFound {
            path: path.to_path_buf(),
            source,
        },
        kind => Error::Parse {
            path: path.to_path_buf(),
            reason: format!("{:?}", kind),
        },
    }
}

use std::io::{self, BufRead, Read};
use std::path::Path;
use std::{fs, time::Instant};

use crate::error::{Result, TspError};
use crate::point::{self, Point};

/// A TSP instance.
#[derive(Debug, Clone)]
pub struct TspInstance {
  /// Instance name.
  pub instance_name: String,
  /// Problem start time.
  pub start_time: Instant,

  /// Points in input order; `points[i].index == i`.
  pub points: Vec<Point>,
  /// Offsets subtracted by normalization, if it has run.
  pub offset: Option<(i64, i64)>,
}

impl TspInstance {
  /// Reads an instance from a file. The instance is named after the file's
  /// basename.
  pub fn from_file(file: impl AsRef<Path>) -> Result<TspInstance> {
    let file = file.as_ref();
    let instance_name = file
      .file_name()
      .map(|n| n.to_string_lossy().into_owned())
      .unwrap_or_else(|| file.display().to_string());

    let f = fs::File::open(file)?;
    TspInstance::from_reader(instance_name, io::BufReader::new(f))
  }

  pub fn from_stdin() -> Result<TspInstance> {
    // Raw bytes, so encoding errors surface per line from the parser
    let mut input = Vec::new();
    io::stdin().read_to_end(&mut input)?;
    TspInstance::from_reader("stdin", input.as_slice())
  }

  pub fn from_reader(instance_name: impl Into<String>, reader: impl BufRead) -> Result<TspInstance> {
    // Record instance start time
    let start_time = Instant::now();
    let points = read_points(reader)?;

    Ok(TspInstance { instance_name: instance_name.into(), start_time, points, offset: None })
  }

  pub fn n_points(&self) -> usize {
    self.points.len()
  }

  /// Shifts the instance into the first quadrant.
  pub fn normalize(&mut self) -> Result<()> {
    let (min_x, min_y) = point::normalize(&mut self.points)?;
    log::info!("Normalized {} by offset ({}, {})", self.instance_name, min_x, min_y);
    self.offset = Some((min_x, min_y));
    Ok(())
  }
}

/// Parses `x y` integer pairs. Pairs may share a line or straddle line breaks;
/// lines starting with `#` are skipped. An unparsable token or a dangling
/// coordinate is an error.
pub fn read_points(reader: impl BufRead) -> Result<Vec<Point>> {
  let mut points = Vec::new();
  // x of a pair still waiting for its y, with the line it came from
  let mut pending: Option<(i64, usize)> = None;

  for (line_no, line) in reader.lines().enumerate() {
    let line_no = line_no + 1;
    let line = line.map_err(|e| match e.kind() {
      io::ErrorKind::InvalidData => TspError::malformed(line_no, "<non-UTF-8 bytes>", "input is not valid UTF-8"),
      _ => TspError::Io(e),
    })?;
    if line.starts_with('#') {
      continue;
    }

    for tok in line.split_whitespace() {
      let value = tok
        .parse::<i32>()
        .map_err(|e| TspError::malformed(line_no, tok, format!("expected an integer coordinate ({e})")))?;

      match pending.take() {
        None => pending = Some((value as i64, line_no)),
        Some((x, _)) => {
          let index = points.len();
          points.push(Point::new(index, x, value as i64));
        }
      }
    }
  }

  if let Some((x, line_no)) = pending {
    return Err(TspError::malformed(line_no, x.to_string(), "x coordinate without a matching y"));
  }
  if points.is_empty() {
    return Err(TspError::EmptyInput);
  }

  log::debug!("Read {} points", points.len());
  Ok(points)
}

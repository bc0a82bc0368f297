use std::fs::File;
use std::io::{BufRead, BufReader};
use std::ops::Index;
use std::path::Path;

use nalgebra::Point3;

mod error;

pub use error::LoadError;

/// The ordered list of vehicle positions read from a trajectory file.
///
/// The length is the count declared in the file header, and is fixed once the
/// list is built. Records that were missing or didn't parse sit at the origin.
#[derive(Debug, Clone, PartialEq)]
pub struct GeoRecordList {
    records: Box<[Point3<f32>]>,
}

impl GeoRecordList {
    pub fn count(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[Point3<f32>] {
        &self.records
    }

    pub fn get(&self, index: usize) -> Option<&Point3<f32>> {
        self.records.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Point3<f32>> + '_ {
        self.records.iter()
    }
}

impl Index<usize> for GeoRecordList {
    type Output = Point3<f32>;

    fn index(&self, index: usize) -> &Self::Output {
        &self.records[index]
    }
}

impl From<Vec<Point3<f32>>> for GeoRecordList {
    fn from(records: Vec<Point3<f32>>) -> Self {
        GeoRecordList {
            records: records.into_boxed_slice(),
        }
    }
}

/// Opens and parses the trajectory file at `path`.
pub fn load<P: AsRef<Path>>(path: P) -> Result<GeoRecordList, LoadError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| LoadError::Open {
        path: path.to_owned(),
        source,
    })?;

    let records = from_reader(BufReader::new(file))?;
    log::info!("Number of records parsed: {}", records.count());
    Ok(records)
}

/// Parses a trajectory from any line source. The first line is the record
/// count; each following line is one `V(x, y, z)` record.
pub fn from_reader<R: BufRead>(mut reader: R) -> Result<GeoRecordList, LoadError> {
    let mut buf = Vec::new();
    let mut line_number = 0;

    // Lines are decoded lossily; bad bytes just make that record fail to match.
    // A read error ends the input like EOF does, and the rest is zero-filled.
    let mut next_line = |buf: &mut Vec<u8>| -> Option<String> {
        buf.clear();
        line_number += 1;
        match reader.read_until(b'\n', buf) {
            Ok(0) => None,
            Ok(_) => Some(String::from_utf8_lossy(buf).into_owned()),
            Err(err) => {
                log::warn!(
                    "Failed to read line {} of trajectory input, stopping there: {}",
                    line_number,
                    err
                );
                None
            }
        }
    };

    let count = match next_line(&mut buf) {
        None => {
            log::warn!("Trajectory input is empty; expected a record count on the first line.");
            0
        }
        Some(header) => match parse_header(&header) {
            Some(count) => {
                log::info!("Number of geocoordinate records: {}", count);
                count
            }
            None => {
                log::warn!(
                    "First line must contain number of geocoordinate records, got {:?}.",
                    header.trim_end()
                );
                0
            }
        },
    };

    let mut records = Vec::new();
    records
        .try_reserve_exact(count)
        .map_err(|_| LoadError::Allocation { count })?;

    let mut malformed = 0;
    while records.len() < count {
        let line = match next_line(&mut buf) {
            Some(line) => line,
            None => break,
        };

        let record = match parse_record(&line) {
            Some(pt) => pt,
            None => {
                log::trace!(
                    "Record {} did not match V(x, y, z): {:?}",
                    records.len(),
                    line.trim_end()
                );
                malformed += 1;
                Point3::origin()
            }
        };
        log::info!(
            "{}: Vector3({:.6}, {:.6}, {:.6})",
            records.len(),
            record.x,
            record.y,
            record.z
        );
        records.push(record);
    }

    if malformed > 0 {
        log::debug!("{} malformed records were zeroed", malformed);
    }
    if records.len() < count {
        log::debug!(
            "Input ended after {} of {} records; the rest are zeroed",
            records.len(),
            count
        );
    }

    // Capacity was reserved above, so this never reallocates
    records.resize(count, Point3::origin());
    Ok(GeoRecordList::from(records))
}

/// Parses the record count from the header line: a leading decimal integer,
/// with anything after it ignored (`"3 records"` is 3).
pub fn parse_header(line: &str) -> Option<usize> {
    let line = line.trim_start();
    let digits = line.strip_prefix('+').unwrap_or(line);
    let len = count_digits(digits.as_bytes());
    digits[..len].parse().ok()
}

/// Parses one `V(x, y, z)` record. The line is accepted as soon as all three
/// numbers are read; anything after the third one (the closing paren, a
/// comment) is ignored. Returns `None` unless all three are there, so a
/// half-readable line never produces a half-filled point.
pub fn parse_record(line: &str) -> Option<Point3<f32>> {
    let rest = line.trim_start().strip_prefix("V(")?;
    let (x, rest) = scan_float(rest)?;
    let rest = rest.trim_start().strip_prefix(',')?;
    let (y, rest) = scan_float(rest)?;
    let rest = rest.trim_start().strip_prefix(',')?;
    let (z, _) = scan_float(rest)?;

    Some(Point3::new(x, y, z))
}

/// Reads the longest decimal float at the start of `s` (after whitespace) and
/// returns it with the unread remainder.
fn scan_float(s: &str) -> Option<(f32, &str)> {
    let s = s.trim_start();
    let bytes = s.as_bytes();

    let mut end = 0;
    if let Some(b'+') | Some(b'-') = bytes.first() {
        end += 1;
    }
    let int_digits = count_digits(&bytes[end..]);
    end += int_digits;

    let mut frac_digits = 0;
    if bytes.get(end) == Some(&b'.') {
        frac_digits = count_digits(&bytes[end + 1..]);
        if int_digits + frac_digits > 0 {
            end += 1 + frac_digits;
        }
    }
    if int_digits + frac_digits == 0 {
        return None;
    }

    // An exponent only counts if it has digits; otherwise the `e` is left over
    if let Some(b'e') | Some(b'E') = bytes.get(end) {
        let mut exp_end = end + 1;
        if let Some(b'+') | Some(b'-') = bytes.get(exp_end) {
            exp_end += 1;
        }
        let exp_digits = count_digits(&bytes[exp_end..]);
        if exp_digits > 0 {
            end = exp_end + exp_digits;
        }
    }

    let value = s[..end].parse().ok()?;
    Some((value, &s[end..]))
}

fn count_digits(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| b.is_ascii_digit()).count()
}

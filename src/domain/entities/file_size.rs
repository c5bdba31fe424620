//! File size value object scraped from container rows.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::AppError;

/// Unit of a reported file size. The container page only ever reports
/// megabytes or gigabytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SizeUnit {
    Mb,
    Gb,
}

impl fmt::Display for SizeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SizeUnit::Mb => write!(f, "MB"),
            SizeUnit::Gb => write!(f, "GB"),
        }
    }
}

impl FromStr for SizeUnit {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "MB" => Ok(SizeUnit::Mb),
            "GB" => Ok(SizeUnit::Gb),
            other => Err(AppError::validation(format!("unknown size unit '{other}'"))),
        }
    }
}

/// A file size with its unit.
///
/// A value of `0` is legal and means "the page reported no usable size";
/// the estimation algorithm treats such entries as missing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FileSize {
    size: f64,
    unit: SizeUnit,
}

impl FileSize {
    /// Creates a file size, rejecting negative values.
    pub fn new(size: f64, unit: SizeUnit) -> Result<Self, AppError> {
        if size < 0.0 {
            return Err(AppError::validation("file size cannot be negative"));
        }
        Ok(Self { size, unit })
    }

    pub fn size(&self) -> f64 {
        self.size
    }

    pub fn unit(&self) -> SizeUnit {
        self.unit
    }

    /// True when the row reported an actual (non-zero) size.
    pub fn is_known(&self) -> bool {
        self.size > 0.0
    }
}

impl fmt::Display for FileSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2} {}", self.size, self.unit)
    }
}

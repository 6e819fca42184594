//! Parsing of user-typed list positions.
//!
//! Every listing in smooth (changed files, commits, backups, experiments) is
//! numbered from 1, and commands refer back to entries by those numbers.
//!
//! # Supported Formats
//! - **Single indices**: `1`, `3`, `5`
//! - **Space-separated**: `1 3 5`
//! - **Comma-separated**: `1,3,5`
//! - **Ranges**: `3-6` (expands to 3,4,5,6)
//! - **Mixed combinations**: `1 3-5,8` (expands to 1,3,4,5,8)
//!
//! Duplicates collapse and the result is always ascending.

use crate::core::error::{Result, SmoothError};
use std::collections::BTreeSet;

/// Largest number of entries a single range may expand to
pub const MAX_RANGE_LEN: usize = 10_000;

pub struct IndexParser;

impl IndexParser {
    pub fn parse(input: &str) -> Result<Vec<usize>> {
        let mut indices = BTreeSet::new();

        for part in input.split([' ', ',']).map(str::trim).filter(|s| !s.is_empty()) {
            match part.split_once('-') {
                Some((start, end)) => {
                    if end.contains('-') {
                        return Err(SmoothError::invalid_range_format(part));
                    }
                    let start: usize = start
                        .parse()
                        .map_err(|_| SmoothError::invalid_range_number(start))?;
                    let end: usize = end
                        .parse()
                        .map_err(|_| SmoothError::invalid_range_number(end))?;

                    if start > end {
                        return Err(SmoothError::invalid_range_order(start, end));
                    }
                    if end - start >= MAX_RANGE_LEN {
                        return Err(SmoothError::range_too_large(start, end, MAX_RANGE_LEN));
                    }
                    indices.extend(start..=end);
                }
                None => {
                    let num: usize = part.parse().map_err(|_| SmoothError::invalid_number(part))?;
                    indices.insert(num);
                }
            }
        }

        Ok(indices.into_iter().collect())
    }

    /// Check every index is within `1..=count`
    pub fn validate(indices: &[usize], count: usize) -> Result<()> {
        if count == 0 {
            return Err(SmoothError::NothingToSelect);
        }

        for &index in indices {
            if index == 0 {
                return Err(SmoothError::ZeroIndex);
            }
            if index > count {
                return Err(SmoothError::index_out_of_range(index, count));
            }
        }
        Ok(())
    }

    /// Parse exactly one position in `1..=count`
    pub fn parse_one(input: &str, count: usize) -> Result<usize> {
        let trimmed = input.trim();
        let index: usize = trimmed
            .parse()
            .map_err(|_| SmoothError::invalid_number(trimmed))?;
        Self::validate(&[index], count)?;
        Ok(index)
    }
}

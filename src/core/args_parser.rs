//! Index arguments from the command line, resolved against a listing.
//!
//! [`ArgsParser`] joins the raw clap values, parses them with
//! [`IndexParser`] and validates them against the number of entries shown.

use crate::core::{
    error::{Result, SmoothError},
    index_parser::IndexParser,
};

pub struct ArgsParser;

impl ArgsParser {
    /// Parse clap values such as `["1", "3-5,8"]` into validated 1-based indices
    ///
    /// # Examples
    /// ```no_run
    /// use smooth::core::args_parser::ArgsParser;
    ///
    /// let indices = ArgsParser::parse_indices(&["1-3".to_string(), "5".to_string()], 10)?;
    /// assert_eq!(indices, vec![1, 2, 3, 5]);
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn parse_indices(args: &[String], count: usize) -> Result<Vec<usize>> {
        if args.is_empty() {
            return Err(SmoothError::NoIndicesProvided);
        }

        let indices = IndexParser::parse(&args.join(" ")).map_err(|e| match e {
            SmoothError::InvalidRangeOrder { .. } | SmoothError::RangeTooLarge { .. } => e,
            other => SmoothError::invalid_index_format(other.to_string()),
        })?;

        if indices.is_empty() {
            return Err(SmoothError::NoValidIndices);
        }

        IndexParser::validate(&indices, count)?;
        Ok(indices)
    }

    /// Resolve index arguments to the listed items they name, in index order
    pub fn select<'a, T>(args: &[String], items: &'a [T]) -> Result<Vec<&'a T>> {
        let indices = Self::parse_indices(args, items.len())?;
        Ok(indices.into_iter().map(|i| &items[i - 1]).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_multiple_args() -> Result<()> {
        assert_eq!(ArgsParser::parse_indices(&args(&["1", "3-5", "8"]), 10)?, vec![1, 3, 4, 5, 8]);
        Ok(())
    }

    #[test]
    fn test_parse_empty_args() {
        assert!(matches!(
            ArgsParser::parse_indices(&[], 5),
            Err(SmoothError::NoIndicesProvided)
        ));
        assert!(matches!(
            ArgsParser::parse_indices(&args(&[","]), 5),
            Err(SmoothError::NoValidIndices)
        ));
    }

    #[test]
    fn test_parse_invalid_index() {
        let err = ArgsParser::parse_indices(&args(&["abc"]), 5).unwrap_err();
        assert!(err.to_string().contains("Invalid index format"));
    }

    #[test]
    fn test_parse_index_out_of_bounds() {
        let err = ArgsParser::parse_indices(&args(&["10"]), 5).unwrap_err();
        assert!(err.to_string().contains("out of range"));
    }

    #[test]
    fn test_select_items() -> Result<()> {
        let items = ["a.txt", "b.txt", "c.txt"];
        let picked = ArgsParser::select(&args(&["3,1"]), &items)?;
        assert_eq!(picked, vec![&"a.txt", &"c.txt"]);
        Ok(())
    }
}

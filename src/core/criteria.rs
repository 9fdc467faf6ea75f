use crate::errors::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Inclusive year range `[min, max]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearRange {
    pub min: i32,
    pub max: i32,
}

impl YearRange {
    pub fn new(min: i32, max: i32) -> Self {
        Self { min, max }
    }

    #[inline]
    pub fn contains(&self, year: i32) -> bool {
        self.min <= year && year <= self.max
    }

    pub fn is_inverted(&self) -> bool {
        self.min > self.max
    }

    /// Whether any year lies in both ranges.
    pub fn overlaps(&self, other: YearRange) -> bool {
        self.min <= other.max && other.min <= self.max
    }

    /// Clamp both ends into `bounds` (the observed span of the data).
    ///
    /// Returns `None` when the range lies entirely outside `bounds`, so a
    /// range that misses the data never turns into a window inside it.
    /// Inverted ranges come back with both ends clamped and stay inverted.
    pub fn clamped_to(&self, bounds: YearRange) -> Option<YearRange> {
        if self.min.max(self.max) < bounds.min || self.min.min(self.max) > bounds.max {
            return None;
        }
        Some(YearRange {
            min: self.min.clamp(bounds.min, bounds.max),
            max: self.max.clamp(bounds.min, bounds.max),
        })
    }
}

/// Selection driving every filtered view: a year range and a genre set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterCriteria {
    pub years: YearRange,
    pub genres: BTreeSet<String>,
}

impl FilterCriteria {
    pub fn new<I, S>(years: YearRange, genres: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            years,
            genres: genres.into_iter().map(Into::into).collect(),
        }
    }

    /// Caller-side guard. The filter itself accepts any criteria; callers
    /// use this to turn "nothing selected" into a message instead of an
    /// empty dashboard.
    pub fn validate(&self) -> Result<()> {
        if self.genres.is_empty() {
            return Err(Error::validation("select at least one genre"));
        }
        if self.years.is_inverted() {
            return Err(Error::validation(format!(
                "year range is inverted: {} > {}",
                self.years.min, self.years.max
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_year_range_is_inclusive() {
        let range = YearRange::new(1990, 1999);
        assert!(range.contains(1990));
        assert!(range.contains(1999));
        assert!(!range.contains(1989));
        assert!(!range.contains(2000));
    }

    #[test]
    fn test_clamped_to_observed_bounds() {
        let observed = YearRange::new(1915, 2023);
        assert_eq!(
            YearRange::new(1960, 2025).clamped_to(observed),
            Some(YearRange::new(1960, 2023))
        );
        assert_eq!(
            YearRange::new(1800, 1915).clamped_to(observed),
            Some(YearRange::new(1915, 1915))
        );
    }

    #[test]
    fn test_range_outside_the_data_is_not_clamped() {
        let observed = YearRange::new(1915, 2023);
        assert_eq!(YearRange::new(1800, 1900).clamped_to(observed), None);
        assert_eq!(YearRange::new(2030, 2040).clamped_to(observed), None);
        assert!(!YearRange::new(1800, 1900).overlaps(observed));
    }

    #[test]
    fn test_inverted_range_stays_inverted_after_clamping() {
        let clamped = YearRange::new(2000, 1980)
            .clamped_to(YearRange::new(1972, 2010))
            .unwrap();
        assert!(clamped.is_inverted());
    }

    #[test]
    fn test_validate_rejects_empty_genres() {
        let criteria = FilterCriteria::new(YearRange::new(1990, 2000), Vec::<String>::new());
        assert!(matches!(criteria.validate(), Err(Error::Validation(_))));
    }

    #[test]
    fn test_validate_rejects_inverted_range() {
        let criteria = FilterCriteria::new(YearRange::new(2000, 1990), ["Drama"]);
        assert!(criteria.validate().is_err());
    }

    #[test]
    fn test_validate_accepts_selection() {
        let criteria = FilterCriteria::new(YearRange::new(1990, 2000), ["Drama", "Terror"]);
        assert!(criteria.validate().is_ok());
        assert_eq!(criteria.genres.len(), 2);
    }
}

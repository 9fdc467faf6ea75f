//! Cell parsers shared by the movie and crew loaders.
//!
//! Numeric exports often write integers as floats (`1995.0`), so integer
//! cells accept an integral float too.

/// Trimmed cell, `None` when blank.
pub(crate) fn text(cell: &Option<String>) -> Option<&str> {
    cell.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

pub(crate) fn float(cell: &Option<String>) -> Option<f64> {
    text(cell)?.parse::<f64>().ok().filter(|v| v.is_finite())
}

pub(crate) fn int(cell: &Option<String>) -> Option<i64> {
    let raw = text(cell)?;
    raw.parse::<i64>().ok().or_else(|| {
        let value = raw.parse::<f64>().ok()?;
        (value.is_finite() && value.fract() == 0.0).then_some(value as i64)
    })
}

pub(crate) fn year(cell: &Option<String>) -> Option<i32> {
    int(cell).and_then(|v| i32::try_from(v).ok())
}

pub(crate) fn count(cell: &Option<String>) -> Option<u64> {
    int(cell).and_then(|v| u64::try_from(v).ok())
}

/// Positive minute or country count; zero and negatives are unknown.
pub(crate) fn positive(cell: &Option<String>) -> Option<u32> {
    int(cell)
        .and_then(|v| u32::try_from(v).ok())
        .filter(|v| *v > 0)
}

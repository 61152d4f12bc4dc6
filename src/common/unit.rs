//! Unit conversion utilities.
//!
//! Presentation geometry is stored in EMUs (English Metric Units); font sizes
//! are stored in hundredths of a point.

pub const EMUS_PER_INCH: i64 = 914_400;
pub const EMUS_PER_CM: i64 = 360_000;
pub const EMUS_PER_PT: i64 = 12_700;

/// Font size in points to the centipoint value stored in `sz` attributes.
#[inline]
pub fn pt_to_centipoints(pt: f64) -> u32 {
    (pt * 100.0).round() as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_emu_ratios() {
        assert_eq!(EMUS_PER_INCH, 72 * EMUS_PER_PT);
        assert_eq!(EMUS_PER_INCH * 100, 254 * EMUS_PER_CM);
    }

    #[test]
    fn test_centipoints() {
        assert_eq!(pt_to_centipoints(10.5), 1050);
        assert_eq!(pt_to_centipoints(14.0), 1400);
    }
}

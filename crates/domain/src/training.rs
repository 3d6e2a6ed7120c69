use derive_more::{Display, Into};
use std::fmt;

#[derive(Debug, Default, Display, Clone, Copy, Into, PartialEq, PartialOrd)]
pub struct Reps(u32);

impl Reps {
    pub fn new(value: u32) -> Result<Self, RepsError> {
        if !(0..1000).contains(&value) {
            return Err(RepsError::OutOfRange);
        }

        Ok(Self(value))
    }
}

impl TryFrom<&str> for Reps {
    type Error = RepsError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().parse::<u32>() {
            Ok(parsed_value) => Reps::new(parsed_value),
            Err(_) => Err(RepsError::ParseError),
        }
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum RepsError {
    #[error("Reps must be in the range 0 to 999")]
    OutOfRange,
    #[error("Reps must be an integer")]
    ParseError,
}

/// Load in pounds.
#[derive(Debug, Default, Display, Clone, Copy, Into, PartialEq, PartialOrd)]
pub struct Weight(f32);

impl Weight {
    pub fn new(value: f32) -> Result<Self, WeightError> {
        if !(0.0..2000.0).contains(&value) {
            return Err(WeightError::OutOfRange);
        }

        if (value * 10.0 % 1.0).abs() > f32::EPSILON {
            return Err(WeightError::InvalidResolution);
        }

        Ok(Self(value))
    }

    #[must_use]
    pub fn is_zero(self) -> bool {
        self.0 == 0.0
    }
}

impl TryFrom<&str> for Weight {
    type Error = WeightError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().parse::<f32>() {
            Ok(parsed_value) => Weight::new(parsed_value),
            Err(_) => Err(WeightError::ParseError),
        }
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum WeightError {
    #[error("Weight must be in the range 0.0 to 1999.9 lbs")]
    OutOfRange,
    #[error("Weight must be a multiple of 0.1 lbs")]
    InvalidResolution,
    #[error("Weight must be a decimal")]
    ParseError,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, PartialOrd)]
pub struct RPE(u8);

impl RPE {
    pub const FIVE: RPE = RPE(50);
    pub const SEVEN: RPE = RPE(70);
    pub const EIGHT: RPE = RPE(80);
    pub const NINE: RPE = RPE(90);
    pub const TEN: RPE = RPE(100);

    pub fn new(value: f32) -> Result<Self, RPEError> {
        if !(1.0..=10.0).contains(&value) {
            return Err(RPEError::OutOfRange);
        }

        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let v = (value * 10.0).round() as u8;

        if v % 5 != 0 {
            return Err(RPEError::InvalidResolution);
        }

        Ok(Self(v))
    }
}

impl From<RPE> for f32 {
    fn from(value: RPE) -> Self {
        f32::from(value.0) / 10.0
    }
}

impl From<RPE> for f64 {
    fn from(value: RPE) -> Self {
        f64::from(value.0) / 10.0
    }
}

impl TryFrom<&str> for RPE {
    type Error = RPEError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().parse::<f32>() {
            Ok(parsed_value) => RPE::new(parsed_value),
            Err(_) => Err(RPEError::ParseError),
        }
    }
}

impl fmt::Display for RPE {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", f32::from(*self))
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum RPEError {
    #[error("RPE must be in the range 1.0 to 10.0")]
    OutOfRange,
    #[error("RPE must be a multiple of 0.5")]
    InvalidResolution,
    #[error("RPE must be a decimal")]
    ParseError,
}

#[must_use]
pub fn mean(values: impl IntoIterator<Item = f64>) -> Option<f64> {
    let (sum, count) = values
        .into_iter()
        .fold((0.0, 0_u32), |(sum, count), v| (sum + v, count + 1));
    if count == 0 {
        None
    } else {
        Some(sum / f64::from(count))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("0", Ok(Reps(0)))]
    #[case(" 12 ", Ok(Reps(12)))]
    #[case("1000", Err(RepsError::OutOfRange))]
    #[case("1.5", Err(RepsError::ParseError))]
    fn test_reps_try_from_str(#[case] value: &str, #[case] expected: Result<Reps, RepsError>) {
        assert_eq!(Reps::try_from(value), expected);
    }

    #[rstest]
    #[case("0", Ok(Weight(0.0)))]
    #[case("135", Ok(Weight(135.0)))]
    #[case("22.5", Ok(Weight(22.5)))]
    #[case("-1", Err(WeightError::OutOfRange))]
    #[case("2000", Err(WeightError::OutOfRange))]
    #[case("10.25", Err(WeightError::InvalidResolution))]
    #[case("heavy", Err(WeightError::ParseError))]
    fn test_weight_try_from_str(
        #[case] value: &str,
        #[case] expected: Result<Weight, WeightError>,
    ) {
        assert_eq!(Weight::try_from(value), expected);
    }

    #[test]
    fn test_weight_is_zero() {
        assert!(Weight::default().is_zero());
        assert!(!Weight(2.5).is_zero());
    }

    #[rstest]
    #[case("8", Ok(RPE::EIGHT))]
    #[case("9.5", Ok(RPE(95)))]
    #[case("10", Ok(RPE::TEN))]
    #[case("0", Err(RPEError::OutOfRange))]
    #[case("10.5", Err(RPEError::OutOfRange))]
    #[case("7.2", Err(RPEError::InvalidResolution))]
    #[case("hard", Err(RPEError::ParseError))]
    fn test_rpe_try_from_str(#[case] value: &str, #[case] expected: Result<RPE, RPEError>) {
        assert_eq!(RPE::try_from(value), expected);
    }

    #[rstest]
    #[case(RPE::SEVEN, "7")]
    #[case(RPE(85), "8.5")]
    fn test_rpe_display(#[case] rpe: RPE, #[case] string: &str) {
        assert_eq!(rpe.to_string(), string);
    }

    #[rstest]
    #[case(&[], None)]
    #[case(&[8.0], Some(8.0))]
    #[case(&[7.0, 8.0, 9.0], Some(8.0))]
    fn test_mean(#[case] values: &[f64], #[case] expected: Option<f64>) {
        assert_eq!(mean(values.iter().copied()), expected);
    }
}

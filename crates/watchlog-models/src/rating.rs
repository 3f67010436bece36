use serde::{Deserialize, Serialize};
use std::fmt;

/// User rating on a 1-5 star scale
///
/// Construction always goes through [`Rating::new`] (or `TryFrom<u8>`), so a
/// `Rating` value is in range by construction. Deserialization uses the same check,
/// which means a persisted record carrying `"rating": 7` fails to parse.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(try_from = "u8", into = "u8")]
pub struct Rating(u8);

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("rating must be an integer between {min} and {max}, got {value}", min = Rating::MIN, max = Rating::MAX)]
pub struct RatingError {
    pub value: u8,
}

impl Rating {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    pub fn new(value: u8) -> Result<Self, RatingError> {
        if (Self::MIN..=Self::MAX).contains(&value) {
            Ok(Self(value))
        } else {
            Err(RatingError { value })
        }
    }

    pub fn value(self) -> u8 {
        self.0
    }

    /// Star string for terminal display, e.g. `★★★☆☆`
    pub fn stars(self) -> String {
        let filled = self.0 as usize;
        let empty = (Self::MAX - self.0) as usize;
        format!("{}{}", "★".repeat(filled), "☆".repeat(empty))
    }
}

impl TryFrom<u8> for Rating {
    type Error = RatingError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Rating> for u8 {
    fn from(rating: Rating) -> Self {
        rating.0
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.0, Self::MAX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rating_bounds() {
        assert!(Rating::new(0).is_err());
        assert_eq!(Rating::new(1).unwrap().value(), 1);
        assert_eq!(Rating::new(5).unwrap().value(), 5);
        assert_eq!(Rating::new(6), Err(RatingError { value: 6 }));
    }

    #[test]
    fn test_rating_deserialize_rejects_out_of_range() {
        let ok: Rating = serde_json::from_str("4").unwrap();
        assert_eq!(ok.value(), 4);
        assert!(serde_json::from_str::<Rating>("9").is_err());
    }

    #[test]
    fn test_rating_stars() {
        assert_eq!(Rating::new(3).unwrap().stars(), "★★★☆☆");
    }
}

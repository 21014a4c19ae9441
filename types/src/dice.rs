//! Dice and the dice configuration.
//!
//! Each die is given on the command line as a comma-separated list of
//! [`FACES_PER_DIE`] integers, e.g. `2,2,4,4,9,9`. Faces may be negative and
//! may repeat. At least [`MIN_DICE`] dice are required.

use std::fmt;

use thiserror::Error;

use crate::{FACES_PER_DIE, MIN_DICE};

/// Fatal configuration errors, detected before any session starts.
///
/// `die` is the zero-based position; messages count dice from one.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid number of dice. Please specify at least three dice (got {got}, min {min}).")]
    TooFewDice { got: usize, min: usize },
    #[error(
        "Invalid dice format. Each dice must have 6 comma-separated integers \
         (die {n} has {got} values, expected {expected}).",
        n = .die + 1
    )]
    WrongFaceCount {
        die: usize,
        got: usize,
        expected: usize,
    },
    #[error(
        "Invalid dice format. Each dice must have 6 comma-separated integers \
         (die {n}: {token:?} is not a number).",
        n = .die + 1
    )]
    NotANumber { die: usize, token: String },
    #[error(
        "Invalid face values of dice. Dice face values must be integers \
         (die {n}: {token:?}).",
        n = .die + 1
    )]
    NonIntegerFace { die: usize, token: String },
}

/// A single die: an immutable, ordered list of face values.
///
/// `position` is the die's index in the configuration and serves as its
/// identity (two dice with identical faces are still different dice).
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Die {
    position: usize,
    faces: [i64; FACES_PER_DIE],
}

impl Die {
    /// Create a die from exactly [`FACES_PER_DIE`] faces.
    pub fn new(position: usize, faces: &[i64]) -> Result<Self, ConfigError> {
        let faces: [i64; FACES_PER_DIE] =
            faces
                .try_into()
                .map_err(|_| ConfigError::WrongFaceCount {
                    die: position,
                    got: faces.len(),
                    expected: FACES_PER_DIE,
                })?;
        Ok(Self { position, faces })
    }

    /// Parse a die from its comma-separated form.
    pub fn parse(position: usize, spec: &str) -> Result<Self, ConfigError> {
        let tokens: Vec<&str> = spec.split(',').map(str::trim).collect();
        if tokens.len() != FACES_PER_DIE {
            return Err(ConfigError::WrongFaceCount {
                die: position,
                got: tokens.len(),
                expected: FACES_PER_DIE,
            });
        }

        let mut faces = Vec::with_capacity(FACES_PER_DIE);
        for token in tokens {
            faces.push(parse_face(position, token)?);
        }
        Self::new(position, &faces)
    }

    /// Position of this die in the configuration.
    pub fn position(&self) -> usize {
        self.position
    }

    pub fn faces(&self) -> &[i64] {
        &self.faces
    }

    /// Number of faces (always [`FACES_PER_DIE`]).
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Face shown at `index`.
    ///
    /// The index must come from a fair draw made elsewhere; a die has no
    /// randomness of its own.
    pub fn face_at(&self, index: usize) -> Option<i64> {
        self.faces.get(index).copied()
    }
}

impl fmt::Display for Die {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, face) in self.faces.iter().enumerate() {
            if idx > 0 {
                f.write_str(",")?;
            }
            write!(f, "{face}")?;
        }
        Ok(())
    }
}

fn parse_face(die: usize, token: &str) -> Result<i64, ConfigError> {
    if let Ok(face) = token.parse::<i64>() {
        return Ok(face);
    }
    // Numeric but fractional (or out of i64 range) is reported separately from garbage.
    match token.parse::<f64>() {
        Ok(value) if value.is_finite() => Err(ConfigError::NonIntegerFace {
            die,
            token: token.to_string(),
        }),
        _ => Err(ConfigError::NotANumber {
            die,
            token: token.to_string(),
        }),
    }
}

/// Ordered pool of dice.
///
/// Removing a die yields a new set; the set a session starts from is never
/// changed in place.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DiceSet {
    dice: Vec<Die>,
}

impl DiceSet {
    /// Build the configured set from already parsed dice.
    pub fn new(dice: Vec<Die>) -> Result<Self, ConfigError> {
        if dice.len() < MIN_DICE {
            return Err(ConfigError::TooFewDice {
                got: dice.len(),
                min: MIN_DICE,
            });
        }
        Ok(Self { dice })
    }

    /// Parse one die per argument.
    pub fn parse<S: AsRef<str>>(args: &[S]) -> Result<Self, ConfigError> {
        if args.len() < MIN_DICE {
            return Err(ConfigError::TooFewDice {
                got: args.len(),
                min: MIN_DICE,
            });
        }
        let dice = args
            .iter()
            .enumerate()
            .map(|(position, arg)| Die::parse(position, arg.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(dice)
    }

    pub fn len(&self) -> usize {
        self.dice.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dice.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Die> {
        self.dice.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Die> {
        self.dice.iter()
    }

    /// Whether the die with configuration position `position` is still in this set.
    pub fn contains(&self, position: usize) -> bool {
        self.dice.iter().any(|die| die.position() == position)
    }

    /// A copy of this set without the die at `index`.
    ///
    /// An out-of-range index yields an unchanged copy.
    pub fn without(&self, index: usize) -> DiceSet {
        let dice = self
            .dice
            .iter()
            .enumerate()
            .filter(|(idx, _)| *idx != index)
            .map(|(_, die)| die.clone())
            .collect();
        // Reduced pools may drop below MIN_DICE, which only applies to the configuration.
        DiceSet { dice }
    }
}

impl<'a> IntoIterator for &'a DiceSet {
    type Item = &'a Die;
    type IntoIter = std::slice::Iter<'a, Die>;

    fn into_iter(self) -> Self::IntoIter {
        self.dice.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DEFAULT_DICE: [&str; 3] = ["2,2,4,4,9,9", "6,8,1,1,8,6", "7,5,3,7,5,3"];

    #[test]
    fn test_parse_default_configuration() {
        let set = DiceSet::parse(&DEFAULT_DICE).unwrap();
        assert_eq!(set.len(), 3);
        assert_eq!(set.get(0).unwrap().faces(), &[2, 2, 4, 4, 9, 9]);
        assert_eq!(set.get(1).unwrap().faces(), &[6, 8, 1, 1, 8, 6]);
        assert_eq!(set.get(2).unwrap().position(), 2);
    }

    #[test]
    fn test_parse_negative_faces_and_whitespace() {
        let die = Die::parse(0, "-1, 0 ,3,-7,2,2").unwrap();
        assert_eq!(die.faces(), &[-1, 0, 3, -7, 2, 2]);
    }

    #[test]
    fn test_too_few_dice() {
        let err = DiceSet::parse(&["1,2,3,4,5,6", "1,2,3,4,5,6"]).unwrap_err();
        assert_eq!(err, ConfigError::TooFewDice { got: 2, min: 3 });
        assert!(err.to_string().starts_with("Invalid number of dice."));

        let empty: [&str; 0] = [];
        assert!(matches!(
            DiceSet::parse(&empty),
            Err(ConfigError::TooFewDice { got: 0, .. })
        ));
    }

    #[test]
    fn test_wrong_face_count() {
        let err = DiceSet::parse(&["1,2,3,4,5,6", "1,2,3,4,5", "1,2,3,4,5,6"]).unwrap_err();
        assert_eq!(
            err,
            ConfigError::WrongFaceCount {
                die: 1,
                got: 5,
                expected: 6
            }
        );
        // Second argument on the command line
        assert!(err.to_string().ends_with("(die 2 has 5 values, expected 6)."));

        assert!(matches!(
            Die::parse(0, "1,2,3,4,5,6,7"),
            Err(ConfigError::WrongFaceCount { got: 7, .. })
        ));
    }

    #[test]
    fn test_non_numeric_face() {
        let err = Die::parse(3, "1,2,x,4,5,6").unwrap_err();
        assert_eq!(
            err,
            ConfigError::NotANumber {
                die: 3,
                token: "x".to_string()
            }
        );
        assert!(err.to_string().starts_with("Invalid dice format."));
        assert!(err.to_string().contains("(die 4: \"x\" is not a number)"));

        assert!(matches!(
            Die::parse(0, "1,2,,4,5,6"),
            Err(ConfigError::NotANumber { .. })
        ));
    }

    #[test]
    fn test_fractional_face() {
        let err = Die::parse(0, "1,2,3.5,4,5,6").unwrap_err();
        assert_eq!(
            err,
            ConfigError::NonIntegerFace {
                die: 0,
                token: "3.5".to_string()
            }
        );
        assert!(err.to_string().starts_with("Invalid face values of dice."));
    }

    #[test]
    fn test_face_at() {
        let die = Die::parse(0, "2,2,4,4,9,9").unwrap();
        assert_eq!(die.face_at(0), Some(2));
        assert_eq!(die.face_at(5), Some(9));
        assert_eq!(die.face_at(6), None);
        assert_eq!(die.face_count(), FACES_PER_DIE);
    }

    #[test]
    fn test_display_round_trips_through_parse() {
        let die = Die::parse(0, "-3,8,1,1,8,6").unwrap();
        assert_eq!(die.to_string(), "-3,8,1,1,8,6");
        assert_eq!(Die::parse(0, &die.to_string()).unwrap(), die);
    }

    #[test]
    fn test_without_produces_new_set() {
        let set = DiceSet::parse(&DEFAULT_DICE).unwrap();
        let reduced = set.without(1);

        assert_eq!(set.len(), 3, "original set must be untouched");
        assert_eq!(reduced.len(), 2);
        assert!(!reduced.contains(1));
        assert!(reduced.contains(0));
        assert!(reduced.contains(2));
        // Positions survive removal
        assert_eq!(reduced.get(1).unwrap().position(), 2);

        let again = reduced.without(0);
        assert_eq!(again.len(), 1);
        assert_eq!(again.get(0).unwrap().position(), 2);
    }

    #[test]
    fn test_identical_dice_keep_distinct_identity() {
        let set = DiceSet::parse(&["1,1,1,1,1,1", "1,1,1,1,1,1", "2,2,2,2,2,2"]).unwrap();
        let reduced = set.without(0);
        assert!(!reduced.contains(0));
        assert!(reduced.contains(1));
    }
}

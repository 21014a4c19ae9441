/// Number of faces every die must have
pub const FACES_PER_DIE: usize = 6;

/// Minimum number of dice needed for a non-trivial selection
pub const MIN_DICE: usize = 3;

/// Invocation shown alongside configuration errors
pub const USAGE_EXAMPLE: &str = "fairdice 2,2,4,4,9,9 6,8,1,1,8,6 7,5,3,7,5,3";

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// A totally ordered member value.
///
/// Values arrive as `f64`, which only implements `PartialOrd`. `Key` wraps
/// them with `f64::total_cmp` so the tree can rely on a full `Ord`. Display
/// output is fixed-point with exactly three fractional digits, independent
/// of locale.
///
/// # Examples
/// ```
/// use family_tree::Key;
///
/// let key = Key::new(72.5);
/// assert_eq!(key.to_string(), "72.500");
/// assert!(Key::new(1.0) < Key::new(2.0));
/// ```
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct Key(f64);

impl Key {
    pub fn new(value: f64) -> Self {
        Key(value)
    }

    pub fn value(self) -> f64 {
        self.0
    }
}

impl From<f64> for Key {
    fn from(value: f64) -> Self {
        Key(value)
    }
}

impl Ord for Key {
    fn cmp(&self, other: &Key) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl PartialOrd for Key {
    fn partial_cmp(&self, other: &Key) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Key {
    fn eq(&self, other: &Key) -> bool {
        self.0.total_cmp(&other.0) == Ordering::Equal
    }
}

impl Eq for Key {}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:.3}", self.0)
    }
}

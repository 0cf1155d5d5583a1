use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier for a desk group
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GroupId(pub u32);

impl fmt::Display for GroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Desks that move together and count as pairwise adjacent.
///
/// Membership lives on [`Desk::group`](super::Desk::group), so a desk can
/// never sit in two groups at once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    pub id: GroupId,
    pub name: String,
    pub color: String,
}

/// Colors handed out to new groups in rotation
pub const GROUP_PALETTE: [&str; 6] = [
    "#60a5fa", "#f472b6", "#34d399", "#fbbf24", "#a78bfa", "#f87171",
];

impl Group {
    pub fn new(id: GroupId, name: impl Into<String>) -> Self {
        let color = GROUP_PALETTE[(id.0 as usize) % GROUP_PALETTE.len()];
        Self {
            id,
            name: name.into(),
            color: color.to_string(),
        }
    }
}

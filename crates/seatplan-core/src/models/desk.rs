use serde::{Deserialize, Serialize};
use std::fmt;

use super::GroupId;

/// Unique identifier for a desk
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DeskId(pub u32);

impl fmt::Display for DeskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A seat position on the canvas, optionally holding a student
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Desk {
    /// Unique identifier
    pub id: DeskId,

    /// Left edge in canvas units
    pub x: f64,

    /// Top edge in canvas units
    pub y: f64,

    pub width: f64,

    pub height: f64,

    /// Name of the seated student
    #[serde(default)]
    pub student: Option<String>,

    /// Locked desks keep their student through auto-assign and clear.
    /// A locked desk always has a student.
    #[serde(default)]
    pub is_locked: bool,

    /// Owning group, if the desk has been pushed together with others
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<GroupId>,
}

impl Desk {
    pub fn new(id: DeskId, x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            id,
            x,
            y,
            width,
            height,
            student: None,
            is_locked: false,
            group: None,
        }
    }

    /// Center point of the desk
    pub fn center(&self) -> [f64; 2] {
        [self.x + self.width / 2.0, self.y + self.height / 2.0]
    }

    /// Euclidean distance between the centers of two desks
    pub fn center_distance(&self, other: &Desk) -> f64 {
        let [ax, ay] = self.center();
        let [bx, by] = other.center();
        ((ax - bx).powi(2) + (ay - by).powi(2)).sqrt()
    }

    pub fn is_occupied(&self) -> bool {
        self.student.is_some()
    }

    pub fn is_seated(&self, name: &str) -> bool {
        self.student.as_deref() == Some(name)
    }
}

/// Drawable area that desks are kept inside when moved
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CanvasBounds {
    pub width: f64,
    pub height: f64,
}

impl Default for CanvasBounds {
    fn default() -> Self {
        Self { width: 1200.0, height: 800.0 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_center() {
        let desk = Desk::new(DeskId(1), 10.0, 20.0, 60.0, 40.0);
        assert_eq!(desk.center(), [40.0, 40.0]);
    }

    #[test]
    fn test_center_distance() {
        let a = Desk::new(DeskId(1), 0.0, 0.0, 60.0, 40.0);
        let b = Desk::new(DeskId(2), 30.0, 40.0, 60.0, 40.0);
        assert!((a.center_distance(&b) - 50.0).abs() < 1e-9);
        assert!((b.center_distance(&a) - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_desk_deserializes_with_defaults() {
        let desk: Desk =
            serde_json::from_str(r#"{"id":3,"x":0,"y":0,"width":60,"height":40}"#).unwrap();
        assert_eq!(desk.id, DeskId(3));
        assert!(!desk.is_occupied());
        assert!(!desk.is_locked);
        assert!(desk.group.is_none());
    }

    #[test]
    fn test_seated_desk() {
        let mut desk = Desk::new(DeskId(1), 0.0, 0.0, 60.0, 40.0);
        desk.student = Some("Alice".to_string());
        assert!(desk.is_occupied());
        assert!(desk.is_seated("Alice"));
        assert!(!desk.is_seated("Bob"));
    }
}

//! Diagram structure identifiers.
//!
//! A structure is a family (mind map, org chart, tree, logic, fishbone,
//! timeline) plus an orientation. On the wire it is a single string such as
//! `"org-chart-up"`: the base selects the family, the optional suffix the
//! orientation. Unknown identifiers never fail. They fall back to the
//! default clockwise mind map.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Orientation carried by a structure suffix or a topic's direction hint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Direction {
    Clockwise,
    AntiClockwise,
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Clockwise => "clockwise",
            Direction::AntiClockwise => "anticlockwise",
            Direction::Left => "left",
            Direction::Right => "right",
            Direction::Up => "up",
            Direction::Down => "down",
        }
    }

    /// Parse a direction keyword (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "clockwise" => Some(Direction::Clockwise),
            "anticlockwise" | "anti-clockwise" | "counterclockwise" => {
                Some(Direction::AntiClockwise)
            }
            "left" => Some(Direction::Left),
            "right" => Some(Direction::Right),
            "up" => Some(Direction::Up),
            "down" => Some(Direction::Down),
            _ => None,
        }
    }
}

/// The diagram family named by the base of a structure identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StructureKind {
    MindMap,
    OrgChart,
    Tree,
    Logic,
    Fishbone,
    Timeline,
}

/// Geometric strategy family. Tree, logic and org-chart share one
/// positioner and differ only by axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Family {
    Radial,
    Branch,
    Fishbone,
    Timeline,
}

impl StructureKind {
    const ALL: [StructureKind; 6] = [
        StructureKind::OrgChart,
        StructureKind::MindMap,
        StructureKind::Fishbone,
        StructureKind::Timeline,
        StructureKind::Logic,
        StructureKind::Tree,
    ];

    pub fn base_name(self) -> &'static str {
        match self {
            StructureKind::MindMap => "mindmap",
            StructureKind::OrgChart => "org-chart",
            StructureKind::Tree => "tree",
            StructureKind::Logic => "logic",
            StructureKind::Fishbone => "fishbone",
            StructureKind::Timeline => "timeline",
        }
    }

    pub fn family(self) -> Family {
        match self {
            StructureKind::MindMap => Family::Radial,
            StructureKind::OrgChart | StructureKind::Tree | StructureKind::Logic => Family::Branch,
            StructureKind::Fishbone => Family::Fishbone,
            StructureKind::Timeline => Family::Timeline,
        }
    }

    /// Orientation used when the identifier carries no suffix.
    pub fn default_direction(self) -> Direction {
        match self {
            StructureKind::MindMap => Direction::Clockwise,
            StructureKind::OrgChart => Direction::Down,
            StructureKind::Tree | StructureKind::Logic | StructureKind::Timeline => {
                Direction::Right
            }
            StructureKind::Fishbone => Direction::Left,
        }
    }

    /// Whether `direction` is a meaningful orientation for this family.
    pub fn accepts(self, direction: Direction) -> bool {
        use Direction::*;
        match self {
            StructureKind::MindMap => matches!(direction, Clockwise | AntiClockwise | Down),
            StructureKind::OrgChart => matches!(direction, Down | Up),
            StructureKind::Tree | StructureKind::Logic | StructureKind::Fishbone => {
                matches!(direction, Left | Right)
            }
            StructureKind::Timeline => matches!(direction, Right | Down),
        }
    }
}

/// A resolved structure: family plus orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Structure {
    pub kind: StructureKind,
    pub direction: Direction,
    /// Set when the orientation was spelled out. Unsuffixed tree, logic,
    /// fishbone and timeline structures follow the side their topic sits
    /// on instead of `direction`.
    pub explicit: bool,
}

impl Default for Structure {
    fn default() -> Self {
        Self::new(StructureKind::MindMap)
    }
}

impl Structure {
    pub const fn with_direction(kind: StructureKind, direction: Direction) -> Self {
        Self {
            kind,
            direction,
            explicit: true,
        }
    }

    pub fn new(kind: StructureKind) -> Self {
        Self {
            kind,
            direction: kind.default_direction(),
            explicit: false,
        }
    }

    pub fn family(&self) -> Family {
        self.kind.family()
    }

    /// Strict parse: `None` when the base identifier is unknown.
    ///
    /// A known base with an unknown or inapplicable suffix keeps the base
    /// with its default orientation.
    pub fn try_parse(s: &str) -> Option<Self> {
        let s = s.trim().to_ascii_lowercase();
        for kind in StructureKind::ALL {
            let Some(rest) = s.strip_prefix(kind.base_name()) else {
                continue;
            };
            if rest.is_empty() {
                return Some(Self::new(kind));
            }
            let Some(suffix) = rest.strip_prefix('-') else {
                continue;
            };
            return match Direction::parse(suffix) {
                Some(direction) if kind.accepts(direction) => {
                    Some(Self::with_direction(kind, direction))
                }
                _ => {
                    log::warn!("structure `{s}`: unsupported orientation, using default");
                    Some(Self::new(kind))
                }
            };
        }
        None
    }

    /// Lenient parse: unknown identifiers fall back to the default mind map.
    pub fn parse(s: &str) -> Self {
        Self::try_parse(s).unwrap_or_else(|| {
            log::warn!("unknown structure `{s}`, falling back to mindmap");
            Self::default()
        })
    }

    /// Same family, different orientation (ignored when inapplicable).
    #[must_use]
    pub fn oriented(self, direction: Direction) -> Self {
        if self.kind.accepts(direction) {
            Self {
                direction,
                explicit: true,
                ..self
            }
        } else {
            self
        }
    }
}

impl fmt::Display for Structure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.explicit && self.direction == self.kind.default_direction() {
            f.write_str(self.kind.base_name())
        } else {
            write!(f, "{}-{}", self.kind.base_name(), self.direction.as_str())
        }
    }
}

impl Serialize for Structure {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Structure {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(Structure::parse(&s))
    }
}

use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Deserializer, Serialize};

/// Closed set of entry categories.
///
/// Decoding is lossy: any name outside the set becomes `Other`, so every
/// lookup table below only needs an arm per variant.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, JsonSchema,
)]
pub enum Category {
    People,
    Accomplishments,
    #[serde(rename = "Life Story")]
    LifeStory,
    #[serde(rename = "Ideas/Likes")]
    IdeasLikes,
    #[default]
    Other,
}

impl Category {
    /// Canonical drawing and legend order.
    pub const ALL: [Category; 5] = [
        Category::People,
        Category::Accomplishments,
        Category::LifeStory,
        Category::IdeasLikes,
        Category::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::People => "People",
            Self::Accomplishments => "Accomplishments",
            Self::LifeStory => "Life Story",
            Self::IdeasLikes => "Ideas/Likes",
            Self::Other => "Other",
        }
    }

    /// Exact wire name match.
    pub fn from_name(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_str() == s)
    }

    pub fn from_str_lossy(s: &str) -> Self {
        Self::from_name(s).unwrap_or(Self::Other)
    }

    /// Marker symbol name used by the renderer.
    pub fn symbol(&self) -> &'static str {
        match self {
            Self::People => "circle",
            Self::Accomplishments => "square",
            Self::LifeStory => "diamond",
            Self::IdeasLikes => "cross",
            Self::Other => "triangle-up",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Category {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        Ok(Self::from_str_lossy(&name))
    }
}

/// Half-open angular range `[start, end)` in degrees.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Sector {
    pub start: f64,
    pub end: f64,
}

impl Sector {
    pub const fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    pub fn span(&self) -> f64 {
        self.end - self.start
    }

    /// Center angle of cell `index` when the sector is split into `count`
    /// equal cells. `count == 0` is treated as a single cell.
    pub fn cell_center(&self, index: usize, count: usize) -> f64 {
        self.start + self.span() * (index as f64 + 0.5) / count.max(1) as f64
    }

    pub fn contains(&self, angle_deg: f64) -> bool {
        angle_deg >= self.start && angle_deg < self.end
    }
}

/// Category → angular sector assignment.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SectorTable {
    pub people: Sector,
    pub accomplishments: Sector,
    pub life_story: Sector,
    pub ideas_likes: Sector,
    pub other: Sector,
}

impl SectorTable {
    /// Quadrant layout where `Other` shares `[270, 360)` with `Ideas/Likes`.
    pub fn with_shared_last_quadrant() -> Self {
        Self {
            ideas_likes: Sector::new(270.0, 360.0),
            other: Sector::new(270.0, 360.0),
            ..Self::default()
        }
    }

    pub fn sector(&self, category: Category) -> Sector {
        match category {
            Category::People => self.people,
            Category::Accomplishments => self.accomplishments,
            Category::LifeStory => self.life_story,
            Category::IdeasLikes => self.ideas_likes,
            Category::Other => self.other,
        }
    }
}

impl Default for SectorTable {
    /// One quadrant per named category; the last quadrant is split so
    /// `Other` does not overlap `Ideas/Likes`.
    fn default() -> Self {
        Self {
            people: Sector::new(0.0, 90.0),
            accomplishments: Sector::new(90.0, 180.0),
            life_story: Sector::new(180.0, 270.0),
            ideas_likes: Sector::new(270.0, 330.0),
            other: Sector::new(330.0, 360.0),
        }
    }
}

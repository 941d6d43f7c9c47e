//! Zoned partition of the world
//!
//! A fixed list of typed rectangles. Every `AreaType` is guaranteed to have at
//! least one zone once a `ZoneMap` exists, so target selection never fails.

use rand::seq::IndexedRandom;
use rand::Rng;

use super::error::ConfigurationError;
use super::types::{AreaType, Position};

/// Axis-aligned rectangle in world units (x1 < x2, y1 < y2)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
}

impl Rect {
    pub fn new(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Inclusive containment test
    pub fn contains(&self, point: &Position) -> bool {
        point.x >= self.x1 && point.x <= self.x2 && point.y >= self.y1 && point.y <= self.y2
    }

    /// Distance from a point to the nearest point of the rectangle (0 inside)
    pub fn distance_to(&self, point: &Position) -> f32 {
        let nearest = Position::new(
            point.x.clamp(self.x1, self.x2),
            point.y.clamp(self.y1, self.y2),
        );
        nearest.distance(point)
    }

    pub fn center(&self) -> Position {
        Position::new((self.x1 + self.x2) / 2.0, (self.y1 + self.y2) / 2.0)
    }

    pub fn width(&self) -> f32 {
        self.x2 - self.x1
    }

    pub fn height(&self) -> f32 {
        self.y2 - self.y1
    }
}

/// A typed rectangular region
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Zone {
    pub kind: AreaType,
    pub rect: Rect,
}

impl Zone {
    pub fn new(kind: AreaType, rect: Rect) -> Self {
        Self { kind, rect }
    }
}

/// Immutable zone layout for a world of a given size
#[derive(Debug, Clone)]
pub struct ZoneMap {
    width: f32,
    height: f32,
    zones: Vec<Zone>,
}

impl ZoneMap {
    /// Build a zone map, rejecting layouts that leave an `AreaType` without a zone
    pub fn new(width: u32, height: u32, zones: Vec<Zone>) -> Result<Self, ConfigurationError> {
        if width == 0 || height == 0 {
            return Err(ConfigurationError::InvalidDimensions { width, height });
        }
        if zones.is_empty() {
            return Err(ConfigurationError::EmptyLayout);
        }

        let (w, h) = (width as f32, height as f32);
        for (index, zone) in zones.iter().enumerate() {
            let r = zone.rect;
            let in_world = r.x1 >= 0.0 && r.y1 >= 0.0 && r.x2 <= w && r.y2 <= h;
            if !(r.x1 < r.x2 && r.y1 < r.y2) || !in_world {
                return Err(ConfigurationError::InvalidZone {
                    index,
                    kind: zone.kind,
                    x1: r.x1,
                    y1: r.y1,
                    x2: r.x2,
                    y2: r.y2,
                });
            }
        }

        if let Some(missing) = AreaType::ALL
            .into_iter()
            .find(|kind| !zones.iter().any(|zone| zone.kind == *kind))
        {
            return Err(ConfigurationError::MissingAreaType(missing));
        }

        Ok(Self {
            width: w,
            height: h,
            zones,
        })
    }

    /// The five-zone city layout: three districts across the top half,
    /// recreation and countryside splitting the bottom half.
    pub fn default_layout(width: u32, height: u32) -> Result<Self, ConfigurationError> {
        let (w3, w2, h2) = (width / 3, width / 2, height / 2);
        let rect = |x1: u32, y1: u32, x2: u32, y2: u32| {
            Rect::new(x1 as f32, y1 as f32, x2 as f32, y2 as f32)
        };

        let zones = vec![
            Zone::new(AreaType::Residential, rect(0, 0, w3, h2)),
            Zone::new(AreaType::Commercial, rect(w3, 0, 2 * width / 3, h2)),
            Zone::new(AreaType::Industrial, rect(2 * width / 3, 0, width, h2)),
            Zone::new(AreaType::Recreational, rect(0, h2, w2, height)),
            Zone::new(AreaType::Rural, rect(w2, h2, width, height)),
        ];
        Self::new(width, height, zones)
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn zones(&self) -> &[Zone] {
        &self.zones
    }

    /// All zones of the given type, in layout order. Never empty.
    pub fn zones_of_type(&self, kind: AreaType) -> Vec<&Zone> {
        self.zones.iter().filter(|zone| zone.kind == kind).collect()
    }

    /// First zone (in layout order) containing the point
    pub fn zone_at(&self, point: &Position) -> Option<&Zone> {
        self.zones.iter().find(|zone| zone.rect.contains(point))
    }

    /// Uniformly chosen zone of the given type
    pub fn random_zone_of_type<R: Rng + ?Sized>(
        &self,
        kind: AreaType,
        rng: &mut R,
    ) -> Option<&Zone> {
        self.zones_of_type(kind).choose(rng).copied()
    }

    /// Uniform point inside the zone, bounds inclusive
    pub fn pick_random_point<R: Rng + ?Sized>(zone: &Zone, rng: &mut R) -> Position {
        let r = zone.rect;
        Position::new(rng.random_range(r.x1..=r.x2), rng.random_range(r.y1..=r.y2))
    }
}

#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Ray marching through the maze or the boss arena.
//!
//! A single marching primitive serves both the flashlight fan and the
//! shotgun hit-scan. What stops a ray is delegated to an [`Obstruction`]:
//! the maze grid stops rays on wall rectangles and at the grid border, the
//! arena stops them on its surrounding wall band.

use glam::Vec2;
use vision_curse_core::{tuning, ArenaBounds, MazeView, PlayMode, VisionPolygon};

/// How a sampled ray point interacts with the surroundings.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Contact {
    /// The point lies inside a wall; the ray end is pushed `depth` further so
    /// the visible edge sits flush with the wall face.
    Wall {
        /// Extra distance added to the ray end.
        depth: f32,
    },
    /// The point left the traversable area; the ray ends at `end`.
    Boundary {
        /// Final ray end point.
        end: Vec2,
    },
}

/// Termination strategy consulted at every marching step.
pub trait Obstruction {
    /// Classifies a sampled point, returning `None` while the ray may continue.
    fn contact(&self, point: Vec2) -> Option<Contact>;

    /// Pulls a ray end point back inside the traversable area.
    fn confine(&self, point: Vec2) -> Vec2;
}

impl Obstruction for MazeView<'_> {
    fn contact(&self, point: Vec2) -> Option<Contact> {
        let Some(cell) = self.cell_at(point) else {
            return Some(Contact::Boundary {
                end: self.clamp_to_world(point),
            });
        };
        self.wall_rects(cell)
            .any(|wall| wall.contains_point(point))
            .then(|| Contact::Wall {
                depth: self.wall_thickness(),
            })
    }

    fn confine(&self, point: Vec2) -> Vec2 {
        self.clamp_to_world(point)
    }
}

impl Obstruction for ArenaBounds {
    fn contact(&self, point: Vec2) -> Option<Contact> {
        self.is_beyond_wall(point).then(|| Contact::Boundary {
            end: self.clamp_point(point),
        })
    }

    fn confine(&self, point: Vec2) -> Vec2 {
        self.clamp_point(point)
    }
}

/// Obstruction active for the current play mode.
#[derive(Clone, Copy, Debug)]
pub enum Surroundings<'a> {
    /// Rays stop on maze walls and at the grid border.
    Maze(MazeView<'a>),
    /// Rays stop on the arena wall band.
    Arena(ArenaBounds),
}

impl<'a> Surroundings<'a> {
    /// Selects the surroundings matching the play mode.
    #[must_use]
    pub fn for_mode(mode: PlayMode, maze: MazeView<'a>, arena: ArenaBounds) -> Self {
        match mode {
            PlayMode::Maze => Self::Maze(maze),
            PlayMode::BossFight => Self::Arena(arena),
        }
    }
}

impl Obstruction for Surroundings<'_> {
    fn contact(&self, point: Vec2) -> Option<Contact> {
        match self {
            Self::Maze(view) => view.contact(point),
            Self::Arena(arena) => arena.contact(point),
        }
    }

    fn confine(&self, point: Vec2) -> Vec2 {
        match self {
            Self::Maze(view) => view.confine(point),
            Self::Arena(arena) => arena.confine(point),
        }
    }
}

/// Where a single ray stopped.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RayHit {
    /// Final ray end point.
    pub end: Vec2,
    /// Distance from the origin to `end`, never above the ray's range.
    pub distance: f32,
    /// Whether the ray stopped before reaching its full range.
    pub obstructed: bool,
}

/// Marches a ray from `origin` along `angle` in unit steps.
///
/// The march never samples beyond `max_range`. Negative or non-finite ranges
/// are treated as zero.
#[must_use]
pub fn march<O>(obstruction: &O, origin: Vec2, angle: f32, max_range: f32) -> RayHit
where
    O: Obstruction + ?Sized,
{
    let max_range = if max_range.is_finite() {
        max_range.max(0.0)
    } else {
        0.0
    };
    let direction = Vec2::from_angle(angle);
    let finish = |end: Vec2, obstructed: bool| RayHit {
        end,
        distance: origin.distance(end).min(max_range),
        obstructed,
    };

    let mut travelled = 0.0_f32;
    while travelled < max_range {
        travelled = (travelled + 1.0).min(max_range);
        let point = origin + direction * travelled;
        match obstruction.contact(point) {
            None => {}
            Some(Contact::Boundary { end }) => return finish(end, true),
            Some(Contact::Wall { depth }) => {
                let reach = (travelled + depth).min(max_range);
                return finish(obstruction.confine(origin + direction * reach), true);
            }
        }
    }

    finish(obstruction.confine(origin + direction * max_range), false)
}

/// Aperture, density and reach of a ray fan.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FieldOfView {
    /// Total aperture in degrees.
    pub degrees: f32,
    /// Number of angular intervals; the fan casts one more ray than this.
    pub rays: u32,
    /// Maximum ray length.
    pub range: f32,
}

impl FieldOfView {
    /// Player flashlight cone with the provided reach.
    #[must_use]
    pub const fn flashlight(range: f32) -> Self {
        Self {
            degrees: tuning::FOV_DEGREES,
            rays: tuning::RAY_COUNT,
            range,
        }
    }
}

/// Casts a fan of rays centred on `facing` and collects the vision polygon.
///
/// The polygon always holds `rays + 2` points: the origin followed by every
/// ray end in increasing angle order.
#[must_use]
pub fn cast_fan<O>(obstruction: &O, origin: Vec2, facing: f32, fov: FieldOfView) -> VisionPolygon
where
    O: Obstruction + ?Sized,
{
    let aperture = fov.degrees.to_radians();
    let start = facing - aperture / 2.0;
    let step = if fov.rays == 0 {
        0.0
    } else {
        aperture / fov.rays as f32
    };

    let capacity = usize::try_from(fov.rays).unwrap_or(0).saturating_add(2);
    let mut points = Vec::with_capacity(capacity);
    points.push(origin);
    for index in 0..=fov.rays {
        let angle = start + step * index as f32;
        points.push(march(obstruction, origin, angle, fov.range).end);
    }

    tracing::trace!(rays = fov.rays, range = fov.range, "vision fan cast");
    VisionPolygon::from_points(points)
}

/// Reports whether a point is lit by the flashlight cone or the ambient aura.
#[must_use]
pub fn is_lit(polygon: &VisionPolygon, aura_center: Vec2, point: Vec2) -> bool {
    aura_center.distance(point) <= tuning::AURA_RADIUS || polygon.contains(point)
}

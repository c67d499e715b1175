#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared rendering contracts for Vision Curse adapters.

use std::time::Duration;

use anyhow::Result as AnyResult;
use glam::Vec2;
use vision_curse_core::{
    tuning, ArenaBounds, MazeView, MoveIntent, Outcome, PlayMode, Rect, Segment, Upgrade,
    UpgradeLevels, VisionPolygon,
};

/// RGBA color used when presenting frames.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    /// Red channel intensity in the range 0.0..=1.0.
    pub red: f32,
    /// Green channel intensity in the range 0.0..=1.0.
    pub green: f32,
    /// Blue channel intensity in the range 0.0..=1.0.
    pub blue: f32,
    /// Alpha channel intensity in the range 0.0..=1.0.
    pub alpha: f32,
}

impl Color {
    /// Creates a new color from floating point channels.
    #[must_use]
    pub const fn new(red: f32, green: f32, blue: f32, alpha: f32) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    /// Creates an opaque color from byte RGB values.
    #[must_use]
    pub const fn from_rgb_u8(red: u8, green: u8, blue: u8) -> Self {
        Self {
            red: red as f32 / 255.0,
            green: green as f32 / 255.0,
            blue: blue as f32 / 255.0,
            alpha: 1.0,
        }
    }
}

/// Input snapshot gathered by adapters before updating the scene.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct FrameInput {
    /// Requested movement for this frame.
    pub movement: MoveIntent,
    /// Requested facing angle in radians, if the aim changed.
    pub aim: Option<f32>,
    /// Whether the fire button was pressed.
    pub fire: bool,
    /// Upgrade selected in the skill menu on this frame.
    pub purchase: Option<Upgrade>,
}

impl FrameInput {
    /// Reports whether the input carries no request at all.
    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.movement.is_idle() && self.aim.is_none() && !self.fire && self.purchase.is_none()
    }
}

/// Errors that can occur when constructing rendering descriptors.
#[derive(Debug, PartialEq, thiserror::Error)]
pub enum RenderingError {
    /// The viewport must cover a positive area.
    #[error("viewport must have a positive size (received {width}x{height})")]
    EmptyViewport {
        /// Requested viewport width.
        width: f32,
        /// Requested viewport height.
        height: f32,
    },
}

/// Window onto the world that follows the player.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Camera {
    origin: Vec2,
    viewport: Vec2,
}

impl Camera {
    /// Creates a camera showing `viewport` world units from the world origin.
    pub fn new(viewport: Vec2) -> Result<Self, RenderingError> {
        if !(viewport.x > 0.0 && viewport.y > 0.0) {
            return Err(RenderingError::EmptyViewport {
                width: viewport.x,
                height: viewport.y,
            });
        }
        Ok(Self {
            origin: Vec2::ZERO,
            viewport,
        })
    }

    /// Centres the camera on `center`, clamped so it never shows past the
    /// world edges. Worlds smaller than the viewport pin the camera at zero.
    pub fn follow(&mut self, center: Vec2, world_size: Vec2) {
        let max = (world_size - self.viewport).max(Vec2::ZERO);
        self.origin = (center - self.viewport * 0.5).clamp(Vec2::ZERO, max);
    }

    /// Upper-left corner of the visible area in world units.
    #[must_use]
    pub const fn origin(&self) -> Vec2 {
        self.origin
    }

    /// Size of the visible area in world units.
    #[must_use]
    pub const fn viewport(&self) -> Vec2 {
        self.viewport
    }

    /// Visible area in world units.
    #[must_use]
    pub fn bounds(&self) -> Rect {
        Rect::from_origin_and_size(self.origin, self.viewport)
    }

    /// Converts a world point into viewport coordinates.
    #[must_use]
    pub fn to_screen(&self, point: Vec2) -> Vec2 {
        point - self.origin
    }
}

/// Circle of ambient light around the player.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aura {
    /// Circle centre in world units.
    pub center: Vec2,
    /// Circle radius in world units.
    pub radius: f32,
}

impl Aura {
    /// Aura of the default radius around `center`.
    #[must_use]
    pub const fn around(center: Vec2) -> Self {
        Self {
            center,
            radius: tuning::AURA_RADIUS,
        }
    }
}

/// Enemy descriptor; unlit enemies are hidden by the fog.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EnemyPresentation {
    /// Body rectangle in world units.
    pub body: Rect,
    /// Whether the flashlight or the aura reveals the enemy.
    pub lit: bool,
}

/// Boss descriptor with its health bar.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BossPresentation {
    /// Body rectangle in world units.
    pub body: Rect,
    /// Remaining health in the range 0.0..=1.0.
    pub health_fraction: f32,
}

/// Values shown in the heads-up display.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Hud {
    /// Current player health.
    pub health: u32,
    /// Maximum player health.
    pub max_health: u32,
    /// Unspent skill points.
    pub skill_points: u32,
    /// Purchased upgrade levels.
    pub levels: UpgradeLevels,
    /// Simulation ticks elapsed in the level.
    pub tick: u64,
}

/// Scene description combining walls, lighting and inhabitants.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    /// Active play mode for the simulation.
    pub play_mode: PlayMode,
    /// Extent of the maze or arena in world units.
    pub world_size: Vec2,
    /// Camera following the player.
    pub camera: Camera,
    /// Wall rectangles overlapping the camera.
    pub walls: Vec<Rect>,
    /// Flashlight cone.
    pub vision: VisionPolygon,
    /// Ambient light around the player.
    pub aura: Aura,
    /// Pellet paths of the latest blast.
    pub pellets: Vec<Segment>,
    /// Player body rectangle.
    pub player: Rect,
    /// Enemies inside the maze.
    pub enemies: Vec<EnemyPresentation>,
    /// Boss, once the arena is entered.
    pub boss: Option<BossPresentation>,
    /// Heads-up display values.
    pub hud: Hud,
    /// Final result of the run, once decided.
    pub outcome: Option<Outcome>,
}

impl Scene {
    /// Creates an empty maze scene seen through `camera`.
    #[must_use]
    pub fn new(camera: Camera, world_size: Vec2) -> Self {
        Self {
            play_mode: PlayMode::Maze,
            world_size,
            camera,
            walls: Vec::new(),
            vision: VisionPolygon::default(),
            aura: Aura::around(Vec2::ZERO),
            pellets: Vec::new(),
            player: Rect::default(),
            enemies: Vec::new(),
            boss: None,
            hud: Hud::default(),
            outcome: None,
        }
    }
}

/// Collects the wall rectangles of every cell overlapping `bounds`.
#[must_use]
pub fn visible_maze_walls(view: &MazeView<'_>, bounds: Rect) -> Vec<Rect> {
    let (columns, rows) = view.dimensions();
    let cell_size = view.cell_size();
    if columns == 0 || rows == 0 || cell_size <= 0.0 {
        return Vec::new();
    }

    let first = |start: f32| (start / cell_size).floor().max(0.0) as u32;
    let last = |end: f32, count: u32| ((end / cell_size).ceil().max(0.0) as u32).min(count);
    let (first_column, last_column) = (first(bounds.x()), last(bounds.right(), columns));
    let (first_row, last_row) = (first(bounds.y()), last(bounds.bottom(), rows));

    let mut walls = Vec::new();
    for row in first_row..last_row {
        for column in first_column..last_column {
            walls.extend(view.wall_rects(vision_curse_core::CellCoord::new(column, row)));
        }
    }
    walls
}

/// The four wall bands surrounding the arena.
#[must_use]
pub fn arena_walls(arena: &ArenaBounds) -> [Rect; 4] {
    let (width, height, thickness) = (arena.width(), arena.height(), arena.wall_thickness());
    [
        Rect::new(0.0, 0.0, width, thickness),
        Rect::new(width - thickness, 0.0, thickness, height),
        Rect::new(0.0, height - thickness, width, thickness),
        Rect::new(0.0, 0.0, thickness, height),
    ]
}

/// Presentation descriptor consumed by rendering backends.
#[derive(Clone, Debug, PartialEq)]
pub struct Presentation {
    /// Title shown by the backend.
    pub window_title: String,
    /// Solid color used to clear each frame.
    pub clear_color: Color,
    /// Scene content that should be displayed.
    pub scene: Scene,
}

impl Presentation {
    /// Constructs a new presentation descriptor.
    #[must_use]
    pub fn new<T>(window_title: T, clear_color: Color, scene: Scene) -> Self
    where
        T: Into<String>,
    {
        Self {
            window_title: window_title.into(),
            clear_color,
            scene,
        }
    }
}

/// Rendering backend capable of presenting Vision Curse scenes.
pub trait RenderingBackend {
    /// Runs the rendering backend until it is requested to exit.
    ///
    /// The provided `update_scene` closure receives the simulated frame delta,
    /// per-frame input captured by the adapter, and may mutate the scene before
    /// it is rendered. Backends stop once the scene reports an outcome.
    fn run<F>(self, presentation: Presentation, update_scene: F) -> AnyResult<()>
    where
        F: FnMut(Duration, FrameInput, &mut Scene) + 'static;
}

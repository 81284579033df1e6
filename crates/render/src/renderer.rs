use arena_kernel::Arena;
use glam::Vec3;

/// Camera/view configuration for rendering.
///
/// Starts above and behind the origin; once the arena steps, it trails
/// the actor at a fixed height and distance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderView {
    /// Camera position in world space.
    pub eye: Vec3,
    /// Point the camera is looking at.
    pub target: Vec3,
    /// Vertical field of view in degrees.
    pub fov_degrees: f32,
    /// Eye height while following.
    pub follow_height: f32,
    /// Eye distance behind the target (+Z) while following.
    pub follow_distance: f32,
}

impl Default for RenderView {
    fn default() -> Self {
        Self {
            eye: Vec3::new(0.0, 8.0, 10.0),
            target: Vec3::ZERO,
            fov_degrees: 75.0,
            follow_height: 8.0,
            follow_distance: 5.0,
        }
    }
}

impl RenderView {
    /// Trail `target`: eye over it at the follow height, pulled back along +Z.
    pub fn follow(&mut self, target: Vec3) {
        self.eye = Vec3::new(
            target.x,
            self.follow_height,
            target.z + self.follow_distance,
        );
        self.target = target;
    }
}

/// Renderer-agnostic interface. All renderers implement this trait.
///
/// The renderer reads arena state and a view, then produces output. It
/// never mutates the arena.
pub trait Renderer {
    /// The output type produced by this renderer.
    type Output;

    /// Render one frame from the given arena state and view.
    fn render(&self, arena: &Arena, view: &RenderView) -> Self::Output;
}

/// Human-readable dump of the arena, for headless runs and logging.
#[derive(Debug, Default)]
pub struct DebugTextRenderer;

impl DebugTextRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl Renderer for DebugTextRenderer {
    type Output = String;

    fn render(&self, arena: &Arena, view: &RenderView) -> String {
        let actor = arena.actor();
        let p = actor.position();
        let v = actor.velocity();
        let cd = arena.cooldown();
        let mut out = String::new();
        out.push_str(&format!("=== Arena (tick={}) ===\n", arena.tick()));
        out.push_str(&format!(
            "Camera: eye=({:.1}, {:.1}, {:.1}) target=({:.1}, {:.1}, {:.1}) fov={:.0}\n",
            view.eye.x,
            view.eye.y,
            view.eye.z,
            view.target.x,
            view.target.y,
            view.target.z,
            view.fov_degrees
        ));
        out.push_str(&format!(
            "Actor: pos=({:.2}, {:.2}, {:.2}) vel=({:.2}, {:.2}, {:.2})\n",
            p.x, p.y, p.z, v.x, v.y, v.z
        ));
        out.push_str(&format!("Cooldown: x={:.3} z={:.3}\n", cd.x, cd.z));
        for (i, wall) in arena.walls().iter().enumerate() {
            let b = wall.bounds();
            out.push_str(&format!(
                "  wall[{i}] min=({:.2}, {:.2}, {:.2}) max=({:.2}, {:.2}, {:.2})\n",
                b.min.x, b.min.y, b.min.z, b.max.x, b.max.y, b.max.z
            ));
        }
        out
    }
}

use arena_common::Axis;
use arena_kernel::{Arena, ArenaEvent, StepOutcome};

/// Arena inspector for developer tooling.
///
/// Read-only queries for the HUD, the CLI and logs.
pub struct ArenaInspector;

impl ArenaInspector {
    /// Produce a summary of the arena state.
    pub fn summary(arena: &Arena) -> ArenaSummary {
        let actor = arena.actor();
        let cd = arena.cooldown();
        let p = actor.position();
        let v = actor.velocity();
        ArenaSummary {
            tick: arena.tick(),
            position: [p.x, p.y, p.z],
            velocity: [v.x, v.y, v.z],
            cooldown: [cd.x, cd.z],
            last_outcome: arena.last_outcome().map(OutcomeKind::of),
            pending_events: arena.events().len(),
        }
    }

    /// Count bounces per axis in a slice of events.
    pub fn bounce_counts(events: &[ArenaEvent]) -> (usize, usize) {
        let mut x = 0;
        let mut z = 0;
        for event in events {
            if let ArenaEvent::Blocked { bounces, .. } = event {
                for b in bounces {
                    match b.axis {
                        Axis::X => x += 1,
                        Axis::Z => z += 1,
                    }
                }
            }
        }
        (x, z)
    }
}

/// Coarse classification of the last step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutcomeKind {
    Moved,
    Blocked { wall: usize },
}

impl OutcomeKind {
    pub fn of(outcome: &StepOutcome) -> Self {
        match outcome {
            StepOutcome::Moved { .. } => Self::Moved,
            StepOutcome::Blocked { wall, .. } => Self::Blocked { wall: *wall },
        }
    }
}

/// Summary of arena state for the inspector.
#[derive(Debug, Clone)]
pub struct ArenaSummary {
    pub tick: u64,
    pub position: [f32; 3],
    pub velocity: [f32; 3],
    /// Remaining cooldown on x and z.
    pub cooldown: [f64; 2],
    pub last_outcome: Option<OutcomeKind>,
    pub pending_events: usize,
}

impl std::fmt::Display for ArenaSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let outcome = match self.last_outcome {
            None => "idle".to_string(),
            Some(OutcomeKind::Moved) => "moved".to_string(),
            Some(OutcomeKind::Blocked { wall }) => format!("blocked by wall {wall}"),
        };
        write!(
            f,
            "Arena: tick={} pos=({:.2}, {:.2}, {:.2}) vel=({:.2}, {:.2}, {:.2}) cooldown=({:.2}, {:.2}) {}",
            self.tick,
            self.position[0],
            self.position[1],
            self.position[2],
            self.velocity[0],
            self.velocity[1],
            self.velocity[2],
            self.cooldown[0],
            self.cooldown[1],
            outcome,
        )
    }
}

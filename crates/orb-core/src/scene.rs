use crate::config::{MotionParams, OrbConfig};
use crate::motion::{MotionFrame, MotionModel};
use crate::particle::BurstParticle;
use crate::ring::Ring;
use crate::rng::RandomSource;
use crate::spawner::Spawner;
use crate::state::ConversationState;
use crate::surface::{Point, Surface};

/// Composition root for all per-tick animation state.
///
/// Owns the fixed ring set, the live bursts, the motion model and the
/// spawner. Nothing outside the frame loop touches it while it runs.
#[derive(Clone, Debug)]
pub struct OrbScene {
    rings: Vec<Ring>,
    particles: Vec<BurstParticle>,
    motion: MotionModel,
    spawner: Spawner,
    resolution_scale: f64,
    ticks: u64,
}

impl OrbScene {
    pub fn new(config: &OrbConfig) -> Self {
        let scale = config.resolution_scale();
        let rings = config
            .rings
            .iter()
            .map(|spec| Ring::from_spec(spec, scale))
            .collect();
        Self::with_rings(config.motion.clone(), scale, rings)
    }

    /// Scene with an explicit ring set, already in pixel units.
    pub fn with_rings(params: MotionParams, resolution_scale: f64, rings: Vec<Ring>) -> Self {
        Self {
            rings,
            particles: Vec::new(),
            motion: MotionModel::new(params),
            spawner: Spawner::new(resolution_scale),
            resolution_scale,
            ticks: 0,
        }
    }

    pub fn rings(&self) -> &[Ring] {
        &self.rings
    }

    pub fn particles(&self) -> &[BurstParticle] {
        &self.particles
    }

    pub fn push_particle(&mut self, particle: BurstParticle) {
        self.particles.push(particle);
    }

    pub fn motion(&self) -> &MotionModel {
        &self.motion
    }

    pub fn params(&self) -> &MotionParams {
        self.motion.params()
    }

    pub fn resolution_scale(&self) -> f64 {
        self.resolution_scale
    }

    /// Ticks stepped so far.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Advance everything by one tick.
    ///
    /// Order matters: smooth and pulse, maybe spawn, prune bursts that died
    /// last tick, update the survivors, then spin the rings. A burst that
    /// dies during this update is still drawn once more.
    pub fn step(&mut self, state: ConversationState, rng: &mut dyn RandomSource) -> MotionFrame {
        let frame = self.motion.advance(state);
        let params = self.motion.params();

        if let Some(burst) = self.spawner.maybe_spawn(&frame, params, rng) {
            self.particles.push(burst);
        }

        self.particles.retain(BurstParticle::is_alive);
        for particle in &mut self.particles {
            particle.update(params);
        }

        for ring in &mut self.rings {
            ring.update(frame.activity, params.ring_speed_gain);
        }

        self.ticks += 1;
        frame
    }

    /// Background layer: bursts in insertion order.
    pub fn draw_particles(&self, surface: &mut dyn Surface, center: Point) {
        for particle in &self.particles {
            particle.draw(surface, center);
        }
    }

    /// Foreground layer: rings innermost first, each with its ripple scale.
    pub fn draw_rings(&self, surface: &mut dyn Surface, center: Point, frame: &MotionFrame) {
        let ripple = self.params().ring_ripple;
        for (i, ring) in self.rings.iter().enumerate() {
            ring.draw(surface, center, frame.ring_scale(i, ripple));
        }
    }
}

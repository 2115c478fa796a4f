//! Voice orb motion engine.
//!
//! Models an abstract "voice orb": a fixed set of rotating rings, a pulsing
//! overlay, and short-lived radial bursts. A discrete conversational state
//! selects a target activity level; the engine smooths toward it and derives
//! every rotation speed, scale factor and spawn decision from the result.
//!
//! No I/O here. Drawing goes through the [`Surface`] trait so
//! any raster backend can sit underneath.

pub mod color;
pub mod config;
pub mod constants;
pub mod error;
pub mod motion;
pub mod particle;
pub mod ring;
pub mod rng;
pub mod scene;
pub mod spawner;
pub mod state;
pub mod surface;

pub use color::Rgba;
pub use config::{MotionParams, OrbConfig, OverlaySpec, RingSpec};
pub use constants::{BASELINE_HEIGHT, BURST_CYAN, BURST_PURPLE};
pub use error::{ConfigError, Result};
pub use motion::{MotionFrame, MotionModel};
pub use particle::BurstParticle;
pub use ring::Ring;
pub use rng::RandomSource;
pub use scene::OrbScene;
pub use spawner::Spawner;
pub use state::{ConversationState, ParseStateError, StateCell};
pub use surface::{Point, Surface};

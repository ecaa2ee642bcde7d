//! Simulation module
//!
//! All gameplay logic lives here, free of platform and rendering backends:
//! - Motion scales with the frame multiplier, timers use absolute ms
//! - Seeded RNG only, owned by `SimContext`
//! - Actor lists keep insertion order

pub mod actor;
pub mod clock;
pub mod collectable;
pub mod collision;
pub mod context;
pub mod effects;
pub mod enemy;
pub mod player;
pub mod scene;
pub mod state;
pub mod update;
pub mod waves;
pub mod weapon;
pub mod world;

pub use actor::{Actor, Body, Lifespan};
pub use clock::{FrameClock, FrameTime};
pub use collectable::{Collectable, CollectableKind};
pub use context::SimContext;
pub use effects::Effect;
pub use enemy::{Enemy, EnemyKind, EnemyState, Force};
pub use player::Player;
pub use scene::{AttractorPage, AttractorScene, GameOverScene, GameScene, Interval};
pub use state::{ArenaState, Scoreboard};
pub use update::{Boundary, update_actors};
pub use waves::{WaveDef, WaveDirector, default_waves};
pub use weapon::{Bullet, BulletOwner, Recharge, WeaponSlot};
pub use world::World;

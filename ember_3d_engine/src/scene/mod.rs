//! Scene module
//!
//! Provides transforms, entities, the entity collection and the per-frame
//! renderer that records and presents a scene.

mod transform;
mod entity;
mod scene;
mod scene_renderer;

pub use transform::Transform;
pub use entity::Entity;
pub use scene::{DrawStats, EntityKey, Scene};
pub use scene_renderer::{FrameStats, SceneRenderer};

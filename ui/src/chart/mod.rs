//! Chart rendering and pointer interaction.

#[cfg(target_arch = "wasm32")]
pub mod canvas;
pub mod geometry;
pub mod hit;
pub mod render;
pub mod session;
pub mod surface;

pub use geometry::{ChartGeometry, Point, Size};
pub use hit::{locate, place_tooltip, Hit, HitSettings};
pub use render::{render, RenderOptions};
pub use session::{ChartSession, Tooltip};
pub use surface::{RecordingSurface, Surface};

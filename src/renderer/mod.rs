//! Coin rendering module
//!
//! The painter draws through the `Surface` trait so it can target an HTML
//! canvas in the browser or a recorder in tests and the headless binary.

#[cfg(target_arch = "wasm32")]
pub mod canvas;
pub mod coin;
pub mod material;
pub mod record;
pub mod surface;
pub mod symbol;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasSurface;
pub use coin::render;
pub use material::{Palette, palette};
pub use record::RecordingSurface;
pub use surface::{BlendMode, Paint, Path, Rgba, Surface};

/// Drawing-surface acquisition failures
#[derive(Debug, thiserror::Error)]
pub enum SurfaceError {
    #[error("element #{0} not found")]
    MissingElement(String),
    #[error("element #{0} is not a canvas")]
    NotACanvas(String),
    #[error("2D canvas context unavailable")]
    ContextUnavailable,
    #[error("canvas call failed: {0}")]
    Js(String),
}

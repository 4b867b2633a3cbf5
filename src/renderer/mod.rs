//! Board renderer and SVG backend
//!
//! [`Renderer`] composes a position and its annotations into a [`Scene`] of
//! tagged draw operations; [`render_svg`] serializes a scene as SVG.

pub mod config;
pub mod scene;
pub mod svg;

pub use config::SvgConfig;
pub use scene::{DrawOp, Renderer, RendererOptions, Scene, Shade};
pub use svg::render_svg;

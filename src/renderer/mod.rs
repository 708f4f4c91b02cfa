//! 2D canvas rendering module
//!
//! Scene code is written against the [`Surface`] trait so it can be tested
//! without a browser.

pub mod scene;
pub mod surface;

pub use scene::{draw_body, draw_legend_body, draw_legend_sun, render};
pub use surface::{ColorStop, Paint, Surface};

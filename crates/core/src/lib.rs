//! Frame-paced video recording for physics simulations.
//!
//! The [`recording::video_writer::VideoWriter`] turns a stream of
//! simulation timestamps into a fixed-cadence sequence of PNG frames and
//! hands them to an external encoder once the requested duration is
//! covered. The remaining modules are thin seams around the simulation,
//! the renderer and the body-model assets.

pub mod assets;
pub mod recording;
pub mod rendering;
pub mod shared;
pub mod simulation;
pub mod video;

//! GPUI integration for ecg-view.
//!
//! This module provides a GPUI view that renders an
//! [`EcgPlot`](crate::plot::EcgPlot) and a handle for feeding it samples
//! from async tasks.

mod paint;
mod text;
mod view;

pub use view::{EcgHandle, GpuiEcgView};

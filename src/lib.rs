//! ecg-view renders scrolling or static waveforms against an auto-scaled
//! ECG paper grid.
//!
//! The core is backend-agnostic: [`Graph`] and [`DataSeries`] emit a
//! [`RenderList`] that any canvas can paint. The `gpui` feature adds a GPUI
//! view on top.

#![forbid(unsafe_code)]

pub mod axis;
pub mod datasource;
pub mod geom;
pub mod graph;
pub mod host;
pub mod plot;
pub mod render;
pub mod series;
pub mod style;
#[cfg(test)]
mod testing;
mod transform;
pub mod view;

#[cfg(feature = "gpui")]
pub mod gpui_backend;

pub use axis::{
    LabelFormat, LineGravity, MonospaceMeasurer, TextMeasurer, XLabelPosition, YLabelPosition,
};
pub use datasource::{GraphMode, InvalidCode, SeriesError};
pub use geom::{Point, ScreenPoint, ScreenRect};
pub use graph::{DrawOutcome, Graph, GridGeometry};
pub use host::{HostView, SharedHost};
pub use plot::{EcgPlot, EcgPlotBuilder, MeasureMode, Padding};
pub use render::{
    Color, HorizontalAlign, LineSegment, LineStyle, RectStyle, RenderCommand, RenderList,
    TextAnchor, TextStyle, VerticalAlign,
};
pub use series::DataSeries;
pub use style::{GraphStyle, SeriesStyle, TitleAlignment, TitleStyle};
pub use view::{AxisBounds, AxisEnds, DataSource, Range};

#[cfg(feature = "gpui")]
pub use gpui_backend::{EcgHandle, GpuiEcgView};

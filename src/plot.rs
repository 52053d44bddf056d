//! Plot widget entry points and builders.
//!
//! [`EcgPlot`] ties one [`Graph`] and one [`DataSeries`] together with an
//! optional title, and translates host size and layout notifications into
//! the grid engine's terms.

use crate::axis::TextMeasurer;
use crate::geom::{ScreenPoint, ScreenRect};
use crate::graph::{DrawOutcome, Graph};
use crate::host::SharedHost;
use crate::render::{
    HorizontalAlign, RenderCommand, RenderList, TextAnchor, TextStyle, VerticalAlign,
};
use crate::series::DataSeries;
use crate::style::{TitleAlignment, TitleStyle};

/// How the plot answers a size query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MeasureMode {
    /// Ask for the size of the current grid, within what the host offers.
    #[default]
    KeepGridSize,
    /// Take whatever the host offers; the grid adapts.
    KeepParentSize,
}

/// Padding around the plot content, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Padding {
    /// Left padding.
    pub left: u32,
    /// Top padding.
    pub top: u32,
    /// Right padding.
    pub right: u32,
    /// Bottom padding.
    pub bottom: u32,
}

impl Padding {
    /// Same padding on every side.
    pub fn uniform(padding: u32) -> Self {
        Self {
            left: padding,
            top: padding,
            right: padding,
            bottom: padding,
        }
    }

    fn horizontal(&self) -> u32 {
        self.left + self.right
    }

    fn vertical(&self) -> u32 {
        self.top + self.bottom
    }
}

/// ECG plot widget: title, grid and trace.
#[derive(Debug, Clone)]
pub struct EcgPlot {
    graph: Graph,
    series: DataSeries,
    title: Option<String>,
    title_style: TitleStyle,
    padding: Padding,
    measure_mode: MeasureMode,
}

impl EcgPlot {
    /// Create a plot with a default graph and a streaming series.
    pub fn new() -> Self {
        Self {
            graph: Graph::new(),
            series: DataSeries::new(),
            title: None,
            title_style: TitleStyle::default(),
            padding: Padding::default(),
            measure_mode: MeasureMode::default(),
        }
    }

    /// Start building a plot with custom configuration.
    pub fn builder() -> EcgPlotBuilder {
        EcgPlotBuilder::default()
    }

    /// Route redraw and layout requests of both components to `host`.
    pub fn attach_host(&mut self, host: SharedHost) {
        self.graph.attach_host(host.clone());
        self.series.attach_host(host);
    }

    /// Access the grid engine.
    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    /// Access the grid engine mutably.
    pub fn graph_mut(&mut self) -> &mut Graph {
        &mut self.graph
    }

    /// Access the series.
    pub fn series(&self) -> &DataSeries {
        &self.series
    }

    /// Access the series mutably.
    pub fn series_mut(&mut self) -> &mut DataSeries {
        &mut self.series
    }

    /// Access the title text.
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Replace the title text.
    pub fn set_title(&mut self, title: Option<String>) {
        self.title = title;
        self.graph.request_layout();
    }

    /// Access the title style.
    pub fn title_style(&self) -> &TitleStyle {
        &self.title_style
    }

    /// Replace the title style.
    pub fn set_title_style(&mut self, style: TitleStyle) {
        self.title_style = style;
        self.graph.request_layout();
    }

    /// Access the padding.
    pub fn padding(&self) -> Padding {
        self.padding
    }

    /// Replace the padding.
    pub fn set_padding(&mut self, padding: Padding) {
        self.padding = padding;
        self.graph.request_layout();
    }

    /// Access the measure mode.
    pub fn measure_mode(&self) -> MeasureMode {
        self.measure_mode
    }

    /// Replace the measure mode.
    pub fn set_measure_mode(&mut self, mode: MeasureMode) {
        self.measure_mode = mode;
        self.graph.request_layout();
    }

    /// A title is shown only when enabled and non-empty.
    pub fn is_title_visible(&self) -> bool {
        self.title_style.visible
            && self
                .title
                .as_deref()
                .is_some_and(|title| !title.is_empty())
    }

    fn title_band(&self, measurer: &dyn TextMeasurer) -> u32 {
        if !self.is_title_visible() {
            return 0;
        }
        let title = self.title.as_deref().unwrap_or_default();
        let (_, height) = measurer.measure(title, self.title_style.size);
        height.ceil() as u32 + self.title_style.padding
    }

    /// Size to request from the host, given the `available` size it offers.
    pub fn measure(&self, available: (u32, u32), measurer: &dyn TextMeasurer) -> (u32, u32) {
        if self.measure_mode == MeasureMode::KeepParentSize {
            return available;
        }
        let width = fit_dimension(
            self.graph.measured_width(),
            self.padding.horizontal(),
            available.0,
        );
        let height = fit_dimension(
            self.graph.measured_height(),
            self.padding.vertical() + self.title_band(measurer),
            available.1,
        );
        (width, height)
    }

    /// The host resized the view.
    pub fn on_size_changed(&mut self, width: u32, height: u32, measurer: &dyn TextMeasurer) {
        let width = width.saturating_sub(self.padding.horizontal());
        let height = height
            .saturating_sub(self.padding.vertical())
            .saturating_sub(self.title_band(measurer));
        self.graph.resize_graph(width, height, measurer);
    }

    /// The host laid the view out at `view`.
    pub fn on_layout(&mut self, changed: bool, view: ScreenRect, measurer: &dyn TextMeasurer) {
        let content = self.content_rect(view, measurer);
        self.graph.layout(changed, content, measurer);
    }

    fn content_rect(&self, view: ScreenRect, measurer: &dyn TextMeasurer) -> ScreenRect {
        view.inset(
            self.padding.left as f32,
            (self.padding.top + self.title_band(measurer)) as f32,
            self.padding.right as f32,
            self.padding.bottom as f32,
        )
    }

    /// Draw grid, title and trace into `out`.
    ///
    /// The trace is only drawn once the grid has resolved its ranges.
    pub fn draw(
        &mut self,
        view: ScreenRect,
        measurer: &dyn TextMeasurer,
        out: &mut RenderList,
    ) -> DrawOutcome {
        let content = self.content_rect(view, measurer);
        let outcome = self.graph.draw(&self.series, content, out);
        if outcome == DrawOutcome::LayoutRequested {
            return outcome;
        }

        if let Some(title) = self.title.as_deref().filter(|_| self.is_title_visible()) {
            out.push(self.title_command(title, view));
        }
        match (self.graph.x_range(), self.graph.y_range()) {
            (Some(x), Some(y)) => {
                let rect = self.graph.graph_rect(content.min);
                self.series.draw(rect, x, y, out);
            }
            _ => log::warn!("grid drawn without resolved bounds; trace skipped"),
        }
        outcome
    }

    fn title_command(&self, title: &str, view: ScreenRect) -> RenderCommand {
        let style = &self.title_style;
        let top = view.top() + self.padding.top as f32;
        let (x, horizontal) = match style.alignment {
            TitleAlignment::Left => (
                view.left() + self.padding.left as f32,
                HorizontalAlign::Left,
            ),
            TitleAlignment::Center => (
                (view.left() + view.right()) * 0.5,
                HorizontalAlign::Center,
            ),
            TitleAlignment::Right => (
                view.right() - self.padding.right as f32,
                HorizontalAlign::Right,
            ),
        };
        RenderCommand::Text {
            position: ScreenPoint::new(x, top),
            anchor: TextAnchor::new(horizontal, VerticalAlign::Top),
            text: title.to_owned(),
            style: TextStyle {
                color: style.color,
                size: style.size,
            },
        }
    }
}

impl Default for EcgPlot {
    fn default() -> Self {
        Self::new()
    }
}

/// Preferred extent clamped to the offered one. An unknown grid size takes
/// the offer as is.
fn fit_dimension(graph: u32, chrome: u32, offered: u32) -> u32 {
    if graph == 0 {
        return offered;
    }
    let desired = graph + chrome;
    if desired > offered {
        log::warn!("view is {offered}px but the grid needs {desired}px; content may be cut");
    }
    desired.min(offered)
}

/// Builder for configuring a plot before construction.
#[derive(Default)]
pub struct EcgPlotBuilder {
    graph: Option<Graph>,
    series: Option<DataSeries>,
    title: Option<String>,
    title_style: TitleStyle,
    padding: Padding,
    measure_mode: MeasureMode,
    host: Option<SharedHost>,
}

impl EcgPlotBuilder {
    /// Use a preconfigured grid engine.
    pub fn graph(mut self, graph: Graph) -> Self {
        self.graph = Some(graph);
        self
    }

    /// Use a preconfigured series.
    pub fn series(mut self, series: DataSeries) -> Self {
        self.series = Some(series);
        self
    }

    /// Set the title text.
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the title style.
    pub fn title_style(mut self, style: TitleStyle) -> Self {
        self.title_style = style;
        self
    }

    /// Set the padding.
    pub fn padding(mut self, padding: Padding) -> Self {
        self.padding = padding;
        self
    }

    /// Set the measure mode.
    pub fn measure_mode(mut self, mode: MeasureMode) -> Self {
        self.measure_mode = mode;
        self
    }

    /// Route redraw and layout requests to `host`.
    pub fn host(mut self, host: SharedHost) -> Self {
        self.host = Some(host);
        self
    }

    /// Build the plot.
    pub fn build(self) -> EcgPlot {
        let mut plot = EcgPlot {
            graph: self.graph.unwrap_or_default(),
            series: self.series.unwrap_or_default(),
            title: self.title,
            title_style: self.title_style,
            padding: self.padding,
            measure_mode: self.measure_mode,
        };
        if let Some(host) = self.host {
            plot.attach_host(host);
        }
        plot
    }
}

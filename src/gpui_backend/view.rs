use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError, RwLock};

use gpui::prelude::*;
use gpui::{Bounds, Pixels, Window, canvas, div};

use crate::geom::ScreenRect;
use crate::graph::DrawOutcome;
use crate::host::HostView;
use crate::plot::EcgPlot;
use crate::render::RenderList;

use super::paint::paint_list;
use super::text::GpuiTextMeasurer;

/// Records what the core asked of the view between frames.
#[derive(Debug, Default)]
struct FrameRequests {
    redraw: AtomicBool,
    layout: AtomicBool,
}

impl HostView for FrameRequests {
    fn post_invalidate(&self) {
        self.redraw.store(true, Ordering::Release);
    }

    fn request_layout(&self) {
        self.layout.store(true, Ordering::Release);
    }
}

/// A GPUI view that renders an [`EcgPlot`].
///
/// Size changes and layout requests from the plot are handled right before
/// each frame is drawn.
#[derive(Clone)]
pub struct GpuiEcgView {
    plot: Arc<RwLock<EcgPlot>>,
    requests: Arc<FrameRequests>,
    last_size: Arc<Mutex<Option<(u32, u32)>>>,
}

impl GpuiEcgView {
    /// Create a view for the given plot.
    pub fn new(mut plot: EcgPlot) -> Self {
        let requests = Arc::new(FrameRequests::default());
        plot.attach_host(requests.clone());
        Self {
            plot: Arc::new(RwLock::new(plot)),
            requests,
            last_size: Arc::new(Mutex::new(None)),
        }
    }

    /// Get a handle for feeding and configuring the plot.
    ///
    /// This is useful for streaming updates from async tasks.
    pub fn plot_handle(&self) -> EcgHandle {
        EcgHandle {
            plot: Arc::clone(&self.plot),
            requests: Arc::clone(&self.requests),
        }
    }
}

impl Render for GpuiEcgView {
    fn render(&mut self, _window: &mut Window, _cx: &mut Context<Self>) -> impl IntoElement {
        let plot = Arc::clone(&self.plot);
        let requests = Arc::clone(&self.requests);
        let last_size = Arc::clone(&self.last_size);

        div().size_full().child(
            canvas(
                move |bounds, window, _| {
                    let mut plot = plot.write().unwrap_or_else(PoisonError::into_inner);
                    let mut last_size = last_size.lock().unwrap_or_else(PoisonError::into_inner);
                    build_frame(&mut plot, &requests, &mut last_size, bounds, window)
                },
                move |_, render, window, cx| {
                    paint_list(&render, window, cx);
                },
            )
            .size_full(),
        )
    }
}

fn build_frame(
    plot: &mut EcgPlot,
    requests: &FrameRequests,
    last_size: &mut Option<(u32, u32)>,
    bounds: Bounds<Pixels>,
    window: &Window,
) -> RenderList {
    let mut render = RenderList::new();
    let view = screen_rect(bounds);
    if !view.is_valid() {
        return render;
    }
    let measurer = GpuiTextMeasurer::new(window);

    let size = (view.width() as u32, view.height() as u32);
    let resized = *last_size != Some(size);
    if resized {
        *last_size = Some(size);
        plot.on_size_changed(size.0, size.1, &measurer);
    }
    let layout_requested = requests.layout.swap(false, Ordering::AcqRel);
    if resized || layout_requested || plot.graph().is_layout_required() {
        plot.on_layout(resized, view, &measurer);
    }

    requests.redraw.store(false, Ordering::Release);
    if plot.draw(view, &measurer, &mut render) == DrawOutcome::LayoutRequested {
        requests.layout.store(false, Ordering::Release);
        plot.on_layout(false, view, &measurer);
        render.clear();
        if plot.draw(view, &measurer, &mut render) == DrawOutcome::LayoutRequested {
            log::warn!("layout did not settle; frame skipped");
        }
    }
    render
}

fn screen_rect(bounds: Bounds<Pixels>) -> ScreenRect {
    let left = f32::from(bounds.origin.x);
    let top = f32::from(bounds.origin.y);
    ScreenRect::from_ltrb(
        left,
        top,
        left + f32::from(bounds.size.width),
        top + f32::from(bounds.size.height),
    )
}

/// A handle for reading and mutating an [`EcgPlot`] held inside a
/// `GpuiEcgView`.
///
/// The handle clones cheaply and can be moved into async tasks.
#[derive(Clone)]
pub struct EcgHandle {
    plot: Arc<RwLock<EcgPlot>>,
    requests: Arc<FrameRequests>,
}

impl EcgHandle {
    /// Read the plot state.
    ///
    /// The plot is locked for the duration of the callback.
    pub fn read<R>(&self, f: impl FnOnce(&EcgPlot) -> R) -> R {
        let plot = self.plot.read().unwrap_or_else(PoisonError::into_inner);
        f(&plot)
    }

    /// Mutate the plot state.
    ///
    /// The plot is locked for the duration of the callback.
    pub fn write<R>(&self, f: impl FnOnce(&mut EcgPlot) -> R) -> R {
        let mut plot = self.plot.write().unwrap_or_else(PoisonError::into_inner);
        f(&mut plot)
    }

    /// Whether the plot asked for a repaint since the last call.
    ///
    /// Producers check this after [`EcgHandle::write`] and notify the view
    /// only when it returns `true`.
    pub fn take_redraw_request(&self) -> bool {
        self.requests.redraw.swap(false, Ordering::AcqRel)
            | self.requests.layout.load(Ordering::Acquire)
    }
}

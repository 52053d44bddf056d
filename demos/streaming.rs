use std::time::Duration;

use gpui::{
    AppContext, Application, AsyncWindowContext, Bounds, Timer, WindowBounds, WindowOptions, px,
    size,
};

use ecg_view::{
    Color, DataSeries, EcgHandle, EcgPlot, Graph, GraphStyle, GpuiEcgView, LineGravity, Padding,
    SeriesStyle, TitleStyle, XLabelPosition, YLabelPosition,
};

const SAMPLE_RATE_HZ: f64 = 250.0;

struct StreamingDemo {
    view: gpui::Entity<GpuiEcgView>,
    handle: EcgHandle,
}

impl StreamingDemo {
    fn new(cx: &mut gpui::Context<Self>) -> Self {
        let (view, handle) = build_view(cx);
        Self { view, handle }
    }
}

impl gpui::Render for StreamingDemo {
    fn render(
        &mut self,
        _window: &mut gpui::Window,
        _cx: &mut gpui::Context<Self>,
    ) -> impl gpui::IntoElement {
        self.view.clone()
    }
}

fn build_view(cx: &mut gpui::Context<StreamingDemo>) -> (gpui::Entity<GpuiEcgView>, EcgHandle) {
    let mut graph = Graph::with_style(
        GraphStyle {
            background_color: Color::WHITE,
            label_text_size: 12,
            label_padding: 4,
            ..GraphStyle::default()
        }
        .with_x_labels(XLabelPosition::Bottom)
        .with_y_labels(YLabelPosition::Left)
        .with_line_gravity(LineGravity::Center),
    );
    graph.set_y_grid_count(30, false);

    let mut series = DataSeries::new();
    series.set_style(SeriesStyle {
        color: Color::new(0.1, 0.1, 0.1, 1.0),
        line_width: 1.5,
    });

    let plot = EcgPlot::builder()
        .graph(graph)
        .series(series)
        .title("Lead II")
        .title_style(TitleStyle {
            size: 18.0,
            padding: 6,
            ..TitleStyle::default()
        })
        .padding(Padding::uniform(8))
        .build();

    let view = GpuiEcgView::new(plot);
    let handle = view.plot_handle();
    let entity = cx.new(|_| view);
    (entity, handle)
}

/// Rough PQRST shape, one beat per second.
fn heartbeat(t: f64) -> f64 {
    let phase = t.fract();
    let bump = |center: f64, width: f64, height: f64| {
        height * (-((phase - center) / width).powi(2)).exp()
    };
    bump(0.2, 0.025, 0.15) - bump(0.36, 0.008, 0.1) + bump(0.4, 0.01, 1.2)
        - bump(0.44, 0.01, 0.25)
        + bump(0.7, 0.04, 0.3)
}

fn spawn_updates(
    window: &mut gpui::Window,
    cx: &mut gpui::App,
    view: gpui::Entity<GpuiEcgView>,
    handle: EcgHandle,
) {
    window
        .spawn(cx, move |cx: &mut AsyncWindowContext| {
            let mut cx = cx.clone();
            async move {
                let delta = 1.0 / SAMPLE_RATE_HZ;
                let mut t = 0.0_f64;
                loop {
                    Timer::after(Duration::from_millis(16)).await;
                    handle.write(|plot| {
                        for _ in 0..4 {
                            let _ = plot.series_mut().append_value(heartbeat(t), delta, false);
                            t += delta;
                        }
                    });
                    if handle.take_redraw_request() {
                        let _ = cx.update(|_, cx| {
                            view.update(cx, |_view, view_cx| view_cx.notify());
                        });
                    }
                }
            }
        })
        .detach();
}

fn main() {
    Application::new().run(|cx| {
        let options = WindowOptions {
            window_bounds: Some(WindowBounds::Windowed(Bounds::centered(
                None,
                size(px(900.0), px(420.0)),
                cx,
            ))),
            ..Default::default()
        };

        cx.open_window(options, |window, cx| {
            let demo = cx.new(StreamingDemo::new);
            let handle = demo.read(cx).handle.clone();
            let view = demo.read(cx).view.clone();
            spawn_updates(window, cx, view, handle);
            demo
        })
        .unwrap();
    });
}

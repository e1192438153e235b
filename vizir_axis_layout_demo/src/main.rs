// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Axis layout demos for `vizir_axis_layout`.
//!
//! Set `RUST_LOG=debug` to see the layout decisions as they are made.
mod host;
mod html;
mod svg;

use peniko::Color;
use peniko::color::palette::css;
use vizir_axis_layout::{
    AxisDescriptor, AxisGeometry, AxisId, AxisOrient, Canvas, HeuristicTextMeasurer, HostLayout,
    LabelContentMeasurer, LayoutConfig, LayoutCoordinator, LayoutHooks, LayoutReport,
    LayoutRequest, LayoutTarget, MeasureError, Placement, PlottingRegion,
};

use host::{CollectingTarget, ToyHost};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default()).init();

    let coordinator = LayoutCoordinator::default();
    let sections = vec![
        default_spacing_demo(&coordinator),
        failing_measurer_demo(&coordinator),
        overfull_canvas_demo(),
        no_axes_demo(&coordinator),
        label_bands_demo(&coordinator),
        side_conflict_demo(&coordinator),
        host_hooks_demo(&coordinator),
        deferred_pass_demo(&coordinator),
    ];

    let html = html::render_report("VizIR axis layout demo", &sections);
    std::fs::write("vizir_axis_layout_demo.html", html)
        .expect("write vizir_axis_layout_demo.html");
    println!("wrote vizir_axis_layout_demo.html");
}

fn band_color(orient: AxisOrient) -> Color {
    let base = match orient {
        AxisOrient::Left => css::STEEL_BLUE,
        AxisOrient::Right => css::MEDIUM_SEA_GREEN,
        AxisOrient::Top => css::GOLDENROD,
        AxisOrient::Bottom => css::TOMATO,
    };
    base.with_alpha(0.6)
}

/// Draws the canvas outline, the plotting region and one labelled box per band.
fn render(
    canvas: Canvas,
    region: PlottingRegion,
    bands: impl IntoIterator<Item = (AxisId, AxisOrient, AxisGeometry)>,
) -> String {
    let mut scene = svg::SvgScene::default();
    scene.set_view_box(canvas.rect());
    scene.push_outline(canvas.rect(), css::BLACK);
    scene.push_rect(region.to_rect(), css::ALICE_BLUE);
    scene.push_label(
        region.to_rect().center(),
        11.0,
        format!("{:.1} × {:.1}", region.width, region.height),
    );
    for (id, orient, geometry) in bands {
        let rect = geometry.to_rect();
        scene.push_rect(rect, band_color(orient));
        if geometry.width > 0.0 && geometry.height > 0.0 {
            scene.push_label(rect.center(), 9.0, format!("{id}"));
        }
    }
    scene.to_svg_string()
}

fn render_placement(canvas: Canvas, placement: &Placement) -> String {
    render(
        canvas,
        placement.region,
        placement.axes.iter().filter_map(|axis| {
            placement
                .geometry(axis.id)
                .map(|geometry| (axis.id, axis.orient, *geometry))
        }),
    )
}

fn render_host(canvas: Canvas, layout: &HostLayout) -> String {
    render(
        canvas,
        layout.chart_area,
        layout
            .axes
            .iter()
            .map(|axis| (axis.descriptor.id, axis.descriptor.orient, axis.geometry)),
    )
}

fn report_notes(report: &LayoutReport) -> Vec<String> {
    report.issues().iter().map(ToString::to_string).collect()
}

fn axis_notes(placement: &Placement) -> Vec<String> {
    placement
        .axes
        .iter()
        .map(|axis| {
            format!(
                "axis {} ({:?}): thickness {:?}, length {}",
                axis.id, axis.orient, axis.thickness, axis.length
            )
        })
        .collect()
}

fn constant(extent: f64) -> impl Fn(&AxisDescriptor) -> Result<f64, MeasureError> {
    move |_axis| Ok(extent)
}

fn default_spacing_demo(coordinator: &LayoutCoordinator) -> html::HtmlSection {
    let canvas = Canvas::new(800.0, 400.0);
    let placement = coordinator.layout(canvas, &[AxisDescriptor::left(1)], &constant(40.0));
    html::HtmlSection {
        title: "Left axis, spacing absent",
        description: "Labels 40 wide and no spacing given: the default spacing applies and the band is 40 + 2 × 3 + 8 wide.",
        svg: render_placement(canvas, &placement),
        notes: axis_notes(&placement),
    }
}

fn failing_measurer_demo(coordinator: &LayoutCoordinator) -> html::HtmlSection {
    let canvas = Canvas::new(800.0, 400.0);
    let failing = |axis: &AxisDescriptor| -> Result<f64, MeasureError> {
        Err(MeasureError::Backend(format!("font for {} not loaded", axis.id)))
    };
    let placement = coordinator.layout(canvas, &[AxisDescriptor::left(1)], &failing);
    let mut notes = axis_notes(&placement);
    notes.extend(report_notes(&placement.report));
    html::HtmlSection {
        title: "Measurement failure",
        description: "The measurer errors; the band falls back to its maximum extent instead of producing NaN.",
        svg: render_placement(canvas, &placement),
        notes,
    }
}

fn overfull_canvas_demo() -> html::HtmlSection {
    let coordinator = LayoutCoordinator::new(LayoutConfig::default().with_fixed_margin(0.0));
    let canvas = Canvas::new(100.0, 100.0);
    let axes = [
        AxisDescriptor::left(1).with_spacing(0.0),
        AxisDescriptor::right(2).with_spacing(0.0),
    ];
    let by_axis = |axis: &AxisDescriptor| -> Result<f64, MeasureError> {
        Ok(if axis.id == AxisId(1) { 70.0 } else { 60.0 })
    };
    let placement = coordinator.layout(canvas, &axes, &by_axis);
    let mut notes = axis_notes(&placement);
    notes.extend(report_notes(&placement.report));
    html::HtmlSection {
        title: "Overfull canvas",
        description: "Left and right bands request 70 + 60 on a 100 wide canvas; both shrink proportionally and the region collapses to zero width.",
        svg: render_placement(canvas, &placement),
        notes,
    }
}

fn no_axes_demo(coordinator: &LayoutCoordinator) -> html::HtmlSection {
    let canvas = Canvas::new(300.0, 150.0);
    let placement = coordinator.layout(canvas, &[], &constant(0.0));
    html::HtmlSection {
        title: "No axes",
        description: "Without bands the plotting region is the whole canvas.",
        svg: render_placement(canvas, &placement),
        notes: Vec::new(),
    }
}

fn label_bands_demo(coordinator: &LayoutCoordinator) -> html::HtmlSection {
    let canvas = Canvas::new(480.0, 320.0);
    let measurer = LabelContentMeasurer::new(HeuristicTextMeasurer, 10.0)
        .with_labels(AxisId(1), ["0", "2,500", "5,000", "7,500", "10,000"])
        .with_labels(AxisId(2), ["low", "mid", "high"])
        .with_labels(AxisId(3), ["Q1 2025 revenue"])
        .with_labels(AxisId(4), ["Jan", "Feb", "Mar", "Apr"]);
    let axes = [
        AxisDescriptor::left(1),
        AxisDescriptor::right(2).with_spacing(6.0),
        AxisDescriptor::top(3).with_max_extent(20.0),
        AxisDescriptor::bottom(4),
    ];
    let placement = coordinator.layout(canvas, &axes, &measurer);
    html::HtmlSection {
        title: "Label-driven bands",
        description: "Band thicknesses come from heuristic label metrics. The top band is capped by its maximum extent.",
        svg: render_placement(canvas, &placement),
        notes: axis_notes(&placement),
    }
}

fn side_conflict_demo(coordinator: &LayoutCoordinator) -> html::HtmlSection {
    let canvas = Canvas::new(300.0, 150.0);
    let axes = [AxisDescriptor::left(1), AxisDescriptor::left(2)];
    let placement = coordinator.layout(canvas, &axes, &constant(30.0));
    let mut notes = axis_notes(&placement);
    notes.extend(report_notes(&placement.report));
    html::HtmlSection {
        title: "Two axes on one side",
        description: "Only the first visible axis on a side gets a band; the second collapses onto the region edge.",
        svg: render_placement(canvas, &placement),
        notes,
    }
}

fn host_hooks_demo(coordinator: &LayoutCoordinator) -> html::HtmlSection {
    let canvas = Canvas::new(400.0, 240.0);
    let axes = [AxisDescriptor::left(1), AxisDescriptor::bottom(2)];
    let measurer = constant(24.0);

    let (unhooked, _) = ToyHost { hooks: None }.layout(canvas, &axes, &measurer);
    let (hooked, report) = ToyHost {
        hooks: Some(coordinator as &dyn LayoutHooks),
    }
    .layout(canvas, &axes, &measurer);

    let mut notes = vec![format!(
        "without hooks the host's chart area is {:?}",
        unhooked.chart_area
    )];
    notes.extend(report_notes(&report));
    html::HtmlSection {
        title: "Host renderer with hooks",
        description: "A host that reads a missing spacing as NaN. The post-fit hook repairs each thickness before accumulation; the post-layout hook re-positions the result.",
        svg: render_host(canvas, &hooked),
        notes,
    }
}

/// A target that asks for a wider canvas once, from inside delivery.
#[derive(Debug)]
struct ResizeOnce<'a> {
    coordinator: &'a LayoutCoordinator,
    resized: bool,
    inner: CollectingTarget,
}

impl LayoutTarget for ResizeOnce<'_> {
    fn deliver(&mut self, placement: &Placement) {
        self.inner.deliver(placement);
        if !self.resized {
            self.resized = true;
            let request = LayoutRequest::new(Canvas::new(360.0, 160.0))
                .with_axis(AxisDescriptor::left(1))
                .with_axis(AxisDescriptor::bottom(2));
            let status = self
                .coordinator
                .run(request, &constant(18.0), &mut CollectingTarget::default());
            log::info!("nested layout request: {status:?}");
        }
    }
}

fn deferred_pass_demo(coordinator: &LayoutCoordinator) -> html::HtmlSection {
    let request = LayoutRequest::new(Canvas::new(240.0, 160.0))
        .with_axis(AxisDescriptor::left(1))
        .with_axis(AxisDescriptor::bottom(2));
    let mut target = ResizeOnce {
        coordinator,
        resized: false,
        inner: CollectingTarget::default(),
    };
    let status = coordinator.run(request, &constant(18.0), &mut target);

    let canvas = Canvas::new(360.0, 160.0);
    let svg = match target.inner.placements.last() {
        Some(placement) => render_placement(canvas, placement),
        None => String::new(),
    };
    let mut notes = vec![format!("outer run: {status:?}")];
    notes.extend(
        target
            .inner
            .placements
            .iter()
            .map(|p| format!("delivered region {:?}", p.region)),
    );
    html::HtmlSection {
        title: "Deferred re-entrant pass",
        description: "The target requests a resize while applying a layout. The request is deferred and delivered after the first pass finishes.",
        svg,
        notes,
    }
}

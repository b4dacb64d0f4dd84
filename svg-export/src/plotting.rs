use crate::svg::{render_document, Anchor, Element};

const AXIS_COLOR: &str = "black";
const GRID_COLOR: &str = "lightgray";
const MARKER_RADIUS: f64 = 3.0;

// ----------------------------------------------------------------------------
//
//
// Figure
//
//
// ----------------------------------------------------------------------------

/// The overall canvas: size, optional title, and the axis drawn into it.
pub struct Figure {
    width: u64,
    height: u64,
    title: String,
    axes: Vec<Axis>,
}

impl Figure {
    pub fn new(width: u64, height: u64) -> Self {
        Self {
            width,
            height,
            title: String::new(),
            axes: Vec::new(),
        }
    }

    pub fn with_title(mut self, title: &str) -> Self {
        self.title = title.to_owned();
        self
    }

    pub fn add_axis(&mut self, ax: Axis) {
        self.axes.push(ax);
    }

    /// Render this `Figure` to raw SVG markup.
    pub fn render(&self) -> String {
        let mut elements = vec![Element::Rect {
            x: 0.0,
            y: 0.0,
            width: self.width as f64,
            height: self.height as f64,
            fill: "white".to_string(),
            stroke: None,
        }];
        if !self.title.is_empty() {
            elements.push(Element::Text {
                x: self.width as f64 * 0.5,
                y: self.height as f64 * 0.06,
                content: self.title.clone(),
                anchor: Anchor::Middle,
                size_pt: 14.0,
                fill: AXIS_COLOR.to_string(),
                angle: 0.0,
            });
        }
        for ax in self.axes.iter() {
            elements.extend(ax.to_elements(self));
        }
        log::debug!("rendering figure with {} svg elements", elements.len());
        render_document(self.width, self.height, &elements)
    }
}

impl Default for Figure {
    fn default() -> Self {
        Self::new(800, 600)
    }
}

// ----------------------------------------------------------------------------
//
//
// Axis
//
//
// ----------------------------------------------------------------------------

/// The container for plots: data limits, labels, ticks, grid, legend.
///
/// Placement inside the figure uses normalized (u, v) coordinates in
/// [0, 1], measured from the top left.
pub struct Axis {
    limits: [f64; 4],
    xlabel: String,
    ylabel: String,
    grid: bool,
    legend: bool,
    xticks: Ticks,
    yticks: Ticks,
    lines: Vec<LinePlot>,
    bars: Option<BarPlot>,
    u: f64,
    v: f64,
    width: f64,
    height: f64,
}

#[derive(Default)]
struct Ticks {
    positions: Vec<f64>,
    labels: Vec<String>,
}

impl Axis {
    pub fn new(u: f64, v: f64, width: f64, height: f64) -> Self {
        Self {
            limits: [0.0, 1.0, 0.0, 1.0],
            xlabel: String::new(),
            ylabel: String::new(),
            grid: false,
            legend: false,
            xticks: Ticks::default(),
            yticks: Ticks::default(),
            lines: Vec::new(),
            bars: None,
            u,
            v,
            width,
            height,
        }
    }

    pub fn with_xlim(mut self, xmin: f64, xmax: f64) -> Self {
        let (xmin, xmax) = widen_degenerate(xmin.min(xmax), xmin.max(xmax));
        self.limits[0] = xmin;
        self.limits[1] = xmax;
        self.xticks = Ticks::auto(xmin, xmax, 6);
        self
    }

    pub fn with_ylim(mut self, ymin: f64, ymax: f64) -> Self {
        let (ymin, ymax) = widen_degenerate(ymin.min(ymax), ymin.max(ymax));
        self.limits[2] = ymin;
        self.limits[3] = ymax;
        self.yticks = Ticks::auto(ymin, ymax, 6);
        self
    }

    pub fn with_xlabel(mut self, text: &str) -> Self {
        self.xlabel = text.to_owned();
        self
    }

    pub fn with_ylabel(mut self, text: &str) -> Self {
        self.ylabel = text.to_owned();
        self
    }

    pub fn with_grid(mut self, flag: bool) -> Self {
        self.grid = flag;
        self
    }

    pub fn with_legend(mut self, flag: bool) -> Self {
        self.legend = flag;
        self
    }

    /// Replace the automatic ticks of the x-axis (used for category
    /// labels on bar charts and power-of-ten labels on log axes).
    pub fn set_xticks(&mut self, positions: Vec<f64>, labels: Vec<String>) {
        self.xticks = Ticks { positions, labels };
    }

    pub fn set_yticks(&mut self, positions: Vec<f64>, labels: Vec<String>) {
        self.yticks = Ticks { positions, labels };
    }

    pub fn add_line(&mut self, line: LinePlot) {
        self.lines.push(line);
    }

    pub fn set_bars(&mut self, bars: BarPlot) {
        self.bars = Some(bars);
    }

    pub fn insert_into(self, fig: &mut Figure) {
        fig.add_axis(self);
    }

    // Closures mapping data coordinates to final pixel coordinates.
    fn transformations(&self, fig: &Figure) -> (impl Fn(f64) -> f64, impl Fn(f64) -> f64) {
        let (fw, fh) = (fig.width as f64, fig.height as f64);
        let (au, av, aw, ah) = (self.u, self.v, self.width, self.height);
        let [xmin, xmax, ymin, ymax] = self.limits;

        let px = move |x: f64| fw * (au + (x - xmin) / (xmax - xmin) * aw);
        let py = move |y: f64| fh * (av + (1.0 - (y - ymin) / (ymax - ymin)) * ah);
        (px, py)
    }

    fn to_elements(&self, fig: &Figure) -> Vec<Element> {
        let (px, py) = self.transformations(fig);
        let [xmin, xmax, ymin, ymax] = self.limits;
        let (fw, fh) = (fig.width as f64, fig.height as f64);

        let mut elements = Vec::new();

        // Grid first, everything else draws over it.
        if self.grid {
            for &x in self
                .xticks
                .positions
                .iter()
                .filter(|x| (xmin..=xmax).contains(x))
            {
                elements.push(Element::Line {
                    x1: px(x),
                    y1: py(ymin),
                    x2: px(x),
                    y2: py(ymax),
                    stroke: GRID_COLOR.to_string(),
                    width: 0.5,
                });
            }
            for &y in self
                .yticks
                .positions
                .iter()
                .filter(|y| (ymin..=ymax).contains(y))
            {
                elements.push(Element::Line {
                    x1: px(xmin),
                    y1: py(y),
                    x2: px(xmax),
                    y2: py(y),
                    stroke: GRID_COLOR.to_string(),
                    width: 0.5,
                });
            }
        }

        if let Some(bars) = &self.bars {
            elements.extend(bars.to_elements(&px, &py, ymin));
        }
        for line in self.lines.iter() {
            elements.extend(line.to_elements(&px, &py));
        }

        // Axis frame.
        elements.push(Element::Rect {
            x: px(xmin),
            y: py(ymax),
            width: px(xmax) - px(xmin),
            height: py(ymin) - py(ymax),
            fill: "none".to_string(),
            stroke: Some(AXIS_COLOR.to_string()),
        });

        // Ticks and tick labels.
        let tick_len = fh * 0.01;
        for (&x, label) in self
            .xticks
            .positions
            .iter()
            .zip(self.xticks.labels.iter())
            .filter(|(x, _)| (xmin..=xmax).contains(*x))
        {
            elements.push(Element::Line {
                x1: px(x),
                y1: py(ymin),
                x2: px(x),
                y2: py(ymin) + tick_len,
                stroke: AXIS_COLOR.to_string(),
                width: 1.0,
            });
            elements.push(Element::Text {
                x: px(x),
                y: py(ymin) + tick_len + fh * 0.03,
                content: label.clone(),
                anchor: Anchor::Middle,
                size_pt: 9.0,
                fill: AXIS_COLOR.to_string(),
                angle: 0.0,
            });
        }
        for (&y, label) in self
            .yticks
            .positions
            .iter()
            .zip(self.yticks.labels.iter())
            .filter(|(y, _)| (ymin..=ymax).contains(*y))
        {
            elements.push(Element::Line {
                x1: px(xmin) - tick_len,
                y1: py(y),
                x2: px(xmin),
                y2: py(y),
                stroke: AXIS_COLOR.to_string(),
                width: 1.0,
            });
            elements.push(Element::Text {
                x: px(xmin) - tick_len - fw * 0.005,
                y: py(y) + fh * 0.01,
                content: label.clone(),
                anchor: Anchor::End,
                size_pt: 9.0,
                fill: AXIS_COLOR.to_string(),
                angle: 0.0,
            });
        }

        // Axis labels.
        if !self.xlabel.is_empty() {
            elements.push(Element::Text {
                x: px((xmin + xmax) / 2.0),
                y: fh * (self.v + self.height) + fh * 0.08,
                content: self.xlabel.clone(),
                anchor: Anchor::Middle,
                size_pt: 11.0,
                fill: AXIS_COLOR.to_string(),
                angle: 0.0,
            });
        }
        if !self.ylabel.is_empty() {
            let x = fw * self.u - fw * 0.08;
            let y = py((ymin + ymax) / 2.0);
            elements.push(Element::Text {
                x,
                y,
                content: self.ylabel.clone(),
                anchor: Anchor::Middle,
                size_pt: 11.0,
                fill: AXIS_COLOR.to_string(),
                angle: 270.0,
            });
        }

        // Legend: one colored label per named line, top right.
        if self.legend {
            for (i, line) in self.lines.iter().filter(|l| !l.name.is_empty()).enumerate() {
                elements.push(Element::Text {
                    x: px(xmax) - fw * 0.01,
                    y: py(ymax) + fh * (0.03 + i as f64 * 0.035),
                    content: line.name.clone(),
                    anchor: Anchor::End,
                    size_pt: 10.0,
                    fill: line.color.clone(),
                    angle: 0.0,
                });
            }
        }

        elements
    }
}

impl Default for Axis {
    fn default() -> Self {
        Axis::new(0.12, 0.12, 0.83, 0.76)
    }
}

// ----------------------------------------------------------------------------
//
//
// LinePlot
//
//
// ----------------------------------------------------------------------------

#[derive(Clone)]
pub struct LinePlot {
    xs: Vec<f64>,
    ys: Vec<f64>,
    color: String,
    linewidth: f64,
    name: String,
    markers: bool,
}

impl LinePlot {
    pub fn new(xs: &[f64], ys: &[f64]) -> Self {
        Self {
            xs: xs.to_vec(),
            ys: ys.to_vec(),
            color: AXIS_COLOR.to_string(),
            linewidth: 1.0,
            name: String::new(),
            markers: false,
        }
    }

    pub fn with_color(mut self, color: &str) -> Self {
        self.color = color.to_owned();
        self
    }

    pub fn with_linewidth(mut self, linewidth: f64) -> Self {
        self.linewidth = linewidth;
        self
    }

    pub fn with_name(mut self, name: &str) -> Self {
        self.name = name.to_owned();
        self
    }

    pub fn with_markers(mut self, flag: bool) -> Self {
        self.markers = flag;
        self
    }

    fn to_elements(
        &self,
        px: impl Fn(f64) -> f64,
        py: impl Fn(f64) -> f64,
    ) -> Vec<Element> {
        let mut elements = Vec::new();

        // A polyline with NaNs silently disappears in most renderers,
        // so the data is split into finite segments.
        let mut segment: Vec<[f64; 2]> = Vec::new();
        let n = self.xs.len().min(self.ys.len());
        for i in 0..n {
            let (x, y) = (self.xs[i], self.ys[i]);
            if x.is_finite() && y.is_finite() {
                segment.push([px(x), py(y)]);
            } else if !segment.is_empty() {
                elements.push(self.polyline(std::mem::take(&mut segment)));
            }
        }
        if !segment.is_empty() {
            elements.push(self.polyline(segment));
        }

        if self.markers && self.linewidth > 0.0 {
            for i in 0..n {
                let (x, y) = (self.xs[i], self.ys[i]);
                if x.is_finite() && y.is_finite() {
                    elements.push(Element::Circle {
                        cx: px(x),
                        cy: py(y),
                        r: MARKER_RADIUS,
                        fill: self.color.clone(),
                    });
                }
            }
        }
        elements
    }

    fn polyline(&self, points: Vec<[f64; 2]>) -> Element {
        Element::Polyline {
            points,
            stroke: self.color.clone(),
            width: self.linewidth,
        }
    }
}

// ----------------------------------------------------------------------------
//
//
// BarPlot
//
//
// ----------------------------------------------------------------------------

#[derive(Clone)]
pub struct BarPlot {
    positions: Vec<f64>,
    heights: Vec<f64>,
    color: String,
}

impl BarPlot {
    pub fn new(positions: &[f64], heights: &[f64]) -> Self {
        Self {
            positions: positions.to_vec(),
            heights: heights.to_vec(),
            color: "steelblue".to_string(),
        }
    }

    pub fn with_color(mut self, color: &str) -> Self {
        self.color = color.to_owned();
        self
    }

    fn to_elements(
        &self,
        px: impl Fn(f64) -> f64,
        py: impl Fn(f64) -> f64,
        ymin: f64,
    ) -> Vec<Element> {
        // Bars sit on the baseline (y = 0), or on the lower axis limit
        // if zero lies outside of it.
        let base = ymin.max(0.0);
        let half_width = 0.4
            * self
                .positions
                .windows(2)
                .map(|w| (w[1] - w[0]).abs())
                .fold(f64::INFINITY, f64::min)
                .min(1.0);

        self.positions
            .iter()
            .zip(self.heights.iter())
            .map(|(&pos, &height)| {
                let top = py(height.max(base));
                let bottom = py(base);
                Element::Rect {
                    x: px(pos - half_width),
                    y: top,
                    width: px(pos + half_width) - px(pos - half_width),
                    height: bottom - top,
                    fill: self.color.clone(),
                    stroke: None,
                }
            })
            .collect()
    }
}

// ----------------------------------------------------------------------------
//
//
// Helpers
//
//
// ----------------------------------------------------------------------------

impl Ticks {
    /// Place about `target` ticks on a 1-2-5 raster covering [min, max].
    fn auto(min: f64, max: f64, target: usize) -> Self {
        let span = max - min;
        let raw_step = span / target as f64;
        let magnitude = 10f64.powf(raw_step.log10().floor());
        let step = [1.0, 2.0, 5.0, 10.0]
            .into_iter()
            .map(|mult| mult * magnitude)
            .find(|step| span / step <= target as f64)
            .unwrap_or(magnitude * 10.0);

        let mut positions = Vec::new();
        let mut x = (min / step).ceil() * step;
        while x <= max {
            positions.push(x);
            x += step;
        }
        let labels = positions.iter().map(|&pos| format_tick(pos)).collect();
        Self { positions, labels }
    }
}

fn widen_degenerate(min: f64, max: f64) -> (f64, f64) {
    if max - min > 0.0 {
        (min, max)
    } else {
        (min - 1.0, max + 1.0)
    }
}

fn format_tick(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    let magnitude = value.abs();
    if !(1e-3..1e4).contains(&magnitude) {
        return format!("{value:.0e}");
    }
    let formatted = format!("{value:.3}");
    formatted
        .trim_end_matches('0')
        .trim_end_matches('.')
        .to_string()
}

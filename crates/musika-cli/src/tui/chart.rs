//! Modal pie chart for the composer summary.

use musika_core::chart::PieChart;
use ratatui::prelude::*;
use ratatui::symbols::Marker;
use ratatui::widgets::canvas::{Canvas, Points};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem};

const PALETTE: [Color; 6] = [
    Color::Cyan,
    Color::Magenta,
    Color::Yellow,
    Color::Green,
    Color::Red,
    Color::Blue,
];

/// Radius of the pie in canvas units; the shorter canvas axis spans `-1..1`.
const RADIUS: f64 = 0.95;

pub fn slice_color(index: usize) -> Color {
    PALETTE[index % PALETTE.len()]
}

/// Canvas points for each slice, plus the bounds that keep the pie round.
#[derive(Debug, Clone, PartialEq)]
pub struct PieCanvas {
    pub x_extent: f64,
    pub y_extent: f64,
    /// One list of points per slice, in slice order.
    pub layers: Vec<Vec<(f64, f64)>>,
}

impl PieCanvas {
    /// Sample a `dots_x` by `dots_y` grid of braille dots and assign each dot
    /// inside the circle to the slice covering its angle.
    ///
    /// Braille dots are roughly square, so the longer axis gets a wider range
    /// to stop the pie from stretching into an ellipse.
    #[allow(clippy::cast_precision_loss)]
    pub fn sample(chart: &PieChart, dots_x: usize, dots_y: usize) -> Self {
        let mut layers = vec![Vec::new(); chart.slices.len()];
        if dots_x == 0 || dots_y == 0 {
            return Self {
                x_extent: 1.0,
                y_extent: 1.0,
                layers,
            };
        }

        let ratio = dots_x as f64 / dots_y as f64;
        let (x_extent, y_extent) = if ratio >= 1.0 {
            (ratio, 1.0)
        } else {
            (1.0, 1.0 / ratio)
        };
        let step_x = 2.0 * x_extent / dots_x as f64;
        let step_y = 2.0 * y_extent / dots_y as f64;

        for px in 0..dots_x {
            let x = -x_extent + (px as f64 + 0.5) * step_x;
            for py in 0..dots_y {
                let y = -y_extent + (py as f64 + 0.5) * step_y;
                if x.hypot(y) > RADIUS {
                    continue;
                }
                // Clockwise from 12 o'clock
                let angle = x.atan2(y);
                if let Some(index) = chart.slice_at(angle) {
                    layers[index].push((x, y));
                }
            }
        }

        Self {
            x_extent,
            y_extent,
            layers,
        }
    }
}

/// Render the chart as a centred dialog over whatever is underneath.
pub fn render(frame: &mut Frame, chart: &PieChart) {
    let area = centered_rect(70, 70, frame.area());
    frame.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(chart.title.as_str())
        .title_bottom(" Esc/Enter Close ")
        .style(Style::default().fg(Color::White));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(inner);

    render_pie(frame, chart, chunks[0]);
    render_legend(frame, chart, chunks[1]);
}

fn render_pie(frame: &mut Frame, chart: &PieChart, area: Rect) {
    // Braille packs 2x4 dots into each cell
    let pie = PieCanvas::sample(
        chart,
        usize::from(area.width) * 2,
        usize::from(area.height) * 4,
    );

    let canvas = Canvas::default()
        .marker(Marker::Braille)
        .x_bounds([-pie.x_extent, pie.x_extent])
        .y_bounds([-pie.y_extent, pie.y_extent])
        .paint(|ctx| {
            for (index, coords) in pie.layers.iter().enumerate() {
                ctx.draw(&Points {
                    coords,
                    color: slice_color(index),
                });
            }
        });
    frame.render_widget(canvas, area);
}

fn render_legend(frame: &mut Frame, chart: &PieChart, area: Rect) {
    let items: Vec<ListItem> = chart
        .slices
        .iter()
        .enumerate()
        .map(|(index, slice)| {
            ListItem::new(Line::from(vec![
                Span::styled("■ ", Style::default().fg(slice_color(index))),
                Span::raw(format!(
                    "{}  {} ({:.1}%)",
                    slice.label,
                    slice.weight,
                    slice.percent()
                )),
            ]))
        })
        .collect();

    let legend = List::new(items).block(Block::default().borders(Borders::LEFT).title("Composers"));
    frame.render_widget(legend, area);
}

/// A rectangle of the given percentage size, centred in `area`.
fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}

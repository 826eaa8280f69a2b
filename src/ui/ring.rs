//! Ring chart of expense categories.
//!
//! [`layout`] turns category buckets into angular slices; [`render`] draws
//! them as a braille ring on a ratatui canvas. Angles are in degrees,
//! clockwise from 12 o'clock.

use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::Line;
use ratatui::widgets::canvas::{Canvas, Points};
use ratatui::widgets::Block;
use ratatui::Frame;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use super::theme;
use crate::budget::CategoryBucket;

/// Gap between adjacent slices.
pub(crate) const PADDING_DEG: f64 = 3.0;
pub(crate) const INNER_RADIUS: f64 = 0.7;
pub(crate) const OUTER_RADIUS: f64 = 0.9;

const ANGLE_STEP_DEG: f64 = 0.5;
const RADIUS_STEP: f64 = 0.01;

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Slice {
    pub(crate) label: String,
    pub(crate) value: Decimal,
    pub(crate) start_deg: f64,
    pub(crate) sweep_deg: f64,
    pub(crate) color_slot: usize,
}

impl Slice {
    pub(crate) fn end_deg(&self) -> f64 {
        self.start_deg + self.sweep_deg
    }
}

/// Lay buckets out around the ring in their given order.
///
/// Empty or zero-valued input yields no slices. A single slice takes the
/// full circle with no padding.
pub(crate) fn layout(buckets: &[CategoryBucket]) -> Vec<Slice> {
    let positive: Vec<&CategoryBucket> =
        buckets.iter().filter(|b| b.value > Decimal::ZERO).collect();
    let total: Decimal = positive.iter().map(|b| b.value).sum();
    if total <= Decimal::ZERO {
        return Vec::new();
    }

    let padding = if positive.len() > 1 { PADDING_DEG } else { 0.0 };
    let available = 360.0 - padding * positive.len() as f64;

    let mut start = 0.0;
    positive
        .iter()
        .enumerate()
        .map(|(slot, bucket)| {
            let fraction = (bucket.value / total).to_f64().unwrap_or(0.0);
            let sweep = fraction * available;
            let slice = Slice {
                label: bucket.name.clone(),
                value: bucket.value,
                start_deg: start,
                sweep_deg: sweep,
                color_slot: slot % theme::RING_PALETTE.len(),
            };
            start += sweep + padding;
            slice
        })
        .collect()
}

/// Canvas coordinates of the point at `deg` on a circle of `radius`.
pub(crate) fn point_at(deg: f64, radius: f64) -> (f64, f64) {
    let (sin, cos) = deg.to_radians().sin_cos();
    (radius * sin, radius * cos)
}

/// Sample points filling a slice between the inner and outer radius.
pub(crate) fn slice_points(slice: &Slice) -> Vec<(f64, f64)> {
    let angle_steps = (slice.sweep_deg / ANGLE_STEP_DEG).ceil() as usize;
    let radius_steps = ((OUTER_RADIUS - INNER_RADIUS) / RADIUS_STEP).round() as usize;

    let mut points = Vec::with_capacity((angle_steps + 1) * (radius_steps + 1));
    for a in 0..=angle_steps {
        let deg = (slice.start_deg + a as f64 * ANGLE_STEP_DEG).min(slice.end_deg());
        for r in 0..=radius_steps {
            points.push(point_at(deg, INNER_RADIUS + r as f64 * RADIUS_STEP));
        }
    }
    points
}

/// Draw the ring inside `area` with `center` printed in the hole.
pub(crate) fn render(f: &mut Frame, area: Rect, block: Block, slices: &[Slice], center: &str) {
    let inner = block.inner(area);
    // Braille dots are roughly square, so stretch the x range to keep the
    // ring circular.
    let half_width = if inner.height == 0 {
        1.0
    } else {
        f64::from(inner.width) / (2.0 * f64::from(inner.height))
    };
    let cell_width = if inner.width == 0 {
        0.0
    } else {
        2.0 * half_width / f64::from(inner.width)
    };
    let label_x = -(center.chars().count() as f64) * cell_width / 2.0;

    let sampled: Vec<(Vec<(f64, f64)>, usize)> = slices
        .iter()
        .map(|s| (slice_points(s), s.color_slot))
        .collect();
    let center = center.to_string();

    let canvas = Canvas::default()
        .block(block)
        .x_bounds([-half_width, half_width])
        .y_bounds([-1.0, 1.0])
        .paint(move |ctx| {
            for (coords, slot) in &sampled {
                ctx.draw(&Points {
                    coords: coords.as_slice(),
                    color: theme::ring_color(*slot),
                });
            }
            ctx.print(
                label_x,
                0.0,
                Line::styled(center.clone(), Style::default().fg(theme::TEXT)),
            );
        });

    f.render_widget(canvas, area);
}

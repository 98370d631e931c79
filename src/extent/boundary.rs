//! Extent estimate from densified rectangle edges.
//!
//! Cheaper than the grid search but only sees the rectangle's outline, so it
//! under-reports extents whose extrema lie in the interior (a pole inside
//! the region, a cut through it).

use crate::error::ExtentError;
use crate::extent::Bounds;
use crate::search::SearchWindow;
use crate::transform::PointTransform;

/// Evenly spaced points along all 4 edges of a rectangle, corners once each.
fn edge_points(window: &SearchWindow, pts_per_edge: usize) -> Vec<(f64, f64)> {
    let pts = pts_per_edge.max(2);
    let mut points = Vec::with_capacity(pts * 4);

    let x_step = window.width() / (pts - 1) as f64;
    let y_step = window.height() / (pts - 1) as f64;
    let x_at = |i: usize| {
        if i + 1 == pts {
            window.x1
        } else {
            window.x0 + x_step * i as f64
        }
    };
    let y_at = |i: usize| {
        if i + 1 == pts {
            window.y1
        } else {
            window.y0 + y_step * i as f64
        }
    };

    // Bottom and top edges: y fixed, x varies
    for i in 0..pts {
        points.push((x_at(i), window.y0));
        points.push((x_at(i), window.y1));
    }
    // Left and right edges: x fixed, y varies (skip corners already covered)
    for i in 1..pts - 1 {
        points.push((window.x0, y_at(i)));
        points.push((window.x1, y_at(i)));
    }

    points
}

/// Bounding box of the transformed outline of
/// `region = (x_min, x_max, y_min, y_max)`, sampled at `pts_per_edge` points
/// per edge (at least 2).
pub fn boundary_extent<T: PointTransform + ?Sized>(
    transform: &T,
    region: (f64, f64, f64, f64),
    pts_per_edge: usize,
) -> Result<Bounds, ExtentError> {
    let (x_min, x_max, y_min, y_max) = region;
    let window = SearchWindow::region(x_min, x_max, y_min, y_max)?;

    let mut coords = edge_points(&window, pts_per_edge);
    transform.transform_batch(&mut coords)?;

    let mut bounds = Bounds {
        x_min: f64::INFINITY,
        x_max: f64::NEG_INFINITY,
        y_min: f64::INFINITY,
        y_max: f64::NEG_INFINITY,
    };
    let mut valid_count = 0usize;
    for &(tx, ty) in &coords {
        if tx.is_finite() && ty.is_finite() {
            bounds.x_min = bounds.x_min.min(tx);
            bounds.x_max = bounds.x_max.max(tx);
            bounds.y_min = bounds.y_min.min(ty);
            bounds.y_max = bounds.y_max.max(ty);
            valid_count += 1;
        }
    }

    if valid_count == 0 {
        return Err(ExtentError::UnprojectableRegion {
            x0: window.x0,
            x1: window.x1,
            y0: window.y0,
            y1: window.y1,
        });
    }
    Ok(bounds)
}

/// Triangle fill and line drawing into a 1-bit frame
///
/// Both primitives write exclusively through [`FrameBuffer::set`], so the
/// bit packing stays in the framebuffer module.
use crate::dither::BayerSize;
use crate::framebuffer::FrameBuffer;

/// A projected vertex in pixel space (x right, y down the rows)
pub type ScreenPoint = (f32, f32);

/// Fill a screen-space triangle with a dithered brightness.
///
/// Pixels whose center lies strictly inside the triangle are switched on or
/// off according to `bayer`; everything else is left as it was. The
/// bounding box is clamped to the frame on all four sides.
pub fn fill_triangle(
    frame: &mut FrameBuffer,
    coords: &[ScreenPoint; 3],
    brightness: f32,
    bayer: BayerSize,
) {
    let [v0, v1, v2] = *coords;

    // Bounding box
    let min_x = v0.0.min(v1.0).min(v2.0).floor() as i32;
    let max_x = v0.0.max(v1.0).max(v2.0).ceil() as i32;
    let min_y = v0.1.min(v1.1).min(v2.1).floor() as i32;
    let max_y = v0.1.max(v1.1).max(v2.1).ceil() as i32;

    // Clip to screen bounds
    let min_x = min_x.max(0);
    let max_x = max_x.min(frame.columns() as i32 - 1);
    let min_y = min_y.max(0);
    let max_y = max_y.min(frame.rows() as i32 - 1);

    for y in min_y..=max_y {
        for x in min_x..=max_x {
            let px = x as f32 + 0.5;
            let py = y as f32 + 0.5;

            if let Some((w0, w1, w2)) = barycentric(v0, v1, v2, (px, py)) {
                if w0 > 0.0 && w1 > 0.0 && w2 > 0.0 {
                    let on = bayer.is_lit(brightness, y as usize, x as usize);
                    frame.set(x, y, on);
                }
            }
        }
    }
}

/// Draw a line with Bresenham's algorithm.
///
/// Endpoints are rounded and clamped into the frame before stepping, which
/// keeps the walk bounded for wildly off-screen or non-finite input.
pub fn draw_line(frame: &mut FrameBuffer, from: ScreenPoint, to: ScreenPoint, on: bool) {
    let max_x = frame.columns() as i32 - 1;
    let max_y = frame.rows() as i32 - 1;
    let clamp = |p: ScreenPoint| -> (i32, i32) {
        (
            (p.0.round() as i32).clamp(0, max_x),
            (p.1.round() as i32).clamp(0, max_y),
        )
    };

    let (mut x0, mut y0) = clamp(from);
    let (x1, y1) = clamp(to);

    let dx = (x1 - x0).abs();
    let dy = (y1 - y0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = (if dx > dy { dx } else { -dy }) / 2;

    loop {
        frame.set(x0, y0, on);

        if x0 == x1 && y0 == y1 {
            break;
        }
        let e2 = err;
        if e2 > -dx {
            err -= dy;
            x0 += sx;
        }
        if e2 < dy {
            err += dx;
            y0 += sy;
        }
    }
}

/// Draw the three edges of a triangle.
pub fn draw_triangle_outline(frame: &mut FrameBuffer, coords: &[ScreenPoint; 3], on: bool) {
    draw_line(frame, coords[0], coords[1], on);
    draw_line(frame, coords[1], coords[2], on);
    draw_line(frame, coords[2], coords[0], on);
}

/// Calculate barycentric coordinates for a point in a triangle
///
/// Returns `None` for (near) zero-area triangles. Non-finite input yields
/// NaN weights, which fail any inside test.
fn barycentric(
    v0: ScreenPoint,
    v1: ScreenPoint,
    v2: ScreenPoint,
    p: ScreenPoint,
) -> Option<(f32, f32, f32)> {
    let denom = (v1.1 - v2.1) * (v0.0 - v2.0) + (v2.0 - v1.0) * (v0.1 - v2.1);

    if denom.abs() < 1e-6 {
        return None;
    }

    let w0 = ((v1.1 - v2.1) * (p.0 - v2.0) + (v2.0 - v1.0) * (p.1 - v2.1)) / denom;
    let w1 = ((v2.1 - v0.1) * (p.0 - v2.0) + (v0.0 - v2.0) * (p.1 - v2.1)) / denom;
    let w2 = 1.0 - w0 - w1;

    Some((w0, w1, w2))
}

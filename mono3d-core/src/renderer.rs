/// Per-frame rasterization pipeline
///
/// Each frame runs rotate -> translate -> cull -> project -> screen-map ->
/// fill -> outline over scratch copies of the mesh. The only state carried
/// between frames is the last rotation input, used to skip redundant draws.
use std::ops::Range;

use anyhow::Result;
use log::{debug, trace};

use crate::config::RendererConfig;
use crate::dither::BayerSize;
use crate::framebuffer::{DisplayGeometry, FrameBuffer};
use crate::geometry::Mesh;
use crate::projection::Camera;
use crate::raster::{self, ScreenPoint};
use crate::transform::{RotationState, Transform};
use crate::vector::Vector3;

/// Fills brighter than this get white outlines, darker ones black.
const OUTLINE_THRESHOLD: f32 = 0.2;

/// Outcome of one [`Renderer::render_frame`] call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FrameStatus {
    /// The rotation input did not change; the frame was left untouched.
    Skipped,
    /// The frame was redrawn; `rows` is the scanline range the host must flush.
    Drawn { rows: Range<usize> },
}

/// A mesh triangle that survived culling, in pixel space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenTriangle {
    /// Position of the source triangle within the mesh
    pub index: usize,
    pub points: [ScreenPoint; 3],
    /// Fixed per-face shade in `[0, 1)`
    pub brightness: f32,
}

impl ScreenTriangle {
    /// Axis-aligned bounds as `(min_x, min_y, max_x, max_y)`.
    pub fn bounds(&self) -> (f32, f32, f32, f32) {
        let xs = self.points.map(|p| p.0);
        let ys = self.points.map(|p| p.1);
        (
            xs[0].min(xs[1]).min(xs[2]),
            ys[0].min(ys[1]).min(ys[2]),
            xs[0].max(xs[1]).max(xs[2]),
            ys[0].max(ys[1]).max(ys[2]),
        )
    }
}

/// Long-lived pipeline state: display layout, camera, mesh and the last
/// rotation input seen.
pub struct Renderer {
    refresh_rate: u32,
    scale: usize,
    geometry: DisplayGeometry,
    camera: Camera,
    camera_distance: f32,
    bayer: BayerSize,
    mesh: Mesh,
    rotation: RotationState,
}

impl Renderer {
    /// Renderer for the built-in unit cube.
    pub fn new(config: &RendererConfig) -> Result<Self> {
        Self::with_mesh(config, Mesh::cube())
    }

    pub fn with_mesh(config: &RendererConfig, mesh: Mesh) -> Result<Self> {
        let geometry = config.display_geometry()?;
        let camera = Camera::from_config(&config.camera, geometry.aspect_ratio());

        debug!(
            "Renderer created: {}x{} (stride {}) at {} Hz, {} triangles, bayer {}",
            geometry.columns(),
            geometry.rows(),
            geometry.row_stride(),
            config.refresh_rate,
            mesh.len(),
            config.bayer_size.dimension()
        );

        Ok(Self {
            refresh_rate: config.refresh_rate,
            scale: config.scale,
            geometry,
            camera,
            camera_distance: config.camera.distance,
            bayer: config.bayer_size,
            mesh,
            rotation: RotationState::new(),
        })
    }

    pub fn refresh_rate(&self) -> u32 {
        self.refresh_rate
    }

    pub fn scale(&self) -> usize {
        self.scale
    }

    pub fn geometry(&self) -> DisplayGeometry {
        self.geometry
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }

    /// Force the next frame to redraw even if the input is unchanged.
    pub fn invalidate(&mut self) {
        self.rotation.reset();
    }

    /// Transform, cull and project the mesh for a rotation input in degrees.
    ///
    /// Culled triangles are absent from the result; the rest keep mesh order.
    pub fn screen_triangles(&self, angle_degrees: f32) -> Vec<ScreenTriangle> {
        self.project_mesh(angle_degrees, self.geometry.columns(), self.geometry.rows())
    }

    fn project_mesh(&self, angle_degrees: f32, columns: usize, rows: usize) -> Vec<ScreenTriangle> {
        let rotation = Transform::rotation_matrix(angle_degrees.to_radians());
        let offset = Vector3::new(0.0, 0.0, self.camera_distance);
        let count = self.mesh.len();

        let mut visible = Vec::with_capacity(count);
        for (index, triangle) in self.mesh.triangles.iter().enumerate() {
            let rotated = triangle.map(|p| Transform::transform_vector(p, &rotation));
            let translated = rotated.map(|p| p + offset);

            if self.camera.is_backface(&translated.normal(), &translated.points[0]) {
                continue;
            }

            let points = translated
                .points
                .map(|p| self.camera.project_to_screen(&p, columns, rows));

            visible.push(ScreenTriangle {
                index,
                points,
                brightness: index as f32 / count as f32,
            });
        }

        visible
    }

    /// Draw one frame for the given rotation input (degrees).
    ///
    /// `frame` is only borrowed for this call, and triangles are mapped onto
    /// its grid. When the input matches the previous frame nothing is written
    /// and [`FrameStatus::Skipped`] is returned.
    pub fn render_frame(&mut self, angle_degrees: f32, frame: &mut FrameBuffer) -> FrameStatus {
        if !self.rotation.observe(angle_degrees) {
            trace!("Rotation unchanged at {} degrees, skipping frame", angle_degrees);
            return FrameStatus::Skipped;
        }

        frame.clear(false);

        let triangles = self.project_mesh(angle_degrees, frame.columns(), frame.rows());
        for triangle in &triangles {
            raster::fill_triangle(frame, &triangle.points, triangle.brightness, self.bayer);
            raster::draw_triangle_outline(
                frame,
                &triangle.points,
                triangle.brightness > OUTLINE_THRESHOLD,
            );
        }

        trace!(
            "Drew {} of {} triangles at {} degrees",
            triangles.len(),
            self.mesh.len(),
            angle_degrees
        );

        FrameStatus::Drawn {
            rows: 0..frame.rows(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Triangle;
    use test_log::test;

    fn renderer() -> Renderer {
        Renderer::new(&RendererConfig::default()).unwrap()
    }

    /// Normal points along +z, away from a camera at the origin.
    fn away_facing() -> Triangle {
        Triangle::new(
            Vector3::new(-0.5, -0.5, 0.0),
            Vector3::new(0.5, -0.5, 0.0),
            Vector3::new(-0.5, 0.5, 0.0),
        )
    }

    fn frame_bytes(renderer: &Renderer) -> Vec<u8> {
        vec![0u8; renderer.geometry().buffer_len()]
    }

    #[test]
    fn test_front_faces_visible_at_zero() {
        let renderer = renderer();
        let visible = renderer.screen_triangles(0.0);

        // Only the face toward the camera (z = -0.5) survives head-on
        assert_eq!(visible.len(), 2);
        let indices: Vec<_> = visible.iter().map(|t| t.index).collect();
        assert_eq!(indices, vec![0, 1]);
    }

    #[test]
    fn test_visible_bounds_inside_display() {
        let renderer = renderer();
        let geometry = renderer.geometry();

        for angle in [0.0, 17.0, 45.0, 90.0, 133.0, 270.0, 359.0] {
            let visible = renderer.screen_triangles(angle);
            assert!(!visible.is_empty(), "nothing visible at {}", angle);
            for triangle in &visible {
                let (min_x, min_y, max_x, max_y) = triangle.bounds();
                assert!(min_x >= 0.0 && min_y >= 0.0, "{:?} at {}", triangle, angle);
                assert!(max_x < geometry.columns() as f32, "{:?} at {}", triangle, angle);
                assert!(max_y < geometry.rows() as f32, "{:?} at {}", triangle, angle);
            }
        }
    }

    #[test]
    fn test_visible_count_never_exceeds_half_the_cube() {
        let renderer = renderer();
        for step in 0..72 {
            let visible = renderer.screen_triangles(step as f32 * 5.0);
            // At most three faces of a convex cube can face the camera
            assert!(visible.len() <= 6);
        }
    }

    #[test]
    fn test_brightness_is_index_over_count() {
        let renderer = renderer();
        for triangle in renderer.screen_triangles(30.0) {
            assert_eq!(triangle.brightness, triangle.index as f32 / 12.0);
        }
    }

    #[test]
    fn test_render_then_skip_identical_angle() {
        let mut renderer = renderer();
        let geometry = renderer.geometry();
        let mut data = frame_bytes(&renderer);

        let status = {
            let mut frame = FrameBuffer::new(&mut data, geometry).unwrap();
            renderer.render_frame(25.0, &mut frame)
        };
        assert_eq!(status, FrameStatus::Drawn { rows: 0..120 });
        let first = data.clone();
        assert!(first.iter().any(|b| *b != 0));

        let mut frame = FrameBuffer::new(&mut data, geometry).unwrap();
        assert_eq!(renderer.render_frame(25.0, &mut frame), FrameStatus::Skipped);
        assert_eq!(data, first);
    }

    #[test]
    fn test_redraw_is_deterministic() {
        let mut renderer = renderer();
        let geometry = renderer.geometry();

        let mut a = frame_bytes(&renderer);
        renderer.render_frame(40.0, &mut FrameBuffer::new(&mut a, geometry).unwrap());

        let mut b = vec![0xFFu8; geometry.buffer_len()];
        renderer.invalidate();
        renderer.render_frame(40.0, &mut FrameBuffer::new(&mut b, geometry).unwrap());

        // Clearing makes the result independent of what the buffer held
        assert_eq!(a, b);
    }

    #[test]
    fn test_changed_angle_redraws() {
        let mut renderer = renderer();
        let geometry = renderer.geometry();
        let mut data = frame_bytes(&renderer);

        renderer.render_frame(10.0, &mut FrameBuffer::new(&mut data, geometry).unwrap());
        let first = data.clone();
        let mut frame = FrameBuffer::new(&mut data, geometry).unwrap();
        let status = renderer.render_frame(50.0, &mut frame);

        assert!(matches!(status, FrameStatus::Drawn { .. }));
        assert_ne!(data, first);
    }

    #[test]
    fn test_render_maps_onto_frame_grid() {
        let mut renderer = renderer();
        let half = DisplayGeometry::new(100, 60, 13).unwrap();
        let mut data = vec![0u8; half.buffer_len()];
        let mut frame = FrameBuffer::new(&mut data, half).unwrap();

        let status = renderer.render_frame(0.0, &mut frame);
        assert_eq!(status, FrameStatus::Drawn { rows: 0..60 });
        assert!(frame.count_lit() > 0);

        // The head-on face spans roughly x 40..60, y 20..40 on a 100x60 grid
        for y in 0..60 {
            for x in 0..100 {
                if frame.get(x, y) {
                    assert!((39..=61).contains(&x), "lit pixel ({}, {})", x, y);
                    assert!((19..=41).contains(&y), "lit pixel ({}, {})", x, y);
                }
            }
        }
    }

    #[test]
    fn test_pixels_stay_inside_visible_bounds() {
        let mut renderer = renderer();
        let geometry = renderer.geometry();
        let mut data = frame_bytes(&renderer);

        let angle = 60.0;
        let visible = renderer.screen_triangles(angle);
        let mut frame = FrameBuffer::new(&mut data, geometry).unwrap();
        renderer.render_frame(angle, &mut frame);

        for y in 0..geometry.rows() as i32 {
            for x in 0..geometry.columns() as i32 {
                if !frame.get(x, y) {
                    continue;
                }
                let covered = visible.iter().any(|t| {
                    let (min_x, min_y, max_x, max_y) = t.bounds();
                    x as f32 >= min_x.floor() - 1.0
                        && x as f32 <= max_x.ceil() + 1.0
                        && y as f32 >= min_y.floor() - 1.0
                        && y as f32 <= max_y.ceil() + 1.0
                });
                assert!(covered, "lit pixel ({}, {}) outside every visible triangle", x, y);
            }
        }
    }

    #[test]
    fn test_backface_triangle_never_drawn() {
        let mut mesh = Mesh::new();
        mesh.add_triangle(away_facing());
        let mut renderer = Renderer::with_mesh(&RendererConfig::default(), mesh).unwrap();
        let geometry = renderer.geometry();

        assert!(renderer.screen_triangles(0.0).is_empty());

        let mut data = frame_bytes(&renderer);
        let mut frame = FrameBuffer::new(&mut data, geometry).unwrap();
        renderer.render_frame(0.0, &mut frame);
        assert_eq!(frame.count_lit(), 0);
    }

    #[test]
    fn test_front_facing_triangle_drawn_with_white_edges() {
        let mut mesh = Mesh::new();
        // Index 0 would have zero brightness; pad with culled faces so the
        // drawn face is bright
        for _ in 0..3 {
            mesh.add_triangle(away_facing());
        }
        mesh.add_triangle(Triangle::new(
            Vector3::new(-0.5, -0.5, 0.0),
            Vector3::new(-0.5, 0.5, 0.0),
            Vector3::new(0.5, -0.5, 0.0),
        ));
        let mut renderer = Renderer::with_mesh(&RendererConfig::default(), mesh).unwrap();
        let geometry = renderer.geometry();

        let visible = renderer.screen_triangles(0.0);
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].brightness, 0.75);

        let mut data = frame_bytes(&renderer);
        let mut frame = FrameBuffer::new(&mut data, geometry).unwrap();
        renderer.render_frame(0.0, &mut frame);

        let (x, y) = visible[0].points[0];
        assert!(frame.get(x.round() as i32, y.round() as i32));
        assert!(frame.count_lit() > 0);
    }

    #[test]
    fn test_degenerate_projection_does_not_panic() {
        let mut config = RendererConfig::default();
        config.camera.fov_degrees = 0.0;
        let mut renderer = Renderer::new(&config).unwrap();
        let geometry = renderer.geometry();

        let mut data = frame_bytes(&renderer);
        let mut frame = FrameBuffer::new(&mut data, geometry).unwrap();
        let status = renderer.render_frame(12.0, &mut frame);
        assert!(matches!(status, FrameStatus::Drawn { .. }));
    }
}

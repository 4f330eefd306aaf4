//! The parallel render loop.
//!
//! The canvas is split into bands of whole rows. Each rayon worker owns one
//! band at a time and writes only into it, so no locking is needed and the
//! world and camera are shared read-only.

use std::time::Instant;

use log::{ debug, info };
use rayon::prelude::*;

use crate::camera::Camera;
use crate::canvas::Canvas;
use crate::color::Color;
use crate::error::{ Result, TraceError };
use crate::world::World;

/// Tuning knobs for `render`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RenderConfig {
    /// Size of the worker pool; `0` means one worker per available core.
    pub workers: usize,

    /// Rows handed to a worker at a time.
    pub rows_per_chunk: usize,
}

impl Default for RenderConfig {
    fn default() -> RenderConfig {
        RenderConfig { workers: 0, rows_per_chunk: 1 }
    }
}

/// Renders `world` as seen by `camera`.
///
/// Blocks until every pixel is done. The first failing pixel aborts the
/// whole render; no partial image is returned. A pixel whose color is `NaN`
/// or infinite counts as a failure.
///
/// ```
/// # use brute_tracer::camera::Camera;
/// # use brute_tracer::matrix::Matrix4D;
/// # use brute_tracer::render::{ render, RenderConfig };
/// # use brute_tracer::world::World;
/// let camera = Camera::new(4, 3, 1.0, Matrix4D::identity()).unwrap();
/// let canvas = render(&World::default(), &camera, &RenderConfig::default())
///     .unwrap();
/// assert_eq!((canvas.width, canvas.height), (4, 3));
/// ```
pub fn render(world: &World, camera: &Camera, config: &RenderConfig)
    -> Result<Canvas> {
    let (width, height) = (camera.hsize, camera.vsize);
    let mut canvas = Canvas::new(width, height);

    // Nothing to do, and `par_chunks_mut` rejects zero-sized chunks.
    if width == 0 || height == 0 {
        return Ok(canvas);
    }

    let rows_per_chunk = config.rows_per_chunk.max(1).min(height);
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(config.workers)
        .thread_name(|i| format!("render-{}", i))
        .build()?;

    info!(
        "Rendering {}x{} pixels, {} objects, using {} workers",
        width, height, world.objects.len(), pool.current_num_threads()
    );
    let start = Instant::now();

    pool.install(|| {
        canvas.pixels_mut()
            .par_chunks_mut(width * rows_per_chunk)
            .enumerate()
            .try_for_each(|(chunk, band)| {
                render_band(world, camera, chunk * rows_per_chunk, width, band)
            })
    })?;

    info!("Rendered in {:.2?}", start.elapsed());

    Ok(canvas)
}

/// Fills `band`, a run of whole rows starting at row `first_row`.
fn render_band(world: &World, camera: &Camera, first_row: usize,
    width: usize, band: &mut [Color]) -> Result<()> {
    debug!("band starting at row {} ({} pixels)", first_row, band.len());

    for (i, slot) in band.iter_mut().enumerate() {
        let (x, y) = (i % width, first_row + i / width);

        let ray = camera.ray_for_pixel(x, y)?;
        let color = world.color_at(&ray)?;

        if !color.is_finite() {
            return Err(TraceError::NonFiniteColor { x, y });
        }

        *slot = color;
    }

    Ok(())
}

#[cfg(test)]
use crate::tuple::Tuple4D;
#[cfg(test)]
use crate::matrix::Matrix4D;
#[cfg(test)]
use crate::world::test_world;

#[cfg(test)]
fn front_camera(hsize: usize, vsize: usize) -> Camera {
    let view = Matrix4D::view_transform(
        Tuple4D::point(0.0, 0.0, -5.0),
        Tuple4D::point(0.0, 0.0, 0.0),
        Tuple4D::vector(0.0, 1.0, 0.0),
    ).unwrap();

    Camera::new(hsize, vsize, std::f64::consts::PI / 2.0, view).unwrap()
}

#[test]
fn render_world_with_camera() {
    let w = test_world();
    let c = front_camera(11, 11);

    let image = render(&w, &c, &RenderConfig::default()).unwrap();

    assert_eq!(image.read_pixel(5, 5).unwrap(),
        Color::rgb(0.38066, 0.47583, 0.2855));
}

#[test]
fn parallel_render_matches_serial() {
    let w = test_world();
    let c = front_camera(17, 9);
    let config = RenderConfig { workers: 3, rows_per_chunk: 2 };

    let image = render(&w, &c, &config).unwrap();

    for y in 0..c.vsize {
        for x in 0..c.hsize {
            let expected = w.color_at(&c.ray_for_pixel(x, y).unwrap()).unwrap();
            let actual = image.read_pixel(x, y).unwrap();

            assert_eq!(actual.r.to_bits(), expected.r.to_bits());
            assert_eq!(actual.g.to_bits(), expected.g.to_bits());
            assert_eq!(actual.b.to_bits(), expected.b.to_bits());
        }
    }
}

#[test]
fn chunk_size_does_not_change_image() {
    let w = test_world();
    let c = front_camera(8, 7);

    let a = render(&w, &c, &RenderConfig { workers: 1, rows_per_chunk: 1 })
        .unwrap();
    let b = render(&w, &c, &RenderConfig { workers: 4, rows_per_chunk: 3 })
        .unwrap();

    assert_eq!(a, b);
}

#[test]
fn empty_canvas_renders() {
    let c = Camera::new(0, 5, 1.0, Matrix4D::identity()).unwrap();
    let image = render(&test_world(), &c, &RenderConfig::default()).unwrap();

    assert!(image.pixels().is_empty());
}

#[test]
fn non_finite_color_aborts_render() {
    let mut w = test_world();
    w.objects[0].material.ambient = std::f64::INFINITY;
    w.objects[0].material.diffuse = 0.0;
    w.objects[0].material.specular = 0.0;

    let c = front_camera(5, 5);

    match render(&w, &c, &RenderConfig::default()) {
        Err(TraceError::NonFiniteColor { .. }) => (),
        other => panic!("expected NonFiniteColor, got {:?}", other.map(|_| ())),
    }
}

#[test]
fn oversized_chunks_cover_whole_image() {
    let w = test_world();
    let c = front_camera(4, 3);

    let config = RenderConfig { workers: 1, rows_per_chunk: usize::MAX };
    let whole = render(&w, &c, &config).unwrap();
    let rows = render(&w, &c, &RenderConfig::default()).unwrap();

    assert_eq!(whole, rows);
}

use std::convert::TryFrom;
use std::fs;
use std::path::Path;

use log::debug;
use serde::Deserialize;

use crate::camera::Camera;
use crate::color::Color;
use crate::error::{ Result, TraceError };
use crate::light::{ Material, PointLight };
use crate::matrix::Matrix4D;
use crate::shape::Shape;
use crate::tuple::Tuple4D;
use crate::world::World;

/// A world together with the camera looking at it.
pub struct Scene {
    pub world: World,
    pub camera: Camera,
}

impl Scene {
    /// Parses a JSON scene description.
    pub fn from_json(json: &str) -> Result<Scene> {
        let scene_json: SceneJson = serde_json::from_str(json)?;
        Scene::try_from(scene_json)
    }

    /// Reads and parses a JSON scene description from `path`.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Scene> {
        let path = path.as_ref();
        debug!("loading scene from {}", path.display());

        let json = fs::read_to_string(path)?;
        Scene::from_json(&json)
    }

    /// A `size`-cubed block of glassy spheres, one per integer grid point,
    /// centered on the origin and colored by position.
    ///
    /// The camera looks at the block from above one corner.
    pub fn sphere_grid(size: usize, width: usize, height: usize)
        -> Result<Scene> {
        let s = size as f64;
        let offset = -s / 2.0;

        let mut world = World::new(PointLight::new(
            Color::white(),
            Tuple4D::point(2.0 * s, 2.0 * s, -s),
        ));

        let glass = Material {
            reflective: 0.9,
            transparency: 1.0,
            refractive_index: crate::consts::GLASS_RI,
            ..Default::default()
        };

        for x in 0..size {
            for y in 0..size {
                for z in 0..size {
                    let (fx, fy, fz) = (x as f64, y as f64, z as f64);
                    let transform =
                        Matrix4D::translation(fx + offset, fy + offset, fz + offset)
                        * Matrix4D::scaling(0.33, 0.33, 0.33);

                    let sphere = Shape::sphere()
                        .with_transform(transform)?
                        .with_material(Material {
                            color: Color::rgb(fx / s, fy / s, fz / s),
                            ..glass
                        });

                    world.add_shape(sphere);
                }
            }
        }

        let view = Matrix4D::view_transform(
            Tuple4D::point(1.6 * s, 1.2 * s, -1.6 * s),
            Tuple4D::point(0.0, -0.12 * s, 0.0),
            Tuple4D::vector(0.0, 1.0, 0.0),
        ).map_err(|e| e.context("camera"))?;

        let camera = Camera::new(width, height, std::f64::consts::PI / 3.0, view)
            .map_err(|e| e.context("camera"))?;

        debug!("generated sphere grid with {} spheres", world.objects.len());

        Ok(Scene { world, camera })
    }
}

impl TryFrom<SceneJson> for Scene {
    type Error = TraceError;

    fn try_from(scene_json: SceneJson) -> Result<Scene> {
        let camera = scene_json.camera.build()
            .map_err(|e| e.context("camera"))?;

        let mut world = World::new(PointLight::new(
            scene_json.light.intensity.into(),
            point(scene_json.light.position),
        ));

        if let Some(depth) = scene_json.recursion_depth {
            world.recursion_depth = depth;
        }

        for (i, shape_json) in scene_json.shapes.into_iter().enumerate() {
            let name = shape_json.kind.name();
            let shape = shape_json.build()
                .map_err(|e| e.context(format!("shape {} ({})", i, name)))?;

            world.add_shape(shape);
        }

        debug!("parsed scene with {} shapes", world.objects.len());

        Ok(Scene { world, camera })
    }
}

fn point(p: [f64; 3]) -> Tuple4D {
    Tuple4D::point(p[0], p[1], p[2])
}

fn vector(v: [f64; 3]) -> Tuple4D {
    Tuple4D::vector(v[0], v[1], v[2])
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SceneJson {
    camera: CameraJson,
    light: LightJson,
    shapes: Vec<ShapeJson>,

    #[serde(default)]
    recursion_depth: Option<usize>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct CameraJson {
    width: usize,
    height: usize,
    field_of_view: f64,

    from: [f64; 3],
    to: [f64; 3],
    up: [f64; 3],
}

impl CameraJson {
    fn build(&self) -> Result<Camera> {
        let view = Matrix4D::view_transform(
            point(self.from), point(self.to), vector(self.up)
        )?;

        Camera::new(self.width, self.height, self.field_of_view, view)
    }
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct LightJson {
    intensity: [f64; 3],
    position: [f64; 3],
}

#[derive(Clone, Copy, Deserialize)]
#[serde(rename_all = "lowercase")]
enum ShapeKindJson {
    Sphere,
    Plane,
}

impl ShapeKindJson {
    fn name(&self) -> &'static str {
        match self {
            ShapeKindJson::Sphere => "sphere",
            ShapeKindJson::Plane => "plane",
        }
    }

    fn shape(&self) -> Shape {
        match self {
            ShapeKindJson::Sphere => Shape::sphere(),
            ShapeKindJson::Plane => Shape::plane(),
        }
    }
}

/// One transform step. Steps are multiplied in listed order, so the last
/// step is the first applied to the object.
#[derive(Clone, Copy, Deserialize)]
#[serde(rename_all = "snake_case")]
enum TransformJson {
    Translate([f64; 3]),
    Scale([f64; 3]),
    RotateX(f64),
    RotateY(f64),
    RotateZ(f64),
    Shear([f64; 6]),
}

impl From<TransformJson> for Matrix4D {
    fn from(step: TransformJson) -> Matrix4D {
        match step {
            TransformJson::Translate([x, y, z]) => Matrix4D::translation(x, y, z),
            TransformJson::Scale([x, y, z]) => Matrix4D::scaling(x, y, z),
            TransformJson::RotateX(r) => Matrix4D::rotation_x(r),
            TransformJson::RotateY(r) => Matrix4D::rotation_y(r),
            TransformJson::RotateZ(r) => Matrix4D::rotation_z(r),
            TransformJson::Shear([xy, xz, yx, yz, zx, zy])
                => Matrix4D::shearing(xy, xz, yx, yz, zx, zy),
        }
    }
}

/// Material overrides; anything left out keeps its default.
#[derive(Clone, Copy, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct MaterialJson {
    color: Option<[f64; 3]>,
    ambient: Option<f64>,
    diffuse: Option<f64>,
    specular: Option<f64>,
    shininess: Option<f64>,
    reflective: Option<f64>,
    transparency: Option<f64>,
    refractive_index: Option<f64>,
}

impl From<MaterialJson> for Material {
    fn from(m: MaterialJson) -> Material {
        let d = Material::default();

        Material {
            color: m.color.map(Color::from).unwrap_or(d.color),
            ambient: m.ambient.unwrap_or(d.ambient),
            diffuse: m.diffuse.unwrap_or(d.diffuse),
            specular: m.specular.unwrap_or(d.specular),
            shininess: m.shininess.unwrap_or(d.shininess),
            reflective: m.reflective.unwrap_or(d.reflective),
            transparency: m.transparency.unwrap_or(d.transparency),
            refractive_index: m.refractive_index.unwrap_or(d.refractive_index),
        }
    }
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct ShapeJson {
    #[serde(rename = "type")]
    kind: ShapeKindJson,

    #[serde(default)]
    transform: Vec<TransformJson>,

    #[serde(default)]
    material: MaterialJson,
}

impl ShapeJson {
    fn build(self) -> Result<Shape> {
        let transform = self.transform.into_iter()
            .map(Matrix4D::from)
            .fold(Matrix4D::identity(), |acc, step| acc * step);

        Ok(self.kind.shape()
            .with_transform(transform)?
            .with_material(self.material.into()))
    }
}

#[cfg(test)]
const EXAMPLE_SCENE: &str = r#"{
    "camera": { "width": 32, "height": 18, "field_of_view": 1.0472,
                "from": [0, 1.5, -5], "to": [0, 1, 0], "up": [0, 1, 0] },
    "light":  { "intensity": [1, 1, 1], "position": [-10, 10, -10] },
    "shapes": [
        { "type": "plane" },
        { "type": "sphere",
          "transform": [ { "translate": [0, 1, 0] }, { "scale": [0.5, 0.5, 0.5] } ],
          "material": { "color": [1, 0.2, 0.2], "diffuse": 0.7, "reflective": 0.3 } }
    ]
}"#;

#[test]
fn parse_example_scene() {
    let scene = Scene::from_json(EXAMPLE_SCENE).unwrap();

    assert_eq!((scene.camera.hsize, scene.camera.vsize), (32, 18));
    assert_eq!(scene.world.light_source.position,
        Tuple4D::point(-10.0, 10.0, -10.0));
    assert_eq!(scene.world.objects.len(), 2);

    let floor = &scene.world.objects[0];
    assert_eq!(*floor.transform(), Matrix4D::identity());
    assert_eq!(floor.material, Material::default());

    let ball = &scene.world.objects[1];
    assert_eq!(*ball.transform(),
        Matrix4D::translation(0.0, 1.0, 0.0) * Matrix4D::scaling(0.5, 0.5, 0.5));
    assert_eq!(ball.material.color, Color::rgb(1.0, 0.2, 0.2));
    assert_eq!(ball.material.diffuse, 0.7);
    assert_eq!(ball.material.reflective, 0.3);
    assert_eq!(ball.material.specular, Material::default().specular);
}

#[test]
fn transform_steps_apply_last_first() {
    let json = r#"{
        "camera": { "width": 4, "height": 4, "field_of_view": 1.0,
                    "from": [0, 0, -5], "to": [0, 0, 0], "up": [0, 1, 0] },
        "light":  { "intensity": [1, 1, 1], "position": [0, 0, -10] },
        "shapes": [
            { "type": "sphere",
              "transform": [ { "translate": [10, 5, 7] },
                             { "scale": [5, 5, 5] },
                             { "rotate_x": 1.5707963267948966 } ] }
        ]
    }"#;

    let scene = Scene::from_json(json).unwrap();
    let t = *scene.world.objects[0].transform();

    assert_eq!(t * Tuple4D::point(1.0, 0.0, 1.0), Tuple4D::point(15.0, 0.0, 7.0));
}

#[test]
fn singular_shape_transform_names_the_shape() {
    let json = r#"{
        "camera": { "width": 4, "height": 4, "field_of_view": 1.0,
                    "from": [0, 0, -5], "to": [0, 0, 0], "up": [0, 1, 0] },
        "light":  { "intensity": [1, 1, 1], "position": [0, 0, -10] },
        "shapes": [
            { "type": "plane" },
            { "type": "sphere", "transform": [ { "scale": [1, 0, 1] } ] }
        ]
    }"#;

    let err = Scene::from_json(json).err().unwrap();

    assert!(err.to_string().starts_with("shape 1 (sphere): "));
}

#[test]
fn degenerate_camera_is_rejected() {
    let json = r#"{
        "camera": { "width": 4, "height": 4, "field_of_view": 1.0,
                    "from": [0, 0, 0], "to": [0, 0, 0], "up": [0, 1, 0] },
        "light":  { "intensity": [1, 1, 1], "position": [0, 0, -10] },
        "shapes": []
    }"#;

    let err = Scene::from_json(json).err().unwrap();

    assert!(err.to_string().starts_with("camera: "));
}

#[test]
fn malformed_json_is_rejected() {
    match Scene::from_json(r#"{ "camera": 3 }"#) {
        Err(TraceError::Json(_)) => (),
        _ => panic!("expected a JSON error"),
    }

    let unknown_shape = r#"{
        "camera": { "width": 4, "height": 4, "field_of_view": 1.0,
                    "from": [0, 0, -5], "to": [0, 0, 0], "up": [0, 1, 0] },
        "light":  { "intensity": [1, 1, 1], "position": [0, 0, -10] },
        "shapes": [ { "type": "teapot" } ]
    }"#;
    assert!(Scene::from_json(unknown_shape).is_err());
}

#[test]
fn recursion_depth_override() {
    let json = r#"{
        "camera": { "width": 4, "height": 4, "field_of_view": 1.0,
                    "from": [0, 0, -5], "to": [0, 0, 0], "up": [0, 1, 0] },
        "light":  { "intensity": [1, 1, 1], "position": [0, 0, -10] },
        "shapes": [],
        "recursion_depth": 2
    }"#;

    assert_eq!(Scene::from_json(json).unwrap().world.recursion_depth, 2);
}

#[test]
fn sphere_grid_layout() {
    let scene = Scene::sphere_grid(3, 16, 9).unwrap();
    let objects = &scene.world.objects;

    assert_eq!(objects.len(), 27);
    assert_eq!((scene.camera.hsize, scene.camera.vsize), (16, 9));
    assert_eq!(scene.world.light_source.position, Tuple4D::point(6.0, 6.0, -3.0));

    // The first sphere sits at the most negative corner.
    let first = &objects[0];
    assert_eq!(*first.transform() * Tuple4D::point(0.0, 0.0, 0.0),
        Tuple4D::point(-1.5, -1.5, -1.5));
    assert_eq!(first.material.color, Color::black());
    assert_eq!(first.material.transparency, 1.0);
    assert_eq!(first.material.reflective, 0.9);
    assert_eq!(first.material.refractive_index, 1.5);

    let last = &objects[26];
    assert_eq!(last.material.color, Color::rgb(2.0 / 3.0, 2.0 / 3.0, 2.0 / 3.0));
}

use crate::color::Color;
use crate::error::Result;
use crate::tuple::Tuple4D;

/// A point light: a color emitted from a single position.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct PointLight {
    pub intensity: Color,
    pub position: Tuple4D,
}

impl PointLight {
    /// Creates a point light.
    ///
    /// If `position` isn't a point, it is converted to a point automatically.
    pub fn new(intensity: Color, mut position: Tuple4D) -> PointLight {
        position.w = 1.0;

        PointLight { intensity, position }
    }
}

/// Surface attributes for the Phong reflection model, plus the reflection
/// and refraction coefficients.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Material {
    pub color: Color,

    pub ambient: f64,
    pub diffuse: f64,
    pub specular: f64,
    pub shininess: f64,

    pub reflective: f64,
    pub refractive_index: f64,
    pub transparency: f64,
}

impl Default for Material {
    fn default() -> Material {
        Material {
            color: Color::white(),

            ambient: 0.1,
            diffuse: 0.9,
            specular: 0.9,
            shininess: 200.0,

            reflective: 0.0,
            refractive_index: 1.0,
            transparency: 0.0,
        }
    }
}

/// Phong illumination of `point` as seen along `eyev`.
///
/// The ambient term is always present. Diffuse and specular are dropped when
/// the point is in shadow or the light is behind the surface; specular is
/// also dropped when the reflected light points away from the eye. Each
/// channel of the sum is clamped at zero, so negative material coefficients
/// never produce negative light.
///
/// Fails only if `point` coincides with the light position.
///
/// ```
/// # use brute_tracer::color::Color;
/// # use brute_tracer::tuple::Tuple4D;
/// # use brute_tracer::light::{ lighting, Material, PointLight };
/// let light = PointLight::new(Color::white(), Tuple4D::point(0.0, 0.0, -10.0));
/// let c = lighting(
///     &Material::default(), &light,
///     Tuple4D::point(0.0, 0.0, 0.0),
///     Tuple4D::vector(0.0, 0.0, -1.0),
///     Tuple4D::vector(0.0, 0.0, -1.0),
///     true,
/// ).unwrap();
/// assert_eq!(c, Color::rgb(0.1, 0.1, 0.1));
/// ```
pub fn lighting(m: &Material, light: &PointLight, point: Tuple4D,
    eyev: Tuple4D, normalv: Tuple4D, in_shadow: bool) -> Result<Color> {
    let effective_color = m.color * light.intensity;
    let ambient = effective_color * m.ambient;

    if in_shadow {
        return Ok(ambient.max(0.0));
    }

    let lightv = (light.position - point).normalize()?;

    // Light on the far side of the surface contributes nothing.
    let light_dot_normal = lightv.dot(&normalv);
    if light_dot_normal <= 0.0 {
        return Ok(ambient.max(0.0));
    }

    let diffuse = effective_color * m.diffuse * light_dot_normal;

    let reflectv = (-lightv).reflect(&normalv);
    let reflect_dot_eye = reflectv.dot(&eyev);

    let specular = if reflect_dot_eye <= 0.0 {
        Color::black()
    } else {
        light.intensity * m.specular * reflect_dot_eye.powf(m.shininess)
    };

    Ok((ambient + diffuse + specular).max(0.0))
}

#[cfg(test)]
fn front_light(position: Tuple4D) -> PointLight {
    PointLight::new(Color::white(), position)
}

#[test]
fn default_material() {
    let m = Material::default();

    assert_eq!(m.color, Color::white());
    assert_eq!(m.ambient, 0.1);
    assert_eq!(m.diffuse, 0.9);
    assert_eq!(m.specular, 0.9);
    assert_eq!(m.shininess, 200.0);
    assert_eq!(m.reflective, 0.0);
    assert_eq!(m.transparency, 0.0);
    assert_eq!(m.refractive_index, 1.0);
}

#[test]
fn light_position_is_a_point() {
    let l = PointLight::new(Color::white(), Tuple4D::vector(1.0, 2.0, 3.0));

    assert!(l.position.is_point());
}

#[test]
fn eye_between_light_and_surface() {
    let light = front_light(Tuple4D::point(0.0, 0.0, -10.0));
    let res = lighting(&Material::default(), &light,
        Tuple4D::point(0.0, 0.0, 0.0),
        Tuple4D::vector(0.0, 0.0, -1.0),
        Tuple4D::vector(0.0, 0.0, -1.0),
        false).unwrap();

    assert_eq!(res, Color::rgb(1.9, 1.9, 1.9));
}

#[test]
fn eye_between_light_and_surface_offset_45() {
    let light = front_light(Tuple4D::point(0.0, 0.0, -10.0));
    let k = 2.0f64.sqrt() / 2.0;
    let res = lighting(&Material::default(), &light,
        Tuple4D::point(0.0, 0.0, 0.0),
        Tuple4D::vector(0.0, k, k),
        Tuple4D::vector(0.0, 0.0, -1.0),
        false).unwrap();

    assert_eq!(res, Color::rgb(1.0, 1.0, 1.0));
}

#[test]
fn eye_opposite_from_surface_offset_45() {
    let light = front_light(Tuple4D::point(0.0, 10.0, -10.0));
    let res = lighting(&Material::default(), &light,
        Tuple4D::point(0.0, 0.0, 0.0),
        Tuple4D::vector(0.0, 0.0, -1.0),
        Tuple4D::vector(0.0, 0.0, -1.0),
        false).unwrap();

    assert_eq!(res, Color::rgb(0.7364, 0.7364, 0.7364));
}

#[test]
fn eye_in_path_of_reflection() {
    let light = front_light(Tuple4D::point(0.0, 10.0, -10.0));
    let k = 2.0f64.sqrt() / 2.0;
    let res = lighting(&Material::default(), &light,
        Tuple4D::point(0.0, 0.0, 0.0),
        Tuple4D::vector(0.0, -k, -k),
        Tuple4D::vector(0.0, 0.0, -1.0),
        false).unwrap();

    assert_eq!(res, Color::rgb(1.6364, 1.6364, 1.6364));
}

#[test]
fn light_behind_surface() {
    let light = front_light(Tuple4D::point(0.0, 0.0, 10.0));
    let res = lighting(&Material::default(), &light,
        Tuple4D::point(0.0, 0.0, 0.0),
        Tuple4D::vector(0.0, 0.0, -1.0),
        Tuple4D::vector(0.0, 0.0, -1.0),
        false).unwrap();

    assert_eq!(res, Color::rgb(0.1, 0.1, 0.1));
}

#[test]
fn surface_in_shadow() {
    let light = front_light(Tuple4D::point(0.0, 0.0, -10.0));
    let res = lighting(&Material::default(), &light,
        Tuple4D::point(0.0, 0.0, 0.0),
        Tuple4D::vector(0.0, 0.0, -1.0),
        Tuple4D::vector(0.0, 0.0, -1.0),
        true).unwrap();

    assert_eq!(res, Color::rgb(0.1, 0.1, 0.1));
}

#[test]
fn lighting_tints_by_material_and_light() {
    let m = Material { color: Color::rgb(1.0, 0.5, 0.0), ..Default::default() };
    let light = PointLight::new(
        Color::rgb(0.5, 1.0, 1.0), Tuple4D::point(0.0, 0.0, -10.0)
    );
    let res = lighting(&m, &light,
        Tuple4D::point(0.0, 0.0, 0.0),
        Tuple4D::vector(0.0, 0.0, -1.0),
        Tuple4D::vector(0.0, 0.0, -1.0),
        true).unwrap();

    assert_eq!(res, Color::rgb(0.05, 0.05, 0.0));
}

#[test]
fn point_at_light_fails() {
    let light = front_light(Tuple4D::point(0.0, 0.0, 0.0));
    let res = lighting(&Material::default(), &light,
        Tuple4D::point(0.0, 0.0, 0.0),
        Tuple4D::vector(0.0, 0.0, -1.0),
        Tuple4D::vector(0.0, 0.0, -1.0),
        false);

    assert!(res.is_err());
}

#[test]
fn negative_coefficients_clamp_to_black() {
    let light = front_light(Tuple4D::point(0.0, 0.0, -10.0));
    let m = Material { ambient: -0.5, diffuse: -0.9, ..Default::default() };

    let point = Tuple4D::point(0.0, 0.0, 0.0);
    let eyev = Tuple4D::vector(0.0, 0.0, -1.0);
    let normalv = Tuple4D::vector(0.0, 0.0, -1.0);

    let shadowed = lighting(&m, &light, point, eyev, normalv, true).unwrap();
    assert_eq!(shadowed, Color::black());

    // Diffuse and ambient are negative, specular (0.9) is not.
    let lit = lighting(&m, &light, point, eyev, normalv, false).unwrap();
    assert_eq!(lit, Color::rgb(0.0, 0.0, 0.0));
    assert!(lit.r >= 0.0 && lit.g >= 0.0 && lit.b >= 0.0);
}

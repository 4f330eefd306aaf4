use crate::ray::Ray4D;
use crate::tuple::Tuple4D;
use crate::color::Color;
use crate::consts::DEFAULT_RECURSION_DEPTH;
use crate::error::Result;
use crate::light::{ PointLight, lighting };
use crate::shape::Shape;
use crate::intersect::{ Intersections, IntersectionComputation };

/// A world: the shapes to render and the light illuminating them.
///
/// A world is never mutated while rendering; workers share it as `&World`.
#[derive(Clone, Debug)]
pub struct World {
    pub objects: Vec<Shape>,
    pub light_source: PointLight,

    /// How many reflection/refraction bounces `color_at` follows.
    pub recursion_depth: usize,
}

/// An empty world lit by a white light at `(-10, 10, -10)`.
impl Default for World {
    fn default() -> World {
        World {
            objects: Vec::new(),
            light_source: PointLight::new(
                Color::white(),
                Tuple4D::point(-10.0, 10.0, -10.0)
            ),
            recursion_depth: DEFAULT_RECURSION_DEPTH,
        }
    }
}

impl World {
    pub fn new(light_source: PointLight) -> World {
        World { light_source, ..Default::default() }
    }

    pub fn add_shape(&mut self, shape: Shape) {
        self.objects.push(shape);
    }

    /// Intersects a ray against every object, sorted by `t`.
    pub fn intersect(&self, r: &Ray4D) -> Intersections {
        Intersections::aggregate(self.objects.iter().map(|obj| obj.intersect(r)))
    }

    /// Whether anything sits between `p` and the light.
    ///
    /// Only hits strictly closer than the light count; objects behind the
    /// light or behind `p` do not cast shadows on it.
    pub fn is_shadowed(&self, p: Tuple4D) -> Result<bool> {
        let v = self.light_source.position - p;
        let distance = v.magnitude();
        let direction = v.normalize()?;

        let r = Ray4D::new(p, direction);

        Ok(match self.intersect(&r).hit() {
            Some(i) => i.t < distance,
            None => false,
        })
    }

    /// The color at a hit: local illumination plus whatever the surface
    /// reflects and transmits, with `remaining` bounces left.
    ///
    /// Shadows are tested from `over_point` so a surface never shadows
    /// itself.
    pub fn shade_hit(&self, comps: &IntersectionComputation, remaining: usize)
        -> Result<Color> {
        let material = &comps.obj.material;
        let shadowed = self.is_shadowed(comps.over_point)?;

        let surface = lighting(material, &self.light_source,
            comps.point, comps.eyev, comps.normalv, shadowed)?;

        let reflected = self.reflected_color(comps, remaining)?;
        let refracted = self.refracted_color(comps, remaining)?;

        if material.reflective > 0.0 && material.transparency > 0.0 {
            let reflectance = comps.schlick();
            Ok(surface
                + reflected * reflectance
                + refracted * (1.0 - reflectance))
        } else {
            Ok(surface + reflected + refracted)
        }
    }

    /// Follows the reflected ray from a hit.
    ///
    /// Black for non-reflective surfaces or when no bounces remain.
    pub fn reflected_color(&self, comps: &IntersectionComputation,
        remaining: usize) -> Result<Color> {
        let reflective = comps.obj.material.reflective;
        if remaining == 0 || reflective == 0.0 {
            return Ok(Color::black());
        }

        let reflect_ray = Ray4D::new(comps.over_point, comps.reflectv);
        let color = self.color_at_depth(&reflect_ray, remaining - 1)?;

        Ok(color * reflective)
    }

    /// Follows the refracted ray through a hit (Snell's law).
    ///
    /// Black for opaque surfaces, when no bounces remain, or under total
    /// internal reflection.
    pub fn refracted_color(&self, comps: &IntersectionComputation,
        remaining: usize) -> Result<Color> {
        let transparency = comps.obj.material.transparency;
        if remaining == 0 || transparency == 0.0 {
            return Ok(Color::black());
        }

        let n_ratio = comps.n1 / comps.n2;
        let cos_i = comps.eyev.dot(&comps.normalv);
        let sin2_t = n_ratio.powi(2) * (1.0 - cos_i.powi(2));

        if sin2_t > 1.0 {
            return Ok(Color::black());
        }

        let cos_t = (1.0 - sin2_t).sqrt();
        let direction = comps.normalv * (n_ratio * cos_i - cos_t)
            - comps.eyev * n_ratio;

        let refract_ray = Ray4D::new(comps.under_point, direction);
        let color = self.color_at_depth(&refract_ray, remaining - 1)?;

        Ok(color * transparency)
    }

    /// The color seen along `r`; black if it escapes.
    pub fn color_at(&self, r: &Ray4D) -> Result<Color> {
        self.color_at_depth(r, self.recursion_depth)
    }

    /// `color_at` with an explicit bounce budget.
    pub fn color_at_depth(&self, r: &Ray4D, remaining: usize) -> Result<Color> {
        let xs = self.intersect(r);

        match xs.hit() {
            None => Ok(Color::black()),
            Some(hit) => {
                let comps = IntersectionComputation::new(r, &hit, &xs)?;
                self.shade_hit(&comps, remaining)
            },
        }
    }
}

/// Two concentric spheres: a unit sphere with a green-ish material and a
/// plain sphere of radius 0.5 inside it.
#[cfg(test)]
pub(crate) fn test_world() -> World {
    let mut outer = Shape::sphere();
    outer.material.color = Color::rgb(0.8, 1.0, 0.6);
    outer.material.diffuse = 0.7;
    outer.material.specular = 0.2;

    let inner = Shape::sphere()
        .with_transform(Matrix4D::scaling(0.5, 0.5, 0.5))
        .unwrap();

    let mut w = World::default();
    w.add_shape(outer);
    w.add_shape(inner);

    w
}

#[cfg(test)]
use crate::matrix::Matrix4D;
#[cfg(test)]
use crate::intersect::Intersection;
#[cfg(test)]
use crate::error::TraceError;

#[test]
fn empty_world() {
    let w = World::default();

    assert!(w.objects.is_empty());
    assert_eq!(w.light_source.position, Tuple4D::point(-10.0, 10.0, -10.0));
    assert_eq!(w.recursion_depth, DEFAULT_RECURSION_DEPTH);
}

#[test]
fn intersect_world_with_ray() {
    let w = test_world();
    let r = Ray4D::new(
        Tuple4D::point(0.0, 0.0, -5.0),
        Tuple4D::vector(0.0, 0.0, 1.0),
    );

    let ts: Vec<f64> = w.intersect(&r).intersections.iter()
        .map(|i| i.t)
        .collect();

    assert_eq!(ts, vec![4.0, 4.5, 5.5, 6.0]);
}

#[test]
fn shade_intersection_from_outside() {
    let w = test_world();
    let r = Ray4D::new(
        Tuple4D::point(0.0, 0.0, -5.0),
        Tuple4D::vector(0.0, 0.0, 1.0)
    );

    let i = Intersection::new(4.0, &w.objects[0]);
    let xs = Intersections { intersections: vec![i] };
    let comps = IntersectionComputation::new(&r, &i, &xs).unwrap();

    assert_eq!(w.shade_hit(&comps, 5).unwrap(),
        Color::rgb(0.38066, 0.47583, 0.2855));
}

#[test]
fn shade_intersection_from_inside() {
    let mut w = test_world();
    w.light_source = PointLight::new(
        Color::white(),
        Tuple4D::point(0.0, 0.25, 0.0),
    );

    let r = Ray4D::new(
        Tuple4D::point(0.0, 0.0, 0.0),
        Tuple4D::vector(0.0, 0.0, 1.0),
    );

    let i = Intersection::new(0.5, &w.objects[1]);
    let xs = Intersections { intersections: vec![i] };
    let comps = IntersectionComputation::new(&r, &i, &xs).unwrap();

    assert_eq!(w.shade_hit(&comps, 5).unwrap(),
        Color::rgb(0.90498, 0.90498, 0.90498));
}

#[test]
fn shade_intersection_in_shadow() {
    let mut w = World::new(PointLight::new(
        Color::white(),
        Tuple4D::point(0.0, 0.0, -10.0),
    ));
    w.add_shape(Shape::sphere());
    w.add_shape(Shape::sphere()
        .with_transform(Matrix4D::translation(0.0, 0.0, 10.0))
        .unwrap());

    let r = Ray4D::new(
        Tuple4D::point(0.0, 0.0, 5.0),
        Tuple4D::vector(0.0, 0.0, 1.0),
    );

    let i = Intersection::new(4.0, &w.objects[1]);
    let xs = Intersections { intersections: vec![i] };
    let comps = IntersectionComputation::new(&r, &i, &xs).unwrap();

    assert_eq!(w.shade_hit(&comps, 5).unwrap(), Color::rgb(0.1, 0.1, 0.1));
}

#[test]
fn color_ray_miss() {
    let w = test_world();
    let r = Ray4D::new(
        Tuple4D::point(0.0, 0.0, -5.0),
        Tuple4D::vector(0.0, 1.0, 0.0),
    );

    assert_eq!(w.color_at(&r).unwrap(), Color::black());
}

#[test]
fn color_ray_hit() {
    let w = test_world();
    let r = Ray4D::new(
        Tuple4D::point(0.0, 0.0, -5.0),
        Tuple4D::vector(0.0, 0.0, 1.0),
    );

    assert_eq!(w.color_at(&r).unwrap(), Color::rgb(0.38066, 0.47583, 0.2855));
}

#[test]
fn color_is_deterministic() {
    let w = test_world();
    let r = Ray4D::new(
        Tuple4D::point(0.3, -0.2, -5.0),
        Tuple4D::vector(0.01, 0.05, 1.0),
    );

    let c1 = w.color_at(&r).unwrap();
    let c2 = w.color_at(&r).unwrap();

    assert_eq!(c1.r.to_bits(), c2.r.to_bits());
    assert_eq!(c1.g.to_bits(), c2.g.to_bits());
    assert_eq!(c1.b.to_bits(), c2.b.to_bits());
}

#[test]
fn color_behind_ray() {
    let mut w = test_world();
    w.objects[0].material.ambient = 1.0;
    w.objects[1].material.ambient = 1.0;

    let r = Ray4D::new(
        Tuple4D::point(0.0, 0.0, 0.75),
        Tuple4D::vector(0.0, 0.0, -1.0)
    );

    assert_eq!(w.color_at(&r).unwrap(), w.objects[1].material.color);
}

#[test]
fn shadow_collinear_point_and_light() {
    let w = test_world();

    assert!(!w.is_shadowed(Tuple4D::point(0.0, 10.0, 0.0)).unwrap());
}

#[test]
fn shadow_object_between_point_and_light() {
    let w = test_world();

    assert!(w.is_shadowed(Tuple4D::point(10.0, -10.0, 10.0)).unwrap());
}

#[test]
fn shadow_object_behind_light() {
    let w = test_world();

    assert!(!w.is_shadowed(Tuple4D::point(-20.0, 20.0, -20.0)).unwrap());
}

#[test]
fn shadow_test_at_light_position_fails() {
    let w = test_world();
    let at_light = w.light_source.position;

    assert!(matches!(w.is_shadowed(at_light),
        Err(TraceError::InvalidNormalize(_))));
}

#[test]
fn shadow_object_behind_point() {
    let w = test_world();

    assert!(!w.is_shadowed(Tuple4D::point(-2.0, 2.0, -2.0)).unwrap());
}

#[test]
fn reflected_color_of_nonreflective_material() {
    let mut w = test_world();
    w.objects[1].material.ambient = 1.0;

    let r = Ray4D::new(
        Tuple4D::point(0.0, 0.0, 0.0),
        Tuple4D::vector(0.0, 0.0, 1.0)
    );
    let i = Intersection::new(1.0, &w.objects[1]);
    let xs = Intersections { intersections: vec![i] };
    let comps = IntersectionComputation::new(&r, &i, &xs).unwrap();

    assert_eq!(w.reflected_color(&comps, 5).unwrap(), Color::black());
}

#[cfg(test)]
fn world_with_reflective_floor() -> World {
    let mut w = test_world();
    let mut floor = Shape::plane()
        .with_transform(Matrix4D::translation(0.0, -1.0, 0.0))
        .unwrap();
    floor.material.reflective = 0.5;
    w.add_shape(floor);

    w
}

#[test]
fn reflected_color_of_reflective_material() {
    let w = world_with_reflective_floor();
    let k = 2.0f64.sqrt() / 2.0;
    let r = Ray4D::new(
        Tuple4D::point(0.0, 0.0, -3.0),
        Tuple4D::vector(0.0, -k, k)
    );
    let i = Intersection::new(2.0f64.sqrt(), &w.objects[2]);
    let xs = Intersections { intersections: vec![i] };
    let comps = IntersectionComputation::new(&r, &i, &xs).unwrap();

    assert_eq!(w.reflected_color(&comps, 5).unwrap(),
        Color::rgb(0.19032, 0.2379, 0.14274));
    assert_eq!(w.shade_hit(&comps, 5).unwrap(),
        Color::rgb(0.87677, 0.92436, 0.82918));
}

#[test]
fn reflected_color_with_no_bounces_left() {
    let w = world_with_reflective_floor();
    let k = 2.0f64.sqrt() / 2.0;
    let r = Ray4D::new(
        Tuple4D::point(0.0, 0.0, -3.0),
        Tuple4D::vector(0.0, -k, k)
    );
    let i = Intersection::new(2.0f64.sqrt(), &w.objects[2]);
    let xs = Intersections { intersections: vec![i] };
    let comps = IntersectionComputation::new(&r, &i, &xs).unwrap();

    assert_eq!(w.reflected_color(&comps, 0).unwrap(), Color::black());
}

#[test]
fn mutually_reflective_surfaces_terminate() {
    let mut w = World::new(PointLight::new(
        Color::white(), Tuple4D::point(0.0, 0.0, 0.0)
    ));

    let mut lower = Shape::plane()
        .with_transform(Matrix4D::translation(0.0, -1.0, 0.0))
        .unwrap();
    lower.material.reflective = 1.0;

    let mut upper = Shape::plane()
        .with_transform(Matrix4D::translation(0.0, 1.0, 0.0))
        .unwrap();
    upper.material.reflective = 1.0;

    w.add_shape(lower);
    w.add_shape(upper);

    let r = Ray4D::new(
        Tuple4D::point(0.0, 0.0, 0.0),
        Tuple4D::vector(0.0, 1.0, 0.0)
    );

    let c = w.color_at(&r).unwrap();
    assert!(c.is_finite());
}

#[test]
fn refracted_color_of_opaque_surface() {
    let w = test_world();
    let r = Ray4D::new(
        Tuple4D::point(0.0, 0.0, -5.0),
        Tuple4D::vector(0.0, 0.0, 1.0)
    );
    let xs = Intersections {
        intersections: vec![
            Intersection::new(4.0, &w.objects[0]),
            Intersection::new(6.0, &w.objects[0]),
        ]
    };
    let comps = IntersectionComputation::new(&r, &xs.intersections[0], &xs)
        .unwrap();

    assert_eq!(w.refracted_color(&comps, 5).unwrap(), Color::black());
}

#[test]
fn refracted_color_with_no_bounces_left() {
    let mut w = test_world();
    w.objects[0].material.transparency = 1.0;
    w.objects[0].material.refractive_index = 1.5;

    let r = Ray4D::new(
        Tuple4D::point(0.0, 0.0, -5.0),
        Tuple4D::vector(0.0, 0.0, 1.0)
    );
    let xs = Intersections {
        intersections: vec![
            Intersection::new(4.0, &w.objects[0]),
            Intersection::new(6.0, &w.objects[0]),
        ]
    };
    let comps = IntersectionComputation::new(&r, &xs.intersections[0], &xs)
        .unwrap();

    assert_eq!(w.refracted_color(&comps, 0).unwrap(), Color::black());
}

#[test]
fn refracted_color_under_total_internal_reflection() {
    let mut w = test_world();
    w.objects[0].material.transparency = 1.0;
    w.objects[0].material.refractive_index = 1.5;

    let k = 2.0f64.sqrt() / 2.0;
    let r = Ray4D::new(
        Tuple4D::point(0.0, 0.0, k),
        Tuple4D::vector(0.0, 1.0, 0.0)
    );
    let xs = Intersections {
        intersections: vec![
            Intersection::new(-k, &w.objects[0]),
            Intersection::new(k, &w.objects[0]),
        ]
    };
    let comps = IntersectionComputation::new(&r, &xs.intersections[1], &xs)
        .unwrap();

    assert_eq!(w.refracted_color(&comps, 5).unwrap(), Color::black());
}

#[cfg(test)]
fn world_with_glass_floor(reflective: f64) -> World {
    let mut w = test_world();

    let mut floor = Shape::plane()
        .with_transform(Matrix4D::translation(0.0, -1.0, 0.0))
        .unwrap();
    floor.material.reflective = reflective;
    floor.material.transparency = 0.5;
    floor.material.refractive_index = 1.5;

    let mut ball = Shape::sphere()
        .with_transform(Matrix4D::translation(0.0, -3.5, -0.5))
        .unwrap();
    ball.material.color = Color::rgb(1.0, 0.0, 0.0);
    ball.material.ambient = 0.5;

    w.add_shape(floor);
    w.add_shape(ball);

    w
}

#[test]
fn shade_hit_with_transparent_material() {
    let w = world_with_glass_floor(0.0);
    let k = 2.0f64.sqrt() / 2.0;
    let r = Ray4D::new(
        Tuple4D::point(0.0, 0.0, -3.0),
        Tuple4D::vector(0.0, -k, k)
    );
    let i = Intersection::new(2.0f64.sqrt(), &w.objects[2]);
    let xs = Intersections { intersections: vec![i] };
    let comps = IntersectionComputation::new(&r, &i, &xs).unwrap();

    assert_eq!(w.shade_hit(&comps, 5).unwrap(),
        Color::rgb(0.93642, 0.68642, 0.68642));
}

#[test]
fn shade_hit_with_reflective_transparent_material() {
    let w = world_with_glass_floor(0.5);
    let k = 2.0f64.sqrt() / 2.0;
    let r = Ray4D::new(
        Tuple4D::point(0.0, 0.0, -3.0),
        Tuple4D::vector(0.0, -k, k)
    );
    let i = Intersection::new(2.0f64.sqrt(), &w.objects[2]);
    let xs = Intersections { intersections: vec![i] };
    let comps = IntersectionComputation::new(&r, &i, &xs).unwrap();

    assert_eq!(w.shade_hit(&comps, 5).unwrap(),
        Color::rgb(0.93391, 0.69643, 0.69243));
}

#[test]
fn opaque_world_ignores_bounce_budget() {
    let w = test_world();
    let r = Ray4D::new(
        Tuple4D::point(0.0, 0.0, -5.0),
        Tuple4D::vector(0.0, 0.0, 1.0),
    );

    assert_eq!(w.color_at_depth(&r, 0).unwrap(), w.color_at(&r).unwrap());
}

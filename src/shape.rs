use crate::consts::EPSILON;
use crate::error::Result;
use crate::tuple::Tuple4D;
use crate::ray::Ray4D;
use crate::light::Material;
use crate::matrix::Matrix4D;
use crate::intersect::{ Intersection, Intersections };

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ShapeType {
    /// A unit sphere with its center at the object-space origin.
    Sphere,

    /// The XZ plane, normal pointing up along Y.
    Plane,
}

/// A primitive placed in the world.
///
/// The transform is private so the cached inverse can never go stale; it is
/// only recomputed by `set_transform`, never per ray.
#[derive(Debug, Clone)]
pub struct Shape {
    pub ty: ShapeType,
    pub material: Material,

    transform: Matrix4D,
    inverse: Matrix4D,
}

/// Two shapes are equal if their type, transform and material match.
impl PartialEq for Shape {
    fn eq(&self, other: &Self) -> bool {
        self.ty == other.ty
            && self.transform == other.transform
            && self.material == other.material
    }
}

impl Shape {
    fn new(ty: ShapeType) -> Shape {
        Shape {
            ty,
            material: Default::default(),
            transform: Matrix4D::identity(),
            inverse: Matrix4D::identity(),
        }
    }

    /// Creates a unit sphere with identity transform and default material.
    pub fn sphere() -> Shape {
        Self::new(ShapeType::Sphere)
    }

    /// Creates a plane with a normal pointing up along the Y axis.
    pub fn plane() -> Shape {
        Self::new(ShapeType::Plane)
    }

    /// Returns a reference to the object-to-world transform.
    pub fn transform(&self) -> &Matrix4D {
        &self.transform
    }

    /// Returns the cached world-to-object transform.
    pub fn inverse(&self) -> &Matrix4D {
        &self.inverse
    }

    /// Sets the transform, recomputing the cached inverse.
    ///
    /// On a singular `transform` the shape is left untouched.
    pub fn set_transform(&mut self, transform: Matrix4D) -> Result<()> {
        self.inverse = transform.inverse()?;
        self.transform = transform;

        Ok(())
    }

    /// Builder-style `set_transform`.
    ///
    /// ```
    /// # use brute_tracer::shape::Shape;
    /// # use brute_tracer::matrix::Matrix4D;
    /// let s = Shape::sphere()
    ///     .with_transform(Matrix4D::scaling(2.0, 2.0, 2.0))
    ///     .unwrap();
    /// assert_eq!(*s.inverse(), Matrix4D::scaling(0.5, 0.5, 0.5));
    ///
    /// assert!(Shape::sphere()
    ///     .with_transform(Matrix4D::scaling(0.0, 1.0, 1.0))
    ///     .is_err());
    /// ```
    pub fn with_transform(mut self, transform: Matrix4D) -> Result<Shape> {
        self.set_transform(transform)?;
        Ok(self)
    }

    pub fn with_material(mut self, material: Material) -> Shape {
        self.material = material;
        self
    }

    /// Intersects a world-space ray with this shape.
    ///
    /// The ray is moved into object space with the cached inverse, then
    /// handed to `local_intersect`. The returned `t` values are valid for the
    /// world-space ray since the direction is not renormalized.
    pub fn intersect(&self, ray: &Ray4D) -> Intersections {
        self.local_intersect(&ray.transform(&self.inverse))
    }

    /// Intersects an object-space ray with this shape.
    pub fn local_intersect(&self, ray: &Ray4D) -> Intersections {
        match self.ty {
            ShapeType::Sphere => self.intersect_sphere(ray),
            ShapeType::Plane => self.intersect_plane(ray),
        }
    }

    /// The world-space surface normal at `world_point`.
    ///
    /// Normals go back to world space through the transpose of the inverse,
    /// which keeps them perpendicular under non-uniform scaling.
    pub fn normal_at(&self, world_point: Tuple4D) -> Result<Tuple4D> {
        let local_point = self.inverse * world_point;
        let local_normal = self.local_normal_at(&local_point);

        let mut world_normal = self.inverse.transposition() * local_normal;
        world_normal.w = 0.0;
        world_normal.normalize()
    }

    /// The object-space normal at `at`; not normalized.
    pub fn local_normal_at(&self, at: &Tuple4D) -> Tuple4D {
        match self.ty {
            ShapeType::Sphere => Tuple4D { w: 0.0, ..*at },
            ShapeType::Plane => Tuple4D::vector(0.0, 1.0, 0.0),
        }
    }

    /// Either no intersections, or two (equal when the ray is tangent).
    fn intersect_sphere(&self, ray: &Ray4D) -> Intersections {
        // Subtracting the origin point drops the ray origin's `w`.
        let sphere_to_ray = ray.origin - Tuple4D::point(0.0, 0.0, 0.0);

        let a = ray.direction.dot(&ray.direction);
        let b = 2.0 * ray.direction.dot(&sphere_to_ray);
        let c = sphere_to_ray.dot(&sphere_to_ray) - 1.0;

        let discriminant = b.powi(2) - (4.0 * a * c);

        if discriminant < 0.0 {
            return Intersections::new()
        }

        let t1 = (-b - discriminant.sqrt()) / (2.0 * a);
        let t2 = (-b + discriminant.sqrt()) / (2.0 * a);

        Intersections {
            intersections: vec![
                Intersection::new(t1, self),
                Intersection::new(t2, self),
            ]
        }
    }

    fn intersect_plane(&self, ray: &Ray4D) -> Intersections {
        // Parallel or coplanar rays never register a hit.
        if ray.direction.y.abs() < EPSILON {
            return Intersections::new();
        }

        let t = -ray.origin.y / ray.direction.y;

        Intersections { intersections: vec![Intersection::new(t, self)] }
    }
}

#[test]
fn default_sphere_transform() {
    let s = Shape::sphere();

    assert_eq!(*s.transform(), Matrix4D::identity());
    assert_eq!(*s.inverse(), Matrix4D::identity());
}

#[test]
fn set_transform_caches_inverse() {
    let mut s = Shape::sphere();
    let t = Matrix4D::translation(2.0, 3.0, 4.0);
    s.set_transform(t).unwrap();

    assert_eq!(*s.transform(), t);
    assert_eq!(*s.inverse(), Matrix4D::translation(-2.0, -3.0, -4.0));
}

#[test]
fn singular_transform_rejected() {
    let mut s = Shape::sphere();
    let t = Matrix4D::translation(1.0, 0.0, 0.0);
    s.set_transform(t).unwrap();

    assert!(s.set_transform(Matrix4D::scaling(1.0, 0.0, 1.0)).is_err());
    assert_eq!(*s.transform(), t);
}

#[test]
fn ray_intersects_sphere_twice() {
    let r = Ray4D::new(
        Tuple4D::point(0.0, 0.0, -5.0),
        Tuple4D::vector(0.0, 0.0, 1.0)
    );
    let s = Shape::sphere();
    let xs = s.intersect(&r);

    assert_eq!(xs.intersections.len(), 2);
    assert_eq!(xs.intersections[0].t, 4.0);
    assert_eq!(xs.intersections[1].t, 6.0);
}

#[test]
fn ray_is_tangent_to_sphere() {
    let r = Ray4D::new(
        Tuple4D::point(0.0, 1.0, -5.0),
        Tuple4D::vector(0.0, 0.0, 1.0)
    );
    let s = Shape::sphere();
    let xs = s.intersect(&r);

    assert_eq!(xs.intersections.len(), 2);
    assert_eq!(xs.intersections[0].t, 5.0);
    assert_eq!(xs.intersections[1].t, 5.0);
}

#[test]
fn ray_misses_sphere() {
    let r = Ray4D::new(
        Tuple4D::point(0.0, 2.0, -5.0),
        Tuple4D::vector(0.0, 0.0, 1.0)
    );

    assert!(Shape::sphere().intersect(&r).intersections.is_empty());
}

#[test]
fn ray_is_inside_sphere() {
    let r = Ray4D::new(
        Tuple4D::point(0.0, 0.0, 0.0),
        Tuple4D::vector(0.0, 0.0, 1.0)
    );
    let s = Shape::sphere();
    let xs = s.intersect(&r);

    assert_eq!(xs.intersections.len(), 2);
    assert_eq!(xs.intersections[0].t, -1.0);
    assert_eq!(xs.intersections[1].t, 1.0);
}

#[test]
fn sphere_is_behind_ray() {
    let r = Ray4D::new(
        Tuple4D::point(0.0, 0.0, 5.0),
        Tuple4D::vector(0.0, 0.0, 1.0)
    );
    let s = Shape::sphere();
    let xs = s.intersect(&r);

    assert_eq!(xs.intersections.len(), 2);
    assert_eq!(xs.intersections[0].t, -6.0);
    assert_eq!(xs.intersections[1].t, -4.0);
}

#[test]
fn intersections_reference_the_shape() {
    let r = Ray4D::new(
        Tuple4D::point(0.0, 0.0, -5.0),
        Tuple4D::vector(0.0, 0.0, 1.0)
    );
    let s = Shape::sphere();
    let xs = s.intersect(&r);

    assert!(xs.intersections.iter().all(|i| std::ptr::eq(i.what, &s)));
}

#[test]
fn intersect_scaled_sphere() {
    let r = Ray4D::new(
        Tuple4D::point(0.0, 0.0, -5.0),
        Tuple4D::vector(0.0, 0.0, 1.0)
    );
    let s = Shape::sphere()
        .with_transform(Matrix4D::scaling(2.0, 2.0, 2.0))
        .unwrap();
    let xs = s.intersect(&r);

    assert_eq!(xs.intersections.len(), 2);
    assert_eq!(xs.intersections[0].t, 3.0);
    assert_eq!(xs.intersections[1].t, 7.0);
}

#[test]
fn intersect_translated_sphere() {
    let r = Ray4D::new(
        Tuple4D::point(0.0, 0.0, -5.0),
        Tuple4D::vector(0.0, 0.0, 1.0)
    );
    let s = Shape::sphere()
        .with_transform(Matrix4D::translation(5.0, 0.0, 0.0))
        .unwrap();

    assert!(s.intersect(&r).intersections.is_empty());
}

#[test]
fn normal_on_sphere_axes() {
    let s = Shape::sphere();

    assert_eq!(s.normal_at(Tuple4D::point(1.0, 0.0, 0.0)).unwrap(),
        Tuple4D::vector(1.0, 0.0, 0.0));
    assert_eq!(s.normal_at(Tuple4D::point(0.0, 1.0, 0.0)).unwrap(),
        Tuple4D::vector(0.0, 1.0, 0.0));
    assert_eq!(s.normal_at(Tuple4D::point(0.0, 0.0, 1.0)).unwrap(),
        Tuple4D::vector(0.0, 0.0, 1.0));
}

#[test]
fn normal_on_sphere_nonaxial() {
    let s = Shape::sphere();
    let k = 3.0f64.sqrt() / 3.0;
    let n = s.normal_at(Tuple4D::point(k, k, k)).unwrap();

    assert_eq!(n, Tuple4D::vector(k, k, k));
    assert_eq!(n, n.normalize().unwrap());
}

#[test]
fn normal_on_translated_sphere() {
    let s = Shape::sphere()
        .with_transform(Matrix4D::translation(0.0, 1.0, 0.0))
        .unwrap();
    let n = s.normal_at(Tuple4D::point(0.0, 1.70711, -0.70711)).unwrap();

    assert_eq!(n, Tuple4D::vector(0.0, 0.70711, -0.70711));
}

#[test]
fn normal_on_transformed_sphere() {
    let s = Shape::sphere()
        .with_transform(Matrix4D::scaling(1.0, 0.5, 1.0)
            * Matrix4D::rotation_z(std::f64::consts::PI / 5.0))
        .unwrap();
    let p = Tuple4D::point(0.0, 2.0f64.sqrt() / 2.0, -(2.0f64.sqrt()) / 2.0);

    assert_eq!(s.normal_at(p).unwrap(), Tuple4D::vector(0.0, 0.97014, -0.24254));
}

#[test]
fn normal_on_plane_is_constant() {
    let p = Shape::plane();

    for at in [
        Tuple4D::point(0.0, 0.0, 0.0),
        Tuple4D::point(10.0, 0.0, -10.0),
        Tuple4D::point(-5.0, 0.0, 150.0),
    ].iter() {
        assert_eq!(p.local_normal_at(at), Tuple4D::vector(0.0, 1.0, 0.0));
    }
}

#[test]
fn ray_parallel_to_plane() {
    let p = Shape::plane();
    let parallel = Ray4D::new(
        Tuple4D::point(0.0, 10.0, 0.0),
        Tuple4D::vector(0.0, 0.0, 1.0)
    );
    let coplanar = Ray4D::new(
        Tuple4D::point(0.0, 0.0, 0.0),
        Tuple4D::vector(0.0, 0.0, 1.0)
    );

    assert!(p.local_intersect(&parallel).intersections.is_empty());
    assert!(p.local_intersect(&coplanar).intersections.is_empty());
}

#[test]
fn ray_intersecting_plane_from_above() {
    let p = Shape::plane();
    let r = Ray4D::new(
        Tuple4D::point(0.0, 1.0, 0.0),
        Tuple4D::vector(0.0, -1.0, 0.0)
    );
    let xs = p.local_intersect(&r);

    assert_eq!(xs.intersections.len(), 1);
    assert_eq!(xs.intersections[0].t, 1.0);
}

#[test]
fn ray_intersecting_plane_from_below() {
    let p = Shape::plane();
    let r = Ray4D::new(
        Tuple4D::point(0.0, -1.0, 0.0),
        Tuple4D::vector(0.0, 1.0, 0.0)
    );
    let xs = p.local_intersect(&r);

    assert_eq!(xs.intersections.len(), 1);
    assert_eq!(xs.intersections[0].t, 1.0);
}

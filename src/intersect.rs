use crate::consts::{ EPSILON, VACUUM_RI };
use crate::error::Result;
use crate::tuple::Tuple4D;
use crate::ray::Ray4D;
use crate::shape::Shape;

/// A ray/shape intersection.
///
/// `t` is the offset along the ray which produced the intersection; `what` is
/// the shape that was hit.
#[derive(Copy, Clone, Debug)]
pub struct Intersection<'a> {
    pub t: f64,
    pub what: &'a Shape,
}

/// Two intersections are equal if their offsets match and they refer to the
/// *same* shape (pointer identity, not value equality).
impl<'a> PartialEq for Intersection<'a> {
    fn eq(&self, other: &Intersection<'a>) -> bool {
        self.t == other.t && std::ptr::eq(self.what, other.what)
    }
}

impl<'a> Intersection<'a> {
    pub fn new(t: f64, what: &'a Shape) -> Intersection<'a> {
        Intersection { t, what }
    }
}

/// An unordered collection of intersections.
#[derive(Clone, Debug, Default)]
pub struct Intersections<'a> {
    pub intersections: Vec<Intersection<'a>>,
}

impl<'a> Intersections<'a> {
    pub fn new() -> Intersections<'a> {
        Intersections { intersections: Vec::new() }
    }

    /// Gathers several lists into one, sorted by `t`.
    pub fn aggregate<I>(lists: I) -> Intersections<'a>
        where I: IntoIterator<Item = Intersections<'a>> {
        let mut all = Intersections {
            intersections: lists.into_iter()
                .flat_map(|l| l.intersections)
                .collect(),
        };
        all.sort();

        all
    }

    /// The visible intersection: the one with the smallest non-negative,
    /// finite `t`.
    ///
    /// Does not depend on the order of the list. Returns `None` when every
    /// intersection is behind the ray origin (or there are none), meaning the
    /// ray escaped.
    ///
    /// ```
    /// # use brute_tracer::shape::Shape;
    /// # use brute_tracer::intersect::{ Intersection, Intersections };
    /// let s = Shape::sphere();
    /// let xs = Intersections {
    ///     intersections: vec![
    ///         Intersection::new(5.0, &s),
    ///         Intersection::new(-3.0, &s),
    ///         Intersection::new(2.0, &s),
    ///     ]
    /// };
    /// assert_eq!(xs.hit().map(|i| i.t), Some(2.0));
    /// ```
    pub fn hit(&self) -> Option<Intersection<'a>> {
        self.intersections.iter()
            .filter(|i| i.t.is_finite() && i.t >= 0.0)
            .min_by(|a, b|
                a.t.partial_cmp(&b.t).unwrap_or(std::cmp::Ordering::Equal)
            )
            .copied()
    }

    /// Sorts the intersections by `t`, ignoring `f64` semantics.
    pub fn sort(&mut self) {
        self.intersections.sort_by(|a, b|
            a.t.partial_cmp(&b.t).unwrap_or(std::cmp::Ordering::Equal)
        );
    }
}

/// Everything shading needs to know about a hit.
///
/// Built fresh for every hit that gets shaded.
#[derive(Clone, Debug)]
pub struct IntersectionComputation<'a> {
    /// The "time" of the ray intersection.
    pub t: f64,

    /// The object being intersected.
    pub obj: &'a Shape,

    /// The point where the intersection occurs.
    pub point: Tuple4D,

    /// A point slightly above the intersected surface. Shadow and reflection
    /// rays start here so a surface cannot occlude itself ("acne").
    pub over_point: Tuple4D,

    /// A point slightly below the intersected surface, where refracted rays
    /// start.
    pub under_point: Tuple4D,

    /// Points back toward the ray origin.
    pub eyev: Tuple4D,

    /// The surface normal, flipped to face the eye.
    pub normalv: Tuple4D,

    /// The incoming ray direction, reflected across the normal.
    pub reflectv: Tuple4D,

    /// Whether the ray origin lies inside the object.
    pub inside: bool,

    /// The refractive index of the material being exited.
    pub n1: f64,

    /// The refractive index of the material being entered.
    pub n2: f64,
}

impl<'a> IntersectionComputation<'a> {
    /// Derives the shading frame for `hit` along `r`.
    ///
    /// `xs` is the full (sorted) intersection list the hit came from; it is
    /// walked to find which materials the ray is leaving and entering.
    pub fn new(r: &Ray4D, hit: &Intersection<'a>, xs: &Intersections<'a>)
        -> Result<IntersectionComputation<'a>> {
        let t = hit.t;
        let obj = hit.what;
        let point = r.position(t);
        let eyev = -r.direction;
        let mut normalv = obj.normal_at(point)?;

        let inside = if normalv.dot(&eyev) < 0.0 {
            normalv = -normalv;
            true
        } else {
            false
        };

        let over_point = point + normalv * EPSILON;
        let under_point = point - normalv * EPSILON;

        let reflectv = r.direction.reflect(&normalv);
        let (n1, n2) = Self::refraction_indices(hit, xs);

        Ok(IntersectionComputation {
            t, obj,
            point, over_point, under_point,
            eyev, normalv, reflectv,
            inside,
            n1, n2,
        })
    }

    /// Walks `xs` in order, tracking which shapes the ray is currently
    /// inside; the innermost container on either side of `hit` supplies
    /// `n1` and `n2`.
    fn refraction_indices(hit: &Intersection<'a>, xs: &Intersections<'a>)
        -> (f64, f64) {
        let innermost = |containers: &Vec<&Shape>| {
            containers.last()
                .map(|s| s.material.refractive_index)
                .unwrap_or(VACUUM_RI)
        };

        let mut containers: Vec<&'a Shape> = Vec::new();
        let mut n1 = VACUUM_RI;

        for i in xs.intersections.iter() {
            if i == hit {
                n1 = innermost(&containers);
            }

            // Entering a shape pushes it, exiting removes it.
            let seen = containers.iter().position(|&s| std::ptr::eq(s, i.what));
            match seen {
                Some(j) => { containers.remove(j); },
                None => containers.push(i.what),
            }

            if i == hit {
                return (n1, innermost(&containers));
            }
        }

        (VACUUM_RI, VACUUM_RI)
    }

    /// Schlick's approximation of the Fresnel reflectance at this hit.
    ///
    /// The result is the fraction of light reflected, in `[0, 1]`; under total
    /// internal reflection it is exactly `1.0`.
    pub fn schlick(&self) -> f64 {
        let mut cos = self.eyev.dot(&self.normalv);

        // Total internal reflection can only occur if n1 > n2.
        if self.n1 > self.n2 {
            let n = self.n1 / self.n2;
            let sin2_t = n.powi(2) * (1.0 - cos.powi(2));

            if sin2_t > 1.0 {
                return 1.0
            }

            cos = (1.0 - sin2_t).sqrt();
        }

        let r0 = ((self.n1 - self.n2) / (self.n1 + self.n2)).powi(2);
        r0 + (1.0 - r0) * (1.0 - cos).powi(5)
    }
}

#[cfg(test)]
fn glass_sphere() -> Shape {
    let mut s = Shape::sphere();
    s.material.transparency = 1.0;
    s.material.refractive_index = crate::consts::GLASS_RI;

    s
}

#[cfg(test)]
use crate::matrix::Matrix4D;

#[test]
fn hit_with_all_positive() {
    let s  = Shape::sphere();
    let i1 = Intersection::new(1.0, &s);
    let i2 = Intersection::new(2.0, &s);
    let is = Intersections { intersections: vec![i2, i1] };

    assert_eq!(is.hit().unwrap(), i1);
}

#[test]
fn hit_with_some_negative() {
    let s  = Shape::sphere();
    let i1 = Intersection::new(-1.0, &s);
    let i2 = Intersection::new( 1.0, &s);
    let is = Intersections { intersections: vec![i1, i2] };

    assert_eq!(is.hit().unwrap(), i2);
}

#[test]
fn hit_with_all_negative() {
    let s  = Shape::sphere();
    let i1 = Intersection::new(-2.0, &s);
    let i2 = Intersection::new(-1.0, &s);
    let is = Intersections { intersections: vec![i1, i2] };

    assert_eq!(is.hit(), None);
}

#[test]
fn hit_multiple() {
    let s  = Shape::sphere();
    let i1 = Intersection::new(5.0,  &s);
    let i2 = Intersection::new(7.0,  &s);
    let i3 = Intersection::new(-3.0, &s);
    let i4 = Intersection::new(2.0,  &s);
    let is = Intersections { intersections: vec![i1, i2, i3, i4] };

    assert_eq!(is.hit().unwrap(), i4);
}

#[test]
fn hit_ignores_non_finite() {
    let s  = Shape::sphere();
    let is = Intersections {
        intersections: vec![
            Intersection::new(std::f64::NAN, &s),
            Intersection::new(std::f64::INFINITY, &s),
            Intersection::new(3.0, &s),
        ]
    };

    assert_eq!(is.hit().unwrap().t, 3.0);
}

#[test]
fn hit_at_zero_counts() {
    let s  = Shape::sphere();
    let is = Intersections {
        intersections: vec![
            Intersection::new(0.5, &s),
            Intersection::new(0.0, &s),
        ]
    };

    assert_eq!(is.hit().unwrap().t, 0.0);
}

#[test]
fn hit_on_empty_list() {
    assert_eq!(Intersections::new().hit(), None);
}

#[test]
fn equal_offsets_different_shapes() {
    let a = Shape::sphere();
    let b = Shape::sphere();

    assert_eq!(a, b);
    assert!(Intersection::new(1.0, &a) != Intersection::new(1.0, &b));
}

#[test]
fn aggregate_sorts() {
    let s = Shape::sphere();
    let xs = Intersections::aggregate(vec![
        Intersections { intersections: vec![
            Intersection::new(3.0, &s), Intersection::new(-1.0, &s)
        ] },
        Intersections { intersections: vec![Intersection::new(0.5, &s)] },
    ]);

    let ts: Vec<f64> = xs.intersections.iter().map(|i| i.t).collect();
    assert_eq!(ts, vec![-1.0, 0.5, 3.0]);
}

#[test]
fn precompute_outside() {
    let r = Ray4D::new(
        Tuple4D::point(0.0, 0.0, -5.0),
        Tuple4D::vector(0.0, 0.0, 1.0)
    );
    let s = Shape::sphere();
    let i = Intersection::new(4.0, &s);
    let xs = Intersections { intersections: vec![i] };
    let comps = IntersectionComputation::new(&r, &i, &xs).unwrap();

    assert_eq!(comps.t, 4.0);
    assert!(std::ptr::eq(comps.obj, &s));
    assert_eq!(comps.point, Tuple4D::point(0.0, 0.0, -1.0));
    assert_eq!(comps.eyev, Tuple4D::vector(0.0, 0.0, -1.0));
    assert_eq!(comps.normalv, Tuple4D::vector(0.0, 0.0, -1.0));
    assert!(!comps.inside);
}

#[test]
fn precompute_inside() {
    let r = Ray4D::new(
        Tuple4D::point(0.0, 0.0, 0.0),
        Tuple4D::vector(0.0, 0.0, 1.0)
    );
    let s = Shape::sphere();
    let i = Intersection::new(1.0, &s);
    let xs = Intersections { intersections: vec![i] };
    let comps = IntersectionComputation::new(&r, &i, &xs).unwrap();

    assert_eq!(comps.point, Tuple4D::point(0.0, 0.0, 1.0));
    assert_eq!(comps.eyev, Tuple4D::vector(0.0, 0.0, -1.0));
    assert!(comps.inside);
    // Flipped to face the eye.
    assert_eq!(comps.normalv, Tuple4D::vector(0.0, 0.0, -1.0));
}

#[test]
fn over_point_is_offset() {
    let r = Ray4D::new(
        Tuple4D::point(0.0, 0.0, -5.0),
        Tuple4D::vector(0.0, 0.0, 1.0)
    );
    let s = Shape::sphere()
        .with_transform(Matrix4D::translation(0.0, 0.0, 1.0))
        .unwrap();
    let i = Intersection::new(5.0, &s);
    let xs = Intersections { intersections: vec![i] };
    let comps = IntersectionComputation::new(&r, &i, &xs).unwrap();

    assert!(comps.over_point.z < -EPSILON / 2.0);
    assert!(comps.point.z > comps.over_point.z);
}

#[test]
fn under_point_is_offset() {
    let r = Ray4D::new(
        Tuple4D::point(0.0, 0.0, -5.0),
        Tuple4D::vector(0.0, 0.0, 1.0)
    );
    let s = glass_sphere()
        .with_transform(Matrix4D::translation(0.0, 0.0, 1.0))
        .unwrap();
    let i = Intersection::new(5.0, &s);
    let xs = Intersections { intersections: vec![i] };
    let comps = IntersectionComputation::new(&r, &i, &xs).unwrap();

    assert!(comps.under_point.z > EPSILON / 2.0);
    assert!(comps.point.z < comps.under_point.z);
}

#[test]
fn precompute_reflect_vector() {
    let p = Shape::plane();
    let k = 2.0f64.sqrt() / 2.0;
    let r = Ray4D::new(
        Tuple4D::point(0.0, 1.0, -1.0),
        Tuple4D::vector(0.0, -k, k)
    );
    let i = Intersection::new(2.0f64.sqrt(), &p);
    let xs = Intersections { intersections: vec![i] };
    let comps = IntersectionComputation::new(&r, &i, &xs).unwrap();

    assert_eq!(comps.reflectv, Tuple4D::vector(0.0, k, k));
}

#[test]
fn refraction_indices_at_each_boundary() {
    let mut a = glass_sphere()
        .with_transform(Matrix4D::scaling(2.0, 2.0, 2.0))
        .unwrap();
    a.material.refractive_index = 1.5;

    let mut b = glass_sphere()
        .with_transform(Matrix4D::translation(0.0, 0.0, -0.25))
        .unwrap();
    b.material.refractive_index = 2.0;

    let mut c = glass_sphere()
        .with_transform(Matrix4D::translation(0.0, 0.0, 0.25))
        .unwrap();
    c.material.refractive_index = 2.5;

    let r = Ray4D::new(
        Tuple4D::point(0.0, 0.0, -4.0),
        Tuple4D::vector(0.0, 0.0, 1.0)
    );
    let xs = Intersections {
        intersections: vec![
            Intersection::new(2.0, &a),
            Intersection::new(2.75, &b),
            Intersection::new(3.25, &c),
            Intersection::new(4.75, &b),
            Intersection::new(5.25, &c),
            Intersection::new(6.0, &a),
        ]
    };

    let expected = [
        (1.0, 1.5), (1.5, 2.0), (2.0, 2.5), (2.5, 2.5), (2.5, 1.5), (1.5, 1.0)
    ];

    for (i, &(n1, n2)) in xs.intersections.iter().zip(expected.iter()) {
        let comps = IntersectionComputation::new(&r, i, &xs).unwrap();
        assert_eq!((comps.n1, comps.n2), (n1, n2));
    }
}

#[test]
fn schlick_total_internal_reflection() {
    let s = glass_sphere();
    let k = 2.0f64.sqrt() / 2.0;
    let r = Ray4D::new(
        Tuple4D::point(0.0, 0.0, k),
        Tuple4D::vector(0.0, 1.0, 0.0)
    );
    let xs = Intersections {
        intersections: vec![
            Intersection::new(-k, &s),
            Intersection::new(k, &s),
        ]
    };
    let comps = IntersectionComputation::new(&r, &xs.intersections[1], &xs)
        .unwrap();

    assert_eq!(comps.schlick(), 1.0);
}

#[test]
fn schlick_perpendicular() {
    let s = glass_sphere();
    let r = Ray4D::new(
        Tuple4D::point(0.0, 0.0, 0.0),
        Tuple4D::vector(0.0, 1.0, 0.0)
    );
    let xs = Intersections {
        intersections: vec![
            Intersection::new(-1.0, &s),
            Intersection::new(1.0, &s),
        ]
    };
    let comps = IntersectionComputation::new(&r, &xs.intersections[1], &xs)
        .unwrap();

    assert!(crate::feq(comps.schlick(), 0.04));
}

#[test]
fn schlick_small_angle() {
    let s = glass_sphere();
    let r = Ray4D::new(
        Tuple4D::point(0.0, 0.99, -2.0),
        Tuple4D::vector(0.0, 0.0, 1.0)
    );
    let xs = Intersections {
        intersections: vec![Intersection::new(1.8589, &s)]
    };
    let comps = IntersectionComputation::new(&r, &xs.intersections[0], &xs)
        .unwrap();

    assert!(crate::feq(comps.schlick(), 0.48873));
}

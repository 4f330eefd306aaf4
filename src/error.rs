//! Error types for the tracer.

use thiserror::Error;

use crate::tuple::Tuple4D;

/// Errors that can occur while building a scene or rendering it.
///
/// Rays missing every shape are not errors; see `Intersections::hit`.
#[derive(Error, Debug)]
pub enum TraceError {
    /// A matrix inverse was requested on a (nearly) singular matrix.
    #[error("transform is not invertible (determinant {det})")]
    DegenerateTransform {
        /// The offending determinant.
        det: f64,
    },

    /// A zero-length or non-finite tuple was normalized.
    #[error("cannot normalize vector {0:?}")]
    InvalidNormalize(Tuple4D),

    /// A pixel evaluated to NaN or infinity.
    #[error("pixel ({x}, {y}) produced a non-finite color")]
    NonFiniteColor {
        x: usize,
        y: usize,
    },

    /// Another error, tagged with the scene element it came from.
    #[error("{what}: {source}")]
    Context {
        what: String,
        #[source]
        source: Box<TraceError>,
    },

    /// Malformed scene description.
    #[error("invalid scene description: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// The render worker pool could not be started.
    #[error("failed to start render workers: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

impl TraceError {
    /// Wraps `self` with a description of the scene element that failed.
    pub fn context<S: Into<String>>(self, what: S) -> TraceError {
        TraceError::Context { what: what.into(), source: Box::new(self) }
    }
}

pub type Result<T> = std::result::Result<T, TraceError>;

#[test]
fn context_names_the_failing_element() {
    let err = TraceError::DegenerateTransform { det: 0.0 }
        .context("shape 3 (sphere)");

    assert_eq!(
        err.to_string(),
        "shape 3 (sphere): transform is not invertible (determinant 0)"
    );
}

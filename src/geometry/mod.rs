//! Ray casting against the dome shell

pub mod ray;

pub use ray::{DomeIntersector, Ray, SphericalDome};

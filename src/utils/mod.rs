//! Numeric and vector helpers shared by the aperture core

pub mod numeric;
pub mod vector_math;

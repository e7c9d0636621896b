//! # PrintView Core
//!
//! Core types, constants, and errors for PrintView.
//! Provides the toolpath data model shared by the parser, the geometry
//! builders, and the settings layer.

pub mod constants;
pub mod data;
pub mod error;

pub use data::{Aabb, FeatureType, Point3, Segment};

pub use error::{Error, FetchError, ParseError, Result, UnknownFeatureError};

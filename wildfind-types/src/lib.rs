//! Geometry types shared by the Wild Find map view.
//!
//! The crate is split into two parts:
//!
//! * [`cartesian`] contains points, rectangles (extents) and sizes in projected coordinates,
//! * [`geo`] contains geographic points, coordinate reference system descriptors and the
//!   [`Projection`](geo::Projection) trait with the Web Mercator implementation used as the map's
//!   working projection.

pub mod cartesian;
pub mod error;
pub mod geo;

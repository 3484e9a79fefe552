//! `ds-source`: the boundary to the systems that supply map points and
//! routes.
//!
//! The engine never talks to the network itself.  It asks a
//! [`CandidateSource`] for raw points inside a bounding box and a
//! [`RouteSource`] for an ordered path; whoever implements those traits owns
//! the transport.  This crate provides the response decoders such an
//! implementation needs, the Overpass query text for drivable roads, and
//! in-memory sources for tests and demos.
//!
//! | Module       | Contents                                                       |
//! |--------------|----------------------------------------------------------------|
//! | [`source`]   | `CandidateSource`, `RouteSource`, `RouteResponse`              |
//! | [`decode`]   | `decode_candidates`, `decode_route`                            |
//! | [`overpass`] | `overpass_query`, `EXCLUDED_HIGHWAYS`                          |
//! | [`fixed`]    | `StaticCandidateSource`, `StaticRouteSource`, `StraightLineRouteSource` |
//! | [`error`]    | `SourceError`, `SourceResult<T>`                               |

pub mod decode;
pub mod error;
pub mod fixed;
pub mod overpass;
pub mod source;


pub use decode::{decode_candidates, decode_route};
pub use error::{SourceError, SourceResult};
pub use fixed::{StaticCandidateSource, StaticRouteSource, StraightLineRouteSource};
pub use overpass::{EXCLUDED_HIGHWAYS, overpass_query};
pub use source::{CandidateSource, RouteResponse, RouteSource};

//! Physical view state of an interactive 2D map surface.
//!
//! A [`state::ViewState`] is the single source of truth for where the map is
//! looking and at what scale. It converts between four coordinate spaces:
//!
//! - **viewport**: pixels on screen, origin at the top-left of the visible area
//! - **display**: pixels on the full virtual canvas at the current resolution
//! - **projected**: resolution-independent units of the map projection
//! - **global**: whatever the projection's forward functions accept (lat/lng)
//!
//! Mutations notify a single attached [`listener::ViewStateListener`].
//! Related mutations can be coalesced into one notification through the
//! [`batch::UpdateBatch`] guard. The host surface is responsible for drawing.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`state`] | `ViewState`: conversions and mutators |
//! | [`projection`] | `Projection` trait plus `WebMercator` and `LinearProjection` |
//! | [`listener`] | Listener trait and the non-owning listener slot |
//! | [`batch`] | Update batching and the scoped `UpdateBatch` guard |
//! | [`geom`] | `Point` and `Bounds` |
//! | [`zoom`] | Opt-in level clamping above the core |
//! | [`snapshot`] | Serializable view snapshots |
//! | [`config`] | Environment-driven initial view configuration |
//! | [`error`] | Errors raised by the opt-in layers |
//! | [`consts`] | Shared numeric constants |

pub mod batch;
pub mod config;
pub mod consts;
pub mod error;
pub mod geom;
pub mod listener;
pub mod projection;
pub mod snapshot;
pub mod state;
pub mod zoom;

#[cfg(test)]
mod testing;

pub use error::ViewError;
pub use geom::{Bounds, Point};
pub use listener::ViewStateListener;
pub use projection::{LinearProjection, Projection, WebMercator};
pub use state::ViewState;

//! `lg-router`: matching resource requests to resources and moving them
//! across segments.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                |
//! |--------------|---------------------------------------------------------|
//! | [`resource`] | `MapResource`, `TransitLeg`, `ResourceStore`            |
//! | [`search`]   | `SearchScratch`: bounded tile search from a building    |
//! | [`stitch`]   | `stitch_path`: tile path to `(segment, waypoint)` legs  |
//! | [`router`]   | `ResourceRouter`: request queue and booking lifecycle   |
//! | [`error`]    | `RouterError`, `RouterResult<T>`                        |
//!
//! # Booking lifecycle
//!
//! ```text
//!  request ──► pathfind_requests_in_queue ──► booked, queued on first leg
//!                                                  │
//!                  claim_next_resource ◄───────────┘
//!                          │
//!           on_actor_started_picking_up ──► carried
//!                          │
//!             on_actor_placed_resource ──► Advanced │ Delivered │ Dropped
//! ```
//!
//! A segment deletion at any point clears the booking of every resource
//! routed through it and puts the request back on its building's backlog.

pub mod error;
pub mod resource;
pub mod router;
pub mod search;
pub mod stitch;


pub use error::{RouterError, RouterResult};
pub use resource::{MapResource, ResourceStore, TransitLeg};
pub use router::{ActorRole, PathfindReport, Placement, ResourceRouter, TransitInterruption};
pub use search::{FoundPair, SearchScratch};
pub use stitch::stitch_path;

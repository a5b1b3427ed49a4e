//! Router error type.

use thiserror::Error;

use lg_core::{ActorId, RequestId, ResourceId, SegmentId};
use lg_map::MapError;

/// Errors produced by `lg-router`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RouterError {
    #[error("resource {0} not found")]
    UnknownResource(ResourceId),

    #[error("resource {0} has no booking")]
    NotBooked(ResourceId),

    #[error("resource {resource} is already carried by {carrier}")]
    AlreadyCarried { resource: ResourceId, carrier: ActorId },

    /// The search for `request` did not terminate within its step budget.
    /// Only malformed adjacency data can cause this.
    #[error("search for request {request} exhausted its step budget")]
    SearchExhausted { request: RequestId },

    #[error("segment {0} not found")]
    UnknownSegment(SegmentId),

    #[error(transparent)]
    Map(#[from] MapError),
}

pub type RouterResult<T> = Result<T, RouterError>;

use thiserror::Error;

use lg_core::{CoreError, MapSize};
use lg_graph::GraphError;
use lg_map::MapError;
use lg_router::RouterError;
use lg_segment::SegmentError;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("world configuration error: {0}")]
    Config(#[from] CoreError),

    #[error("initial map is {got} but the configuration asks for {expected}")]
    SizeMismatch { expected: MapSize, got: MapSize },

    #[error(transparent)]
    Map(#[from] MapError),

    #[error(transparent)]
    Graph(#[from] GraphError),

    #[error(transparent)]
    Segment(#[from] SegmentError),

    #[error(transparent)]
    Router(#[from] RouterError),
}

pub type SimResult<T> = Result<T, SimError>;

//! Fluent builder for constructing a [`World`].

use tracing::info;

use lg_core::{LogisticsConfig, Tick};
use lg_map::TileMap;
use lg_router::ResourceRouter;
use lg_segment::{SegmentStore, Segmenter};

use crate::{SimError, SimResult, World};

/// Fluent builder for [`World`].
///
/// | Method      | Default                                   |
/// |-------------|-------------------------------------------|
/// | `.map(m)`   | Empty map of `config.map_size()`          |
///
/// When the initial map has a city hall, `build` runs the full segmentation
/// rebuild; otherwise the world starts with no segments and they appear as
/// edits connect buildings.
pub struct WorldBuilder {
    config: LogisticsConfig,
    map:    Option<TileMap>,
}

impl WorldBuilder {
    pub fn new(config: LogisticsConfig) -> Self {
        Self { config, map: None }
    }

    /// Start from an existing map.  Its size must match the configuration.
    pub fn map(mut self, map: TileMap) -> Self {
        self.map = Some(map);
        self
    }

    pub fn build(self) -> SimResult<World> {
        self.config.validate()?;
        let expected = self.config.map_size();

        let map = match self.map {
            Some(m) => {
                if m.size() != expected {
                    return Err(SimError::SizeMismatch { expected, got: m.size() });
                }
                m
            }
            None => TileMap::new(expected),
        };

        let mut segmenter = Segmenter::new();
        let segments = if map.city_hall().is_some() {
            SegmentStore::from_segments(segmenter.build_graph_segments(&map)?)
        } else {
            SegmentStore::new()
        };
        info!(size = %expected, segments = segments.len(), "world built");

        Ok(World {
            router: ResourceRouter::new(expected),
            config: self.config,
            clock: Tick::ZERO,
            map,
            segmenter,
            segments,
            edits: Vec::new(),
        })
    }
}

//! ASCII map fixtures.
//!
//! | Char | Tile                               |
//! |------|------------------------------------|
//! | `C`  | city hall                          |
//! | `B`  | building (`Produce`, no needs)     |
//! | `F`  | flag                               |
//! | `r`  | road                               |
//! | `.`  | empty                              |
//!
//! Rows are listed top to bottom, so the last row is `y = 0`.

use std::fmt;

use lg_core::{MapSize, TilePos};

use crate::{BuildingKind, MapError, MapResult, Tile, TileMap};

impl TileMap {
    pub fn from_ascii(rows: &[&str]) -> MapResult<TileMap> {
        let height = rows.len();
        let width = rows.first().map_or(0, |r| r.chars().count());
        if width == 0 {
            return Err(MapError::Parse { line: 0, message: "map is empty".into() });
        }
        let size = MapSize::new(width as u32, height as u32);
        let mut map = TileMap::new(size);

        for (line, row) in rows.iter().enumerate() {
            let len = row.chars().count();
            if len != width {
                return Err(MapError::Parse {
                    line,
                    message: format!("expected {width} columns, found {len}"),
                });
            }
            let y = (height - line - 1) as i32;
            for (x, c) in row.chars().enumerate() {
                let pos = TilePos::new(x as i32, y);
                match c {
                    '.' => {}
                    'r' => {
                        map.place_road(pos)?;
                    }
                    'F' => {
                        map.place_road(pos)?;
                        map.place_flag(pos)?;
                    }
                    'C' => {
                        map.place_building(pos, BuildingKind::CityHall, &[], 0)?;
                    }
                    'B' => {
                        map.place_building(pos, BuildingKind::Produce, &[], 0)?;
                    }
                    other => {
                        return Err(MapError::Parse {
                            line,
                            message: format!("unknown tile {other:?} in column {x}"),
                        });
                    }
                }
            }
        }
        Ok(map)
    }

    fn glyph(&self, pos: TilePos) -> char {
        match self.tile(pos) {
            None | Some(Tile::None) => '.',
            Some(Tile::Road) => 'r',
            Some(Tile::Flag) => 'F',
            Some(Tile::Building(id)) => {
                if self.city_hall().is_some_and(|h| h.id == id) { 'C' } else { 'B' }
            }
        }
    }
}

impl fmt::Display for TileMap {
    /// The `from_ascii` rows, top row first.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let size = self.size();
        for y in (0..size.height as i32).rev() {
            for x in 0..size.width as i32 {
                write!(f, "{}", self.glyph(TilePos::new(x, y)))?;
            }
            if y > 0 {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

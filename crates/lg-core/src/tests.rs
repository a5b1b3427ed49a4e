//! Unit tests for lg-core primitives.

#[cfg(test)]
mod ids {
    use crate::{ResourceId, SegmentId};

    #[test]
    fn next_and_ordering() {
        assert_eq!(ResourceId(3).next(), ResourceId(4));
        assert!(SegmentId(0) < SegmentId(1));
    }

    #[test]
    fn display() {
        assert_eq!(ResourceId(7).to_string(), "ResourceId(7)");
    }
}

#[cfg(test)]
mod direction {
    use crate::{Direction, DirectionMask, TilePos};

    #[test]
    fn opposite_is_two_steps_around() {
        for (i, d) in Direction::ALL.into_iter().enumerate() {
            assert_eq!(d.opposite(), Direction::ALL[(i + 2) % 4]);
            assert_eq!(d.opposite().opposite(), d);
        }
    }

    #[test]
    fn bits_match_mask_layout() {
        assert_eq!(Direction::Right.bit(), 1);
        assert_eq!(Direction::Up.bit(), 2);
        assert_eq!(Direction::Left.bit(), 4);
        assert_eq!(Direction::Down.bit(), 8);
    }

    #[test]
    fn up_is_positive_y() {
        assert_eq!(TilePos::new(2, 2).step(Direction::Up), TilePos::new(2, 3));
        assert_eq!(TilePos::new(2, 2).step(Direction::Left), TilePos::new(1, 2));
    }

    #[test]
    fn between_adjacent_only() {
        let a = TilePos::new(0, 0);
        for d in Direction::ALL {
            assert_eq!(Direction::between(a, a.step(d)), Some(d));
        }
        assert_eq!(Direction::between(a, TilePos::new(1, 1)), None);
        assert_eq!(Direction::between(a, a), None);
    }

    #[test]
    fn mask_set_and_clear() {
        let m = DirectionMask::NONE.with(Direction::Up).with(Direction::Down);
        assert!(m.has(Direction::Up));
        assert!(!m.has(Direction::Right));
        assert_eq!(m.degree(), 2);
        assert_eq!(m.without(Direction::Up), DirectionMask::single(Direction::Down));
        assert_eq!(m.set(Direction::Down, false).set(Direction::Up, false), DirectionMask::NONE);
        assert_eq!(m.iter().collect::<Vec<_>>(), vec![Direction::Up, Direction::Down]);
    }

    #[test]
    fn glyphs_are_unique_and_invertible() {
        let glyphs: Vec<char> = (0u8..16).map(|b| DirectionMask(b).glyph()).collect();
        let mut sorted = glyphs.clone();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(sorted.len(), 16);
        for b in 0u8..16 {
            assert_eq!(DirectionMask::from_glyph(glyphs[b as usize]), Some(DirectionMask(b)));
        }
        assert_eq!(DirectionMask::ALL.glyph(), '┼');
        assert_eq!(DirectionMask(0b0101).glyph(), '─');
        assert_eq!(DirectionMask::from_glyph('x'), None);
    }
}

#[cfg(test)]
mod map_size {
    use crate::{MapSize, TilePos};

    #[test]
    fn bounds() {
        let s = MapSize::new(3, 2);
        assert!(s.contains(TilePos::new(0, 0)));
        assert!(s.contains(TilePos::new(2, 1)));
        assert!(!s.contains(TilePos::new(3, 0)));
        assert!(!s.contains(TilePos::new(0, -1)));
    }

    #[test]
    fn index_roundtrip() {
        let s = MapSize::new(3, 2);
        for (i, p) in s.positions().enumerate() {
            assert_eq!(s.index(p), Some(i));
            assert_eq!(s.pos(i), p);
        }
        assert_eq!(s.index(TilePos::new(5, 5)), None);
        assert_eq!(s.area(), 6);
    }
}

#[cfg(test)]
mod queue {
    use crate::PriorityQueue;

    #[test]
    fn lower_priority_pops_first() {
        let mut q = PriorityQueue::new();
        q.push(5, 'a');
        q.push(1, 'b');
        q.push(3, 'c');
        assert_eq!(q.pop(), Some((1, 'b')));
        assert_eq!(q.pop(), Some((3, 'c')));
        assert_eq!(q.pop(), Some((5, 'a')));
        assert_eq!(q.pop(), None);
    }

    #[test]
    fn equal_priority_is_fifo() {
        let mut q = PriorityQueue::new();
        for c in ['x', 'y', 'z'] {
            q.push(1, c);
        }
        let order: Vec<char> = q.iter().map(|(_, c)| c).collect();
        assert_eq!(order, vec!['x', 'y', 'z']);
    }

    #[test]
    fn remove_from_middle() {
        let mut q = PriorityQueue::new();
        q.push(1, 10u32);
        q.push(2, 20);
        q.push(3, 30);
        assert_eq!(q.remove(&20), Some(2));
        assert_eq!(q.remove(&20), None);
        assert!(!q.contains(&20));
        assert_eq!(q.len(), 2);
        assert_eq!(q.peek(), Some((1, 10)));
    }

    #[test]
    fn repush_moves_item() {
        let mut q = PriorityQueue::new();
        assert!(q.push(4, 'a'));
        q.push(2, 'b');
        assert!(!q.push(1, 'a'));
        assert_eq!(q.len(), 2);
        assert_eq!(q.priority_of(&'a'), Some(1));
        assert_eq!(q.pop(), Some((1, 'a')));
    }
}

#[cfg(test)]
mod config {
    use crate::{CoreError, LogisticsConfig};

    #[test]
    fn default_is_valid() {
        let cfg = LogisticsConfig::default();
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.construction_priority, 1);
    }

    #[test]
    fn zero_size_rejected() {
        let cfg = LogisticsConfig { width: 0, ..LogisticsConfig::default() };
        assert!(matches!(cfg.validate(), Err(CoreError::Config(_))));
    }
}

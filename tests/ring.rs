mod tests {
    use ring_light_composer::{Direction, InvalidDirection, RingBuffer};

    #[test]
    fn test_full_turn_returns_to_start() {
        let mut ring = RingBuffer::<20>::new();
        ring.set_front(7);
        for _ in 0..20 {
            ring.advance(Direction::Forward);
        }
        assert_eq!(ring.lead(), 7);

        for _ in 0..20 {
            ring.advance(Direction::Reverse);
        }
        assert_eq!(ring.lead(), 7);
    }

    #[test]
    fn test_forward_then_back_is_identity() {
        for count in [1, 5, 19, 20, 33] {
            let mut ring = RingBuffer::<20>::new();
            ring.set_front(3);
            for _ in 0..count {
                ring.advance(Direction::Forward);
            }
            for _ in 0..count {
                ring.advance(Direction::Reverse);
            }
            assert_eq!(ring.lead(), 3, "count {}", count);
        }
    }

    #[test]
    fn test_advance_wraps_both_ways() {
        let mut ring = RingBuffer::<20>::new();
        ring.advance(Direction::Reverse);
        assert_eq!(ring.lead(), 19);
        ring.advance(Direction::Forward);
        assert_eq!(ring.lead(), 0);
    }

    #[test]
    fn test_offsets_follow_direction() {
        let ring = RingBuffer::<20>::new();
        assert_eq!(ring.physical_index_of(0, Direction::Forward), 0);
        assert_eq!(ring.physical_index_of(1, Direction::Forward), 1);
        assert_eq!(ring.physical_index_of(1, Direction::Reverse), 19);
        assert_eq!(ring.physical_index_of(21, Direction::Forward), 1);
    }

    #[test]
    fn test_logical_offset_inverts_physical_index() {
        let mut ring = RingBuffer::<20>::new();
        ring.set_front(5);
        for direction in [Direction::Forward, Direction::Reverse] {
            for offset in 0..20 {
                let physical = ring.physical_index_of(offset, direction);
                assert!(physical < 20);
                assert_eq!(ring.logical_offset_of(physical, direction), offset);
            }
        }
    }

    #[test]
    fn test_set_front_wraps() {
        let mut ring = RingBuffer::<20>::new();
        ring.set_front(25);
        assert_eq!(ring.lead(), 5);
        assert_eq!(ring.len(), 20);
    }

    #[test]
    fn test_direction_from_sign() {
        assert_eq!(Direction::try_from(1), Ok(Direction::Forward));
        assert_eq!(Direction::try_from(-1), Ok(Direction::Reverse));
        assert_eq!(Direction::try_from(0), Err(InvalidDirection(0)));
        assert_eq!(Direction::try_from(2), Err(InvalidDirection(2)));
        assert_eq!(Direction::Forward.reversed(), Direction::Reverse);
        assert_eq!(Direction::Reverse.sign(), -1);
    }
}

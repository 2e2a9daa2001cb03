mod tests {
    use embassy_time::{Duration, Instant};
    use ring_light_composer::transition::{ValueTransition, blend8};

    #[test]
    fn test_blend8() {
        assert_eq!(blend8(255, 128, 128), 191);
        assert_eq!(blend8(0, 128, 255), 128);
        assert_eq!(blend8(255, 0, 128), 127);
        assert_eq!(blend8(255, 128, 0), 255);
        assert_eq!(blend8(0, 255, 128), 128);
    }

    #[test]
    fn test_value_transition_u8() {
        let mut transition = ValueTransition::new_u8(0);
        assert_eq!(transition.current(), 0);
        assert!(!transition.is_transitioning());
        transition.set(100, Duration::from_millis(100), Instant::from_millis(0));
        assert!(transition.is_transitioning());
        assert_eq!(transition.settled(), 100);

        transition.tick(Instant::from_millis(50));
        assert_eq!(transition.current(), 50);

        transition.tick(Instant::from_millis(100));
        assert_eq!(transition.current(), 100);
        assert!(!transition.is_transitioning());
    }

    #[test]
    fn test_value_transition_fades_down() {
        let mut transition = ValueTransition::new_u8(200);
        transition.set(0, Duration::from_millis(200), Instant::from_millis(1000));

        transition.tick(Instant::from_millis(1100));
        let mid = transition.current();
        assert!(mid > 90 && mid < 110, "got {}", mid);

        transition.tick(Instant::from_millis(1300));
        assert_eq!(transition.current(), 0);
    }

    #[test]
    fn test_zero_duration_jumps() {
        let mut transition = ValueTransition::new_u8(10);
        transition.set(240, Duration::from_millis(0), Instant::from_millis(5));
        assert_eq!(transition.current(), 240);
        assert!(!transition.is_transitioning());
    }

    #[test]
    fn test_clock_going_backwards_holds_source() {
        let mut transition = ValueTransition::new_u8(40);
        transition.set(80, Duration::from_millis(100), Instant::from_millis(500));
        transition.tick(Instant::from_millis(100));
        assert_eq!(transition.current(), 40);
        assert!(transition.is_transitioning());
    }
}

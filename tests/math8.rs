mod tests {
    use ring_light_composer::color::Rgb;
    use ring_light_composer::gamma::{gamma8, gamma_rgb};
    use ring_light_composer::math8::{scale8, scale_rgb, unit_to_u8};

    #[test]
    fn test_scale8() {
        assert_eq!(scale8(255, 128), 128);
        assert_eq!(scale8(0, 128), 0);
        assert_eq!(scale8(128, 128), 64);
        assert_eq!(scale8(128, 255), 128);
        assert_eq!(scale8(128, 0), 0);
        assert_eq!(scale8(255, 255), 255);
    }

    #[test]
    fn test_scale_rgb() {
        let color = Rgb::new(255, 128, 0);
        assert_eq!(scale_rgb(color, 255), color);
        assert_eq!(scale_rgb(color, 128), Rgb::new(128, 64, 0));
        assert_eq!(scale_rgb(color, 0), Rgb::new(0, 0, 0));
    }

    #[test]
    fn test_unit_to_u8() {
        assert_eq!(unit_to_u8(0.0), 0);
        assert_eq!(unit_to_u8(0.5), 128);
        assert_eq!(unit_to_u8(1.0), 255);
        assert_eq!(unit_to_u8(2.0), 255);
        assert_eq!(unit_to_u8(-1.0), 0);
        assert_eq!(unit_to_u8(f32::NAN), 0);
    }

    #[test]
    fn test_gamma8_is_monotonic() {
        assert_eq!(gamma8(0), 0);
        assert_eq!(gamma8(128), 42);
        assert_eq!(gamma8(255), 255);
        for value in 1..=255u8 {
            assert!(gamma8(value) >= gamma8(value - 1));
        }
        assert_eq!(gamma_rgb(Rgb::new(255, 128, 0)), Rgb::new(255, 42, 0));
    }

}

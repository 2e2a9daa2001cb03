mod tests {
    use ring_light_composer::color::{
        GradientCompositor, HsvColor, Hue, Palette, Rgb, arc_of, blend_hsv, normalized_position,
        rgb_to_hsv,
    };

    const RED: Rgb = Rgb { r: 255, g: 0, b: 0 };
    const GREEN: Rgb = Rgb { r: 0, g: 255, b: 0 };
    const BLUE: Rgb = Rgb { r: 0, g: 0, b: 255 };

    fn assert_near(a: HsvColor, b: HsvColor) {
        assert!(
            a.hue.shortest_delta(b.hue).abs() <= 64,
            "hue {:?} vs {:?}",
            a.hue,
            b.hue
        );
        assert!(a.sat.abs_diff(b.sat) <= 1, "sat {} vs {}", a.sat, b.sat);
        assert!(a.val.abs_diff(b.val) <= 1, "val {} vs {}", a.val, b.val);
    }

    #[test]
    fn test_no_active_colors_is_black() {
        let palette = Palette::new();
        let gradient = GradientCompositor::new(&palette);
        assert_eq!(gradient.color_at(0.0), HsvColor::BLACK);
        assert_eq!(gradient.color_at(0.6), HsvColor::BLACK);
    }

    #[test]
    fn test_single_color_everywhere() {
        let palette = Palette::from_colors(&[GREEN]);
        let gradient = GradientCompositor::new(&palette);
        for position in [0.0, 0.25, 0.5, 0.99] {
            assert_eq!(gradient.color_at(position), rgb_to_hsv(GREEN));
        }
    }

    #[test]
    fn test_two_colors_run_lead_to_tail() {
        let palette = Palette::from_colors(&[RED, BLUE]);
        let gradient = GradientCompositor::new(&palette);

        assert_eq!(gradient.color_at(0.0), rgb_to_hsv(RED));

        // Red and blue meet through magenta, not through green
        let mid = gradient.color_at(0.5).hue.degrees();
        assert!((mid - 300.0).abs() < 1.0, "got {}", mid);

        let near_tail = gradient.color_at(0.999);
        assert_near(near_tail, rgb_to_hsv(BLUE));
    }

    #[test]
    fn test_three_colors_are_continuous_at_arc_boundaries() {
        let palette = Palette::from_colors(&[RED, GREEN, BLUE]);
        let gradient = GradientCompositor::new(&palette);
        let epsilon = 1e-4;

        for boundary in [1.0 / 3.0, 2.0 / 3.0] {
            let below = gradient.color_at(boundary - epsilon);
            let at = gradient.color_at(boundary);
            assert_near(below, at);
        }

        assert_near(gradient.color_at(1.0 / 3.0), rgb_to_hsv(GREEN));
        assert_near(gradient.color_at(2.0 / 3.0), rgb_to_hsv(BLUE));
        // The last arc closes back onto the first color
        assert_near(gradient.color_at(1.0 - epsilon), gradient.color_at(0.0));
    }

    #[test]
    fn test_arc_boundary_belongs_to_upper_arc() {
        assert_eq!(arc_of(0.0), (0, 0.0));
        assert_eq!(arc_of(1.0 / 3.0).0, 1);
        assert_eq!(arc_of(2.0 / 3.0).0, 2);
        assert_eq!(arc_of(1.0).0, 2);
        assert_eq!(arc_of(f32::NAN), (0, 0.0));
    }

    #[test]
    fn test_blend_to_black_keeps_hue() {
        let red = rgb_to_hsv(RED);
        let faded = blend_hsv(HsvColor::BLACK, red, 0.5);
        assert_eq!(faded.hue, red.hue);
        assert_eq!(faded.val, 128);

        let green = rgb_to_hsv(GREEN);
        let dimmed = blend_hsv(green, HsvColor::BLACK, 0.75);
        assert_eq!(dimmed.hue, green.hue);
    }

    #[test]
    fn test_fill_by_offset_matches_color_at() {
        let palette = Palette::from_colors(&[RED, BLUE]);
        let gradient = GradientCompositor::new(&palette);
        let mut shades = [HsvColor::BLACK; 4];
        gradient.fill_by_offset(&mut shades);

        for (offset, shade) in shades.iter().enumerate() {
            assert_eq!(*shade, gradient.color_at_offset(offset, 4));
        }
        assert_eq!(normalized_position(1, 4), 0.25);
        assert_eq!(normalized_position(5, 4), 0.25);
        assert_eq!(shades[0].hue, Hue::RED);
    }
}

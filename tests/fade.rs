mod tests {
    use spotlight_node::color::Rgb;
    use spotlight_node::{Destination, FadeEngine, FadeMode, SpotlightController};

    const CHANNEL: Destination = Destination::Channel(0);

    fn distance(a: Rgb, b: Rgb) -> [u8; 3] {
        [a.r.abs_diff(b.r), a.g.abs_diff(b.g), a.b.abs_diff(b.b)]
    }

    #[test]
    fn test_normal_mode_jumps() {
        let engine = FadeEngine::new();
        let mut controller = SpotlightController::new();
        controller.set_color(CHANNEL, Rgb::new(10, 20, 30), false);

        assert!(engine.tick(&mut controller));
        let channel = controller.channel(0).unwrap();
        assert_eq!(channel.current, Rgb::new(10, 20, 30));
        assert!(channel.dirty);
        assert!(channel.pending_publish);
        assert!(controller.is_changed());

        assert!(!engine.tick(&mut controller));
        assert!(!controller.channel(0).unwrap().dirty);
    }

    #[test]
    fn test_fade_converges_monotonically() {
        let engine = FadeEngine::new();
        let mut controller = SpotlightController::new();
        controller.set_mode(CHANNEL, FadeMode::Fade, false);

        for target in [Rgb::new(200, 10, 90), Rgb::new(0, 50, 90), Rgb::new(255, 255, 255)] {
            controller.set_color(CHANNEL, target, false);
            let expected_ticks = controller.channel(0).unwrap().remaining_fade_ticks();

            let mut ticks = 0u32;
            let mut previous = distance(controller.channel(0).unwrap().current, target);
            while engine.tick(&mut controller) {
                ticks += 1;
                let now = distance(controller.channel(0).unwrap().current, target);
                for (before, after) in previous.iter().zip(now.iter()) {
                    assert!(after <= before);
                    assert!(before - after <= 1);
                }
                previous = now;
            }

            assert_eq!(ticks, u32::from(expected_ticks));
            assert_eq!(controller.channel(0).unwrap().current, target);
        }
    }

    #[test]
    fn test_fade_tick_counts() {
        let engine = FadeEngine::new();
        let mut controller = SpotlightController::new();
        controller.set_mode(CHANNEL, FadeMode::Fade, false);
        controller.set_color(CHANNEL, Rgb::new(200, 10, 90), false);
        assert_eq!(controller.channel(0).unwrap().remaining_fade_ticks(), 200);

        for _ in 0..199 {
            assert!(engine.tick(&mut controller));
        }
        assert_eq!(controller.channel(0).unwrap().current, Rgb::new(199, 10, 90));
        assert!(engine.tick(&mut controller));
        assert!(!engine.tick(&mut controller));
    }

    #[test]
    fn test_idle_channels_are_untouched() {
        let engine = FadeEngine::new();
        let mut controller = SpotlightController::new();
        controller.set_color(Destination::Channel(3), Rgb::new(1, 1, 1), false);
        engine.tick(&mut controller);

        for (index, channel) in controller.channels().iter().enumerate() {
            assert_eq!(channel.dirty, index == 3);
            assert_eq!(channel.pending_publish, index == 3);
        }
    }
}

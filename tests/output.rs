mod common;

mod tests {
    use spotlight_node::color::Rgb;
    use spotlight_node::luminance::lookup;
    use spotlight_node::output::{OutputStage, channel_duties, render_frame};
    use spotlight_node::{Destination, FadeEngine, SpotChannel, SpotlightController, Status};

    use crate::common::MockSink;

    #[test]
    fn test_channel_duties() {
        let mut channel = SpotChannel::new();
        channel.current = Rgb::new(255, 128, 0);
        assert_eq!(channel_duties(&channel), [0, 0, 0]);

        channel.status = Status::On;
        assert_eq!(channel_duties(&channel), [4096, lookup(128), 0]);
    }

    #[test]
    fn test_render_frame() {
        let mut controller = SpotlightController::new();
        controller.set_color(Destination::All, Rgb::new(255, 255, 255), false);
        controller.set_status(Destination::Channel(1), Status::On, false);
        FadeEngine::new().tick(&mut controller);

        let frame = render_frame(&controller);
        assert_eq!(frame[0], [0, 0, 0]);
        assert_eq!(frame[1], [4096, 4096, 4096]);
        assert!(frame[2..].iter().all(|duties| *duties == [0, 0, 0]));
    }

    #[test]
    fn test_flush_only_when_changed() {
        let mut controller = SpotlightController::new();
        let mut stage = OutputStage::new();
        let mut sink = MockSink::default();

        assert!(!stage.flush(&mut controller, &mut sink));
        assert!(sink.frames.is_empty());

        controller.set_color(Destination::Channel(0), Rgb::new(0, 0, 255), false);
        controller.set_status(Destination::Channel(0), Status::On, false);
        FadeEngine::new().tick(&mut controller);

        assert!(stage.flush(&mut controller, &mut sink));
        assert_eq!(sink.frames.len(), 1);
        assert_eq!(sink.last().unwrap().len(), 30);
        assert_eq!(&sink.last().unwrap()[..3], &[0, 0, 4096]);
        assert_eq!(stage.frame(), sink.last().unwrap());
        assert!(!controller.channel(0).unwrap().dirty);
        assert!(!controller.is_changed());

        assert!(!stage.flush(&mut controller, &mut sink));
        assert_eq!(sink.frames.len(), 1);
    }
}

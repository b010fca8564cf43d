mod common;

mod tests {
    use spotlight_node::color::Rgb;
    use spotlight_node::{Destination, FadeMode, PublishScheduler, SpotlightController, Status};

    use crate::common::MockTransport;

    const PREFIX: &str = "home/lights";

    #[test]
    fn test_one_channel_per_poll_in_order() {
        let mut controller = SpotlightController::new();
        let mut publisher = PublishScheduler::new();
        let mut transport = MockTransport::connected();
        controller.set_status(Destination::All, Status::On, false);

        let order: Vec<_> = (0..controller.len())
            .map(|_| publisher.poll(&mut controller, PREFIX, &mut transport))
            .collect();
        assert_eq!(order, (0..10).map(Some).collect::<Vec<_>>());
        assert_eq!(transport.published.len(), 50);
        assert!(controller.channels().iter().all(|channel| !channel.pending_publish));

        assert_eq!(publisher.poll(&mut controller, PREFIX, &mut transport), None);
        assert_eq!(transport.published.len(), 50);
    }

    #[test]
    fn test_channel_messages() {
        let mut controller = SpotlightController::new();
        let mut publisher = PublishScheduler::new();
        let mut transport = MockTransport::connected();
        let channel = Destination::Channel(2);
        controller.set_base_color(channel, Rgb::new(0x12, 0xab, 0xff), false);
        controller.set_brightness(channel, 77, false);
        controller.set_mode(channel, FadeMode::Fade, false);
        controller.set_status(channel, Status::On, false);

        assert_eq!(publisher.poll(&mut controller, PREFIX, &mut transport), Some(2));
        let topics: Vec<_> = transport.published.iter().map(|m| m.topic.as_str()).collect();
        assert_eq!(
            topics,
            [
                "home/lights/get/3/color",
                "home/lights/get/3/bcolor",
                "home/lights/get/3/status",
                "home/lights/get/3/bright",
                "home/lights/get/3/mode",
            ]
        );
        assert!(transport.published.iter().all(|m| m.retain));
        assert_eq!(transport.payload_of("home/lights/get/3/color"), Some("000000"));
        assert_eq!(transport.payload_of("home/lights/get/3/bcolor"), Some("12ABFF"));
        assert_eq!(transport.payload_of("home/lights/get/3/status"), Some("1"));
        assert_eq!(transport.payload_of("home/lights/get/3/bright"), Some("77"));
        assert_eq!(transport.payload_of("home/lights/get/3/mode"), Some("1"));
    }

    #[test]
    fn test_online_message_once_per_connection() {
        let mut controller = SpotlightController::new();
        let mut publisher = PublishScheduler::new();
        let mut transport = MockTransport::connected();

        publisher.on_connected();
        assert_eq!(publisher.poll(&mut controller, PREFIX, &mut transport), None);
        assert_eq!(transport.payload_of("home/lights/status/lwt"), Some("online"));
        assert!(!publisher.is_online_pending());

        transport.clear();
        publisher.poll(&mut controller, PREFIX, &mut transport);
        assert!(transport.published.is_empty());
    }

    #[test]
    fn test_failed_publish_is_retried() {
        let mut controller = SpotlightController::new();
        let mut publisher = PublishScheduler::new();
        let mut transport = MockTransport::connected();
        controller.set_status(Destination::Channel(0), Status::On, false);

        transport.publish_budget = Some(3);
        assert_eq!(publisher.poll(&mut controller, PREFIX, &mut transport), None);
        assert!(controller.channel(0).unwrap().pending_publish);

        transport.publish_budget = None;
        assert_eq!(publisher.poll(&mut controller, PREFIX, &mut transport), Some(0));
        assert!(!controller.channel(0).unwrap().pending_publish);
    }

    #[test]
    fn test_disconnected_does_nothing() {
        let mut controller = SpotlightController::new();
        let mut publisher = PublishScheduler::new();
        let mut transport = MockTransport::default();
        controller.set_status(Destination::All, Status::On, false);
        publisher.on_connected();

        assert_eq!(publisher.poll(&mut controller, PREFIX, &mut transport), None);
        assert!(transport.published.is_empty());
        assert!(publisher.is_online_pending());
        assert!(controller.channels().iter().all(|channel| channel.pending_publish));
    }
}

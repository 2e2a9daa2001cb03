mod tests {
    use embassy_time::{Duration, Instant};
    use ring_light_composer::color::Rgb;
    use ring_light_composer::command::TrySendError;
    use ring_light_composer::{
        Animator, AnimatorConfig, ChaseConfig, CommandChannel, ConfigError, Direction,
        FrameScheduler, ModeConfigs, ModeId, OutputDriver, RingCommand, SchedulerConfig,
        SpeedCurve,
    };

    const RED: Rgb = Rgb { r: 255, g: 0, b: 0 };
    const BLACK: Rgb = Rgb { r: 0, g: 0, b: 0 };

    fn at(ms: u64) -> Instant {
        Instant::from_millis(ms)
    }

    fn stepping_config() -> AnimatorConfig {
        AnimatorConfig {
            palette: [RED, BLACK, BLACK],
            brightness_fade: Duration::from_millis(100),
            modes: ModeConfigs {
                chase: ChaseConfig {
                    speed: SpeedCurve::fixed(Duration::from_millis(10)),
                    transition_steps: 1,
                },
                ..ModeConfigs::default()
            },
            ..AnimatorConfig::default()
        }
    }

    #[derive(Default)]
    struct RecordingDriver {
        frames: Vec<Vec<Rgb>>,
        brightness: Option<u8>,
        clears: usize,
    }

    impl OutputDriver for RecordingDriver {
        fn write(&mut self, colors: &[Rgb]) {
            self.frames.push(colors.to_vec());
        }

        fn set_brightness(&mut self, brightness: u8) {
            self.brightness = Some(brightness);
        }

        fn clear(&mut self) {
            self.clears += 1;
        }
    }

    #[test]
    fn test_rejects_invalid_config() {
        let channel = CommandChannel::<4>::new();

        let empty = Animator::<0, 4>::new(channel.receiver(), &AnimatorConfig::default());
        assert_eq!(empty.err(), Some(ConfigError::EmptyRing));

        let mut config = AnimatorConfig::default();
        config.modes.chase.transition_steps = 0;
        let invalid = Animator::<8, 4>::new(channel.receiver(), &config);
        assert_eq!(invalid.err(), Some(ConfigError::ZeroTransitionSteps));
    }

    #[test]
    fn test_palette_command_applies_on_next_tick() {
        let channel = CommandChannel::<4>::new();
        let mut animator =
            Animator::<6, 4>::new(channel.receiver(), &AnimatorConfig::default()).expect("valid");

        let frame = *animator.tick(at(0)).expect("first poll steps");
        assert_eq!(frame, [BLACK; 6]);

        channel
            .sender()
            .try_send(RingCommand::SetPalette([RED, BLACK, BLACK]))
            .expect("channel has room");
        let frame = *animator.tick(at(1000)).expect("interval elapsed");
        assert_eq!(frame, [RED; 6]);
        assert_eq!(animator.palette().primary().rgb(), RED);
    }

    #[test]
    fn test_switch_mode_keeps_front() {
        let channel = CommandChannel::<4>::new();
        let sender = channel.sender();
        let mut animator =
            Animator::<8, 4>::new(channel.receiver(), &stepping_config()).expect("valid");

        for step in 0..3u64 {
            animator.tick(at(step * 10));
        }
        assert_eq!(animator.front_position(), 3);

        sender
            .try_send(RingCommand::SwitchMode(ModeId::Wipe))
            .expect("channel has room");
        let frame = *animator.tick(at(30)).expect("new mode steps at once");
        assert_eq!(animator.mode_id(), ModeId::Wipe);
        assert_eq!(animator.front_position(), 3);
        assert_eq!(frame[3], RED);
        assert_eq!(frame[2], BLACK);
        assert_eq!(frame[4], BLACK);
    }

    #[test]
    fn test_front_survives_modes_without_one() {
        let channel = CommandChannel::<4>::new();
        let mut animator =
            Animator::<8, 4>::new(channel.receiver(), &stepping_config()).expect("valid");

        animator.set_front_position(13);
        assert_eq!(animator.front_position(), 5);

        animator.switch_mode(ModeId::Sparkle);
        assert_eq!(animator.front_position(), 5);

        animator.switch_mode(ModeId::Chase);
        assert_eq!(animator.front_position(), 5);
    }

    #[test]
    fn test_input_commands() {
        let channel = CommandChannel::<8>::new();
        let sender = channel.sender();
        let mut animator =
            Animator::<8, 8>::new(channel.receiver(), &stepping_config()).expect("valid");

        sender.try_send(RingCommand::SetSpeed(200.0)).expect("room");
        sender
            .try_send(RingCommand::SetDirection(Direction::Reverse))
            .expect("room");
        sender.try_send(RingCommand::SetFront(10)).expect("room");
        animator.tick(at(0));

        assert_eq!(animator.speed(), 200.0);
        assert_eq!(animator.direction(), Direction::Reverse);
        // Front 2 was rendered, then the chase stepped once in reverse
        assert_eq!(animator.front_position(), 1);
    }

    fn slow_red_config() -> AnimatorConfig {
        AnimatorConfig {
            palette: [RED, BLACK, BLACK],
            brightness_fade: Duration::from_millis(100),
            modes: ModeConfigs {
                chase: ChaseConfig {
                    speed: SpeedCurve::fixed(Duration::from_millis(200)),
                    ..ChaseConfig::default()
                },
                ..ModeConfigs::default()
            },
            ..AnimatorConfig::default()
        }
    }

    #[test]
    fn test_brightness_fades() {
        let channel = CommandChannel::<4>::new();
        let sender = channel.sender();
        let mut animator =
            Animator::<4, 4>::new(channel.receiver(), &slow_red_config()).expect("valid");
        assert_eq!(animator.brightness(), 255);

        sender.try_send(RingCommand::SetBrightness(0)).expect("room");
        let frame = *animator.tick(at(0)).expect("first poll steps");
        assert_eq!(frame, [RED; 4]);
        assert_eq!(animator.brightness(), 255);
        assert_eq!(animator.target_brightness(), 0);
        assert_eq!(animator.next_step_in(at(0)), Duration::from_millis(16));

        // The chase is idle, the fade still yields a dimmer frame
        let frame = *animator.tick(at(50)).expect("fade frame due");
        let mid = animator.brightness();
        assert!(mid > 100 && mid < 160, "got {}", mid);
        assert!(frame[0].r > 100 && frame[0].r < 160, "got {}", frame[0].r);
        assert_eq!(frame[0].g, 0);

        let frame = *animator.tick(at(100)).expect("fade frame due");
        assert_eq!(animator.brightness(), 0);
        assert_eq!(frame, [BLACK; 4]);

        assert!(animator.tick(at(101)).is_none());
        assert_eq!(animator.next_step_in(at(101)), Duration::from_millis(99));
    }

    #[test]
    fn test_fade_frames_are_rate_limited() {
        let channel = CommandChannel::<4>::new();
        let mut animator =
            Animator::<4, 4>::new(channel.receiver(), &slow_red_config()).expect("valid");
        animator.tick(at(0));

        // The last mode frame went out at 0; the first fade frame follows at 16
        animator.set_brightness(0, at(10));
        assert!(animator.tick(at(10)).is_none());
        assert_eq!(animator.next_step_in(at(10)), Duration::from_millis(6));
        assert!(animator.tick(at(16)).is_some());
        assert!(animator.tick(at(17)).is_none());
        assert!(animator.tick(at(31)).is_none());
        assert_eq!(animator.next_step_in(at(31)), Duration::from_millis(1));
        assert!(animator.tick(at(32)).is_some());
    }

    #[test]
    fn test_target_brightness_without_fade() {
        let channel = CommandChannel::<4>::new();
        let mut animator =
            Animator::<4, 4>::new(channel.receiver(), &slow_red_config()).expect("valid");
        assert_eq!(animator.target_brightness(), 255);

        animator.set_brightness(40, at(0));
        assert_eq!(animator.target_brightness(), 40);
        animator.tick(at(100));
        assert_eq!(animator.brightness(), 40);
        assert_eq!(animator.target_brightness(), 40);
    }

    #[test]
    fn test_send_latest_replaces_pending_readings() {
        let channel = CommandChannel::<3>::new();
        let sender = channel.sender();
        sender.try_send(RingCommand::SetSpeed(1.0)).expect("room");
        sender.try_send(RingCommand::SetFront(2)).expect("room");
        sender.try_send(RingCommand::SetBrightness(10)).expect("room");
        assert_eq!(channel.len(), 3);

        assert_eq!(sender.send_latest(RingCommand::SetSpeed(9.0)), Ok(()));
        assert_eq!(sender.send_latest(RingCommand::SetBrightness(90)), Ok(()));
        assert_eq!(
            sender.send_latest(RingCommand::SetFront(5)),
            Err(TrySendError(RingCommand::SetFront(5)))
        );
        assert_eq!(
            sender.send_latest(RingCommand::SetDirection(Direction::Reverse)),
            Err(TrySendError(RingCommand::SetDirection(Direction::Reverse)))
        );

        let receiver = channel.receiver();
        assert_eq!(receiver.try_receive(), Ok(RingCommand::SetSpeed(9.0)));
        assert_eq!(receiver.try_receive(), Ok(RingCommand::SetFront(2)));
        assert_eq!(receiver.try_receive(), Ok(RingCommand::SetBrightness(90)));
        assert!(channel.is_empty());

        assert_eq!(sender.send_latest(RingCommand::SetSpeed(3.0)), Ok(()));
        assert_eq!(receiver.try_receive(), Ok(RingCommand::SetSpeed(3.0)));
    }

    #[test]
    fn test_channel_is_bounded() {
        let channel = CommandChannel::<2>::new();
        let sender = channel.sender();
        assert!(sender.try_send(RingCommand::SetSpeed(1.0)).is_ok());
        assert!(sender.try_send(RingCommand::SetSpeed(2.0)).is_ok());
        assert_eq!(
            sender.try_send(RingCommand::SetSpeed(3.0)),
            Err(TrySendError(RingCommand::SetSpeed(3.0)))
        );
        assert_eq!(
            channel.receiver().try_receive(),
            Ok(RingCommand::SetSpeed(1.0))
        );
    }

    #[test]
    fn test_scheduler_writes_due_frames() {
        let channel = CommandChannel::<4>::new();
        let animator =
            Animator::<4, 4>::new(channel.receiver(), &AnimatorConfig::default()).expect("valid");
        let mut scheduler =
            FrameScheduler::new(animator, RecordingDriver::default(), SchedulerConfig::default());
        assert_eq!(scheduler.output().clears, 1);
        assert_eq!(scheduler.output().brightness, Some(50));

        let result = scheduler.tick(at(0));
        assert!(result.written);
        assert!(result.sleep_duration <= SchedulerConfig::default().idle_poll);

        let result = scheduler.tick(at(1));
        assert!(!result.written);
        assert_eq!(scheduler.output().frames.len(), 1);
        assert_eq!(scheduler.output().frames[0].len(), 4);

        scheduler.animator_mut().set_speed(255.0);
        assert_eq!(scheduler.animator().speed(), 255.0);

        scheduler.shutdown();
        assert_eq!(scheduler.output().clears, 2);
    }
}

mod tests {
    use embassy_time::{Duration, Instant};
    use french_word_clock::color::{BLACK, Rgb, lit_color};
    use french_word_clock::frame_scheduler::DEFAULT_FRAME_DURATION;
    use french_word_clock::topology::PIXEL_COUNT;
    use french_word_clock::{
        ClockConfig, ClockSource, DisplayOrchestrator, FrameScheduler, LightSensor, PixelBus,
        WallTime, Word,
    };

    struct FrameBus {
        pixels: [Rgb; PIXEL_COUNT],
        flushes: usize,
    }

    impl PixelBus for FrameBus {
        fn set_pixel(&mut self, index: usize, color: Rgb) {
            self.pixels[index] = color;
        }

        fn set_brightness(&mut self, _brightness: u8) {}

        fn flush(&mut self) {
            self.flushes += 1;
        }
    }

    struct DimSensor;

    impl LightSensor for DimSensor {
        fn sample(&mut self) -> u16 {
            2039
        }
    }

    struct ScriptedClock {
        time: WallTime,
        reads: usize,
    }

    impl ClockSource for ScriptedClock {
        fn now(&mut self) -> WallTime {
            self.reads += 1;
            self.time
        }
    }

    fn scheduler(time: WallTime) -> FrameScheduler<'static, ScriptedClock, FrameBus, DimSensor> {
        let bus = FrameBus {
            pixels: [BLACK; PIXEL_COUNT],
            flushes: 0,
        };
        let mut display = DisplayOrchestrator::new(bus, DimSensor, &ClockConfig::default());
        display.begin();
        FrameScheduler::new(ScriptedClock { time, reads: 0 }, display)
    }

    #[test]
    fn test_tick_reads_clock_and_renders() {
        let mut scheduler = scheduler(WallTime::new(2, 25, 0));
        let result = scheduler.tick(Instant::from_millis(0));
        assert_eq!(result.sleep_duration, DEFAULT_FRAME_DURATION);
        assert_eq!(result.next_deadline, Instant::from_millis(20));
        assert!(scheduler.display().compiler().shows(Word::VingtCinq));

        let mut now = 0;
        while now < 400 {
            now += 20;
            scheduler.tick(Instant::from_millis(now));
        }
        let display = scheduler.display();
        let state = display.compiler().state();
        for (index, lit) in state.iter().enumerate() {
            assert_eq!(display.bus().pixels[index], lit_color(lit));
        }
        assert_eq!(display.bus().flushes, 21);
        assert_eq!(scheduler.clock_mut().reads, 21);
    }

    #[test]
    fn test_clock_change_is_picked_up() {
        let mut scheduler = scheduler(WallTime::new(2, 25, 0));
        scheduler.tick(Instant::from_millis(0));
        scheduler.clock_mut().time = WallTime::new(2, 30, 0);
        scheduler.tick(Instant::from_millis(20));
        assert!(scheduler.display().compiler().shows(Word::Demi));
    }

    #[test]
    fn test_drift_correction() {
        let mut scheduler = scheduler(WallTime::new(2, 25, 0));
        scheduler.tick(Instant::from_millis(0));

        // Slightly late: keep the cadence
        let result = scheduler.tick(Instant::from_millis(25));
        assert_eq!(result.next_deadline, Instant::from_millis(40));
        assert_eq!(result.sleep_duration, Duration::from_millis(15));

        // Stalled: restart from now
        let result = scheduler.tick(Instant::from_millis(1000));
        assert_eq!(result.next_deadline, Instant::from_millis(1020));
        assert_eq!(result.sleep_duration, Duration::from_millis(20));
    }
}

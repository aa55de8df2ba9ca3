//! The periodic render-and-refresh loop.

use crate::display::{DisplayConfig, DisplayTransport, FrameComposer, DRAW_COMMAND};
use crate::error::{Result, StatusError};
use crate::sensors::SensorSource;
use std::time::Duration;
use tokio::time::{sleep_until, Instant};
use tracing::{debug, error, info, warn};

/// Lifecycle of a [`RefreshScheduler`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchedulerState {
    /// Cycles are being run
    Running,
    /// A transport failure stopped the loop; there is no way back
    Terminated(String),
}

/// Drives one display: wake, gather, compose, flush, sleep, repeat.
///
/// Wake-ups sit on a fixed grid of absolute deadlines `interval` apart, so
/// time spent reading sensors or talking to the panel does not accumulate
/// as drift.
pub struct RefreshScheduler<T, S> {
    transport: T,
    sensors: S,
    composer: FrameComposer,
    interval: Duration,
    cursor: Option<Instant>,
    cycles: u64,
    state: SchedulerState,
}

impl<T, S> RefreshScheduler<T, S>
where
    T: DisplayTransport,
    S: SensorSource,
{
    pub fn new(transport: T, sensors: S, composer: FrameComposer, interval: Duration) -> Self {
        Self {
            transport,
            sensors,
            composer,
            interval,
            cursor: None,
            cycles: 0,
            state: SchedulerState::Running,
        }
    }

    /// Build a scheduler using the interval and layout from `config`.
    pub fn from_config(transport: T, sensors: S, config: &DisplayConfig) -> Self {
        Self::new(
            transport,
            sensors,
            FrameComposer::new(config.layout),
            config.interval(),
        )
    }

    pub fn state(&self) -> &SchedulerState {
        &self.state
    }

    /// Number of frames successfully flushed.
    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn sensors(&self) -> &S {
        &self.sensors
    }

    pub fn composer(&self) -> &FrameComposer {
        &self.composer
    }

    /// Run cycles until the transport fails, returning that failure.
    pub async fn run(&mut self) -> Result<()> {
        info!(
            "Refreshing every {}ms ({:?} layout)",
            self.interval.as_millis(),
            self.composer.layout()
        );

        loop {
            self.tick().await?;
        }
    }

    /// Run one cycle, including the sleep up to its deadline.
    pub async fn tick(&mut self) -> Result<()> {
        if let SchedulerState::Terminated(reason) = &self.state {
            return Err(StatusError::transport(format!(
                "refresh loop already terminated: {reason}"
            )));
        }

        let deadline = self.cursor.unwrap_or_else(Instant::now) + self.interval;

        if let Err(err) = self.refresh().await {
            error!("Display refresh failed after {} cycles: {}", self.cycles, err);
            self.state = SchedulerState::Terminated(err.to_string());
            return Err(err);
        }
        self.cycles += 1;

        let now = Instant::now();
        if let Some(late) = overrun(deadline, now) {
            warn!("Cycle {} overran its deadline by {:?}", self.cycles, late);
            self.cursor = Some(now);
        } else {
            debug!("Cycle {} done, {:?} to spare", self.cycles, deadline - now);
            sleep_until(deadline).await;
            self.cursor = Some(deadline);
        }

        Ok(())
    }

    async fn refresh(&mut self) -> Result<()> {
        self.transport.send_command(DRAW_COMMAND).await?;

        let snapshot = self.sensors.snapshot();
        let frame = self.composer.compose(&snapshot);

        self.transport.send_buffer(frame).await
    }
}

/// How far past `deadline` a cycle ending at `now` ran, if at all.
fn overrun(deadline: Instant, now: Instant) -> Option<Duration> {
    (now > deadline).then(|| now - deadline)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::{DisplayBuffer, Layout};
    use crate::sensors::SensorSnapshot;

    #[derive(Default)]
    struct FlakyPanel {
        fail_command: bool,
        frames: usize,
    }

    impl DisplayTransport for FlakyPanel {
        async fn init(&mut self) -> Result<()> {
            Ok(())
        }

        async fn send_command(&mut self, _payload: &[u8]) -> Result<()> {
            if self.fail_command {
                return Err(StatusError::transport("Remote I/O error"));
            }
            Ok(())
        }

        async fn send_buffer(&mut self, _buffer: &DisplayBuffer) -> Result<()> {
            self.frames += 1;
            Ok(())
        }
    }

    #[derive(Default)]
    struct CountingSensors(usize);

    impl SensorSource for CountingSensors {
        fn snapshot(&mut self) -> SensorSnapshot {
            self.0 += 1;
            SensorSnapshot::default()
        }
    }

    fn scheduler(panel: FlakyPanel) -> RefreshScheduler<FlakyPanel, CountingSensors> {
        RefreshScheduler::new(
            panel,
            CountingSensors::default(),
            FrameComposer::new(Layout::OneWireServer),
            Duration::from_secs(1),
        )
    }

    #[tokio::test(start_paused = true)]
    async fn test_successful_tick_keeps_running() {
        let mut scheduler = scheduler(FlakyPanel::default());

        tokio_test::assert_ok!(scheduler.tick().await);
        assert_eq!(scheduler.state(), &SchedulerState::Running);
        assert_eq!(scheduler.cycles(), 1);
        assert_eq!(scheduler.transport().frames, 1);
        assert!(!scheduler.composer().buffer().is_blank());
    }

    #[tokio::test(start_paused = true)]
    async fn test_command_failure_terminates_before_reading_sensors() {
        let mut scheduler = scheduler(FlakyPanel {
            fail_command: true,
            ..Default::default()
        });

        let err = tokio_test::assert_err!(scheduler.run().await);
        assert!(err.is_fatal());
        assert_eq!(scheduler.sensors().0, 0);
        assert_eq!(scheduler.transport().frames, 0);
        assert!(matches!(scheduler.state(), SchedulerState::Terminated(_)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_no_transition_out_of_terminated() {
        let mut scheduler = scheduler(FlakyPanel {
            fail_command: true,
            ..Default::default()
        });
        tokio_test::assert_err!(scheduler.tick().await);

        scheduler.transport.fail_command = false;
        tokio_test::assert_err!(scheduler.tick().await);
        assert_eq!(scheduler.cycles(), 0);
        assert_eq!(scheduler.sensors().0, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_overrun_rebases_cursor() {
        let mut scheduler = RefreshScheduler::new(
            FlakyPanel::default(),
            CountingSensors::default(),
            FrameComposer::default(),
            Duration::ZERO,
        );

        let before = Instant::now();
        tokio_test::assert_ok!(scheduler.tick().await);
        assert_eq!(scheduler.cursor, Some(before));
    }

    #[tokio::test(start_paused = true)]
    async fn test_finishing_on_deadline_is_not_an_overrun() {
        let deadline = Instant::now() + Duration::from_secs(1);

        assert_eq!(overrun(deadline, deadline), None);
        assert_eq!(overrun(deadline, deadline - Duration::from_millis(1)), None);
        assert_eq!(
            overrun(deadline, deadline + Duration::from_millis(5)),
            Some(Duration::from_millis(5))
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_cycle_ending_on_deadline_stays_on_grid() {
        let mut scheduler = scheduler(FlakyPanel::default());
        let start = Instant::now();

        tokio_test::assert_ok!(scheduler.tick().await);
        tokio::time::advance(Duration::from_secs(1)).await;
        tokio_test::assert_ok!(scheduler.tick().await);
        assert_eq!(scheduler.cursor, Some(start + Duration::from_secs(2)));
    }
}

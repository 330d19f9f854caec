use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use cubesat_core::Swarm;

use crate::report::frame_report;
use crate::sink::FrameSink;

/// What happened during a run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub ticks: u64,
    pub frames: u64,
    pub recenter_events: u32,
    pub rescale_events: u32,
}

/// Drives a [`Swarm`] tick by tick and streams frames to a sink.
pub struct Runner {
    swarm: Swarm,
    report_every: u64,
    frame_interval: Option<Duration>,
}

impl Runner {
    pub fn new(swarm: Swarm) -> Self {
        Self {
            swarm,
            report_every: 1,
            frame_interval: None,
        }
    }

    /// Emit a frame every `ticks` ticks. Zero disables frames entirely.
    pub fn report_every(mut self, ticks: u64) -> Self {
        self.report_every = ticks;
        self
    }

    /// Pace the loop to `fps` ticks per second. Zero runs unthrottled.
    pub fn fps(mut self, fps: u32) -> Self {
        self.frame_interval = (fps > 0).then(|| Duration::from_secs_f64(1.0 / f64::from(fps)));
        self
    }

    pub fn swarm(&self) -> &Swarm {
        &self.swarm
    }

    /// Run for `ticks` ticks, or until the process is interrupted when `None`.
    pub fn run(&mut self, ticks: Option<u64>, sink: &mut dyn FrameSink) -> Result<RunSummary> {
        log::info!("Starting main loop...");
        let mut summary = RunSummary::default();
        let mut was_recentering = self.swarm.is_recentering();
        let mut was_rescaling = self.swarm.is_rescaling();

        while ticks.map_or(true, |limit| summary.ticks < limit) {
            let started = Instant::now();

            self.swarm.tick();
            summary.ticks += 1;

            let recentering = self.swarm.is_recentering();
            if recentering && !was_recentering {
                summary.recenter_events += 1;
                log::info!("Tick {}: recentering", self.swarm.tick_count());
            } else if !recentering && was_recentering {
                log::info!("Tick {}: recentering done", self.swarm.tick_count());
            }
            let rescaling = self.swarm.is_rescaling();
            if rescaling && !was_rescaling {
                summary.rescale_events += 1;
                log::info!("Tick {}: rescaling", self.swarm.tick_count());
            } else if !rescaling && was_rescaling {
                log::info!("Tick {}: rescaling done", self.swarm.tick_count());
            }
            was_recentering = recentering;
            was_rescaling = rescaling;

            if self.report_every > 0 && self.swarm.tick_count() % self.report_every == 0 {
                let tick = self.swarm.tick_count();
                sink.present(&frame_report(&self.swarm))
                    .with_context(|| format!("Failed to present frame {tick}"))?;
                summary.frames += 1;
            }

            if let Some(interval) = self.frame_interval {
                if let Some(rest) = interval.checked_sub(started.elapsed()) {
                    std::thread::sleep(rest);
                }
            }
        }

        sink.finish()?;
        log::info!(
            "Finished after {} ticks ({} recenters, {} rescales)",
            summary.ticks,
            summary.recenter_events,
            summary.rescale_events
        );
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::MemorySink;
    use cubesat_core::{SwarmConfig, Vector2D};

    fn swarm() -> Swarm {
        Swarm::builder(SwarmConfig::default())
            .seed(12)
            .fixed_target(Vector2D::new(400.0, 400.0))
            .random_agents(3, 1)
            .build()
            .unwrap()
    }

    #[test]
    fn test_runs_requested_ticks() {
        let mut runner = Runner::new(swarm()).report_every(10);
        let mut sink = MemorySink::default();
        let summary = runner.run(Some(100), &mut sink).unwrap();

        assert_eq!(summary.ticks, 100);
        assert_eq!(summary.frames, 10);
        assert_eq!(runner.swarm().tick_count(), 100);
        let ticks: Vec<_> = sink.frames.iter().map(|f| f.tick).collect();
        assert_eq!(ticks, (1..=10).map(|i| i * 10).collect::<Vec<_>>());
    }

    #[test]
    fn test_zero_report_interval_emits_nothing() {
        let mut runner = Runner::new(swarm()).report_every(0);
        let mut sink = MemorySink::default();
        runner.run(Some(25), &mut sink).unwrap();
        assert!(sink.frames.is_empty());
    }
}

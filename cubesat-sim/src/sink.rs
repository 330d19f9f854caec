use std::io::Write;

use anyhow::{Context, Result};
use cubesat_shared::FrameReport;

/// Receives frames from the tick loop. Stands in for a renderer.
pub trait FrameSink {
    fn present(&mut self, frame: &FrameReport) -> Result<()>;

    fn finish(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Writes one JSON object per frame, newline separated.
///
/// Every frame is flushed as soon as it is written, so an interrupted run
/// loses nothing it already presented.
pub struct JsonLinesSink<W: Write> {
    writer: W,
}

impl<W: Write> JsonLinesSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> FrameSink for JsonLinesSink<W> {
    fn present(&mut self, frame: &FrameReport) -> Result<()> {
        serde_json::to_writer(&mut self.writer, frame).context("Failed to encode frame")?;
        self.writer
            .write_all(b"\n")
            .context("Failed to write frame")?;
        self.writer.flush().context("Failed to flush frame")
    }

    fn finish(&mut self) -> Result<()> {
        self.writer.flush().context("Failed to flush frames")
    }
}

/// Keeps every frame in memory
#[derive(Debug, Default)]
pub struct MemorySink {
    pub frames: Vec<FrameReport>,
}

impl FrameSink for MemorySink {
    fn present(&mut self, frame: &FrameReport) -> Result<()> {
        self.frames.push(frame.clone());
        Ok(())
    }
}

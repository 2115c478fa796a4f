use std::io::Write;

use tokio::sync::mpsc;

use crate::error::{RenderError, Result};
use crate::frame::Frame;

/// Receives every finished frame, one call per tick.
///
/// Called from the frame loop task and expected to return promptly. An
/// error stops the loop.
pub trait FrameSink: Send {
    fn publish(&mut self, frame: Frame) -> Result<()>;
}

impl<S: FrameSink + ?Sized> FrameSink for Box<S> {
    fn publish(&mut self, frame: Frame) -> Result<()> {
        (**self).publish(frame)
    }
}

/// Forwards frames over an unbounded channel.
pub struct ChannelSink {
    tx: mpsc::UnboundedSender<Frame>,
}

impl ChannelSink {
    pub fn new(tx: mpsc::UnboundedSender<Frame>) -> Self {
        Self { tx }
    }

    pub fn channel() -> (Self, mpsc::UnboundedReceiver<Frame>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self::new(tx), rx)
    }
}

impl FrameSink for ChannelSink {
    fn publish(&mut self, frame: Frame) -> Result<()> {
        self.tx
            .send(frame)
            .map_err(|_| RenderError::Sink("frame receiver dropped".to_string()))
    }
}

/// Writes raw RGBA bytes back to back, flushing after each frame.
pub struct WriterSink<W> {
    writer: W,
}

impl<W: Write + Send> WriterSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write + Send> FrameSink for WriterSink<W> {
    fn publish(&mut self, frame: Frame) -> Result<()> {
        self.writer.write_all(frame.data())?;
        self.writer.flush()?;
        Ok(())
    }
}

/// Drops every frame, counting them.
#[derive(Debug, Default)]
pub struct NullSink {
    pub frames: u64,
}

impl FrameSink for NullSink {
    fn publish(&mut self, _frame: Frame) -> Result<()> {
        self.frames += 1;
        Ok(())
    }
}

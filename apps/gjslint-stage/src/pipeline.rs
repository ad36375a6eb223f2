//! The output side of the stage and a small async driver.
//!
//! A pipeline host implements [`Output`] to receive files and errors. Two
//! implementations ship here: [`Collected`] gathers everything in memory,
//! and [`ChannelOutput`] forwards events to a tokio channel for a downstream
//! task.

use crate::error::PluginError;
use crate::linter::Linter;
use crate::models::SourceFile;
use crate::stage::Stage;
use tokio::sync::mpsc;
use tracing::debug;

/// Receiver of everything the stage emits.
pub trait Output {
    /// Pass a file to the next stage.
    fn push(&mut self, file: SourceFile);
    /// Raise an error on the stream's error channel.
    fn emit_error(&mut self, err: PluginError);
    /// Signal that no more files or errors will follow.
    fn finish(&mut self);
}

#[derive(Debug)]
/// One event on the output side.
pub enum StageEvent {
    File(SourceFile),
    Error(PluginError),
    Finished,
}

#[derive(Debug, Default)]
/// In-memory output.
pub struct Collected {
    pub files: Vec<SourceFile>,
    pub errors: Vec<PluginError>,
    pub finished: bool,
}

impl Output for Collected {
    fn push(&mut self, file: SourceFile) {
        self.files.push(file);
    }

    fn emit_error(&mut self, err: PluginError) {
        self.errors.push(err);
    }

    fn finish(&mut self) {
        self.finished = true;
    }
}

/// Forwards events to an unbounded channel. Events sent after the receiver
/// is dropped are discarded.
#[derive(Debug, Clone)]
pub struct ChannelOutput {
    tx: mpsc::UnboundedSender<StageEvent>,
}

impl ChannelOutput {
    pub fn new(tx: mpsc::UnboundedSender<StageEvent>) -> Self {
        Self { tx }
    }

    fn send(&self, ev: StageEvent) {
        if self.tx.send(ev).is_err() {
            debug!("Output receiver dropped; discarding event");
        }
    }
}

impl Output for ChannelOutput {
    fn push(&mut self, file: SourceFile) {
        self.send(StageEvent::File(file));
    }

    fn emit_error(&mut self, err: PluginError) {
        self.send(StageEvent::Error(err));
    }

    fn finish(&mut self) {
        self.send(StageEvent::Finished);
    }
}

/// Feed every file from `input` into the stage, then finalize once the
/// sender side closes.
pub async fn drive<L, O>(stage: &mut Stage<L>, mut input: mpsc::Receiver<SourceFile>, out: &mut O)
where
    L: Linter,
    O: Output,
{
    while let Some(file) = input.recv().await {
        stage.ingest(file, out);
    }
    stage.finalize(out).await;
}

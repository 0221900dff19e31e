use std::{fmt::Display, io, sync::Arc, time::Duration};

use tokio::{
    io::{AsyncWrite, AsyncWriteExt},
    time,
};

use crate::counter::Counters;

/// What one display shows
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Status {
    pub megabytes: f64,
    pub files: u64,
}

impl Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Uploaded total [ {:.3} MB ] at speed [ {} files/sec ]",
            self.megabytes, self.files
        )
    }
}

/// Periodically prints the shared counters.
///
/// The file counter is a short window: it's reset every `reset_every`
/// displays, so with the default 500ms interval it approximates files per
/// second.
pub struct Reporter {
    counters: Arc<Counters>,
    interval: Duration,
    reset_every: u64,
    displays: u64,
}

impl Reporter {
    pub fn new(counters: Arc<Counters>, interval: Duration, reset_every: u64) -> Self {
        Self {
            counters,
            interval,
            reset_every: reset_every.max(1),
            displays: 0,
        }
    }
    pub fn tick(&mut self) -> Status {
        self.displays += 1;
        let status = Status {
            megabytes: self.counters.megabytes(),
            files: self.counters.files(),
        };
        if self.displays % self.reset_every == 0 {
            self.counters.reset_files();
        }
        status
    }
    /// Print forever, returns only when the output can't be written.
    pub async fn run<W: AsyncWrite + Unpin>(mut self, mut output: W) -> io::Result<()> {
        let mut interval = time::interval(self.interval);
        interval.set_missed_tick_behavior(time::MissedTickBehavior::Delay);
        // first tick completes immediately
        interval.tick().await;
        loop {
            interval.tick().await;
            let status = self.tick();
            log::trace!("display {}", self.displays);
            output.write_all(format!("{}\n", status).as_bytes()).await?;
            output.flush().await?;
        }
    }
}

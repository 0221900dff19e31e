use std::{future::Future, io};

/// Process state as seen by the interrupt handler.
///
/// `Interrupted` is terminal, once entered the process either exits or keeps
/// running in it until killed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    Running,
    Interrupted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Ignore,
    Exit,
}

pub struct Supervisor {
    ignore_interrupt: bool,
    state: Lifecycle,
    interrupts: u64,
}

impl Supervisor {
    pub fn new(ignore_interrupt: bool) -> Self {
        Self {
            ignore_interrupt,
            state: Lifecycle::Running,
            interrupts: 0,
        }
    }
    pub fn state(&self) -> Lifecycle {
        self.state
    }
    pub fn interrupts(&self) -> u64 {
        self.interrupts
    }
    pub fn interrupt(&mut self) -> Action {
        self.state = Lifecycle::Interrupted;
        self.interrupts += 1;
        if self.ignore_interrupt {
            println!("Keyboard interrupt detected, but ignoring it...");
            Action::Ignore
        } else {
            log::info!("Interrupted, exiting");
            Action::Exit
        }
    }
    /// Wait on `signal` until an interrupt should end the process.
    ///
    /// Never returns while interrupts are ignored. If the signal can't be
    /// listened to, idles forever.
    pub async fn watch<F, Fut>(&mut self, mut signal: F)
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = io::Result<()>>,
    {
        loop {
            if let Err(err) = signal().await {
                log::error!("Unable to listen for interrupt: {}", err);
                std::future::pending::<()>().await;
            }
            if self.interrupt() == Action::Exit {
                return;
            }
        }
    }
}

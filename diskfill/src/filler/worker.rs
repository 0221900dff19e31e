use std::{io::Write, sync::Arc};

use uuid::Uuid;

use super::{Method, Sizing, Storage};
use crate::{counter::Counters, error::Error};

/// Why a worker stopped
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StopReason {
    NoSpace,
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum State {
    Running,
    Stopped(StopReason),
}

/// Name of a fresh temporary file for the method
pub fn temp_name(method: Method) -> String {
    format!(".___tmp_{}_{}", method, Uuid::new_v4())
}

/// Write the diagnostic for a stopped filler and turn the error into a reason.
pub(super) fn report_stop(method: Method, err: Error, output: &mut dyn Write) -> StopReason {
    let (line, reason) = match err {
        Error::NoSpace => (
            format!("No more space on the host ({}).", method),
            StopReason::NoSpace,
        ),
        err => (
            format!("Error in {}: {}", method, err),
            StopReason::Failed(err.to_string()),
        ),
    };
    if let Err(err) = writeln!(output, "{}", line) {
        log::warn!("Unable to print diagnostic of {}: {}", method, err);
    }
    reason
}

/// One filler: creates and fills files with a single method until the
/// storage refuses.
///
/// Once stopped a worker never creates another file.
pub struct Worker<S: Storage> {
    method: Method,
    storage: Arc<S>,
    sizing: Sizing,
    counters: Arc<Counters>,
    state: State,
    files: u64,
    output: Box<dyn Write + Send>,
}

impl<S: Storage> Worker<S> {
    pub fn new(method: Method, storage: Arc<S>, sizing: Sizing, counters: Arc<Counters>) -> Self {
        Self {
            method,
            storage,
            sizing,
            counters,
            state: State::Running,
            files: 0,
            output: Box::new(std::io::stdout()),
        }
    }
    /// Send stop diagnostics somewhere else than stdout
    pub fn with_output(mut self, output: impl Write + Send + 'static) -> Self {
        self.output = Box::new(output);
        self
    }
    pub fn method(&self) -> Method {
        self.method
    }
    pub fn state(&self) -> &State {
        &self.state
    }
    /// files this worker filled completely
    pub fn files(&self) -> u64 {
        self.files
    }
    fn step(&mut self) -> Result<(), Error> {
        let name = temp_name(self.method);
        let mut file = self.storage.create(&name)?;
        self.method
            .populate(&mut file, &self.sizing, &self.counters)?;
        self.counters.file_created();
        drop(file);
        self.files += 1;
        Ok(())
    }
    /// Fill files until an error stops the worker.
    pub fn run(&mut self) -> StopReason {
        loop {
            if let State::Stopped(reason) = &self.state {
                return reason.clone();
            }
            if let Err(err) = self.step() {
                log::debug!("{} stopped after {} files: {}", self.method, self.files, err);
                self.state =
                    State::Stopped(report_stop(self.method, err, self.output.as_mut()));
            }
        }
    }
}

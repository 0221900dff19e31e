use std::{
    fs::{File, OpenOptions},
    io::{self, Seek, Write},
    path::PathBuf,
};

/// Where fillers create their files.
pub trait Storage: Send + Sync + 'static {
    type File: Write + Seek;
    /// Create a new file, failing if the name is already taken
    fn create(&self, name: &str) -> io::Result<Self::File>;
}

/// Plain directory on the host filesystem
pub struct Directory {
    root: PathBuf,
}

impl Directory {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl Storage for Directory {
    type File = File;
    fn create(&self, name: &str) -> io::Result<File> {
        OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(self.root.join(name))
    }
}

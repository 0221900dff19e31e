use std::{io, path::Path};

use rustix::fs::{statvfs, StatVfsMountFlags};

use super::config::{Filler, CONFIG};
use crate::error::Error;

/// Free room on the filesystem holding the target directory
#[derive(Debug, Clone, Copy)]
pub struct Space {
    pub available_bytes: u64,
    pub available_inodes: u64,
}

pub fn space(path: &Path) -> Result<Space, Error> {
    let stat = statvfs(path).map_err(io::Error::from)?;
    if stat.f_flag.contains(StatVfsMountFlags::RDONLY) {
        return Err(Error::IO(io::Error::new(
            io::ErrorKind::PermissionDenied,
            "target filesystem is mounted read-only",
        )));
    }
    Ok(Space {
        available_bytes: stat.f_bavail.saturating_mul(stat.f_frsize),
        available_inodes: stat.f_favail,
    })
}

fn check(filler: &Filler) -> Result<Space, Error> {
    let meta = filler.directory.metadata()?;
    if !meta.is_dir() {
        return Err(Error::IO(io::Error::new(
            io::ErrorKind::InvalidInput,
            "target is not a directory",
        )));
    }
    space(&filler.directory)
}

// Check the target before filling it
// abort if necessary
pub fn init() {
    let config = CONFIG.get().unwrap();
    let filler = &config.filler;

    match check(filler) {
        Ok(space) => log::info!(
            "{} has {} MB and {} inodes available",
            filler.directory.display(),
            space.available_bytes / (1024 * 1024),
            space.available_inodes
        ),
        Err(err) => {
            log::error!(
                "Unable to fill {}: {}",
                filler.directory.display(),
                err
            );
            std::process::exit(1);
        }
    }

    if filler.methods.is_empty() {
        log::warn!("config.filler.methods is empty, only the reporter will run");
    }

    if let Some(warning) = pool_warning(filler) {
        log::warn!("{}", warning);
    }
}

fn pool_warning(filler: &Filler) -> Option<String> {
    (filler.max_workers < filler.methods.len()).then(|| {
        format!(
            "config.filler.max_workers({}) is lower than the number of methods({}), some methods start only after another filler stops",
            filler.max_workers,
            filler.methods.len()
        )
    })
}

use std::{
    fmt::Display,
    io::{self, Seek, SeekFrom, Write},
};

use rand::RngCore;
use serde::{Deserialize, Serialize};

use crate::counter::Counters;

const MB: usize = 1024 * 1024;

/// How a single temporary file consumes space
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Method {
    /// the same zeroed block written over and over
    DirectWrite,
    /// fresh random bytes for every block, defeats compression and dedup
    RandomData,
    /// one byte at the far end of the file, leaving a hole
    SparseFiles,
    /// many tiny writes, stresses metadata more than blocks
    SmallFiles,
}

impl Method {
    pub const ALL: [Method; 4] = [
        Method::DirectWrite,
        Method::RandomData,
        Method::SparseFiles,
        Method::SmallFiles,
    ];

    pub fn tag(&self) -> &'static str {
        match self {
            Method::DirectWrite => "direct_write",
            Method::RandomData => "random_data",
            Method::SparseFiles => "sparse_files",
            Method::SmallFiles => "small_files",
        }
    }

    /// Write one file's worth of data, counting bytes as each write lands.
    pub fn populate<F: Write + Seek>(
        &self,
        file: &mut F,
        sizing: &Sizing,
        counters: &Counters,
    ) -> io::Result<()> {
        match self {
            Method::DirectWrite => direct_write(file, sizing, counters),
            Method::RandomData => random_data(file, sizing, counters),
            Method::SparseFiles => sparse_file(file, sizing, counters),
            Method::SmallFiles => small_writes(file, sizing, counters),
        }
    }
}

impl Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.tag())
    }
}

/// Byte sizes used by the methods
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sizing {
    pub block_size: usize,
    pub blocks_per_file: usize,
    pub sparse_size: u64,
    pub small_block: usize,
    pub small_writes: usize,
}

impl Default for Sizing {
    fn default() -> Self {
        Self {
            block_size: 10 * MB,
            blocks_per_file: 100,
            sparse_size: 1024 * MB as u64,
            small_block: 1024,
            small_writes: 1024,
        }
    }
}

fn direct_write<F: Write>(file: &mut F, sizing: &Sizing, counters: &Counters) -> io::Result<()> {
    let block = vec![0u8; sizing.block_size];
    for _ in 0..sizing.blocks_per_file {
        file.write_all(&block)?;
        counters.add_bytes(block.len() as u64);
    }
    Ok(())
}

fn random_data<F: Write>(file: &mut F, sizing: &Sizing, counters: &Counters) -> io::Result<()> {
    let mut rng = rand::thread_rng();
    let mut block = vec![0u8; sizing.block_size];
    for _ in 0..sizing.blocks_per_file {
        rng.fill_bytes(&mut block);
        file.write_all(&block)?;
        counters.add_bytes(block.len() as u64);
    }
    Ok(())
}

fn sparse_file<F: Write + Seek>(
    file: &mut F,
    sizing: &Sizing,
    counters: &Counters,
) -> io::Result<()> {
    file.seek(SeekFrom::Start(sizing.sparse_size - 1))?;
    file.write_all(&[0])?;
    counters.add_bytes(sizing.sparse_size);
    Ok(())
}

fn small_writes<F: Write>(file: &mut F, sizing: &Sizing, counters: &Counters) -> io::Result<()> {
    let block = vec![0u8; sizing.small_block];
    for _ in 0..sizing.small_writes {
        file.write_all(&block)?;
        counters.add_bytes(block.len() as u64);
    }
    Ok(())
}

use std::io::{self, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::Result;
use serde::Serialize;

use crate::model::Test;

pub const DEFAULT_OUTPUT_FILE: &str = "tests.json";

/// Where json documents go.
#[derive(Debug, Clone)]
pub enum JsonWriter {
    File(PathBuf),
    Stdout,
}

impl JsonWriter {
    /// Writes `value` as one pretty printed document, replacing any previous file.
    pub fn write<T: Serialize + ?Sized>(&self, value: &T) -> Result<()> {
        match self {
            Self::File(path) => {
                let file = fs_err::File::create(path)?;
                write_pretty(BufWriter::new(file), value)
            }
            Self::Stdout => write_pretty(io::stdout().lock(), value),
        }
    }
}

fn write_pretty<W: Write, T: Serialize + ?Sized>(mut wtr: W, value: &T) -> Result<()> {
    serde_json::to_writer_pretty(&mut wtr, value)?;
    wtr.write_all(b"\n")?;
    wtr.flush()?;
    Ok(())
}

pub fn write_tests<P: AsRef<Path>>(path: P, tests: &[Test]) -> Result<()> {
    JsonWriter::File(path.as_ref().to_path_buf()).write(tests)
}

pub fn read_tests<P: AsRef<Path>>(path: P) -> Result<Vec<Test>> {
    let file = fs_err::File::open(path.as_ref())?;
    Ok(serde_json::from_reader(BufReader::new(file))?)
}

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};

pub fn init_logging(max_level: &str) {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(max_level))
        .try_init();
}

pub fn open_reader(path: &str) -> Result<BufReader<File>> {
    let file = File::open(path).with_context(|| format!("Failed to open {}", path))?;
    Ok(BufReader::new(file))
}

/// Creates `path` for writing, along with any missing parent directories.
pub fn create_writer(path: &str) -> Result<BufWriter<File>> {
    if let Some(parent) = Path::new(path).parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }
    }
    let file = File::create(path).with_context(|| format!("Failed to create {}", path))?;
    Ok(BufWriter::new(file))
}

/// Writes `text` to `path`, or to stdout when no path is given.
pub fn write_output(path: Option<&str>, text: &str) -> Result<()> {
    match path {
        Some(path) => {
            let mut writer = create_writer(path)?;
            writer.write_all(text.as_bytes())?;
            writer.write_all(b"\n")?;
            writer.flush()?;
        }
        None => println!("{}", text),
    }
    Ok(())
}

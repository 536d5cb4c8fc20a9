use std::{
    fs::{self, File},
    io::{BufReader, BufWriter, Write},
    path::Path,
};

/// Create a regular file.
pub fn create_file<P: AsRef<Path>>(path: P) -> Result<File, std::io::Error> {
    let file = File::create(path)?;

    Ok(file)
}

/// Efficiently write data into the file system as it gets encoded on the fly using `bincode`.
///
/// The data is first written to a sibling temporary file that then replaces `path`, so a crash
/// in the middle of the write never leaves a truncated file behind.
pub fn serialize_to_file<D>(data: &D, path: &Path) -> Result<(), failure::Error>
where
    D: serde::Serialize,
{
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let tmp_path = path.with_extension("tmp");

    // Create file, serialize and write
    let file = create_file(&tmp_path)?;
    let mut writer = BufWriter::new(file);
    bincode::serialize_into(&mut writer, data)?;
    writer.flush()?;
    fs::rename(&tmp_path, path)?;

    Ok(())
}

/// Efficiently read data from the file system as it gets decoded on the fly using `bincode`.
pub fn deserialize_from_file<D>(path: &Path) -> Result<D, failure::Error>
where
    D: serde::de::DeserializeOwned,
{
    // Read file, deserialize and return
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let data = bincode::deserialize_from(reader)?;

    Ok(data)
}

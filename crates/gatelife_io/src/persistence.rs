//! Snapshot files: zero-copy rkyv archives and gzip-compressed JSON.

use crate::error::{IoError, Result};
use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use rkyv::de::deserializers::SharedDeserializeMap;
use rkyv::ser::serializers::AllocSerializer;
use rkyv::ser::Serializer;
use rkyv::{Archive, Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

/// Archives `data` with rkyv and writes it to `path`. Errors carry the path.
pub fn save_rkyv<T, P>(data: &T, path: P) -> Result<()>
where
    T: Serialize<AllocSerializer<4096>>,
    T: Archive,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let mut serializer = AllocSerializer::<4096>::default();
    serializer
        .serialize_value(data)
        .map_err(|e| {
            IoError::rkyv(format!("archiving failed: {e:?}")).with_context(path.display().to_string())
        })?;
    let bytes = serializer.into_serializer().into_inner();
    let mut writer = BufWriter::new(File::create(path)?);
    writer.write_all(&bytes)?;
    writer.flush()?;
    Ok(())
}

/// Reads a snapshot archive written by [`save_rkyv`], checking the archive
/// before rebuilding it. A missing file is [`IoError::NotFound`].
pub fn load_rkyv<T, P>(path: P) -> Result<T>
where
    T: Archive,
    T::Archived: Deserialize<T, SharedDeserializeMap>
        + for<'a> rkyv::CheckBytes<rkyv::validation::validators::DefaultValidator<'a>>,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    if !path.exists() {
        return Err(IoError::not_found(path.display().to_string()));
    }
    let bytes = std::fs::read(path)?;
    let rebuilt = rkyv::check_archived_root::<T>(&bytes)
        .map_err(|e| IoError::rkyv(format!("archive check failed: {e:?}")))
        .and_then(|archived| {
            archived
                .deserialize(&mut SharedDeserializeMap::default())
                .map_err(|e| IoError::rkyv(format!("rebuild failed: {e:?}")))
        });
    rebuilt.map_err(|e| e.with_context(path.display().to_string()))
}

pub fn save_json_gz<T, P>(data: &T, path: P) -> Result<()>
where
    T: serde::Serialize,
    P: AsRef<Path>,
{
    let file = File::create(path)?;
    let mut encoder = GzEncoder::new(BufWriter::new(file), Compression::default());
    serde_json::to_writer(&mut encoder, data)?;
    encoder
        .finish()
        .map_err(|e| IoError::compression(e.to_string()))?
        .flush()?;
    Ok(())
}

pub fn load_json_gz<T, P>(path: P) -> Result<T>
where
    T: for<'de> serde::Deserialize<'de>,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    if !path.exists() {
        return Err(IoError::not_found(path.display().to_string()));
    }
    let file = File::open(path)?;
    let mut decoder = GzDecoder::new(BufReader::new(file));
    let mut decoded = Vec::new();
    decoder
        .read_to_end(&mut decoded)
        .map_err(|e| IoError::compression(e.to_string()))?;
    Ok(serde_json::from_slice(&decoded)?)
}

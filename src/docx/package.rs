use std::fs::File;
use std::io::{self, BufReader, BufWriter, Read, Seek, Write};
use std::path::Path;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, DateTime, ZipArchive, ZipWriter};

use crate::error::PackageError;

/// One member of the document archive, held in memory.
#[derive(Debug, Clone)]
pub struct Entry {
    name: String,
    data: Vec<u8>,
    compression: CompressionMethod,
    modified: Option<DateTime>,
    unix_mode: Option<u32>,
    is_dir: bool,
}

impl Entry {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }
}

/// The ZIP container of a `.docx` file.
///
/// Entries keep their order and metadata so writing an unchanged package
/// reproduces the same bytes every time.
#[derive(Debug, Clone, Default)]
pub struct Package {
    entries: Vec<Entry>,
}

impl Package {
    pub fn open(path: &Path) -> Result<Self, PackageError> {
        let file = File::open(path)?;
        Self::read(BufReader::new(file))
    }

    pub fn read<R: Read + Seek>(reader: R) -> Result<Self, PackageError> {
        let mut archive = ZipArchive::new(reader)?;
        let mut entries = Vec::new();
        for i in 0..archive.len() {
            let mut file = archive.by_index(i)?;
            let mut data = Vec::new();
            file.read_to_end(&mut data)?;
            entries.push(Entry {
                name: file.name().to_string(),
                compression: file.compression(),
                modified: file.last_modified().into(),
                unix_mode: file.unix_mode(),
                is_dir: file.is_dir(),
                data,
            });
        }
        Ok(Self { entries })
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(Entry::name)
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn get(&self, name: &str) -> Option<&[u8]> {
        self.entries
            .iter()
            .find(|e| e.name == name)
            .map(|e| e.data.as_slice())
    }

    /// Replaces the content of `name`, or appends a new deflated entry.
    pub fn set(&mut self, name: &str, data: Vec<u8>) {
        match self.entries.iter_mut().find(|e| e.name == name) {
            Some(entry) => entry.data = data,
            None => self.entries.push(Entry {
                name: name.to_string(),
                data,
                compression: CompressionMethod::Deflated,
                modified: None,
                unix_mode: None,
                is_dir: false,
            }),
        }
    }

    pub fn write<W: Write + Seek>(&self, writer: W) -> Result<W, PackageError> {
        let mut zip = ZipWriter::new(writer);
        for entry in &self.entries {
            let method = match entry.compression {
                CompressionMethod::Stored => CompressionMethod::Stored,
                _ => CompressionMethod::Deflated,
            };
            let mut options = SimpleFileOptions::default()
                .compression_method(method)
                .last_modified_time(entry.modified.unwrap_or_default());
            if let Some(mode) = entry.unix_mode {
                options = options.unix_permissions(mode);
            }
            if entry.is_dir {
                zip.add_directory(entry.name.as_str(), options)?;
            } else {
                zip.start_file(entry.name.as_str(), options)?;
                zip.write_all(&entry.data)?;
            }
        }
        Ok(zip.finish()?)
    }

    /// Writes the package to `path`, replacing any existing file.
    pub fn save(&self, path: &Path) -> io::Result<()> {
        let file = File::create(path)?;
        let mut writer = self.write(BufWriter::new(file)).map_err(|e| match e {
            PackageError::Io(err) => err,
            other => io::Error::other(other),
        })?;
        writer.flush()
    }
}

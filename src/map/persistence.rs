//! Binary terrain file format.
//!
//! Fixed field order, little-endian, no header or version tag:
//!
//! 1. `i32` width, `i32` height
//! 2. per cell in row-major order: `i32` surface type, `f32` height
//! 3. `i32` object count, then per object: `i32` type, `i32` x, `i32` y,
//!    and position, rotation, scale as three `f32` triples
//!
//! Only persisted fields live here; cost, walkability, links and set ids are
//! always recomputed after loading.

use crate::errors::{TerrainError, TerrainResult};
use crate::map::{MapObject, ObjectKind, ObjectTransform};
use crate::terrain::constants::MAX_GRID_CELLS;
use crate::terrain::coordinates::GridCoord;
use bincode::config::{Configuration, Fixint, LittleEndian, NoLimit};
use glam::Vec3;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

type FileConfig = Configuration<LittleEndian, Fixint, NoLimit>;

fn file_config() -> FileConfig {
    bincode::config::legacy()
}

/// Persisted state of one tile
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellRecord {
    pub surface: i32,
    pub height: f32,
}

/// Contents of a terrain file, possibly partial
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MapFile {
    pub width: i32,
    pub height: i32,
    pub cells: Vec<CellRecord>,
    pub objects: Vec<MapObject>,
    /// False when the input ended or went bad before the last field
    pub complete: bool,
}

struct FieldReader<'a, R: Read> {
    reader: &'a mut R,
}

impl<R: Read> FieldReader<'_, R> {
    fn next<T: DeserializeOwned>(&mut self) -> Option<T> {
        match bincode::serde::decode_from_std_read(&mut *self.reader, file_config()) {
            Ok(value) => Some(value),
            Err(e) => {
                debug!("Map read stopped: {e}");
                None
            }
        }
    }
}

fn write_field<W: Write, T: Serialize>(writer: &mut W, value: &T) -> TerrainResult<()> {
    bincode::serde::encode_into_std_write(value, writer, file_config()).map_err(|e| {
        TerrainError::InvalidMapData {
            reason: format!("Failed to encode map field: {e}"),
        }
    })?;
    Ok(())
}

impl MapFile {
    /// Directory map files are resolved against
    pub fn get_maps_dir() -> TerrainResult<PathBuf> {
        Ok(std::env::current_dir()?.join("maps"))
    }

    /// Resolve a map file name: absolute paths are kept, relative ones land in the maps dir
    pub fn resolve_path<P: AsRef<Path>>(filename: P) -> TerrainResult<PathBuf> {
        let path = filename.as_ref();
        if path.is_absolute() {
            return Ok(path.to_path_buf());
        }
        Ok(Self::get_maps_dir()?.join(path))
    }

    pub fn cell_count(&self) -> usize {
        self.width.max(0) as usize * self.height.max(0) as usize
    }

    /// Write every field in file order
    pub fn write_to<W: Write>(&self, writer: &mut W) -> TerrainResult<()> {
        if self.cells.len() != self.cell_count() {
            return Err(TerrainError::InvalidMapData {
                reason: format!(
                    "{} cell records do not match dimensions {}x{}",
                    self.cells.len(),
                    self.width,
                    self.height
                ),
            });
        }

        write_field(writer, &self.width)?;
        write_field(writer, &self.height)?;
        for cell in &self.cells {
            write_field(writer, &cell.surface)?;
            write_field(writer, &cell.height)?;
        }

        let count = i32::try_from(self.objects.len()).map_err(|_| TerrainError::InvalidMapData {
            reason: format!("Too many objects to persist: {}", self.objects.len()),
        })?;
        write_field(writer, &count)?;
        for object in &self.objects {
            write_field(writer, &object.kind.as_i32())?;
            write_field(writer, &object.map_pos.x)?;
            write_field(writer, &object.map_pos.y)?;
            write_field(writer, &object.transform.position.to_array())?;
            write_field(writer, &object.transform.rotation.to_array())?;
            write_field(writer, &object.transform.scale.to_array())?;
        }

        writer.flush()?;
        Ok(())
    }

    /// Read as many fields as the input provides.
    ///
    /// Never fails: truncated or malformed input yields whatever was consumed
    /// with `complete == false`.
    pub fn read_from<R: Read>(reader: &mut R) -> Self {
        let mut map = MapFile::default();
        let mut fields = FieldReader { reader };
        map.complete = map.read_body(&mut fields).is_some();

        if !map.complete {
            warn!(
                "Map input incomplete: {}x{} grid, {} cells and {} objects recovered",
                map.width,
                map.height,
                map.cells.len(),
                map.objects.len()
            );
        }
        map
    }

    fn read_body<R: Read>(&mut self, fields: &mut FieldReader<'_, R>) -> Option<()> {
        self.width = fields.next()?;
        self.height = fields.next()?;

        let too_large = self.cell_count() > MAX_GRID_CELLS;
        if self.width < 0 || self.height < 0 || too_large {
            warn!(
                "Rejecting map dimensions {}x{} (limit {MAX_GRID_CELLS} cells)",
                self.width, self.height
            );
            self.width = 0;
            self.height = 0;
            return None;
        }

        for _ in 0..self.cell_count() {
            let surface = fields.next()?;
            let height = fields.next()?;
            self.cells.push(CellRecord { surface, height });
        }

        let count: i32 = fields.next()?;
        for _ in 0..count.max(0) {
            let kind: i32 = fields.next()?;
            let x: i32 = fields.next()?;
            let y: i32 = fields.next()?;
            let position: [f32; 3] = fields.next()?;
            let rotation: [f32; 3] = fields.next()?;
            let scale: [f32; 3] = fields.next()?;

            self.objects.push(MapObject::new(
                ObjectKind::from_i32(kind),
                GridCoord::new(x, y),
                ObjectTransform::new(
                    Vec3::from_array(position),
                    Vec3::from_array(rotation),
                    Vec3::from_array(scale),
                ),
            ));
        }
        Some(())
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> TerrainResult<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let mut writer = BufWriter::new(File::create(path)?);
        self.write_to(&mut writer)
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> TerrainResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(TerrainError::MapFileNotFound {
                path: path.to_path_buf(),
            });
        }
        let mut reader = BufReader::new(File::open(path)?);
        Ok(Self::read_from(&mut reader))
    }
}

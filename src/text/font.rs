use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;

use crate::foundation::error::{MemeError, MemeResult};

/// Family names tried, in order, when discovering a caption font among system fonts.
///
/// Impact is the classic meme face; the rest are heavy, wide display or sans faces commonly
/// available on Linux/macOS/Windows that read similarly at large sizes.
pub const CAPTION_FAMILIES: &[&str] = &[
    "Impact",
    "Anton",
    "Arial Black",
    "Oswald",
    "Liberation Sans",
    "DejaVu Sans",
];

/// Raw font bytes plus the face index inside them (non-zero only for collections).
#[derive(Clone)]
pub struct FontFace {
    bytes: Arc<Vec<u8>>,
    index: u32,
    label: String,
}

impl std::fmt::Debug for FontFace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontFace")
            .field("label", &self.label)
            .field("index", &self.index)
            .field("bytes_len", &self.bytes.len())
            .finish()
    }
}

impl FontFace {
    /// Wrap font bytes (TTF/OTF, or a TTC together with a face index).
    pub fn from_bytes(bytes: Vec<u8>, index: u32, label: impl Into<String>) -> MemeResult<Self> {
        if bytes.is_empty() {
            return Err(MemeError::validation("font bytes must be non-empty"));
        }
        Ok(Self {
            bytes: Arc::new(bytes),
            index,
            label: label.into(),
        })
    }

    /// Load a font file from disk.
    pub fn from_file(path: &Path) -> MemeResult<Self> {
        let bytes =
            std::fs::read(path).with_context(|| format!("read font '{}'", path.display()))?;
        Self::from_bytes(bytes, 0, path.display().to_string())
    }

    /// Raw font bytes.
    pub fn bytes(&self) -> &[u8] {
        self.bytes.as_slice()
    }

    /// Face index inside [`FontFace::bytes`].
    pub fn index(&self) -> u32 {
        self.index
    }

    /// Human readable origin (file path or system family name).
    pub fn label(&self) -> &str {
        &self.label
    }
}

/// Where the compositor gets its caption font from.
#[derive(Clone, Debug, Default)]
pub enum FontChoice {
    /// Discover a heavy display face among installed system fonts.
    #[default]
    System,
    /// Load this font file.
    File(PathBuf),
    /// Use an already loaded face.
    Face(FontFace),
}

impl FontChoice {
    /// Resolve the choice into concrete font bytes.
    pub fn resolve(&self) -> MemeResult<FontFace> {
        match self {
            FontChoice::System => find_system_caption_font(CAPTION_FAMILIES),
            FontChoice::File(path) => FontFace::from_file(path),
            FontChoice::Face(face) => Ok(face.clone()),
        }
    }
}

/// Query installed system fonts for the first of `families` in a black (900) weight, falling back
/// to the generic sans-serif face and finally to any face at all.
#[tracing::instrument]
pub fn find_system_caption_font(families: &[&str]) -> MemeResult<FontFace> {
    let mut db = usvg::fontdb::Database::new();
    db.load_system_fonts();

    let mut query_families: Vec<usvg::fontdb::Family<'_>> = families
        .iter()
        .map(|name| usvg::fontdb::Family::Name(*name))
        .collect();
    query_families.push(usvg::fontdb::Family::SansSerif);

    let query = usvg::fontdb::Query {
        families: &query_families,
        weight: usvg::fontdb::Weight::BLACK,
        stretch: usvg::fontdb::Stretch::Normal,
        style: usvg::fontdb::Style::Normal,
    };

    let id = db
        .query(&query)
        .or_else(|| db.faces().next().map(|f| f.id))
        .ok_or_else(|| {
            MemeError::render("no system fonts found; point MEMEBOT_FONT at a TTF/OTF file")
        })?;

    let label = db
        .face(id)
        .and_then(|f| f.families.first().map(|(name, _)| name.clone()))
        .unwrap_or_else(|| "unknown".to_string());

    let (bytes, index) = db
        .with_face_data(id, |data, index| (data.to_vec(), index))
        .ok_or_else(|| MemeError::render(format!("font face '{label}' could not be read")))?;

    tracing::debug!(family = %label, index, len = bytes.len(), "resolved caption font");
    FontFace::from_bytes(bytes, index, label)
}

#[cfg(test)]
#[path = "../../tests/unit/text/font.rs"]
mod tests;

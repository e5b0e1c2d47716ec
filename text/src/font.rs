//! Font database and font queries.
use std::collections::HashSet;
use std::fmt;
use std::sync::Mutex;

use ttf_parser as ttf;

use crate::Error;

/// Font family to look up
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum Family {
    /// The database's sans-serif family
    #[default]
    SansSerif,
    /// The database's serif family
    Serif,
    /// The database's monospace family
    Monospace,
    /// A family by name, falling back to sans-serif
    Name(String),
}

/// A font query: a family and a weight
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Font {
    /// Family of the font
    pub family: Family,
    /// Whether the bold weight is requested
    pub bold: bool,
}

impl Font {
    /// Query for a family with normal weight
    pub fn new(family: Family) -> Self {
        Font {
            family,
            bold: false,
        }
    }

    /// Query a named family, or the default sans-serif family for `None`
    pub fn from_name(name: Option<&str>, bold: bool) -> Self {
        let family = match name {
            Some(name) => Family::Name(name.to_string()),
            None => Family::SansSerif,
        };
        Font { family, bold }
    }
}

/// A database of font faces used to shape text
pub struct FontDb {
    db: fontdb::Database,
    warned: Mutex<HashSet<Font>>,
}

impl fmt::Debug for FontDb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FontDb")
            .field("faces", &self.db.len())
            .finish()
    }
}

impl Default for FontDb {
    fn default() -> Self {
        FontDb::new()
    }
}

impl FontDb {
    /// An empty database. Text laid out with it uses estimated metrics.
    pub fn new() -> Self {
        FontDb {
            db: fontdb::Database::new(),
            warned: Mutex::new(HashSet::new()),
        }
    }

    /// A database loaded with the fonts installed on the system
    pub fn system() -> Self {
        let mut db = FontDb::new();
        db.db.load_system_fonts();
        log::debug!("Loaded {} system font faces", db.db.len());
        db
    }

    /// Add font data (TTF, OTF or collection) to the database
    pub fn load_font_data(&mut self, data: Vec<u8>) -> Result<(), Error> {
        if ttf::fonts_in_collection(&data).unwrap_or(1) == 0 {
            return Err(Error::NoFace);
        }
        ttf::Face::parse(&data, 0)?;
        self.db.load_font_data(data);
        Ok(())
    }

    /// Number of faces in the database
    pub fn len(&self) -> usize {
        self.db.len()
    }

    /// Whether the database holds no face
    pub fn is_empty(&self) -> bool {
        self.db.is_empty()
    }

    fn query(&self, font: &Font) -> Option<fontdb::ID> {
        let families = match &font.family {
            Family::SansSerif => vec![fontdb::Family::SansSerif],
            Family::Serif => vec![fontdb::Family::Serif, fontdb::Family::SansSerif],
            Family::Monospace => vec![fontdb::Family::Monospace, fontdb::Family::SansSerif],
            Family::Name(name) => vec![fontdb::Family::Name(name), fontdb::Family::SansSerif],
        };
        let weight = if font.bold {
            fontdb::Weight::BOLD
        } else {
            fontdb::Weight::NORMAL
        };
        let query = fontdb::Query {
            families: &families,
            weight,
            stretch: fontdb::Stretch::Normal,
            style: fontdb::Style::Normal,
        };
        self.db
            .query(&query)
            .or_else(|| self.db.faces().next().map(|face| face.id))
    }

    /// Run `f` with the shaping face matching `font`.
    /// Returns None when no face is available.
    pub(crate) fn with_face<T, F>(&self, font: &Font, f: F) -> Option<T>
    where
        F: FnOnce(&rustybuzz::Face<'_>) -> T,
    {
        let id = self.query(font)?;
        self.db
            .with_face_data(id, |data, index| {
                rustybuzz::Face::from_slice(data, index).map(|face| f(&face))
            })
            .flatten()
    }

    /// Log once per font that estimated metrics are used
    pub(crate) fn warn_missing(&self, font: &Font) {
        let Ok(mut warned) = self.warned.lock() else {
            return;
        };
        if warned.insert(font.clone()) {
            log::warn!(
                "No font face for {:?}, text will use estimated metrics and is not drawn",
                font
            );
        }
    }
}

//! System font lookup for text rendering.

use fontdb::{Database, Family, Query, Stretch, Style, Weight};
use rusttype::Font;
use std::sync::OnceLock;

/// The sans-serif font used for text shapes, loaded once from the system.
///
/// Returns `None` when the system has no usable font.
pub fn default_font() -> Option<&'static Font<'static>> {
    static FONT: OnceLock<Option<Font<'static>>> = OnceLock::new();
    FONT.get_or_init(load_sans_serif).as_ref()
}

fn load_sans_serif() -> Option<Font<'static>> {
    let mut db = Database::new();
    db.load_system_fonts();

    let families = [Family::Name("Arial"), Family::SansSerif];
    let query = Query {
        families: &families,
        weight: Weight::NORMAL,
        stretch: Stretch::Normal,
        style: Style::Normal,
    };

    let id = db
        .query(&query)
        .or_else(|| db.faces().next().map(|face| face.id));
    let Some(id) = id else {
        log::warn!("no system font found; text shapes will not be drawn");
        return None;
    };

    let font = db
        .with_face_data(id, |data, index| {
            Font::try_from_vec_and_index(data.to_vec(), index)
        })
        .flatten();
    if font.is_none() {
        log::warn!("failed to parse system font; text shapes will not be drawn");
    }
    font
}

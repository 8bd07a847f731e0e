//! Icon keys → terminal glyphs.

use tracing::debug;

use crate::core::catalog::IconRef;
use crate::core::error::RevealError;

/// Glyph drawn in place of an icon that cannot be resolved.
pub const PLACEHOLDER: &str = " ";

/// Leading glyph of every feature row.
pub const FEATURE_GLYPH: &str = ">_";

const GLYPHS: &[(&str, &str)] = &[
    ("activity", "∿"),
    ("cloud", "☁"),
    ("git-branch", "⎇"),
    ("layers", "≋"),
    ("lock", "🔒"),
    ("rocket", "🚀"),
    ("shield", "⛨"),
    ("terminal", ">_"),
    ("workflow", "⟳"),
];

pub fn resolve(icon: &IconRef) -> Option<&'static str> {
    GLYPHS
        .iter()
        .find(|(key, _)| *key == icon.key())
        .map(|(_, glyph)| *glyph)
}

/// Resolve, falling back to a blank slot.
pub fn glyph_or_placeholder(icon: &IconRef) -> &'static str {
    resolve(icon).unwrap_or_else(|| {
        debug!("{}", RevealError::missing_icon(icon.key()));
        PLACEHOLDER
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::catalog::Catalog;

    #[test]
    fn builtin_icons_resolve() {
        let catalog = Catalog::builtin();
        for icon in catalog
            .benefits
            .iter()
            .map(|b| &b.icon)
            .chain(catalog.groups.iter().map(|g| &g.icon))
        {
            assert!(resolve(icon).is_some(), "{icon:?}");
        }
    }

    #[test]
    fn unknown_icon_gets_placeholder() {
        let icon = IconRef::new("does-not-exist");
        assert_eq!(resolve(&icon), None);
        assert_eq!(glyph_or_placeholder(&icon), PLACEHOLDER);
    }
}

//! Entity references with inline-creation markers
//!
//! The wizard payload references insurance companies and medical providers
//! either by a real numeric identifier or by a temporary marker string
//! (`temp_*` or `"new"`) meaning "create this entity now". The tagged
//! [`Reference`] union replaces the source's dynamic id-or-string value;
//! anything that is neither a positive id nor a marker fails validation
//! instead of silently coercing to a sentinel.

use serde::Deserialize;

/// Marker prefix the wizard uses for not-yet-persisted entities.
pub const TEMP_MARKER_PREFIX: &str = "temp_";

/// Raw wire form of an entity reference: a number or a string.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RawReference {
    Id(i64),
    Marker(String),
}

/// A resolved-form entity reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reference {
    /// A real, already-persisted row id.
    Existing(i64),
    /// A placeholder to be materialized, with an optional display name.
    Pending(Option<String>),
}

impl Reference {
    /// Interpret a raw wire reference, attaching `display_name` to pending
    /// markers.
    ///
    /// Accepted forms:
    /// - a positive integer -> `Existing`
    /// - a string holding a positive integer -> `Existing`
    /// - `temp_*` or `new` -> `Pending`
    ///
    /// Everything else is an error (the caller reports it as a validation
    /// violation rather than resolving to a sentinel id).
    pub fn from_raw(raw: &RawReference, display_name: Option<&str>) -> Result<Self, String> {
        let name = display_name
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from);

        match raw {
            RawReference::Id(id) if *id > 0 => Ok(Self::Existing(*id)),
            RawReference::Id(id) => Err(format!("invalid entity id: {id}")),
            RawReference::Marker(s) => {
                let s = s.trim();
                if let Ok(id) = s.parse::<i64>() {
                    if id > 0 {
                        return Ok(Self::Existing(id));
                    }
                    return Err(format!("invalid entity id: {id}"));
                }
                if s.starts_with(TEMP_MARKER_PREFIX) || s == "new" {
                    Ok(Self::Pending(name))
                } else {
                    Err(format!("unrecognized entity reference: '{s}'"))
                }
            }
        }
    }

    /// The display name carried by a pending reference, if any.
    pub fn pending_name(&self) -> Option<&str> {
        match self {
            Self::Pending(name) => name.as_deref(),
            Self::Existing(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_id_passes_through() {
        let r = Reference::from_raw(&RawReference::Id(42), None).unwrap();
        assert_eq!(r, Reference::Existing(42));
    }

    #[test]
    fn test_numeric_string_is_coerced() {
        let r = Reference::from_raw(&RawReference::Marker("17".into()), None).unwrap();
        assert_eq!(r, Reference::Existing(17));
    }

    #[test]
    fn test_temp_marker_becomes_pending_with_name() {
        let r = Reference::from_raw(
            &RawReference::Marker("temp_1699999999".into()),
            Some("Acme Mutual"),
        )
        .unwrap();
        assert_eq!(r, Reference::Pending(Some("Acme Mutual".into())));
        assert_eq!(r.pending_name(), Some("Acme Mutual"));
    }

    #[test]
    fn test_new_marker_without_name() {
        let r = Reference::from_raw(&RawReference::Marker("new".into()), Some("  ")).unwrap();
        assert_eq!(r, Reference::Pending(None));
    }

    #[test]
    fn test_unparseable_reference_is_rejected() {
        assert!(Reference::from_raw(&RawReference::Marker("garbage".into()), None).is_err());
        assert!(Reference::from_raw(&RawReference::Id(0), None).is_err());
        assert!(Reference::from_raw(&RawReference::Id(-5), None).is_err());
        assert!(Reference::from_raw(&RawReference::Marker("-3".into()), None).is_err());
    }

    #[test]
    fn test_raw_reference_deserializes_from_json() {
        let id: RawReference = serde_json::from_str("42").unwrap();
        assert_eq!(id, RawReference::Id(42));
        let marker: RawReference = serde_json::from_str("\"temp_abc\"").unwrap();
        assert_eq!(marker, RawReference::Marker("temp_abc".into()));
    }
}

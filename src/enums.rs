//! Enumerated music categories exposed to the home view.

use serde::Serialize;

/// Music categories available in the collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MusicType {
    Rock,
    Techno,
    Samba,
    Pagode,
    Mpb,
    Classical,
}

impl MusicType {
    /// All category values, in display order.
    pub fn values() -> &'static [MusicType] {
        &[
            MusicType::Rock,
            MusicType::Techno,
            MusicType::Samba,
            MusicType::Pagode,
            MusicType::Mpb,
            MusicType::Classical,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn values_serialize_to_snake_case() {
        let json = serde_json::to_value(MusicType::values()).unwrap();
        assert_eq!(json[0], "rock");
        assert_eq!(json.as_array().unwrap().len(), 6);
    }
}

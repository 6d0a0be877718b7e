//! Data models for the sprite endpoints (mapping and sprite list)

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Identifier of a sprite record, as assigned by the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SpriteId(pub u64);

impl fmt::Display for SpriteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A sprite record from `GET /api/sprites/`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SpriteRecord {
    pub id: SpriteId,
    pub sprite_type: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub width: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub height: Option<u32>,
}

impl SpriteRecord {
    /// The image reference, if the record has a non-empty one.
    pub fn image_url(&self) -> Option<&str> {
        self.image_url.as_deref().filter(|url| !url.is_empty())
    }
}

/// Body of `GET /api/sprite-mapping/`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct SpriteMappingResponse {
    pub mapping: HashMap<String, String>,
}

/// Body of `GET /api/sprites/`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct SpriteListResponse {
    pub sprites: Vec<SpriteRecord>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_sprite_list() {
        let json = r#"{"sprites": [
            {"id": 1, "sprite_type": "platform", "image_url": "/media/a.png"},
            {"id": 2, "sprite_type": "enemy", "image_url": null},
            {"id": 3, "sprite_type": "item"}
        ]}"#;
        let parsed: SpriteListResponse = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.sprites.len(), 3);
        assert_eq!(parsed.sprites[0].id, SpriteId(1));
        assert_eq!(parsed.sprites[0].image_url(), Some("/media/a.png"));
        assert_eq!(parsed.sprites[1].image_url(), None);
        assert_eq!(parsed.sprites[2].image_url(), None);
    }

    #[test]
    fn test_empty_image_url_is_absent() {
        let record: SpriteRecord =
            serde_json::from_str(r#"{"id": 7, "sprite_type": "item", "image_url": ""}"#).unwrap();
        assert_eq!(record.image_url(), None);
    }

    #[test]
    fn test_extra_fields_are_accepted() {
        let record: SpriteRecord = serde_json::from_str(
            r#"{"id": 4, "sprite_type": "player", "name": "Hero", "width": 50, "height": 60,
                "animation_frames": 4}"#,
        )
        .unwrap();
        assert_eq!(record.name.as_deref(), Some("Hero"));
        assert_eq!(record.width, Some(50));
        assert_eq!(record.height, Some(60));
    }

    #[test]
    fn test_parse_mapping() {
        let parsed: SpriteMappingResponse =
            serde_json::from_str(r#"{"mapping": {"P": "platform", "E": "enemy"}}"#).unwrap();
        assert_eq!(parsed.mapping.get("P").map(String::as_str), Some("platform"));
        assert_eq!(parsed.mapping.get("E").map(String::as_str), Some("enemy"));
    }

    #[test]
    fn test_missing_sprites_key_is_an_error() {
        let result: Result<SpriteListResponse, _> = serde_json::from_str(r#"{"items": []}"#);
        assert!(result.is_err());
    }
}

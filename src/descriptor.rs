//! Scene-object descriptors produced by the compiler.
//!
//! One descriptor is emitted per recognized entity. Descriptors serialize to
//! the JSON shape consumed by the scene renderer: an object tagged with
//! `"type"`, vectors as `[x, y, z]` arrays, absent optional fields omitted.

use serde::Serialize;

/// Scene-space vector. Positions are in scene units, rotations in degrees.
pub type Vec3 = glam::DVec3;

/// The content source of a panorama or image: either a media URL or, when no
/// URL was given, a caption to render in its place.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum MediaContent {
    #[serde(rename = "src")]
    Src(String),
    #[serde(rename = "text")]
    Caption(String),
}

impl MediaContent {
    /// Prefer the URL; fall back to the caption.
    pub fn from_parts(src: Option<String>, caption: impl FnOnce() -> Option<String>) -> Option<Self> {
        match src {
            Some(url) => Some(MediaContent::Src(url)),
            None => caption().map(MediaContent::Caption),
        }
    }

    pub fn src(&self) -> Option<&str> {
        match self {
            MediaContent::Src(url) => Some(url),
            MediaContent::Caption(_) => None,
        }
    }

    pub fn caption(&self) -> Option<&str> {
        match self {
            MediaContent::Src(_) => None,
            MediaContent::Caption(text) => Some(text),
        }
    }
}

/// A structured scene object recovered from one entity keyword.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum EntityDescriptor {
    /// How long the beat lasts, in seconds.
    Duration { value: u64 },
    /// Scene background, as a hex code or a named color.
    Background { color: String },
    Audio {
        #[serde(skip_serializing_if = "Option::is_none")]
        src: Option<String>,
        position: Vec3,
    },
    Voiceover {
        #[serde(skip_serializing_if = "Option::is_none")]
        text: Option<String>,
    },
    Chart {
        #[serde(skip_serializing_if = "Option::is_none")]
        src: Option<String>,
        position: Vec3,
        rotation: Vec3,
        scale: Vec3,
    },
    Panorama {
        #[serde(flatten)]
        content: Option<MediaContent>,
    },
    Video {
        #[serde(skip_serializing_if = "Option::is_none")]
        src: Option<String>,
        position: Vec3,
        scale: Vec3,
        rotation: Vec3,
    },
    Videosphere {
        #[serde(skip_serializing_if = "Option::is_none")]
        src: Option<String>,
    },
    Image {
        #[serde(flatten)]
        content: Option<MediaContent>,
        position: Vec3,
        scale: Vec3,
        rotation: Vec3,
    },
    Text {
        #[serde(skip_serializing_if = "Option::is_none")]
        text: Option<String>,
        position: Vec3,
        scale: Vec3,
        rotation: Vec3,
    },
    Model {
        #[serde(skip_serializing_if = "Option::is_none")]
        src: Option<String>,
        /// Material library; serialized as `null` when absent.
        mtl: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        extension: Option<String>,
        position: Vec3,
        scale: Vec3,
        rotation: Vec3,
    },
}

impl EntityDescriptor {
    /// The `type` tag this descriptor serializes with.
    pub fn type_name(&self) -> &'static str {
        match self {
            EntityDescriptor::Duration { .. } => "duration",
            EntityDescriptor::Background { .. } => "background",
            EntityDescriptor::Audio { .. } => "audio",
            EntityDescriptor::Voiceover { .. } => "voiceover",
            EntityDescriptor::Chart { .. } => "chart",
            EntityDescriptor::Panorama { .. } => "panorama",
            EntityDescriptor::Video { .. } => "video",
            EntityDescriptor::Videosphere { .. } => "videosphere",
            EntityDescriptor::Image { .. } => "image",
            EntityDescriptor::Text { .. } => "text",
            EntityDescriptor::Model { .. } => "model",
        }
    }

    /// Position of the object in the scene, for kinds that are placed.
    pub fn position(&self) -> Option<Vec3> {
        match self {
            EntityDescriptor::Audio { position, .. }
            | EntityDescriptor::Chart { position, .. }
            | EntityDescriptor::Video { position, .. }
            | EntityDescriptor::Image { position, .. }
            | EntityDescriptor::Text { position, .. }
            | EntityDescriptor::Model { position, .. } => Some(*position),
            _ => None,
        }
    }

    /// Primary media URL, if the descriptor references one.
    pub fn src(&self) -> Option<&str> {
        match self {
            EntityDescriptor::Audio { src, .. }
            | EntityDescriptor::Chart { src, .. }
            | EntityDescriptor::Video { src, .. }
            | EntityDescriptor::Videosphere { src }
            | EntityDescriptor::Model { src, .. } => src.as_deref(),
            EntityDescriptor::Panorama { content } | EntityDescriptor::Image { content, .. } => {
                content.as_ref().and_then(MediaContent::src)
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_audio_serializes_with_type_tag() {
        let audio = EntityDescriptor::Audio {
            src: Some("https://x.com/a.mp3".to_string()),
            position: Vec3::new(-8.0, 1.6, 0.0),
        };
        let value = serde_json::to_value(&audio).unwrap();
        assert_eq!(
            value,
            json!({ "type": "audio", "src": "https://x.com/a.mp3", "position": [-8.0, 1.6, 0.0] })
        );
    }

    #[test]
    fn test_missing_src_is_omitted() {
        let video = EntityDescriptor::Videosphere { src: None };
        assert_eq!(serde_json::to_value(&video).unwrap(), json!({ "type": "videosphere" }));
    }

    #[test]
    fn test_model_mtl_is_null_when_absent() {
        let model = EntityDescriptor::Model {
            src: Some("https://x.com/m.glb".to_string()),
            mtl: None,
            extension: Some("glb".to_string()),
            position: Vec3::new(0.0, -1.4, -8.0),
            scale: Vec3::ONE,
            rotation: Vec3::ZERO,
        };
        let value = serde_json::to_value(&model).unwrap();
        assert!(value["mtl"].is_null());
        assert!(value.as_object().unwrap().contains_key("mtl"));
        assert_eq!(value["extension"], "glb");
    }

    #[test]
    fn test_media_content_serializes_as_single_key() {
        let with_src = EntityDescriptor::Panorama {
            content: Some(MediaContent::Src("https://x.com/p.jpg".to_string())),
        };
        assert_eq!(
            serde_json::to_value(&with_src).unwrap(),
            json!({ "type": "panorama", "src": "https://x.com/p.jpg" })
        );

        let with_caption = EntityDescriptor::Panorama {
            content: Some(MediaContent::Caption("sunset".to_string())),
        };
        assert_eq!(
            serde_json::to_value(&with_caption).unwrap(),
            json!({ "type": "panorama", "text": "sunset" })
        );

        let empty = EntityDescriptor::Panorama { content: None };
        assert_eq!(serde_json::to_value(&empty).unwrap(), json!({ "type": "panorama" }));
    }

    #[test]
    fn test_from_parts_prefers_src() {
        let content = MediaContent::from_parts(Some("https://x.com/i.png".to_string()), || {
            panic!("caption should not be looked up when a URL exists")
        });
        assert_eq!(content.as_ref().and_then(MediaContent::src), Some("https://x.com/i.png"));

        let content = MediaContent::from_parts(None, || Some("hola".to_string()));
        assert_eq!(content.as_ref().and_then(MediaContent::caption), Some("hola"));
    }

    #[test]
    fn test_accessors() {
        let image = EntityDescriptor::Image {
            content: Some(MediaContent::Src("https://x.com/i.png".to_string())),
            position: Vec3::new(8.0, 1.6, 0.0),
            scale: Vec3::ONE,
            rotation: Vec3::new(0.0, -90.0, 0.0),
        };
        assert_eq!(image.type_name(), "image");
        assert_eq!(image.src(), Some("https://x.com/i.png"));
        assert_eq!(image.position(), Some(Vec3::new(8.0, 1.6, 0.0)));

        let duration = EntityDescriptor::Duration { value: 5 };
        assert_eq!(duration.position(), None);
        assert_eq!(duration.src(), None);
    }
}

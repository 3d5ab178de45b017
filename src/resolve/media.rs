use url::Url;

use crate::model::NodeKind;

use super::ResolveOptions;

/// Conversion service that re-serves I3S scene layers as 3D Tiles.
pub const I3S_CONVERSION_BASE: &str = "https://i3s.converter.hypotheticalhorse.com/";

/// How a declared distribution media type maps onto viewer support.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MediaKind {
    /// Native 3D Tiles, streamable as-is.
    Tiles3d,
    /// I3S, streamable after conversion.
    I3s,
    /// Anything else.
    Unsupported,
}

pub fn classify_media_type(media_type: Option<&str>) -> MediaKind {
    match media_type {
        Some("application/3dtiles+json") | Some("application/json+3dtiles") => MediaKind::Tiles3d,
        Some("application/i3s+json") | Some("application/json+i3s") => MediaKind::I3s,
        _ => MediaKind::Unsupported,
    }
}

pub(super) struct MappedDistribution {
    pub url: String,
    pub kind: NodeKind,
    pub note: Option<String>,
}

/// Final URL, node kind and explanatory note for a distribution with the
/// given resolved URL and declared media type.
pub(super) fn map_distribution(
    resolved: &Url,
    media_type: Option<&str>,
    options: &ResolveOptions,
) -> MappedDistribution {
    match classify_media_type(media_type) {
        MediaKind::Tiles3d => MappedDistribution {
            url: resolved.to_string(),
            kind: NodeKind::Tiles3d,
            note: None,
        },
        MediaKind::I3s => MappedDistribution {
            url: format!("{}{}", options.i3s_conversion_base, resolved),
            kind: NodeKind::Tiles3d,
            note: Some(
                "This I3S layer is streamed through a conversion service that re-serves it as 3D Tiles."
                    .to_string(),
            ),
        },
        MediaKind::Unsupported => MappedDistribution {
            url: resolved.to_string(),
            kind: NodeKind::Unsupported,
            note: Some(format!(
                "The media type {} is not supported by this viewer.",
                media_type.unwrap_or("(none)")
            )),
        },
    }
}

#[cfg(test)]
#[path = "../tests/resolve/media_tests.rs"]
mod tests;

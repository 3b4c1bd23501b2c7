use std::collections::{HashMap, HashSet};
use std::ops::BitOr;

use crate::attrs::AttributeSet;

/// Resolves a mentioned username to a profile URL.
///
/// Returning `None` declines the mention: it renders as literal text and
/// is not recorded in the mentioned-usernames list.
pub trait UsernameResolver {
    fn resolve(&self, username: &str) -> Option<String>;
}

impl<F> UsernameResolver for F
where
    F: Fn(&str) -> Option<String>,
{
    fn resolve(&self, username: &str) -> Option<String> {
        self(username)
    }
}

/// Rewrites an image path to its final URL, e.g. through a resizing cache.
///
/// Consulted for every image when configured, with width/height of zero
/// when the markup did not request dimensions.
pub trait ImageResolver {
    fn resolve(&self, path: &str, width: u32, height: u32) -> String;
}

impl<F> ImageResolver for F
where
    F: Fn(&str, u32, u32) -> String,
{
    fn resolve(&self, path: &str, width: u32, height: u32) -> String {
        self(path, width, height)
    }
}

/// Bit flags selecting the placeholder rendering for video embeds.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct DummyMode(u8);

impl DummyMode {
    pub const NONE: Self = Self(0);
    /// Render a plain anchor to the watch page instead of a live iframe.
    pub const PLAIN_LINK: Self = Self(1);
    /// Attach a click trigger that swaps the anchor for the player.
    pub const CLICK_TO_PLAY: Self = Self(2);
    /// Attach a click trigger that opens the player in a modal.
    pub const CLICK_TO_PLAY_MODAL: Self = Self(4);

    pub fn has(self, mode: Self) -> bool {
        self.0 & mode.0 != 0
    }
}

impl BitOr for DummyMode {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

/// Deny-set over semantic tag categories; a tag renders its normal markup
/// iff it is not denied.
#[derive(Clone, Debug, Default)]
pub struct TagPolicy {
    denied: HashSet<String>,
}

impl TagPolicy {
    pub fn deny<I, S>(tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            denied: tags.into_iter().map(Into::into).collect(),
        }
    }

    pub fn allows(&self, tag: &str) -> bool {
        !self.denied.contains(tag)
    }
}

/// Parser configuration, fixed once the engine is constructed.
pub struct Options {
    /// Interpret every newline in inline text as a `<br />`. Useful for
    /// comment fields where newlines are meant literally.
    pub enable_newlines: bool,
    pub tags: TagPolicy,
    /// Default attributes injected per tag category; the `"link"` category
    /// ships with `rel=nofollow target=_blank`.
    pub default_attributes: HashMap<String, AttributeSet>,
    pub dummy_mode: DummyMode,
    /// Marker class prepended to dummy video anchors.
    pub dummy_video_class: String,
    /// Fallback (width, height) for embeds without a `WIDTHxHEIGHT` token.
    pub video_dimensions: (u32, u32),
    /// When true, `:thumb` markup without an image resolver aborts the
    /// render; when false it degrades to a plain image.
    pub strict_image_resolver: bool,
    pub username_resolver: Option<Box<dyn UsernameResolver>>,
    pub image_resolver: Option<Box<dyn ImageResolver>>,
}

impl Default for Options {
    fn default() -> Self {
        let mut default_attributes = HashMap::new();
        default_attributes.insert(
            "link".to_string(),
            AttributeSet::from_pairs([("rel", "nofollow"), ("target", "_blank")]),
        );
        Self {
            enable_newlines: false,
            tags: TagPolicy::default(),
            default_attributes,
            dummy_mode: DummyMode::NONE,
            dummy_video_class: "dummy-video".to_string(),
            video_dimensions: (560, 315),
            strict_image_resolver: true,
            username_resolver: None,
            image_resolver: None,
        }
    }
}

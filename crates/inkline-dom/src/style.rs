#![forbid(unsafe_code)]

//! Computed style facts.
//!
//! The format-state walk inspects two signals per ancestor: the element
//! tag and the computed style. This module holds the style half — the
//! few properties that can mark text bold, italic, or underlined even
//! on a neutral container tag.

use bitflags::bitflags;

/// Lowest font weight reported as bold.
///
/// Matches the CSS convention: 700 is `bold`, anything at or above it
/// counts. Weight on a neutral container (a styled `span`) is still
/// reported — presentational bold is deliberately not distinguished
/// from semantic bold.
pub const BOLD_WEIGHT_MIN: u16 = 700;

/// Default (normal) font weight.
pub const NORMAL_WEIGHT: u16 = 400;

/// Font slant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum FontStyle {
    /// Upright text.
    #[default]
    Normal,
    /// Italic slant.
    Italic,
    /// Oblique slant; treated as italic for detection.
    Oblique,
}

bitflags! {
    /// Text decoration lines.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct TextDecoration: u8 {
        /// No decoration.
        const NONE         = 0b000;
        /// Underline.
        const UNDERLINE    = 0b001;
        /// Overline.
        const OVERLINE     = 0b010;
        /// Strike-through.
        const LINE_THROUGH = 0b100;
    }
}

impl Default for TextDecoration {
    fn default() -> Self {
        Self::NONE
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for TextDecoration {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.bits())
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for TextDecoration {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let bits = u8::deserialize(deserializer)?;
        Self::from_bits(bits)
            .ok_or_else(|| serde::de::Error::custom("invalid text-decoration bits"))
    }
}

/// Style facts as a renderer would compute them for an element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ComputedStyle {
    /// Font weight (CSS scale; 400 normal, 700 bold).
    pub font_weight: u16,
    /// Font slant.
    pub font_style: FontStyle,
    /// Decoration lines.
    pub text_decoration: TextDecoration,
}

impl Default for ComputedStyle {
    fn default() -> Self {
        Self {
            font_weight: NORMAL_WEIGHT,
            font_style: FontStyle::Normal,
            text_decoration: TextDecoration::NONE,
        }
    }
}

impl ComputedStyle {
    /// Create the default (unstyled) computed style.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the font weight (builder).
    #[must_use]
    pub const fn with_weight(mut self, weight: u16) -> Self {
        self.font_weight = weight;
        self
    }

    /// Set the font slant (builder).
    #[must_use]
    pub const fn with_font_style(mut self, style: FontStyle) -> Self {
        self.font_style = style;
        self
    }

    /// Set the decoration lines (builder).
    #[must_use]
    pub const fn with_decoration(mut self, decoration: TextDecoration) -> Self {
        self.text_decoration = decoration;
        self
    }

    /// True if the weight reaches the bold threshold.
    #[must_use]
    pub const fn is_bold_weight(&self) -> bool {
        self.font_weight >= BOLD_WEIGHT_MIN
    }

    /// True if the slant reads as italic.
    #[must_use]
    pub const fn is_italic(&self) -> bool {
        matches!(self.font_style, FontStyle::Italic | FontStyle::Oblique)
    }

    /// True if an underline decoration is present.
    #[must_use]
    pub const fn has_underline(&self) -> bool {
        self.text_decoration.contains(TextDecoration::UNDERLINE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_style_signals_nothing() {
        let style = ComputedStyle::default();
        assert!(!style.is_bold_weight());
        assert!(!style.is_italic());
        assert!(!style.has_underline());
    }

    #[test]
    fn weight_threshold_is_inclusive() {
        assert!(!ComputedStyle::new().with_weight(699).is_bold_weight());
        assert!(ComputedStyle::new().with_weight(700).is_bold_weight());
        assert!(ComputedStyle::new().with_weight(900).is_bold_weight());
    }

    #[test]
    fn oblique_counts_as_italic() {
        assert!(
            ComputedStyle::new()
                .with_font_style(FontStyle::Oblique)
                .is_italic()
        );
    }

    #[cfg(feature = "serde")]
    #[test]
    fn computed_style_serde_round_trip() {
        let style = ComputedStyle::new()
            .with_weight(700)
            .with_font_style(FontStyle::Italic)
            .with_decoration(TextDecoration::UNDERLINE);
        let json = serde_json::to_string(&style).unwrap();
        let back: ComputedStyle = serde_json::from_str(&json).unwrap();
        assert_eq!(style, back);
    }

    #[test]
    fn underline_detected_among_other_decorations() {
        let style = ComputedStyle::new()
            .with_decoration(TextDecoration::UNDERLINE | TextDecoration::LINE_THROUGH);
        assert!(style.has_underline());

        let strike_only = ComputedStyle::new().with_decoration(TextDecoration::LINE_THROUGH);
        assert!(!strike_only.has_underline());
    }
}

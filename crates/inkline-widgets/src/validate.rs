#![forbid(unsafe_code)]

//! Draft field validation.
//!
//! The save path refuses drafts that fail these rules and reports one
//! message per offending field. Lengths are measured in graphemes, not
//! bytes, so accented or composed characters count the way a user would
//! count them; zero-width seed characters left behind by collapsed-cursor
//! formatting are invisible and excluded.

use unicode_segmentation::UnicodeSegmentation;

use inkline_engine::ZERO_WIDTH_SPACE;

/// Minimum title length in graphemes.
pub const TITLE_MIN_CHARS: usize = 3;
/// Maximum title length in graphemes.
pub const TITLE_MAX_CHARS: usize = 200;
/// Minimum description length in graphemes.
pub const DESCRIPTION_MIN_CHARS: usize = 10;
/// Maximum description length in graphemes.
pub const DESCRIPTION_MAX_CHARS: usize = 500;
/// Minimum body length in visible graphemes.
pub const BODY_MIN_CHARS: usize = 50;

/// Per-field validation outcome; `None` means the field passed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DraftValidation {
    /// Title failure, if any.
    pub title: Option<String>,
    /// Description failure, if any.
    pub description: Option<String>,
    /// Body failure, if any.
    pub body: Option<String>,
}

impl DraftValidation {
    /// True when every field passed.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.title.is_none() && self.description.is_none() && self.body.is_none()
    }

    /// Messages for the failed fields, in form order.
    pub fn messages(&self) -> impl Iterator<Item = &str> {
        [&self.title, &self.description, &self.body]
            .into_iter()
            .filter_map(|slot| slot.as_deref())
    }
}

/// Length of text in graphemes, ignoring zero-width seed characters.
#[must_use]
pub fn visible_len(text: &str) -> usize {
    text.graphemes(true)
        .filter(|g| !g.chars().all(|ch| ch == ZERO_WIDTH_SPACE))
        .count()
}

/// True when text holds nothing a user can see: whitespace and
/// zero-width seeds only.
fn is_blank(text: &str) -> bool {
    text.chars()
        .all(|ch| ch.is_whitespace() || ch == ZERO_WIDTH_SPACE)
}

/// Validate a draft's fields against the publishing rules.
///
/// `body_text` is the plain text of the editor surface (markup
/// stripped); formatting wrappers do not add length.
#[must_use]
pub fn validate_draft(title: &str, description: &str, body_text: &str) -> DraftValidation {
    let mut out = DraftValidation::default();

    let title_len = visible_len(title);
    if is_blank(title) {
        out.title = Some("Title is required".to_owned());
    } else if title_len < TITLE_MIN_CHARS {
        out.title = Some(format!("Title must be at least {TITLE_MIN_CHARS} characters"));
    } else if title_len > TITLE_MAX_CHARS {
        out.title = Some(format!("Title must be less than {TITLE_MAX_CHARS} characters"));
    }

    let description_len = visible_len(description);
    if is_blank(description) {
        out.description = Some("Description is required".to_owned());
    } else if description_len < DESCRIPTION_MIN_CHARS {
        out.description = Some(format!(
            "Description must be at least {DESCRIPTION_MIN_CHARS} characters"
        ));
    } else if description_len > DESCRIPTION_MAX_CHARS {
        out.description = Some(format!(
            "Description must be less than {DESCRIPTION_MAX_CHARS} characters"
        ));
    }

    if is_blank(body_text) {
        out.body = Some("Post content is required".to_owned());
    } else if visible_len(body_text) < BODY_MIN_CHARS {
        out.body = Some(format!(
            "Post content must be at least {BODY_MIN_CHARS} characters"
        ));
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn long_body() -> String {
        "x".repeat(BODY_MIN_CHARS)
    }

    #[test]
    fn valid_draft_passes() {
        let report = validate_draft("A fine title", "A description long enough.", &long_body());
        assert!(report.is_valid());
        assert_eq!(report.messages().count(), 0);
    }

    #[test]
    fn empty_fields_are_required() {
        let report = validate_draft("", "   ", "");
        assert_eq!(report.title.as_deref(), Some("Title is required"));
        assert_eq!(
            report.description.as_deref(),
            Some("Description is required")
        );
        assert_eq!(report.body.as_deref(), Some("Post content is required"));
        assert!(!report.is_valid());
    }

    #[test]
    fn length_bounds_are_enforced() {
        let report = validate_draft(
            "ab",
            &"d".repeat(DESCRIPTION_MAX_CHARS + 1),
            &"y".repeat(BODY_MIN_CHARS - 1),
        );
        assert_eq!(
            report.title.as_deref(),
            Some("Title must be at least 3 characters")
        );
        assert_eq!(
            report.description.as_deref(),
            Some("Description must be less than 500 characters")
        );
        assert_eq!(
            report.body.as_deref(),
            Some("Post content must be at least 50 characters")
        );
    }

    #[test]
    fn zero_width_seeds_do_not_count() {
        let seeded = format!("{}{}", ZERO_WIDTH_SPACE, "ab");
        assert_eq!(visible_len(&seeded), 2);

        let report = validate_draft(&seeded, "A description long enough.", &long_body());
        assert_eq!(
            report.title.as_deref(),
            Some("Title must be at least 3 characters"),
            "invisible characters do not satisfy minimums"
        );
    }

    #[test]
    fn graphemes_count_once() {
        // "é" as e + combining acute is one visible character.
        let title = "e\u{301}xx";
        assert_eq!(visible_len(title), 3);
        let report = validate_draft(title, "A description long enough.", &long_body());
        assert!(report.title.is_none());
    }
}

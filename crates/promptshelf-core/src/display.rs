//! Fixed lookups for rendering suggestions.
//!
//! Unknown names (`None`) map to the default entry, so renderers can pass
//! parsed-but-unvalidated strings straight through.

use crate::analyzer::{Priority, SuggestionCategory};

/// Icon key for a suggestion category.
pub const fn category_icon(category: Option<SuggestionCategory>) -> &'static str {
    match category {
        Some(SuggestionCategory::Clarity) => "eye",
        Some(SuggestionCategory::Specificity) => "target",
        Some(SuggestionCategory::Structure) => "building",
        Some(SuggestionCategory::Context) => "books",
        Some(SuggestionCategory::Tone) => "masks",
        None => "lightbulb",
    }
}

/// Emoji glyph for a suggestion category, for terminal output.
pub const fn category_glyph(category: Option<SuggestionCategory>) -> &'static str {
    match category {
        Some(SuggestionCategory::Clarity) => "\u{1F441}\u{FE0F}",
        Some(SuggestionCategory::Specificity) => "\u{1F3AF}",
        Some(SuggestionCategory::Structure) => "\u{1F3D7}\u{FE0F}",
        Some(SuggestionCategory::Context) => "\u{1F4DA}",
        Some(SuggestionCategory::Tone) => "\u{1F3AD}",
        None => "\u{1F4A1}",
    }
}

/// Style class for a suggestion priority.
pub const fn priority_class(priority: Option<Priority>) -> &'static str {
    match priority {
        Some(Priority::High) => "text-red-600 bg-red-50",
        Some(Priority::Medium) => "text-yellow-600 bg-yellow-50",
        Some(Priority::Low) => "text-green-600 bg-green-50",
        None => "text-gray-600 bg-gray-50",
    }
}

/// [`category_icon`] for a wire name such as `"tone"`.
pub fn category_icon_for(name: &str) -> &'static str {
    category_icon(name.parse().ok())
}

/// [`priority_class`] for a wire name such as `"high"`.
pub fn priority_class_for(name: &str) -> &'static str {
    priority_class(name.parse().ok())
}

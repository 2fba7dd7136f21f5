//! Five-star rating control with hover preview.

use super::draft::{Rating, MAX_RATING};

/// Label for a rating value. Unset (0) has an empty label.
pub fn rating_label(value: u8) -> &'static str {
    match value {
        1 => "Poor",
        2 => "Fair",
        3 => "Good",
        4 => "Very Good",
        5 => "Excellent",
        _ => "",
    }
}

/// Transient interaction state of the star row.
///
/// Only the hover position lives here; the selected value belongs to the
/// draft, so hovering never changes what gets submitted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RatingControl {
    hover: u8,
}

impl RatingControl {
    /// Number of star positions.
    pub const POSITIONS: u8 = MAX_RATING;

    /// Create a control with no hover.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current hover position, 0 when not hovering.
    pub fn hover(&self) -> u8 {
        self.hover
    }

    /// Pointer entered `position`. Positions outside `1..=5` are ignored.
    pub fn enter(&mut self, position: u8) {
        if (1..=Self::POSITIONS).contains(&position) {
            self.hover = position;
        }
    }

    /// Pointer left the star row.
    pub fn leave(&mut self) {
        self.hover = 0;
    }

    /// Rating produced by clicking `position`.
    ///
    /// Clicking the already-selected star keeps it selected; there is no
    /// unset-by-reclick. Returns `None` for positions outside `1..=5`.
    pub fn click(&self, position: u8) -> Option<Rating> {
        if position == 0 {
            return None;
        }
        Rating::new(position).ok()
    }

    /// Value shown to the user: the hover if any, else the selection.
    pub fn effective(&self, selected: Rating) -> u8 {
        if self.hover != 0 {
            self.hover
        } else {
            selected.get()
        }
    }

    /// Label for the effective value.
    pub fn label(&self, selected: Rating) -> &'static str {
        rating_label(self.effective(selected))
    }

    /// Whether star `position` is lit.
    pub fn star_filled(&self, position: u8, selected: Rating) -> bool {
        position >= 1 && position <= self.effective(selected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rating(v: u8) -> Rating {
        Rating::new(v).unwrap()
    }

    #[test]
    fn test_labels() {
        assert_eq!(rating_label(0), "");
        assert_eq!(rating_label(1), "Poor");
        assert_eq!(rating_label(2), "Fair");
        assert_eq!(rating_label(3), "Good");
        assert_eq!(rating_label(4), "Very Good");
        assert_eq!(rating_label(5), "Excellent");
    }

    #[test]
    fn test_hover_overrides_selection_for_display() {
        let mut control = RatingControl::new();
        assert_eq!(control.label(rating(2)), "Fair");
        control.enter(5);
        assert_eq!(control.effective(rating(2)), 5);
        assert_eq!(control.label(rating(2)), "Excellent");
        control.leave();
        assert_eq!(control.label(rating(2)), "Fair");
    }

    #[test]
    fn test_hover_out_of_range_ignored() {
        let mut control = RatingControl::new();
        control.enter(3);
        control.enter(9);
        assert_eq!(control.hover(), 3);
        control.enter(0);
        assert_eq!(control.hover(), 3);
    }

    #[test]
    fn test_click_is_idempotent() {
        let control = RatingControl::new();
        assert_eq!(control.click(4), Some(rating(4)));
        assert_eq!(control.click(4), Some(rating(4)));
        assert_eq!(control.click(0), None);
        assert_eq!(control.click(6), None);
    }

    #[test]
    fn test_star_filled() {
        let mut control = RatingControl::new();
        assert!(control.star_filled(3, rating(3)));
        assert!(!control.star_filled(4, rating(3)));
        control.enter(1);
        assert!(!control.star_filled(2, rating(3)));
        assert!(!control.star_filled(0, rating(3)));
    }

    #[test]
    fn test_unset_with_no_hover_has_empty_label() {
        assert_eq!(RatingControl::new().label(Rating::UNSET), "");
    }
}

//! Per-entry colors: a fixed base hue per category, with lightness raised by
//! power and saturation shifted by valence.

use serde::{Deserialize, Serialize};

use crate::category::Category;
use crate::color::{Rgb, hsl_to_rgb, to_rgba};
use crate::constants::{
    LIGHTNESS_RANGE, POWER_LIGHTNESS_GAIN, SATURATION_RANGE, VALENCE_SATURATION_GAIN,
};
use crate::model::Entry;

/// HSL color with saturation and lightness in percent.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Hsl {
    pub hue: f64,
    pub saturation: f64,
    pub lightness: f64,
}

impl Hsl {
    pub const fn new(hue: f64, saturation: f64, lightness: f64) -> Self {
        Self {
            hue,
            saturation,
            lightness,
        }
    }

    pub fn to_rgb(self) -> Rgb {
        hsl_to_rgb(self.hue, self.saturation / 100.0, self.lightness / 100.0)
    }

    /// CSS `hsl(h, s%, l%)`.
    pub fn to_css(self) -> String {
        format!("hsl({}, {}%, {}%)", self.hue, self.saturation, self.lightness)
    }

    /// Apply power/valence modulation. `max`/`min` discard NaN, so a NaN
    /// attribute pins the channel to its lower bound instead of propagating.
    pub fn modulate(self, power: f64, valence: f64) -> Self {
        let (l_lo, l_hi) = LIGHTNESS_RANGE;
        let (s_lo, s_hi) = SATURATION_RANGE;
        let lightness = (self.lightness + power * POWER_LIGHTNESS_GAIN)
            .max(l_lo)
            .min(l_hi);
        let saturation = (self.saturation + valence * VALENCE_SATURATION_GAIN)
            .max(s_lo)
            .min(s_hi);
        Self {
            hue: self.hue,
            saturation,
            lightness,
        }
    }
}

/// Base color per category.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CategoryPalette {
    pub people: Hsl,
    pub accomplishments: Hsl,
    pub life_story: Hsl,
    pub ideas_likes: Hsl,
    pub other: Hsl,
}

impl Default for CategoryPalette {
    fn default() -> Self {
        Self {
            people: Hsl::new(280.0, 70.0, 60.0),
            accomplishments: Hsl::new(45.0, 95.0, 60.0),
            life_story: Hsl::new(200.0, 75.0, 55.0),
            ideas_likes: Hsl::new(140.0, 70.0, 55.0),
            other: Hsl::new(0.0, 0.0, 62.0),
        }
    }
}

impl CategoryPalette {
    pub fn base(&self, category: Category) -> Hsl {
        match category {
            Category::People => self.people,
            Category::Accomplishments => self.accomplishments,
            Category::LifeStory => self.life_story,
            Category::IdeasLikes => self.ideas_likes,
            Category::Other => self.other,
        }
    }

    /// Modulated HSL for one entry.
    pub fn entry_hsl(&self, entry: &Entry) -> Hsl {
        self.base(entry.category).modulate(entry.power, entry.valence)
    }

    /// `rgba(...)` for one entry at the given opacity.
    pub fn entry_color(&self, entry: &Entry, opacity: f64) -> String {
        to_rgba(self.entry_hsl(entry).to_rgb(), opacity)
    }

    /// CSS `hsl(...)` for a category at the given power/valence.
    pub fn css_color(&self, category: Category, power: f64, valence: f64) -> String {
        self.base(category).modulate(power, valence).to_css()
    }

    /// Unmodulated category color, for legends and badges.
    pub fn badge_color(&self, category: Category) -> String {
        self.base(category).to_css()
    }
}

/// Colors aligned with `entries`.
pub fn colors_for_entries(entries: &[Entry], palette: &CategoryPalette, opacity: f64) -> Vec<String> {
    entries
        .iter()
        .map(|e| palette.entry_color(e, opacity))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::hex_to_rgb;
    use approx::assert_relative_eq;

    #[test]
    fn test_modulation_formula() {
        let hsl = Hsl::new(45.0, 95.0, 60.0).modulate(0.8, 0.5);
        assert_relative_eq!(hsl.lightness, 72.0);
        assert_relative_eq!(hsl.saturation, 100.0);
        assert_relative_eq!(hsl.hue, 45.0);
    }

    #[test]
    fn test_modulation_clamps() {
        let bright = Hsl::new(0.0, 95.0, 80.0).modulate(10.0, 10.0);
        assert_relative_eq!(bright.lightness, 85.0);
        assert_relative_eq!(bright.saturation, 100.0);

        let dull = Hsl::new(0.0, 0.0, 40.0).modulate(-10.0, -10.0);
        assert_relative_eq!(dull.lightness, 35.0);
        assert_relative_eq!(dull.saturation, 30.0);
    }

    #[test]
    fn test_nan_attributes_hit_floor() {
        let hsl = Hsl::new(200.0, 75.0, 55.0).modulate(f64::NAN, f64::NAN);
        assert_relative_eq!(hsl.lightness, 35.0);
        assert_relative_eq!(hsl.saturation, 30.0);
    }

    #[test]
    fn test_other_never_pure_gray() {
        // Base saturation 0 is lifted to the 30% floor.
        let palette = CategoryPalette::default();
        let e = Entry::new("x", Category::Other, 0.0, 0.0);
        let rgb = palette.entry_hsl(&e).to_rgb();
        assert!(rgb.r != rgb.g || rgb.g != rgb.b);
    }

    #[test]
    fn test_entry_color_string() {
        let palette = CategoryPalette::default();
        let e = Entry::new("Work", Category::Accomplishments, 0.8, 0.5);
        // hsl(45, 100%, 72%)
        assert_eq!(palette.entry_color(&e, 0.88), "rgba(255,219,112,0.88)");
    }

    #[test]
    fn test_colors_aligned() {
        let palette = CategoryPalette::default();
        let entries = vec![
            Entry::new("a", Category::People, 0.2, 0.1),
            Entry::new("b", Category::LifeStory, 0.9, -0.6),
            Entry::new("c", Category::IdeasLikes, 0.5, 0.5),
        ];
        let colors = colors_for_entries(&entries, &palette, 1.0);
        assert_eq!(colors.len(), 3);
        for (entry, color) in entries.iter().zip(&colors) {
            assert_eq!(*color, palette.entry_color(entry, 1.0));
            assert!(color.starts_with("rgba(") && color.ends_with(",1)"));
        }
    }

    #[test]
    fn test_css_strings() {
        let palette = CategoryPalette::default();
        assert_eq!(palette.badge_color(Category::People), "hsl(280, 70%, 60%)");
        assert_eq!(
            palette.css_color(Category::Other, 1.0, 0.0),
            "hsl(0, 30%, 77%)"
        );
    }

    #[test]
    fn test_never_black_or_white() {
        let palette = CategoryPalette::default();
        let black = hex_to_rgb("#000000").unwrap();
        let white = hex_to_rgb("#ffffff").unwrap();
        for category in Category::ALL {
            for (p, v) in [(-5.0, -5.0), (5.0, 5.0), (0.0, 0.0), (1.0, -1.0)] {
                let rgb = palette.entry_hsl(&Entry::new("x", category, p, v)).to_rgb();
                assert_ne!(rgb, black);
                assert_ne!(rgb, white);
            }
        }
    }
}

//! Umrechnung zwischen Bild-Pixeln und Anzeige-Koordinaten der Karte.
//!
//! Im Bildraum wächst Y nach unten, im Anzeigeraum wächst die "Breite" (lat)
//! nach oben. Diese Struktur ist die einzige Stelle, die diese Inversion kennt.

use glam::DVec2;

/// Bidirektionale Abbildung Pixel ↔ Anzeige.
///
/// Anzeige-Punkte werden als `DVec2` mit `x = lng` und `y = lat` geführt.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoordinateTransform {
    image_height: f64,
}

impl CoordinateTransform {
    /// Erstellt die Abbildung für ein Bild der gegebenen Höhe.
    pub fn new(image_height: u32) -> Self {
        Self {
            image_height: f64::from(image_height),
        }
    }

    /// Pixel → Anzeige: `lat = H - y`, `lng = x`.
    pub fn to_display(&self, x: i32, y: i32) -> DVec2 {
        DVec2::new(f64::from(x), self.image_height - f64::from(y))
    }

    /// Anzeige → Pixel: `x = round(lng)`, `y = round(H - lat)`.
    pub fn from_display(&self, display: DVec2) -> (i32, i32) {
        let x = display.x.round();
        let y = (self.image_height - display.y).round();
        (saturate_i32(x), saturate_i32(y))
    }

    /// Anzeige-Grenzen des Bildes als (südwest, nordost).
    pub fn display_bounds(&self, image_width: u32) -> (DVec2, DVec2) {
        (DVec2::ZERO, DVec2::new(f64::from(image_width), self.image_height))
    }
}

fn saturate_i32(value: f64) -> i32 {
    // `as` sättigt bei f64 → i32 und bildet NaN auf 0 ab
    value as i32
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn to_display_inverts_vertical_axis() {
        let t = CoordinateTransform::new(1000);
        let p = t.to_display(120, 300);
        assert_relative_eq!(p.x, 120.0);
        assert_relative_eq!(p.y, 700.0);
    }

    #[test]
    fn from_display_rounds_to_nearest_pixel() {
        let t = CoordinateTransform::new(1000);
        assert_eq!(t.from_display(DVec2::new(10.4, 699.6)), (10, 300));
        assert_eq!(t.from_display(DVec2::new(10.6, 700.4)), (11, 300));
    }

    #[test]
    fn round_trip_is_identity_on_image_grid() {
        let (w, h) = (64, 48);
        let t = CoordinateTransform::new(h);
        for x in 0..=w as i32 {
            for y in 0..=h as i32 {
                assert_eq!(t.from_display(t.to_display(x, y)), (x, y));
            }
        }
    }

    #[test]
    fn display_bounds_span_image() {
        let t = CoordinateTransform::new(4000);
        let (sw, ne) = t.display_bounds(6000);
        assert_relative_eq!(sw.x, 0.0);
        assert_relative_eq!(ne.x, 6000.0);
        assert_relative_eq!(ne.y, 4000.0);
    }
}

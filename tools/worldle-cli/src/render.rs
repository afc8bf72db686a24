use geo::{BoundingRect, Contains, MultiPolygon, Point};
use worldle_core::{Game, GuessResult};

/// Terminal cells are roughly twice as tall as they are wide.
const CELL_ASPECT: f64 = 2.0;

/// Rasterize an outline onto a character grid `width` cells wide.
///
/// Longitudes are shrunk by the cosine of the middle latitude so shapes far
/// from the equator keep their proportions.
pub fn outline_to_ascii(outline: &MultiPolygon, width: usize) -> String {
    let Some(bounds) = outline.bounding_rect() else {
        return String::new();
    };
    if width == 0 {
        return String::new();
    }

    let mid_lat = (bounds.min().y + bounds.max().y) / 2.0;
    let x_scale = mid_lat.to_radians().cos().max(0.1);

    let span_x = (bounds.width() * x_scale).max(f64::EPSILON);
    let span_y = bounds.height().max(f64::EPSILON);
    let height = ((width as f64) * span_y / span_x / CELL_ASPECT).ceil().max(1.0) as usize;

    let cell_w = bounds.width() / width as f64;
    let cell_h = bounds.height() / height as f64;

    let mut art = String::with_capacity((width + 1) * height);
    for row in 0..height {
        // Rows run north to south
        let y = bounds.max().y - (row as f64 + 0.5) * cell_h;
        let line: String = (0..width)
            .map(|col| {
                let x = bounds.min().x + (col as f64 + 0.5) * cell_w;
                if outline.contains(&Point::new(x, y)) {
                    '#'
                } else {
                    ' '
                }
            })
            .collect();
        art.push_str(line.trim_end());
        art.push('\n');
    }

    art
}

/// One feedback line, e.g. `France | 344 km | ↖ NW | 🥈 98.28%`
pub fn format_guess(game: &Game, result: &GuessResult) -> String {
    let score = &result.score;
    format!(
        "🌏 {} | 📏 {:.0} {} away | {} {} | {} {:.2}%",
        game.display_name(&result.country),
        score.distance,
        score.unit.suffix(),
        score.direction.arrow(),
        score.direction,
        score.tier.medal(),
        score.proximity,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::{Coord, LineString, Polygon};

    // Centered on the equator so no longitude correction applies
    fn rectangle(w: f64, h: f64) -> MultiPolygon {
        let (bottom, top) = (-h / 2.0, h / 2.0);
        MultiPolygon::new(vec![Polygon::new(
            LineString::new(vec![
                Coord { x: 0.0, y: bottom },
                Coord { x: w, y: bottom },
                Coord { x: w, y: top },
                Coord { x: 0.0, y: top },
                Coord { x: 0.0, y: bottom },
            ]),
            vec![],
        )])
    }

    #[test]
    fn test_rectangle_fills_grid() {
        let art = outline_to_ascii(&rectangle(4.0, 2.0), 8);
        let lines: Vec<&str> = art.lines().collect();

        assert_eq!(lines.len(), 2);
        assert!(lines.iter().all(|l| *l == "########"));
    }

    #[test]
    fn test_empty_outline() {
        assert_eq!(outline_to_ascii(&MultiPolygon::new(vec![]), 40), "");
        assert_eq!(outline_to_ascii(&rectangle(1.0, 1.0), 0), "");
    }
}

//! Inspector panel descriptions.

use crate::geom::Vector;

/// What an inspector panel shows for a shape. Widgets are built by the host.
#[derive(Debug, Clone, PartialEq)]
pub enum Inspector {
    /// One row per handle coordinate.
    Coordinates { points: Vec<Vector> },
    /// Anchor position plus editable text content.
    TextEntry { position: Vector, text: String },
}

impl Inspector {
    pub fn title(&self) -> &'static str {
        match self {
            Inspector::Coordinates { .. } => "COORDINATES",
            Inspector::TextEntry { .. } => "TEXT",
        }
    }

    /// Label and value pairs, in display order.
    pub fn rows(&self) -> Vec<(String, String)> {
        match self {
            Inspector::Coordinates { points } => points
                .iter()
                .enumerate()
                .map(|(i, p)| (format!("P{i}:"), format_point(*p)))
                .collect(),
            Inspector::TextEntry { position, text } => vec![
                ("Position:".to_string(), format_point(*position)),
                ("Text:".to_string(), text.clone()),
            ],
        }
    }
}

fn format_point(p: Vector) -> String {
    format!("({}, {})", p.x, p.y)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coordinate_rows() {
        let inspector = Inspector::Coordinates {
            points: vec![Vector::new(1.0, 2.0), Vector::new(3.5, -4.0)],
        };
        assert_eq!(inspector.title(), "COORDINATES");
        assert_eq!(
            inspector.rows(),
            vec![
                ("P0:".to_string(), "(1, 2)".to_string()),
                ("P1:".to_string(), "(3.5, -4)".to_string()),
            ]
        );
    }

    #[test]
    fn test_text_rows() {
        let inspector = Inspector::TextEntry {
            position: Vector::new(7.0, 8.0),
            text: "hello".to_string(),
        };
        let rows = inspector.rows();
        assert_eq!(rows[0].1, "(7, 8)");
        assert_eq!(rows[1], ("Text:".to_string(), "hello".to_string()));
    }
}

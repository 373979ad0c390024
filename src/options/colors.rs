use serde::{Deserialize, Serialize};

use crate::util::color::Rgb;

/// Symbol and color for one element.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ElementStyle {
    /// Atomic number.
    pub atomic_number: u32,
    /// Element symbol shown in the tables.
    pub symbol: String,
    /// Sphere color.
    pub color: Rgb,
}

impl ElementStyle {
    fn new(atomic_number: u32, symbol: &str, color: Rgb) -> Self {
        Self {
            atomic_number,
            symbol: symbol.to_owned(),
            color,
        }
    }
}

/// Element palette used by the scene mirror and the tables.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ColorOptions {
    /// Color for elements without an entry in `elements`.
    pub default_color: Rgb,
    /// Known elements.
    pub elements: Vec<ElementStyle>,
}

impl Default for ColorOptions {
    fn default() -> Self {
        Self {
            default_color: [0.0, 1.0, 0.0],
            elements: vec![
                ElementStyle::new(1, "H", [1.0, 1.0, 1.0]),
                ElementStyle::new(6, "C", [0.5, 0.5, 0.5]),
                ElementStyle::new(7, "N", [0.0, 0.0, 1.0]),
                ElementStyle::new(8, "O", [1.0, 0.0, 0.0]),
                ElementStyle::new(15, "P", [1.0, 0.5, 0.0]),
                ElementStyle::new(16, "S", [1.0, 1.0, 0.0]),
            ],
        }
    }
}

impl ColorOptions {
    fn style(&self, atomic_number: u32) -> Option<&ElementStyle> {
        self.elements
            .iter()
            .find(|e| e.atomic_number == atomic_number)
    }

    /// Sphere color for an atomic number. Falls back to `default_color`.
    #[must_use]
    pub fn element_color(&self, atomic_number: u32) -> Rgb {
        self.style(atomic_number)
            .map_or(self.default_color, |e| e.color)
    }

    /// Table symbol for an atomic number; unknown elements read
    /// `Element{n}`.
    #[must_use]
    pub fn element_symbol(&self, atomic_number: u32) -> String {
        self.style(atomic_number).map_or_else(
            || format!("Element{atomic_number}"),
            |e| e.symbol.clone(),
        )
    }
}

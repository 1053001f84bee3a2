use crate::error::{PdfError, Result};
use crate::graphics::format_real;
use std::fmt;
use std::str::FromStr;

/// Represents a color in PDF documents.
///
/// Supports RGB, Grayscale, and CMYK color spaces.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Color {
    /// RGB color (red, green, blue) with values from 0.0 to 1.0
    Rgb(f64, f64, f64),
    /// Grayscale color with value from 0.0 (black) to 1.0 (white)
    Gray(f64),
    /// CMYK color (cyan, magenta, yellow, key/black) with values from 0.0 to 1.0
    Cmyk(f64, f64, f64, f64),
}

impl Color {
    /// Creates an RGB color with values clamped to 0.0-1.0.
    pub fn rgb(r: f64, g: f64, b: f64) -> Self {
        Color::Rgb(r.clamp(0.0, 1.0), g.clamp(0.0, 1.0), b.clamp(0.0, 1.0))
    }

    /// Creates a grayscale color with value clamped to 0.0-1.0.
    pub fn gray(value: f64) -> Self {
        Color::Gray(value.clamp(0.0, 1.0))
    }

    /// Creates a CMYK color with values clamped to 0.0-1.0.
    pub fn cmyk(c: f64, m: f64, y: f64, k: f64) -> Self {
        Color::Cmyk(
            c.clamp(0.0, 1.0),
            m.clamp(0.0, 1.0),
            y.clamp(0.0, 1.0),
            k.clamp(0.0, 1.0),
        )
    }

    /// RGB color from 8-bit channels.
    pub fn rgb8(r: u8, g: u8, b: u8) -> Self {
        Color::Rgb(unit8(r), unit8(g), unit8(b))
    }

    /// Grayscale color from an 8-bit level.
    pub fn gray8(value: u8) -> Self {
        Color::Gray(unit8(value))
    }

    /// Grayscale color from a 16-bit level.
    pub fn gray16(value: u16) -> Self {
        Color::Gray(f64::from(value) / f64::from(u16::MAX))
    }

    /// CMYK color from 8-bit channels.
    pub fn cmyk8(c: u8, m: u8, y: u8, k: u8) -> Self {
        Color::Cmyk(unit8(c), unit8(m), unit8(y), unit8(k))
    }

    /// Black color (gray 0.0).
    pub fn black() -> Self {
        Color::Gray(0.0)
    }

    /// White color (gray 1.0).
    pub fn white() -> Self {
        Color::Gray(1.0)
    }

    /// Red color (RGB 1,0,0).
    pub fn red() -> Self {
        Color::Rgb(1.0, 0.0, 0.0)
    }

    /// Green color (RGB 0,1,0).
    pub fn green() -> Self {
        Color::Rgb(0.0, 1.0, 0.0)
    }

    /// Blue color (RGB 0,0,1).
    pub fn blue() -> Self {
        Color::Rgb(0.0, 0.0, 1.0)
    }

    pub fn yellow() -> Self {
        Color::Rgb(1.0, 1.0, 0.0)
    }

    pub fn cyan() -> Self {
        Color::Rgb(0.0, 1.0, 1.0)
    }

    pub fn magenta() -> Self {
        Color::Rgb(1.0, 0.0, 1.0)
    }

    /// The non-stroking color operator of this color space.
    pub fn operator(&self) -> &'static str {
        match self {
            Color::Gray(_) => "g",
            Color::Rgb(..) => "rg",
            Color::Cmyk(..) => "k",
        }
    }

    pub fn components(&self) -> Vec<f64> {
        match *self {
            Color::Gray(v) => vec![v],
            Color::Rgb(r, g, b) => vec![r, g, b],
            Color::Cmyk(c, m, y, k) => vec![c, m, y, k],
        }
    }

    /// Content-stream code that selects this color, e.g. `1 0 0 rg` for a
    /// red fill or `1 0 0 RG` for a red stroke.
    pub fn pdf_code(&self, fill: bool) -> String {
        let mut code = String::with_capacity(32);
        for component in self.components() {
            code.push_str(&format_real(component));
            code.push(' ');
        }
        if fill {
            code.push_str(self.operator());
        } else {
            code.push_str(&self.operator().to_ascii_uppercase());
        }
        code
    }

    /// Rejects components that are not finite or lie outside 0.0-1.0.
    pub fn validate(&self) -> Result<()> {
        for component in self.components() {
            if !component.is_finite() || !(0.0..=1.0).contains(&component) {
                return Err(PdfError::InvalidColor(format!(
                    "component {component} of {self} is outside 0..1"
                )));
            }
        }
        Ok(())
    }
}

fn unit8(value: u8) -> f64 {
    f64::from(value) / 255.0
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let components: Vec<String> = self.components().into_iter().map(format_real).collect();
        write!(f, "{}({})", self.operator(), components.join(","))
    }
}

impl FromStr for Color {
    type Err = PdfError;

    /// Parses a color name (`red`, `black`, ...), `#rrggbb`, `r,g,b`,
    /// `gray:v` or `cmyk:c,m,y,k`. Numeric components are 0.0-1.0.
    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        let invalid = || PdfError::InvalidColor(s.to_string());

        let named = match s.to_ascii_lowercase().as_str() {
            "black" => Some(Color::black()),
            "white" => Some(Color::white()),
            "red" => Some(Color::red()),
            "green" => Some(Color::green()),
            "blue" => Some(Color::blue()),
            "yellow" => Some(Color::yellow()),
            "cyan" => Some(Color::cyan()),
            "magenta" => Some(Color::magenta()),
            _ => None,
        };
        if let Some(color) = named {
            return Ok(color);
        }

        let color = if let Some(hex) = s.strip_prefix('#') {
            if hex.len() != 6 || !hex.is_ascii() {
                return Err(invalid());
            }
            let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| invalid());
            Color::rgb8(channel(0)?, channel(2)?, channel(4)?)
        } else if let Some(level) = s.strip_prefix("gray:") {
            let v = parse_components(level, 1).ok_or_else(invalid)?;
            Color::Gray(v[0])
        } else if let Some(values) = s.strip_prefix("cmyk:") {
            let v = parse_components(values, 4).ok_or_else(invalid)?;
            Color::Cmyk(v[0], v[1], v[2], v[3])
        } else {
            let v = parse_components(s.strip_prefix("rgb:").unwrap_or(s), 3).ok_or_else(invalid)?;
            Color::Rgb(v[0], v[1], v[2])
        };

        color.validate()?;
        Ok(color)
    }
}

fn parse_components(s: &str, count: usize) -> Option<Vec<f64>> {
    let values: Vec<f64> = s
        .split(',')
        .map(|part| part.trim().parse::<f64>().ok())
        .collect::<Option<_>>()?;
    (values.len() == count).then_some(values)
}

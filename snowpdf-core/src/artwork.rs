//! Page content producers.
//!
//! The snowman is drawn in a unit square; [`Snowman::content`] wraps it in a
//! transformation that centers the square on the page and scales it
//! relative to the longer page edge.

use crate::graphics::{format_real, format_real_with, Color};
use std::fmt::Write;

/// Produces the content stream of a page.
pub trait Artwork {
    /// Complete content-stream body for a `width` × `height` page. `scale`
    /// is the size of the drawing relative to the longer page edge.
    fn content(&self, width: f64, height: f64, scale: f64, muffler: &Color) -> String;
}

/// The essential snowman: body, eyes, mouth, hat, arms, buttons, falling
/// snow and a muffler in the requested color.
#[derive(Debug, Clone, Copy, Default)]
pub struct Snowman;

const LINE_STYLE: &str = "0 G 0 g 1 j 1 J 0.01389 w";

const BODY: &str = "\
0.5 0.72 m 0.64 0.72 0.76 0.65 0.76 0.55 c
0.76 0.51 0.72 0.47 0.67 0.44 c 0.79 0.41 0.84 0.32 0.84 0.25 c
0.84 0.13 0.75 0.08 0.68 0.08 c 0.32 0.08 l
0.25 0.08 0.16 0.13 0.16 0.25 c 0.16 0.32 0.21 0.41 0.33 0.44 c
0.28 0.47 0.24 0.51 0.24 0.55 c 0.24 0.65 0.36 0.72 0.5 0.72 c s";

const MOUTH: &str = "0.40 0.48 m 0.45 0.45 0.55 0.45 0.60 0.48 c S";

const HAT: &str = "\
0.58 0.90 m 0.77 0.81 l 0.74 0.61 l 0.66 0.60 0.50 0.66 0.46 0.72 c
0.58 0.90 l b";

const ARMS: &str = "\
0.20 0.31 m 0.19 0.33 0.14 0.41 0.13 0.42 c
0.12 0.43 0.10 0.43 0.07 0.44 c 0.04 0.46 0.06 0.46 0.08 0.46 c
0.09 0.46 0.11 0.44 0.12 0.44 c 0.14 0.46 0.14 0.47 0.15 0.49 c
0.16 0.51 0.16 0.49 0.16 0.48 c 0.16 0.46 0.14 0.44 0.15 0.43 c
0.16 0.42 0.21 0.35 0.22 0.33 c 0.23 0.31 0.21 0.30 0.20 0.31 c b
0.80 0.31 m 0.81 0.33 0.86 0.41 0.87 0.42 c
0.88 0.43 0.90 0.43 0.93 0.44 c 0.96 0.46 0.94 0.46 0.92 0.46 c
0.91 0.46 0.89 0.44 0.88 0.44 c 0.86 0.46 0.86 0.47 0.85 0.49 c
0.84 0.51 0.84 0.49 0.84 0.48 c 0.84 0.46 0.86 0.44 0.85 0.43 c
0.84 0.42 0.79 0.35 0.78 0.33 c 0.77 0.31 0.79 0.30 0.80 0.31 c b";

const MUFFLER: &str = "\
0.27 0.48 m 0.42 0.38 0.58 0.38 0.73 0.48 c
0.75 0.46 0.76 0.44 0.77 0.41 c 0.77 0.39 0.75 0.37 0.73 0.36 c
0.74 0.33 0.74 0.31 0.76 0.26 c 0.75 0.25 0.72 0.24 0.66 0.23 c
0.66 0.27 0.65 0.30 0.63 0.34 c 0.42 0.30 0.32 0.35 0.24 0.41 c
0.25 0.45 0.26 0.47 0.27 0.48 c b";

/// (cx, cy, rx, ry, painting operator)
const EYES: [(f64, f64, f64, f64, &str); 2] =
    [(0.40, 0.56, 0.02, 0.03, "f"), (0.60, 0.56, 0.02, 0.03, "f")];

const BUTTONS: [(f64, f64, f64, f64, &str); 2] =
    [(0.50, 0.16, 0.03, 0.03, "b"), (0.50, 0.26, 0.03, 0.03, "b")];

const SNOWFLAKES: [(f64, f64); 9] = [
    (0.07, 0.28),
    (0.08, 0.68),
    (0.13, 0.55),
    (0.23, 0.76),
    (0.42, 0.89),
    (0.74, 0.89),
    (0.88, 0.73),
    (0.92, 0.53),
    (0.94, 0.23),
];

/// Bézier control distance for a quarter circle of radius 1.
const KAPPA: f64 = 0.55228475;

impl Artwork for Snowman {
    fn content(&self, width: f64, height: f64, scale: f64, muffler: &Color) -> String {
        let mut out = String::with_capacity(4096);
        let _ = writeln!(out, "q {}", transform(width, height, scale));
        out.push_str(&Snowman::drawing(muffler));
        out.push_str("Q\n");
        out
    }
}

impl Snowman {
    /// The drawing in unit-square coordinates, without any transformation.
    pub fn drawing(muffler: &Color) -> String {
        let mut out = String::with_capacity(4096);
        for part in [LINE_STYLE, BODY] {
            out.push_str(part);
            out.push('\n');
        }
        for &(cx, cy, rx, ry, op) in &EYES {
            out.push_str(&ellipse(cx, cy, rx, ry, op));
        }
        for part in [MOUTH, HAT, ARMS] {
            out.push_str(part);
            out.push('\n');
        }
        for &(cx, cy, rx, ry, op) in &BUTTONS {
            out.push_str(&ellipse(cx, cy, rx, ry, op));
        }
        for &(cx, cy) in &SNOWFLAKES {
            out.push_str(&ellipse(cx, cy, 0.04, 0.04, "s"));
        }
        let _ = writeln!(out, "{} {}", muffler.pdf_code(false), muffler.pdf_code(true));
        out.push_str(MUFFLER);
        out.push('\n');
        out
    }
}

/// `cm` operator mapping the unit square to a centered square whose side is
/// `scale` times the longer page edge.
pub fn transform(width: f64, height: f64, scale: f64) -> String {
    let side = width.max(height) * scale;
    let ox = (width - side) / 2.0;
    let oy = (height - side) / 2.0;
    format!(
        "{} 0 0 {} {} {} cm",
        format_real(side),
        format_real(side),
        format_real(ox),
        format_real(oy)
    )
}

/// An axis-aligned ellipse as four Bézier arcs, closed with the painting
/// operator `op`.
pub fn ellipse(cx: f64, cy: f64, rx: f64, ry: f64, op: &str) -> String {
    let n = |v: f64| format_real_with(v, 4);
    let (kx, ky) = (KAPPA * rx, KAPPA * ry);
    let mut out = String::with_capacity(256);
    let _ = writeln!(out, "{} {} m", n(cx + rx), n(cy));
    let _ = writeln!(
        out,
        "{} {} {} {} {} {} c",
        n(cx + rx),
        n(cy + ky),
        n(cx + kx),
        n(cy + ry),
        n(cx),
        n(cy + ry)
    );
    let _ = writeln!(
        out,
        "{} {} {} {} {} {} c",
        n(cx - kx),
        n(cy + ry),
        n(cx - rx),
        n(cy + ky),
        n(cx - rx),
        n(cy)
    );
    let _ = writeln!(
        out,
        "{} {} {} {} {} {} c",
        n(cx - rx),
        n(cy - ky),
        n(cx - kx),
        n(cy - ry),
        n(cx),
        n(cy - ry)
    );
    let _ = writeln!(
        out,
        "{} {} {} {} {} {} c {}",
        n(cx + kx),
        n(cy - ry),
        n(cx + rx),
        n(cy - ky),
        n(cx + rx),
        n(cy),
        op
    );
    out
}

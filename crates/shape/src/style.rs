use crate::path::FillRule;

/// An 8 bits per channel RGBA color.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const WHITE: Self = Color::new(255, 255, 255, 255);
    pub const BLACK: Self = Color::new(0, 0, 0, 255);
    pub const TRANSPARENT: Self = Color::new(0, 0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Color { r, g, b, a }
    }

    /// Opaque color from a `0xRRGGBB` value. Bits above the 24th are ignored.
    pub const fn from_hex(hex: u32) -> Self {
        Color {
            r: ((hex >> 16) & 0xFF) as u8,
            g: ((hex >> 8) & 0xFF) as u8,
            b: (hex & 0xFF) as u8,
            a: 255,
        }
    }

    /// The `0xRRGGBB` value of the color, without alpha.
    pub const fn to_hex(self) -> u32 {
        (self.r as u32) << 16 | (self.g as u32) << 8 | self.b as u32
    }

    pub const fn with_alpha(mut self, a: u8) -> Self {
        self.a = a;
        self
    }

    pub fn is_opaque(self) -> bool {
        self.a == 255
    }

    pub fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    pub fn to_f32_array(self) -> [f32; 4] {
        [
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
            self.a as f32 / 255.0,
        ]
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::WHITE
    }
}

/// How a path is stored.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub enum Mode {
    /// Drawing calls are recorded as commands and the polylines are generated
    /// from them on demand.
    Commands,
    /// Drawing calls write directly into the polylines. No command is recorded.
    Polylines,
}

impl Default for Mode {
    fn default() -> Self {
        Mode::Commands
    }
}

/// Rendering attributes of a path.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct Style {
    /// Whether the interior is tessellated and drawn.
    ///
    /// Default value: `true`.
    pub filled: bool,
    pub fill_color: Color,
    pub stroke_color: Color,
    /// Width of the outline, which is only drawn when positive.
    ///
    /// Default value: `0.0`.
    pub stroke_width: f32,
    /// Selects which regions of the shape are filled.
    ///
    /// Default value: `FillRule::Odd`.
    pub fill_rule: FillRule,
    /// When false the renderer keeps its current color instead of the path's colors.
    ///
    /// Default value: `true`.
    pub use_shape_color: bool,
}

impl Style {
    pub const DEFAULT_FILLED: bool = true;
    pub const DEFAULT_FILL_COLOR: Color = Color::WHITE;
    pub const DEFAULT_STROKE_COLOR: Color = Color::WHITE;
    pub const DEFAULT_STROKE_WIDTH: f32 = 0.0;
    pub const DEFAULT_FILL_RULE: FillRule = FillRule::Odd;
    pub const DEFAULT_USE_SHAPE_COLOR: bool = true;

    pub const DEFAULT: Self = Style {
        filled: Self::DEFAULT_FILLED,
        fill_color: Self::DEFAULT_FILL_COLOR,
        stroke_color: Self::DEFAULT_STROKE_COLOR,
        stroke_width: Self::DEFAULT_STROKE_WIDTH,
        fill_rule: Self::DEFAULT_FILL_RULE,
        use_shape_color: Self::DEFAULT_USE_SHAPE_COLOR,
    };

    #[inline]
    pub const fn with_filled(mut self, filled: bool) -> Self {
        self.filled = filled;
        self
    }

    #[inline]
    pub const fn with_fill_color(mut self, color: Color) -> Self {
        self.fill_color = color;
        self
    }

    #[inline]
    pub const fn with_stroke_color(mut self, color: Color) -> Self {
        self.stroke_color = color;
        self
    }

    #[inline]
    pub const fn with_stroke_width(mut self, width: f32) -> Self {
        self.stroke_width = width;
        self
    }

    #[inline]
    pub const fn with_fill_rule(mut self, rule: FillRule) -> Self {
        self.fill_rule = rule;
        self
    }

    #[inline]
    pub const fn with_use_shape_color(mut self, use_shape_color: bool) -> Self {
        self.use_shape_color = use_shape_color;
        self
    }

    /// Whether the outline is drawn.
    pub fn has_outline(&self) -> bool {
        self.stroke_width > 0.0
    }
}

impl Default for Style {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[test]
fn hex_colors() {
    let c = Color::from_hex(0x336699);
    assert_eq!(c, Color::new(0x33, 0x66, 0x99, 255));
    assert_eq!(c.to_hex(), 0x336699);
    assert!(c.is_opaque());

    // Only the lower 24 bits are used.
    assert_eq!(Color::from_hex(0xAB_FF0000), Color::new(255, 0, 0, 255));

    assert_eq!(Color::BLACK.with_alpha(0), Color::TRANSPARENT);
    assert_eq!(Color::WHITE.to_f32_array(), [1.0; 4]);
}

#[test]
fn default_style() {
    let style = Style::default();
    assert!(style.filled);
    assert_eq!(style.fill_color, Color::WHITE);
    assert_eq!(style.stroke_color, Color::WHITE);
    assert_eq!(style.stroke_width, 0.0);
    assert_eq!(style.fill_rule, FillRule::Odd);
    assert!(style.use_shape_color);
    assert!(!style.has_outline());

    assert!(style.with_stroke_width(2.0).has_outline());
    assert!(!style.with_stroke_width(-1.0).has_outline());
}

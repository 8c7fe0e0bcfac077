/// RGB/HSL color values and the perceptual color distance
pub mod model;
/// Dominance-ordered palettes and palette-to-palette distance
pub mod palette;

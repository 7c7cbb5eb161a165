//! Brightness to glyph selection over the fixed rain alphabet.

/// Rain glyphs ordered from darkest to brightest.
///
/// Every entry renders one terminal column wide: half-width katakana,
/// then Latin letters, then digits.
#[rustfmt::skip]
pub const ALPHABET: &[char] = &[
    'ｱ', 'ｲ', 'ｳ', 'ｴ', 'ｵ', 'ｶ', 'ｷ', 'ｸ', 'ｹ', 'ｺ', 'ｻ', 'ｼ',
    'ｽ', 'ｾ', 'ｿ', 'ﾀ', 'ﾁ', 'ﾂ', 'ﾃ', 'ﾄ', 'ﾅ', 'ﾆ', 'ﾇ', 'ﾈ',
    'ﾉ', 'ﾊ', 'ﾋ', 'ﾌ', 'ﾍ', 'ﾎ', 'ﾏ', 'ﾐ', 'ﾑ', 'ﾒ', 'ﾓ', 'ﾔ',
    'ﾕ', 'ﾖ', 'ﾗ', 'ﾘ', 'ﾙ', 'ﾚ', 'ﾛ', 'ﾜ', 'ｦ', 'ﾝ',
    'A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'I', 'J', 'K', 'L', 'M',
    'N', 'O', 'P', 'Q', 'R', 'S', 'T', 'U', 'V', 'W', 'X', 'Y', 'Z',
    'a', 'b', 'c', 'd', 'e', 'f', 'g', 'h', 'i', 'j', 'k', 'l', 'm',
    'n', 'o', 'p', 'q', 'r', 's', 't', 'u', 'v', 'w', 'x', 'y', 'z',
    '0', '1', '2', '3', '4', '5', '6', '7', '8', '9',
];

/// Alphabet index for a brightness in `[0, 255]`.
///
/// Out-of-range (and NaN) input is clamped rather than rejected.
#[inline]
pub fn glyph_index(brightness: f32) -> usize {
    let last = ALPHABET.len() - 1;
    let b = if brightness.is_nan() {
        0.0
    } else {
        brightness.clamp(0.0, 255.0)
    };
    let idx = ((b / 255.0) * last as f32).floor() as usize;
    idx.min(last)
}

/// Glyph for a brightness in `[0, 255]`: 0 is the first glyph, 255 the last.
#[inline]
pub fn select_glyph(brightness: f32) -> char {
    ALPHABET[glyph_index(brightness)]
}

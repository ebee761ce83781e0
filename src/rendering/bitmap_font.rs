use image::{Rgba, RgbaImage};
use imageproc::drawing::draw_filled_rect_mut;
use imageproc::rect::Rect;

/// Glyph cell width in font pixels, including one column of spacing.
const ADVANCE: i32 = 6;
/// Glyph height in font pixels.
pub const GLYPH_HEIGHT: i32 = 7;

/// Which way a line of text runs across the image.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextDirection {
    /// Left to right; the anchor is the top-left corner.
    Horizontal,
    /// Bottom to top (rotated a quarter turn counter-clockwise); the anchor is the bottom-left corner.
    Vertical,
}

/// Length of `text` along its direction of travel, in image pixels.
pub fn text_extent(text: &str, scale: u32) -> u32 {
    let chars = text.chars().count() as i32;
    ((chars * ADVANCE - 1).max(0) * scale as i32) as u32
}

/// Draws `text` with the 5x7 bitmap font, each font pixel a `scale` x `scale` square.
///
/// Letters are drawn upper case. Pixels falling outside the image are clipped.
pub fn draw_text(
    img: &mut RgbaImage,
    text: &str,
    x: i32,
    y: i32,
    scale: u32,
    color: Rgba<u8>,
    direction: TextDirection,
) {
    let s = scale.max(1) as i32;
    for (i, ch) in text.to_uppercase().chars().enumerate() {
        let pattern = glyph(ch);
        for (row, &bits) in pattern.iter().enumerate() {
            for col in 0..5 {
                if (bits >> (4 - col)) & 1 == 0 {
                    continue;
                }
                let along = i as i32 * ADVANCE + col;
                let across = row as i32;
                let (px, py) = match direction {
                    TextDirection::Horizontal => (x + along * s, y + across * s),
                    TextDirection::Vertical => (x + across * s, y - (along + 1) * s),
                };
                draw_filled_rect_mut(img, Rect::at(px, py).of_size(s as u32, s as u32), color);
            }
        }
    }
}

/// 5x7 bitmap pattern for a character, most significant of the five bits on the left.
fn glyph(ch: char) -> [u8; 7] {
    match ch {
        'A' => [0b01110, 0b10001, 0b10001, 0b11111, 0b10001, 0b10001, 0b10001],
        'B' => [0b11110, 0b10001, 0b10001, 0b11110, 0b10001, 0b10001, 0b11110],
        'C' => [0b01110, 0b10001, 0b10000, 0b10000, 0b10000, 0b10001, 0b01110],
        'D' => [0b11110, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b11110],
        'E' => [0b11111, 0b10000, 0b10000, 0b11110, 0b10000, 0b10000, 0b11111],
        'F' => [0b11111, 0b10000, 0b10000, 0b11110, 0b10000, 0b10000, 0b10000],
        'G' => [0b01110, 0b10001, 0b10000, 0b10111, 0b10001, 0b10001, 0b01111],
        'H' => [0b10001, 0b10001, 0b10001, 0b11111, 0b10001, 0b10001, 0b10001],
        'I' => [0b01110, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b01110],
        'J' => [0b00111, 0b00010, 0b00010, 0b00010, 0b00010, 0b10010, 0b01100],
        'K' => [0b10001, 0b10010, 0b10100, 0b11000, 0b10100, 0b10010, 0b10001],
        'L' => [0b10000, 0b10000, 0b10000, 0b10000, 0b10000, 0b10000, 0b11111],
        'M' => [0b10001, 0b11011, 0b10101, 0b10101, 0b10001, 0b10001, 0b10001],
        'N' => [0b10001, 0b11001, 0b10101, 0b10011, 0b10001, 0b10001, 0b10001],
        'O' => [0b01110, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01110],
        'P' => [0b11110, 0b10001, 0b10001, 0b11110, 0b10000, 0b10000, 0b10000],
        'Q' => [0b01110, 0b10001, 0b10001, 0b10001, 0b10101, 0b10010, 0b01101],
        'R' => [0b11110, 0b10001, 0b10001, 0b11110, 0b10100, 0b10010, 0b10001],
        'S' => [0b01111, 0b10000, 0b10000, 0b01110, 0b00001, 0b00001, 0b11110],
        'T' => [0b11111, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100],
        'U' => [0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01110],
        'V' => [0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01010, 0b00100],
        'W' => [0b10001, 0b10001, 0b10001, 0b10101, 0b10101, 0b11011, 0b10001],
        'X' => [0b10001, 0b10001, 0b01010, 0b00100, 0b01010, 0b10001, 0b10001],
        'Y' => [0b10001, 0b10001, 0b10001, 0b01010, 0b00100, 0b00100, 0b00100],
        'Z' => [0b11111, 0b00001, 0b00010, 0b00100, 0b01000, 0b10000, 0b11111],
        '0' => [0b01110, 0b10001, 0b10011, 0b10101, 0b11001, 0b10001, 0b01110],
        '1' => [0b00100, 0b01100, 0b00100, 0b00100, 0b00100, 0b00100, 0b01110],
        '2' => [0b01110, 0b10001, 0b00001, 0b00010, 0b00100, 0b01000, 0b11111],
        '3' => [0b11111, 0b00010, 0b00100, 0b00010, 0b00001, 0b10001, 0b01110],
        '4' => [0b00010, 0b00110, 0b01010, 0b10010, 0b11111, 0b00010, 0b00010],
        '5' => [0b11111, 0b10000, 0b11110, 0b00001, 0b00001, 0b10001, 0b01110],
        '6' => [0b00110, 0b01000, 0b10000, 0b11110, 0b10001, 0b10001, 0b01110],
        '7' => [0b11111, 0b00001, 0b00010, 0b00100, 0b01000, 0b01000, 0b01000],
        '8' => [0b01110, 0b10001, 0b10001, 0b01110, 0b10001, 0b10001, 0b01110],
        '9' => [0b01110, 0b10001, 0b10001, 0b01111, 0b00001, 0b00010, 0b01100],
        '%' => [0b11001, 0b11010, 0b00010, 0b00100, 0b01000, 0b01011, 0b10011],
        ' ' => [0b00000, 0b00000, 0b00000, 0b00000, 0b00000, 0b00000, 0b00000],
        '_' => [0b00000, 0b00000, 0b00000, 0b00000, 0b00000, 0b00000, 0b11111],
        '-' => [0b00000, 0b00000, 0b00000, 0b11111, 0b00000, 0b00000, 0b00000],
        '.' => [0b00000, 0b00000, 0b00000, 0b00000, 0b00000, 0b01100, 0b01100],
        ':' => [0b00000, 0b01100, 0b01100, 0b00000, 0b01100, 0b01100, 0b00000],
        '/' => [0b00001, 0b00001, 0b00010, 0b00100, 0b01000, 0b10000, 0b10000],
        '(' => [0b00010, 0b00100, 0b01000, 0b01000, 0b01000, 0b00100, 0b00010],
        ')' => [0b01000, 0b00100, 0b00010, 0b00010, 0b00010, 0b00100, 0b01000],
        // Unknown characters render as a hollow box.
        _ => [0b11111, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b11111],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const INK: Rgba<u8> = Rgba([0, 0, 0, 255]);

    fn inked(img: &RgbaImage) -> Vec<(u32, u32)> {
        img.enumerate_pixels()
            .filter(|(_, _, p)| p.0[3] > 0)
            .map(|(x, y, _)| (x, y))
            .collect()
    }

    #[test]
    fn text_extent_test() {
        assert_eq!(text_extent("", 3), 0);
        assert_eq!(text_extent("A", 1), 5);
        assert_eq!(text_extent("AB", 2), 22);
    }

    #[test]
    fn horizontal_glyph_is_scaled() {
        let mut img = RgbaImage::new(20, 20);
        draw_text(&mut img, "l", 0, 0, 2, INK, TextDirection::Horizontal);
        let pixels = inked(&img);
        // 'L' has 11 set bits, each a 2x2 square.
        assert_eq!(pixels.len(), 44);
        assert!(pixels.iter().all(|&(x, y)| x < 10 && y < 14));
        assert!(pixels.contains(&(0, 0)) && pixels.contains(&(9, 13)));
    }

    #[test]
    fn vertical_text_runs_upwards() {
        let mut img = RgbaImage::new(20, 20);
        draw_text(&mut img, "I", 2, 19, 1, INK, TextDirection::Vertical);
        let pixels = inked(&img);
        assert!(!pixels.is_empty());
        assert!(pixels.iter().all(|&(x, y)| (2..9).contains(&x) && (14..19).contains(&y)));
    }

    #[test]
    fn text_outside_image_is_clipped() {
        let mut img = RgbaImage::new(4, 4);
        draw_text(&mut img, "center", -100, -100, 3, INK, TextDirection::Horizontal);
        assert!(inked(&img).is_empty());
    }
}

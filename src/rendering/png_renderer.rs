use crate::annotations::point::Point;
use crate::config::{MarkerStyle, PlotConfig};
use crate::error::{Result, TrajectoryError};
use crate::rendering::bitmap_font::{GLYPH_HEIGHT, TextDirection, draw_text, text_extent};
use crate::rendering::plot_layout::FigureLayout;
use image::{ImageFormat, Rgba, RgbaImage};
use imageproc::drawing::{Blend, Canvas, draw_filled_rect_mut};
use imageproc::rect::Rect;
use std::path::Path;

const INK: Rgba<u8> = Rgba([0, 0, 0, 255]);
const SPINE_WIDTH_PT: f64 = 0.8;
/// Gap between the axes box and the title or axis labels.
const LABEL_PAD_PT: f64 = 6.0;

/// Rasterizes the figure described by `layout` at the configured dpi.
pub fn render_png(
    layout: &FigureLayout,
    points: &[Point],
    title: &str,
    config: &PlotConfig,
) -> RgbaImage {
    let (width, height) = config.raster_size_px();
    let k = config.dpi as f64 / 72.0;
    let background = if config.transparent {
        Rgba([0, 0, 0, 0])
    } else {
        Rgba([255, 255, 255, 255])
    };
    let to_px = |(fx, fy): (f64, f64)| ((fx * k).round() as i32, ((layout.height - fy) * k).round() as i32);
    let radius = (config.marker_radius_pt * k).round().max(1.0) as i32;

    let mut canvas = Blend(RgbaImage::from_pixel(width, height, background));
    let point_color = rgba(config.trajectory_marker);
    for point in points {
        fill_disc(&mut canvas, to_px(layout.to_figure(*point)), radius, point_color);
    }
    let reference = config.reference.point();
    let reference_px = to_px(layout.to_figure(reference));
    fill_disc(&mut canvas, reference_px, radius, rgba(config.reference_marker));
    let mut img = canvas.0;

    draw_spines(&mut img, layout, k);

    let annotation_scale = font_scale(config.annotation_font_pt, k);
    let (rx, ry) = reference_px;
    draw_text(
        &mut img,
        &config.reference.name,
        rx,
        ry - GLYPH_HEIGHT * annotation_scale as i32,
        annotation_scale,
        INK,
        TextDirection::Horizontal,
    );

    let title_scale = font_scale(config.title_font_pt, k);
    let (cx, top) = to_px((layout.axes.center_x(), layout.axes.top + LABEL_PAD_PT));
    draw_text(
        &mut img,
        title,
        cx - text_extent(title, title_scale) as i32 / 2,
        top - GLYPH_HEIGHT * title_scale as i32,
        title_scale,
        INK,
        TextDirection::Horizontal,
    );

    let label_scale = font_scale(config.label_font_pt, k);
    let (cx, below) = to_px((layout.axes.center_x(), layout.axes.bottom - LABEL_PAD_PT));
    draw_text(
        &mut img,
        &config.x_label,
        cx - text_extent(&config.x_label, label_scale) as i32 / 2,
        below,
        label_scale,
        INK,
        TextDirection::Horizontal,
    );
    let (left, cy) = to_px((layout.axes.left - LABEL_PAD_PT, layout.axes.center_y()));
    draw_text(
        &mut img,
        &config.y_label,
        left - GLYPH_HEIGHT * label_scale as i32,
        cy + text_extent(&config.y_label, label_scale) as i32 / 2,
        label_scale,
        INK,
        TextDirection::Vertical,
    );
    img
}

pub fn write_png(img: &RgbaImage, path: &Path) -> Result<()> {
    img.save_with_format(path, ImageFormat::Png)
        .map_err(|e| TrajectoryError::render(path, e))
}

/// Blends a filled disc onto the canvas, touching every covered pixel exactly once so that
/// overlapping markers accumulate opacity.
fn fill_disc(canvas: &mut Blend<RgbaImage>, (cx, cy): (i32, i32), radius: i32, color: Rgba<u8>) {
    let (width, height) = canvas.dimensions();
    for dy in -radius..=radius {
        let y = cy + dy;
        if y < 0 || y >= height as i32 {
            continue;
        }
        let half = ((radius * radius - dy * dy) as f64).sqrt().floor() as i32;
        let x_start = (cx - half).max(0);
        let x_end = (cx + half).min(width as i32 - 1);
        for x in x_start..=x_end {
            canvas.draw_pixel(x as u32, y as u32, color);
        }
    }
}

fn draw_spines(img: &mut RgbaImage, layout: &FigureLayout, k: f64) {
    let thickness = (SPINE_WIDTH_PT * k).round().max(1.0) as u32;
    let left = (layout.axes.left * k).round() as i32;
    let right = (layout.axes.right * k).round() as i32;
    let top = ((layout.height - layout.axes.top) * k).round() as i32;
    let bottom = ((layout.height - layout.axes.bottom) * k).round() as i32;
    let half = thickness as i32 / 2;
    let span_x = (right - left) as u32 + thickness;
    let span_y = (bottom - top) as u32 + thickness;
    draw_filled_rect_mut(img, Rect::at(left - half, top - half).of_size(span_x, thickness), INK);
    draw_filled_rect_mut(img, Rect::at(left - half, bottom - half).of_size(span_x, thickness), INK);
    draw_filled_rect_mut(img, Rect::at(left - half, top - half).of_size(thickness, span_y), INK);
    draw_filled_rect_mut(img, Rect::at(right - half, top - half).of_size(thickness, span_y), INK);
}

/// Bitmap font scale giving a cap height of roughly 70% of the font size.
fn font_scale(font_pt: f64, k: f64) -> u32 {
    (font_pt * k / 10.0).round().max(1.0) as u32
}

fn rgba(style: MarkerStyle) -> Rgba<u8> {
    let [r, g, b] = style.rgb;
    Rgba([r, g, b, (style.alpha * 255.0).round() as u8])
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn small_config() -> PlotConfig {
        PlotConfig { dpi: 72, ..PlotConfig::default() }
    }

    #[test]
    fn raster_matches_figure_size() {
        let config = small_config();
        let points = vec![Point { x: 300.0, y: 200.0 }];
        let layout = FigureLayout::new(460.8, 345.6, array![[300.0, 200.0]].view(), config.reference.point());
        let img = render_png(&layout, &points, "Centers of Bounding Boxes for 1", &config);
        assert_eq!(img.dimensions(), (461, 346));
    }

    #[test]
    fn background_is_transparent_and_markers_are_translucent() {
        let config = small_config();
        let points = vec![Point { x: 100.0, y: 100.0 }; 3];
        let layout = FigureLayout::new(460.8, 345.6, array![[100.0, 100.0]].view(), config.reference.point());
        let img = render_png(&layout, &points, "t", &config);
        assert_eq!(img.get_pixel(2, 2).0[3], 0);

        let (fx, fy) = layout.to_figure(points[0]);
        let marker = img.get_pixel(fx.round() as u32, (layout.height - fy).round() as u32);
        // Three stacked markers at alpha 0.05 stay well short of opaque.
        assert!(marker.0[0] >= 250);
        assert!(marker.0[3] > 13 && marker.0[3] < 64);
    }

    #[test]
    fn opaque_background_when_not_transparent() {
        let config = PlotConfig { transparent: false, ..small_config() };
        let layout = FigureLayout::new(460.8, 345.6, array![[0.0, 0.0]].view(), config.reference.point());
        let img = render_png(&layout, &[], "t", &config);
        assert_eq!(img.get_pixel(2, 2), &Rgba([255, 255, 255, 255]));
    }
}

use crate::annotations::point::Point;
use crate::config::{MarkerStyle, PlotConfig};
use crate::error::{Result, TrajectoryError};
use crate::rendering::plot_layout::FigureLayout;
use lopdf::content::{Content, Operation};
use lopdf::{Document, Object, Stream, StringFormat, dictionary};
use std::path::Path;

/// Bezier control distance for approximating a quarter circle.
const KAPPA: f64 = 0.552_284_8;
/// Average Helvetica glyph width as a fraction of the font size, used to center text.
const HELVETICA_AVG_WIDTH: f64 = 0.55;
const SPINE_WIDTH_PT: f64 = 0.8;
const LABEL_PAD_PT: f64 = 6.0;

/// Builds a single page vector figure. Page units are points, so the layout maps directly.
pub fn render_pdf(
    layout: &FigureLayout,
    points: &[Point],
    title: &str,
    config: &PlotConfig,
) -> Result<Document> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
        "Encoding" => "WinAnsiEncoding",
    });
    let points_gs = doc.add_object(graphics_state(config.trajectory_marker));
    let reference_gs = doc.add_object(graphics_state(config.reference_marker));
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! { "F1" => font_id },
        "ExtGState" => dictionary! { "GSPoints" => points_gs, "GSReference" => reference_gs },
    });

    let mut ops = Vec::with_capacity(points.len() * 7 + 64);
    if !config.transparent {
        ops.push(Operation::new("q", vec![]));
        ops.push(Operation::new("g", vec![real(1.0)]));
        ops.push(Operation::new(
            "re",
            vec![real(0.0), real(0.0), real(layout.width), real(layout.height)],
        ));
        ops.push(Operation::new("f", vec![]));
        ops.push(Operation::new("Q", vec![]));
    }

    // Clip markers to the axes box.
    ops.push(Operation::new("q", vec![]));
    ops.push(Operation::new(
        "re",
        vec![
            real(layout.axes.left),
            real(layout.axes.bottom),
            real(layout.axes.width()),
            real(layout.axes.height()),
        ],
    ));
    ops.push(Operation::new("W", vec![]));
    ops.push(Operation::new("n", vec![]));
    push_markers(&mut ops, layout, points, "GSPoints", config.trajectory_marker, config.marker_radius_pt);
    let reference = config.reference.point();
    push_markers(
        &mut ops,
        layout,
        std::slice::from_ref(&reference),
        "GSReference",
        config.reference_marker,
        config.marker_radius_pt,
    );
    ops.push(Operation::new("Q", vec![]));

    ops.push(Operation::new("q", vec![]));
    ops.push(Operation::new("G", vec![real(0.0)]));
    ops.push(Operation::new("w", vec![real(SPINE_WIDTH_PT)]));
    ops.push(Operation::new(
        "re",
        vec![
            real(layout.axes.left),
            real(layout.axes.bottom),
            real(layout.axes.width()),
            real(layout.axes.height()),
        ],
    ));
    ops.push(Operation::new("S", vec![]));
    ops.push(Operation::new("Q", vec![]));

    let (rx, ry) = layout.to_figure(reference);
    push_text(&mut ops, &config.reference.name, config.annotation_font_pt, rx, ry, false);
    push_text(
        &mut ops,
        title,
        config.title_font_pt,
        layout.axes.center_x() - text_width(title, config.title_font_pt) / 2.0,
        layout.axes.top + LABEL_PAD_PT,
        false,
    );
    push_text(
        &mut ops,
        &config.x_label,
        config.label_font_pt,
        layout.axes.center_x() - text_width(&config.x_label, config.label_font_pt) / 2.0,
        layout.axes.bottom - LABEL_PAD_PT - config.label_font_pt,
        false,
    );
    push_text(
        &mut ops,
        &config.y_label,
        config.label_font_pt,
        layout.axes.left - LABEL_PAD_PT,
        layout.axes.center_y() - text_width(&config.y_label, config.label_font_pt) / 2.0,
        true,
    );

    let content = Content { operations: ops };
    let encoded = content
        .encode()
        .map_err(|e| TrajectoryError::render("<pdf content>", e))?;
    let content_id = doc.add_object(Stream::new(dictionary! {}, encoded));
    let page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "Contents" => content_id,
    });
    let pages = dictionary! {
        "Type" => "Pages",
        "Kids" => vec![page_id.into()],
        "Count" => 1,
        "Resources" => resources_id,
        "MediaBox" => vec![real(0.0), real(0.0), real(layout.width), real(layout.height)],
    };
    doc.objects.insert(pages_id, Object::Dictionary(pages));
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
    doc.compress();
    Ok(doc)
}

pub fn write_pdf(doc: &mut Document, path: &Path) -> Result<()> {
    doc.save(path).map_err(|e| TrajectoryError::render(path, e))?;
    Ok(())
}

fn graphics_state(style: MarkerStyle) -> lopdf::Dictionary {
    dictionary! {
        "Type" => "ExtGState",
        "ca" => real(style.alpha),
        "CA" => real(style.alpha),
    }
}

/// Each disc is filled on its own so overlapping markers compound their opacity.
fn push_markers(
    ops: &mut Vec<Operation>,
    layout: &FigureLayout,
    points: &[Point],
    state: &str,
    style: MarkerStyle,
    radius: f64,
) {
    let [r, g, b] = style.rgb;
    ops.push(Operation::new("q", vec![]));
    ops.push(Operation::new("gs", vec![Object::Name(state.as_bytes().to_vec())]));
    ops.push(Operation::new(
        "rg",
        vec![real(r as f64 / 255.0), real(g as f64 / 255.0), real(b as f64 / 255.0)],
    ));
    for point in points {
        let (cx, cy) = layout.to_figure(*point);
        push_circle(ops, cx, cy, radius);
        ops.push(Operation::new("f", vec![]));
    }
    ops.push(Operation::new("Q", vec![]));
}

fn push_circle(ops: &mut Vec<Operation>, cx: f64, cy: f64, r: f64) {
    let k = r * KAPPA;
    ops.push(Operation::new("m", vec![real(cx + r), real(cy)]));
    let quarters = [
        [cx + r, cy + k, cx + k, cy + r, cx, cy + r],
        [cx - k, cy + r, cx - r, cy + k, cx - r, cy],
        [cx - r, cy - k, cx - k, cy - r, cx, cy - r],
        [cx + k, cy - r, cx + r, cy - k, cx + r, cy],
    ];
    for quarter in quarters {
        ops.push(Operation::new("c", quarter.iter().map(|&v| real(v)).collect()));
    }
    ops.push(Operation::new("h", vec![]));
}

/// Writes a line of text starting at (x, y). Vertical text runs bottom to top.
fn push_text(ops: &mut Vec<Operation>, text: &str, size: f64, x: f64, y: f64, vertical: bool) {
    ops.push(Operation::new("BT", vec![]));
    ops.push(Operation::new("Tf", vec![Object::Name(b"F1".to_vec()), real(size)]));
    let (a, b, c, d) = if vertical { (0.0, 1.0, -1.0, 0.0) } else { (1.0, 0.0, 0.0, 1.0) };
    ops.push(Operation::new(
        "Tm",
        vec![real(a), real(b), real(c), real(d), real(x), real(y)],
    ));
    ops.push(Operation::new(
        "Tj",
        vec![Object::String(win_ansi(text), StringFormat::Literal)],
    ));
    ops.push(Operation::new("ET", vec![]));
}

/// Encodes text for the WinAnsi-encoded standard font. Characters it cannot show become `?`.
fn win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| match c {
            ' '..='~' | '\u{a0}'..='\u{ff}' => c as u8,
            '€' => 0x80,
            '‚' => 0x82,
            'ƒ' => 0x83,
            '„' => 0x84,
            '…' => 0x85,
            '†' => 0x86,
            '‡' => 0x87,
            'ˆ' => 0x88,
            '‰' => 0x89,
            'Š' => 0x8a,
            '‹' => 0x8b,
            'Œ' => 0x8c,
            'Ž' => 0x8e,
            '\u{2018}' => 0x91,
            '\u{2019}' => 0x92,
            '\u{201c}' => 0x93,
            '\u{201d}' => 0x94,
            '•' => 0x95,
            '\u{2013}' => 0x96,
            '\u{2014}' => 0x97,
            '˜' => 0x98,
            '™' => 0x99,
            'š' => 0x9a,
            '›' => 0x9b,
            'œ' => 0x9c,
            'ž' => 0x9e,
            'Ÿ' => 0x9f,
            _ => b'?',
        })
        .collect()
}

fn text_width(text: &str, size: f64) -> f64 {
    text.chars().count() as f64 * size * HELVETICA_AVG_WIDTH
}

fn real(value: f64) -> Object {
    Object::from(value as f32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn render_pdf_page_test() {
        let config = PlotConfig::default();
        let points = vec![Point { x: 100.0, y: 120.0 }, Point { x: 300.0, y: 260.0 }];
        let layout = FigureLayout::new(460.8, 345.6, array![[100.0, 120.0], [300.0, 260.0]].view(), config.reference.point());
        let doc = render_pdf(&layout, &points, "Centers of Bounding Boxes for 7", &config).unwrap();

        let pages = doc.get_pages();
        assert_eq!(pages.len(), 1);
        let page_id = *pages.get(&1).unwrap();
        let content = Content::decode(&doc.get_page_content(page_id).unwrap()).unwrap();
        let fills = content.operations.iter().filter(|op| op.operator == "f").count();
        // Two trajectory markers plus the reference, no background fill.
        assert_eq!(fills, 3);
        let texts: Vec<Vec<u8>> = content
            .operations
            .iter()
            .filter(|op| op.operator == "Tj")
            .filter_map(|op| op.operands[0].as_str().ok().map(|s| s.to_vec()))
            .collect();
        assert!(texts.contains(&b"center".to_vec()));
        assert!(texts.contains(&b"Centers of Bounding Boxes for 7".to_vec()));
        assert!(texts.contains(&b"South Wall".to_vec()));
        assert!(texts.contains(&b"West Wall".to_vec()));
    }

    #[test]
    fn labels_are_win_ansi_encoded() {
        assert_eq!(win_ansi("West Wall"), b"West Wall".to_vec());
        assert_eq!(win_ansi("Zürich"), vec![b'Z', 0xfc, b'r', b'i', b'c', b'h']);
        assert_eq!(win_ansi("€5"), vec![0x80, b'5']);
        assert_eq!(win_ansi("被试"), b"??".to_vec());

        let config = PlotConfig::default();
        let layout = FigureLayout::new(460.8, 345.6, array![[1.0, 1.0]].view(), config.reference.point());
        let doc = render_pdf(&layout, &[], "Centers of Bounding Boxes for é", &config).unwrap();
        let page_id = *doc.get_pages().get(&1).unwrap();
        let content = Content::decode(&doc.get_page_content(page_id).unwrap()).unwrap();
        let title = content
            .operations
            .iter()
            .filter(|op| op.operator == "Tj")
            .filter_map(|op| op.operands[0].as_str().ok())
            .find(|text| text.starts_with(b"Centers"))
            .unwrap()
            .to_vec();
        assert_eq!(title.last(), Some(&0xe9));
        assert_eq!(title.len(), "Centers of Bounding Boxes for ".len() + 1);
    }

    #[test]
    fn opaque_pdf_fills_background() {
        let config = PlotConfig { transparent: false, ..PlotConfig::default() };
        let layout = FigureLayout::new(460.8, 345.6, array![[1.0, 1.0]].view(), config.reference.point());
        let doc = render_pdf(&layout, &[], "t", &config).unwrap();
        let page_id = *doc.get_pages().get(&1).unwrap();
        let content = Content::decode(&doc.get_page_content(page_id).unwrap()).unwrap();
        let fills = content.operations.iter().filter(|op| op.operator == "f").count();
        assert_eq!(fills, 2);
    }
}

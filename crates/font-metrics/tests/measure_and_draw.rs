//! Measurement and rasterization against a synthetic font with known metrics.
//!
//! The font has 1000 units per em, an 800/-200 ascender/descender, a 250 unit
//! space and 500 unit box glyphs for printable ASCII. At 20px every visible
//! character is 10px wide and the space is 5px.

use font_metrics::{FontFile, LINE_GUTTER, Measure, draw_text};
use font_types::GlyphId;
use image::{Rgba, RgbaImage};
use kurbo::{BezPath, Rect, Shape};
use write_fonts::{
    FontBuilder,
    tables::{
        cmap::Cmap,
        glyf::{GlyfLocaBuilder, Glyph, SimpleGlyph},
        head::Head,
        hhea::Hhea,
        hmtx::{Hmtx, LongMetric},
        maxp::Maxp,
        post::Post,
    },
};

const UNITS_PER_EM: u16 = 1000;
const SPACE_ADVANCE: u16 = 250;
const GLYPH_ADVANCE: u16 = 500;

fn box_glyph() -> Glyph {
    let path: BezPath = Rect::new(50.0, 0.0, 450.0, 700.0).to_path(0.1);
    Glyph::Simple(SimpleGlyph::from_bezpath(&path).expect("box glyph"))
}

/// Build a TrueType font covering space and printable ASCII.
fn make_box_font() -> Vec<u8> {
    let printable: Vec<char> = ('!'..='~').collect();
    // .notdef, space, then printable ASCII in order
    let num_glyphs = 2 + printable.len() as u16;

    let mut glyf_builder = GlyfLocaBuilder::new();
    glyf_builder.add_glyph(&box_glyph()).unwrap();
    glyf_builder.add_glyph(&Glyph::Empty).unwrap();
    for _ in &printable {
        glyf_builder.add_glyph(&box_glyph()).unwrap();
    }
    let (glyf, loca, loca_format) = glyf_builder.build();

    let mut mappings = vec![(' ', GlyphId::new(1))];
    mappings.extend(printable.iter().enumerate().map(|(i, ch)| (*ch, GlyphId::new(i as u32 + 2))));
    let cmap = Cmap::from_mappings(mappings).expect("cmap");

    let head = Head {
        font_revision: font_types::Fixed::from_f64(1.0),
        checksum_adjustment: 0,
        magic_number: 0x5F0F3CF5,
        flags: write_fonts::tables::head::Flags::empty(),
        units_per_em: UNITS_PER_EM,
        created: font_types::LongDateTime::new(0),
        modified: font_types::LongDateTime::new(0),
        x_min: 50,
        y_min: 0,
        x_max: 450,
        y_max: 700,
        mac_style: write_fonts::tables::head::MacStyle::empty(),
        lowest_rec_ppem: 8,
        font_direction_hint: 2,
        index_to_loc_format: match loca_format {
            write_fonts::tables::loca::LocaFormat::Short => 0,
            write_fonts::tables::loca::LocaFormat::Long => 1,
        },
    };

    let hhea = Hhea {
        ascender: font_types::FWord::new(800),
        descender: font_types::FWord::new(-200),
        line_gap: font_types::FWord::new(0),
        advance_width_max: font_types::UfWord::new(GLYPH_ADVANCE),
        min_left_side_bearing: font_types::FWord::new(0),
        min_right_side_bearing: font_types::FWord::new(0),
        x_max_extent: font_types::FWord::new(450),
        caret_slope_rise: 1,
        caret_slope_run: 0,
        caret_offset: 0,
        number_of_h_metrics: num_glyphs,
    };

    let hmtx = Hmtx {
        h_metrics: (0..num_glyphs)
            .map(|gid| LongMetric {
                advance: if gid == 1 { SPACE_ADVANCE } else { GLYPH_ADVANCE },
                side_bearing: if gid == 1 { 0 } else { 50 },
            })
            .collect(),
        left_side_bearings: vec![],
    };

    let maxp = Maxp {
        num_glyphs,
        max_points: Some(4),
        max_contours: Some(1),
        max_composite_points: Some(0),
        max_composite_contours: Some(0),
        max_zones: Some(1),
        max_twilight_points: Some(0),
        max_storage: Some(0),
        max_function_defs: Some(0),
        max_instruction_defs: Some(0),
        max_stack_elements: Some(0),
        max_size_of_instructions: Some(0),
        max_component_elements: Some(0),
        max_component_depth: Some(0),
    };

    let post = Post {
        version: font_types::Version16Dot16::VERSION_3_0,
        italic_angle: font_types::Fixed::from_f64(0.0),
        underline_position: font_types::FWord::new(-100),
        underline_thickness: font_types::FWord::new(50),
        is_fixed_pitch: 0,
        min_mem_type42: 0,
        max_mem_type42: 0,
        min_mem_type1: 0,
        max_mem_type1: 0,
        num_glyphs: Some(num_glyphs),
        glyph_name_index: None,
        string_data: None,
    };

    let mut builder = FontBuilder::new();
    builder.add_table(&head).unwrap();
    builder.add_table(&hhea).unwrap();
    builder.add_table(&hmtx).unwrap();
    builder.add_table(&maxp).unwrap();
    builder.add_table(&cmap).unwrap();
    builder.add_table(&post).unwrap();
    builder.add_table(&glyf).unwrap();
    builder.add_table(&loca).unwrap();
    builder.build()
}

#[test]
fn measures_advance_widths() {
    let file = FontFile::from_bytes(make_box_font()).unwrap();
    let font = file.at_size(20).unwrap();

    assert_eq!(font.measure("A"), 10);
    assert_eq!(font.measure("Phish"), 50);
    assert_eq!(font.space_width(), 5);
    assert_eq!(font.measure("Phish Bait"), 95);
}

#[test]
fn unmapped_characters_use_notdef_advance() {
    let file = FontFile::from_bytes(make_box_font()).unwrap();
    let font = file.at_size(20).unwrap();

    assert_eq!(font.measure("é"), 10);
}

#[test]
fn line_advance_is_ascent_plus_descent_plus_gutter() {
    let file = FontFile::from_bytes(make_box_font()).unwrap();
    let font = file.at_size(20).unwrap();

    assert_eq!(font.ascent(), 16.0);
    assert_eq!(font.descent(), 4.0);
    assert_eq!(font.line_advance(), 20 + LINE_GUTTER);
}

#[test]
fn scales_with_pixel_size() {
    let file = FontFile::from_bytes(make_box_font()).unwrap();
    let small = file.at_size(20).unwrap();
    let large = file.at_size(40).unwrap();

    assert_eq!(large.measure("abc"), 2 * small.measure("abc"));
}

#[test]
fn draws_ink_inside_glyph_box() {
    let file = FontFile::from_bytes(make_box_font()).unwrap();
    let font = file.at_size(20).unwrap();
    let mut canvas = RgbaImage::from_pixel(60, 40, Rgba([0, 0, 0, 255]));

    draw_text(&mut canvas, &font, 10, 10, "A", Rgba([255, 255, 255, 255]));

    // Box spans x 11..19 and sits on the baseline at y = 10 + 16.
    assert_eq!(*canvas.get_pixel(15, 20), Rgba([255, 255, 255, 255]));
    assert_eq!(*canvas.get_pixel(5, 20), Rgba([0, 0, 0, 255]));
    assert_eq!(*canvas.get_pixel(15, 30), Rgba([0, 0, 0, 255]));
}

#[test]
fn whitespace_draws_nothing() {
    let file = FontFile::from_bytes(make_box_font()).unwrap();
    let font = file.at_size(20).unwrap();
    let mut canvas = RgbaImage::from_pixel(30, 30, Rgba([0, 0, 0, 255]));
    let before = canvas.clone();

    draw_text(&mut canvas, &font, 0, 0, "   ", Rgba([255, 255, 255, 255]));

    assert_eq!(canvas, before);
}

#[test]
fn drawing_past_canvas_edge_is_dropped() {
    let file = FontFile::from_bytes(make_box_font()).unwrap();
    let font = file.at_size(20).unwrap();
    let mut canvas = RgbaImage::from_pixel(20, 20, Rgba([0, 0, 0, 255]));

    draw_text(&mut canvas, &font, -5, 10, "AAAA", Rgba([255, 255, 255, 255]));

    assert_eq!(canvas.dimensions(), (20, 20));
    assert_eq!(*canvas.get_pixel(2, 15), Rgba([255, 255, 255, 255]));
}

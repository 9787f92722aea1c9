//! End-to-end rendering against real files in a temporary directory.

use std::{
    fs::{read, write},
    io::Cursor,
    path::Path,
};

use cardsmith_core::{
    Align, BatchOptions, Card, CardRenderer, CardState, CardStatus, Field, FontFile, ImageSource,
    RenderConfig, Stage, WrapMode, load_font, render_batch,
};
use image::{ImageFormat, Rgba, RgbaImage};
use tempfile::TempDir;

const TEMPLATE_SIZE: (u32, u32) = (750, 1050);

fn write_template(path: &Path, color: Rgba<u8>) {
    RgbaImage::from_pixel(TEMPLATE_SIZE.0, TEMPLATE_SIZE.1, color).save(path).unwrap();
}

fn png_bytes(width: u32, height: u32, color: Rgba<u8>) -> Vec<u8> {
    let mut bytes = Vec::new();
    RgbaImage::from_pixel(width, height, color)
        .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .unwrap();
    bytes
}

/// Stock geometry, assets in a temp dir, and the generator's 40-character wrapping.
fn fixture() -> (TempDir, RenderConfig) {
    let dir = tempfile::tempdir().unwrap();
    let font_path = dir.path().join("font.ttf");
    write(&font_path, font_test_data::VAZIRMATN_VAR).unwrap();

    let attack = dir.path().join("attackcard.png");
    let defense = dir.path().join("defensecard.png");
    write_template(&attack, Rgba([120, 20, 20, 255]));
    write_template(&defense, Rgba([20, 20, 120, 255]));

    let mut config = RenderConfig::starter();
    config.font.path = font_path;
    config.flavors.attack.base_image = attack;
    config.flavors.defense.base_image = defense;
    config.output_dir = dir.path().join("output");
    config.wrap = WrapMode::Characters(40);
    config.styles.description.align = Align::Left;
    (dir, config)
}

fn phish_bait() -> Card {
    Card::new("Cyber Ops", "Phish Bait", "A".repeat(200)).with_quote("")
}

#[test]
fn renders_named_png_at_template_size() {
    let (_dir, mut config) = fixture();
    config.flavors.attack.cards.push(phish_bait());

    let font = load_font(&config.font, None);
    let report = render_batch(&config, &font, &BatchOptions::default());

    assert_eq!(report.total(), 1);
    assert!(report.all_succeeded());
    let expected = config.output_dir.join("Cyber_Ops_Phish_Bait.png");
    assert_eq!(report.outcomes[0].status, CardStatus::Saved(expected.clone()));

    let rendered = image::open(&expected).unwrap();
    assert_eq!((rendered.width(), rendered.height()), TEMPLATE_SIZE);
}

#[test]
fn description_wraps_from_box_top_left() {
    let (_dir, config) = fixture();
    let font = FontFile::load(&config.font.path).unwrap();
    let renderer = CardRenderer::new(&config, &font);

    let plan = renderer.plan(cardsmith_core::Flavor::Attack, &phish_bait()).unwrap();
    let desc = plan.field(Field::Description).unwrap();
    let desc_box = config.layout.desc_box;

    assert!(desc.lines >= 2);
    assert_eq!((desc.runs[0].x, desc.runs[0].y), (desc_box.x, desc_box.y));
    assert!(desc.runs[1].y > desc_box.y);
    assert!(plan.field(Field::Quote).is_none());
}

#[test]
fn pixel_wrapping_keeps_oversized_word_whole() {
    let (_dir, mut config) = fixture();
    config.wrap = WrapMode::default();
    config.styles.description.align = Align::Justified;
    let font = FontFile::load(&config.font.path).unwrap();

    let plan = CardRenderer::new(&config, &font)
        .plan(cardsmith_core::Flavor::Attack, &phish_bait())
        .unwrap();
    let desc = plan.field(Field::Description).unwrap();
    let desc_box = config.layout.desc_box;

    // A lone word is also the paragraph's last line, so justification falls back to left.
    assert_eq!(desc.lines, 1);
    assert_eq!(desc.runs.len(), 1);
    assert_eq!(desc.runs[0].text, "A".repeat(200));
    assert_eq!((desc.runs[0].x, desc.runs[0].y), (desc_box.x, desc_box.y));
}

#[test]
fn rendering_is_deterministic() {
    let (_dir, mut config) = fixture();
    config.flavors.attack.cards.push(
        Card::new("Cyber Ops", "Phish Bait", "Lure users to a cloned login page and harvest tokens.")
            .with_quote("Trust, but verify.")
            .with_image(ImageSource::Bytes(png_bytes(64, 48, Rgba([0, 200, 0, 255])))),
    );
    let font = load_font(&config.font, None);

    let first = render_batch(&config, &font, &BatchOptions::default());
    let first_bytes = read(first.saved_paths().next().unwrap()).unwrap();
    let second = render_batch(&config, &font, &BatchOptions { sequential: true, ..Default::default() });
    let second_bytes = read(second.saved_paths().next().unwrap()).unwrap();

    assert_eq!(first_bytes, second_bytes);
}

#[test]
fn portrait_fills_image_box() {
    let (_dir, config) = fixture();
    let font = FontFile::load(&config.font.path).unwrap();
    let card = phish_bait().with_image(ImageSource::Bytes(png_bytes(40, 90, Rgba([255, 0, 0, 255]))));

    let canvas = CardRenderer::new(&config, &font)
        .render_canvas(cardsmith_core::Flavor::Attack, &card)
        .unwrap();

    let bx = config.layout.image_box;
    let center = (bx.x + bx.width / 2) as u32;
    let middle = (bx.y + bx.height / 2) as u32;
    assert_eq!(*canvas.get_pixel(center, middle), Rgba([255, 0, 0, 255]));
    assert_eq!(*canvas.get_pixel(bx.x as u32 - 2, middle), Rgba([120, 20, 20, 255]));
}

#[test]
fn unreadable_portrait_leaves_box_untouched() {
    let (dir, config) = fixture();
    let font = FontFile::load(&config.font.path).unwrap();
    let card = phish_bait().with_image(ImageSource::Path(dir.path().join("missing.png")));

    let canvas = CardRenderer::new(&config, &font)
        .render_canvas(cardsmith_core::Flavor::Attack, &card)
        .unwrap();

    let bx = config.layout.image_box;
    let pixel = canvas.get_pixel((bx.x + bx.width / 2) as u32, (bx.y + bx.height / 2) as u32);
    assert_eq!(*pixel, Rgba([120, 20, 20, 255]));
}

#[test]
fn missing_template_fails_only_that_card() {
    let (dir, mut config) = fixture();
    config.flavors.attack.base_image = dir.path().join("nope.png");
    config.flavors.attack.cards.push(Card::new("Red", "Worm", "Self-propagating."));
    config.flavors.defense.cards.push(Card::new("Blue", "Patch", "Close the hole."));

    let font = load_font(&config.font, None);
    let report = render_batch(&config, &font, &BatchOptions::default());

    assert_eq!(report.total(), 2);
    assert_eq!(report.failed(), 1);
    assert_eq!(report.succeeded(), 1);
    match &report.outcomes[0].status {
        CardStatus::Failed { stage, reason } => {
            assert_eq!(*stage, Stage::Pending);
            assert!(reason.contains("nope.png"), "{reason}");
        }
        other => panic!("expected failure, got {other:?}"),
    }
    assert!(config.output_dir.join("Blue_Patch.png").exists());
}

#[test]
fn missing_font_fails_every_card() {
    let (dir, mut config) = fixture();
    config.font.path = dir.path().join("missing.ttf");
    config.flavors.attack.cards.push(Card::new("Red", "Worm", "Self-propagating."));
    config.flavors.defense.cards.push(Card::new("Blue", "Patch", "Close the hole."));

    let font = load_font(&config.font, None);
    let report = render_batch(&config, &font, &BatchOptions::default());

    assert_eq!(report.failed(), 2);
    assert!(report.outcomes.iter().all(|o| matches!(
        &o.status,
        CardStatus::Failed { reason, .. } if reason.contains("missing.ttf")
    )));
}

#[test]
fn explicit_fallback_font_is_used() {
    let (dir, mut config) = fixture();
    let real = config.font.path.clone();
    config.font.path = dir.path().join("missing.ttf");
    config.flavors.attack.cards.push(Card::new("Red", "Worm", "Self-propagating."));

    let font = load_font(&config.font, Some(&real));
    let report = render_batch(&config, &font, &BatchOptions::default());

    assert!(report.all_succeeded());
}

#[test]
fn ready_only_skips_drafts() {
    let (_dir, mut config) = fixture();
    config.flavors.attack.cards.push(Card::new("Red", "Worm", "Draft text."));
    config
        .flavors
        .attack
        .cards
        .push(Card::new("Red", "Botnet", "Ready text.").with_state(CardState::Ready));

    let font = load_font(&config.font, None);
    let options = BatchOptions { ready_only: true, ..Default::default() };
    let report = render_batch(&config, &font, &options);

    assert_eq!(report.skipped(), 1);
    assert_eq!(report.succeeded(), 1);
    assert_eq!(report.outcomes[0].status, CardStatus::Skipped);
    assert!(!config.output_dir.join("Red_Worm.png").exists());
}

#[test]
fn loads_config_relative_to_its_directory() {
    let (dir, _) = fixture();
    let mut config = RenderConfig::starter();
    config.font.path = "font.ttf".into();
    config.flavors.attack.cards.push(Card::new("Cyber Ops", "Phish Bait", "Lure."));
    let config_path = dir.path().join("cartas.json");
    config.save(&config_path).unwrap();

    let loaded = RenderConfig::load(&config_path).unwrap();
    let font = load_font(&loaded.font, None);
    let report = render_batch(&loaded, &font, &BatchOptions::default());

    assert!(report.all_succeeded(), "{:?}", report.outcomes);
    assert!(dir.path().join("output/Cyber_Ops_Phish_Bait.png").exists());
}

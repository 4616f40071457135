//! Open Graph card generation.
//!
//! Composes a 1200x630 share card for a wizard record:
//! - Near-black background with a faint gold gradient and a seeded
//!   starfield speckling
//! - Accent bar and glow at the top edge in the wizard's order color
//! - Portrait on the left, clipped to a rounded rectangle with a drop
//!   shadow and an order-color border
//! - Name, rank, badge pills, trait grid, and a lore excerpt on the right
//! - Footer bar with branding and the canonical host
//!
//! The card is built as an SVG string and rasterized through resvg.
//! Rendering is deterministic for a fixed `(record, portrait, seed)`
//! triple; the route layer memoizes the first render per wizard id.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use order86_core::{WizardRecord, lore};

use crate::error::ServeError;
use crate::render::components::format_rank;

/// OG card dimensions (standard Open Graph).
pub const CARD_WIDTH: u32 = 1200;
pub const CARD_HEIGHT: u32 = 630;

/// Portrait square on the left.
const PORTRAIT_SIZE: u32 = 400;
const PORTRAIT_X: u32 = 60;
const PORTRAIT_Y: u32 = (CARD_HEIGHT - PORTRAIT_SIZE) / 2;

/// Left edge of the text column and its usable width.
const TEXT_X: u32 = 520;
const TEXT_WIDTH: u32 = CARD_WIDTH - TEXT_X - 60;

/// Footer bar.
const FOOTER_HEIGHT: u32 = 50;
const FOOTER_Y: u32 = CARD_HEIGHT - FOOTER_HEIGHT;

/// Number of starfield speckles.
const SPECKLE_COUNT: usize = 140;

/// Lore excerpt length on the card.
const EXCERPT_CHARS: usize = 200;

/// Font family string for SVG text.
const FONT_FAMILY: &str = "Inter, -apple-system, BlinkMacSystemFont, Segoe UI, Roboto, sans-serif";

/// Render a wizard's OG card as PNG bytes.
///
/// `portrait` carries the raw portrait image bytes when the asset could
/// be read; a missing portrait is not an error, the card renders
/// without it. `seed` drives the speckling so output is reproducible.
pub fn render_card(
    record: &WizardRecord,
    portrait: Option<&[u8]>,
    seed: u64,
    site_name: &str,
    host: &str,
) -> Result<Vec<u8>, ServeError> {
    let svg = compose_svg(record, portrait, seed, site_name, host);

    let mut options = resvg::usvg::Options::default();
    options.fontdb_mut().load_system_fonts();
    let tree = resvg::usvg::Tree::from_str(&svg, &options)
        .map_err(|e| ServeError::Render(anyhow::anyhow!("SVG parse error: {e}")))?;

    let mut pixmap = resvg::tiny_skia::Pixmap::new(CARD_WIDTH, CARD_HEIGHT)
        .ok_or_else(|| ServeError::Render(anyhow::anyhow!("failed to allocate pixmap")))?;

    resvg::render(
        &tree,
        resvg::tiny_skia::Transform::default(),
        &mut pixmap.as_mut(),
    );

    pixmap
        .encode_png()
        .map_err(|e| ServeError::Render(anyhow::anyhow!("PNG encode error: {e}")))
}

fn compose_svg(
    record: &WizardRecord,
    portrait: Option<&[u8]>,
    seed: u64,
    site_name: &str,
    host: &str,
) -> String {
    let color = record.order.color();
    let mut svg = String::with_capacity(16 * 1024);

    svg.push_str(&format!(
        r##"<svg xmlns="http://www.w3.org/2000/svg" xmlns:xlink="http://www.w3.org/1999/xlink" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"##,
        w = CARD_WIDTH,
        h = CARD_HEIGHT,
    ));

    svg.push_str(&format!(
        r##"<defs><linearGradient id="bg" x1="0" y1="0" x2="0" y2="1"><stop offset="0" stop-color="#ffd700" stop-opacity="0.03"/><stop offset="1" stop-color="#000000" stop-opacity="0"/></linearGradient><clipPath id="portrait-clip"><rect x="{px}" y="{py}" width="{ps}" height="{ps}" rx="24"/></clipPath><filter id="shadow" x="-20%" y="-20%" width="140%" height="140%"><feDropShadow dx="0" dy="8" stdDeviation="16" flood-color="#000000" flood-opacity="0.6"/></filter><filter id="glow" x="-50%" y="-50%" width="200%" height="200%"><feGaussianBlur stdDeviation="18"/></filter></defs>"##,
        px = PORTRAIT_X,
        py = PORTRAIT_Y,
        ps = PORTRAIT_SIZE,
    ));

    // Background, gradient wash, starfield
    svg.push_str(&format!(
        r##"<rect width="{w}" height="{h}" fill="#0a0a0c"/><rect width="{w}" height="{h}" fill="url(#bg)"/>"##,
        w = CARD_WIDTH,
        h = CARD_HEIGHT,
    ));
    push_speckles(&mut svg, seed);

    // Order-color glow band and crisp accent bar at the top edge
    svg.push_str(&format!(
        r##"<rect x="0" y="-10" width="{w}" height="44" fill="{color}" opacity="0.18" filter="url(#glow)"/><rect x="0" y="0" width="{w}" height="6" fill="{color}"/>"##,
        w = CARD_WIDTH,
    ));

    if let Some(bytes) = portrait {
        push_portrait(&mut svg, bytes, color);
    }

    push_text_column(&mut svg, record, color);
    push_footer(&mut svg, record, site_name, host);

    svg.push_str("</svg>");
    svg
}

/// Sparse low-alpha dots above the footer line.
fn push_speckles(svg: &mut String, seed: u64) {
    let mut rng = SmallRng::seed_from_u64(seed);
    for _ in 0..SPECKLE_COUNT {
        let x: f32 = rng.gen_range(0.0..CARD_WIDTH as f32);
        let y: f32 = rng.gen_range(0.0..FOOTER_Y as f32);
        let r: f32 = rng.gen_range(0.4..1.6);
        let opacity: f32 = rng.gen_range(0.05..0.25);
        svg.push_str(&format!(
            r##"<circle cx="{x:.1}" cy="{y:.1}" r="{r:.2}" fill="#ffffff" fill-opacity="{opacity:.2}"/>"##,
        ));
    }
}

fn push_portrait(svg: &mut String, bytes: &[u8], color: &str) {
    let mime = detect_image_mime(bytes);
    let b64 = BASE64.encode(bytes);

    // Backdrop with shadow, then the clipped image, then the order ring
    svg.push_str(&format!(
        r##"<rect x="{bx}" y="{by}" width="{bs}" height="{bs}" rx="28" fill="#1c1c1e" filter="url(#shadow)"/><image href="data:{mime};base64,{b64}" x="{px}" y="{py}" width="{ps}" height="{ps}" clip-path="url(#portrait-clip)" preserveAspectRatio="xMidYMid slice" image-rendering="pixelated"/><rect x="{px}" y="{py}" width="{ps}" height="{ps}" rx="24" fill="none" stroke="{color}" stroke-width="3"/>"##,
        bx = PORTRAIT_X - 10,
        by = PORTRAIT_Y - 10,
        bs = PORTRAIT_SIZE + 20,
        px = PORTRAIT_X,
        py = PORTRAIT_Y,
        ps = PORTRAIT_SIZE,
    ));
}

fn push_text_column(svg: &mut String, record: &WizardRecord, color: &str) {
    let name = record.display_name();
    let name_size = fit_font_size(&name, TEXT_WIDTH as f32, 48.0, 28.0);
    let max_name_chars = (TEXT_WIDTH as f32 / (name_size * BOLD_WIDTH_FACTOR)) as usize;
    let name = lore::truncate_chars(&name, max_name_chars);

    svg.push_str(&format!(
        r##"<text x="{x}" y="120" font-family="{font}" font-size="{size:.0}" font-weight="700" fill="#F5F5F7">{text}</text>"##,
        x = TEXT_X,
        font = FONT_FAMILY,
        size = name_size,
        text = xml_escape(&name),
    ));

    svg.push_str(&format!(
        r##"<text x="{x}" y="160" font-family="{font}" font-size="24" fill="#8e8e93">#{id} · Rank {rank}</text>"##,
        x = TEXT_X,
        font = FONT_FAMILY,
        id = record.id,
        rank = format_rank(record.rank),
    ));

    // Badge pill row: order badge, then the optional handle pill
    let mut pill_x = TEXT_X as f32;
    pill_x += push_pill(svg, pill_x, 185.0, &record.order.badge(), color, "#ffffff", None);
    if let Some(handle) = record.twitter.as_deref() {
        let label = format!("𝕏 @{}", handle.trim_start_matches('@'));
        push_pill(svg, pill_x + 12.0, 185.0, &label, "#1c1c1e", "#1DA1F2", Some("#333333"));
    }

    push_trait_grid(svg, record);
    push_excerpt(svg, record);
}

/// Width factors for the character-count text measure.
const BOLD_WIDTH_FACTOR: f32 = 0.58;
const REGULAR_WIDTH_FACTOR: f32 = 0.52;

/// Draw a rounded pill with centered text; returns the pill width.
fn push_pill(
    svg: &mut String,
    x: f32,
    y: f32,
    label: &str,
    fill: &str,
    text_color: &str,
    stroke: Option<&str>,
) -> f32 {
    let width = estimate_width(label, 22.0, BOLD_WIDTH_FACTOR) + 32.0;
    let stroke_attr = stroke
        .map(|s| format!(r##" stroke="{s}" stroke-width="1""##))
        .unwrap_or_default();
    svg.push_str(&format!(
        r##"<rect x="{x:.0}" y="{y:.0}" width="{width:.0}" height="40" rx="20" fill="{fill}"{stroke_attr}/><text x="{tx:.0}" y="{ty:.0}" font-family="{font}" font-size="22" font-weight="700" fill="{text_color}" text-anchor="middle" dominant-baseline="central">{text}</text>"##,
        tx = x + width / 2.0,
        ty = y + 20.0,
        font = FONT_FAMILY,
        text = xml_escape(label),
    ));
    width
}

fn push_trait_grid(svg: &mut String, record: &WizardRecord) {
    let mut traits: Vec<(&str, &str)> = vec![
        ("Fur", record.fur.as_str()),
        ("Pattern", record.pattern.as_str()),
        ("Eyes", record.eyes.as_str()),
        ("Clothes", record.clothes.as_str()),
    ];
    if let Some(mouth) = record.mouth.as_deref() {
        traits.push(("Mouth", mouth));
    }
    traits.push(("Realm", record.realm.as_str()));

    let cell_width = (TEXT_WIDTH - 16) / 2;
    for (i, (label, value)) in traits.iter().enumerate() {
        let col = (i % 2) as u32;
        let row = (i / 2) as u32;
        let x = TEXT_X + col * (cell_width + 16);
        let y = 250 + row * 54;
        let value = lore::truncate_chars(value, 24);
        svg.push_str(&format!(
            r##"<rect x="{x}" y="{y}" width="{cell_width}" height="46" rx="12" fill="#1c1c1e"/><text x="{lx}" y="{ly}" font-family="{font}" font-size="11" letter-spacing="0.6" fill="#8e8e93">{label}</text><text x="{lx}" y="{vy}" font-family="{font}" font-size="17" font-weight="600" fill="#F5F5F7">{value}</text>"##,
            lx = x + 16,
            ly = y + 17,
            vy = y + 36,
            font = FONT_FAMILY,
            label = xml_escape(&label.to_uppercase()),
            value = xml_escape(&value),
        ));
    }
}

fn push_excerpt(svg: &mut String, record: &WizardRecord) {
    let Some(story) = record.suggested_story.as_deref() else {
        return;
    };
    let excerpt = lore::card_excerpt(story, EXCERPT_CHARS);
    if excerpt.is_empty() {
        return;
    }

    let mut y = 434;
    for line in wrap_text(&excerpt, 18.0, TEXT_WIDTH as f32) {
        // clip: never run into the footer
        if y > 560 {
            break;
        }
        svg.push_str(&format!(
            r##"<text x="{x}" y="{y}" font-family="{font}" font-size="18" font-style="italic" fill="#6e6e73">{text}</text>"##,
            x = TEXT_X,
            font = FONT_FAMILY,
            text = xml_escape(&line),
        ));
        y += 24;
    }
}

fn push_footer(svg: &mut String, record: &WizardRecord, site_name: &str, host: &str) {
    svg.push_str(&format!(
        r##"<rect x="0" y="{fy}" width="{w}" height="{fh}" fill="#3a3a3c"/><text x="60" y="{ty}" font-family="{font}" font-size="20" font-weight="700" fill="#ffd700">{brand}</text><text x="{rx}" y="{ty}" font-family="{font}" font-size="18" fill="#8e8e93" text-anchor="end">{host}</text>"##,
        fy = FOOTER_Y,
        fh = FOOTER_HEIGHT,
        w = CARD_WIDTH,
        ty = CARD_HEIGHT - 18,
        rx = CARD_WIDTH - 60,
        font = FONT_FAMILY,
        brand = xml_escape(site_name),
        host = xml_escape(host),
    ));
    if record.marketplace.is_some() {
        svg.push_str(&format!(
            r##"<text x="{cx}" y="{ty}" font-family="{font}" font-size="16" fill="#8e8e93" text-anchor="middle">Available on marketplace</text>"##,
            cx = CARD_WIDTH / 2,
            ty = CARD_HEIGHT - 18,
            font = FONT_FAMILY,
        ));
    }
}

/// Estimated rendered width of a string, by character count.
fn estimate_width(text: &str, font_size: f32, factor: f32) -> f32 {
    text.chars().count() as f32 * font_size * factor
}

/// Shrink the font size until the text fits the available width.
fn fit_font_size(text: &str, max_width: f32, base: f32, min: f32) -> f32 {
    let mut size = base;
    while size > min && estimate_width(text, size, BOLD_WIDTH_FACTOR) > max_width {
        size -= 2.0;
    }
    size
}

/// Greedy word wrap using the estimated width. A single overlong word
/// becomes its own line rather than being split.
fn wrap_text(text: &str, font_size: f32, max_width: f32) -> Vec<String> {
    let mut lines = Vec::new();
    let mut line = String::new();
    for word in text.split_whitespace() {
        let candidate = if line.is_empty() {
            word.to_string()
        } else {
            format!("{line} {word}")
        };
        if estimate_width(&candidate, font_size, REGULAR_WIDTH_FACTOR) > max_width
            && !line.is_empty()
        {
            lines.push(line);
            line = word.to_string();
        } else {
            line = candidate;
        }
    }
    if !line.is_empty() {
        lines.push(line);
    }
    lines
}

/// Escape a string for use as SVG/XML text content or attribute value.
fn xml_escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Detect MIME type from image bytes (basic magic byte detection).
fn detect_image_mime(bytes: &[u8]) -> &'static str {
    if bytes.starts_with(b"\x89PNG") {
        "image/png"
    } else if bytes.starts_with(b"\xFF\xD8\xFF") {
        "image/jpeg"
    } else if bytes.starts_with(b"GIF8") {
        "image/gif"
    } else if bytes.starts_with(b"RIFF") && bytes.get(8..12) == Some(b"WEBP") {
        "image/webp"
    } else {
        // portraits are pixel art exported as PNG
        "image/png"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use order86_core::Order;

    fn sample_record() -> WizardRecord {
        WizardRecord {
            id: 7,
            rank: 1234,
            order: Order::Flame,
            suggested_name: Some("Ashbound".to_string()),
            suggested_story: Some("*The Ashbound Saga*\nForged in the Crucible.".to_string()),
            fur: "Copper".to_string(),
            pattern: "Striped".to_string(),
            eyes: "Amber".to_string(),
            clothes: "Cloak".to_string(),
            mouth: None,
            realm: "Crucible".to_string(),
            image: "wizards/7.png".to_string(),
            marketplace: Some("https://market.example/7".to_string()),
            twitter: None,
        }
    }

    #[test]
    fn render_is_deterministic_for_fixed_seed() {
        let record = sample_record();
        let first = render_card(&record, None, 7, "The Order of 86", "theorderof86.com").unwrap();
        let second = render_card(&record, None, 7, "The Order of 86", "theorderof86.com").unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn render_produces_png() {
        let record = sample_record();
        let png = render_card(&record, None, 7, "The Order of 86", "theorderof86.com").unwrap();
        assert!(png.starts_with(b"\x89PNG\r\n\x1a\n"));
    }

    #[test]
    fn different_seeds_move_the_starfield() {
        let record = sample_record();
        let a = render_card(&record, None, 1, "The Order of 86", "theorderof86.com").unwrap();
        let b = render_card(&record, None, 2, "The Order of 86", "theorderof86.com").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn svg_contains_order_color_and_escaped_name() {
        let mut record = sample_record();
        record.suggested_name = Some("Ash & Bound".to_string());
        let svg = compose_svg(&record, None, 7, "The Order of 86", "theorderof86.com");
        assert!(svg.contains("#ff4500"));
        assert!(svg.contains("Ash &amp; Bound"));
        assert!(!svg.contains("Ash & Bound"));
    }

    #[test]
    fn svg_skips_portrait_when_missing() {
        let record = sample_record();
        let svg = compose_svg(&record, None, 7, "The Order of 86", "theorderof86.com");
        assert!(!svg.contains("<image"));
    }

    #[test]
    fn svg_embeds_portrait_as_data_uri() {
        let record = sample_record();
        let bytes = b"\x89PNG\r\n\x1a\nfake";
        let svg = compose_svg(&record, Some(bytes), 7, "The Order of 86", "theorderof86.com");
        assert!(svg.contains("data:image/png;base64,"));
    }

    #[test]
    fn fit_font_size_shrinks_long_names() {
        let short = fit_font_size("Ash", 620.0, 48.0, 28.0);
        let long = fit_font_size(
            "An Exceedingly Long And Ponderous Wizard Name",
            620.0,
            48.0,
            28.0,
        );
        assert_eq!(short, 48.0);
        assert!(long < short);
        assert!(long >= 28.0);
    }

    #[test]
    fn wrap_text_respects_width() {
        let lines = wrap_text("one two three four five six seven", 18.0, 120.0);
        assert!(lines.len() > 1);
        for line in &lines {
            assert!(estimate_width(line, 18.0, REGULAR_WIDTH_FACTOR) <= 120.0 || !line.contains(' '));
        }
    }

    #[test]
    fn xml_escape_covers_specials() {
        assert_eq!(
            xml_escape(r#"<a href="x">&'"#),
            "&lt;a href=&quot;x&quot;&gt;&amp;&apos;"
        );
    }

    #[test]
    fn detect_image_mime_magic_bytes() {
        assert_eq!(detect_image_mime(b"\x89PNG\r\n\x1a\n"), "image/png");
        assert_eq!(detect_image_mime(b"\xFF\xD8\xFFdata"), "image/jpeg");
        assert_eq!(detect_image_mime(b"GIF89a"), "image/gif");
        assert_eq!(detect_image_mime(b"RIFF\x00\x00\x00\x00WEBP"), "image/webp");
        assert_eq!(detect_image_mime(b"mystery"), "image/png");
    }
}

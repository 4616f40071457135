//! Wizard profile page renderer.
//!
//! Produces a self-contained HTML document for one wizard: Open Graph
//! and Twitter Card metadata pointing at the OG card route, the visible
//! profile layout, the lore section, share actions, and a schema.org
//! CreativeWork block.

use maud::{Markup, html};

use order86_core::{WizardRecord, lore};
use order86_core::lore::Segment;

use super::components::{OpenGraphData, format_rank, json_ld, page_shell};
use crate::ogcard::{CARD_HEIGHT, CARD_WIDTH};

/// Meta description length.
const DESCRIPTION_CHARS: usize = 200;

/// Render a wizard's profile page.
pub fn render(record: &WizardRecord, base_url: &str, site_name: &str) -> Markup {
    let name = record.display_name();
    let title = format!("{name} — {site_name}");
    let description = description_for(record);
    let canonical = format!("{base_url}/wizard/{}", record.id);
    let og_image = format!("{base_url}/wizard/{}/og.png", record.id);

    let og = OpenGraphData {
        title: &title,
        description: &description,
        og_type: "profile",
        image: Some((&og_image, CARD_WIDTH, CARD_HEIGHT)),
        twitter_card_type: "summary_large_image",
    };

    let share_text = format!(
        "Meet {name} — {} wizard from {} 🧙‍♂️\n\n",
        record.order.badge(),
        record.realm
    );
    let tweet_url = format!(
        "https://twitter.com/intent/tweet?text={}&url={}",
        urlencoding::encode(&share_text),
        urlencoding::encode(&canonical)
    );

    let structured = serde_json::json!({
        "@context": "https://schema.org",
        "@type": "CreativeWork",
        "name": name,
        "description": description,
        "image": og_image,
        "url": canonical,
        "isPartOf": {
            "@type": "CreativeWorkSeries",
            "name": site_name,
            "url": base_url,
        },
    });

    let body = html! {
        a href="/" class="back" { "← Back to all wizards" }
        div class="container" {
            div class="hero-card" {
                img src=(format!("/{}", record.image)) alt=(name) class="wizard-img";
                div class="info" {
                    div class="name" { (name) }
                    div class="id-rank" { "#" (record.id) " · Rank " (format_rank(record.rank)) }
                    div class="order-badge" { (record.order.badge()) }
                    div class="traits" {
                        (trait_cell("Fur", &record.fur))
                        (trait_cell("Pattern", &record.pattern))
                        (trait_cell("Eyes", &record.eyes))
                        (trait_cell("Clothes", &record.clothes))
                        @if let Some(mouth) = record.mouth.as_deref() {
                            (trait_cell("Mouth", mouth))
                        }
                        (trait_cell("Realm", &record.realm))
                    }
                    @if record.marketplace.is_some() || record.twitter.is_some() {
                        div class="links" {
                            @if let Some(marketplace) = record.marketplace.as_deref() {
                                a href=(marketplace) target="_blank" rel="noopener" class="pill pill-gold" {
                                    "🐕 View on Marketplace"
                                }
                            }
                            @if let Some(handle) = record.twitter.as_deref() {
                                a href=(format!("https://x.com/{}", handle.trim_start_matches('@')))
                                    target="_blank" rel="noopener" class="pill pill-blue" {
                                    "𝕏 @" (handle.trim_start_matches('@'))
                                }
                            }
                        }
                    }
                }
            }

            @if let Some(story) = record.suggested_story.as_deref() {
                div class="story-section" {
                    div class="story-title" { "📜 Lore" }
                    div class="story" { (lore_html(story)) }
                }
            }

            div class="share-section" {
                div class="share-title" { "Share this wizard" }
                div class="share-btns" {
                    a class="share-btn" href=(tweet_url) target="_blank" rel="noopener" {
                        "𝕏 Share on X"
                    }
                    button class="share-btn"
                        onclick=(format!("navigator.clipboard.writeText('{canonical}');this.textContent='✓ Copied!'")) {
                        "📋 Copy Link"
                    }
                }
            }
        }
        (json_ld(&structured))
    };

    page_shell(
        &title,
        &description,
        &canonical,
        og,
        record.order.color(),
        body,
        site_name,
    )
}

/// Meta description: the lore excerpt, or the generated fallback line.
fn description_for(record: &WizardRecord) -> String {
    record
        .suggested_story
        .as_deref()
        .map(|story| lore::excerpt(story, DESCRIPTION_CHARS))
        .filter(|excerpt| !excerpt.is_empty())
        .unwrap_or_else(|| record.fallback_description())
}

fn trait_cell(label: &str, value: &str) -> Markup {
    html! {
        div class="trait" {
            div class="trait-label" { (label) }
            div class="trait-value" { (value) }
        }
    }
}

/// Convert lore markup to HTML: `*text*` becomes `<em>`, newlines
/// become `<br>`. Escape-then-wrap: every text segment passes through
/// maud escaping, only the tokenizer contributes structure.
fn lore_html(story: &str) -> Markup {
    html! {
        @for segment in lore::parse(story) {
            @match segment {
                Segment::Text(text) => { (text) }
                Segment::Emphasis(text) => { em { (text) } }
                Segment::Break => { br; }
            }
        }
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
            suggested_story: Some(
                "*The Ashbound Saga*\nForged in the *eternal* Crucible.".to_string(),
            ),
            fur: "Copper".to_string(),
            pattern: "Striped".to_string(),
            eyes: "Amber".to_string(),
            clothes: "Cloak".to_string(),
            mouth: None,
            realm: "Crucible".to_string(),
            image: "wizards/7.png".to_string(),
            marketplace: None,
            twitter: None,
        }
    }

    fn rendered(record: &WizardRecord) -> String {
        render(record, "https://theorderof86.com", "The Order of 86").into_string()
    }

    #[test]
    fn page_contains_name_and_badge() {
        let html = rendered(&sample_record());
        assert!(html.contains("Ashbound"));
        assert!(html.contains("Flame Order"));
    }

    #[test]
    fn page_contains_canonical_and_og_image() {
        let html = rendered(&sample_record());
        assert!(html.contains(r#"href="https://theorderof86.com/wizard/7""#));
        assert!(html.contains("https://theorderof86.com/wizard/7/og.png"));
        assert!(html.contains(r#"property="og:image:width" content="1200""#));
    }

    #[test]
    fn page_formats_rank_with_separators() {
        let html = rendered(&sample_record());
        assert!(html.contains("Rank 1,234"));
    }

    #[test]
    fn lore_markup_becomes_em_and_br() {
        let html = rendered(&sample_record());
        assert!(html.contains("<em>The Ashbound Saga</em>"));
        assert!(html.contains("<em>eternal</em>"));
        assert!(html.contains("<br>"));
    }

    #[test]
    fn record_text_is_escaped() {
        let mut record = sample_record();
        record.suggested_name = Some("<script>alert(1)</script>".to_string());
        record.fur = "\"quoted\"".to_string();
        let html = rendered(&record);
        assert!(!html.contains("<script>alert(1)</script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn lore_injection_is_escaped_before_wrapping() {
        let mut record = sample_record();
        record.suggested_story = Some("*<b>bold</b>* and <i>plain</i>".to_string());
        let html = rendered(&record);
        assert!(html.contains("<em>&lt;b&gt;bold&lt;/b&gt;</em>"));
        assert!(!html.contains("<i>plain</i>"));
    }

    #[test]
    fn optional_pills_render_when_present() {
        let mut record = sample_record();
        record.marketplace = Some("https://market.example/7".to_string());
        record.twitter = Some("@ashbound".to_string());
        let html = rendered(&record);
        assert!(html.contains("View on Marketplace"));
        assert!(html.contains(r#"https://x.com/ashbound"#));
    }

    #[test]
    fn optional_pills_absent_by_default() {
        let html = rendered(&sample_record());
        assert!(!html.contains("View on Marketplace"));
        assert!(!html.contains("x.com/"));
    }

    #[test]
    fn mouth_trait_is_conditional() {
        let mut record = sample_record();
        assert!(!rendered(&record).contains("Mouth"));
        record.mouth = Some("Grin".to_string());
        assert!(rendered(&record).contains("Grin"));
    }

    #[test]
    fn description_falls_back_without_story() {
        let mut record = sample_record();
        record.suggested_story = None;
        let html = rendered(&record);
        assert!(html.contains("a Copper Striped of the Flame Order from Crucible."));
    }

    #[test]
    fn json_ld_present_and_hardened() {
        let mut record = sample_record();
        record.suggested_name = Some("X</script>".to_string());
        let html = rendered(&record);
        assert!(html.contains(r#""@type":"CreativeWork""#));
        assert!(!html.contains("X</script>"));
    }
}

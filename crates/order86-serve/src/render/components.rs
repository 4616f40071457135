//! Shared pieces for profile pages: the page shell with Open Graph
//! metadata, inline CSS, and small formatting helpers.

use maud::{DOCTYPE, Markup, PreEscaped, html};

/// Inline CSS for profile pages.
///
/// The per-wizard order color is injected separately as the `--order`
/// custom property.
pub const PAGE_CSS: &str = r#"
*{margin:0;padding:0;box-sizing:border-box}
body{background:#0a0a0c;color:#F5F5F7;font-family:-apple-system,BlinkMacSystemFont,'Segoe UI',Roboto,sans-serif;min-height:100vh}
.back{display:inline-flex;align-items:center;gap:6px;color:#ffd700;text-decoration:none;padding:20px 24px;font-size:0.95rem;transition:opacity 0.2s}
.back:hover{opacity:0.7}
.container{max-width:900px;margin:0 auto;padding:0 24px 60px}
.hero-card{display:flex;gap:32px;align-items:flex-start;margin-bottom:40px;flex-wrap:wrap}
.wizard-img{width:280px;height:280px;border-radius:20px;border:3px solid var(--order);object-fit:cover;background:#1c1c1e;image-rendering:pixelated}
.info{flex:1;min-width:260px}
.name{font-size:clamp(1.6rem,4vw,2.4rem);font-weight:800;margin-bottom:4px}
.id-rank{color:#8e8e93;font-size:1rem;margin-bottom:12px}
.order-badge{display:inline-block;padding:6px 16px;border-radius:20px;font-weight:700;font-size:0.9rem;color:#fff;background:var(--order);margin-bottom:20px}
.traits{display:grid;grid-template-columns:repeat(auto-fill,minmax(160px,1fr));gap:10px;margin-bottom:24px}
.trait{background:#1c1c1e;border-radius:12px;padding:12px 16px}
.trait-label{color:#8e8e93;font-size:0.75rem;text-transform:uppercase;letter-spacing:0.05em;margin-bottom:2px}
.trait-value{font-weight:600;font-size:0.95rem}
.links{display:flex;flex-wrap:wrap;gap:10px;margin-bottom:32px}
.pill{display:inline-flex;align-items:center;gap:6px;padding:10px 18px;border-radius:10px;text-decoration:none;font-size:0.9rem;font-weight:600;transition:border-color 0.2s;border:1px solid #333;background:#1c1c1e}
.pill-gold{color:#ffd700}.pill-gold:hover{border-color:#ffd700}
.pill-blue{color:#1DA1F2}.pill-blue:hover{border-color:#1DA1F2}
.story-section{margin-top:20px}
.story-title{font-size:1.2rem;font-weight:700;color:#ffd700;margin-bottom:16px}
.story{color:#c7c7cc;line-height:1.8;font-size:1rem}
.share-section{margin-top:40px;padding-top:24px;border-top:1px solid #2c2c2e}
.share-title{font-size:0.9rem;color:#8e8e93;margin-bottom:12px}
.share-btns{display:flex;gap:10px;flex-wrap:wrap}
.share-btn{padding:10px 20px;border-radius:10px;border:1px solid #333;background:#1c1c1e;color:#F5F5F7;font-size:0.85rem;cursor:pointer;text-decoration:none;display:inline-flex;align-items:center;gap:6px;transition:border-color 0.2s}
.share-btn:hover{border-color:#ffd700}
@media(max-width:600px){
.hero-card{flex-direction:column;align-items:center;text-align:center}
.wizard-img{width:200px;height:200px}
.traits{grid-template-columns:repeat(2,1fr)}
.links,.share-btns{justify-content:center}
}
"#;

/// Open Graph metadata for a page.
pub struct OpenGraphData<'a> {
    /// OG title.
    pub title: &'a str,
    /// OG description.
    pub description: &'a str,
    /// OG type (e.g., "profile", "website").
    pub og_type: &'a str,
    /// OG image URL with its pixel dimensions.
    pub image: Option<(&'a str, u32, u32)>,
    /// Twitter card type ("summary", "summary_large_image").
    pub twitter_card_type: &'a str,
}

/// Render the full HTML page shell with `<head>`, OG tags, and body content.
///
/// `accent_color` becomes the `--order` CSS custom property; it is an
/// enum-derived constant, never record text.
pub fn page_shell(
    title: &str,
    description: &str,
    canonical_url: &str,
    og: OpenGraphData<'_>,
    accent_color: &'static str,
    body_content: Markup,
    site_name: &str,
) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (title) }
                meta name="description" content=(description);
                link rel="canonical" href=(canonical_url);

                // Open Graph
                meta property="og:title" content=(title);
                meta property="og:description" content=(description);
                meta property="og:url" content=(canonical_url);
                meta property="og:site_name" content=(site_name);
                meta property="og:type" content=(og.og_type);
                @if let Some((image, width, height)) = og.image {
                    meta property="og:image" content=(image);
                    meta property="og:image:width" content=(width);
                    meta property="og:image:height" content=(height);
                }

                // Twitter Card
                meta name="twitter:card" content=(og.twitter_card_type);
                meta name="twitter:title" content=(title);
                meta name="twitter:description" content=(description);
                @if let Some((image, _, _)) = og.image {
                    meta name="twitter:image" content=(image);
                }

                style {
                    (PreEscaped(PAGE_CSS))
                    (PreEscaped(format!(":root{{--order:{accent_color}}}")))
                }
            }
            body {
                (body_content)
            }
        }
    }
}

/// Embed a JSON-LD value in a script element.
///
/// `<` is escaped to `\u003c` so record text can never close the
/// script element early.
pub fn json_ld(value: &serde_json::Value) -> Markup {
    let json = value.to_string().replace('<', "\\u003c");
    html! {
        script type="application/ld+json" { (PreEscaped(json)) }
    }
}

/// Format a rank with thousands separators, e.g. 1234 -> "1,234".
pub fn format_rank(rank: u32) -> String {
    let digits = rank.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_rank_small() {
        assert_eq!(format_rank(0), "0");
        assert_eq!(format_rank(86), "86");
        assert_eq!(format_rank(999), "999");
    }

    #[test]
    fn format_rank_thousands() {
        assert_eq!(format_rank(1_000), "1,000");
        assert_eq!(format_rank(1_234), "1,234");
        assert_eq!(format_rank(12_345), "12,345");
        assert_eq!(format_rank(1_234_567), "1,234,567");
    }

    #[test]
    fn json_ld_escapes_angle_bracket() {
        let value = serde_json::json!({"name": "</script><script>alert(1)"});
        let markup = json_ld(&value).into_string();
        assert!(!markup.contains("</script><script>alert"));
        assert!(markup.contains("\\u003c/script"));
    }

    #[test]
    fn page_shell_escapes_title() {
        let og = OpenGraphData {
            title: "x",
            description: "y",
            og_type: "profile",
            image: None,
            twitter_card_type: "summary",
        };
        let markup = page_shell(
            "<script>",
            "desc",
            "https://example.com/1",
            og,
            "#ff4500",
            html! {},
            "The Order of 86",
        );
        let rendered = markup.into_string();
        assert!(rendered.contains("&lt;script&gt;"));
        assert!(!rendered.contains("<script>"));
    }

    #[test]
    fn page_shell_emits_og_image_dimensions() {
        let og = OpenGraphData {
            title: "t",
            description: "d",
            og_type: "profile",
            image: Some(("https://example.com/og.png", 1200, 630)),
            twitter_card_type: "summary_large_image",
        };
        let rendered = page_shell(
            "t",
            "d",
            "https://example.com/1",
            og,
            "#ff4500",
            html! {},
            "The Order of 86",
        )
        .into_string();
        assert!(rendered.contains(r#"property="og:image:width" content="1200""#));
        assert!(rendered.contains(r#"property="og:image:height" content="630""#));
        assert!(rendered.contains(r#"name="twitter:image""#));
    }
}

//! Document building: wrap assembled slides in Slidev frontmatter,
//! separators, and the closing `layout: end` slide.
//!
//! The two-column layout is declared once in the frontmatter `defaults`
//! block, so slides with images need no per-slide directive — only the
//! `full` override and the terminator carry one. An empty deck degrades to
//! frontmatter plus the title heading, with no separators and no terminator.

use crate::config::ConversionConfig;
use crate::output::{SlideLayout, SlideResult};
use crate::pipeline::assemble::ProcessedSlide;

/// Render one processed slide to the content that sits between separators:
/// the body lines, then the right-column marker and image references when
/// images are present.
pub fn render_slide(slide: &ProcessedSlide) -> String {
    let body = slide.body.join("\n");
    if slide.images.is_empty() {
        return body;
    }

    let images = slide
        .images
        .iter()
        .map(|img| img.render())
        .collect::<Vec<_>>()
        .join("\n\n");

    if body.is_empty() {
        format!("::right::\n\n{images}")
    } else {
        format!("{body}\n\n::right::\n\n{images}")
    }
}

/// Assemble the final Slidev document from per-slide results.
///
/// Slides that failed or produced no content are skipped; the terminator is
/// emitted only when at least one slide made it into the document.
pub fn build_document(slides: &[SlideResult], title: &str, config: &ConversionConfig) -> String {
    let mut doc = frontmatter(title, config);
    let mut emitted = 0usize;

    for slide in slides {
        if slide.error.is_some() || slide.markdown.trim().is_empty() {
            continue;
        }

        match slide.layout {
            SlideLayout::Full => doc.push_str("---\nlayout: full\n---\n\n"),
            SlideLayout::Default | SlideLayout::TwoCols => doc.push_str("---\n\n"),
        }
        doc.push_str(&slide.markdown);
        doc.push('\n');
        emitted += 1;
    }

    if emitted > 0 {
        doc.push_str("\n---\nlayout: end\n---\n");
    }

    doc
}

fn frontmatter(title: &str, config: &ConversionConfig) -> String {
    format!(
        "---\n\
         defaults:\n\
         \x20 layout: two-cols\n\
         mdc: true\n\
         fonts:\n\
         \x20 mono: {mono}\n\
         \x20 sans: {sans}\n\
         layout: cover\n\
         ---\n\
         \n\
         # {title}\n",
        mono = config.mono_font,
        sans = config.sans_font,
        title = title,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::ImageReference;

    fn config() -> ConversionConfig {
        ConversionConfig::default()
    }

    fn slide(num: usize, markdown: &str, layout: SlideLayout) -> SlideResult {
        SlideResult {
            slide_num: num,
            markdown: markdown.to_string(),
            layout,
            images: vec![],
            error: None,
        }
    }

    #[test]
    fn frontmatter_names_fonts_and_cover_layout() {
        let doc = build_document(&[], "My Course", &config());
        assert!(doc.starts_with("---\ndefaults:\n  layout: two-cols\nmdc: true\n"));
        assert!(doc.contains("fonts:\n  mono: Cascadia Mono\n  sans: Atkinson Hyperlegible\n"));
        assert!(doc.contains("layout: cover\n---\n\n# My Course\n"));
    }

    #[test]
    fn empty_deck_has_no_separators_and_no_terminator() {
        let doc = build_document(&[], "Empty", &config());
        assert!(!doc.contains("layout: end"));
        // Only the frontmatter delimiters appear.
        assert_eq!(doc.matches("---\n").count(), 2);
    }

    #[test]
    fn terminator_present_iff_a_slide_was_emitted() {
        let slides = vec![slide(1, "# One\n  * point", SlideLayout::Default)];
        let doc = build_document(&slides, "T", &config());
        assert!(doc.ends_with("\n---\nlayout: end\n---\n"));
    }

    #[test]
    fn empty_slides_are_not_emitted() {
        let slides = vec![
            slide(1, "", SlideLayout::Default),
            slide(2, "   \n ", SlideLayout::Default),
        ];
        let doc = build_document(&slides, "T", &config());
        assert!(!doc.contains("layout: end"));
    }

    #[test]
    fn failed_slides_are_skipped() {
        use crate::error::SlideError;
        let mut bad = slide(1, "# Broken", SlideLayout::Default);
        bad.error = Some(SlideError::AssemblyFailed {
            slide: 1,
            detail: "boom".into(),
        });
        let good = slide(2, "# Fine", SlideLayout::Default);

        let doc = build_document(&[bad, good], "T", &config());
        assert!(!doc.contains("# Broken"));
        assert!(doc.contains("# Fine"));
        assert!(doc.contains("layout: end"));
    }

    #[test]
    fn full_layout_carries_a_directive() {
        let slides = vec![slide(1, "long body", SlideLayout::Full)];
        let doc = build_document(&slides, "T", &config());
        assert!(doc.contains("---\nlayout: full\n---\n\nlong body\n"));
    }

    #[test]
    fn two_cols_uses_a_plain_separator() {
        let slides = vec![slide(1, "body\n\n::right::\n\n![](x.png)", SlideLayout::TwoCols)];
        let doc = build_document(&slides, "T", &config());
        assert!(doc.contains("# T\n---\n\nbody\n"));
        assert!(!doc.contains("layout: two-cols\n---")); // only in defaults block
    }

    #[test]
    fn render_slide_appends_right_column_for_images() {
        let processed = ProcessedSlide {
            body: vec!["# Title".into(), "  * point".into()],
            images: vec![
                ImageReference {
                    alt_text: String::new(),
                    path: "./img/D/a.png".into(),
                },
                ImageReference {
                    alt_text: "b".into(),
                    path: "./img/D/b.png".into(),
                },
            ],
            layout: SlideLayout::TwoCols,
        };
        assert_eq!(
            render_slide(&processed),
            "# Title\n  * point\n\n::right::\n\n![](./img/D/a.png)\n\n![b](./img/D/b.png)"
        );
    }

    #[test]
    fn render_slide_without_images_is_just_the_body() {
        let processed = ProcessedSlide {
            body: vec!["  * only point".into()],
            images: vec![],
            layout: SlideLayout::Default,
        };
        assert_eq!(render_slide(&processed), "  * only point");
    }

    #[test]
    fn image_only_slide_renders_right_column_without_leading_blanks() {
        let processed = ProcessedSlide {
            body: vec![],
            images: vec![ImageReference {
                alt_text: String::new(),
                path: "./img/D/only.png".into(),
            }],
            layout: SlideLayout::TwoCols,
        };
        assert_eq!(render_slide(&processed), "::right::\n\n![](./img/D/only.png)");
    }
}

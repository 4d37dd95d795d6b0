//! Pipeline stages for slide-markdown conversion.
//!
//! Each submodule implements exactly one transformation step.
//! Keeping stages separate makes each independently testable and lets us
//! adjust one heuristic (e.g. header detection) without touching other stages.
//!
//! ## Data Flow
//!
//! ```text
//! input ──▶ segment ──▶ classify/normalize/images ──▶ assemble ──▶ document
//! (file)    (blocks)    (per line)                    (per slide)  (Slidev md)
//! ```
//!
//! 1. [`input`]     — read the extractor's markdown file, falling back to
//!    Windows-1252 when the bytes are not valid UTF-8
//! 2. [`segment`]   — split the raw document on the slide delimiter and drop
//!    degenerate blocks
//! 3. [`classify`]  — decide each line's kind (header, bullet, paragraph,
//!    image) via an ordered decision list and produce its rendered form
//! 4. [`normalize`] — repair mojibake and normalize emphasis markup; pure and
//!    idempotent
//! 5. [`images`]    — rewrite image references onto the canonical
//!    `./img/<presentation>/<file>` asset path
//! 6. [`assemble`]  — run classification over a block, separate body from
//!    images, compact duplicates/blanks, choose a layout
//! 7. [`document`]  — wrap assembled slides with frontmatter, separators, and
//!    the closing `layout: end` slide

pub mod assemble;
pub mod classify;
pub mod document;
pub mod images;
pub mod input;
pub mod normalize;
pub mod segment;

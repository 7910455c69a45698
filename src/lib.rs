//! memebot turns a topic into Nepali meme content and renders impact-style captions onto images.
//!
//! The crate has three layers:
//!
//! - A deterministic CPU compositor ([`MemeCompositor`]) that wraps, outlines and anchors
//!   all-caps captions over a background bitmap.
//! - An [`EditorController`] holding one editing session (image, captions, style) that
//!   recomposes on every change and applies templates or generated ideas through an
//!   [`ImageGenerator`].
//! - An [`IdeaOrchestrator`] that validates requests and asks an [`IdeaGenerator`] for three
//!   structured ideas. [`GeminiClient`] implements both generator traits over HTTP.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod assets;
mod config;
mod foundation;

pub(crate) mod editor;
pub(crate) mod ideas;
pub(crate) mod model;
pub(crate) mod remote;
pub(crate) mod render;
pub(crate) mod text;

pub use crate::foundation::core::{Canvas, Point, Rgba8};
pub use crate::foundation::error::{MemeError, MemeResult, REQUEST_FAILED_MESSAGE};

pub use crate::assets::bitmap::Bitmap;
pub use crate::assets::decode::{decode_image, load_image_file};
pub use crate::config::{
    DEFAULT_IDEA_MODEL, DEFAULT_IMAGE_MODEL, DEFAULT_REQUEST_TIMEOUT, ENV_API_KEY,
    ENV_API_KEY_FALLBACK, ENV_FONT, ENV_IDEA_MODEL, ENV_IMAGE_MODEL, ENV_REQUEST_TIMEOUT_SECS,
    MemebotConfig,
};
pub use crate::editor::controller::{ApplyOutcome, EditorController, ImageTicket};
pub use crate::editor::template::{TEMPLATES, Template, find_template};
pub use crate::ideas::orchestrator::IdeaOrchestrator;
pub use crate::ideas::parse::{parse_idea_batch, strip_json_fences};
pub use crate::ideas::prompts::{
    IDEA_COUNT, IDEA_TEMPERATURE, SYSTEM_INSTRUCTION, idea_prompt, idea_visual_description,
    image_prompt, response_schema,
};
pub use crate::model::idea::{
    Audience, Captions, Idea, IdeaBatch, IdeaRequest, IdeaSection, MemeTemplate, Platform,
    ReelsScript, Tone,
};
pub use crate::model::style::{
    CaptionBand, CaptionText, FONT_SCALE_RANGE, OFFSET_PERCENT_RANGE, StyleConfig, StylePatch,
    TextColor,
};
pub use crate::remote::gemini::{GEMINI_API_BASE, GeminiClient};
pub use crate::remote::{IdeaGenerator, ImageGenerator};
pub use crate::render::compositor::{
    Backdrop, FLATTEN_BG, GENERATING_MESSAGE, MemeCompositor, MemeRenderer, PLACEHOLDER_BG,
    PLACEHOLDER_CROSS, PLACEHOLDER_CROSS_WIDTH, PLACEHOLDER_FONT_PX, PLACEHOLDER_MESSAGE,
    PLACEHOLDER_TEXT,
};
pub use crate::render::layout::{
    BandLayout, LINE_HEIGHT_FACTOR, MAX_TEXT_WIDTH_FRACTION, PlacedLine, STROKE_DIVISOR,
    band_font_size, base_font_size, layout_band, layout_captions, max_text_width,
};
pub use crate::render::output::{
    EXPORT_PREFIX, RenderedMeme, export_file_name, timestamped_export_path,
};
pub use crate::text::font::{CAPTION_FAMILIES, FontChoice, FontFace, find_system_caption_font};
pub use crate::text::shaper::{CaptionShaper, ShapedLine, TextMeasure, VerticalMetrics};
pub use crate::text::wrap::wrap_lines;

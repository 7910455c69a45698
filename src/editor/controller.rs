use std::path::{Path, PathBuf};

use rand::seq::SliceRandom;
use rand::{RngCore, SeedableRng};

use crate::assets::bitmap::Bitmap;
use crate::assets::decode::decode_image;
use crate::editor::template::find_template;
use crate::foundation::error::{MemeError, MemeResult};
use crate::ideas::prompts::idea_visual_description;
use crate::model::idea::MemeTemplate;
use crate::model::style::{CaptionBand, CaptionText, StyleConfig, StylePatch};
use crate::remote::ImageGenerator;
use crate::render::compositor::MemeRenderer;
use crate::render::output::{RenderedMeme, timestamped_export_path};

/// Result of applying a generated image.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ApplyOutcome {
    /// Image and captions were applied.
    Applied,
    /// Image generation failed; captions were applied without an image. Carries the user-facing
    /// warning.
    TextOnly(String),
    /// The result no longer belongs to the request in flight (the editor was reset, or the
    /// request was already finished); it was discarded.
    Stale,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ImageSource {
    Template,
    Idea,
}

/// An image request started by the editor.
///
/// Obtained from [`EditorController::begin_template`] or [`EditorController::begin_idea`]; the
/// generated bytes go back through [`EditorController::finish_image`].
#[derive(Debug, PartialEq, Eq)]
#[must_use = "a started image request keeps the editor busy until it is finished"]
pub struct ImageTicket {
    id: u64,
    epoch: u64,
    source: ImageSource,
    description: String,
    captions: CaptionText,
}

impl ImageTicket {
    /// Visual description to hand to the image generator.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Captions applied together with the image.
    pub fn captions(&self) -> &CaptionText {
        &self.captions
    }

    /// Request id, unique within one editor.
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Editor epoch the request was issued in.
    pub fn epoch(&self) -> u64 {
        self.epoch
    }
}

/// Session state of the meme editor.
///
/// Every mutation recomposes the meme before returning, so [`EditorController::rendered`] always
/// reflects the current state (or the last state that rendered successfully).
pub struct EditorController {
    renderer: Box<dyn MemeRenderer>,
    image: Option<Bitmap>,
    captions: CaptionText,
    style: StyleConfig,
    in_flight: Option<u64>,
    next_request: u64,
    epoch: u64,
    rendered: Option<RenderedMeme>,
    rng: Box<dyn RngCore + Send>,
}

impl std::fmt::Debug for EditorController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EditorController")
            .field("has_image", &self.image.is_some())
            .field("captions", &self.captions)
            .field("style", &self.style)
            .field("in_flight", &self.in_flight)
            .field("epoch", &self.epoch)
            .finish_non_exhaustive()
    }
}

impl EditorController {
    /// Fresh session with default captions and style; renders the placeholder.
    pub fn new(renderer: impl MemeRenderer + 'static) -> MemeResult<Self> {
        let mut editor = Self {
            renderer: Box::new(renderer),
            image: None,
            captions: CaptionText::default(),
            style: StyleConfig::default(),
            in_flight: None,
            next_request: 0,
            epoch: 0,
            rendered: None,
            rng: Box::new(rand::rngs::StdRng::from_entropy()),
        };
        editor.recompose()?;
        Ok(editor)
    }

    /// Replace the random source used for template caption picks.
    pub fn with_rng(mut self, rng: impl RngCore + Send + 'static) -> Self {
        self.rng = Box::new(rng);
        self
    }

    /// Background image, if any.
    pub fn image(&self) -> Option<&Bitmap> {
        self.image.as_ref()
    }

    /// Current captions.
    pub fn captions(&self) -> &CaptionText {
        &self.captions
    }

    /// Current style.
    pub fn style(&self) -> StyleConfig {
        self.style
    }

    /// Return `true` while an image request is in flight.
    pub fn is_generating(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Current epoch; bumped by [`EditorController::reset`].
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Last successful render.
    pub fn rendered(&self) -> Option<&RenderedMeme> {
        self.rendered.as_ref()
    }

    /// Replace the background image.
    pub fn set_image(&mut self, bitmap: Bitmap) -> MemeResult<()> {
        self.ensure_idle("replace the image")?;
        self.image = Some(bitmap);
        self.recompose()
    }

    /// Remove the background image.
    pub fn clear_image(&mut self) -> MemeResult<()> {
        self.ensure_idle("clear the image")?;
        self.image = None;
        self.recompose()
    }

    /// Decode an uploaded file and use it as the background.
    pub fn load_image_bytes(&mut self, bytes: &[u8]) -> MemeResult<()> {
        self.ensure_idle("upload an image")?;
        let bitmap = decode_image(bytes)?;
        self.set_image(bitmap)
    }

    /// Replace the text of one caption band.
    pub fn set_caption(&mut self, band: CaptionBand, text: impl Into<String>) -> MemeResult<()> {
        self.captions.set(band, text);
        self.recompose()
    }

    /// Merge a partial style update; out-of-range values are clamped.
    pub fn set_style(&mut self, patch: &StylePatch) -> MemeResult<()> {
        self.style = self.style.merged(patch);
        self.recompose()
    }

    /// Start applying a catalog template: pick one of its caption pairs at random and enter the
    /// generating state.
    pub fn begin_template(&mut self, template_id: &str) -> MemeResult<ImageTicket> {
        self.ensure_idle("apply a template")?;
        let template = find_template(template_id)?;
        let &(top, bottom) = template
            .captions
            .choose(self.rng.as_mut())
            .ok_or_else(|| MemeError::validation(format!("template '{}' has no captions", template.id)))?;
        tracing::debug!(template = template.id, top, bottom, "template captions picked");
        self.start_generating(
            ImageSource::Template,
            template.prompt.to_owned(),
            CaptionText::new(top, bottom),
        )
    }

    /// Start applying a generated idea's still meme.
    pub fn begin_idea(&mut self, meme: &MemeTemplate) -> MemeResult<ImageTicket> {
        self.ensure_idle("apply an idea")?;
        self.start_generating(
            ImageSource::Idea,
            idea_visual_description(meme),
            CaptionText::new(meme.top_text.as_str(), meme.bottom_text.as_str()),
        )
    }

    /// Complete a request started with `begin_template` or `begin_idea`.
    ///
    /// Only the request currently in flight is applied. Results from before the last
    /// [`EditorController::reset`] or for an already finished request are discarded as
    /// [`ApplyOutcome::Stale`]. A failed template request leaves image and captions untouched and
    /// returns a request error; a failed idea request applies the captions without an image.
    #[tracing::instrument(skip_all, fields(id = ticket.id, epoch = ticket.epoch, source = ?ticket.source))]
    pub fn finish_image(
        &mut self,
        ticket: ImageTicket,
        result: MemeResult<Vec<u8>>,
    ) -> MemeResult<ApplyOutcome> {
        if ticket.epoch != self.epoch || self.in_flight != Some(ticket.id) {
            tracing::debug!(
                current_epoch = self.epoch,
                in_flight = ?self.in_flight,
                "discarding stale image result"
            );
            return Ok(ApplyOutcome::Stale);
        }
        self.in_flight = None;

        let decoded = result.and_then(|bytes| {
            decode_image(&bytes)
                .map_err(|e| MemeError::request(format!("generated image unreadable: {e}")))
        });

        match (decoded, ticket.source) {
            (Ok(bitmap), _) => {
                self.image = Some(bitmap);
                self.captions = ticket.captions;
                self.recompose()?;
                Ok(ApplyOutcome::Applied)
            }
            (Err(err), ImageSource::Template) => {
                let err = normalize_request_error(err);
                tracing::warn!(error = %err, "template image generation failed");
                self.recompose()?;
                Err(err)
            }
            (Err(err), ImageSource::Idea) => {
                let err = normalize_request_error(err);
                tracing::warn!(error = %err, "idea image generation failed; keeping text only");
                self.image = None;
                self.captions = ticket.captions;
                self.recompose()?;
                Ok(ApplyOutcome::TextOnly(err.user_message()))
            }
        }
    }

    /// Apply a catalog template end to end through `generator`.
    pub async fn apply_template<G: ImageGenerator + ?Sized>(
        &mut self,
        generator: &G,
        template_id: &str,
    ) -> MemeResult<ApplyOutcome> {
        let ticket = self.begin_template(template_id)?;
        let result = generator.generate_image(ticket.description()).await;
        self.finish_image(ticket, result)
    }

    /// Apply a generated idea's still meme end to end through `generator`.
    pub async fn apply_generated_idea<G: ImageGenerator + ?Sized>(
        &mut self,
        generator: &G,
        meme: &MemeTemplate,
    ) -> MemeResult<ApplyOutcome> {
        let ticket = self.begin_idea(meme)?;
        let result = generator.generate_image(ticket.description()).await;
        self.finish_image(ticket, result)
    }

    /// Back to a fresh session. Requests still in flight become stale.
    pub fn reset(&mut self) -> MemeResult<()> {
        self.image = None;
        self.captions = CaptionText::default();
        self.style = StyleConfig::default();
        self.in_flight = None;
        self.epoch += 1;
        self.recompose()
    }

    /// The meme as it would be saved.
    pub fn export(&self) -> MemeResult<&RenderedMeme> {
        if self.image.is_none() {
            return Err(MemeError::validation(
                "upload or generate an image before exporting",
            ));
        }
        if self.is_generating() {
            return Err(MemeError::validation(
                "wait for the image to finish generating before exporting",
            ));
        }
        self.rendered
            .as_ref()
            .ok_or_else(|| MemeError::render("no successful render to export"))
    }

    /// Save the exported meme as `memebot-nepal-<unix millis>.png` inside `dir`.
    pub fn export_to_dir(&self, dir: &Path) -> MemeResult<PathBuf> {
        let meme = self.export()?;
        let path = timestamped_export_path(dir)?;
        meme.save_png(&path)?;
        tracing::info!(path = %path.display(), "meme exported");
        Ok(path)
    }

    fn ensure_idle(&self, action: &str) -> MemeResult<()> {
        if self.is_generating() {
            return Err(MemeError::validation(format!(
                "cannot {action} while an image is being generated"
            )));
        }
        Ok(())
    }

    fn start_generating(
        &mut self,
        source: ImageSource,
        description: String,
        captions: CaptionText,
    ) -> MemeResult<ImageTicket> {
        let id = self.next_request;
        self.next_request += 1;
        self.in_flight = Some(id);
        let ticket = ImageTicket {
            id,
            epoch: self.epoch,
            source,
            description,
            captions,
        };
        if let Err(err) = self.recompose() {
            self.in_flight = None;
            return Err(err);
        }
        Ok(ticket)
    }

    fn recompose(&mut self) -> MemeResult<()> {
        let result = if self.is_generating() {
            self.renderer
                .render_generating(self.image.as_ref(), &self.captions, &self.style)
        } else {
            self.renderer
                .render(self.image.as_ref(), &self.captions, &self.style)
        };
        match result {
            Ok(meme) => {
                self.rendered = Some(meme);
                Ok(())
            }
            Err(err) => {
                tracing::warn!(error = %err, "recompose failed; keeping previous render");
                Err(err)
            }
        }
    }
}

fn normalize_request_error(err: MemeError) -> MemeError {
    if err.is_request() {
        err
    } else {
        MemeError::request(err.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/editor/controller.rs"]
mod tests;

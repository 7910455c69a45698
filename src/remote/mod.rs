//! Remote AI collaborators.
//!
//! The editor and the idea orchestrator only see the two traits below; [`gemini::GeminiClient`]
//! is the production implementation, tests plug in in-memory fakes.

use async_trait::async_trait;

use crate::foundation::error::MemeResult;
use crate::model::idea::{Idea, IdeaRequest};

pub(crate) mod gemini;

/// Produces structured meme ideas for a request.
#[async_trait]
pub trait IdeaGenerator: Send + Sync {
    /// Generate ideas for `request`. Every failure surfaces as a request error.
    async fn generate_ideas(&self, request: &IdeaRequest) -> MemeResult<Vec<Idea>>;
}

/// Produces a caption-free background image from a visual description.
#[async_trait]
pub trait ImageGenerator: Send + Sync {
    /// Generate an image and return its encoded bytes (PNG, JPEG, ...).
    async fn generate_image(&self, visual_description: &str) -> MemeResult<Vec<u8>>;
}

#[async_trait]
impl<T: IdeaGenerator + ?Sized> IdeaGenerator for &T {
    async fn generate_ideas(&self, request: &IdeaRequest) -> MemeResult<Vec<Idea>> {
        (**self).generate_ideas(request).await
    }
}

#[async_trait]
impl<T: ImageGenerator + ?Sized> ImageGenerator for &T {
    async fn generate_image(&self, visual_description: &str) -> MemeResult<Vec<u8>> {
        (**self).generate_image(visual_description).await
    }
}

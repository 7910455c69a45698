use crate::foundation::error::{MemeError, MemeResult};
use crate::ideas::prompts::IDEA_COUNT;
use crate::model::idea::{Idea, IdeaRequest};
use crate::remote::IdeaGenerator;

/// Validates idea requests and forwards them to an [`IdeaGenerator`].
///
/// `generate_ideas` borrows the orchestrator mutably across the await, so one orchestrator never
/// has two requests in flight.
#[derive(Debug)]
pub struct IdeaOrchestrator<G> {
    generator: G,
}

impl<G: IdeaGenerator> IdeaOrchestrator<G> {
    /// Wrap a generator.
    pub fn new(generator: G) -> Self {
        Self { generator }
    }

    /// The wrapped generator.
    pub fn generator(&self) -> &G {
        &self.generator
    }

    /// Validate `request`, ask for ideas and check that exactly three came back.
    ///
    /// A blank topic fails with a validation error before any remote call is made. There is no
    /// automatic retry.
    #[tracing::instrument(skip_all, fields(tone = %request.tone, platform = %request.platform))]
    pub async fn generate_ideas(&mut self, request: &IdeaRequest) -> MemeResult<Vec<Idea>> {
        request.validate()?;

        let ideas = self.generator.generate_ideas(request).await.map_err(|e| {
            tracing::warn!(error = %e, "idea generation failed");
            e
        })?;
        if ideas.len() != IDEA_COUNT {
            tracing::warn!(count = ideas.len(), "unexpected idea count");
            return Err(MemeError::request(format!(
                "expected {IDEA_COUNT} ideas, got {}",
                ideas.len()
            )));
        }

        tracing::debug!(titles = ?ideas.iter().map(|i| i.title.as_str()).collect::<Vec<_>>(), "ideas ready");
        Ok(ideas)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/ideas/orchestrator.rs"]
mod tests;

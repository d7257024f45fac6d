use crate::domain::model::DeckReport;
use crate::domain::ports::Pipeline;
use crate::utils::error::Result;

/// Outcome of one run: the report and where it was written.
#[derive(Debug)]
pub struct RunSummary {
    pub output_path: String,
    pub report: DeckReport,
}

pub struct DeckEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> DeckEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub async fn run(&self) -> Result<RunSummary> {
        tracing::info!("Starting deck run");

        let request = self.pipeline.extract().await?;
        tracing::info!("Read {} lines of deck text", request.deck_text.lines().count());

        let report = self.pipeline.transform(request).await?;
        match &report {
            DeckReport::Converted(deck) => tracing::info!(
                "Converted {} deck: {} mainboard, {} sideboard cards",
                deck.metadata.source,
                deck.metadata.card_count,
                deck.metadata.sideboard_count
            ),
            DeckReport::Validated(response) => tracing::info!(
                "Validation finished: valid={}, {} errors",
                response.valid,
                response.errors.as_ref().map_or(0, Vec::len)
            ),
        }

        let output_path = self.pipeline.load(&report).await?;
        tracing::info!("Report saved to: {}", output_path);

        Ok(RunSummary {
            output_path,
            report,
        })
    }
}

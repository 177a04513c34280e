use crate::{
    models::{EnrichedRecommendation, RecommendationDraft},
    services::{GoogleBooksClient, PurchaseLinkBuilder},
};
use futures::future::join_all;
use tracing::info;

/// Attaches cover art, purchase and preview links to recommendation drafts.
///
/// Every draft is looked up concurrently. A failed lookup only leaves that
/// item's optional fields empty; the batch always comes back complete and in
/// input order.
#[derive(Debug, Clone)]
pub struct EnrichmentService {
    books: GoogleBooksClient,
    links: PurchaseLinkBuilder,
}

impl EnrichmentService {
    pub fn new(books: GoogleBooksClient, links: PurchaseLinkBuilder) -> Self {
        Self { books, links }
    }

    pub async fn enrich(&self, drafts: Vec<RecommendationDraft>) -> Vec<EnrichedRecommendation> {
        let total = drafts.len();
        let enriched = join_all(drafts.into_iter().map(|draft| self.enrich_one(draft))).await;

        let with_cover = enriched.iter().filter(|r| r.cover_url.is_some()).count();
        info!(
            "Enriched {} recommendations ({} with cover art)",
            total, with_cover
        );

        enriched
    }

    async fn enrich_one(&self, draft: RecommendationDraft) -> EnrichedRecommendation {
        let metadata = self.books.lookup(&draft.title, &draft.author).await;
        let purchase_url =
            self.links
                .build(&draft.title, &draft.author, metadata.identifier.as_deref());

        EnrichedRecommendation::new(draft, metadata, purchase_url)
    }
}

//! Resolution pipeline - detect, rank, then resolve through three tiers.
//!
//! One entry point, three terminal outcomes:
//! DETECTED -> RANKED -> ADVISED | KB_FALLBACK | HEURISTIC_FALLBACK

use crate::advisor::{Advisory, AdvisoryGenerator};
use crate::config::ConfidenceConfig;
use crate::detector;
use crate::kb::KnowledgeBase;
use crate::patterns::PatternCatalog;
use crate::ranker;
use anyhow::Result;
use loghound_common::{AnalysisResult, Issue};
use tracing::info;

/// Terminal state of a resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolutionTier {
    Advised,
    KbFallback,
    HeuristicFallback,
}

/// Owns the pipeline components and resolves one request at a time.
///
/// Stateless across requests apart from the knowledge base's one-time
/// cache fill, so a single instance serves concurrent requests.
pub struct Resolver {
    catalog: PatternCatalog,
    kb: KnowledgeBase,
    advisor: AdvisoryGenerator,
    confidence: ConfidenceConfig,
}

impl Resolver {
    pub fn new(
        catalog: PatternCatalog,
        kb: KnowledgeBase,
        advisor: AdvisoryGenerator,
        confidence: ConfidenceConfig,
    ) -> Self {
        Self {
            catalog,
            kb,
            advisor,
            confidence,
        }
    }

    pub fn catalog(&self) -> &PatternCatalog {
        &self.catalog
    }

    /// Run the full pipeline on one log text.
    ///
    /// The only error path is a knowledge-base load failure; every other
    /// condition resolves to a well-formed result.
    pub async fn resolve(
        &self,
        log_text: &str,
        app_name: Option<&str>,
        environment: Option<&str>,
    ) -> Result<AnalysisResult> {
        let issues = detector::detect_issues(log_text, &self.catalog);
        let ranked = ranker::rank_issues(issues);

        // The detector always yields at least one issue.
        let top = ranked[0].clone();

        let (tier, summary, confidence) =
            self.summarize(&top, &ranked, app_name, environment).await?;

        info!(
            "Resolved category '{}' via {:?} (confidence {:.2})",
            top.category, tier, confidence
        );

        Ok(AnalysisResult {
            summary,
            top_category: top.category,
            confidence: confidence.clamp(0.0, 1.0),
            issues: ranked,
        })
    }

    async fn summarize(
        &self,
        top: &Issue,
        ranked: &[Issue],
        app_name: Option<&str>,
        environment: Option<&str>,
    ) -> Result<(ResolutionTier, String, f64)> {
        if let Some(advisory) = self.advisor.generate(ranked, app_name, environment).await {
            return Ok((
                ResolutionTier::Advised,
                advised_summary(&advisory),
                advisory.confidence,
            ));
        }

        match self.kb.lookup(&top.category)? {
            Some(entry) => Ok((
                ResolutionTier::KbFallback,
                format!(
                    "{}. Suggested fixes: {}",
                    entry.description,
                    entry.fixes.join("; ")
                ),
                self.confidence.kb_fallback,
            )),
            None => Ok((
                ResolutionTier::HeuristicFallback,
                format!(
                    "{} (generated and knowledge-base advice unavailable)",
                    top.reason
                ),
                self.confidence.heuristic_fallback,
            )),
        }
    }
}

fn advised_summary(advisory: &Advisory) -> String {
    format!(
        "Root cause: {}. Fix: {}",
        advisory.root_cause,
        advisory.fix_steps.join("; ")
    )
}

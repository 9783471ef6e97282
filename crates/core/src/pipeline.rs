// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::context::{ContextSummary, ProcessingContext, ProcessingStats};
use crate::error::{ErrorKind, ValidationError};
use crate::lookup::LookupMaps;
use crate::payload::ProgrammePayload;
use crate::populator::{PopulatedPlan, populate_payloads};
use crate::sanitize::SanitizeReport;
use crate::store::PlanStore;
use crate::validator::validate_combination;
use serde::Serialize;
use tracing::info;

/// A generated academic plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AcademicPlan {
    pub programmes: Vec<ProgrammePayload>,
    pub lookup: LookupMaps,
    /// Non-fatal errors, such as incomplete prerequisite resolution.
    pub errors: Vec<ValidationError>,
    pub stats: ProcessingStats,
    pub summary: ContextSummary,
    pub sanitization: SanitizeReport,
}

/// The result of running the engine for one request.
#[derive(Debug, Clone)]
pub enum PlanOutcome {
    /// The combination is valid and every payload was built.
    Generated(Box<AcademicPlan>),
    /// A fatal error was recorded; the context explains why.
    Rejected(ProcessingContext),
}

impl PlanOutcome {
    /// Returns the kind of the first fatal error of a rejected outcome.
    #[must_use]
    pub fn rejection_kind(&self) -> Option<ErrorKind> {
        match self {
            Self::Generated(_) => None,
            Self::Rejected(context) => context
                .errors()
                .iter()
                .map(|err| err.kind)
                .find(ErrorKind::is_fatal),
        }
    }
}

/// Runs validation and, if it passes, payload construction.
///
/// Store and structural failures from either phase are recorded as one
/// `HARD_ERROR` carrying the original message.
///
/// # Arguments
///
/// * `store` - The lookup store
/// * `programme_ids` - The requested programmes
pub fn generate_academic_plan<S>(store: &mut S, programme_ids: &[String]) -> PlanOutcome
where
    S: PlanStore + ?Sized,
{
    let mut context: ProcessingContext = ProcessingContext::new();
    info!(programme_ids = ?programme_ids, "Generating academic plan");

    if let Err(err) = validate_combination(store, programme_ids, &mut context) {
        context.add_error(ValidationError::hard(err.to_string(), programme_ids.to_vec()));
    }
    if context.has_fatal_errors() {
        return PlanOutcome::Rejected(context);
    }

    let populated: PopulatedPlan = match populate_payloads(store, &mut context) {
        Ok(populated) => populated,
        Err(err) => {
            context.add_error(ValidationError::hard(err.to_string(), programme_ids.to_vec()));
            return PlanOutcome::Rejected(context);
        }
    };

    let stats: ProcessingStats = context.stats();
    info!(
        programmes = stats.programmes_processed,
        paths = stats.paths_processed,
        modules = stats.modules_processed,
        elapsed_ms = stats.elapsed_ms,
        "Generated academic plan"
    );

    PlanOutcome::Generated(Box::new(AcademicPlan {
        programmes: populated.programmes,
        lookup: populated.lookup,
        errors: context.non_fatal_errors(),
        stats,
        summary: context.summary(),
        sanitization: populated.sanitization,
    }))
}

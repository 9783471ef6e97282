// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API handler functions.

use acadplan::{AcademicPlan, ErrorKind, PlanOutcome, PlanStore, generate_academic_plan};
use acadplan_domain::{Programme, validate_programme_selection};
use acadplan_persistence::Persistence;
use time::OffsetDateTime;
use tracing::info;

use crate::error::{
    ApiError, translate_domain_error, translate_persistence_error, translate_rejection,
};
use crate::request_response::{
    AcademicPlanRequest, AcademicPlanResponse, ListProgrammesResponse,
};

/// Generates an academic plan for a programme combination.
///
/// Ids are trimmed before validation. The plan is built by the engine
/// against `store`; a rejected plan is classified by its first fatal error.
///
/// # Arguments
///
/// * `store` - The lookup store
/// * `request` - The plan request
///
/// # Errors
///
/// Returns an error if:
/// - The selection is empty, too long, or contains a blank or duplicate id
/// - The programmes cannot be combined
/// - A lookup fails or stored data is malformed
pub fn generate_plan<S>(
    store: &mut S,
    request: &AcademicPlanRequest,
) -> Result<AcademicPlanResponse, ApiError>
where
    S: PlanStore + ?Sized,
{
    let programme_ids: Vec<String> = request
        .programme_ids
        .iter()
        .map(|id| id.trim().to_string())
        .collect();
    validate_programme_selection(&programme_ids).map_err(translate_domain_error)?;

    let outcome: PlanOutcome = generate_academic_plan(store, &programme_ids);
    let rejection: Option<ErrorKind> = outcome.rejection_kind();
    match outcome {
        PlanOutcome::Generated(plan) => {
            let plan: AcademicPlan = *plan;
            info!(
                programmes = plan.programmes.len(),
                warnings = plan.errors.len(),
                elapsed_ms = plan.stats.elapsed_ms,
                "Academic plan ready"
            );
            Ok(AcademicPlanResponse::from_plan(plan, OffsetDateTime::now_utc()))
        }
        PlanOutcome::Rejected(context) => {
            let err: ApiError = translate_rejection(&context);
            info!(
                programme_ids = ?programme_ids,
                kind = ?rejection,
                error = %err,
                "Plan request rejected"
            );
            Err(err)
        }
    }
}

/// Lists every stored programme.
///
/// # Errors
///
/// Returns an error if the programmes cannot be read.
pub fn list_programmes(persistence: &mut Persistence) -> Result<ListProgrammesResponse, ApiError> {
    let programmes: Vec<Programme> = persistence
        .list_programmes()
        .map_err(translate_persistence_error)?;
    Ok(ListProgrammesResponse { programmes })
}

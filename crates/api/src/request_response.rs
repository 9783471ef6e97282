// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API request and response data transfer objects.

use acadplan::{
    AcademicPlan, ContextSummary, LookupMaps, ProcessingStats, ProgrammePayload, SanitizeReport,
    ValidationError,
};
use acadplan_domain::Programme;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// API request to generate an academic plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AcademicPlanRequest {
    /// The programmes to combine, in the order the user chose them.
    pub programme_ids: Vec<String>,
}

/// API response for a generated academic plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AcademicPlanResponse {
    /// Number of programmes in the plan.
    pub programme_count: usize,
    /// When the plan was generated.
    #[serde(with = "time::serde::rfc3339")]
    pub generated_at: OffsetDateTime,
    /// Counters collected while the plan was built.
    pub processing_stats: ProcessingStats,
    /// One payload per programme, in request order.
    pub programmes: Vec<ProgrammePayload>,
    /// Lookup maps shared by every programme of the combination.
    pub lookup: LookupMaps,
    /// Non-fatal problems found while building the plan.
    pub warnings: Vec<ValidationError>,
    pub summary: ContextSummary,
    pub sanitization: SanitizeReport,
}

impl AcademicPlanResponse {
    /// Wraps a generated plan in the response envelope.
    #[must_use]
    pub fn from_plan(plan: AcademicPlan, generated_at: OffsetDateTime) -> Self {
        Self {
            programme_count: plan.programmes.len(),
            generated_at,
            processing_stats: plan.stats,
            programmes: plan.programmes,
            lookup: plan.lookup,
            warnings: plan.errors,
            summary: plan.summary,
            sanitization: plan.sanitization,
        }
    }
}

/// API response listing every stored programme.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListProgrammesResponse {
    pub programmes: Vec<Programme>,
}

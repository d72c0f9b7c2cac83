//! Axum route handlers for the Render API.

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::AppError;
use crate::models::cv::CvData;
use crate::models::loose::{Loose, Text};
use crate::render::{render_variant, variants, RenderError, Variant, VariantInfo};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct RenderRequest {
    #[serde(default)]
    pub cv_template: Loose<CvData>,
    /// Variant id or alias; blank or absent selects the configured default.
    #[serde(default, alias = "template")]
    pub variant: Text,
}

#[derive(Debug, Serialize)]
pub struct RenderResponse {
    pub formatted_latex: String,
    pub variant: Variant,
    /// Raw header values, for naming the uploaded document.
    pub name: Option<String>,
    pub email: Option<String>,
    pub title: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct VariantsResponse {
    pub variants: Vec<VariantInfo>,
    pub default: Variant,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/variants
pub async fn handle_list_variants(State(state): State<AppState>) -> Json<VariantsResponse> {
    Json(VariantsResponse {
        variants: variants(),
        default: state.config.default_variant,
    })
}

/// POST /api/v1/render
///
/// Renders `cv_template` to a complete LaTeX document. The document text is
/// returned as-is; compiling it is the caller's job.
pub async fn handle_render(
    State(state): State<AppState>,
    payload: Result<Json<RenderRequest>, JsonRejection>,
) -> Result<Json<RenderResponse>, AppError> {
    let Json(request) = payload?;

    let cv = request
        .cv_template
        .get()
        .ok_or(RenderError::MissingRootData("cv_template"))?;

    let variant = match request.variant.get() {
        Some(id) => id.parse::<Variant>()?,
        None => state.config.default_variant,
    };

    let formatted_latex = render_variant(cv, variant)?;
    info!(%variant, bytes = formatted_latex.len(), "Rendered CV document");

    let header = cv
        .sections
        .get()
        .and_then(|sections| sections.header.get());
    let contact = header.and_then(|h| h.contact_info.get());

    Ok(Json(RenderResponse {
        formatted_latex,
        variant,
        name: header.and_then(|h| h.name.get()).map(String::from),
        email: contact.and_then(|c| c.email.value.get()).map(String::from),
        title: header.and_then(|h| h.title.get()).map(String::from),
    }))
}

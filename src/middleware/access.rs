// src/middleware/access.rs

//! Access extractors. A handler that takes `OrgAccess<ReadTenantData>` only
//! runs once the caller is known to be allowed to read that organization.

use std::marker::PhantomData;

use axum::{
    extract::{FromRef, FromRequestParts, Path},
    http::request::Parts,
};
use serde::Deserialize;

use crate::{
    common::error::{ApiError, AppError},
    config::AppState,
    middleware::{auth::AuthenticatedUser, i18n::Locale},
    models::{auth::User, organization::Organization},
    services::access_policy::{self, Action, Decision},
};

/// 1. Ties a marker type to a policy action
pub trait ActionDef: Send + Sync + 'static {
    const ACTION: Action;
}

#[derive(Debug, Deserialize)]
struct OrgPath {
    org_id: i64,
}

fn reject(parts: &Parts, app_state: &AppState, error: AppError) -> ApiError {
    error.to_api_error(&Locale::from_headers(&parts.headers), &app_state.i18n_store)
}

fn caller(parts: &Parts, app_state: &AppState) -> Result<User, ApiError> {
    parts
        .extensions
        .get::<AuthenticatedUser>()
        .map(|authenticated| authenticated.0.clone())
        .ok_or_else(|| reject(parts, app_state, AppError::InvalidToken))
}

/// 2. Organization-scoped guard. Carries the caller and the (existing)
/// organization named by `{org_id}`.
pub struct OrgAccess<A> {
    pub user: User,
    pub organization: Organization,
    _action: PhantomData<A>,
}

impl<A> OrgAccess<A> {
    pub fn organization_id(&self) -> i64 {
        self.organization.id
    }
}

impl<A, S> FromRequestParts<S> for OrgAccess<A>
where
    A: ActionDef,
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = AppState::from_ref(state);

        // A. Caller
        let user = caller(parts, &app_state)?;

        // B. Target organization
        let Path(OrgPath { org_id }) = Path::<OrgPath>::from_request_parts(parts, state)
            .await
            .map_err(|_| {
                let locale = Locale::from_headers(&parts.headers);
                ApiError::new(
                    axum::http::StatusCode::BAD_REQUEST,
                    app_state.i18n_store.translate(&locale.0, "request.invalid_path"),
                )
            })?;

        // C. Policy
        if access_policy::authorize(&user, Some(org_id), A::ACTION) == Decision::Deny {
            tracing::warn!(
                "Access denied: user {} ({:?}) on organization {} for {:?}",
                user.id,
                user.role,
                org_id,
                A::ACTION
            );
            return Err(reject(parts, &app_state, AppError::Forbidden));
        }

        // D. Existence (only the platform owner can reach an unknown id)
        let organization = app_state
            .organization_service
            .get_organization(org_id)
            .await
            .map_err(|e| reject(parts, &app_state, e))?;

        Ok(OrgAccess {
            user,
            organization,
            _action: PhantomData,
        })
    }
}

/// 3. Platform-scoped guard.
pub struct PlatformAccess<A> {
    pub user: User,
    _action: PhantomData<A>,
}

impl<A, S> FromRequestParts<S> for PlatformAccess<A>
where
    A: ActionDef,
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = AppState::from_ref(state);
        let user = caller(parts, &app_state)?;

        if access_policy::authorize(&user, None, A::ACTION) == Decision::Deny {
            tracing::warn!("Access denied: user {} ({:?}) for {:?}", user.id, user.role, A::ACTION);
            return Err(reject(parts, &app_state, AppError::Forbidden));
        }

        Ok(PlatformAccess {
            user,
            _action: PhantomData,
        })
    }
}

// ---
// ACTION MARKERS
// ---

pub struct ListOrganizations;
impl ActionDef for ListOrganizations {
    const ACTION: Action = Action::ListOrganizations;
}

pub struct CreateOrganization;
impl ActionDef for CreateOrganization {
    const ACTION: Action = Action::CreateOrganization;
}

pub struct ViewPlatformAnalytics;
impl ActionDef for ViewPlatformAnalytics {
    const ACTION: Action = Action::ViewPlatformAnalytics;
}

pub struct ReadOrganization;
impl ActionDef for ReadOrganization {
    const ACTION: Action = Action::ReadOrganization;
}

pub struct UpdateOrganization;
impl ActionDef for UpdateOrganization {
    const ACTION: Action = Action::UpdateOrganization;
}

pub struct ReadTenantData;
impl ActionDef for ReadTenantData {
    const ACTION: Action = Action::ReadTenantData;
}

pub struct WriteTenantData;
impl ActionDef for WriteTenantData {
    const ACTION: Action = Action::WriteTenantData;
}

//! Seams to the two external services a form may call. Each submission calls
//! exactly one of these once and awaits it.

use super::types::{Provider, RegisterRequest, SignInParams, SignInResponse};
use crate::app_lib::AppError;

/// Identity provider sign-in capability. The provider alone establishes the
/// session; callers only see whether it worked.
#[allow(async_fn_in_trait)]
pub trait SignIn {
    async fn sign_in(
        &self,
        provider: Provider,
        params: SignInParams,
    ) -> Result<SignInResponse, AppError>;
}

/// Account registration endpoint. `Ok` means any 2xx status.
#[allow(async_fn_in_trait)]
pub trait RegistrationEndpoint {
    async fn register(&self, request: &RegisterRequest) -> Result<(), AppError>;
}

//! The seam where the host executes HTTP round-trips.

use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse};

/// Executes an `HttpRequest` and hands back the raw response.
///
/// Implementations must return non-2xx responses as `Ok` data; status
/// interpretation belongs to `TodoClient`. Only failures that produced no
/// response at all should surface as `ApiError::Unreachable`.
pub trait Transport {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        (**self).execute(request)
    }
}

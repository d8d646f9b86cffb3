//! `OpenAPI` document for the served routes.

use utoipa::OpenApi;

use crate::api::handlers::account::types::{
    MessageResponse, SigninRequest, SignupRequest, VerifyRequest,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::api::handlers::health::health,
        crate::api::handlers::account::signup::signup,
        crate::api::handlers::account::verify::verify,
        crate::api::handlers::account::signin::signin,
    ),
    components(schemas(SignupRequest, VerifyRequest, SigninRequest, MessageResponse)),
    tags(
        (name = "account", description = "Signup, email verification and sign-in"),
        (name = "health", description = "Service health")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn openapi_paths_cover_all_transactions() {
        let spec = ApiDoc::openapi();
        for path in ["/signup", "/verify", "/signin", "/health"] {
            assert!(
                spec.paths.paths.contains_key(path),
                "missing path: {path}"
            );
        }
    }

    #[test]
    fn openapi_tags_present() {
        let spec = ApiDoc::openapi();
        let tags = spec.tags.clone().unwrap_or_default();
        assert!(tags.iter().any(|tag| tag.name == "account"));
        assert!(tags.iter().any(|tag| tag.name == "health"));
    }
}

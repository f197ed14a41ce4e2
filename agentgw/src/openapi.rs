//! OpenAPI documentation configuration.
//!
//! The rendered API reference is served at `/docs`.

use utoipa::OpenApi;

use crate::api;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Agent Gateway API",
        description = "Scoped upload authorizations and chat relay to the agent runtime. \
            All error responses share the body `{ok: false, error: <message>, kind: <class>}` \
            where `kind` is one of `validation`, `configuration`, or `upstream`."
    ),
    paths(api::handlers::presign::create_upload_grant, api::handlers::chat::relay_chat),
    components(schemas(
        api::models::presign::PresignRequest,
        api::models::presign::PresignResponse,
        api::models::chat::ChatRequest,
        api::models::chat::ChatResponse,
    )),
    tags(
        (name = "uploads", description = "Time-boxed upload grants"),
        (name = "chat", description = "Agent relay")
    )
)]
pub struct ApiDoc;

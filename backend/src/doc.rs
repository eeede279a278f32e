//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every tutor and health endpoint together with the
//! schema wrappers from [`crate::inbound::http::schemas`], so domain types
//! stay free of utoipa attributes. The document backs Swagger UI in debug
//! builds and is exported by `cargo run --bin openapi-dump`.

use crate::inbound::http::schemas::{
    ErrorCodeSchema, ErrorSchema, NewTutorSchema, TutorChangesSchema, TutorSchema,
};
use crate::inbound::http::tutors::{MessageResponse, TutorResponse, TutorsResponse};
use utoipa::OpenApi;

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Eduista backend API",
        description = "Tutor resource API backed by a hosted database, plus health probes."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::tutors::list_tutors,
        crate::inbound::http::tutors::create_tutor,
        crate::inbound::http::tutors::get_tutor,
        crate::inbound::http::tutors::update_tutor,
        crate::inbound::http::tutors::delete_tutor,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        TutorSchema,
        NewTutorSchema,
        TutorChangesSchema,
        TutorsResponse,
        TutorResponse,
        MessageResponse,
        ErrorSchema,
        ErrorCodeSchema
    )),
    tags(
        (name = "tutors", description = "Tutor profile management"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    //! Tests verifying OpenAPI schema field structure.

    use super::*;
    use utoipa::openapi::RefOr;
    use utoipa::openapi::schema::Schema;

    // utoipa replaces :: with . in schema names
    const ERROR_SCHEMA_NAME: &str = "crate.domain.Error";
    const TUTOR_SCHEMA_NAME: &str = "crate.domain.Tutor";

    fn assert_object_schema_has_field(schema: &RefOr<Schema>, field: &str) {
        match schema {
            RefOr::T(Schema::Object(obj)) => {
                assert!(
                    obj.properties.contains_key(field),
                    "schema should have field '{field}'"
                );
            }
            _ => panic!("expected Object schema"),
        }
    }

    #[test]
    fn openapi_error_schema_uses_wire_field_names() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let error_schema = schemas.get(ERROR_SCHEMA_NAME).expect("Error schema");

        assert_object_schema_has_field(error_schema, "code");
        assert_object_schema_has_field(error_schema, "error");
        assert_object_schema_has_field(error_schema, "traceId");
    }

    #[test]
    fn openapi_tutor_schema_is_camel_case() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let tutor_schema = schemas.get(TUTOR_SCHEMA_NAME).expect("Tutor schema");

        for field in ["id", "hourlyRate", "isApproved", "joinDate", "createdAt"] {
            assert_object_schema_has_field(tutor_schema, field);
        }
    }

    #[test]
    fn openapi_registers_tutor_paths_under_api_prefix() {
        let doc = ApiDoc::openapi();

        assert!(doc.paths.paths.contains_key("/api/tutors"));
        assert!(doc.paths.paths.contains_key("/api/tutors/{id}"));
        assert!(doc.paths.paths.contains_key("/health/ready"));
    }
}

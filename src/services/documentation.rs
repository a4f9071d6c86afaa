use utoipa::OpenApi;

#[derive(OpenApi)]
/// OpenAPI description of the game tips API.
#[openapi(
    info(title = "Game Tips API", description = "Games, experience levels, tips and their reports"),
    paths(
        crate::routes::health::root,
        crate::routes::health::healthcheck,
        crate::routes::experience::get_experience_level,
        crate::routes::games::list_games,
        crate::routes::games::get_game,
        crate::routes::tips::list_tips,
        crate::routes::tips::get_tip,
        crate::routes::tips::like_tip,
        crate::routes::reports::list_reports,
        crate::routes::reports::create_report,
    ),
    components(
        schemas(
            crate::dto::health::RootResponse,
            crate::dto::health::HealthResponse,
            crate::dto::health::HealthStatus,
            crate::dto::experience::ExperienceLevelResponse,
            crate::dto::game::GameResponse,
            crate::dto::tip::TipResponse,
            crate::dto::report::ReportResponse,
            crate::dto::report::CreateReportRequest,
            crate::dao::models::Reason,
        )
    ),
    tags(
        (name = "root", description = "Greeting"),
        (name = "health", description = "Health check endpoints"),
        (name = "experience", description = "Experience level reference data"),
        (name = "games", description = "Game catalogue"),
        (name = "tips", description = "Tips and likes"),
        (name = "reports", description = "Reports filed against tips"),
    )
)]
/// Generated through `ApiDoc::openapi()`.
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_route_is_documented() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&str> = doc.paths.paths.keys().map(String::as_str).collect();
        for expected in [
            "/",
            "/healthcheck",
            "/experience/{id}",
            "/games",
            "/games/{id}",
            "/tips",
            "/tips/{id}",
            "/tips/{id}/like",
            "/reports",
        ] {
            assert!(paths.contains(&expected), "missing {expected}");
        }
    }
}

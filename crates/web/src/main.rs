use anyhow::Context;
use std::time::Duration;
use storage::Database;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

mod clients;
mod config;
mod error;
mod extract;
mod features;
mod middleware;
mod routes;
mod state;

use config::Config;
use features::{admin, leaderboard, members, points, projects, sitemap};
use state::AppState;

const LIMITER_PURGE_INTERVAL: Duration = Duration::from_secs(300);

#[derive(OpenApi)]
#[openapi(
    paths(
        members::handlers::list_members,
        members::handlers::get_member,
        members::handlers::get_dashboard,
        members::handlers::upsert_member,
        projects::handlers::create_project,
        projects::handlers::delete_project,
        projects::handlers::archive_project,
        projects::handlers::top_projects,
        projects::handlers::vote,
        projects::handlers::click,
        points::handlers::award_points,
        points::handlers::member_points,
        admin::handlers::list_members,
        admin::handlers::approve_member,
        admin::handlers::revoke_member,
        admin::handlers::delete_member,
        leaderboard::handlers::get_leaderboard,
        sitemap::handlers::sitemap,
    ),
    components(
        schemas(
            storage::dto::common::Ack,
            storage::dto::common::PageMeta,
            storage::dto::member::UpsertMemberRequest,
            storage::dto::member::UpsertMemberResponse,
            storage::dto::member::MemberResponse,
            storage::dto::member::PublicMemberResponse,
            storage::dto::member::MemberWithProjects,
            storage::dto::member::MemberProfileResponse,
            storage::dto::member::DashboardResponse,
            storage::dto::project::CreateProjectRequest,
            storage::dto::project::CreateProjectResponse,
            storage::dto::project::ProjectResponse,
            storage::dto::project::ProjectOwner,
            storage::dto::project::TopProjectEntry,
            storage::dto::points::AwardPointsRequest,
            storage::dto::admin::AdminMemberList,
            storage::dto::admin::MemberFilter,
            storage::dto::admin::ModerationResponse,
            storage::dto::leaderboard::LeaderboardEntry,
            storage::models::PointTransaction,
            storage::models::PointSource,
            storage::models::PointTier,
            storage::models::ProjectLinkType,
        )
    ),
    tags(
        (name = "members", description = "Member profiles and dashboard"),
        (name = "projects", description = "Project submissions, votes and clicks"),
        (name = "leaderboard", description = "Members ranked by points"),
        (name = "admin", description = "Moderation and point awards"),
        (name = "sitemap", description = "Search engine sitemap"),
    ),
    modifiers(&SecurityAddon)
)]
struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                utoipa::openapi::security::SecurityScheme::Http(
                    utoipa::openapi::security::HttpBuilder::new()
                        .scheme(utoipa::openapi::security::HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            )
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .init();

    tracing::info!("Starting community API");

    let config = Config::from_env().context("Failed to load API configuration")?;
    tracing::info!("Configuration loaded successfully");
    if config.dev_mode {
        tracing::warn!("Development mode: admin checks are disabled");
    }

    tracing::info!(
        "Connecting to database at: {}",
        config
            .database_url
            .split('@')
            .next_back()
            .unwrap_or("unknown")
    );
    let db = Database::new(&config.database_url)
        .await
        .context("Failed to initialize database")?;
    tracing::info!("Database connection established");

    if config.run_migrations {
        tracing::info!("Running database migrations");
        db.run_migrations()
            .await
            .context("Failed to run migrations")?;
        tracing::info!("Database migrations completed successfully");
    }

    let bind_address = config.bind_address();
    let state = AppState::new(db, config).context("Failed to build application state")?;
    if state.turnstile.is_none() {
        tracing::warn!("TURNSTILE_SECRET_KEY not set, captcha verification is skipped");
    }
    tracing::info!("{} admin email(s) configured", state.admins.len());

    let limiter = state.limiter.clone();
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(LIMITER_PURGE_INTERVAL);
        loop {
            ticker.tick().await;
            if limiter.is_empty() {
                continue;
            }
            let purged = limiter.purge_expired();
            if purged > 0 {
                tracing::debug!(
                    "Purged {} expired rate limit buckets, {} still active",
                    purged,
                    limiter.len()
                );
            }
        }
    });

    let app = routes::router(state)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http());

    tracing::info!("Starting server at http://{}", bind_address);
    tracing::info!(
        "Swagger UI available at http://{}/swagger-ui/",
        bind_address
    );

    let listener = tokio::net::TcpListener::bind(&bind_address)
        .await
        .with_context(|| format!("Failed to bind {}", bind_address))?;
    axum::serve(listener, app).await?;

    Ok(())
}

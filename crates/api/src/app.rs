use axum::{
    middleware,
    routing::{delete, get, post, put},
    Router,
};
use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::Config;
use crate::error::ApiError;
use crate::middleware::{
    metrics_handler, metrics_middleware, rate_limit_middleware, require_tenant,
    require_tenant_role, require_user_auth, security_headers_middleware, trace_id,
    RateLimiterState,
};
use crate::routes::{
    ai_tools, auth, components, health, landing, media, navigation, pages, tenants, websites,
    wizard,
};
use crate::services::domain_lookup::build_domain_lookup;
use domain::services::domain_suggestions::DomainAvailability;
use shared::jwt::JwtConfig;

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: Arc<Config>,
    pub jwt: Arc<JwtConfig>,
    pub rate_limiter: Option<Arc<RateLimiterState>>,
    pub domain_lookup: Arc<dyn DomainAvailability>,
}

pub fn create_app(config: Config, pool: PgPool) -> Result<Router, ApiError> {
    let jwt = JwtConfig::with_leeway(
        &config.jwt.private_key,
        &config.jwt.public_key,
        config.jwt.access_token_expiry_secs,
        config.jwt.refresh_token_expiry_secs,
        config.jwt.leeway_secs,
    )
    .map_err(|e| ApiError::Internal(format!("JWT configuration rejected: {}", e)))?;

    let domain_lookup = build_domain_lookup(&config.domain_lookup)
        .map_err(|e| ApiError::Internal(e.to_string()))?;

    let config = Arc::new(config);

    let rate_limiter = if config.security.rate_limit_per_minute > 0 {
        Some(Arc::new(RateLimiterState::new(
            config.security.rate_limit_per_minute,
        )))
    } else {
        None
    };

    let state = AppState {
        pool,
        config: config.clone(),
        jwt: Arc::new(jwt),
        rate_limiter,
        domain_lookup,
    };

    // Build CORS layer based on configuration
    let cors = if config.security.cors_origins.is_empty() {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        use tower_http::cors::AllowOrigin;
        let origins: Vec<_> = config
            .security
            .cors_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods(Any)
            .allow_headers(Any)
    };

    // Public routes on the shared partition: landing, signup wizard, auth.
    // Rate limited since they are unauthenticated.
    let public_routes = Router::new()
        .route("/", get(landing::landing))
        .route("/pricing", get(landing::pricing))
        .route("/signup-wizard/:step", get(wizard::view_step))
        .route("/signup-wizard/:step", post(wizard::submit_step))
        .route("/api/v1/auth/login", post(auth::login))
        .route("/api/v1/auth/refresh", post(auth::refresh))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            rate_limit_middleware,
        ));

    // Post-signup success page needs the fresh login token.
    let signup_success_routes = Router::new()
        .route("/website-creation-success", get(wizard::creation_success))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_user_auth,
        ));

    // Tenant administration: authenticated, addressed by tenant ID rather
    // than by request host.
    let tenant_admin_routes = Router::new()
        .route("/api/v1/tenants/create", post(tenants::create_tenant))
        .route("/api/v1/tenants", get(tenants::list_tenants))
        .route("/api/v1/tenants/:tenant_id", get(tenants::get_tenant))
        .route(
            "/api/v1/tenants/:tenant_id",
            delete(tenants::deactivate_tenant),
        )
        .route(
            "/api/v1/tenants/:tenant_id/usage",
            get(tenants::get_tenant_usage),
        )
        .route(
            "/api/v1/tenants/:tenant_id/members",
            post(tenants::add_member),
        )
        .route(
            "/api/v1/tenants/:tenant_id/members/:user_id",
            delete(tenants::remove_member),
        )
        .route(
            "/api/v1/tenants/:tenant_id/domains",
            get(tenants::list_domains),
        )
        .route(
            "/api/v1/tenants/:tenant_id/domains",
            post(tenants::add_domain),
        )
        .route(
            "/api/v1/tenants/switch/:tenant_id",
            post(tenants::switch_tenant),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_user_auth,
        ));

    // Tenant content routes: host resolves the tenant, JWT identifies the
    // user, the role check gates writes. Layer order is outermost-first
    // at runtime: auth, then tenant resolution, then the role check.
    let tenant_routes = Router::new()
        .route("/api/v1/websites", post(websites::create_website))
        .route("/api/v1/websites", get(websites::list_websites))
        .route("/api/v1/websites/:website_id", get(websites::get_website))
        .route("/api/v1/websites/:website_id", put(websites::update_website))
        .route(
            "/api/v1/websites/:website_id",
            delete(websites::delete_website),
        )
        .route(
            "/api/v1/websites/:website_id/pages",
            post(pages::create_page),
        )
        .route("/api/v1/websites/:website_id/pages", get(pages::list_pages))
        .route(
            "/api/v1/websites/:website_id/pages/:slug",
            get(pages::get_page_by_slug),
        )
        .route("/api/v1/pages/:page_id", get(pages::get_page))
        .route("/api/v1/pages/:page_id", put(pages::update_page))
        .route("/api/v1/pages/:page_id", delete(pages::delete_page))
        .route(
            "/api/v1/websites/:website_id/components",
            post(components::create_component),
        )
        .route(
            "/api/v1/websites/:website_id/components",
            get(components::list_components),
        )
        .route(
            "/api/v1/components/:component_id",
            get(components::get_component),
        )
        .route(
            "/api/v1/components/:component_id",
            put(components::update_component),
        )
        .route(
            "/api/v1/components/:component_id",
            delete(components::delete_component),
        )
        .route(
            "/api/v1/websites/:website_id/navigation",
            post(navigation::create_navigation_item),
        )
        .route(
            "/api/v1/websites/:website_id/navigation",
            get(navigation::list_navigation),
        )
        .route(
            "/api/v1/navigation/:item_id",
            put(navigation::update_navigation_item),
        )
        .route(
            "/api/v1/navigation/:item_id",
            delete(navigation::delete_navigation_item),
        )
        .route("/api/v1/media/folders", post(media::create_folder))
        .route("/api/v1/media/folders", get(media::list_folders))
        .route("/api/v1/media/folders/:folder_id", delete(media::delete_folder))
        .route("/api/v1/media/files", post(media::create_file))
        .route("/api/v1/media/files", get(media::list_files))
        .route("/api/v1/media/files/:file_id", get(media::get_file))
        .route("/api/v1/media/files/:file_id", delete(media::delete_file))
        .route("/api/v1/ai/tools", get(ai_tools::list_tools))
        .route("/api/v1/ai/tools", post(ai_tools::create_tool))
        .route("/api/v1/ai/requests", get(ai_tools::list_requests))
        .route(
            "/api/v1/ai/generate/content",
            post(ai_tools::generate_content),
        )
        .route("/api/v1/ai/generate/image", post(ai_tools::generate_image))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_tenant_role,
        ))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_tenant))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_user_auth,
        ));

    // Operational routes (no authentication required)
    let ops_routes = Router::new()
        .route("/api/health", get(health::health_check))
        .route("/api/health/ready", get(health::ready))
        .route("/api/health/live", get(health::live))
        .route("/metrics", get(metrics_handler));

    Ok(Router::new()
        .merge(ops_routes)
        .merge(public_routes)
        .merge(signup_success_routes)
        .merge(tenant_admin_routes)
        .merge(tenant_routes)
        // Global middleware (order matters: bottom layers run first)
        .layer(middleware::from_fn(security_headers_middleware))
        .layer(CompressionLayer::new())
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_secs,
        )))
        .layer(middleware::from_fn(metrics_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(trace_id))
        .layer(cors)
        .with_state(state))
}

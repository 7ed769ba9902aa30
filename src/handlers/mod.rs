pub mod auth;
pub mod claims;
pub mod creators;
pub mod dashboard;
pub mod portfolio;
pub mod projects;
pub mod roles;
pub mod uploads;

use actix_web::web;

pub fn init_routes(cfg: &mut web::ServiceConfig) {
    // ── Auth routes (sign-up / sign-in are public; the rest need a JWT) ──
    cfg.service(
        web::scope("/auth")
            .route("/sign-up", web::post().to(auth::sign_up))
            .route("/sign-in", web::post().to(auth::sign_in))
            .route("/me", web::get().to(auth::me))
            .route("/profile", web::put().to(auth::update_profile)),
    );

    // ── Role routes ──
    cfg.service(
        web::resource("/roles")
            .route(web::get().to(roles::get_roles))
            .route(web::post().to(roles::enable_role)),
    );

    // ── Dashboard gate ──
    cfg.service(
        web::scope("/dashboard")
            .route("", web::get().to(dashboard::get_gate))
            .route("/select", web::post().to(dashboard::select))
            .route("/{role}", web::get().to(dashboard::get_dashboard)),
    );

    // ── Project routes ──
    cfg.service(
        web::scope("/projects")
            .route("", web::get().to(projects::get_projects))
            .route("", web::post().to(projects::create_project))
            .route("/mine", web::get().to(projects::get_my_projects))
            .route("/{id}", web::get().to(projects::get_project))
            .route("/{id}", web::put().to(projects::update_project))
            .route("/{id}", web::delete().to(projects::delete_project))
            .route("/{id}/claims", web::get().to(claims::get_project_claims))
            .route("/{id}/claims", web::post().to(claims::create_claim)),
    );

    // ── Claim routes ──
    cfg.service(
        web::scope("/claims")
            .route("/mine", web::get().to(claims::get_my_claims))
            .route("/{id}", web::delete().to(claims::withdraw_claim))
            .route("/{id}/status", web::put().to(claims::update_status)),
    );

    // ── Portfolio routes ──
    cfg.service(
        web::scope("/portfolios")
            .route("", web::get().to(portfolio::get_portfolios))
            .route("", web::post().to(portfolio::setup_portfolio))
            .route("/me", web::get().to(portfolio::get_my_portfolio))
            .route("/me", web::put().to(portfolio::update_my_portfolio))
            .route("/{id}", web::get().to(portfolio::get_portfolio)),
    );

    // ── Creator profiles and ratings ──
    cfg.service(
        web::scope("/creators")
            .route("/{id}", web::get().to(creators::get_creator))
            .route("/{id}/ratings", web::get().to(creators::get_ratings))
            .route("/{id}/ratings", web::post().to(creators::rate_creator)),
    );

    // ── Uploads ──
    cfg.service(
        web::scope("/uploads")
            .route("", web::post().to(uploads::upload_file))
            .route("/check", web::post().to(uploads::check_files)),
    );
}

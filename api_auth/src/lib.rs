use actix_web::web;

use middleware::auth::AuthMiddleware;

pub mod dtos {
    pub mod auth;
}
pub mod middleware {
    pub mod auth;
}
pub mod misc {
    pub mod username;
}
pub mod routes {
    pub mod auth;
    pub mod user;
}
pub mod services {
    pub mod auth;
    pub mod user;
}

/// Mounts the identity endpoints under `/auth`. The profile route lives in
/// the same scope; the auth middleware singles it out as bearer-only.
pub fn mount_auth() -> actix_web::Scope {
    web::scope("/auth")
        .service(routes::auth::post_register)
        .service(routes::auth::get_verify_email)
        .service(routes::auth::post_token)
        .service(routes::auth::post_token_refresh)
        .service(routes::auth::post_google_login)
        .service(routes::auth::get_google_login)
        .service(routes::auth::post_reset_password)
        .service(routes::auth::post_reset_password_confirm)
        .service(routes::user::patch_profile)
}

/// Bearer enforcement for the `/api` scope.
pub fn auth_middleware() -> AuthMiddleware {
    AuthMiddleware::new()
}

// roster-service/src/routes/auth_routes.rs
use crate::models::{LoginResponse, ServiceError, UserCredentials};
use crate::utils::record_storage::RecordStore;
use crate::utils::{get_user_id_from_request, jwt, password, user_accounts};
use actix_web::{get, post, web, HttpRequest, HttpResponse};
use log::{debug, error, info};
use serde_json::json;
use std::sync::Arc;

// Register a new user
#[post("/auth/register")]
async fn register(
    credentials: web::Json<UserCredentials>,
    store: web::Data<Arc<dyn RecordStore>>,
) -> Result<HttpResponse, ServiceError> {
    info!("📝 Register request for email: {}", credentials.email);

    // Check if the email already exists
    if user_accounts::find_by_email(store.get_ref().as_ref(), &credentials.email)?.is_some() {
        error!("❌ Email already registered: {}", credentials.email);
        return Err(ServiceError::BadRequest("Email already registered".to_string()));
    }

    // Create the account; the store assigns the user id
    let password_hash = password::hash_password(&credentials.password)?;
    let user = user_accounts::create(store.get_ref().as_ref(), &credentials.email, &password_hash)?;

    info!("✅ User registered successfully: {}", user.id);

    Ok(HttpResponse::Ok().json(json!({
        "message": "User registered successfully",
        "user_id": user.id
    })))
}

// Login and get JWT token
#[post("/auth/login")]
async fn login(
    credentials: web::Json<UserCredentials>,
    store: web::Data<Arc<dyn RecordStore>>,
) -> Result<HttpResponse, ServiceError> {
    info!("🔑 Login request for email: {}", credentials.email);

    // Find the user by email
    let user = match user_accounts::find_by_email(store.get_ref().as_ref(), &credentials.email)? {
        Some(user) => user,
        None => {
            error!("❌ User not found: {}", credentials.email);
            return Err(ServiceError::Unauthorized);
        }
    };

    // Verify password
    if !password::verify_password(&credentials.password, &user.password_hash)? {
        error!("❌ Invalid password for user: {}", credentials.email);
        return Err(ServiceError::Unauthorized);
    }

    // Generate JWT token
    let token = jwt::generate_token(&user)?;

    info!("✅ User logged in successfully: {}", user.id);

    // Return token in headers as well as response body
    let response = LoginResponse {
        token: token.clone(),
        user_id: user.id,
        email: user.email,
    };

    Ok(HttpResponse::Ok()
        .append_header(("Authorization", format!("Bearer {}", token)))
        .json(response))
}

// Logout; JWTs are stateless, so the client discards its token
#[post("/auth/logout")]
async fn logout() -> Result<HttpResponse, ServiceError> {
    info!("👋 Logout request");

    Ok(HttpResponse::Ok().json(json!({
        "message": "Logged out"
    })))
}

// Get current user info (requires authentication)
#[get("/auth/me")]
async fn me(
    req: HttpRequest,
    store: web::Data<Arc<dyn RecordStore>>,
) -> Result<HttpResponse, ServiceError> {
    debug!("👤 Get user info request");

    let user_id = get_user_id_from_request(&req)?;

    match user_accounts::find_by_id(store.get_ref().as_ref(), &user_id)? {
        Some(user) => Ok(HttpResponse::Ok().json(json!({
            "user_id": user.id,
            "email": user.email,
            "created_at": user.created_at
        }))),
        None => {
            error!("❌ Unauthorized access to /auth/me");
            Err(ServiceError::Unauthorized)
        }
    }
}

// Register the public auth routes
pub fn init_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(register)
        .service(login)
        .service(logout);
}

// Routes that sit behind the authentication middleware
pub fn init_protected_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(me);
}

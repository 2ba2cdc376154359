// roster-service/src/utils/mod.rs
use crate::models::{Claims, ServiceError, User};
use actix_web::http::header;
use actix_web::{HttpMessage, HttpRequest};
use bcrypt::{hash, verify, DEFAULT_COST};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use std::env;

pub mod record_storage;

pub use auth_middleware::Authentication;

// JWT utility functions
pub mod jwt {
    use super::*;

    // Get JWT secret from environment or use default
    fn get_jwt_secret() -> String {
        env::var("JWT_SECRET").unwrap_or_else(|_| "roster_service_secret_key".to_string())
    }

    // Generate a new JWT token for a user
    pub fn generate_token(user: &User) -> Result<String, ServiceError> {
        let secret = get_jwt_secret();
        let expiration = Utc::now()
            .checked_add_signed(Duration::days(7))
            .expect("Valid timestamp")
            .timestamp() as usize;

        let claims = Claims {
            sub: user.id.clone(),
            email: user.email.clone(),
            exp: expiration,
            iat: Utc::now().timestamp() as usize,
        };

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(secret.as_ref()),
        )
            .map_err(|_| ServiceError::InternalServerError)
    }

    // Validate and decode a JWT token
    pub fn decode_token(token: &str) -> Result<Claims, ServiceError> {
        let secret = get_jwt_secret();

        decode::<Claims>(
            token,
            &DecodingKey::from_secret(secret.as_ref()),
            &Validation::default(),
        )
            .map(|data| data.claims)
            .map_err(|_| ServiceError::Unauthorized)
    }

    // Extract JWT from Authorization header
    pub fn extract_token_from_header(auth_header: &str) -> Result<String, ServiceError> {
        if !auth_header.starts_with("Bearer ") {
            return Err(ServiceError::Unauthorized);
        }

        Ok(auth_header.trim_start_matches("Bearer ").to_string())
    }
}

// Password utility functions
pub mod password {
    use super::*;

    // Hash a password using bcrypt
    pub fn hash_password(password: &str) -> Result<String, ServiceError> {
        hash(password, DEFAULT_COST)
            .map_err(|_| ServiceError::InternalServerError)
    }

    // Verify a password against a hash
    pub fn verify_password(password: &str, hash: &str) -> Result<bool, ServiceError> {
        verify(password, hash)
            .map_err(|_| ServiceError::InternalServerError)
    }
}

// Auth accounts, kept in the "users" collection of the injected record store
pub mod user_accounts {
    use super::*;
    use crate::utils::record_storage::{RecordStore, USERS_COLLECTION};
    use log::warn;

    // Create a new account; the store assigns the user id
    pub fn create(
        store: &dyn RecordStore,
        email: &str,
        password_hash: &str,
    ) -> Result<User, ServiceError> {
        let mut user = User {
            id: String::new(),
            email: email.to_string(),
            password_hash: password_hash.to_string(),
            created_at: Utc::now(),
        };

        let fields = user.to_document()?;
        user.id = store.create_record(USERS_COLLECTION, &fields)?;

        Ok(user)
    }

    // Find an account by email
    pub fn find_by_email(
        store: &dyn RecordStore,
        email: &str,
    ) -> Result<Option<User>, ServiceError> {
        for (id, fields) in store.list_records(USERS_COLLECTION)? {
            let user = match User::from_document(id.clone(), fields) {
                Ok(user) => user,
                Err(_) => {
                    warn!("⚠️ Skipping malformed user document: {}", id);
                    continue;
                }
            };

            if user.email == email {
                return Ok(Some(user));
            }
        }

        Ok(None)
    }

    // Find an account by id
    pub fn find_by_id(store: &dyn RecordStore, id: &str) -> Result<Option<User>, ServiceError> {
        match store.get_record(USERS_COLLECTION, id)? {
            Some(fields) => Ok(Some(User::from_document(id.to_string(), fields)?)),
            None => Ok(None),
        }
    }
}

// Pull the authenticated user id out of the request extensions
pub fn get_user_id_from_request(req: &HttpRequest) -> Result<String, ServiceError> {
    req.extensions()
        .get::<Claims>()
        .map(|claims| claims.sub.clone())
        .ok_or(ServiceError::Unauthorized)
}

// Middleware for JWT authentication
pub mod auth_middleware {
    use super::*;
    use actix_web::dev::{forward_ready, Service, ServiceRequest, Transform};
    use actix_web::{error::ErrorUnauthorized, Error};
    use futures::future::{ok, Ready};
    use std::future::Future;
    use std::pin::Pin;

    pub struct Authentication;

    impl<S, B> Transform<S, ServiceRequest> for Authentication
    where
        S: Service<ServiceRequest, Response = actix_web::dev::ServiceResponse<B>, Error = Error>,
        S::Future: 'static,
        B: 'static,
    {
        type Response = actix_web::dev::ServiceResponse<B>;
        type Error = Error;
        type Transform = AuthenticationMiddleware<S>;
        type InitError = ();
        type Future = Ready<Result<Self::Transform, Self::InitError>>;

        fn new_transform(&self, service: S) -> Self::Future {
            ok(AuthenticationMiddleware { service })
        }
    }

    pub struct AuthenticationMiddleware<S> {
        service: S,
    }

    impl<S, B> Service<ServiceRequest> for AuthenticationMiddleware<S>
    where
        S: Service<ServiceRequest, Response = actix_web::dev::ServiceResponse<B>, Error = Error>,
        S::Future: 'static,
        B: 'static,
    {
        type Response = actix_web::dev::ServiceResponse<B>;
        type Error = Error;
        type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>>>>;

        forward_ready!(service);

        fn call(&self, req: ServiceRequest) -> Self::Future {
            // Get Authorization header
            let auth_header = req.headers().get(header::AUTHORIZATION);

            if let Some(auth_header) = auth_header {
                if let Ok(auth_str) = auth_header.to_str() {
                    if let Ok(token) = jwt::extract_token_from_header(auth_str) {
                        if let Ok(claims) = jwt::decode_token(&token) {
                            // Add the claims to the request extensions
                            req.extensions_mut().insert(claims);
                            let fut = self.service.call(req);
                            return Box::pin(async move {
                                fut.await
                            });
                        }
                    }
                }
            }

            Box::pin(async move {
                Err(ErrorUnauthorized("Unauthorized"))
            })
        }
    }
}

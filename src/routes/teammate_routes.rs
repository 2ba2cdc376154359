// roster-service/src/routes/teammate_routes.rs
use crate::engine::FilterMode;
use crate::models::{Flag, ServiceError, TeammateForm};
use crate::services::tracker_service::TrackerService;
use actix_web::{get, post, web, HttpResponse};
use log::info;
use serde::Deserialize;

// Query parameters for the roster list view
#[derive(Debug, Deserialize)]
pub struct RosterQuery {
    #[serde(default)]
    pub filter: FilterMode,
    #[serde(default)]
    pub search: String,
}

// List the roster, applying filter -> search -> sort over a fresh fetch
#[get("/teammates")]
async fn list_teammates(
    query: web::Query<RosterQuery>,
    tracker: web::Data<TrackerService>,
) -> Result<HttpResponse, ServiceError> {
    info!("📋 Fetching roster (filter: {:?}, search: {:?})", query.filter, query.search);

    // One-shot fetch on every navigation to the list view
    tracker.refresh_roster()?;

    let page = tracker.roster(query.filter, &query.search)?;

    info!("✅ Roster view holds {} teammates", page.teammates.len());

    Ok(HttpResponse::Ok().json(page))
}

// Add a new teammate from the submitted form state
#[post("/teammates")]
async fn add_teammate(
    form: web::Json<TeammateForm>,
    tracker: web::Data<TrackerService>,
) -> Result<HttpResponse, ServiceError> {
    info!("📝 Adding teammate: {}", form.name);

    let created = tracker.add_teammate(form.into_inner())?;

    Ok(HttpResponse::Ok().json(created))
}

// Fetch one teammate for the detail view
#[get("/teammates/{id}")]
async fn get_teammate(
    path: web::Path<String>,
    tracker: web::Data<TrackerService>,
) -> Result<HttpResponse, ServiceError> {
    let id = path.into_inner();

    info!("🔍 Fetching teammate: {}", id);

    match tracker.open_detail(&id)? {
        Some(teammate) => Ok(HttpResponse::Ok().json(teammate)),
        None => Err(ServiceError::NotFound),
    }
}

// Toggle a progress flag on a teammate
#[post("/teammates/{id}/toggle/{flag}")]
async fn toggle_flag(
    path: web::Path<(String, String)>,
    tracker: web::Data<TrackerService>,
) -> Result<HttpResponse, ServiceError> {
    let (id, flag_name) = path.into_inner();

    let flag = Flag::parse(&flag_name).ok_or_else(|| {
        ServiceError::BadRequest(format!("Unknown progress flag: {}", flag_name))
    })?;

    info!("🔄 Toggling {} on teammate: {}", flag.field_name(), id);

    let updated = tracker.toggle_flag(&id, flag)?;

    Ok(HttpResponse::Ok().json(updated))
}

// Register all teammate routes
pub fn init_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(list_teammates)
        .service(add_teammate)
        .service(get_teammate)
        .service(toggle_flag);
}

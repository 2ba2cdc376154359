// roster-service/src/models/mod.rs
use actix_web::{HttpResponse, ResponseError};
use chrono::{DateTime, Utc};
use log::error;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

// Stage label given to freshly registered teammates
pub const DEFAULT_STAGE: &str = "Incubator";

// Lenient codec for the `updatedAt` document field. Roster documents come
// from a free-form store, so a missing, null or unparseable timestamp becomes
// `None` instead of a parse failure. `None` timestamps sort last.
pub mod lenient_timestamp {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};
    use serde_json::Value;

    pub fn serialize<S>(value: &Option<DateTime<Utc>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(stamp) => serializer.serialize_str(&stamp.to_rfc3339()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<Value>::deserialize(deserializer)?;
        Ok(raw
            .as_ref()
            .and_then(Value::as_str)
            .and_then(|text| DateTime::parse_from_rfc3339(text).ok())
            .map(|stamp| stamp.with_timezone(&Utc)))
    }
}

// A tracked roster entry. Field names follow the store's camelCase document
// format; the id lives outside the document and is assigned by the store.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct Teammate {
    pub id: String,
    pub name: String,
    pub package: String,
    pub accounts: String,
    pub upline: String,
    pub stage: String,
    pub reg_date: String,
    pub validated: bool,
    pub added_to_groups: bool,
    #[serde(rename = "attendedIPO")]
    pub attended_ipo: bool,
    pub product_collected: bool,
    pub website_created: bool,
    pub account_linked: bool,
    pub id_number: String,
    pub username: String,
    pub password: String,
    #[serde(with = "lenient_timestamp")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Default for Teammate {
    fn default() -> Self {
        Teammate {
            id: String::new(),
            name: String::new(),
            package: String::new(),
            accounts: String::new(),
            upline: String::new(),
            stage: DEFAULT_STAGE.to_string(),
            reg_date: String::new(),
            validated: false,
            added_to_groups: false,
            attended_ipo: false,
            product_collected: false,
            website_created: false,
            account_linked: false,
            id_number: String::new(),
            username: String::new(),
            password: String::new(),
            updated_at: None,
        }
    }
}

impl Teammate {
    // The string-typed fields the search step inspects. Enumerated explicitly
    // rather than reflected over, so the search contract stays stable when
    // fields are added. `updatedAt` is not a string field and is excluded.
    pub fn searchable_fields(&self) -> [&str; 10] {
        [
            &self.id,
            &self.name,
            &self.package,
            &self.accounts,
            &self.upline,
            &self.stage,
            &self.reg_date,
            &self.id_number,
            &self.username,
            &self.password,
        ]
    }

    // Document representation for the store (without the id)
    pub fn to_document(&self) -> Result<Value, ServiceError> {
        let mut doc = serde_json::to_value(self).map_err(|e| {
            error!("Failed to serialize teammate: {:?}", e);
            ServiceError::InternalServerError
        })?;
        if let Value::Object(fields) = &mut doc {
            fields.remove("id");
        }
        Ok(doc)
    }

    pub fn from_document(id: String, fields: Value) -> Result<Teammate, ServiceError> {
        let mut teammate: Teammate = serde_json::from_value(fields).map_err(|e| {
            error!("Failed to parse teammate document: {:?}", e);
            ServiceError::InternalServerError
        })?;
        teammate.id = id;
        Ok(teammate)
    }
}

// Add-form state: everything a new teammate carries except the store-assigned
// id and the update stamp
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct TeammateForm {
    pub name: String,
    pub package: String,
    pub accounts: String,
    pub upline: String,
    pub stage: String,
    pub reg_date: String,
    pub validated: bool,
    pub added_to_groups: bool,
    #[serde(rename = "attendedIPO")]
    pub attended_ipo: bool,
    pub product_collected: bool,
    pub website_created: bool,
    pub account_linked: bool,
    pub id_number: String,
    pub username: String,
    pub password: String,
}

impl Default for TeammateForm {
    fn default() -> Self {
        TeammateForm {
            name: String::new(),
            package: String::new(),
            accounts: String::new(),
            upline: String::new(),
            stage: DEFAULT_STAGE.to_string(),
            reg_date: String::new(),
            validated: false,
            added_to_groups: false,
            attended_ipo: false,
            product_collected: false,
            website_created: false,
            account_linked: false,
            id_number: String::new(),
            username: String::new(),
            password: String::new(),
        }
    }
}

impl TeammateForm {
    pub fn into_teammate(self, updated_at: DateTime<Utc>) -> Teammate {
        Teammate {
            id: String::new(),
            name: self.name,
            package: self.package,
            accounts: self.accounts,
            upline: self.upline,
            stage: self.stage,
            reg_date: self.reg_date,
            validated: self.validated,
            added_to_groups: self.added_to_groups,
            attended_ipo: self.attended_ipo,
            product_collected: self.product_collected,
            website_created: self.website_created,
            account_linked: self.account_linked,
            id_number: self.id_number,
            username: self.username,
            password: self.password,
            updated_at: Some(updated_at),
        }
    }
}

// The boolean progress flags a teammate can have toggled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Flag {
    #[serde(rename = "validated")]
    Validated,
    #[serde(rename = "addedToGroups")]
    AddedToGroups,
    #[serde(rename = "attendedIPO")]
    AttendedIpo,
    #[serde(rename = "productCollected")]
    ProductCollected,
    #[serde(rename = "websiteCreated")]
    WebsiteCreated,
    #[serde(rename = "accountLinked")]
    AccountLinked,
}

impl Flag {
    pub const ALL: [Flag; 6] = [
        Flag::Validated,
        Flag::AddedToGroups,
        Flag::AttendedIpo,
        Flag::ProductCollected,
        Flag::WebsiteCreated,
        Flag::AccountLinked,
    ];

    // Wire name as it appears in the store document
    pub fn field_name(&self) -> &'static str {
        match self {
            Flag::Validated => "validated",
            Flag::AddedToGroups => "addedToGroups",
            Flag::AttendedIpo => "attendedIPO",
            Flag::ProductCollected => "productCollected",
            Flag::WebsiteCreated => "websiteCreated",
            Flag::AccountLinked => "accountLinked",
        }
    }

    pub fn parse(name: &str) -> Option<Flag> {
        Flag::ALL.iter().copied().find(|flag| flag.field_name() == name)
    }

    pub fn get(&self, teammate: &Teammate) -> bool {
        match self {
            Flag::Validated => teammate.validated,
            Flag::AddedToGroups => teammate.added_to_groups,
            Flag::AttendedIpo => teammate.attended_ipo,
            Flag::ProductCollected => teammate.product_collected,
            Flag::WebsiteCreated => teammate.website_created,
            Flag::AccountLinked => teammate.account_linked,
        }
    }

    pub fn set(&self, teammate: &mut Teammate, value: bool) {
        match self {
            Flag::Validated => teammate.validated = value,
            Flag::AddedToGroups => teammate.added_to_groups = value,
            Flag::AttendedIpo => teammate.attended_ipo = value,
            Flag::ProductCollected => teammate.product_collected = value,
            Flag::WebsiteCreated => teammate.website_created = value,
            Flag::AccountLinked => teammate.account_linked = value,
        }
    }
}

// User models for authentication
#[derive(Serialize, Deserialize, Debug)]
pub struct UserCredentials {
    pub email: String,
    pub password: String,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct User {
    #[serde(default)]
    pub id: String,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn to_document(&self) -> Result<Value, ServiceError> {
        let mut doc = serde_json::to_value(self).map_err(|e| {
            error!("Failed to serialize user: {:?}", e);
            ServiceError::InternalServerError
        })?;
        if let Value::Object(fields) = &mut doc {
            fields.remove("id");
        }
        Ok(doc)
    }

    pub fn from_document(id: String, fields: Value) -> Result<User, ServiceError> {
        let mut user: User = serde_json::from_value(fields).map_err(|e| {
            error!("Failed to parse user document: {:?}", e);
            ServiceError::InternalServerError
        })?;
        user.id = id;
        Ok(user)
    }
}

#[derive(Serialize, Deserialize, Debug)]
pub struct LoginResponse {
    pub token: String,
    pub user_id: String,
    pub email: String,
}

// JWT claims structure for authentication
#[derive(Serialize, Deserialize, Debug)]
pub struct Claims {
    pub sub: String,  // Subject (user ID)
    pub email: String,
    pub exp: usize,   // Expiration time
    pub iat: usize,   // Issued at
}

// Custom error types
#[derive(Debug)]
pub enum ServiceError {
    InternalServerError,
    BadRequest(String),
    Unauthorized,
    NotFound,
}

// Implement Display for ServiceError
impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ServiceError::InternalServerError => write!(f, "Internal Server Error"),
            ServiceError::BadRequest(msg) => write!(f, "BadRequest: {}", msg),
            ServiceError::Unauthorized => write!(f, "Unauthorized"),
            ServiceError::NotFound => write!(f, "Not Found"),
        }
    }
}

// Implement std::error::Error for ServiceError
impl std::error::Error for ServiceError {}

// Implement ResponseError for ServiceError
impl ResponseError for ServiceError {
    fn error_response(&self) -> HttpResponse {
        match self {
            ServiceError::InternalServerError =>
                HttpResponse::InternalServerError().json("Internal Server Error"),
            ServiceError::BadRequest(ref message) =>
                HttpResponse::BadRequest().json(message),
            ServiceError::Unauthorized =>
                HttpResponse::Unauthorized().json("Unauthorized"),
            ServiceError::NotFound =>
                HttpResponse::NotFound().json("Not Found"),
        }
    }
}

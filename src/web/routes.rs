use axum::{
    Form, Json, async_trait,
    extract::{FromRequest, Multipart, Path, Request, State},
    http::{StatusCode, header::CONTENT_TYPE},
};
use chrono::{Local, SecondsFormat};
use serde::{Deserialize, Serialize};

use crate::{
    contact::{Contact, ContactFields},
    runtime::handle::ContactBookHandle,
    types::ContactId,
};

use super::error::WebError;

/// Body of `GET /api/server-time`.
#[derive(Debug, Serialize, Deserialize)]
pub struct ServerTime {
    /// RFC 3339 local time.
    pub time: String,
}

/// Urlencoded form accepted by add and update.
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ContactForm {
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Email address.
    pub email: String,
}

impl ContactForm {
    fn into_fields(self) -> Result<ContactFields, WebError> {
        if self.first_name.is_empty() || self.last_name.is_empty() || self.email.is_empty() {
            return Err(WebError::MissingFields);
        }
        Ok(ContactFields::new(self.first_name, self.last_name, self.email))
    }
}

/// Contact form read from either a urlencoded or a `multipart/form-data` body.
pub struct ContactFormBody(pub ContactForm);

#[async_trait]
impl<S> FromRequest<S> for ContactFormBody
where
    S: Send + Sync,
{
    type Rejection = WebError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_multipart = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|ct| ct.starts_with("multipart/form-data"));

        if !is_multipart {
            let Form(form) = Form::<ContactForm>::from_request(req, state)
                .await
                .map_err(|rejection| WebError::Form(rejection.body_text()))?;
            return Ok(Self(form));
        }

        let mut multipart = Multipart::from_request(req, state)
            .await
            .map_err(|rejection| WebError::Form(rejection.body_text()))?;
        let mut form = ContactForm::default();
        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| WebError::Form(e.body_text()))?
        {
            let name = field.name().map(str::to_owned);
            let value = field.text().await.map_err(|e| WebError::Form(e.body_text()))?;
            match name.as_deref() {
                Some("firstName") => form.first_name = value,
                Some("lastName") => form.last_name = value,
                Some("email") => form.email = value,
                _ => {}
            }
        }
        Ok(Self(form))
    }
}

fn parse_id(raw: &str) -> Result<ContactId, WebError> {
    let id: i64 = raw.parse()?;
    if id <= 0 {
        return Err(WebError::InvalidId);
    }
    Ok(id as ContactId)
}

pub(crate) async fn server_time() -> Json<ServerTime> {
    Json(ServerTime {
        time: Local::now().to_rfc3339_opts(SecondsFormat::Secs, true),
    })
}

pub(crate) async fn add_contact(
    State(book): State<ContactBookHandle>,
    ContactFormBody(form): ContactFormBody,
) -> Result<StatusCode, WebError> {
    let fields = form.into_fields()?;
    book.add_contact(fields.first_name, fields.last_name, fields.email)
        .await
        .map_err(|e| WebError::book("Error adding contact", e))?;
    Ok(StatusCode::OK)
}

pub(crate) async fn contacts(
    State(book): State<ContactBookHandle>,
) -> Result<Json<Vec<Contact>>, WebError> {
    book.get_contacts()
        .await
        .map(Json)
        .map_err(|e| WebError::book("Error getting contacts", e))
}

pub(crate) async fn contact(
    State(book): State<ContactBookHandle>,
    Path(raw_id): Path<String>,
) -> Result<Json<Contact>, WebError> {
    let id = parse_id(&raw_id)?;
    book.contact_details(id)
        .await
        .map(Json)
        .map_err(|e| WebError::book("Error getting contact", e))
}

pub(crate) async fn update_contact(
    State(book): State<ContactBookHandle>,
    Path(raw_id): Path<String>,
    ContactFormBody(form): ContactFormBody,
) -> Result<StatusCode, WebError> {
    let id = parse_id(&raw_id)?;
    let fields = form.into_fields()?;
    book.update_contact(id, fields.first_name, fields.last_name, fields.email)
        .await
        .map_err(|e| WebError::book("Error updating contact", e))?;
    Ok(StatusCode::OK)
}

pub(crate) async fn delete_contact(
    State(book): State<ContactBookHandle>,
    Path(raw_id): Path<String>,
) -> Result<StatusCode, WebError> {
    let id = parse_id(&raw_id)?;
    book.delete_contact(id)
        .await
        .map_err(|e| WebError::book("Error deleting contact", e))?;
    Ok(StatusCode::OK)
}

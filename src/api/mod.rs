pub mod employee;
pub mod timesheet;

use actix_web::{HttpResponse, http::header};

/// POST-redirect-GET: successful mutations answer 303 pointing at the page
/// the form returns to.
pub(crate) fn see_other(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location))
        .finish()
}

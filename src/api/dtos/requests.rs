use serde::Deserialize;

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
    #[serde(rename = "type")]
    pub user_type: String,
}

#[derive(Deserialize)]
pub struct SignupRequest {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub password: String,
    #[serde(rename = "type")]
    pub user_type: String,
    pub profession: Option<String>,
    pub bio: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityRequest {
    pub start_time: String,
    pub end_time: String,
    pub interval: i32,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookingRequest {
    /// Falls back to the professional selected in the session.
    pub professional_id: Option<i64>,
    pub date: String,
    pub time: String,
    pub notes: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GuestBookingRequest {
    pub name: String,
    pub phone: String,
    pub email: Option<String>,
    pub professional_id: Option<i64>,
    pub date: String,
    pub time: String,
    pub notes: Option<String>,
}

#[derive(Deserialize)]
pub struct SlotsQuery {
    pub date: Option<String>,
}

#[derive(Deserialize)]
pub struct AgendaQuery {
    pub date: Option<String>,
}

#[derive(Deserialize)]
pub struct ReportQuery {
    pub start: Option<String>,
    pub end: Option<String>,
}

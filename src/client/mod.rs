//! Thin HTTP/JSON client over the hospital REST backend.
//! Each call composes the base URL with the bearer token read from the
//! session store at call time. The only retry behavior anywhere is a single
//! refresh-token exchange after an authorization failure; a failed exchange
//! clears the stored session so the next guard pass forces re-login.

use std::sync::Arc;

use reqwest::{Method, Url};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use tracing::{debug, warn};

use crate::api::{
    Ack, ApiEnvelope, Appointment, Doctor, DoctorStats, LoginData, MedicalRecord, Notification,
    Patient, PatientDashboardData, RefreshData, RegisterPatient, UserProfile,
};
use crate::config::ClientConfig;
use crate::error::{AppError, AppResult};
use crate::session::SessionStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerifyAction {
    Approve,
    Reject,
}

impl VerifyAction {
    fn as_str(self) -> &'static str {
        match self {
            VerifyAction::Approve => "approve",
            VerifyAction::Reject => "reject",
        }
    }
}

#[derive(Clone)]
pub struct ApiClient {
    base: Url,
    http: reqwest::Client,
    store: Arc<SessionStore>,
}

impl ApiClient {
    pub fn new(config: &ClientConfig, store: Arc<SessionStore>) -> AppResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()?;
        Ok(Self { base: config.api_base.clone(), http, store })
    }

    fn endpoint(&self, path: &str) -> AppResult<Url> {
        self.base
            .join(path.trim_start_matches('/'))
            .map_err(|e| AppError::config("bad_endpoint".to_string(), format!("{path}: {e}")))
    }

    /// One request/response cycle: send, decode the `{success, ...}` envelope
    /// and classify anything that is not a clean success.
    async fn request_json(
        &self,
        method: Method,
        path: &str,
        bearer: Option<&str>,
        body: Option<&Value>,
    ) -> AppResult<ApiEnvelope<Value>> {
        let url = self.endpoint(path)?;
        let mut req = self.http.request(method, url);
        if let Some(token) = bearer {
            req = req.bearer_auth(token);
        }
        if let Some(body) = body {
            req = req.json(body);
        }
        let resp = req.send().await?;
        let status = resp.status();
        match resp.json::<ApiEnvelope<Value>>().await {
            Ok(env) => {
                if !status.is_success() || !env.success {
                    debug!("backend rejected {path}: http {status}");
                    return Err(AppError::classify_status(status.as_u16(), env.message));
                }
                Ok(env)
            }
            Err(e) if status.is_success() => Err(e.into()),
            Err(_) => Err(AppError::classify_status(status.as_u16(), None)),
        }
    }

    /// Authorized request with the interceptor: on an auth-class failure,
    /// exchange the refresh token once and retry the original call once.
    async fn authorized(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
    ) -> AppResult<ApiEnvelope<Value>> {
        let token = self
            .store
            .access_token()
            .ok_or_else(|| AppError::auth("no_session", "no access token stored"))?;
        match self.request_json(method.clone(), path, Some(&token), body).await {
            Err(err) if err.is_auth() => {
                self.refresh_access().await?;
                let token = self
                    .store
                    .access_token()
                    .ok_or_else(|| AppError::auth("no_session", "session vanished during refresh"))?;
                self.request_json(method, path, Some(&token), body).await
            }
            other => other,
        }
    }

    /// `POST auth/refresh/ {refresh}` for a new access token. Any failure
    /// clears the stored session: the access token is known-bad and the
    /// refresh token just proved useless, so re-login is the only way out.
    async fn refresh_access(&self) -> AppResult<()> {
        let Some(refresh) = self.store.refresh_token() else {
            self.store.clear();
            return Err(AppError::auth("session_expired", "access token rejected and no refresh token stored"));
        };
        let body = json!({ "refresh": refresh });
        match self.request_json(Method::POST, "auth/refresh/", None, Some(&body)).await {
            Ok(v) => {
                let data: RefreshData = data_of(v)?;
                self.store.set_access_token(data.access);
                debug!("access token refreshed");
                Ok(())
            }
            Err(e) => {
                warn!("refresh exchange failed, clearing session: {e}");
                self.store.clear();
                Err(AppError::auth("session_expired".to_string(), e.message().to_string()))
            }
        }
    }

    async fn get_list<T: DeserializeOwned>(&self, path: &str) -> AppResult<Vec<T>> {
        data_of(self.authorized(Method::GET, path, None).await?)
    }

    async fn ack(&self, method: Method, path: &str, body: Option<&Value>) -> AppResult<Ack> {
        ack_of(self.authorized(method, path, body).await?)
    }

    // --- auth endpoints -----------------------------------------------------

    pub async fn login(&self, email: &str, password: &str) -> AppResult<LoginData> {
        let body = json!({ "email": email, "password": password });
        data_of(self.request_json(Method::POST, "auth/login/", None, Some(&body)).await?)
    }

    /// Best-effort token invalidation; the auth context ignores failures.
    pub async fn logout(&self, refresh_token: &str) -> AppResult<Ack> {
        let body = json!({ "refresh": refresh_token });
        self.ack(Method::POST, "auth/logout/", Some(&body)).await
    }

    pub async fn profile(&self) -> AppResult<UserProfile> {
        data_of(self.authorized(Method::GET, "auth/profile/", None).await?)
    }

    /// New accounts stay unverified until an admin approves them.
    pub async fn register_patient(&self, reg: &RegisterPatient) -> AppResult<Ack> {
        let body = serde_json::to_value(reg)
            .map_err(|e| AppError::internal("encode_error".to_string(), e.to_string()))?;
        ack_of(self.request_json(Method::POST, "auth/register/", None, Some(&body)).await?)
    }

    // --- shared resources ---------------------------------------------------

    pub async fn list_patients(&self) -> AppResult<Vec<Patient>> {
        self.get_list("patients/").await
    }

    pub async fn create_patient(&self, body: &Value) -> AppResult<Ack> {
        self.ack(Method::POST, "patients/", Some(body)).await
    }

    pub async fn update_patient(&self, id: i64, body: &Value) -> AppResult<Ack> {
        self.ack(Method::PUT, &format!("patients/{id}/"), Some(body)).await
    }

    pub async fn delete_patient(&self, id: i64) -> AppResult<Ack> {
        self.ack(Method::DELETE, &format!("patients/{id}/"), None).await
    }

    pub async fn list_doctors(&self) -> AppResult<Vec<Doctor>> {
        self.get_list("doctors/").await
    }

    pub async fn create_doctor(&self, body: &Value) -> AppResult<Ack> {
        self.ack(Method::POST, "doctors/", Some(body)).await
    }

    pub async fn list_appointments(&self) -> AppResult<Vec<Appointment>> {
        self.get_list("appointments/").await
    }

    pub async fn create_appointment(&self, body: &Value) -> AppResult<Ack> {
        self.ack(Method::POST, "appointments/", Some(body)).await
    }

    pub async fn update_appointment(&self, id: i64, body: &Value) -> AppResult<Ack> {
        self.ack(Method::PUT, &format!("appointments/{id}/"), Some(body)).await
    }

    pub async fn delete_appointment(&self, id: i64) -> AppResult<Ack> {
        self.ack(Method::DELETE, &format!("appointments/{id}/"), None).await
    }

    pub async fn list_medical_records(&self) -> AppResult<Vec<MedicalRecord>> {
        self.get_list("medical-records/").await
    }

    pub async fn create_medical_record(&self, body: &Value) -> AppResult<Ack> {
        self.ack(Method::POST, "medical-records/", Some(body)).await
    }

    pub async fn update_medical_record(&self, id: i64, body: &Value) -> AppResult<Ack> {
        self.ack(Method::PUT, &format!("medical-records/{id}/"), Some(body)).await
    }

    pub async fn delete_medical_record(&self, id: i64) -> AppResult<Ack> {
        self.ack(Method::DELETE, &format!("medical-records/{id}/"), None).await
    }

    pub async fn list_notifications(&self) -> AppResult<Vec<Notification>> {
        self.get_list("notifications/").await
    }

    pub async fn verify_patient(&self, user_id: i64, action: VerifyAction) -> AppResult<Ack> {
        let body = json!({ "action": action.as_str() });
        self.ack(Method::POST, &format!("verify-patient/{user_id}/"), Some(&body)).await
    }

    // --- role-scoped aggregates ---------------------------------------------

    pub async fn doctor_patients(&self) -> AppResult<Vec<Patient>> {
        self.get_list("doctor/patients/").await
    }

    pub async fn doctor_appointments(&self) -> AppResult<Vec<Appointment>> {
        self.get_list("doctor/appointments/").await
    }

    pub async fn doctor_stats(&self) -> AppResult<DoctorStats> {
        data_of(self.authorized(Method::GET, "doctor/stats/", None).await?)
    }

    pub async fn patient_dashboard(&self) -> AppResult<PatientDashboardData> {
        data_of(self.authorized(Method::GET, "patient/dashboard/", None).await?)
    }
}

/// Pull the typed `data` payload out of a checked envelope.
fn data_of<T: DeserializeOwned>(envelope: ApiEnvelope<Value>) -> AppResult<T> {
    match envelope.data {
        Some(data) => serde_json::from_value(data)
            .map_err(|e| AppError::transport("decode_error".to_string(), e.to_string())),
        None => Err(AppError::internal("missing_data", "response carried no data payload")),
    }
}

fn ack_of(envelope: ApiEnvelope<Value>) -> AppResult<Ack> {
    Ok(Ack { success: envelope.success, message: envelope.message })
}

//! Browser `fetch` client
//!
//! Thin transport: issues the request, collects status + body text, and hands
//! both to the interpreters in `api`. No retries; failures surface to the
//! player once.

use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestCache, RequestInit, Response};

use super::api::{
    SubmitReceipt, SubmitScoreRequest, ValidateCodeRequest, ValidateCodeResponse,
    interpret_listing, interpret_submission, interpret_validation,
};
use super::code::RedemptionCode;
use super::error::{ApiError, ApiResult};
use crate::ranking::{HallOfFame, Leaderboard, MAX_HALL_OF_FAME, MAX_RANKING};

fn network(err: JsValue) -> ApiError {
    ApiError::Network(format!("{err:?}"))
}

/// Client for the code / ranking service
#[derive(Debug, Clone)]
pub struct BackendClient {
    base_url: String,
}

impl BackendClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    /// Talk to the server that served the page
    pub fn same_origin() -> Self {
        let origin = web_sys::window()
            .and_then(|w| w.location().origin().ok())
            .unwrap_or_default();
        Self::new(origin)
    }

    async fn send(&self, method: &str, path: &str, body: Option<String>) -> ApiResult<(u16, String)> {
        let init = RequestInit::new();
        init.set_method(method);
        init.set_cache(RequestCache::NoStore);
        if let Some(body) = &body {
            init.set_body(&JsValue::from_str(body));
        }

        // Cache-busting query for GETs, mirroring the no-store headers
        let url = if body.is_none() {
            format!("{}{}?nocache={}", self.base_url, path, js_sys::Date::now() as u64)
        } else {
            format!("{}{}", self.base_url, path)
        };
        let request = Request::new_with_str_and_init(&url, &init).map_err(network)?;
        let headers = request.headers();
        if body.is_some() {
            headers
                .set("Content-Type", "application/json")
                .map_err(network)?;
        } else {
            headers
                .set("Cache-Control", "no-cache, no-store, must-revalidate")
                .map_err(network)?;
            headers.set("Pragma", "no-cache").map_err(network)?;
        }

        let window = web_sys::window().ok_or_else(|| ApiError::Network("no window".into()))?;
        let response: Response = JsFuture::from(window.fetch_with_request(&request))
            .await
            .map_err(network)?
            .dyn_into()
            .map_err(network)?;
        let text = JsFuture::from(response.text().map_err(network)?)
            .await
            .map_err(network)?
            .as_string()
            .unwrap_or_default();

        log::debug!("{} {} -> {}", method, path, response.status());
        Ok((response.status(), text))
    }

    fn to_json<T: serde::Serialize>(value: &T) -> ApiResult<String> {
        serde_json::to_string(value).map_err(|e| ApiError::Backend {
            status: 0,
            message: format!("could not encode request: {e}"),
        })
    }

    /// Check a code before starting a code-mode session
    pub async fn validate_code(&self, code: &RedemptionCode) -> ApiResult<ValidateCodeResponse> {
        let body = Self::to_json(&ValidateCodeRequest {
            code: code.as_str(),
        })?;
        let (status, text) = self.send("POST", "/api/validate-code", Some(body)).await?;
        interpret_validation(status, &text)
    }

    /// Record a code-mode score (burns the code)
    pub async fn submit_score(&self, request: &SubmitScoreRequest) -> ApiResult<SubmitReceipt> {
        let body = Self::to_json(request)?;
        let (status, text) = self.send("POST", "/save-score", Some(body)).await?;
        interpret_submission(status, &text, request)
    }

    /// This week's top scores
    pub async fn ranking(&self) -> ApiResult<Leaderboard> {
        let (status, text) = self.send("GET", "/ranking", None).await?;
        interpret_listing(status, &text, MAX_RANKING).map(Leaderboard::from_entries)
    }

    /// All-time top scores
    pub async fn hall_of_fame(&self) -> ApiResult<HallOfFame> {
        let (status, text) = self.send("GET", "/halloffame", None).await?;
        interpret_listing(status, &text, MAX_HALL_OF_FAME).map(HallOfFame::from_entries)
    }
}

//! Wire types and response interpretation
//!
//! The HTTP layer only moves bytes; deciding what a status + body means lives
//! here so it can be tested without a browser.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use super::code::RedemptionCode;
use super::error::{ApiError, ApiResult, ValidationError};
use crate::ranking::RankingEntry;

/// `POST /api/validate-code`
#[derive(Debug, Clone, Serialize)]
pub struct ValidateCodeRequest<'a> {
    pub code: &'a str,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ValidateCodeResponse {
    pub valid: bool,
    pub message: String,
}

/// `POST /save-score`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubmitScoreRequest {
    pub name: String,
    pub score: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub phone: String,
    pub code: RedemptionCode,
}

impl SubmitScoreRequest {
    /// Build a submission from the results form
    ///
    /// Name and phone are required; a blank email is dropped.
    pub fn new(
        name: &str,
        score: i64,
        email: &str,
        phone: &str,
        code: RedemptionCode,
    ) -> Result<Self, ValidationError> {
        let name = name.trim();
        let phone = phone.trim();
        let email = email.trim();
        if name.is_empty() {
            return Err(ValidationError::MissingField("nombre"));
        }
        if phone.is_empty() {
            return Err(ValidationError::MissingField("teléfono"));
        }
        Ok(Self {
            name: name.to_string(),
            score,
            email: (!email.is_empty()).then(|| email.to_string()),
            phone: phone.to_string(),
            code,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct SubmitScoreResponse {
    pub success: bool,
    pub message: String,
    pub score: Option<i64>,
    pub name: Option<String>,
}

/// What the player is told after a successful submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitReceipt {
    pub name: String,
    pub score: i64,
    pub message: String,
}

/// Error body shape shared by every endpoint
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct ErrorBody {
    message: Option<String>,
    error: Option<String>,
}

/// Parse a JSON body, treating plain text as `{ "message": <text> }`
fn parse_body<T: DeserializeOwned + Default>(body: &str) -> T {
    let value = serde_json::from_str::<serde_json::Value>(body)
        .unwrap_or_else(|_| serde_json::json!({ "message": body }));
    serde_json::from_value(value).unwrap_or_default()
}

fn error_message(body: &str, fallback: &str) -> String {
    let parsed: ErrorBody = parse_body(body);
    parsed
        .message
        .or(parsed.error)
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| fallback.to_string())
}

fn is_success(status: u16) -> bool {
    (200..300).contains(&status)
}

/// Decide whether a code validation succeeded
pub fn interpret_validation(status: u16, body: &str) -> ApiResult<ValidateCodeResponse> {
    match status {
        403 => Err(ValidationError::AlreadyUsed.into()),
        404 => Err(ValidationError::Unknown.into()),
        400 => Err(ValidationError::Malformed.into()),
        s if is_success(s) => {
            let response: ValidateCodeResponse = parse_body(body);
            if response.valid {
                Ok(response)
            } else {
                Err(ValidationError::Rejected(error_message(
                    body,
                    "No se pudo validar el código.",
                ))
                .into())
            }
        }
        s if s >= 500 => Err(ApiError::Backend {
            status: s,
            message: error_message(body, "Error interno del servidor."),
        }),
        _ => Err(ValidationError::Rejected(error_message(
            body,
            "No se pudo validar el código.",
        ))
        .into()),
    }
}

/// Decide whether a score submission was recorded
pub fn interpret_submission(
    status: u16,
    body: &str,
    request: &SubmitScoreRequest,
) -> ApiResult<SubmitReceipt> {
    match status {
        403 => Err(ValidationError::AlreadyUsed.into()),
        404 => Err(ValidationError::Unknown.into()),
        400 => Err(ValidationError::Rejected(error_message(
            body,
            "Datos de puntuación no válidos o incompletos.",
        ))
        .into()),
        s if is_success(s) => {
            let response: SubmitScoreResponse = parse_body(body);
            Ok(SubmitReceipt {
                name: response
                    .name
                    .filter(|n| !n.is_empty())
                    .unwrap_or_else(|| request.name.clone()),
                score: response.score.unwrap_or(request.score),
                message: response.message,
            })
        }
        s => Err(ApiError::Backend {
            status: s,
            message: error_message(body, "No se pudo guardar la puntuación"),
        }),
    }
}

/// Parse a ranking / Hall of Fame listing, keeping at most `cap` rows
pub fn interpret_listing(status: u16, body: &str, cap: usize) -> ApiResult<Vec<RankingEntry>> {
    if !is_success(status) {
        return Err(ApiError::Backend {
            status,
            message: error_message(body, "Error al leer el ranking."),
        });
    }
    let mut entries: Vec<RankingEntry> =
        serde_json::from_str(body).map_err(|e| ApiError::Backend {
            status,
            message: format!("unreadable listing: {e}"),
        })?;
    entries.truncate(cap);
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn code() -> RedemptionCode {
        RedemptionCode::from_suffix("AB12C").unwrap()
    }

    #[test]
    fn test_validation_ok() {
        let body = r#"{"valid":true,"message":"Código válido."}"#;
        let response = interpret_validation(200, body).unwrap();
        assert!(response.valid);
        assert_eq!(response.message, "Código válido.");
    }

    #[test]
    fn test_validation_statuses() {
        let body = r#"{"valid":false,"message":"nope"}"#;
        assert_eq!(
            interpret_validation(403, body),
            Err(ApiError::Validation(ValidationError::AlreadyUsed))
        );
        assert_eq!(
            interpret_validation(404, body),
            Err(ApiError::Validation(ValidationError::Unknown))
        );
        assert_eq!(
            interpret_validation(400, body),
            Err(ApiError::Validation(ValidationError::Malformed))
        );
        assert_eq!(
            interpret_validation(200, body),
            Err(ApiError::Validation(ValidationError::Rejected("nope".into())))
        );
    }

    #[test]
    fn test_plain_text_error_body() {
        let err = interpret_validation(503, "Service Unavailable").unwrap_err();
        assert_eq!(
            err,
            ApiError::Backend {
                status: 503,
                message: "Service Unavailable".into()
            }
        );
        // The DB-down middleware answers with `error` rather than `message`
        let err = interpret_validation(503, r#"{"error":"Base de datos no disponible."}"#)
            .unwrap_err();
        assert!(err.to_string().contains("Base de datos"));
    }

    #[test]
    fn test_submission_request_checks() {
        assert_eq!(
            SubmitScoreRequest::new(" ", 10, "", "600", code()),
            Err(ValidationError::MissingField("nombre"))
        );
        assert_eq!(
            SubmitScoreRequest::new("Ana", 10, "", "", code()),
            Err(ValidationError::MissingField("teléfono"))
        );
        let req = SubmitScoreRequest::new("Ana", 10, "  ", "600", code()).unwrap();
        assert_eq!(req.email, None);
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["code"], "HONEY-AB12C");
        assert!(json.get("email").is_none());
    }

    #[test]
    fn test_submission_receipt_falls_back_to_request() {
        let req = SubmitScoreRequest::new("Ana", 135, "a@b.c", "600", code()).unwrap();
        let receipt = interpret_submission(200, r#"{"success":true,"message":"ok"}"#, &req).unwrap();
        assert_eq!(receipt.name, "Ana");
        assert_eq!(receipt.score, 135);

        let receipt = interpret_submission(
            200,
            r#"{"success":true,"message":"ok","score":140,"name":"ANA"}"#,
            &req,
        )
        .unwrap();
        assert_eq!(receipt.score, 140);
        assert_eq!(receipt.name, "ANA");
    }

    #[test]
    fn test_submission_failures() {
        let req = SubmitScoreRequest::new("Ana", 1, "", "600", code()).unwrap();
        let used = interpret_submission(403, r#"{"success":false}"#, &req).unwrap_err();
        assert!(used.returns_to_menu());
        assert_eq!(
            interpret_submission(500, r#"{"success":false,"message":"boom"}"#, &req),
            Err(ApiError::Backend {
                status: 500,
                message: "boom".into()
            })
        );
    }

    #[test]
    fn test_listing_truncates_and_ignores_extra_fields() {
        let rows: Vec<String> = (0..40)
            .map(|i| format!(r#"{{"_id":"x{i}","name":"p{i}","score":{},"phone":"1"}}"#, 1000 - i))
            .collect();
        let body = format!("[{}]", rows.join(","));
        let entries = interpret_listing(200, &body, 30).unwrap();
        assert_eq!(entries.len(), 30);
        assert_eq!(entries[0].name, "p0");
        assert_eq!(entries[0].score, 1000);
    }

    #[test]
    fn test_listing_errors() {
        assert!(matches!(
            interpret_listing(200, "<html>", 30),
            Err(ApiError::Backend { status: 200, .. })
        ));
        assert!(matches!(
            interpret_listing(500, r#"{"success":false,"message":"Error al leer el ranking."}"#, 30),
            Err(ApiError::Backend { status: 500, .. })
        ));
    }
}

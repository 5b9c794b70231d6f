use super::AppState;
use super::error::ApiError;
use axum::Json;
use axum::extract::multipart::MultipartError;
use axum::extract::{FromRequest, Multipart, Request, State};
use axum::http::StatusCode;
use axum::http::header::CONTENT_TYPE;
use axum::response::{IntoResponse, Response};
use folio_relay_core::{DeployError, DeployOutcome, DeployRequest};
use serde::{Deserialize, Serialize};

const MISSING_HTML: &str = "html (or portfolio file)";

/// JSON form of a deploy request
#[derive(Debug, Deserialize)]
struct DeployBody {
    username: Option<String>,
    html: Option<String>,
    #[serde(default, alias = "decodeEscapes")]
    decode_escapes: Option<bool>,
}

#[derive(Debug, Serialize)]
struct DeploySuccess {
    success: bool,
    #[serde(flatten)]
    outcome: DeployOutcome,
}

#[derive(Debug, Serialize)]
pub struct Health {
    status: &'static str,
    token: &'static str,
}

/// `GET /health`
pub async fn health(State(state): State<AppState>) -> Json<Health> {
    Json(Health {
        status: "ok",
        token: if state.token_present {
            "present"
        } else {
            "missing"
        },
    })
}

/// `POST /deploy`, JSON or multipart
pub async fn deploy(State(state): State<AppState>, request: Request) -> Response {
    let result = match read_request(&state, request).await {
        Ok(req) => state.orchestrator.deploy(req).await,
        Err(e) => Err(e),
    };

    match result {
        Ok(outcome) => Json(DeploySuccess {
            success: true,
            outcome,
        })
        .into_response(),
        Err(e) => ApiError::new(e, !state.environment.is_production()).into_response(),
    }
}

async fn read_request(state: &AppState, request: Request) -> Result<DeployRequest, DeployError> {
    let is_multipart = request
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|ct| ct.starts_with("multipart/form-data"));

    if is_multipart {
        let multipart = Multipart::from_request(request, state)
            .await
            .map_err(|e| rejection(e.status(), e.body_text(), state.body_limit))?;
        read_multipart(multipart, state.body_limit).await
    } else {
        let Json(body) = Json::<DeployBody>::from_request(request, state)
            .await
            .map_err(|e| rejection(e.status(), e.body_text(), state.body_limit))?;
        from_json(body)
    }
}

fn from_json(body: DeployBody) -> Result<DeployRequest, DeployError> {
    let username = body
        .username
        .filter(|u| !u.trim().is_empty())
        .ok_or_else(|| DeployError::missing_field("username"))?;
    let html = body
        .html
        .filter(|h| !h.trim().is_empty())
        .ok_or_else(|| DeployError::missing_field(MISSING_HTML))?;

    Ok(DeployRequest {
        username,
        html,
        decode_escapes: body.decode_escapes,
    })
}

async fn read_multipart(
    mut multipart: Multipart,
    body_limit: usize,
) -> Result<DeployRequest, DeployError> {
    let mut username = None;
    let mut file_html = None;
    let mut text_html = None;
    let mut decode_escapes = None;

    let reject = move |e: MultipartError| rejection(e.status(), e.body_text(), body_limit);

    while let Some(field) = multipart.next_field().await.map_err(reject)? {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("username") => username = Some(field.text().await.map_err(reject)?),
            Some("portfolio") => {
                let bytes = field.bytes().await.map_err(reject)?;
                let text = String::from_utf8(bytes.to_vec()).map_err(|_| {
                    DeployError::Validation("portfolio file must be UTF-8 text".to_string())
                })?;
                file_html = Some(text);
            }
            Some("html") => text_html = Some(field.text().await.map_err(reject)?),
            Some("decode_escapes") => {
                let value = field.text().await.map_err(reject)?;
                decode_escapes = Some(parse_flag(&value)?);
            }
            _ => {}
        }
    }

    let username = username
        .filter(|u| !u.trim().is_empty())
        .ok_or_else(|| DeployError::missing_field("username"))?;
    let html = file_html
        .into_iter()
        .chain(text_html)
        .find(|h| !h.trim().is_empty())
        .ok_or_else(|| DeployError::missing_field(MISSING_HTML))?;

    Ok(DeployRequest {
        username,
        html,
        decode_escapes,
    })
}

fn parse_flag(value: &str) -> Result<bool, DeployError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" | "" => Ok(false),
        other => Err(DeployError::Validation(format!(
            "decode_escapes must be a boolean, got '{}'",
            other
        ))),
    }
}

fn rejection(status: StatusCode, text: String, body_limit: usize) -> DeployError {
    if status == StatusCode::PAYLOAD_TOO_LARGE {
        DeployError::PayloadTooLarge(body_limit)
    } else {
        DeployError::Validation(format!("Invalid request body: {}", text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_flag() {
        assert!(parse_flag("true").unwrap());
        assert!(parse_flag(" Yes ").unwrap());
        assert!(!parse_flag("0").unwrap());
        assert!(!parse_flag("").unwrap());
        assert!(parse_flag("maybe").is_err());
    }

    #[test]
    fn test_from_json_requires_fields() {
        let body = DeployBody {
            username: None,
            html: Some("<p>x</p>".into()),
            decode_escapes: None,
        };
        assert!(from_json(body).unwrap_err().to_string().contains("username"));

        let body = DeployBody {
            username: Some("ada".into()),
            html: None,
            decode_escapes: None,
        };
        assert!(from_json(body).unwrap_err().to_string().contains("html"));
    }

    #[test]
    fn test_from_json_blank_html_reads_as_missing() {
        let missing = DeployBody {
            username: Some("ada".into()),
            html: None,
            decode_escapes: None,
        };
        let blank = DeployBody {
            username: Some("ada".into()),
            html: Some(" \n\t ".into()),
            decode_escapes: None,
        };

        let missing = from_json(missing).unwrap_err().to_string();
        let blank = from_json(blank).unwrap_err().to_string();
        assert_eq!(blank, missing);
        assert!(blank.contains(MISSING_HTML));
    }
}
